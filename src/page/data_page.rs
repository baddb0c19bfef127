// Data page layout:
//  ------------------------------------------------------------------
// | nextPage (4) | slotCount (2) | freeSpacePtr (2) | slot directory... |
//  ------------------------------------------------------------------
// The slot directory grows forward from the fixed header; record bodies grow
// backward from the end of the page. Each slot is a (u16 offset, i16 length)
// pair; a length of -1 marks a deleted slot whose directory entry is kept so
// existing RIDs into this page stay valid.

use crate::common::config::{PageId, DPFIXED, INVALID_PAGE_ID, PAGE_SIZE};
use crate::common::error::{HeapFileError, Result};
use crate::common::reinterpret;
use crate::common::rid::Rid;
use crate::page::page::Page;

const SLOT_ENTRY_SIZE: usize = 4;
const DELETED_LEN: i16 = -1;

pub struct DataPage(Page);

impl DataPage {
    pub fn new(page: Page) -> Self {
        DataPage(page)
    }

    pub fn init(&self, next_page: PageId) {
        self.0.reset();
        self.set_next_page(next_page);
        self.set_slot_count(0);
        self.set_free_space_ptr(PAGE_SIZE as u16);
    }

    pub fn next_page(&self) -> PageId {
        reinterpret::read_i32(&self.0.data()[0..])
    }

    pub fn set_next_page(&self, page_no: PageId) {
        reinterpret::write_i32(&mut self.0.data_mut()[0..], page_no);
    }

    fn slot_count(&self) -> u16 {
        reinterpret::read_u16(&self.0.data()[4..])
    }

    fn set_slot_count(&self, n: u16) {
        reinterpret::write_u16(&mut self.0.data_mut()[4..], n);
    }

    fn free_space_ptr(&self) -> u16 {
        reinterpret::read_u16(&self.0.data()[6..])
    }

    fn set_free_space_ptr(&self, ptr: u16) {
        reinterpret::write_u16(&mut self.0.data_mut()[6..], ptr);
    }

    fn slot_offset(slot_no: i32) -> usize {
        DPFIXED + (slot_no as usize) * SLOT_ENTRY_SIZE
    }

    fn read_slot(&self, slot_no: i32) -> (u16, i16) {
        let off = Self::slot_offset(slot_no);
        let data = self.0.data();
        (
            reinterpret::read_u16(&data[off..]),
            reinterpret::read_i16(&data[(off + 2)..]),
        )
    }

    fn write_slot(&self, slot_no: i32, offset: u16, length: i16) {
        let off = Self::slot_offset(slot_no);
        let mut data = self.0.data_mut();
        reinterpret::write_u16(&mut data[off..], offset);
        reinterpret::write_i16(&mut data[(off + 2)..], length);
    }

    // Bytes available for a new slot entry plus its record body.
    pub fn free_space(&self) -> usize {
        let used_by_slots = DPFIXED + (self.slot_count() as usize) * SLOT_ENTRY_SIZE;
        let body_start = self.free_space_ptr() as usize;
        body_start.saturating_sub(used_by_slots)
    }

    pub fn insert_record(&self, bytes: &[u8]) -> Result<i32> {
        let len = bytes.len();
        let count = self.slot_count();

        let mut reuse_slot = None;
        for s in 0..count {
            let (_, l) = self.read_slot(s as i32);
            if l == DELETED_LEN {
                reuse_slot = Some(s as i32);
                break;
            }
        }

        let needed = len + if reuse_slot.is_none() { SLOT_ENTRY_SIZE } else { 0 };
        if needed > self.free_space() {
            return Err(HeapFileError::NoSpace);
        }

        let new_body_start = self.free_space_ptr() as usize - len;
        self.0.data_mut()[new_body_start..(new_body_start + len)].copy_from_slice(bytes);
        self.set_free_space_ptr(new_body_start as u16);

        let slot_no = match reuse_slot {
            Some(s) => {
                self.write_slot(s, new_body_start as u16, len as i16);
                s
            }
            None => {
                let s = count as i32;
                self.write_slot(s, new_body_start as u16, len as i16);
                self.set_slot_count(count + 1);
                s
            }
        };
        Ok(slot_no)
    }

    pub fn get_record(&self, slot_no: i32) -> Result<Vec<u8>> {
        let (offset, length) = self.validated_slot(slot_no)?;
        let data = self.0.data();
        Ok(data[(offset as usize)..(offset as usize + length as usize)].to_vec())
    }

    pub fn delete_record(&self, slot_no: i32) -> Result<()> {
        let (offset, _) = self.validated_slot(slot_no)?;
        self.write_slot(slot_no, offset, DELETED_LEN);
        let count = self.slot_count();
        if slot_no as u16 == count - 1 {
            self.set_slot_count(count - 1);
        }
        Ok(())
    }

    pub fn first_record(&self) -> Result<Rid> {
        let count = self.slot_count();
        for s in 0..count {
            let (_, l) = self.read_slot(s as i32);
            if l != DELETED_LEN {
                return Ok(Rid::new(self.page_id(), s as i32));
            }
        }
        Err(HeapFileError::NoRecords)
    }

    // Returns the next live slot strictly after `cur_slot`. Tolerates
    // `cur_slot` referring to an already-deleted slot; it is only ever used
    // as a starting index for the forward search.
    pub fn next_record(&self, cur_slot: i32) -> Result<Rid> {
        let count = self.slot_count() as i32;
        let mut s = cur_slot + 1;
        while s < count {
            let (_, l) = self.read_slot(s);
            if l != DELETED_LEN {
                return Ok(Rid::new(self.page_id(), s));
            }
            s += 1;
        }
        Err(HeapFileError::NoRecords)
    }

    fn page_id(&self) -> PageId {
        let id = self.0.page_id();
        debug_assert_ne!(id, INVALID_PAGE_ID);
        id
    }

    fn validated_slot(&self, slot_no: i32) -> Result<(u16, i16)> {
        if slot_no < 0 || slot_no as u16 >= self.slot_count() {
            return Err(HeapFileError::InvalidSlotNo);
        }
        let (offset, length) = self.read_slot(slot_no);
        if length == DELETED_LEN {
            return Err(HeapFileError::InvalidSlotNo);
        }
        Ok((offset, length))
    }
}
