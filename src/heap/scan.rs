// A sequential scan cursor over a heap file's page chain, with optional
// pushdown filtering on one fixed-offset attribute and mark/reset support.

use crate::common::config::{PageId, INVALID_PAGE_ID};
use crate::common::error::{HeapFileError, Result};
use crate::common::rid::{Rid, BEFORE_FIRST_SLOT};
use crate::heap::heap_file::HeapFile;
use crate::page::data_page::DataPage;
use std::cmp::Ordering;
use std::convert::TryInto;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AttrType {
    Integer,
    Float,
    String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CompOp {
    Lt,
    Lte,
    Eq,
    Gte,
    Gt,
    Ne,
}

struct Filter {
    offset: usize,
    length: usize,
    attr_type: AttrType,
    op: CompOp,
    bytes: Vec<u8>,
}

pub struct HeapFileScan {
    heap: HeapFile,
    filter: Option<Filter>,
    marked_page_no: PageId,
    marked_rec: Rid,
}

impl HeapFileScan {
    pub fn open(name: &str) -> Result<Self> {
        Ok(HeapFileScan {
            heap: HeapFile::open(name)?,
            filter: None,
            marked_page_no: INVALID_PAGE_ID,
            marked_rec: Rid::default(),
        })
    }

    pub fn start_scan(
        &mut self,
        offset: usize,
        length: usize,
        attr_type: AttrType,
        filter_bytes: Option<Vec<u8>>,
        op: CompOp,
    ) -> Result<()> {
        self.filter = match filter_bytes {
            None => None,
            Some(bytes) => {
                if length < 1 {
                    return Err(HeapFileError::BadScanParm("length must be >= 1".to_string()));
                }
                if matches!(attr_type, AttrType::Integer | AttrType::Float) && length != 4 {
                    return Err(HeapFileError::BadScanParm(
                        "INTEGER/FLOAT attributes must have length 4".to_string(),
                    ));
                }
                Some(Filter {
                    offset,
                    length,
                    attr_type,
                    op,
                    bytes,
                })
            }
        };
        Ok(())
    }

    pub fn scan_next(&mut self) -> Result<Rid> {
        loop {
            if self.heap.cur_page.is_none() {
                let first_page = self.heap.hdr().first_page();
                if first_page == INVALID_PAGE_ID {
                    return Err(HeapFileError::FileEof);
                }
                self.heap.ensure_current_page(first_page)?;
                match self.current_data_page().first_record() {
                    Ok(rid) => self.heap.cur_rec = rid,
                    Err(HeapFileError::NoRecords) => {
                        self.advance_page()?;
                        continue;
                    }
                    Err(e) => return Err(e),
                }
            } else {
                match self.current_data_page().next_record(self.heap.cur_rec.slot_no()) {
                    Ok(rid) => self.heap.cur_rec = rid,
                    Err(HeapFileError::NoRecords) => {
                        self.advance_page()?;
                        continue;
                    }
                    Err(e) => return Err(e),
                }
            }

            let rec = self.current_data_page().get_record(self.heap.cur_rec.slot_no())?;
            if self.matches(&rec) {
                return Ok(self.heap.cur_rec);
            }
        }
    }

    // Unpins the exhausted page and pins the next page in the chain, or
    // fails with `FileEof` if the chain ends here.
    fn advance_page(&mut self) -> Result<()> {
        let next_page = self.current_data_page().next_page();
        self.heap.release_current_page()?;
        if next_page == INVALID_PAGE_ID {
            return Err(HeapFileError::FileEof);
        }
        self.heap.ensure_current_page(next_page)?;
        Ok(())
    }

    fn current_data_page(&self) -> DataPage {
        DataPage::new(self.heap.cur_page.clone().expect("current page must be pinned"))
    }

    fn matches(&self, rec: &[u8]) -> bool {
        let filter = match &self.filter {
            None => return true,
            Some(f) => f,
        };
        if filter.offset + filter.length > rec.len() {
            return false;
        }
        let attr = &rec[filter.offset..(filter.offset + filter.length)];
        match filter.attr_type {
            AttrType::Integer => {
                let a = i32::from_le_bytes(attr.try_into().unwrap());
                let b = i32::from_le_bytes(filter.bytes[0..4].try_into().unwrap());
                compare_ord(a.cmp(&b), filter.op)
            }
            AttrType::Float => {
                let a = f32::from_le_bytes(attr.try_into().unwrap());
                let b = f32::from_le_bytes(filter.bytes[0..4].try_into().unwrap());
                compare_float(a, b, filter.op)
            }
            AttrType::String => compare_ord(attr.cmp(filter.bytes.as_slice()), filter.op),
        }
    }

    pub fn mark_scan(&mut self) {
        self.marked_page_no = self.heap.cur_page_no;
        self.marked_rec = self.heap.cur_rec;
    }

    pub fn reset_scan(&mut self) -> Result<()> {
        if self.marked_page_no != self.heap.cur_page_no {
            self.heap.ensure_current_page(self.marked_page_no)?;
        }
        self.heap.cur_rec = self.marked_rec;
        Ok(())
    }

    pub fn end_scan(&mut self) -> Result<()> {
        self.marked_page_no = INVALID_PAGE_ID;
        self.marked_rec = Rid::default();
        self.heap.release_current_page()
    }

    pub fn delete_record(&mut self) -> Result<()> {
        self.current_data_page().delete_record(self.heap.cur_rec.slot_no())?;
        self.heap.cur_dirty = true;
        self.heap.hdr().dec_rec_cnt();
        self.heap.mark_hdr_dirty();
        Ok(())
    }

    pub fn mark_dirty(&mut self) {
        self.heap.cur_dirty = true;
    }

    pub fn get_record(&self) -> Result<Vec<u8>> {
        self.current_data_page().get_record(self.heap.cur_rec.slot_no())
    }
}

fn compare_ord(ord: Ordering, op: CompOp) -> bool {
    match op {
        CompOp::Lt => ord == Ordering::Less,
        CompOp::Lte => ord != Ordering::Greater,
        CompOp::Eq => ord == Ordering::Equal,
        CompOp::Gte => ord != Ordering::Less,
        CompOp::Gt => ord == Ordering::Greater,
        CompOp::Ne => ord != Ordering::Equal,
    }
}

// IEEE-754 comparisons need their own path so `Ne` against NaN is true and
// every other operator against NaN is false, matching float semantics rather
// than a total order.
fn compare_float(a: f32, b: f32, op: CompOp) -> bool {
    match op {
        CompOp::Lt => a < b,
        CompOp::Lte => a <= b,
        CompOp::Eq => a == b,
        CompOp::Gte => a >= b,
        CompOp::Gt => a > b,
        CompOp::Ne => a != b,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::heap::heap_file::{create_heap_file, destroy_heap_file};
    use crate::heap::insert_scan::InsertFileScan;
    use crate::testing::file_deleter::FileDeleter;

    fn setup(path: &str, rows: &[i32]) {
        create_heap_file(path).unwrap();
        let mut ins = InsertFileScan::open(path).unwrap();
        for &v in rows {
            let mut rec = v.to_le_bytes().to_vec();
            rec.extend_from_slice(b"payload");
            ins.insert_record(&rec).unwrap();
        }
    }

    #[test]
    fn filtered_scan_integer_eq() {
        let path = "/tmp/heapfile_scan.1.testfile";
        let mut deleter = FileDeleter::new();
        deleter.push(path);
        setup(path, &[1, 2, 3, 4, 5]);

        let mut scan = HeapFileScan::open(path).unwrap();
        scan.start_scan(0, 4, AttrType::Integer, Some(3i32.to_le_bytes().to_vec()), CompOp::Eq)
            .unwrap();
        let rid = scan.scan_next().unwrap();
        let rec = scan.get_record().unwrap();
        assert_eq!(3, i32::from_le_bytes(rec[0..4].try_into().unwrap()));
        assert!(matches!(scan.scan_next(), Err(HeapFileError::FileEof)));
        let _ = rid;
        drop(scan);
        destroy_heap_file(path).unwrap();
    }

    #[test]
    fn unfiltered_scan_yields_all_in_order() {
        let path = "/tmp/heapfile_scan.2.testfile";
        let mut deleter = FileDeleter::new();
        deleter.push(path);
        setup(path, &[10, 20, 30]);

        let mut scan = HeapFileScan::open(path).unwrap();
        scan.start_scan(0, 4, AttrType::Integer, None, CompOp::Eq).unwrap();
        let mut seen = Vec::new();
        loop {
            match scan.scan_next() {
                Ok(_) => {
                    let rec = scan.get_record().unwrap();
                    seen.push(i32::from_le_bytes(rec[0..4].try_into().unwrap()));
                }
                Err(HeapFileError::FileEof) => break,
                Err(e) => panic!("unexpected error: {:?}", e),
            }
        }
        assert_eq!(vec![10, 20, 30], seen);
    }

    #[test]
    fn mark_reset_restores_cursor() {
        let path = "/tmp/heapfile_scan.3.testfile";
        let mut deleter = FileDeleter::new();
        deleter.push(path);
        setup(path, &[1, 2, 3]);

        let mut scan = HeapFileScan::open(path).unwrap();
        scan.start_scan(0, 4, AttrType::Integer, None, CompOp::Eq).unwrap();
        scan.scan_next().unwrap();
        scan.mark_scan();
        let first_after_mark = scan.scan_next().unwrap();
        scan.scan_next().ok();
        scan.reset_scan().unwrap();
        let after_reset = scan.scan_next().unwrap();
        assert_eq!(first_after_mark.slot_no(), after_reset.slot_no());
    }

    #[test]
    fn delete_during_scan_empties_file() {
        let path = "/tmp/heapfile_scan.4.testfile";
        let mut deleter = FileDeleter::new();
        deleter.push(path);
        setup(path, &[1, 2, 3]);

        {
            let mut scan = HeapFileScan::open(path).unwrap();
            scan.start_scan(0, 4, AttrType::Integer, None, CompOp::Eq).unwrap();
            while scan.scan_next().is_ok() {
                scan.delete_record().unwrap();
            }
        }

        let heap = HeapFile::open(path).unwrap();
        assert_eq!(0, heap.get_rec_cnt());
    }
}
