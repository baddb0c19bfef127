// An append-only cursor over a heap file's tail page, growing the page
// chain when the tail fills.

use crate::common::config::INVALID_PAGE_ID;
use crate::common::error::{HeapFileError, Result};
use crate::common::rid::{Rid, BEFORE_FIRST_SLOT};
use crate::heap::heap_file::HeapFile;
use crate::page::data_page::DataPage;
use crate::logging::error_logging::ErrorLogging;

pub struct InsertFileScan {
    heap: HeapFile,
}

impl InsertFileScan {
    pub fn open(name: &str) -> Result<Self> {
        Ok(InsertFileScan {
            heap: HeapFile::open(name)?,
        })
    }

    pub fn insert_record(&mut self, rec: &[u8]) -> Result<Rid> {
        if rec.len() > HeapFile::max_record_len() {
            return Err(HeapFileError::InvalidRecLen);
        }

        let last_page = self.heap.hdr().last_page();
        self.heap.ensure_current_page(last_page)?;

        loop {
            let data_page = DataPage::new(self.heap.cur_page.clone().expect("tail page must be pinned"));
            match data_page.insert_record(rec) {
                Ok(slot_no) => {
                    self.heap.cur_dirty = true;
                    self.heap.hdr().inc_rec_cnt();
                    self.heap.mark_hdr_dirty();
                    return Ok(Rid::new(self.heap.cur_page_no, slot_no));
                }
                Err(HeapFileError::NoSpace) => {
                    self.grow_chain()?;
                }
                Err(e) => return Err(e),
            }
        }
    }

    // Allocates a fresh tail page, links it from the former tail, and adopts
    // it as current. The retried insert cannot fail with `NoSpace` again
    // since records are bounded to fit an empty page.
    fn grow_chain(&mut self) -> Result<()> {
        let new_page = self.heap.pool.alloc_page()?;
        let new_page_no = new_page.page_id();
        DataPage::new(new_page.clone()).init(INVALID_PAGE_ID);

        let old_tail = DataPage::new(self.heap.cur_page.clone().expect("tail page must be pinned"));
        old_tail.set_next_page(new_page_no);
        self.heap.pool.unpin_page(self.heap.cur_page_no, true)?;

        self.heap.hdr().set_last_page(new_page_no);
        self.heap.mark_hdr_dirty();

        self.heap.cur_page = Some(new_page);
        self.heap.cur_page_no = new_page_no;
        self.heap.cur_dirty = false;
        self.heap.cur_rec = Rid::new(new_page_no, BEFORE_FIRST_SLOT);
        Ok(())
    }
}

impl Drop for InsertFileScan {
    fn drop(&mut self) {
        self.heap.cur_dirty = true;
        self.heap.release_current_page().log();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::config::{DPFIXED, PAGE_SIZE};
    use crate::heap::heap_file::create_heap_file;
    use crate::testing::file_deleter::FileDeleter;

    #[test]
    fn single_insert_round_trips() {
        let path = "/tmp/heapfile_insert_scan.1.testfile";
        let mut deleter = FileDeleter::new();
        deleter.push(path);

        create_heap_file(path).unwrap();
        let mut ins = InsertFileScan::open(path).unwrap();
        let rec = vec![7u8; 50];
        let rid = ins.insert_record(&rec).unwrap();
        drop(ins);

        let mut heap = HeapFile::open(path).unwrap();
        assert_eq!(1, heap.get_rec_cnt());
        assert_eq!(rec, heap.get_record(rid).unwrap());
    }

    #[test]
    fn oversized_record_is_rejected() {
        let path = "/tmp/heapfile_insert_scan.2.testfile";
        let mut deleter = FileDeleter::new();
        deleter.push(path);

        create_heap_file(path).unwrap();
        let mut ins = InsertFileScan::open(path).unwrap();
        let too_big = vec![0u8; PAGE_SIZE - DPFIXED + 1];
        assert!(matches!(ins.insert_record(&too_big), Err(HeapFileError::InvalidRecLen)));
    }

    #[test]
    fn overflow_grows_page_chain() {
        let path = "/tmp/heapfile_insert_scan.3.testfile";
        let mut deleter = FileDeleter::new();
        deleter.push(path);

        create_heap_file(path).unwrap();
        let rec_len = (PAGE_SIZE - DPFIXED) / 2 + 1;
        let rec = vec![1u8; rec_len];

        let mut ins = InsertFileScan::open(path).unwrap();
        let first_page;
        {
            let heap = HeapFile::open(path).unwrap();
            first_page = heap.hdr().last_page();
        }
        ins.insert_record(&rec).unwrap();
        ins.insert_record(&rec).unwrap();
        ins.insert_record(&rec).unwrap();
        drop(ins);

        let heap = HeapFile::open(path).unwrap();
        assert_eq!(3, heap.get_rec_cnt());
        assert_ne!(first_page, heap.hdr().last_page());
    }
}
