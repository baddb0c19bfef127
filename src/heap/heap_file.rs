// A heap file owns one open data file: a dedicated buffer pool over a
// dedicated disk manager, the header page's pin, and at most one pinned data
// page. Scans and inserts embed a `HeapFile` by value and add their own
// cursor state on top.

use crate::buffer::buffer_pool_manager::DefaultBufferPoolManager;
use crate::common::config::{PageId, HEADER_PAGE_ID, DEFAULT_POOL_SIZE, DPFIXED, INVALID_PAGE_ID, PAGE_SIZE};
use crate::common::error::{HeapFileError, Result};
use crate::common::rid::{Rid, BEFORE_FIRST_SLOT};
use crate::disk::disk_manager::DiskManager;
use crate::logging::error_logging::ErrorLogging;
use crate::page::data_page::DataPage;
use crate::page::header_page::FileHdrPage;
use crate::page::page::Page;
use log::info;

// Creates a new heap file named `name`: allocates and initializes the header
// page plus a single empty data page, and writes both directly to disk since
// no buffer pool exists yet to pin them through.
pub fn create_heap_file(name: &str) -> Result<()> {
    info!("create_heap_file; name = {}", name);
    DiskManager::create(name)?;
    let mut disk_mgr = DiskManager::open(name)?;

    let hdr_page_no = disk_mgr.allocate_page();
    debug_assert_eq!(HEADER_PAGE_ID, hdr_page_no);
    let data_page_no = disk_mgr.allocate_page();

    let hdr_page = Page::new();
    hdr_page.set_page_id(hdr_page_no);
    let hdr = FileHdrPage::new(hdr_page.clone());
    hdr.init(name);
    hdr.set_first_page(data_page_no);
    hdr.set_last_page(data_page_no);

    let data_page = Page::new();
    data_page.set_page_id(data_page_no);
    let data = DataPage::new(data_page.clone());
    data.init(INVALID_PAGE_ID);

    disk_mgr.write_page(hdr_page_no, &hdr_page.data())?;
    disk_mgr.write_page(data_page_no, &data_page.data())?;
    Ok(())
}

pub fn destroy_heap_file(name: &str) -> Result<()> {
    info!("destroy_heap_file; name = {}", name);
    DiskManager::destroy(name)
}

pub struct HeapFile {
    pub(crate) pool: DefaultBufferPoolManager,
    pub(crate) hdr_page: Page,
    pub(crate) hdr_dirty: bool,
    pub(crate) cur_page: Option<Page>,
    pub(crate) cur_page_no: PageId,
    pub(crate) cur_dirty: bool,
    pub(crate) cur_rec: Rid,
}

impl HeapFile {
    pub fn open(name: &str) -> Result<Self> {
        info!("HeapFile::open; name = {}", name);
        let disk_mgr = DiskManager::open(name)?;
        let mut pool = DefaultBufferPoolManager::new(DEFAULT_POOL_SIZE, disk_mgr);

        let hdr_page = match pool.fetch_page(HEADER_PAGE_ID) {
            Ok(p) => p,
            Err(e) => return Err(e),
        };
        let hdr = FileHdrPage::new(hdr_page.clone());
        let first_page = hdr.first_page();

        let (cur_page, cur_page_no, cur_rec) = if first_page != INVALID_PAGE_ID {
            match pool.fetch_page(first_page) {
                Ok(p) => (Some(p), first_page, Rid::new(first_page, BEFORE_FIRST_SLOT)),
                Err(e) => {
                    pool.unpin_page(HEADER_PAGE_ID, false).log();
                    return Err(e);
                }
            }
        } else {
            (None, INVALID_PAGE_ID, Rid::new(INVALID_PAGE_ID, BEFORE_FIRST_SLOT))
        };

        Ok(HeapFile {
            pool,
            hdr_page,
            hdr_dirty: false,
            cur_page,
            cur_page_no,
            cur_dirty: false,
            cur_rec,
        })
    }

    pub fn get_rec_cnt(&self) -> i32 {
        FileHdrPage::new(self.hdr_page.clone()).rec_cnt()
    }

    pub fn get_record(&mut self, rid: Rid) -> Result<Vec<u8>> {
        self.ensure_current_page(rid.page_no())?;
        self.cur_rec = rid;
        let page = self.cur_page.as_ref().ok_or(HeapFileError::InvalidSlotNo)?;
        DataPage::new(page.clone()).get_record(rid.slot_no())
    }

    // Makes `page_no` the currently pinned data page, unpinning whatever was
    // pinned before (with its accumulated dirty flag) if it differs.
    pub(crate) fn ensure_current_page(&mut self, page_no: PageId) -> Result<()> {
        if self.cur_page.is_some() && self.cur_page_no == page_no {
            return Ok(());
        }
        self.release_current_page()?;
        let page = self.pool.fetch_page(page_no)?;
        self.cur_page = Some(page);
        self.cur_page_no = page_no;
        self.cur_dirty = false;
        Ok(())
    }

    pub(crate) fn release_current_page(&mut self) -> Result<()> {
        if self.cur_page.take().is_some() {
            self.pool.unpin_page(self.cur_page_no, self.cur_dirty)?;
        }
        self.cur_page_no = INVALID_PAGE_ID;
        self.cur_dirty = false;
        Ok(())
    }

    pub(crate) fn mark_hdr_dirty(&mut self) {
        self.hdr_dirty = true;
    }

    pub(crate) fn hdr(&self) -> FileHdrPage {
        FileHdrPage::new(self.hdr_page.clone())
    }

    pub(crate) fn max_record_len() -> usize {
        PAGE_SIZE - DPFIXED
    }
}

impl Drop for HeapFile {
    fn drop(&mut self) {
        self.release_current_page().log();
        self.pool
            .unpin_page(HEADER_PAGE_ID, self.hdr_dirty)
            .log();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::file_deleter::FileDeleter;

    #[test]
    fn create_then_open_has_empty_record_count() {
        let path = "/tmp/heapfile_heap_file.1.testfile";
        let mut deleter = FileDeleter::new();
        deleter.push(path);

        create_heap_file(path).unwrap();
        let heap = HeapFile::open(path).unwrap();
        assert_eq!(0, heap.get_rec_cnt());
    }

    #[test]
    fn create_twice_fails_with_file_exists() {
        let path = "/tmp/heapfile_heap_file.2.testfile";
        let mut deleter = FileDeleter::new();
        deleter.push(path);

        create_heap_file(path).unwrap();
        assert!(matches!(create_heap_file(path), Err(HeapFileError::FileExists(_))));
    }
}
