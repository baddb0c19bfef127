// The buffer pool manager lets a heap file read a page into memory and pin
// it, allocate a fresh page, and unpin a page back, tracking dirty frames so
// they get flushed to the disk manager at eviction time or on drop.

use crate::buffer::lru_replacer::LruReplacer;
use crate::buffer::replacer::Replacer;
use crate::common::config::PageId;
use crate::common::error::{HeapFileError, Result};
use crate::disk::disk_manager::DiskManager;
use crate::logging::error_logging::ErrorLogging;
use crate::page::page::Page;
use log::info;
use std::collections::HashMap;
use std::ops::Drop;

pub struct BufferPoolManager<R: Replacer<usize>> {
    pages: Vec<Page>,
    page_table: HashMap<PageId, usize>,
    free_list: Vec<usize>,
    replacer: R,
    disk_mgr: DiskManager,
}

// The default buffer pool manager uses a LRU replacement policy.
pub type DefaultBufferPoolManager = BufferPoolManager<LruReplacer<usize>>;

impl<R: Replacer<usize>> Drop for BufferPoolManager<R> {
    fn drop(&mut self) {
        // Unable to handle I/O errors on destruction.
        self.flush_all_pages().log();
    }
}

impl<R: Replacer<usize>> BufferPoolManager<R> {
    pub fn new(pool_size: usize, disk_mgr: DiskManager) -> Self {
        let mut free_list = Vec::with_capacity(pool_size);
        for idx in 0..pool_size {
            free_list.push(idx);
        }
        BufferPoolManager {
            pages: (0..pool_size).map(|_| Page::new()).collect(),
            page_table: HashMap::new(),
            free_list,
            replacer: R::default(),
            disk_mgr,
        }
    }

    // Fetches the page with the specified page number. Pins the page if it
    // is already resident; otherwise loads it from disk into a free or
    // evicted frame.
    pub fn fetch_page(&mut self, page_no: PageId) -> Result<Page> {
        info!("fetch_page; page_no = {}", page_no);
        if let Some(&idx) = self.page_table.get(&page_no) {
            self.replacer.erase(&idx);
            let page = self.pages[idx].clone();
            page.pin();
            return Ok(page);
        }

        info!("page not resident, loading from disk");
        let idx = self.prepare_frame()?;
        let page = self.pages[idx].clone();
        page.set_page_id(page_no);
        self.page_table.insert(page_no, idx);
        self.disk_mgr.read_page(page_no, &mut page.data_mut())?;
        page.set_is_dirty(false);
        page.pin();
        Ok(page)
    }

    // Allocates a fresh, zeroed page and pins it. Does not write it to disk
    // until it is unpinned dirty or evicted.
    pub fn alloc_page(&mut self) -> Result<Page> {
        info!("alloc_page");
        let idx = self.prepare_frame()?;
        let page = self.pages[idx].clone();
        let page_no = self.disk_mgr.allocate_page();
        page.set_page_id(page_no);
        page.reset();
        page.set_is_dirty(false);
        self.page_table.insert(page_no, idx);
        page.pin();
        Ok(page)
    }

    // Unpins the page with the specified page number. `is_dirty` ORs into
    // the frame's existing dirty flag.
    pub fn unpin_page(&mut self, page_no: PageId, is_dirty: bool) -> Result<()> {
        info!("unpin_page; page_no = {}", page_no);
        let &idx = self
            .page_table
            .get(&page_no)
            .ok_or(HeapFileError::InvalidSlotNo)?;
        let page = &self.pages[idx];
        if is_dirty {
            page.set_is_dirty(true);
        }
        if !page.unpin() {
            return Err(HeapFileError::InvalidSlotNo);
        }
        if page.pin_count() == 0 {
            self.replacer.insert(idx);
        }
        Ok(())
    }

    pub fn flush_page(&mut self, page_no: PageId) -> Result<()> {
        let &idx = self
            .page_table
            .get(&page_no)
            .ok_or(HeapFileError::InvalidSlotNo)?;
        Self::flush_frame(&mut self.disk_mgr, &self.pages[idx])
    }

    // Flushes every dirty resident page to disk. Finishes flushing all pages
    // regardless of I/O errors; returns the first error encountered.
    pub fn flush_file(&mut self) -> Result<()> {
        self.flush_all_pages()
    }

    fn flush_all_pages(&mut self) -> Result<()> {
        let mut first_err = None;
        for &idx in self.page_table.values() {
            if let Err(e) = Self::flush_frame(&mut self.disk_mgr, &self.pages[idx]) {
                if first_err.is_none() {
                    first_err = Some(e);
                }
            }
        }
        match first_err {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    fn flush_frame(disk_mgr: &mut DiskManager, page: &Page) -> Result<()> {
        if page.is_dirty() {
            disk_mgr.write_page(page.page_id(), &page.data())?;
            page.set_is_dirty(false);
        }
        Ok(())
    }

    // Finds a free frame, evicting the replacer's victim if necessary,
    // flushing whatever page previously lived there.
    fn prepare_frame(&mut self) -> Result<usize> {
        if self.free_list.is_empty() {
            match self.replacer.victim() {
                Some(idx) => self.free_list.push(idx),
                None => return Err(HeapFileError::BufferFull),
            }
        }
        let idx = self.free_list.pop().unwrap();
        let old_page = &self.pages[idx];
        self.page_table.remove(&old_page.page_id());
        Self::flush_frame(&mut self.disk_mgr, old_page).log();
        Ok(idx)
    }
}
