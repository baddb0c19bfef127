// The file header page is page 1 of every heap file. Layout (size in bytes):
//  -----------------------------------------------------------
// | fileName (32) | firstPage (4) | lastPage (4) | recCnt (4) |
//  -----------------------------------------------------------

use crate::common::config::{PageId, INVALID_PAGE_ID, MAX_FILENAME_LEN};
use crate::common::reinterpret;
use crate::page::page::Page;

const NAME_OFFSET: usize = 0;
const FIRST_PAGE_OFFSET: usize = MAX_FILENAME_LEN;
const LAST_PAGE_OFFSET: usize = MAX_FILENAME_LEN + 4;
const REC_CNT_OFFSET: usize = MAX_FILENAME_LEN + 8;

pub struct FileHdrPage(Page);

impl FileHdrPage {
    pub fn new(page: Page) -> Self {
        FileHdrPage(page)
    }

    pub fn init(&self, file_name: &str) {
        self.0.reset();
        self.set_file_name(file_name);
        self.set_first_page(INVALID_PAGE_ID);
        self.set_last_page(INVALID_PAGE_ID);
        self.set_rec_cnt(0);
    }

    pub fn file_name(&self) -> String {
        let data = self.0.data();
        reinterpret::read_str(&data[NAME_OFFSET..(NAME_OFFSET + MAX_FILENAME_LEN)]).to_string()
    }

    pub fn set_file_name(&self, name: &str) {
        let mut data = self.0.data_mut();
        reinterpret::write_str(&mut data[NAME_OFFSET..(NAME_OFFSET + MAX_FILENAME_LEN)], name);
    }

    pub fn first_page(&self) -> PageId {
        reinterpret::read_i32(&self.0.data()[FIRST_PAGE_OFFSET..])
    }

    pub fn set_first_page(&self, page_no: PageId) {
        reinterpret::write_i32(&mut self.0.data_mut()[FIRST_PAGE_OFFSET..], page_no);
    }

    pub fn last_page(&self) -> PageId {
        reinterpret::read_i32(&self.0.data()[LAST_PAGE_OFFSET..])
    }

    pub fn set_last_page(&self, page_no: PageId) {
        reinterpret::write_i32(&mut self.0.data_mut()[LAST_PAGE_OFFSET..], page_no);
    }

    pub fn rec_cnt(&self) -> i32 {
        reinterpret::read_i32(&self.0.data()[REC_CNT_OFFSET..])
    }

    pub fn set_rec_cnt(&self, count: i32) {
        reinterpret::write_i32(&mut self.0.data_mut()[REC_CNT_OFFSET..], count);
    }

    pub fn inc_rec_cnt(&self) {
        let count = self.rec_cnt();
        self.set_rec_cnt(count + 1);
    }

    pub fn dec_rec_cnt(&self) {
        let count = self.rec_cnt();
        self.set_rec_cnt(count - 1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_then_round_trip_fields() {
        let page = Page::new();
        let hdr = FileHdrPage::new(page);
        hdr.init("orders.db");
        assert_eq!("orders.db", hdr.file_name());
        assert_eq!(INVALID_PAGE_ID, hdr.first_page());
        assert_eq!(INVALID_PAGE_ID, hdr.last_page());
        assert_eq!(0, hdr.rec_cnt());

        hdr.set_first_page(2);
        hdr.set_last_page(5);
        hdr.inc_rec_cnt();
        hdr.inc_rec_cnt();
        hdr.dec_rec_cnt();
        assert_eq!(2, hdr.first_page());
        assert_eq!(5, hdr.last_page());
        assert_eq!(1, hdr.rec_cnt());
    }

    #[test]
    fn long_name_is_truncated_not_overrun() {
        let page = Page::new();
        let hdr = FileHdrPage::new(page);
        let long_name = "a".repeat(100);
        hdr.init(&long_name);
        // Name field must not spill into firstPage's bytes.
        assert_eq!(INVALID_PAGE_ID, hdr.first_page());
    }
}
