// A page is a fixed-size in-memory buffer shared between a heap file and the
// buffer pool that owns its frame. It is represented as a cheaply-cloneable
// handle rather than a borrowed reference, so a heap file can hold on to its
// "currently pinned" page across many method calls without fighting the
// borrow checker; soundness of sharing mutable state this way relies on the
// single-threaded-per-instance access pattern of the heap file layer.

use crate::common::config::{PageId, INVALID_PAGE_ID, PAGE_SIZE};
use std::cell::{Ref, RefCell, RefMut};
use std::rc::Rc;

struct PageInner {
    data: [u8; PAGE_SIZE],
    page_id: PageId,
    pin_count: i32,
    is_dirty: bool,
}

impl Default for PageInner {
    fn default() -> Self {
        PageInner {
            data: [0; PAGE_SIZE],
            page_id: INVALID_PAGE_ID,
            pin_count: 0,
            is_dirty: false,
        }
    }
}

#[derive(Clone)]
pub struct Page(Rc<RefCell<PageInner>>);

impl Page {
    pub fn new() -> Self {
        Page(Rc::new(RefCell::new(PageInner::default())))
    }

    pub fn page_id(&self) -> PageId {
        self.0.borrow().page_id
    }

    pub fn set_page_id(&self, page_id: PageId) {
        self.0.borrow_mut().page_id = page_id;
    }

    pub fn pin_count(&self) -> i32 {
        self.0.borrow().pin_count
    }

    // Pins the page, incrementing the pin count by 1.
    pub fn pin(&self) {
        self.0.borrow_mut().pin_count += 1;
    }

    // Unpins the page, decrementing the pin count by 1. Returns false iff the
    // pin count was already <= 0, meaning the page was not actually pinned.
    pub fn unpin(&self) -> bool {
        let mut inner = self.0.borrow_mut();
        if inner.pin_count <= 0 {
            false
        } else {
            inner.pin_count -= 1;
            true
        }
    }

    pub fn is_dirty(&self) -> bool {
        self.0.borrow().is_dirty
    }

    pub fn set_is_dirty(&self, is_dirty: bool) {
        self.0.borrow_mut().is_dirty = is_dirty;
    }

    pub fn data(&self) -> Ref<'_, [u8; PAGE_SIZE]> {
        Ref::map(self.0.borrow(), |inner| &inner.data)
    }

    pub fn data_mut(&self) -> RefMut<'_, [u8; PAGE_SIZE]> {
        RefMut::map(self.0.borrow_mut(), |inner| &mut inner.data)
    }

    // Zeroes the page's content in place. Does not touch page_id/pin/dirty.
    pub fn reset(&self) {
        for byte in self.0.borrow_mut().data.iter_mut() {
            *byte = 0;
        }
    }
}

impl Default for Page {
    fn default() -> Self {
        Page::new()
    }
}
