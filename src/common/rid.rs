use crate::common::config::{PageId, INVALID_PAGE_ID};
use std::fmt;

// Sentinel slot number meaning "before the first record on this page".
pub const BEFORE_FIRST_SLOT: i32 = -1;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rid {
    page_no: PageId,
    slot_no: i32,
}

impl Rid {
    pub fn new(page_no: PageId, slot_no: i32) -> Self {
        Rid { page_no, slot_no }
    }

    pub fn page_no(&self) -> PageId {
        self.page_no
    }

    pub fn slot_no(&self) -> i32 {
        self.slot_no
    }
}

impl Default for Rid {
    fn default() -> Self {
        Rid {
            page_no: INVALID_PAGE_ID,
            slot_no: BEFORE_FIRST_SLOT,
        }
    }
}

impl fmt::Display for Rid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Rid[page_no: {}, slot_no: {}]", self.page_no, self.slot_no)
    }
}
