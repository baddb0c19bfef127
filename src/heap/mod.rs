pub mod heap_file;
pub mod insert_scan;
pub mod scan;

pub use heap_file::{create_heap_file, destroy_heap_file, HeapFile};
pub use insert_scan::InsertFileScan;
pub use scan::{AttrType, CompOp, HeapFileScan};
