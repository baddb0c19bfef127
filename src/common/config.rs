// Heap file layer configuration.

pub const INVALID_PAGE_ID: i32 = -1; // Represents "no page".
pub const HEADER_PAGE_ID: i32 = 1; // The file header page's page number.
pub const PAGE_SIZE: usize = 4096; // Size of a page in bytes.
pub const DPFIXED: usize = 8; // Size of a data page's fixed header.
pub const MAX_FILENAME_LEN: usize = 32; // Width of the name field on the header page.
pub const DEFAULT_POOL_SIZE: usize = 32; // Default number of frames per heap file's buffer pool.

pub type PageId = i32;
