use std::fmt;
use std::io;

#[derive(Debug)]
pub enum HeapFileError {
    FileExists(String),
    FileEof,
    NoRecords,
    NoSpace,
    InvalidRecLen,
    InvalidSlotNo,
    BadScanParm(String),
    BufferFull,
    Io(io::Error),
}

impl fmt::Display for HeapFileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HeapFileError::FileExists(name) => write!(f, "file already exists: {}", name),
            HeapFileError::FileEof => write!(f, "end of file reached"),
            HeapFileError::NoRecords => write!(f, "no more records on page"),
            HeapFileError::NoSpace => write!(f, "page has no space for record"),
            HeapFileError::InvalidRecLen => write!(f, "record length invalid for page size"),
            HeapFileError::InvalidSlotNo => write!(f, "slot number invalid or deleted"),
            HeapFileError::BadScanParm(msg) => write!(f, "bad scan parameter: {}", msg),
            HeapFileError::BufferFull => write!(f, "buffer pool has no free frame"),
            HeapFileError::Io(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl std::error::Error for HeapFileError {}

impl From<io::Error> for HeapFileError {
    fn from(e: io::Error) -> Self {
        HeapFileError::Io(e)
    }
}

pub type Result<T> = std::result::Result<T, HeapFileError>;
