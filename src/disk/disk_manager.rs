// The disk manager takes care of creating, opening, closing and destroying
// the flat file backing a heap file, and of the allocation of fresh page
// numbers and read/write of fixed-size pages within that file.

use crate::common::config::{PageId, HEADER_PAGE_ID, PAGE_SIZE};
use crate::common::error::{HeapFileError, Result};
use std::fs;
use std::fs::File;
use std::fs::OpenOptions;
use std::io::Read;
use std::io::Seek;
use std::io::SeekFrom;
use std::io::Write;
use std::path::Path;

pub struct DiskManager {
    file: File,
    next_page_id: PageId,
}

impl DiskManager {
    // Creates a new, empty file for the heap file. Fails if one already
    // exists at `path`.
    pub fn create(path: &str) -> Result<()> {
        if Path::new(path).exists() {
            return Err(HeapFileError::FileExists(path.to_string()));
        }
        OpenOptions::new().write(true).create_new(true).open(path)?;
        Ok(())
    }

    pub fn destroy(path: &str) -> Result<()> {
        fs::remove_file(path)?;
        Ok(())
    }

    pub fn open(path: &str) -> Result<Self> {
        let file = OpenOptions::new().read(true).write(true).open(path)?;
        let len = file.metadata()?.len() as usize;
        let next_page_id = HEADER_PAGE_ID + (len / PAGE_SIZE) as PageId;
        Ok(DiskManager { file, next_page_id })
    }

    // Writes data to the page with the specified page number on disk. The
    // caller needs to ensure that `page_no` is a page already allocated via
    // `allocate_page`.
    pub fn write_page(&mut self, page_no: PageId, data: &[u8; PAGE_SIZE]) -> Result<()> {
        let offset = ((page_no - HEADER_PAGE_ID) as u64) * (PAGE_SIZE as u64);
        self.file.seek(SeekFrom::Start(offset))?;
        Self::write_all(&mut self.file, data)?;
        self.file.sync_data()?;
        Ok(())
    }

    // Reads data from the page with the specified page number on disk.
    pub fn read_page(&mut self, page_no: PageId, data: &mut [u8; PAGE_SIZE]) -> Result<()> {
        let offset = ((page_no - HEADER_PAGE_ID) as u64) * (PAGE_SIZE as u64);
        self.file.seek(SeekFrom::Start(offset))?;
        Self::read_all(&mut self.file, data)?;
        Ok(())
    }

    // Allocates and returns a fresh page number; does not write anything.
    pub fn allocate_page(&mut self) -> PageId {
        let id = self.next_page_id;
        self.next_page_id += 1;
        id
    }

    fn write_all(file: &mut File, data: &[u8]) -> Result<()> {
        let mut pos = 0;
        while pos < data.len() {
            let written = file.write(&data[pos..])?;
            if written == 0 {
                return Err(HeapFileError::Io(std::io::Error::new(
                    std::io::ErrorKind::WriteZero,
                    "wrote 0 bytes",
                )));
            }
            pos += written;
        }
        Ok(())
    }

    fn read_all(file: &mut File, data: &mut [u8]) -> Result<()> {
        let mut pos = 0;
        while pos < data.len() {
            let read = file.read(&mut data[pos..])?;
            if read == 0 {
                return Err(HeapFileError::Io(std::io::Error::new(
                    std::io::ErrorKind::UnexpectedEof,
                    "read 0 bytes",
                )));
            }
            pos += read;
        }
        Ok(())
    }
}
