#[cfg(test)]
use mockall::automock;

use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::Path;

use log::{debug, info};

use crate::dbms::types::{PageData, PageId, MAX_PAGES, PAGE_SIZE};

#[derive(Debug, PartialEq, Eq)]
pub enum DiskManagerError {
    /// The page id lies outside the store's current page count
    PageOutOfBounds(PageId),
    /// The store cannot grow past the page id bound
    PageIdOverflow,
    /// The underlying file operation failed
    Io(String),
}

impl From<std::io::Error> for DiskManagerError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e.to_string())
    }
}

impl fmt::Display for DiskManagerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiskManagerError::PageOutOfBounds(page_id) => {
                write!(f, "page store error: page {} is out of bounds", page_id)
            }
            DiskManagerError::PageIdOverflow => {
                write!(f, "page store error: store is at its {} page bound", MAX_PAGES)
            }
            DiskManagerError::Io(message) => {
                write!(f, "page store IO error: {}", message)
            }
        }
    }
}

impl std::error::Error for DiskManagerError {}

/// The on-disk page store. Pages are opaque fixed-size byte blocks addressed
/// by id; the store also keeps the use-bit table that records which ids are
/// allocated, and counts every page read and write for reporting.
#[cfg_attr(test, automock)]
pub trait IDiskManager {
    /// Read a page's bytes from the store.
    fn read_page(&mut self, page_id: PageId) -> Result<PageData, DiskManagerError>;
    /// Write a page's bytes to the store.
    fn write_page(&mut self, page_id: PageId, page: &PageData) -> Result<(), DiskManagerError>;
    /// Whether a page id is marked allocated.
    fn page_in_use(&self, page_id: PageId) -> bool;
    /// Mark or clear a page id's use bit.
    fn set_page_use(&mut self, page_id: PageId, used: bool);
    /// Number of pages the store currently holds.
    fn page_count(&self) -> usize;
    /// Append one zeroed page to the store and mark it used, returning its
    /// id.
    fn grow_by_one_page(&mut self) -> Result<PageId, DiskManagerError>;
    /// Page reads and writes performed since the last reset.
    fn io_count(&self) -> u64;
    fn reset_io_count(&mut self);
}

/// Page store over a flat file of consecutive pages with no header or
/// metadata: the file length fixes the page count. Because nothing on disk
/// records allocation, every existing page is marked used on open.
pub struct FileDiskManager {
    file: File,
    num_pages: usize,
    use_bits: Vec<bool>,
    io_count: u64,
}

impl FileDiskManager {
    /// Open the backing file, creating it if it does not exist. Dropping the
    /// manager closes the file.
    pub fn open(path: &Path) -> Result<Self, DiskManagerError> {
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .open(path)?;
        let num_pages = (file.metadata()?.len() / PAGE_SIZE as u64) as usize;

        let mut use_bits = vec![false; MAX_PAGES];
        for bit in use_bits.iter_mut().take(num_pages) {
            *bit = true;
        }

        info!(
            "opened page store {} holding {} pages",
            path.display(),
            num_pages
        );
        Ok(Self {
            file,
            num_pages,
            use_bits,
            io_count: 0,
        })
    }

    fn page_offset(page_id: PageId) -> u64 {
        page_id as u64 * PAGE_SIZE as u64
    }
}

impl IDiskManager for FileDiskManager {
    fn read_page(&mut self, page_id: PageId) -> Result<PageData, DiskManagerError> {
        if page_id as usize >= self.num_pages {
            return Err(DiskManagerError::PageOutOfBounds(page_id));
        }
        self.file.seek(SeekFrom::Start(Self::page_offset(page_id)))?;
        let mut page = [0u8; PAGE_SIZE];
        self.file.read_exact(&mut page)?;
        self.io_count += 1;
        Ok(page)
    }

    fn write_page(&mut self, page_id: PageId, page: &PageData) -> Result<(), DiskManagerError> {
        if page_id as usize >= self.num_pages {
            return Err(DiskManagerError::PageOutOfBounds(page_id));
        }
        self.file.seek(SeekFrom::Start(Self::page_offset(page_id)))?;
        self.file.write_all(page)?;
        self.io_count += 1;
        Ok(())
    }

    fn page_in_use(&self, page_id: PageId) -> bool {
        self.use_bits[page_id as usize]
    }

    fn set_page_use(&mut self, page_id: PageId, used: bool) {
        self.use_bits[page_id as usize] = used;
    }

    fn page_count(&self) -> usize {
        self.num_pages
    }

    fn grow_by_one_page(&mut self) -> Result<PageId, DiskManagerError> {
        if self.num_pages >= MAX_PAGES {
            return Err(DiskManagerError::PageIdOverflow);
        }
        self.file.seek(SeekFrom::End(0))?;
        self.file.write_all(&[0u8; PAGE_SIZE])?;
        let page_id = self.num_pages as PageId;
        self.num_pages += 1;
        self.use_bits[page_id as usize] = true;
        self.io_count += 1;
        debug!("grew page store to {} pages", self.num_pages);
        Ok(page_id)
    }

    fn io_count(&self) -> u64 {
        self.io_count
    }

    fn reset_io_count(&mut self) {
        self.io_count = 0;
    }
}
