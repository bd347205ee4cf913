use std::collections::HashMap;

use crate::dbms::types::{PageData, PageId, MAX_PAGES, PAGE_SIZE};

use super::{DiskManagerError, IDiskManager};

/// A purely in-memory implementation of the IDiskManager trait for testing
/// purposes. Also exposes the underlying data structures for inspection in
/// tests.
pub struct InMemoryDiskManager {
    /// page_id -> page_data; pages grown but never written read back zeroed.
    pub pages: HashMap<PageId, Vec<u8>>,
    pub use_bits: Vec<bool>,
    pub num_pages: usize,
    pub io_count: u64,
    /// Page id bound; tests lower this to exercise overflow.
    pub max_pages: usize,
}

impl InMemoryDiskManager {
    pub fn new() -> Self {
        Self {
            pages: HashMap::new(),
            use_bits: vec![false; MAX_PAGES],
            num_pages: 0,
            io_count: 0,
            max_pages: MAX_PAGES,
        }
    }
}

impl Default for InMemoryDiskManager {
    fn default() -> Self {
        Self::new()
    }
}

impl IDiskManager for InMemoryDiskManager {
    fn read_page(&mut self, page_id: PageId) -> Result<PageData, DiskManagerError> {
        if page_id as usize >= self.num_pages {
            return Err(DiskManagerError::PageOutOfBounds(page_id));
        }
        let mut page_data = [0u8; PAGE_SIZE];
        if let Some(page) = self.pages.get(&page_id) {
            page_data.copy_from_slice(page);
        }
        self.io_count += 1;
        Ok(page_data)
    }

    fn write_page(&mut self, page_id: PageId, page: &PageData) -> Result<(), DiskManagerError> {
        if page_id as usize >= self.num_pages {
            return Err(DiskManagerError::PageOutOfBounds(page_id));
        }
        self.pages.insert(page_id, page.to_vec());
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
        if self.num_pages >= self.max_pages {
            return Err(DiskManagerError::PageIdOverflow);
        }
        let page_id = self.num_pages as PageId;
        self.num_pages += 1;
        self.use_bits[page_id as usize] = true;
        self.io_count += 1;
        Ok(page_id)
    }

    fn io_count(&self) -> u64 {
        self.io_count
    }

    fn reset_io_count(&mut self) {
        self.io_count = 0;
    }
}
