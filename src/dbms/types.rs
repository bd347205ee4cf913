pub const PAGE_SIZE: usize = 4096;

/// Frames in the reference buffer pool configuration.
pub const BUFFER_POOL_SIZE: usize = 1024;

/// Upper bound on the number of pages a store may hold.
pub const MAX_PAGES: usize = 60000;

pub type PageData = [u8; PAGE_SIZE];

pub type PageId = u32;

pub type FrameId = usize;
