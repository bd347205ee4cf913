use std::fmt;

use log::debug;

use crate::dbms::buffer::control_block::ControlBlock;
use crate::dbms::buffer::page_directory::PageDirectory;
use crate::dbms::buffer::types::{DiskManagerGeneric, ReplacerGeneric};
use crate::dbms::storage::disk::DiskManagerError;
use crate::dbms::types::{FrameId, PageData, PageId, PAGE_SIZE};

#[derive(Debug)]
pub enum BufferPoolManagerError {
    /// The requested page is not resident in the pool
    PageNotInPool,
    DiskManagerError(DiskManagerError),
}

impl From<DiskManagerError> for BufferPoolManagerError {
    fn from(e: DiskManagerError) -> Self {
        Self::DiskManagerError(e)
    }
}

impl fmt::Display for BufferPoolManagerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BufferPoolManagerError::PageNotInPool => {
                write!(f, "buffer pool error: page is not resident in the pool")
            }
            BufferPoolManagerError::DiskManagerError(e) => {
                write!(f, "buffer pool error: {}", e)
            }
        }
    }
}

impl std::error::Error for BufferPoolManagerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BufferPoolManagerError::DiskManagerError(e) => Some(e),
            BufferPoolManagerError::PageNotInPool => None,
        }
    }
}

/// A fixed arena of page frames fronting the on-disk page store. Callers fix
/// a page to pin its bytes in memory and unfix it when done; once every
/// frame is occupied, the configured replacement policy picks which resident
/// page makes way.
pub struct BufferPoolManager {
    control_blocks: Vec<ControlBlock>,
    frames: Vec<PageData>,
    page_directory: PageDirectory,
    replacer: ReplacerGeneric,
    disk_manager: DiskManagerGeneric,
    access_count: u64,
    hit_count: u64,
}

impl BufferPoolManager {
    pub fn new(
        pool_size: usize,
        replacer: ReplacerGeneric,
        disk_manager: DiskManagerGeneric,
    ) -> BufferPoolManager {
        BufferPoolManager {
            control_blocks: (0..pool_size).map(ControlBlock::vacant).collect(),
            frames: vec![[0; PAGE_SIZE]; pool_size],
            page_directory: PageDirectory::new(pool_size),
            replacer,
            disk_manager,
            access_count: 0,
            hit_count: 0,
        }
    }

    /// Pin a page in the pool and return the frame holding it, reading it
    /// from the store if it is not already resident. `is_write` marks the
    /// frame dirty so eviction writes it back.
    pub fn fix_page(
        &mut self,
        page_id: PageId,
        is_write: bool,
    ) -> Result<FrameId, BufferPoolManagerError> {
        self.access_count += 1;

        if let Some(frame_id) = self.page_directory.lookup(&self.control_blocks, page_id) {
            self.hit_count += 1;
            let cb = &mut self.control_blocks[frame_id];
            cb.pin_count += 1;
            cb.dirty |= is_write;
            self.replacer
                .access(&mut self.control_blocks, frame_id, is_write);
            return Ok(frame_id);
        }

        // A failed read leaves the claimed frame free and the page absent.
        let frame_id = self.take_victim_frame()?;
        let page = self.disk_manager.read_page(page_id)?;
        self.frames[frame_id] = page;
        self.control_blocks[frame_id].assign(page_id, is_write);
        self.page_directory
            .insert(&mut self.control_blocks, frame_id);
        self.replacer
            .insert(&mut self.control_blocks, frame_id, is_write);
        Ok(frame_id)
    }

    /// Fix a page id not currently in use, claiming the lowest unused id or
    /// growing the store by one page when every id is taken. New pages
    /// always count as written.
    pub fn fix_new_page(&mut self) -> Result<(PageId, FrameId), BufferPoolManagerError> {
        let unused_id = (0..self.disk_manager.page_count())
            .map(|id| id as PageId)
            .find(|&id| !self.disk_manager.page_in_use(id));
        let page_id = match unused_id {
            Some(page_id) => page_id,
            None => self.disk_manager.grow_by_one_page()?,
        };
        self.disk_manager.set_page_use(page_id, true);

        let frame_id = self.fix_page(page_id, true)?;
        Ok((page_id, frame_id))
    }

    /// Release one fix on a resident page. The page stays in the pool; a
    /// pin count of zero only makes it eligible for eviction.
    pub fn unfix_page(&mut self, page_id: PageId) -> Result<FrameId, BufferPoolManagerError> {
        let frame_id = self
            .page_directory
            .lookup(&self.control_blocks, page_id)
            .ok_or(BufferPoolManagerError::PageNotInPool)?;

        let cb = &mut self.control_blocks[frame_id];
        if cb.pin_count == 0 {
            panic!(
                "buffer pool: unfixing page {} with no outstanding fixes",
                page_id
            );
        }
        cb.pin_count -= 1;
        Ok(frame_id)
    }

    /// Write every dirty resident frame back to the store and mark it
    /// clean. Run before dropping the pool so modified pages survive.
    pub fn flush_all_pages(&mut self) -> Result<(), BufferPoolManagerError> {
        for frame_id in 0..self.control_blocks.len() {
            let page_id = match self.control_blocks[frame_id].page_id {
                Some(page_id) if self.control_blocks[frame_id].dirty => page_id,
                _ => continue,
            };
            self.disk_manager
                .write_page(page_id, &self.frames[frame_id])?;
            self.control_blocks[frame_id].dirty = false;
            debug!("flushed page {} from frame {}", page_id, frame_id);
        }
        Ok(())
    }

    /// Claim a frame for a new occupant: the lowest never-used frame if one
    /// remains, otherwise the policy's victim, flushed first when dirty.
    fn take_victim_frame(&mut self) -> Result<FrameId, BufferPoolManagerError> {
        if let Some(frame_id) = self.page_directory.first_free_frame() {
            return Ok(frame_id);
        }

        let frame_id = match self.replacer.select_victim(&mut self.control_blocks) {
            Some(frame_id) => frame_id,
            None => panic!("buffer pool: every frame is pinned, no victim available"),
        };
        let page_id = match self.control_blocks[frame_id].page_id {
            Some(page_id) => page_id,
            None => panic!("buffer pool: policy nominated vacant frame {}", frame_id),
        };

        // Flush before touching the directory or the policy so a failed
        // write leaves the page resident and still dirty.
        if self.control_blocks[frame_id].dirty {
            self.disk_manager
                .write_page(page_id, &self.frames[frame_id])?;
        }
        debug!("evicting page {} from frame {}", page_id, frame_id);

        self.replacer.remove(&mut self.control_blocks, frame_id);
        self.page_directory
            .remove(&mut self.control_blocks, frame_id);
        self.control_blocks[frame_id].release();
        Ok(frame_id)
    }

    /// Frame currently holding a page, if the page is resident.
    pub fn resident_frame(&self, page_id: PageId) -> Option<FrameId> {
        self.page_directory.lookup(&self.control_blocks, page_id)
    }

    /// Bytes of a frame, addressed by the id `fix_page` returned.
    pub fn frame_data(&self, frame_id: FrameId) -> &PageData {
        &self.frames[frame_id]
    }

    /// Mutable frame bytes. The occupant must be fixed for writing so
    /// eviction knows to flush the change.
    pub fn frame_data_mut(&mut self, frame_id: FrameId) -> &mut PageData {
        &mut self.frames[frame_id]
    }

    /// Frames never yet occupied by any page.
    pub fn num_free_frames(&self) -> usize {
        self.page_directory.num_free_frames()
    }

    pub fn access_count(&self) -> u64 {
        self.access_count
    }

    pub fn hit_count(&self) -> u64 {
        self.hit_count
    }

    /// Fraction of fixes served without a store read; 0 before the first
    /// fix.
    pub fn hit_rate(&self) -> f64 {
        if self.access_count == 0 {
            return 0.0;
        }
        self.hit_count as f64 / self.access_count as f64
    }

    /// Page reads and writes the store has performed since its counter was
    /// last reset.
    pub fn io_count(&self) -> u64 {
        self.disk_manager.io_count()
    }
}
