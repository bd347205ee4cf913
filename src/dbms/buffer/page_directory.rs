use crate::dbms::buffer::control_block::ControlBlock;
use crate::dbms::types::{FrameId, PageId};

/// Hash-indexed table of the pages resident in the pool. Buckets chain
/// control blocks through their `dir_next` field; a reverse frame-to-page
/// array answers free-frame queries without walking the buckets.
pub struct PageDirectory {
    /// Bucket heads, indexed by `page_id % capacity`.
    buckets: Vec<Option<FrameId>>,
    /// frame_id -> resident page, if any.
    frame_to_page: Vec<Option<PageId>>,
}

impl PageDirectory {
    pub fn new(capacity: usize) -> Self {
        Self {
            buckets: vec![None; capacity],
            frame_to_page: vec![None; capacity],
        }
    }

    fn bucket_of(&self, page_id: PageId) -> usize {
        page_id as usize % self.buckets.len()
    }

    /// Find the frame holding a page, if it is resident.
    pub fn lookup(&self, cbs: &[ControlBlock], page_id: PageId) -> Option<FrameId> {
        let mut cursor = self.buckets[self.bucket_of(page_id)];
        while let Some(frame_id) = cursor {
            if cbs[frame_id].page_id == Some(page_id) {
                return Some(frame_id);
            }
            cursor = cbs[frame_id].dir_next;
        }
        None
    }

    /// Register an occupied control block, prepending it to its bucket
    /// chain.
    pub fn insert(&mut self, cbs: &mut [ControlBlock], frame_id: FrameId) {
        let page_id = match cbs[frame_id].page_id {
            Some(page_id) => page_id,
            None => panic!("page directory: inserting vacant frame {}", frame_id),
        };
        let bucket = self.bucket_of(page_id);
        cbs[frame_id].dir_next = self.buckets[bucket];
        self.buckets[bucket] = Some(frame_id);
        self.frame_to_page[frame_id] = Some(page_id);
    }

    /// Unregister a control block ahead of eviction. A block missing from
    /// its bucket chain means the directory and the arena have diverged, so
    /// this panics rather than continue on corrupt state.
    pub fn remove(&mut self, cbs: &mut [ControlBlock], frame_id: FrameId) {
        let page_id = match cbs[frame_id].page_id {
            Some(page_id) => page_id,
            None => panic!("page directory: removing vacant frame {}", frame_id),
        };
        let bucket = self.bucket_of(page_id);

        if self.buckets[bucket] == Some(frame_id) {
            self.buckets[bucket] = cbs[frame_id].dir_next;
        } else {
            let mut cursor = self.buckets[bucket];
            loop {
                let current = match cursor {
                    Some(current) => current,
                    None => panic!(
                        "page directory: page {} not in its bucket chain (frame {})",
                        page_id, frame_id
                    ),
                };
                if cbs[current].dir_next == Some(frame_id) {
                    cbs[current].dir_next = cbs[frame_id].dir_next;
                    break;
                }
                cursor = cbs[current].dir_next;
            }
        }

        cbs[frame_id].dir_next = None;
        self.frame_to_page[frame_id] = None;
    }

    /// Whether the frame currently holds no page.
    pub fn frame_is_free(&self, frame_id: FrameId) -> bool {
        self.frame_to_page[frame_id].is_none()
    }

    /// Lowest frame holding no page, if one remains.
    pub fn first_free_frame(&self) -> Option<FrameId> {
        self.frame_to_page.iter().position(Option::is_none)
    }

    pub fn num_free_frames(&self) -> usize {
        self.frame_to_page
            .iter()
            .filter(|page| page.is_none())
            .count()
    }
}
