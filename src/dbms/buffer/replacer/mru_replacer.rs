use crate::dbms::buffer::control_block::ControlBlock;
use crate::dbms::types::FrameId;

use super::buffer_pool_replacer::{IBufferPoolReplacer, ReplacerAlgorithm};
use super::frame_queue::FrameQueue;

/// Most-recently-used eviction. The queue bookkeeping is the same as LRU's;
/// only the victim comes from the other end.
pub struct MruReplacer {
    queue: FrameQueue,
}

impl MruReplacer {
    pub fn new() -> Self {
        Self {
            queue: FrameQueue::new(),
        }
    }
}

impl Default for MruReplacer {
    fn default() -> Self {
        Self::new()
    }
}

impl IBufferPoolReplacer for MruReplacer {
    fn algorithm(&self) -> ReplacerAlgorithm {
        ReplacerAlgorithm::Mru
    }

    fn access(&mut self, cbs: &mut [ControlBlock], frame_id: FrameId, _is_write: bool) {
        self.queue.unlink(cbs, frame_id);
        self.queue.push_tail(cbs, frame_id);
    }

    fn insert(&mut self, cbs: &mut [ControlBlock], frame_id: FrameId, _is_write: bool) {
        self.queue.push_tail(cbs, frame_id);
    }

    fn remove(&mut self, cbs: &mut [ControlBlock], frame_id: FrameId) {
        self.queue.unlink(cbs, frame_id);
    }

    fn select_victim(&mut self, cbs: &mut [ControlBlock]) -> Option<FrameId> {
        self.queue
            .iter_rev(cbs)
            .find(|&frame_id| cbs[frame_id].pin_count == 0)
    }
}
