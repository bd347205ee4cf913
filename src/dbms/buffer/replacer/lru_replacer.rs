use crate::dbms::buffer::control_block::ControlBlock;
use crate::dbms::types::FrameId;

use super::buffer_pool_replacer::{IBufferPoolReplacer, ReplacerAlgorithm};
use super::frame_queue::FrameQueue;

/// Least-recently-used eviction: one queue ordered by recency, head least
/// recent. Every access moves the frame to the tail.
pub struct LruReplacer {
    queue: FrameQueue,
}

impl LruReplacer {
    pub fn new() -> Self {
        Self {
            queue: FrameQueue::new(),
        }
    }
}

impl Default for LruReplacer {
    fn default() -> Self {
        Self::new()
    }
}

impl IBufferPoolReplacer for LruReplacer {
    fn algorithm(&self) -> ReplacerAlgorithm {
        ReplacerAlgorithm::Lru
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
            .iter(cbs)
            .find(|&frame_id| cbs[frame_id].pin_count == 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn arena(size: usize) -> Vec<ControlBlock> {
        (0..size).map(ControlBlock::vacant).collect()
    }

    fn replacer_with_frames(cbs: &mut [ControlBlock], frames: &[FrameId]) -> LruReplacer {
        let mut replacer = LruReplacer::new();
        for &frame_id in frames {
            replacer.insert(cbs, frame_id, false);
        }
        replacer
    }

    #[rstest]
    fn test_victim_is_least_recently_inserted() {
        let mut cbs = arena(3);
        let mut replacer = replacer_with_frames(&mut cbs, &[0, 1, 2]);

        assert_eq!(replacer.select_victim(&mut cbs), Some(0));
    }

    #[rstest]
    fn test_access_moves_frame_to_back() {
        let mut cbs = arena(3);
        let mut replacer = replacer_with_frames(&mut cbs, &[0, 1, 2]);

        replacer.access(&mut cbs, 0, false);

        assert_eq!(replacer.select_victim(&mut cbs), Some(1));
    }

    #[rstest]
    fn test_victim_skips_pinned_frames() {
        let mut cbs = arena(3);
        let mut replacer = replacer_with_frames(&mut cbs, &[0, 1, 2]);
        cbs[0].pin_count = 1;
        cbs[1].pin_count = 2;

        assert_eq!(replacer.select_victim(&mut cbs), Some(2));
    }

    #[rstest]
    fn test_all_pinned_yields_no_victim() {
        let mut cbs = arena(2);
        let mut replacer = replacer_with_frames(&mut cbs, &[0, 1]);
        cbs[0].pin_count = 1;
        cbs[1].pin_count = 1;

        assert_eq!(replacer.select_victim(&mut cbs), None);
    }

    #[rstest]
    fn test_remove_drops_frame() {
        let mut cbs = arena(3);
        let mut replacer = replacer_with_frames(&mut cbs, &[0, 1, 2]);

        replacer.remove(&mut cbs, 0);

        assert_eq!(replacer.select_victim(&mut cbs), Some(1));
    }

    #[rstest]
    fn test_empty_replacer_has_no_victim() {
        let mut cbs = arena(1);
        let mut replacer = LruReplacer::new();

        assert_eq!(replacer.select_victim(&mut cbs), None);
    }
}
