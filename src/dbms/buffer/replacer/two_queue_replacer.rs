use crate::dbms::buffer::control_block::ControlBlock;
use crate::dbms::types::FrameId;

use super::buffer_pool_replacer::{IBufferPoolReplacer, ReplacerAlgorithm};
use super::frame_queue::FrameQueue;

/// 2Q eviction. New frames enter a FIFO queue of pages seen once; a repeat
/// access promotes the frame to an LRU queue of pages seen twice or more.
/// Once-seen pages are drained first regardless of recency.
pub struct TwoQueueReplacer {
    /// Frames accessed exactly once, in arrival order.
    fifo: FrameQueue,
    /// Frames accessed at least twice, least recently used at the head.
    lru: FrameQueue,
}

impl TwoQueueReplacer {
    pub fn new() -> Self {
        Self {
            fifo: FrameQueue::new(),
            lru: FrameQueue::new(),
        }
    }
}

impl Default for TwoQueueReplacer {
    fn default() -> Self {
        Self::new()
    }
}

impl IBufferPoolReplacer for TwoQueueReplacer {
    fn algorithm(&self) -> ReplacerAlgorithm {
        ReplacerAlgorithm::TwoQueue
    }

    fn access(&mut self, cbs: &mut [ControlBlock], frame_id: FrameId, _is_write: bool) {
        if cbs[frame_id].two_queue_tier() == 1 {
            self.fifo.unlink(cbs, frame_id);
        } else {
            self.lru.unlink(cbs, frame_id);
        }
        cbs[frame_id].set_two_queue_tier(2);
        self.lru.push_tail(cbs, frame_id);
    }

    fn insert(&mut self, cbs: &mut [ControlBlock], frame_id: FrameId, _is_write: bool) {
        cbs[frame_id].set_two_queue_tier(1);
        self.fifo.push_tail(cbs, frame_id);
    }

    fn remove(&mut self, cbs: &mut [ControlBlock], frame_id: FrameId) {
        if cbs[frame_id].two_queue_tier() == 1 {
            self.fifo.unlink(cbs, frame_id);
        } else {
            self.lru.unlink(cbs, frame_id);
        }
    }

    fn select_victim(&mut self, cbs: &mut [ControlBlock]) -> Option<FrameId> {
        self.fifo
            .iter(cbs)
            .chain(self.lru.iter(cbs))
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

    fn lru_order(replacer: &TwoQueueReplacer, cbs: &[ControlBlock]) -> Vec<FrameId> {
        replacer.lru.iter(cbs).collect()
    }

    #[rstest]
    fn test_once_seen_frames_evict_in_fifo_order() {
        let mut cbs = arena(3);
        let mut replacer = TwoQueueReplacer::new();
        for frame_id in 0..3 {
            replacer.insert(&mut cbs, frame_id, false);
        }

        assert_eq!(replacer.select_victim(&mut cbs), Some(0));
        replacer.remove(&mut cbs, 0);
        assert_eq!(replacer.select_victim(&mut cbs), Some(1));
    }

    #[rstest]
    fn test_once_seen_evicts_before_twice_seen_regardless_of_recency() {
        let mut cbs = arena(3);
        let mut replacer = TwoQueueReplacer::new();
        replacer.insert(&mut cbs, 0, false);
        replacer.insert(&mut cbs, 1, false);
        replacer.insert(&mut cbs, 2, false);

        // Frame 0 is the coldest by recency but graduates to the LRU
        // queue, so the once-seen frame 1 goes first.
        replacer.access(&mut cbs, 0, false);

        assert_eq!(replacer.select_victim(&mut cbs), Some(1));
    }

    #[rstest]
    fn test_falls_back_to_lru_head_when_fifo_is_empty() {
        let mut cbs = arena(3);
        let mut replacer = TwoQueueReplacer::new();
        for frame_id in 0..3 {
            replacer.insert(&mut cbs, frame_id, false);
        }
        for frame_id in 0..3 {
            replacer.access(&mut cbs, frame_id, false);
        }

        assert_eq!(replacer.select_victim(&mut cbs), Some(0));
    }

    #[rstest]
    fn test_reaccess_moves_frame_to_lru_tail() {
        let mut cbs = arena(3);
        let mut replacer = TwoQueueReplacer::new();
        for frame_id in 0..3 {
            replacer.insert(&mut cbs, frame_id, false);
            replacer.access(&mut cbs, frame_id, false);
        }
        assert_eq!(lru_order(&replacer, &cbs), vec![0, 1, 2]);

        replacer.access(&mut cbs, 0, false);

        assert_eq!(lru_order(&replacer, &cbs), vec![1, 2, 0]);
        assert_eq!(replacer.select_victim(&mut cbs), Some(1));
    }

    #[rstest]
    fn test_victim_skips_pinned_frames() {
        let mut cbs = arena(3);
        let mut replacer = TwoQueueReplacer::new();
        for frame_id in 0..3 {
            replacer.insert(&mut cbs, frame_id, false);
        }
        cbs[0].pin_count = 1;
        cbs[1].pin_count = 1;

        assert_eq!(replacer.select_victim(&mut cbs), Some(2));
    }

    #[rstest]
    fn test_remove_unlinks_from_either_queue() {
        let mut cbs = arena(2);
        let mut replacer = TwoQueueReplacer::new();
        replacer.insert(&mut cbs, 0, false);
        replacer.insert(&mut cbs, 1, false);
        replacer.access(&mut cbs, 1, false);

        replacer.remove(&mut cbs, 0);
        replacer.remove(&mut cbs, 1);

        assert_eq!(replacer.select_victim(&mut cbs), None);
    }
}
