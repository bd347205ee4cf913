use crate::dbms::buffer::control_block::ControlBlock;
use crate::dbms::types::FrameId;

use super::buffer_pool_replacer::{IBufferPoolReplacer, ReplacerAlgorithm};
use super::frame_queue::FrameQueue;

/// LRU-2 eviction. Frames seen once wait in a cold FIFO queue and are
/// evicted first; frames seen twice or more live in a warm list kept in
/// ascending order of their penultimate access tick, so its head is the
/// frame whose second-to-last access is oldest. The warm list is maintained
/// by linear-scan sorted insertion.
pub struct Lru2Replacer {
    /// Frames accessed exactly once, oldest first.
    cold: FrameQueue,
    /// Frames accessed at least twice, ascending by penultimate tick.
    warm: FrameQueue,
    /// Monotonic access clock. Ticks start at 1, so a penultimate tick of 0
    /// marks a frame seen exactly once.
    tick: u64,
}

impl Lru2Replacer {
    pub fn new() -> Self {
        Self {
            cold: FrameQueue::new(),
            warm: FrameQueue::new(),
            tick: 0,
        }
    }

    fn sorted_insert_warm(&mut self, cbs: &mut [ControlBlock], frame_id: FrameId) {
        let (_, penultimate) = cbs[frame_id].lru2_times();
        let mut insert_before = None;
        for member in self.warm.iter(cbs) {
            let (_, member_penultimate) = cbs[member].lru2_times();
            if member_penultimate > penultimate {
                insert_before = Some(member);
                break;
            }
        }
        match insert_before {
            Some(before) => self.warm.insert_before(cbs, frame_id, before),
            None => self.warm.push_tail(cbs, frame_id),
        }
    }
}

impl Default for Lru2Replacer {
    fn default() -> Self {
        Self::new()
    }
}

impl IBufferPoolReplacer for Lru2Replacer {
    fn algorithm(&self) -> ReplacerAlgorithm {
        ReplacerAlgorithm::Lru2
    }

    fn access(&mut self, cbs: &mut [ControlBlock], frame_id: FrameId, _is_write: bool) {
        self.tick += 1;
        let (last, penultimate) = cbs[frame_id].lru2_times();
        if penultimate == 0 {
            self.cold.unlink(cbs, frame_id);
        } else {
            self.warm.unlink(cbs, frame_id);
        }
        cbs[frame_id].set_lru2_times(self.tick, last);
        self.sorted_insert_warm(cbs, frame_id);
    }

    fn insert(&mut self, cbs: &mut [ControlBlock], frame_id: FrameId, _is_write: bool) {
        self.tick += 1;
        cbs[frame_id].set_lru2_times(self.tick, 0);
        self.cold.push_tail(cbs, frame_id);
    }

    fn remove(&mut self, cbs: &mut [ControlBlock], frame_id: FrameId) {
        let (_, penultimate) = cbs[frame_id].lru2_times();
        if penultimate == 0 {
            self.cold.unlink(cbs, frame_id);
        } else {
            self.warm.unlink(cbs, frame_id);
        }
    }

    fn select_victim(&mut self, cbs: &mut [ControlBlock]) -> Option<FrameId> {
        self.cold
            .iter(cbs)
            .chain(self.warm.iter(cbs))
            .find(|&frame_id| cbs[frame_id].pin_count == 0)
    }
}
