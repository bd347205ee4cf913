use crate::dbms::buffer::control_block::ControlBlock;
use crate::dbms::types::FrameId;

use super::buffer_pool_replacer::{IBufferPoolReplacer, ReplacerAlgorithm};

/// Second-chance eviction over a ring of occupied frames. The ring only
/// grows: a frame joins it the first time it is occupied and keeps its slot
/// across evictions, since the pool reuses the frame for the next page
/// immediately. The sweep hand persists between victim selections and runs
/// opposite to insertion order, away from the most recently added frames.
pub struct ClockReplacer {
    /// Frames in the order they first became occupied.
    ring: Vec<FrameId>,
    /// Whether a frame already owns a ring slot.
    in_ring: Vec<bool>,
    /// Current sweep position.
    hand: usize,
}

impl ClockReplacer {
    pub fn new(capacity: usize) -> Self {
        Self {
            ring: Vec::with_capacity(capacity),
            in_ring: vec![false; capacity],
            hand: 0,
        }
    }

    fn retreat(&self, slot: usize) -> usize {
        (slot + self.ring.len() - 1) % self.ring.len()
    }
}

impl IBufferPoolReplacer for ClockReplacer {
    fn algorithm(&self) -> ReplacerAlgorithm {
        ReplacerAlgorithm::Clock
    }

    fn access(&mut self, cbs: &mut [ControlBlock], frame_id: FrameId, _is_write: bool) {
        cbs[frame_id].set_clock_referenced(true);
    }

    fn insert(&mut self, cbs: &mut [ControlBlock], frame_id: FrameId, _is_write: bool) {
        cbs[frame_id].set_clock_referenced(true);
        if !self.in_ring[frame_id] {
            self.in_ring[frame_id] = true;
            self.ring.push(frame_id);
        }
    }

    /// Evicted frames keep their ring slot; the frame's next occupant reuses
    /// it through `insert`.
    fn remove(&mut self, _cbs: &mut [ControlBlock], _frame_id: FrameId) {}

    fn select_victim(&mut self, cbs: &mut [ControlBlock]) -> Option<FrameId> {
        if self.ring.is_empty() || self.ring.iter().all(|&f| cbs[f].pin_count > 0) {
            return None;
        }
        loop {
            let frame_id = self.ring[self.hand];
            if cbs[frame_id].pin_count > 0 {
                self.hand = self.retreat(self.hand);
            } else if cbs[frame_id].clock_referenced() {
                cbs[frame_id].set_clock_referenced(false);
                self.hand = self.retreat(self.hand);
            } else {
                self.hand = self.retreat(self.hand);
                return Some(frame_id);
            }
        }
    }
}
