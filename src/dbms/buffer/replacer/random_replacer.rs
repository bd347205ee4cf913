use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::dbms::buffer::control_block::ControlBlock;
use crate::dbms::types::FrameId;

use super::buffer_pool_replacer::{IBufferPoolReplacer, ReplacerAlgorithm};

/// Uniformly random eviction over the occupied frames. Accesses carry no
/// information, so `access` is a no-op; the replacer only tracks membership.
pub struct RandomReplacer {
    /// frame_id -> index into `members`, if the frame is tracked.
    position: Vec<Option<usize>>,
    /// Occupied frames in no particular order.
    members: Vec<FrameId>,
    rng: StdRng,
}

impl RandomReplacer {
    pub fn new(capacity: usize) -> Self {
        Self {
            position: vec![None; capacity],
            members: Vec::with_capacity(capacity),
            rng: StdRng::from_os_rng(),
        }
    }
}

impl IBufferPoolReplacer for RandomReplacer {
    fn algorithm(&self) -> ReplacerAlgorithm {
        ReplacerAlgorithm::Random
    }

    fn access(&mut self, _cbs: &mut [ControlBlock], _frame_id: FrameId, _is_write: bool) {}

    fn insert(&mut self, _cbs: &mut [ControlBlock], frame_id: FrameId, _is_write: bool) {
        self.position[frame_id] = Some(self.members.len());
        self.members.push(frame_id);
    }

    fn remove(&mut self, _cbs: &mut [ControlBlock], frame_id: FrameId) {
        let position = match self.position[frame_id].take() {
            Some(position) => position,
            None => panic!("random replacer: removing untracked frame {}", frame_id),
        };
        self.members.swap_remove(position);
        if let Some(&moved) = self.members.get(position) {
            self.position[moved] = Some(position);
        }
    }

    /// Draw a uniformly random member, then probe forward past pinned frames
    /// so a pinned draw never leaks out as the victim.
    fn select_victim(&mut self, cbs: &mut [ControlBlock]) -> Option<FrameId> {
        if self.members.is_empty() {
            return None;
        }
        let start = self.rng.random_range(0..self.members.len());
        for offset in 0..self.members.len() {
            let frame_id = self.members[(start + offset) % self.members.len()];
            if cbs[frame_id].pin_count == 0 {
                return Some(frame_id);
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn arena(size: usize) -> Vec<ControlBlock> {
        (0..size).map(ControlBlock::vacant).collect()
    }

    fn replacer_with_frames(cbs: &mut [ControlBlock], frames: &[FrameId]) -> RandomReplacer {
        let mut replacer = RandomReplacer::new(cbs.len());
        for &frame_id in frames {
            replacer.insert(cbs, frame_id, false);
        }
        replacer
    }

    #[rstest]
    fn test_victim_is_always_a_member() {
        let mut cbs = arena(8);
        let mut replacer = replacer_with_frames(&mut cbs, &[0, 2, 4]);

        for _ in 0..100 {
            let victim = replacer.select_victim(&mut cbs).unwrap();
            assert!([0, 2, 4].contains(&victim));
        }
    }

    #[rstest]
    fn test_victim_is_never_pinned() {
        let mut cbs = arena(4);
        let mut replacer = replacer_with_frames(&mut cbs, &[0, 1, 2, 3]);
        cbs[0].pin_count = 1;
        cbs[1].pin_count = 1;
        cbs[2].pin_count = 1;

        for _ in 0..100 {
            assert_eq!(replacer.select_victim(&mut cbs), Some(3));
        }
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
    fn test_removed_frame_is_never_the_victim() {
        let mut cbs = arena(4);
        let mut replacer = replacer_with_frames(&mut cbs, &[0, 1, 2, 3]);

        replacer.remove(&mut cbs, 1);

        for _ in 0..100 {
            assert_ne!(replacer.select_victim(&mut cbs), Some(1));
        }
    }

    #[rstest]
    fn test_empty_replacer_has_no_victim() {
        let mut cbs = arena(2);
        let mut replacer = RandomReplacer::new(2);

        assert_eq!(replacer.select_victim(&mut cbs), None);
    }

    #[rstest]
    #[should_panic(expected = "untracked frame")]
    fn test_remove_untracked_frame_panics() {
        let mut cbs = arena(2);
        let mut replacer = RandomReplacer::new(2);

        replacer.remove(&mut cbs, 0);
    }
}
