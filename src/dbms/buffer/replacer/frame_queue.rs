use crate::dbms::buffer::control_block::ControlBlock;
use crate::dbms::types::FrameId;

/// Doubly-linked queue threaded through the `algo_prev`/`algo_next` fields
/// of the control block arena. The queue stores only its endpoints; every
/// link lives in the blocks, so a block can sit in at most one queue at a
/// time. Callers pass the arena to each operation.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct FrameQueue {
    head: Option<FrameId>,
    tail: Option<FrameId>,
}

impl FrameQueue {
    pub fn new() -> Self {
        Self {
            head: None,
            tail: None,
        }
    }

    pub fn head(&self) -> Option<FrameId> {
        self.head
    }

    pub fn tail(&self) -> Option<FrameId> {
        self.tail
    }

    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Append a detached block at the tail.
    pub fn push_tail(&mut self, cbs: &mut [ControlBlock], frame_id: FrameId) {
        cbs[frame_id].algo_next = None;
        cbs[frame_id].algo_prev = self.tail;
        match self.tail {
            Some(tail) => cbs[tail].algo_next = Some(frame_id),
            None => self.head = Some(frame_id),
        }
        self.tail = Some(frame_id);
    }

    /// Detach a block from anywhere in the queue.
    pub fn unlink(&mut self, cbs: &mut [ControlBlock], frame_id: FrameId) {
        let prev = cbs[frame_id].algo_prev;
        let next = cbs[frame_id].algo_next;
        match prev {
            Some(prev) => cbs[prev].algo_next = next,
            None => self.head = next,
        }
        match next {
            Some(next) => cbs[next].algo_prev = prev,
            None => self.tail = prev,
        }
        cbs[frame_id].algo_prev = None;
        cbs[frame_id].algo_next = None;
    }

    /// Insert a detached block immediately before a block already in the
    /// queue.
    pub fn insert_before(&mut self, cbs: &mut [ControlBlock], frame_id: FrameId, before: FrameId) {
        let prev = cbs[before].algo_prev;
        cbs[frame_id].algo_prev = prev;
        cbs[frame_id].algo_next = Some(before);
        cbs[before].algo_prev = Some(frame_id);
        match prev {
            Some(prev) => cbs[prev].algo_next = Some(frame_id),
            None => self.head = Some(frame_id),
        }
    }

    /// Walk the queue from head to tail.
    pub fn iter<'a>(&self, cbs: &'a [ControlBlock]) -> impl Iterator<Item = FrameId> + 'a {
        std::iter::successors(self.head, move |&frame_id| cbs[frame_id].algo_next)
    }

    /// Walk the queue from tail to head.
    pub fn iter_rev<'a>(&self, cbs: &'a [ControlBlock]) -> impl Iterator<Item = FrameId> + 'a {
        std::iter::successors(self.tail, move |&frame_id| cbs[frame_id].algo_prev)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn arena(size: usize) -> Vec<ControlBlock> {
        (0..size).map(ControlBlock::vacant).collect()
    }

    fn contents(queue: &FrameQueue, cbs: &[ControlBlock]) -> Vec<FrameId> {
        queue.iter(cbs).collect()
    }

    #[rstest]
    fn test_push_tail_orders_frames() {
        let mut cbs = arena(4);
        let mut queue = FrameQueue::new();

        assert!(queue.is_empty());

        queue.push_tail(&mut cbs, 2);
        queue.push_tail(&mut cbs, 0);
        queue.push_tail(&mut cbs, 3);

        assert_eq!(contents(&queue, &cbs), vec![2, 0, 3]);
        assert_eq!(queue.head(), Some(2));
        assert_eq!(queue.tail(), Some(3));
    }

    #[rstest]
    #[case(0, vec![1, 2])]
    #[case(1, vec![0, 2])]
    #[case(2, vec![0, 1])]
    fn test_unlink(#[case] to_remove: FrameId, #[case] expected: Vec<FrameId>) {
        let mut cbs = arena(3);
        let mut queue = FrameQueue::new();
        for frame_id in 0..3 {
            queue.push_tail(&mut cbs, frame_id);
        }

        queue.unlink(&mut cbs, to_remove);

        assert_eq!(contents(&queue, &cbs), expected);
        assert_eq!(cbs[to_remove].algo_prev, None);
        assert_eq!(cbs[to_remove].algo_next, None);
    }

    #[rstest]
    fn test_unlink_only_member_empties_queue() {
        let mut cbs = arena(1);
        let mut queue = FrameQueue::new();
        queue.push_tail(&mut cbs, 0);

        queue.unlink(&mut cbs, 0);

        assert!(queue.is_empty());
        assert_eq!(queue.tail(), None);
    }

    #[rstest]
    #[case(0, vec![3, 0, 1, 2])]
    #[case(1, vec![0, 3, 1, 2])]
    #[case(2, vec![0, 1, 3, 2])]
    fn test_insert_before(#[case] before: FrameId, #[case] expected: Vec<FrameId>) {
        let mut cbs = arena(4);
        let mut queue = FrameQueue::new();
        for frame_id in 0..3 {
            queue.push_tail(&mut cbs, frame_id);
        }

        queue.insert_before(&mut cbs, 3, before);

        assert_eq!(contents(&queue, &cbs), expected);
    }

    #[rstest]
    fn test_iter_rev() {
        let mut cbs = arena(3);
        let mut queue = FrameQueue::new();
        for frame_id in 0..3 {
            queue.push_tail(&mut cbs, frame_id);
        }

        let reversed: Vec<_> = queue.iter_rev(&cbs).collect();
        assert_eq!(reversed, vec![2, 1, 0]);
    }

    #[rstest]
    fn test_requeue_after_unlink() {
        let mut cbs = arena(3);
        let mut queue = FrameQueue::new();
        for frame_id in 0..3 {
            queue.push_tail(&mut cbs, frame_id);
        }

        queue.unlink(&mut cbs, 1);
        queue.push_tail(&mut cbs, 1);

        assert_eq!(contents(&queue, &cbs), vec![0, 2, 1]);
    }
}
