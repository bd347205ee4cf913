use crate::dbms::types::{FrameId, PageId};

/// Per-policy bookkeeping embedded in a control block. Each replacement
/// policy interprets its own variant; a block that has never been handed to
/// a policy is `Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlgoScratch {
    Idle,
    /// Most recent and penultimate access ticks. A penultimate tick of 0
    /// marks a page seen exactly once.
    Lru2 { last: u64, prev: u64 },
    /// Second-chance bit, set on every access.
    Clock { referenced: bool },
    /// 1 = seen once (FIFO queue), 2 = seen at least twice (LRU queue).
    TwoQueue { tier: u8 },
}

/// Metadata for one buffer frame. Control blocks live in a fixed arena owned
/// by the buffer pool manager; the page directory and the replacement policy
/// thread their structures through the index links below instead of holding
/// blocks themselves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlBlock {
    /// Page currently held by the frame, if any.
    pub page_id: Option<PageId>,
    /// Frame this block describes; fixed for the arena's lifetime.
    pub frame_id: FrameId,
    /// Outstanding fixes. A pinned block is never evicted.
    pub pin_count: u32,
    /// Frame content differs from the store's copy.
    pub dirty: bool,
    /// Reserved for a future latching scheme; never read.
    pub latch: bool,
    /// Next block in the same page directory bucket.
    pub dir_next: Option<FrameId>,
    /// Previous block in the policy's intrusive list.
    pub algo_prev: Option<FrameId>,
    /// Next block in the policy's intrusive list.
    pub algo_next: Option<FrameId>,
    pub scratch: AlgoScratch,
}

impl ControlBlock {
    pub fn vacant(frame_id: FrameId) -> Self {
        Self {
            page_id: None,
            frame_id,
            pin_count: 0,
            dirty: false,
            latch: false,
            dir_next: None,
            algo_prev: None,
            algo_next: None,
            scratch: AlgoScratch::Idle,
        }
    }

    /// Bind a page to this frame with a single outstanding fix.
    pub fn assign(&mut self, page_id: PageId, is_write: bool) {
        self.page_id = Some(page_id);
        self.pin_count = 1;
        self.dirty = is_write;
        self.scratch = AlgoScratch::Idle;
    }

    /// Drop the occupant ahead of frame reuse. The block must already be
    /// unlinked from the directory and the policy.
    pub fn release(&mut self) {
        self.page_id = None;
        self.pin_count = 0;
        self.dirty = false;
        self.scratch = AlgoScratch::Idle;
    }

    pub fn lru2_times(&self) -> (u64, u64) {
        match self.scratch {
            AlgoScratch::Lru2 { last, prev } => (last, prev),
            _ => panic!("frame {} carries no LRU-2 bookkeeping", self.frame_id),
        }
    }

    pub fn set_lru2_times(&mut self, last: u64, prev: u64) {
        self.scratch = AlgoScratch::Lru2 { last, prev };
    }

    pub fn clock_referenced(&self) -> bool {
        match self.scratch {
            AlgoScratch::Clock { referenced } => referenced,
            _ => panic!("frame {} carries no clock bookkeeping", self.frame_id),
        }
    }

    pub fn set_clock_referenced(&mut self, referenced: bool) {
        self.scratch = AlgoScratch::Clock { referenced };
    }

    pub fn two_queue_tier(&self) -> u8 {
        match self.scratch {
            AlgoScratch::TwoQueue { tier } => tier,
            _ => panic!("frame {} carries no 2Q bookkeeping", self.frame_id),
        }
    }

    pub fn set_two_queue_tier(&mut self, tier: u8) {
        self.scratch = AlgoScratch::TwoQueue { tier };
    }
}
