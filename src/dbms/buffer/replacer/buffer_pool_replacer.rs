use std::fmt;
use std::str::FromStr;

use crate::dbms::buffer::control_block::ControlBlock;
use crate::dbms::types::FrameId;

use super::clock_replacer::ClockReplacer;
use super::lru2_replacer::Lru2Replacer;
use super::lru_replacer::LruReplacer;
use super::mru_replacer::MruReplacer;
use super::random_replacer::RandomReplacer;
use super::two_queue_replacer::TwoQueueReplacer;

/// Eviction policy contract. A replacer owns no control blocks; it threads
/// its bookkeeping through the link and scratch fields of the arena passed
/// to every call.
pub trait IBufferPoolReplacer {
    /// Which algorithm this replacer implements.
    fn algorithm(&self) -> ReplacerAlgorithm;
    /// Record a repeat access to a frame already known to the replacer.
    fn access(&mut self, cbs: &mut [ControlBlock], frame_id: FrameId, is_write: bool);
    /// Register a frame just bound to a page. Counts as the frame's first
    /// access.
    fn insert(&mut self, cbs: &mut [ControlBlock], frame_id: FrameId, is_write: bool);
    /// Withdraw a frame ahead of eviction, dropping every internal
    /// reference to it.
    fn remove(&mut self, cbs: &mut [ControlBlock], frame_id: FrameId);
    /// Nominate an unpinned frame for eviction without removing it.
    /// `None` means every candidate frame is pinned.
    fn select_victim(&mut self, cbs: &mut [ControlBlock]) -> Option<FrameId>;
}

/// The replacement algorithms a pool can be configured with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplacerAlgorithm {
    Lru,
    Mru,
    Random,
    Clock,
    Lru2,
    TwoQueue,
}

impl ReplacerAlgorithm {
    pub const ALL: [ReplacerAlgorithm; 6] = [
        ReplacerAlgorithm::Lru,
        ReplacerAlgorithm::Mru,
        ReplacerAlgorithm::Random,
        ReplacerAlgorithm::Clock,
        ReplacerAlgorithm::Lru2,
        ReplacerAlgorithm::TwoQueue,
    ];

    /// Construct a replacer for a pool of `capacity` frames.
    pub fn create(self, capacity: usize) -> Box<dyn IBufferPoolReplacer> {
        match self {
            ReplacerAlgorithm::Lru => Box::new(LruReplacer::new()),
            ReplacerAlgorithm::Mru => Box::new(MruReplacer::new()),
            ReplacerAlgorithm::Random => Box::new(RandomReplacer::new(capacity)),
            ReplacerAlgorithm::Clock => Box::new(ClockReplacer::new(capacity)),
            ReplacerAlgorithm::Lru2 => Box::new(Lru2Replacer::new()),
            ReplacerAlgorithm::TwoQueue => Box::new(TwoQueueReplacer::new()),
        }
    }
}

impl fmt::Display for ReplacerAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ReplacerAlgorithm::Lru => "lru",
            ReplacerAlgorithm::Mru => "mru",
            ReplacerAlgorithm::Random => "random",
            ReplacerAlgorithm::Clock => "clock",
            ReplacerAlgorithm::Lru2 => "lru-2",
            ReplacerAlgorithm::TwoQueue => "2q",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, PartialEq, Eq)]
pub struct UnknownAlgorithmError(pub String);

impl fmt::Display for UnknownAlgorithmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown replacement algorithm: {}", self.0)
    }
}

impl std::error::Error for UnknownAlgorithmError {}

impl FromStr for ReplacerAlgorithm {
    type Err = UnknownAlgorithmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "lru" => Ok(ReplacerAlgorithm::Lru),
            "mru" => Ok(ReplacerAlgorithm::Mru),
            "random" => Ok(ReplacerAlgorithm::Random),
            "clock" => Ok(ReplacerAlgorithm::Clock),
            "lru-2" => Ok(ReplacerAlgorithm::Lru2),
            "2q" => Ok(ReplacerAlgorithm::TwoQueue),
            _ => Err(UnknownAlgorithmError(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("lru", ReplacerAlgorithm::Lru)]
    #[case("mru", ReplacerAlgorithm::Mru)]
    #[case("random", ReplacerAlgorithm::Random)]
    #[case("clock", ReplacerAlgorithm::Clock)]
    #[case("lru-2", ReplacerAlgorithm::Lru2)]
    #[case("2q", ReplacerAlgorithm::TwoQueue)]
    fn test_parse_algorithm_name(#[case] name: &str, #[case] expected: ReplacerAlgorithm) {
        assert_eq!(name.parse(), Ok(expected));
        assert_eq!(expected.to_string(), name);
    }

    #[rstest]
    #[case("fifo")]
    #[case("LRU")]
    #[case("")]
    fn test_parse_unknown_name(#[case] name: &str) {
        assert_eq!(
            name.parse::<ReplacerAlgorithm>(),
            Err(UnknownAlgorithmError(name.to_string()))
        );
    }

    #[rstest]
    fn test_create_returns_matching_replacer() {
        for algorithm in ReplacerAlgorithm::ALL {
            let replacer = algorithm.create(8);
            assert_eq!(replacer.algorithm(), algorithm);
        }
    }
}
