mod buffer_pool_replacer;
mod frame_queue;

pub mod clock_replacer;
pub mod lru2_replacer;
pub mod lru_replacer;
pub mod mru_replacer;
pub mod random_replacer;
pub mod two_queue_replacer;

pub use buffer_pool_replacer::*;
