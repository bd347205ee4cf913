mod buffer_pool_manager;
pub mod testing;

pub use buffer_pool_manager::*;
