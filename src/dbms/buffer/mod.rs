pub mod control_block;
pub mod page_directory;
pub mod pool_manager;
pub mod replacer;
pub mod types;
