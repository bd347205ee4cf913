mod disk_manager;
pub mod testing;

pub use disk_manager::*;
