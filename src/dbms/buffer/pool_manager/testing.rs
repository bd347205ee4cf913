#[cfg(test)]
use crate::dbms::{
    buffer::replacer::ReplacerAlgorithm, storage::disk::testing::InMemoryDiskManager,
};

#[cfg(test)]
use super::BufferPoolManager;

/// A pool over an in-memory store, for unit tests.
#[cfg(test)]
pub fn create_testing_pool_manager(
    pool_size: usize,
    algorithm: ReplacerAlgorithm,
) -> BufferPoolManager {
    let disk_manager = InMemoryDiskManager::new();
    BufferPoolManager::new(
        pool_size,
        algorithm.create(pool_size),
        Box::new(disk_manager),
    )
}
