use crate::dbms::storage::disk::IDiskManager;

use super::replacer::IBufferPoolReplacer;

pub type ReplacerGeneric = Box<dyn IBufferPoolReplacer>;
pub type DiskManagerGeneric = Box<dyn IDiskManager>;
