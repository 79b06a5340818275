pub mod fixtures;
pub mod mocks;

#[allow(unused_imports)]
pub use fixtures::{object_config, row, rows_with_ids};
#[allow(unused_imports)]
pub use mocks::{MemoryBucket, MemoryTable, StoredObject};
