//! Production-to-development copy jobs for Groupix.
//!
//! - [`rows::RowCopier`] copies the most recent `memories` rows.
//! - [`objects::ObjectCopier`] copies the objects of a storage bucket under a
//!   bounded number of concurrent transfers.

pub mod cli;
pub mod error;
pub mod objects;
pub mod rows;

pub use error::{SyncError, SyncResult};
pub use objects::{
    ObjectCopier, ObjectCopyReport, TransferPool, enumerate_objects, transfer_object,
};
pub use rows::{RowCopier, RowCopyReport};
