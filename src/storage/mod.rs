//! Storage module for downloaded files
//!
//! This module defines the capability-style interface the crawler uses to
//! write downloaded works, and its filesystem implementation. The crawler
//! only ever creates directories and files under a user-chosen output root;
//! it never deletes or reads anything back.

mod fs;
mod traits;

pub use fs::FsStore;
pub use traits::{OutputStore, StorageError, StorageResult};
