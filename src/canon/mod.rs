//! Core canonical-store engine.

pub mod format;
pub mod merge;
pub mod migrate;
pub mod sources;
pub mod store;
pub mod types;
pub mod versification;

pub use store::Store;
pub use types::error::{CanonError, Result};
