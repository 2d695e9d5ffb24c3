//! Service Ports
//!
//! Abstract interfaces for external collaborators.

mod blob_storage;
mod processing;

pub use blob_storage::*;
pub use processing::*;
