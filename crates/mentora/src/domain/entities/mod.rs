//! Domain Entities
//!
//! Pure domain models without infrastructure dependencies.
//! - HistoryEntry: recorded interaction owned by a user
//! - DocumentFile / UploadOutcome / CombinedResult: document batch lifecycle

mod document;
mod history;

pub use document::*;
pub use history::*;
