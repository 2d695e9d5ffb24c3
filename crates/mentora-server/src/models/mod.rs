//! Request/Response Models
//!
//! DTOs exposed on the HTTP surface, separate from domain entities.

mod documents;
mod history;

pub use documents::*;
pub use history::*;
