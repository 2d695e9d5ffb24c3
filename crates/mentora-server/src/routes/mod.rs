//! Mentora API Routes
//!
//! - /proxy/:function - Upstream function gateway (any method)
//! - /status - Aggregated provider health/quota
//! - /documents/process - Document upload & processing batch
//! - /history - Interaction history (record + list)

pub mod documents;
pub mod history;
pub mod proxy;
pub mod status;
pub mod swagger;
