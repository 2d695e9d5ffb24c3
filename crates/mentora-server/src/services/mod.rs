//! Application Services
//!
//! The four pieces of the request-proxy and document-processing core:
//! - `gateway`: outbound calls to named upstream functions
//! - `provider_status`: aggregated provider health/quota
//! - `documents`: concurrent per-file upload + processing pipeline
//! - `recorder`: fire-and-forget interaction history

pub mod documents;
pub mod gateway;
pub mod provider_status;
pub mod recorder;
