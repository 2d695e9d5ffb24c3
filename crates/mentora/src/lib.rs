//! Mentora Domain Library
//!
//! Core domain types and interfaces for the Mentora academic assistant
//! backend.
//!
//! # Architecture
//!
//! This crate follows Clean Architecture / Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain/`): Pure business entities and logic
//!   - `entities/`: Core domain models (HistoryEntry, DocumentFile, UploadOutcome)
//!   - `value_objects/`: Immutable value types (HistoryCategory)
//!   - `errors/`: Domain-specific error types
//!
//! - **Ports** (`ports/`): Abstract interfaces (traits)
//!   - `repositories/`: Data access interfaces
//!   - `services/`: External collaborator interfaces (blob storage,
//!     remote document processing)
//!
//! # Usage
//!
//! ```rust,ignore
//! use mentora::domain::{DocumentFile, HistoryEntry, UploadOutcome};
//! use mentora::ports::{BlobStorage, HistoryRepository, ProcessingFunction};
//! ```

pub mod domain;
pub mod ports;

// Re-export commonly used types
pub use domain::{
    sanitize_file_name, CombinedResult, DocumentFile, DomainError, HistoryCategory, HistoryEntry,
    UploadOutcome, ALLOWED_CONTENT_TYPES, MAX_TOTAL_UPLOAD_BYTES,
};
pub use ports::{
    BlobStorage, HistoryRepository, ProcessingFunction, ProcessingRequest, ProcessingResponse,
};
