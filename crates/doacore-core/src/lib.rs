//! DoaCore Core Library
//!
//! This crate provides the domain models, error types, configuration, the
//! authorization policy and submission validation shared by the database and
//! API crates.

pub mod access;
pub mod config;
pub mod error;
pub mod models;
pub mod validation;

// Re-export commonly used types
pub use access::{authorize, authorize_any, Access, View};
pub use config::{BootstrapAdmin, Config};
pub use error::{AppError, ErrorMetadata, LogLevel, StorageResultExt};
pub use models::Role;
