//! DoaCore data access layer
//!
//! Repositories over a shared `sqlx::PgPool`, one per table group.

pub mod db;

pub use db::*;
