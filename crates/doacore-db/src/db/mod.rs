//! Database repositories for data access layer
//!
//! Each repository owns a clone of the pool and covers one entity: accounts
//! and their roles, teams with memberships, events, and donations with their
//! line items. Constraint violations raised by PostgreSQL are translated into
//! client errors here so handlers never inspect SQLSTATE codes.

pub mod account;
pub mod constraint;
pub mod donation;
pub mod event;
pub mod role;
pub mod team;
//
// Transaction utilities
pub mod transaction;

pub use account::AccountRepository;
pub use donation::DonationRepository;
pub use event::EventRepository;
pub use role::RoleRepository;
pub use team::TeamRepository;
pub use transaction::TransactionGuard;

/// Schema migrations embedded from the workspace `migrations/` directory
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("../../migrations");
