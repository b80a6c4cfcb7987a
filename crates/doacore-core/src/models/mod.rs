//! Data models for the application
//!
//! Row types map the PostgreSQL tables one to one (column names are kept as
//! the wire field names), request DTOs carry what clients post, and the
//! `New*` types are validated values ready to be written.

mod account;
mod donation;
mod event;
mod role;
mod team;

pub use account::*;
pub use donation::*;
pub use event::*;
pub use role::*;
pub use team::*;
