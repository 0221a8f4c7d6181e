//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` entity struct matching the database row
//! - Storage-level create/update DTOs (handlers map request payloads onto
//!   these, filling in resolved fields like author snapshots)

pub mod answer;
pub mod comment;
pub mod notification;
pub mod question;
pub mod role;
pub mod session;
pub mod user;
pub mod vote;
