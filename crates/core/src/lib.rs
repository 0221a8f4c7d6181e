//! Domain logic for the Quorum Q&A forum.
//!
//! This crate has no internal dependencies so its policy code (feed ranking,
//! vote transitions, text helpers) can be used by both the repository layer
//! and any future CLI or worker tooling.

pub mod error;
pub mod feed;
pub mod mentions;
pub mod roles;
pub mod search;
pub mod types;
pub mod voting;
