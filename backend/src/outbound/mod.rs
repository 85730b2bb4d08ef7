//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **persistence**: MySQL sessions opened per operation with `sqlx`.
//!
//! Adapters are thin translators between driver values and domain types.
//! They contain no business logic.

pub mod persistence;
