//! Request middleware.
//!
//! Purpose: request lifecycle concerns shared by every route: trace
//! identifier propagation and the cross-origin policy.

pub mod cors;
pub mod trace;

pub use cors::permissive_cors;
pub use trace::Trace;
