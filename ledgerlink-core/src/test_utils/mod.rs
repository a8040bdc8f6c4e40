//! Test utilities and helpers for ledgerlink
//!
//! Shared fixtures and in-memory stub implementations of the external
//! trait seams, used across the crate's test modules.

pub mod fixtures;
pub mod stubs;

pub use fixtures::*;
pub use stubs::*;
