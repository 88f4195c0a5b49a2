//! Test utilities for GuardPost services.
//!
//! Import from `#[cfg(test)]` code and `tests/` only, never from production code.

pub mod auth;
