//! Auth types shared across GuardPost crates.
//!
//! Provides bearer JWT validation and the `Identity` extractor.

pub mod identity;
pub mod token;
