//! Service plumbing shared by GuardPost services: configuration loading,
//! tracing setup, HTTP middleware and serde helpers.

pub mod config;
pub mod middleware;
pub mod serde;
pub mod tracing;
