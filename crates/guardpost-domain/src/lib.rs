//! Domain types shared across GuardPost crates.
//!
//! Pure types only, no framework dependencies. Import from `usecase/` and
//! `domain/` layers of a service, and from the auth-types crate.

pub mod pagination;
pub mod phone;
pub mod role;
