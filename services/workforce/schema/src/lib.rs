//! sea-orm entities for the workforce service.
//!
//! Enumerations (role, statuses, kinds) are stored as their SCREAMING_SNAKE
//! string form and mapped to domain enums in the service's infra layer.

pub mod assignments;
pub mod beats;
pub mod broadcast_reads;
pub mod broadcasts;
pub mod counters;
pub mod documents;
pub mod ledger_entries;
pub mod locations;
pub mod meetings;
pub mod messages;
pub mod staff_profiles;
pub mod users;
