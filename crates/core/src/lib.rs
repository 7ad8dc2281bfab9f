//! Domain layer for the customer registry.
//!
//! Holds the canonical in-process [`customer::Customer`], the sparse update
//! type and its merge rules, ISO date helpers, and the error taxonomy shared
//! by every layer above it. Nothing here knows about SQL or HTTP.

pub mod customer;
pub mod dates;
pub mod error;
pub mod types;
