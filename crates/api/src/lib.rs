//! Customer registry API server library.
//!
//! Exposes the API representation, the api <-> domain mappers, the customer
//! service, and the HTTP building blocks (config, state, error handling,
//! routes) so integration tests and the binary entrypoint can both use them.

pub mod config;
pub mod error;
pub mod handlers;
pub mod mapper;
pub mod models;
pub mod router;
pub mod routes;
pub mod service;
pub mod state;
