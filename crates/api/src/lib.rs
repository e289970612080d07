//! Call sheet API server library.
//!
//! Exposes the core building blocks (config, state, error handling, routes,
//! edit sessions) so integration tests and the binary entrypoint can both
//! access them.

pub mod app;
pub mod background;
pub mod config;
pub mod error;
pub mod handlers;
pub mod response;
pub mod routes;
pub mod session;
pub mod state;
