//! Domain types and shot-plan algorithms for the call sheet backend.
//!
//! This crate has zero internal dependencies and performs no I/O, so it can
//! be used by the repository layer, the API, and any future export tooling.

pub mod clock;
pub mod error;
pub mod shot_plan;
pub mod types;
