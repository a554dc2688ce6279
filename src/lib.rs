//! Pigment Match Matrix
//!
//! Dashboard service that asks a matching service which customer orders a
//! pigment fits and presents the answer. Classification and view assembly
//! live in the `match-insight` crate; this library adds the service client,
//! catalog, analysis sessions and HTTP surface, exposed for integration
//! testing.

pub mod api;
pub mod assets;
pub mod error;
pub mod models;
pub mod server;
pub mod services;
