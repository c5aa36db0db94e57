//! HTTP API layer
//!
//! Thin axum surface over the ledger, market aggregator, game
//! evaluators and feed. Handlers translate requests into core calls and
//! wrap results in the `{success, ...}` envelope.

pub mod errors;
pub mod games;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod server;
