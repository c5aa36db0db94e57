//! Bibet - Betting Platform Backend
//!
//! Exchange-style sports betting ledger with a set of instant card and
//! wheel games, exposed over an HTTP API. Storage is pluggable behind
//! repository traits; the default wiring is fully in-memory.

pub mod api;
pub mod auth;
pub mod betting;
pub mod config;
pub mod errors;
pub mod games;
pub mod models;
pub mod repository;
pub mod sports;
