//! Leaderboard HTTP server.
//!
//! Library target so the binary and the integration tests share one router
//! construction path. The binary entry point lives in `main.rs`.

pub mod api;
pub mod config;
pub mod logging;
pub mod metrics;
