//! Banquillo kernel library.
//!
//! Role-based navigation and access gating for the club management shell,
//! plus the HTTP layer that serves it. The `banquillo` binary is the main
//! entry point for running the server.

pub mod access;
pub mod account;
pub mod auth;
pub mod config;
pub mod csrf;
pub mod error;
pub mod layout;
pub mod menu;
pub mod metrics;
pub mod models;
pub mod routes;
pub mod session;
pub mod state;
pub mod theme;

pub use config::Config;
pub use state::AppState;
