//! codewiki: terminal client for a code-documentation server (library crate).
//!
//! Re-exports public modules for integration tests and external use.

pub mod add;
pub mod cache;
pub mod client;
pub mod config;
pub mod constants;
pub mod env;
pub mod models;
pub mod output;
pub mod progress;
pub mod share;
pub mod view;
pub mod wiki;
