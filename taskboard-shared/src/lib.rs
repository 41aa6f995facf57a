//! # Taskboard Shared Library
//!
//! This crate contains the task model and the storage layer used by the
//! Taskboard API server.
//!
//! ## Module Organization
//!
//! - `models`: Task record and the inputs accepted by the store
//! - `store`: The `TaskStore` trait with PostgreSQL and in-memory backends
//! - `db`: Connection pool management and schema bootstrap

pub mod db;
pub mod models;
pub mod store;

/// Current version of the Taskboard shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
