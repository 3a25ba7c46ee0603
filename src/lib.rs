//! Campus Pulse - Campus event management API
//!
//! This crate provides a clean architecture backend for running campus
//! events: a public catalog, role-gated management, seat reservation with
//! QR tickets, on-site check-in, post-attendance feedback, notifications,
//! and analytics.
//!
//! # Architecture Layers
//!
//! - **cli**: Command-line interface
//! - **commands**: CLI command implementations
//! - **config**: Application configuration and constants
//! - **domain**: Core business entities and logic
//! - **services**: Application use cases and business logic
//! - **infra**: Infrastructure concerns (MongoDB repositories)
//! - **api**: HTTP handlers, extractors, and routes
//! - **types**: Shared types (responses, timestamps, patch semantics)
//! - **errors**: Centralized error handling
//!
//! # CLI Usage
//!
//! ```bash
//! # Start the server
//! cargo run -- serve
//!
//! # Provision indexes on a fresh database
//! cargo run -- indexes
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod services;
pub mod types;

// Re-export commonly used types at crate root
pub use api::AppState;
pub use config::Config;
pub use domain::{Password, User, UserRole};
pub use errors::{AppError, AppResult};
