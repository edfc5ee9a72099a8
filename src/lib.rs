//! Auto shop backend
//!
//! Tracks customers, the cars they own and the service records of each car,
//! and keeps that three-level ownership tree consistent when parents are
//! deleted.
//!
//! # Architecture Layers
//!
//! - **cli**: Command-line interface
//! - **commands**: CLI command implementations
//! - **config**: Application configuration and constants
//! - **domain**: Customer, Car and Service entities
//! - **services**: Cascade deletes, nested reads and use cases
//! - **infra**: Database, entity stores and the unit of work
//! - **api**: HTTP handlers, extractors and routes
//! - **errors**: Centralized error handling
//!
//! # CLI Usage
//!
//! ```bash
//! # Start the server
//! cargo run -- serve
//!
//! # Run migrations
//! cargo run -- migrate up
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod services;

// Re-export commonly used types at crate root
pub use api::AppState;
pub use config::Config;
pub use domain::{Car, Customer, Service};
pub use errors::{AppError, AppResult};
