//! API layer - HTTP handlers and routing
//!
//! - Request handlers
//! - Custom extractors
//! - Route definitions, CORS and tracing layers

pub mod extractors;
pub mod handlers;
pub mod openapi;
pub mod routes;
pub mod state;

pub use openapi::ApiDoc;
pub use routes::create_router;
pub use state::AppState;
