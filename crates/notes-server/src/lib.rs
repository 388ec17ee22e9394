//! notes-server: HTTP API server for the notes sharing service.
//!
//! This crate provides:
//! - REST endpoints for registration, login, notes CRUD, and top tags
//! - Token-based authentication (argon2 password hashes, HS256 JWTs)
//! - Ownership enforcement at the handler boundary
//!
//! # Architecture
//!
//! The server is built on Axum with a middleware stack for:
//! - Request tracing and logging
//! - CORS handling
//! - Request ID generation
//! - JSON error responses
//!
//! Handlers are stateless and reentrant; all shared state lives in the
//! database behind [`notes_store::Store`]. Authorization is claim-based:
//! a valid unexpired token is trusted without a per-request user lookup.
//!
//! # Usage
//!
//! ```rust,ignore
//! use notes_server::{config::ServerConfig, routes, state::AppState};
//! use notes_store::{Store, StoreConfig};
//!
//! let config = ServerConfig::from_env()?;
//! let store = Store::connect(StoreConfig::from_env()?).await?;
//! let app = routes::build_router(AppState::new(store, config));
//! ```

pub mod auth;
pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod state;

// Re-exports for convenience
pub use config::{ConfigError, ServerConfig};
pub use error::{ApiError, ApiResult};
pub use state::AppState;

// Re-export dependent crates
pub use notes_core;
pub use notes_store;
