//! # harveydrive-api
//!
//! HTTP API layer for HarveyDrive built on Axum.
//!
//! Provides the REST endpoints under `/api`, bearer token verification for
//! the external auth provider, middleware (CORS, request logging),
//! extractors, DTOs, and error mapping.

pub mod app;
pub mod auth;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_app, build_state, run_server};
pub use error::ApiError;
pub use state::AppState;
