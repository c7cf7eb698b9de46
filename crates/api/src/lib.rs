//! HTTP API layer for chirp.
//!
//! This crate provides the REST API:
//!
//! - **Endpoints**: tweets, users/follows, media upload and retrieval
//! - **Extractors**: the `api-key` credential header
//! - **Schemas**: client-facing entity representations
//!
//! Built on Axum 0.8; routing state is [`AppState`].

pub mod endpoints;
pub mod extractors;
pub mod response;
pub mod schemas;
pub mod state;

pub use endpoints::router;
pub use state::AppState;
