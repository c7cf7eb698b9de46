//! Common utilities and shared types for chirp.
//!
//! This crate provides foundational components used across all chirp crates:
//!
//! - **Configuration**: Application settings via [`Config`]
//! - **Error handling**: Unified error types via [`AppError`] and [`AppResult`]
//! - **Name generation**: Random display names via [`generate_display_name`]
//! - **Storage**: Name-keyed local file storage via [`LocalStorage`]

pub mod config;
pub mod error;
pub mod name;
pub mod storage;

pub use config::Config;
pub use error::{AppError, AppResult};
pub use name::generate_display_name;
pub use storage::{LocalStorage, StorageBackend, validate_file_name};
