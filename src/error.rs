//! # Error Types
//!
//! This module defines error types used throughout the overprint library.
//!
//! Formatting and value resolution never fail, so nothing in
//! [`crate::format`] or the template resolvers returns these. The
//! recoverable failures are page-image loading, the print readiness gate,
//! and the room counter's backing store.

use thiserror::Error;

/// Main error type for overprint operations
#[derive(Debug, Error)]
pub enum OverprintError {
    /// A page image could not be fetched or read
    #[error("Asset error: {0}")]
    Asset(String),

    /// A page set failed to load; carries the first page's error
    #[error("Page images failed to load: {0}")]
    PageLoad(String),

    /// A page image was fetched but could not be decoded
    #[error("Image error: {0}")]
    Image(String),

    /// No template is registered under this id
    #[error("Unknown template '{0}'")]
    UnknownTemplate(String),

    /// Page images did not finish loading within the readiness window
    #[error("Print not ready: {0}")]
    NotReady(String),

    /// Room counter store failure or lost compare-and-swap race
    #[error("Room counter error: {0}")]
    Room(String),

    /// Invalid configuration
    #[error("Config error: {0}")]
    Config(String),

    /// I/O error wrapper
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error wrapper
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// HTTP client error wrapper
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}
