//! Core error types for pitchpost-core.
//!
//! This module defines the error hierarchy using thiserror. Only the
//! catalog boundary, persistence and configuration can fail outright;
//! date parsing and position acquisition degrade instead of erroring
//! once they reach the classification and ranking layers.

use std::path::PathBuf;
use thiserror::Error;

use crate::event::EventId;

/// Core error type for pitchpost-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Catalog loading or validation errors
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Interest-label persistence errors
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A date supplied outside the catalog (e.g. a "today" override) was malformed
    #[error("Date error: {0}")]
    Date(#[from] DateParseError),
}

/// Errors raised while loading the event catalog.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// The catalog file could not be read
    #[error("Failed to read catalog at {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The catalog is not valid JSON or does not match the record schema
    #[error("Failed to parse catalog: {0}")]
    ParseFailed(#[from] serde_json::Error),

    /// Two records share an identifier
    #[error("Duplicate event id {0}")]
    DuplicateId(EventId),
}

/// Errors from the persisted interest-label backend.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Failed to open the backing database
    #[error("Failed to open store at {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Query execution failed
    #[error("Query failed: {0}")]
    QueryFailed(#[from] rusqlite::Error),

    /// The data directory could not be prepared
    #[error("Data directory unavailable: {0}")]
    DataDir(#[from] std::io::Error),

    /// The label set could not be encoded
    #[error("Failed to encode label set: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Unknown dot-path key
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },
}

/// A date string that neither delimiter rule nor the fallback formats accept.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DateParseError {
    #[error("empty date string")]
    Empty,

    #[error("unsupported delimiter '{delimiter}' in '{input}'")]
    UnsupportedDelimiter { input: String, delimiter: char },

    #[error("'{0}' is not a valid calendar date")]
    InvalidDate(String),

    #[error("unrecognized date format '{0}'")]
    Unrecognized(String),
}

/// Outcome of a failed viewer-position request.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PositionError {
    #[error("position permission denied")]
    Denied,

    #[error("position unavailable: {0}")]
    Unavailable(String),
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
