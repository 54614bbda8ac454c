/*
 * error.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Error types for loading render inputs.
//!
//! Rendering itself never fails. These errors only arise at the boundary
//! where templates, quotations and configuration are read from text.

use thiserror::Error;

/// Errors that can occur while loading render inputs.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The input was not valid JSON, or its root was not an object.
    #[error("Invalid {what} JSON: {source}")]
    Json {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// The render configuration could not be parsed.
    #[error("Invalid render configuration: {0}")]
    Config(#[from] toml::de::Error),

    /// I/O error (e.g., reading an input file).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for input loading.
pub type RenderResult<T> = Result<T, RenderError>;
