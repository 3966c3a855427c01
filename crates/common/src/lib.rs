//! Common types and utilities for sdk-bindgen
//!
//! This crate contains the normalized metadata model shared by the service
//! discoverer and the model parser, the error type both report through, the
//! identifier transliteration rules, and the SDK layout configuration.

pub mod layout;
pub mod model;
pub mod naming;

pub use layout::SdkLayout;
pub use model::{EnumVariant, ModelKind, ParsedField, ParsedModel, ServiceMetadata};

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while extracting SDK metadata
#[derive(Error, Debug)]
pub enum BindgenError {
    #[error("SDK root not found or not a directory: {}", .0.display())]
    SdkRootNotFound(PathBuf),

    #[error("Model path not found for service '{service}': {}", .path.display())]
    ModelDirectoryNotFound { service: String, path: PathBuf },

    #[error("Syntax error in {}:{line}:{column}: {message}", .path.display())]
    Syntax {
        path: PathBuf,
        line: usize,
        column: usize,
        message: String,
    },

    #[error("Failed to read {}: {source}", .path.display())]
    SourceRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Result type for extraction operations
pub type Result<T> = std::result::Result<T, BindgenError>;

/// Serialize a payload as pretty-printed JSON (two-space indentation)
pub fn to_pretty_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}
