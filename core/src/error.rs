//! Error types for knowledge-base loading.
//!
//! Analysis itself never fails: lookups are total and degrade to `None` or
//! `Unknown`. Only turning a serialized knowledge base into the typed model
//! can fail, and every such failure is described here.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while reading, parsing or validating a knowledge base.
#[derive(Debug, Error)]
pub enum KnowledgeBaseError {
    /// The file could not be read or written.
    #[error("knowledge base {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The JSON document does not match the knowledge-base schema.
    #[error("malformed JSON knowledge base: {0}")]
    Json(#[from] serde_json::Error),

    /// The TOML document does not match the knowledge-base schema.
    #[error("malformed TOML knowledge base: {0}")]
    Toml(#[from] toml::de::Error),

    /// The binary payload could not be decoded or encoded.
    #[error("malformed binary knowledge base: {0}")]
    Bincode(#[from] bincode::Error),

    /// The file extension does not name a supported format.
    #[error("unsupported knowledge base format {0:?} (expected .json, .toml, .bin or .bincode)")]
    UnsupportedFormat(String),

    /// A record failed validation.
    #[error("{section} entry {key:?}: {reason}")]
    InvalidEntry {
        section: &'static str,
        key: String,
        reason: String,
    },

    /// Two records share the same key.
    #[error("duplicate {section} entry {key:?}")]
    Duplicate { section: &'static str, key: String },
}

impl KnowledgeBaseError {
    /// Creates an invalid entry error.
    pub fn invalid(section: &'static str, key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidEntry {
            section,
            key: key.into(),
            reason: reason.into(),
        }
    }

    /// Creates a duplicate entry error.
    pub fn duplicate(section: &'static str, key: impl Into<String>) -> Self {
        Self::Duplicate {
            section,
            key: key.into(),
        }
    }
}

/// Result alias for knowledge-base operations.
pub type Result<T> = std::result::Result<T, KnowledgeBaseError>;
