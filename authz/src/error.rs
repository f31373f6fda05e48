//! Error types for the access-control subsystem.
//!
//! Evaluation never fails: an unknown role id, an unknown permission token or
//! a missing principal are modelled as data and resolve to "deny". The errors
//! below only surface while parsing identifiers or loading a role table.

use thiserror::Error;

/// Errors that can occur while building the role registry.
#[derive(Debug, Error)]
pub enum AuthzError {
    /// The role table file could not be read.
    #[error("Role table I/O error: {0}")]
    ConfigIo(#[from] std::io::Error),

    /// The role table file is not valid YAML or does not match the expected shape.
    #[error("Role table parse error: {0}")]
    ConfigParse(#[from] serde_yaml::Error),

    /// A permission token outside the known vocabulary.
    #[error("Unknown permission: {0}")]
    UnknownPermission(String),

    /// A role name outside the closed role set.
    #[error("Unknown role: {0}")]
    UnknownRole(String),

    /// The role table parsed but violates an invariant.
    #[error("Role table validation failed: {0}")]
    Validation(String),
}

/// A specialized Result type for access-control operations.
pub type Result<T> = std::result::Result<T, AuthzError>;
