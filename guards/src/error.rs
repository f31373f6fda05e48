use thiserror::Error;

/// Failure reported by a [`crate::Navigator`] implementation.
///
/// Guards propagate these untouched; they never retry a navigation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NavigationError {
    #[error("Navigation target unreachable: {0}")]
    Unreachable(String),

    #[error("Navigation rejected: {0}")]
    Rejected(String),
}

pub type Result<T> = std::result::Result<T, NavigationError>;
