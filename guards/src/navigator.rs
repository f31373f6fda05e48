//! The navigation collaborator seam.

use serde::Serialize;

use crate::error::Result;

/// Options passed along with a navigation request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NavigateOptions {
    /// Replace the current history entry instead of pushing a new one
    pub replace: bool,

    /// Location to remember as the pre-redirect location
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remember: Option<String>,
}

/// Performs navigation on behalf of a guard.
pub trait Navigator {
    fn navigate(&mut self, destination: &str, options: NavigateOptions) -> Result<()>;
}

/// A navigation that was requested from a [`RecordingNavigator`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavigationRecord {
    pub destination: String,
    pub options: NavigateOptions,
}

/// Navigator that only records requests. Used for dry runs and tests.
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    pub history: Vec<NavigationRecord>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last(&self) -> Option<&NavigationRecord> {
        self.history.last()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&mut self, destination: &str, options: NavigateOptions) -> Result<()> {
        self.history.push(NavigationRecord {
            destination: destination.to_string(),
            options,
        });
        Ok(())
    }
}
