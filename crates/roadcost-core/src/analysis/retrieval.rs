//! Retrieval state of a summary fetch.

use serde::{Deserialize, Serialize};

use super::model::AnalysisSummary;

/// Where a summary retriever currently stands.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum RetrievalState {
    /// No document identifier yet.
    #[default]
    Idle,
    Loading,
    Ready(AnalysisSummary),
    /// The last fetch failed. The message is kept for diagnostics and for
    /// [`FailureDisplay::Banner`].
    Failed(String),
}

impl RetrievalState {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn summary(&self) -> Option<&AnalysisSummary> {
        match self {
            Self::Ready(summary) => Some(summary),
            _ => None,
        }
    }

    pub fn failure(&self) -> Option<&str> {
        match self {
            Self::Failed(message) => Some(message),
            _ => None,
        }
    }
}

/// How a failed fetch is shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailureDisplay {
    /// Render exactly like the idle state.
    #[default]
    Silent,
    /// Render a visible error line with the failure message.
    Banner,
}
