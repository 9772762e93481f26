//! Error types for member resolution.

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;

/// Errors raised while resolving members.
///
/// None of these escape [`crate::ide::ResolutionEngine::resolve`]; they are
/// logged and the offending provider contributes nothing for that type.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// A provider did not finish within its wait budget.
    #[error("{provider} timed out after {waited:?} resolving {type_name}")]
    ProviderTimeout {
        provider: &'static str,
        type_name: Arc<str>,
        waited: Duration,
    },

    /// A provider's backing model failed.
    #[error("{provider} failed to resolve {type_name}: {message}")]
    ProviderResolutionFailure {
        provider: &'static str,
        type_name: Arc<str>,
        message: String,
    },

    /// The hierarchy loops back on itself. Guarded internally by the walker.
    #[error("Hierarchy cycle through {0}")]
    HierarchyCycleDetected(Arc<str>),

    /// The starting type is unknown to every resolver.
    #[error("Unresolvable type: {0}")]
    UnresolvableType(Arc<str>),

    /// The caller cancelled the request.
    #[error("Resolution cancelled")]
    Cancelled,
}

impl ResolveError {
    /// Create a resolution failure for a provider.
    pub fn failure(
        provider: &'static str,
        type_name: impl Into<Arc<str>>,
        message: impl Into<String>,
    ) -> Self {
        Self::ProviderResolutionFailure {
            provider,
            type_name: type_name.into(),
            message: message.into(),
        }
    }

    /// Whether this error only reflects a caller-side cancellation.
    pub fn is_cancellation(&self) -> bool {
        matches!(self, ResolveError::Cancelled)
    }
}

/// Errors reported by external collaborators (compiled-class model, runtime).
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ModelError {
    /// The model cannot answer right now (not loaded, shutting down).
    #[error("Model unavailable: {0}")]
    Unavailable(String),

    /// The model holds broken data for a type.
    #[error("Corrupt model data for {type_name}: {reason}")]
    Corrupt { type_name: String, reason: String },
}

impl ModelError {
    /// Create a corrupt-data error.
    pub fn corrupt(type_name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Corrupt {
            type_name: type_name.into(),
            reason: reason.into(),
        }
    }
}
