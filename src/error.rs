//! Error handling for the router
//!
//! Nothing in this module is ever returned as an `Err` from
//! [`PageRouter::load_page_content`](crate::PageRouter::load_page_content).
//! Errors are captured into a [`LoadResult`](crate::LoadResult), logged, or
//! reported through a [`NavigationOutcome`].

use crate::loader::LoadStatus;
use std::fmt;

// ============================================================================
// Navigation Outcome
// ============================================================================

/// What a single call to `load_page_content` ended up doing.
#[derive(Debug, Clone, PartialEq)]
pub enum NavigationOutcome {
    /// Markup was mounted and the transition completed. `status` tells
    /// whether the mounted markup is the page or an in-place error fragment.
    Loaded { id: String, status: LoadStatus },
    /// The id is not registered; the not-found fragment was rendered.
    NotFound { id: String },
    /// The navigation stopped before touching the content area.
    Aborted { reason: RouterError },
    /// A newer navigation started while this one was in flight.
    Superseded { id: String },
}

impl NavigationOutcome {
    /// Check if the page markup was mounted successfully
    pub fn is_success(&self) -> bool {
        matches!(
            self,
            NavigationOutcome::Loaded {
                status: LoadStatus::Success,
                ..
            }
        )
    }

    /// Check if the route was not found
    pub fn is_not_found(&self) -> bool {
        matches!(self, NavigationOutcome::NotFound { .. })
    }

    /// Check if the navigation was aborted
    pub fn is_aborted(&self) -> bool {
        matches!(self, NavigationOutcome::Aborted { .. })
    }

    /// Check if a newer navigation took over
    pub fn is_superseded(&self) -> bool {
        matches!(self, NavigationOutcome::Superseded { .. })
    }

    /// Normalized id this navigation targeted, if it got that far
    pub fn page_id(&self) -> Option<&str> {
        match self {
            NavigationOutcome::Loaded { id, .. }
            | NavigationOutcome::NotFound { id }
            | NavigationOutcome::Superseded { id } => Some(id),
            NavigationOutcome::Aborted { .. } => None,
        }
    }
}

// ============================================================================
// Router Errors
// ============================================================================

/// Errors the router can run into while loading a page
#[derive(Debug, Clone, PartialEq)]
pub enum RouterError {
    /// `register_content_targets` was never called
    ContentTargetMissing,

    /// No route registered under this id
    RouteNotFound { id: String },

    /// Route has neither inline markup nor a remote path
    NoContentSource { id: String },

    /// Remote markup could not be fetched
    Fetch(FetchError),

    /// The content loader panicked
    LoaderPanicked { id: String },

    /// A page hook or chrome callback failed
    Hook(HookError),
}

impl fmt::Display for RouterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouterError::ContentTargetMissing => {
                write!(f, "Content target not registered")
            }
            RouterError::RouteNotFound { id } => write!(f, "Route not found: {}", id),
            RouterError::NoContentSource { id } => {
                write!(f, "Route '{}' has no inline markup or path", id)
            }
            RouterError::Fetch(err) => write!(f, "{}", err),
            RouterError::LoaderPanicked { id } => {
                write!(f, "Content loader panicked while loading '{}'", id)
            }
            RouterError::Hook(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for RouterError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RouterError::Fetch(err) => Some(err),
            RouterError::Hook(err) => Some(err),
            _ => None,
        }
    }
}

impl From<FetchError> for RouterError {
    fn from(err: FetchError) -> Self {
        RouterError::Fetch(err)
    }
}

impl From<HookError> for RouterError {
    fn from(err: HookError) -> Self {
        RouterError::Hook(err)
    }
}

/// Failure reported by a [`MarkupFetcher`](crate::MarkupFetcher)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// The server answered with a non-OK status
    Status { path: String, code: u16 },
    /// The request never produced a response
    Network { path: String, message: String },
}

impl FetchError {
    /// Path that was being fetched
    pub fn path(&self) -> &str {
        match self {
            FetchError::Status { path, .. } | FetchError::Network { path, .. } => path,
        }
    }
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::Status { path, code } => {
                write!(f, "Failed to load {}: HTTP {}", path, code)
            }
            FetchError::Network { path, message } => {
                write!(f, "Failed to load {}: {}", path, message)
            }
        }
    }
}

impl std::error::Error for FetchError {}

/// A callback failed, either by returning an error or by panicking.
///
/// `description` names the call site (for example `"overlay show"` or
/// `"page handler for 'faq-api'"`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HookError {
    pub description: String,
    pub message: String,
}

impl HookError {
    /// Create a hook error
    pub fn new(description: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            message: message.into(),
        }
    }

    /// Build a hook error from a caught panic payload
    pub(crate) fn from_panic(
        description: impl Into<String>,
        payload: &(dyn std::any::Any + Send),
    ) -> Self {
        let message = if let Some(msg) = payload.downcast_ref::<&str>() {
            (*msg).to_string()
        } else if let Some(msg) = payload.downcast_ref::<String>() {
            msg.clone()
        } else {
            "callback panicked".to_string()
        };
        Self::new(description, message)
    }

    /// Attach the call-site description to an error a hook returned.
    pub(crate) fn within(mut self, description: &str) -> Self {
        if self.description.is_empty() {
            self.description = description.to_string();
        }
        self
    }
}

impl fmt::Display for HookError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} failed: {}", self.description, self.message)
    }
}

impl std::error::Error for HookError {}

// ============================================================================
// Tests
// ============================================================================
