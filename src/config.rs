//! Router configuration

use crate::transition::Transition;
use std::time::Duration;

/// Tunables for a [`PageRouter`](crate::PageRouter).
///
/// # Example
///
/// ```
/// use hash_navigator::{RouterConfig, Transition};
/// use std::time::Duration;
///
/// let config = RouterConfig::new()
///     .transition(Transition::fade(200))
///     .min_loading_duration(Duration::from_millis(400))
///     .title_suffix("Android Dev Tools");
///
/// assert_eq!(config.document_title("Repo Mapper"), "Repo Mapper - Android Dev Tools");
/// ```
#[derive(Debug, Clone)]
pub struct RouterConfig {
    /// Loading overlay stays up at least this long, measured from the start
    /// of the navigation
    pub min_loading_duration: Duration,
    /// Fade used on the content area
    pub transition: Transition,
    /// Title used when neither the load result nor the route has one
    pub default_page_title: String,
    /// Last-resort title
    pub fallback_title: String,
    /// Title of the not-found state
    pub not_found_title: String,
    /// Fragment rendered for unknown ids
    pub not_found_html: String,
    /// Appended to `document.title` as `"<page> - <suffix>"`
    pub title_suffix: Option<String>,
}

impl RouterConfig {
    pub const DEFAULT_MIN_LOADING_DURATION: Duration = Duration::from_millis(600);

    pub fn new() -> Self {
        Self::default()
    }

    pub fn min_loading_duration(mut self, duration: Duration) -> Self {
        self.min_loading_duration = duration;
        self
    }

    pub fn transition(mut self, transition: Transition) -> Self {
        self.transition = transition;
        self
    }

    pub fn default_page_title(mut self, title: impl Into<String>) -> Self {
        self.default_page_title = title.into();
        self
    }

    pub fn fallback_title(mut self, title: impl Into<String>) -> Self {
        self.fallback_title = title.into();
        self
    }

    pub fn not_found(mut self, title: impl Into<String>, html: impl Into<String>) -> Self {
        self.not_found_title = title.into();
        self.not_found_html = html.into();
        self
    }

    pub fn title_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.title_suffix = Some(suffix.into());
        self
    }

    /// Full `document.title` for a page title
    pub fn document_title(&self, page_title: &str) -> String {
        match &self.title_suffix {
            Some(suffix) if !suffix.is_empty() && page_title != suffix => {
                format!("{} - {}", page_title, suffix)
            }
            _ => page_title.to_string(),
        }
    }
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            min_loading_duration: Self::DEFAULT_MIN_LOADING_DURATION,
            transition: Transition::default(),
            default_page_title: "Untitled page".to_string(),
            fallback_title: "Android Dev Tools".to_string(),
            not_found_title: "Page Not Found".to_string(),
            not_found_html: concat!(
                "<div class=\"page-not-found\">",
                "<h2>Page Not Found</h2>",
                "<p>The page you are looking for does not exist.</p>",
                "</div>"
            )
            .to_string(),
            title_suffix: None,
        }
    }
}
