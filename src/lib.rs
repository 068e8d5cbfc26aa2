//! # Hash Navigator
//!
//! A client-side hash router for single-page sites, with support for:
//!
//! - **Alias Normalization** - Legacy `/layout/*.html` files, clean tool paths
//!   and workspace names all resolve to one canonical id
//! - **Route Registry** - Idempotent registration with inline-markup override
//! - **Fade Transitions** - Fade out, swap markup, fade in, with a minimum
//!   visible loading time
//! - **Lifecycle Hooks** - Injected page handlers, per-route ready hooks and
//!   chrome callbacks that can never break a navigation
//! - **Stale Navigation Handling** - The newest navigation always wins
//! - **Link Interception** - Delegated click handling and active-nav styling
//!
//! The router owns no DOM handles. The page it runs in is reached through the
//! traits in [`host`], implemented over `web-sys` in a browser and in memory
//! in tests.
//!
//! # Quick Start
//!
//! ```ignore
//! use hash_navigator::*;
//! use std::sync::Arc;
//!
//! let registry = Arc::new(RouteRegistry::new());
//! registry.register_route(
//!     Route::new("repo-mapper", "Repo Mapper")
//!         .path("pages/github/repo-mapper.html")
//!         .on_load(hook_fn(|_| init_repo_mapper())),
//! );
//!
//! let host = RouterHost::new(document, clock, spawner, fetcher)
//!     .history(Arc::new(BrowserHistory::new()));
//! let options = RouterOptions::new()
//!     .show_overlay(callback(show_spinner))
//!     .hide_overlay(callback(hide_spinner));
//!
//! let router = init_router(registry, host, content, Some(headline), home_html, options);
//! router.start().await;
//! ```
//!
//! # Navigation
//!
//! ```ignore
//! // Raw fragments and aliases are normalized first
//! router.load("#/layout/repo-mapper.html").await;
//!
//! // Re-render without pushing history (popstate, bootstrap)
//! router.load_page_content("faq-api", false).await;
//!
//! // Clicks on in-page links
//! let decision = router.link_interceptor().handle_click(&mut event);
//! ```
//!
//! # Feature Flags
//!
//! - `log` (default) - Uses the standard `log` crate for logging
//! - `tracing` - Uses the `tracing` crate for structured logging (mutually exclusive with `log`)
//! - `cache` (default) - LRU memo of normalized identifiers

#![doc(html_root_url = "https://docs.rs/hash-navigator/0.1.0")]
#![cfg_attr(docsrs, feature(doc_cfg))]
// Lints are configured in Cargo.toml [lints] section

// Logging abstraction
pub mod logging;

// Cache (optional)
#[cfg(feature = "cache")]
pub mod cache;

// Core routing modules
pub mod history;
pub mod loader;
pub mod normalize;
pub mod route;
pub mod state;

// Error handling
pub mod error;

// Configuration
pub mod config;

// Page lifecycle
pub mod lifecycle;
pub mod runtime;

// Host integration
pub mod host;
pub mod links;
pub mod transition;

// Router context
mod context;

// Re-export main types for convenient access
#[cfg(feature = "cache")]
pub use cache::{CacheStats, NormalizeCache};
pub use config::RouterConfig;
pub use context::{init_router, PageRouter};
pub use error::{FetchError, HookError, NavigationOutcome, RouterError};
pub use history::{hash_url, History, HistoryAdapter, HistoryEntry, HistoryEvent, MemoryHistory};
pub use host::{
    Clock, ContentSurface, DialogEnhancer, Document, MetadataUpdate, RouterHost, SiteMetadata,
    Spawner, TextTarget,
};
pub use lifecycle::{
    async_hook_fn, callback, hook_fn, noop_callback, try_hook_fn, Callback, HookOutput, HookReport,
    PageHook,
};
pub use links::{
    resolve_link_click, ActiveNav, ClickEvent, ClickNode, LinkDecision, LinkInterceptor,
    MouseButton, NavLink, PassReason, RouteLookup,
};
pub use loader::{error_fragment, fetch_page_markup, LoadContext, LoadResult, LoadStatus, MarkupFetcher};
pub use normalize::{is_home, normalize_page_id, HOME_ROUTE_ID};
pub use route::{validate_route_id, Registration, Route, RouteMetadata, RouteRegistry};
pub use runtime::{ContentTargets, RouterOptions, RouterRuntime};
pub use state::{NavigationPhase, NavigationState, NavigationToken};
pub use transition::{ContentAnimator, InstantFade, OpacityFade, PageAnimations, Transition};

/// Navigation direction indicator.
///
/// Reported by [`History`] stack operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationDirection {
    /// Navigating forward to a new page
    Forward,
    /// Navigating back in history
    Back,
}
