//! Host integration
//!
//! The router does not own any DOM handles. Everything it needs from the page
//! it was embedded in goes through the traits in this module: a browser shell
//! implements them over `web-sys`, tests implement them in memory.
//!
//! [`RouterHost`] bundles the implementations a [`PageRouter`](crate::PageRouter)
//! is built from.

use crate::history::{HistoryAdapter, MemoryHistory};
use crate::loader::{LoadStatus, MarkupFetcher};
use crate::route::Route;
use crate::transition::{ContentAnimator, InstantFade, PageAnimations};
use futures::future::BoxFuture;
use std::sync::Arc;
use std::time::Duration;

/// The element page markup is mounted into.
pub trait ContentSurface: Send + Sync {
    /// Replace the element's children with `html`
    fn set_html(&self, html: &str);

    /// Current rendered height in CSS pixels
    fn rendered_height(&self) -> f64;

    /// Pin (`Some`) or release (`None`) the element's `min-height`
    fn set_min_height(&self, height: Option<f64>);

    /// Set the element's opacity, `0.0..=1.0`
    fn set_opacity(&self, opacity: f32);
}

/// An element whose text the router replaces, such as the app-bar headline.
pub trait TextTarget: Send + Sync {
    fn set_text(&self, text: &str);
}

/// Document-level operations.
pub trait Document: Send + Sync {
    /// Set `document.title`
    fn set_title(&self, title: &str);

    /// Scroll the window back to the top
    fn scroll_to_top(&self);
}

/// Time source and timer.
///
/// `now` is measured from an arbitrary fixed origin; only differences matter.
pub trait Clock: Send + Sync {
    fn now(&self) -> Duration;

    fn sleep(&self, duration: Duration) -> BoxFuture<'static, ()>;
}

/// Runs detached background work (page animations, deferred hooks).
pub trait Spawner: Send + Sync {
    fn spawn(&self, task: BoxFuture<'static, ()>);
}

/// What the metadata collaborator is told about a navigation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataUpdate {
    pub page_id: String,
    pub page_title: String,
    pub load_status: LoadStatus,
}

/// Updates `<meta>` tags, canonical link and structured data for a route.
///
/// Called with `route == None` and [`LoadStatus::NotFound`] for unknown ids.
pub trait SiteMetadata: Send + Sync {
    fn update_for_route(&self, route: Option<&Route>, update: &MetadataUpdate);
}

/// Enhances dialogs found in freshly mounted markup.
pub trait DialogEnhancer: Send + Sync {
    fn init(&self, content: &dyn ContentSurface);
}

/// Everything the router needs from its environment.
///
/// Only the document, clock, spawner and fetcher are required; the rest
/// default to no-op or in-memory implementations.
///
/// # Example
///
/// ```ignore
/// let host = RouterHost::new(document, clock, spawner, fetcher)
///     .animator(Arc::new(OpacityFade::new(clock.clone())))
///     .history(Arc::new(BrowserHistory::new()))
///     .metadata(Arc::new(SeoTags::default()));
/// ```
#[derive(Clone)]
pub struct RouterHost {
    pub document: Arc<dyn Document>,
    pub clock: Arc<dyn Clock>,
    pub spawner: Arc<dyn Spawner>,
    pub fetcher: Arc<dyn MarkupFetcher>,
    pub animator: Arc<dyn ContentAnimator>,
    pub history: Arc<dyn HistoryAdapter>,
    pub metadata: Option<Arc<dyn SiteMetadata>>,
    pub dialogs: Option<Arc<dyn DialogEnhancer>>,
    pub page_animations: Option<Arc<dyn PageAnimations>>,
}

impl RouterHost {
    pub fn new(
        document: Arc<dyn Document>,
        clock: Arc<dyn Clock>,
        spawner: Arc<dyn Spawner>,
        fetcher: Arc<dyn MarkupFetcher>,
    ) -> Self {
        Self {
            document,
            clock,
            spawner,
            fetcher,
            animator: Arc::new(InstantFade),
            history: Arc::new(MemoryHistory::default()),
            metadata: None,
            dialogs: None,
            page_animations: None,
        }
    }

    pub fn animator(mut self, animator: Arc<dyn ContentAnimator>) -> Self {
        self.animator = animator;
        self
    }

    pub fn history(mut self, history: Arc<dyn HistoryAdapter>) -> Self {
        self.history = history;
        self
    }

    pub fn metadata(mut self, metadata: Arc<dyn SiteMetadata>) -> Self {
        self.metadata = Some(metadata);
        self
    }

    pub fn dialogs(mut self, dialogs: Arc<dyn DialogEnhancer>) -> Self {
        self.dialogs = Some(dialogs);
        self
    }

    pub fn page_animations(mut self, animations: Arc<dyn PageAnimations>) -> Self {
        self.page_animations = Some(animations);
        self
    }
}

impl std::fmt::Debug for RouterHost {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RouterHost")
            .field("metadata", &self.metadata.is_some())
            .field("dialogs", &self.dialogs.is_some())
            .field("page_animations", &self.page_animations.is_some())
            .finish_non_exhaustive()
    }
}
