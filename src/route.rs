//! Route definition and registration

use crate::lifecycle::PageHook;
use crate::{debug_log, warn_log};
use parking_lot::RwLock;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

// ============================================================================
// Route Metadata
// ============================================================================

/// SEO and sharing fields attached to a route.
///
/// The router never reads or mutates these; they are handed to the
/// [`SiteMetadata`](crate::SiteMetadata) collaborator on every navigation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteMetadata {
    pub description: Option<String>,
    pub keywords: Vec<String>,
    /// Slug used to build the canonical URL
    pub canonical_slug: Option<String>,
    /// `og:*` properties, keyed without the `og:` prefix
    pub open_graph: BTreeMap<String, String>,
    /// `twitter:*` properties, keyed without the `twitter:` prefix
    pub twitter: BTreeMap<String, String>,
}

impl RouteMetadata {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn keyword(mut self, keyword: impl Into<String>) -> Self {
        self.keywords.push(keyword.into());
        self
    }

    pub fn canonical_slug(mut self, slug: impl Into<String>) -> Self {
        self.canonical_slug = Some(slug.into());
        self
    }

    pub fn open_graph(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.open_graph.insert(key.into(), value.into());
        self
    }

    pub fn twitter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.twitter.insert(key.into(), value.into());
        self
    }
}

// ============================================================================
// Route Validation
// ============================================================================

/// Validate a route id.
///
/// Ids are registry keys and URL fragments at the same time, so they must be
/// non-empty and made of ASCII alphanumerics, `-` and `_`.
pub fn validate_route_id(id: &str) -> Result<(), String> {
    if id.is_empty() {
        return Err("Route id cannot be empty".to_string());
    }

    if let Some(bad) = id
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || *c == '-' || *c == '_'))
    {
        return Err(format!(
            "Route id '{}' contains '{}'; only ASCII alphanumerics, '-' and '_' are allowed",
            id, bad
        ));
    }

    Ok(())
}

// ============================================================================
// Route
// ============================================================================

/// A navigable destination.
///
/// Content comes from exactly one place, checked in this order: `inline_html`,
/// then `path` (fetched), then, for `home` only, the initial page snapshot.
///
/// # Example
///
/// ```
/// use hash_navigator::{hook_fn, Route, RouteMetadata};
///
/// let route = Route::new("repo-mapper", "Repo Mapper")
///     .path("pages/github/repo-mapper.html")
///     .on_load(hook_fn(|_| {}))
///     .metadata(RouteMetadata::new().description("Map a GitHub repository tree"));
///
/// assert!(!route.has_inline_html());
/// assert_eq!(route.path.as_deref(), Some("pages/github/repo-mapper.html"));
/// ```
#[derive(Clone)]
pub struct Route {
    pub id: String,
    pub title: String,
    /// Remote location of the markup
    pub path: Option<String>,
    /// Pre-rendered markup; wins over `path`
    pub inline_html: Option<String>,
    /// Runs after the markup is mounted
    pub on_load: Option<PageHook>,
    pub metadata: RouteMetadata,
}

impl Route {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            path: None,
            inline_html: None,
            on_load: None,
            metadata: RouteMetadata::default(),
        }
    }

    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn inline_html(mut self, html: impl Into<String>) -> Self {
        self.inline_html = Some(html.into());
        self
    }

    pub fn on_load(mut self, hook: PageHook) -> Self {
        self.on_load = Some(hook);
        self
    }

    pub fn metadata(mut self, metadata: RouteMetadata) -> Self {
        self.metadata = metadata;
        self
    }

    pub fn has_inline_html(&self) -> bool {
        self.inline_html.is_some()
    }
}

impl std::fmt::Debug for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Route")
            .field("id", &self.id)
            .field("title", &self.title)
            .field("path", &self.path)
            .field("inline_html", &self.inline_html.as_ref().map(String::len))
            .field("on_load", &self.on_load.is_some())
            .field("metadata", &self.metadata)
            .finish()
    }
}

// ============================================================================
// RouteRegistry
// ============================================================================

/// What `register_route` did with a route
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Registration {
    /// The id was new
    Inserted,
    /// An existing route without inline markup was superseded by one with it
    Replaced,
    /// A route with this id already exists and was kept
    Skipped,
    /// The id failed validation
    Rejected { reason: String },
}

/// In-memory map of route id → [`Route`].
///
/// Feature modules register their routes at start-up. Registration takes
/// `&self` so the registry can be shared behind an `Arc` from the beginning.
#[derive(Default)]
pub struct RouteRegistry {
    routes: RwLock<HashMap<String, Arc<Route>>>,
}

impl RouteRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a route.
    ///
    /// Registration is idempotent: an id that already exists is kept, except
    /// when the existing route lacks inline markup and the new one carries it.
    /// In that case the new route supersedes the old one.
    ///
    /// # Example
    ///
    /// ```
    /// use hash_navigator::{Registration, Route, RouteRegistry};
    ///
    /// let registry = RouteRegistry::new();
    /// let legacy = Route::new("faq-api", "FAQ").path("pages/faq.html");
    /// let inline = Route::new("faq-api", "FAQ").inline_html("<section>FAQ</section>");
    ///
    /// assert_eq!(registry.register_route(legacy), Registration::Inserted);
    /// assert_eq!(registry.register_route(inline.clone()), Registration::Replaced);
    /// assert_eq!(registry.register_route(inline), Registration::Skipped);
    /// ```
    pub fn register_route(&self, route: Route) -> Registration {
        if let Err(reason) = validate_route_id(&route.id) {
            warn_log!("registry" => "rejecting route: {}", reason);
            return Registration::Rejected { reason };
        }

        let mut routes = self.routes.write();
        let existing_has_inline = routes.get(&route.id).map(|r| r.has_inline_html());
        match existing_has_inline {
            None => {
                debug_log!("registry" => "registered route '{}'", route.id);
                routes.insert(route.id.clone(), Arc::new(route));
                Registration::Inserted
            }
            Some(false) if route.has_inline_html() => {
                debug_log!(
                    "registry" => "route '{}' superseded by inline registration",
                    route.id
                );
                routes.insert(route.id.clone(), Arc::new(route));
                Registration::Replaced
            }
            Some(_) => {
                debug_log!("registry" => "route '{}' already registered, skipping", route.id);
                Registration::Skipped
            }
        }
    }

    /// Insert `route`, replacing any existing route with the same id.
    pub fn replace_route(&self, route: Route) -> Registration {
        if let Err(reason) = validate_route_id(&route.id) {
            warn_log!("registry" => "rejecting route: {}", reason);
            return Registration::Rejected { reason };
        }

        let previous = self
            .routes
            .write()
            .insert(route.id.clone(), Arc::new(route));
        if previous.is_some() {
            Registration::Replaced
        } else {
            Registration::Inserted
        }
    }

    pub fn get_route(&self, id: &str) -> Option<Arc<Route>> {
        self.routes.read().get(id).cloned()
    }

    pub fn has_route(&self, id: &str) -> bool {
        self.routes.read().contains_key(id)
    }

    /// Registered ids, sorted
    pub fn ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.routes.read().keys().cloned().collect();
        ids.sort_unstable();
        ids
    }

    pub fn len(&self) -> usize {
        self.routes.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.read().is_empty()
    }
}

impl std::fmt::Debug for RouteRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RouteRegistry")
            .field("ids", &self.ids())
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================
