//! Page router
//!
//! [`PageRouter`] ties the registry, the runtime, the content loader and the
//! host together. A navigation walks these phases:
//!
//! ```text
//! Idle → FadingOut → Loading → Rendering → AnimatingIn → Settled
//! ```
//!
//! `Settled` is reached on every path out of
//! [`load_page_content`](PageRouter::load_page_content), including early
//! returns and a dropped future: a guard releases the pinned height and hides
//! the loading overlay, as long as no newer navigation has started.

#[cfg(feature = "cache")]
use crate::cache::{CacheStats, NormalizeCache};
use crate::config::RouterConfig;
use crate::error::{NavigationOutcome, RouterError};
use crate::history::HistoryEntry;
use crate::host::{ContentSurface, MetadataUpdate, RouterHost, TextTarget};
use crate::links::{ActiveNav, LinkInterceptor, NavLink};
use crate::loader::{fetch_page_markup, LoadContext, LoadResult, LoadStatus};
use crate::normalize::HOME_ROUTE_ID;
use crate::route::{Route, RouteRegistry};
use crate::runtime::{ContentTargets, RouterOptions, RouterRuntime};
use crate::state::{NavigationPhase, NavigationState, NavigationToken};
use crate::{debug_log, error_log, info_log, warn_log};
use futures::FutureExt;
#[cfg(feature = "cache")]
use parking_lot::Mutex;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

// ============================================================================
// PageRouter
// ============================================================================

struct RouterInner {
    registry: Arc<RouteRegistry>,
    runtime: RouterRuntime,
    host: RouterHost,
    config: RouterConfig,
    state: NavigationState,
    nav: ActiveNav,
    #[cfg(feature = "cache")]
    normalize_cache: Mutex<NormalizeCache>,
}

/// Hash router driving the content area.
///
/// Cheap to clone; clones share all state.
///
/// # Example
///
/// ```ignore
/// let registry = Arc::new(RouteRegistry::new());
/// registry.register_route(Route::new("faq-api", "FAQ").inline_html(FAQ_HTML));
///
/// let router = init_router(registry, host, content, Some(headline), home_html, options);
/// router.start().await;
/// router.load("#/faq").await;
/// ```
#[derive(Clone)]
pub struct PageRouter {
    inner: Arc<RouterInner>,
}

impl PageRouter {
    /// Create a router with no content targets and no options applied.
    pub fn new(registry: Arc<RouteRegistry>, host: RouterHost, config: RouterConfig) -> Self {
        let runtime = RouterRuntime::new(host.spawner.clone());
        Self {
            inner: Arc::new(RouterInner {
                registry,
                runtime,
                host,
                config,
                state: NavigationState::new(),
                nav: ActiveNav::new(),
                #[cfg(feature = "cache")]
                normalize_cache: Mutex::new(NormalizeCache::new()),
            }),
        }
    }

    pub fn registry(&self) -> &Arc<RouteRegistry> {
        &self.inner.registry
    }

    pub fn runtime(&self) -> &RouterRuntime {
        &self.inner.runtime
    }

    pub fn host(&self) -> &RouterHost {
        &self.inner.host
    }

    pub fn config(&self) -> &RouterConfig {
        &self.inner.config
    }

    pub fn state(&self) -> &NavigationState {
        &self.inner.state
    }

    /// Phase of the newest navigation
    pub fn phase(&self) -> NavigationPhase {
        self.inner.state.phase()
    }

    pub fn register_content_targets(
        &self,
        content: Arc<dyn ContentSurface>,
        headline: Option<Arc<dyn TextTarget>>,
        home_html: impl Into<String>,
    ) {
        self.inner
            .runtime
            .register_content_targets(content, headline, home_html);
    }

    pub fn apply_options(&self, options: RouterOptions) {
        self.inner.runtime.apply_options(options);
    }

    /// Normalize a raw fragment through the shared memo.
    #[cfg(feature = "cache")]
    pub fn normalize(&self, raw: &str) -> String {
        self.inner.normalize_cache.lock().normalize(raw)
    }

    /// Normalize a raw fragment.
    #[cfg(not(feature = "cache"))]
    pub fn normalize(&self, raw: &str) -> String {
        crate::normalize::normalize_page_id(raw)
    }

    #[cfg(feature = "cache")]
    pub fn normalize_cache_stats(&self) -> CacheStats {
        self.inner.normalize_cache.lock().stats().clone()
    }

    /// Navigate to `page_id` and push a history entry.
    pub async fn load(&self, page_id: &str) -> NavigationOutcome {
        self.load_page_content(page_id, true).await
    }

    /// Run one navigation.
    ///
    /// `page_id` may be any raw form the normalizer understands. Nothing
    /// escapes: failures end up in the content area as an error fragment and
    /// in the returned [`NavigationOutcome`].
    pub async fn load_page_content(
        &self,
        page_id: &str,
        should_update_history: bool,
    ) -> NavigationOutcome {
        let inner = &*self.inner;
        let load_start = inner.host.clock.now();
        let token = inner.state.begin();

        inner.runtime.show_overlay();
        inner.runtime.close_drawer();

        let Some(targets) = inner.runtime.targets() else {
            let reason = RouterError::ContentTargetMissing;
            error_log!("router" => "cannot load '{}': {}", page_id, reason);
            inner.runtime.hide_overlay();
            inner.state.settle(token);
            return NavigationOutcome::Aborted { reason };
        };
        let _settle = SettleGuard {
            inner,
            token,
            content: targets.content.clone(),
        };

        let id = self.normalize(page_id);
        let route = inner.registry.get_route(&id);
        debug_log!("router" => "navigating to '{}' (requested '{}')", id, page_id);

        if route.is_none() && id != HOME_ROUTE_ID && !inner.registry.is_empty() {
            return self.render_not_found(&id, &targets, token);
        }

        inner.state.advance(token, NavigationPhase::FadingOut);
        inner
            .host
            .animator
            .fade_out(targets.content.clone(), inner.config.transition)
            .await;
        if !inner.state.is_current(token) {
            return superseded(id);
        }
        targets
            .content
            .set_min_height(Some(targets.content.rendered_height()));

        inner.state.advance(token, NavigationPhase::Loading);
        let result = self.fetch(&id, route.as_deref(), &targets).await;
        if !inner.state.is_current(token) {
            return superseded(id);
        }

        inner.state.advance(token, NavigationPhase::Rendering);
        targets.content.set_html(&result.html);
        self.run_page_hooks(&id, &result, &targets);

        let title = self.resolve_title(&result, route.as_deref());
        self.publish_title(&id, &title, result.status, route.as_deref(), &targets);

        if should_update_history {
            self.push_history(&id, &title);
        }

        inner.host.document.scroll_to_top();
        self.update_active_nav_link(&id);

        inner.state.advance(token, NavigationPhase::AnimatingIn);
        inner
            .host
            .animator
            .fade_in(targets.content.clone(), inner.config.transition)
            .await;
        if !inner.state.is_current(token) {
            return superseded(id);
        }
        targets.content.set_min_height(None);

        let elapsed = inner.host.clock.now().saturating_sub(load_start);
        if let Some(remaining) = inner.config.min_loading_duration.checked_sub(elapsed) {
            if !remaining.is_zero() {
                inner.host.clock.sleep(remaining).await;
                if !inner.state.is_current(token) {
                    return superseded(id);
                }
            }
        }

        info_log!("router" => "loaded '{}' ({})", id, result.status);
        match result.status {
            LoadStatus::NotFound => NavigationOutcome::NotFound { id },
            status => NavigationOutcome::Loaded { id, status },
        }
    }

    /// Load whatever the history points at, without pushing.
    pub async fn start(&self) -> NavigationOutcome {
        let id = self
            .inner
            .host
            .history
            .current_id()
            .unwrap_or_else(|| HOME_ROUTE_ID.to_string());
        info_log!("router" => "starting at '{}'", id);
        self.load_page_content(&id, false).await
    }

    /// Re-render after the browser moved through history (`popstate`).
    pub async fn handle_pop_state(&self) -> NavigationOutcome {
        let id = self
            .inner
            .host
            .history
            .current_id()
            .unwrap_or_else(|| HOME_ROUTE_ID.to_string());
        self.load_page_content(&id, false).await
    }

    /// Step back in history and render that entry. `None` at the oldest entry.
    pub async fn back(&self) -> Option<NavigationOutcome> {
        let id = self.inner.host.history.back()?;
        Some(self.load_page_content(&id, false).await)
    }

    /// Step forward in history and render that entry. `None` at the newest entry.
    pub async fn forward(&self) -> Option<NavigationOutcome> {
        let id = self.inner.host.history.forward()?;
        Some(self.load_page_content(&id, false).await)
    }

    /// Run a navigation in the background on the host spawner.
    pub fn spawn_load(&self, page_id: String) {
        let router = self.clone();
        self.inner.host.spawner.spawn(Box::pin(async move {
            router.load_page_content(&page_id, true).await;
        }));
    }

    pub fn register_nav_link(&self, link: Arc<dyn NavLink>) {
        self.inner.nav.register(link);
    }

    /// Highlight the navigation links pointing at `page_id`.
    pub fn update_active_nav_link(&self, page_id: &str) -> usize {
        let id = self.normalize(page_id);
        self.inner.nav.update(&id)
    }

    pub fn link_interceptor(&self) -> LinkInterceptor {
        LinkInterceptor::new(self.clone())
    }

    fn render_not_found(
        &self,
        id: &str,
        targets: &ContentTargets,
        token: NavigationToken,
    ) -> NavigationOutcome {
        let inner = &*self.inner;
        warn_log!("router" => "no route registered for '{}'", id);

        inner.state.advance(token, NavigationPhase::Rendering);
        targets.content.set_html(&inner.config.not_found_html);

        let title = inner.config.not_found_title.clone();
        self.publish_title(id, &title, LoadStatus::NotFound, None, targets);

        NavigationOutcome::NotFound { id: id.to_string() }
    }

    async fn fetch(&self, id: &str, route: Option<&Route>, targets: &ContentTargets) -> LoadResult {
        let inner = &*self.inner;
        let ctx = LoadContext {
            registry: &inner.registry,
            fetcher: &*inner.host.fetcher,
            home_html: &targets.home_html,
            config: &inner.config,
        };

        match AssertUnwindSafe(fetch_page_markup(id, &ctx))
            .catch_unwind()
            .await
        {
            Ok(result) => result,
            Err(_) => {
                let reason = RouterError::LoaderPanicked { id: id.to_string() };
                error_log!("router" => "{}", reason);
                let title = route.map_or_else(
                    || inner.config.default_page_title.clone(),
                    |r| r.title.clone(),
                );
                LoadResult::error(title, reason)
            }
        }
    }

    /// Injected handlers win; the result's own ready hook runs only when
    /// none of them existed.
    fn run_page_hooks(&self, id: &str, result: &LoadResult, targets: &ContentTargets) {
        let inner = &*self.inner;

        if let Some(dialogs) = &inner.host.dialogs {
            let content = targets.content.as_ref();
            if catch_unwind(AssertUnwindSafe(|| dialogs.init(content))).is_err() {
                warn_log!("router" => "dialog enhancer failed for '{}'", id);
            }
        }

        if !inner.runtime.run_injected_handlers(id) {
            inner
                .runtime
                .invoke(result.on_ready.as_ref(), "page ready hook", id);
        }

        if let Some(animations) = &inner.host.page_animations {
            match catch_unwind(AssertUnwindSafe(|| animations.animate_page(id))) {
                Ok(task) => inner
                    .runtime
                    .spawn_logged(format!("page animations for '{}'", id), task),
                Err(_) => {
                    warn_log!("router" => "page animations failed to start for '{}'", id);
                }
            }
        }
    }

    /// First non-empty of: load result, route, fetched `<title>`, configured
    /// defaults.
    fn resolve_title(&self, result: &LoadResult, route: Option<&Route>) -> String {
        let config = &self.inner.config;
        [
            Some(result.title.as_str()),
            route.map(|r| r.title.as_str()),
            result.source_title.as_deref(),
            Some(config.default_page_title.as_str()),
            Some(config.fallback_title.as_str()),
        ]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|title| !title.is_empty())
        .unwrap_or_default()
        .to_string()
    }

    fn publish_title(
        &self,
        id: &str,
        title: &str,
        load_status: LoadStatus,
        route: Option<&Route>,
        targets: &ContentTargets,
    ) {
        let inner = &*self.inner;

        if let Some(metadata) = &inner.host.metadata {
            let update = MetadataUpdate {
                page_id: id.to_string(),
                page_title: title.to_string(),
                load_status,
            };
            if catch_unwind(AssertUnwindSafe(|| metadata.update_for_route(route, &update))).is_err()
            {
                warn_log!("router" => "metadata update failed for '{}'", id);
            }
        }

        inner
            .host
            .document
            .set_title(&inner.config.document_title(title));
        if let Some(headline) = &targets.headline {
            headline.set_text(title);
        }
    }

    /// Push unless the history already sits on `id`.
    fn push_history(&self, id: &str, title: &str) {
        let history = &self.inner.host.history;
        if history.current_id().as_deref() == Some(id) {
            debug_log!("router" => "'{}' is already the current history entry", id);
            return;
        }
        history.push_state(HistoryEntry::new(id, self.inner.config.document_title(title)));
    }
}

impl std::fmt::Debug for PageRouter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PageRouter")
            .field("registry", &self.inner.registry)
            .field("runtime", &self.inner.runtime)
            .field("phase", &self.inner.state.phase())
            .field("config", &self.inner.config)
            .finish_non_exhaustive()
    }
}

fn superseded(id: String) -> NavigationOutcome {
    debug_log!("router" => "navigation to '{}' superseded", id);
    NavigationOutcome::Superseded { id }
}

/// Settles the navigation owning `token` when the load future ends, however
/// it ends.
struct SettleGuard<'a> {
    inner: &'a RouterInner,
    token: NavigationToken,
    content: Arc<dyn ContentSurface>,
}

impl Drop for SettleGuard<'_> {
    fn drop(&mut self) {
        if !self.inner.state.is_current(self.token) {
            return;
        }
        self.content.set_min_height(None);
        self.inner.runtime.hide_overlay();
        self.inner.state.settle(self.token);
    }
}

// ============================================================================
// Initialization
// ============================================================================

/// Build a router with the default [`RouterConfig`], register its content
/// targets and apply `options`.
pub fn init_router(
    registry: Arc<RouteRegistry>,
    host: RouterHost,
    content: Arc<dyn ContentSurface>,
    headline: Option<Arc<dyn TextTarget>>,
    home_html: impl Into<String>,
    options: RouterOptions,
) -> PageRouter {
    let router = PageRouter::new(registry, host, RouterConfig::default());
    router.register_content_targets(content, headline, home_html);
    router.apply_options(options);
    debug_log!("router" => "initialized with {} routes", router.registry().len());
    router
}
