//! Integration tests for hash-navigator
//!
//! These tests drive complete navigations against an in-memory host: a fake
//! content area, document, fetcher and animator, with tokio's paused clock
//! standing in for browser timers.

use futures::future::BoxFuture;
use hash_navigator::*;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

// ============================================================================
// In-memory host
// ============================================================================

#[derive(Default)]
struct FakeSurface {
    html_writes: Mutex<Vec<String>>,
    min_heights: Mutex<Vec<Option<f64>>>,
}

impl FakeSurface {
    fn html(&self) -> String {
        self.html_writes.lock().last().cloned().unwrap_or_default()
    }

    fn writes(&self) -> usize {
        self.html_writes.lock().len()
    }
}

impl ContentSurface for FakeSurface {
    fn set_html(&self, html: &str) {
        self.html_writes.lock().push(html.to_string());
    }

    fn rendered_height(&self) -> f64 {
        480.0
    }

    fn set_min_height(&self, height: Option<f64>) {
        self.min_heights.lock().push(height);
    }

    fn set_opacity(&self, _opacity: f32) {}
}

#[derive(Default)]
struct FakeDocument {
    titles: Mutex<Vec<String>>,
    scrolls: AtomicUsize,
}

impl FakeDocument {
    fn title(&self) -> Option<String> {
        self.titles.lock().last().cloned()
    }
}

impl Document for FakeDocument {
    fn set_title(&self, title: &str) {
        self.titles.lock().push(title.to_string());
    }

    fn scroll_to_top(&self) {
        self.scrolls.fetch_add(1, Ordering::SeqCst);
    }
}

#[derive(Default)]
struct FakeHeadline {
    text: Mutex<String>,
}

impl TextTarget for FakeHeadline {
    fn set_text(&self, text: &str) {
        *self.text.lock() = text.to_string();
    }
}

/// Clock over tokio's (pausable) time
struct TokioClock {
    origin: Instant,
}

impl Clock for TokioClock {
    fn now(&self) -> Duration {
        Instant::now() - self.origin
    }

    fn sleep(&self, duration: Duration) -> BoxFuture<'static, ()> {
        Box::pin(tokio::time::sleep(duration))
    }
}

struct TokioSpawner;

impl Spawner for TokioSpawner {
    fn spawn(&self, task: BoxFuture<'static, ()>) {
        tokio::spawn(task);
    }
}

#[derive(Default)]
struct FakeFetcher {
    pages: HashMap<String, String>,
    delays: HashMap<String, Duration>,
    calls: Mutex<Vec<String>>,
}

impl FakeFetcher {
    fn page(mut self, path: &str, body: &str) -> Self {
        self.pages.insert(path.to_string(), body.to_string());
        self
    }

    fn slow_page(mut self, path: &str, body: &str, delay: Duration) -> Self {
        self.delays.insert(path.to_string(), delay);
        self.page(path, body)
    }
}

impl MarkupFetcher for FakeFetcher {
    fn fetch(&self, path: &str) -> BoxFuture<'static, Result<String, FetchError>> {
        self.calls.lock().push(path.to_string());
        let delay = self.delays.get(path).copied().unwrap_or_default();
        let response = self.pages.get(path).cloned().ok_or_else(|| FetchError::Status {
            path: path.to_string(),
            code: 404,
        });
        Box::pin(async move {
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
            response
        })
    }
}

/// Records fades into the shared event log
struct RecordingAnimator {
    events: Arc<Mutex<Vec<String>>>,
}

impl ContentAnimator for RecordingAnimator {
    fn fade_out(
        &self,
        content: Arc<dyn ContentSurface>,
        _transition: Transition,
    ) -> BoxFuture<'static, ()> {
        self.events.lock().push("fade_out".to_string());
        content.set_opacity(0.0);
        Box::pin(async {})
    }

    fn fade_in(
        &self,
        content: Arc<dyn ContentSurface>,
        _transition: Transition,
    ) -> BoxFuture<'static, ()> {
        self.events.lock().push("fade_in".to_string());
        content.set_opacity(1.0);
        Box::pin(async {})
    }
}

#[derive(Default)]
struct RecordingMetadata {
    updates: Mutex<Vec<(Option<String>, MetadataUpdate)>>,
}

impl SiteMetadata for RecordingMetadata {
    fn update_for_route(&self, route: Option<&Route>, update: &MetadataUpdate) {
        self.updates
            .lock()
            .push((route.map(|r| r.id.clone()), update.clone()));
    }
}

struct FailingAnimations;

impl PageAnimations for FailingAnimations {
    fn animate_page(&self, page_id: &str) -> BoxFuture<'static, Result<(), HookError>> {
        let page_id = page_id.to_string();
        Box::pin(async move { Err(HookError::new("page animations", format!("no keyframes for {}", page_id))) })
    }
}

// ============================================================================
// Harness
// ============================================================================

const HOME_HTML: &str = "<section id=\"home\">Android Dev Tools</section>";
const FAQ_HTML: &str = "<section id=\"faq\">FAQ</section>";
const TOOLKIT_HTML: &str = "<section id=\"toolkit\">App Toolkit</section>";

struct Harness {
    router: PageRouter,
    surface: Arc<FakeSurface>,
    document: Arc<FakeDocument>,
    headline: Arc<FakeHeadline>,
    history: Arc<MemoryHistory>,
    metadata: Arc<RecordingMetadata>,
    fetcher: Arc<FakeFetcher>,
    /// Fades and chrome callbacks, in order
    events: Arc<Mutex<Vec<String>>>,
    /// When `hide_overlay` ran
    hides: Arc<Mutex<Vec<Instant>>>,
}

impl Harness {
    fn events(&self) -> Vec<String> {
        self.events.lock().clone()
    }

    fn count(&self, event: &str) -> usize {
        self.events.lock().iter().filter(|e| *e == event).count()
    }

    fn history_ids(&self) -> Vec<String> {
        self.history
            .entries()
            .into_iter()
            .map(|entry| entry.page_id)
            .collect()
    }
}

fn default_registry() -> RouteRegistry {
    let registry = RouteRegistry::new();
    registry.register_route(Route::new("faq-api", "FAQ").inline_html(FAQ_HTML));
    registry.register_route(Route::new("app-toolkit-api", "App Toolkit").inline_html(TOOLKIT_HTML));
    registry.register_route(Route::new("repo-mapper", "Repo Mapper").path("pages/repo-mapper.html"));
    registry
}

struct HarnessBuilder {
    registry: RouteRegistry,
    options: RouterOptions,
    fetcher: FakeFetcher,
    history: MemoryHistory,
    animations: Option<Arc<dyn PageAnimations>>,
    register_targets: bool,
}

impl HarnessBuilder {
    fn new() -> Self {
        Self {
            registry: default_registry(),
            options: RouterOptions::new(),
            fetcher: FakeFetcher::default().page(
                "pages/repo-mapper.html",
                "<html><head><title>Mapper</title></head><body><main>tree</main></body></html>",
            ),
            history: MemoryHistory::default(),
            animations: None,
            register_targets: true,
        }
    }

    fn registry(mut self, registry: RouteRegistry) -> Self {
        self.registry = registry;
        self
    }

    fn options(mut self, options: RouterOptions) -> Self {
        self.options = options;
        self
    }

    fn fetcher(mut self, fetcher: FakeFetcher) -> Self {
        self.fetcher = fetcher;
        self
    }

    fn history(mut self, history: MemoryHistory) -> Self {
        self.history = history;
        self
    }

    fn animations(mut self, animations: Arc<dyn PageAnimations>) -> Self {
        self.animations = Some(animations);
        self
    }

    fn without_targets(mut self) -> Self {
        self.register_targets = false;
        self
    }

    fn build(self) -> Harness {
        let _ = env_logger::builder().is_test(true).try_init();

        let events = Arc::new(Mutex::new(Vec::new()));
        let hides = Arc::new(Mutex::new(Vec::new()));
        let surface = Arc::new(FakeSurface::default());
        let document = Arc::new(FakeDocument::default());
        let headline = Arc::new(FakeHeadline::default());
        let history = Arc::new(self.history);
        let metadata = Arc::new(RecordingMetadata::default());
        let fetcher = Arc::new(self.fetcher);

        let mut host = RouterHost::new(
            document.clone(),
            Arc::new(TokioClock {
                origin: Instant::now(),
            }),
            Arc::new(TokioSpawner),
            fetcher.clone(),
        )
        .animator(Arc::new(RecordingAnimator {
            events: events.clone(),
        }))
        .history(history.clone())
        .metadata(metadata.clone());
        if let Some(animations) = self.animations {
            host = host.page_animations(animations);
        }

        let show_log = events.clone();
        let hide_log = events.clone();
        let hide_times = hides.clone();
        let drawer_log = events.clone();
        let options = self
            .options
            .show_overlay(callback(move || show_log.lock().push("show_overlay".to_string())))
            .hide_overlay(callback(move || {
                hide_log.lock().push("hide_overlay".to_string());
                hide_times.lock().push(Instant::now());
            }))
            .close_drawer(callback(move || drawer_log.lock().push("close_drawer".to_string())));

        let registry = Arc::new(self.registry);
        let router = if self.register_targets {
            init_router(
                registry,
                host,
                surface.clone(),
                Some(headline.clone() as Arc<dyn TextTarget>),
                HOME_HTML,
                options,
            )
        } else {
            let router = PageRouter::new(registry, host, RouterConfig::default());
            router.apply_options(options);
            router
        };

        Harness {
            router,
            surface,
            document,
            headline,
            history,
            metadata,
            fetcher,
            events,
            hides,
        }
    }
}

fn recorder(log: &Arc<Mutex<Vec<String>>>, label: &'static str) -> PageHook {
    let log = log.clone();
    hook_fn(move |id| log.lock().push(format!("{}:{}", label, id)))
}

// ============================================================================
// Navigation Tests
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_inline_page_load_updates_chrome() {
    let h = HarnessBuilder::new().build();

    let outcome = h.router.load("#/faq").await;

    assert_eq!(
        outcome,
        NavigationOutcome::Loaded {
            id: "faq-api".to_string(),
            status: LoadStatus::Success,
        }
    );
    assert_eq!(h.surface.html(), FAQ_HTML);
    assert_eq!(h.document.title().as_deref(), Some("FAQ"));
    assert_eq!(*h.headline.text.lock(), "FAQ");
    assert_eq!(h.history_ids(), vec!["faq-api"]);
    assert_eq!(h.document.scrolls.load(Ordering::SeqCst), 1);
    assert_eq!(
        h.events(),
        vec!["show_overlay", "close_drawer", "fade_out", "fade_in", "hide_overlay"]
    );
    assert_eq!(*h.surface.min_heights.lock().first().unwrap(), Some(480.0));
    assert_eq!(*h.surface.min_heights.lock().last().unwrap(), None);

    let updates = h.metadata.updates.lock();
    assert_eq!(updates.len(), 1);
    assert_eq!(updates[0].0.as_deref(), Some("faq-api"));
    assert_eq!(updates[0].1.load_status, LoadStatus::Success);
}

#[tokio::test(start_paused = true)]
async fn test_navigation_walks_every_phase() {
    let h = HarnessBuilder::new().build();

    h.router.load("faq-api").await;

    assert_eq!(h.router.phase(), NavigationPhase::Settled);
    assert_eq!(
        h.router.state().visited(),
        vec![
            NavigationPhase::FadingOut,
            NavigationPhase::Loading,
            NavigationPhase::Rendering,
            NavigationPhase::AnimatingIn,
            NavigationPhase::Settled,
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn test_remote_page_uses_fetched_body() {
    let h = HarnessBuilder::new().build();

    let outcome = h.router.load("/layout/RepoMapper.html").await;

    assert!(outcome.is_success());
    assert_eq!(outcome.page_id(), Some("repo-mapper"));
    assert_eq!(h.surface.html(), "<main>tree</main>");
    assert_eq!(h.document.title().as_deref(), Some("Repo Mapper"));
    assert_eq!(*h.fetcher.calls.lock(), vec!["pages/repo-mapper.html".to_string()]);
}

#[tokio::test(start_paused = true)]
async fn test_home_uses_initial_markup() {
    let h = HarnessBuilder::new().build();

    let outcome = h.router.load("#").await;

    assert!(outcome.is_success());
    assert_eq!(outcome.page_id(), Some("home"));
    assert_eq!(h.surface.html(), HOME_HTML);
    assert!(h.fetcher.calls.lock().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_not_found_short_circuits() {
    let h = HarnessBuilder::new().build();

    let outcome = h.router.load("#missing").await;

    assert_eq!(
        outcome,
        NavigationOutcome::NotFound {
            id: "missing".to_string()
        }
    );
    assert_eq!(h.count("fade_out"), 0);
    assert_eq!(h.count("fade_in"), 0);
    assert_eq!(h.count("hide_overlay"), 1);
    assert!(h.surface.html().contains("Page Not Found"));
    assert_eq!(h.document.title().as_deref(), Some("Page Not Found"));
    assert!(h.history.is_empty());

    let updates = h.metadata.updates.lock();
    assert_eq!(updates.len(), 1);
    assert_eq!(updates[0].0, None);
    assert_eq!(updates[0].1.load_status, LoadStatus::NotFound);
    assert_eq!(updates[0].1.page_id, "missing");
}

#[tokio::test(start_paused = true)]
async fn test_fetch_failure_renders_error_fragment() {
    let h = HarnessBuilder::new().fetcher(FakeFetcher::default()).build();

    let outcome = h.router.load("repo-mapper").await;

    assert_eq!(
        outcome,
        NavigationOutcome::Loaded {
            id: "repo-mapper".to_string(),
            status: LoadStatus::Error,
        }
    );
    assert!(h.surface.html().contains("page-load-error"));
    assert!(h.surface.html().contains("HTTP 404"));
    assert_eq!(h.count("hide_overlay"), 1);
    assert_eq!(h.document.title().as_deref(), Some("Repo Mapper"));
    assert_eq!(
        h.metadata.updates.lock()[0].1.load_status,
        LoadStatus::Error
    );
}

#[tokio::test(start_paused = true)]
async fn test_handlers_and_animations_run_after_error_mount() {
    struct CountingAnimations {
        started: Arc<Mutex<Vec<String>>>,
    }

    impl PageAnimations for CountingAnimations {
        fn animate_page(&self, page_id: &str) -> BoxFuture<'static, Result<(), HookError>> {
            self.started.lock().push(page_id.to_string());
            Box::pin(async { Ok(()) })
        }
    }

    let log = Arc::new(Mutex::new(Vec::new()));
    let started = Arc::new(Mutex::new(Vec::new()));
    let h = HarnessBuilder::new()
        .fetcher(FakeFetcher::default())
        .options(RouterOptions::new().page_handler("repo-mapper", recorder(&log, "handler")))
        .animations(Arc::new(CountingAnimations {
            started: started.clone(),
        }))
        .build();

    let outcome = h.router.load("repo-mapper").await;

    assert_eq!(
        outcome,
        NavigationOutcome::Loaded {
            id: "repo-mapper".to_string(),
            status: LoadStatus::Error,
        }
    );
    assert!(h.surface.html().contains("page-load-error"));
    assert_eq!(*log.lock(), vec!["handler:repo-mapper"]);
    assert_eq!(*started.lock(), vec!["repo-mapper"]);
}

#[tokio::test(start_paused = true)]
async fn test_missing_content_target_aborts() {
    let h = HarnessBuilder::new().without_targets().build();

    let outcome = h.router.load("faq-api").await;

    assert_eq!(
        outcome,
        NavigationOutcome::Aborted {
            reason: RouterError::ContentTargetMissing
        }
    );
    assert_eq!(h.events(), vec!["show_overlay", "close_drawer", "hide_overlay"]);
    assert_eq!(h.surface.writes(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_panicking_chrome_callback_does_not_break_navigation() {
    let h = HarnessBuilder::new().build();
    h.router.apply_options(
        RouterOptions::new().close_drawer(callback(|| panic!("drawer element missing"))),
    );

    let outcome = h.router.load("faq-api").await;

    assert!(outcome.is_success());
    assert_eq!(h.surface.html(), FAQ_HTML);
}

// ============================================================================
// History Tests
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_repeat_load_does_not_stack_history() {
    let h = HarnessBuilder::new().build();

    h.router.load("#home").await;
    h.router.load("#home").await;

    assert_eq!(h.history_ids(), vec!["home"]);
}

#[tokio::test(start_paused = true)]
async fn test_load_without_history_update() {
    let h = HarnessBuilder::new().build();

    h.router.load_page_content("faq-api", false).await;

    assert!(h.history.is_empty());
    assert_eq!(h.surface.html(), FAQ_HTML);
}

#[tokio::test(start_paused = true)]
async fn test_start_renders_current_entry_without_pushing() {
    let h = HarnessBuilder::new()
        .history(MemoryHistory::with_initial("app-toolkit-api"))
        .build();

    let outcome = h.router.start().await;

    assert_eq!(outcome.page_id(), Some("app-toolkit-api"));
    assert_eq!(h.surface.html(), TOOLKIT_HTML);
    assert_eq!(h.history.len(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_back_and_forward_rerender() {
    let h = HarnessBuilder::new().build();
    h.router.load("home").await;
    h.router.load("faq-api").await;
    h.router.load("app-toolkit-api").await;

    let outcome = h.router.back().await.unwrap();
    assert_eq!(outcome.page_id(), Some("faq-api"));
    assert_eq!(h.surface.html(), FAQ_HTML);

    let outcome = h.router.forward().await.unwrap();
    assert_eq!(outcome.page_id(), Some("app-toolkit-api"));
    assert!(h.router.forward().await.is_none());

    assert_eq!(h.history_ids(), vec!["home", "faq-api", "app-toolkit-api"]);
}

#[tokio::test(start_paused = true)]
async fn test_pop_state_renders_history_location() {
    let h = HarnessBuilder::new().build();
    h.router.load("faq-api").await;
    h.history.push_state(HistoryEntry::new("app-toolkit-api", "App Toolkit"));

    let outcome = h.router.handle_pop_state().await;

    assert_eq!(outcome.page_id(), Some("app-toolkit-api"));
    assert_eq!(h.surface.html(), TOOLKIT_HTML);
    assert_eq!(h.history.len(), 2);
}

// ============================================================================
// Hook Tests
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_injected_handler_wins_over_route_hook() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let registry = RouteRegistry::new();
    registry.register_route(
        Route::new("faq-api", "FAQ")
            .inline_html(FAQ_HTML)
            .on_load(recorder(&log, "route")),
    );
    registry.register_route(
        Route::new("git-patch", "Git Patch")
            .inline_html("<p>patch</p>")
            .on_load(recorder(&log, "route")),
    );
    let h = HarnessBuilder::new()
        .registry(registry)
        .options(RouterOptions::new().page_handler("#/faq", recorder(&log, "handler")))
        .build();

    h.router.load("faq-api").await;
    assert_eq!(*log.lock(), vec!["handler:faq-api"]);

    log.lock().clear();
    h.router.load("git-patch").await;
    assert_eq!(*log.lock(), vec!["route:git-patch"]);
}

#[tokio::test(start_paused = true)]
async fn test_home_load_handler_runs_for_home_only() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let h = HarnessBuilder::new()
        .options(RouterOptions::new().on_home_load(recorder(&log, "home")))
        .build();

    h.router.load("index.html").await;
    h.router.load("faq-api").await;

    assert_eq!(*log.lock(), vec!["home:home"]);
}

#[tokio::test(start_paused = true)]
async fn test_never_resolving_hook_does_not_block() {
    let h = HarnessBuilder::new()
        .options(
            RouterOptions::new()
                .page_handler("faq-api", async_hook_fn(|_| std::future::pending::<()>())),
        )
        .build();

    let outcome = h.router.load("faq-api").await;

    assert!(outcome.is_success());
    assert_eq!(h.count("fade_in"), 1);
    assert_eq!(h.count("hide_overlay"), 1);
}

#[tokio::test(start_paused = true)]
async fn test_failing_handler_is_contained() {
    let h = HarnessBuilder::new()
        .options(RouterOptions::new().page_handler(
            "faq-api",
            try_hook_fn(|_| Err(HookError::new("", "widget failed to mount"))),
        ))
        .animations(Arc::new(FailingAnimations))
        .build();

    let outcome = h.router.load("faq-api").await;
    tokio::time::sleep(Duration::from_millis(10)).await;

    assert!(outcome.is_success());
    assert_eq!(h.count("hide_overlay"), 1);
}

// ============================================================================
// Timing Tests
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_overlay_stays_for_minimum_duration() {
    let h = HarnessBuilder::new().build();
    let start = Instant::now();

    h.router.load("faq-api").await;

    let hides = h.hides.lock();
    assert_eq!(hides.len(), 1);
    assert!(hides[0] - start >= Duration::from_millis(600));
}

#[tokio::test(start_paused = true)]
async fn test_slow_load_is_not_padded() {
    let fetcher = FakeFetcher::default().slow_page(
        "pages/repo-mapper.html",
        "<main>tree</main>",
        Duration::from_millis(900),
    );
    let h = HarnessBuilder::new().fetcher(fetcher).build();
    let start = Instant::now();

    h.router.load("repo-mapper").await;

    let elapsed = h.hides.lock()[0] - start;
    assert!(elapsed >= Duration::from_millis(900));
    assert!(elapsed < Duration::from_millis(1500));
}

#[tokio::test(start_paused = true)]
async fn test_newer_navigation_supersedes_older() {
    let fetcher = FakeFetcher::default().slow_page(
        "pages/repo-mapper.html",
        "<main>tree</main>",
        Duration::from_millis(300),
    );
    let h = HarnessBuilder::new().fetcher(fetcher).build();

    let (slow, fast) = tokio::join!(h.router.load("repo-mapper"), h.router.load("faq-api"));

    assert_eq!(
        slow,
        NavigationOutcome::Superseded {
            id: "repo-mapper".to_string()
        }
    );
    assert!(fast.is_success());
    assert_eq!(h.surface.html(), FAQ_HTML);
    assert_eq!(h.surface.writes(), 1);
    assert_eq!(h.count("hide_overlay"), 1);
    assert_eq!(h.history_ids(), vec!["faq-api"]);
}

// ============================================================================
// Link Tests
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_click_interception_scenarios() {
    let h = HarnessBuilder::new().build();
    let interceptor = h.router.link_interceptor();

    // Span inside a registered in-page link
    let mut click = ClickEvent::new(vec![
        ClickNode::new("span"),
        ClickNode::anchor("#app-toolkit-api"),
    ]);
    let decision = interceptor.handle_click(&mut click);
    assert_eq!(decision, LinkDecision::Navigate("app-toolkit-api".to_string()));
    assert!(click.is_default_prevented());

    tokio::time::sleep(Duration::from_secs(1)).await;
    assert_eq!(h.surface.writes(), 1);
    assert_eq!(h.surface.html(), TOOLKIT_HTML);
    assert_eq!(h.history_ids(), vec!["app-toolkit-api"]);

    // Unregistered id
    let mut click = ClickEvent::new(vec![ClickNode::anchor("#missing")]);
    let decision = interceptor.handle_click(&mut click);
    assert_eq!(
        decision,
        LinkDecision::PassThrough(PassReason::UnknownRoute("missing".to_string()))
    );
    assert!(!click.is_default_prevented());

    // New tab
    let mut click = ClickEvent::new(vec![ClickNode::anchor("#home").target("_blank")]);
    let decision = interceptor.handle_click(&mut click);
    assert_eq!(decision, LinkDecision::PassThrough(PassReason::NewContext));

    tokio::time::sleep(Duration::from_secs(1)).await;
    assert_eq!(h.surface.writes(), 1);
    assert_eq!(h.count("show_overlay"), 1);
}

#[tokio::test(start_paused = true)]
async fn test_list_item_click_navigates() {
    let h = HarnessBuilder::new().build();
    let interceptor = h.router.link_interceptor();

    let mut click = ClickEvent::new(vec![
        ClickNode::new("span"),
        ClickNode::list_item("#faq-api"),
        ClickNode::new("md-list"),
    ]);
    let decision = interceptor.handle_click(&mut click);
    assert_eq!(decision, LinkDecision::Navigate("faq-api".to_string()));
    assert!(click.is_default_prevented());

    tokio::time::sleep(Duration::from_secs(1)).await;
    assert_eq!(h.surface.html(), FAQ_HTML);
    assert_eq!(h.history_ids(), vec!["faq-api"]);
}

#[tokio::test(start_paused = true)]
async fn test_active_nav_follows_navigation() {
    struct Link {
        href: &'static str,
        active: Mutex<bool>,
    }

    impl NavLink for Link {
        fn href(&self) -> Option<String> {
            Some(self.href.to_string())
        }

        fn set_active(&self, active: bool) {
            *self.active.lock() = active;
        }
    }

    let h = HarnessBuilder::new().build();
    let faq = Arc::new(Link {
        href: "#faq",
        active: Mutex::new(false),
    });
    let toolkit = Arc::new(Link {
        href: "#app-toolkit",
        active: Mutex::new(false),
    });
    h.router.register_nav_link(faq.clone());
    h.router.register_nav_link(toolkit.clone());

    h.router.load("faq-api").await;
    assert!(*faq.active.lock());
    assert!(!*toolkit.active.lock());

    h.router.load("#/app-toolkit-api").await;
    assert!(!*faq.active.lock());
    assert!(*toolkit.active.lock());
}

// ============================================================================
// Options Tests
// ============================================================================

#[test]
fn test_empty_options_stay_empty() {
    let options = RouterOptions::default();
    assert!(options.is_empty());
    assert!(options.show_overlay.is_none());
    assert!(options.page_handlers.is_empty());

    let options = RouterOptions::new().on_home_load(hook_fn(|_| {}));
    assert!(!options.is_empty());
}

#[cfg(feature = "cache")]
#[tokio::test(start_paused = true)]
async fn test_repeated_fragments_hit_normalize_cache() {
    let h = HarnessBuilder::new().build();

    h.router.load("#/faq").await;
    h.router.load("#/faq").await;

    let stats = h.router.normalize_cache_stats();
    assert!(stats.hits >= 1);
}
