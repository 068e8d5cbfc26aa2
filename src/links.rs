//! Link click interception and active navigation styling
//!
//! The host installs one delegated click listener on the document and hands
//! each click to [`LinkInterceptor::handle_click`] as a [`ClickEvent`]. The
//! event carries the composed path from the click target up to the root, so
//! a click on a `<span>` inside an anchor resolves to that anchor.

use crate::context::PageRouter;
use crate::normalize::normalize_page_id;
use crate::route::RouteRegistry;
use crate::{debug_log, trace_log};
use parking_lot::RwLock;
use std::sync::Arc;

// ============================================================================
// Click events
// ============================================================================

/// Elements that navigate when they carry an `href`
const LINK_TAGS: &[&str] = &["a", "md-list-item"];

/// One element on the event path
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClickNode {
    /// Tag name, any case
    pub tag: String,
    /// Raw `href` attribute
    pub href: Option<String>,
    /// Raw `target` attribute
    pub target: Option<String>,
}

impl ClickNode {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Self::default()
        }
    }

    /// `<a href="...">`
    pub fn anchor(href: impl Into<String>) -> Self {
        Self::new("a").href(href)
    }

    pub fn href(mut self, href: impl Into<String>) -> Self {
        self.href = Some(href.into());
        self
    }

    pub fn target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }

    /// `<md-list-item href="...">`
    pub fn list_item(href: impl Into<String>) -> Self {
        Self::new("md-list-item").href(href)
    }

    /// Check if this node is a link-like element carrying an `href`
    pub fn is_link(&self) -> bool {
        self.href.is_some()
            && LINK_TAGS
                .iter()
                .any(|tag| self.tag.eq_ignore_ascii_case(tag))
    }

    fn opens_new_context(&self) -> bool {
        self.target
            .as_deref()
            .is_some_and(|target| target.trim().eq_ignore_ascii_case("_blank"))
    }
}

/// Mouse button that produced the click
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MouseButton {
    #[default]
    Primary,
    Auxiliary,
    Secondary,
}

/// A click as seen by the delegated listener
#[derive(Debug, Clone, Default)]
pub struct ClickEvent {
    /// Click target first, then its ancestors
    pub path: Vec<ClickNode>,
    pub button: MouseButton,
    pub ctrl_key: bool,
    pub meta_key: bool,
    pub shift_key: bool,
    pub alt_key: bool,
    default_prevented: bool,
}

impl ClickEvent {
    pub fn new(path: Vec<ClickNode>) -> Self {
        Self {
            path,
            ..Self::default()
        }
    }

    pub fn button(mut self, button: MouseButton) -> Self {
        self.button = button;
        self
    }

    pub fn ctrl(mut self) -> Self {
        self.ctrl_key = true;
        self
    }

    pub fn meta(mut self) -> Self {
        self.meta_key = true;
        self
    }

    pub fn shift(mut self) -> Self {
        self.shift_key = true;
        self
    }

    pub fn alt(mut self) -> Self {
        self.alt_key = true;
        self
    }

    /// Check if any modifier key was held
    pub fn has_modifier(&self) -> bool {
        self.ctrl_key || self.meta_key || self.shift_key || self.alt_key
    }

    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented
    }

    /// Nearest link-like element on the path
    pub fn closest_link(&self) -> Option<&ClickNode> {
        self.path.iter().find(|node| node.is_link())
    }
}

// ============================================================================
// Decision
// ============================================================================

/// Answers whether an id is registered.
pub trait RouteLookup {
    fn has_route(&self, id: &str) -> bool;
}

impl RouteLookup for RouteRegistry {
    fn has_route(&self, id: &str) -> bool {
        RouteRegistry::has_route(self, id)
    }
}

/// Why a click was left to the browser
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PassReason {
    AlreadyHandled,
    NotPrimaryButton,
    ModifierKey,
    NoLink,
    /// The href does not point into this page
    ExternalHref,
    /// The link opens a new tab or window
    NewContext,
    /// The normalized id is not registered
    UnknownRoute(String),
}

/// What to do with a click
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkDecision {
    /// Prevent the default action and load this normalized id
    Navigate(String),
    PassThrough(PassReason),
}

impl LinkDecision {
    pub fn is_navigate(&self) -> bool {
        matches!(self, LinkDecision::Navigate(_))
    }
}

/// Decide whether the router should take over a click.
///
/// Route lookup happens last, so clicks that leave the page in any other way
/// never query `routes`.
///
/// # Example
///
/// ```
/// use hash_navigator::{resolve_link_click, ClickEvent, ClickNode, LinkDecision, Route, RouteRegistry};
///
/// let registry = RouteRegistry::new();
/// registry.register_route(Route::new("app-toolkit-api", "App Toolkit"));
///
/// let click = ClickEvent::new(vec![ClickNode::new("span"), ClickNode::anchor("#app-toolkit-api")]);
/// assert_eq!(
///     resolve_link_click(&click, &registry),
///     LinkDecision::Navigate("app-toolkit-api".to_string())
/// );
/// ```
pub fn resolve_link_click(event: &ClickEvent, routes: &dyn RouteLookup) -> LinkDecision {
    use LinkDecision::PassThrough;

    if event.is_default_prevented() {
        return PassThrough(PassReason::AlreadyHandled);
    }
    if event.button != MouseButton::Primary {
        return PassThrough(PassReason::NotPrimaryButton);
    }
    if event.has_modifier() {
        return PassThrough(PassReason::ModifierKey);
    }

    let Some(link) = event.closest_link() else {
        return PassThrough(PassReason::NoLink);
    };
    let href = link.href.as_deref().unwrap_or_default().trim();
    if !href.starts_with('#') {
        return PassThrough(PassReason::ExternalHref);
    }
    if link.opens_new_context() {
        return PassThrough(PassReason::NewContext);
    }

    let id = normalize_page_id(href);
    if routes.has_route(&id) {
        LinkDecision::Navigate(id)
    } else {
        trace_log!("links" => "'{}' is not a registered route", id);
        PassThrough(PassReason::UnknownRoute(id))
    }
}

/// Delegated click handler bound to a router.
#[derive(Clone)]
pub struct LinkInterceptor {
    router: PageRouter,
}

impl LinkInterceptor {
    pub fn new(router: PageRouter) -> Self {
        Self { router }
    }

    /// Handle one click. When the router takes over, the default action is
    /// prevented and the navigation is spawned on the host spawner.
    pub fn handle_click(&self, event: &mut ClickEvent) -> LinkDecision {
        let decision = resolve_link_click(event, &**self.router.registry());
        if let LinkDecision::Navigate(id) = &decision {
            event.prevent_default();
            debug_log!("links" => "intercepted click to '{}'", id);
            self.router.spawn_load(id.clone());
        }
        decision
    }
}

impl std::fmt::Debug for LinkInterceptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LinkInterceptor").finish_non_exhaustive()
    }
}

// ============================================================================
// Active navigation
// ============================================================================

/// A navigation link that can be highlighted.
pub trait NavLink: Send + Sync {
    /// Raw `href` attribute
    fn href(&self) -> Option<String>;

    fn set_active(&self, active: bool);
}

/// Registered navigation links
#[derive(Default)]
pub struct ActiveNav {
    links: RwLock<Vec<Arc<dyn NavLink>>>,
}

impl ActiveNav {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, link: Arc<dyn NavLink>) {
        self.links.write().push(link);
    }

    /// Mark every link whose normalized href equals `active_id` as active and
    /// every other link as inactive. Returns the number of active links.
    pub fn update(&self, active_id: &str) -> usize {
        let links = self.links.read().clone();
        let mut active = 0;
        for link in links {
            let is_active = link
                .href()
                .is_some_and(|href| normalize_page_id(href.as_str()) == active_id);
            link.set_active(is_active);
            if is_active {
                active += 1;
            }
        }
        active
    }

    pub fn len(&self) -> usize {
        self.links.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.read().is_empty()
    }
}

impl std::fmt::Debug for ActiveNav {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActiveNav").field("links", &self.len()).finish()
    }
}
