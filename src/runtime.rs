//! Runtime state shared by every navigation
//!
//! [`RouterRuntime`] holds what the host wires in at start-up: the content
//! targets and the chrome callbacks from [`RouterOptions`]. It also owns the
//! safe invoker every callback goes through, so a broken callback is logged
//! and never escapes into the navigation.

use crate::error::HookError;
use crate::host::{ContentSurface, Spawner, TextTarget};
use crate::lifecycle::{
    call_guarded, call_page_hook_guarded, noop_callback, Callback, HookOutput, HookReport,
    PageHook,
};
use crate::normalize::{normalize_page_id, HOME_ROUTE_ID};
use crate::{debug_log, error_log, warn_log};
use futures::FutureExt;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

// ============================================================================
// RouterOptions
// ============================================================================

/// Bootstrap options. Every field is optional; a missing callback stays
/// `None` here and becomes a no-op inside the runtime.
///
/// # Example
///
/// ```
/// use hash_navigator::{callback, hook_fn, RouterOptions};
///
/// let options = RouterOptions::new()
///     .show_overlay(callback(|| {}))
///     .page_handler("#/faq", hook_fn(|_| {}));
///
/// assert!(!options.is_empty());
/// assert!(RouterOptions::default().is_empty());
/// ```
#[derive(Clone, Default)]
pub struct RouterOptions {
    pub show_overlay: Option<Callback>,
    pub hide_overlay: Option<Callback>,
    pub close_drawer: Option<Callback>,
    /// Runs only when the normalized id is `home`
    pub on_home_load: Option<PageHook>,
    /// Per-page handlers; keys may be raw hashes or aliases
    pub page_handlers: HashMap<String, PageHook>,
}

impl RouterOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn show_overlay(mut self, callback: Callback) -> Self {
        self.show_overlay = Some(callback);
        self
    }

    pub fn hide_overlay(mut self, callback: Callback) -> Self {
        self.hide_overlay = Some(callback);
        self
    }

    pub fn close_drawer(mut self, callback: Callback) -> Self {
        self.close_drawer = Some(callback);
        self
    }

    pub fn on_home_load(mut self, hook: PageHook) -> Self {
        self.on_home_load = Some(hook);
        self
    }

    pub fn page_handler(mut self, page_id: impl Into<String>, hook: PageHook) -> Self {
        self.page_handlers.insert(page_id.into(), hook);
        self
    }

    /// Check if nothing was provided
    pub fn is_empty(&self) -> bool {
        self.show_overlay.is_none()
            && self.hide_overlay.is_none()
            && self.close_drawer.is_none()
            && self.on_home_load.is_none()
            && self.page_handlers.is_empty()
    }
}

impl std::fmt::Debug for RouterOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut handlers: Vec<&String> = self.page_handlers.keys().collect();
        handlers.sort();
        f.debug_struct("RouterOptions")
            .field("show_overlay", &self.show_overlay.is_some())
            .field("hide_overlay", &self.hide_overlay.is_some())
            .field("close_drawer", &self.close_drawer.is_some())
            .field("on_home_load", &self.on_home_load.is_some())
            .field("page_handlers", &handlers)
            .finish()
    }
}

// ============================================================================
// RouterRuntime
// ============================================================================

/// Elements the router renders into
#[derive(Clone)]
pub struct ContentTargets {
    pub content: Arc<dyn ContentSurface>,
    /// App-bar headline, when the layout has one
    pub headline: Option<Arc<dyn TextTarget>>,
    /// Landing page markup captured before the first navigation
    pub home_html: String,
}

struct Callbacks {
    show_overlay: Callback,
    hide_overlay: Callback,
    close_drawer: Callback,
    on_home_load: Option<PageHook>,
    page_handlers: HashMap<String, PageHook>,
}

impl Default for Callbacks {
    fn default() -> Self {
        Self {
            show_overlay: noop_callback(),
            hide_overlay: noop_callback(),
            close_drawer: noop_callback(),
            on_home_load: None,
            page_handlers: HashMap::new(),
        }
    }
}

/// Content targets plus chrome callbacks, read on every navigation.
///
/// Callbacks are cloned out of the lock before they run, so a callback may
/// call back into the runtime.
pub struct RouterRuntime {
    targets: RwLock<Option<ContentTargets>>,
    callbacks: RwLock<Callbacks>,
    spawner: Arc<dyn Spawner>,
}

impl RouterRuntime {
    pub fn new(spawner: Arc<dyn Spawner>) -> Self {
        Self {
            targets: RwLock::new(None),
            callbacks: RwLock::new(Callbacks::default()),
            spawner,
        }
    }

    /// Record the content area, the optional headline and the home snapshot.
    pub fn register_content_targets(
        &self,
        content: Arc<dyn ContentSurface>,
        headline: Option<Arc<dyn TextTarget>>,
        home_html: impl Into<String>,
    ) {
        *self.targets.write() = Some(ContentTargets {
            content,
            headline,
            home_html: home_html.into(),
        });
        debug_log!("runtime" => "content targets registered");
    }

    pub fn targets(&self) -> Option<ContentTargets> {
        self.targets.read().clone()
    }

    pub fn has_content_target(&self) -> bool {
        self.targets.read().is_some()
    }

    /// Install `options`, replacing every previously applied callback.
    ///
    /// Handler keys are normalized with [`normalize_page_id`], so
    /// `"#/faq"` and `"faq-api"` address the same page.
    pub fn apply_options(&self, options: RouterOptions) {
        let mut page_handlers = HashMap::with_capacity(options.page_handlers.len());
        for (raw, hook) in options.page_handlers {
            let id = normalize_page_id(raw.as_str());
            if page_handlers.insert(id.clone(), hook).is_some() {
                warn_log!("runtime" => "several page handlers normalize to '{}'; keeping the last", id);
            }
        }

        *self.callbacks.write() = Callbacks {
            show_overlay: options.show_overlay.unwrap_or_else(noop_callback),
            hide_overlay: options.hide_overlay.unwrap_or_else(noop_callback),
            close_drawer: options.close_drawer.unwrap_or_else(noop_callback),
            on_home_load: options.on_home_load,
            page_handlers,
        };
    }

    /// Normalized ids that have an injected handler, sorted
    pub fn page_handler_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.callbacks.read().page_handlers.keys().cloned().collect();
        ids.sort_unstable();
        ids
    }

    /// Run a page hook through the safe invoker.
    ///
    /// Failures are logged with `description` as prefix and returned in the
    /// report. A deferred future is handed to the spawner and not awaited.
    pub fn invoke(&self, hook: Option<&PageHook>, description: &str, page_id: &str) -> HookReport {
        let Some(hook) = hook else {
            return HookReport::missing();
        };

        let result = match call_page_hook_guarded(hook, description, page_id) {
            Ok(HookOutput::Done) => Ok(()),
            Ok(HookOutput::Deferred(task)) => {
                self.spawn_deferred(description, task);
                Ok(())
            }
            Err(err) => {
                error_log!("runtime" => "{}", err);
                Err(err)
            }
        };

        HookReport {
            existed: true,
            result,
        }
    }

    /// Run a chrome callback through the safe invoker.
    pub fn invoke_callback(&self, callback: &Callback, description: &str) -> HookReport {
        let result = call_guarded(callback, description);
        if let Err(err) = &result {
            error_log!("runtime" => "{}", err);
        }
        HookReport {
            existed: true,
            result,
        }
    }

    pub fn show_overlay(&self) -> HookReport {
        let callback = self.callbacks.read().show_overlay.clone();
        self.invoke_callback(&callback, "overlay show")
    }

    pub fn hide_overlay(&self) -> HookReport {
        let callback = self.callbacks.read().hide_overlay.clone();
        self.invoke_callback(&callback, "overlay hide")
    }

    pub fn close_drawer(&self) -> HookReport {
        let callback = self.callbacks.read().close_drawer.clone();
        self.invoke_callback(&callback, "drawer close")
    }

    /// Run `on_home_load` (for `home` only) and then the handler registered
    /// for `page_id`. Returns `true` when either existed, whether or not it
    /// succeeded.
    pub fn run_injected_handlers(&self, page_id: &str) -> bool {
        let (home_hook, page_hook) = {
            let callbacks = self.callbacks.read();
            let home_hook = if page_id == HOME_ROUTE_ID {
                callbacks.on_home_load.clone()
            } else {
                None
            };
            (home_hook, callbacks.page_handlers.get(page_id).cloned())
        };

        let home = self.invoke(home_hook.as_ref(), "home load handler", page_id);
        let page = self.invoke(
            page_hook.as_ref(),
            &format!("page handler for '{}'", page_id),
            page_id,
        );
        home.existed || page.existed
    }

    /// Spawn a detached task whose panic is logged instead of lost.
    pub(crate) fn spawn_logged(
        &self,
        description: String,
        task: futures::future::BoxFuture<'static, Result<(), HookError>>,
    ) {
        self.spawner.spawn(Box::pin(async move {
            match AssertUnwindSafe(task).catch_unwind().await {
                Ok(Ok(())) => {}
                Ok(Err(err)) => {
                    warn_log!("runtime" => "{}", err.within(&description));
                }
                Err(payload) => {
                    let err = HookError::from_panic(description, payload.as_ref());
                    warn_log!("runtime" => "{}", err);
                }
            }
        }));
    }

    fn spawn_deferred(&self, description: &str, task: futures::future::BoxFuture<'static, ()>) {
        debug_log!("runtime" => "{} deferred work to the background", description);
        self.spawn_logged(description.to_string(), Box::pin(task.map(Ok)));
    }
}

impl std::fmt::Debug for RouterRuntime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RouterRuntime")
            .field("has_content_target", &self.has_content_target())
            .field("page_handlers", &self.page_handler_ids())
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Tests
// ============================================================================
