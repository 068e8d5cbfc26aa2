//! Page lifecycle hooks
//!
//! Two kinds of callbacks flow through the router:
//!
//! - [`Callback`]: zero-argument chrome callbacks (overlay show/hide, drawer close).
//! - [`PageHook`]: per-page callbacks receiving the normalized page id, used
//!   for route `on_load` hooks, injected page handlers and `on_home_load`.
//!
//! A page hook may hand back a future through [`HookOutput::Deferred`]. The
//! router passes that future to the host spawner and never awaits it, so a
//! slow hook cannot hold up the fade-in.

use crate::error::HookError;
use futures::future::BoxFuture;
use std::future::Future;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

/// What a page hook produced
pub enum HookOutput {
    /// All work finished synchronously
    Done,
    /// Work continues in the background; spawned, never awaited
    Deferred(BoxFuture<'static, ()>),
}

impl HookOutput {
    /// Check if the hook left background work behind
    pub fn is_deferred(&self) -> bool {
        matches!(self, HookOutput::Deferred(_))
    }
}

impl std::fmt::Debug for HookOutput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Done => write!(f, "HookOutput::Done"),
            Self::Deferred(_) => write!(f, "HookOutput::Deferred(..)"),
        }
    }
}

impl From<()> for HookOutput {
    fn from((): ()) -> Self {
        HookOutput::Done
    }
}

/// Zero-argument chrome callback
pub type Callback = Arc<dyn Fn() + Send + Sync>;

/// Per-page callback receiving the normalized page id
pub type PageHook = Arc<dyn Fn(&str) -> Result<HookOutput, HookError> + Send + Sync>;

/// Wrap an infallible closure as a [`Callback`].
pub fn callback<F>(f: F) -> Callback
where
    F: Fn() + Send + Sync + 'static,
{
    Arc::new(f)
}

/// Callback that does nothing. Stands in for every chrome callback the host
/// did not provide.
pub fn noop_callback() -> Callback {
    Arc::new(|| {})
}

/// Wrap a synchronous closure as a [`PageHook`].
///
/// # Example
///
/// ```
/// use hash_navigator::hook_fn;
///
/// let hook = hook_fn(|page_id| println!("mounted {}", page_id));
/// assert!(hook("faq-api").is_ok());
/// ```
pub fn hook_fn<F>(f: F) -> PageHook
where
    F: Fn(&str) + Send + Sync + 'static,
{
    Arc::new(move |page_id: &str| {
        f(page_id);
        Ok(HookOutput::Done)
    })
}

/// Wrap a fallible closure as a [`PageHook`].
pub fn try_hook_fn<F>(f: F) -> PageHook
where
    F: Fn(&str) -> Result<(), HookError> + Send + Sync + 'static,
{
    Arc::new(move |page_id: &str| f(page_id).map(|()| HookOutput::Done))
}

/// Wrap an async closure as a [`PageHook`] whose future runs detached.
///
/// # Example
///
/// ```
/// use hash_navigator::async_hook_fn;
///
/// let hook = async_hook_fn(|page_id| {
///     let page_id = page_id.to_string();
///     async move {
///         let _ = page_id;
///     }
/// });
/// assert!(hook("home").unwrap().is_deferred());
/// ```
pub fn async_hook_fn<F, Fut>(f: F) -> PageHook
where
    F: Fn(&str) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = ()> + Send + 'static,
{
    Arc::new(move |page_id: &str| Ok(HookOutput::Deferred(Box::pin(f(page_id)))))
}

/// Outcome of invoking an optional callback
///
/// `existed` reports whether there was a callback to run at all, regardless
/// of whether it succeeded. `result` carries the captured failure.
#[derive(Debug)]
pub struct HookReport {
    pub existed: bool,
    pub result: Result<(), HookError>,
}

impl HookReport {
    pub(crate) fn missing() -> Self {
        Self {
            existed: false,
            result: Ok(()),
        }
    }

    /// Check if a callback ran and did not fail
    pub fn succeeded(&self) -> bool {
        self.existed && self.result.is_ok()
    }

    /// The captured failure, if any
    pub fn error(&self) -> Option<&HookError> {
        self.result.as_ref().err()
    }
}

/// Run a chrome callback, converting a panic into a [`HookError`].
pub(crate) fn call_guarded(callback: &Callback, description: &str) -> Result<(), HookError> {
    catch_unwind(AssertUnwindSafe(|| callback()))
        .map_err(|payload| HookError::from_panic(description, payload.as_ref()))
}

/// Run a page hook, converting both panics and returned errors into a
/// [`HookError`] labelled with `description`.
pub(crate) fn call_page_hook_guarded(
    hook: &PageHook,
    description: &str,
    page_id: &str,
) -> Result<HookOutput, HookError> {
    match catch_unwind(AssertUnwindSafe(|| hook(page_id))) {
        Ok(result) => result.map_err(|err| err.within(description)),
        Err(payload) => Err(HookError::from_panic(description, payload.as_ref())),
    }
}
