//! Page markup loading
//!
//! [`fetch_page_markup`] resolves the markup for a normalized page id into a
//! [`LoadResult`]. It never fails: fetch errors, missing routes and routes
//! without a content source are all encoded in [`LoadResult::status`], so the
//! orchestrator can always finish its transition.

use crate::config::RouterConfig;
use crate::error::{FetchError, RouterError};
use crate::lifecycle::PageHook;
use crate::normalize::HOME_ROUTE_ID;
use crate::route::{Route, RouteRegistry};
use crate::{debug_log, error_log};
use futures::future::BoxFuture;
use scraper::{ElementRef, Html, Selector};
use std::borrow::Cow;
use std::fmt;

/// Retrieves remote page markup (`fetch(path)` in a browser).
///
/// Non-OK responses must be reported as [`FetchError::Status`].
pub trait MarkupFetcher: Send + Sync {
    fn fetch(&self, path: &str) -> BoxFuture<'static, Result<String, FetchError>>;
}

/// Outcome category of a load
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LoadStatus {
    Success,
    Error,
    NotFound,
}

impl LoadStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            LoadStatus::Success => "success",
            LoadStatus::Error => "error",
            LoadStatus::NotFound => "not-found",
        }
    }
}

impl fmt::Display for LoadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Markup and hooks obtained for one navigation
#[derive(Clone)]
pub struct LoadResult {
    pub status: LoadStatus,
    pub title: String,
    pub html: String,
    /// `<title>` of a fetched document, when it had one
    pub source_title: Option<String>,
    /// Ready hook for this navigation; skipped when an injected page handler ran
    pub on_ready: Option<PageHook>,
    pub error: Option<RouterError>,
}

impl LoadResult {
    pub fn success(title: impl Into<String>, html: impl Into<String>) -> Self {
        Self {
            status: LoadStatus::Success,
            title: title.into(),
            html: html.into(),
            source_title: None,
            on_ready: None,
            error: None,
        }
    }

    /// Error result rendering the generic error fragment for `error`
    pub fn error(title: impl Into<String>, error: RouterError) -> Self {
        Self {
            status: LoadStatus::Error,
            title: title.into(),
            html: error_fragment(&error.to_string()),
            source_title: None,
            on_ready: None,
            error: Some(error),
        }
    }

    pub fn not_found(page_id: &str, config: &RouterConfig) -> Self {
        Self {
            status: LoadStatus::NotFound,
            title: config.not_found_title.clone(),
            html: config.not_found_html.clone(),
            source_title: None,
            on_ready: None,
            error: Some(RouterError::RouteNotFound {
                id: page_id.to_string(),
            }),
        }
    }

    pub fn with_on_ready(mut self, hook: Option<PageHook>) -> Self {
        self.on_ready = hook;
        self
    }

    pub fn is_success(&self) -> bool {
        self.status == LoadStatus::Success
    }
}

impl fmt::Debug for LoadResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoadResult")
            .field("status", &self.status)
            .field("title", &self.title)
            .field("html_len", &self.html.len())
            .field("source_title", &self.source_title)
            .field("on_ready", &self.on_ready.is_some())
            .field("error", &self.error)
            .finish()
    }
}

/// Everything the loader reads
#[derive(Clone, Copy)]
pub struct LoadContext<'a> {
    pub registry: &'a RouteRegistry,
    pub fetcher: &'a dyn MarkupFetcher,
    /// Snapshot of the landing page markup taken at start-up
    pub home_html: &'a str,
    pub config: &'a RouterConfig,
}

/// Resolve the markup for `page_id`, which must already be normalized.
///
/// Sources are tried in order: the route's inline markup, its remote path,
/// and for `home` the start-up snapshot. Unknown ids other than `home`
/// produce [`LoadStatus::NotFound`].
pub async fn fetch_page_markup(page_id: &str, ctx: &LoadContext<'_>) -> LoadResult {
    let Some(route) = ctx.registry.get_route(page_id) else {
        if page_id == HOME_ROUTE_ID {
            return home_result(ctx, None);
        }
        debug_log!("loader" => "no route registered for '{}'", page_id);
        return LoadResult::not_found(page_id, ctx.config);
    };

    if let Some(html) = &route.inline_html {
        debug_log!("loader" => "using inline markup for '{}'", page_id);
        return LoadResult::success(route.title.clone(), html.clone())
            .with_on_ready(route.on_load.clone());
    }

    if let Some(path) = &route.path {
        return fetch_remote(&route, path, ctx).await;
    }

    if page_id == HOME_ROUTE_ID {
        return home_result(ctx, Some(&*route));
    }

    error_log!("loader" => "route '{}' has no inline markup or path", page_id);
    LoadResult::error(
        route.title.clone(),
        RouterError::NoContentSource {
            id: page_id.to_string(),
        },
    )
}

fn home_result(ctx: &LoadContext<'_>, route: Option<&Route>) -> LoadResult {
    debug_log!("loader" => "serving cached home markup");
    let title = route.map_or("Home", |r| r.title.as_str());
    LoadResult::success(title, ctx.home_html).with_on_ready(route.and_then(|r| r.on_load.clone()))
}

async fn fetch_remote(route: &Route, path: &str, ctx: &LoadContext<'_>) -> LoadResult {
    debug_log!("loader" => "fetching '{}' for '{}'", path, route.id);
    match ctx.fetcher.fetch(path).await {
        Ok(document) => {
            let (html, source_title) = parse_fetched(&document);
            LoadResult {
                source_title,
                ..LoadResult::success(route.title.clone(), html)
            }
            .with_on_ready(route.on_load.clone())
        }
        Err(err) => {
            error_log!("loader" => "{}", err);
            LoadResult::error(route.title.clone(), RouterError::Fetch(err))
        }
    }
}

/// Generic in-place error fragment embedding `message`.
pub fn error_fragment(message: &str) -> String {
    format!(
        "<div class=\"page-load-error\" role=\"alert\"><h2>Unable to load this page</h2><p>{}</p></div>",
        html_escape(message)
    )
}

/// Escape HTML special characters.
pub(crate) fn html_escape(s: &str) -> Cow<'_, str> {
    if s.contains(['&', '<', '>', '"', '\'']) {
        let mut escaped = String::with_capacity(s.len() + 8);
        for c in s.chars() {
            match c {
                '&' => escaped.push_str("&amp;"),
                '<' => escaped.push_str("&lt;"),
                '>' => escaped.push_str("&gt;"),
                '"' => escaped.push_str("&quot;"),
                '\'' => escaped.push_str("&#x27;"),
                _ => escaped.push(c),
            }
        }
        Cow::Owned(escaped)
    } else {
        Cow::Borrowed(s)
    }
}

/// Markup to mount and `<title>` text of a fetched document.
///
/// Full pages mount the inner markup of `<body>`; fragments mount verbatim.
fn parse_fetched(source: &str) -> (String, Option<String>) {
    let document = Html::parse_document(source);

    let title = select_first(&document, "title")
        .map(|title| title.text().collect::<String>().trim().to_string())
        .filter(|title| !title.is_empty());

    let html = if is_full_document(source) {
        select_first(&document, "body").map_or_else(|| source.to_string(), |body| body.inner_html())
    } else {
        source.to_string()
    };
    (html, title)
}

fn select_first<'a>(document: &'a Html, selector: &str) -> Option<ElementRef<'a>> {
    let selector = Selector::parse(selector).ok()?;
    document.select(&selector).next()
}

/// Check if `source` opens like a complete page rather than a fragment.
fn is_full_document(source: &str) -> bool {
    let start = source.trim_start();
    ["<!doctype", "<html", "<head", "<body"].iter().any(|prefix| {
        start
            .get(..prefix.len())
            .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
    })
}
