//! Page identifier normalization
//!
//! Maps whatever ends up in the URL fragment (or in a link's `href`) to the
//! canonical route id used as the registry key. Three families of aliases are
//! recognized, all matched case-insensitively:
//!
//! - legacy layout files: `/layout/repo-mapper.html`
//! - clean tool paths: `/github-tools/repo-mapper`
//! - workspace paths: `/faq` and `/faq-api`
//!
//! Any of them may sit under a deployment base folder, carry repeated or
//! trailing slashes, and end with a `?query` or `#hash` suffix.
//!
//! The function is pure. Input that matches no alias is returned unchanged
//! (minus the leading `#` and any suffix) so the caller can treat it as a
//! potential 404 instead of guessing.

use std::borrow::Cow;

/// Canonical id of the landing page.
pub const HOME_ROUTE_ID: &str = "home";

/// Legacy `/layout/<file>` pages and the tool each one became.
const LEGACY_LAYOUT_PAGES: &[(&str, &str)] = &[
    ("repo-mapper.html", "repo-mapper"),
    ("repomapper.html", "repo-mapper"),
    ("release-stats.html", "release-stats"),
    ("releasestats.html", "release-stats"),
    ("git-patch.html", "git-patch"),
    ("gitpatch.html", "git-patch"),
    ("favorites.html", "favorites"),
    ("favorite-repos.html", "favorites"),
    ("app-toolkit.html", "app-toolkit-api"),
    ("faq.html", "faq-api"),
    ("english.html", "english-with-lidia-api"),
    ("english-with-lidia.html", "english-with-lidia-api"),
    ("android-studio-tutorials.html", "android-studio-tutorials-api"),
];

/// `(folder, page)` pairs of clean tool paths.
const CLEAN_PATH_ALIASES: &[(&str, &str, &str)] = &[
    ("github-tools", "repo-mapper", "repo-mapper"),
    ("github-tools", "release-stats", "release-stats"),
    ("github-tools", "git-patch", "git-patch"),
    ("github-tools", "favorites", "favorites"),
];

/// Workspace names. Both `<name>` and `<name>-api` resolve to `<name>-api`.
const WORKSPACE_ALIASES: &[(&str, &str)] = &[
    ("app-toolkit", "app-toolkit-api"),
    ("faq", "faq-api"),
    ("english-with-lidia", "english-with-lidia-api"),
    ("android-studio-tutorials", "android-studio-tutorials-api"),
];

/// Normalize a raw hash, path or id into a canonical route id.
///
/// `None`, the empty string, `index.html` and a lone dotted segment (a
/// deployment folder such as `my.site.io`) all yield [`HOME_ROUTE_ID`].
///
/// # Example
///
/// ```
/// use hash_navigator::normalize_page_id;
///
/// assert_eq!(normalize_page_id("#/Layout//Repo-Mapper.html?x=1"), "repo-mapper");
/// assert_eq!(normalize_page_id("/my.site/github-tools/git-patch/"), "git-patch");
/// assert_eq!(normalize_page_id("#faq"), "faq-api");
/// assert_eq!(normalize_page_id(None), "home");
/// assert_eq!(normalize_page_id("#something-else"), "something-else");
/// ```
pub fn normalize_page_id<'a>(raw: impl Into<Option<&'a str>>) -> String {
    let Some(raw) = raw.into() else {
        return HOME_ROUTE_ID.to_string();
    };

    let trimmed = raw.trim();
    let unhashed = trimmed.strip_prefix('#').unwrap_or(trimmed);
    let stripped = trim_segments(strip_suffixes(unhashed));
    let stripped = stripped.as_ref();
    if stripped.is_empty() {
        return HOME_ROUTE_ID.to_string();
    }

    let segments: Vec<&str> = stripped.split('/').filter(|s| !s.is_empty()).collect();
    let lowered: Vec<String> = segments.iter().map(|s| s.to_ascii_lowercase()).collect();

    if let Some(id) = resolve_alias(&lowered) {
        return id.to_string();
    }

    // A lone segment written as a path (`#/repo-mapper`) is still just an id.
    match segments.as_slice() {
        [single] => (*single).to_string(),
        _ => stripped.to_string(),
    }
}

/// Returns `true` if `raw` normalizes to the landing page.
pub fn is_home<'a>(raw: impl Into<Option<&'a str>>) -> bool {
    normalize_page_id(raw) == HOME_ROUTE_ID
}

/// Drop a `?query` or `#hash` suffix.
fn strip_suffixes(value: &str) -> &str {
    match value.find(['?', '#']) {
        Some(pos) => &value[..pos],
        None => value,
    }
}

/// Trim whitespace around every `/`-separated segment.
fn trim_segments(value: &str) -> Cow<'_, str> {
    if value.split('/').all(|segment| segment.trim() == segment) {
        Cow::Borrowed(value)
    } else {
        Cow::Owned(value.split('/').map(str::trim).collect::<Vec<_>>().join("/"))
    }
}

fn resolve_alias(segments: &[String]) -> Option<&'static str> {
    let Some(last) = segments.last() else {
        // Nothing but slashes.
        return Some(HOME_ROUTE_ID);
    };
    let last = last.as_str();
    let parent = segments
        .len()
        .checked_sub(2)
        .map(|idx| segments[idx].as_str());

    if last == "index.html" {
        return Some(HOME_ROUTE_ID);
    }

    if parent == Some("layout") {
        if let Some(id) = lookup_legacy(last) {
            return Some(id);
        }
    }

    if let Some(folder) = parent {
        if let Some(id) = lookup_clean_path(folder, last) {
            return Some(id);
        }
    }

    // Workspaces live at the root or directly under a deployment folder.
    if segments.len() <= 2 {
        if let Some(id) = lookup_workspace(last) {
            return Some(id);
        }
    }

    if segments.len() == 1 && last.contains('.') {
        return Some(HOME_ROUTE_ID);
    }

    None
}

fn lookup_legacy(file: &str) -> Option<&'static str> {
    LEGACY_LAYOUT_PAGES
        .iter()
        .find(|(legacy, _)| *legacy == file)
        .map(|(_, id)| *id)
}

fn lookup_clean_path(folder: &str, page: &str) -> Option<&'static str> {
    CLEAN_PATH_ALIASES
        .iter()
        .find(|(f, p, _)| *f == folder && *p == page)
        .map(|(_, _, id)| *id)
}

fn lookup_workspace(segment: &str) -> Option<&'static str> {
    let name = segment.strip_suffix("-api").unwrap_or(segment);
    WORKSPACE_ALIASES
        .iter()
        .find(|(workspace, _)| *workspace == name)
        .map(|(_, id)| *id)
}

/// Every canonical id an alias can resolve to, home included.
pub fn canonical_ids() -> Vec<&'static str> {
    let mut ids: Vec<&'static str> = LEGACY_LAYOUT_PAGES
        .iter()
        .map(|(_, id)| *id)
        .chain(CLEAN_PATH_ALIASES.iter().map(|(_, _, id)| *id))
        .chain(WORKSPACE_ALIASES.iter().map(|(_, id)| *id))
        .collect();
    ids.push(HOME_ROUTE_ID);
    ids.sort_unstable();
    ids.dedup();
    ids
}
