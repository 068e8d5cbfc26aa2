//! Navigation history
//!
//! The router pushes one entry per completed navigation through a
//! [`HistoryAdapter`]. A browser shell implements it over
//! `history.pushState` and the `popstate` event; [`MemoryHistory`] keeps the
//! same stack semantics in memory for tests and non-browser hosts:
//! - Forward/backward navigation
//! - Forward entries truncated on push
//! - Configurable size limit

use crate::NavigationDirection;
use parking_lot::Mutex;

/// Build the URL for a page id: `#<id>`.
pub fn hash_url(page_id: &str) -> String {
    format!("#{}", page_id)
}

/// One history entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    /// Normalized page id
    pub page_id: String,
    /// Document title at the time of the push
    pub title: String,
    /// URL written to the address bar
    pub url: String,
}

impl HistoryEntry {
    pub fn new(page_id: impl Into<String>, title: impl Into<String>) -> Self {
        let page_id = page_id.into();
        Self {
            url: hash_url(&page_id),
            title: title.into(),
            page_id,
        }
    }
}

/// Browser history as seen by the router.
pub trait HistoryAdapter: Send + Sync {
    /// Page id of the active entry, `None` before the first push
    fn current_id(&self) -> Option<String>;

    /// Add an entry and make it current (`history.pushState`)
    fn push_state(&self, entry: HistoryEntry);

    /// Move back one entry and return its page id
    fn back(&self) -> Option<String>;

    /// Move forward one entry and return its page id
    fn forward(&self) -> Option<String>;
}

/// History event produced by stack operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEvent {
    /// Previous page id
    pub from: Option<String>,
    /// New page id
    pub to: String,
    /// Navigation direction
    pub direction: NavigationDirection,
}

/// History stack
#[derive(Debug, Clone)]
pub struct History {
    entries: Vec<HistoryEntry>,
    /// Index of the active entry; meaningless while `entries` is empty
    current: usize,
    /// Maximum history size (0 = unlimited)
    max_size: usize,
}

impl History {
    const DEFAULT_MAX_SIZE: usize = 200;

    /// Create an empty history
    pub fn new() -> Self {
        Self::with_max_size(Self::DEFAULT_MAX_SIZE)
    }

    /// Create with custom max size (0 = unlimited)
    pub fn with_max_size(max_size: usize) -> Self {
        Self {
            entries: Vec::new(),
            current: 0,
            max_size,
        }
    }

    /// Active entry
    pub fn current_entry(&self) -> Option<&HistoryEntry> {
        self.entries.get(self.current)
    }

    /// Page id of the active entry
    pub fn current_id(&self) -> Option<&str> {
        self.current_entry().map(|entry| entry.page_id.as_str())
    }

    /// Push a new entry, truncating any forward entries
    pub fn push(&mut self, entry: HistoryEntry) -> HistoryEvent {
        let from = self.current_id().map(str::to_string);
        let to = entry.page_id.clone();

        if self.entries.is_empty() {
            self.entries.push(entry);
            self.current = 0;
        } else {
            self.entries.truncate(self.current + 1);
            self.entries.push(entry);
            self.current += 1;
        }

        self.enforce_size_limit();

        HistoryEvent {
            from,
            to,
            direction: NavigationDirection::Forward,
        }
    }

    /// Go back one entry
    pub fn back(&mut self) -> Option<HistoryEvent> {
        if !self.can_go_back() {
            return None;
        }
        let from = self.current_id().map(str::to_string);
        self.current -= 1;
        Some(HistoryEvent {
            from,
            to: self.entries[self.current].page_id.clone(),
            direction: NavigationDirection::Back,
        })
    }

    /// Go forward one entry
    pub fn forward(&mut self) -> Option<HistoryEvent> {
        if !self.can_go_forward() {
            return None;
        }
        let from = self.current_id().map(str::to_string);
        self.current += 1;
        Some(HistoryEvent {
            from,
            to: self.entries[self.current].page_id.clone(),
            direction: NavigationDirection::Forward,
        })
    }

    pub fn can_go_back(&self) -> bool {
        self.current > 0 && !self.entries.is_empty()
    }

    pub fn can_go_forward(&self) -> bool {
        self.current + 1 < self.entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    fn enforce_size_limit(&mut self) {
        if self.max_size > 0 && self.entries.len() > self.max_size {
            // Drop the oldest entries; the active one stays reachable.
            let excess = self.entries.len() - self.max_size;
            self.entries.drain(0..excess);
            self.current = self.current.saturating_sub(excess);
        }
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}

/// [`HistoryAdapter`] backed by an in-memory [`History`] stack.
#[derive(Debug, Default)]
pub struct MemoryHistory {
    inner: Mutex<History>,
}

impl MemoryHistory {
    pub fn new(history: History) -> Self {
        Self {
            inner: Mutex::new(history),
        }
    }

    /// Start with `page_id` as the active entry, as when the page was opened
    /// with that hash in the address bar.
    pub fn with_initial(page_id: impl Into<String>) -> Self {
        let mut history = History::new();
        history.push(HistoryEntry::new(page_id, ""));
        Self::new(history)
    }

    /// Copy of all entries
    pub fn entries(&self) -> Vec<HistoryEntry> {
        self.inner.lock().entries().to_vec()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }
}

impl HistoryAdapter for MemoryHistory {
    fn current_id(&self) -> Option<String> {
        self.inner.lock().current_id().map(str::to_string)
    }

    fn push_state(&self, entry: HistoryEntry) {
        self.inner.lock().push(entry);
    }

    fn back(&self) -> Option<String> {
        self.inner.lock().back().map(|event| event.to)
    }

    fn forward(&self) -> Option<String> {
        self.inner.lock().forward().map(|event| event.to)
    }
}
