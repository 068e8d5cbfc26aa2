//! Navigation state
//!
//! Every call to `load_page_content` begins a new generation. Only the newest
//! generation may touch the content area, push history or hide the overlay;
//! an older one that wakes up from an await finds its token stale and bows
//! out.

use parking_lot::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

/// Where the current navigation is in its transition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum NavigationPhase {
    #[default]
    Idle,
    FadingOut,
    Loading,
    Rendering,
    AnimatingIn,
    Settled,
}

impl NavigationPhase {
    /// Check if a navigation is in flight
    pub fn is_busy(&self) -> bool {
        !matches!(self, NavigationPhase::Idle | NavigationPhase::Settled)
    }
}

/// Ticket identifying one navigation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NavigationToken(u64);

impl NavigationToken {
    pub fn generation(&self) -> u64 {
        self.0
    }
}

#[derive(Debug, Default)]
struct PhaseTrace {
    generation: u64,
    phase: NavigationPhase,
    visited: Vec<NavigationPhase>,
}

/// Generation counter plus the phase of the newest navigation
#[derive(Debug, Default)]
pub struct NavigationState {
    generation: AtomicU64,
    trace: Mutex<PhaseTrace>,
}

impl NavigationState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a navigation, invalidating every earlier token.
    pub fn begin(&self) -> NavigationToken {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let mut trace = self.trace.lock();
        *trace = PhaseTrace {
            generation,
            ..PhaseTrace::default()
        };
        NavigationToken(generation)
    }

    /// Check if `token` belongs to the newest navigation
    pub fn is_current(&self, token: NavigationToken) -> bool {
        self.generation.load(Ordering::SeqCst) == token.0
    }

    /// Move the navigation owning `token` to `phase`.
    ///
    /// Returns `false`, without recording anything, when the token is stale.
    pub fn advance(&self, token: NavigationToken, phase: NavigationPhase) -> bool {
        let mut trace = self.trace.lock();
        if trace.generation != token.0 || !self.is_current(token) {
            return false;
        }
        trace.phase = phase;
        trace.visited.push(phase);
        true
    }

    /// Mark the navigation owning `token` as settled.
    pub fn settle(&self, token: NavigationToken) -> bool {
        self.advance(token, NavigationPhase::Settled)
    }

    /// Phase of the newest navigation
    pub fn phase(&self) -> NavigationPhase {
        self.trace.lock().phase
    }

    /// Phases the newest navigation went through, in order
    pub fn visited(&self) -> Vec<NavigationPhase> {
        self.trace.lock().visited.clone()
    }

    /// Number of navigations started so far
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }
}
