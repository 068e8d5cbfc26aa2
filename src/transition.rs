//! Content fade transitions
//!
//! The orchestrator fades the content area out before swapping markup and
//! back in afterwards. How the fade is drawn is up to the [`ContentAnimator`];
//! [`Transition`] only carries the timing.

use crate::error::HookError;
use crate::host::{Clock, ContentSurface};
use futures::future::BoxFuture;
use std::sync::Arc;
use std::time::Duration;

/// Timing of the content fade
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Swap content without animating
    None,

    /// Opacity fade, applied separately to the way out and the way in
    Fade {
        /// Duration in milliseconds
        duration_ms: u64,
    },
}

impl Default for Transition {
    fn default() -> Self {
        Self::Fade { duration_ms: 150 }
    }
}

impl Transition {
    /// Create a fade transition
    pub fn fade(duration_ms: u64) -> Self {
        Self::Fade { duration_ms }
    }

    /// Duration of one fade direction
    pub fn duration(&self) -> Duration {
        match self {
            Self::None => Duration::ZERO,
            Self::Fade { duration_ms } => Duration::from_millis(*duration_ms),
        }
    }

    /// Check if this is a no-op transition
    pub fn is_none(&self) -> bool {
        self.duration().is_zero()
    }
}

/// Fades the content area out and in.
///
/// The returned futures complete once the fade has visually finished.
pub trait ContentAnimator: Send + Sync {
    fn fade_out(
        &self,
        content: Arc<dyn ContentSurface>,
        transition: Transition,
    ) -> BoxFuture<'static, ()>;

    fn fade_in(
        &self,
        content: Arc<dyn ContentSurface>,
        transition: Transition,
    ) -> BoxFuture<'static, ()>;
}

/// Sets the final opacity immediately.
#[derive(Debug, Clone, Copy, Default)]
pub struct InstantFade;

impl ContentAnimator for InstantFade {
    fn fade_out(
        &self,
        content: Arc<dyn ContentSurface>,
        _transition: Transition,
    ) -> BoxFuture<'static, ()> {
        content.set_opacity(0.0);
        Box::pin(async {})
    }

    fn fade_in(
        &self,
        content: Arc<dyn ContentSurface>,
        _transition: Transition,
    ) -> BoxFuture<'static, ()> {
        content.set_opacity(1.0);
        Box::pin(async {})
    }
}

/// Steps the content opacity frame by frame with an eased curve.
pub struct OpacityFade {
    clock: Arc<dyn Clock>,
    frame: Duration,
}

impl OpacityFade {
    /// Roughly one frame at 60 Hz
    const DEFAULT_FRAME: Duration = Duration::from_millis(16);

    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            frame: Self::DEFAULT_FRAME,
        }
    }

    pub fn frame(mut self, frame: Duration) -> Self {
        self.frame = frame;
        self
    }

    fn run(
        &self,
        content: Arc<dyn ContentSurface>,
        transition: Transition,
        from: f32,
        to: f32,
    ) -> BoxFuture<'static, ()> {
        let clock = self.clock.clone();
        let total = transition.duration();
        let frame = self.frame.max(Duration::from_millis(1));

        Box::pin(async move {
            if total.is_zero() {
                content.set_opacity(to);
                return;
            }

            let mut elapsed = Duration::ZERO;
            while elapsed < total {
                let progress = elapsed.as_secs_f32() / total.as_secs_f32();
                content.set_opacity(from + (to - from) * apply_easing(progress));
                let step = frame.min(total - elapsed);
                clock.sleep(step).await;
                elapsed += step;
            }
            content.set_opacity(to);
        })
    }
}

impl ContentAnimator for OpacityFade {
    fn fade_out(
        &self,
        content: Arc<dyn ContentSurface>,
        transition: Transition,
    ) -> BoxFuture<'static, ()> {
        self.run(content, transition, 1.0, 0.0)
    }

    fn fade_in(
        &self,
        content: Arc<dyn ContentSurface>,
        transition: Transition,
    ) -> BoxFuture<'static, ()> {
        self.run(content, transition, 0.0, 1.0)
    }
}

/// Page-enter animations for freshly mounted markup.
///
/// Run detached; a failure is logged and never blocks navigation.
pub trait PageAnimations: Send + Sync {
    fn animate_page(&self, page_id: &str) -> BoxFuture<'static, Result<(), HookError>>;
}

/// Easing function - ease in out cubic
pub fn ease_in_out_cubic(t: f32) -> f32 {
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

/// Apply easing to progress
pub fn apply_easing(progress: f32) -> f32 {
    ease_in_out_cubic(progress.clamp(0.0, 1.0))
}
