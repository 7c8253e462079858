#![forbid(unsafe_code)]

//! Overlay lifecycle: paint, self-clean, tear down.
//!
//! [`FlashRenderer`] is fire-and-forget from the caller's perspective: a
//! rendered overlay removes itself when its duration elapses, and callers
//! that need to know whether a flash is logically active consult the
//! scheduler, not this type. The renderer only remembers which overlay
//! handles still need removing.
//!
//! # Invariants
//!
//! 1. Every painted overlay is eventually removed: by its deadline via
//!    [`poll`](FlashRenderer::poll) or synchronously via
//!    [`clear_all`](FlashRenderer::clear_all).
//! 2. Overlays are independent: painting the same spec twice yields two
//!    handles with their own deadlines.

use web_time::{Duration, Instant};

use vcur_core::config::CursorStyle;
use vcur_core::geometry::PxRect;

use crate::gradient::LineGradient;

/// Host handle for a painted overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OverlayId(pub u64);

/// Everything the host needs to paint one flash.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlaySpec {
    /// Line rectangle in host display pixels, queried at render time.
    pub rect: PxRect,
    pub gradient: LineGradient,
    /// How long the overlay stays up before the renderer removes it.
    pub duration: Duration,
}

/// Painting capability implemented by the host glue.
///
/// The plugin owns the overlays and the persistent cursor marker
/// exclusively for the lifetime of the view; the host only executes.
pub trait OverlayPainter {
    /// Paint an overlay, returning a handle for later removal.
    fn paint(&mut self, spec: &OverlaySpec) -> OverlayId;

    /// Remove a previously painted overlay. Must tolerate handles that are
    /// already gone (host view re-renders can drop overlays on their own).
    fn remove(&mut self, id: OverlayId);

    /// Show (`Some(style)`) or hide (`None`) the persistent cursor marker.
    fn set_cursor_marker(&mut self, marker: Option<CursorStyle>);
}

/// A painted overlay awaiting removal.
#[derive(Debug, Clone, Copy)]
struct LiveOverlay {
    id: OverlayId,
    remove_at: Instant,
}

/// Paints flashes and removes each one when its time is up.
#[derive(Debug, Default)]
pub struct FlashRenderer {
    live: Vec<LiveOverlay>,
}

impl FlashRenderer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Paint `spec` now; the overlay is removed `spec.duration` later.
    pub fn render<P: OverlayPainter>(
        &mut self,
        spec: &OverlaySpec,
        now: Instant,
        painter: &mut P,
    ) -> OverlayId {
        let id = painter.paint(spec);
        self.live.push(LiveOverlay {
            id,
            remove_at: now + spec.duration,
        });
        tracing::debug!(id = id.0, duration_ms = spec.duration.as_millis() as u64, "overlay painted");
        id
    }

    /// Remove every overlay whose deadline has passed.
    pub fn poll<P: OverlayPainter>(&mut self, now: Instant, painter: &mut P) {
        let mut i = 0;
        while i < self.live.len() {
            if now >= self.live[i].remove_at {
                let overlay = self.live.swap_remove(i);
                painter.remove(overlay.id);
                tracing::trace!(id = overlay.id.0, "overlay expired");
            } else {
                i += 1;
            }
        }
    }

    /// Remove every live overlay immediately (teardown).
    ///
    /// After this returns no overlay outlives the plugin, and no deadline
    /// remains to fire.
    pub fn clear_all<P: OverlayPainter>(&mut self, painter: &mut P) {
        for overlay in self.live.drain(..) {
            painter.remove(overlay.id);
        }
    }

    /// Number of overlays still awaiting removal.
    #[must_use]
    pub fn live_count(&self) -> usize {
        self.live.len()
    }
}
