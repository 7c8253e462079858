#![forbid(unsafe_code)]

//! The click fence: a suppression window around pointer activity.
//!
//! A click that also scrolls or repositions the cursor must not flash —
//! the user is deliberately interacting and knows where the cursor is.
//! The fence goes up on pointer-down and comes down a fixed tail after
//! pointer-up, absorbing the trailing scroll and selection adjustments a
//! click produces.
//!
//! # State machine
//!
//! `Idle → Fencing → Idle`. Pointer-down enters Fencing and holds it (no
//! deadline while the button is down). Pointer-up, pointer-cancel, and
//! click each (re)arm the release deadline `release_tail` out. The click
//! handler is redundant with pointer-up on most platforms; it exists for
//! platforms that swallow pointer-up.
//!
//! # Invariants
//!
//! 1. At most one release deadline is live; re-arming overwrites it.
//! 2. The fence never comes down while the button is held.
//! 3. `reset()` returns to Idle regardless of deadline state.

use web_time::{Duration, Instant};

/// Fence timing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FenceConfig {
    /// How long the fence outlives the click (default: 400ms).
    pub release_tail: Duration,
}

impl Default for FenceConfig {
    fn default() -> Self {
        Self {
            release_tail: Duration::from_millis(400),
        }
    }
}

/// Tracks whether the user is mid-click.
#[derive(Debug, Clone)]
pub struct ClickFence {
    config: FenceConfig,
    engaged: bool,
    /// Deadline after which the fence drops. `None` while the button is
    /// still down.
    release_at: Option<Instant>,
}

impl ClickFence {
    #[must_use]
    pub fn new(config: FenceConfig) -> Self {
        Self {
            config,
            engaged: false,
            release_at: None,
        }
    }

    /// Pointer button pressed: fence up, held open.
    pub fn on_pointer_down(&mut self) {
        self.engaged = true;
        self.release_at = None;
    }

    /// Pointer button released: start the release tail.
    pub fn on_pointer_up(&mut self, now: Instant) {
        self.arm_release(now);
    }

    /// Pointer sequence cancelled by the platform: same release path.
    pub fn on_pointer_cancel(&mut self, now: Instant) {
        self.arm_release(now);
    }

    /// Click event: safety net for platforms that swallow pointer-up.
    pub fn on_click(&mut self, now: Instant) {
        self.arm_release(now);
    }

    fn arm_release(&mut self, now: Instant) {
        self.engaged = true;
        self.release_at = Some(now + self.config.release_tail);
    }

    /// Whether the fence is up at `now`.
    #[must_use]
    pub fn is_active(&self, now: Instant) -> bool {
        self.engaged && self.release_at.is_none_or(|at| now < at)
    }

    /// Collapse an expired release deadline back to Idle.
    pub fn poll(&mut self, now: Instant) {
        if self.engaged && self.release_at.is_some_and(|at| now >= at) {
            self.engaged = false;
            self.release_at = None;
        }
    }

    /// Drop the fence immediately (teardown).
    pub fn reset(&mut self) {
        self.engaged = false;
        self.release_at = None;
    }
}

impl Default for ClickFence {
    fn default() -> Self {
        Self::new(FenceConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn down_engages_until_release_tail() {
        let mut fence = ClickFence::default();
        let t0 = Instant::now();
        assert!(!fence.is_active(t0));

        fence.on_pointer_down();
        assert!(fence.is_active(t0));
        // Held open indefinitely while the button is down.
        assert!(fence.is_active(t0 + Duration::from_secs(10)));

        fence.on_pointer_up(t0 + Duration::from_millis(100));
        assert!(fence.is_active(t0 + Duration::from_millis(499)));
        assert!(!fence.is_active(t0 + Duration::from_millis(500)));
    }

    #[test]
    fn click_alone_raises_the_fence() {
        let mut fence = ClickFence::default();
        let t0 = Instant::now();
        fence.on_click(t0);
        assert!(fence.is_active(t0 + Duration::from_millis(399)));
        assert!(!fence.is_active(t0 + Duration::from_millis(400)));
    }

    #[test]
    fn rearm_extends_the_tail() {
        let mut fence = ClickFence::default();
        let t0 = Instant::now();
        fence.on_pointer_down();
        fence.on_pointer_up(t0);
        // The click that follows pointer-up pushes the deadline out.
        fence.on_click(t0 + Duration::from_millis(300));
        assert!(fence.is_active(t0 + Duration::from_millis(600)));
        assert!(!fence.is_active(t0 + Duration::from_millis(700)));
    }

    #[test]
    fn poll_collapses_expired_fence() {
        let mut fence = ClickFence::default();
        let t0 = Instant::now();
        fence.on_click(t0);
        fence.poll(t0 + Duration::from_millis(401));
        assert!(!fence.is_active(t0 + Duration::from_millis(401)));
        // A fresh pointer-down still works after collapse.
        fence.on_pointer_down();
        assert!(fence.is_active(t0 + Duration::from_secs(1)));
    }

    #[test]
    fn reset_drops_immediately() {
        let mut fence = ClickFence::default();
        fence.on_pointer_down();
        fence.reset();
        assert!(!fence.is_active(Instant::now()));
    }
}
