#![forbid(unsafe_code)]

//! Flash scheduling: admission gating, debounce, and the timer pipeline.
//!
//! [`FlashScheduler`] is a stateful processor fed trigger events by the
//! controller and polled for due work. It decides, for a stream of
//! asynchronous triggers arriving on the UI thread, whether a flash may be
//! scheduled, and owns every deadline in the pipeline:
//!
//! ```text
//! scroll ──debounce──▶ admission ──50ms──▶ render ──duration──▶ reset
//! view/layout/key ──────────────┘
//! ```
//!
//! The pure decision functions ([`can_schedule_flash`],
//! [`SchedulerConfig::scroll_debounce`]) are exposed separately so the
//! gating contract is testable without a scheduler instance.
//!
//! # Invariants
//!
//! 1. At most one flash is in flight: a pending or active flash blocks
//!    every new admission, regardless of trigger.
//! 2. One deadline slot per purpose (debounce, admission, reset,
//!    suppression horizon). Re-arming overwrites; there are never two live
//!    timers for one purpose.
//! 3. The internal [`FlashPhase`] is the single source of truth; the
//!    boolean [`FlashState`] snapshot is derived from it, so
//!    `pending && active` is unrepresentable.
//! 4. `cancel_all()` leaves no deadline behind; a superseded or cancelled
//!    deadline never fires against updated state.
//!
//! # Failure Modes
//!
//! None in the error sense: every "failure" is a deliberate rejection
//! (`false` / no command) meaning "not now". A later trigger is handled
//! independently.

use web_time::{Duration, Instant};

use crate::fence::{ClickFence, FenceConfig};
use crate::trigger::{ScrollSample, Trigger};

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Timing policy for the scheduler.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SchedulerConfig {
    /// Minimum spacing between admissions for fence-respecting triggers
    /// (default: 100ms).
    pub min_interval: Duration,
    /// Delay between admission and render, absorbing near-simultaneous
    /// duplicate triggers into one flash (default: 50ms).
    pub admission_delay: Duration,
    /// How long a rendered flash stays up (default: 600ms).
    pub flash_duration: Duration,
    /// How far each suppressed scroll event pushes the suppression window
    /// (default: 300ms).
    pub scroll_suppression: Duration,
    /// Debounce for fine-grained scrolling (default: 250ms).
    pub debounce_slow: Duration,
    /// Debounce for deliberate jumps and momentum scroll (default: 150ms).
    pub debounce_fast: Duration,
    /// Deltas below this many pixels take the slow debounce (default: 5).
    pub debounce_delta_threshold: f64,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            min_interval: Duration::from_millis(100),
            admission_delay: Duration::from_millis(50),
            flash_duration: Duration::from_millis(600),
            scroll_suppression: Duration::from_millis(300),
            debounce_slow: Duration::from_millis(250),
            debounce_fast: Duration::from_millis(150),
            debounce_delta_threshold: 5.0,
        }
    }
}

impl SchedulerConfig {
    /// Debounce duration for a scroll delta.
    ///
    /// Small deltas correlate with fine-grained scrolling (selection drags)
    /// where a later flash reduces noise; large deltas correlate with
    /// deliberate jumps where a faster response reads better. The boundary
    /// is hard: a delta of exactly the threshold takes the fast debounce.
    #[must_use]
    pub fn scroll_debounce(&self, delta_px: f64) -> Duration {
        if delta_px < self.debounce_delta_threshold {
            self.debounce_slow
        } else {
            self.debounce_fast
        }
    }
}

// ---------------------------------------------------------------------------
// Gating state and the pure admission decision
// ---------------------------------------------------------------------------

/// Snapshot of the gating state, read fresh before every decision.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlashState {
    /// User is mid-click (pointer-down through the fence release tail).
    pub is_fence_active: bool,
    /// A flash is currently rendered.
    pub is_flash_active: bool,
    /// A flash has been admitted but not yet rendered.
    pub has_pending_flash: bool,
    /// When the last flash was admitted.
    pub last_admitted_at: Option<Instant>,
    pub now: Instant,
}

/// Which gate rejected a trigger, for logging and diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateRejection {
    /// Fence up and the trigger does not bypass it.
    Fence,
    /// A flash is already rendered.
    FlashActive,
    /// A flash is admitted and about to render.
    FlashPending,
    /// Too soon after the previous admission.
    MinInterval,
}

impl GateRejection {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            GateRejection::Fence => "fence",
            GateRejection::FlashActive => "flash-active",
            GateRejection::FlashPending => "flash-pending",
            GateRejection::MinInterval => "min-interval",
        }
    }
}

/// The failing gate for `trigger` against `state`, or `None` to admit.
///
/// Gates apply in a fixed order: fence, active, pending, minimum interval.
#[must_use]
pub fn gate_rejection(
    trigger: Trigger,
    state: &FlashState,
    min_interval: Duration,
) -> Option<GateRejection> {
    if !trigger.bypasses_fence() && state.is_fence_active {
        return Some(GateRejection::Fence);
    }
    if state.is_flash_active {
        return Some(GateRejection::FlashActive);
    }
    if state.has_pending_flash {
        return Some(GateRejection::FlashPending);
    }
    if !trigger.bypasses_fence()
        && let Some(last) = state.last_admitted_at
        && state.now.duration_since(last) < min_interval
    {
        return Some(GateRejection::MinInterval);
    }
    None
}

/// Whether a flash may be scheduled for `trigger` given `state`, using the
/// default 100ms minimum interval.
#[must_use]
pub fn can_schedule_flash(trigger: Trigger, state: &FlashState) -> bool {
    gate_rejection(trigger, state, SchedulerConfig::default().min_interval).is_none()
}

// ---------------------------------------------------------------------------
// FlashScheduler
// ---------------------------------------------------------------------------

/// Where the pipeline currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlashPhase {
    /// Nothing scheduled.
    Idle,
    /// A scroll debounce deadline is armed.
    Debouncing,
    /// Admitted; the admission delay is running.
    Pending,
    /// Rendered; the reset deadline is running.
    Active,
}

/// Work the controller must perform, produced by [`FlashScheduler::poll`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlashCommand {
    /// The admission delay elapsed: query geometry and paint the flash now.
    Render,
    /// The flash duration elapsed: remove any "during flash" decoration.
    Clear,
}

/// The flash pipeline state machine.
///
/// Feed it events (each with an explicit `now`), then call
/// [`poll`](Self::poll) whenever the host ticks; due deadlines fire in
/// pipeline order and produce [`FlashCommand`]s.
#[derive(Debug, Clone)]
pub struct FlashScheduler {
    config: SchedulerConfig,
    fence: ClickFence,
    phase: FlashPhase,
    last_admitted_at: Option<Instant>,
    // One deadline slot per purpose; overwrite-to-rearm, None-to-cancel.
    debounce_at: Option<Instant>,
    admission_at: Option<Instant>,
    reset_at: Option<Instant>,
    suppressed_until: Option<Instant>,
}

impl FlashScheduler {
    #[must_use]
    pub fn new(config: SchedulerConfig) -> Self {
        Self::with_fence(config, FenceConfig::default())
    }

    #[must_use]
    pub fn with_fence(config: SchedulerConfig, fence: FenceConfig) -> Self {
        Self {
            config,
            fence: ClickFence::new(fence),
            phase: FlashPhase::Idle,
            last_admitted_at: None,
            debounce_at: None,
            admission_at: None,
            reset_at: None,
            suppressed_until: None,
        }
    }

    /// Current pipeline phase.
    #[inline]
    #[must_use]
    pub fn phase(&self) -> FlashPhase {
        self.phase
    }

    /// The timing policy in effect.
    #[inline]
    #[must_use]
    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// Replace the timing policy. In-flight deadlines keep their original
    /// schedule; the new policy applies from the next event on.
    pub fn set_config(&mut self, config: SchedulerConfig) {
        self.config = config;
    }

    /// Derive the gating snapshot at `now`.
    #[must_use]
    pub fn flash_state(&self, now: Instant) -> FlashState {
        FlashState {
            is_fence_active: self.fence.is_active(now),
            is_flash_active: self.phase == FlashPhase::Active,
            has_pending_flash: self.phase == FlashPhase::Pending,
            last_admitted_at: self.last_admitted_at,
            now,
        }
    }

    // -- fence feeds --------------------------------------------------------

    pub fn on_pointer_down(&mut self) {
        self.fence.on_pointer_down();
    }

    pub fn on_pointer_up(&mut self, now: Instant) {
        self.fence.on_pointer_up(now);
    }

    pub fn on_pointer_cancel(&mut self, now: Instant) {
        self.fence.on_pointer_cancel(now);
    }

    pub fn on_click(&mut self, now: Instant) {
        self.fence.on_click(now);
    }

    // -- trigger feeds ------------------------------------------------------

    /// A scroll event on a qualifying surface.
    ///
    /// While a flash is active or the suppression window is live, the event
    /// only extends the window and cancels any armed debounce — momentum
    /// tails must not re-admit a flash. While a flash is pending, the event
    /// is absorbed outright (a debounce armed now could only ever be
    /// rejected). Otherwise the debounce deadline is re-armed for
    /// [`SchedulerConfig::scroll_debounce`] of the delta.
    pub fn on_scroll(&mut self, sample: ScrollSample, now: Instant) {
        if self.phase == FlashPhase::Active || self.is_suppressed(now) {
            self.suppressed_until = Some(now + self.config.scroll_suppression);
            self.debounce_at = None;
            if self.phase == FlashPhase::Debouncing {
                self.phase = FlashPhase::Idle;
            }
            tracing::trace!("scroll suppressed, window extended");
            return;
        }
        if self.phase == FlashPhase::Pending {
            tracing::trace!("scroll absorbed by pending flash");
            return;
        }
        self.debounce_at = Some(now + self.config.scroll_debounce(sample.delta_px));
        self.phase = FlashPhase::Debouncing;
    }

    /// Request admission for a non-scroll trigger.
    ///
    /// Returns whether the trigger was admitted. Scroll reaches admission
    /// only through its debounce deadline; calling this with
    /// [`Trigger::Scroll`] skips the debounce and is intended for tests.
    pub fn request(&mut self, trigger: Trigger, now: Instant) -> bool {
        let state = self.flash_state(now);
        if let Some(gate) = gate_rejection(trigger, &state, self.config.min_interval) {
            tracing::debug!(trigger = trigger.name(), gate = gate.name(), "flash rejected");
            return false;
        }
        self.admit(trigger, now);
        true
    }

    fn admit(&mut self, trigger: Trigger, now: Instant) {
        self.last_admitted_at = Some(now);
        // An admitted flash supersedes any armed debounce.
        self.debounce_at = None;
        self.admission_at = Some(now + self.config.admission_delay);
        self.phase = FlashPhase::Pending;
        tracing::debug!(trigger = trigger.name(), "flash admitted");
    }

    // -- pipeline -----------------------------------------------------------

    /// Fire due deadlines and return the commands they produce.
    ///
    /// Deadlines fire in pipeline order (fence release, debounce, admission,
    /// reset), so a single late poll drains cleanly.
    pub fn poll(&mut self, now: Instant) -> Vec<FlashCommand> {
        let mut out = Vec::with_capacity(2);

        self.fence.poll(now);

        if self.debounce_at.is_some_and(|at| now >= at) {
            self.debounce_at = None;
            if self.phase == FlashPhase::Debouncing {
                self.phase = FlashPhase::Idle;
            }
            // Scroll settled; the admission gates have the final word.
            let _ = self.request(Trigger::Scroll, now);
        }

        if self.admission_at.is_some_and(|at| now >= at) {
            self.admission_at = None;
            self.phase = FlashPhase::Active;
            self.reset_at = Some(now + self.config.flash_duration);
            out.push(FlashCommand::Render);
        }

        if self.reset_at.is_some_and(|at| now >= at) {
            self.reset_at = None;
            self.phase = FlashPhase::Idle;
            out.push(FlashCommand::Clear);
        }

        if self.suppressed_until.is_some_and(|at| now >= at) {
            self.suppressed_until = None;
        }

        out
    }

    /// Cancel every deadline and return to Idle (teardown).
    ///
    /// The controller is responsible for removing any rendered overlay; this
    /// guarantees no deadline fires afterwards.
    pub fn cancel_all(&mut self) {
        self.debounce_at = None;
        self.admission_at = None;
        self.reset_at = None;
        self.suppressed_until = None;
        self.phase = FlashPhase::Idle;
        self.fence.reset();
        tracing::debug!("scheduler cancelled");
    }

    fn is_suppressed(&self, now: Instant) -> bool {
        self.suppressed_until.is_some_and(|until| now < until)
    }
}

impl Default for FlashScheduler {
    fn default() -> Self {
        Self::new(SchedulerConfig::default())
    }
}
