#![forbid(unsafe_code)]

//! Core: trigger gating, the click fence, and the flash scheduler.
//!
//! # Role in Visible Cursor
//! `vcur-core` is the decision layer. It owns the admission gates, the
//! debounce and suppression policy, every timer in the flash pipeline, and
//! the user settings record. It knows nothing about painting and nothing
//! about any particular host editor.
//!
//! # Primary responsibilities
//! - **FlashScheduler**: admit/reject trigger events, serialize flash
//!   lifecycles, own the debounce → admission → render → reset deadlines.
//! - **ClickFence**: suppress flashes around deliberate pointer activity.
//! - **Settings**: forward-compatible configuration with validation.
//! - **Capability seams**: the [`host::GeometryProvider`] trait the runtime
//!   binds to the real editor.
//!
//! # How it fits in the system
//! `vcur-runtime` feeds host events into the scheduler and polls it; on a
//! render command it uses `vcur-render` to paint. All time enters through
//! explicit `now: Instant` parameters, so every state machine here is
//! deterministic under test.

pub mod config;
pub mod fence;
pub mod geometry;
pub mod host;
pub mod scheduler;
pub mod trigger;

pub use config::{CursorMode, CursorStyle, HighlightMode, Settings, SettingsError};
pub use fence::{ClickFence, FenceConfig};
pub use geometry::{PxPoint, PxRect};
pub use host::GeometryProvider;
pub use scheduler::{
    FlashCommand, FlashPhase, FlashScheduler, FlashState, GateRejection, SchedulerConfig,
    can_schedule_flash, gate_rejection,
};
pub use trigger::{ScrollSample, Trigger};
