#![forbid(unsafe_code)]

//! Color primitives for Visible Cursor.
//!
//! # Role in Visible Cursor
//! `vcur-color` is the shared vocabulary for flash colors. The renderer and
//! runtime use these types to pick a visible, readable highlight without
//! dragging in scheduling or host dependencies.
//!
//! # This crate provides
//! - [`Rgb`] with strict parsing and a documented fallback accent.
//! - WCAG contrast utilities: luminance, contrast ratio, AA/AAA thresholds,
//!   and readable-candidate selection.
//! - [`AdaptiveColor`] light/dark pairs and a process-wide [`AccentPalette`]
//!   the settings layer swaps when the host theme changes.
//! - [`ColorCache`] memoizing spec-string parses.
//!
//! # How it fits in the system
//! `vcur-render` resolves one color per flash through this crate, and
//! `vcur-runtime` decides between the host theme accent and the user's
//! custom colors. Everything here is pure and deterministic; nothing touches
//! the clock or the host.

pub mod contrast;
pub mod palette;
pub mod rgb;

pub use contrast::{
    // WCAG constants
    WCAG_AA_LARGE_TEXT,
    WCAG_AA_NORMAL_TEXT,
    WCAG_AAA_LARGE_TEXT,
    WCAG_AAA_NORMAL_TEXT,
    // WCAG contrast utilities
    contrast_ratio,
    meets_wcag_aa,
    pick_readable,
    relative_luminance,
    srgb_to_linear,
};
pub use palette::{AccentPalette, AdaptiveColor, ColorCache, active_palette, set_active_palette};
pub use rgb::{FALLBACK_ACCENT, Rgb};
