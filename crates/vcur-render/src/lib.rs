#![forbid(unsafe_code)]

//! Flash rendering: gradients and overlay lifecycle.
//!
//! # Role in Visible Cursor
//! `vcur-render` turns an admitted flash into pixels-adjacent data: a
//! gradient shaped by the highlight mode, positioned by host geometry, and
//! painted through the [`OverlayPainter`] capability. It never decides
//! *whether* to flash — that is `vcur-core`'s job — only *how*.
//!
//! # This crate provides
//! - [`LineGradient`] stop construction for left/right/centered modes.
//! - The character-width and line-height heuristics used when the host
//!   cannot measure glyphs.
//! - [`FlashRenderer`], which paints overlays and removes each one when its
//!   duration elapses — fire-and-forget from the caller's side.
//!
//! # How it fits in the system
//! `vcur-runtime` calls [`FlashRenderer::render`] when the scheduler emits a
//! render command and [`FlashRenderer::poll`] on every tick. Whether a flash
//! is logically active is tracked by the scheduler, not here; this crate
//! only tracks which overlays still need removing.

pub mod gradient;
pub mod overlay;

pub use gradient::{
    GradientStop, LineGradient, approx_char_width_px, fallback_line_height_px, spread_percent,
};
pub use overlay::{FlashRenderer, OverlayId, OverlayPainter, OverlaySpec};
