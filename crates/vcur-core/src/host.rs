#![forbid(unsafe_code)]

//! Host capability seams.
//!
//! The host editor owns the document model, coordinate mapping, and
//! rendering surface. The plugin only ever asks narrow questions of it,
//! behind this trait, so the scheduling and rendering core carries zero
//! host dependency and tests run against fakes.

use crate::geometry::{PxPoint, PxRect};

/// Read-only geometry queries answered by the host editor view.
///
/// Geometry must be queried at render time, never cached from scheduling
/// time — the host may re-render between the two.
pub trait GeometryProvider {
    /// Screen coordinates of the primary cursor, or `None` when the view is
    /// unfocused or the position is invalid. A `None` silently aborts the
    /// current render attempt only; scheduler state is unaffected.
    fn cursor_position(&self) -> Option<PxPoint>;

    /// Pixel rectangle of the editor content area.
    fn editor_rect(&self) -> PxRect;

    /// Height of the cursor's line in pixels, when the host can measure it.
    fn line_height_px(&self) -> Option<f64>;

    /// Editor font size in pixels, for the character-width heuristic.
    fn font_size_px(&self) -> f64;
}
