#![forbid(unsafe_code)]

//! Gradient construction for the line highlight.
//!
//! A gradient is a short list of stops over 0–100% of the line width. The
//! painter interpolates linearly between stops; opacity outside the stop
//! range clamps to the nearest end stop, which is always zero for the
//! fading ends.
//!
//! # Invariants
//!
//! 1. Stop offsets are within [0, 100] and non-decreasing.
//! 2. Peak opacity appears exactly once per gradient.
//! 3. Construction is pure: same inputs, same stops.

use vcur_color::Rgb;
use vcur_core::HighlightMode;

/// Character width as a fraction of font size.
///
/// A heuristic, not a glyph measurement — the host is not asked to shape
/// text just to size a highlight.
const CHAR_WIDTH_RATIO: f64 = 0.6;

/// Line height as a fraction of font size, when the host cannot measure it.
const LINE_HEIGHT_RATIO: f64 = 1.5;

/// Approximate width of one character cell in pixels.
#[inline]
#[must_use]
pub fn approx_char_width_px(font_size_px: f64) -> f64 {
    font_size_px * CHAR_WIDTH_RATIO
}

/// Overlay height to use when the host reports no line height.
#[inline]
#[must_use]
pub fn fallback_line_height_px(font_size_px: f64) -> f64 {
    font_size_px * LINE_HEIGHT_RATIO
}

/// Horizontal reach of the flash as a percentage of the editor width.
///
/// `flash_size_chars` character cells, sized by the width heuristic,
/// clamped to [0, 100]. A degenerate editor width yields a full-width
/// spread so the flash stays visible rather than collapsing.
#[must_use]
pub fn spread_percent(flash_size_chars: u32, font_size_px: f64, editor_width_px: f64) -> f64 {
    if editor_width_px <= 0.0 {
        return 100.0;
    }
    let reach_px = f64::from(flash_size_chars) * approx_char_width_px(font_size_px);
    (reach_px / editor_width_px * 100.0).clamp(0.0, 100.0)
}

/// One gradient stop: an offset along the line and an opacity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradientStop {
    /// Percentage of the line width, 0..=100.
    pub offset_pct: f64,
    pub opacity: f32,
}

impl GradientStop {
    #[inline]
    #[must_use]
    pub const fn new(offset_pct: f64, opacity: f32) -> Self {
        Self {
            offset_pct,
            opacity,
        }
    }
}

/// The color ramp painted across the cursor's line.
#[derive(Debug, Clone, PartialEq)]
pub struct LineGradient {
    pub color: Rgb,
    pub peak_opacity: f32,
    pub stops: Vec<GradientStop>,
}

impl LineGradient {
    /// Build the gradient for a highlight mode.
    ///
    /// `cursor_pct` is the cursor's horizontal position as a percentage of
    /// the line width (only `Centered` uses it); `spread_pct` is the reach
    /// from [`spread_percent`]. Returns `None` for [`HighlightMode::Off`].
    #[must_use]
    pub fn for_mode(
        mode: HighlightMode,
        color: Rgb,
        peak_opacity: f32,
        cursor_pct: f64,
        spread_pct: f64,
    ) -> Option<Self> {
        let spread = spread_pct.clamp(0.0, 100.0);
        let stops = match mode {
            HighlightMode::Off => return None,
            HighlightMode::Left => vec![
                GradientStop::new(0.0, peak_opacity),
                GradientStop::new(spread, 0.0),
            ],
            HighlightMode::Right => vec![
                GradientStop::new(100.0 - spread, 0.0),
                GradientStop::new(100.0, peak_opacity),
            ],
            HighlightMode::Centered => {
                let center = cursor_pct.clamp(0.0, 100.0);
                let half = spread / 2.0;
                let lead = (center - half).max(0.0);
                let tail = (center + half).min(100.0);
                // Zero-width ramps collapse at the line edges; the peak stop
                // must survive, so degenerate end stops are dropped.
                let mut stops = Vec::with_capacity(3);
                if lead < center {
                    stops.push(GradientStop::new(lead, 0.0));
                }
                stops.push(GradientStop::new(center, peak_opacity));
                if tail > center {
                    stops.push(GradientStop::new(tail, 0.0));
                }
                stops
            }
        };
        Some(Self {
            color,
            peak_opacity,
            stops,
        })
    }

    /// Opacity at a position along the line, interpolating between stops.
    ///
    /// Positions outside the stop range clamp to the nearest end stop.
    #[must_use]
    pub fn opacity_at(&self, pct: f64) -> f32 {
        let stops = &self.stops;
        match stops.first() {
            None => return 0.0,
            Some(first) if pct <= first.offset_pct => return first.opacity,
            Some(_) => {}
        }
        let last = stops[stops.len() - 1];
        if pct >= last.offset_pct {
            return last.opacity;
        }
        for pair in stops.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            if pct >= a.offset_pct && pct <= b.offset_pct {
                let span = b.offset_pct - a.offset_pct;
                if span <= f64::EPSILON {
                    return b.opacity;
                }
                let t = ((pct - a.offset_pct) / span) as f32;
                return a.opacity + (b.opacity - a.opacity) * t;
            }
        }
        0.0
    }
}
