#![forbid(unsafe_code)]

//! Accent palette: light/dark adaptive colors and the active-palette slot.
//!
//! The host tells the settings layer which theme mode is in effect and what
//! the theme accent currently is; the settings layer publishes that here via
//! [`set_active_palette`]. Readers (one per flash) load the palette
//! lock-free through `arc-swap`, so a theme change mid-session never blocks
//! the UI thread.

use std::sync::{Arc, OnceLock};

use ahash::AHashMap;
use arc_swap::ArcSwap;

use crate::rgb::{FALLBACK_ACCENT, Rgb};

/// A color pair resolved by theme mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdaptiveColor {
    pub light: Rgb,
    pub dark: Rgb,
}

impl AdaptiveColor {
    /// A pair with distinct light/dark values.
    #[must_use]
    pub const fn adaptive(light: Rgb, dark: Rgb) -> Self {
        Self { light, dark }
    }

    /// A pair that ignores theme mode.
    #[must_use]
    pub const fn uniform(color: Rgb) -> Self {
        Self {
            light: color,
            dark: color,
        }
    }

    /// Resolve for the given mode.
    #[inline]
    #[must_use]
    pub const fn resolve(&self, dark_mode: bool) -> Rgb {
        if dark_mode { self.dark } else { self.light }
    }
}

impl From<Rgb> for AdaptiveColor {
    fn from(color: Rgb) -> Self {
        Self::uniform(color)
    }
}

/// The accent colors in effect for the current host theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccentPalette {
    /// The theme accent used for flashes when the user has not overridden it.
    pub accent: AdaptiveColor,
    /// Foreground candidates for content painted over the accent, in
    /// priority order for [`pick_readable`](crate::contrast::pick_readable).
    pub readable_candidates: [Rgb; 2],
}

impl AccentPalette {
    /// Foreground to paint over the accent, e.g. the glyph under a
    /// block-style cursor marker.
    #[must_use]
    pub fn on_accent(&self, dark_mode: bool) -> Rgb {
        crate::contrast::pick_readable(self.accent.resolve(dark_mode), &self.readable_candidates)
    }
}

impl Default for AccentPalette {
    fn default() -> Self {
        Self {
            accent: AdaptiveColor::uniform(FALLBACK_ACCENT),
            readable_candidates: [Rgb::WHITE, Rgb::BLACK],
        }
    }
}

fn palette_slot() -> &'static ArcSwap<AccentPalette> {
    static SLOT: OnceLock<ArcSwap<AccentPalette>> = OnceLock::new();
    SLOT.get_or_init(|| ArcSwap::from_pointee(AccentPalette::default()))
}

/// Publish a new active palette (host theme changed).
pub fn set_active_palette(palette: AccentPalette) {
    tracing::debug!(?palette, "accent palette updated");
    palette_slot().store(Arc::new(palette));
}

/// The palette currently in effect.
#[must_use]
pub fn active_palette() -> Arc<AccentPalette> {
    palette_slot().load_full()
}

/// Memoizes color-spec parses.
///
/// Settings strings are re-resolved on every flash; the cache keeps that a
/// map lookup. Entries are never invalidated — a spec string always parses
/// to the same color.
#[derive(Debug, Default)]
pub struct ColorCache {
    parsed: AHashMap<String, Rgb>,
}

impl ColorCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve `spec` through the cache, falling back like [`Rgb::resolve`].
    pub fn resolve(&mut self, spec: &str) -> Rgb {
        if let Some(&color) = self.parsed.get(spec) {
            return color;
        }
        let color = Rgb::resolve(spec);
        self.parsed.insert(spec.to_owned(), color);
        color
    }

    /// Number of memoized specs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.parsed.len()
    }

    /// Whether the cache is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.parsed.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adaptive_resolves_by_mode() {
        let pair = AdaptiveColor::adaptive(Rgb::new(1, 2, 3), Rgb::new(4, 5, 6));
        assert_eq!(pair.resolve(false), Rgb::new(1, 2, 3));
        assert_eq!(pair.resolve(true), Rgb::new(4, 5, 6));
    }

    #[test]
    fn uniform_ignores_mode() {
        let pair = AdaptiveColor::uniform(FALLBACK_ACCENT);
        assert_eq!(pair.resolve(false), pair.resolve(true));
    }

    #[test]
    fn palette_swap_is_observed() {
        let before = active_palette();
        assert_eq!(before.accent.resolve(true), before.accent.resolve(true));

        set_active_palette(AccentPalette {
            accent: AdaptiveColor::adaptive(Rgb::new(10, 10, 10), Rgb::new(20, 20, 20)),
            readable_candidates: [Rgb::BLACK, Rgb::WHITE],
        });
        let after = active_palette();
        assert_eq!(after.accent.resolve(false), Rgb::new(10, 10, 10));
        assert_eq!(after.accent.resolve(true), Rgb::new(20, 20, 20));

        // Restore the default so other tests see a known palette.
        set_active_palette(AccentPalette::default());
    }

    #[test]
    fn on_accent_is_readable_over_the_accent() {
        let palette = AccentPalette::default();
        let fg = palette.on_accent(true);
        // The violet fallback accent is mid-dark; white wins.
        assert_eq!(fg, Rgb::WHITE);
        assert!(crate::contrast::contrast_ratio(fg, palette.accent.resolve(true)) > 1.5);
    }

    #[test]
    fn cache_memoizes_and_falls_back() {
        let mut cache = ColorCache::new();
        assert!(cache.is_empty());
        assert_eq!(cache.resolve("#123456"), Rgb::new(0x12, 0x34, 0x56));
        assert_eq!(cache.resolve("#123456"), Rgb::new(0x12, 0x34, 0x56));
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.resolve("bogus"), FALLBACK_ACCENT);
        assert_eq!(cache.len(), 2);
    }
}
