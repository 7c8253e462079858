#![forbid(unsafe_code)]

//! WCAG 2.x contrast math.
//!
//! Relative luminance and contrast ratio follow the WCAG definition:
//! channels are linearized (`c <= 0.03928 ? c / 12.92 :
//! ((c + 0.055) / 1.055)^2.4`), weighted `0.2126 R + 0.7152 G + 0.0722 B`,
//! and the ratio is `(lighter + 0.05) / (darker + 0.05)`. The ratio is
//! symmetric in its arguments and ranges from 1.0 (identical) to 21.0
//! (black on white).

use crate::rgb::Rgb;

/// Minimum ratio for normal text at AA.
pub const WCAG_AA_NORMAL_TEXT: f64 = 4.5;
/// Minimum ratio for large text at AA.
pub const WCAG_AA_LARGE_TEXT: f64 = 3.0;
/// Minimum ratio for normal text at AAA.
pub const WCAG_AAA_NORMAL_TEXT: f64 = 7.0;
/// Minimum ratio for large text at AAA.
pub const WCAG_AAA_LARGE_TEXT: f64 = 4.5;

/// Linearize one sRGB channel given in 0.0..=1.0.
#[must_use]
pub fn srgb_to_linear(c: f64) -> f64 {
    if c <= 0.03928 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// WCAG relative luminance, 0.0 (black) to 1.0 (white).
#[must_use]
pub fn relative_luminance(color: Rgb) -> f64 {
    let r = srgb_to_linear(f64::from(color.r) / 255.0);
    let g = srgb_to_linear(f64::from(color.g) / 255.0);
    let b = srgb_to_linear(f64::from(color.b) / 255.0);
    0.2126 * r + 0.7152 * g + 0.0722 * b
}

/// WCAG contrast ratio between two colors, in 1.0..=21.0.
#[must_use]
pub fn contrast_ratio(a: Rgb, b: Rgb) -> f64 {
    let lum_a = relative_luminance(a);
    let lum_b = relative_luminance(b);
    let lighter = lum_a.max(lum_b);
    let darker = lum_a.min(lum_b);
    (lighter + 0.05) / (darker + 0.05)
}

/// Whether `fg` on `bg` meets AA for normal text.
#[must_use]
pub fn meets_wcag_aa(fg: Rgb, bg: Rgb) -> bool {
    contrast_ratio(fg, bg) >= WCAG_AA_NORMAL_TEXT
}

/// Pick the candidate with the highest contrast against `background`.
///
/// Ties keep the earliest candidate, so callers encode priority by order.
///
/// # Panics
///
/// Panics if `candidates` is empty.
#[must_use]
pub fn pick_readable(background: Rgb, candidates: &[Rgb]) -> Rgb {
    let mut best = candidates[0];
    let mut best_ratio = contrast_ratio(best, background);
    for &candidate in candidates.iter().skip(1) {
        let ratio = contrast_ratio(candidate, background);
        if ratio > best_ratio {
            best = candidate;
            best_ratio = ratio;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn luminance_extremes() {
        assert!(relative_luminance(Rgb::BLACK) < 1e-9);
        assert!((relative_luminance(Rgb::WHITE) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn black_on_white_is_21() {
        assert!((contrast_ratio(Rgb::BLACK, Rgb::WHITE) - 21.0).abs() < 0.01);
    }

    #[test]
    fn identical_colors_ratio_one() {
        let c = Rgb::new(120, 40, 200);
        assert!((contrast_ratio(c, c) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn ratio_is_symmetric() {
        let a = Rgb::new(10, 200, 50);
        let b = Rgb::new(240, 12, 120);
        assert_eq!(contrast_ratio(a, b), contrast_ratio(b, a));
    }

    #[test]
    fn aa_threshold() {
        assert!(meets_wcag_aa(Rgb::BLACK, Rgb::WHITE));
        assert!(!meets_wcag_aa(Rgb::new(119, 119, 119), Rgb::new(136, 136, 136)));
    }

    #[test]
    fn pick_readable_prefers_higher_contrast() {
        let on_dark = pick_readable(Rgb::new(20, 20, 30), &[Rgb::BLACK, Rgb::WHITE]);
        assert_eq!(on_dark, Rgb::WHITE);
        let on_light = pick_readable(Rgb::new(245, 245, 240), &[Rgb::BLACK, Rgb::WHITE]);
        assert_eq!(on_light, Rgb::BLACK);
    }

    #[test]
    fn pick_readable_ties_keep_first() {
        let bg = Rgb::new(128, 128, 128);
        let c = Rgb::new(5, 5, 5);
        // Identical candidates tie exactly; the first listed must win.
        assert_eq!(pick_readable(bg, &[c, c]), c);
    }
}
