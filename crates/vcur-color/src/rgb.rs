#![forbid(unsafe_code)]

//! The `Rgb` value type and color-spec parsing.
//!
//! A color spec is whatever the settings layer hands us: a `#rrggbb` hex
//! string or a CSS-style `rgb(r, g, b)` / `rgba(r, g, b, a)` expression
//! (alpha is parsed and discarded — flash opacity is carried separately by
//! the gradient). Unparseable input never fails: [`Rgb::resolve`] degrades
//! to [`FALLBACK_ACCENT`] so a typo in a settings file costs one wrong color
//! rather than a dead plugin.

/// The accent used when a color spec cannot be parsed.
///
/// `#8a5cf5` — the stock violet accent shipped with the plugin.
pub const FALLBACK_ACCENT: Rgb = Rgb::new(0x8a, 0x5c, 0xf5);

/// An 8-bit-per-channel RGB triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);

    /// Create a color from channel values.
    #[inline]
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a color spec strictly.
    ///
    /// Accepts `#rrggbb` (6 hex digits only — no shorthand, no alpha) and
    /// `rgb(r, g, b)` / `rgba(r, g, b, a)` with decimal channels in 0..=255.
    /// Returns `None` for anything else.
    #[must_use]
    pub fn parse(spec: &str) -> Option<Self> {
        let spec = spec.trim();
        if let Some(hex) = spec.strip_prefix('#') {
            return Self::parse_hex(hex);
        }
        if let Some(body) = strip_func(spec, "rgba") {
            return Self::parse_channels(body, true);
        }
        if let Some(body) = strip_func(spec, "rgb") {
            return Self::parse_channels(body, false);
        }
        None
    }

    /// Parse a color spec, degrading to [`FALLBACK_ACCENT`] on failure.
    #[must_use]
    pub fn resolve(spec: &str) -> Self {
        Self::parse(spec).unwrap_or_else(|| {
            tracing::debug!(spec, "unparseable color spec, using fallback accent");
            FALLBACK_ACCENT
        })
    }

    fn parse_hex(hex: &str) -> Option<Self> {
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
        Some(Self::new(r, g, b))
    }

    fn parse_channels(body: &str, with_alpha: bool) -> Option<Self> {
        let mut parts = body.split(',').map(str::trim);
        let r = parts.next()?.parse::<u8>().ok()?;
        let g = parts.next()?.parse::<u8>().ok()?;
        let b = parts.next()?.parse::<u8>().ok()?;
        if with_alpha {
            // Alpha must at least be a number, but its value is ignored.
            parts.next()?.parse::<f32>().ok()?;
        }
        if parts.next().is_some() {
            return None;
        }
        Some(Self::new(r, g, b))
    }
}

/// Strip `name(` ... `)` from a CSS-style function expression.
fn strip_func<'a>(spec: &'a str, name: &str) -> Option<&'a str> {
    spec.strip_prefix(name)?
        .trim_start()
        .strip_prefix('(')?
        .strip_suffix(')')
}
