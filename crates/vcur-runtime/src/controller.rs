#![forbid(unsafe_code)]

//! The plugin controller.
//!
//! Owns the scheduler, the renderer, and the two host capabilities, and
//! maps host events onto them. Geometry is queried when a flash actually
//! renders, never when it is scheduled — the host may have re-rendered in
//! between.
//!
//! # Event flow
//!
//! ```text
//! host event ──▶ Controller::on_* ──▶ FlashScheduler
//! host tick  ──▶ Controller::tick ──▶ poll ──▶ render / clear
//! ```
//!
//! # Failure Modes
//!
//! - Host returns no cursor position at render time: that attempt is
//!   skipped with a debug log; scheduler state is untouched and the next
//!   trigger proceeds normally.
//! - Settings with out-of-range values: the caller is expected to run
//!   [`Settings::validate`] at load time; the controller does not re-check.

use std::collections::HashMap;

use web_time::{Duration, Instant};

use vcur_color::{ColorCache, Rgb, active_palette, pick_readable};
use vcur_core::config::{CursorMode, Settings};
use vcur_core::geometry::{PxPoint, PxRect};
use vcur_core::host::GeometryProvider;
use vcur_core::scheduler::{FlashCommand, FlashPhase, FlashScheduler};
use vcur_core::trigger::{ScrollSample, Trigger};
use vcur_render::gradient::{LineGradient, fallback_line_height_px, spread_percent};
use vcur_render::overlay::{FlashRenderer, OverlayPainter, OverlaySpec};

/// Host identifier for a scrollable surface.
pub type SurfaceId = u64;

/// Wires host events into the flash pipeline.
pub struct Controller<G: GeometryProvider, P: OverlayPainter> {
    settings: Settings,
    scheduler: FlashScheduler,
    renderer: FlashRenderer,
    geometry: G,
    painter: P,
    color_cache: ColorCache,
    /// Last seen scroll offset per surface, for delta computation.
    scroll_tops: HashMap<SurfaceId, f64>,
    /// When the user last clicked, for the key-navigation mute window.
    last_click_at: Option<Instant>,
    dark_mode: bool,
    marker_shown: bool,
    torn_down: bool,
}

impl<G: GeometryProvider, P: OverlayPainter> Controller<G, P> {
    #[must_use]
    pub fn new(settings: Settings, geometry: G, mut painter: P) -> Self {
        let scheduler = FlashScheduler::new(settings.scheduler_config());
        let marker_shown = settings.cursor_mode == CursorMode::Always;
        if marker_shown {
            painter.set_cursor_marker(Some(settings.cursor_style));
        }
        Self {
            settings,
            scheduler,
            renderer: FlashRenderer::new(),
            geometry,
            painter,
            color_cache: ColorCache::new(),
            scroll_tops: HashMap::new(),
            last_click_at: None,
            dark_mode: false,
            marker_shown,
            torn_down: false,
        }
    }

    /// The settings in effect.
    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Apply new settings. The scheduler picks up the new timing for
    /// subsequent flashes; the persistent marker is reconciled immediately.
    pub fn update_settings(&mut self, settings: Settings) {
        self.settings = settings;
        self.scheduler.set_config(self.settings.scheduler_config());
        self.sync_marker();
    }

    /// The host switched between light and dark themes.
    pub fn set_dark_mode(&mut self, dark_mode: bool) {
        self.dark_mode = dark_mode;
    }

    /// Current pipeline phase, for host-side diagnostics.
    #[must_use]
    pub fn phase(&self) -> FlashPhase {
        self.scheduler.phase()
    }

    /// Overlays painted and not yet removed.
    #[must_use]
    pub fn overlay_count(&self) -> usize {
        self.renderer.live_count()
    }

    /// The marker background and a readable foreground over it, for hosts
    /// whose block-style marker repaints the glyph underneath.
    pub fn marker_colors(&mut self) -> (Rgb, Rgb) {
        let accent = self.flash_color();
        let foreground = pick_readable(accent, &active_palette().readable_candidates);
        (accent, foreground)
    }

    // -- host events --------------------------------------------------------

    /// A scrollable surface reported a new vertical offset.
    ///
    /// The first report for a surface establishes its baseline and counts
    /// as a zero-distance sample, so a newly opened pane still flashes once
    /// its first scroll settles.
    pub fn on_scroll(&mut self, surface: SurfaceId, top_px: f64, now: Instant) {
        let delta = self
            .scroll_tops
            .insert(surface, top_px)
            .map_or(0.0, |prev| (top_px - prev).abs());
        if !self.settings.flash_on_scroll {
            return;
        }
        self.scheduler.on_scroll(ScrollSample::new(delta), now);
    }

    /// The active pane or file changed. The host settles focus and geometry
    /// before delivering this (double animation-frame delay on its side).
    pub fn on_active_view_changed(&mut self, now: Instant) -> bool {
        self.settings.flash_on_view_change && self.scheduler.request(Trigger::ViewChange, now)
    }

    /// The workspace layout changed.
    pub fn on_layout_changed(&mut self, now: Instant) -> bool {
        self.settings.flash_on_view_change && self.scheduler.request(Trigger::LayoutChange, now)
    }

    /// Pointer events, captured at the window level in the capture phase.
    pub fn on_pointer_down(&mut self) {
        self.scheduler.on_pointer_down();
    }

    pub fn on_pointer_up(&mut self, now: Instant) {
        self.scheduler.on_pointer_up(now);
    }

    pub fn on_pointer_cancel(&mut self, now: Instant) {
        self.scheduler.on_pointer_cancel(now);
    }

    pub fn on_click(&mut self, now: Instant) {
        self.scheduler.on_click(now);
        self.last_click_at = Some(now);
    }

    /// The cursor jumped via keyboard navigation.
    ///
    /// Heuristic-gated: only jumps of at least `key_jump_threshold_px`
    /// flash, and clicks mute this trigger for `ambient_mute_ms` — the
    /// cursor motion right after a click is the click's own doing.
    pub fn on_key_navigation(&mut self, from: PxPoint, to: PxPoint, now: Instant) -> bool {
        if !self.settings.flash_on_key_navigation {
            return false;
        }
        if self
            .last_click_at
            .is_some_and(|at| now.duration_since(at) < self.settings.ambient_mute())
        {
            tracing::trace!("key navigation muted after click");
            return false;
        }
        if from.distance_to(to) < self.settings.key_jump_threshold_px {
            return false;
        }
        self.scheduler.request(Trigger::KeyNavigation, now)
    }

    // -- pipeline -----------------------------------------------------------

    /// Drive the pipeline. Call from the host's frame or timer loop.
    pub fn tick(&mut self, now: Instant) {
        for command in self.scheduler.poll(now) {
            match command {
                FlashCommand::Render => self.render_flash(now),
                FlashCommand::Clear => self.on_flash_ended(),
            }
        }
        self.renderer.poll(now, &mut self.painter);
    }

    /// Cancel every timer and remove in-flight visuals synchronously.
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        self.torn_down = true;
        self.scheduler.cancel_all();
        self.renderer.clear_all(&mut self.painter);
        if self.marker_shown {
            self.painter.set_cursor_marker(None);
            self.marker_shown = false;
        }
        tracing::debug!("controller torn down");
    }

    // -- internals ----------------------------------------------------------

    fn render_flash(&mut self, now: Instant) {
        // Geometry is read here, at render time, not at admission time.
        let Some(cursor) = self.geometry.cursor_position() else {
            tracing::debug!("cursor geometry unavailable, skipping this flash");
            return;
        };
        let editor = self.geometry.editor_rect();
        let font_size = self.geometry.font_size_px();
        let line_height = self
            .geometry
            .line_height_px()
            .unwrap_or_else(|| fallback_line_height_px(font_size));

        let gradient = LineGradient::for_mode(
            self.settings.line_highlight_mode,
            self.flash_color(),
            self.settings.flash_opacity,
            editor.x_percent(cursor.x),
            spread_percent(self.settings.flash_size_chars, font_size, editor.width),
        );
        if let Some(gradient) = gradient {
            let spec = OverlaySpec {
                rect: PxRect::new(editor.x, cursor.y, editor.width, line_height),
                gradient,
                duration: Duration::from_millis(self.settings.flash_duration_ms),
            };
            self.renderer.render(&spec, now, &mut self.painter);
        }

        if self.settings.cursor_mode != CursorMode::Off && !self.marker_shown {
            self.painter.set_cursor_marker(Some(self.settings.cursor_style));
            self.marker_shown = true;
        }
    }

    fn on_flash_ended(&mut self) {
        if self.settings.cursor_mode == CursorMode::Flash && self.marker_shown {
            self.painter.set_cursor_marker(None);
            self.marker_shown = false;
        }
    }

    fn flash_color(&mut self) -> Rgb {
        if self.settings.use_theme_colors {
            active_palette().accent.resolve(self.dark_mode)
        } else {
            let spec = if self.dark_mode {
                &self.settings.custom_color_dark
            } else {
                &self.settings.custom_color_light
            };
            self.color_cache.resolve(spec)
        }
    }

    /// Reconcile the persistent marker with the current settings and phase.
    fn sync_marker(&mut self) {
        let wanted = match self.settings.cursor_mode {
            CursorMode::Always => true,
            CursorMode::Flash => self.scheduler.phase() == FlashPhase::Active,
            CursorMode::Off => false,
        };
        if wanted && !self.marker_shown {
            self.painter.set_cursor_marker(Some(self.settings.cursor_style));
            self.marker_shown = true;
        } else if !wanted && self.marker_shown {
            self.painter.set_cursor_marker(None);
            self.marker_shown = false;
        }
    }
}

impl<G: GeometryProvider, P: OverlayPainter> Drop for Controller<G, P> {
    fn drop(&mut self) {
        // Host unload without an explicit teardown still cleans up.
        self.teardown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    use vcur_core::config::CursorStyle;
    use vcur_core::geometry::PxRect;
    use vcur_render::overlay::OverlayId;

    #[derive(Debug, Clone)]
    struct FakeGeometry {
        cursor: Option<PxPoint>,
    }

    impl GeometryProvider for FakeGeometry {
        fn cursor_position(&self) -> Option<PxPoint> {
            self.cursor
        }

        fn editor_rect(&self) -> PxRect {
            PxRect::new(0.0, 0.0, 800.0, 600.0)
        }

        fn line_height_px(&self) -> Option<f64> {
            Some(24.0)
        }

        fn font_size_px(&self) -> f64 {
            16.0
        }
    }

    #[derive(Debug, Default)]
    struct PainterLog {
        next_id: u64,
        painted: Vec<OverlaySpec>,
        removed: Vec<OverlayId>,
        marker: Option<CursorStyle>,
    }

    #[derive(Clone, Default)]
    struct SharedPainter(Rc<RefCell<PainterLog>>);

    impl OverlayPainter for SharedPainter {
        fn paint(&mut self, spec: &OverlaySpec) -> OverlayId {
            let mut log = self.0.borrow_mut();
            let id = OverlayId(log.next_id);
            log.next_id += 1;
            log.painted.push(spec.clone());
            id
        }

        fn remove(&mut self, id: OverlayId) {
            self.0.borrow_mut().removed.push(id);
        }

        fn set_cursor_marker(&mut self, marker: Option<CursorStyle>) {
            self.0.borrow_mut().marker = marker;
        }
    }

    fn controller(
        settings: Settings,
        cursor: Option<PxPoint>,
    ) -> (Controller<FakeGeometry, SharedPainter>, SharedPainter) {
        let painter = SharedPainter::default();
        let ctrl = Controller::new(settings, FakeGeometry { cursor }, painter.clone());
        (ctrl, painter)
    }

    #[test]
    fn flash_color_prefers_custom_when_theme_is_off() {
        let mut settings = Settings::default();
        settings.use_theme_colors = false;
        settings.custom_color_light = "#112233".to_owned();
        settings.custom_color_dark = "#445566".to_owned();
        let (mut ctrl, _painter) = controller(settings, Some(PxPoint::new(0.0, 0.0)));

        assert_eq!(ctrl.flash_color(), Rgb::new(0x11, 0x22, 0x33));
        ctrl.set_dark_mode(true);
        assert_eq!(ctrl.flash_color(), Rgb::new(0x44, 0x55, 0x66));
    }

    #[test]
    fn marker_colors_pair_accent_with_readable_foreground() {
        let mut settings = Settings::default();
        settings.use_theme_colors = false;
        settings.custom_color_dark = "#101018".to_owned();
        let (mut ctrl, _painter) = controller(settings, Some(PxPoint::new(0.0, 0.0)));
        ctrl.set_dark_mode(true);

        let (accent, foreground) = ctrl.marker_colors();
        assert_eq!(accent, Rgb::new(0x10, 0x10, 0x18));
        // Near-black marker: the glyph over it must come back light.
        assert_eq!(foreground, Rgb::WHITE);
    }

    #[test]
    fn always_mode_shows_marker_from_construction() {
        let mut settings = Settings::default();
        settings.cursor_mode = CursorMode::Always;
        settings.cursor_style = CursorStyle::Bar;
        let (ctrl, painter) = controller(settings, None);

        assert_eq!(painter.0.borrow().marker, Some(CursorStyle::Bar));
        drop(ctrl);
        assert_eq!(painter.0.borrow().marker, None);
    }

    #[test]
    fn scroll_baseline_is_established_on_first_report() {
        let settings = Settings::default();
        let (mut ctrl, _painter) = controller(settings, Some(PxPoint::new(10.0, 10.0)));
        let t0 = Instant::now();

        ctrl.on_scroll(7, 500.0, t0);
        // First report: zero delta, slow debounce. Nothing at +200ms.
        ctrl.tick(t0 + Duration::from_millis(200));
        assert_eq!(ctrl.phase(), FlashPhase::Debouncing);

        // Second report 480px away: fast debounce from here.
        ctrl.on_scroll(7, 980.0, t0 + Duration::from_millis(210));
        ctrl.tick(t0 + Duration::from_millis(360));
        assert_eq!(ctrl.phase(), FlashPhase::Pending);
    }

    #[test]
    fn key_navigation_respects_threshold_and_mute() {
        let mut settings = Settings::default();
        settings.flash_on_key_navigation = true;
        let (mut ctrl, _painter) = controller(settings, Some(PxPoint::new(10.0, 10.0)));
        let t0 = Instant::now();

        let near = PxPoint::new(0.0, 150.0);
        let far = PxPoint::new(0.0, 400.0);
        let origin = PxPoint::new(0.0, 0.0);

        assert!(!ctrl.on_key_navigation(origin, near, t0));
        assert!(ctrl.on_key_navigation(origin, far, t0));

        // Within the mute window after a click, even a far jump stays quiet.
        let t1 = t0 + Duration::from_secs(5);
        ctrl.tick(t1); // renders the flash admitted above
        ctrl.on_click(t1);
        assert!(!ctrl.on_key_navigation(origin, far, t1 + Duration::from_millis(200)));

        // Mute expired, fence dropped, and the flash cleared at +600ms.
        ctrl.tick(t1 + Duration::from_millis(700));
        assert!(ctrl.on_key_navigation(origin, far, t1 + Duration::from_millis(700)));
    }

    #[test]
    fn disabled_scroll_flash_still_tracks_baselines() {
        let mut settings = Settings::default();
        settings.flash_on_scroll = false;
        let (mut ctrl, _painter) = controller(settings, Some(PxPoint::new(10.0, 10.0)));
        let t0 = Instant::now();

        ctrl.on_scroll(1, 100.0, t0);
        ctrl.tick(t0 + Duration::from_secs(1));
        assert_eq!(ctrl.phase(), FlashPhase::Idle);
        assert_eq!(ctrl.overlay_count(), 0);
    }
}
