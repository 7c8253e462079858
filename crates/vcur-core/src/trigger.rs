#![forbid(unsafe_code)]

//! Trigger taxonomy: the events that may earn a flash.

/// Why a flash is being requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Trigger {
    /// The viewport scrolled (debounced before it reaches admission).
    Scroll,
    /// The active pane or file changed.
    ViewChange,
    /// The workspace layout changed (splits, sidebars, window resize).
    LayoutChange,
    /// A keyboard navigation jump (extended variant, heuristic-gated).
    KeyNavigation,
    /// A pointer click repositioned the cursor (extended variant).
    MouseClick,
}

impl Trigger {
    /// Whether this trigger ignores the click fence.
    ///
    /// Switching files or rearranging panes is itself click-driven; the
    /// flash IS the feedback for that click, so view and layout triggers
    /// pass through the fence. Everything else waits it out.
    #[inline]
    #[must_use]
    pub const fn bypasses_fence(self) -> bool {
        matches!(self, Trigger::ViewChange | Trigger::LayoutChange)
    }

    /// Stable name for logging.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Trigger::Scroll => "scroll",
            Trigger::ViewChange => "view-change",
            Trigger::LayoutChange => "layout-change",
            Trigger::KeyNavigation => "key-navigation",
            Trigger::MouseClick => "mouse-click",
        }
    }
}

/// One scroll event, reduced to the distance travelled.
///
/// `delta_px` is the absolute pixel distance since the previous scroll event
/// on the same surface. It selects the debounce duration; it never decides
/// admission.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollSample {
    pub delta_px: f64,
}

impl ScrollSample {
    #[inline]
    #[must_use]
    pub const fn new(delta_px: f64) -> Self {
        Self { delta_px }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_view_and_layout_bypass_the_fence() {
        assert!(Trigger::ViewChange.bypasses_fence());
        assert!(Trigger::LayoutChange.bypasses_fence());
        assert!(!Trigger::Scroll.bypasses_fence());
        assert!(!Trigger::KeyNavigation.bypasses_fence());
        assert!(!Trigger::MouseClick.bypasses_fence());
    }
}
