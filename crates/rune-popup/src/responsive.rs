//! Fill-viewport mode.
//!
//! While fill is active the window tracks the viewport: every resize
//! notification marks a pending refit, and the owner commits it once the
//! debounce timer settles. Leaving fill restores the bounds saved on entry.

use crate::chrome::{ChromeConfig, fill_bounds};
use crate::geometry::{OuterBounds, Size};

/// Quiet period that coalesces a burst of viewport resizes.
pub const RESIZE_DEBOUNCE_MS: u64 = 10;

/// Maximum gap between two title clicks that counts as a double click.
pub const DOUBLE_CLICK_MS: u64 = 250;

#[derive(Debug, Clone)]
pub struct ResponsiveLayout {
    fill: bool,
    pending: bool,
    saved: Option<OuterBounds>,
    viewport: Size,
}

impl ResponsiveLayout {
    pub fn new(viewport: Size) -> Self {
        Self {
            fill: false,
            pending: false,
            saved: None,
            viewport,
        }
    }

    pub fn is_fill(&self) -> bool {
        self.fill
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    pub fn viewport(&self) -> Size {
        self.viewport
    }

    /// Bounds that will be restored when fill is left.
    pub fn saved_bounds(&self) -> Option<OuterBounds> {
        self.saved
    }

    /// Record a new viewport size.
    ///
    /// Returns true when fill is active and a debounced refit should be armed.
    pub fn viewport_changed(&mut self, viewport: Size) -> bool {
        self.viewport = viewport;
        if self.fill {
            self.pending = true;
        }
        self.fill
    }

    /// Consume the pending-refit marker.
    pub fn take_pending(&mut self) -> bool {
        std::mem::take(&mut self.pending) && self.fill
    }

    /// Enter fill, remembering `current` for the way back.
    pub fn enter_fill(&mut self, current: OuterBounds) {
        self.saved = Some(current);
        self.fill = true;
        self.pending = false;
    }

    /// Leave fill, returning the bounds saved on entry.
    pub fn exit_fill(&mut self) -> Option<OuterBounds> {
        self.fill = false;
        self.pending = false;
        self.saved.take()
    }

    /// A manual drag takes over the geometry: leave fill and forget the
    /// saved bounds. Returns whether fill was active.
    pub fn release_for_drag(&mut self) -> bool {
        let was_fill = self.fill;
        self.fill = false;
        self.pending = false;
        self.saved = None;
        was_fill
    }

    /// Bounds covering the current viewport.
    pub fn refit(&self, cfg: &ChromeConfig) -> OuterBounds {
        fill_bounds(cfg, self.viewport)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_mode_only_records_viewport() {
        let mut layout = ResponsiveLayout::new(Size::new(800, 600));
        assert!(!layout.viewport_changed(Size::new(1024, 768)));
        assert!(!layout.is_pending());
        assert_eq!(layout.viewport(), Size::new(1024, 768));
    }

    #[test]
    fn test_fill_round_trip() {
        let manual = OuterBounds::new(10, 20, 300, 200);
        let mut layout = ResponsiveLayout::new(Size::new(800, 600));

        layout.enter_fill(manual);
        assert!(layout.viewport_changed(Size::new(640, 480)));
        assert!(layout.take_pending());
        assert!(!layout.take_pending());
        assert_eq!(
            layout.refit(&ChromeConfig::default()),
            OuterBounds::new(0, 0, 640, 480)
        );

        assert_eq!(layout.exit_fill(), Some(manual));
        assert!(!layout.is_fill());
    }

    #[test]
    fn test_drag_clears_saved_bounds() {
        let mut layout = ResponsiveLayout::new(Size::new(800, 600));
        layout.enter_fill(OuterBounds::new(1, 1, 100, 100));
        layout.viewport_changed(Size::new(700, 500));

        assert!(layout.release_for_drag());
        assert!(!layout.is_pending());
        assert_eq!(layout.saved_bounds(), None);
        assert!(!layout.release_for_drag());
    }
}
