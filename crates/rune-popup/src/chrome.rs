//! Chrome metrics: the box model that maps content size to window bounds.
//!
//! A window is laid out from the outside in:
//!
//! ```text
//! shadow ring | border | title bar (+1px separator) | padding | content | padding | border | shadow ring
//! ```
//!
//! [`compute_outer_bounds`] adds the insets to a requested content size and
//! clamps the result against the viewport; [`compute_inner_size`] subtracts
//! them again. The two are exact inverses on the clamped size.

use rune_config::PopupConfig;
use tracing::warn;

use crate::error::{PopupError, Result};
use crate::geometry::{ContentSize, OuterBounds, Placement, Size};

/// Viewport fraction used for an auto-sized content dimension.
pub const AUTO_FRACTION: f64 = 0.8;

/// Viewport fraction used for auto sizes when the window is fill-capable.
pub const FILL_AUTO_FRACTION: f64 = 0.5;

/// Largest fraction of the viewport a window may cover.
pub const MAX_VIEWPORT_FRACTION: f64 = 0.95;

/// Height of the rule between title bar and body.
pub const TITLE_SEPARATOR: i32 = 1;

/// Immutable chrome metrics of one window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChromeConfig {
    pub border_width: i32,
    pub border_radius: i32,
    pub shadow_ring: i32,
    pub padding: i32,
    pub title_height: i32,
    pub close_image_size: Size,
    /// The zoom toggle sits next to the close icon and doubles its share of
    /// the minimum width.
    pub zoom_button: bool,
    /// Fraction of the viewport substituted for auto content dimensions.
    pub auto_fraction: f64,
}

impl Default for ChromeConfig {
    fn default() -> Self {
        Self {
            border_width: 1,
            border_radius: 4,
            shadow_ring: 5,
            padding: 2,
            title_height: 24,
            close_image_size: Size::new(16, 16),
            zoom_button: true,
            auto_fraction: AUTO_FRACTION,
        }
    }
}

impl ChromeConfig {
    /// Build and validate the chrome metrics from popup options.
    pub fn from_popup(options: &PopupConfig) -> Result<Self> {
        let chrome = Self {
            border_width: options.border_width,
            border_radius: options.border_radius,
            shadow_ring: options.border_shadow_ring,
            padding: options.padding,
            title_height: options.title_height,
            close_image_size: Size::new(
                options.close_image_size.width,
                options.close_image_size.height,
            ),
            zoom_button: options.zoom_button,
            auto_fraction: if options.fill_mode {
                FILL_AUTO_FRACTION
            } else {
                AUTO_FRACTION
            },
        };
        chrome.validate()?;
        Ok(chrome)
    }

    /// Reject metrics that cannot produce a sane layout.
    ///
    /// An odd title height is accepted but logged: the icon padding
    /// `(title_height - icon_height) / 2` no longer splits evenly.
    pub fn validate(&self) -> Result<()> {
        let metrics = [
            ("border_width", self.border_width),
            ("border_radius", self.border_radius),
            ("shadow_ring", self.shadow_ring),
            ("padding", self.padding),
            ("title_height", self.title_height),
            ("close_image_width", self.close_image_size.width),
            ("close_image_height", self.close_image_size.height),
        ];
        for (name, value) in metrics {
            if value < 0 {
                return Err(PopupError::NegativeMetric { name, value });
            }
        }

        if self.title_height < self.close_image_size.height {
            return Err(PopupError::TitleTooShort {
                title_height: self.title_height,
                icon_height: self.close_image_size.height,
            });
        }

        if self.title_height % 2 != 0 {
            warn!(
                "title height {} is odd; close icon padding will be uneven",
                self.title_height
            );
        }

        Ok(())
    }

    /// Ring + border + padding on one side.
    pub fn side_inset(&self) -> i32 {
        self.shadow_ring + self.border_width + self.padding
    }

    /// Total horizontal chrome (both sides).
    pub fn horizontal_inset(&self) -> i32 {
        2 * self.side_inset()
    }

    /// Total vertical chrome: both sides plus title bar and separator.
    pub fn vertical_inset(&self) -> i32 {
        2 * self.side_inset() + self.title_height + TITLE_SEPARATOR
    }

    /// Narrowest outer width that still fits the title bar icons.
    pub fn min_outer_width(&self) -> i32 {
        let icons = if self.zoom_button { 2 } else { 1 };
        self.close_image_size.width * icons + self.horizontal_inset()
    }

    /// Outer height of a window collapsed to its title bar.
    pub fn collapsed_height(&self) -> i32 {
        self.title_height + 2 * (self.shadow_ring + self.border_width)
    }
}

fn viewport_fraction(length: i32, fraction: f64) -> i32 {
    (length as f64 * fraction).floor() as i32
}

fn resolve_dimension(requested: Option<i32>, viewport: i32, fraction: f64) -> i32 {
    match requested {
        Some(value) if value >= 0 => value,
        _ => viewport_fraction(viewport, fraction),
    }
}

/// Derive the outer window bounds for a requested content size.
///
/// Auto or negative dimensions take `cfg.auto_fraction` of the viewport.
/// The width is clamped to `[min_outer_width, 95% of viewport]` with the
/// minimum taking precedence; the height is capped at 95% of the viewport but
/// never below the chrome itself. Missing placement components center the
/// window.
pub fn compute_outer_bounds(
    content: ContentSize,
    cfg: &ChromeConfig,
    viewport: Size,
    placement: Placement,
) -> OuterBounds {
    let content_width = resolve_dimension(content.width, viewport.width, cfg.auto_fraction);
    let content_height = resolve_dimension(content.height, viewport.height, cfg.auto_fraction);

    let width = (content_width + cfg.horizontal_inset())
        .min(viewport_fraction(viewport.width, MAX_VIEWPORT_FRACTION))
        .max(cfg.min_outer_width());
    let height = (content_height + cfg.vertical_inset())
        .min(viewport_fraction(viewport.height, MAX_VIEWPORT_FRACTION))
        .max(cfg.vertical_inset());

    let top = placement
        .top
        .unwrap_or_else(|| (viewport.height - height) / 2);
    let left = placement.left.unwrap_or_else(|| (viewport.width - width) / 2);

    OuterBounds::new(top, left, width, height)
}

/// Content size left inside `outer` once the chrome is removed.
pub fn compute_inner_size(outer: &OuterBounds, cfg: &ChromeConfig) -> Size {
    Size::new(
        outer.width - cfg.horizontal_inset(),
        outer.height - cfg.vertical_inset(),
    )
}

/// Outer height of a window collapsed to its title bar.
pub fn collapsed_height(cfg: &ChromeConfig) -> i32 {
    cfg.collapsed_height()
}

/// Visible frame size: the outer size without the shadow ring.
pub fn frame_size(outer: &OuterBounds, cfg: &ChromeConfig) -> Size {
    Size::new(
        outer.width - 2 * cfg.shadow_ring,
        outer.height - 2 * cfg.shadow_ring,
    )
}

/// Bounds covering the whole viewport, widened to the minimum chrome width
/// when the viewport is narrower than that.
pub fn fill_bounds(cfg: &ChromeConfig, viewport: Size) -> OuterBounds {
    OuterBounds::new(
        0,
        0,
        viewport.width.max(cfg.min_outer_width()),
        viewport.height.max(cfg.vertical_inset()),
    )
}
