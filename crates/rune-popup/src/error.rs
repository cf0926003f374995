//! Error types for popup construction.

use thiserror::Error;

/// Result type for popup operations.
pub type Result<T> = std::result::Result<T, PopupError>;

/// Errors raised when a popup cannot be built from its options.
///
/// Interactive operations never fail; only construction validates.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PopupError {
    /// A chrome metric was negative.
    #[error("{name} must be non-negative, got {value}")]
    NegativeMetric { name: &'static str, value: i32 },

    /// The title bar cannot hold the close icon.
    #[error("title height {title_height}px is shorter than the close icon ({icon_height}px)")]
    TitleTooShort { title_height: i32, icon_height: i32 },

    /// An opacity option was outside 0..=100.
    #[error("{name} must be within 0..=100, got {value}")]
    OpacityOutOfRange { name: &'static str, value: i32 },

    /// The host viewport has no area.
    #[error("viewport must have a positive size, got {width}x{height}")]
    InvalidViewport { width: i32, height: i32 },
}
