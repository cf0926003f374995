//! Stacking order for popup layers.
//!
//! Each window takes one layer for its mask (when modal) and one for its
//! frame. The counter only grows, so a newer window always stacks above an
//! older one.

use std::cell::Cell;
use std::sync::atomic::{AtomicU32, Ordering};

/// First layer handed out when no floor has been configured.
pub const BASE_LAYER: u32 = 12345;

/// Source of stacking layers.
pub trait LayerAllocator {
    /// Raise the counter to `floor` if it is currently lower.
    fn raise_floor(&self, floor: u32);

    /// Take the next layer.
    fn allocate(&self) -> u32;

    /// The layer the next `allocate` would return.
    fn peek(&self) -> u32;
}

static GLOBAL_LAYER: AtomicU32 = AtomicU32::new(BASE_LAYER);

/// Process-wide allocator shared by every window.
#[derive(Debug, Clone, Copy, Default)]
pub struct GlobalLayers;

impl LayerAllocator for GlobalLayers {
    fn raise_floor(&self, floor: u32) {
        GLOBAL_LAYER.fetch_max(floor, Ordering::Relaxed);
    }

    fn allocate(&self) -> u32 {
        GLOBAL_LAYER.fetch_add(1, Ordering::Relaxed)
    }

    fn peek(&self) -> u32 {
        GLOBAL_LAYER.load(Ordering::Relaxed)
    }
}

/// Allocator owned by one caller, for isolated stacks and tests.
#[derive(Debug)]
pub struct LocalLayers {
    next: Cell<u32>,
}

impl LocalLayers {
    pub fn new(start: u32) -> Self {
        Self {
            next: Cell::new(start),
        }
    }
}

impl Default for LocalLayers {
    fn default() -> Self {
        Self::new(BASE_LAYER)
    }
}

impl LayerAllocator for LocalLayers {
    fn raise_floor(&self, floor: u32) {
        if floor > self.next.get() {
            self.next.set(floor);
        }
    }

    fn allocate(&self) -> u32 {
        let layer = self.next.get();
        self.next.set(layer + 1);
        layer
    }

    fn peek(&self) -> u32 {
        self.next.get()
    }
}

/// Layers taken by one window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layers {
    pub mask: Option<u32>,
    pub frame: u32,
}

/// Apply the optional floor, then take the mask layer (if modal) and the
/// frame layer, in that order.
pub fn allocate_layers(
    allocator: &dyn LayerAllocator,
    floor: Option<u32>,
    modal: bool,
) -> Layers {
    if let Some(floor) = floor {
        allocator.raise_floor(floor);
    }
    let mask = modal.then(|| allocator.allocate());
    let frame = allocator.allocate();
    Layers { mask, frame }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_below_frame() {
        let layers = LocalLayers::default();
        let first = allocate_layers(&layers, None, true);
        assert_eq!(first.mask, Some(12345));
        assert_eq!(first.frame, 12346);

        let second = allocate_layers(&layers, None, false);
        assert_eq!(second, Layers { mask: None, frame: 12347 });
    }

    #[test]
    fn test_floor_only_raises() {
        let layers = LocalLayers::default();
        let raised = allocate_layers(&layers, Some(20000), false);
        assert_eq!(raised.frame, 20000);

        let lower = allocate_layers(&layers, Some(100), true);
        assert_eq!(lower.mask, Some(20001));
        assert_eq!(layers.peek(), 20003);
    }

    #[test]
    fn test_global_is_monotonic() {
        let a = GlobalLayers.allocate();
        let b = GlobalLayers.allocate();
        assert!(b > a);
        assert!(a >= BASE_LAYER);
    }
}
