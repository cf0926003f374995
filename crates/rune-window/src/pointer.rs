//! Pointer hit-testing and drag tracking against a popup's chrome.

use rune_popup::{ChromeConfig, ElementName, HandleId, OuterBounds, Point};

/// Find the popup element under viewport point (x, y).
///
/// `visible_height` is the clipped frame height (the collapsed height while
/// collapsed). The shadow ring is split into corner cells of ring x ring
/// pixels and the four edges between them; the title bar holds the zoom
/// toggle on the left and the close icon on the right.
pub fn hit_test(
    bounds: &OuterBounds,
    chrome: &ChromeConfig,
    zoom_button: bool,
    visible_height: i32,
    x: i32,
    y: i32,
) -> Option<ElementName> {
    let visible = OuterBounds {
        height: visible_height,
        ..*bounds
    };
    if !visible.contains(x, y) {
        return None;
    }

    let lx = x - visible.left;
    let ly = y - visible.top;
    let ring = chrome.shadow_ring;

    let on_left = lx < ring;
    let on_right = lx >= visible.width - ring;
    let on_top = ly < ring;
    let on_bottom = ly >= visible.height - ring;

    let handle = match (on_left, on_right, on_top, on_bottom) {
        (true, _, true, _) => Some(HandleId::LeftTop),
        (_, true, true, _) => Some(HandleId::RightTop),
        (true, _, _, true) => Some(HandleId::LeftBottom),
        (_, true, _, true) => Some(HandleId::RightBottom),
        (_, _, true, _) => Some(HandleId::Top),
        (_, _, _, true) => Some(HandleId::Bottom),
        (true, _, _, _) => Some(HandleId::Left),
        (_, true, _, _) => Some(HandleId::Right),
        _ => None,
    };
    if let Some(handle) = handle {
        return Some(ElementName::Handle(handle));
    }

    let edge = ring + chrome.border_width;
    let title_top = edge;
    let title_bottom = edge + chrome.title_height;
    if ly >= title_top && ly < title_bottom {
        // icon plus its (title - icon) / 2 padding on both sides
        let cell = chrome.close_image_size.width + chrome.title_height
            - chrome.close_image_size.height;
        if zoom_button && lx < edge + cell {
            return Some(ElementName::Zoom);
        }
        if lx >= visible.width - edge - cell {
            return Some(ElementName::Close);
        }
        return Some(ElementName::TITLE);
    }

    Some(ElementName::Content)
}

/// The draggable primitive: turns absolute cursor positions into offsets
/// cumulative from the press that started the session.
#[derive(Debug, Default, Clone, Copy)]
pub struct DragTracker {
    origin: Option<(HandleId, [f32; 2])>,
    moved: bool,
}

impl DragTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&mut self, handle: HandleId, position: [f32; 2]) {
        self.origin = Some((handle, position));
        self.moved = false;
    }

    /// Offset of `position` from the session start, or `None` when idle.
    pub fn offset(&mut self, position: [f32; 2]) -> Option<Point> {
        let (_, start) = self.origin?;
        let offset = Point::new(
            (position[0] - start[0]).round() as i32,
            (position[1] - start[1]).round() as i32,
        );
        if offset != Point::default() {
            self.moved = true;
        }
        Some(offset)
    }

    /// End the session, returning its handle.
    pub fn finish(&mut self) -> Option<HandleId> {
        self.moved = false;
        self.origin.take().map(|(handle, _)| handle)
    }

    pub fn is_active(&self) -> bool {
        self.origin.is_some()
    }

    /// The pointer left its start position during the session.
    pub fn moved(&self) -> bool {
        self.moved
    }
}
