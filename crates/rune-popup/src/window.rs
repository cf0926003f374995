//! Popup window lifecycle.
//!
//! A [`PopupWindow`] owns the geometry, the drag session, the fill layout,
//! the timers and the listeners of one window, and drives its [`PopupHost`].
//!
//! ```text
//! Opening --open()--> Expanded <--toggle()--> Collapsed
//!    |                    \                     /
//!    |                     +----- close() -----+
//!    |                               |
//!    |                            Closing --(mask faded)--> Closed
//!    +------------- close() ---------------------------------^
//! ```
//!
//! Nothing here reads wall time: timers run on the window's scheduler and
//! fire from [`PopupWindow::advance`].

use std::sync::atomic::{AtomicU64, Ordering};

use rune_config::PopupConfig;
use tracing::{debug, trace, warn};

use crate::chrome::{ChromeConfig, compute_inner_size, compute_outer_bounds, frame_size};
use crate::error::{PopupError, Result};
use crate::events::{EventEmitter, EventName, ListenerId, PopupEvent};
use crate::geometry::{ContentSize, OuterBounds, Placement, Point, Size};
use crate::handles::{DragHandleController, DragOutcome, HandleId};
use crate::host::{AttachRequest, ElementName, EventResult, PopupHost};
use crate::layering::{GlobalLayers, LayerAllocator, Layers, allocate_layers};
use crate::responsive::{DOUBLE_CLICK_MS, RESIZE_DEBOUNCE_MS, ResponsiveLayout};
use crate::scheduler::{Scheduler, TimerKind};

/// Opacity points removed per fade step.
pub const FADE_STEP: i32 = 10;

/// Delay between two fade steps.
pub const FADE_INTERVAL_MS: u64 = 50;

/// Lifecycle state of a window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WindowState {
    /// Constructed, not yet attached.
    Opening,
    Expanded,
    /// Collapsed to its title bar.
    Collapsed,
    /// Torn down, waiting for the mask to fade.
    Closing,
    Closed,
}

impl WindowState {
    /// Expanded or Collapsed.
    pub fn is_open(&self) -> bool {
        matches!(self, WindowState::Expanded | WindowState::Collapsed)
    }
}

/// Unique identifier for a popup window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PopupId(u64);

impl PopupId {
    fn next() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(1);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    pub fn raw(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for PopupId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "popup#{}", self.0)
    }
}

fn check_opacity(name: &'static str, value: i32) -> Result<()> {
    if (0..=100).contains(&value) {
        Ok(())
    } else {
        Err(PopupError::OpacityOutOfRange { name, value })
    }
}

/// A floating, optionally modal window.
#[derive(Debug)]
pub struct PopupWindow<H: PopupHost> {
    id: PopupId,
    host: H,
    options: PopupConfig,
    chrome: ChromeConfig,
    state: WindowState,
    bounds: OuterBounds,
    layers: Layers,
    drag: DragHandleController,
    layout: ResponsiveLayout,
    scheduler: Scheduler,
    events: EventEmitter,
    /// Elements with live input bindings, in binding order.
    bound: Vec<ElementName>,
    mask_opacity: i32,
}

impl<H: PopupHost> PopupWindow<H> {
    /// Build a window on the process-wide layer counter.
    pub fn new(host: H, options: PopupConfig, viewport: Size) -> Result<Self> {
        Self::with_layers(host, options, viewport, &GlobalLayers)
    }

    /// Build a window taking its layers from `allocator`.
    ///
    /// The window stays in [`WindowState::Opening`] until [`open`](Self::open),
    /// so listeners registered in between see the `open` event.
    pub fn with_layers(
        host: H,
        options: PopupConfig,
        viewport: Size,
        allocator: &dyn LayerAllocator,
    ) -> Result<Self> {
        if !viewport.is_positive() {
            return Err(PopupError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }
        check_opacity("mask_opacity", options.mask_opacity)?;
        check_opacity("border_shadow_opacity", options.border_shadow_opacity)?;
        let chrome = ChromeConfig::from_popup(&options)?;

        let manual = compute_outer_bounds(
            ContentSize {
                width: options.width,
                height: options.height,
            },
            &chrome,
            viewport,
            Placement {
                top: options.top,
                left: options.left,
            },
        );

        let mut layout = ResponsiveLayout::new(viewport);
        let bounds = if options.fill_mode {
            layout.enter_fill(manual);
            layout.refit(&chrome)
        } else {
            manual
        };

        let layers = allocate_layers(allocator, options.z_index, options.modal);
        let id = PopupId::next();
        debug!(
            "{} created at {:?} on layer {} (mask {:?})",
            id, bounds, layers.frame, layers.mask
        );

        Ok(Self {
            id,
            host,
            mask_opacity: options.mask_opacity,
            options,
            chrome,
            state: WindowState::Opening,
            bounds,
            layers,
            drag: DragHandleController::new(),
            layout,
            scheduler: Scheduler::new(),
            events: EventEmitter::new(),
            bound: Vec::new(),
        })
    }

    // ---- lifecycle -------------------------------------------------------

    /// Attach the elements, bind input and emit `open`.
    ///
    /// Returns false when the window was already opened or closed.
    pub fn open(&mut self) -> bool {
        if self.state != WindowState::Opening {
            warn!("{} open() ignored in state {:?}", self.id, self.state);
            return false;
        }

        // a resize seen while still opening is applied before attaching
        if self.layout.take_pending() {
            self.bounds = self.layout.refit(&self.chrome);
        }

        let expanded = self.options.expand;
        let content = self.content_size();
        self.host.attach(&AttachRequest {
            pool: self.options.pool.clone(),
            layers: self.layers,
            bounds: self.bounds,
            content,
            mask_opacity: self.options.modal.then_some(self.mask_opacity),
            collapsed: !expanded,
            draggable: self.options.draggable,
            zoom_button: self.options.zoom_button,
        });
        self.host.apply_geometry(&self.bounds, content);
        if !expanded {
            self.host
                .set_visible_height(self.chrome.collapsed_height(), false);
        }
        if self.options.zoom_button {
            self.host.set_zoom_indicator(expanded);
        }

        self.bind(ElementName::Close);
        if self.options.zoom_button {
            self.bind(ElementName::Zoom);
        }
        if self.options.modal {
            self.bind(ElementName::Mask);
        }
        for handle in HandleId::ALL {
            // the title stays clickable even when dragging is off
            if self.options.draggable || !handle.is_resize() {
                self.bind(ElementName::Handle(handle));
            }
        }

        self.state = if expanded {
            WindowState::Expanded
        } else {
            WindowState::Collapsed
        };
        if self.options.age_ms > 0 {
            self.scheduler
                .schedule(TimerKind::AutoDismiss, self.options.age_ms as u64);
        }

        debug!("{} opened {:?}", self.id, self.state);
        self.emit(PopupEvent::Open {
            frame: self.frame_size(),
            content,
        });
        true
    }

    fn bind(&mut self, element: ElementName) {
        self.host.bind(element);
        self.bound.push(element);
    }

    /// Flip between Expanded and Collapsed.
    ///
    /// The bounds are left alone, so collapsing and expanding again restores
    /// the exact geometry. Returns false when the window is not open.
    pub fn toggle(&mut self) -> bool {
        let (next, event) = match self.state {
            WindowState::Expanded => {
                self.host
                    .set_visible_height(self.chrome.collapsed_height(), false);
                (WindowState::Collapsed, PopupEvent::ZoomOut)
            }
            WindowState::Collapsed => {
                self.host.set_visible_height(self.bounds.height, true);
                (WindowState::Expanded, PopupEvent::ZoomIn)
            }
            state => {
                trace!("{} toggle() ignored in state {:?}", self.id, state);
                return false;
            }
        };

        self.state = next;
        self.host
            .set_zoom_indicator(next == WindowState::Expanded);
        debug!("{} {:?}", self.id, next);
        self.emit(event);
        true
    }

    /// Tear the window down.
    ///
    /// Input is unbound and timers are cancelled before the frame is
    /// detached. A modal mask then fades out in steps of [`FADE_STEP`] every
    /// [`FADE_INTERVAL_MS`]; the first step runs now. `close` fires once the
    /// mask is gone. Returns false when already closing or closed.
    pub fn close(&mut self) -> bool {
        match self.state {
            WindowState::Closing | WindowState::Closed => false,
            WindowState::Opening => {
                self.scheduler.cancel_all();
                self.state = WindowState::Closed;
                debug!("{} closed before opening", self.id);
                self.emit(PopupEvent::Close);
                self.events.clear();
                true
            }
            WindowState::Expanded | WindowState::Collapsed => {
                self.state = WindowState::Closing;
                if let Some(handle) = self.drag.end() {
                    trace!("{} drag on {} cut by close", self.id, handle.name());
                }
                for element in std::mem::take(&mut self.bound) {
                    self.host.unbind(element);
                }
                self.scheduler.cancel_all();
                self.host.detach(ElementName::Frame);
                debug!("{} closing", self.id);

                if self.options.modal {
                    self.fade_step();
                } else {
                    self.finish_close();
                }
                true
            }
        }
    }

    fn fade_step(&mut self) {
        if self.mask_opacity > 0 {
            self.mask_opacity = (self.mask_opacity - FADE_STEP).max(0);
            self.host.set_mask_opacity(self.mask_opacity);
            self.scheduler
                .schedule(TimerKind::FadeStep, FADE_INTERVAL_MS);
        } else {
            self.finish_close();
        }
    }

    fn finish_close(&mut self) {
        self.host.clear_text();
        if self.options.modal {
            self.host.detach(ElementName::Mask);
        }
        self.state = WindowState::Closed;
        debug!("{} closed", self.id);
        self.emit(PopupEvent::Close);
        self.events.clear();
    }

    /// Advance the window clock by `dt_ms`, firing due timers in order.
    pub fn advance(&mut self, dt_ms: u64) {
        let target = self.scheduler.now_ms().saturating_add(dt_ms);
        while let Some((_, kind)) = self.scheduler.next_due(target) {
            match kind {
                TimerKind::AutoDismiss => {
                    debug!("{} residency expired", self.id);
                    self.close();
                }
                TimerKind::FadeStep => self.fade_step(),
                TimerKind::ResizeDebounce => self.refit_fill(),
                TimerKind::ClickDebounce => {}
            }
        }
        self.scheduler.advance_to(target);
    }

    // ---- input -----------------------------------------------------------

    /// Route a click on `element`.
    ///
    /// Close and mask clicks close the window, the zoom control toggles it,
    /// and two title clicks within [`DOUBLE_CLICK_MS`] toggle fill mode.
    pub fn click(&mut self, element: ElementName) -> EventResult {
        if !self.bound.contains(&element) {
            return EventResult::Ignored;
        }

        match element {
            ElementName::Close | ElementName::Mask => {
                self.close();
            }
            ElementName::Zoom => {
                self.toggle();
            }
            ElementName::TITLE => {
                if self.scheduler.cancel_kind(TimerKind::ClickDebounce) > 0 {
                    self.toggle_fill();
                } else {
                    self.scheduler
                        .schedule(TimerKind::ClickDebounce, DOUBLE_CLICK_MS);
                }
            }
            _ => return EventResult::Ignored,
        }
        EventResult::Handled
    }

    /// Start a drag session on `handle`.
    ///
    /// Refused when the window is not open, dragging is off, or another
    /// session is active. A session leaves fill mode.
    pub fn begin_drag(&mut self, handle: HandleId) -> bool {
        if !self.state.is_open()
            || !self.options.draggable
            || !self.bound.contains(&ElementName::Handle(handle))
        {
            trace!("{} drag on {} refused", self.id, handle.name());
            return false;
        }
        if !self.drag.begin(handle) {
            warn!(
                "{} drag on {} refused: {:?} is active",
                self.id,
                handle.name(),
                self.drag.active_handle()
            );
            return false;
        }

        if self.layout.release_for_drag() {
            self.scheduler.cancel_kind(TimerKind::ResizeDebounce);
            debug!("{} drag leaves fill mode", self.id);
        }
        true
    }

    /// Feed the pointer offset of the active session, cumulative from its
    /// start. Committed bounds are applied and announced.
    pub fn drag_to(&mut self, offset: Point) -> DragOutcome {
        let Some(handle) = self.drag.active_handle() else {
            return DragOutcome::Idle;
        };
        if handle.is_resize() && self.state == WindowState::Collapsed {
            return DragOutcome::Suppressed;
        }

        let outcome = self.drag.tick(&self.bounds, offset);
        if let DragOutcome::Committed(next) = outcome {
            self.commit_geometry(next);
            let content = self.content_size();

            let event = if handle.is_resize() {
                PopupEvent::Resize {
                    handle,
                    frame: self.frame_size(),
                    content,
                }
            } else {
                PopupEvent::Move {
                    top: next.top,
                    left: next.left,
                }
            };
            self.emit(event);
        }
        outcome
    }

    /// End the active session.
    pub fn end_drag(&mut self) -> Option<HandleId> {
        self.drag.end()
    }

    /// Record a viewport resize. In fill mode a refit is debounced by
    /// [`RESIZE_DEBOUNCE_MS`].
    pub fn viewport_resized(&mut self, viewport: Size) {
        if !viewport.is_positive() {
            warn!(
                "{} ignoring empty viewport {}x{}",
                self.id, viewport.width, viewport.height
            );
            return;
        }
        if self.layout.viewport_changed(viewport) && self.state.is_open() {
            self.scheduler
                .reschedule(TimerKind::ResizeDebounce, RESIZE_DEBOUNCE_MS);
        }
    }

    /// Switch between fill geometry and the geometry saved when fill began.
    ///
    /// Returns false when the window is not open.
    pub fn toggle_fill(&mut self) -> bool {
        if !self.state.is_open() {
            return false;
        }

        let active = if self.layout.is_fill() {
            self.scheduler.cancel_kind(TimerKind::ResizeDebounce);
            let restored = self
                .layout
                .exit_fill()
                .unwrap_or_else(|| self.manual_bounds());
            self.commit_geometry(restored);
            false
        } else {
            self.layout.enter_fill(self.bounds);
            let filled = self.layout.refit(&self.chrome);
            self.commit_geometry(filled);
            true
        };

        debug!("{} fill {}", self.id, if active { "on" } else { "off" });
        self.emit(PopupEvent::Fill {
            active,
            content: self.content_size(),
        });
        true
    }

    fn refit_fill(&mut self) {
        if !self.layout.take_pending() {
            return;
        }
        let filled = self.layout.refit(&self.chrome);
        self.commit_geometry(filled);
        self.emit(PopupEvent::Fill {
            active: true,
            content: self.content_size(),
        });
    }

    fn commit_geometry(&mut self, bounds: OuterBounds) {
        self.bounds = bounds;
        let content = self.content_size();
        self.host.apply_geometry(&self.bounds, content);
        if self.state == WindowState::Collapsed {
            self.host
                .set_visible_height(self.chrome.collapsed_height(), false);
        }
    }

    /// Bounds from the configured size and placement on the current viewport.
    fn manual_bounds(&self) -> OuterBounds {
        compute_outer_bounds(
            ContentSize {
                width: self.options.width,
                height: self.options.height,
            },
            &self.chrome,
            self.layout.viewport(),
            Placement {
                top: self.options.top,
                left: self.options.left,
            },
        )
    }

    // ---- events ----------------------------------------------------------

    pub fn on<F>(&mut self, filter: EventName, callback: F) -> ListenerId
    where
        F: FnMut(&PopupEvent) + 'static,
    {
        self.events.on(filter, callback)
    }

    pub fn once<F>(&mut self, filter: EventName, callback: F) -> ListenerId
    where
        F: FnMut(&PopupEvent) + 'static,
    {
        self.events.once(filter, callback)
    }

    pub fn off(&mut self, id: ListenerId) -> bool {
        self.events.off(id)
    }

    pub fn listener_count(&self) -> usize {
        self.events.listener_count()
    }

    fn emit(&mut self, event: PopupEvent) {
        trace!("{} emit {}", self.id, event.name());
        self.events.emit(&event);
    }

    // ---- accessors -------------------------------------------------------

    pub fn id(&self) -> PopupId {
        self.id
    }

    pub fn state(&self) -> WindowState {
        self.state
    }

    pub fn bounds(&self) -> OuterBounds {
        self.bounds
    }

    /// Content size recovered from the current bounds.
    pub fn content_size(&self) -> Size {
        compute_inner_size(&self.bounds, &self.chrome)
    }

    /// Outer size without the shadow ring.
    pub fn frame_size(&self) -> Size {
        frame_size(&self.bounds, &self.chrome)
    }

    pub fn chrome(&self) -> &ChromeConfig {
        &self.chrome
    }

    pub fn options(&self) -> &PopupConfig {
        &self.options
    }

    pub fn layers(&self) -> Layers {
        self.layers
    }

    pub fn is_fill(&self) -> bool {
        self.layout.is_fill()
    }

    pub fn viewport(&self) -> Size {
        self.layout.viewport()
    }

    pub fn mask_opacity(&self) -> i32 {
        self.mask_opacity
    }

    /// Elements with live input bindings, in binding order.
    pub fn bound_elements(&self) -> &[ElementName] {
        &self.bound
    }

    pub fn active_drag(&self) -> Option<HandleId> {
        self.drag.active_handle()
    }

    /// Virtual time of the window clock.
    pub fn now_ms(&self) -> u64 {
        self.scheduler.now_ms()
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{HostCall, RecordingHost};
    use crate::layering::LocalLayers;

    fn popup(options: PopupConfig) -> PopupWindow<RecordingHost> {
        PopupWindow::with_layers(
            RecordingHost::new(),
            options,
            Size::new(1024, 768),
            &LocalLayers::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_rejects_bad_options() {
        let host = RecordingHost::new;
        let layers = LocalLayers::default();

        let options = PopupConfig {
            mask_opacity: 120,
            ..PopupConfig::default()
        };
        let err = PopupWindow::with_layers(host(), options, Size::new(800, 600), &layers)
            .unwrap_err();
        assert_eq!(
            err,
            PopupError::OpacityOutOfRange {
                name: "mask_opacity",
                value: 120
            }
        );

        let err = PopupWindow::with_layers(
            host(),
            PopupConfig::default(),
            Size::new(0, 600),
            &layers,
        )
        .unwrap_err();
        assert!(matches!(err, PopupError::InvalidViewport { .. }));
    }

    #[test]
    fn test_open_binds_in_order() {
        let mut window = popup(PopupConfig::default());
        assert_eq!(window.state(), WindowState::Opening);
        assert!(window.open());
        assert!(!window.open());
        assert_eq!(window.state(), WindowState::Expanded);

        let bound = window.bound_elements();
        assert_eq!(&bound[..3], &[ElementName::Close, ElementName::Zoom, ElementName::Mask]);
        assert_eq!(bound.len(), 3 + HandleId::ALL.len());
        assert_eq!(bound.last(), Some(&ElementName::TITLE));
        assert!(matches!(window.host().calls()[0], HostCall::Attach(_)));
    }

    #[test]
    fn test_not_draggable_binds_title_only() {
        let mut window = popup(PopupConfig {
            draggable: false,
            zoom_button: false,
            modal: false,
            ..PopupConfig::default()
        });
        window.open();
        assert_eq!(
            window.bound_elements(),
            &[ElementName::Close, ElementName::TITLE]
        );
        assert!(!window.begin_drag(HandleId::Title));
    }

    #[test]
    fn test_collapsed_start() {
        let mut window = popup(PopupConfig {
            expand: false,
            ..PopupConfig::default()
        });
        window.open();
        assert_eq!(window.state(), WindowState::Collapsed);
        let collapsed = window.chrome().collapsed_height();
        assert!(window.host().calls().contains(&HostCall::SetVisibleHeight {
            frame_height: collapsed,
            body_visible: false
        }));
    }

    #[test]
    fn test_resize_suppressed_while_collapsed() {
        let mut window = popup(PopupConfig::default().with_content_size(200, 100));
        window.open();
        window.toggle();
        let before = window.bounds();

        assert!(window.begin_drag(HandleId::Right));
        assert_eq!(window.drag_to(Point::new(30, 0)), DragOutcome::Suppressed);
        window.end_drag();
        assert_eq!(window.bounds(), before);

        assert!(window.begin_drag(HandleId::Title));
        assert!(matches!(
            window.drag_to(Point::new(5, 5)),
            DragOutcome::Committed(_)
        ));
        assert_eq!(window.bounds().left, before.left + 5);
    }

    #[test]
    fn test_fill_while_collapsed_keeps_clip() {
        let mut window = popup(PopupConfig::default().with_modal(false));
        window.open();
        window.toggle();
        window.host_mut().take();

        assert!(window.toggle_fill());
        let collapsed = window.chrome().collapsed_height();
        let calls = window.host().calls();
        assert!(matches!(calls[0], HostCall::ApplyGeometry { .. }));
        assert_eq!(
            calls[1],
            HostCall::SetVisibleHeight {
                frame_height: collapsed,
                body_visible: false
            }
        );

        window.host_mut().take();
        window.viewport_resized(Size::new(900, 700));
        window.advance(RESIZE_DEBOUNCE_MS);
        assert_eq!(window.bounds(), OuterBounds::new(0, 0, 900, 700));
        assert_eq!(
            window.host().calls().last(),
            Some(&HostCall::SetVisibleHeight {
                frame_height: collapsed,
                body_visible: false
            })
        );

        // expanding shows the filled height again
        window.toggle();
        assert!(window.host().calls().contains(&HostCall::SetVisibleHeight {
            frame_height: 700,
            body_visible: true
        }));
    }

    #[test]
    fn test_close_before_open() {
        let mut window = popup(PopupConfig::default());
        assert!(window.close());
        assert!(!window.close());
        assert_eq!(window.state(), WindowState::Closed);
        assert!(window.host().calls().is_empty());
        assert!(!window.open());
    }

    #[test]
    fn test_clicks_after_close_are_ignored() {
        let mut window = popup(PopupConfig::default().with_modal(false));
        window.open();
        assert!(window.click(ElementName::Zoom).is_handled());
        assert_eq!(window.state(), WindowState::Collapsed);
        assert!(window.click(ElementName::Close).is_handled());
        assert_eq!(window.state(), WindowState::Closed);
        assert_eq!(window.click(ElementName::Zoom), EventResult::Ignored);
        assert_eq!(window.click(ElementName::Mask), EventResult::Ignored);
    }
}
