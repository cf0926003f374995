use anyhow::Result;
use rune_config::RuneConfig;
use rune_popup::{
    AttachRequest, ElementName, EventName, OuterBounds, PopupHost, PopupWindow, Size,
};
use rune_window::{PopupRouter, RuneWindowEvent};
use winit::event::MouseButton;

/// Frame interval used to drive the popup clock.
const FRAME_MS: u64 = 16;

/// Host that logs every element operation instead of rendering.
struct LoggingHost {
    title: String,
    content: String,
}

impl PopupHost for LoggingHost {
    fn attach(&mut self, request: &AttachRequest) {
        log::info!(
            "attach into {} at {:?} (frame layer {}, mask {:?}) title={:?} content={:?}",
            request.pool.as_deref().unwrap_or("<body>"),
            request.bounds,
            request.layers.frame,
            request.layers.mask,
            self.title,
            self.content
        );
    }

    fn apply_geometry(&mut self, bounds: &OuterBounds, content: Size) {
        log::info!("geometry {:?} content {}x{}", bounds, content.width, content.height);
    }

    fn set_visible_height(&mut self, frame_height: i32, body_visible: bool) {
        log::info!("visible height {} (body {})", frame_height, body_visible);
    }

    fn set_zoom_indicator(&mut self, expanded: bool) {
        log::debug!("zoom indicator {}", if expanded { "collapse" } else { "expand" });
    }

    fn set_mask_opacity(&mut self, opacity: i32) {
        log::debug!("mask opacity {}", opacity);
    }

    fn bind(&mut self, element: ElementName) {
        log::debug!("bind {:?}", element);
    }

    fn unbind(&mut self, element: ElementName) {
        log::debug!("unbind {:?}", element);
    }

    fn detach(&mut self, element: ElementName) {
        log::info!("detach {:?}", element);
    }

    fn clear_text(&mut self) {
        self.title.clear();
        self.content.clear();
    }
}

fn pointer(router: &mut PopupRouter<LoggingHost>, x: i32, y: i32) {
    router.handle_event(&RuneWindowEvent::CursorMoved {
        position: [x as f32, y as f32],
    });
}

fn press(router: &mut PopupRouter<LoggingHost>) {
    router.handle_event(&RuneWindowEvent::MousePressed(MouseButton::Left));
}

fn release(router: &mut PopupRouter<LoggingHost>) {
    router.handle_event(&RuneWindowEvent::MouseReleased(MouseButton::Left));
}

fn drag(router: &mut PopupRouter<LoggingHost>, from: (i32, i32), by: (i32, i32)) {
    pointer(router, from.0, from.1);
    press(router);
    pointer(router, from.0 + by.0 / 2, from.1 + by.1 / 2);
    pointer(router, from.0 + by.0, from.1 + by.1);
    release(router);
}

fn click(router: &mut PopupRouter<LoggingHost>, at: (i32, i32)) {
    pointer(router, at.0, at.1);
    press(router);
    release(router);
}

/// Run the clock in frame-sized steps.
fn run_frames(router: &mut PopupRouter<LoggingHost>, total_ms: u64) {
    let mut elapsed = 0;
    while elapsed < total_ms {
        let step = FRAME_MS.min(total_ms - elapsed);
        router.window_mut().advance(step);
        elapsed += step;
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let config = RuneConfig::load();
    let viewport = Size::new(config.demo.viewport_width, config.demo.viewport_height);
    log::info!(
        "viewport {}x{}, popup {:?}x{:?}",
        viewport.width,
        viewport.height,
        config.popup.width,
        config.popup.height
    );

    let host = LoggingHost {
        title: config.demo.title.clone(),
        content: config.demo.content.clone(),
    };
    let mut window = PopupWindow::new(host, config.popup.clone(), viewport)?;
    window.on(EventName::Any, |event| match serde_json::to_string(event) {
        Ok(json) => println!("{}", json),
        Err(err) => log::error!("failed to serialize {}: {}", event.name(), err),
    });
    window.open();

    let mut router = PopupRouter::new(window);
    let chrome = *router.window().chrome();
    let edge = chrome.shadow_ring + chrome.border_width;
    let title_y = |b: OuterBounds| b.top + edge + chrome.title_height / 2;

    // Grow from the bottom-left corner.
    let b = router.window().bounds();
    drag(&mut router, (b.left + 1, b.bottom() - 2), (-10, 20));

    // Move by the title bar.
    let b = router.window().bounds();
    drag(&mut router, (b.left + b.width / 2, title_y(b)), (30, 15));

    // Collapse and expand with the zoom toggle.
    if config.popup.zoom_button {
        let b = router.window().bounds();
        let zoom = (b.left + edge + 2, title_y(b));
        click(&mut router, zoom);
        click(&mut router, zoom);
    }

    // Double-click the title into fill mode, then resize the viewport.
    let b = router.window().bounds();
    let title = (b.left + b.width / 2, title_y(b));
    click(&mut router, title);
    click(&mut router, title);
    router.handle_event(&RuneWindowEvent::Resized(Size::new(
        viewport.width - 100,
        viewport.height - 100,
    )));
    run_frames(&mut router, 32);

    // Close from the icon and let the mask fade out.
    let b = router.window().bounds();
    click(&mut router, (b.right() - edge - 2, title_y(b)));
    run_frames(&mut router, 500);

    log::info!("final state {:?}", router.window().state());
    Ok(())
}
