use anyhow::Result;
use rune_popup::{
    DragOutcome, ElementName, EventName, HandleId, HostCall, LocalLayers, OuterBounds, Point,
    PopupConfig, PopupEvent, PopupWindow, RecordingHost, Size, WindowState,
};
use std::cell::RefCell;
use std::rc::Rc;

type EventLog = Rc<RefCell<Vec<PopupEvent>>>;

fn open_popup(options: PopupConfig) -> Result<(PopupWindow<RecordingHost>, EventLog)> {
    let mut window = PopupWindow::with_layers(
        RecordingHost::new(),
        options,
        Size::new(1024, 768),
        &LocalLayers::default(),
    )?;
    let log: EventLog = Rc::default();
    let sink = log.clone();
    window.on(EventName::Any, move |event| sink.borrow_mut().push(event.clone()));
    window.open();
    Ok((window, log))
}

fn close_count(log: &EventLog) -> usize {
    log.borrow()
        .iter()
        .filter(|e| matches!(e, PopupEvent::Close))
        .count()
}

#[test]
fn open_reports_frame_and_content() -> Result<()> {
    let (window, log) = open_popup(PopupConfig::default().with_content_size(160, 90))?;

    assert_eq!(window.bounds(), OuterBounds::new(318, 424, 176, 131));
    assert_eq!(
        log.borrow().first(),
        Some(&PopupEvent::Open {
            frame: Size::new(166, 121),
            content: Size::new(160, 90),
        })
    );
    assert_eq!(window.layers().mask, Some(12345));
    assert_eq!(window.layers().frame, 12346);
    Ok(())
}

#[test]
fn close_twice_fires_once() -> Result<()> {
    let (mut window, log) = open_popup(PopupConfig::default().with_modal(false))?;

    assert!(window.close());
    assert!(!window.close());
    window.advance(1_000);

    assert_eq!(close_count(&log), 1);
    assert_eq!(window.state(), WindowState::Closed);
    assert_eq!(window.listener_count(), 0);
    Ok(())
}

#[test]
fn residency_closes_once() -> Result<()> {
    let options = PopupConfig::default().with_modal(false).with_age(5_000);
    let (mut window, log) = open_popup(options)?;

    window.advance(4_999);
    assert_eq!(close_count(&log), 0);
    assert!(window.state().is_open());

    window.advance(1);
    assert_eq!(close_count(&log), 1);
    assert_eq!(window.state(), WindowState::Closed);

    window.advance(10_000);
    assert_eq!(close_count(&log), 1);
    Ok(())
}

#[test]
fn manual_close_cancels_residency() -> Result<()> {
    let options = PopupConfig::default().with_modal(false).with_age(5_000);
    let (mut window, log) = open_popup(options)?;

    window.advance(1_200);
    window.close();
    window.advance(10_000);

    assert_eq!(close_count(&log), 1);
    Ok(())
}

#[test]
fn close_drops_pending_refit_and_click() -> Result<()> {
    let (mut window, log) = open_popup(PopupConfig::default().with_modal(false))?;
    window.toggle_fill();
    window.viewport_resized(Size::new(900, 700));
    window.click(ElementName::TITLE);
    window.host_mut().take();
    log.borrow_mut().clear();

    window.close();
    window.advance(1_000);

    assert_eq!(window.host().last_geometry(), None);
    assert_eq!(window.bounds(), OuterBounds::new(0, 0, 1024, 768));
    let names: Vec<_> = log.borrow().iter().map(|e| e.name()).collect();
    assert_eq!(names, vec!["close"]);
    Ok(())
}

#[test]
fn residency_closes_collapsed_window() -> Result<()> {
    let options = PopupConfig::default().with_modal(false).with_age(1_000);
    let (mut window, log) = open_popup(options)?;
    assert!(window.toggle());

    window.advance(1_000);

    assert_eq!(window.state(), WindowState::Closed);
    assert_eq!(close_count(&log), 1);
    Ok(())
}

#[test]
fn residency_ends_active_drag() -> Result<()> {
    let options = PopupConfig::default()
        .with_modal(false)
        .with_age(1_000)
        .with_content_size(200, 100);
    let (mut window, log) = open_popup(options)?;

    assert!(window.begin_drag(HandleId::Right));
    assert!(matches!(window.drag_to(Point::new(10, 0)), DragOutcome::Committed(_)));
    window.advance(1_000);

    assert_eq!(window.state(), WindowState::Closed);
    assert_eq!(window.active_drag(), None);
    window.host_mut().take();
    assert_eq!(window.drag_to(Point::new(40, 0)), DragOutcome::Idle);
    assert!(!window.begin_drag(HandleId::Right));
    assert!(window.host().calls().is_empty());
    assert_eq!(close_count(&log), 1);
    Ok(())
}

#[test]
fn collapse_then_expand_is_lossless() -> Result<()> {
    let (mut window, log) = open_popup(PopupConfig::default().with_content_size(300, 200))?;
    let bounds = window.bounds();
    let content = window.content_size();

    assert!(window.toggle());
    assert_eq!(window.state(), WindowState::Collapsed);
    assert!(window.toggle());
    assert_eq!(window.state(), WindowState::Expanded);

    assert_eq!(window.bounds(), bounds);
    assert_eq!(window.content_size(), content);

    let names: Vec<_> = log.borrow().iter().map(|e| e.name()).collect();
    assert_eq!(names, vec!["open", "zoomOut", "zoomIn"]);

    let calls = window.host().calls();
    assert!(calls.contains(&HostCall::SetZoomIndicator { expanded: false }));
    assert!(calls.contains(&HostCall::SetVisibleHeight {
        frame_height: bounds.height,
        body_visible: true,
    }));
    Ok(())
}

#[test]
fn modal_mask_fades_before_close() -> Result<()> {
    let (mut window, log) = open_popup(PopupConfig::default())?;
    window.host_mut().take();

    window.close();
    assert_eq!(window.state(), WindowState::Closing);
    // first step is synchronous
    assert_eq!(window.host().mask_opacities(), vec![35]);

    window.advance(200);
    assert_eq!(window.host().mask_opacities(), vec![35, 25, 15, 5, 0]);
    assert_eq!(close_count(&log), 0);
    assert_eq!(window.host().position(&HostCall::Detach(ElementName::Mask)), None);

    window.advance(50);
    assert_eq!(close_count(&log), 1);
    assert_eq!(window.state(), WindowState::Closed);

    let calls = window.host().calls();
    let clear = window.host().position(&HostCall::ClearText);
    let mask = window.host().position(&HostCall::Detach(ElementName::Mask));
    assert!(clear.is_some() && mask.is_some());
    assert!(clear < mask);
    assert_eq!(calls.last(), Some(&HostCall::Detach(ElementName::Mask)));
    Ok(())
}

#[test]
fn close_unbinds_before_detaching() -> Result<()> {
    let (mut window, _log) = open_popup(PopupConfig::default().with_modal(false))?;
    let bound = window.bound_elements().to_vec();
    window.host_mut().take();

    window.close();

    let calls = window.host().calls();
    let unbinds: Vec<_> = calls
        .iter()
        .take_while(|c| matches!(c, HostCall::Unbind(_)))
        .cloned()
        .collect();
    let expected: Vec<_> = bound.into_iter().map(HostCall::Unbind).collect();
    assert_eq!(unbinds, expected);
    assert_eq!(calls.get(expected.len()), Some(&HostCall::Detach(ElementName::Frame)));
    assert!(window.bound_elements().is_empty());
    Ok(())
}

#[test]
fn once_listener_and_off() -> Result<()> {
    let (mut window, _log) = open_popup(PopupConfig::default())?;
    let zooms = Rc::new(RefCell::new(0));

    let counter = zooms.clone();
    window.once(EventName::ZoomOut, move |_| *counter.borrow_mut() += 1);
    let counter = zooms.clone();
    let id = window.on(EventName::ZoomIn, move |_| *counter.borrow_mut() += 10);

    window.toggle();
    window.toggle();
    assert!(window.off(id));
    window.toggle();
    window.toggle();

    assert_eq!(*zooms.borrow(), 11);
    Ok(())
}

#[test]
fn late_listeners_are_dropped_after_close() -> Result<()> {
    let mut window = PopupWindow::with_layers(
        RecordingHost::new(),
        PopupConfig::default().with_modal(false),
        Size::new(800, 600),
        &LocalLayers::default(),
    )?;
    let fired = Rc::new(RefCell::new(false));
    let flag = fired.clone();
    window.on(EventName::Close, move |_| *flag.borrow_mut() = true);

    // closing an unopened window skips the host entirely
    window.close();
    assert!(*fired.borrow());
    assert!(window.host().calls().is_empty());
    assert_eq!(window.listener_count(), 0);
    Ok(())
}
