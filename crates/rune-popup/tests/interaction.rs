use anyhow::Result;
use rune_popup::{
    DragOutcome, ElementName, EventName, HandleId, HostCall, LocalLayers, OuterBounds, PopupConfig,
    PopupEvent, PopupWindow, Point, RecordingHost, Size,
};
use std::cell::RefCell;
use std::rc::Rc;

type EventLog = Rc<RefCell<Vec<PopupEvent>>>;

fn popup_at(
    options: PopupConfig,
    viewport: Size,
) -> Result<(PopupWindow<RecordingHost>, EventLog)> {
    let mut window = PopupWindow::with_layers(
        RecordingHost::new(),
        options,
        viewport,
        &LocalLayers::default(),
    )?;
    let log: EventLog = Rc::default();
    let sink = log.clone();
    window.on(EventName::Any, move |event| sink.borrow_mut().push(event.clone()));
    window.open();
    log.borrow_mut().clear();
    Ok((window, log))
}

/// Options whose outer bounds come out as 300x200 at (50, 50).
fn sized_300x200() -> PopupConfig {
    // 300 - 16 = 284 wide, 200 - 41 = 159 high
    PopupConfig::default()
        .with_modal(false)
        .with_content_size(284, 159)
        .with_placement(50, 50)
}

#[test]
fn left_bottom_drag_keeps_top_right_corner() -> Result<()> {
    let (mut window, log) = popup_at(sized_300x200(), Size::new(1024, 768))?;
    assert_eq!(window.bounds(), OuterBounds::new(50, 50, 300, 200));

    assert!(window.begin_drag(HandleId::LeftBottom));
    let outcome = window.drag_to(Point::new(-10, 20));
    window.end_drag();

    assert_eq!(outcome, DragOutcome::Committed(OuterBounds::new(50, 40, 310, 220)));
    assert_eq!(window.content_size(), Size::new(294, 179));
    assert_eq!(
        log.borrow().as_slice(),
        &[PopupEvent::Resize {
            handle: HandleId::LeftBottom,
            frame: Size::new(300, 210),
            content: Size::new(294, 179),
        }]
    );
    assert_eq!(
        window.host().last_geometry(),
        Some((OuterBounds::new(50, 40, 310, 220), Size::new(294, 179)))
    );
    Ok(())
}

#[test]
fn right_drag_has_no_drift() -> Result<()> {
    let (mut window, log) = popup_at(sized_300x200(), Size::new(1024, 768))?;

    assert!(window.begin_drag(HandleId::Right));
    // cumulative offsets: +40, -60, -400 (rejected), -20
    assert!(matches!(window.drag_to(Point::new(40, 0)), DragOutcome::Committed(_)));
    assert!(matches!(window.drag_to(Point::new(-20, 0)), DragOutcome::Committed(_)));
    assert_eq!(window.drag_to(Point::new(-420, 0)), DragOutcome::Rejected);
    assert!(matches!(window.drag_to(Point::new(-40, 0)), DragOutcome::Committed(_)));
    window.end_drag();

    assert_eq!(window.bounds().width, 300 + 40 - 60 - 20);
    assert_eq!(window.bounds().left, 50);
    assert_eq!(log.borrow().len(), 3);
    Ok(())
}

#[test]
fn title_drag_moves_without_resizing() -> Result<()> {
    let (mut window, log) = popup_at(sized_300x200(), Size::new(1024, 768))?;

    assert!(window.begin_drag(HandleId::Title));
    assert!(!window.begin_drag(HandleId::Right));
    window.drag_to(Point::new(15, -5));
    window.drag_to(Point::new(30, -10));
    assert_eq!(window.end_drag(), Some(HandleId::Title));

    assert_eq!(window.bounds(), OuterBounds::new(40, 80, 300, 200));
    assert_eq!(
        log.borrow().last(),
        Some(&PopupEvent::Move { top: 40, left: 80 })
    );
    Ok(())
}

#[test]
fn double_click_toggles_fill_and_restores() -> Result<()> {
    let (mut window, log) = popup_at(sized_300x200(), Size::new(800, 600))?;
    let manual = window.bounds();

    assert!(window.click(ElementName::TITLE).is_handled());
    window.advance(100);
    window.click(ElementName::TITLE);

    assert!(window.is_fill());
    assert_eq!(window.bounds(), OuterBounds::new(0, 0, 800, 600));
    assert_eq!(
        log.borrow().last(),
        Some(&PopupEvent::Fill {
            active: true,
            content: Size::new(784, 559),
        })
    );

    window.advance(300);
    window.click(ElementName::TITLE);
    window.advance(10);
    window.click(ElementName::TITLE);

    assert!(!window.is_fill());
    assert_eq!(window.bounds(), manual);
    Ok(())
}

#[test]
fn slow_clicks_do_not_toggle() -> Result<()> {
    let (mut window, log) = popup_at(sized_300x200(), Size::new(800, 600))?;

    window.click(ElementName::TITLE);
    window.advance(250);
    window.click(ElementName::TITLE);

    assert!(!window.is_fill());
    assert!(log.borrow().is_empty());
    Ok(())
}

#[test]
fn fill_refits_after_debounce() -> Result<()> {
    let (mut window, log) = popup_at(sized_300x200(), Size::new(800, 600))?;
    window.toggle_fill();
    log.borrow_mut().clear();

    window.viewport_resized(Size::new(900, 700));
    window.advance(5);
    window.viewport_resized(Size::new(1000, 720));
    window.advance(9);
    assert!(log.borrow().is_empty());

    window.advance(1);
    assert_eq!(window.bounds(), OuterBounds::new(0, 0, 1000, 720));
    assert_eq!(log.borrow().len(), 1);
    Ok(())
}

#[test]
fn manual_mode_ignores_viewport_resize() -> Result<()> {
    let (mut window, log) = popup_at(sized_300x200(), Size::new(800, 600))?;

    window.viewport_resized(Size::new(400, 300));
    window.advance(100);

    assert_eq!(window.bounds(), OuterBounds::new(50, 50, 300, 200));
    assert_eq!(window.viewport(), Size::new(400, 300));
    assert!(log.borrow().is_empty());
    Ok(())
}

#[test]
fn drag_leaves_fill_mode() -> Result<()> {
    let (mut window, _log) = popup_at(sized_300x200(), Size::new(800, 600))?;
    window.toggle_fill();
    window.viewport_resized(Size::new(900, 700));

    assert!(window.begin_drag(HandleId::RightBottom));
    assert!(!window.is_fill());
    window.drag_to(Point::new(-100, -100));
    window.end_drag();

    // the pending refit was dropped with fill mode
    window.advance(50);
    assert_eq!(window.bounds(), OuterBounds::new(0, 0, 700, 500));

    // nothing saved to go back to: toggling fill enters it again
    window.toggle_fill();
    assert!(window.is_fill());
    Ok(())
}

#[test]
fn starts_in_fill_mode() -> Result<()> {
    let options = PopupConfig {
        fill_mode: true,
        ..sized_300x200()
    };
    let (mut window, _log) = popup_at(options, Size::new(800, 600))?;

    assert!(window.is_fill());
    assert_eq!(window.bounds(), OuterBounds::new(0, 0, 800, 600));

    window.toggle_fill();
    assert_eq!(window.bounds(), OuterBounds::new(50, 50, 300, 200));
    Ok(())
}

#[test]
fn resize_before_open_is_applied_on_open() -> Result<()> {
    let options = PopupConfig {
        fill_mode: true,
        ..sized_300x200()
    };
    let mut window = PopupWindow::with_layers(
        RecordingHost::new(),
        options,
        Size::new(800, 600),
        &LocalLayers::default(),
    )?;
    let log: EventLog = Rc::default();
    let sink = log.clone();
    window.on(EventName::Any, move |event| sink.borrow_mut().push(event.clone()));

    window.viewport_resized(Size::new(1000, 700));
    assert!(window.open());

    let filled = OuterBounds::new(0, 0, 1000, 700);
    assert_eq!(window.bounds(), filled);
    let HostCall::Attach(request) = &window.host().calls()[0] else {
        panic!("expected attach first");
    };
    assert_eq!(request.bounds, filled);
    assert_eq!(
        log.borrow().first(),
        Some(&PopupEvent::Open {
            frame: Size::new(990, 690),
            content: Size::new(984, 659),
        })
    );

    window.advance(1_000);
    assert_eq!(window.bounds(), filled);
    assert_eq!(log.borrow().len(), 1);

    // nothing left over: the saved manual bounds still come back
    window.toggle_fill();
    assert_eq!(window.bounds(), OuterBounds::new(50, 50, 300, 200));
    Ok(())
}
