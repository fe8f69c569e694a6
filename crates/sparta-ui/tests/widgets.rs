//! Default behavior of the widget variants.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use sparta_core::{Point, Rect, Rgba};
use sparta_test_utils::{BackendCall, MockBackend, MockHandle};
use sparta_ui::{
    Button, Canvas, ColorRole, CommandEvent, Event, EventType, Key, KeyEvent, List, MainWindow,
    Modifiers, MouseButton, MouseEvent, NativeEvent, Orientation, Property, Scroll, Shape, Ui,
    Value, WidgetId,
};

fn setup() -> (Ui, MockHandle, MainWindow) {
    let backend = MockBackend::new();
    let handle = backend.handle();
    let mut ui = Ui::new(backend);
    let main = MainWindow::new(&mut ui, "main", "Test").unwrap();
    (ui, handle, main)
}

fn mouse(button: MouseButton, x: i32, y: i32) -> MouseEvent {
    MouseEvent {
        button,
        state: Modifiers::empty(),
        loc: Point::new(x, y),
    }
}

fn key(key: Key) -> KeyEvent {
    KeyEvent {
        key,
        state: Modifiers::empty(),
        loc: Point::ZERO,
    }
}

fn record_commands(ui: &mut Ui, id: impl Into<WidgetId>) -> Rc<RefCell<Vec<CommandEvent>>> {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = seen.clone();
    ui.capture(id, EventType::Command, move |_ui, _id, event| {
        if let Event::Command(command) = event {
            sink.borrow_mut().push(*command);
        }
        true
    });
    seen
}

fn flush(ui: &mut Ui) {
    ui.step(Some(Duration::ZERO)).unwrap();
}

#[test]
fn test_close_cascade_closes_children_first() {
    let (mut ui, handle, main) = setup();
    let canvas = Canvas::new(&mut ui, main, "canvas", Rect::new(0, 0, 100, 100)).unwrap();
    let a = Button::new(&mut ui, canvas, "a", "A", Rect::new(0, 0, 20, 20)).unwrap();
    let b = Button::new(&mut ui, canvas, "b", "B", Rect::new(20, 0, 40, 20)).unwrap();
    let c = Button::new(&mut ui, main, "c", "C", Rect::new(0, 100, 20, 120)).unwrap();

    handle.push_event(NativeEvent::Close { target: main.id() });
    assert!(!ui.step(Some(Duration::ZERO)).unwrap());

    let closed = handle.closed();
    assert_eq!(closed.len(), 5);
    assert_eq!(closed.last(), Some(&main.id()));
    let at = |id: WidgetId| closed.iter().position(|w| *w == id).unwrap();
    assert!(at(a.id()) < at(canvas.id()));
    assert!(at(b.id()) < at(canvas.id()));
    assert!(at(c.id()) < at(main.id()));

    assert_eq!(ui.widget_count(), 0);
    assert!(!ui.is_running());
    assert_eq!(handle.count(|c| *c == BackendCall::Quit), 1);
}

#[test]
fn test_close_handler_can_veto() {
    let (mut ui, handle, main) = setup();
    ui.capture(main, EventType::Close, |_ui, _id, _event| true);

    handle.push_event(NativeEvent::Close { target: main.id() });
    assert!(ui.step(Some(Duration::ZERO)).unwrap());
    assert!(ui.is_alive(main));
}

#[test]
fn test_closing_twice_is_harmless() {
    let (mut ui, handle, main) = setup();
    let canvas = Canvas::new(&mut ui, main, "canvas", Rect::new(0, 0, 100, 100)).unwrap();

    ui.close_window(canvas);
    ui.close_window(canvas);
    ui.on_event(canvas, CommandEvent { source: None, value: 0 });
    assert_eq!(handle.closed(), vec![canvas.id()]);
    assert!(ui.is_running());
}

#[test]
fn test_configure_lays_out_children() {
    let (mut ui, handle, main) = setup();
    let left = Canvas::new(&mut ui, main, "left", Rect::new(0, 0, 10, 10)).unwrap();
    let right = Canvas::new(&mut ui, main, "right", Rect::new(10, 0, 20, 10)).unwrap();

    ui.capture(main, EventType::Configure, move |ui, _id, event| {
        let Event::Configure(configure) = event else {
            return false;
        };
        let (width, height) = (configure.rect.dx(), configure.rect.dy());
        let half = width / 2;
        ui.set_property(left, Property::Geometry, Rect::new(0, 0, half, height))
            .unwrap();
        ui.set_property(right, Property::Geometry, Rect::new(half, 0, width, height))
            .unwrap();
        true
    });

    ui.set_property(main, Property::Geometry, Rect::new(0, 0, 200, 100))
        .unwrap();
    assert_eq!(ui.geometry(main), Some(Rect::new(0, 0, 200, 100)));
    assert_eq!(ui.geometry(left), Some(Rect::new(0, 0, 100, 100)));
    assert_eq!(ui.geometry(right), Some(Rect::new(100, 0, 200, 100)));

    handle.push_event(NativeEvent::Configure {
        target: main.id(),
        rect: Rect::new(50, 50, 350, 110),
    });
    flush(&mut ui);
    assert_eq!(ui.geometry(left), Some(Rect::new(0, 0, 150, 60)));
    assert_eq!(ui.geometry(right), Some(Rect::new(150, 0, 300, 60)));
}

#[test]
fn test_scroll_clamps_and_notifies() {
    let (mut ui, _handle, main) = setup();
    let scroll = Scroll::new(
        &mut ui,
        main,
        "scroll",
        Rect::new(0, 0, 10, 100),
        Orientation::Vertical,
    )
    .unwrap();
    let seen = record_commands(&mut ui, main);

    ui.set_property(scroll, Property::ScrollSize, 100).unwrap();
    ui.set_property(scroll, Property::ScrollPage, 10).unwrap();
    flush(&mut ui);
    assert!(seen.borrow().is_empty());

    ui.set_property(scroll, Property::ScrollPos, 95).unwrap();
    flush(&mut ui);
    ui.set_property(scroll, Property::ScrollPos, -5).unwrap();
    flush(&mut ui);
    ui.set_property(scroll, Property::ScrollPos, -5).unwrap();
    flush(&mut ui);

    let values: Vec<_> = seen.borrow().iter().map(|c| c.value).collect();
    assert_eq!(values, vec![90, 0]);
    assert!(seen.borrow().iter().all(|c| c.source == Some(scroll.id())));
    assert_eq!(ui.property(scroll, Property::ScrollPos), Some(Value::Int(0)));
}

#[test]
fn test_scroll_shrinking_size_reclamps() {
    let (mut ui, _handle, main) = setup();
    let scroll = Scroll::new(
        &mut ui,
        main,
        "scroll",
        Rect::new(0, 0, 10, 100),
        Orientation::Vertical,
    )
    .unwrap();
    ui.set_property(scroll, Property::ScrollSize, 100).unwrap();
    ui.set_property(scroll, Property::ScrollPos, 80).unwrap();
    flush(&mut ui);
    let seen = record_commands(&mut ui, main);

    ui.set_property(scroll, Property::ScrollSize, 50).unwrap();
    flush(&mut ui);
    assert_eq!(scroll.pos(&ui), 50);
    assert_eq!(seen.borrow().len(), 1);
    assert_eq!(seen.borrow()[0].value, 50);
}

#[test]
fn test_scroll_ignores_negative_size_and_page() {
    let (mut ui, _handle, main) = setup();
    let scroll = Scroll::new(
        &mut ui,
        main,
        "scroll",
        Rect::new(0, 0, 10, 100),
        Orientation::Vertical,
    )
    .unwrap();
    ui.set_property(scroll, Property::ScrollSize, 100).unwrap();
    ui.set_property(scroll, Property::ScrollPage, 10).unwrap();

    ui.set_property(scroll, Property::ScrollPage, -10).unwrap();
    ui.set_property(scroll, Property::ScrollSize, -1).unwrap();
    assert_eq!(ui.property(scroll, Property::ScrollPage), Some(Value::Int(10)));
    assert_eq!(ui.property(scroll, Property::ScrollSize), Some(Value::Int(100)));

    ui.set_property(scroll, Property::ScrollPos, 500).unwrap();
    assert_eq!(ui.property(scroll, Property::ScrollPos), Some(Value::Int(90)));
}

#[test]
fn test_scroll_empty_content_resets() {
    let (mut ui, _handle, main) = setup();
    let scroll = Scroll::new(
        &mut ui,
        main,
        "scroll",
        Rect::new(0, 0, 10, 100),
        Orientation::Vertical,
    )
    .unwrap();
    ui.set_property(scroll, Property::ScrollSize, 100).unwrap();
    ui.set_property(scroll, Property::ScrollPage, 10).unwrap();
    ui.set_property(scroll, Property::ScrollPos, 40).unwrap();

    ui.set_property(scroll, Property::ScrollSize, 0).unwrap();
    assert_eq!(scroll.size(&ui), 0);
    assert_eq!(scroll.page(&ui), 0);
    assert_eq!(scroll.pos(&ui), 0);
}

#[test]
fn test_scroll_unchanged_values_skip_redraw() {
    let (mut ui, handle, main) = setup();
    let scroll = Scroll::new(
        &mut ui,
        main,
        "scroll",
        Rect::new(0, 0, 10, 100),
        Orientation::Vertical,
    )
    .unwrap();
    ui.set_property(scroll, Property::ScrollSize, 100).unwrap();
    ui.set_property(scroll, Property::ScrollPage, 10).unwrap();
    handle.clear_calls();

    ui.set_property(scroll, Property::ScrollSize, 100).unwrap();
    ui.set_property(scroll, Property::ScrollPage, 10).unwrap();
    ui.set_property(scroll, Property::ScrollPage, -3).unwrap();
    let updates = |handle: &MockHandle| {
        handle.count(|c| matches!(c, BackendCall::Update { id } if *id == scroll.id()))
    };
    assert_eq!(updates(&handle), 0);

    ui.set_property(scroll, Property::ScrollPage, 20).unwrap();
    assert_eq!(updates(&handle), 1);
}

#[test]
fn test_scroll_survives_integer_limits() {
    let (mut ui, handle, main) = setup();
    let scroll = Scroll::new(
        &mut ui,
        main,
        "scroll",
        Rect::new(0, 0, 10, 100),
        Orientation::Vertical,
    )
    .unwrap();

    ui.set_property(scroll, Property::ScrollSize, i32::MAX).unwrap();
    ui.set_property(scroll, Property::ScrollPage, -1).unwrap();
    ui.set_property(scroll, Property::ScrollPos, i32::MAX).unwrap();
    assert_eq!(scroll.pos(&ui), i32::MAX);
    for k in [Key::DOWN, Key::PAGE_DOWN, Key::END] {
        ui.on_event(scroll, key(k));
    }
    ui.on_event(scroll, mouse(MouseButton::WHEEL_DOWN, 5, 50));
    assert_eq!(scroll.pos(&ui), i32::MAX);
    ui.on_event(scroll, mouse(MouseButton::LEFT, 5, i32::MAX));
    assert_eq!(scroll.pos(&ui), i32::MAX / 100);

    ui.set_property(scroll, Property::ScrollPage, i32::MAX).unwrap();
    assert_eq!(scroll.pos(&ui), 0);
    ui.on_event(scroll, key(Key::PAGE_UP));
    ui.on_event(scroll, mouse(MouseButton::RIGHT, 5, i32::MIN));
    ui.set_property(scroll, Property::ScrollPos, i32::MIN).unwrap();
    assert_eq!(scroll.pos(&ui), 0);

    ui.set_property(scroll, Property::ScrollSize, i32::MIN).unwrap();
    ui.set_property(scroll, Property::ScrollPage, i32::MIN).unwrap();
    assert_eq!(scroll.size(&ui), i32::MAX);
    assert_eq!(scroll.page(&ui), i32::MAX);
    handle.push_event(NativeEvent::Expose {
        target: scroll.id(),
        rect: Rect::new(0, 0, 10, 100),
    });
    flush(&mut ui);
}

#[test]
fn test_scroll_keys_follow_orientation() {
    let (mut ui, _handle, main) = setup();
    let vertical = Scroll::new(&mut ui, main, "v", Rect::new(0, 0, 10, 100), Orientation::Vertical)
        .unwrap();
    let horizontal = Scroll::new(
        &mut ui,
        main,
        "h",
        Rect::new(0, 100, 100, 110),
        Orientation::Horizontal,
    )
    .unwrap();
    for scroll in [vertical, horizontal] {
        ui.set_property(scroll, Property::ScrollSize, 100).unwrap();
        ui.set_property(scroll, Property::ScrollPage, 10).unwrap();
    }

    ui.on_event(vertical, key(Key::DOWN));
    ui.on_event(vertical, key(Key::PAGE_DOWN));
    ui.on_event(vertical, key(Key::RIGHT));
    assert_eq!(vertical.pos(&ui), 11);

    ui.on_event(horizontal, key(Key::RIGHT));
    ui.on_event(horizontal, key(Key::DOWN));
    assert_eq!(horizontal.pos(&ui), 1);

    ui.on_event(vertical, key(Key::END));
    assert_eq!(vertical.pos(&ui), 90);
    ui.on_event(vertical, key(Key::HOME));
    assert_eq!(vertical.pos(&ui), 0);
}

#[test]
fn test_scroll_mouse_jumps() {
    let (mut ui, _handle, main) = setup();
    let scroll = Scroll::new(
        &mut ui,
        main,
        "scroll",
        Rect::new(0, 0, 10, 100),
        Orientation::Vertical,
    )
    .unwrap();
    ui.set_property(scroll, Property::ScrollSize, 200).unwrap();
    ui.set_property(scroll, Property::ScrollPage, 20).unwrap();

    ui.on_event(scroll, mouse(MouseButton::LEFT, 5, 50));
    assert_eq!(scroll.pos(&ui), 100);
    ui.on_event(scroll, mouse(MouseButton::RIGHT, 5, 50));
    assert_eq!(scroll.pos(&ui), 80);
    ui.on_event(scroll, mouse(MouseButton::WHEEL, 5, 50));
    assert_eq!(scroll.pos(&ui), 79);
    ui.on_event(scroll, mouse(MouseButton::WHEEL_DOWN, 5, 50));
    assert_eq!(scroll.pos(&ui), 80);
}

#[test]
fn test_button_sends_value_to_target() {
    let (mut ui, _handle, main) = setup();
    let panel = Canvas::new(&mut ui, main, "panel", Rect::new(0, 0, 100, 100)).unwrap();
    let button = Button::new(&mut ui, main, "ok", "Ok", Rect::new(10, 10, 70, 30)).unwrap();
    let at_main = record_commands(&mut ui, main);
    let at_panel = record_commands(&mut ui, panel);

    ui.set_property(button, Property::ButtonValue, 5).unwrap();
    ui.on_event(button, mouse(MouseButton::LEFT, 1, 1));
    // Releases do not click.
    ui.on_event(button, mouse(MouseButton::LEFT.released(), 1, 1));
    flush(&mut ui);
    assert_eq!(
        at_main.borrow().as_slice(),
        &[CommandEvent {
            source: Some(button.id()),
            value: 5
        }]
    );

    ui.set_property(button, Property::Target, panel.id()).unwrap();
    ui.on_event(button, mouse(MouseButton::LEFT, 1, 1));
    flush(&mut ui);
    assert_eq!(at_panel.borrow().len(), 1);
    assert_eq!(at_main.borrow().len(), 1);
}

#[test]
fn test_button_draws_centered_caption() {
    let (mut ui, handle, main) = setup();
    let button = Button::new(&mut ui, main, "ok", "Ok", Rect::new(10, 10, 70, 30)).unwrap();
    handle.clear_calls();

    let rect = Rect::new(0, 0, 60, 20);
    handle.push_event(NativeEvent::Expose {
        target: button.id(),
        rect,
    });
    flush(&mut ui);

    assert_eq!(
        handle.calls_for(button),
        vec![
            BackendCall::BeginExpose {
                id: button.id(),
                rect
            },
            BackendCall::SetColor {
                id: button.id(),
                role: ColorRole::Foreground,
                color: Rgba::BLACK,
            },
            BackendCall::Text {
                id: button.id(),
                pos: Point::new(24, 2),
                text: "Ok".to_string(),
            },
            BackendCall::Rectangle {
                id: button.id(),
                rect: Rect::new(0, 0, 59, 19),
                fill: false,
            },
            BackendCall::EndExpose { id: button.id() },
        ]
    );
}

#[test]
fn test_canvas_draws_only_when_drawable() {
    let (mut ui, handle, main) = setup();
    let canvas = Canvas::new(&mut ui, main, "canvas", Rect::new(0, 0, 100, 100)).unwrap();
    handle.clear_calls();

    canvas.draw(&mut ui, &Shape::Pixel(Point::new(1, 1)));
    assert!(handle.calls().is_empty());

    canvas.draw_mode(&mut ui, true);
    canvas.set_color(&mut ui, ColorRole::Foreground, Rgba::RED);
    canvas.draw(&mut ui, &Shape::Pixel(Point::new(1, 1)));
    canvas.draw(&mut ui, &Shape::Lines(vec![Point::new(0, 0)]));
    canvas.draw_mode(&mut ui, false);
    canvas.draw(&mut ui, &Shape::Pixel(Point::new(2, 2)));

    assert_eq!(
        handle.calls_for(canvas),
        vec![
            BackendCall::Draw {
                id: canvas.id(),
                begin: true
            },
            BackendCall::SetColor {
                id: canvas.id(),
                role: ColorRole::Foreground,
                color: Rgba::RED,
            },
            BackendCall::Pixel {
                id: canvas.id(),
                pos: Point::new(1, 1)
            },
            BackendCall::Draw {
                id: canvas.id(),
                begin: false
            },
        ]
    );
}

#[test]
fn test_canvas_expose_handler_draws() {
    let (mut ui, handle, main) = setup();
    let canvas = Canvas::new(&mut ui, main, "canvas", Rect::new(0, 0, 100, 100)).unwrap();
    let child = Button::new(&mut ui, canvas, "ok", "Ok", Rect::new(0, 0, 30, 20)).unwrap();
    ui.set_property(canvas, Property::Border, true).unwrap();
    ui.capture(canvas, EventType::Expose, |ui, id, _event| {
        if let Some(mut painter) = ui.painter(id) {
            painter.draw(&Shape::Rectangle {
                rect: Rect::new(10, 10, 20, 20),
                fill: true,
            });
        }
        false
    });
    handle.clear_calls();

    handle.push_event(NativeEvent::Expose {
        target: canvas.id(),
        rect: Rect::new(0, 0, 100, 100),
    });
    flush(&mut ui);

    let rectangles: Vec<_> = handle
        .calls_for(canvas)
        .into_iter()
        .filter_map(|c| match c {
            BackendCall::Rectangle { rect, fill, .. } => Some((rect, fill)),
            _ => None,
        })
        .collect();
    assert_eq!(
        rectangles,
        vec![
            (Rect::new(10, 10, 20, 20), true),
            (Rect::new(0, 0, 99, 99), false)
        ]
    );
    assert_eq!(
        handle.count(|c| matches!(c, BackendCall::Update { id } if *id == child.id())),
        1
    );
    assert!(!ui.is_drawable(canvas));
}

#[test]
fn test_list_embeds_scroll() {
    let (mut ui, _handle, main) = setup();
    let list = List::new(&mut ui, main, "files", Rect::new(0, 0, 100, 60)).unwrap();
    let scroll = list.scroll(&ui).unwrap();

    assert_eq!(ui.name(scroll), Some("listfilesScroll"));
    assert_eq!(ui.geometry(scroll), Some(Rect::new(90, 0, 100, 60)));
    assert_eq!(scroll.orientation(&ui), Some(Orientation::Vertical));
    assert_eq!(scroll.page(&ui), 4);
    assert_eq!(
        ui.property(list, Property::Childs),
        Some(Value::Widgets(vec![scroll.id()]))
    );

    ui.set_property(list, Property::Geometry, Rect::new(0, 0, 200, 150))
        .unwrap();
    assert_eq!(ui.geometry(scroll), Some(Rect::new(190, 0, 200, 150)));
    assert_eq!(scroll.page(&ui), 10);
}

#[test]
fn test_list_selection() {
    let (mut ui, _handle, main) = setup();
    let list = List::new(&mut ui, main, "files", Rect::new(0, 0, 100, 60)).unwrap();
    let scroll = list.scroll(&ui).unwrap();
    let seen = record_commands(&mut ui, main);

    let items: Vec<String> = (0..10).map(|i| format!("item {}", i)).collect();
    ui.set_property(list, Property::ListItems, items.clone())
        .unwrap();
    assert_eq!(scroll.size(&ui), 10);
    assert_eq!(list.selected(&ui), 0);

    ui.set_property(list, Property::ListSelect, 7).unwrap();
    flush(&mut ui);
    assert_eq!(list.selected(&ui), 7);
    assert_eq!(scroll.pos(&ui), 6);
    // The scroll's own notification stays inside the list.
    assert_eq!(
        seen.borrow().as_slice(),
        &[CommandEvent {
            source: Some(list.id()),
            value: 7
        }]
    );

    ui.set_property(list, Property::ListSelect, 10).unwrap();
    flush(&mut ui);
    assert_eq!(list.selected(&ui), 7);
    assert_eq!(seen.borrow().len(), 1);

    // Second visible row, scrolled by 6.
    ui.on_event(list, mouse(MouseButton::RIGHT, 5, 2 + 15));
    flush(&mut ui);
    // The sign only travels with the command.
    assert_eq!(list.selected(&ui), 7);
    assert_eq!(ui.property(list, Property::ListSelect), Some(Value::Int(7)));
    assert_eq!(seen.borrow().last().map(|c| c.value), Some(-7));

    ui.on_event(list, mouse(MouseButton::WHEEL, 5, 5));
    assert_eq!(scroll.pos(&ui), 5);

    ui.set_property(list, Property::ListItems, items).unwrap();
    assert_eq!(list.selected(&ui), 0);
    assert_eq!(scroll.pos(&ui), 0);
}

#[test]
fn test_list_select_at_integer_limits() {
    let (mut ui, _handle, main) = setup();
    let list = List::new(&mut ui, main, "files", Rect::new(0, 0, 100, 60)).unwrap();
    let seen = record_commands(&mut ui, main);
    let items: Vec<String> = (0..3).map(|i| format!("item {}", i)).collect();
    ui.set_property(list, Property::ListItems, items).unwrap();

    for value in [i32::MIN, i32::MAX, -3, 3] {
        ui.set_property(list, Property::ListSelect, value).unwrap();
    }
    ui.on_event(list, mouse(MouseButton::RIGHT, 5, i32::MAX));
    ui.on_event(list, mouse(MouseButton::LEFT, 5, i32::MIN));
    flush(&mut ui);
    assert_eq!(list.selected(&ui), 0);
    assert!(seen.borrow().is_empty());

    ui.set_property(list, Property::ListSelect, -2).unwrap();
    flush(&mut ui);
    assert_eq!(list.selected(&ui), 2);
    assert_eq!(seen.borrow().last().map(|c| c.value), Some(-2));
}

#[test]
fn test_list_draws_visible_rows() {
    let (mut ui, handle, main) = setup();
    let list = List::new(&mut ui, main, "files", Rect::new(0, 0, 100, 30)).unwrap();
    let items: Vec<String> = ["a", "b", "c", "d"].map(String::from).to_vec();
    ui.set_property(list, Property::ListItems, items).unwrap();
    ui.set_property(list, Property::ListSelect, 1).unwrap();
    flush(&mut ui);
    handle.clear_calls();

    handle.push_event(NativeEvent::Expose {
        target: list.id(),
        rect: Rect::new(0, 0, 100, 30),
    });
    flush(&mut ui);

    let texts: Vec<_> = handle
        .calls_for(list)
        .into_iter()
        .filter_map(|c| match c {
            BackendCall::Text { pos, text, .. } => Some((pos, text)),
            _ => None,
        })
        .collect();
    assert_eq!(
        texts,
        vec![
            (Point::new(8, 2), "a".to_string()),
            (Point::new(2, 17), ">".to_string()),
            (Point::new(8, 17), "b".to_string()),
            (Point::new(8, 32), "c".to_string()),
        ]
    );
}

#[test]
fn test_list_redirects_keys_and_focus_to_scroll() {
    let (mut ui, handle, main) = setup();
    let list = List::new(&mut ui, main, "files", Rect::new(0, 0, 100, 60)).unwrap();
    let scroll = list.scroll(&ui).unwrap();

    let keys = Rc::new(RefCell::new(Vec::new()));
    let sink = keys.clone();
    ui.capture(list, EventType::Key, move |_ui, id, _event| {
        sink.borrow_mut().push(id);
        true
    });
    ui.on_event(scroll, key(Key::DOWN));
    assert_eq!(keys.borrow().as_slice(), &[scroll.id()]);

    ui.focus(list);
    assert_eq!(
        handle.count(|c| matches!(c, BackendCall::Focus { id } if *id == scroll.id())),
        1
    );
}
