//! Event delivery, handlers, modal blocking and command queues.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::thread;
use std::time::Duration;

use sparta_core::{Point, Rect};
use sparta_test_utils::{BackendCall, MockBackend, MockHandle};
use sparta_ui::{
    Button, Canvas, CommandEvent, Event, EventType, Key, KeyEvent, MainWindow, Modifiers,
    MouseButton, MouseEvent, NativeEvent, SendError, Ui, UiBuilder, WidgetId,
};

fn setup() -> (Ui, MockHandle, MainWindow) {
    let backend = MockBackend::new();
    let handle = backend.handle();
    let mut ui = Ui::new(backend);
    let main = MainWindow::new(&mut ui, "main", "Test").unwrap();
    (ui, handle, main)
}

fn press(button: MouseButton, x: i32, y: i32) -> MouseEvent {
    MouseEvent {
        button,
        state: Modifiers::empty(),
        loc: Point::new(x, y),
    }
}

/// Records the commands arriving at `id`.
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

#[test]
fn test_handler_consumes_event() {
    let (mut ui, _handle, main) = setup();
    let canvas = Canvas::new(&mut ui, main, "canvas", Rect::new(0, 0, 50, 50)).unwrap();
    let at_main = record_commands(&mut ui, main);

    ui.capture(canvas, EventType::Command, |_ui, _id, _event| true);
    ui.on_event(canvas, CommandEvent { source: None, value: 1 });
    assert!(at_main.borrow().is_empty());

    ui.release_capture(canvas, EventType::Command);
    ui.on_event(canvas, CommandEvent { source: None, value: 2 });
    assert_eq!(at_main.borrow().len(), 1);
    assert_eq!(at_main.borrow()[0].value, 2);
}

#[test]
fn test_later_capture_replaces_earlier() {
    let (mut ui, _handle, main) = setup();
    let first = Rc::new(Cell::new(0));
    let second = Rc::new(Cell::new(0));

    let counter = first.clone();
    ui.capture(main, EventType::Command, move |_ui, _id, _event| {
        counter.set(counter.get() + 1);
        true
    });
    let counter = second.clone();
    ui.capture(main, EventType::Command, move |_ui, _id, _event| {
        counter.set(counter.get() + 1);
        true
    });

    ui.on_event(main, CommandEvent { source: None, value: 0 });
    assert_eq!(first.get(), 0);
    assert_eq!(second.get(), 1);
}

#[test]
fn test_reentrant_handler_is_skipped() {
    let (mut ui, _handle, main) = setup();
    let calls = Rc::new(Cell::new(0));
    let counter = calls.clone();
    ui.capture(main, EventType::Command, move |ui, id, event| {
        counter.set(counter.get() + 1);
        ui.on_event(id, *event);
        true
    });

    ui.on_event(main, CommandEvent { source: None, value: 0 });
    assert_eq!(calls.get(), 1);
}

#[test]
fn test_block_covers_descendants_only() {
    let (mut ui, _handle, main) = setup();
    let dialog = Canvas::new(&mut ui, main, "dialog", Rect::new(0, 0, 50, 50)).unwrap();
    let inner = Button::new(&mut ui, dialog, "inner", "x", Rect::new(0, 0, 10, 10)).unwrap();
    let other = Button::new(&mut ui, main, "other", "y", Rect::new(60, 0, 80, 10)).unwrap();

    assert!(!ui.is_block());
    ui.block(dialog);
    assert!(ui.is_block());
    assert!(ui.is_blocker(dialog));
    assert!(ui.is_blocker(inner));
    assert!(!ui.is_blocker(other));
    assert!(!ui.is_blocker(main));

    // A second block does not move the blocker.
    ui.block(other);
    assert!(!ui.is_blocker(other));

    ui.unblock(other);
    assert!(ui.is_block());
    ui.unblock(inner);
    assert!(!ui.is_block());
}

#[test]
fn test_blocked_input_never_reaches_handlers() {
    let (mut ui, _handle, main) = setup();
    let dialog = Canvas::new(&mut ui, main, "dialog", Rect::new(0, 0, 50, 50)).unwrap();
    let other = Button::new(&mut ui, main, "other", "y", Rect::new(60, 0, 80, 10)).unwrap();
    let at_main = record_commands(&mut ui, main);

    let mouse_calls = Rc::new(Cell::new(0));
    let counter = mouse_calls.clone();
    ui.capture(other, EventType::Mouse, move |_ui, _id, _event| {
        counter.set(counter.get() + 1);
        false
    });

    ui.block(dialog);
    ui.on_event(other, press(MouseButton::LEFT, 1, 1));
    ui.on_event(
        other,
        KeyEvent {
            key: Key::RETURN,
            state: Modifiers::empty(),
            loc: Point::ZERO,
        },
    );
    ui.step(Some(Duration::ZERO)).unwrap();
    assert_eq!(mouse_calls.get(), 0);
    assert!(at_main.borrow().is_empty());

    ui.unblock(dialog);
    ui.on_event(other, press(MouseButton::LEFT, 1, 1));
    ui.step(Some(Duration::ZERO)).unwrap();
    assert_eq!(mouse_calls.get(), 1);
    assert_eq!(at_main.borrow().len(), 1);
}

#[test]
fn test_blocked_main_window_refuses_close() {
    let (mut ui, handle, main) = setup();
    let dialog = MainWindow::new(&mut ui, "dialog", "Dialog").unwrap();
    ui.block(dialog);

    handle.push_event(NativeEvent::Close { target: main.id() });
    assert!(ui.step(Some(Duration::ZERO)).unwrap());
    assert!(ui.is_alive(main));

    handle.push_event(NativeEvent::Close { target: dialog.id() });
    ui.step(Some(Duration::ZERO)).unwrap();
    assert!(!ui.is_alive(dialog));
    // Closing the blocker lifts the block.
    assert!(!ui.is_block());
}

#[test]
fn test_send_event_is_deferred() {
    let (mut ui, _handle, main) = setup();
    let seen = record_commands(&mut ui, main);

    ui.send_event(main, CommandEvent { source: None, value: 7 });
    assert!(seen.borrow().is_empty());

    ui.step(Some(Duration::ZERO)).unwrap();
    assert_eq!(seen.borrow().as_slice(), &[CommandEvent { source: None, value: 7 }]);
}

#[test]
fn test_cross_thread_command() {
    let (mut ui, handle, main) = setup();
    let seen = record_commands(&mut ui, main);
    let sender = ui.event_sender();
    let dest = main.id();

    thread::spawn(move || {
        sender
            .send(dest, CommandEvent { source: None, value: 42 })
            .unwrap();
    })
    .join()
    .unwrap();

    ui.step(Some(Duration::ZERO)).unwrap();
    assert_eq!(seen.borrow().as_slice(), &[CommandEvent { source: None, value: 42 }]);
    assert_eq!(handle.wake_count(), 1);
}

#[test]
fn test_run_wakes_for_injected_command() {
    let (mut ui, _handle, main) = setup();
    let received = Rc::new(Cell::new(None));
    let slot = received.clone();
    ui.capture(main, EventType::Command, move |ui, id, event| {
        if let Event::Command(command) = event {
            slot.set(Some((command.source, command.value)));
        }
        ui.close_window(id);
        true
    });

    let sender = ui.event_sender();
    let dest = main.id();
    let timer = thread::spawn(move || {
        thread::sleep(Duration::from_millis(20));
        sender.send(dest, CommandEvent { source: None, value: 42 })
    });

    ui.run().unwrap();
    assert_eq!(timer.join().unwrap(), Ok(()));
    assert_eq!(received.get(), Some((None, 42)));
    assert!(!ui.is_running());
}

#[test]
fn test_injection_queue_is_bounded() {
    let backend = MockBackend::new();
    let mut ui = UiBuilder::new()
        .config(sparta_core::Config::default().with_injection_capacity(1))
        .build(backend);
    let main = MainWindow::new(&mut ui, "main", "Test").unwrap();
    let sender = ui.event_sender();

    let command = CommandEvent { source: None, value: 1 };
    assert_eq!(sender.send(main.id(), command), Ok(()));
    assert_eq!(sender.send(main.id(), command), Err(SendError::Full));

    drop(ui);
    assert_eq!(sender.send(main.id(), command), Err(SendError::Disconnected));
}

#[test]
fn test_commands_to_closed_widgets_are_dropped() {
    let (mut ui, _handle, main) = setup();
    let canvas = Canvas::new(&mut ui, main, "canvas", Rect::new(0, 0, 50, 50)).unwrap();
    let at_main = record_commands(&mut ui, main);

    ui.send_event(canvas, CommandEvent { source: None, value: 3 });
    ui.close_window(canvas);
    ui.step(Some(Duration::ZERO)).unwrap();
    assert!(at_main.borrow().is_empty());
}

#[test]
fn test_mouse_press_focuses_target() {
    let (mut ui, handle, main) = setup();
    let canvas = Canvas::new(&mut ui, main, "canvas", Rect::new(0, 0, 50, 50)).unwrap();

    handle.push_event(NativeEvent::Mouse {
        target: canvas.id(),
        event: press(MouseButton::MOTION, 3, 3),
    });
    handle.push_event(NativeEvent::Mouse {
        target: canvas.id(),
        event: press(MouseButton::WHEEL, 3, 3),
    });
    ui.step(Some(Duration::ZERO)).unwrap();
    assert_eq!(handle.count(|c| matches!(c, BackendCall::Focus { .. })), 0);

    handle.push_event(NativeEvent::Mouse {
        target: canvas.id(),
        event: press(MouseButton::LEFT, 3, 3),
    });
    ui.step(Some(Duration::ZERO)).unwrap();
    assert_eq!(
        handle.count(|c| matches!(c, BackendCall::Focus { id } if *id == canvas.id())),
        1
    );
}

#[test]
fn test_mouse_bubbles_in_parent_coordinates() {
    let (mut ui, _handle, main) = setup();
    let canvas = Canvas::new(&mut ui, main, "canvas", Rect::new(20, 30, 80, 90)).unwrap();
    let seen = Rc::new(Cell::new(None));
    let slot = seen.clone();
    ui.capture(main, EventType::Mouse, move |_ui, _id, event| {
        if let Event::Mouse(mouse) = event {
            slot.set(Some(mouse.loc));
        }
        true
    });

    ui.on_event(canvas, press(MouseButton::MIDDLE, 5, 6));
    assert_eq!(seen.get(), Some(Point::new(25, 36)));
}

#[test]
fn test_child_close_request_is_ignored() {
    let (mut ui, handle, main) = setup();
    let canvas = Canvas::new(&mut ui, main, "canvas", Rect::new(0, 0, 50, 50)).unwrap();

    handle.push_event(NativeEvent::Close { target: canvas.id() });
    assert!(ui.step(Some(Duration::ZERO)).unwrap());
    assert!(ui.is_alive(canvas));
    assert!(handle.closed().is_empty());
}
