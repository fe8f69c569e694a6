//! Reports every event a main window receives on standard output.
//!
//! A background thread sends the window a command every ten seconds.
//!
//! Run with: cargo run --example events

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use sparta::prelude::*;
use sparta::{KeyEvent, MouseEvent};

fn main() -> Result<(), sparta::UiError> {
    let mut ui = sparta::init_or_exit(Config::from_env());
    let main = MainWindow::new(&mut ui, "main", "Event Window")?;

    // Returning false lets the window's default behavior run afterwards.
    ui.capture(main, EventType::Close, |_ui, _id, event| {
        println!("Ev:{}", event.event_type());
        false
    });
    ui.capture(main, EventType::Command, |ui, _id, event| {
        if let Event::Command(command) = event {
            let source = command
                .source
                .and_then(|source| ui.name(source).map(str::to_string))
                .unwrap_or_else(|| "null".to_string());
            println!("Ev:{}\tSrc:{}\tVal:{}", event.event_type(), source, command.value);
        }
        false
    });
    ui.capture(main, EventType::Configure, |_ui, _id, event| {
        if let Event::Configure(configure) = event {
            print_rect(event.event_type(), configure.rect);
        }
        false
    });
    ui.capture(main, EventType::Expose, |_ui, _id, event| {
        if let Event::Expose(expose) = event {
            print_rect(event.event_type(), expose.rect);
        }
        false
    });
    ui.capture(main, EventType::Key, |_ui, _id, event| {
        if let Event::Key(key) = event {
            print_key(key);
        }
        false
    });
    ui.capture(main, EventType::Mouse, |_ui, _id, event| {
        if let Event::Mouse(mouse) = event {
            print_mouse(mouse);
        }
        false
    });

    let sender = ui.event_sender();
    let dest = main.id();
    std::thread::spawn(move || {
        loop {
            std::thread::sleep(Duration::from_secs(10));
            let command = CommandEvent {
                source: None,
                value: pseudo_random() % 255,
            };
            if let Err(e) = sender.send(dest, command) {
                eprintln!("stopping command thread: {}", e);
                break;
            }
        }
    });

    ui.run()
}

fn print_rect(ty: EventType, rect: Rect) {
    println!(
        "Ev:{}\tMinX:{}\tMinY:{}\tMaxX:{}\tMaxY:{}",
        ty, rect.min.x, rect.min.y, rect.max.x, rect.max.y
    );
}

fn print_key(key: &KeyEvent) {
    let press = if key.key.is_release() { "release" } else { "press" };
    let value = match key.key.as_char().filter(|_| !key.key.is_release()) {
        Some(c) => c.to_string(),
        None => key.key.0.to_string(),
    };
    println!(
        "Ev:{}\t{}\tVal:{}\tSt:{}\tX:{}\tY:{}",
        EventType::Key,
        press,
        value,
        key.state.bits(),
        key.loc.x,
        key.loc.y
    );
}

fn print_mouse(mouse: &MouseEvent) {
    let button = match mouse.button {
        MouseButton::WHEEL => "up",
        MouseButton::WHEEL_DOWN => "down",
        b if b.0.abs() == MouseButton::LEFT.0 => "left",
        b if b.0.abs() == MouseButton::RIGHT.0 => "right",
        b if b.0.abs() == MouseButton::MIDDLE.0 => "center",
        _ => "",
    };
    let press = if button.is_empty() {
        "move"
    } else if mouse.button.is_press() {
        "press"
    } else {
        "release"
    };
    println!(
        "Ev:{}\t{}\t{}\tSt:{}\tX:{}\tY:{}",
        EventType::Mouse,
        press,
        button,
        mouse.state.bits(),
        mouse.loc.x,
        mouse.loc.y
    );
}

/// A value scrambled from the clock.
fn pseudo_random() -> i32 {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| d.subsec_nanos());
    (nanos.wrapping_mul(2_654_435_761) >> 8) as i32
}
