//! Buttons, a list, a scroll bar and a modal dialog.
//!
//! Every widget sends its commands to the main window, which shows the last
//! one in a status canvas. The "Dialog" button opens a second window that
//! blocks input to the first until it is dismissed.
//!
//! Run with: cargo run --example widgets

use std::cell::RefCell;

use sparta::prelude::*;

const DIALOG: i32 = 1;
const QUIT: i32 = 2;
const DISMISS: i32 = 3;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut ui = sparta::init_or_exit(Config::from_env());
    let units = ui.units();
    let main = MainWindow::with_geometry(
        &mut ui,
        "main",
        "Widgets",
        Rect::new(100, 100, 60 * units.width, 100 + 22 * units.height),
    )?;

    let list = List::new(
        &mut ui,
        main,
        "colors",
        Rect::new(10, 10, 30 * units.width, 10 * units.height),
    )?;
    let colors = ["red", "orange", "yellow", "green", "blue", "indigo", "violet"];
    ui.set_property(list, Property::ListItems, &colors[..])?;

    let scroll = Scroll::new(
        &mut ui,
        main,
        "level",
        Rect::new(10, 12 * units.height, 30 * units.width, 13 * units.height),
        Orientation::Horizontal,
    )?;
    ui.set_property(scroll, Property::ScrollSize, 100)?;
    ui.set_property(scroll, Property::ScrollPage, 10)?;

    let button_row = 15 * units.height;
    let dialog = Button::new(
        &mut ui,
        main,
        "dialog",
        "Dialog",
        Rect::new(10, button_row, 10 + 10 * units.width, button_row + 2 * units.height),
    )?;
    dialog.set_value(&mut ui, DIALOG);
    let quit = Button::new(
        &mut ui,
        main,
        "quit",
        "Quit",
        Rect::new(
            20 + 10 * units.width,
            button_row,
            20 + 20 * units.width,
            button_row + 2 * units.height,
        ),
    )?;
    quit.set_value(&mut ui, QUIT);

    let status = Canvas::new(
        &mut ui,
        main,
        "status",
        Rect::new(10, 19 * units.height, 58 * units.width, 21 * units.height),
    )?;
    ui.set_property(status, Property::Border, true)?;
    ui.set_property(status, Property::Data, Value::data(RefCell::new(String::new())))?;
    ui.capture(status, EventType::Expose, |ui, id, _event| {
        let text = ui
            .property(id, Property::Data)
            .and_then(|v| v.downcast_data::<RefCell<String>>().map(|s| s.borrow().clone()))
            .unwrap_or_default();
        if let Some(canvas) = Canvas::from_id(ui, id) {
            canvas.draw(
                ui,
                &Shape::Text {
                    pos: Point::new(4, 4),
                    text,
                },
            );
        }
        false
    });

    ui.capture(main, EventType::Command, move |ui, main, event| {
        let Event::Command(command) = event else {
            return false;
        };
        let Some(source) = command.source else {
            return true;
        };
        let message = if source == list.id() {
            describe_selection(ui, list, command.value)
        } else if source == scroll.id() {
            format!("level {}", command.value)
        } else {
            match command.value {
                DIALOG => {
                    open_dialog(ui, main);
                    "dialog open".to_string()
                }
                QUIT => {
                    ui.close_window(main);
                    return true;
                }
                DISMISS => "dialog dismissed".to_string(),
                other => format!("unknown command {}", other),
            }
        };
        show_status(ui, status, message);
        true
    });

    ui.run()?;
    Ok(())
}

fn describe_selection(ui: &Ui, list: List, value: i32) -> String {
    let items = list.items(ui);
    let name = items
        .get(value.unsigned_abs() as usize)
        .map_or("?", String::as_str);
    if value < 0 {
        format!("{} (right click)", name)
    } else {
        format!("{} selected", name)
    }
}

fn show_status(ui: &mut Ui, status: Canvas, message: String) {
    if let Some(value) = ui.property(status, Property::Data)
        && let Some(text) = value.downcast_data::<RefCell<String>>()
    {
        *text.borrow_mut() = message;
    }
    ui.update(status);
}

/// A second main window holding the input block until it closes.
fn open_dialog(ui: &mut Ui, owner: WidgetId) {
    let units = ui.units();
    let Ok(dialog) = MainWindow::with_geometry(
        ui,
        "dialog",
        "Dialog",
        Rect::new(200, 200, 200 + 30 * units.width, 200 + 6 * units.height),
    ) else {
        tracing::error!("failed to open dialog");
        return;
    };
    let ok = Button::new(
        ui,
        dialog,
        "ok",
        "Ok",
        Rect::new(10, 2 * units.height, 10 + 8 * units.width, 4 * units.height),
    );
    match ok {
        Ok(ok) => ok.set_value(ui, DISMISS),
        Err(e) => tracing::error!("failed to create dialog button: {}", e),
    }

    ui.capture(dialog, EventType::Command, move |ui, dialog, event| {
        if let Event::Command(command) = event {
            ui.send_event(
                owner,
                CommandEvent {
                    source: Some(dialog),
                    value: command.value,
                },
            );
        }
        // Closing the dialog releases the block.
        ui.close_window(dialog);
        true
    });
    ui.block(dialog);
}
