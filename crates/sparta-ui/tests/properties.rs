//! Property reads and writes through the mock backend.

use std::time::Duration;

use sparta_core::{Rect, Rgba};
use sparta_test_utils::{BackendCall, MockBackend, MockHandle};
use sparta_ui::backend::WindowProperty;
use sparta_ui::property::ValueType;
use sparta_ui::{
    Button, Canvas, MainWindow, NativeEvent, Property, PropertyError, Scroll, Ui, Value,
};

fn setup_with(backend: MockBackend) -> (Ui, MockHandle, MainWindow) {
    let handle = backend.handle();
    let mut ui = Ui::new(backend);
    let main = MainWindow::new(&mut ui, "main", "Test").unwrap();
    (ui, handle, main)
}

fn setup() -> (Ui, MockHandle, MainWindow) {
    setup_with(MockBackend::new())
}

fn is_foreground(call: &BackendCall) -> bool {
    matches!(
        call,
        BackendCall::SetProperty {
            property: WindowProperty::Foreground(_),
            ..
        }
    )
}

#[test]
fn test_geometry_round_trip() {
    let (mut ui, _handle, main) = setup();
    let button = Button::new(&mut ui, main, "ok", "Ok", Rect::new(0, 0, 40, 20)).unwrap();
    let rect = Rect::new(10, 10, 70, 30);

    ui.set_property(button, Property::Geometry, rect).unwrap();
    assert_eq!(ui.property(button, Property::Geometry), Some(Value::Rect(rect)));
}

#[test]
fn test_geometry_waits_for_confirmation() {
    let (mut ui, handle, main) = setup_with(MockBackend::new().with_async_geometry());
    let button = Button::new(&mut ui, main, "ok", "Ok", Rect::new(0, 0, 40, 20)).unwrap();
    let rect = Rect::new(10, 10, 70, 30);

    ui.set_property(button, Property::Geometry, rect).unwrap();
    assert_eq!(ui.geometry(button), Some(Rect::new(0, 0, 40, 20)));

    handle.push_event(NativeEvent::Configure {
        target: button.id(),
        rect,
    });
    ui.step(Some(Duration::ZERO)).unwrap();
    assert_eq!(ui.geometry(button), Some(rect));
}

#[test]
fn test_unchanged_geometry_is_not_forwarded() {
    let (mut ui, handle, main) = setup();
    let rect = Rect::new(0, 0, 40, 20);
    let button = Button::new(&mut ui, main, "ok", "Ok", rect).unwrap();
    handle.clear_calls();

    ui.set_property(button, Property::Geometry, rect).unwrap();
    assert!(handle.calls().is_empty());
}

#[test]
fn test_foreground_is_forwarded_once() {
    let (mut ui, handle, main) = setup();

    ui.set_property(main, Property::Foreground, Rgba::RED).unwrap();
    ui.set_property(main, Property::Foreground, Rgba::RED).unwrap();
    assert_eq!(handle.count(is_foreground), 1);
    assert_eq!(ui.property(main, Property::Foreground), Some(Value::Color(Rgba::RED)));

    ui.set_property(main, Property::Foreground, Rgba::BLUE).unwrap();
    assert_eq!(handle.count(is_foreground), 2);
}

#[test]
fn test_type_mismatch_is_reported() {
    let (mut ui, _handle, main) = setup();

    let err = ui.set_property(main, Property::Caption, 5).unwrap_err();
    assert_eq!(
        err,
        PropertyError::TypeMismatch {
            key: Property::Caption,
            expected: ValueType::Str,
            actual: ValueType::Int,
        }
    );
    assert_eq!(ui.property(main, Property::Caption), Some(Value::from("Test")));
}

#[test]
fn test_unsupported_keys_are_ignored() {
    let (mut ui, _handle, main) = setup();

    assert_eq!(ui.property(main, Property::ButtonValue), None);
    assert_eq!(ui.set_property(main, Property::ButtonValue, 3), Ok(()));
    assert_eq!(ui.property(main, Property::Parent), None);
}

#[test]
fn test_caption_forwarded_for_roots_only() {
    let (mut ui, handle, main) = setup();
    let button = Button::new(&mut ui, main, "ok", "Ok", Rect::new(0, 0, 40, 20)).unwrap();
    handle.clear_calls();

    ui.set_property(main, Property::Caption, "Renamed").unwrap();
    ui.set_property(button, Property::Caption, "Cancel").unwrap();

    let captions: Vec<_> = handle
        .calls()
        .into_iter()
        .filter(|c| {
            matches!(
                c,
                BackendCall::SetProperty {
                    property: WindowProperty::Caption(_),
                    ..
                }
            )
        })
        .collect();
    assert_eq!(
        captions,
        vec![BackendCall::SetProperty {
            id: main.id(),
            property: WindowProperty::Caption("Renamed".to_string()),
        }]
    );
    assert_eq!(ui.property(button, Property::Caption), Some(Value::from("Cancel")));
    // The button redraws its new caption.
    assert_eq!(
        handle.count(|c| matches!(c, BackendCall::Update { id } if *id == button.id())),
        1
    );
}

#[test]
fn test_childs_and_parent() {
    let (mut ui, _handle, main) = setup();
    let canvas = Canvas::new(&mut ui, main, "canvas", Rect::new(0, 0, 50, 50)).unwrap();
    let button = Button::new(&mut ui, canvas, "ok", "Ok", Rect::new(0, 0, 40, 20)).unwrap();

    assert_eq!(
        ui.property(main, Property::Childs),
        Some(Value::Widgets(vec![canvas.id()]))
    );
    assert_eq!(
        ui.property(button, Property::Parent),
        Some(Value::Widget(Some(canvas.id())))
    );

    // A widget already listed is not appended twice.
    ui.set_property(main, Property::Childs, canvas.id()).unwrap();
    assert_eq!(
        ui.property(main, Property::Childs),
        Some(Value::Widgets(vec![canvas.id()]))
    );

    ui.set_property(button, Property::Parent, None::<sparta_ui::WidgetId>).unwrap();
    assert_eq!(ui.property(button, Property::Parent), Some(Value::Widget(None)));
    assert!(ui.children(canvas).is_empty());

    ui.set_property(main, Property::Childs, None::<sparta_ui::WidgetId>).unwrap();
    assert_eq!(ui.property(main, Property::Childs), Some(Value::Widgets(Vec::new())));
}

#[test]
fn test_target_defaults_to_parent() {
    let (mut ui, _handle, main) = setup();
    let canvas = Canvas::new(&mut ui, main, "canvas", Rect::new(0, 0, 50, 50)).unwrap();
    let scroll = Scroll::new(
        &mut ui,
        main,
        "scroll",
        Rect::new(0, 0, 10, 50),
        sparta_ui::Orientation::Vertical,
    )
    .unwrap();

    assert_eq!(
        ui.property(scroll, Property::Target),
        Some(Value::Widget(Some(main.id())))
    );
    ui.set_property(scroll, Property::Target, canvas.id()).unwrap();
    assert_eq!(
        ui.property(scroll, Property::Target),
        Some(Value::Widget(Some(canvas.id())))
    );
    ui.set_property(scroll, Property::Target, None::<sparta_ui::WidgetId>).unwrap();
    assert_eq!(
        ui.property(scroll, Property::Target),
        Some(Value::Widget(Some(main.id())))
    );
}

#[test]
fn test_data_is_shared() {
    let (mut ui, _handle, main) = setup();

    ui.set_property(main, Property::Data, Value::data(17u32)).unwrap();
    let data = ui.property(main, Property::Data).unwrap();
    assert_eq!(data.downcast_data::<u32>(), Some(&17));
    assert_eq!(data.downcast_data::<i64>(), None);
}

#[test]
fn test_stale_widget_is_ignored() {
    let (mut ui, _handle, main) = setup();
    let canvas = Canvas::new(&mut ui, main, "canvas", Rect::new(0, 0, 50, 50)).unwrap();
    ui.close_window(canvas);

    assert_eq!(ui.property(canvas, Property::Name), None);
    assert_eq!(ui.set_property(canvas, Property::Name, "gone"), Ok(()));
}
