use sparta_core::{Point, Rect};

use crate::backend::ColorRole;
use crate::error::UiResult;
use crate::event::{CommandEvent, Event};
use crate::keys::MouseButton;
use crate::property::{Property, Value};
use crate::ui::Ui;
use crate::widget::{Behavior, WidgetId, WidgetKind};

super::widget_handle!(
    /// A push button. A left press sends a command carrying the button's
    /// value to its target.
    Button
);

#[derive(Debug, Default)]
struct ButtonState {
    value: i32,
}

impl Button {
    pub fn new(
        ui: &mut Ui,
        parent: impl Into<WidgetId>,
        name: &str,
        caption: &str,
        rect: Rect,
    ) -> UiResult<Self> {
        ui.create_widget(
            WidgetKind::Button,
            Some(parent.into()),
            name,
            caption,
            rect,
            Box::new(ButtonState::default()),
        )
        .map(Self)
    }

    /// Value carried by the commands this button sends.
    pub fn value(&self, ui: &Ui) -> i32 {
        ui.state::<ButtonState>(self.0).map_or(0, |s| s.value)
    }

    pub fn set_value(&self, ui: &mut Ui, value: i32) {
        if let Some(state) = ui.state_mut::<ButtonState>(self.0) {
            state.value = value;
        }
    }
}

pub(crate) struct ButtonBehavior;

impl ButtonBehavior {
    fn paint(&self, ui: &mut Ui, id: WidgetId) {
        let Some(base) = ui.base(id) else {
            return;
        };
        let geometry = base.geometry;
        let foreground = base.foreground;
        let caption = base.caption.clone();
        let units = ui.units();
        let Some(mut painter) = ui.painter(id) else {
            return;
        };

        let width = caption.chars().count() as i32 * units.width;
        let pos = Point::new(
            (geometry.dx() - width) / 2,
            (geometry.dy() - units.height) / 2,
        );
        painter.set_color(ColorRole::Foreground, foreground);
        painter.text(pos, &caption);
        painter.border(geometry);
    }
}

impl Behavior for ButtonBehavior {
    fn kind(&self) -> WidgetKind {
        WidgetKind::Button
    }

    fn supports(&self, key: Property) -> bool {
        matches!(
            key,
            Property::Caption
                | Property::Data
                | Property::Geometry
                | Property::Parent
                | Property::Name
                | Property::Foreground
                | Property::Background
                | Property::Target
                | Property::ButtonValue
        )
    }

    fn property(&self, ui: &Ui, id: WidgetId, key: Property) -> Option<Value> {
        match key {
            Property::ButtonValue => ui
                .state::<ButtonState>(id)
                .map(|s| Value::Int(s.value)),
            _ => ui.common_property(id, key),
        }
    }

    fn set_property(&self, ui: &mut Ui, id: WidgetId, key: Property, value: Value) {
        match (key, value) {
            (Property::ButtonValue, Value::Int(v)) => {
                if let Some(state) = ui.state_mut::<ButtonState>(id) {
                    state.value = v;
                }
            }
            (Property::Caption, Value::Str(caption)) => {
                if ui.set_caption(id, caption) {
                    ui.update(id);
                }
            }
            (key, value) => ui.set_common_property(id, key, value),
        }
    }

    fn on_event(&self, ui: &mut Ui, id: WidgetId, event: &Event) {
        match event {
            Event::Close(_) => {
                ui.run_handler(id, event);
            }
            Event::Command(_) | Event::Key(_) => {
                if !ui.run_handler(id, event) {
                    ui.forward_to_parent(id, *event);
                }
            }
            Event::Configure(configure) => {
                super::store_geometry(ui, id, configure.rect);
                ui.run_handler(id, event);
            }
            Event::Expose(_) => {
                if !ui.run_handler(id, event) {
                    self.paint(ui, id);
                }
            }
            Event::Mouse(mouse) => {
                if ui.run_handler(id, event) {
                    return;
                }
                if mouse.button == MouseButton::LEFT {
                    let value = ui.state::<ButtonState>(id).map_or(0, |s| s.value);
                    if let Some(target) = ui.command_target(id) {
                        ui.send_event(
                            target,
                            CommandEvent {
                                source: Some(id),
                                value,
                            },
                        );
                    }
                } else {
                    super::bubble_mouse(ui, id, *mouse);
                }
            }
        }
    }
}
