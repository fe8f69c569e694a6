use sparta_core::{Rect, Rgba};

use crate::backend::ColorRole;
use crate::error::UiResult;
use crate::event::Event;
use crate::property::{Property, Value};
use crate::surface::Shape;
use crate::ui::Ui;
use crate::widget::{Behavior, WidgetId, WidgetKind};

super::widget_handle!(
    /// A free drawing area that can also hold other widgets.
    ///
    /// Draw from an expose handler, or bracket drawing elsewhere with
    /// [`Canvas::draw_mode`].
    Canvas
);

#[derive(Debug, Default)]
struct CanvasState {
    border: bool,
}

impl Canvas {
    pub fn new(ui: &mut Ui, parent: impl Into<WidgetId>, name: &str, rect: Rect) -> UiResult<Self> {
        ui.create_widget(
            WidgetKind::Canvas,
            Some(parent.into()),
            name,
            "",
            rect,
            Box::new(CanvasState::default()),
        )
        .map(Self)
    }

    /// Opens or closes an explicit drawing session outside expose handling.
    pub fn draw_mode(&self, ui: &mut Ui, mode: bool) {
        ui.draw_mode(self.0, mode);
    }

    /// Draws `shape` if the canvas is currently drawable, otherwise does
    /// nothing.
    pub fn draw(&self, ui: &mut Ui, shape: &Shape) {
        match ui.painter(self.0) {
            Some(mut painter) => painter.draw(shape),
            None => tracing::trace!("canvas {} not drawable, shape dropped", self.0),
        }
    }

    /// Changes a drawing color for the current session.
    pub fn set_color(&self, ui: &mut Ui, role: ColorRole, color: Rgba) {
        if let Some(mut painter) = ui.painter(self.0) {
            painter.set_color(role, color);
        }
    }
}

pub(crate) struct CanvasBehavior;

impl Behavior for CanvasBehavior {
    fn kind(&self) -> WidgetKind {
        WidgetKind::Canvas
    }

    fn supports(&self, key: Property) -> bool {
        matches!(
            key,
            Property::Childs
                | Property::Data
                | Property::Geometry
                | Property::Parent
                | Property::Name
                | Property::Foreground
                | Property::Background
                | Property::Border
        )
    }

    fn property(&self, ui: &Ui, id: WidgetId, key: Property) -> Option<Value> {
        match key {
            Property::Border => ui.state::<CanvasState>(id).map(|s| Value::Bool(s.border)),
            _ => ui.common_property(id, key),
        }
    }

    fn set_property(&self, ui: &mut Ui, id: WidgetId, key: Property, value: Value) {
        match (key, value) {
            (Property::Border, Value::Bool(border)) => {
                let changed = ui
                    .state_mut::<CanvasState>(id)
                    .is_some_and(|s| std::mem::replace(&mut s.border, border) != border);
                if changed {
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
                super::close_children(ui, id);
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
                if ui.run_handler(id, event) {
                    return;
                }
                for child in ui.children(id) {
                    ui.update(child);
                }
                let border = ui.state::<CanvasState>(id).is_some_and(|s| s.border);
                let geometry = ui.geometry(id).unwrap_or(Rect::ZERO);
                if border {
                    if let Some(mut painter) = ui.painter(id) {
                        painter.border(geometry);
                    }
                }
            }
            Event::Mouse(mouse) => {
                if !ui.run_handler(id, event) {
                    super::bubble_mouse(ui, id, *mouse);
                }
            }
        }
    }
}
