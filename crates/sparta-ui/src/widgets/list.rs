use sparta_core::{Point, Rect};

use super::scroll::{self, Orientation, Scroll};
use crate::backend::ColorRole;
use crate::error::UiResult;
use crate::event::{CommandEvent, Event, EventType, MouseEvent};
use crate::keys::MouseButton;
use crate::property::{Property, Value};
use crate::ui::Ui;
use crate::widget::{Behavior, WidgetId, WidgetKind};

/// Width of the embedded scroll bar.
const SCROLL_WIDTH: i32 = 10;
/// Inset of the rows from the list's top-left corner.
const MARGIN: i32 = 2;

super::widget_handle!(
    /// A selectable list of strings with an embedded vertical scroll bar.
    ///
    /// Selecting a row sends a command carrying its index to the target.
    /// A right click selects too, with the index negated in the command
    /// only.
    List
);

#[derive(Debug, Default)]
struct ListState {
    items: Vec<String>,
    /// Always a row index, whatever the sign of the selecting value.
    selected: i32,
    scroll: Option<WidgetId>,
}

impl List {
    pub fn new(ui: &mut Ui, parent: impl Into<WidgetId>, name: &str, rect: Rect) -> UiResult<Self> {
        let id = ui.create_widget(
            WidgetKind::List,
            Some(parent.into()),
            name,
            "",
            rect,
            Box::new(ListState::default()),
        )?;

        let scroll_name = format!("list{}Scroll", name);
        let scroll = Scroll::new(ui, id, &scroll_name, scroll_rect(rect), Orientation::Vertical);
        let scroll = match scroll {
            Ok(scroll) => scroll.id(),
            Err(e) => {
                ui.close_window(id);
                return Err(e);
            }
        };
        if let Some(state) = ui.state_mut::<ListState>(id) {
            state.scroll = Some(scroll);
        }
        let page = rows_per_page(ui, rect);
        scroll::set_page(ui, scroll, page);
        Ok(Self(id))
    }

    /// The embedded scroll bar.
    pub fn scroll(&self, ui: &Ui) -> Option<Scroll> {
        ui.state::<ListState>(self.0)
            .and_then(|s| s.scroll)
            .and_then(|id| Scroll::from_id(ui, id))
    }

    pub fn items<'a>(&self, ui: &'a Ui) -> &'a [String] {
        ui.state::<ListState>(self.0)
            .map(|s| s.items.as_slice())
            .unwrap_or_default()
    }

    pub fn selected(&self, ui: &Ui) -> i32 {
        ui.state::<ListState>(self.0).map_or(0, |s| s.selected)
    }
}

fn scroll_rect(list: Rect) -> Rect {
    Rect::new(list.dx() - SCROLL_WIDTH, 0, list.dx(), list.dy())
}

fn rows_per_page(ui: &Ui, geometry: Rect) -> i32 {
    let height = ui.units().height;
    if height > 0 { geometry.dy() / height } else { 0 }
}

fn scroll_of(ui: &Ui, id: WidgetId) -> Option<WidgetId> {
    ui.state::<ListState>(id).and_then(|s| s.scroll)
}

fn scroll_pos(ui: &Ui, id: WidgetId) -> i32 {
    scroll_of(ui, id)
        .and_then(|s| Scroll::from_id(ui, s))
        .map_or(0, |s| s.pos(ui))
}

fn set_items(ui: &mut Ui, id: WidgetId, items: Vec<String>) {
    let Some(state) = ui.state_mut::<ListState>(id) else {
        return;
    };
    let len = items.len() as i32;
    state.items = items;
    state.selected = 0;
    let scroll = state.scroll;

    if let Some(scroll) = scroll {
        scroll::set_size(ui, scroll, 0);
        scroll::set_size(ui, scroll, len);
        let page = rows_per_page(ui, ui.geometry(id).unwrap_or(Rect::ZERO));
        scroll::set_page(ui, scroll, page);
    }
    ui.update(id);
}

/// Selects row `|value|`, scrolls it into view and notifies the target.
/// Out-of-range rows are ignored.
fn select(ui: &mut Ui, id: WidgetId, value: i32) {
    let Some(state) = ui.state_mut::<ListState>(id) else {
        return;
    };
    let row = match i32::try_from(value.unsigned_abs()) {
        Ok(row) if (row as usize) < state.items.len() => row,
        _ => {
            tracing::trace!("list {} has no row {}", id, value.unsigned_abs());
            return;
        }
    };
    state.selected = row;
    let scroll = state.scroll;

    let page = rows_per_page(ui, ui.geometry(id).unwrap_or(Rect::ZERO));
    let pos = scroll_pos(ui, id);
    if let Some(scroll) = scroll {
        if pos > row || row > pos.saturating_add(page) {
            scroll::set_pos(ui, scroll, row);
        }
    }
    if let Some(target) = ui.command_target(id) {
        ui.send_event(
            target,
            CommandEvent {
                source: Some(id),
                value,
            },
        );
    }
    ui.update(id);
}

pub(crate) struct ListBehavior;

impl ListBehavior {
    fn paint(&self, ui: &mut Ui, id: WidgetId) {
        let (Some(state), Some(base)) = (ui.state::<ListState>(id), ui.base(id)) else {
            return;
        };
        let geometry = base.geometry;
        let foreground = base.foreground;
        let units = ui.units();
        let pos = scroll_pos(ui, id).max(0) as usize;
        let page = rows_per_page(ui, geometry);
        let selected = state.selected.max(0) as usize;

        let mut rows = Vec::new();
        for (i, item) in state.items.iter().skip(pos).enumerate() {
            if i as i32 > page {
                break;
            }
            rows.push((i as i32, pos + i == selected, item.clone()));
        }

        let Some(mut painter) = ui.painter(id) else {
            return;
        };
        painter.set_color(ColorRole::Foreground, foreground);
        for (i, marked, item) in rows {
            let y = i * units.height + MARGIN;
            if marked {
                painter.text(Point::new(MARGIN, y), ">");
            }
            painter.text(Point::new(MARGIN + units.width, y), &item);
        }
        painter.border(geometry);
    }

    fn mouse(&self, ui: &mut Ui, id: WidgetId, event: &MouseEvent) {
        let height = ui.units().height.max(1);
        let pos = scroll_pos(ui, id);
        let row = (event.loc.y.saturating_sub(MARGIN) / height).saturating_add(pos);
        match event.button {
            MouseButton::WHEEL | MouseButton::WHEEL_DOWN => {
                let step = if event.button == MouseButton::WHEEL { -1 } else { 1 };
                if let Some(scroll) = scroll_of(ui, id) {
                    scroll::set_pos(ui, scroll, pos.saturating_add(step));
                }
            }
            MouseButton::LEFT => select(ui, id, row),
            MouseButton::RIGHT => select(ui, id, row.saturating_neg()),
            _ => super::bubble_mouse(ui, id, *event),
        }
    }
}

impl Behavior for ListBehavior {
    fn kind(&self) -> WidgetKind {
        WidgetKind::List
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
                | Property::Target
                | Property::ListItems
                | Property::ListSelect
        )
    }

    fn property(&self, ui: &Ui, id: WidgetId, key: Property) -> Option<Value> {
        match key {
            Property::ListItems => ui
                .state::<ListState>(id)
                .map(|s| Value::Strings(s.items.clone())),
            Property::ListSelect => ui.state::<ListState>(id).map(|s| Value::Int(s.selected)),
            _ => ui.common_property(id, key),
        }
    }

    fn set_property(&self, ui: &mut Ui, id: WidgetId, key: Property, value: Value) {
        match (key, value) {
            (Property::ListItems, Value::Strings(items)) => set_items(ui, id, items),
            (Property::ListSelect, Value::Int(v)) => select(ui, id, v),
            (key, value) => ui.set_common_property(id, key, value),
        }
    }

    fn on_event(&self, ui: &mut Ui, id: WidgetId, event: &Event) {
        match event {
            Event::Close(_) => {
                ui.run_handler(id, event);
                super::close_children(ui, id);
            }
            Event::Command(command) => {
                if ui.run_handler(id, event) {
                    return;
                }
                let from_scroll = command.source.is_some() && command.source == scroll_of(ui, id);
                if from_scroll {
                    ui.update(id);
                } else {
                    ui.forward_to_parent(id, *event);
                }
            }
            Event::Configure(configure) => {
                super::store_geometry(ui, id, configure.rect);
                ui.run_handler(id, event);
                if let Some(scroll) = scroll_of(ui, id) {
                    ui.set_geometry(scroll, scroll_rect(configure.rect));
                    let page = rows_per_page(ui, configure.rect);
                    scroll::set_page(ui, scroll, page);
                }
            }
            Event::Expose(_) => {
                if !ui.run_handler(id, event) {
                    self.paint(ui, id);
                }
            }
            Event::Key(_) => {
                if !ui.run_handler(id, event) {
                    ui.forward_to_parent(id, *event);
                }
            }
            Event::Mouse(mouse) => {
                if !ui.run_handler(id, event) {
                    self.mouse(ui, id, mouse);
                }
            }
        }
    }

    fn capture_target(&self, ui: &Ui, id: WidgetId, ty: EventType) -> WidgetId {
        match ty {
            EventType::Key => scroll_of(ui, id).unwrap_or(id),
            _ => id,
        }
    }

    fn focus_target(&self, ui: &Ui, id: WidgetId) -> WidgetId {
        scroll_of(ui, id).unwrap_or(id)
    }
}
