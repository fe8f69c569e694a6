use sparta_core::{Point, Rect};

use crate::backend::ColorRole;
use crate::error::UiResult;
use crate::event::{CommandEvent, Event, KeyEvent, MouseEvent};
use crate::keys::{Key, MouseButton};
use crate::property::{Property, Value};
use crate::ui::Ui;
use crate::widget::{Behavior, WidgetId, WidgetKind};

super::widget_handle!(
    /// A scroll bar over `size` units of content with `page` units visible.
    ///
    /// The position always stays in `0..=size - page` (or `0` when the
    /// page is larger than the content). Negative sizes and pages are
    /// ignored. Every change of position sends a command carrying the new
    /// position to the target.
    Scroll
);

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    #[default]
    Vertical,
    Horizontal,
}

#[derive(Debug, Default)]
pub(crate) struct ScrollState {
    pos: i32,
    size: i32,
    page: i32,
    orientation: Orientation,
}

impl ScrollState {
    fn clamp(&self, pos: i32) -> i32 {
        pos.min(self.size.saturating_sub(self.page)).max(0)
    }
}

impl Scroll {
    pub fn new(
        ui: &mut Ui,
        parent: impl Into<WidgetId>,
        name: &str,
        rect: Rect,
        orientation: Orientation,
    ) -> UiResult<Self> {
        let state = ScrollState {
            orientation,
            ..Default::default()
        };
        ui.create_widget(
            WidgetKind::Scroll,
            Some(parent.into()),
            name,
            "",
            rect,
            Box::new(state),
        )
        .map(Self)
    }

    pub fn pos(&self, ui: &Ui) -> i32 {
        ui.state::<ScrollState>(self.0).map_or(0, |s| s.pos)
    }

    pub fn size(&self, ui: &Ui) -> i32 {
        ui.state::<ScrollState>(self.0).map_or(0, |s| s.size)
    }

    pub fn page(&self, ui: &Ui) -> i32 {
        ui.state::<ScrollState>(self.0).map_or(0, |s| s.page)
    }

    pub fn orientation(&self, ui: &Ui) -> Option<Orientation> {
        ui.state::<ScrollState>(self.0).map(|s| s.orientation)
    }
}

/// Moves the position, clamped. Notifies the target and redraws when the
/// clamped position differs from the current one.
pub(crate) fn set_pos(ui: &mut Ui, id: WidgetId, pos: i32) {
    let Some(state) = ui.state_mut::<ScrollState>(id) else {
        return;
    };
    let pos = state.clamp(pos);
    if pos == state.pos {
        return;
    }
    state.pos = pos;
    notify(ui, id, pos);
}

/// Empty content resets the page and position without notifying.
pub(crate) fn set_size(ui: &mut Ui, id: WidgetId, size: i32) {
    let Some(state) = ui.state_mut::<ScrollState>(id) else {
        return;
    };
    if size < 0 || size == state.size {
        return;
    }
    state.size = size;
    if size == 0 {
        state.page = 0;
        state.pos = 0;
        ui.update(id);
        return;
    }
    reclamp(ui, id);
}

pub(crate) fn set_page(ui: &mut Ui, id: WidgetId, page: i32) {
    let Some(state) = ui.state_mut::<ScrollState>(id) else {
        return;
    };
    if page < 0 || page == state.page {
        return;
    }
    state.page = page;
    reclamp(ui, id);
}

fn reclamp(ui: &mut Ui, id: WidgetId) {
    let Some(state) = ui.state_mut::<ScrollState>(id) else {
        return;
    };
    let pos = state.clamp(state.pos);
    if pos != state.pos {
        state.pos = pos;
        notify(ui, id, pos);
    } else {
        ui.update(id);
    }
}

fn notify(ui: &mut Ui, id: WidgetId, pos: i32) {
    if let Some(target) = ui.command_target(id) {
        ui.send_event(
            target,
            CommandEvent {
                source: Some(id),
                value: pos,
            },
        );
    }
    ui.update(id);
}

pub(crate) struct ScrollBehavior;

impl ScrollBehavior {
    fn paint(&self, ui: &mut Ui, id: WidgetId) {
        let (Some(state), Some(base)) = (ui.state::<ScrollState>(id), ui.base(id)) else {
            return;
        };
        let geometry = base.geometry;
        let foreground = base.foreground;
        let thumb = thumb_rect(state, geometry);
        let Some(mut painter) = ui.painter(id) else {
            return;
        };
        painter.set_color(ColorRole::Foreground, foreground);
        painter.border(geometry);
        if let Some(thumb) = thumb {
            painter.rectangle(thumb, true);
        }
    }

    fn key(&self, ui: &mut Ui, id: WidgetId, event: &KeyEvent) {
        let Some(state) = ui.state::<ScrollState>(id) else {
            return;
        };
        let vertical = state.orientation == Orientation::Vertical;
        let target = match event.key {
            Key::DOWN if vertical => Some(state.pos.saturating_add(1)),
            Key::UP if vertical => Some(state.pos.saturating_sub(1)),
            Key::PAGE_DOWN if vertical => Some(state.pos.saturating_add(state.page)),
            Key::PAGE_UP if vertical => Some(state.pos.saturating_sub(state.page)),
            Key::RIGHT if !vertical => Some(state.pos.saturating_add(1)),
            Key::LEFT if !vertical => Some(state.pos.saturating_sub(1)),
            Key::HOME => Some(0),
            Key::END => Some(state.size),
            _ => None,
        };
        match target {
            Some(pos) => set_pos(ui, id, pos),
            None => ui.forward_to_parent(id, Event::Key(*event)),
        }
    }

    fn mouse(&self, ui: &mut Ui, id: WidgetId, event: &MouseEvent) {
        let (Some(state), Some(geometry)) = (ui.state::<ScrollState>(id), ui.geometry(id)) else {
            return;
        };
        let (along, extent) = match state.orientation {
            Orientation::Vertical => (event.loc.y, geometry.dy()),
            Orientation::Horizontal => (event.loc.x, geometry.dx()),
        };
        let jump = if extent > 0 {
            along.saturating_mul(state.size) / extent
        } else {
            0
        };
        let target = match event.button {
            MouseButton::WHEEL => Some(state.pos.saturating_sub(1)),
            MouseButton::WHEEL_DOWN => Some(state.pos.saturating_add(1)),
            MouseButton::LEFT => Some(jump),
            MouseButton::RIGHT => Some(jump.saturating_sub(state.page)),
            _ => None,
        };
        match target {
            Some(pos) => set_pos(ui, id, pos),
            None => super::bubble_mouse(ui, id, *event),
        }
    }
}

/// The filled part of the bar, in local coordinates.
fn thumb_rect(state: &ScrollState, geometry: Rect) -> Option<Rect> {
    if state.size <= 0 {
        return None;
    }
    let extent = match state.orientation {
        Orientation::Vertical => geometry.dy(),
        Orientation::Horizontal => geometry.dx(),
    };
    // Scaled in i64: pos and page never exceed size, so both fit back in i32.
    let scale = |v: i32| (i64::from(v) * i64::from(extent) / i64::from(state.size)) as i32;
    let start = scale(state.pos);
    let len = scale(state.page.min(state.size)).max(2);
    let end = start.saturating_add(len).min(extent - 1);
    let rect = match state.orientation {
        Orientation::Vertical => Rect::new(1, start, geometry.dx() - 2, end),
        Orientation::Horizontal => Rect::new(start, 1, end, geometry.dy() - 2),
    };
    Some(rect.intersect(&Rect::from_origin_size(Point::ZERO, geometry.dx(), geometry.dy())))
}

impl Behavior for ScrollBehavior {
    fn kind(&self) -> WidgetKind {
        WidgetKind::Scroll
    }

    fn supports(&self, key: Property) -> bool {
        matches!(
            key,
            Property::Data
                | Property::Geometry
                | Property::Parent
                | Property::Name
                | Property::Foreground
                | Property::Background
                | Property::Target
                | Property::ScrollPage
                | Property::ScrollPos
                | Property::ScrollSize
        )
    }

    fn property(&self, ui: &Ui, id: WidgetId, key: Property) -> Option<Value> {
        let state = ui.state::<ScrollState>(id);
        match key {
            Property::ScrollPage => state.map(|s| Value::Int(s.page)),
            Property::ScrollPos => state.map(|s| Value::Int(s.pos)),
            Property::ScrollSize => state.map(|s| Value::Int(s.size)),
            _ => ui.common_property(id, key),
        }
    }

    fn set_property(&self, ui: &mut Ui, id: WidgetId, key: Property, value: Value) {
        match (key, value) {
            (Property::ScrollPage, Value::Int(v)) => set_page(ui, id, v),
            (Property::ScrollPos, Value::Int(v)) => set_pos(ui, id, v),
            (Property::ScrollSize, Value::Int(v)) => set_size(ui, id, v),
            (key, value) => ui.set_common_property(id, key, value),
        }
    }

    fn on_event(&self, ui: &mut Ui, id: WidgetId, event: &Event) {
        match event {
            Event::Close(_) => {
                ui.run_handler(id, event);
            }
            Event::Command(_) => {
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
            Event::Key(key) => {
                if !ui.run_handler(id, event) {
                    self.key(ui, id, key);
                }
            }
            Event::Mouse(mouse) => {
                if !ui.run_handler(id, event) {
                    self.mouse(ui, id, mouse);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(pos: i32, size: i32, page: i32) -> ScrollState {
        ScrollState {
            pos,
            size,
            page,
            orientation: Orientation::Vertical,
        }
    }

    #[test]
    fn test_clamp_keeps_last_page_visible() {
        let s = state(0, 100, 10);
        assert_eq!(s.clamp(95), 90);
        assert_eq!(s.clamp(-5), 0);
        assert_eq!(s.clamp(42), 42);
    }

    #[test]
    fn test_clamp_with_page_larger_than_content() {
        let s = state(0, 5, 10);
        assert_eq!(s.clamp(3), 0);
    }

    #[test]
    fn test_clamp_at_integer_limits() {
        let s = state(0, i32::MAX, 0);
        assert_eq!(s.clamp(i32::MAX), i32::MAX);
        assert_eq!(s.clamp(i32::MIN), 0);
        assert_eq!(state(0, 0, i32::MAX).clamp(i32::MAX), 0);
    }

    #[test]
    fn test_thumb_tracks_position() {
        let geometry = Rect::new(0, 0, 10, 100);
        assert_eq!(thumb_rect(&state(0, 0, 10), geometry), None);
        let thumb = thumb_rect(&state(50, 100, 10), geometry).unwrap();
        assert_eq!(thumb.min.y, 50);
        assert_eq!(thumb.dy(), 10);
    }
}
