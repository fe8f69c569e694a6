use std::cell::RefCell;
use std::rc::Rc;

use sparta_core::{Rect, profiling::profile_function};

use super::Ui;
use crate::event::{CommandEvent, ConfigureEvent, Event, EventType, ExposeEvent};
use crate::surface::Painter;
use crate::widget::{Handler, WidgetId};

impl Ui {
    /// Delivers one event to a widget.
    ///
    /// Key and mouse events addressed to a widget outside the active block
    /// are dropped before any handler runs. Otherwise the widget's handler
    /// runs first and, unless it returns `true`, the variant's default
    /// processing follows.
    pub fn on_event(&mut self, id: impl Into<WidgetId>, event: impl Into<Event>) {
        profile_function!();
        let id = id.into();
        let event = event.into();
        let Some(kind) = self.kind(id) else {
            tracing::trace!("dropping {} event for closed widget {}", event.event_type(), id);
            return;
        };
        if event.is_input() && self.block.is_block() && !self.is_blocker(id) {
            tracing::trace!("{} event for {} blocked", event.event_type(), id);
            return;
        }
        kind.behavior().on_event(self, id, &event);
    }

    /// Registers the handler for one event type, replacing any earlier one.
    pub fn capture<F>(&mut self, id: impl Into<WidgetId>, ty: EventType, handler: F)
    where
        F: FnMut(&mut Ui, WidgetId, &Event) -> bool + 'static,
    {
        let id = id.into();
        let Some(kind) = self.kind(id) else {
            return;
        };
        let target = kind.behavior().capture_target(self, id, ty);
        let handler: Handler = Rc::new(RefCell::new(handler));
        if let Some(base) = self.base_mut(target) {
            base.set_handler(ty, handler);
        }
    }

    /// Removes the handler for `ty`.
    pub fn release_capture(&mut self, id: impl Into<WidgetId>, ty: EventType) {
        let id = id.into();
        let Some(kind) = self.kind(id) else {
            return;
        };
        let target = kind.behavior().capture_target(self, id, ty);
        if let Some(base) = self.base_mut(target) {
            base.clear_handler(ty);
        }
    }

    /// Runs the handler registered on `id` for `event`. Returns `true` when
    /// the handler consumed the event.
    pub(crate) fn run_handler(&mut self, id: WidgetId, event: &Event) -> bool {
        let Some(cell) = self.base(id).and_then(|b| b.handler(event.event_type())) else {
            return false;
        };
        let Ok(mut handler) = cell.try_borrow_mut() else {
            tracing::warn!(
                "{} handler of {} re-entered itself, skipping",
                event.event_type(),
                id
            );
            return false;
        };
        (*handler)(self, id, event)
    }

    /// Hands `event` to the parent of `id`, if it has one.
    pub(crate) fn forward_to_parent(&mut self, id: WidgetId, event: Event) {
        match self.parent(id) {
            Some(parent) => self.on_event(parent, event),
            None => tracing::trace!("{} event stops at root {}", event.event_type(), id),
        }
    }

    /// Where `id` sends its commands: its target, or its parent.
    pub(crate) fn command_target(&self, id: WidgetId) -> Option<WidgetId> {
        self.base(id).and_then(|b| b.target.or(b.parent))
    }

    /// Queues a command for `dest`. It is delivered by the event loop after
    /// the current event finishes, never re-entrantly.
    pub fn send_event(&mut self, dest: impl Into<WidgetId>, event: CommandEvent) {
        self.posted.push_back((dest.into(), event));
    }

    /// Asks the backend to redraw the widget.
    pub fn update(&mut self, id: impl Into<WidgetId>) {
        if let Some(window) = self.window_mut(id.into()) {
            window.update();
        }
    }

    /// Moves input focus to the widget (or the widget it delegates to).
    pub fn focus(&mut self, id: impl Into<WidgetId>) {
        let id = id.into();
        let Some(kind) = self.kind(id) else {
            return;
        };
        let target = kind.behavior().focus_target(self, id);
        if let Some(window) = self.window_mut(target) {
            window.focus();
        }
    }

    /// Starts a modal block held by `id`. No-op while another block is active.
    pub fn block(&mut self, id: impl Into<WidgetId>) {
        let id = id.into();
        if self.block.block(id) {
            tracing::debug!("input blocked by {}", id);
        }
    }

    pub fn is_block(&self) -> bool {
        self.block.is_block()
    }

    /// Whether `id` is the blocker or a descendant of it.
    pub fn is_blocker(&self, id: impl Into<WidgetId>) -> bool {
        self.block.is_blocker(id.into(), |w| self.tree.parent(w))
    }

    /// Lifts the block if `requester` is the blocker or a descendant of it.
    pub fn unblock(&mut self, requester: impl Into<WidgetId>) {
        let requester = requester.into();
        let tree = &self.tree;
        if self.block.unblock(requester, |w| tree.parent(w)) {
            tracing::debug!("input unblocked by {}", requester);
        }
    }

    /// Applies a geometry reported by the backend. Unchanged geometry is
    /// ignored; otherwise the widget is configured and redrawn.
    pub(crate) fn configure(&mut self, id: WidgetId, rect: Rect) {
        if self.geometry(id).is_none_or(|g| g == rect) {
            return;
        }
        self.on_event(id, ConfigureEvent { rect });
        self.update(id);
    }

    /// Dispatches an expose with the window in drawable state.
    pub(crate) fn expose(&mut self, id: WidgetId, rect: Rect) {
        profile_function!();
        let Some(node) = self.tree.get_mut(id) else {
            return;
        };
        if !node.draw.begin_expose() {
            tracing::warn!("nested expose of {} ignored", id);
            return;
        }
        if let Some(window) = node.window.as_mut() {
            window.begin_expose(rect);
        }

        self.on_event(id, ExposeEvent { rect });

        if let Some(node) = self.tree.get_mut(id) {
            node.draw.end_expose();
            if let Some(window) = node.window.as_mut() {
                window.end_expose();
            }
        }
    }

    /// Drawing access to the widget's window, or `None` when it is not in
    /// drawable state.
    pub fn painter(&mut self, id: impl Into<WidgetId>) -> Option<Painter<'_>> {
        let node = self.tree.get_mut(id.into())?;
        if !node.draw.is_drawable() {
            return None;
        }
        node.window.as_deref_mut().map(Painter::new)
    }

    /// Opens (`true`) or closes (`false`) an explicit drawing session.
    /// Ignored during an expose and when the mode is unchanged.
    pub fn draw_mode(&mut self, id: impl Into<WidgetId>, mode: bool) {
        let Some(node) = self.tree.get_mut(id.into()) else {
            return;
        };
        if node.draw.set_draw_mode(mode) {
            if let Some(window) = node.window.as_mut() {
                window.draw(mode);
            }
        }
    }

    /// Whether the widget's window is currently drawable.
    pub fn is_drawable(&self, id: impl Into<WidgetId>) -> bool {
        self.tree
            .get(id.into())
            .is_some_and(|n| n.draw.is_drawable())
    }

    pub(crate) fn is_exposing(&self, id: WidgetId) -> bool {
        self.tree.get(id).is_some_and(|n| n.draw.is_exposing())
    }
}
