//! The concrete widget variants.
//!
//! Each variant is a typed handle around a [`WidgetId`] plus a stateless
//! [`Behavior`] implementation holding its default event processing.

mod button;
mod canvas;
mod list;
mod main_window;
mod scroll;

pub use button::Button;
pub use canvas::Canvas;
pub use list::List;
pub use main_window::MainWindow;
pub use scroll::{Orientation, Scroll};

use sparta_core::Rect;

use crate::event::{Event, MouseEvent};
use crate::ui::Ui;
use crate::widget::{Behavior, WidgetId, WidgetKind};

impl WidgetKind {
    pub(crate) fn behavior(self) -> &'static dyn Behavior {
        match self {
            WidgetKind::MainWindow => &main_window::MainWindowBehavior,
            WidgetKind::Button => &button::ButtonBehavior,
            WidgetKind::Canvas => &canvas::CanvasBehavior,
            WidgetKind::List => &list::ListBehavior,
            WidgetKind::Scroll => &scroll::ScrollBehavior,
        }
    }
}

/// Caches a geometry confirmed by a configure event.
fn store_geometry(ui: &mut Ui, id: WidgetId, rect: Rect) {
    if let Some(base) = ui.base_mut(id) {
        base.geometry = rect;
    }
}

/// Passes a mouse event to the parent in the parent's coordinates.
fn bubble_mouse(ui: &mut Ui, id: WidgetId, mut event: MouseEvent) {
    if let Some(geometry) = ui.geometry(id) {
        event.loc += geometry.min;
    }
    ui.forward_to_parent(id, Event::Mouse(event));
}

/// Sends a close to each child, in insertion order.
fn close_children(ui: &mut Ui, id: WidgetId) {
    for child in ui.children(id) {
        ui.on_event(child, Event::Close(crate::event::CloseEvent));
    }
}

/// Defines a `Copy` handle type that converts into [`WidgetId`].
macro_rules! widget_handle {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub struct $name(crate::widget::WidgetId);

        impl $name {
            pub fn id(&self) -> crate::widget::WidgetId {
                self.0
            }

            /// Wraps `id` if it refers to a live widget of this variant.
            pub fn from_id(ui: &crate::ui::Ui, id: crate::widget::WidgetId) -> Option<Self> {
                (ui.kind(id) == Some(crate::widget::WidgetKind::$name)).then_some(Self(id))
            }
        }

        impl From<$name> for crate::widget::WidgetId {
            fn from(handle: $name) -> Self {
                handle.0
            }
        }
    };
}

pub(crate) use widget_handle;
