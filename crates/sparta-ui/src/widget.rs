//! Widget identity, shared state and the per-variant behavior contract.

use std::cell::RefCell;
use std::rc::Rc;

use sparta_core::{Rect, Rgba, alloc::IndexSlot};

use crate::event::{Event, EventType};
use crate::property::{Property, UserData, Value};
use crate::ui::Ui;

/// Handle to a widget living in a [`Ui`].
///
/// Ids are generational: once a widget is closed its id never resolves to
/// another widget, and every operation on it is a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WidgetId(pub(crate) IndexSlot);

impl WidgetId {
    /// Packed representation, usable as a native window tag.
    pub fn to_bits(&self) -> u64 {
        self.0.to_bits()
    }
}

impl std::fmt::Display for WidgetId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}v{}", self.0.index(), self.0.generation())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WidgetKind {
    MainWindow,
    Button,
    Canvas,
    List,
    Scroll,
}

impl WidgetKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            WidgetKind::MainWindow => "main window",
            WidgetKind::Button => "button",
            WidgetKind::Canvas => "canvas",
            WidgetKind::List => "list",
            WidgetKind::Scroll => "scroll",
        }
    }
}

impl std::fmt::Display for WidgetKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An event handler. Returning `true` marks the event as handled and
/// suppresses the widget's default processing and propagation.
pub type Handler = Rc<RefCell<dyn FnMut(&mut Ui, WidgetId, &Event) -> bool>>;

/// State every widget variant carries.
pub struct WidgetBase {
    pub name: String,
    pub caption: String,
    /// Parent-relative, last confirmed by the backend.
    pub geometry: Rect,
    pub foreground: Rgba,
    pub background: Rgba,
    pub data: Option<UserData>,
    pub parent: Option<WidgetId>,
    /// Owned children in insertion order.
    pub children: Vec<WidgetId>,
    /// Receiver of commands the widget emits.
    pub target: Option<WidgetId>,
    handlers: [Option<Handler>; EventType::ALL.len()],
}

impl WidgetBase {
    pub fn new(name: impl Into<String>, geometry: Rect, parent: Option<WidgetId>) -> Self {
        Self {
            name: name.into(),
            caption: String::new(),
            geometry,
            foreground: Rgba::BLACK,
            background: Rgba::WHITE,
            data: None,
            parent,
            children: Vec::new(),
            target: parent,
            handlers: Default::default(),
        }
    }

    pub fn handler(&self, ty: EventType) -> Option<Handler> {
        self.handlers[ty.slot()].clone()
    }

    /// Replaces any earlier handler for `ty`.
    pub fn set_handler(&mut self, ty: EventType, handler: Handler) {
        self.handlers[ty.slot()] = Some(handler);
    }

    pub fn clear_handler(&mut self, ty: EventType) {
        self.handlers[ty.slot()] = None;
    }
}

/// Variant-specific logic of a widget.
///
/// Implementations are stateless; per-widget state lives in the [`Ui`]
/// arena and is reached through the id. Shared properties are handled by
/// the provided methods, variants override what they specialize.
pub trait Behavior {
    fn kind(&self) -> WidgetKind;

    /// Keys this variant reads and writes. Others are absent on read and
    /// ignored on write.
    fn supports(&self, key: Property) -> bool;

    fn property(&self, ui: &Ui, id: WidgetId, key: Property) -> Option<Value> {
        ui.common_property(id, key)
    }

    /// `value` has already been type checked against `key`.
    fn set_property(&self, ui: &mut Ui, id: WidgetId, key: Property, value: Value) {
        ui.set_common_property(id, key, value);
    }

    /// Runs the registered handler and the variant's default processing.
    fn on_event(&self, ui: &mut Ui, id: WidgetId, event: &Event);

    /// Widget that should receive a handler captured on `id`.
    fn capture_target(&self, _ui: &Ui, id: WidgetId, _ty: EventType) -> WidgetId {
        id
    }

    /// Widget whose window should receive input focus for `id`.
    fn focus_target(&self, _ui: &Ui, id: WidgetId) -> WidgetId {
        id
    }
}
