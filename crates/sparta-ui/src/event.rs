//! Portable events delivered to widgets.
//!
//! Backends translate their native input and paint notifications into these
//! six records; widgets never see anything platform specific.

use std::str::FromStr;

use sparta_core::{Point, Rect};

use crate::keys::{Key, Modifiers, MouseButton};
use crate::widget::WidgetId;

/// Requests termination of a widget and, by cascade, its children.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CloseEvent;

/// An application message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandEvent {
    /// Widget that issued the command, `None` when sent from outside the
    /// widget tree (a timer thread, for example).
    pub source: Option<WidgetId>,
    pub value: i32,
}

/// The widget has a new geometry: parent-relative for children, screen
/// coordinates for root windows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfigureEvent {
    pub rect: Rect,
}

/// A region of the widget needs to be redrawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExposeEvent {
    pub rect: Rect,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    /// Positive on press, negated on release.
    pub key: Key,
    pub state: Modifiers,
    /// Pointer location in widget coordinates.
    pub loc: Point,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MouseEvent {
    /// Positive on press, negated on release, zero on motion.
    pub button: MouseButton,
    pub state: Modifiers,
    /// Pointer location in widget coordinates.
    pub loc: Point,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Close(CloseEvent),
    Command(CommandEvent),
    Configure(ConfigureEvent),
    Expose(ExposeEvent),
    Key(KeyEvent),
    Mouse(MouseEvent),
}

impl Event {
    pub const fn event_type(&self) -> EventType {
        match self {
            Event::Close(_) => EventType::Close,
            Event::Command(_) => EventType::Command,
            Event::Configure(_) => EventType::Configure,
            Event::Expose(_) => EventType::Expose,
            Event::Key(_) => EventType::Key,
            Event::Mouse(_) => EventType::Mouse,
        }
    }

    /// Key and mouse events are subject to input blocking.
    pub const fn is_input(&self) -> bool {
        matches!(self, Event::Key(_) | Event::Mouse(_))
    }
}

impl From<CloseEvent> for Event {
    fn from(ev: CloseEvent) -> Self {
        Event::Close(ev)
    }
}

impl From<CommandEvent> for Event {
    fn from(ev: CommandEvent) -> Self {
        Event::Command(ev)
    }
}

impl From<ConfigureEvent> for Event {
    fn from(ev: ConfigureEvent) -> Self {
        Event::Configure(ev)
    }
}

impl From<ExposeEvent> for Event {
    fn from(ev: ExposeEvent) -> Self {
        Event::Expose(ev)
    }
}

impl From<KeyEvent> for Event {
    fn from(ev: KeyEvent) -> Self {
        Event::Key(ev)
    }
}

impl From<MouseEvent> for Event {
    fn from(ev: MouseEvent) -> Self {
        Event::Mouse(ev)
    }
}

/// Kinds of events a handler can be captured for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventType {
    Close,
    Command,
    Configure,
    Expose,
    Key,
    Mouse,
}

impl EventType {
    pub const ALL: [EventType; 6] = [
        EventType::Close,
        EventType::Command,
        EventType::Configure,
        EventType::Expose,
        EventType::Key,
        EventType::Mouse,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            EventType::Close => "close",
            EventType::Command => "command",
            EventType::Configure => "configure",
            EventType::Expose => "expose",
            EventType::Key => "key",
            EventType::Mouse => "mouse",
        }
    }

    pub(crate) const fn slot(&self) -> usize {
        *self as usize
    }
}

impl std::fmt::Display for EventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventType {
    type Err = crate::error::ParseNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EventType::ALL
            .into_iter()
            .find(|ty| ty.as_str() == s)
            .ok_or_else(|| crate::error::ParseNameError::new("event type", s))
    }
}
