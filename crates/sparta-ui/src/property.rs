//! The property registry: a closed set of keys, each with one value type.
//!
//! Widgets expose their state through [`Property`] keys. Reading a key a
//! variant does not support yields `None`; writing one is ignored. Writing a
//! [`Value`] of the wrong type is rejected with
//! [`PropertyError::TypeMismatch`](crate::error::PropertyError).

use std::any::Any;
use std::rc::Rc;
use std::str::FromStr;

use sparta_core::{Rect, Rgba};

use crate::error::{ParseNameError, PropertyError};
use crate::widget::WidgetId;

/// Opaque application data attached to a widget.
pub type UserData = Rc<dyn Any>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Property {
    Caption,
    /// Reads the child list. Writing `Some(w)` appends `w` unless it is
    /// already a child; `None` clears.
    Childs,
    Data,
    Geometry,
    /// Only writing `None` (detach) has an effect.
    Parent,
    Name,
    Background,
    Foreground,
    Border,
    /// Receiver of the widget's commands; writing `None` resets to the parent.
    Target,
    ButtonValue,
    ListItems,
    ListSelect,
    ScrollPage,
    ScrollPos,
    ScrollSize,
}

impl Property {
    pub const ALL: [Property; 16] = [
        Property::Caption,
        Property::Childs,
        Property::Data,
        Property::Geometry,
        Property::Parent,
        Property::Name,
        Property::Background,
        Property::Foreground,
        Property::Border,
        Property::Target,
        Property::ButtonValue,
        Property::ListItems,
        Property::ListSelect,
        Property::ScrollPage,
        Property::ScrollPos,
        Property::ScrollSize,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Property::Caption => "caption",
            Property::Childs => "childs",
            Property::Data => "data",
            Property::Geometry => "geometry",
            Property::Parent => "parent",
            Property::Name => "name",
            Property::Background => "background",
            Property::Foreground => "foreground",
            Property::Border => "border",
            Property::Target => "target",
            Property::ButtonValue => "value",
            Property::ListItems => "list",
            Property::ListSelect => "select",
            Property::ScrollPage => "page",
            Property::ScrollPos => "pos",
            Property::ScrollSize => "size",
        }
    }

    /// Type of the value returned when reading the key.
    pub const fn value_type(&self) -> ValueType {
        match self {
            Property::Caption | Property::Name => ValueType::Str,
            Property::Childs => ValueType::Widgets,
            Property::Data => ValueType::Data,
            Property::Geometry => ValueType::Rect,
            Property::Parent | Property::Target => ValueType::Widget,
            Property::Background | Property::Foreground => ValueType::Color,
            Property::Border => ValueType::Bool,
            Property::ButtonValue
            | Property::ListSelect
            | Property::ScrollPage
            | Property::ScrollPos
            | Property::ScrollSize => ValueType::Int,
            Property::ListItems => ValueType::Strings,
        }
    }

    /// Type a written value must have.
    pub const fn write_type(&self) -> ValueType {
        match self {
            Property::Childs => ValueType::Widget,
            other => other.value_type(),
        }
    }

    /// Checks `value` against [`Property::write_type`].
    pub fn check(&self, value: &Value) -> Result<(), PropertyError> {
        let actual = value.value_type();
        if actual == self.write_type() {
            Ok(())
        } else {
            Err(PropertyError::TypeMismatch {
                key: *self,
                expected: self.write_type(),
                actual,
            })
        }
    }
}

impl std::fmt::Display for Property {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Property {
    type Err = ParseNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Property::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| ParseNameError::new("property", s))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueType {
    Str,
    Rect,
    Color,
    Widget,
    Widgets,
    Bool,
    Int,
    Strings,
    Data,
}

impl std::fmt::Display for ValueType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ValueType::Str => "string",
            ValueType::Rect => "rectangle",
            ValueType::Color => "color",
            ValueType::Widget => "widget reference",
            ValueType::Widgets => "widget list",
            ValueType::Bool => "boolean",
            ValueType::Int => "integer",
            ValueType::Strings => "string list",
            ValueType::Data => "opaque data",
        };
        f.write_str(name)
    }
}

/// A property value.
#[derive(Clone)]
pub enum Value {
    Str(String),
    Rect(Rect),
    Color(Rgba),
    Widget(Option<WidgetId>),
    Widgets(Vec<WidgetId>),
    Bool(bool),
    Int(i32),
    Strings(Vec<String>),
    Data(Option<UserData>),
}

impl Value {
    /// Wraps arbitrary application data.
    pub fn data<T: Any>(data: T) -> Self {
        Value::Data(Some(Rc::new(data)))
    }

    pub fn value_type(&self) -> ValueType {
        match self {
            Value::Str(_) => ValueType::Str,
            Value::Rect(_) => ValueType::Rect,
            Value::Color(_) => ValueType::Color,
            Value::Widget(_) => ValueType::Widget,
            Value::Widgets(_) => ValueType::Widgets,
            Value::Bool(_) => ValueType::Bool,
            Value::Int(_) => ValueType::Int,
            Value::Strings(_) => ValueType::Strings,
            Value::Data(_) => ValueType::Data,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_rect(&self) -> Option<Rect> {
        match self {
            Value::Rect(r) => Some(*r),
            _ => None,
        }
    }

    pub fn as_color(&self) -> Option<Rgba> {
        match self {
            Value::Color(c) => Some(*c),
            _ => None,
        }
    }

    /// The referenced widget, if the value is a non-empty widget reference.
    pub fn as_widget(&self) -> Option<WidgetId> {
        match self {
            Value::Widget(w) => *w,
            _ => None,
        }
    }

    pub fn as_widgets(&self) -> Option<&[WidgetId]> {
        match self {
            Value::Widgets(w) => Some(w),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i32> {
        match self {
            Value::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_strings(&self) -> Option<&[String]> {
        match self {
            Value::Strings(s) => Some(s),
            _ => None,
        }
    }

    /// Downcasts attached application data.
    pub fn downcast_data<T: Any>(&self) -> Option<&T> {
        match self {
            Value::Data(Some(data)) => data.downcast_ref(),
            _ => None,
        }
    }
}

impl std::fmt::Debug for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Str(s) => f.debug_tuple("Str").field(s).finish(),
            Value::Rect(r) => f.debug_tuple("Rect").field(r).finish(),
            Value::Color(c) => f.debug_tuple("Color").field(c).finish(),
            Value::Widget(w) => f.debug_tuple("Widget").field(w).finish(),
            Value::Widgets(w) => f.debug_tuple("Widgets").field(w).finish(),
            Value::Bool(b) => f.debug_tuple("Bool").field(b).finish(),
            Value::Int(v) => f.debug_tuple("Int").field(v).finish(),
            Value::Strings(s) => f.debug_tuple("Strings").field(s).finish(),
            Value::Data(Some(_)) => f.write_str("Data(..)"),
            Value::Data(None) => f.write_str("Data(None)"),
        }
    }
}

/// Data values compare by identity.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Rect(a), Value::Rect(b)) => a == b,
            (Value::Color(a), Value::Color(b)) => a == b,
            (Value::Widget(a), Value::Widget(b)) => a == b,
            (Value::Widgets(a), Value::Widgets(b)) => a == b,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Strings(a), Value::Strings(b)) => a == b,
            (Value::Data(a), Value::Data(b)) => match (a, b) {
                (Some(a), Some(b)) => Rc::ptr_eq(a, b),
                (None, None) => true,
                _ => false,
            },
            _ => false,
        }
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<Rect> for Value {
    fn from(r: Rect) -> Self {
        Value::Rect(r)
    }
}

impl From<Rgba> for Value {
    fn from(c: Rgba) -> Self {
        Value::Color(c)
    }
}

impl From<WidgetId> for Value {
    fn from(w: WidgetId) -> Self {
        Value::Widget(Some(w))
    }
}

impl From<Option<WidgetId>> for Value {
    fn from(w: Option<WidgetId>) -> Self {
        Value::Widget(w)
    }
}

impl From<Vec<WidgetId>> for Value {
    fn from(w: Vec<WidgetId>) -> Self {
        Value::Widgets(w)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v)
    }
}

impl From<Vec<String>> for Value {
    fn from(s: Vec<String>) -> Self {
        Value::Strings(s)
    }
}

impl From<&[&str]> for Value {
    fn from(s: &[&str]) -> Self {
        Value::Strings(s.iter().map(|s| s.to_string()).collect())
    }
}
