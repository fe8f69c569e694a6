use sparta_core::{Rect, Rgba};

use super::Ui;
use crate::backend::{ColorRole, WindowProperty};
use crate::error::PropertyError;
use crate::property::{Property, Value};
use crate::widget::WidgetId;

impl Ui {
    /// Reads `key` from a widget. `None` for closed widgets and for keys the
    /// widget's variant does not support.
    pub fn property(&self, id: impl Into<WidgetId>, key: Property) -> Option<Value> {
        let id = id.into();
        let behavior = self.tree.get(id)?.kind.behavior();
        if !behavior.supports(key) {
            tracing::trace!("{} has no `{}` property", id, key);
            return None;
        }
        behavior.property(self, id, key)
    }

    /// Writes `key` on a widget.
    ///
    /// The value is type checked first; a mismatch is the only error.
    /// Unsupported keys and closed widgets are ignored.
    pub fn set_property(
        &mut self,
        id: impl Into<WidgetId>,
        key: Property,
        value: impl Into<Value>,
    ) -> Result<(), PropertyError> {
        let id = id.into();
        let value = value.into();
        key.check(&value)?;

        let Some(kind) = self.kind(id) else {
            tracing::trace!("ignoring `{}` on closed widget {}", key, id);
            return Ok(());
        };
        let behavior = kind.behavior();
        if !behavior.supports(key) {
            tracing::trace!("{} ignores `{}`", kind, key);
            return Ok(());
        }
        behavior.set_property(self, id, key, value);
        Ok(())
    }

    pub(crate) fn common_property(&self, id: WidgetId, key: Property) -> Option<Value> {
        let base = self.base(id)?;
        let value = match key {
            Property::Caption => Value::Str(base.caption.clone()),
            Property::Childs => Value::Widgets(base.children.clone()),
            Property::Data => Value::Data(base.data.clone()),
            Property::Geometry => Value::Rect(base.geometry),
            Property::Parent => Value::Widget(base.parent),
            Property::Name => Value::Str(base.name.clone()),
            Property::Background => Value::Color(base.background),
            Property::Foreground => Value::Color(base.foreground),
            Property::Target => Value::Widget(base.target.or(base.parent)),
            _ => return None,
        };
        Some(value)
    }

    pub(crate) fn set_common_property(&mut self, id: WidgetId, key: Property, value: Value) {
        match (key, value) {
            (Property::Caption, Value::Str(caption)) => {
                self.set_caption(id, caption);
            }
            (Property::Childs, Value::Widget(Some(child))) => {
                if let Some(base) = self.base_mut(id) {
                    if !base.children.contains(&child) {
                        base.children.push(child);
                    }
                }
            }
            (Property::Childs, Value::Widget(None)) => {
                if let Some(base) = self.base_mut(id) {
                    base.children.clear();
                }
            }
            (Property::Data, Value::Data(data)) => {
                if let Some(base) = self.base_mut(id) {
                    base.data = data;
                }
            }
            (Property::Geometry, Value::Rect(rect)) => self.set_geometry(id, rect),
            (Property::Parent, Value::Widget(None)) => {
                let parent = self.base_mut(id).and_then(|b| b.parent.take());
                if let Some(parent) = parent {
                    self.tree.detach_child(parent, id);
                }
            }
            (Property::Name, Value::Str(name)) => {
                if let Some(base) = self.base_mut(id) {
                    base.name = name;
                }
            }
            (Property::Foreground, Value::Color(color)) => {
                self.set_color_property(id, ColorRole::Foreground, color)
            }
            (Property::Background, Value::Color(color)) => {
                self.set_color_property(id, ColorRole::Background, color)
            }
            (Property::Target, Value::Widget(target)) => {
                if let Some(base) = self.base_mut(id) {
                    base.target = target;
                }
            }
            (key, _) => tracing::trace!("{} does not write `{}`", id, key),
        }
    }

    /// Stores a new caption and forwards it to root windows. Returns whether
    /// it changed.
    pub(crate) fn set_caption(&mut self, id: WidgetId, caption: String) -> bool {
        let Some(node) = self.tree.get_mut(id) else {
            return false;
        };
        if node.base.caption == caption {
            return false;
        }
        node.base.caption = caption.clone();
        if node.base.parent.is_none() {
            if let Some(window) = node.window.as_mut() {
                window.set_property(WindowProperty::Caption(caption));
            }
        }
        true
    }

    /// Forwards a geometry change to the backend. The cached geometry only
    /// changes through the configure event that confirms it.
    pub(crate) fn set_geometry(&mut self, id: WidgetId, rect: Rect) {
        let Some(node) = self.tree.get_mut(id) else {
            return;
        };
        if node.base.geometry == rect {
            return;
        }
        let confirmed = match node.window.as_mut() {
            Some(window) => window.set_property(WindowProperty::Geometry(rect)),
            None => Some(rect),
        };
        if let Some(confirmed) = confirmed {
            self.configure(id, confirmed);
        }
    }

    fn set_color_property(&mut self, id: WidgetId, role: ColorRole, color: Rgba) {
        let Some(node) = self.tree.get_mut(id) else {
            return;
        };
        let cached = match role {
            ColorRole::Foreground => &mut node.base.foreground,
            ColorRole::Background => &mut node.base.background,
        };
        if *cached == color {
            return;
        }
        *cached = color;
        if let Some(window) = node.window.as_mut() {
            window.set_property(match role {
                ColorRole::Foreground => WindowProperty::Foreground(color),
                ColorRole::Background => WindowProperty::Background(color),
            });
        }
    }
}
