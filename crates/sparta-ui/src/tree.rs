//! The widget arena.

use std::any::Any;

use sparta_core::alloc::SparseSet;
use sparta_core::profiling::profile_function;

use crate::backend::BackendWindow;
use crate::surface::DrawState;
use crate::widget::{WidgetBase, WidgetId, WidgetKind};

/// A widget in the tree.
pub struct WidgetNode {
    pub kind: WidgetKind,
    pub base: WidgetBase,
    /// Variant state, downcast by the variant's behavior.
    pub state: Box<dyn Any>,
    /// `None` until the backend has bound a window, and after close.
    pub window: Option<Box<dyn BackendWindow>>,
    pub draw: DrawState,
}

impl WidgetNode {
    pub fn new(kind: WidgetKind, base: WidgetBase, state: Box<dyn Any>) -> Self {
        Self {
            kind,
            base,
            state,
            window: None,
            draw: DrawState::default(),
        }
    }

    pub fn state<T: Any>(&self) -> Option<&T> {
        self.state.downcast_ref()
    }

    pub fn state_mut<T: Any>(&mut self) -> Option<&mut T> {
        self.state.downcast_mut()
    }
}

/// Owns every live widget and the parent/child links between them.
#[derive(Default)]
pub struct WidgetTree {
    nodes: SparseSet<WidgetNode>,
}

impl WidgetTree {
    pub fn new() -> Self {
        Self {
            nodes: SparseSet::new(),
        }
    }

    /// Inserts `node` and links it under its parent, if any and alive.
    pub fn insert(&mut self, node: WidgetNode) -> WidgetId {
        profile_function!();
        let parent = node.base.parent;
        let id = WidgetId(self.nodes.push(node));
        if let Some(parent) = parent.and_then(|p| self.get_mut(p)) {
            parent.base.children.push(id);
        }
        id
    }

    /// Removes `id` and unlinks it from its parent. Children keep their
    /// nodes; callers remove them first.
    pub fn remove(&mut self, id: WidgetId) -> Option<WidgetNode> {
        profile_function!();
        let node = self.nodes.try_remove(id.0)?;
        if let Some(parent) = node.base.parent {
            self.detach_child(parent, id);
        }
        Some(node)
    }

    pub fn detach_child(&mut self, parent: WidgetId, child: WidgetId) {
        if let Some(node) = self.get_mut(parent) {
            node.base.children.retain(|&c| c != child);
        }
    }

    pub fn get(&self, id: WidgetId) -> Option<&WidgetNode> {
        self.nodes.try_get(id.0)
    }

    pub fn get_mut(&mut self, id: WidgetId) -> Option<&mut WidgetNode> {
        self.nodes.try_get_mut(id.0)
    }

    pub fn contains(&self, id: WidgetId) -> bool {
        self.nodes.contains(id.0)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn parent(&self, id: WidgetId) -> Option<WidgetId> {
        self.get(id).and_then(|n| n.base.parent)
    }

    pub fn children(&self, id: WidgetId) -> &[WidgetId] {
        self.get(id).map(|n| n.base.children.as_slice()).unwrap_or(&[])
    }

    /// Widgets without a parent, in creation slot order.
    pub fn roots(&self) -> Vec<WidgetId> {
        self.nodes
            .slots()
            .map(WidgetId)
            .filter(|&id| self.parent(id).is_none())
            .collect()
    }

    /// `id` followed by its ancestors up to the root.
    pub fn ancestors(&self, id: WidgetId) -> impl Iterator<Item = WidgetId> + '_ {
        std::iter::successors(self.contains(id).then_some(id), move |&w| self.parent(w))
    }

    pub fn is_descendant_of(&self, id: WidgetId, ancestor: WidgetId) -> bool {
        self.ancestors(id).any(|w| w == ancestor)
    }

    /// Pre-order walk starting at `id` (parents before children).
    pub fn descendants(&self, id: WidgetId) -> Vec<WidgetId> {
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(w) = stack.pop() {
            if !self.contains(w) {
                continue;
            }
            out.push(w);
            stack.extend(self.children(w).iter().rev().copied());
        }
        out
    }

    /// Post-order walk (children before parents), the order windows close in.
    pub fn post_order(&self, id: WidgetId) -> Vec<WidgetId> {
        let mut out = self.descendants(id);
        out.reverse();
        out
    }

    /// Offset of `id`'s origin relative to its root window.
    pub fn origin_in_root(&self, id: WidgetId) -> sparta_core::Point {
        let mut origin = sparta_core::Point::ZERO;
        for w in self.ancestors(id) {
            if let Some(node) = self.get(w) {
                if node.base.parent.is_some() {
                    origin += node.base.geometry.min;
                }
            }
        }
        origin
    }
}
