//! The application context.
//!
//! [`Ui`] owns the backend, the widget arena, the input-block state and the
//! command queues. Everything runs on the thread that built it; other
//! threads talk to it through an [`EventSender`].

mod dispatch;
mod properties;
mod run;

use std::any::Any;
use std::collections::VecDeque;

use crossbeam_channel::{Receiver, Sender};
use sparta_core::{Config, Rect, profiling::profile_function};

use crate::backend::{Backend, BackendWindow, NativeEvent, Units, Waker, WindowRequest};
use crate::block::BlockState;
use crate::error::{UiError, UiResult};
use crate::event::CommandEvent;
use crate::tree::{WidgetNode, WidgetTree};
use crate::widget::{WidgetBase, WidgetId, WidgetKind};

pub use run::EventSender;

type Injected = (WidgetId, CommandEvent);

/// Builds a [`Ui`] around a backend.
#[derive(Debug, Default, Clone)]
pub struct UiBuilder {
    config: Config,
}

impl UiBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    pub fn build(self, backend: impl Backend + 'static) -> Ui {
        self.build_boxed(Box::new(backend))
    }

    pub fn build_boxed(self, backend: Box<dyn Backend>) -> Ui {
        let units = backend.units();
        let waker = backend.waker();
        let (injected_tx, injected_rx) = crossbeam_channel::bounded(self.config.injection_capacity);
        tracing::info!(
            "sparta ui on `{}` backend, cell {}x{}",
            backend.name(),
            units.width,
            units.height
        );
        Ui {
            config: self.config,
            backend,
            units,
            tree: WidgetTree::new(),
            block: BlockState::default(),
            posted: VecDeque::new(),
            injected_tx,
            injected_rx,
            waker,
            native: Vec::with_capacity(64),
            running: true,
        }
    }
}

pub struct Ui {
    config: Config,
    backend: Box<dyn Backend>,
    units: Units,
    pub(crate) tree: WidgetTree,
    block: BlockState,
    posted: VecDeque<Injected>,
    injected_tx: Sender<Injected>,
    injected_rx: Receiver<Injected>,
    waker: Waker,
    native: Vec<NativeEvent>,
    running: bool,
}

impl Ui {
    pub fn builder() -> UiBuilder {
        UiBuilder::new()
    }

    /// A `Ui` with the default [`Config`].
    pub fn new(backend: impl Backend + 'static) -> Self {
        UiBuilder::new().build(backend)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Character cell size of the backend.
    pub fn units(&self) -> Units {
        self.units
    }

    pub fn backend_name(&self) -> &str {
        self.backend.name()
    }

    /// `false` once the last window closed or [`Ui::quit`] was called.
    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_alive(&self, id: impl Into<WidgetId>) -> bool {
        self.tree.contains(id.into())
    }

    pub fn widget_count(&self) -> usize {
        self.tree.len()
    }

    pub fn kind(&self, id: impl Into<WidgetId>) -> Option<WidgetKind> {
        self.tree.get(id.into()).map(|n| n.kind)
    }

    pub fn parent(&self, id: impl Into<WidgetId>) -> Option<WidgetId> {
        self.tree.parent(id.into())
    }

    pub fn children(&self, id: impl Into<WidgetId>) -> Vec<WidgetId> {
        self.tree.children(id.into()).to_vec()
    }

    pub fn geometry(&self, id: impl Into<WidgetId>) -> Option<Rect> {
        self.base(id.into()).map(|b| b.geometry)
    }

    pub fn name(&self, id: impl Into<WidgetId>) -> Option<&str> {
        self.base(id.into()).map(|b| b.name.as_str())
    }

    /// Parentless widgets.
    pub fn roots(&self) -> Vec<WidgetId> {
        self.tree.roots()
    }

    /// Pre-order walk of `id`'s subtree, `id` first.
    pub fn descendants(&self, id: impl Into<WidgetId>) -> Vec<WidgetId> {
        self.tree.descendants(id.into())
    }

    pub(crate) fn base(&self, id: WidgetId) -> Option<&WidgetBase> {
        self.tree.get(id).map(|n| &n.base)
    }

    pub(crate) fn base_mut(&mut self, id: WidgetId) -> Option<&mut WidgetBase> {
        self.tree.get_mut(id).map(|n| &mut n.base)
    }

    pub(crate) fn state<T: Any>(&self, id: WidgetId) -> Option<&T> {
        self.tree.get(id).and_then(|n| n.state::<T>())
    }

    pub(crate) fn state_mut<T: Any>(&mut self, id: WidgetId) -> Option<&mut T> {
        self.tree.get_mut(id).and_then(|n| n.state_mut::<T>())
    }

    pub(crate) fn window_mut(
        &mut self,
        id: WidgetId,
    ) -> Option<&mut (dyn BackendWindow + 'static)> {
        self.tree.get_mut(id).and_then(|n| n.window.as_deref_mut())
    }

    /// Allocates a widget and binds a backend window to it.
    pub(crate) fn create_widget(
        &mut self,
        kind: WidgetKind,
        parent: Option<WidgetId>,
        name: &str,
        caption: &str,
        geometry: Rect,
        state: Box<dyn Any>,
    ) -> UiResult<WidgetId> {
        profile_function!();
        if let Some(parent) = parent {
            if !self.tree.contains(parent) {
                return Err(UiError::StaleWidget(parent));
            }
        }

        let mut base = WidgetBase::new(name, geometry, parent);
        base.caption = caption.to_string();
        base.foreground = self.config.default_foreground;
        base.background = self.config.default_background;

        let id = self.tree.insert(WidgetNode::new(kind, base, state));
        let request = WindowRequest {
            id,
            kind,
            parent,
            name: name.to_string(),
            caption: caption.to_string(),
            geometry,
            foreground: self.config.default_foreground,
            background: self.config.default_background,
        };

        match self.backend.new_window(request) {
            Ok(window) => {
                if let Some(node) = self.tree.get_mut(id) {
                    node.window = Some(window);
                }
                tracing::debug!("created {} `{}` as {}", kind, name, id);
                Ok(id)
            }
            Err(e) => {
                tracing::error!("backend refused window for {} `{}`: {}", kind, name, e);
                self.tree.remove(id);
                Err(e.into())
            }
        }
    }

    /// Destroys `id` and its whole subtree: children's windows close first,
    /// then each widget is detached from its parent and its window released.
    /// When no widget is left the application quits.
    pub fn close_window(&mut self, id: impl Into<WidgetId>) {
        profile_function!();
        let id = id.into();
        if !self.tree.contains(id) {
            return;
        }

        for w in self.tree.post_order(id) {
            let Some(mut node) = self.tree.remove(w) else {
                continue;
            };
            node.base.children.clear();
            if let Some(mut window) = node.window.take() {
                window.close();
            }
            self.block.release(w);
            tracing::debug!("closed {} `{}` ({})", node.kind, node.base.name, w);
        }

        if self.tree.is_empty() {
            tracing::info!("last window closed");
            self.quit();
        }
    }

    /// Stops the event loop and lets the backend release its resources.
    pub fn quit(&mut self) {
        if !self.running {
            return;
        }
        self.running = false;
        self.backend.quit();
    }
}
