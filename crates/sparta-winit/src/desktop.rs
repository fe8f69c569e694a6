//! Backend-side model of every window: one native window per root widget,
//! child widgets as regions of their root's framebuffer.

use std::sync::Arc;

use sparta_core::alloc::HashMap;
use sparta_core::profiling::profile_function;
use sparta_core::{Config, Point, Rect, Rgba};
use sparta_ui::{
    BackendError, ColorCache, KeyEvent, Modifiers, MouseButton, MouseEvent, NativeEvent, WidgetId,
};
use winit::dpi::{PhysicalPosition, PhysicalSize};
use winit::event::{ElementState, MouseScrollDelta, WindowEvent};
use winit::event_loop::ActiveEventLoop;
use winit::window::{Window, WindowId};

use crate::gpu::{Gpu, Presenter};
use crate::keymap;
use crate::raster::{Framebuffer, Raster};
use crate::text::TextRenderer;

pub(crate) struct Region {
    pub parent: Option<WidgetId>,
    pub root: WidgetId,
    /// Parent-relative for children, screen coordinates for roots.
    pub geometry: Rect,
    pub caption: String,
    pub foreground: Rgba,
    pub background: Rgba,
    /// Current drawing colors, reset on every expose.
    pub pen: u32,
    pub paper: u32,
    pub children: Vec<WidgetId>,
    pub dirty: bool,
}

pub(crate) struct RootSurface {
    pub window: Option<Arc<Window>>,
    pub presenter: Option<Presenter>,
    pub framebuffer: Framebuffer,
    pub needs_present: bool,
    pub cursor: Point,
}

pub(crate) struct Desktop {
    pub regions: HashMap<WidgetId, Region>,
    pub surfaces: HashMap<WidgetId, RootSurface>,
    pub window_ids: HashMap<WindowId, WidgetId>,
    pub pending: Vec<WidgetId>,
    pub text: TextRenderer,
    pub colors: ColorCache<u32>,
    pub gpu: Gpu,
    pub focus: Option<WidgetId>,
    /// Receives presses and releases until every button is up.
    pub grab: Option<WidgetId>,
    pub modifiers: Modifiers,
    pub buttons: Modifiers,
    pub resumed: bool,
}

impl Desktop {
    pub fn new(config: &Config) -> Self {
        Self {
            regions: HashMap::default(),
            surfaces: HashMap::default(),
            window_ids: HashMap::default(),
            pending: Vec::new(),
            text: TextRenderer::new(config.font_size, config.line_spacing),
            colors: ColorCache::new(config.color_cache_capacity),
            gpu: Gpu::new(),
            focus: None,
            grab: None,
            modifiers: Modifiers::empty(),
            buttons: Modifiers::empty(),
            resumed: false,
        }
    }

    pub fn pixel(&mut self, color: Rgba) -> u32 {
        self.colors.get_or_alloc(color, |c| c.to_argb(), |_, _| {})
    }

    pub fn insert_root(&mut self, id: WidgetId, region: Region) {
        let (width, height) = pixel_size(region.geometry);
        let paper = region.paper;
        self.surfaces.insert(
            id,
            RootSurface {
                window: None,
                presenter: None,
                framebuffer: Framebuffer::new(width, height, paper),
                needs_present: false,
                cursor: Point::ZERO,
            },
        );
        self.regions.insert(id, region);
        self.pending.push(id);
    }

    pub fn insert_child(&mut self, id: WidgetId, parent: WidgetId, region: Region) {
        if let Some(p) = self.regions.get_mut(&parent) {
            p.children.push(id);
        }
        let root = region.root;
        self.regions.insert(id, region);
        self.request_redraw(root);
    }

    /// Framebuffer origin and clip rectangle of a region.
    pub fn placement(&self, id: WidgetId) -> Option<(Point, Rect)> {
        let mut chain = Vec::new();
        let mut cursor = id;
        loop {
            let region = self.regions.get(&cursor)?;
            match region.parent {
                Some(parent) => {
                    chain.push(region.geometry);
                    cursor = parent;
                }
                None => break,
            }
        }

        let root = self.regions.get(&cursor)?;
        let mut origin = Point::ZERO;
        let mut clip = root.geometry.local();
        for geometry in chain.iter().rev() {
            origin = origin + geometry.min;
            clip = clip.intersect(&Rect::from_origin_size(origin, geometry.dx(), geometry.dy()));
        }
        Some((origin, clip))
    }

    /// Runs `paint` with a raster view of the region and its drawing colors.
    pub fn paint(
        &mut self,
        id: WidgetId,
        paint: impl FnOnce(&mut Raster<'_>, &mut TextRenderer, &mut Region),
    ) {
        let Some((origin, clip)) = self.placement(id) else {
            return;
        };
        let Some(region) = self.regions.get_mut(&id) else {
            return;
        };
        let Some(surface) = self.surfaces.get_mut(&region.root) else {
            return;
        };
        surface.needs_present = true;
        let mut raster = surface.framebuffer.raster(origin, clip);
        paint(&mut raster, &mut self.text, region);
    }

    pub fn mark_dirty(&mut self, id: WidgetId) {
        let Some(region) = self.regions.get_mut(&id) else {
            return;
        };
        region.dirty = true;
        let root = region.root;
        self.request_redraw(root);
    }

    fn request_redraw(&self, root: WidgetId) {
        if let Some(window) = self.surfaces.get(&root).and_then(|s| s.window.as_ref()) {
            window.request_redraw();
        }
    }

    /// Forgets a region. Children are always removed before their parent.
    pub fn remove(&mut self, id: WidgetId) {
        let Some(region) = self.regions.remove(&id) else {
            return;
        };
        match region.parent {
            Some(parent) => {
                if let Some(p) = self.regions.get_mut(&parent) {
                    p.children.retain(|&c| c != id);
                }
                self.mark_dirty(parent);
            }
            None => {
                if let Some(surface) = self.surfaces.remove(&id)
                    && let Some(window) = surface.window
                {
                    self.window_ids.remove(&window.id());
                }
                self.pending.retain(|&p| p != id);
            }
        }
        if self.focus == Some(id) {
            self.focus = None;
        }
        if self.grab == Some(id) {
            self.grab = None;
        }
    }

    /// Applies a new geometry. Returns the rectangle when it took effect
    /// immediately.
    pub fn set_geometry(&mut self, id: WidgetId, rect: Rect) -> Option<Rect> {
        let region = self.regions.get_mut(&id)?;
        let Some(parent) = region.parent else {
            return self.set_root_geometry(id, rect);
        };
        region.geometry = rect;
        self.mark_dirty(parent);
        Some(rect)
    }

    fn set_root_geometry(&mut self, id: WidgetId, rect: Rect) -> Option<Rect> {
        if let Some(window) = self.surfaces.get(&id)?.window.clone() {
            window.set_outer_position(PhysicalPosition::new(rect.min.x, rect.min.y));
            let (width, height) = pixel_size(rect);
            let size = PhysicalSize::new(width.max(1), height.max(1));
            let applied = window.request_inner_size(size)?;
            let rect =
                Rect::from_origin_size(rect.min, applied.width as i32, applied.height as i32);
            self.resize_root(id, rect);
            return Some(rect);
        }
        self.resize_root(id, rect);
        Some(rect)
    }

    fn resize_root(&mut self, id: WidgetId, rect: Rect) {
        let Some(region) = self.regions.get_mut(&id) else {
            return;
        };
        region.geometry = rect;
        let paper = region.paper;
        if let Some(surface) = self.surfaces.get_mut(&id) {
            let (width, height) = pixel_size(rect);
            surface.framebuffer.resize(width, height, paper);
        }
        self.mark_dirty(id);
    }

    /// Opens the native windows of roots created since the last pump.
    pub fn create_pending(&mut self, event_loop: &ActiveEventLoop) -> Result<(), BackendError> {
        profile_function!();
        for id in std::mem::take(&mut self.pending) {
            let Some(region) = self.regions.get(&id) else {
                continue;
            };
            let rect = region.geometry;
            let (width, height) = pixel_size(rect);
            let attributes = Window::default_attributes()
                .with_title(region.caption.clone())
                .with_inner_size(PhysicalSize::new(width.max(1), height.max(1)))
                .with_position(PhysicalPosition::new(rect.min.x, rect.min.y));

            let window = Arc::new(
                event_loop
                    .create_window(attributes)
                    .map_err(|e| BackendError::Window(e.to_string()))?,
            );
            let presenter = self.gpu.create_presenter(window.clone())?;
            tracing::debug!("opened native window {:?} for {}", window.id(), id);

            self.window_ids.insert(window.id(), id);
            if let Some(surface) = self.surfaces.get_mut(&id) {
                surface.window = Some(window);
                surface.presenter = Some(presenter);
            }
            for region in self.subtree(id) {
                if let Some(r) = self.regions.get_mut(&region) {
                    r.dirty = true;
                }
            }
            self.request_redraw(id);
        }
        Ok(())
    }

    /// `id` and its descendants, parents before children.
    pub fn subtree(&self, id: WidgetId) -> Vec<WidgetId> {
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(next) = stack.pop() {
            if let Some(region) = self.regions.get(&next) {
                out.push(next);
                stack.extend(region.children.iter().rev());
            }
        }
        out
    }

    /// Presents every root whose framebuffer changed.
    pub fn present(&mut self) -> Result<(), BackendError> {
        profile_function!();
        for surface in self.surfaces.values_mut() {
            if !surface.needs_present {
                continue;
            }
            let (Some(window), Some(presenter)) = (&surface.window, &mut surface.presenter) else {
                continue;
            };
            surface.needs_present = false;
            window.pre_present_notify();
            self.gpu.present(presenter, &surface.framebuffer)?;
        }
        Ok(())
    }

    /// Deepest region under `pos` (root-local) and `pos` in its coordinates.
    pub fn hit_test(&self, root: WidgetId, pos: Point) -> (WidgetId, Point) {
        let mut target = root;
        let mut local = pos;
        'descend: loop {
            let Some(region) = self.regions.get(&target) else {
                break;
            };
            // later children are drawn on top
            for &child in region.children.iter().rev() {
                if let Some(c) = self.regions.get(&child)
                    && c.geometry.contains(local)
                {
                    local = local - c.geometry.min;
                    target = child;
                    continue 'descend;
                }
            }
            break;
        }
        (target, local)
    }

    fn root_of(&self, id: WidgetId) -> Option<WidgetId> {
        self.regions.get(&id).map(|r| r.root)
    }

    fn state(&self) -> Modifiers {
        self.modifiers | self.buttons
    }

    /// Translates one window event into toolkit events.
    pub fn translate(
        &mut self,
        window_id: WindowId,
        event: WindowEvent,
        out: &mut Vec<NativeEvent>,
    ) {
        let Some(&root) = self.window_ids.get(&window_id) else {
            return;
        };

        match event {
            WindowEvent::CloseRequested => out.push(NativeEvent::Close { target: root }),
            WindowEvent::Resized(size) => {
                let Some(region) = self.regions.get(&root) else {
                    return;
                };
                let rect = Rect::from_origin_size(
                    region.geometry.min,
                    size.width as i32,
                    size.height as i32,
                );
                if let Some(surface) = self.surfaces.get_mut(&root)
                    && let Some(presenter) = &mut surface.presenter
                {
                    presenter.resize(&self.gpu, size.width, size.height);
                }
                self.resize_root(root, rect);
                out.push(NativeEvent::Configure { target: root, rect });
            }
            WindowEvent::Moved(pos) => {
                let Some(region) = self.regions.get_mut(&root) else {
                    return;
                };
                let rect = Rect::from_origin_size(
                    Point::new(pos.x, pos.y),
                    region.geometry.dx(),
                    region.geometry.dy(),
                );
                region.geometry = rect;
                out.push(NativeEvent::Configure { target: root, rect });
            }
            WindowEvent::RedrawRequested => self.collect_exposes(root, false, out),
            WindowEvent::ModifiersChanged(modifiers) => {
                self.modifiers = keymap::modifiers(modifiers.state());
            }
            WindowEvent::KeyboardInput { event, .. } => {
                let Some(code) = keymap::key_code(&event.logical_key, event.location) else {
                    return;
                };
                let key = match event.state {
                    ElementState::Pressed => code,
                    ElementState::Released => code.released(),
                };
                let target = match self.focus {
                    Some(focus) if self.root_of(focus) == Some(root) => focus,
                    _ => root,
                };
                out.push(NativeEvent::Key {
                    target,
                    event: KeyEvent {
                        key,
                        state: self.state(),
                        loc: self.cursor_in(root, target),
                    },
                });
            }
            WindowEvent::CursorMoved { position, .. } => {
                let pos = Point::new(position.x as i32, position.y as i32);
                if let Some(surface) = self.surfaces.get_mut(&root) {
                    surface.cursor = pos;
                }
                let target = self.grab.unwrap_or_else(|| self.hit_test(root, pos).0);
                self.push_mouse(root, target, MouseButton::MOTION, out);
            }
            WindowEvent::MouseInput { state, button, .. } => {
                let Some(button) = keymap::mouse_button(button) else {
                    return;
                };
                let cursor = self.cursor(root);
                match state {
                    ElementState::Pressed => {
                        let target = self.grab.unwrap_or_else(|| self.hit_test(root, cursor).0);
                        self.grab = Some(target);
                        self.push_mouse(root, target, button, out);
                        self.buttons |= keymap::button_mask(button);
                    }
                    ElementState::Released => {
                        let target = self.grab.unwrap_or_else(|| self.hit_test(root, cursor).0);
                        self.buttons -= keymap::button_mask(button);
                        if self.buttons.is_empty() {
                            self.grab = None;
                        }
                        self.push_mouse(root, target, button.released(), out);
                    }
                }
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let dy = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y as f64,
                    MouseScrollDelta::PixelDelta(p) => p.y,
                };
                if dy == 0.0 {
                    return;
                }
                let button = if dy > 0.0 {
                    MouseButton::WHEEL
                } else {
                    MouseButton::WHEEL_DOWN
                };
                let target = self.hit_test(root, self.cursor(root)).0;
                self.push_mouse(root, target, button, out);
            }
            WindowEvent::CursorLeft { .. }
            | WindowEvent::CursorEntered { .. }
            | WindowEvent::Focused(_)
            | WindowEvent::Occluded(_)
            | WindowEvent::ScaleFactorChanged { .. }
            | WindowEvent::Destroyed => {}
            other => tracing::trace!("ignoring window event {:?}", other),
        }
    }

    /// One expose per dirty region and each of its descendants, parents
    /// first, since a parent's expose clears the pixels of its children.
    fn collect_exposes(&self, id: WidgetId, inherited: bool, out: &mut Vec<NativeEvent>) {
        let Some(region) = self.regions.get(&id) else {
            return;
        };
        let expose = inherited || region.dirty;
        if expose {
            out.push(NativeEvent::Expose {
                target: id,
                rect: region.geometry.local(),
            });
        }
        for &child in &region.children {
            self.collect_exposes(child, expose, out);
        }
    }

    fn cursor(&self, root: WidgetId) -> Point {
        self.surfaces.get(&root).map(|s| s.cursor).unwrap_or_default()
    }

    /// Cursor position relative to `target`.
    fn cursor_in(&self, root: WidgetId, target: WidgetId) -> Point {
        let origin = self.placement(target).map(|(origin, _)| origin).unwrap_or_default();
        self.cursor(root) - origin
    }

    fn push_mouse(
        &self,
        root: WidgetId,
        target: WidgetId,
        button: MouseButton,
        out: &mut Vec<NativeEvent>,
    ) {
        out.push(NativeEvent::Mouse {
            target,
            event: MouseEvent {
                button,
                state: self.state(),
                loc: self.cursor_in(root, target),
            },
        });
    }

    /// Releases every native window.
    pub fn shutdown(&mut self) {
        self.pending.clear();
        self.window_ids.clear();
        self.surfaces.clear();
        self.regions.clear();
        self.colors.clear(|_, _| {});
    }
}

/// Framebuffer dimensions of a rectangle, empty when inverted.
fn pixel_size(rect: Rect) -> (u32, u32) {
    (rect.dx().max(0) as u32, rect.dy().max(0) as u32)
}
