use std::cell::RefCell;
use std::rc::Rc;

use sparta_core::{Point, Rect, Rgba};
use sparta_ui::backend::{BackendWindow, ColorRole, Drawable, WindowProperty};
use sparta_ui::WidgetId;

use crate::desktop::Desktop;
use crate::raster::Raster;

/// The native half of one widget: a root window or a region of one.
pub struct RegionWindow {
    pub(crate) id: WidgetId,
    pub(crate) desktop: Rc<RefCell<Desktop>>,
}

impl RegionWindow {
    fn stroke(&self, draw: impl FnOnce(&mut Raster<'_>, u32)) {
        self.desktop
            .borrow_mut()
            .paint(self.id, |raster, _, region| draw(raster, region.pen));
    }

    fn mark_presentable(&self) {
        let mut guard = self.desktop.borrow_mut();
        let desktop = &mut *guard;
        let Some(root) = desktop.regions.get(&self.id).map(|r| r.root) else {
            return;
        };
        if let Some(surface) = desktop.surfaces.get_mut(&root) {
            surface.needs_present = true;
        }
    }
}

impl Drawable for RegionWindow {
    fn set_color(&mut self, role: ColorRole, color: Rgba) {
        let mut guard = self.desktop.borrow_mut();
        let desktop = &mut *guard;
        let pixel = desktop.pixel(color);
        if let Some(region) = desktop.regions.get_mut(&self.id) {
            match role {
                ColorRole::Foreground => region.pen = pixel,
                ColorRole::Background => region.paper = pixel,
            }
        }
    }

    fn text(&mut self, pos: Point, text: &str) {
        self.desktop.borrow_mut().paint(self.id, |raster, renderer, region| {
            renderer.draw(raster, pos, text, Rgba::from_argb(region.pen));
        });
    }

    fn rectangle(&mut self, rect: Rect, fill: bool) {
        self.stroke(|raster, pen| {
            if fill {
                raster.fill_rect(rect, pen);
            } else {
                raster.stroke_rect(rect, pen);
            }
        });
    }

    fn lines(&mut self, points: &[Point]) {
        self.stroke(|raster, pen| raster.lines(points, pen));
    }

    fn arc(&mut self, rect: Rect, angle1: f64, angle2: f64, fill: bool) {
        self.stroke(|raster, pen| raster.arc(rect, angle1, angle2, fill, pen));
    }

    fn polygon(&mut self, points: &[Point], fill: bool) {
        self.stroke(|raster, pen| raster.polygon(points, fill, pen));
    }

    fn pixel(&mut self, pos: Point) {
        self.stroke(|raster, pen| raster.put(pos.x, pos.y, pen));
    }
}

impl BackendWindow for RegionWindow {
    fn begin_expose(&mut self, rect: Rect) {
        let mut guard = self.desktop.borrow_mut();
        let desktop = &mut *guard;
        let Some((foreground, background)) = desktop
            .regions
            .get(&self.id)
            .map(|r| (r.foreground, r.background))
        else {
            return;
        };
        let pen = desktop.pixel(foreground);
        let paper = desktop.pixel(background);
        desktop.paint(self.id, |raster, _, region| {
            region.pen = pen;
            region.paper = paper;
            region.dirty = false;
            raster.fill_rect(rect, paper);
        });
    }

    fn end_expose(&mut self) {
        self.mark_presentable();
    }

    fn draw(&mut self, begin: bool) {
        if !begin {
            self.mark_presentable();
        }
    }

    fn close(&mut self) {
        tracing::trace!("releasing native window of {}", self.id);
        self.desktop.borrow_mut().remove(self.id);
    }

    fn set_property(&mut self, property: WindowProperty) -> Option<Rect> {
        let mut guard = self.desktop.borrow_mut();
        let desktop = &mut *guard;
        match property {
            WindowProperty::Geometry(rect) => desktop.set_geometry(self.id, rect),
            WindowProperty::Caption(caption) => {
                let region = desktop.regions.get_mut(&self.id)?;
                if region.parent.is_some() {
                    return None;
                }
                let window = desktop.surfaces.get(&self.id).and_then(|s| s.window.as_ref());
                if let Some(window) = window {
                    window.set_title(&caption);
                }
                region.caption = caption;
                None
            }
            WindowProperty::Foreground(color) => {
                if let Some(region) = desktop.regions.get_mut(&self.id) {
                    region.foreground = color;
                }
                None
            }
            WindowProperty::Background(color) => {
                if let Some(region) = desktop.regions.get_mut(&self.id) {
                    region.background = color;
                }
                desktop.mark_dirty(self.id);
                None
            }
        }
    }

    fn update(&mut self) {
        self.desktop.borrow_mut().mark_dirty(self.id);
    }

    fn focus(&mut self) {
        let mut guard = self.desktop.borrow_mut();
        let desktop = &mut *guard;
        let Some(root) = desktop.regions.get(&self.id).map(|r| r.root) else {
            return;
        };
        let previous = desktop
            .focus
            .and_then(|f| desktop.regions.get(&f))
            .map(|r| r.root);
        desktop.focus = Some(self.id);
        if previous != Some(root)
            && let Some(window) = desktop.surfaces.get(&root).and_then(|s| s.window.as_ref())
        {
            window.focus_window();
        }
    }
}
