//! The drawable guard and the painter handed to drawing code.

use sparta_core::{Point, Rect, Rgba};

use crate::backend::{BackendWindow, ColorRole, Drawable};

/// Tracks whether a widget's window may currently be drawn on.
///
/// A window is drawable while an expose is being dispatched, or between an
/// explicit `draw(true)` and `draw(false)`. Explicit bracketing during an
/// expose is ignored.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DrawState {
    exposing: bool,
    drawing: bool,
}

impl DrawState {
    pub fn is_drawable(&self) -> bool {
        self.exposing || self.drawing
    }

    pub fn is_exposing(&self) -> bool {
        self.exposing
    }

    /// Returns `false` if an expose is already in progress.
    pub fn begin_expose(&mut self) -> bool {
        if self.exposing {
            return false;
        }
        self.exposing = true;
        true
    }

    pub fn end_expose(&mut self) {
        self.exposing = false;
    }

    /// Returns `true` when the backend must be told about the change.
    pub fn set_draw_mode(&mut self, mode: bool) -> bool {
        if self.exposing || self.drawing == mode {
            return false;
        }
        self.drawing = mode;
        true
    }
}

/// Shapes accepted by [`Painter::draw`].
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Text { pos: Point, text: String },
    Rectangle { rect: Rect, fill: bool },
    Lines(Vec<Point>),
    Pixel(Point),
    /// Angles in radians.
    Arc {
        rect: Rect,
        angle1: f64,
        angle2: f64,
        fill: bool,
    },
    Polygon { points: Vec<Point>, fill: bool },
}

/// Drawing access to one widget's window, only handed out while the
/// window is drawable.
pub struct Painter<'a> {
    window: &'a mut (dyn BackendWindow + 'static),
}

impl<'a> Painter<'a> {
    pub(crate) fn new(window: &'a mut (dyn BackendWindow + 'static)) -> Self {
        Self { window }
    }

    pub fn set_color(&mut self, role: ColorRole, color: Rgba) {
        self.window.set_color(role, color);
    }

    pub fn text(&mut self, pos: Point, text: &str) {
        self.window.text(pos, text);
    }

    pub fn rectangle(&mut self, rect: Rect, fill: bool) {
        self.window.rectangle(rect, fill);
    }

    pub fn lines(&mut self, points: &[Point]) {
        if points.len() > 1 {
            self.window.lines(points);
        }
    }

    pub fn arc(&mut self, rect: Rect, angle1: f64, angle2: f64, fill: bool) {
        self.window.arc(rect, angle1, angle2, fill);
    }

    pub fn polygon(&mut self, points: &[Point], fill: bool) {
        if points.len() > 2 {
            self.window.polygon(points, fill);
        }
    }

    pub fn pixel(&mut self, pos: Point) {
        self.window.pixel(pos);
    }

    /// Outline of the widget's local bounds, inset to stay inside them.
    pub fn border(&mut self, geometry: Rect) {
        self.window
            .rectangle(Rect::new(0, 0, geometry.dx() - 1, geometry.dy() - 1), false);
    }

    pub fn draw(&mut self, shape: &Shape) {
        match shape {
            Shape::Text { pos, text } => self.text(*pos, text),
            Shape::Rectangle { rect, fill } => self.rectangle(*rect, *fill),
            Shape::Lines(points) => self.lines(points),
            Shape::Pixel(pos) => self.pixel(*pos),
            Shape::Arc {
                rect,
                angle1,
                angle2,
                fill,
            } => self.arc(*rect, *angle1, *angle2, *fill),
            Shape::Polygon { points, fill } => self.polygon(points, *fill),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_drawable_by_default() {
        assert!(!DrawState::default().is_drawable());
    }

    #[test]
    fn test_expose_does_not_nest() {
        let mut state = DrawState::default();
        assert!(state.begin_expose());
        assert!(!state.begin_expose());
        assert!(state.is_drawable());
        state.end_expose();
        assert!(!state.is_drawable());
    }

    #[test]
    fn test_draw_mode_ignored_during_expose() {
        let mut state = DrawState::default();
        state.begin_expose();
        assert!(!state.set_draw_mode(true));
        state.end_expose();
        assert!(!state.is_drawable());
    }

    #[test]
    fn test_draw_mode_only_reports_changes() {
        let mut state = DrawState::default();
        assert!(state.set_draw_mode(true));
        assert!(!state.set_draw_mode(true));
        assert!(state.is_drawable());
        assert!(state.set_draw_mode(false));
        assert!(!state.set_draw_mode(false));
    }
}
