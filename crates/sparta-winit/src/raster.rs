//! Software rasterizer for the framebuffer behind every root window.
//!
//! Pixels are packed `0xAARRGGBB` words. Child widgets draw through a
//! [`Raster`] view translated to their origin and clipped to their region,
//! so nothing a widget draws can leak into its siblings.

use std::f64::consts::TAU;

use sparta_core::{Point, Rect};

pub struct Framebuffer {
    width: u32,
    height: u32,
    pixels: Vec<u32>,
}

impl Framebuffer {
    pub fn new(width: u32, height: u32, fill: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![fill; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(0, 0, self.width as i32, self.height as i32)
    }

    /// Reallocates when the size changes. The content is not preserved; an
    /// expose of the whole window always follows a resize.
    pub fn resize(&mut self, width: u32, height: u32, fill: u32) {
        if width == self.width && height == self.height {
            return;
        }
        self.width = width;
        self.height = height;
        self.pixels.clear();
        self.pixels.resize(width as usize * height as usize, fill);
    }

    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    pub fn get(&self, x: i32, y: i32) -> Option<u32> {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return None;
        }
        Some(self.pixels[y as usize * self.width as usize + x as usize])
    }

    /// A drawing view whose `(0, 0)` is `origin`, limited to `clip`
    /// (framebuffer coordinates).
    pub fn raster(&mut self, origin: Point, clip: Rect) -> Raster<'_> {
        let clip = clip.intersect(&self.bounds());
        Raster {
            fb: self,
            origin,
            clip,
        }
    }
}

impl std::fmt::Debug for Framebuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Framebuffer")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

pub struct Raster<'a> {
    fb: &'a mut Framebuffer,
    origin: Point,
    clip: Rect,
}

impl Raster<'_> {
    /// Writes one pixel in local coordinates, replacing what was there.
    pub fn put(&mut self, x: i32, y: i32, color: u32) {
        let p = Point::new(x, y) + self.origin;
        if !self.clip.contains(p) {
            return;
        }
        let index = p.y as usize * self.fb.width as usize + p.x as usize;
        self.fb.pixels[index] = color;
    }

    /// Blends `color` over one pixel using its alpha channel.
    pub fn blend(&mut self, x: i32, y: i32, color: u32) {
        let alpha = color >> 24;
        match alpha {
            0 => {}
            255 => self.put(x, y, color),
            _ => {
                let p = Point::new(x, y) + self.origin;
                if !self.clip.contains(p) {
                    return;
                }
                let index = p.y as usize * self.fb.width as usize + p.x as usize;
                let dst = self.fb.pixels[index];
                let mix = |shift: u32| {
                    let s = (color >> shift) & 0xff;
                    let d = (dst >> shift) & 0xff;
                    ((s * alpha + d * (255 - alpha)) / 255) << shift
                };
                self.fb.pixels[index] = 0xff00_0000 | mix(16) | mix(8) | mix(0);
            }
        }
    }

    /// Fills `rect`, excluding its max edges.
    pub fn fill_rect(&mut self, rect: Rect, color: u32) {
        let abs = rect.add(self.origin).intersect(&self.clip);
        if abs.is_empty() {
            return;
        }
        let width = self.fb.width as usize;
        for y in abs.min.y..abs.max.y {
            let row = y as usize * width;
            self.fb.pixels[row + abs.min.x as usize..row + abs.max.x as usize].fill(color);
        }
    }

    /// Outlines `rect`, including its max edges.
    pub fn stroke_rect(&mut self, rect: Rect, color: u32) {
        let Rect { min, max } = rect;
        self.line(min, Point::new(max.x, min.y), color);
        self.line(Point::new(max.x, min.y), max, color);
        self.line(max, Point::new(min.x, max.y), color);
        self.line(Point::new(min.x, max.y), min, color);
    }

    /// Bresenham line, both endpoints included.
    pub fn line(&mut self, from: Point, to: Point, color: u32) {
        let dx = (to.x - from.x).abs();
        let dy = -(to.y - from.y).abs();
        let sx = if from.x < to.x { 1 } else { -1 };
        let sy = if from.y < to.y { 1 } else { -1 };
        let mut err = dx + dy;
        let (mut x, mut y) = (from.x, from.y);

        loop {
            self.put(x, y, color);
            if x == to.x && y == to.y {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    pub fn lines(&mut self, points: &[Point], color: u32) {
        for pair in points.windows(2) {
            self.line(pair[0], pair[1], color);
        }
    }

    /// Arc of the ellipse inscribed in `rect`, from `start` spanning
    /// `extent` radians counter-clockwise. A filled arc is a pie slice.
    pub fn arc(&mut self, rect: Rect, start: f64, extent: f64, fill: bool, color: u32) {
        let points = arc_points(rect, start, extent);
        if fill {
            let mut pie = points;
            if extent.abs() < TAU {
                pie.push(center(rect));
            }
            self.fill_polygon(&pie, color);
        } else {
            self.lines(&points, color);
        }
    }

    /// Outline closes back to the first point; fill uses the even-odd rule.
    pub fn polygon(&mut self, points: &[Point], fill: bool, color: u32) {
        if points.len() < 2 {
            return;
        }
        if fill {
            self.fill_polygon(points, color);
            return;
        }
        self.lines(points, color);
        if let (Some(&first), Some(&last)) = (points.first(), points.last())
            && first != last
        {
            self.line(last, first, color);
        }
    }

    fn fill_polygon(&mut self, points: &[Point], color: u32) {
        if points.len() < 3 {
            self.lines(points, color);
            return;
        }
        let top = points.iter().map(|p| p.y).min().unwrap_or(0);
        let bottom = points.iter().map(|p| p.y).max().unwrap_or(0);
        let top = top.max(self.clip.min.y - self.origin.y);
        let bottom = bottom.min(self.clip.max.y - self.origin.y - 1);

        let mut crossings = Vec::with_capacity(points.len());
        for y in top..=bottom {
            let scan = y as f64 + 0.5;
            crossings.clear();
            for (i, a) in points.iter().enumerate() {
                let b = points[(i + 1) % points.len()];
                let (ay, by) = (a.y as f64, b.y as f64);
                if (ay <= scan) != (by <= scan) {
                    let t = (scan - ay) / (by - ay);
                    crossings.push(a.x as f64 + t * (b.x - a.x) as f64);
                }
            }
            crossings.sort_by(f64::total_cmp);
            for span in crossings.chunks_exact(2) {
                let x0 = (span[0] - 0.5).ceil() as i32;
                let x1 = (span[1] - 0.5).ceil() as i32;
                self.fill_rect(Rect::new(x0, y, x1, y + 1), color);
            }
        }
    }
}

fn center(rect: Rect) -> Point {
    Point::new((rect.min.x + rect.max.x) / 2, (rect.min.y + rect.max.y) / 2)
}

/// Points along an elliptical arc, y growing downwards.
fn arc_points(rect: Rect, start: f64, extent: f64) -> Vec<Point> {
    let rx = rect.dx() as f64 / 2.0;
    let ry = rect.dy() as f64 / 2.0;
    let cx = rect.min.x as f64 + rx;
    let cy = rect.min.y as f64 + ry;
    let extent = extent.clamp(-TAU, TAU);

    let segments = ((rx + ry) * extent.abs()).ceil().max(4.0) as usize;
    (0..=segments)
        .map(|i| {
            let t = start + extent * i as f64 / segments as f64;
            Point::new(
                (cx + rx * t.cos()).round() as i32,
                (cy - ry * t.sin()).round() as i32,
            )
        })
        .collect()
}
