//! Monospace text through `cosmic-text`, rasterized into the framebuffer.

use cosmic_text::{Attrs, Buffer, Family, FontSystem, Metrics, Shaping, SwashCache};
use sparta_core::{Point, Rgba};
use sparta_ui::Units;

use crate::raster::Raster;

pub struct TextRenderer {
    font_system: FontSystem,
    swash_cache: SwashCache,
    metrics: Metrics,
    buffer: Buffer,
    units: Units,
}

impl TextRenderer {
    /// Loads the system fonts and measures the character cell.
    pub fn new(font_size: f32, line_spacing: f32) -> Self {
        let mut font_system = FontSystem::new();
        let metrics = Metrics::new(font_size, font_size + line_spacing);
        let mut buffer = Buffer::new(&mut font_system, metrics);
        buffer.set_size(&mut font_system, None, None);

        let mut renderer = Self {
            font_system,
            swash_cache: SwashCache::new(),
            metrics,
            buffer,
            units: Units::default(),
        };
        renderer.units = renderer.measure();
        tracing::debug!(
            "text metrics: size {} line {} cell {}x{}",
            metrics.font_size,
            metrics.line_height,
            renderer.units.width,
            renderer.units.height
        );
        renderer
    }

    pub fn units(&self) -> Units {
        self.units
    }

    fn shape(&mut self, text: &str) {
        self.buffer.set_text(
            &mut self.font_system,
            text,
            Attrs::new().family(Family::Monospace),
            Shaping::Advanced,
        );
        self.buffer.shape_until_scroll(&mut self.font_system, false);
    }

    fn measure(&mut self) -> Units {
        self.shape("M");
        let advance = self
            .buffer
            .layout_runs()
            .flat_map(|run| run.glyphs.iter())
            .map(|glyph| glyph.w)
            .next();

        let height = self.metrics.line_height.ceil() as i32;
        match advance {
            Some(width) if width > 0.0 => Units {
                width: width.ceil() as i32,
                height,
            },
            _ => {
                tracing::warn!("no monospace font found, using default cell width");
                Units {
                    height,
                    ..Units::default()
                }
            }
        }
    }

    /// Draws a single line with the top-left of its first cell at `pos`.
    pub fn draw(&mut self, raster: &mut Raster<'_>, pos: Point, text: &str, color: Rgba) {
        self.shape(text);
        let color = cosmic_text::Color::rgba(color.r, color.g, color.b, color.a);
        self.buffer.draw(
            &mut self.font_system,
            &mut self.swash_cache,
            color,
            |x, y, w, h, color| {
                let packed = Rgba::new(color.r(), color.g(), color.b(), color.a()).to_argb();
                for dy in 0..h as i32 {
                    for dx in 0..w as i32 {
                        raster.blend(pos.x + x + dx, pos.y + y + dy, packed);
                    }
                }
            },
        );
    }
}

impl std::fmt::Debug for TextRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextRenderer")
            .field("metrics", &self.metrics)
            .field("units", &self.units)
            .finish_non_exhaustive()
    }
}
