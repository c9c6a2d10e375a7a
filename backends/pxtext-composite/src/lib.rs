//! Compositor - glyph masks become pixels
//!
//! Every visible texel of a mask turns into a `scale × scale` block of
//! target pixels (nearest neighbor, no filtering), rotated with the writing
//! direction around the glyph origin. Each covered pixel is blended with
//! [`blend::blend`]. Pixels outside the target are skipped silently.

pub mod blend;

use pxtext_core::{BlendMode, Color, Direction, GlyphMask, MaskFormat, Raster, Rect, MAX_SCALE};
use pxtext_layout::TextLayout;

/// Where and how to draw a single mask
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaskDrawParams {
    /// Target position of the glyph origin
    pub x: i32,
    pub y: i32,
    /// Integer upscaling factor, clamped to 1 ..= [`MAX_SCALE`]
    pub scale: u32,
    pub color: Color,
    pub blend: BlendMode,
    pub direction: Direction,
}

impl Default for MaskDrawParams {
    fn default() -> Self {
        Self {
            x: 0,
            y: 0,
            scale: 1,
            color: Color::white(),
            blend: BlendMode::Over,
            direction: Direction::Horizontal,
        }
    }
}

/// Blends masks into rasters
#[derive(Debug, Clone, Copy, Default)]
pub struct Compositor;

impl Compositor {
    pub fn new() -> Self {
        Self
    }

    pub fn name(&self) -> &'static str {
        "composite"
    }

    /// Draw one mask; returns the target rectangle the mask covers
    /// (before clipping)
    pub fn draw_mask(&self, target: &mut dyn Raster, mask: &GlyphMask, params: &MaskDrawParams) -> Rect {
        let s = params.scale.clamp(1, MAX_SCALE) as i32;
        let covered = params
            .direction
            .map_rect(&mask.rect().scale(s))
            .translate(params.x, params.y);
        if mask.is_blank() || params.color.a == 0 {
            return covered;
        }
        let clip = target.bounds();
        if covered.intersect(&clip).is_empty() {
            return covered;
        }
        log::trace!(
            "{}: glyph {} at ({}, {}) x{}",
            self.name(),
            mask.glyph,
            params.x,
            params.y,
            s
        );

        let color_alpha = params.color.a as f32 / 255.0;
        for (tx, ty, texel) in mask.texels() {
            let source = match mask.format() {
                MaskFormat::Alpha => params.color,
                MaskFormat::Rgba => modulate(texel, params.color),
            };
            let coverage = texel[3] as f32 / 255.0 * color_alpha;

            let cell = Rect::new(tx * s, ty * s, (tx + 1) * s, (ty + 1) * s);
            let area = params
                .direction
                .map_rect(&cell)
                .translate(params.x, params.y)
                .intersect(&clip);
            for py in area.min_y..area.max_y {
                for px in area.min_x..area.max_x {
                    if let Some(dst) = target.pixel(px, py) {
                        target.set_pixel(px, py, blend::blend(dst, source, coverage, params.blend));
                    }
                }
            }
        }
        covered
    }

    /// Draw every glyph of a layout with its origin at `(x, y)`
    ///
    /// Returns the layout's block box translated to the target.
    pub fn draw_layout(
        &self,
        target: &mut dyn Raster,
        layout: &TextLayout,
        x: i32,
        y: i32,
        color: Color,
        blend: BlendMode,
    ) -> Rect {
        log::debug!(
            "{}: drawing {} lines at ({x}, {y}) with {blend}",
            self.name(),
            layout.line_count()
        );
        let mut params = MaskDrawParams {
            x,
            y,
            scale: layout.scale(),
            color,
            blend,
            direction: layout.direction(),
        };
        for (glyph, (dx, dy)) in layout.placements() {
            params.x = x + dx;
            params.y = y + dy;
            self.draw_mask(target, &glyph.mask, &params);
        }
        layout.bounds().translate(x, y)
    }
}

/// RGBA texel tinted by the draw color; alpha is applied as coverage
fn modulate(texel: [u8; 4], color: Color) -> Color {
    let tint = |t: u8, c: u8| ((t as u16 * c as u16 + 127) / 255) as u8;
    Color::rgb(
        tint(texel[0], color.r),
        tint(texel[1], color.g),
        tint(texel[2], color.b),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pxtext_core::{Bitmap, GlyphId};

    fn dot() -> GlyphMask {
        // one pixel, one row above the baseline
        GlyphMask::from_rows(GlyphId(1), 2, 0, -1, &["#"])
    }

    #[test]
    fn texel_becomes_scaled_block() {
        let mut target = Bitmap::new(8, 8);
        let params = MaskDrawParams {
            x: 2,
            y: 4,
            scale: 3,
            ..Default::default()
        };
        let covered = Compositor::new().draw_mask(&mut target, &dot(), &params);
        assert_eq!(covered, Rect::new(2, 1, 5, 4));
        for y in 0..8 {
            for x in 0..8 {
                let lit = covered.contains(x, y);
                let px = target.pixel(x, y).unwrap();
                assert_eq!(px == Color::white(), lit, "pixel ({x}, {y})");
            }
        }
    }

    #[test]
    fn oversized_scale_is_clamped() {
        let mut target = Bitmap::new(4, 4);
        let params = MaskDrawParams {
            x: 0,
            y: 0,
            scale: 1 << 31,
            ..Default::default()
        };
        let covered = Compositor::new().draw_mask(&mut target, &dot(), &params);
        let s = MAX_SCALE as i32;
        assert_eq!(covered, Rect::new(0, -s, s, 0));
        assert!(target.data().iter().all(|&b| b == 0));
    }

    #[test]
    fn clipped_draw_is_silent() {
        let mut target = Bitmap::new(2, 2);
        let params = MaskDrawParams {
            x: -5,
            y: 100,
            scale: 2,
            ..Default::default()
        };
        Compositor::new().draw_mask(&mut target, &dot(), &params);
        assert!(target.data().iter().all(|&b| b == 0));

        let params = MaskDrawParams {
            x: 1,
            y: 1,
            scale: 4,
            ..Default::default()
        };
        Compositor::new().draw_mask(&mut target, &dot(), &params);
        assert_eq!(target.pixel(1, 0), Some(Color::white()));
        assert_eq!(target.pixel(0, 0), Some(Color::TRANSPARENT));
    }

    #[test]
    fn sideways_rotates_around_origin() {
        // Two texels in a row: (0,-1) and (1,-1)
        let bar = GlyphMask::from_rows(GlyphId(1), 2, 0, -1, &["##"]);
        let mut target = Bitmap::new(8, 8);
        let params = MaskDrawParams {
            x: 4,
            y: 4,
            direction: Direction::Sideways,
            ..Default::default()
        };
        let covered = Compositor::new().draw_mask(&mut target, &bar, &params);
        // Text runs upward: a vertical bar left of the origin column
        assert_eq!(covered, Rect::new(3, 2, 4, 4));

        let mut target = Bitmap::new(8, 8);
        let params = MaskDrawParams {
            direction: Direction::SidewaysRight,
            ..params
        };
        let covered = Compositor::new().draw_mask(&mut target, &bar, &params);
        assert_eq!(covered, Rect::new(4, 4, 5, 6));
        assert_eq!(target.pixel(4, 5), Some(Color::white()));
    }

    #[test]
    fn rgba_masks_are_tinted() {
        let mask = GlyphMask::from_rgba(GlyphId(2), 1, Rect::new(0, -1, 1, 0), vec![255, 128, 0, 255]).unwrap();
        let mut target = Bitmap::new(1, 1);
        let params = MaskDrawParams {
            y: 1,
            color: Color::rgb(255, 255, 0),
            ..Default::default()
        };
        Compositor::new().draw_mask(&mut target, &mask, &params);
        assert_eq!(target.pixel(0, 0), Some(Color::rgb(255, 128, 0)));

        let params = MaskDrawParams {
            color: Color::rgb(0, 255, 255),
            ..params
        };
        Compositor::new().draw_mask(&mut target, &mask, &params);
        assert_eq!(target.pixel(0, 0), Some(Color::rgb(0, 128, 0)));
    }

    #[test]
    fn color_alpha_scales_coverage() {
        let mut target = Bitmap::filled(1, 1, Color::black());
        let params = MaskDrawParams {
            y: 1,
            color: Color::rgba(255, 255, 255, 128),
            ..Default::default()
        };
        Compositor::new().draw_mask(&mut target, &dot(), &params);
        assert_eq!(target.pixel(0, 0), Some(Color::rgb(128, 128, 128)));
    }
}
