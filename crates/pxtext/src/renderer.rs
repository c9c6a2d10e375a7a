//! Renderer - draw parameters bound to a strand
//!
//! A renderer is a plain bundle of values around an `Arc<Strand>`. Cloning
//! one is cheap, and changing a clone never affects the original. Every
//! draw and measurement resolves, lays out and (for draws) composites in
//! one go; [`Renderer::layout`] plus [`Renderer::draw_layout`] split the two
//! halves when the same layout must be measured and drawn.

use crate::strand::Strand;
use pxtext_composite::{Compositor, MaskDrawParams};
use pxtext_core::{
    Align, AlignPatch, BlendMode, BoundingMode, Color, ConfigError, Direction, GlyphId, GlyphMask,
    Raster, Rect, Result, MAX_SCALE,
};
use pxtext_layout::{LayoutParams, TextLayout};
use std::fmt;
use std::sync::Arc;

#[derive(Clone)]
pub struct Renderer {
    strand: Arc<Strand>,
    scale: u32,
    color: Color,
    blend: BlendMode,
    align: Align,
    direction: Direction,
    bounding: BoundingMode,
    wrap_width: Option<u32>,
    par_breaks: bool,
    compositor: Compositor,
}

impl Renderer {
    /// White text at scale 1, baseline left aligned, drawn "over"
    pub fn new(strand: Arc<Strand>) -> Self {
        Self {
            strand,
            scale: 1,
            color: Color::white(),
            blend: BlendMode::Over,
            align: Align::default(),
            direction: Direction::Horizontal,
            bounding: BoundingMode::LogicalBounding,
            wrap_width: None,
            par_breaks: false,
            compositor: Compositor::new(),
        }
    }

    pub fn strand(&self) -> &Arc<Strand> {
        &self.strand
    }

    pub fn scale(&self) -> u32 {
        self.scale
    }

    /// Integer upscaling factor, from 1 to [`MAX_SCALE`]
    pub fn set_scale(&mut self, scale: u32) -> Result<()> {
        if !(1..=MAX_SCALE).contains(&scale) {
            return Err(ConfigError::InvalidScale.into());
        }
        self.scale = scale;
        Ok(())
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    pub fn blend_mode(&self) -> BlendMode {
        self.blend
    }

    pub fn set_blend_mode(&mut self, blend: BlendMode) {
        self.blend = blend;
    }

    pub fn align(&self) -> Align {
        self.align
    }

    /// Change the axes named by `align`, keeping the others
    ///
    /// ```rust
    /// # use std::sync::Arc;
    /// use pxtext::{HorzAlign, Renderer, Strand, VertAlign};
    ///
    /// let strand = Strand::new(Arc::new(pxtext::sample::font())).unwrap();
    /// let mut renderer = Renderer::new(strand);
    /// renderer.set_align(VertAlign::Top | HorzAlign::Right);
    /// renderer.set_align(HorzAlign::Left);
    /// assert_eq!(renderer.align().to_string(), "Top|Left");
    /// ```
    pub fn set_align(&mut self, align: impl Into<AlignPatch>) {
        self.align = self.align.apply(align);
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn set_direction(&mut self, direction: Direction) {
        self.direction = direction;
    }

    pub fn bounding_mode(&self) -> BoundingMode {
        self.bounding
    }

    pub fn set_bounding_mode(&mut self, bounding: BoundingMode) {
        self.bounding = bounding;
    }

    pub fn wrap_width(&self) -> Option<u32> {
        self.wrap_width
    }

    /// Wrap width used by [`Renderer::draw`] and [`Renderer::measure`]
    pub fn set_wrap_width(&mut self, wrap_width: Option<u32>) {
        self.wrap_width = wrap_width;
    }

    pub fn par_breaks(&self) -> bool {
        self.par_breaks
    }

    pub fn set_par_breaks(&mut self, par_breaks: bool) {
        self.par_breaks = par_breaks;
    }

    fn layout_params(&self, wrap_width: Option<u32>) -> LayoutParams {
        LayoutParams {
            scale: self.scale,
            align: self.align,
            direction: self.direction,
            bounding: self.bounding,
            wrap_width,
            par_breaks: self.par_breaks,
        }
    }

    /// Resolve and lay out `text` without drawing it
    pub fn layout(&self, text: &str, wrap_width: Option<u32>) -> TextLayout {
        let glyphs = self.strand.resolve(text);
        pxtext_layout::layout(&glyphs, &*self.strand, &self.layout_params(wrap_width))
    }

    /// Width and height `draw` would occupy
    pub fn measure(&self, text: &str) -> (u32, u32) {
        self.layout(text, self.wrap_width).size()
    }

    pub fn measure_with_wrap(&self, text: &str, wrap_width: u32) -> (u32, u32) {
        self.layout(text, Some(wrap_width)).size()
    }

    /// Box `draw` would occupy, relative to the draw origin
    pub fn measure_bounds(&self, text: &str) -> Rect {
        self.layout(text, self.wrap_width).bounds()
    }

    /// Draw `text` with its alignment anchor at `(x, y)`
    ///
    /// Returns the measured box on the target.
    pub fn draw(&self, target: &mut dyn Raster, text: &str, x: i32, y: i32) -> Rect {
        let layout = self.layout(text, self.wrap_width);
        self.draw_layout(target, &layout, x, y)
    }

    pub fn draw_with_wrap(
        &self,
        target: &mut dyn Raster,
        text: &str,
        x: i32,
        y: i32,
        wrap_width: u32,
    ) -> Rect {
        let layout = self.layout(text, Some(wrap_width));
        self.draw_layout(target, &layout, x, y)
    }

    /// Draw a layout made earlier, with this renderer's color and blend mode
    ///
    /// Scale and direction come from the layout itself.
    pub fn draw_layout(&self, target: &mut dyn Raster, layout: &TextLayout, x: i32, y: i32) -> Rect {
        self.compositor
            .draw_layout(target, layout, x, y, self.color, self.blend)
    }

    pub fn load_mask(&self, glyph: GlyphId) -> Option<Arc<GlyphMask>> {
        self.strand.load_mask(glyph)
    }

    /// Draw parameters for a single mask at `(x, y)` under this renderer
    pub fn mask_params(&self, x: i32, y: i32) -> MaskDrawParams {
        MaskDrawParams {
            x,
            y,
            scale: self.scale,
            color: self.color,
            blend: self.blend,
            direction: self.direction,
        }
    }

    /// Draw one mask with its origin at `params.x`, `params.y`
    pub fn draw_mask(&self, target: &mut dyn Raster, mask: &GlyphMask, params: &MaskDrawParams) -> Rect {
        self.compositor.draw_mask(target, mask, params)
    }
}

impl fmt::Debug for Renderer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Renderer")
            .field("font", &self.strand.font().name())
            .field("scale", &self.scale)
            .field("color", &self.color)
            .field("blend", &self.blend)
            .field("align", &self.align)
            .field("direction", &self.direction)
            .field("bounding", &self.bounding)
            .field("wrap_width", &self.wrap_width)
            .field("par_breaks", &self.par_breaks)
            .finish()
    }
}
