//! Layout Engine - glyph sequences in, placed glyphs and boxes out
//!
//! Layout happens in "text space": lines run along +x, following lines sit
//! further along +y, and the draw origin is (0, 0). Everything is in target
//! pixels, already multiplied by the integer scale. The writing
//! [`Direction`] only comes in at the end, when [`TextLayout::bounds`] and
//! [`TextLayout::placements`] rotate text space onto the screen.
//!
//! The steps, in order:
//!
//! 1. Load every mask once and split at hard breaks
//! 2. Word wrap, when a wrap width is set
//! 3. Place glyphs along each line (advance, interspacing, kerning)
//! 4. Stack lines one line height apart (plus paragraph spacing)
//! 5. Align each line horizontally around the origin
//! 6. Compute the block box under the bounding mode, then shift the block
//!    vertically so the requested anchor sits on the origin
//!
//! Layout never touches pixels and depends on nothing but its inputs.

mod wrap;

use pxtext_core::{
    Align, BoundingMode, Direction, GlyphId, GlyphMask, GlyphSource, HorzAlign, Metrics, Rect,
    VertAlign, MAX_SCALE,
};
use std::sync::Arc;
use wrap::{Item, Spacing, VisualLine};

/// Everything that shapes a layout besides the glyphs themselves
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutParams {
    /// Integer upscaling factor, from 1 to [`MAX_SCALE`]
    pub scale: u32,
    pub align: Align,
    pub direction: Direction,
    pub bounding: BoundingMode,
    /// Maximum line extent in target pixels, along the text axis
    pub wrap_width: Option<u32>,
    /// Add a line height of spacing after every blank line
    pub par_breaks: bool,
}

impl Default for LayoutParams {
    fn default() -> Self {
        Self {
            scale: 1,
            align: Align::default(),
            direction: Direction::Horizontal,
            bounding: BoundingMode::LogicalBounding,
            wrap_width: None,
            par_breaks: false,
        }
    }
}

/// One glyph ready to draw
#[derive(Debug, Clone)]
pub struct PlacedGlyph {
    /// Concrete glyph whose mask was loaded
    pub glyph: GlyphId,
    pub mask: Arc<GlyphMask>,
    /// Glyph origin on the baseline, in text space
    pub offset: (i32, i32),
}

/// One visual line
#[derive(Debug, Clone)]
pub struct LayoutLine {
    pub glyphs: Vec<PlacedGlyph>,
    /// Pen distance from the first glyph's origin to past the last advance
    pub extent: i32,
    /// Text space x where the line starts
    pub start: i32,
    /// Text space y of the baseline
    pub baseline: i32,
}

impl LayoutLine {
    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }
}

/// The result of a layout
#[derive(Debug, Clone)]
pub struct TextLayout {
    lines: Vec<LayoutLine>,
    bounds: Rect,
    direction: Direction,
    scale: u32,
}

impl TextLayout {
    pub fn lines(&self) -> &[LayoutLine] {
        &self.lines
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn scale(&self) -> u32 {
        self.scale
    }

    /// Block box in text space, relative to the origin
    pub fn text_bounds(&self) -> Rect {
        self.bounds
    }

    /// Block box on screen, relative to the draw origin
    pub fn bounds(&self) -> Rect {
        self.direction.map_rect(&self.bounds)
    }

    /// Screen width and height of the block
    pub fn size(&self) -> (u32, u32) {
        let b = self.bounds();
        (b.width() as u32, b.height() as u32)
    }

    pub fn glyphs(&self) -> impl Iterator<Item = &PlacedGlyph> {
        self.lines.iter().flat_map(|line| line.glyphs.iter())
    }

    /// Every glyph with its screen origin relative to the draw origin
    pub fn placements(&self) -> impl Iterator<Item = (&PlacedGlyph, (i32, i32))> {
        let direction = self.direction;
        self.glyphs()
            .map(move |g| (g, direction.map_point(g.offset.0, g.offset.1)))
    }
}

/// Lay out a resolved glyph sequence
pub fn layout(glyphs: &[GlyphId], source: &dyn GlyphSource, params: &LayoutParams) -> TextLayout {
    let scale = params.scale.clamp(1, MAX_SCALE);
    if scale != params.scale {
        log::warn!("layout scale {} clamped to {}", params.scale, scale);
    }
    let s = scale as i32;
    let metrics = source.metrics();
    log::debug!(
        "layout: {} glyphs, scale {}, {}, {}, {}",
        glyphs.len(),
        scale,
        params.align,
        params.direction,
        params.bounding
    );

    let spacing = Spacing {
        source,
        interspacing: metrics.horz_interspacing,
    };
    let hard = wrap::hard_lines(glyphs, source);
    let visual = match params.wrap_width {
        Some(width) => {
            let limit = i32::try_from(width).unwrap_or(i32::MAX) / s;
            wrap::wrapped(hard, &spacing, limit)
        }
        None => wrap::unwrapped(hard),
    };

    let mut lines = place_lines(visual, &spacing, &metrics, s, params);
    let block = block_bounds(&lines, &metrics, s, params.bounding);
    let dy = vertical_shift(&block, &lines, &metrics, s, params.align.vert());

    for line in &mut lines {
        line.baseline += dy;
        for glyph in &mut line.glyphs {
            glyph.offset.1 += dy;
        }
    }

    TextLayout {
        lines,
        bounds: block.translate(0, dy),
        direction: params.direction,
        scale,
    }
}

/// Steps 3 to 5: pen positions, stacking and horizontal alignment
///
/// Logical modes anchor each line on its advance extent, mask modes on the
/// span its pixels cover. Lines without pixels fall back to the extent.
fn place_lines(
    visual: Vec<VisualLine>,
    spacing: &Spacing<'_>,
    metrics: &Metrics,
    s: i32,
    params: &LayoutParams,
) -> Vec<LayoutLine> {
    let pitch = metrics.line_height().saturating_mul(s);
    let mut lines = Vec::with_capacity(visual.len());
    let mut baseline = 0;
    let mut prev_blank = false;

    for (index, line) in visual.into_iter().enumerate() {
        if index > 0 {
            baseline += pitch;
            if params.par_breaks && prev_blank {
                baseline += pitch;
            }
        }
        prev_blank = line.blank;

        let mut pens = Vec::with_capacity(line.items.len());
        let mut pen = 0;
        for (i, item) in line.items.iter().enumerate() {
            if i > 0 {
                pen += spacing.gap(&line.items[i - 1], item);
            }
            pens.push(pen);
            pen += item.advance();
        }
        let extent = pen.saturating_mul(s);
        let span = if params.bounding.is_mask() {
            ink_span(&line.items, &pens, s)
        } else {
            None
        };
        let (lo, hi) = span.unwrap_or((0, extent));
        let start = match params.align.horz() {
            HorzAlign::Left => -lo,
            HorzAlign::HorzCenter => -(lo + (hi - lo) / 2),
            HorzAlign::Right => -hi,
        };

        let glyphs = line
            .items
            .into_iter()
            .zip(pens)
            .map(|(item, pen)| PlacedGlyph {
                glyph: item.glyph(),
                mask: item.mask,
                offset: (start + pen.saturating_mul(s), baseline),
            })
            .collect();
        lines.push(LayoutLine {
            glyphs,
            extent,
            start,
            baseline,
        });
    }
    lines
}

/// Horizontal pixel span of a line placed at x = 0
fn ink_span(items: &[Item], pens: &[i32], s: i32) -> Option<(i32, i32)> {
    items
        .iter()
        .zip(pens)
        .map(|(item, &pen)| item.mask.rect().scale(s).translate(pen.saturating_mul(s), 0))
        .filter(|rect| !rect.is_empty())
        .fold(None, |span, rect| match span {
            None => Some((rect.min_x, rect.max_x)),
            Some((lo, hi)) => Some((lo.min(rect.min_x), hi.max(rect.max_x))),
        })
}

/// Step 6a: block box before the vertical shift
fn block_bounds(lines: &[LayoutLine], metrics: &Metrics, s: i32, mode: BoundingMode) -> Rect {
    let (Some(first), Some(last)) = (lines.first(), lines.last()) else {
        return Rect::default();
    };

    // Mask boxes reserve no descent, so the NoDesc variant has nothing to
    // drop and never cuts drawn pixels
    if mode.is_mask() {
        let mut ink = Rect::default();
        for glyph in lines.iter().flat_map(|l| l.glyphs.iter()) {
            let rect = glyph
                .mask
                .rect()
                .scale(s)
                .translate(glyph.offset.0, glyph.offset.1);
            ink = ink.union(&rect);
        }
        return ink;
    }

    let min_x = lines.iter().map(|l| l.start).min().unwrap_or(0);
    let max_x = lines.iter().map(|l| l.start + l.extent).max().unwrap_or(0);
    let top = first.baseline - metrics.full_ascent() * s;
    let bottom = if mode.excludes_descent() {
        last.baseline
    } else {
        last.baseline + metrics.full_descent() * s
    };
    Rect::new(min_x, top, max_x, bottom)
}

/// Step 6b: how far the block moves down to honor the vertical alignment
fn vertical_shift(block: &Rect, lines: &[LayoutLine], metrics: &Metrics, s: i32, vert: VertAlign) -> i32 {
    let last_baseline = lines.last().map_or(0, |l| l.baseline);
    match vert {
        VertAlign::Top => -block.min_y,
        VertAlign::Bottom => -block.max_y,
        VertAlign::VertCenter => -(block.min_y + block.height() / 2),
        VertAlign::Baseline => 0,
        VertAlign::LastBaseline => -last_baseline,
        VertAlign::CapLine => metrics.uppercase_ascent * s,
        VertAlign::Midline => metrics.midline_ascent * s,
    }
}
