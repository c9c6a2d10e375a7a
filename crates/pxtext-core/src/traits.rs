//! The contracts that connect fonts, strands and targets
//!
//! - [`FontData`] - Read-only access to a pixel font
//! - [`GlyphSource`] - What layout needs: metrics, masks, spacing
//! - [`GlyphPicker`] - A strategy that chooses among variant candidates
//! - [`Raster`] - Anything pixels can be written into

use crate::mask::GlyphMask;
use crate::rules::RewriteRule;
use crate::settings::{Setting, VariantFamily};
use crate::types::{GlyphId, Metrics, Rect};
use crate::Color;
use std::sync::Arc;

/// A loaded pixel font
///
/// Fonts are immutable once built and shared between strands, so every
/// method takes `&self`.
///
/// ```ignore
/// struct TinyFont {
///     masks: Vec<GlyphMask>,
/// }
///
/// impl FontData for TinyFont {
///     fn name(&self) -> &str {
///         "tiny"
///     }
///
///     fn glyph_id(&self, ch: char) -> Option<GlyphId> {
///         ch.is_ascii_uppercase().then(|| GlyphId(ch as u16 - 'A' as u16))
///     }
///
///     // ...
/// }
/// ```
pub trait FontData: Send + Sync {
    fn name(&self) -> &str;

    fn metrics(&self) -> Metrics;

    /// Number of concrete glyphs in the catalog
    fn glyph_count(&self) -> usize;

    /// Glyph mapped to a character, which may be a variant family
    fn glyph_id(&self, ch: char) -> Option<GlyphId>;

    fn glyph_by_name(&self, name: &str) -> Option<GlyphId>;

    /// Mask of a concrete glyph; families and control markers have none
    fn glyph_mask(&self, glyph: GlyphId) -> Option<&GlyphMask>;

    /// Extra spacing between a pair of concrete glyphs
    fn kerning(&self, _left: GlyphId, _right: GlyphId) -> i32 {
        0
    }

    /// Whether the glyph separates words for wrapping purposes
    fn is_whitespace(&self, glyph: GlyphId) -> bool;

    fn settings(&self) -> &[Setting];

    fn variant_family(&self, family: GlyphId) -> Option<&VariantFamily>;

    /// The font's whole rule catalog, active or not
    fn rewrite_rules(&self) -> &[RewriteRule];
}

/// Per-glyph answers the layout engine needs
///
/// Implemented by the strand, which resolves variant families and caches
/// masks, and directly usable with any font for tests.
pub trait GlyphSource {
    fn metrics(&self) -> Metrics;

    /// Mask of any glyph identity, families included; `None` draws nothing
    fn load_mask(&self, glyph: GlyphId) -> Option<Arc<GlyphMask>>;

    fn kerning(&self, _left: GlyphId, _right: GlyphId) -> i32 {
        0
    }

    fn is_whitespace(&self, glyph: GlyphId) -> bool;
}

/// Chooses a concrete glyph for a variant family on every mask request
///
/// Pickers may be stateful and are free to return a different glyph each
/// call (cycling or random styles). Masks are cached under the concrete
/// glyph a picker returns, never under the family.
///
/// `pick` may call back into the strand that owns the picker. A request that
/// reaches the same picker again from inside its own `pick` skips it.
pub trait GlyphPicker: Send {
    fn name(&self) -> &'static str;

    /// Whether this picker takes over the given family
    fn handles(&self, family: GlyphId, variants: &VariantFamily) -> bool;

    /// Pick one of `candidates`, which is never empty
    fn pick(&mut self, family: GlyphId, candidates: &[GlyphId]) -> GlyphId;
}

/// A pixel target
///
/// Coordinates outside `0..width` and `0..height` are ignored on writes and
/// read as `None`.
pub trait Raster {
    fn width(&self) -> u32;

    fn height(&self) -> u32;

    fn pixel(&self, x: i32, y: i32) -> Option<Color>;

    fn set_pixel(&mut self, x: i32, y: i32, color: Color);

    fn bounds(&self) -> Rect {
        Rect::new(0, 0, self.width() as i32, self.height() as i32)
    }
}
