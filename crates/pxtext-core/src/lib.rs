//! pxtext Core: the shared vocabulary of pixel text
//!
//! Pixel fonts are small, exact and unforgiving. Every glyph is a handful of
//! hand-placed pixels, and a one pixel error in layout or blending is visible.
//! This crate holds the types every other pxtext crate speaks:
//!
//! 1. **Font data** - [`FontData`] exposes a font's glyph catalog, metrics,
//!    settings and rewrite rules
//! 2. **Masks** - [`GlyphMask`] is the immutable bitmap of one concrete glyph
//! 3. **Settings** - [`SettingsVector`] snapshots the style options that pick
//!    glyph variants
//! 4. **Geometry** - [`types::Rect`], [`Align`], [`types::Direction`] and
//!    [`types::BoundingMode`] describe where text goes
//! 5. **Targets** - [`Raster`] is anything pixels can be written into, with
//!    [`Bitmap`] as the built-in RGBA buffer
//!
//! ```rust
//! use pxtext_core::{Align, HorzAlign, VertAlign};
//!
//! let align = VertAlign::Baseline | HorzAlign::Right;
//! assert_eq!(align.to_string(), "Baseline|Right");
//!
//! // Changing one axis keeps the other untouched
//! let align = align.apply(HorzAlign::Left);
//! assert_eq!(align.vert(), VertAlign::Baseline);
//! ```

pub mod align;
pub mod bitmap;
pub mod cache;
pub mod cache_config;
pub mod error;
pub mod mask;
pub mod rules;
pub mod settings;
pub mod traits;

pub use align::{Align, AlignPatch, HorzAlign, VertAlign};
pub use bitmap::Bitmap;
pub use cache::{CacheStats, MaskCache, MaskCacheKey};
pub use error::{ConfigError, PxError, Result, RewriteError};
pub use mask::{GlyphMask, MaskFormat};
pub use rules::{CharClass, PatternItem, RewriteRule, RuleAlternative};
pub use settings::{Setting, SettingKey, SettingsVector, VariantCandidate, VariantFamily};
pub use traits::{FontData, GlyphPicker, GlyphSource, Raster};
pub use types::{BlendMode, BoundingMode, Direction, GlyphId, Metrics, Rect};

use std::fmt;
use std::str::FromStr;

/// Name of the glyph drawn in place of unmapped characters
pub const NOTDEF: &str = "notdef";

/// Largest integer scale a renderer accepts
///
/// Keeps scaled coordinates of any realistic text well inside `i32`.
pub const MAX_SCALE: u32 = 1024;

/// The data structures that flow between pxtext stages
pub mod types {
    use crate::error::{ConfigError, PxError};
    use std::fmt;
    use std::str::FromStr;

    /// Identity of a glyph within a font
    ///
    /// Values below [`GlyphId::FIRST_FAMILY`] name concrete glyphs in the
    /// font's catalog. The range above it names variant families, which only
    /// become drawable after settings (or a picker) select a concrete member.
    /// The two topmost values are control markers produced by the rewrite
    /// engine.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
    pub struct GlyphId(pub u16);

    impl GlyphId {
        /// First identity reserved for variant families
        pub const FIRST_FAMILY: u16 = 0xE000;
        /// Hard line break
        pub const LINE_BREAK: GlyphId = GlyphId(0xFFFE);
        /// Character without a mapping in the font
        pub const MISSING: GlyphId = GlyphId(0xFFFF);

        /// Identity of the `index`-th variant family
        pub const fn family(index: u16) -> Self {
            Self(Self::FIRST_FAMILY + index)
        }

        pub const fn is_family(self) -> bool {
            self.0 >= Self::FIRST_FAMILY && self.0 < Self::LINE_BREAK.0
        }

        pub const fn is_control(self) -> bool {
            self.0 >= Self::LINE_BREAK.0
        }

        /// Position in the family table, for family identities
        pub const fn family_index(self) -> Option<usize> {
            if self.is_family() {
                Some((self.0 - Self::FIRST_FAMILY) as usize)
            } else {
                None
            }
        }
    }

    impl fmt::Display for GlyphId {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            match *self {
                Self::LINE_BREAK => f.write_str("#break"),
                Self::MISSING => f.write_str("#missing"),
                id if id.is_family() => write!(f, "#family{}", id.0 - Self::FIRST_FAMILY),
                id => write!(f, "#{}", id.0),
            }
        }
    }

    /// Integer rectangle, min inclusive and max exclusive
    ///
    /// Glyph masks use it relative to the glyph origin (negative `min_y`
    /// above the baseline), layouts use it relative to the draw origin.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Rect {
        pub min_x: i32,
        pub min_y: i32,
        pub max_x: i32,
        pub max_y: i32,
    }

    impl Rect {
        pub const fn new(min_x: i32, min_y: i32, max_x: i32, max_y: i32) -> Self {
            Self {
                min_x,
                min_y,
                max_x,
                max_y,
            }
        }

        pub fn width(&self) -> i32 {
            (self.max_x - self.min_x).max(0)
        }

        pub fn height(&self) -> i32 {
            (self.max_y - self.min_y).max(0)
        }

        pub fn is_empty(&self) -> bool {
            self.max_x <= self.min_x || self.max_y <= self.min_y
        }

        pub fn contains(&self, x: i32, y: i32) -> bool {
            x >= self.min_x && x < self.max_x && y >= self.min_y && y < self.max_y
        }

        /// Smallest rectangle holding both; empty inputs are ignored
        pub fn union(&self, other: &Rect) -> Rect {
            if self.is_empty() {
                return *other;
            }
            if other.is_empty() {
                return *self;
            }
            Rect::new(
                self.min_x.min(other.min_x),
                self.min_y.min(other.min_y),
                self.max_x.max(other.max_x),
                self.max_y.max(other.max_y),
            )
        }

        pub fn intersect(&self, other: &Rect) -> Rect {
            Rect::new(
                self.min_x.max(other.min_x),
                self.min_y.max(other.min_y),
                self.max_x.min(other.max_x),
                self.max_y.min(other.max_y),
            )
        }

        pub fn translate(&self, dx: i32, dy: i32) -> Rect {
            Rect::new(
                self.min_x + dx,
                self.min_y + dy,
                self.max_x + dx,
                self.max_y + dy,
            )
        }

        pub fn scale(&self, factor: i32) -> Rect {
            Rect::new(
                self.min_x * factor,
                self.min_y * factor,
                self.max_x * factor,
                self.max_y * factor,
            )
        }
    }

    /// Which way text runs on screen
    ///
    /// Layout always happens in horizontal "text space"; the direction then
    /// rotates that space around the draw origin. `Sideways` turns text a
    /// quarter counterclockwise (reading bottom to top, following lines to
    /// the right), `SidewaysRight` a quarter clockwise (reading top to bottom,
    /// following lines to the left).
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub enum Direction {
        #[default]
        Horizontal,
        Sideways,
        SidewaysRight,
    }

    impl Direction {
        /// Whether text space axes are swapped on screen
        pub fn is_vertical(self) -> bool {
            !matches!(self, Direction::Horizontal)
        }

        /// Text space point to screen offset from the origin
        pub fn map_point(self, u: i32, v: i32) -> (i32, i32) {
            match self {
                Direction::Horizontal => (u, v),
                Direction::Sideways => (v, -u),
                Direction::SidewaysRight => (-v, u),
            }
        }

        /// Text space rectangle to the screen rectangle covering the same cells
        pub fn map_rect(self, rect: &Rect) -> Rect {
            match self {
                Direction::Horizontal => *rect,
                Direction::Sideways => Rect::new(rect.min_y, -rect.max_x, rect.max_y, -rect.min_x),
                Direction::SidewaysRight => {
                    Rect::new(-rect.max_y, rect.min_x, -rect.min_y, rect.max_x)
                }
            }
        }
    }

    impl fmt::Display for Direction {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str(match self {
                Direction::Horizontal => "Horizontal",
                Direction::Sideways => "Sideways",
                Direction::SidewaysRight => "SidewaysRight",
            })
        }
    }

    impl FromStr for Direction {
        type Err = PxError;

        fn from_str(s: &str) -> Result<Self, Self::Err> {
            match s {
                "Horizontal" => Ok(Direction::Horizontal),
                "Sideways" => Ok(Direction::Sideways),
                "SidewaysRight" => Ok(Direction::SidewaysRight),
                other => Err(ConfigError::unknown("direction", other).into()),
            }
        }
    }

    /// How the vertical extent of a text block is decided
    ///
    /// Logical modes only look at font metrics, so line pitch never depends
    /// on content. Mask modes measure the pixels actually placed.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub enum BoundingMode {
        #[default]
        LogicalBounding,
        NoDescLogicalBounding,
        MaskBounding,
        NoDescMaskBounding,
    }

    impl BoundingMode {
        pub fn is_mask(self) -> bool {
            matches!(
                self,
                BoundingMode::MaskBounding | BoundingMode::NoDescMaskBounding
            )
        }

        pub fn excludes_descent(self) -> bool {
            matches!(
                self,
                BoundingMode::NoDescLogicalBounding | BoundingMode::NoDescMaskBounding
            )
        }
    }

    impl fmt::Display for BoundingMode {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str(match self {
                BoundingMode::LogicalBounding => "LogicalBounding",
                BoundingMode::NoDescLogicalBounding => "NoDescLogicalBounding",
                BoundingMode::MaskBounding => "MaskBounding",
                BoundingMode::NoDescMaskBounding => "NoDescMaskBounding",
            })
        }
    }

    impl FromStr for BoundingMode {
        type Err = PxError;

        fn from_str(s: &str) -> Result<Self, Self::Err> {
            match s {
                "LogicalBounding" => Ok(BoundingMode::LogicalBounding),
                "NoDescLogicalBounding" => Ok(BoundingMode::NoDescLogicalBounding),
                "MaskBounding" => Ok(BoundingMode::MaskBounding),
                "NoDescMaskBounding" => Ok(BoundingMode::NoDescMaskBounding),
                other => Err(ConfigError::unknown("bounding mode", other).into()),
            }
        }
    }

    /// How a glyph mask is combined with the pixels under it
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub enum BlendMode {
        /// Standard alpha compositing
        #[default]
        Over,
        /// Overwrite color and alpha wherever the mask has coverage
        Replace,
        /// Erase destination alpha
        Cut,
        /// Saturating RGB addition
        Add,
        /// Saturating RGB subtraction
        Sub,
        /// RGB multiplication
        Multiply,
        /// Source hue with destination saturation and luminance
        Hue,
    }

    impl fmt::Display for BlendMode {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str(match self {
                BlendMode::Over => "Over",
                BlendMode::Replace => "Replace",
                BlendMode::Cut => "Cut",
                BlendMode::Add => "Add",
                BlendMode::Sub => "Sub",
                BlendMode::Multiply => "Multiply",
                BlendMode::Hue => "Hue",
            })
        }
    }

    impl FromStr for BlendMode {
        type Err = PxError;

        fn from_str(s: &str) -> Result<Self, Self::Err> {
            match s {
                "Over" => Ok(BlendMode::Over),
                "Replace" => Ok(BlendMode::Replace),
                "Cut" => Ok(BlendMode::Cut),
                "Add" => Ok(BlendMode::Add),
                "Sub" => Ok(BlendMode::Sub),
                "Multiply" => Ok(BlendMode::Multiply),
                "Hue" => Ok(BlendMode::Hue),
                other => Err(ConfigError::unknown("blend mode", other).into()),
            }
        }
    }

    /// Vertical font metrics, in unscaled font pixels
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Metrics {
        pub ascent: i32,
        /// Room reserved above the ascent for accents and similar marks
        pub extra_ascent: i32,
        /// Height of uppercase letters above the baseline (cap line)
        pub uppercase_ascent: i32,
        /// Height of lowercase letters above the baseline (midline)
        pub midline_ascent: i32,
        pub descent: i32,
        pub extra_descent: i32,
        /// Spacing between the descent of a line and the ascent of the next
        pub line_gap: i32,
        /// Spacing inserted between consecutive glyphs of a line
        pub horz_interspacing: i32,
    }

    impl Metrics {
        /// Distance between two consecutive baselines
        pub fn line_height(&self) -> i32 {
            self.ascent + self.extra_ascent + self.descent + self.extra_descent + self.line_gap
        }

        /// Space above the baseline that logical bounding reserves
        pub fn full_ascent(&self) -> i32 {
            self.ascent + self.extra_ascent
        }

        /// Space below the baseline that logical bounding reserves
        pub fn full_descent(&self) -> i32 {
            self.descent + self.extra_descent + self.line_gap
        }
    }
}

/// Straight (non-premultiplied) RGBA color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0);

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 255)
    }

    pub const fn black() -> Self {
        Self::rgb(0, 0, 0)
    }

    pub const fn white() -> Self {
        Self::rgb(255, 255, 255)
    }

    pub const fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    pub const fn from_array(rgba: [u8; 4]) -> Self {
        Self::rgba(rgba[0], rgba[1], rgba[2], rgba[3])
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
    }
}

impl FromStr for Color {
    type Err = PxError;

    /// Parses `#rrggbb` or `#rrggbbaa`
    fn from_str(s: &str) -> Result<Self> {
        let hex = s.strip_prefix('#').unwrap_or(s);
        let channel = |i: usize| {
            hex.get(i..i + 2)
                .and_then(|pair| u8::from_str_radix(pair, 16).ok())
                .ok_or_else(|| PxError::from(ConfigError::unknown("color", s)))
        };
        match hex.len() {
            6 => Ok(Color::rgb(channel(0)?, channel(2)?, channel(4)?)),
            8 => Ok(Color::rgba(channel(0)?, channel(2)?, channel(4)?, channel(6)?)),
            _ => Err(ConfigError::unknown("color", s).into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_union_ignores_empty() {
        let a = Rect::new(0, 0, 2, 2);
        let empty = Rect::new(5, 5, 5, 9);
        assert_eq!(a.union(&empty), a);
        assert_eq!(empty.union(&a), a);
        assert_eq!(a.union(&Rect::new(-1, 1, 1, 4)), Rect::new(-1, 0, 2, 4));
    }

    #[test]
    fn sideways_rect_swaps_extent() {
        let r = Rect::new(0, -5, 12, 2);
        for dir in [Direction::Sideways, Direction::SidewaysRight] {
            let mapped = dir.map_rect(&r);
            assert_eq!(mapped.width(), r.height());
            assert_eq!(mapped.height(), r.width());
        }
    }

    #[test]
    fn map_rect_matches_map_point_corners() {
        let r = Rect::new(3, -4, 7, 1);
        for dir in [Direction::Sideways, Direction::SidewaysRight] {
            let (ax, ay) = dir.map_point(r.min_x, r.min_y);
            let (bx, by) = dir.map_point(r.max_x, r.max_y);
            let expected = Rect::new(ax.min(bx), ay.min(by), ax.max(bx), ay.max(by));
            assert_eq!(dir.map_rect(&r), expected);
        }
    }

    #[test]
    fn glyph_id_ranges() {
        assert!(GlyphId::family(3).is_family());
        assert_eq!(GlyphId::family(3).family_index(), Some(3));
        assert!(!GlyphId(12).is_family());
        assert!(GlyphId::MISSING.is_control());
        assert!(!GlyphId::MISSING.is_family());
    }

    #[test]
    fn enum_names_round_trip_through_strings() {
        assert_eq!("Sideways".parse::<Direction>().ok(), Some(Direction::Sideways));
        assert_eq!(
            "NoDescMaskBounding".parse::<BoundingMode>().ok(),
            Some(BoundingMode::NoDescMaskBounding)
        );
        assert_eq!("Hue".parse::<BlendMode>().ok(), Some(BlendMode::Hue));
    }

    #[test]
    fn unknown_enum_values_are_rejected() {
        assert!("Diagonal".parse::<Direction>().is_err());
        assert!("TightBounding".parse::<BoundingMode>().is_err());
        assert!("Screen".parse::<BlendMode>().is_err());
    }

    #[test]
    fn metrics_line_height_sums_vertical_parts() {
        let m = Metrics {
            ascent: 10,
            descent: 2,
            ..Default::default()
        };
        assert_eq!(m.line_height(), 12);
        assert_eq!(m.full_ascent() + m.full_descent(), m.line_height());
    }

    #[test]
    fn color_parses_hex() {
        assert_eq!("#ff8000".parse::<Color>().ok(), Some(Color::rgb(255, 128, 0)));
        assert_eq!("10203040".parse::<Color>().ok(), Some(Color::rgba(16, 32, 48, 64)));
        assert!("#12".parse::<Color>().is_err());
    }
}
