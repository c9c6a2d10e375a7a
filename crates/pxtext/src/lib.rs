//! pxtext - pixel-exact text for pixel fonts
//!
//! Text goes through four stages on its way to the screen:
//! 1. Rewrite: characters become glyph identities, with font rules
//!    substituting multi-character sequences
//! 2. Selection: settings and glyph pickers turn variant families into
//!    concrete glyphs, whose masks are cached per strand
//! 3. Layout: glyphs are placed along lines, wrapped, stacked, aligned and
//!    measured
//! 4. Compositing: masks are upscaled and blended into a [`Raster`]
//!
//! A [`Projector`] optionally blits the low resolution result onto a larger
//! physical target.
//!
//! # Features
//!
//! - **Exact**: integer scaling, nearest neighbor, no antialiasing surprises
//! - **Three directions**: horizontal, and rotated a quarter turn either way
//! - **Seven blend modes**: over, replace, cut, add, sub, multiply and hue
//! - **Stateful fonts**: settings and pickers change glyphs at runtime
//!
//! # Example
//!
//! ```rust
//! use pxtext::prelude::*;
//! use std::sync::Arc;
//!
//! let strand = Strand::new(Arc::new(pxtext::sample::font()))?;
//! let mut renderer = Renderer::new(strand);
//! renderer.set_scale(2)?;
//! renderer.set_align(VertAlign::Top | HorzAlign::Left);
//!
//! let (w, h) = renderer.measure("HELLO");
//! let mut target = Bitmap::new(w, h);
//! renderer.draw(&mut target, "HELLO", 0, 0);
//! # Ok::<(), pxtext::PxError>(())
//! ```

pub mod picker;
pub mod renderer;
pub mod strand;

pub use picker::CyclingPicker;
pub use renderer::Renderer;
pub use strand::Strand;

pub use pxtext_canvas::{Placement, Projector};
pub use pxtext_composite::{blend, Compositor, MaskDrawParams};
pub use pxtext_core::{
    cache_config, error, traits, types, Align, AlignPatch, Bitmap, BlendMode, BoundingMode,
    CacheStats, CharClass, Color, ConfigError, Direction, FontData, GlyphId, GlyphMask, GlyphPicker,
    GlyphSource, HorzAlign, MaskFormat, Metrics, PatternItem, PxError, Raster, Rect, Result, RewriteError,
    RewriteRule, Setting, SettingKey, SettingsVector, VariantCandidate, VariantFamily, VertAlign,
    MAX_SCALE, NOTDEF,
};
pub use pxtext_font::{sample, BitmapFont, FontBuilder};
pub use pxtext_layout::{LayoutLine, LayoutParams, PlacedGlyph, TextLayout};
pub use pxtext_rewrite::ActiveRules;

/// Common imports for typical usage
pub mod prelude {
    pub use crate::{CyclingPicker, Renderer, Strand};
    pub use pxtext_canvas::Projector;
    pub use pxtext_core::{
        error::{PxError, Result},
        traits::{FontData, GlyphPicker, Raster},
        types::{BlendMode, BoundingMode, Direction, GlyphId, Rect},
        Align, Bitmap, Color, HorzAlign, VertAlign,
    };
}
