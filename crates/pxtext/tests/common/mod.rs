//! Fonts and helpers shared by the integration tests

#![allow(dead_code)]

use pxtext::{
    BitmapFont, Bitmap, FontBuilder, GlyphId, Metrics, Raster, Rect, Renderer, RewriteRule, Strand,
    VariantCandidate,
};
use std::sync::Arc;

/// Line height 12 (ascent 10, descent 2); `A`-`D` are 4x8 blocks with an
/// advance of 5
pub fn block_font() -> BitmapFont {
    let mut b = FontBuilder::new("blocks");
    b.metrics(Metrics {
        ascent: 10,
        uppercase_ascent: 8,
        midline_ascent: 6,
        descent: 2,
        ..Default::default()
    });
    for ch in ['A', 'B', 'C', 'D'] {
        let id = b.add_glyph_rows(&ch.to_string(), 5, -8, &["####"; 8]);
        b.map(ch, id);
    }
    let space = b.add_blank("space", 3);
    b.map(' ', space);
    b.build()
}

/// `x` is a family of a narrow and a wide bar without any setting
/// conditions, so only a picker can tell them apart
pub fn bar_font() -> BitmapFont {
    let mut b = FontBuilder::new("bars");
    b.metrics(Metrics {
        ascent: 4,
        descent: 1,
        ..Default::default()
    });
    let narrow = b.add_glyph_rows("x.narrow", 2, -4, &["#"; 4]);
    let wide = b.add_glyph_rows("x.wide", 4, -4, &["###"; 4]);
    let family = b.add_family(
        "x",
        vec![VariantCandidate::new(narrow), VariantCandidate::new(wide)],
    );
    b.map('x', family);
    b.build()
}

/// The sample font plus two rules that disagree about `<3`
pub fn ambiguous_font() -> BitmapFont {
    let mut b = pxtext::sample::builder();
    let less = b.glyph("<").unwrap_or(GlyphId::MISSING);
    let three = b.glyph("3").unwrap_or(GlyphId::MISSING);
    let excl = b.glyph("!").unwrap_or(GlyphId::MISSING);
    // Rule 1 conflicts with the built-in rule 0
    b.add_rule(RewriteRule::literal("<3", vec![less, three, excl]));
    // Rule 2 is independent
    b.add_rule(RewriteRule::literal("!!", vec![excl]));
    b.build()
}

pub fn sample_strand() -> Arc<Strand> {
    Strand::new(Arc::new(pxtext::sample::font())).unwrap()
}

pub fn renderer(font: BitmapFont) -> Renderer {
    Renderer::new(Strand::new(Arc::new(font)).unwrap())
}

/// Tight box around every pixel with nonzero alpha
pub fn ink(target: &Bitmap) -> Rect {
    let mut ink = Rect::default();
    for y in 0..target.height() as i32 {
        for x in 0..target.width() as i32 {
            if target.pixel(x, y).is_some_and(|c| c.a != 0) {
                ink = ink.union(&Rect::new(x, y, x + 1, y + 1));
            }
        }
    }
    ink
}
