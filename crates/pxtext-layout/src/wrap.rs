//! Splitting glyph runs into visual lines
//!
//! Hard breaks always split. With a wrap width, each hard line is then
//! broken greedily at whitespace: words are added while the line still fits,
//! the whitespace at a soft break disappears, and a word that cannot fit
//! even on its own line is placed alone and allowed to overflow.

use pxtext_core::{GlyphId, GlyphMask, GlyphSource};
use std::sync::Arc;

/// A glyph with its mask already loaded
#[derive(Debug, Clone)]
pub(crate) struct Item {
    pub mask: Arc<GlyphMask>,
    pub space: bool,
}

impl Item {
    pub fn advance(&self) -> i32 {
        self.mask.advance
    }

    pub fn glyph(&self) -> GlyphId {
        self.mask.glyph
    }
}

/// A line before placement
#[derive(Debug, Clone, Default)]
pub(crate) struct VisualLine {
    pub items: Vec<Item>,
    /// Came from a hard line with nothing on it
    pub blank: bool,
}

/// Pen spacing rules: interspacing plus pair kerning between glyphs
pub(crate) struct Spacing<'a> {
    pub source: &'a dyn GlyphSource,
    pub interspacing: i32,
}

impl Spacing<'_> {
    pub fn gap(&self, left: &Item, right: &Item) -> i32 {
        self.interspacing + self.source.kerning(left.glyph(), right.glyph())
    }

    /// Extent of `line` followed by `tail`, given the extent of `line`
    ///
    /// Only the last item of `line` is looked at.
    pub fn extend(&self, extent: i32, line: &[Item], tail: &[Item]) -> i32 {
        let mut pen = extent;
        let mut prev = line.last();
        for item in tail {
            if let Some(prev) = prev {
                pen += self.gap(prev, item);
            }
            pen += item.advance();
            prev = Some(item);
        }
        pen
    }

    pub fn extent(&self, items: &[Item]) -> i32 {
        self.extend(0, &[], items)
    }
}

/// Load masks and split at hard breaks
///
/// Glyphs without a mask take no room and are dropped here.
pub(crate) fn hard_lines(glyphs: &[GlyphId], source: &dyn GlyphSource) -> Vec<Vec<Item>> {
    if glyphs.is_empty() {
        return Vec::new();
    }
    let mut lines = vec![Vec::new()];
    for &glyph in glyphs {
        if glyph == GlyphId::LINE_BREAK {
            lines.push(Vec::new());
            continue;
        }
        let Some(mask) = source.load_mask(glyph) else {
            log::trace!("glyph {glyph} has no mask, skipping");
            continue;
        };
        let space = source.is_whitespace(glyph) || source.is_whitespace(mask.glyph);
        if let Some(line) = lines.last_mut() {
            line.push(Item { mask, space });
        }
    }
    lines
}

/// Hard lines as they are, one visual line each
pub(crate) fn unwrapped(lines: Vec<Vec<Item>>) -> Vec<VisualLine> {
    lines
        .into_iter()
        .map(|items| VisualLine {
            blank: items.is_empty(),
            items,
        })
        .collect()
}

/// Greedy word wrap of every hard line at `limit` font pixels
pub(crate) fn wrapped(lines: Vec<Vec<Item>>, spacing: &Spacing<'_>, limit: i32) -> Vec<VisualLine> {
    let mut out = Vec::with_capacity(lines.len());
    for items in lines {
        if items.is_empty() {
            out.push(VisualLine {
                items,
                blank: true,
            });
            continue;
        }
        wrap_line(items, spacing, limit, &mut out);
    }
    out
}

fn wrap_line(items: Vec<Item>, spacing: &Spacing<'_>, limit: i32, out: &mut Vec<VisualLine>) {
    let mut line: Vec<Item> = Vec::new();
    let mut extent = 0;
    let mut has_word = false;
    let mut first_visual = true;
    let mut pending: Vec<Item> = Vec::new();

    for (is_space, run) in runs(items) {
        if is_space {
            if has_word {
                pending.extend(run);
            } else if first_visual {
                // Indentation of the first line is kept
                extent = spacing.extend(extent, &line, &run);
                line.extend(run);
            }
            continue;
        }

        let with_space = spacing.extend(extent, &line, &pending);
        let before = if pending.is_empty() { &line } else { &pending };
        let trial = spacing.extend(with_space, before, &run);

        if !has_word || trial <= limit {
            extent = trial;
            line.append(&mut pending);
            line.extend(run);
        } else {
            out.push(VisualLine {
                items: std::mem::take(&mut line),
                blank: false,
            });
            first_visual = false;
            extent = spacing.extent(&run);
            line = run;
        }
        pending.clear();
        has_word = true;

        if extent > limit {
            log::warn!("word of {extent} px overflows wrap width of {limit} px");
        }
    }

    // Trailing whitespace in `pending` is dropped
    out.push(VisualLine {
        items: line,
        blank: false,
    });
}

/// Maximal runs of whitespace and non-whitespace items
fn runs(items: Vec<Item>) -> Vec<(bool, Vec<Item>)> {
    let mut runs: Vec<(bool, Vec<Item>)> = Vec::new();
    for item in items {
        match runs.last_mut() {
            Some((space, run)) if *space == item.space => run.push(item),
            _ => runs.push((item.space, vec![item])),
        }
    }
    runs
}
