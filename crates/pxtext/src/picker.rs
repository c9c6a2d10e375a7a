//! Built-in glyph pickers

use pxtext_core::{GlyphId, GlyphPicker, VariantFamily};
use std::collections::HashMap;

/// Walks through a family's candidates, one step per mask request
///
/// Each family keeps its own position. Handy for "handwritten" fonts that
/// ship several drawings of the same letter.
#[derive(Debug, Clone, Default)]
pub struct CyclingPicker {
    /// Families taken over; empty means all of them
    families: Vec<GlyphId>,
    positions: HashMap<GlyphId, usize>,
}

impl CyclingPicker {
    /// Picker for every variant family
    pub fn new() -> Self {
        Self::default()
    }

    /// Picker restricted to the given families
    pub fn for_families(families: impl IntoIterator<Item = GlyphId>) -> Self {
        Self {
            families: families.into_iter().collect(),
            positions: HashMap::new(),
        }
    }
}

impl GlyphPicker for CyclingPicker {
    fn name(&self) -> &'static str {
        "cycling"
    }

    fn handles(&self, family: GlyphId, _variants: &VariantFamily) -> bool {
        self.families.is_empty() || self.families.contains(&family)
    }

    fn pick(&mut self, family: GlyphId, candidates: &[GlyphId]) -> GlyphId {
        let position = self.positions.entry(family).or_insert(0);
        let glyph = candidates
            .get(*position % candidates.len().max(1))
            .copied()
            .unwrap_or(GlyphId::MISSING);
        *position = position.wrapping_add(1);
        glyph
    }
}
