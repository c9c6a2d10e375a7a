//! Rewrite Engine - text in, glyph identities out
//!
//! Resolution walks the text once, left to right. At each position the
//! longest active rule that matches wins and its whole pattern is consumed;
//! otherwise the character maps through the font's character table. Line
//! breaks (`\n`, `\r\n` or a lone `\r`) always become
//! [`GlyphId::LINE_BREAK`] and no rule can consume them.
//!
//! Rules are checked for ambiguity when activated rather than when text is
//! resolved: two rules of the same length that can match the same input
//! with different results are refused.

use pxtext_core::{FontData, GlyphId, Result, RewriteError, RewriteRule, SettingsVector};
use std::collections::HashSet;

/// The rules a strand resolves text with
///
/// Kept longest-first so the first match found is the longest one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActiveRules {
    /// `(catalog index, rule)`, longest pattern first, catalog order within
    /// a length
    rules: Vec<(usize, RewriteRule)>,
}

impl ActiveRules {
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Whether the catalog rule at `index` is part of the active set
    pub fn contains(&self, index: usize) -> bool {
        self.rules.iter().any(|(i, _)| *i == index)
    }

    /// Catalog indices of the active rules, ascending
    pub fn indices(&self) -> Vec<usize> {
        let mut indices: Vec<usize> = self.rules.iter().map(|(i, _)| *i).collect();
        indices.sort_unstable();
        indices
    }

    pub fn iter(&self) -> impl Iterator<Item = &RewriteRule> {
        self.rules.iter().map(|(_, rule)| rule)
    }

    /// Longest active rule matching `input` at `pos`
    pub fn longest_match(&self, input: &[char], pos: usize) -> Option<&RewriteRule> {
        let remaining = input.len().saturating_sub(pos);
        self.rules
            .iter()
            .map(|(_, rule)| rule)
            .filter(|rule| rule.len() <= remaining)
            .find(|rule| rule.matches_at(input, pos))
    }
}

/// Activates rule sets and resolves text against them
#[derive(Debug, Clone, Copy, Default)]
pub struct RewriteEngine;

impl RewriteEngine {
    pub fn new() -> Self {
        Self
    }

    pub fn name(&self) -> &'static str {
        "rewrite"
    }

    /// Build the active set from every catalog rule not in `disabled`
    ///
    /// Identical duplicates collapse into one. Any pair that would make
    /// resolution depend on catalog order fails the whole activation; the
    /// caller keeps whatever set it had before.
    pub fn activate(&self, font: &dyn FontData, disabled: &HashSet<usize>) -> Result<ActiveRules> {
        let catalog = font.rewrite_rules();
        let mut chosen: Vec<(usize, &RewriteRule)> = Vec::with_capacity(catalog.len());

        for (index, rule) in catalog.iter().enumerate() {
            if disabled.contains(&index) {
                continue;
            }
            if rule.is_empty() {
                log::warn!("skipping rewrite rule #{index} with an empty pattern");
                continue;
            }
            let mut duplicate = false;
            for &(other_index, other) in &chosen {
                if other == rule {
                    duplicate = true;
                    break;
                }
                if other.overlaps(rule) && !other.same_outcome(rule) {
                    return Err(RewriteError::AmbiguousRules {
                        rule: other.to_string(),
                        other: rule.to_string(),
                        rule_index: other_index,
                        other_index: index,
                    }
                    .into());
                }
            }
            if duplicate {
                log::trace!("rewrite rule #{index} duplicates an earlier rule");
            } else {
                chosen.push((index, rule));
            }
        }

        let mut rules: Vec<(usize, RewriteRule)> = chosen
            .into_iter()
            .map(|(index, rule)| (index, rule.clone()))
            .collect();
        // Stable sort keeps catalog order among equal lengths
        rules.sort_by(|a, b| b.1.len().cmp(&a.1.len()));

        log::debug!(
            "{}: activated {} of {} rules for font `{}`",
            self.name(),
            rules.len(),
            catalog.len(),
            font.name()
        );
        Ok(ActiveRules { rules })
    }

    /// Turn `text` into glyph identities
    ///
    /// Families are left unresolved; unmapped characters become
    /// [`GlyphId::MISSING`].
    pub fn resolve(
        &self,
        text: &str,
        font: &dyn FontData,
        active: &ActiveRules,
        settings: &SettingsVector,
    ) -> Vec<GlyphId> {
        let chars: Vec<char> = text.chars().collect();
        log::debug!("{}: resolving {} chars", self.name(), chars.len());

        let mut glyphs = Vec::with_capacity(chars.len());
        let mut pos = 0;
        while pos < chars.len() {
            match chars[pos] {
                '\n' => {
                    glyphs.push(GlyphId::LINE_BREAK);
                    pos += 1;
                }
                '\r' => {
                    glyphs.push(GlyphId::LINE_BREAK);
                    pos += if chars.get(pos + 1) == Some(&'\n') { 2 } else { 1 };
                }
                ch => {
                    if let Some(rule) = active.longest_match(&chars, pos) {
                        log::trace!("rule {rule} matched at {pos}");
                        glyphs.extend_from_slice(rule.replacement_for(settings));
                        pos += rule.len();
                    } else {
                        glyphs.push(font.glyph_id(ch).unwrap_or(GlyphId::MISSING));
                        pos += 1;
                    }
                }
            }
        }
        glyphs
    }
}
