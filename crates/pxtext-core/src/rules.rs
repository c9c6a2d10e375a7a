//! Rewrite rules: text patterns that turn into glyph sequences
//!
//! Fonts use rules for ligatures, emoticons and contextual shapes. A rule
//! matches a fixed-length run of characters, where each position is either a
//! literal character or a character class, and replaces it with glyphs.

use crate::settings::{SettingKey, SettingsVector};
use crate::types::GlyphId;
use std::fmt;

/// A named set of characters that a pattern position accepts
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CharClass {
    pub name: String,
    chars: Vec<char>,
}

impl CharClass {
    pub fn new(name: impl Into<String>, chars: impl IntoIterator<Item = char>) -> Self {
        let mut chars: Vec<char> = chars.into_iter().collect();
        chars.sort_unstable();
        chars.dedup();
        Self {
            name: name.into(),
            chars,
        }
    }

    pub fn contains(&self, ch: char) -> bool {
        self.chars.binary_search(&ch).is_ok()
    }

    pub fn chars(&self) -> &[char] {
        &self.chars
    }
}

/// One position of a rule pattern
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PatternItem {
    Char(char),
    Class(CharClass),
}

impl PatternItem {
    /// Line breaks never match, so rules cannot swallow them
    pub fn matches(&self, ch: char) -> bool {
        if ch == '\n' || ch == '\r' {
            return false;
        }
        match self {
            PatternItem::Char(c) => *c == ch,
            PatternItem::Class(class) => class.contains(ch),
        }
    }

    /// Whether some character satisfies both items
    pub fn overlaps(&self, other: &PatternItem) -> bool {
        match (self, other) {
            (PatternItem::Char(a), PatternItem::Char(b)) => a == b,
            (PatternItem::Char(c), PatternItem::Class(class))
            | (PatternItem::Class(class), PatternItem::Char(c)) => class.contains(*c),
            (PatternItem::Class(a), PatternItem::Class(b)) => {
                a.chars.iter().any(|&c| b.contains(c))
            }
        }
    }
}

impl fmt::Display for PatternItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatternItem::Char(c) => write!(f, "{c:?}"),
            PatternItem::Class(class) => write!(f, "({})", class.name),
        }
    }
}

/// Replacement used instead of the default when a setting holds an option
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RuleAlternative {
    pub key: SettingKey,
    pub option: u8,
    pub replacement: Vec<GlyphId>,
}

/// A pattern and what it becomes
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RewriteRule {
    pub pattern: Vec<PatternItem>,
    pub replacement: Vec<GlyphId>,
    pub alternatives: Vec<RuleAlternative>,
}

impl RewriteRule {
    pub fn new(pattern: Vec<PatternItem>, replacement: Vec<GlyphId>) -> Self {
        Self {
            pattern,
            replacement,
            alternatives: Vec::new(),
        }
    }

    /// Rule whose pattern is the literal characters of `text`
    pub fn literal(text: &str, replacement: Vec<GlyphId>) -> Self {
        Self::new(text.chars().map(PatternItem::Char).collect(), replacement)
    }

    pub fn with_alternative(mut self, key: SettingKey, option: u8, replacement: Vec<GlyphId>) -> Self {
        self.alternatives.push(RuleAlternative {
            key,
            option,
            replacement,
        });
        self
    }

    pub fn len(&self) -> usize {
        self.pattern.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pattern.is_empty()
    }

    /// First alternative whose condition holds, else the default replacement
    pub fn replacement_for(&self, settings: &SettingsVector) -> &[GlyphId] {
        self.alternatives
            .iter()
            .find(|alt| settings.get(alt.key) == Some(alt.option))
            .map_or(self.replacement.as_slice(), |alt| alt.replacement.as_slice())
    }

    /// Whether the pattern matches `input` starting at `pos`
    pub fn matches_at(&self, input: &[char], pos: usize) -> bool {
        if self.pattern.is_empty() {
            return false;
        }
        match input.get(pos..pos + self.pattern.len()) {
            Some(window) => self
                .pattern
                .iter()
                .zip(window)
                .all(|(item, &ch)| item.matches(ch)),
            None => false,
        }
    }

    /// Whether both rules could match the same input at the same start
    pub fn overlaps(&self, other: &RewriteRule) -> bool {
        self.pattern.len() == other.pattern.len()
            && self
                .pattern
                .iter()
                .zip(&other.pattern)
                .all(|(a, b)| a.overlaps(b))
    }

    /// Whether both rules always produce the same glyphs
    pub fn same_outcome(&self, other: &RewriteRule) -> bool {
        self.replacement == other.replacement && self.alternatives == other.alternatives
    }
}

impl fmt::Display for RewriteRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, item) in self.pattern.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{item}")?;
        }
        f.write_str(" => [")?;
        for (i, glyph) in self.replacement.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", glyph.0)?;
        }
        f.write_str("]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Setting;

    fn digits() -> CharClass {
        CharClass::new("digit", '0'..='9')
    }

    #[test]
    fn literal_matches_in_place() {
        let rule = RewriteRule::literal("<3", vec![GlyphId(12)]);
        let input: Vec<char> = "a<3b".chars().collect();
        assert!(!rule.matches_at(&input, 0));
        assert!(rule.matches_at(&input, 1));
        assert!(!rule.matches_at(&input, 3));
    }

    #[test]
    fn line_breaks_never_match() {
        let rule = RewriteRule::new(
            vec![PatternItem::Class(CharClass::new("any", ['\n', 'a']))],
            vec![GlyphId(1)],
        );
        assert!(!rule.matches_at(&['\n'], 0));
        assert!(rule.matches_at(&['a'], 0));
    }

    #[test]
    fn class_overlap_detection() {
        let a = RewriteRule::new(
            vec![PatternItem::Char('x'), PatternItem::Class(digits())],
            vec![GlyphId(1)],
        );
        let b = RewriteRule::literal("x7", vec![GlyphId(2)]);
        let c = RewriteRule::literal("xy", vec![GlyphId(2)]);
        assert!(a.overlaps(&b));
        assert!(!a.overlaps(&c));
        assert!(!a.overlaps(&RewriteRule::literal("x", vec![GlyphId(1)])));
    }

    #[test]
    fn alternatives_follow_settings() {
        let mut settings = SettingsVector::from_defaults(&[Setting::new("emoji", &["mono", "color"])]);
        let rule = RewriteRule::literal(":)", vec![GlyphId(5)]).with_alternative(
            SettingKey(0),
            1,
            vec![GlyphId(6)],
        );
        assert_eq!(rule.replacement_for(&settings), &[GlyphId(5)]);
        settings.set(SettingKey(0), 1);
        assert_eq!(rule.replacement_for(&settings), &[GlyphId(6)]);
    }

    #[test]
    fn display_names_pattern_and_replacement() {
        let rule = RewriteRule::literal("<3", vec![GlyphId(12)]);
        assert_eq!(rule.to_string(), "'<' '3' => [12]");
        let classy = RewriteRule::new(vec![PatternItem::Class(digits())], vec![GlyphId(1), GlyphId(2)]);
        assert_eq!(classy.to_string(), "(digit) => [1, 2]");
    }
}
