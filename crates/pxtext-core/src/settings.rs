//! Font settings and the variant families they drive
//!
//! A font declares a list of [`Setting`]s, each a named choice between a few
//! options. The strand keeps the current choice for every setting in a
//! [`SettingsVector`]; variant families and rule alternatives read it to pick
//! which glyphs end up on screen.

use crate::types::GlyphId;
use std::fmt;

/// Index of a setting in the font's setting catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SettingKey(pub u8);

impl SettingKey {
    /// Number of distinct keys, and so of settings a font can declare
    pub const LIMIT: usize = u8::MAX as usize + 1;

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for SettingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "setting#{}", self.0)
    }
}

/// One named style choice declared by a font
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Setting {
    pub name: String,
    pub options: Vec<String>,
    pub default: u8,
}

impl Setting {
    pub fn new(name: impl Into<String>, options: &[&str]) -> Self {
        Self {
            name: name.into(),
            options: options.iter().map(|opt| opt.to_string()).collect(),
            default: 0,
        }
    }

    pub fn with_default(mut self, default: u8) -> Self {
        self.default = default;
        self
    }

    pub fn num_options(&self) -> u8 {
        self.options.len().min(u8::MAX as usize) as u8
    }

    pub fn option_name(&self, option: u8) -> Option<&str> {
        self.options.get(option as usize).map(String::as_str)
    }
}

/// Snapshot of the selected option for every setting of a font
///
/// Two vectors are equal exactly when every key holds the same option, which
/// makes them usable as part of a cache key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct SettingsVector {
    values: Vec<u8>,
}

impl SettingsVector {
    pub fn from_defaults(settings: &[Setting]) -> Self {
        Self {
            values: settings.iter().take(SettingKey::LIMIT).map(|s| s.default).collect(),
        }
    }

    pub fn get(&self, key: SettingKey) -> Option<u8> {
        self.values.get(key.index()).copied()
    }

    /// Returns `false` when the key is outside the vector
    pub fn set(&mut self, key: SettingKey, option: u8) -> bool {
        match self.values.get_mut(key.index()) {
            Some(slot) => {
                *slot = option;
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (SettingKey, u8)> + '_ {
        (0..=u8::MAX)
            .zip(self.values.iter())
            .map(|(i, &opt)| (SettingKey(i), opt))
    }
}

/// A concrete glyph that a family may resolve to, and when
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantCandidate {
    pub glyph: GlyphId,
    pub conditions: Vec<(SettingKey, u8)>,
}

impl VariantCandidate {
    pub fn new(glyph: GlyphId) -> Self {
        Self {
            glyph,
            conditions: Vec::new(),
        }
    }

    /// Require `key` to hold `option` for this candidate to survive narrowing
    pub fn when(mut self, key: SettingKey, option: u8) -> Self {
        self.conditions.push((key, option));
        self
    }

    fn condition(&self, key: SettingKey) -> Option<u8> {
        self.conditions
            .iter()
            .find(|(k, _)| *k == key)
            .map(|&(_, opt)| opt)
    }
}

/// A group of interchangeable glyphs selected by settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantFamily {
    pub name: String,
    pub candidates: Vec<VariantCandidate>,
}

impl VariantFamily {
    pub fn new(name: impl Into<String>, candidates: Vec<VariantCandidate>) -> Self {
        Self {
            name: name.into(),
            candidates,
        }
    }

    /// Settings keys any candidate conditions on, ascending
    pub fn keys(&self) -> Vec<SettingKey> {
        let mut keys: Vec<SettingKey> = self
            .candidates
            .iter()
            .flat_map(|c| c.conditions.iter().map(|&(k, _)| k))
            .collect();
        keys.sort_unstable();
        keys.dedup();
        keys
    }

    /// Candidates still eligible under `settings`
    ///
    /// Each key narrows the set independently. Candidates without a condition
    /// on a key pass that key; a key whose filter would leave nothing is
    /// ignored.
    pub fn narrow(&self, settings: &SettingsVector) -> Vec<GlyphId> {
        let mut alive: Vec<&VariantCandidate> = self.candidates.iter().collect();
        for key in self.keys() {
            let Some(selected) = settings.get(key) else {
                continue;
            };
            let kept: Vec<&VariantCandidate> = alive
                .iter()
                .copied()
                .filter(|c| c.condition(key).map_or(true, |opt| opt == selected))
                .collect();
            if !kept.is_empty() {
                alive = kept;
            }
        }
        alive.into_iter().map(|c| c.glyph).collect()
    }

    /// Deterministic choice: first surviving candidate
    pub fn select(&self, settings: &SettingsVector) -> Option<GlyphId> {
        self.narrow(settings).first().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SERIF: SettingKey = SettingKey(0);
    const WIDTH: SettingKey = SettingKey(1);

    fn family() -> VariantFamily {
        VariantFamily::new(
            "a",
            vec![
                VariantCandidate::new(GlyphId(1)).when(SERIF, 0).when(WIDTH, 0),
                VariantCandidate::new(GlyphId(2)).when(SERIF, 1).when(WIDTH, 0),
                VariantCandidate::new(GlyphId(3)).when(SERIF, 1).when(WIDTH, 1),
                VariantCandidate::new(GlyphId(4)).when(WIDTH, 1),
            ],
        )
    }

    fn vector(serif: u8, width: u8) -> SettingsVector {
        let mut v = SettingsVector::from_defaults(&[
            Setting::new("serif", &["off", "on"]),
            Setting::new("width", &["normal", "wide", "condensed"]),
        ]);
        v.set(SERIF, serif);
        v.set(WIDTH, width);
        v
    }

    #[test]
    fn each_key_narrows_independently() {
        let fam = family();
        assert_eq!(fam.narrow(&vector(0, 0)), vec![GlyphId(1)]);
        assert_eq!(fam.narrow(&vector(1, 0)), vec![GlyphId(2)]);
        assert_eq!(fam.narrow(&vector(1, 1)), vec![GlyphId(3), GlyphId(4)]);
        assert_eq!(fam.select(&vector(1, 1)), Some(GlyphId(3)));
    }

    #[test]
    fn emptying_filter_is_ignored() {
        // No candidate is condensed, so the width key is skipped
        assert_eq!(family().select(&vector(1, 2)), Some(GlyphId(2)));
    }

    #[test]
    fn unconditioned_candidates_pass_every_key() {
        let fam = VariantFamily::new(
            "b",
            vec![
                VariantCandidate::new(GlyphId(7)),
                VariantCandidate::new(GlyphId(8)).when(SERIF, 1),
            ],
        );
        assert_eq!(fam.narrow(&vector(0, 0)), vec![GlyphId(7)]);
        assert_eq!(fam.narrow(&vector(1, 0)), vec![GlyphId(7), GlyphId(8)]);
    }

    #[test]
    fn vectors_compare_by_value() {
        assert_eq!(vector(1, 0), vector(1, 0));
        assert_ne!(vector(1, 0), vector(0, 0));
        let pairs: Vec<_> = vector(1, 2).iter().collect();
        assert_eq!(pairs, vec![(SERIF, 1), (WIDTH, 2)]);
    }

    #[test]
    fn setting_catalog_queries() {
        let s = Setting::new("width", &["normal", "wide"]).with_default(1);
        assert_eq!(s.num_options(), 2);
        assert_eq!(s.option_name(1), Some("wide"));
        assert_eq!(s.option_name(2), None);
        assert_eq!(SettingsVector::from_defaults(&[s]).get(SettingKey(0)), Some(1));
    }
}
