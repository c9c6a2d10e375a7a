//! Bitmap fonts held entirely in memory
//!
//! [`BitmapFont`] is the [`FontData`] implementation pxtext ships with. It is
//! assembled through a [`FontBuilder`]: register glyph masks, map characters
//! to them, declare settings and variant families, add rewrite rules, then
//! [`FontBuilder::build`] freezes everything into an immutable font.
//!
//! ```rust
//! use pxtext_core::{FontData, Metrics};
//! use pxtext_font::FontBuilder;
//!
//! let mut builder = FontBuilder::new("dots");
//! builder.metrics(Metrics { ascent: 2, descent: 1, ..Default::default() });
//! let dot = builder.add_glyph_rows("dot", 2, -1, &["#"]);
//! builder.map('.', dot);
//! let font = builder.build();
//!
//! assert_eq!(font.glyph_id('.'), Some(dot));
//! assert_eq!(font.metrics().line_height(), 3);
//! ```

pub mod sample;

use pxtext_core::{
    ConfigError, FontData, GlyphId, GlyphMask, GlyphSource, Metrics, Rect, Result, RewriteRule, Setting,
    SettingKey, SettingsVector, VariantCandidate, VariantFamily, NOTDEF,
};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// Collects glyphs, mappings and rules for a [`BitmapFont`]
#[derive(Debug, Default)]
pub struct FontBuilder {
    name: String,
    metrics: Metrics,
    masks: Vec<GlyphMask>,
    names: HashMap<String, GlyphId>,
    charmap: HashMap<char, GlyphId>,
    whitespace: HashSet<GlyphId>,
    settings: Vec<Setting>,
    families: Vec<VariantFamily>,
    kerning: HashMap<(GlyphId, GlyphId), i32>,
    rules: Vec<RewriteRule>,
}

impl FontBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn metrics(&mut self, metrics: Metrics) -> &mut Self {
        self.metrics = metrics;
        self
    }

    fn next_id(&self) -> GlyphId {
        GlyphId(self.masks.len() as u16)
    }

    fn push(&mut self, name: &str, mask: GlyphMask) -> GlyphId {
        let id = mask.glyph;
        if id.0 >= GlyphId::FIRST_FAMILY {
            log::warn!("font `{}` glyph `{name}` overflows the concrete glyph range", self.name);
        }
        if self.names.insert(name.to_string(), id).is_some() {
            log::warn!("font `{}` redefines glyph name `{name}`", self.name);
        }
        self.masks.push(mask);
        id
    }

    /// Glyph drawn from text art, see [`GlyphMask::from_rows`]
    ///
    /// The art starts at the glyph origin horizontally; `top` is the row of
    /// the first line relative to the baseline.
    pub fn add_glyph_rows(&mut self, name: &str, advance: i32, top: i32, rows: &[&str]) -> GlyphId {
        let mask = GlyphMask::from_rows(self.next_id(), advance, 0, top, rows);
        self.push(name, mask)
    }

    /// Glyph with an advance and no pixels, such as a space
    pub fn add_blank(&mut self, name: &str, advance: i32) -> GlyphId {
        let mask = GlyphMask::empty(self.next_id(), advance);
        self.push(name, mask)
    }

    pub fn add_glyph_alpha(&mut self, name: &str, advance: i32, rect: Rect, data: Vec<u8>) -> Result<GlyphId> {
        let mask = GlyphMask::from_alpha(self.next_id(), advance, rect, data)?;
        Ok(self.push(name, mask))
    }

    pub fn add_glyph_rgba(&mut self, name: &str, advance: i32, rect: Rect, data: Vec<u8>) -> Result<GlyphId> {
        let mask = GlyphMask::from_rgba(self.next_id(), advance, rect, data)?;
        Ok(self.push(name, mask))
    }

    /// Map a character; whitespace characters mark their glyph as a word
    /// separator
    pub fn map(&mut self, ch: char, glyph: GlyphId) -> &mut Self {
        self.charmap.insert(ch, glyph);
        if ch.is_whitespace() {
            self.whitespace.insert(glyph);
        }
        self
    }

    /// Declare a setting; keys run out after [`SettingKey::LIMIT`]
    pub fn add_setting(&mut self, setting: Setting) -> Result<SettingKey> {
        let index = u8::try_from(self.settings.len()).map_err(|_| ConfigError::TooManySettings)?;
        self.settings.push(setting);
        Ok(SettingKey(index))
    }

    /// Register a variant family and return its identity
    pub fn add_family(&mut self, name: &str, candidates: Vec<VariantCandidate>) -> GlyphId {
        let id = GlyphId::family(self.families.len() as u16);
        self.families.push(VariantFamily::new(name, candidates));
        self.names.insert(name.to_string(), id);
        id
    }

    pub fn kern(&mut self, left: GlyphId, right: GlyphId, amount: i32) -> &mut Self {
        self.kerning.insert((left, right), amount);
        self
    }

    pub fn add_rule(&mut self, rule: RewriteRule) -> &mut Self {
        self.rules.push(rule);
        self
    }

    pub fn glyph(&self, name: &str) -> Option<GlyphId> {
        self.names.get(name).copied()
    }

    pub fn build(self) -> BitmapFont {
        log::debug!(
            "built font `{}`: {} glyphs, {} families, {} rules",
            self.name,
            self.masks.len(),
            self.families.len(),
            self.rules.len()
        );
        BitmapFont {
            name: self.name,
            metrics: self.metrics,
            masks: self.masks,
            names: self.names,
            charmap: self.charmap,
            whitespace: self.whitespace,
            settings: self.settings,
            families: self.families,
            kerning: self.kerning,
            rules: self.rules,
        }
    }
}

/// Immutable in-memory pixel font
#[derive(Debug)]
pub struct BitmapFont {
    name: String,
    metrics: Metrics,
    masks: Vec<GlyphMask>,
    names: HashMap<String, GlyphId>,
    charmap: HashMap<char, GlyphId>,
    whitespace: HashSet<GlyphId>,
    settings: Vec<Setting>,
    families: Vec<VariantFamily>,
    kerning: HashMap<(GlyphId, GlyphId), i32>,
    rules: Vec<RewriteRule>,
}

impl BitmapFont {
    pub fn builder(name: impl Into<String>) -> FontBuilder {
        FontBuilder::new(name)
    }

    /// Characters with a mapping, in no particular order
    pub fn mapped_chars(&self) -> impl Iterator<Item = char> + '_ {
        self.charmap.keys().copied()
    }
}

impl FontData for BitmapFont {
    fn name(&self) -> &str {
        &self.name
    }

    fn metrics(&self) -> Metrics {
        self.metrics
    }

    fn glyph_count(&self) -> usize {
        self.masks.len()
    }

    fn glyph_id(&self, ch: char) -> Option<GlyphId> {
        self.charmap.get(&ch).copied()
    }

    fn glyph_by_name(&self, name: &str) -> Option<GlyphId> {
        self.names.get(name).copied()
    }

    fn glyph_mask(&self, glyph: GlyphId) -> Option<&GlyphMask> {
        if glyph.is_family() || glyph.is_control() {
            return None;
        }
        self.masks.get(glyph.0 as usize)
    }

    fn kerning(&self, left: GlyphId, right: GlyphId) -> i32 {
        self.kerning.get(&(left, right)).copied().unwrap_or(0)
    }

    fn is_whitespace(&self, glyph: GlyphId) -> bool {
        self.whitespace.contains(&glyph)
    }

    fn settings(&self) -> &[Setting] {
        &self.settings
    }

    fn variant_family(&self, family: GlyphId) -> Option<&VariantFamily> {
        self.families.get(family.family_index()?)
    }

    fn rewrite_rules(&self) -> &[RewriteRule] {
        &self.rules
    }
}

/// A font is a glyph source under its default settings, with no cache
impl GlyphSource for BitmapFont {
    fn metrics(&self) -> Metrics {
        self.metrics
    }

    fn load_mask(&self, glyph: GlyphId) -> Option<Arc<GlyphMask>> {
        let concrete = if glyph == GlyphId::MISSING {
            self.glyph_by_name(NOTDEF)?
        } else if glyph.is_family() {
            let defaults = SettingsVector::from_defaults(&self.settings);
            self.variant_family(glyph)?.select(&defaults)?
        } else {
            glyph
        };
        self.glyph_mask(concrete).cloned().map(Arc::new)
    }

    fn kerning(&self, left: GlyphId, right: GlyphId) -> i32 {
        FontData::kerning(self, left, right)
    }

    fn is_whitespace(&self, glyph: GlyphId) -> bool {
        FontData::is_whitespace(self, glyph)
    }
}
