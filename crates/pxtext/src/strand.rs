//! Strand - a font plus the runtime state that decides which glyphs appear
//!
//! A strand owns everything about text rendering that is not a per-call
//! parameter: the current settings vector, the active rewrite rules, the
//! registered glyph pickers and the mask cache. Renderers share one strand
//! through an `Arc`.
//!
//! Interior state sits behind `parking_lot` locks, so a strand can be reached
//! from several threads. A settings change racing a draw still needs the
//! caller to serialize the two.
//!
//! The picker list is only locked long enough to copy it. Each picker has
//! its own reentrant lock, so a picker may call back into its strand; a
//! picker reached again from its own `pick` is skipped for that request.

use parking_lot::{Mutex, ReentrantMutex, RwLock};
use pxtext_core::{
    CacheStats, ConfigError, FontData, GlyphId, GlyphMask, GlyphPicker, GlyphSource, MaskCache,
    MaskCacheKey, Metrics, Result, RewriteError, SettingKey, SettingsVector, NOTDEF,
};
use pxtext_rewrite::{ActiveRules, RewriteEngine};
use std::cell::RefCell;
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

type SharedPicker = Arc<ReentrantMutex<RefCell<Box<dyn GlyphPicker>>>>;

#[derive(Debug, Default)]
struct RuleState {
    disabled: HashSet<usize>,
    active: ActiveRules,
}

/// A font with mutable selection state
pub struct Strand {
    font: Arc<dyn FontData>,
    settings: RwLock<Arc<SettingsVector>>,
    rules: RwLock<RuleState>,
    pickers: Mutex<Vec<SharedPicker>>,
    cache: MaskCache,
    engine: RewriteEngine,
}

impl Strand {
    /// Strand over `font` with default settings and every rule active
    ///
    /// Fails when the font's own rule catalog is ambiguous; see
    /// [`Strand::without_rules`] for such fonts.
    pub fn new(font: Arc<dyn FontData>) -> Result<Arc<Self>> {
        let cache = MaskCache::with_default_capacity();
        Self::build(font, cache, HashSet::new())
    }

    /// Like [`Strand::new`] with an explicit mask cache capacity
    pub fn with_cache_capacity(font: Arc<dyn FontData>, capacity: usize) -> Result<Arc<Self>> {
        Self::build(font, MaskCache::new(capacity), HashSet::new())
    }

    /// Strand with every rewrite rule disabled
    ///
    /// Rules can then be enabled one at a time with
    /// [`Strand::set_rewrite_rule_enabled`].
    pub fn without_rules(font: Arc<dyn FontData>) -> Arc<Self> {
        let disabled: HashSet<usize> = (0..font.rewrite_rules().len()).collect();
        let settings = SettingsVector::from_defaults(font.settings());
        Arc::new(Self {
            font,
            settings: RwLock::new(Arc::new(settings)),
            rules: RwLock::new(RuleState {
                disabled,
                active: ActiveRules::default(),
            }),
            pickers: Mutex::new(Vec::new()),
            cache: MaskCache::with_default_capacity(),
            engine: RewriteEngine::new(),
        })
    }

    fn build(font: Arc<dyn FontData>, cache: MaskCache, disabled: HashSet<usize>) -> Result<Arc<Self>> {
        let engine = RewriteEngine::new();
        let active = engine.activate(font.as_ref(), &disabled)?;
        let settings = SettingsVector::from_defaults(font.settings());
        log::debug!(
            "strand: font `{}` with {} settings and {} active rules",
            font.name(),
            settings.len(),
            active.len()
        );
        Ok(Arc::new(Self {
            font,
            settings: RwLock::new(Arc::new(settings)),
            rules: RwLock::new(RuleState { disabled, active }),
            pickers: Mutex::new(Vec::new()),
            cache,
            engine,
        }))
    }

    pub fn font(&self) -> &Arc<dyn FontData> {
        &self.font
    }

    // Settings

    /// Snapshot of the current settings vector
    pub fn settings(&self) -> Arc<SettingsVector> {
        Arc::clone(&self.settings.read())
    }

    pub fn setting(&self, key: SettingKey) -> Option<u8> {
        self.settings.read().get(key)
    }

    /// Select `option` for `key`
    ///
    /// Masks cached under the previous vector stay in the cache but are no
    /// longer reachable.
    pub fn set_setting(&self, key: SettingKey, option: u8) -> Result<()> {
        let setting = self
            .font
            .settings()
            .get(key.index())
            .ok_or(ConfigError::UnknownSetting(key.0))?;
        let available = setting.num_options();
        if option >= available {
            return Err(ConfigError::InvalidOption {
                key: key.0,
                option,
                available,
            }
            .into());
        }

        let mut current = self.settings.write();
        if current.get(key) == Some(option) {
            return Ok(());
        }
        let mut next = SettingsVector::clone(&current);
        next.set(key, option);
        *current = Arc::new(next);
        log::debug!("strand: {} `{}` set to {}", key, setting.name, option);
        Ok(())
    }

    /// Select a setting option by the names the font declares
    pub fn set_setting_named(&self, setting: &str, option: &str) -> Result<()> {
        let key = self
            .setting_key(setting)
            .ok_or_else(|| ConfigError::unknown("setting", setting))?;
        let index = self
            .option_names(key)
            .and_then(|names| names.iter().position(|name| *name == option))
            .and_then(|i| u8::try_from(i).ok())
            .ok_or_else(|| ConfigError::unknown("setting option", option))?;
        self.set_setting(key, index)
    }

    /// Back to the font's default for every setting
    pub fn reset_settings(&self) {
        *self.settings.write() = Arc::new(SettingsVector::from_defaults(self.font.settings()));
    }

    pub fn setting_names(&self) -> Vec<&str> {
        self.font.settings().iter().map(|s| s.name.as_str()).collect()
    }

    pub fn setting_key(&self, name: &str) -> Option<SettingKey> {
        self.font
            .settings()
            .iter()
            .position(|s| s.name == name)
            .and_then(|i| u8::try_from(i).ok())
            .map(SettingKey)
    }

    pub fn num_options(&self, key: SettingKey) -> Option<u8> {
        self.font.settings().get(key.index()).map(|s| s.num_options())
    }

    pub fn option_names(&self, key: SettingKey) -> Option<Vec<&str>> {
        self.font
            .settings()
            .get(key.index())
            .map(|s| s.options.iter().map(String::as_str).collect())
    }

    // Rewrite rules

    /// Enable or disable one catalog rule and reactivate
    ///
    /// On an ambiguity error nothing changes: neither the disabled set nor
    /// the active rules.
    pub fn set_rewrite_rule_enabled(&self, index: usize, enabled: bool) -> Result<()> {
        if index >= self.font.rewrite_rules().len() {
            return Err(RewriteError::UnknownRule(index).into());
        }
        let mut state = self.rules.write();
        let mut disabled = state.disabled.clone();
        if enabled {
            disabled.remove(&index);
        } else {
            disabled.insert(index);
        }
        let active = self.engine.activate(self.font.as_ref(), &disabled)?;
        *state = RuleState { disabled, active };
        Ok(())
    }

    /// Rebuild the active set from every rule not disabled
    pub fn activate_rewrite_rules(&self) -> Result<()> {
        let mut state = self.rules.write();
        let active = self.engine.activate(self.font.as_ref(), &state.disabled)?;
        state.active = active;
        Ok(())
    }

    /// Re-enable the whole catalog
    pub fn enable_all_rewrite_rules(&self) -> Result<()> {
        let mut state = self.rules.write();
        let active = self.engine.activate(self.font.as_ref(), &HashSet::new())?;
        *state = RuleState {
            disabled: HashSet::new(),
            active,
        };
        Ok(())
    }

    /// Disable every rule; text maps character by character
    pub fn clear_rewrite_rules(&self) {
        let mut state = self.rules.write();
        state.disabled = (0..self.font.rewrite_rules().len()).collect();
        state.active = ActiveRules::default();
    }

    pub fn active_rewrite_rules(&self) -> ActiveRules {
        self.rules.read().active.clone()
    }

    // Glyph pickers

    /// Register a picker; earlier pickers win for families both handle
    pub fn add_glyph_picker(&self, picker: Box<dyn GlyphPicker>) {
        log::debug!("strand: glyph picker `{}` added", picker.name());
        self.pickers
            .lock()
            .push(Arc::new(ReentrantMutex::new(RefCell::new(picker))));
    }

    pub fn clear_glyph_pickers(&self) {
        self.pickers.lock().clear();
    }

    // Resolution and masks

    /// Resolve text under the current rules and settings
    pub fn resolve(&self, text: &str) -> Vec<GlyphId> {
        let settings = self.settings();
        let rules = self.rules.read();
        self.engine
            .resolve(text, self.font.as_ref(), &rules.active, &settings)
    }

    pub fn find_glyph(&self, name: &str) -> Option<GlyphId> {
        self.font.glyph_by_name(name)
    }

    /// Whether every character of `text` has a glyph
    pub fn all_glyphs_available(&self, text: &str) -> bool {
        !self.resolve(text).contains(&GlyphId::MISSING)
    }

    /// The concrete glyph drawn for `glyph` right now
    ///
    /// Consults pickers, so two calls may disagree for a picked family.
    pub fn concrete_glyph(&self, glyph: GlyphId) -> Option<GlyphId> {
        let settings = self.settings();
        self.select(glyph, &settings)
    }

    fn select(&self, glyph: GlyphId, settings: &SettingsVector) -> Option<GlyphId> {
        if glyph == GlyphId::MISSING {
            return self.font.glyph_by_name(NOTDEF);
        }
        if glyph.is_control() {
            return None;
        }
        if !glyph.is_family() {
            return Some(glyph);
        }

        let variants = self.font.variant_family(glyph)?;
        let candidates = variants.narrow(settings);
        let mut chosen = *candidates.first()?;
        let pickers: Vec<SharedPicker> = self.pickers.lock().clone();
        for shared in &pickers {
            let guard = shared.lock();
            let Ok(mut picker) = guard.try_borrow_mut() else {
                log::debug!("glyph picker re-entered while picking {glyph}; skipped");
                continue;
            };
            if picker.handles(glyph, variants) {
                chosen = picker.pick(glyph, &candidates);
                log::trace!("picker `{}` chose {} for {}", picker.name(), chosen, glyph);
                break;
            }
        }
        if chosen.is_family() || chosen.is_control() {
            log::warn!("glyph picker returned {chosen} for {glyph}; drawing nothing");
            return None;
        }
        Some(chosen)
    }

    /// Mask of any glyph identity under the current settings
    pub fn load_mask(&self, glyph: GlyphId) -> Option<Arc<GlyphMask>> {
        let settings = self.settings();
        let concrete = self.select(glyph, &settings)?;
        let key = MaskCacheKey {
            glyph: concrete,
            settings,
        };
        let font = &self.font;
        self.cache.get_or_insert_with(key, || {
            log::trace!("strand: loading mask for {concrete}");
            font.glyph_mask(concrete).cloned().map(Arc::new)
        })
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    pub fn clear_mask_cache(&self) {
        self.cache.clear();
    }
}

impl GlyphSource for Strand {
    fn metrics(&self) -> Metrics {
        self.font.metrics()
    }

    fn load_mask(&self, glyph: GlyphId) -> Option<Arc<GlyphMask>> {
        Strand::load_mask(self, glyph)
    }

    fn kerning(&self, left: GlyphId, right: GlyphId) -> i32 {
        self.font.kerning(left, right)
    }

    fn is_whitespace(&self, glyph: GlyphId) -> bool {
        self.font.is_whitespace(glyph)
    }
}

impl fmt::Debug for Strand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Strand")
            .field("font", &self.font.name())
            .field("settings", &self.settings())
            .field("active_rules", &self.rules.read().active.indices())
            .field("pickers", &self.pickers.lock().len())
            .field("cache", &self.cache.stats())
            .finish()
    }
}
