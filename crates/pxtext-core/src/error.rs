//! Error types for pxtext

use thiserror::Error;

pub type Result<T> = std::result::Result<T, PxError>;

/// Main error type for pxtext
#[derive(Debug, Error)]
pub enum PxError {
    #[error("Rewrite rules failed: {0}")]
    Rewrite(#[from] RewriteError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl PxError {
    /// The offending rule text, when the error comes from rule activation
    pub fn rule(&self) -> Option<&str> {
        match self {
            PxError::Rewrite(err) => err.rule(),
            PxError::Config(_) => None,
        }
    }
}

/// Rewrite rule activation errors
#[derive(Debug, Error)]
pub enum RewriteError {
    #[error("ambiguous rewrite rules #{rule_index} `{rule}` and #{other_index} `{other}` match the same input with different results")]
    AmbiguousRules {
        rule: String,
        other: String,
        rule_index: usize,
        other_index: usize,
    },

    #[error("font has no rewrite rule #{0}")]
    UnknownRule(usize),
}

impl RewriteError {
    /// Human readable form of the first rule involved in the conflict
    pub fn rule(&self) -> Option<&str> {
        match self {
            RewriteError::AmbiguousRules { rule, .. } => Some(rule),
            RewriteError::UnknownRule(_) => None,
        }
    }

    /// Human readable form of the second rule involved in the conflict
    pub fn other_rule(&self) -> Option<&str> {
        match self {
            RewriteError::AmbiguousRules { other, .. } => Some(other),
            RewriteError::UnknownRule(_) => None,
        }
    }
}

/// Invalid configuration values
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unknown {kind} `{value}`")]
    UnknownValue { kind: &'static str, value: String },

    #[error("scale must be between 1 and {}", crate::MAX_SCALE)]
    InvalidScale,

    #[error("font has no setting #{0}")]
    UnknownSetting(u8),

    #[error("a font holds at most {} settings", crate::SettingKey::LIMIT)]
    TooManySettings,

    #[error("setting #{key} has no option {option} (available: {available})")]
    InvalidOption { key: u8, option: u8, available: u8 },

    #[error("mask data holds {actual} bytes, expected {expected}")]
    MaskDataLength { expected: usize, actual: usize },
}

impl ConfigError {
    pub fn unknown(kind: &'static str, value: &str) -> Self {
        ConfigError::UnknownValue {
            kind,
            value: value.to_string(),
        }
    }
}
