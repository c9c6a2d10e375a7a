//! Global mask cache configuration
//!
//! Mask caching is **on by default**. It can be switched off at runtime
//! through [`set_caching_enabled`] or at startup with the
//! `PXTEXT_MASK_CACHE` environment variable:
//!
//! ```bash
//! PXTEXT_MASK_CACHE=off ./my_game
//! ```
//!
//! `PXTEXT_MASK_CACHE_CAPACITY` sets how many masks each strand keeps
//! (default 1024).
//!
//! ```
//! use pxtext_core::cache_config;
//!
//! cache_config::set_caching_enabled(false);
//! assert!(!cache_config::is_caching_enabled());
//! cache_config::set_caching_enabled(true);
//! ```

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::OnceLock;

/// Masks kept per strand when the environment does not say otherwise
pub const DEFAULT_CAPACITY: usize = 1024;

static CACHING_ENABLED: AtomicBool = AtomicBool::new(true);

static ENV_CHECKED: OnceLock<()> = OnceLock::new();

static CAPACITY: OnceLock<usize> = OnceLock::new();

fn check_env() {
    ENV_CHECKED.get_or_init(|| {
        if let Ok(val) = std::env::var("PXTEXT_MASK_CACHE") {
            let disabled = matches!(val.to_lowercase().as_str(), "0" | "false" | "no" | "off");
            if disabled {
                CACHING_ENABLED.store(false, Ordering::SeqCst);
                log::info!("pxtext mask caching disabled via PXTEXT_MASK_CACHE env var");
            }
        }
    });
}

/// Check if mask caching is enabled
///
/// Reads `PXTEXT_MASK_CACHE` on first call; runtime changes through
/// [`set_caching_enabled`] win afterwards.
pub fn is_caching_enabled() -> bool {
    check_env();
    CACHING_ENABLED.load(Ordering::SeqCst)
}

/// Enable or disable mask caching globally at runtime
pub fn set_caching_enabled(enabled: bool) {
    check_env();
    CACHING_ENABLED.store(enabled, Ordering::SeqCst);
    log::debug!(
        "pxtext mask caching {} via runtime call",
        if enabled { "enabled" } else { "disabled" }
    );
}

/// Capacity for new mask caches
pub fn cache_capacity() -> usize {
    *CAPACITY.get_or_init(|| {
        match std::env::var("PXTEXT_MASK_CACHE_CAPACITY") {
            Ok(val) => match val.trim().parse::<usize>() {
                Ok(n) if n > 0 => {
                    log::info!("pxtext mask cache capacity set to {n} via env var");
                    n
                }
                _ => {
                    log::warn!("ignoring invalid PXTEXT_MASK_CACHE_CAPACITY `{val}`");
                    DEFAULT_CAPACITY
                }
            },
            Err(_) => DEFAULT_CAPACITY,
        }
    })
}
