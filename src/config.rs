//! Harness configuration
//!
//! Settings are resolved from three layers, highest precedence first:
//!
//! 1. Process environment (`SHOPCHECK_*` variables; `.env` files are folded
//!    into the environment at load time)
//! 2. A `key=value` properties file (default: `config/shopcheck.properties`)
//! 3. Built-in defaults
//!
//! Typed getters never fail on a bad value: an absent key or a non-parseable
//! value logs a warning and falls back to the supplied default.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::error::{Error, Result};

/// Default properties file location, relative to the working directory
pub const DEFAULT_PROPERTIES_FILE: &str = "config/shopcheck.properties";

/// Resolved harness settings
#[derive(Debug, Clone, Default)]
pub struct Settings {
    values: HashMap<String, String>,
    overrides: HashMap<String, String>,
}

impl Settings {
    /// Load settings from the default properties file, if present
    pub fn load() -> Self {
        Self::load_from(Path::new(DEFAULT_PROPERTIES_FILE))
    }

    /// Load settings from a specific properties file
    ///
    /// A missing file is not an error: the environment and built-in defaults
    /// still apply. `.env` is folded into the process environment first so
    /// credentials can live outside the properties file.
    pub fn load_from(path: &Path) -> Self {
        if dotenvy::dotenv().is_ok() {
            debug!("Loaded .env into the environment");
        }

        match std::fs::read_to_string(path) {
            Ok(text) => {
                let settings = Self::from_properties(&text);
                info!(
                    "Configuration loaded from {} ({} keys)",
                    path.display(),
                    settings.values.len()
                );
                settings
            }
            Err(e) => {
                warn!("Unable to read {}: {} (using defaults)", path.display(), e);
                Self::default()
            }
        }
    }

    /// Parse properties text: `key=value` lines, `#` comments, blanks ignored
    pub fn from_properties(text: &str) -> Self {
        let mut values = HashMap::new();
        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            if let Some((key, value)) = line.split_once('=') {
                values.insert(key.trim().to_string(), value.trim().to_string());
            }
        }
        Self {
            values,
            overrides: HashMap::new(),
        }
    }

    /// Force a value, taking precedence over environment and file
    /// (used by CLI flags)
    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        self.overrides.insert(key.to_string(), value.into());
    }

    /// Look up a raw value: CLI override, then environment, then the file
    pub fn get(&self, key: &str) -> Option<String> {
        if let Some(value) = self.overrides.get(key) {
            return Some(value.clone());
        }
        if let Ok(value) = std::env::var(env_key(key)) {
            return Some(value);
        }
        self.values.get(key).cloned()
    }

    /// Look up a value with a default
    pub fn get_or(&self, key: &str, default: &str) -> String {
        self.get(key).unwrap_or_else(|| default.to_string())
    }

    /// Integer getter; logs and falls back on absent or non-parseable values
    pub fn get_int(&self, key: &str, default: i64) -> i64 {
        match self.get(key) {
            Some(raw) => match raw.parse::<i64>() {
                Ok(value) => value,
                Err(_) => {
                    warn!("Invalid integer for {key}: `{raw}`, using {default}");
                    default
                }
            },
            None => default,
        }
    }

    /// Boolean getter; logs and falls back on absent or non-parseable values
    pub fn get_bool(&self, key: &str, default: bool) -> bool {
        match self.get(key) {
            Some(raw) => match raw.trim().to_ascii_lowercase().parse::<bool>() {
                Ok(value) => value,
                Err(_) => {
                    warn!("Invalid boolean for {key}: `{raw}`, using {default}");
                    default
                }
            },
            None => default,
        }
    }

    /// UI entry point. Required: scenarios cannot start without it.
    pub fn base_url(&self) -> Result<String> {
        self.get("base.url")
            .ok_or_else(|| Error::config("base.url is not set"))
    }

    /// Product API root. Required for API-backed scenarios.
    pub fn api_base_url(&self) -> Result<String> {
        self.get("api.base.url")
            .ok_or_else(|| Error::config("api.base.url is not set"))
    }

    /// Browser kind string (`chrome` | `chromium`), defaults to chrome
    pub fn browser(&self) -> String {
        self.get_or("browser", "chrome").to_ascii_lowercase()
    }

    /// Deliberate pause between visible actions. Zero disables the pause.
    ///
    /// Demo/debug instrumentation only: set `slow.mo=0` for fast runs,
    /// 250-500 to watch actions land with the highlight applied.
    pub fn slow_mo(&self) -> Duration {
        Duration::from_millis(self.get_int("slow.mo", 500).max(0) as u64)
    }

    /// Headless mode, defaults to headed so the visual trail is observable
    pub fn headless(&self) -> bool {
        self.get_bool("headless.mode", false)
    }

    /// Element-wait budget (seconds, default 10)
    pub fn default_timeout(&self) -> Duration {
        Duration::from_secs(self.get_int("default.timeout", 10).max(0) as u64)
    }

    /// Page-load budget (seconds, default 30)
    pub fn long_timeout(&self) -> Duration {
        Duration::from_secs(self.get_int("long.timeout", 30).max(0) as u64)
    }

    /// Response-time bound for API calls (seconds, default 15)
    pub fn api_timeout(&self) -> Duration {
        Duration::from_secs(self.get_int("api.timeout", 15).max(0) as u64)
    }

    /// Root directory for per-scenario artifacts and the suite summary
    pub fn results_dir(&self) -> PathBuf {
        PathBuf::from(self.get_or("results.dir", "test-results"))
    }

    /// Storefront login username
    pub fn username(&self) -> String {
        self.get_or("login.username", "standard_user")
    }

    /// Storefront login password
    pub fn password(&self) -> String {
        self.get_or("login.password", "secret_sauce")
    }
}

/// Map a properties key to its environment override name
///
/// `base.url` -> `SHOPCHECK_BASE_URL`
fn env_key(key: &str) -> String {
    let mut out = String::with_capacity(key.len() + 10);
    out.push_str("SHOPCHECK_");
    for c in key.chars() {
        match c {
            '.' | '-' => out.push('_'),
            _ => out.push(c.to_ascii_uppercase()),
        }
    }
    out
}
