//! Lightweight configuration loader and path helpers.
//!
//! Uses Figment to merge `config.toml` + `config.<env>.toml` + `APP_*` env vars.
//! Provides a helper to expand `~` and `${VAR}` in user-supplied paths.

use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::Deserialize;
use std::env;
use std::path::{Path, PathBuf};

/// The additive score applied to listings matching the resolved location
/// token. Inherited from the original tuning; overridable via
/// `[search] location_boost` or `APP_SEARCH__LOCATION_BOOST`.
pub const DEFAULT_LOCATION_BOOST: f32 = 0.5;

/// Default number of results per request, shared with the
/// `SearchRequest` serde default so the two cannot drift.
pub const DEFAULT_TOP_K: usize = 10;

/// Tuning knobs for the search pipeline, extracted from the `[search]`
/// section. Every field has a default so a missing section is fine.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchTuning {
    #[serde(default = "default_location_boost")]
    pub location_boost: f32,
    #[serde(default = "default_top_k")]
    pub top_k: usize,
    #[serde(default = "default_http_timeout_secs")]
    pub http_timeout_secs: u64,
}

fn default_location_boost() -> f32 {
    DEFAULT_LOCATION_BOOST
}

fn default_top_k() -> usize {
    DEFAULT_TOP_K
}

fn default_http_timeout_secs() -> u64 {
    20
}

impl Default for SearchTuning {
    fn default() -> Self {
        Self {
            location_boost: default_location_boost(),
            top_k: default_top_k(),
            http_timeout_secs: default_http_timeout_secs(),
        }
    }
}

pub struct Config {
    figment: Figment,
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        let env_name = env::var("RUST_ENV").unwrap_or_else(|_| "dev".to_string());

        let mut figment = Figment::new().merge(Toml::file("config.toml"));
        match env_name.as_str() {
            "dev" | "development" => figment = figment.merge(Toml::file("config.dev.toml")),
            "prod" | "production" => figment = figment.merge(Toml::file("config.prod.toml")),
            "test" | "testing" => figment = figment.merge(Toml::file("config.test.toml")),
            _ => {}
        }
        figment = figment.merge(Env::prefixed("APP_").split("__"));

        Ok(Self { figment })
    }

    pub fn get<T>(&self, key: &str) -> anyhow::Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        self.figment
            .extract_inner(key)
            .map_err(|e| anyhow::anyhow!("Failed to get '{}': {}", key, e))
    }

    /// The `[search]` tuning section, falling back to defaults when the
    /// section is absent entirely.
    pub fn search_tuning(&self) -> SearchTuning {
        self.figment
            .extract_inner("search")
            .unwrap_or_else(|_| SearchTuning::default())
    }
}

/// Expand a user-provided path string:
/// - Expands leading '~' to the user's home directory
/// - Expands ${VAR} and $VAR environment variables
/// - Returns a PathBuf without attempting to canonicalize
pub fn expand_path<S: AsRef<str>>(input: S) -> PathBuf {
    let s = input.as_ref();
    // Expand env vars first
    let expanded_env = shellexpand::env(s).unwrap_or(std::borrow::Cow::Borrowed(s));
    // Expand ~ at start
    let expanded = shellexpand::tilde(&expanded_env);
    PathBuf::from(expanded.as_ref())
}

/// Resolve a possibly-relative path against a base directory.
/// Absolute paths (after expansion) pass through untouched.
pub fn resolve_with_base<S: AsRef<str>>(base: &Path, p: S) -> PathBuf {
    let p = expand_path(p);
    if p.is_absolute() {
        p
    } else {
        base.join(p)
    }
}
