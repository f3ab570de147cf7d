//! Configuration for lowport.
//!
//! Settings come from three layers, later ones winning:
//!
//! 1. built-in defaults (threshold 300000 KB, everything else empty),
//! 2. a local `.env` file, if present,
//! 3. the process environment.
//!
//! Only `API_KEY`, `ORG_ID`, `BASE_URL` and `USAGE_THRESHOLD_KB` are read.
//! Presence is not validated: an empty key, org or URL surfaces later as a
//! failed request, not as a config error.

use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::Path;

use figment::value::{Dict, Map};
use figment::{Figment, Metadata, Profile, Provider, providers::Serialized};
use secrecy::SecretString;
use serde::{Deserialize, Deserializer, Serialize, de};
use thiserror::Error;

/// Environment keys read by [`load`].
pub const ENV_KEYS: [&str; 4] = ["API_KEY", "ORG_ID", "BASE_URL", "USAGE_THRESHOLD_KB"];

/// Low-usage cutoff when `USAGE_THRESHOLD_KB` is not set.
pub const DEFAULT_USAGE_THRESHOLD_KB: i64 = 300_000;

/// Default location of the optional dotenv file, relative to the working directory.
pub const DEFAULT_ENV_FILE: &str = ".env";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    EnvFile {
        path: String,
        #[source]
        source: dotenvy::Error,
    },

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── Settings ────────────────────────────────────────────────────────

/// Resolved run configuration.
#[derive(Debug, Deserialize)]
pub struct Settings {
    /// Dashboard API key.
    #[serde(deserialize_with = "secret")]
    pub api_key: SecretString,

    /// Organization whose inventory is scanned.
    pub org_id: String,

    /// API root, e.g. `https://api.meraki.com/api/v1`.
    pub base_url: String,

    /// Ports with total usage strictly below this many KB are exported.
    #[serde(deserialize_with = "threshold")]
    pub usage_threshold_kb: i64,
}

#[derive(Debug, Serialize)]
struct Defaults {
    api_key: &'static str,
    org_id: &'static str,
    base_url: &'static str,
    usage_threshold_kb: i64,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            api_key: "",
            org_id: "",
            base_url: "",
            usage_threshold_kb: DEFAULT_USAGE_THRESHOLD_KB,
        }
    }
}

fn secret<'de, D: Deserializer<'de>>(de: D) -> Result<SecretString, D::Error> {
    String::deserialize(de).map(SecretString::from)
}

/// Accepts either an integer (defaults) or a decimal string (env sources).
fn threshold<'de, D: Deserializer<'de>>(de: D) -> Result<i64, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Int(i64),
        Text(String),
    }

    match Raw::deserialize(de)? {
        Raw::Int(n) => Ok(n),
        Raw::Text(s) => s.trim().parse().map_err(|_| {
            de::Error::invalid_value(de::Unexpected::Str(&s), &"an integer number of kilobytes")
        }),
    }
}

// ── Flat KEY=value sources ──────────────────────────────────────────

/// Figment provider over `KEY=value` pairs (a dotenv file or the process
/// environment).
///
/// Unlike `figment::providers::Env`, values stay strings: an org id such
/// as `549236` or an all-digit API key is never reinterpreted as a number.
#[derive(Debug, Clone, Default)]
pub struct FlatEnv {
    name: String,
    entries: BTreeMap<String, String>,
}

impl FlatEnv {
    /// Build from arbitrary pairs, keeping only [`ENV_KEYS`].
    pub fn from_pairs<I>(name: impl Into<String>, pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let entries = pairs
            .into_iter()
            .filter(|(k, _)| ENV_KEYS.contains(&k.as_str()))
            .map(|(k, v)| (k.to_ascii_lowercase(), v))
            .collect();
        Self {
            name: name.into(),
            entries,
        }
    }

    /// Snapshot of the process environment.
    pub fn process() -> Self {
        Self::from_pairs(
            "environment",
            ENV_KEYS
                .iter()
                .filter_map(|k| std::env::var(k).ok().map(|v| ((*k).to_owned(), v))),
        )
    }

    /// Entries from a dotenv file. A missing file yields no entries.
    ///
    /// The file is parsed without touching the process environment.
    pub fn dotenv_file(path: &Path) -> Result<Self, ConfigError> {
        let name = path.display().to_string();
        let env_err = |source| ConfigError::EnvFile {
            path: path.display().to_string(),
            source,
        };

        let iter = match dotenvy::from_path_iter(path) {
            Ok(iter) => iter,
            Err(dotenvy::Error::Io(e)) if e.kind() == ErrorKind::NotFound => {
                return Ok(Self::from_pairs(name, std::iter::empty()));
            }
            Err(e) => return Err(env_err(e)),
        };

        let pairs = iter.collect::<Result<Vec<_>, _>>().map_err(env_err)?;
        Ok(Self::from_pairs(name, pairs))
    }
}

impl Provider for FlatEnv {
    fn metadata(&self) -> Metadata {
        Metadata::named(self.name.clone())
    }

    fn data(&self) -> Result<Map<Profile, Dict>, figment::Error> {
        Serialized::defaults(&self.entries).data()
    }
}

// ── Loading ─────────────────────────────────────────────────────────

/// Layer defaults, the dotenv file and the environment.
pub fn figment(file: FlatEnv, env: FlatEnv) -> Figment {
    Figment::new()
        .merge(Serialized::defaults(Defaults::default()))
        .merge(file)
        .merge(env)
}

/// Load settings from `env_file` (if given and present) and the process
/// environment.
pub fn load(env_file: Option<&Path>) -> Result<Settings, ConfigError> {
    let file = match env_file {
        Some(path) => FlatEnv::dotenv_file(path)?,
        None => FlatEnv::default(),
    };
    let settings = figment(file, FlatEnv::process()).extract()?;
    Ok(settings)
}
