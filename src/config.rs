//! Configuration types and loading logic.
//!
//! `Config` is a direct 1-to-1 mapping of `armctl.toml`.  Every field has a
//! default so the file is entirely optional — running against the public
//! management endpoint needs nothing beyond a subscription id and a token
//! in the environment.
//!
//! # File format
//!
//! ```toml
//! [api]
//! endpoint        = "https://management.azure.com"
//! subscription_id = "00000000-0000-0000-0000-000000000000"
//! token_env       = "ARM_ACCESS_TOKEN"   # env var holding the bearer token
//!
//! [datashare]
//! api_version = "2020-09-01"
//!
//! [recovery]
//! restore_api_version = "2016-06-01"
//! ```

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

// ─── Top-level ────────────────────────────────────────────────────────────────

/// Root configuration object, deserialised from `armctl.toml`.
///
/// All sections are optional; missing sections fall back to their
/// `Default` implementations.
#[derive(Debug, Deserialize, Serialize, Default)]
pub struct Config {
    /// Management endpoint and credentials.
    #[serde(default)]
    pub api: ApiConfig,

    /// Data-share service settings.
    #[serde(default)]
    pub datashare: DataShareConfig,

    /// Recovery-services settings.
    #[serde(default)]
    pub recovery: RecoveryConfig,
}

// ─── [api] ────────────────────────────────────────────────────────────────────

/// Where requests go and how they are authorised.
#[derive(Debug, Deserialize, Serialize)]
pub struct ApiConfig {
    /// Base URL of the resource-management endpoint.  Trailing slashes are
    /// trimmed when URLs are built.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Subscription id inserted into every resource path.
    #[serde(default)]
    pub subscription_id: String,

    /// Name of the environment variable holding the bearer token.
    ///
    /// Obtaining the token is out of scope here — `az account
    /// get-access-token`, a managed identity sidecar, whatever the
    /// environment provides.  When the variable is unset, requests go out
    /// unauthenticated and the service rejects them.
    #[serde(default = "default_token_env")]
    pub token_env: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            subscription_id: String::new(),
            token_env: default_token_env(),
        }
    }
}

// ─── [datashare] ──────────────────────────────────────────────────────────────

/// Data-share service API settings.
#[derive(Debug, Deserialize, Serialize)]
pub struct DataShareConfig {
    /// API version for trigger create/read calls.
    #[serde(default = "default_datashare_api_version")]
    pub api_version: String,
}

impl Default for DataShareConfig {
    fn default() -> Self {
        Self {
            api_version: default_datashare_api_version(),
        }
    }
}

// ─── [recovery] ───────────────────────────────────────────────────────────────

/// Recovery-services API settings.
///
/// The storage-provider API versions are **not** configurable: the two
/// candidate (namespace, version) pairs tried during identity resolution
/// are fixed — see [`crate::resolve::STORAGE_PROVIDER_CANDIDATES`].
#[derive(Debug, Deserialize, Serialize)]
pub struct RecoveryConfig {
    /// API version for the restore-trigger call on a recovery point.
    #[serde(default = "default_restore_api_version")]
    pub restore_api_version: String,
}

impl Default for RecoveryConfig {
    fn default() -> Self {
        Self {
            restore_api_version: default_restore_api_version(),
        }
    }
}

// ─── Defaults ─────────────────────────────────────────────────────────────────

// These free functions are required by `#[serde(default = "…")]` — serde
// cannot call `Default::default()` for individual fields, only for whole
// structs.

pub fn default_endpoint() -> String {
    "https://management.azure.com".into()
}

pub fn default_token_env() -> String {
    "ARM_ACCESS_TOKEN".into()
}

pub fn default_datashare_api_version() -> String {
    "2020-09-01".into()
}

pub fn default_restore_api_version() -> String {
    "2016-06-01".into()
}

// ─── Loader ───────────────────────────────────────────────────────────────────

/// Read and parse a `Config`.
///
/// Lookup order:
///
/// 1. `path` (default: `./armctl.toml`)
/// 2. `<config_dir>/armctl/config.toml` — global defaults
/// 3. built-in defaults, with a warning on stderr
///
/// Returns an error if a file exists but cannot be read or is not valid
/// TOML.
pub fn load_config(path: &Path) -> Result<Config> {
    if path.exists() {
        return parse_file(path);
    }

    let global = dirs_next::config_dir().map(|d| d.join("armctl").join("config.toml"));
    if let Some(global) = global.filter(|p| p.exists()) {
        return parse_file(&global);
    }

    eprintln!(
        "Warning: config file '{}' not found, using defaults.\n\
         Set [api].subscription_id in armctl.toml before running against a real account.",
        path.display()
    );
    Ok(Config::default())
}

fn parse_file(path: &Path) -> Result<Config> {
    let text =
        std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;

    toml::from_str(&text).with_context(|| format!("parsing {}", path.display()))
}

// ─── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    // ── Defaults ─────────────────────────────────────────────────────────────

    #[test]
    fn default_endpoint_is_public_cloud() {
        let cfg = Config::default();
        assert_eq!(cfg.api.endpoint, "https://management.azure.com");
        assert!(cfg.api.subscription_id.is_empty());
    }

    #[test]
    fn default_token_env_is_named() {
        assert_eq!(ApiConfig::default().token_env, "ARM_ACCESS_TOKEN");
    }

    #[test]
    fn default_api_versions_are_set() {
        let cfg = Config::default();
        assert_eq!(cfg.datashare.api_version, "2020-09-01");
        assert_eq!(cfg.recovery.restore_api_version, "2016-06-01");
    }

    // ── Round-trip serialisation ──────────────────────────────────────────────

    #[test]
    fn config_roundtrips_through_toml() {
        let original = Config {
            api: ApiConfig {
                endpoint: "https://management.usgovcloudapi.net".into(),
                subscription_id: "1111-2222".into(),
                token_env: "MY_TOKEN".into(),
            },
            datashare: DataShareConfig {
                api_version: "2021-08-01".into(),
            },
            recovery: RecoveryConfig {
                restore_api_version: "2019-05-13".into(),
            },
        };

        let toml_str = toml::to_string(&original).expect("serialisation failed");
        let recovered: Config = toml::from_str(&toml_str).expect("deserialisation failed");

        assert_eq!(recovered.api.endpoint, original.api.endpoint);
        assert_eq!(recovered.api.subscription_id, original.api.subscription_id);
        assert_eq!(recovered.api.token_env, original.api.token_env);
        assert_eq!(recovered.datashare.api_version, original.datashare.api_version);
        assert_eq!(
            recovered.recovery.restore_api_version,
            original.recovery.restore_api_version
        );
    }

    #[test]
    fn partial_toml_uses_defaults_for_missing_fields() {
        let toml_str = r#"
            [api]
            subscription_id = "abc"
        "#;
        let cfg: Config = toml::from_str(toml_str).expect("parse failed");
        assert_eq!(cfg.api.subscription_id, "abc");
        assert_eq!(cfg.api.endpoint, default_endpoint());
        assert_eq!(cfg.datashare.api_version, default_datashare_api_version());
    }

    #[test]
    fn empty_toml_deserialises_to_defaults() {
        let cfg: Config = toml::from_str("").expect("empty toml should parse");
        assert_eq!(cfg.api.endpoint, default_endpoint());
    }

    // ── load_config ───────────────────────────────────────────────────────────

    #[test]
    fn load_config_parses_valid_file() {
        use std::io::Write;
        let mut f = tempfile::NamedTempFile::new().unwrap();
        write!(
            f,
            r#"
            [api]
            endpoint        = "http://127.0.0.1:8080"
            subscription_id = "sub-1"
            "#
        )
        .unwrap();

        let cfg = load_config(f.path()).expect("should parse valid toml");
        assert_eq!(cfg.api.endpoint, "http://127.0.0.1:8080");
        assert_eq!(cfg.api.subscription_id, "sub-1");
    }

    #[test]
    fn load_config_errors_on_invalid_toml() {
        use std::io::Write;
        let mut f = tempfile::NamedTempFile::new().unwrap();
        write!(f, "not valid toml ][[[").unwrap();

        let result = load_config(f.path());
        assert!(result.is_err(), "invalid TOML should produce an error");
    }
}
