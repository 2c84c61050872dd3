//! Daemon configuration management.
//!
//! Configuration is stored as TOML:
//! - Linux: `~/.config/lightsync/config.toml`
//! - Windows: `%APPDATA%/lightsync/config.toml`
//!
//! The `LIGHTSYNC_CONFIG` environment variable overrides the path.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Top-level daemon configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncConfig {
    /// Display name of this bridge (hostname by default).
    #[serde(default = "default_name")]
    pub name: String,

    /// Reconciliation interval in milliseconds.
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,

    /// mDNS browse window in milliseconds.
    #[serde(default = "default_discovery_timeout_ms")]
    pub discovery_timeout_ms: u64,

    /// Per-request HTTP timeout in milliseconds.
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,

    #[serde(default)]
    pub legrand: LegrandConfig,

    #[serde(default)]
    pub hubitat: HubitatConfig,
}

/// Source hub settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LegrandConfig {
    #[serde(default)]
    pub username: String,

    #[serde(default)]
    pub password: String,

    /// Substring matched against mDNS service names and hosts.
    #[serde(default = "default_vendor_match")]
    pub vendor_match: String,

    /// Fixed base URL; when set, mDNS discovery is skipped.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hub_url: Option<String>,
}

/// Target hub settings (Hubitat Maker API).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HubitatConfig {
    /// Maker API base, e.g. `http://hubitat.local/apps/api/42`.
    #[serde(default)]
    pub base_url: String,

    #[serde(default)]
    pub access_token: String,
}

impl Default for LegrandConfig {
    fn default() -> Self {
        Self {
            username: String::new(),
            password: String::new(),
            vendor_match: default_vendor_match(),
            hub_url: None,
        }
    }
}

fn default_name() -> String {
    hostname::get()
        .ok()
        .and_then(|h| h.into_string().ok())
        .unwrap_or_else(|| "LightSync".into())
}

fn default_interval_ms() -> u64 {
    60_000
}

fn default_discovery_timeout_ms() -> u64 {
    5_000
}

fn default_request_timeout_ms() -> u64 {
    10_000
}

fn default_vendor_match() -> String {
    "legrand".into()
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            interval_ms: default_interval_ms(),
            discovery_timeout_ms: default_discovery_timeout_ms(),
            request_timeout_ms: default_request_timeout_ms(),
            legrand: LegrandConfig::default(),
            hubitat: HubitatConfig::default(),
        }
    }
}

impl SyncConfig {
    /// Loads configuration from disk, or creates a default if not found.
    pub fn load() -> anyhow::Result<Self> {
        let path = config_path()?;
        Self::load_from(&path)
    }

    /// Saves the current configuration to disk.
    pub fn save(&self) -> anyhow::Result<()> {
        let path = config_path()?;
        self.save_to(&path)
    }

    fn load_from(path: &Path) -> anyhow::Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: SyncConfig = toml::from_str(&content)?;
            Ok(config)
        } else {
            let config = SyncConfig::default();
            config.save_to(path)?;
            Ok(config)
        }
    }

    fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;

        // Restrict permissions on Unix (contains credentials).
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))?;
        }

        tracing::debug!(path = %path.display(), "configuration saved");
        Ok(())
    }
}

/// Returns the configuration file path.
fn config_path() -> anyhow::Result<PathBuf> {
    if let Ok(path) = std::env::var("LIGHTSYNC_CONFIG") {
        return Ok(PathBuf::from(path));
    }

    #[cfg(target_os = "windows")]
    {
        let appdata =
            std::env::var("APPDATA").unwrap_or_else(|_| "C:\\Users\\Default\\AppData".into());
        Ok(PathBuf::from(appdata).join("lightsync").join("config.toml"))
    }

    #[cfg(not(target_os = "windows"))]
    {
        let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".into());
        Ok(PathBuf::from(home)
            .join(".config")
            .join("lightsync")
            .join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = SyncConfig::default();
        assert!(!config.name.is_empty());
        assert_eq!(config.interval_ms, 60_000);
        assert_eq!(config.discovery_timeout_ms, 5_000);
        assert_eq!(config.legrand.vendor_match, "legrand");
        assert!(config.legrand.hub_url.is_none());
        assert!(config.hubitat.base_url.is_empty());
    }

    #[test]
    fn config_roundtrip_toml() {
        let config = SyncConfig {
            name: "Test Bridge".into(),
            interval_ms: 30_000,
            discovery_timeout_ms: 500,
            request_timeout_ms: 2_000,
            legrand: LegrandConfig {
                username: "user".into(),
                password: "secret".into(),
                vendor_match: "legrand".into(),
                hub_url: Some("http://10.0.0.5".into()),
            },
            hubitat: HubitatConfig {
                base_url: "http://hubitat.local/apps/api/42".into(),
                access_token: "tok".into(),
            },
        };

        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: SyncConfig = toml::from_str(&toml_str).unwrap();

        assert_eq!(parsed.name, "Test Bridge");
        assert_eq!(parsed.interval_ms, 30_000);
        assert_eq!(parsed.legrand.hub_url.as_deref(), Some("http://10.0.0.5"));
        assert_eq!(parsed.hubitat.access_token, "tok");
    }

    #[test]
    fn config_partial_toml() {
        let toml_str = r#"
            interval_ms = 15000

            [hubitat]
            base_url = "http://h/apps/api/1"
        "#;
        let config: SyncConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.interval_ms, 15_000);
        assert_eq!(config.discovery_timeout_ms, 5_000);
        assert_eq!(config.hubitat.base_url, "http://h/apps/api/1");
        assert_eq!(config.legrand.vendor_match, "legrand");
    }

    #[test]
    fn load_creates_default_when_missing() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config.toml");

        let config = SyncConfig::load_from(&path).unwrap();
        assert!(path.exists());
        assert_eq!(config.interval_ms, 60_000);

        // Loading again reads the file that was just written.
        let reread = SyncConfig::load_from(&path).unwrap();
        assert_eq!(reread.interval_ms, config.interval_ms);
    }

    #[test]
    fn save_and_load_roundtrip() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("nested").join("config.toml");

        let mut config = SyncConfig::default();
        config.hubitat.access_token = "secret-token".into();
        config.save_to(&path).unwrap();

        let loaded = SyncConfig::load_from(&path).unwrap();
        assert_eq!(loaded.hubitat.access_token, "secret-token");
    }
}
