// ABOUTME: Startup configuration read once from the process environment
// ABOUTME: (after loading .env) into a single Config value.

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use crate::error::ConfigError;
pub use crate::tools::MAPS_API_KEY_ENV;

pub const MODEL_ENV: &str = "TOOLWIRE_MODEL";
pub const FS_ROOT_ENV: &str = "TOOLWIRE_FS_ROOT";
pub const MCP_TIMEOUT_ENV: &str = "TOOLWIRE_MCP_TIMEOUT_SECS";

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_FS_ROOT: &str = "./test_data";
pub const DEFAULT_MCP_TIMEOUT: Duration = Duration::from_secs(30);

/// Everything the launcher reads from the environment.
#[derive(Clone)]
pub struct Config {
    pub maps_api_key: Option<String>,
    /// Model for every agent, replacing each preset's own choice.
    pub model: Option<String>,
    pub filesystem_root: PathBuf,
    pub mcp_timeout: Duration,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let redact = |key: &Option<String>| key.as_ref().map(|_| "<redacted>");
        f.debug_struct("Config")
            .field("maps_api_key", &redact(&self.maps_api_key))
            .field("model", &self.model)
            .field("filesystem_root", &self.filesystem_root)
            .field("mcp_timeout", &self.mcp_timeout)
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            maps_api_key: None,
            model: None,
            filesystem_root: PathBuf::from(DEFAULT_FS_ROOT),
            mcp_timeout: DEFAULT_MCP_TIMEOUT,
        }
    }
}

impl Config {
    /// Load `.env` if present, then read the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build from an arbitrary variable lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        let mcp_timeout = match get(MCP_TIMEOUT_ENV) {
            Some(raw) => {
                let secs: u64 = raw.trim().parse().map_err(|_| ConfigError::Invalid {
                    var: MCP_TIMEOUT_ENV,
                    message: format!("expected a whole number of seconds, got '{}'", raw),
                })?;
                if secs == 0 {
                    return Err(ConfigError::Invalid {
                        var: MCP_TIMEOUT_ENV,
                        message: "timeout must be at least one second".into(),
                    });
                }
                Duration::from_secs(secs)
            }
            None => defaults.mcp_timeout,
        };

        Ok(Self {
            maps_api_key: get(MAPS_API_KEY_ENV),
            model: get(MODEL_ENV).map(|m| m.trim().to_string()),
            filesystem_root: get(FS_ROOT_ENV)
                .map(PathBuf::from)
                .unwrap_or(defaults.filesystem_root),
            mcp_timeout,
        })
    }

    /// Key for the maps server.
    pub fn maps_api_key(&self) -> Result<&str, ConfigError> {
        self.maps_api_key
            .as_deref()
            .ok_or(ConfigError::MissingEnv(MAPS_API_KEY_ENV))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|var| vars.get(var).cloned())
    }

    #[test]
    fn defaults_when_unset() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.model, None);
        assert_eq!(config.filesystem_root, PathBuf::from("./test_data"));
        assert_eq!(config.mcp_timeout, Duration::from_secs(30));
        assert!(config.maps_api_key.is_none());
    }

    #[test]
    fn required_keys_report_the_variable() {
        let config = config_from(&[]).unwrap();
        let err = config.maps_api_key().unwrap_err();
        assert_eq!(err.to_string(), "GOOGLE_MAPS_API_KEY environment variable not set");
    }

    #[test]
    fn empty_values_count_as_unset() {
        let config = config_from(&[(MAPS_API_KEY_ENV, ""), (MODEL_ENV, "  ")]).unwrap();
        assert!(config.maps_api_key().is_err());
        assert_eq!(config.model, None);
    }

    #[test]
    fn reads_overrides() {
        let config = config_from(&[
            (MAPS_API_KEY_ENV, "maps-key"),
            (MODEL_ENV, "gemini-2.0-flash"),
            (FS_ROOT_ENV, "/srv/files"),
            (MCP_TIMEOUT_ENV, "5"),
        ])
        .unwrap();

        assert_eq!(config.maps_api_key().unwrap(), "maps-key");
        assert_eq!(config.model.as_deref(), Some("gemini-2.0-flash"));
        assert_eq!(config.filesystem_root, PathBuf::from("/srv/files"));
        assert_eq!(config.mcp_timeout, Duration::from_secs(5));
    }

    #[test]
    fn bad_timeout_is_invalid() {
        for bad in ["soon", "0", "-3"] {
            let err = config_from(&[(MCP_TIMEOUT_ENV, bad)]).unwrap_err();
            assert!(
                matches!(err, ConfigError::Invalid { var, .. } if var == MCP_TIMEOUT_ENV),
                "{bad}"
            );
        }
    }

    #[test]
    fn debug_redacts_keys() {
        let config = config_from(&[(MAPS_API_KEY_ENV, "super-secret")]).unwrap();
        let shown = format!("{config:?}");
        assert!(!shown.contains("super-secret"));
        assert!(shown.contains("<redacted>"));
    }
}
