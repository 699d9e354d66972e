//! Layered configuration.
//!
//! Sources, lowest precedence first:
//! 1. built-in defaults
//! 2. a TOML file (`apiprobe.toml` in the working directory, or `--config`)
//! 3. `APIPROBE_*` environment variables, `__` between section and key
//!    (e.g. `APIPROBE_TARGET__BASE_URL`)
//! 4. command-line overrides

use std::path::{Path, PathBuf};
use std::time::Duration;

use apiprobe_domain::{DEFAULT_BURST_SIZE, DEFAULT_TOKEN_KEY};
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

/// File read when no `--config` is given. Optional.
pub const DEFAULT_CONFIG_FILE: &str = "apiprobe.toml";

/// Prefix of environment variable overrides.
pub const ENV_PREFIX: &str = "APIPROBE";

/// Errors raised while loading settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A source could not be read or deserialized.
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    /// A value was read but is unusable.
    #[error("invalid configuration value for {field}: {reason}")]
    Invalid {
        /// Dotted key of the offending value.
        field: &'static str,
        /// What is wrong with it.
        reason: String,
    },
}

/// Target service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TargetSettings {
    /// Base URL every request path is appended to.
    pub base_url: String,
}

impl Default for TargetSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000/api".to_string(),
        }
    }
}

/// Account used by the suites.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CredentialSettings {
    /// Login name (an email address on the target service).
    pub username: String,
    /// Password.
    pub password: String,
    /// Full name sent on registration.
    pub full_name: String,
    /// Organization sent on registration.
    pub organization_name: String,
}

impl Default for CredentialSettings {
    fn default() -> Self {
        Self {
            username: "testadmin@example.com".to_string(),
            password: "testpass123".to_string(),
            full_name: "Test Admin".to_string(),
            organization_name: "Test Organization".to_string(),
        }
    }
}

/// HTTP client settings, identical for every request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpSettings {
    /// TCP/TLS connect timeout.
    pub connect_timeout_ms: u64,
    /// Total time allowed per request.
    pub request_timeout_ms: u64,
    /// User-Agent header.
    pub user_agent: String,
}

impl HttpSettings {
    /// Connect timeout as a `Duration`.
    #[must_use]
    pub const fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }

    /// Request timeout as a `Duration`.
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            connect_timeout_ms: 10_000,
            request_timeout_ms: 30_000,
            user_agent: concat!("apiprobe/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// Probe tunables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProbeSettings {
    /// Concurrent requests in the burst.
    pub burst_size: usize,
    /// Pause between matrix variants.
    pub matrix_delay_ms: u64,
    /// Slug for the public business endpoint.
    pub business_slug: String,
    /// JSON key of the token in the login response.
    pub token_key: String,
}

impl ProbeSettings {
    /// Matrix delay as a `Duration`.
    #[must_use]
    pub const fn matrix_delay(&self) -> Duration {
        Duration::from_millis(self.matrix_delay_ms)
    }
}

impl Default for ProbeSettings {
    fn default() -> Self {
        Self {
            burst_size: DEFAULT_BURST_SIZE,
            matrix_delay_ms: 100,
            business_slug: "test-slug".to_string(),
            token_key: DEFAULT_TOKEN_KEY.to_string(),
        }
    }
}

/// All settings of a run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Target service.
    pub target: TargetSettings,
    /// Account.
    pub credentials: CredentialSettings,
    /// HTTP client.
    pub http: HttpSettings,
    /// Probe tunables.
    pub probe: ProbeSettings,
}

/// Values given on the command line. `None` leaves lower layers alone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    /// `--base-url`
    pub base_url: Option<String>,
    /// `--username`
    pub username: Option<String>,
    /// `--password`
    pub password: Option<String>,
}

/// Loads settings from every layer and validates them.
///
/// `file` must exist when given; the default file is optional.
///
/// # Errors
///
/// Returns `ConfigError` if a source is unreadable or a value is invalid.
pub fn load(file: Option<&Path>, overrides: &Overrides) -> Result<Settings, ConfigError> {
    load_from(file, overrides, Environment::with_prefix(ENV_PREFIX))
}

fn load_from(
    file: Option<&Path>,
    overrides: &Overrides,
    environment: Environment,
) -> Result<Settings, ConfigError> {
    let file_source = match file {
        Some(path) => File::from(path.to_path_buf())
            .format(FileFormat::Toml)
            .required(true),
        None => File::from(PathBuf::from(DEFAULT_CONFIG_FILE))
            .format(FileFormat::Toml)
            .required(false),
    };

    let settings: Settings = Config::builder()
        .add_source(Config::try_from(&Settings::default())?)
        .add_source(file_source)
        .add_source(
            environment
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .set_override_option("target.base_url", overrides.base_url.clone())?
        .set_override_option("credentials.username", overrides.username.clone())?
        .set_override_option("credentials.password", overrides.password.clone())?
        .build()?
        .try_deserialize()?;

    settings.validate()?;
    tracing::debug!(base_url = %settings.target.base_url, "configuration loaded");
    Ok(settings)
}

impl Settings {
    /// Checks values the type system cannot.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` naming the first bad value.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = Url::parse(&self.target.base_url).map_err(|e| ConfigError::Invalid {
            field: "target.base_url",
            reason: e.to_string(),
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::Invalid {
                field: "target.base_url",
                reason: format!("unsupported scheme '{}'", url.scheme()),
            });
        }
        if self.credentials.username.trim().is_empty() {
            return Err(ConfigError::Invalid {
                field: "credentials.username",
                reason: "must not be empty".to_string(),
            });
        }
        if self.http.connect_timeout_ms == 0 || self.http.request_timeout_ms == 0 {
            return Err(ConfigError::Invalid {
                field: "http",
                reason: "timeouts must be greater than zero".to_string(),
            });
        }
        if self.probe.burst_size == 0 {
            return Err(ConfigError::Invalid {
                field: "probe.burst_size",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.probe.token_key.is_empty() {
            return Err(ConfigError::Invalid {
                field: "probe.token_key",
                reason: "must not be empty".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;
    use std::io::Write;

    fn no_env() -> Environment {
        Environment::with_prefix(ENV_PREFIX).source(Some(HashMap::new()))
    }

    fn write_toml(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .expect("temp file");
        file.write_all(contents.as_bytes()).expect("write config");
        file
    }

    #[test]
    fn test_defaults_are_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.probe.burst_size, 5);
        assert_eq!(settings.probe.matrix_delay(), Duration::from_millis(100));
        assert_eq!(settings.probe.token_key, "access_token");
    }

    #[test]
    fn test_file_then_env_then_cli() {
        let file = write_toml(
            r#"
[target]
base_url = "http://from-file:9000/api"

[credentials]
username = "file@example.com"

[probe]
burst_size = 8
"#,
        );
        let env: HashMap<String, String> = [
            ("APIPROBE_CREDENTIALS__USERNAME", "env@example.com"),
            ("APIPROBE_HTTP__REQUEST_TIMEOUT_MS", "1500"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
        let overrides = Overrides {
            base_url: Some("http://from-cli/api".to_string()),
            ..Overrides::default()
        };

        let settings = load_from(
            Some(file.path()),
            &overrides,
            Environment::with_prefix(ENV_PREFIX).source(Some(env)),
        )
        .expect("settings should load");

        assert_eq!(settings.target.base_url, "http://from-cli/api");
        assert_eq!(settings.credentials.username, "env@example.com");
        assert_eq!(settings.http.request_timeout_ms, 1500);
        assert_eq!(settings.probe.burst_size, 8);
        assert_eq!(settings.credentials.password, "testpass123");
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let result = load_from(
            Some(Path::new("/nonexistent/apiprobe.toml")),
            &Overrides::default(),
            no_env(),
        );
        assert!(matches!(result, Err(ConfigError::Load(_))));
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let file = write_toml("[probe]\nburst_size = 0\n");
        let result = load_from(Some(file.path()), &Overrides::default(), no_env());
        assert!(matches!(
            result,
            Err(ConfigError::Invalid {
                field: "probe.burst_size",
                ..
            })
        ));

        let overrides = Overrides {
            base_url: Some("ftp://example.com".to_string()),
            ..Overrides::default()
        };
        let result = load_from(None, &overrides, no_env());
        assert!(matches!(
            result,
            Err(ConfigError::Invalid {
                field: "target.base_url",
                ..
            })
        ));
    }
}
