use serde::Deserialize;
use std::{collections::HashMap, env, fmt, str::FromStr};

use crate::ConfigError;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct HarnessConfig {
    pub targets: TargetsConfig,
    pub credentials: CredentialsConfig,
    pub http: HttpConfig,
    pub logging: LoggingConfig,
}

impl HarnessConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let config = Self {
            targets: TargetsConfig::from_env(),
            credentials: CredentialsConfig::from_env(),
            http: HttpConfig::from_env()?,
            logging: LoggingConfig::from_env(),
        };
        config.validate()?;
        Ok(config)
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.credentials.username.trim().is_empty() {
            return Err(ConfigError::Invalid("username must not be empty".to_string()));
        }
        if self.credentials.password.is_empty() {
            return Err(ConfigError::Invalid("password must not be empty".to_string()));
        }
        if self.targets.api_base_url.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "api_base_url must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_parse<T: FromStr>(key: &str, default: T) -> Result<T, ConfigError> {
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid(format!("{key} must be a valid number, got '{raw}'"))),
        Err(_) => Ok(default),
    }
}

/// Hosts exercised by the smoke suites
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TargetsConfig {
    /// Backend API host, without the `/api/v1` prefix
    pub api_base_url: String,
    pub login_path: String,
    /// Web frontend serving `/assets/locale/*.json`
    pub assets_base_url: String,
    /// Static host serving `/assets/translations/*.json`
    pub translations_base_url: String,
    /// Third-party fingerprinting endpoint, called as-is
    pub fingerprint_url: String,
}

impl TargetsConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            api_base_url: env_or("SMOKE_API_BASE_URL", &defaults.api_base_url),
            login_path: env_or("SMOKE_LOGIN_PATH", &defaults.login_path),
            assets_base_url: env_or("SMOKE_ASSETS_BASE_URL", &defaults.assets_base_url),
            translations_base_url: env_or(
                "SMOKE_TRANSLATIONS_BASE_URL",
                &defaults.translations_base_url,
            ),
            fingerprint_url: env_or("SMOKE_FINGERPRINT_URL", &defaults.fingerprint_url),
        }
    }

    /// Absolute URL of the login endpoint
    pub fn login_url(&self) -> String {
        self.api_url(&self.login_path)
    }

    /// Join a path onto the API host without doubling or dropping slashes
    pub fn api_url(&self, path: &str) -> String {
        join_url(&self.api_base_url, path)
    }

    pub fn asset_url(&self, path: &str) -> String {
        join_url(&self.assets_base_url, path)
    }

    pub fn translation_url(&self, path: &str) -> String {
        join_url(&self.translations_base_url, path)
    }
}

impl Default for TargetsConfig {
    fn default() -> Self {
        Self {
            api_base_url: "https://pay-app-oilbv.ondigitalocean.app".to_string(),
            login_path: "/api/v1/auth/login".to_string(),
            assets_base_url: "https://pay-web-ntwda.ondigitalocean.app".to_string(),
            translations_base_url: "https://sea-lion-app-3vtnz.ondigitalocean.app".to_string(),
            fingerprint_url: "https://eu.api.fpjs.io/DwmA/JNZ1Dz7/7?q=rAYkICVaA2hXcDRGO6Nm"
                .to_string(),
        }
    }
}

fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// Login credentials for the platform's admin user
#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct CredentialsConfig {
    pub username: String,
    pub password: String,
}

impl CredentialsConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            username: env_or("SMOKE_USERNAME", &defaults.username),
            password: env_or("SMOKE_PASSWORD", &defaults.password),
        }
    }
}

impl Default for CredentialsConfig {
    fn default() -> Self {
        Self {
            username: "sa".to_string(),
            password: "123456".to_string(),
        }
    }
}

impl fmt::Debug for CredentialsConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialsConfig")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub connect_timeout_secs: u64,
    pub read_timeout_secs: u64,
}

impl HttpConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        Ok(Self {
            connect_timeout_secs: env_parse(
                "SMOKE_CONNECT_TIMEOUT_SECS",
                defaults.connect_timeout_secs,
            )?,
            read_timeout_secs: env_parse("SMOKE_READ_TIMEOUT_SECS", defaults.read_timeout_secs)?,
        })
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            connect_timeout_secs: 10,
            read_timeout_secs: 15,
        }
    }
}

/// Logging Configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
    pub modules: HashMap<String, String>,
}

impl LoggingConfig {
    /// Load from environment variables
    pub fn from_env() -> Self {
        let mut modules = HashMap::new();

        // Load module-specific log levels
        if let Ok(level) = env::var("LOG_MODULE_HARNESS") {
            modules.insert("harness".to_string(), level);
        }
        if let Ok(level) = env::var("LOG_MODULE_CATALOG") {
            modules.insert("catalog".to_string(), level);
        }

        Self {
            level: env_or("LOG_LEVEL", "info"),
            format: env_or("LOG_FORMAT", "pretty"),
            modules,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
            modules: HashMap::new(),
        }
    }
}
