//! Client configuration and credentials.
//!
//! Configuration is parsed from TOML and can be overridden through
//! environment variables, so deployments and tests can point the client at
//! different backends without recompiling:
//!
//! | Variable | Overrides |
//! |---|---|
//! | `ROADWATCH_API_URL` | `api_url` |
//! | `ROADWATCH_MEDIA_UPLOAD_URL` | `media.upload_url` |
//! | `ROADWATCH_MEDIA_PRESET` | `media.upload_preset` |
//! | `ROADWATCH_GEOCODER_URL` | `geocoder.base_url` |
//! | `ROADWATCH_TOKEN` | bearer token ([`Credentials::from_env`]) |

use serde::Deserialize;

/// Default records-per-page when a caller does not specify one.
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Errors from configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Reading the config file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The TOML could not be parsed.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),

    /// A required environment variable is unset.
    #[error("Missing environment variable: {name}")]
    MissingEnv {
        /// Name of the missing variable.
        name: String,
    },
}

/// Bearer credentials for the backend.
///
/// Passed into [`crate::ApiClient`] explicitly — never read from ambient
/// global state — so tests can construct fakes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    token: String,
}

impl Credentials {
    /// Wraps an already-obtained bearer token. How the token is acquired
    /// and stored is outside this crate's scope.
    #[must_use]
    pub fn bearer(token: &str) -> Self {
        Self {
            token: token.to_owned(),
        }
    }

    /// Reads the token from `ROADWATCH_TOKEN`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingEnv`] when the variable is unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        std::env::var("ROADWATCH_TOKEN")
            .map(|token| Self { token })
            .map_err(|_| ConfigError::MissingEnv {
                name: "ROADWATCH_TOKEN".to_owned(),
            })
    }

    /// The `Authorization` header value.
    #[must_use]
    pub fn header_value(&self) -> String {
        format!("Bearer {}", self.token)
    }
}

/// Media host settings for evidence uploads.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MediaConfig {
    /// Upload endpoint URL.
    pub upload_url: String,
    /// Unsigned upload preset name.
    pub upload_preset: String,
}

/// Reverse geocoder settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GeocoderConfig {
    /// Base URL of the Nominatim-style reverse endpoint.
    pub base_url: String,
}

/// Top-level client configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the RoadWatch REST API (no trailing slash).
    pub api_url: String,
    /// Records per page when a fetch does not specify a limit.
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    /// Media host settings, when uploads are enabled.
    #[serde(default)]
    pub media: Option<MediaConfig>,
    /// Reverse geocoder settings, when address resolution is enabled.
    #[serde(default)]
    pub geocoder: Option<GeocoderConfig>,
}

const fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

impl ClientConfig {
    /// Creates a minimal configuration pointing at the given API URL.
    #[must_use]
    pub fn new(api_url: &str) -> Self {
        Self {
            api_url: api_url.trim_end_matches('/').to_owned(),
            page_size: DEFAULT_PAGE_SIZE,
            media: None,
            geocoder: None,
        }
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] on malformed TOML.
    pub fn from_toml_str(toml_str: &str) -> Result<Self, ConfigError> {
        let mut config: Self = toml::from_str(toml_str)?;
        config.api_url = config.api_url.trim_end_matches('/').to_owned();
        Ok(config)
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read or parsed.
    pub fn from_file(path: &std::path::Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Applies environment-variable overrides on top of the parsed
    /// values. Unset variables leave the config untouched.
    #[must_use]
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(url) = std::env::var("ROADWATCH_API_URL") {
            self.api_url = url.trim_end_matches('/').to_owned();
        }
        if let Ok(url) = std::env::var("ROADWATCH_GEOCODER_URL") {
            self.geocoder = Some(GeocoderConfig { base_url: url });
        }
        if let Ok(upload_url) = std::env::var("ROADWATCH_MEDIA_UPLOAD_URL")
            && let Ok(upload_preset) = std::env::var("ROADWATCH_MEDIA_PRESET")
        {
            self.media = Some(MediaConfig {
                upload_url,
                upload_preset,
            });
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_config() {
        let config = ClientConfig::from_toml_str(
            r#"
            api_url = "https://api.roadwatch.example/"
            page_size = 50

            [media]
            upload_url = "https://media.example/upload"
            upload_preset = "roadwatch_unsigned"

            [geocoder]
            base_url = "https://nominatim.example/reverse"
            "#,
        )
        .unwrap();

        assert_eq!(config.api_url, "https://api.roadwatch.example");
        assert_eq!(config.page_size, 50);
        assert_eq!(
            config.media.unwrap().upload_preset,
            "roadwatch_unsigned"
        );
    }

    #[test]
    fn page_size_defaults_when_omitted() {
        let config =
            ClientConfig::from_toml_str("api_url = \"https://api.roadwatch.example\"").unwrap();
        assert_eq!(config.page_size, DEFAULT_PAGE_SIZE);
        assert!(config.media.is_none());
        assert!(config.geocoder.is_none());
    }

    #[test]
    fn bearer_header_value() {
        let credentials = Credentials::bearer("tok_123");
        assert_eq!(credentials.header_value(), "Bearer tok_123");
    }
}
