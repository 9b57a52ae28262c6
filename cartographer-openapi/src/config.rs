// Document generation configuration

use crate::error::{OpenApiError, Result};
use crate::registry::SchemaDialect;
use crate::spec::{Info, Server};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Prefix of the environment variables read by [`OpenApiConfig::apply_env`]
/// when no other prefix is given.
pub const DEFAULT_ENV_PREFIX: &str = "CARTOGRAPHER";

/// Settings for one generated document.
///
/// Every field has a default, so a config file only needs the keys it
/// changes:
///
/// ```toml
/// title = "Inventory API"
/// version = "2.1.0"
/// default_tag = "inventory"
///
/// [[servers]]
/// url = "https://api.example.com"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OpenApiConfig {
    /// Version written to the document's `openapi` field.
    pub openapi_version: String,
    pub title: String,
    pub version: String,
    pub description: Option<String>,
    pub servers: Vec<Server>,
    /// Tag given to operations that have none.
    pub default_tag: Option<String>,
    /// Request body content type used when an endpoint declares none.
    pub default_content_type: String,
}

impl Default for OpenApiConfig {
    fn default() -> Self {
        Self {
            openapi_version: SchemaDialect::OpenApi30.default_version().to_string(),
            title: "API".to_string(),
            version: "1.0.0".to_string(),
            description: None,
            servers: Vec::new(),
            default_tag: None,
            default_content_type: "application/json".to_string(),
        }
    }
}

impl OpenApiConfig {
    pub fn new(title: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            version: version.into(),
            ..Default::default()
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn server(mut self, url: impl Into<String>, description: Option<String>) -> Self {
        self.servers.push(Server {
            url: url.into(),
            description,
        });
        self
    }

    pub fn openapi_version(mut self, version: impl Into<String>) -> Self {
        self.openapi_version = version.into();
        self
    }

    pub fn default_tag(mut self, tag: impl Into<String>) -> Self {
        self.default_tag = Some(tag.into());
        self
    }

    pub fn default_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.default_content_type = content_type.into();
        self
    }

    /// Schema dialect required by `openapi_version`.
    pub fn dialect(&self) -> Result<SchemaDialect> {
        SchemaDialect::from_version(&self.openapi_version).ok_or_else(|| {
            OpenApiError::Config(format!(
                "Unsupported OpenAPI version: {}",
                self.openapi_version
            ))
        })
    }

    pub(crate) fn info(&self) -> Info {
        Info {
            title: self.title.clone(),
            version: self.version.clone(),
            description: self.description.clone(),
            terms_of_service: None,
            contact: None,
            license: None,
        }
    }

    /// Load from a JSON or TOML file, picking the format from its extension.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        ConfigLoader::auto(path.as_ref())?.load_file(path)
    }

    /// Override fields from `<PREFIX>_*` environment variables.
    pub fn apply_env(self, prefix: &str) -> Self {
        self.apply_env_from(prefix, std::env::vars())
    }

    /// Override fields from `<PREFIX>_*` pairs.
    ///
    /// Recognised keys are `OPENAPI_VERSION`, `TITLE`, `VERSION`,
    /// `DESCRIPTION`, `DEFAULT_TAG`, `DEFAULT_CONTENT_TYPE` and `SERVERS`
    /// (comma separated URLs, replacing the configured list). Others are
    /// ignored.
    pub fn apply_env_from<I, K, V>(mut self, prefix: &str, vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        for (key, value) in vars {
            let Some(field) = key
                .as_ref()
                .strip_prefix(prefix)
                .and_then(|rest| rest.strip_prefix('_'))
            else {
                continue;
            };
            let value = value.into();

            match field.to_ascii_uppercase().as_str() {
                "OPENAPI_VERSION" => self.openapi_version = value,
                "TITLE" => self.title = value,
                "VERSION" => self.version = value,
                "DESCRIPTION" => self.description = Some(value),
                "DEFAULT_TAG" => self.default_tag = Some(value),
                "DEFAULT_CONTENT_TYPE" => self.default_content_type = value,
                "SERVERS" => {
                    self.servers = value
                        .split(',')
                        .map(str::trim)
                        .filter(|url| !url.is_empty())
                        .map(|url| Server {
                            url: url.to_string(),
                            description: None,
                        })
                        .collect();
                }
                _ => continue,
            }
            debug!(key = key.as_ref(), "Configuration overridden from environment");
        }
        self
    }
}

/// Supported configuration file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Json,
    Toml,
}

impl ConfigFormat {
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "json" => Some(ConfigFormat::Json),
            "toml" => Some(ConfigFormat::Toml),
            _ => None,
        }
    }
}

/// Reads [`OpenApiConfig`] from files or strings.
pub struct ConfigLoader {
    format: ConfigFormat,
}

impl ConfigLoader {
    pub fn new(format: ConfigFormat) -> Self {
        Self { format }
    }

    /// Auto-detect format from file extension
    pub fn auto(path: impl AsRef<Path>) -> Result<Self> {
        let ext = path
            .as_ref()
            .extension()
            .and_then(|s| s.to_str())
            .ok_or_else(|| OpenApiError::Config("No file extension found".to_string()))?;

        let format = ConfigFormat::from_extension(ext)
            .ok_or_else(|| OpenApiError::Config(format!("Unsupported format: {}", ext)))?;

        Ok(Self::new(format))
    }

    pub fn load_file(&self, path: impl AsRef<Path>) -> Result<OpenApiConfig> {
        let content = fs::read_to_string(path)?;
        self.parse(&content)
    }

    pub fn parse(&self, content: &str) -> Result<OpenApiConfig> {
        match self.format {
            ConfigFormat::Json => serde_json::from_str(content)
                .map_err(|e| OpenApiError::Config(format!("JSON parse error: {}", e))),
            ConfigFormat::Toml => toml::from_str(content)
                .map_err(|e| OpenApiError::Config(format!("TOML parse error: {}", e))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = OpenApiConfig::default();
        assert_eq!(config.openapi_version, "3.0.3");
        assert_eq!(config.default_content_type, "application/json");
        assert_eq!(config.dialect().unwrap(), SchemaDialect::OpenApi30);
    }

    #[test]
    fn test_parse_toml() {
        let loader = ConfigLoader::new(ConfigFormat::Toml);
        let config = loader
            .parse(
                r#"
                title = "Inventory API"
                openapi_version = "3.1.0"
                default_tag = "inventory"

                [[servers]]
                url = "https://api.example.com"
                "#,
            )
            .unwrap();

        assert_eq!(config.title, "Inventory API");
        assert_eq!(config.version, "1.0.0");
        assert_eq!(config.default_tag.as_deref(), Some("inventory"));
        assert_eq!(config.servers[0].url, "https://api.example.com");
        assert_eq!(config.dialect().unwrap(), SchemaDialect::OpenApi31);
    }

    #[test]
    fn test_parse_json() {
        let loader = ConfigLoader::new(ConfigFormat::Json);
        let config = loader
            .parse(r#"{"title": "Users", "default_content_type": "application/xml"}"#)
            .unwrap();

        assert_eq!(config.title, "Users");
        assert_eq!(config.default_content_type, "application/xml");
    }

    #[test]
    fn test_parse_error() {
        let loader = ConfigLoader::new(ConfigFormat::Json);
        assert!(matches!(loader.parse("{"), Err(OpenApiError::Config(_))));
    }

    #[test]
    fn test_format_detection() {
        assert!(ConfigLoader::auto("openapi.toml").is_ok());
        assert!(ConfigLoader::auto("openapi.JSON").is_ok());
        assert!(ConfigLoader::auto("openapi.yaml").is_err());
        assert!(ConfigLoader::auto("openapi").is_err());
    }

    #[test]
    fn test_unsupported_version() {
        let config = OpenApiConfig::default().openapi_version("2.0");
        assert!(matches!(config.dialect(), Err(OpenApiError::Config(_))));
    }

    #[test]
    fn test_env_overrides() {
        let config = OpenApiConfig::new("Before", "0.1.0").apply_env_from(
            "CARTOGRAPHER",
            [
                ("CARTOGRAPHER_TITLE", "After"),
                ("CARTOGRAPHER_DEFAULT_TAG", "misc"),
                ("CARTOGRAPHER_SERVERS", "https://a.example, https://b.example"),
                ("CARTOGRAPHER_UNKNOWN", "ignored"),
                ("OTHER_TITLE", "ignored"),
            ],
        );

        assert_eq!(config.title, "After");
        assert_eq!(config.version, "0.1.0");
        assert_eq!(config.default_tag.as_deref(), Some("misc"));
        let urls: Vec<_> = config.servers.iter().map(|s| s.url.as_str()).collect();
        assert_eq!(urls, vec!["https://a.example", "https://b.example"]);
    }
}
