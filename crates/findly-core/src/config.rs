use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{FindlyError, Result};
use crate::types::{Language, ProviderKind};

/// Top-level configuration for the Findly application.
///
/// Loaded from `~/.findly/config.toml` by default. Each section corresponds
/// to a bounded context or cross-cutting concern.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FindlyConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub dialog: DialogConfig,
    #[serde(default)]
    pub search: SearchConfig,
}

impl Default for FindlyConfig {
    fn default() -> Self {
        Self {
            general: GeneralConfig::default(),
            dialog: DialogConfig::default(),
            search: SearchConfig::default(),
        }
    }
}

impl FindlyConfig {
    /// Load configuration from a TOML file.
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: FindlyConfig = toml::from_str(&content)?;
        info!("Configuration loaded from {}", path.display());
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the
    /// file does not exist or cannot be parsed.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                warn!(
                    "Failed to load config from {}: {}. Using defaults.",
                    path.display(),
                    e
                );
                Self::default()
            }
        }
    }

    /// Save the current configuration to a TOML file.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        info!("Configuration saved to {}", path.display());
        Ok(())
    }

    /// Validate settings that would make the runtime path unusable.
    ///
    /// Missing paid-API credentials are fatal at startup rather than a
    /// runtime surprise on the first search.
    pub fn validate(&self) -> Result<()> {
        if self.dialog.languages().is_empty() {
            return Err(FindlyError::Config(
                "dialog.supported_languages resolves to an empty set".to_string(),
            ));
        }
        if self.search.max_results == 0 {
            return Err(FindlyError::Config(
                "search.max_results must be at least 1".to_string(),
            ));
        }
        if self.search.provider == ProviderKind::PaidApi {
            if self.search.paid.api_key.is_empty() {
                return Err(FindlyError::Config(
                    "search.paid.api_key is required for the paid-api provider".to_string(),
                ));
            }
            if self.search.paid.context_id.is_empty() {
                return Err(FindlyError::Config(
                    "search.paid.context_id is required for the paid-api provider".to_string(),
                ));
            }
        }
        Ok(())
    }
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Port the HTTP surface listens on.
    pub port: u16,
    /// Log level: trace, debug, info, warn, error.
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            port: 10000,
            log_level: "info".to_string(),
        }
    }
}

/// Conversation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DialogConfig {
    /// Language codes offered at the start of each cycle.
    /// Unknown codes are ignored with a warning.
    pub supported_languages: Vec<String>,
}

impl Default for DialogConfig {
    fn default() -> Self {
        Self {
            supported_languages: Language::ALL.iter().map(|l| l.code().to_string()).collect(),
        }
    }
}

impl DialogConfig {
    /// Resolve the configured codes into languages, dropping unknown codes.
    pub fn languages(&self) -> Vec<Language> {
        let mut langs = Vec::new();
        for code in &self.supported_languages {
            match Language::from_code(code) {
                Some(lang) => langs.push(lang),
                None => warn!(code = %code, "Ignoring unknown language code in config"),
            }
        }
        langs
    }
}

/// Search provider settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Which backend executes queries.
    pub provider: ProviderKind,
    /// Maximum number of results returned per search.
    pub max_results: usize,
    /// Whether the paid provider's "zero indexed matches" outcome renders
    /// distinct user-facing text instead of the plain not-found message.
    pub zero_total_hint: bool,
    /// Credentials for the paid provider. Required iff `provider = "paid-api"`.
    pub paid: PaidApiConfig,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            provider: ProviderKind::FreeText,
            max_results: 5,
            zero_total_hint: true,
            paid: PaidApiConfig::default(),
        }
    }
}

/// Paid search API credentials.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PaidApiConfig {
    /// API key for the paid search endpoint.
    pub api_key: String,
    /// Search-engine context identifier.
    pub context_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = FindlyConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.general.port, 10000);
        assert_eq!(config.search.max_results, 5);
        assert_eq!(config.search.provider, ProviderKind::FreeText);
    }

    #[test]
    fn test_config_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = FindlyConfig::default();
        config.general.port = 8080;
        config.search.provider = ProviderKind::Encyclopedia;
        config.save(&path).unwrap();

        let loaded = FindlyConfig::load(&path).unwrap();
        assert_eq!(loaded.general.port, 8080);
        assert_eq!(loaded.search.provider, ProviderKind::Encyclopedia);
    }

    #[test]
    fn test_load_or_default_on_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = FindlyConfig::load_or_default(&dir.path().join("nope.toml"));
        assert_eq!(config.general.port, 10000);
    }

    #[test]
    fn test_paid_provider_requires_credentials() {
        let mut config = FindlyConfig::default();
        config.search.provider = ProviderKind::PaidApi;
        assert!(config.validate().is_err());

        config.search.paid.api_key = "key".to_string();
        assert!(config.validate().is_err());

        config.search.paid.context_id = "ctx".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_unknown_language_codes_dropped() {
        let dialog = DialogConfig {
            supported_languages: vec!["uz".to_string(), "klingon".to_string()],
        };
        assert_eq!(dialog.languages(), vec![Language::Uz]);
    }

    #[test]
    fn test_empty_language_set_rejected() {
        let mut config = FindlyConfig::default();
        config.dialog.supported_languages = vec!["klingon".to_string()];
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_max_results_rejected() {
        let mut config = FindlyConfig::default();
        config.search.max_results = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_provider_kind_toml_spelling() {
        let toml_str = r#"
            [search]
            provider = "paid-api"
        "#;
        let config: FindlyConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.search.provider, ProviderKind::PaidApi);
    }
}
