//! Application configuration management.

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Currency dictionary configuration.
    #[serde(default)]
    pub currencies: CurrenciesConfig,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// `tracing_subscriber::EnvFilter` directives, used when `RUST_LOG` is unset.
    #[serde(default = "default_log_filter")]
    pub filter: String,
    /// Emit JSON lines instead of human-readable output.
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
            json: false,
        }
    }
}

fn default_log_filter() -> String {
    "agora=info".to_string()
}

/// Currency dictionary configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct CurrenciesConfig {
    /// Seed the dictionary with the built-in definitions.
    #[serde(default = "default_include_well_known")]
    pub include_well_known: bool,
    /// Divisibility assumed for codes the dictionary does not know when
    /// reading legacy prices.
    #[serde(default = "default_divisibility")]
    pub default_divisibility: u32,
    /// Extra definitions; these replace built-in ones with the same code.
    #[serde(default)]
    pub definitions: Vec<CurrencyDefinitionConfig>,
}

impl Default for CurrenciesConfig {
    fn default() -> Self {
        Self {
            include_well_known: default_include_well_known(),
            default_divisibility: default_divisibility(),
            definitions: Vec::new(),
        }
    }
}

fn default_include_well_known() -> bool {
    true
}

fn default_divisibility() -> u32 {
    2 // cents
}

/// A configured currency definition.
#[derive(Debug, Clone, Deserialize)]
pub struct CurrencyDefinitionConfig {
    /// Currency code, case-insensitive.
    pub code: String,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Decimal places between the smallest unit and one display unit.
    pub divisibility: u32,
    /// `"fiat"` or `"crypto"`.
    #[serde(default)]
    pub currency_type: Option<String>,
}

impl AppConfig {
    /// Loads configuration from config files and the environment.
    ///
    /// Sources, later ones winning: `config/default`, `config/{RUN_MODE}`,
    /// then `AGORA__*` environment variables (e.g. `AGORA__LOGGING__JSON=true`).
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("AGORA").separator("__"))
            .build()?;

        config.try_deserialize()
    }

    /// Parses configuration from an inline TOML document.
    ///
    /// # Errors
    ///
    /// Returns an error if the document is malformed or has the wrong shape.
    pub fn from_toml_str(toml: &str) -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()?
            .try_deserialize()
    }
}
