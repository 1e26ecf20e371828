use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::collections::HashMap;
use std::env;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{error, info};
use validator::{Validate, ValidationError, ValidationErrors};

/// Default values for configuration
const DEFAULT_LOG_LEVEL: &str = "info";
const DEFAULT_ENV: &str = "development";
const CONFIG_DIR: &str = "config";
const DEFAULT_TEMPLATE_DIR: &str = "templates/pdf";
const DEFAULT_TRANSLATIONS_DIR: &str = "translations";
const DEFAULT_LOCALE: &str = "en";
const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d";
const DEFAULT_IMG_DIR: &str = "img";
const DEFAULT_IMG_BASE_URI: &str = "/img/";
const DEFAULT_SHOP_DOMAIN: &str = "localhost";
const DEFAULT_OUTPUT_DIR: &str = "out";

/// Document rendering configuration
#[derive(Clone, Debug, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct PdfConfig {
    /// Directory holding the bundled `*.hbs` templates
    #[serde(default = "default_template_dir")]
    #[validate(length(min = 1))]
    pub template_dir: String,

    /// Optional theme directory whose templates override bundled ones by name
    #[serde(default)]
    pub theme_template_dir: Option<String>,

    /// Directory holding `<locale>.json` translation catalogs
    #[serde(default = "default_translations_dir")]
    pub translations_dir: String,

    /// Locale used for translated labels
    #[serde(default = "default_locale")]
    #[validate(length(min = 2, max = 8))]
    pub locale: String,

    /// chrono format string used to display dates
    #[serde(default = "default_date_format")]
    #[validate(length(min = 1))]
    pub date_format: String,

    /// Filesystem directory where shop images (logos) live
    #[serde(default = "default_img_dir")]
    pub img_dir: String,

    /// Public URI prefix of the image directory
    #[serde(default = "default_img_base_uri")]
    pub img_base_uri: String,

    /// Shop domain used to build absolute image URLs
    #[serde(default = "default_shop_domain")]
    pub shop_domain: String,

    /// Dedicated media server, preferred over the shop domain when set
    #[serde(default)]
    pub media_server: Option<String>,

    /// Shop whose configuration values are used
    #[serde(default = "default_shop_id")]
    #[validate(range(min = 1))]
    pub shop_id: i64,

    /// Language id attached to the render context
    #[serde(default = "default_lang_id")]
    #[validate(range(min = 1))]
    pub lang_id: i64,

    /// Where rendered documents are written
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
}

impl Default for PdfConfig {
    fn default() -> Self {
        Self {
            template_dir: default_template_dir(),
            theme_template_dir: None,
            translations_dir: default_translations_dir(),
            locale: default_locale(),
            date_format: default_date_format(),
            img_dir: default_img_dir(),
            img_base_uri: default_img_base_uri(),
            shop_domain: default_shop_domain(),
            media_server: None,
            shop_id: default_shop_id(),
            lang_id: default_lang_id(),
            output_dir: default_output_dir(),
        }
    }
}

impl PdfConfig {
    pub fn template_dir(&self) -> PathBuf {
        PathBuf::from(&self.template_dir)
    }

    pub fn theme_template_dir(&self) -> Option<PathBuf> {
        self.theme_template_dir.as_ref().map(PathBuf::from)
    }

    pub fn img_dir(&self) -> PathBuf {
        PathBuf::from(&self.img_dir)
    }
}

/// Application configuration structure with validation
#[derive(Clone, Debug, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    /// Database connection URL
    #[validate(length(min = 1))]
    pub database_url: String,

    /// Application environment
    pub environment: String,

    /// Logging level
    #[serde(default = "default_log_level")]
    #[validate(custom = "validate_log_level")]
    pub log_level: String,

    /// Log in JSON format (structured logging)
    #[serde(default)]
    pub log_json: bool,

    /// Whether to run database migrations on startup
    #[serde(default)]
    pub auto_migrate: bool,

    /// DB pool: max connections
    #[serde(default = "default_db_max_connections")]
    #[validate(range(min = 1, max = 512))]
    pub db_max_connections: u32,

    /// DB pool: min connections
    #[serde(default = "default_db_min_connections")]
    pub db_min_connections: u32,

    /// DB timeouts (seconds)
    #[serde(default = "default_db_connect_timeout_secs")]
    pub db_connect_timeout_secs: u64,
    #[serde(default = "default_db_idle_timeout_secs")]
    pub db_idle_timeout_secs: u64,
    #[serde(default = "default_db_acquire_timeout_secs")]
    pub db_acquire_timeout_secs: u64,

    /// Document rendering settings
    #[serde(default)]
    #[validate]
    pub pdf: PdfConfig,

    /// Static shop configuration values (`PS_SHOP_NAME = "..."`), used when the
    /// `configuration` table is not consulted
    #[serde(default)]
    pub shop: HashMap<String, String>,
}

impl AppConfig {
    /// Gets database URL reference
    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    /// Creates a new configuration
    pub fn new(database_url: String, environment: String) -> Self {
        Self {
            database_url,
            environment,
            log_level: default_log_level(),
            log_json: false,
            auto_migrate: false,
            db_max_connections: default_db_max_connections(),
            db_min_connections: default_db_min_connections(),
            db_connect_timeout_secs: default_db_connect_timeout_secs(),
            db_idle_timeout_secs: default_db_idle_timeout_secs(),
            db_acquire_timeout_secs: default_db_acquire_timeout_secs(),
            pdf: PdfConfig::default(),
            shop: HashMap::new(),
        }
    }

    /// Gets log level reference
    pub fn log_level(&self) -> &str {
        &self.log_level
    }

    fn validate_additional_constraints(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if self.db_min_connections > self.db_max_connections {
            let mut err = ValidationError::new("db_min_connections");
            err.message = Some("db_min_connections must not exceed db_max_connections".into());
            errors.add("db_min_connections", err);
        }

        if chrono::format::StrftimeItems::new(&self.pdf.date_format)
            .any(|item| matches!(item, chrono::format::Item::Error))
        {
            let mut err = ValidationError::new("date_format");
            err.message = Some("pdf.date_format is not a valid strftime pattern".into());
            errors.add("date_format", err);
        }

        if errors.errors().is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum AppConfigError {
    #[error("Configuration loading failed: {0}")]
    Load(#[from] ConfigError),

    #[error("Configuration validation failed: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Default value functions
fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}

fn default_db_max_connections() -> u32 {
    8
}
fn default_db_min_connections() -> u32 {
    1
}
fn default_db_connect_timeout_secs() -> u64 {
    30
}
fn default_db_idle_timeout_secs() -> u64 {
    600
}
fn default_db_acquire_timeout_secs() -> u64 {
    8
}

fn default_template_dir() -> String {
    DEFAULT_TEMPLATE_DIR.to_string()
}
fn default_translations_dir() -> String {
    DEFAULT_TRANSLATIONS_DIR.to_string()
}
fn default_locale() -> String {
    DEFAULT_LOCALE.to_string()
}
fn default_date_format() -> String {
    DEFAULT_DATE_FORMAT.to_string()
}
fn default_img_dir() -> String {
    DEFAULT_IMG_DIR.to_string()
}
fn default_img_base_uri() -> String {
    DEFAULT_IMG_BASE_URI.to_string()
}
fn default_shop_domain() -> String {
    DEFAULT_SHOP_DOMAIN.to_string()
}
fn default_shop_id() -> i64 {
    1
}
fn default_lang_id() -> i64 {
    1
}
fn default_output_dir() -> String {
    DEFAULT_OUTPUT_DIR.to_string()
}

/// Validates log level values
fn validate_log_level(level: &str) -> Result<(), ValidationError> {
    let valid_levels = ["trace", "debug", "info", "warn", "error"];
    if valid_levels.contains(&level.to_lowercase().as_str()) {
        Ok(())
    } else {
        let mut err = ValidationError::new("log_level");
        err.message = Some("Must be one of: trace, debug, info, warn, error".into());
        Err(err)
    }
}

/// Initializes tracing using the provided log level as the default filter
pub fn init_tracing(level: &str, json: bool) {
    use tracing_subscriber::fmt;

    let default_directive = format!("supply_order_form={},sea_orm=warn", level);
    let filter_directive = env::var("RUST_LOG")
        .ok()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or(default_directive);

    if json {
        let _ = fmt().with_env_filter(filter_directive).json().try_init();
    } else {
        let _ = fmt().with_env_filter(filter_directive).try_init();
    }
}

/// Loads application configuration
///
/// Layers configuration sources in this order:
/// 1. Default config (config/default.toml)
/// 2. Environment-specific config (config/{env}.toml)
/// 3. Environment variables (APP__*)
pub fn load_config() -> Result<AppConfig, AppConfigError> {
    load_config_from(Path::new(CONFIG_DIR))
}

/// Same as [`load_config`] with an explicit config directory.
pub fn load_config_from(config_dir: &Path) -> Result<AppConfig, AppConfigError> {
    // Support both RUN_ENV and APP_ENV for selecting config profile
    let run_env = env::var("RUN_ENV")
        .or_else(|_| env::var("APP_ENV"))
        .unwrap_or_else(|_| DEFAULT_ENV.to_string());
    info!("Loading configuration for environment: {}", run_env);

    if !config_dir.exists() {
        info!(
            "Config directory '{}' not found; relying on built-in defaults and environment variables",
            config_dir.display()
        );
    }

    let config = Config::builder()
        .set_default("database_url", "sqlite://supply_orders.db?mode=rwc")?
        .set_default("environment", DEFAULT_ENV)?
        .set_default("log_level", DEFAULT_LOG_LEVEL)?
        .set_default("log_json", false)?
        .add_source(File::with_name(&format!("{}/default", config_dir.display())).required(false))
        .add_source(
            File::with_name(&format!("{}/{}", config_dir.display(), run_env)).required(false),
        )
        .add_source(Environment::with_prefix("APP").separator("__"))
        .build()?;

    let app_config: AppConfig = config.try_deserialize()?;

    app_config.validate().map_err(|e| {
        error!("Configuration validation failed: {:?}", e);
        AppConfigError::Validation(e)
    })?;

    app_config.validate_additional_constraints().map_err(|e| {
        error!("Configuration validation failed: {:?}", e);
        AppConfigError::Validation(e)
    })?;

    info!("Configuration loaded successfully");
    Ok(app_config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn base_config() -> AppConfig {
        AppConfig::new("sqlite::memory:".into(), "test".into())
    }

    #[test]
    fn defaults_pass_validation() {
        let cfg = base_config();
        assert!(cfg.validate().is_ok());
        assert!(cfg.validate_additional_constraints().is_ok());
        assert_eq!(cfg.pdf.template_dir(), PathBuf::from("templates/pdf"));
        assert_eq!(cfg.pdf.img_base_uri, "/img/");
    }

    #[test]
    fn invalid_log_level_is_rejected() {
        let mut cfg = base_config();
        cfg.log_level = "verbose".into();
        let errors = cfg.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("log_level"));
    }

    #[test]
    fn min_connections_above_max_is_rejected() {
        let mut cfg = base_config();
        cfg.db_min_connections = 10;
        cfg.db_max_connections = 2;
        assert!(cfg.validate_additional_constraints().is_err());
    }

    #[test]
    fn broken_date_format_is_rejected() {
        let mut cfg = base_config();
        cfg.pdf.date_format = "%Q".into();
        assert!(cfg.validate_additional_constraints().is_err());
    }

    #[test]
    fn loads_pdf_and_shop_sections_from_file() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("default.toml"),
            r#"
                database_url = "postgres://localhost/shop"
                environment = "development"

                [pdf]
                template_dir = "/srv/pdf"
                locale = "fr"
                shop_id = 2

                [shop]
                ps_shop_name = "Acme Supplies"
            "#,
        )
        .unwrap();

        let cfg = load_config_from(dir.path()).unwrap();
        assert_eq!(cfg.database_url(), "postgres://localhost/shop");
        assert_eq!(cfg.pdf.template_dir, "/srv/pdf");
        assert_eq!(cfg.pdf.locale, "fr");
        assert_eq!(cfg.pdf.shop_id, 2);
        assert_eq!(cfg.pdf.date_format, DEFAULT_DATE_FORMAT);
        assert_eq!(
            cfg.shop.get("ps_shop_name").map(String::as_str),
            Some("Acme Supplies")
        );
    }
}
