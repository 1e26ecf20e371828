//! Everything a document renderer needs besides the document itself.

use std::path::PathBuf;
use std::sync::Arc;

use sea_orm::DatabaseConnection;
use tracing::instrument;

use super::image::{FsImageProbe, ImageProbe};
use super::rounding::RoundMode;
use super::template::{HandlebarsRenderer, TemplateRenderer};
use super::translator::{CatalogTranslator, Translator};
use crate::config::PdfConfig;
use crate::configuration::{ConfigKey, ShopConfiguration};
use crate::errors::ServiceError;
use crate::repositories::{EntityRepository, SupplyOrderRepository, TaxSummarySource};

/// Shop and language settings of a render.
#[derive(Debug, Clone, PartialEq)]
pub struct PdfSettings {
    pub shop_id: i64,
    pub lang_id: i64,
    pub locale: String,
    /// strftime pattern for printed dates
    pub date_format: String,
    /// Filesystem directory holding shop images such as logos
    pub img_dir: PathBuf,
    pub img_base_uri: String,
    pub shop_domain: String,
    pub media_server: Option<String>,
}

impl Default for PdfSettings {
    fn default() -> Self {
        Self::from(&PdfConfig::default())
    }
}

impl From<&PdfConfig> for PdfSettings {
    fn from(cfg: &PdfConfig) -> Self {
        Self {
            shop_id: cfg.shop_id,
            lang_id: cfg.lang_id,
            locale: cfg.locale.clone(),
            date_format: cfg.date_format.clone(),
            img_dir: cfg.img_dir(),
            img_base_uri: cfg.img_base_uri.clone(),
            shop_domain: cfg.shop_domain.clone(),
            media_server: cfg.media_server.clone().filter(|s| !s.trim().is_empty()),
        }
    }
}

/// Settings plus the collaborators used while rendering.
#[derive(Clone)]
pub struct PdfContext {
    pub settings: PdfSettings,
    pub round_mode: RoundMode,
    pub repository: Arc<dyn EntityRepository>,
    pub tax_summary: Arc<dyn TaxSummarySource>,
    pub configuration: Arc<dyn ShopConfiguration>,
    pub renderer: Arc<dyn TemplateRenderer>,
    pub translator: Arc<dyn Translator>,
    pub image_probe: Arc<dyn ImageProbe>,
}

impl std::fmt::Debug for PdfContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PdfContext")
            .field("settings", &self.settings)
            .field("round_mode", &self.round_mode)
            .finish_non_exhaustive()
    }
}

impl PdfContext {
    /// The round mode is taken from the shop configuration.
    pub fn new(
        settings: PdfSettings,
        repository: Arc<dyn EntityRepository>,
        tax_summary: Arc<dyn TaxSummarySource>,
        configuration: Arc<dyn ShopConfiguration>,
        renderer: Arc<dyn TemplateRenderer>,
        translator: Arc<dyn Translator>,
        image_probe: Arc<dyn ImageProbe>,
    ) -> Self {
        let round_mode = RoundMode::from_configuration(configuration.as_ref());
        Self {
            settings,
            round_mode,
            repository,
            tax_summary,
            configuration,
            renderer,
            translator,
            image_probe,
        }
    }

    /// Wires the database repository, the template and translation
    /// directories and the filesystem image probe from configuration.
    #[instrument(skip(db, configuration))]
    pub fn from_config(
        cfg: &PdfConfig,
        db: Arc<DatabaseConnection>,
        configuration: Arc<dyn ShopConfiguration>,
    ) -> Result<Self, ServiceError> {
        let theme_dir = cfg.theme_template_dir();
        let renderer = HandlebarsRenderer::from_dirs(&cfg.template_dir(), theme_dir.as_deref())?;
        let translator = CatalogTranslator::load(&PathBuf::from(&cfg.translations_dir), &cfg.locale)?;
        let repository = Arc::new(SupplyOrderRepository::new(db));

        Ok(Self::new(
            PdfSettings::from(cfg),
            repository.clone(),
            repository,
            configuration,
            Arc::new(renderer),
            Arc::new(translator),
            Arc::new(FsImageProbe),
        ))
    }

    pub fn translate(&self, key: &str) -> String {
        self.translator.translate(key)
    }

    /// Configuration value, empty when unset.
    pub fn config_value(&self, key: ConfigKey) -> String {
        self.configuration.get(key).unwrap_or_default()
    }

    /// Public URL prefix of shop images.
    pub fn img_ps_dir(&self) -> String {
        let host = self
            .settings
            .media_server
            .as_deref()
            .unwrap_or(&self.settings.shop_domain);
        format!("http://{}{}", host, self.settings.img_base_uri)
    }
}
