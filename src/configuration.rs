//! Shop configuration values consumed by the document renderers.
//!
//! Values are looked up through [`ShopConfiguration`] with an enumerated
//! [`ConfigKey`] instead of free-form strings. Two providers exist: an
//! in-memory map (seeded from `AppConfig::shop` or built in tests) and a
//! snapshot of the `configuration` table for one shop.

use std::collections::HashMap;
use std::str::FromStr;

use sea_orm::{ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};
use strum::{AsRefStr, Display, EnumIter, EnumString, IntoEnumIterator};
use tracing::{debug, instrument, warn};

use crate::errors::ServiceError;
use crate::models::configuration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr, Display, EnumString, EnumIter)]
#[strum(ascii_case_insensitive)]
pub enum ConfigKey {
    #[strum(serialize = "PS_SHOP_NAME")]
    ShopName,
    #[strum(serialize = "PS_LOGO")]
    Logo,
    #[strum(serialize = "PS_LOGO_INVOICE")]
    LogoInvoice,
    #[strum(serialize = "PS_IMG_UPDATE_TIME")]
    ImgUpdateTime,
    #[strum(serialize = "PS_SHOP_FAX")]
    ShopFax,
    #[strum(serialize = "PS_SHOP_PHONE")]
    ShopPhone,
    #[strum(serialize = "PS_SHOP_DETAILS")]
    ShopDetails,
    #[strum(serialize = "PS_PRICE_ROUND_MODE")]
    PriceRoundMode,
}

impl ConfigKey {
    pub fn name(&self) -> &str {
        self.as_ref()
    }
}

/// Read access to shop configuration.
pub trait ShopConfiguration: Send + Sync {
    fn get(&self, key: ConfigKey) -> Option<String>;

    /// Value treated as unset when missing or blank.
    fn get_non_empty(&self, key: ConfigKey) -> Option<String> {
        self.get(key).filter(|value| !value.trim().is_empty())
    }
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryConfiguration {
    values: HashMap<ConfigKey, String>,
}

impl InMemoryConfiguration {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: ConfigKey, value: impl Into<String>) -> Self {
        self.values.insert(key, value.into());
        self
    }

    pub fn set(&mut self, key: ConfigKey, value: impl Into<String>) {
        self.values.insert(key, value.into());
    }

    /// Builds the provider from raw `NAME = value` pairs, ignoring unknown names.
    pub fn from_map(raw: &HashMap<String, String>) -> Self {
        let mut values = HashMap::new();
        for (name, value) in raw {
            match ConfigKey::from_str(name) {
                Ok(key) => {
                    values.insert(key, value.clone());
                }
                Err(_) => warn!(name = %name, "ignoring unknown shop configuration key"),
            }
        }
        Self { values }
    }
}

impl ShopConfiguration for InMemoryConfiguration {
    fn get(&self, key: ConfigKey) -> Option<String> {
        self.values.get(&key).cloned()
    }
}

/// Snapshot of the `configuration` table for one shop.
///
/// Rows scoped to the shop take precedence over global rows (`id_shop IS NULL`).
#[derive(Debug, Clone)]
pub struct TableConfiguration {
    id_shop: i64,
    values: HashMap<ConfigKey, String>,
}

impl TableConfiguration {
    #[instrument(skip(db))]
    pub async fn load(db: &DatabaseConnection, id_shop: i64) -> Result<Self, ServiceError> {
        let names: Vec<String> = ConfigKey::iter().map(|key| key.name().to_string()).collect();

        let rows = configuration::Entity::find()
            .filter(configuration::Column::Name.is_in(names))
            .filter(
                Condition::any()
                    .add(configuration::Column::IdShop.is_null())
                    .add(configuration::Column::IdShop.eq(id_shop)),
            )
            .order_by_asc(configuration::Column::IdConfiguration)
            .all(db)
            .await
            .map_err(ServiceError::db_error)?;

        let config = Self::from_rows(id_shop, rows);
        debug!(id_shop, keys = config.values.len(), "loaded shop configuration");
        Ok(config)
    }

    pub fn from_rows(id_shop: i64, rows: Vec<configuration::Model>) -> Self {
        let mut global = HashMap::new();
        let mut scoped = HashMap::new();

        for row in rows {
            let Ok(key) = ConfigKey::from_str(&row.name) else {
                continue;
            };
            let Some(value) = row.value else {
                continue;
            };
            match row.id_shop {
                Some(shop) if shop == id_shop => {
                    scoped.insert(key, value);
                }
                Some(_) => {}
                None => {
                    global.insert(key, value);
                }
            }
        }

        global.extend(scoped);
        Self {
            id_shop,
            values: global,
        }
    }

    pub fn id_shop(&self) -> i64 {
        self.id_shop
    }
}

impl ShopConfiguration for TableConfiguration {
    fn get(&self, key: ConfigKey) -> Option<String> {
        self.values.get(&key).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn row(id: i64, id_shop: Option<i64>, name: &str, value: &str) -> configuration::Model {
        let stamp = NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        configuration::Model {
            id_configuration: id,
            id_shop,
            name: name.to_string(),
            value: Some(value.to_string()),
            date_add: stamp,
            date_upd: stamp,
        }
    }

    #[test]
    fn keys_round_trip_through_names() {
        assert_eq!(ConfigKey::LogoInvoice.name(), "PS_LOGO_INVOICE");
        assert_eq!(ConfigKey::from_str("ps_shop_fax").unwrap(), ConfigKey::ShopFax);
        assert!(ConfigKey::from_str("PS_UNKNOWN").is_err());
    }

    #[test]
    fn in_memory_from_map_ignores_unknown_keys() {
        let mut raw = HashMap::new();
        raw.insert("ps_shop_name".to_string(), "Acme".to_string());
        raw.insert("something_else".to_string(), "x".to_string());

        let config = InMemoryConfiguration::from_map(&raw);
        assert_eq!(config.get(ConfigKey::ShopName).as_deref(), Some("Acme"));
        assert_eq!(config.get(ConfigKey::ShopPhone), None);
    }

    #[test]
    fn blank_values_are_unset() {
        let config = InMemoryConfiguration::new().with(ConfigKey::Logo, "   ");
        assert_eq!(config.get(ConfigKey::Logo).as_deref(), Some("   "));
        assert_eq!(config.get_non_empty(ConfigKey::Logo), None);
    }

    #[test]
    fn shop_rows_override_global_rows() {
        let config = TableConfiguration::from_rows(
            2,
            vec![
                row(1, None, "PS_SHOP_NAME", "Global shop"),
                row(2, Some(2), "PS_SHOP_NAME", "Second shop"),
                row(3, Some(3), "PS_SHOP_PHONE", "other shop phone"),
                row(4, None, "PS_SHOP_FAX", "01 02 03"),
            ],
        );

        assert_eq!(config.get(ConfigKey::ShopName).as_deref(), Some("Second shop"));
        assert_eq!(config.get(ConfigKey::ShopFax).as_deref(), Some("01 02 03"));
        assert_eq!(config.get(ConfigKey::ShopPhone), None);
    }

    #[tokio::test]
    async fn load_reads_configuration_table() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![
                row(1, None, "PS_LOGO", "logo.jpg"),
                row(2, Some(1), "PS_LOGO_INVOICE", "logo_invoice.jpg"),
            ]])
            .into_connection();

        let config = TableConfiguration::load(&db, 1).await.unwrap();
        assert_eq!(config.id_shop(), 1);
        assert_eq!(config.get(ConfigKey::Logo).as_deref(), Some("logo.jpg"));
        assert_eq!(
            config.get(ConfigKey::LogoInvoice).as_deref(),
            Some("logo_invoice.jpg")
        );
    }
}
