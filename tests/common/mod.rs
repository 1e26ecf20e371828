#![allow(dead_code)]

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use supply_order_form::{
    configuration::InMemoryConfiguration,
    errors::ServiceError,
    models::{Address, Currency, SupplyOrder, SupplyOrderDetail, Warehouse},
    pdf::{
        image::FsImageProbe, CatalogTranslator, HandlebarsRenderer, PdfContext, PdfSettings,
        TemplateRenderer,
    },
    queries::TaxOrderSummaryRow,
    repositories::{EntityRepository, TaxSummarySource},
};

pub const ORDER_ID: i64 = 12;
pub const WAREHOUSE_ID: i64 = 3;
pub const WAREHOUSE_ADDRESS_ID: i64 = 9;
pub const SUPPLIER_ID: i64 = 4;
pub const SUPPLIER_ADDRESS_ID: i64 = 21;
pub const CURRENCY_ID: i64 = 1;

pub fn templates_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("templates/pdf")
}

pub fn translations_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("translations")
}

pub fn stamp() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 3, 9)
        .unwrap()
        .and_hms_opt(10, 30, 0)
        .unwrap()
}

pub fn supply_order(id: i64, reference: &str) -> SupplyOrder {
    SupplyOrder {
        id_supply_order: id,
        id_supplier: SUPPLIER_ID,
        supplier_name: "Fournitures SA".into(),
        id_lang: 1,
        id_warehouse: WAREHOUSE_ID,
        id_supply_order_state: 1,
        id_currency: CURRENCY_ID,
        id_ref_currency: CURRENCY_ID,
        reference: reference.into(),
        date_add: stamp(),
        date_upd: stamp(),
        date_delivery_expected: None,
        total_te: dec!(230.004),
        total_with_discount_te: dec!(230.004),
        total_tax: dec!(31.0008),
        total_ti: dec!(261.0048),
        discount_rate: dec!(0),
        discount_value_te: dec!(0),
        is_template: false,
    }
}

pub fn warehouse() -> Warehouse {
    Warehouse {
        id_warehouse: WAREHOUSE_ID,
        id_currency: CURRENCY_ID,
        id_address: WAREHOUSE_ADDRESS_ID,
        id_employee: 1,
        reference: Some("WH-PARIS".into()),
        name: "Entrepot Paris".into(),
        management_type: "WA".into(),
        deleted: false,
    }
}

pub fn address(id_address: i64, id_supplier: i64, city: &str) -> Address {
    Address {
        id_address,
        id_supplier,
        id_warehouse: 0,
        alias: "main".into(),
        company: Some("Acme".into()),
        lastname: "Durand".into(),
        firstname: "Paul".into(),
        address1: "1 rue de la Paix".into(),
        address2: None,
        postcode: Some("75002".into()),
        city: city.into(),
        state: None,
        country: "France".into(),
        phone: Some("01 02 03 04 05".into()),
        phone_mobile: None,
        vat_number: None,
        deleted: false,
    }
}

pub fn euro() -> Currency {
    Currency {
        id_currency: CURRENCY_ID,
        name: "Euro".into(),
        iso_code: "EUR".into(),
        sign: "€".into(),
        blank: true,
        format: 2,
        decimals: true,
        conversion_rate: dec!(1),
        deleted: false,
        active: true,
    }
}

/// Line of `quantity` units at `unit_price_te`, taxed at `tax_rate` percent.
pub fn detail(
    id: i64,
    id_supply_order: i64,
    unit_price_te: Decimal,
    quantity: i32,
    tax_rate: Decimal,
) -> SupplyOrderDetail {
    let price_te = unit_price_te * Decimal::from(quantity);
    let tax_value = price_te * tax_rate / dec!(100);
    SupplyOrderDetail {
        id_supply_order_detail: id,
        id_supply_order,
        id_currency: CURRENCY_ID,
        id_product: 100 + id,
        id_product_attribute: 0,
        reference: format!("P-{id}"),
        supplier_reference: format!("SUP-{id}"),
        name: format!("Product {id}"),
        ean13: None,
        upc: None,
        exchange_rate: dec!(1),
        unit_price_te,
        quantity_expected: quantity,
        quantity_received: 0,
        price_te,
        discount_rate: dec!(0),
        discount_value_te: dec!(0),
        price_with_discount_te: price_te,
        tax_rate,
        tax_value,
        price_ti: price_te + tax_value,
        tax_value_with_order_discount: tax_value,
        price_with_order_discount_te: price_te,
    }
}

/// Records kept in maps, answering lookups the way the database would.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    pub supply_orders: HashMap<i64, SupplyOrder>,
    pub warehouses: HashMap<i64, Warehouse>,
    pub addresses: HashMap<i64, Address>,
    pub currencies: HashMap<i64, Currency>,
    pub details: Vec<SupplyOrderDetail>,
}

impl InMemoryStore {
    /// One order with two lines at 10% and one at 20%.
    pub fn seeded() -> Self {
        let mut store = Self::default();
        store.insert_order(supply_order(ORDER_ID, "SO-0012"));
        store.warehouses.insert(WAREHOUSE_ID, warehouse());
        store.addresses.insert(
            WAREHOUSE_ADDRESS_ID,
            address(WAREHOUSE_ADDRESS_ID, 0, "Paris"),
        );
        store.addresses.insert(
            SUPPLIER_ADDRESS_ID,
            address(SUPPLIER_ADDRESS_ID, SUPPLIER_ID, "Lyon"),
        );
        store.currencies.insert(CURRENCY_ID, euro());
        store.details = vec![
            detail(1, ORDER_ID, dec!(10.0004), 5, dec!(10)),
            detail(2, ORDER_ID, dec!(3.335), 30, dec!(10)),
            detail(3, ORDER_ID, dec!(40), 2, dec!(20)),
        ];
        store
    }

    pub fn insert_order(&mut self, order: SupplyOrder) {
        self.supply_orders.insert(order.id_supply_order, order);
    }
}

#[async_trait]
impl EntityRepository for InMemoryStore {
    async fn find_supply_order(&self, id: i64) -> Result<SupplyOrder, ServiceError> {
        self.supply_orders
            .get(&id)
            .cloned()
            .ok_or_else(|| ServiceError::not_found("Supply order", id))
    }

    async fn find_warehouse(&self, id: i64) -> Result<Warehouse, ServiceError> {
        self.warehouses
            .get(&id)
            .cloned()
            .ok_or_else(|| ServiceError::not_found("Warehouse", id))
    }

    async fn find_address(&self, id: i64) -> Result<Address, ServiceError> {
        self.addresses
            .get(&id)
            .cloned()
            .ok_or_else(|| ServiceError::not_found("Address", id))
    }

    async fn find_currency(&self, id: i64) -> Result<Currency, ServiceError> {
        self.currencies
            .get(&id)
            .cloned()
            .ok_or_else(|| ServiceError::not_found("Currency", id))
    }

    async fn find_address_id_by_supplier(&self, id_supplier: i64) -> Result<i64, ServiceError> {
        self.addresses
            .values()
            .filter(|a| a.id_supplier == id_supplier && !a.deleted)
            .map(|a| a.id_address)
            .min()
            .ok_or_else(|| ServiceError::not_found("Supplier address", id_supplier))
    }

    async fn find_supply_order_details(
        &self,
        id_supply_order: i64,
        _id_lang: i64,
    ) -> Result<Vec<SupplyOrderDetail>, ServiceError> {
        Ok(self
            .details
            .iter()
            .filter(|d| d.id_supply_order == id_supply_order)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl TaxSummarySource for InMemoryStore {
    async fn tax_order_summary(
        &self,
        id_supply_order: i64,
    ) -> Result<Vec<TaxOrderSummaryRow>, ServiceError> {
        let mut groups: BTreeMap<Decimal, (Decimal, Decimal)> = BTreeMap::new();
        for d in self
            .details
            .iter()
            .filter(|d| d.id_supply_order == id_supply_order)
        {
            let entry = groups.entry(d.tax_rate).or_default();
            entry.0 += d.price_with_order_discount_te;
            entry.1 += d.tax_value_with_order_discount;
        }
        Ok(groups
            .into_iter()
            .map(|(tax_rate, (base_te, total_tax_value))| TaxOrderSummaryRow {
                base_te,
                tax_rate,
                total_tax_value,
            })
            .collect())
    }
}

pub fn settings(img_dir: &Path) -> PdfSettings {
    PdfSettings {
        img_dir: img_dir.to_path_buf(),
        shop_domain: "shop.example".into(),
        date_format: "%d/%m/%Y".into(),
        ..PdfSettings::default()
    }
}

pub fn context_with(
    store: InMemoryStore,
    configuration: InMemoryConfiguration,
    renderer: Arc<dyn TemplateRenderer>,
    locale: &str,
    img_dir: &Path,
) -> Arc<PdfContext> {
    context_over(Arc::new(store), configuration, renderer, locale, img_dir)
}

/// Context reading records and tax summaries from `store`.
pub fn context_over<S>(
    store: Arc<S>,
    configuration: InMemoryConfiguration,
    renderer: Arc<dyn TemplateRenderer>,
    locale: &str,
    img_dir: &Path,
) -> Arc<PdfContext>
where
    S: EntityRepository + TaxSummarySource + 'static,
{
    let translator = CatalogTranslator::load(&translations_dir(), locale).unwrap();
    Arc::new(PdfContext::new(
        settings(img_dir),
        store.clone(),
        store,
        Arc::new(configuration),
        renderer,
        Arc::new(translator),
        Arc::new(FsImageProbe),
    ))
}

/// Context rendering with the shipped templates in English.
pub fn context(
    store: InMemoryStore,
    configuration: InMemoryConfiguration,
    img_dir: &Path,
) -> Arc<PdfContext> {
    let renderer = HandlebarsRenderer::from_dirs(&templates_dir(), None).unwrap();
    context_with(store, configuration, Arc::new(renderer), "en", img_dir)
}

/// GIF header declaring `width` x `height` pixels.
pub fn gif_bytes(width: u16, height: u16) -> Vec<u8> {
    let mut bytes = b"GIF89a".to_vec();
    bytes.extend_from_slice(&width.to_le_bytes());
    bytes.extend_from_slice(&height.to_le_bytes());
    bytes.resize(32, 0);
    bytes
}
