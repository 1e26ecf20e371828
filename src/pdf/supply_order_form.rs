//! Printable form of a supply order sent to a supplier.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, instrument};

use super::context::PdfContext;
use super::html_template::{
    assign_common_header_data, display_date, format_shop_address, HtmlTemplate,
};
use super::rounding::{round_supply_order, round_supply_order_details, round_tax_order_summary};
use super::template::TemplateContext;
use crate::configuration::ConfigKey;
use crate::errors::ServiceError;
use crate::models::{Address, SupplyOrder, SupplyOrderDetail, Warehouse};
use crate::queries::TaxOrderSummaryRow;

pub const HEADER_TEMPLATE: &str = "supply-order-header";
pub const CONTENT_TEMPLATE: &str = "supply-order";
pub const FOOTER_TEMPLATE: &str = "supply-order-footer";

/// Sections rendered before the content template, bound under their key.
pub const CONTENT_SECTIONS: [(&str, &str); 5] = [
    ("style_tab", "invoice.style-tab"),
    ("addresses_tab", "supply-order.addresses-tab"),
    ("product_tab", "supply-order.product-tab"),
    ("tax_tab", "supply-order.tax-tab"),
    ("total_tab", "supply-order.total-tab"),
];

pub const BULK_FILENAME: &str = "supply_order.pdf";

const TITLE_KEY: &str = "Supply order form";
const FILENAME_KEY: &str = "SupplyOrderForm";
const FREE_TEXT_KEYS: [&str; 2] = ["TE: Tax excluded", "TI: Tax included"];

pub struct SupplyOrderForm {
    context: Arc<PdfContext>,
    supply_order: SupplyOrder,
    warehouse: Warehouse,
    address_warehouse: Address,
    address_supplier: Address,
    title: String,
    date: String,
}

impl std::fmt::Debug for SupplyOrderForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SupplyOrderForm")
            .field("supply_order", &self.supply_order.id_supply_order)
            .field("reference", &self.supply_order.reference)
            .field("warehouse", &self.warehouse.id_warehouse)
            .finish_non_exhaustive()
    }
}

impl SupplyOrderForm {
    /// Resolves the warehouse, its address and the supplier's address.
    ///
    /// Fails with [`ServiceError::NotFound`] when any of them is missing.
    #[instrument(skip_all, fields(id_supply_order = supply_order.id_supply_order))]
    pub async fn new(supply_order: SupplyOrder, context: Arc<PdfContext>) -> Result<Self, ServiceError> {
        let repository = &context.repository;

        let warehouse = repository.find_warehouse(supply_order.id_warehouse).await?;
        let address_warehouse = repository.find_address(warehouse.id_address).await?;
        let id_address_supplier = repository
            .find_address_id_by_supplier(supply_order.id_supplier)
            .await?;
        let address_supplier = repository.find_address(id_address_supplier).await?;

        let date = display_date(&supply_order.date_add, &context.settings.date_format);
        let title = context.translate(TITLE_KEY);

        Ok(Self {
            context,
            supply_order,
            warehouse,
            address_warehouse,
            address_supplier,
            title,
            date,
        })
    }

    /// Loads the order by id, then builds the form.
    pub async fn load(id_supply_order: i64, context: Arc<PdfContext>) -> Result<Self, ServiceError> {
        let supply_order = context.repository.find_supply_order(id_supply_order).await?;
        Self::new(supply_order, context).await
    }

    /// The order as currently held; rounded once content was rendered.
    pub fn supply_order(&self) -> &SupplyOrder {
        &self.supply_order
    }

    pub fn warehouse(&self) -> &Warehouse {
        &self.warehouse
    }

    pub fn address_warehouse(&self) -> &Address {
        &self.address_warehouse
    }

    pub fn address_supplier(&self) -> &Address {
        &self.address_supplier
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn date(&self) -> &str {
        &self.date
    }

    /// Per tax rate totals of the order's lines, rounded.
    #[instrument(skip(self), fields(id_supply_order = self.supply_order.id_supply_order))]
    pub async fn get_tax_order_summary(&self) -> Result<Vec<TaxOrderSummaryRow>, ServiceError> {
        let mut rows = self
            .context
            .tax_summary
            .tax_order_summary(self.supply_order.id_supply_order)
            .await?;
        round_tax_order_summary(&mut rows, self.context.round_mode);
        Ok(rows)
    }

    pub fn round_supply_order_details(&self, details: &mut [SupplyOrderDetail]) {
        round_supply_order_details(details, self.context.round_mode);
    }

    pub fn round_supply_order(&self, supply_order: &mut SupplyOrder) {
        round_supply_order(supply_order, self.context.round_mode);
    }
}

#[async_trait]
impl HtmlTemplate for SupplyOrderForm {
    fn get_header(&self) -> Result<String, ServiceError> {
        let mut data = TemplateContext::new();
        assign_common_header_data(
            &self.context,
            &mut data,
            &self.title,
            &self.supply_order.reference,
            &self.date,
        )?;
        self.context.renderer.render(HEADER_TEMPLATE, &data)
    }

    /// Renders the body.
    ///
    /// Rounds the held order and the fetched lines in place before binding
    /// them; the original precision is not kept.
    #[instrument(skip(self), fields(id_supply_order = self.supply_order.id_supply_order))]
    async fn get_content(&mut self) -> Result<String, ServiceError> {
        let repository = Arc::clone(&self.context.repository);
        let round_mode = self.context.round_mode;

        let mut details = repository
            .find_supply_order_details(self.supply_order.id_supply_order, self.supply_order.id_lang)
            .await?;
        round_supply_order_details(&mut details, round_mode);
        round_supply_order(&mut self.supply_order, round_mode);

        let tax_order_summary = self.get_tax_order_summary().await?;
        let currency = repository.find_currency(self.supply_order.id_currency).await?;

        debug!(
            lines = details.len(),
            tax_rates = tax_order_summary.len(),
            "rendering supply order content"
        );

        let mut data = TemplateContext::new();
        data.assign("warehouse", &self.warehouse)?;
        data.assign("address_warehouse", &self.address_warehouse)?;
        data.assign("address_supplier", &self.address_supplier)?;
        data.assign("address_warehouse_lines", &self.address_warehouse.layout_lines(" "))?;
        data.assign("address_supplier_lines", &self.address_supplier.layout_lines(" "))?;
        data.assign("supply_order", &self.supply_order)?;
        data.assign("supply_order_details", &details)?;
        data.assign("tax_order_summary", &tax_order_summary)?;
        data.assign("currency", &currency)?;

        let renderer = &self.context.renderer;
        for (key, template) in CONTENT_SECTIONS {
            let section = renderer.render(template, &data)?;
            data.assign(key, &section)?;
        }

        renderer.render(CONTENT_TEMPLATE, &data)
    }

    fn get_footer(&self) -> Result<String, ServiceError> {
        let free_text: Vec<String> = FREE_TEXT_KEYS
            .iter()
            .map(|key| self.context.translate(key))
            .collect();

        let mut data = TemplateContext::new();
        data.assign("shop_address", &format_shop_address(&self.address_warehouse))?;
        data.assign("shop_fax", &self.context.config_value(ConfigKey::ShopFax))?;
        data.assign("shop_phone", &self.context.config_value(ConfigKey::ShopPhone))?;
        data.assign("shop_details", &self.context.config_value(ConfigKey::ShopDetails))?;
        data.assign("free_text", &free_text)?;
        self.context.renderer.render(FOOTER_TEMPLATE, &data)
    }

    fn get_filename(&self) -> String {
        format!(
            "{}_{}.pdf",
            self.context.translate(FILENAME_KEY),
            self.supply_order.reference
        )
    }

    fn get_bulk_filename(&self) -> String {
        BULK_FILENAME.to_string()
    }
}
