//! Contract shared by every printable document and helpers common to them.

use std::path::PathBuf;

use async_trait::async_trait;
use chrono::format::{Item, StrftimeItems};
use chrono::NaiveDateTime;
use tracing::warn;

use super::context::PdfContext;
use super::template::TemplateContext;
use crate::configuration::ConfigKey;
use crate::errors::ServiceError;
use crate::models::Address;

const FALLBACK_DATE_FORMAT: &str = "%Y-%m-%d";

/// A document rendered as header, content and footer fragments.
#[async_trait]
pub trait HtmlTemplate: Send {
    fn get_header(&self) -> Result<String, ServiceError>;

    async fn get_content(&mut self) -> Result<String, ServiceError>;

    fn get_footer(&self) -> Result<String, ServiceError>;

    /// File name of this document printed alone.
    fn get_filename(&self) -> String;

    /// File name used when several documents are printed together.
    fn get_bulk_filename(&self) -> String;
}

/// Logo file to print: the invoice logo if present, else the shop logo.
pub fn resolve_logo(ctx: &PdfContext) -> Option<PathBuf> {
    [ConfigKey::LogoInvoice, ConfigKey::Logo]
        .into_iter()
        .filter_map(|key| ctx.configuration.get_non_empty(key))
        .map(|file| ctx.settings.img_dir.join(file))
        .find(|path| ctx.image_probe.exists(path))
}

/// Pixel size of the logo, `(0, 0)` without one or when it cannot be read.
///
/// This is the only render error that is logged instead of returned: an
/// unreadable logo prints unsized rather than aborting the document.
pub fn logo_dimensions(ctx: &PdfContext, logo: Option<&PathBuf>) -> (u32, u32) {
    let Some(path) = logo else {
        return (0, 0);
    };
    ctx.image_probe.dimensions(path).unwrap_or_else(|err| {
        warn!(logo = %path.display(), error = %err, "cannot read logo size");
        (0, 0)
    })
}

/// Binds the values every document header prints.
pub fn assign_common_header_data(
    ctx: &PdfContext,
    data: &mut TemplateContext,
    title: &str,
    reference: &str,
    date: &str,
) -> Result<(), ServiceError> {
    let logo = resolve_logo(ctx);
    let (width, height) = logo_dimensions(ctx, logo.as_ref());
    let logo_path = logo
        .as_ref()
        .map(|path| path.display().to_string())
        .unwrap_or_default();

    data.assign("logo_path", &logo_path)?;
    data.assign("img_ps_dir", &ctx.img_ps_dir())?;
    data.assign("img_update_time", &ctx.config_value(ConfigKey::ImgUpdateTime))?;
    data.assign("title", title)?;
    data.assign("reference", reference)?;
    data.assign("date", date)?;
    data.assign("shop_name", &ctx.config_value(ConfigKey::ShopName))?;
    data.assign("width_logo", &width)?;
    data.assign("height_logo", &height)?;
    Ok(())
}

/// Address printed on one line, its lines separated by `" - "`.
pub fn format_shop_address(address: &Address) -> String {
    address.format_inline(" - ", " ")
}

/// Formats `date` with a strftime pattern, falling back to ISO dates when
/// the pattern is invalid.
pub fn display_date(date: &NaiveDateTime, format: &str) -> String {
    let valid = !StrftimeItems::new(format).any(|item| matches!(item, Item::Error));
    if valid {
        date.format(format).to_string()
    } else {
        warn!(format = %format, "invalid date format");
        date.format(FALLBACK_DATE_FORMAT).to_string()
    }
}
