//! Printable documents rendered to HTML for PDF conversion.

pub mod context;
pub mod generator;
pub mod html_template;
pub mod image;
pub mod rounding;
pub mod supply_order_form;
pub mod template;
pub mod translator;

pub use context::{PdfContext, PdfSettings};
pub use generator::{PdfGenerator, RenderedDocument};
pub use html_template::HtmlTemplate;
pub use rounding::{ps_round, RoundMode};
pub use supply_order_form::SupplyOrderForm;
pub use template::{HandlebarsRenderer, TemplateContext, TemplateRenderer};
pub use translator::{CatalogTranslator, Translator};
