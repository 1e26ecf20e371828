//! Template rendering for document fragments.
//!
//! Templates are handlebars files named `<template name>.hbs`. A theme
//! directory may shadow any default template by using the same file name.

use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use handlebars::{
    Context, Handlebars, Helper, HelperResult, Output, RenderContext, RenderError,
    RenderErrorReason,
};
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{debug, instrument, warn};

use crate::errors::ServiceError;
use crate::models::currency::{format_price, number_format, PriceFormat};

const TEMPLATE_EXTENSION: &str = "hbs";

/// Named values bound for one render.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TemplateContext {
    values: Map<String, Value>,
}

impl TemplateContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `value` under `key`, replacing any previous binding.
    pub fn assign<T: Serialize + ?Sized>(
        &mut self,
        key: &str,
        value: &T,
    ) -> Result<(), ServiceError> {
        self.values
            .insert(key.to_string(), serde_json::to_value(value)?);
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.values
    }
}

/// Renders a named template against a context.
pub trait TemplateRenderer: Send + Sync {
    /// Fails with [`ServiceError::TemplateError`] when `name` is unknown or
    /// the template cannot be rendered.
    fn render(&self, name: &str, context: &TemplateContext) -> Result<String, ServiceError>;

    fn has_template(&self, name: &str) -> bool;
}

pub struct HandlebarsRenderer {
    registry: Handlebars<'static>,
}

impl std::fmt::Debug for HandlebarsRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names: Vec<&String> = self.registry.get_templates().keys().collect();
        names.sort();
        f.debug_struct("HandlebarsRenderer")
            .field("templates", &names)
            .finish()
    }
}

impl HandlebarsRenderer {
    fn empty() -> Self {
        let mut registry = Handlebars::new();
        registry.register_helper("display_price", Box::new(display_price));
        Self { registry }
    }

    /// Loads every template of `default_dir`, then lets `theme_dir` override
    /// them by name. A missing theme directory is ignored.
    #[instrument]
    pub fn from_dirs(default_dir: &Path, theme_dir: Option<&Path>) -> Result<Self, ServiceError> {
        let mut renderer = Self::empty();

        let defaults = template_files(default_dir)?;
        if defaults.is_empty() {
            warn!(dir = %default_dir.display(), "template directory holds no templates");
        }
        for (name, path) in defaults {
            renderer.registry.register_template_file(&name, &path)?;
        }

        if let Some(theme_dir) = theme_dir {
            if theme_dir.is_dir() {
                for (name, path) in template_files(theme_dir)? {
                    debug!(template = %name, "theme overrides template");
                    renderer.registry.register_template_file(&name, &path)?;
                }
            } else {
                warn!(dir = %theme_dir.display(), "theme template directory not found");
            }
        }

        debug!(count = renderer.registry.get_templates().len(), "templates registered");
        Ok(renderer)
    }

    /// Registers templates from in-memory sources.
    pub fn from_sources<'a, I>(sources: I) -> Result<Self, ServiceError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut renderer = Self::empty();
        for (name, source) in sources {
            renderer.registry.register_template_string(name, source)?;
        }
        Ok(renderer)
    }
}

impl TemplateRenderer for HandlebarsRenderer {
    fn render(&self, name: &str, context: &TemplateContext) -> Result<String, ServiceError> {
        if !self.registry.has_template(name) {
            return Err(ServiceError::TemplateError(format!(
                "template '{}' is not registered",
                name
            )));
        }
        Ok(self.registry.render(name, context.as_map())?)
    }

    fn has_template(&self, name: &str) -> bool {
        self.registry.has_template(name)
    }
}

/// `(name, path)` of every template file directly under `dir`, sorted by name.
fn template_files(dir: &Path) -> Result<Vec<(String, PathBuf)>, ServiceError> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if !path.is_file() || path.extension().and_then(|e| e.to_str()) != Some(TEMPLATE_EXTENSION)
        {
            continue;
        }
        if let Some(name) = path.file_stem().and_then(|s| s.to_str()) {
            files.push((name.to_string(), path.clone()));
        }
    }
    files.sort();
    Ok(files)
}

fn helper_error(message: String) -> RenderError {
    RenderErrorReason::Other(message).into()
}

fn decimal_param(value: &Value) -> Option<Decimal> {
    match value {
        Value::String(s) => Decimal::from_str(s).ok(),
        Value::Number(n) => Decimal::from_str(&n.to_string()).ok(),
        _ => None,
    }
}

/// `{{display_price amount currency}}`
///
/// Formats an already rounded amount. Without a currency the amount is
/// printed with two decimals and no grouping.
fn display_price(
    h: &Helper,
    _: &Handlebars,
    _: &Context,
    _: &mut RenderContext,
    out: &mut dyn Output,
) -> HelperResult {
    let raw = h
        .param(0)
        .map(|p| p.value())
        .ok_or_else(|| helper_error("display_price: missing amount".into()))?;
    let amount = decimal_param(raw)
        .ok_or_else(|| helper_error(format!("display_price: not an amount: {}", raw)))?;

    let text = match h.param(1).map(|p| p.value()).filter(|v| v.is_object()) {
        Some(currency) => {
            let sign = currency.get("sign").and_then(Value::as_str).unwrap_or("");
            let format = currency
                .get("format")
                .and_then(Value::as_i64)
                .and_then(|code| i16::try_from(code).ok())
                .unwrap_or(1);
            let blank = currency
                .get("blank")
                .and_then(Value::as_bool)
                .unwrap_or(false);
            let decimals = currency
                .get("decimals")
                .and_then(Value::as_bool)
                .unwrap_or(true);
            format_price(
                amount,
                sign,
                PriceFormat::from_code(format),
                blank,
                if decimals { 2 } else { 0 },
            )
        }
        None => number_format(amount, 2, ".", ""),
    };

    out.write(&text)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;
    use rust_decimal_macros::dec;
    use serde_json::json;
    use tempfile::TempDir;

    fn write(dir: &Path, file: &str, body: &str) {
        fs::write(dir.join(file), body).unwrap();
    }

    #[test]
    fn assign_serializes_values() {
        let mut ctx = TemplateContext::new();
        ctx.assign("total", &dec!(12.50)).unwrap();
        ctx.assign("free_text", &vec!["TE", "TI"]).unwrap();

        assert_eq!(ctx.get("total"), Some(&json!("12.50")));
        assert_eq!(ctx.get("free_text"), Some(&json!(["TE", "TI"])));
        assert!(ctx.contains("total"));
        assert!(!ctx.contains("missing"));
    }

    #[test]
    fn theme_templates_override_defaults() {
        let defaults = TempDir::new().unwrap();
        let theme = TempDir::new().unwrap();
        write(defaults.path(), "supply-order-header.hbs", "default {{title}}");
        write(defaults.path(), "supply-order-footer.hbs", "footer");
        write(defaults.path(), "notes.txt", "ignored");
        write(theme.path(), "supply-order-header.hbs", "themed {{title}}");

        let renderer = HandlebarsRenderer::from_dirs(defaults.path(), Some(theme.path())).unwrap();
        let mut ctx = TemplateContext::new();
        ctx.assign("title", "Supply order form").unwrap();

        assert_eq!(
            renderer.render("supply-order-header", &ctx).unwrap(),
            "themed Supply order form"
        );
        assert_eq!(renderer.render("supply-order-footer", &ctx).unwrap(), "footer");
        assert!(!renderer.has_template("notes"));
    }

    #[test]
    fn dotted_names_keep_their_prefix() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "supply-order.tax-tab.hbs", "tax");

        let renderer = HandlebarsRenderer::from_dirs(dir.path(), None).unwrap();
        assert!(renderer.has_template("supply-order.tax-tab"));
    }

    #[test]
    fn missing_theme_dir_is_ignored() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "a.hbs", "a");

        let renderer =
            HandlebarsRenderer::from_dirs(dir.path(), Some(&dir.path().join("nope"))).unwrap();
        assert!(renderer.has_template("a"));
    }

    #[test]
    fn unknown_template_is_a_template_error() {
        let renderer = HandlebarsRenderer::from_sources([("known", "x")]).unwrap();
        let err = renderer
            .render("supply-order.product-tab", &TemplateContext::new())
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Template);
    }

    #[test]
    fn display_price_formats_without_rounding_logic() {
        let renderer = HandlebarsRenderer::from_sources([
            ("plain", "{{display_price amount}}"),
            ("money", "{{display_price amount currency}}"),
        ])
        .unwrap();

        let mut ctx = TemplateContext::new();
        ctx.assign("amount", &dec!(1520.3)).unwrap();
        ctx.assign(
            "currency",
            &json!({"sign": "€", "format": 2, "blank": true, "decimals": true}),
        )
        .unwrap();

        assert_eq!(renderer.render("plain", &ctx).unwrap(), "1520.30");
        assert_eq!(renderer.render("money", &ctx).unwrap(), "1 520,30 €");
    }

    #[test]
    fn display_price_rejects_non_amounts() {
        let renderer = HandlebarsRenderer::from_sources([("bad", "{{display_price label}}")]).unwrap();
        let mut ctx = TemplateContext::new();
        ctx.assign("label", "abc").unwrap();

        assert_eq!(
            renderer.render("bad", &ctx).unwrap_err().kind(),
            ErrorKind::Template
        );
    }
}
