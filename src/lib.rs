//! Supply order form rendering
//!
//! Loads a supply order with its lines, warehouse and supplier addresses from
//! the database, rounds the printed amounts and renders the form to HTML
//! through handlebars templates, ready for conversion to PDF.
#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![allow(elided_lifetimes_in_paths)]
#![warn(clippy::all, clippy::perf, clippy::dbg_macro)]

pub mod config;
pub mod configuration;
pub mod db;
pub mod errors;
pub mod models;
pub mod pdf;
pub mod queries;
pub mod repositories;

pub use errors::{ErrorKind, ServiceError};
pub use pdf::{HtmlTemplate, PdfContext, PdfGenerator, RenderedDocument, SupplyOrderForm};
