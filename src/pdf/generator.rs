use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use metrics::{counter, histogram};
use tracing::{info, instrument};

use super::html_template::HtmlTemplate;
use crate::errors::ServiceError;

const PAGE_STYLE: &str = "section.page + section.page { page-break-before: always; }";

/// HTML of one print job and the PDF name it should be converted to.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedDocument {
    pub filename: String,
    pub html: String,
}

impl RenderedDocument {
    /// `filename` with an `.html` extension and path separators replaced.
    pub fn html_filename(&self) -> String {
        let safe: String = self
            .filename
            .chars()
            .map(|c| if matches!(c, '/' | '\\') { '-' } else { c })
            .collect();
        Path::new(&safe)
            .with_extension("html")
            .to_string_lossy()
            .into_owned()
    }

    /// Writes the HTML under `dir`, creating it when needed.
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf, ServiceError> {
        fs::create_dir_all(dir)?;
        let path = dir.join(self.html_filename());
        fs::write(&path, &self.html)?;
        info!(path = %path.display(), bytes = self.html.len(), "document written");
        Ok(path)
    }
}

/// Lays out one or more documents as pages of a single HTML file.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfGenerator;

impl PdfGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Renders every template as its own page.
    ///
    /// One template keeps its own filename; several share the bulk filename.
    #[instrument(skip_all, fields(templates = templates.len()))]
    pub async fn render<T: HtmlTemplate>(
        &self,
        templates: &mut [T],
    ) -> Result<RenderedDocument, ServiceError> {
        let start = Instant::now();
        let filename = match templates {
            [] => {
                return Err(ServiceError::InvalidInput(
                    "no document to render".to_string(),
                ))
            }
            [single] => single.get_filename(),
            [first, ..] => first.get_bulk_filename(),
        };

        let mut pages = Vec::with_capacity(templates.len());
        for template in templates.iter_mut() {
            // content first: it may normalize what header and footer print
            let content = template.get_content().await?;
            let header = template.get_header()?;
            let footer = template.get_footer()?;
            pages.push(format!(
                "<section class=\"page\">\n<header>{}</header>\n<main>{}</main>\n<footer>{}</footer>\n</section>",
                header, content, footer
            ));
        }

        let html = format!(
            "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{}</title>\n<style>{}</style>\n</head>\n<body>\n{}\n</body>\n</html>\n",
            filename,
            PAGE_STYLE,
            pages.join("\n")
        );

        counter!("supply_order_form.documents_rendered", templates.len() as u64);
        histogram!(
            "supply_order_form.render.duration",
            start.elapsed().as_secs_f64()
        );

        Ok(RenderedDocument { filename, html })
    }
}
