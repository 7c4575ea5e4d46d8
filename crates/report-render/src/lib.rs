//! Report assembly: HTML rendering and best-effort PDF conversion.

mod pdf;
mod template;

pub use pdf::PdfConverter;
pub use template::{render_report, ReportContext, REPORT_TITLE};

use chrono::{Local, NaiveDate};
use std::path::{Path, PathBuf};

use report_core::{Analysis, CanonicalRow};

const ARTIFACT_PREFIX: &str = "并购重组日报";

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("template render failed: {0}")]
    Template(#[from] askama::Error),
    #[error("report file write failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("pdf conversion failed: {0}")]
    Conversion(String),
}

/// Artifact file name for one report date: fixed prefix + compact date.
pub fn html_filename(date: NaiveDate) -> String {
    format!("{}_{}.html", ARTIFACT_PREFIX, date.format("%Y%m%d"))
}

/// Writes report artifacts for one run: an HTML file, and a PDF derived from
/// it when the converter succeeds.
pub struct ReportGenerator {
    output_dir: PathBuf,
    converter: PdfConverter,
}

impl ReportGenerator {
    pub fn new(output_dir: impl Into<PathBuf>, converter: PdfConverter) -> Self {
        Self { output_dir: output_dir.into(), converter }
    }

    /// Render and write the artifacts, HTML first. Returns paths in delivery
    /// order; empty when there was nothing to render. PDF conversion failure
    /// keeps the HTML artifact.
    pub async fn generate(
        &self,
        rows: &[CanonicalRow],
        analysis: &Analysis,
        date: NaiveDate,
    ) -> Result<Vec<PathBuf>, RenderError> {
        let generate_time = Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
        let date_str = date.format("%Y-%m-%d").to_string();

        let html = match render_report(rows, analysis, &date_str, &generate_time)? {
            Some(html) => html,
            None => return Ok(Vec::new()),
        };

        let html_path = self.output_dir.join(html_filename(date));
        tokio::fs::write(&html_path, html).await?;
        tracing::info!("HTML报告生成成功: {}", html_path.display());

        let mut artifacts = vec![html_path.clone()];
        match self.converter.convert(&html_path).await {
            Ok(pdf_path) => {
                tracing::info!("PDF报告生成成功: {}", pdf_path.display());
                artifacts.push(pdf_path);
            }
            Err(e) => {
                tracing::error!("HTML转PDF失败: {}", e);
            }
        }

        Ok(artifacts)
    }
}

/// PDF path derived from an HTML artifact path: same base, `.pdf` extension.
pub(crate) fn pdf_path_for(html_path: &Path) -> PathBuf {
    html_path.with_extension("pdf")
}
