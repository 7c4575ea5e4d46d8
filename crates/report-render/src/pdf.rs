//! wkhtmltopdf subprocess wrapper.

use std::path::{Path, PathBuf};
use tokio::process::Command;

use crate::{pdf_path_for, RenderError};

const DEFAULT_BINARY: &str = "wkhtmltopdf";

/// Converts an HTML artifact to PDF with the report's fixed page layout.
pub struct PdfConverter {
    binary: String,
}

impl Default for PdfConverter {
    fn default() -> Self {
        Self::new(DEFAULT_BINARY.to_string())
    }
}

impl PdfConverter {
    pub fn new(binary: String) -> Self {
        Self { binary }
    }

    /// Run the conversion. The PDF lands next to the HTML file with the same
    /// base name.
    pub async fn convert(&self, html_path: &Path) -> Result<PathBuf, RenderError> {
        let pdf_path = pdf_path_for(html_path);
        let args = layout_args(html_path, &pdf_path);

        let output = Command::new(&self.binary)
            .args(&args)
            .output()
            .await
            .map_err(|e| RenderError::Conversion(format!("{}: {}", self.binary, e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(RenderError::Conversion(format!(
                "{} exited with {}: {}",
                self.binary,
                output.status,
                stderr.trim()
            )));
        }

        Ok(pdf_path)
    }
}

/// Fixed layout: A4 landscape, 0.3in margins, UTF-8, page counter footer.
fn layout_args(html_path: &Path, pdf_path: &Path) -> Vec<String> {
    vec![
        "--page-size".into(),
        "A4".into(),
        "--orientation".into(),
        "Landscape".into(),
        "--margin-top".into(),
        "0.3in".into(),
        "--margin-right".into(),
        "0.3in".into(),
        "--margin-bottom".into(),
        "0.3in".into(),
        "--margin-left".into(),
        "0.3in".into(),
        "--encoding".into(),
        "UTF-8".into(),
        "--no-outline".into(),
        "--quiet".into(),
        "--enable-local-file-access".into(),
        "--disable-smart-shrinking".into(),
        "--footer-right".into(),
        "[page]/[topage]".into(),
        html_path.display().to_string(),
        pdf_path.display().to_string(),
    ]
}
