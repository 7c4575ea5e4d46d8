//! The askama render context for the report document.

use askama::Template;

use crate::RenderError;
use report_core::{Analysis, CanonicalRow};

pub const REPORT_TITLE: &str = "并购重组日报";

/// Render-ready bundle handed to the template. Pure combination: the rows
/// and analysis arrive fully computed.
#[derive(Template)]
#[template(path = "report.html")]
pub struct ReportContext<'a> {
    pub title: &'a str,
    pub data: &'a [CanonicalRow],
    pub analysis: &'a Analysis,
    pub date: &'a str,
    pub generate_time: &'a str,
}

/// Render the report document. `Ok(None)` when there are no rows to show;
/// the template is never invoked for an empty run.
pub fn render_report(
    rows: &[CanonicalRow],
    analysis: &Analysis,
    date: &str,
    generate_time: &str,
) -> Result<Option<String>, RenderError> {
    if rows.is_empty() {
        return Ok(None);
    }

    let context = ReportContext {
        title: REPORT_TITLE,
        data: rows,
        analysis,
        date,
        generate_time,
    };
    Ok(Some(context.render()?))
}
