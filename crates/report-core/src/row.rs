//! Canonical row schema for the report.

use serde::Serialize;
use std::collections::HashMap;

use crate::fields::{labels, MISSING};

/// One raw feed record: an unordered map of source keys to untyped scalars.
pub type RawRecord = HashMap<String, serde_json::Value>;

/// A normalized, display-ready report row.
///
/// Columns sit in field-table order and every recognized column is present,
/// holding `"-"` when the source had nothing usable. The 相关 column is the
/// rendering actually displayed for this row; both markup variants are kept
/// alongside because different report sections need different markup.
#[derive(Debug, Clone, Serialize)]
pub struct CanonicalRow {
    /// 1-based position among retained records, in feed order.
    pub serial: usize,
    columns: Vec<(&'static str, String)>,
    /// Anchor pair joined with `" | "`, used by the case section.
    pub related_piped: String,
    /// Anchor pair joined with `<br>`, used by the main listing.
    pub related_stacked: String,
}

impl CanonicalRow {
    pub fn new(
        serial: usize,
        columns: Vec<(&'static str, String)>,
        related_piped: String,
        related_stacked: String,
    ) -> Self {
        Self { serial, columns, related_piped, related_stacked }
    }

    /// Look up a column by its report label. Unknown labels read as `"-"`.
    pub fn get(&self, label: &str) -> &str {
        self.columns
            .iter()
            .find(|(l, _)| *l == label)
            .map(|(_, v)| v.as_str())
            .unwrap_or(MISSING)
    }

    pub fn columns(&self) -> &[(&'static str, String)] {
        &self.columns
    }

    pub fn stock_code(&self) -> &str {
        self.get(labels::STOCK_CODE)
    }

    pub fn stock_name(&self) -> &str {
        self.get(labels::STOCK_NAME)
    }

    /// The displayed 相关 rendering for this row.
    pub fn related(&self) -> &str {
        self.get(labels::RELATED)
    }

    pub fn target(&self) -> &str {
        self.get(labels::TARGET)
    }

    pub fn seller(&self) -> &str {
        self.get(labels::SELLER)
    }

    pub fn buyer(&self) -> &str {
        self.get(labels::BUYER)
    }

    pub fn amount(&self) -> &str {
        self.get(labels::AMOUNT)
    }

    pub fn currency(&self) -> &str {
        self.get(labels::CURRENCY)
    }

    pub fn deal_method(&self) -> &str {
        self.get(labels::DEAL_METHOD)
    }

    pub fn announce_date(&self) -> &str {
        self.get(labels::ANNOUNCE_DATE)
    }

    /// Copy of this row with the 相关 column switched to the piped rendering.
    /// The original row keeps its stacked rendering for the main listing.
    pub fn as_guangdong_case(&self) -> CanonicalRow {
        let mut case = self.clone();
        if let Some(slot) = case.columns.iter_mut().find(|(l, _)| *l == labels::RELATED) {
            slot.1 = case.related_piped.clone();
        }
        case
    }
}
