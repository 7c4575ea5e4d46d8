//! Field-mapping table and per-field value coercion.
//!
//! The mapping from Eastmoney source keys to report columns is data, not
//! control flow: each [`FieldSpec`] names the source key, the report-facing
//! column label, and the coercion applied to the raw value. Adding a column
//! means adding a table row.

use serde_json::Value;

/// The uniform "missing" sentinel. A recognized field is never absent,
/// empty, or null in a canonical row; it is this literal instead.
pub const MISSING: &str = "-";

/// Source key carrying the disclosure date used by the date filter.
pub const DISCLOSURE_DATE_KEY: &str = "SCGGRQ";

/// Report-facing column labels (the original report's Chinese headers).
pub mod labels {
    pub const SERIAL: &str = "序号";
    pub const STOCK_CODE: &str = "股票代码";
    pub const STOCK_NAME: &str = "股票简称";
    pub const RELATED: &str = "相关";
    pub const TARGET: &str = "交易标的";
    pub const SELLER: &str = "卖方";
    pub const BUYER: &str = "买方";
    pub const AMOUNT: &str = "交易金额 (万)";
    pub const CURRENCY: &str = "币种";
    pub const DEAL_METHOD: &str = "并购方式";
    pub const ANNOUNCE_DATE: &str = "最新公告日";
}

/// How a raw value becomes a display value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Coercion {
    /// Pass the coerced string through unchanged.
    Text,
    /// Parse as a decimal and format with thousands separators, two decimals.
    Currency,
    /// Keep only the first 10 characters (the calendar-date portion).
    Date,
    /// Synthesize notice/detail links keyed by the stock code.
    Reference,
}

/// One row of the source-key → report-column mapping table.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub source: &'static str,
    pub label: &'static str,
    pub coercion: Coercion,
}

/// Column order in this table is the column order of the report.
pub const FIELD_SPECS: &[FieldSpec] = &[
    FieldSpec { source: "SCODE", label: labels::STOCK_CODE, coercion: Coercion::Text },
    FieldSpec { source: "SNAME", label: labels::STOCK_NAME, coercion: Coercion::Text },
    FieldSpec { source: "OBJTYPE", label: labels::RELATED, coercion: Coercion::Reference },
    FieldSpec { source: "H_COMNAME", label: labels::TARGET, coercion: Coercion::Text },
    FieldSpec { source: "G_GOMNAME", label: labels::SELLER, coercion: Coercion::Text },
    FieldSpec { source: "S_COMNAME", label: labels::BUYER, coercion: Coercion::Text },
    FieldSpec { source: "JYJE", label: labels::AMOUNT, coercion: Coercion::Currency },
    FieldSpec { source: "BZNAME", label: labels::CURRENCY, coercion: Coercion::Text },
    FieldSpec { source: "ZRFS", label: labels::DEAL_METHOD, coercion: Coercion::Text },
    FieldSpec { source: "ANNOUNDATE", label: labels::ANNOUNCE_DATE, coercion: Coercion::Date },
];

/// Coerce a raw JSON scalar into a display string.
///
/// Absent values, JSON nulls, empty/whitespace-only strings, and the literal
/// token "none" (any case) all collapse to the missing sentinel. Numbers and
/// booleans render with their JSON text.
pub fn display_value(raw: Option<&Value>) -> String {
    let value = match raw {
        None | Some(Value::Null) => return MISSING.to_string(),
        Some(v) => v,
    };
    let text = match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };
    if text.trim().is_empty() || text.trim().eq_ignore_ascii_case("none") {
        MISSING.to_string()
    } else {
        text
    }
}

/// Format a decimal string with thousands separators and two decimals.
/// Anything unparseable (including the missing sentinel) comes back as `"-"`.
pub fn format_currency(value: &str) -> String {
    let amount: f64 = match value.parse() {
        Ok(v) => v,
        Err(_) => return MISSING.to_string(),
    };
    let fixed = format!("{:.2}", amount.abs());
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some(parts) => parts,
        None => (fixed.as_str(), "00"),
    };

    let digits: Vec<char> = int_part.chars().collect();
    let mut grouped = String::with_capacity(fixed.len() + digits.len() / 3);
    for (i, d) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(*d);
    }

    let sign = if amount < 0.0 { "-" } else { "" };
    format!("{}{}.{}", sign, grouped, frac_part)
}

/// Keep the calendar-date prefix of a datetime-like string.
/// Char-based so a malformed multibyte value cannot split a codepoint.
pub fn truncate_date(value: &str) -> String {
    if value == MISSING {
        return MISSING.to_string();
    }
    value.chars().take(10).collect()
}
