//! Record normalization and the target-date filter.
//!
//! One order-preserving pass over the raw feed: records outside the target
//! date are dropped before they are given a serial number, retained records
//! are mapped through the field table, and Guangdong cases are collected on
//! the side with their 相关 column switched to the piped rendering.

use chrono::NaiveDate;

use crate::classify::GuangdongClassifier;
use crate::fields::{
    self, display_value, format_currency, truncate_date, Coercion, FIELD_SPECS, MISSING,
};
use crate::row::{CanonicalRow, RawRecord};

/// Output of one normalization pass.
#[derive(Debug, Clone, Default)]
pub struct ProcessedData {
    /// Retained rows, serial-numbered 1..=n in feed order.
    pub rows: Vec<CanonicalRow>,
    /// Rows whose seller or buyer matched the region keyword list.
    pub guangdong_cases: Vec<CanonicalRow>,
}

/// Normalizes raw feed records for one target date.
pub struct RecordProcessor {
    target_date: String,
    classifier: GuangdongClassifier,
}

impl RecordProcessor {
    pub fn new(target_date: NaiveDate) -> Self {
        Self::with_classifier(target_date, GuangdongClassifier::default())
    }

    pub fn with_classifier(target_date: NaiveDate, classifier: GuangdongClassifier) -> Self {
        Self {
            target_date: target_date.format("%Y-%m-%d").to_string(),
            classifier,
        }
    }

    /// Normalize and filter the raw feed in a single pass.
    pub fn process(&self, raw: &[RawRecord]) -> ProcessedData {
        let mut data = ProcessedData::default();

        for record in raw {
            let disclosure = display_value(record.get(fields::DISCLOSURE_DATE_KEY));
            if truncate_date(&disclosure) != self.target_date {
                tracing::debug!(disclosure = %disclosure, "dropping record outside target date");
                continue;
            }

            let row = self.normalize(record, data.rows.len() + 1);
            if self.classifier.matches_row(&row) {
                data.guangdong_cases.push(row.as_guangdong_case());
            }
            data.rows.push(row);
        }

        tracing::info!(
            total = data.rows.len(),
            guangdong = data.guangdong_cases.len(),
            "normalized feed for {}",
            self.target_date
        );
        data
    }

    fn normalize(&self, record: &RawRecord, serial: usize) -> CanonicalRow {
        let stock_code = display_value(record.get("SCODE"));

        let mut columns = Vec::with_capacity(FIELD_SPECS.len());
        let mut related_piped = MISSING.to_string();
        let mut related_stacked = MISSING.to_string();

        for spec in FIELD_SPECS {
            let value = display_value(record.get(spec.source));
            let display = match spec.coercion {
                Coercion::Text => value,
                Coercion::Currency => format_currency(&value),
                Coercion::Date => truncate_date(&value),
                Coercion::Reference => {
                    if stock_code != MISSING && value != MISSING {
                        let (piped, stacked) = reference_links(&stock_code);
                        related_piped = piped;
                        related_stacked = stacked;
                    }
                    // The main listing shows the stacked variant.
                    related_stacked.clone()
                }
            };
            columns.push((spec.label, display));
        }

        CanonicalRow::new(serial, columns, related_piped, related_stacked)
    }
}

/// Build the two 相关 markup variants for a stock code.
fn reference_links(stock_code: &str) -> (String, String) {
    let notice_url = format!("https://data.eastmoney.com/notices/stock/{}.html", stock_code);
    let detail_url = format!("https://data.eastmoney.com/bgcz/detail/{}.html", stock_code);
    let notice = format!(r#"<a href="{}" target="_blank">公告</a>"#, notice_url);
    let detail = format!(r#"<a href="{}" target="_blank">详细</a>"#, detail_url);
    (
        format!("{} | {}", notice, detail),
        format!("{}<br>{}", notice, detail),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn target() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
    }

    fn record(entries: &[(&str, Value)]) -> RawRecord {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    fn matching_record(code: &str, seller: &str) -> RawRecord {
        record(&[
            ("SCGGRQ", json!("2025-06-01 00:00:00")),
            ("SCODE", json!(code)),
            ("SNAME", json!("测试股份")),
            ("OBJTYPE", json!("股权")),
            ("G_GOMNAME", json!(seller)),
            ("S_COMNAME", json!("某某买方")),
            ("JYJE", json!("1234567.5")),
            ("ZRFS", json!("协议收购")),
            ("ANNOUNDATE", json!("2025-06-01 00:00:00")),
        ])
    }

    #[test]
    fn off_date_records_are_dropped_and_serials_stay_contiguous() {
        let processor = RecordProcessor::new(target());
        let raw = vec![
            matching_record("000001", "北京甲"),
            record(&[("SCGGRQ", json!("2025-05-31 00:00:00")), ("SCODE", json!("000002"))]),
            matching_record("000003", "北京乙"),
        ];

        let data = processor.process(&raw);
        assert_eq!(data.rows.len(), 2);
        assert_eq!(data.rows[0].serial, 1);
        assert_eq!(data.rows[1].serial, 2);
        assert_eq!(data.rows[1].stock_code(), "000003");
    }

    #[test]
    fn missing_or_null_disclosure_date_drops_the_record() {
        let processor = RecordProcessor::new(target());
        let raw = vec![
            record(&[("SCODE", json!("000001"))]),
            record(&[("SCGGRQ", Value::Null), ("SCODE", json!("000002"))]),
        ];
        assert!(processor.process(&raw).rows.is_empty());
    }

    #[test]
    fn null_and_none_values_become_sentinel_in_every_column() {
        let processor = RecordProcessor::new(target());
        let raw = vec![record(&[
            ("SCGGRQ", json!("2025-06-01")),
            ("SCODE", json!("000001")),
            ("SNAME", Value::Null),
            ("G_GOMNAME", json!("  ")),
            ("S_COMNAME", json!("None")),
        ])];

        let row = &processor.process(&raw).rows[0];
        assert_eq!(row.stock_name(), "-");
        assert_eq!(row.seller(), "-");
        assert_eq!(row.buyer(), "-");
        assert_eq!(row.target(), "-");
        assert_eq!(row.amount(), "-");
    }

    #[test]
    fn currency_column_formats_or_degrades() {
        let processor = RecordProcessor::new(target());
        let mut good = matching_record("000001", "甲");
        good.insert("JYJE".into(), json!(1234567.5));
        let mut bad = matching_record("000002", "乙");
        bad.insert("JYJE".into(), json!("约12亿"));

        let data = processor.process(&[good, bad]);
        assert_eq!(data.rows[0].amount(), "1,234,567.50");
        assert_eq!(data.rows[1].amount(), "-");
    }

    #[test]
    fn reference_links_need_both_code_and_value() {
        let processor = RecordProcessor::new(target());

        let with_links = &processor.process(&[matching_record("600000", "甲")]).rows[0];
        assert!(with_links.related_piped.contains("notices/stock/600000.html"));
        assert!(with_links.related_piped.contains(" | "));
        assert!(with_links.related_stacked.contains("<br>"));
        assert!(with_links.related_stacked.contains("bgcz/detail/600000.html"));
        assert_eq!(with_links.related(), with_links.related_stacked);

        let mut no_objtype = matching_record("600000", "甲");
        no_objtype.remove("OBJTYPE");
        let row = &processor.process(&[no_objtype]).rows[0];
        assert_eq!(row.related_piped, "-");
        assert_eq!(row.related_stacked, "-");
        assert_eq!(row.related(), "-");
    }

    #[test]
    fn guangdong_cases_are_collected_with_piped_rendering() {
        let processor = RecordProcessor::new(target());
        let data = processor.process(&[
            matching_record("000001", "广东XX有限公司"),
            matching_record("000002", "北京乙"),
        ]);

        assert_eq!(data.rows.len(), 2);
        assert_eq!(data.guangdong_cases.len(), 1);
        let case = &data.guangdong_cases[0];
        assert_eq!(case.serial, 1);
        assert_eq!(case.related(), case.related_piped);
        // The listing row keeps its stacked rendering.
        assert_eq!(data.rows[0].related(), data.rows[0].related_stacked);
    }

    #[test]
    fn announce_date_truncates_to_calendar_portion() {
        let processor = RecordProcessor::new(target());
        let row = &processor.process(&[matching_record("000001", "甲")]).rows[0];
        assert_eq!(row.announce_date(), "2025-06-01");
    }
}
