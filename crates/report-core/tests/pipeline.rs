//! End-to-end pass over the core pipeline: normalize + filter, classify,
//! aggregate.

use chrono::NaiveDate;
use report_core::{analyze, RawRecord, RecordProcessor};
use serde_json::json;

fn record(entries: &[(&str, serde_json::Value)]) -> RawRecord {
    entries
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect()
}

#[test]
fn full_pipeline_over_a_mixed_feed() {
    let target = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
    let processor = RecordProcessor::new(target);

    let raw = vec![
        // Matches the date, Guangdong seller.
        record(&[
            ("SCGGRQ", json!("2025-06-01 00:00:00")),
            ("SCODE", json!("000001")),
            ("SNAME", json!("甲股份")),
            ("OBJTYPE", json!("股权")),
            ("G_GOMNAME", json!("广东XX有限公司")),
            ("S_COMNAME", json!("北京买方")),
            ("JYJE", json!("50000")),
            ("ZRFS", json!("协议收购")),
            ("ANNOUNDATE", json!("2025-06-01 09:00:00")),
        ]),
        // Previous day, must be dropped.
        record(&[
            ("SCGGRQ", json!("2025-05-31 00:00:00")),
            ("SCODE", json!("000002")),
            ("G_GOMNAME", json!("深圳市乙公司")),
        ]),
        // Matches the date, malformed currency, no regional party.
        record(&[
            ("SCGGRQ", json!("2025-06-01 00:00:00")),
            ("SCODE", json!("000003")),
            ("SNAME", json!("丙股份")),
            ("OBJTYPE", json!("资产")),
            ("G_GOMNAME", json!("上海丙实业")),
            ("S_COMNAME", json!("天津丁投资")),
            ("JYJE", json!("未披露")),
            ("ZRFS", json!("增资")),
            ("ANNOUNDATE", json!("2025-06-01 10:00:00")),
        ]),
    ];

    let data = processor.process(&raw);

    assert_eq!(data.rows.len(), 2);
    assert_eq!(data.rows[0].serial, 1);
    assert_eq!(data.rows[1].serial, 2);
    assert_eq!(data.rows[0].stock_code(), "000001");
    assert_eq!(data.rows[1].stock_code(), "000003");
    assert_eq!(data.rows[1].amount(), "-");

    let analysis = analyze(&data);
    assert_eq!(analysis.total_count, 2);
    assert_eq!(analysis.guangdong_count, 1);
    assert_eq!(analysis.guangdong_cases[0].stock_code(), "000001");
    assert_eq!(
        analysis.guangdong_cases[0].related(),
        analysis.guangdong_cases[0].related_piped
    );
    assert_eq!(analysis.method_distribution["协议收购"], 1);
    assert_eq!(analysis.method_distribution["增资"], 1);
    assert_eq!(analysis.overview, "今日共获取2条并购重组数据");
}
