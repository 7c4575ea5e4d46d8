//! Summary statistics over the normalized rows.

use serde::Serialize;
use std::collections::HashMap;

use crate::normalize::ProcessedData;
use crate::row::CanonicalRow;

const NO_DATA_OVERVIEW: &str = "今日无并购重组数据公告";

/// Immutable summary of one report run.
#[derive(Debug, Clone, Serialize)]
pub struct Analysis {
    pub overview: String,
    pub basic_overview: String,
    pub total_count: usize,
    pub guangdong_count: usize,
    /// Deal-method display value → occurrence count. `"-"` groups like any
    /// other value. Map order is meaningless; render through
    /// [`Analysis::sorted_method_distribution`].
    pub method_distribution: HashMap<String, usize>,
    /// Guangdong cases carried for the case section, piped 相关 rendering.
    pub guangdong_cases: Vec<CanonicalRow>,
}

impl Analysis {
    /// The fixed value for a run with no matching rows.
    pub fn no_data() -> Self {
        Self {
            overview: NO_DATA_OVERVIEW.to_string(),
            basic_overview: NO_DATA_OVERVIEW.to_string(),
            total_count: 0,
            guangdong_count: 0,
            method_distribution: HashMap::new(),
            guangdong_cases: Vec::new(),
        }
    }

    /// Distribution sorted by descending count, then label, so rendered
    /// output is deterministic.
    pub fn sorted_method_distribution(&self) -> Vec<(&str, usize)> {
        let mut entries: Vec<(&str, usize)> = self
            .method_distribution
            .iter()
            .map(|(k, v)| (k.as_str(), *v))
            .collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        entries
    }
}

/// Aggregate the processed rows into an [`Analysis`].
pub fn analyze(data: &ProcessedData) -> Analysis {
    if data.rows.is_empty() {
        return Analysis::no_data();
    }

    let total_count = data.rows.len();
    let mut method_distribution: HashMap<String, usize> = HashMap::new();
    for row in &data.rows {
        *method_distribution
            .entry(row.deal_method().to_string())
            .or_insert(0) += 1;
    }

    let overview = format!("今日共获取{}条并购重组数据", total_count);
    Analysis {
        basic_overview: overview.clone(),
        overview,
        total_count,
        guangdong_count: data.guangdong_cases.len(),
        method_distribution,
        guangdong_cases: data.guangdong_cases.clone(),
    }
}
