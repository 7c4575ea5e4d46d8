//! Guangdong counterparty classification.

use crate::fields::MISSING;
use crate::row::CanonicalRow;

/// Curated Guangdong city/province keywords. Matching is plain substring
/// containment; a keyword inside an unrelated proper name still matches,
/// which is the established behavior of this report.
pub const GUANGDONG_KEYWORDS: &[&str] = &[
    "广东", "粤", "广州", "深圳", "珠海", "佛山", "东莞", "中山", "惠州",
    "江门", "肇庆", "汕头", "潮州", "揭阳", "汕尾", "韶关", "清远",
    "梅州", "河源", "阳江", "茂名", "湛江", "岭南",
];

/// Classifies rows by whether a counterparty name matches a keyword list.
#[derive(Debug, Clone)]
pub struct GuangdongClassifier {
    keywords: Vec<String>,
}

impl Default for GuangdongClassifier {
    fn default() -> Self {
        Self::new(GUANGDONG_KEYWORDS.iter().map(|k| k.to_string()))
    }
}

impl GuangdongClassifier {
    pub fn new(keywords: impl IntoIterator<Item = String>) -> Self {
        Self { keywords: keywords.into_iter().collect() }
    }

    /// Case-sensitive substring match against the keyword list.
    /// The missing sentinel never matches.
    pub fn matches_name(&self, name: &str) -> bool {
        if name == MISSING {
            return false;
        }
        self.keywords.iter().any(|kw| name.contains(kw.as_str()))
    }

    /// A row is a Guangdong case when either counterparty name matches.
    pub fn matches_row(&self, row: &CanonicalRow) -> bool {
        self.matches_name(row.seller()) || self.matches_name(row.buyer())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::labels;

    fn row_with_parties(seller: &str, buyer: &str) -> CanonicalRow {
        CanonicalRow::new(
            1,
            vec![
                (labels::SELLER, seller.to_string()),
                (labels::BUYER, buyer.to_string()),
            ],
            "-".into(),
            "-".into(),
        )
    }

    #[test]
    fn seller_keyword_classifies() {
        let classifier = GuangdongClassifier::default();
        assert!(classifier.matches_row(&row_with_parties("广东XX有限公司", "-")));
        assert!(classifier.matches_row(&row_with_parties("-", "深圳市某某科技")));
    }

    #[test]
    fn sentinel_parties_never_classify() {
        let classifier = GuangdongClassifier::default();
        assert!(!classifier.matches_row(&row_with_parties("-", "-")));
        assert!(!classifier.matches_name("-"));
    }

    #[test]
    fn non_keyword_name_does_not_classify() {
        let classifier = GuangdongClassifier::default();
        assert!(!classifier.matches_row(&row_with_parties("北京某某集团", "上海某某实业")));
    }

    #[test]
    fn substring_containment_matches_inside_longer_names() {
        let classifier = GuangdongClassifier::default();
        // 中山 inside an unrelated name still matches; no word boundaries.
        assert!(classifier.matches_name("孙中山纪念基金会"));
    }

    #[test]
    fn alternate_keyword_set_is_injectable() {
        let classifier = GuangdongClassifier::new(vec!["杭州".to_string()]);
        assert!(classifier.matches_name("杭州某某网络"));
        assert!(!classifier.matches_name("广东XX有限公司"));
    }
}
