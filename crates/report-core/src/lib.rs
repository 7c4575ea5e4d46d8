//! Core pipeline for the daily M&A disclosure report.
//!
//! Pure data transformation, no I/O: raw feed records are normalized into
//! canonical report rows (with the target-date filter applied in the same
//! pass), Guangdong counterparties are classified on the side, and the
//! retained rows are summarized into an [`Analysis`] for the template layer.

pub mod analyze;
pub mod classify;
pub mod fields;
pub mod normalize;
pub mod row;

pub use analyze::{analyze, Analysis};
pub use classify::{GuangdongClassifier, GUANGDONG_KEYWORDS};
pub use fields::{labels, Coercion, FieldSpec, FIELD_SPECS, MISSING};
pub use normalize::{ProcessedData, RecordProcessor};
pub use row::{CanonicalRow, RawRecord};
