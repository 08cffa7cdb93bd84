//! Static dataset loading and validation
//!
//! The dataset is a pre-built JSON document summarizing binding-site evidence
//! per (tissue, TF) pair. It is loaded once and never mutated afterwards.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Error type for dataset loading
#[derive(Debug)]
pub enum DatasetError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    Invalid(String),
}

impl std::fmt::Display for DatasetError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DatasetError::Io(e) => write!(f, "Read error: {}", e),
            DatasetError::Parse(e) => write!(f, "Malformed document: {}", e),
            DatasetError::Invalid(msg) => write!(f, "Invalid dataset: {}", msg),
        }
    }
}

impl std::error::Error for DatasetError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DatasetError::Io(e) => Some(e),
            DatasetError::Parse(e) => Some(e),
            DatasetError::Invalid(_) => None,
        }
    }
}

impl From<std::io::Error> for DatasetError {
    fn from(e: std::io::Error) -> Self {
        DatasetError::Io(e)
    }
}

impl From<serde_json::Error> for DatasetError {
    fn from(e: serde_json::Error) -> Self {
        DatasetError::Parse(e)
    }
}

pub type Result<T> = std::result::Result<T, DatasetError>;

/// Qualitative reading of a signed score
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Enriched,
    Depleted,
    Balanced,
}

impl Direction {
    pub fn from_score(score: f64) -> Self {
        if score > 0.0 {
            Direction::Enriched
        } else if score < 0.0 {
            Direction::Depleted
        } else {
            Direction::Balanced
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Direction::Enriched => "enriched",
            Direction::Depleted => "depleted",
            Direction::Balanced => "balanced",
        }
    }
}

/// Identifies one heatmap cell
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellKey {
    pub tissue: String,
    pub tf: String,
}

impl CellKey {
    pub fn new(tissue: impl Into<String>, tf: impl Into<String>) -> Self {
        Self {
            tissue: tissue.into(),
            tf: tf.into(),
        }
    }
}

impl std::fmt::Display for CellKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} × {}", self.tissue, self.tf)
    }
}

/// One (tissue, TF) matrix record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CellRecord {
    pub tissue: String,
    pub tf: String,
    pub plus: u64,
    pub minus: u64,
    pub unknown: u64,
    pub total: u64,
    pub score: f64,
    #[serde(default)]
    pub imputed: bool,
}

impl CellRecord {
    /// Build a record from raw counts, deriving total, score and the imputed flag
    pub fn from_counts(
        tissue: impl Into<String>,
        tf: impl Into<String>,
        plus: u64,
        minus: u64,
        unknown: u64,
    ) -> Self {
        let total = plus.saturating_add(minus).saturating_add(unknown);
        Self {
            tissue: tissue.into(),
            tf: tf.into(),
            plus,
            minus,
            unknown,
            total,
            score: signed_proportion(plus, minus, total),
            imputed: total == 0,
        }
    }

    /// Placeholder for a pair with no record in the document
    pub fn imputed_zero(tissue: impl Into<String>, tf: impl Into<String>) -> Self {
        Self::from_counts(tissue, tf, 0, 0, 0)
    }

    pub fn key(&self) -> CellKey {
        CellKey::new(self.tissue.clone(), self.tf.clone())
    }

    pub fn is(&self, key: &CellKey) -> bool {
        self.tissue == key.tissue && self.tf == key.tf
    }

    pub fn direction(&self) -> Direction {
        Direction::from_score(self.score)
    }

    /// Check the count invariant for this record
    pub fn check(&self) -> std::result::Result<(), String> {
        if !(-1.0..=1.0).contains(&self.score) {
            return Err(format!(
                "{} × {}: score {} outside [-1, 1]",
                self.tissue, self.tf, self.score
            ));
        }
        let sum = self
            .plus
            .checked_add(self.minus)
            .and_then(|s| s.checked_add(self.unknown))
            .ok_or_else(|| format!("{} × {}: counts overflow", self.tissue, self.tf))?;
        if self.imputed {
            if sum != 0 || self.total != 0 || self.score != 0.0 {
                return Err(format!(
                    "{} × {}: imputed record must have zero counts, total 0 and score 0",
                    self.tissue, self.tf
                ));
            }
        } else if self.total != sum {
            return Err(format!(
                "{} × {}: total {} != {} + {} + {}",
                self.tissue, self.tf, self.total, self.plus, self.minus, self.unknown
            ));
        }
        Ok(())
    }
}

/// (plus - minus) / total, or 0 for an empty cell
pub fn signed_proportion(plus: u64, minus: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        (plus as f64 - minus as f64) / total as f64
    }
}

/// Aggregate evidence for one TF across all tissues
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TfSummary {
    pub tf: String,
    pub plus: u64,
    pub minus: u64,
    pub unknown: u64,
    pub total: u64,
    pub score: f64,
}

/// Aggregate evidence for one tissue across the ranked TFs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TissueSummary {
    pub tissue: String,
    pub plus: u64,
    pub minus: u64,
    pub unknown: u64,
    pub total: u64,
}

/// Descriptive metadata attached by the preprocessing step
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Meta {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub source_file: Option<String>,
    #[serde(default)]
    pub created: Option<String>,
    #[serde(default)]
    pub notes: Vec<String>,
    #[serde(default)]
    pub axes_units: BTreeMap<String, String>,
}

/// The full immutable document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub meta: Option<Meta>,
    /// Ranked TF identifiers (most frequent first)
    pub tfs: Vec<String>,
    pub tissues: Vec<String>,
    pub matrix: Vec<CellRecord>,
    pub per_tf: Vec<TfSummary>,
    #[serde(default)]
    pub per_tissue: Vec<TissueSummary>,
    pub max_total: u64,
}

impl Dataset {
    /// Read and validate a dataset document from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        Self::from_json(&contents)
    }

    /// Parse and validate a dataset document
    pub fn from_json(json: &str) -> Result<Self> {
        let dataset: Dataset = serde_json::from_str(json)?;
        dataset.validate()?;
        Ok(dataset)
    }

    /// Reject documents that break the count invariants
    pub fn validate(&self) -> Result<()> {
        if self.tfs.is_empty() {
            return Err(DatasetError::Invalid("TF list is empty".to_string()));
        }
        for record in &self.matrix {
            record.check().map_err(DatasetError::Invalid)?;
        }
        Ok(())
    }

    pub fn title(&self) -> &str {
        self.meta
            .as_ref()
            .and_then(|m| m.title.as_deref())
            .unwrap_or("TFBS Signatures across Tissues")
    }

    /// Look up a record, or None when the document has no entry for the pair
    pub fn find(&self, tissue: &str, tf: &str) -> Option<&CellRecord> {
        self.matrix
            .iter()
            .find(|r| r.tissue == tissue && r.tf == tf)
    }

    /// Look up a record, substituting an imputed zero for missing pairs
    pub fn cell(&self, tissue: &str, tf: &str) -> CellRecord {
        self.find(tissue, tf)
            .cloned()
            .unwrap_or_else(|| CellRecord::imputed_zero(tissue, tf))
    }

    pub fn tf_summary(&self, tf: &str) -> Option<&TfSummary> {
        self.per_tf.iter().find(|s| s.tf == tf)
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    /// Two tissues, three ranked TFs, one pair missing from the matrix
    pub fn small() -> Dataset {
        let matrix = vec![
            CellRecord::from_counts("Liver", "CTCF", 30, 10, 5),
            CellRecord::from_counts("Liver", "SP1", 2, 8, 0),
            CellRecord::from_counts("Liver", "YY1", 0, 0, 0),
            CellRecord::from_counts("Brain", "CTCF", 12, 12, 1),
            CellRecord::from_counts("Brain", "SP1", 60, 0, 4),
        ];
        let per_tf = vec![
            TfSummary { tf: "CTCF".into(), plus: 42, minus: 22, unknown: 6, total: 70, score: 20.0 / 70.0 },
            TfSummary { tf: "SP1".into(), plus: 62, minus: 8, unknown: 4, total: 74, score: 54.0 / 74.0 },
            TfSummary { tf: "YY1".into(), plus: 0, minus: 0, unknown: 0, total: 0, score: 0.0 },
        ];
        Dataset {
            meta: None,
            tfs: vec!["CTCF".into(), "SP1".into(), "YY1".into()],
            tissues: vec!["Liver".into(), "Brain".into()],
            matrix,
            per_tf,
            per_tissue: vec![],
            max_total: 64,
        }
    }

    pub const EXAMPLE_JSON: &str = r#"{
        "tfs": ["TF1", "TF2"],
        "tissues": ["Liver"],
        "matrix": [
            {"tissue": "Liver", "tf": "TF1", "plus": 3, "minus": 1, "unknown": 0,
             "total": 4, "score": 0.5, "imputed": false}
        ],
        "per_tf": [],
        "max_total": 4
    }"#;
}
