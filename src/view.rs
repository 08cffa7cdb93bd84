//! Derived views over the dataset
//!
//! A view restricts the TF axis to the first N ranked TFs and recomputes the
//! aggregates the renderers scale against. Views are cheap, pure, and rebuilt
//! on every render.

use crate::dataset::{CellRecord, Dataset, TfSummary};
use serde::{Deserialize, Serialize};

/// Allowed values for the TF-count control
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TfCounts(Vec<usize>);

impl TfCounts {
    /// Build from configured values; zeros are dropped, order is normalized
    pub fn new(mut values: Vec<usize>) -> Self {
        values.retain(|&n| n > 0);
        values.sort_unstable();
        values.dedup();
        if values.is_empty() {
            return Self::default();
        }
        Self(values)
    }

    pub fn values(&self) -> &[usize] {
        &self.0
    }

    pub fn contains(&self, n: usize) -> bool {
        self.0.contains(&n)
    }

    /// Accept a user-supplied count only if it is one of the allowed values
    pub fn parse(&self, n: usize) -> Option<usize> {
        self.contains(n).then_some(n)
    }

    /// Closest allowed value (ties resolve to the smaller value)
    pub fn snap(&self, n: usize) -> usize {
        self.0
            .iter()
            .copied()
            .min_by_key(|&v| (v.abs_diff(n), v))
            .unwrap_or(n)
    }

    /// Next allowed value, wrapping around
    pub fn next(&self, current: usize) -> usize {
        match self.0.iter().position(|&v| v == current) {
            Some(i) if i + 1 < self.0.len() => self.0[i + 1],
            Some(_) => self.0[0],
            None => self.snap(current),
        }
    }

    /// Previous allowed value, wrapping around
    pub fn prev(&self, current: usize) -> usize {
        match self.0.iter().position(|&v| v == current) {
            Some(0) => self.0[self.0.len() - 1],
            Some(i) => self.0[i - 1],
            None => self.snap(current),
        }
    }

    pub fn largest(&self) -> usize {
        self.0.last().copied().unwrap_or(40)
    }
}

impl Default for TfCounts {
    fn default() -> Self {
        Self(vec![10, 20, 30, 40])
    }
}

/// One stacked bar: the three evidence classes for a tissue
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarSeries {
    pub tissue: String,
    pub plus: u64,
    pub minus: u64,
    pub unknown: u64,
    pub total: u64,
    pub score: f64,
    pub imputed: bool,
}

impl From<CellRecord> for BarSeries {
    fn from(r: CellRecord) -> Self {
        Self {
            tissue: r.tissue,
            plus: r.plus,
            minus: r.minus,
            unknown: r.unknown,
            total: r.total,
            score: r.score,
            imputed: r.imputed,
        }
    }
}

/// Top-N subset of a dataset
#[derive(Debug, Clone, PartialEq)]
pub struct View {
    pub tfs: Vec<String>,
    pub tissues: Vec<String>,
    pub matrix: Vec<CellRecord>,
    pub per_tf: Vec<TfSummary>,
    /// Largest cell total within the subset
    pub max_total: u64,
}

impl View {
    /// Restrict the dataset to its first `n` ranked TFs
    pub fn subset(dataset: &Dataset, n: usize) -> Self {
        let tfs: Vec<String> = dataset.tfs.iter().take(n).cloned().collect();
        let keep = |tf: &str| tfs.iter().any(|t| t == tf);

        let matrix: Vec<CellRecord> = dataset
            .matrix
            .iter()
            .filter(|r| keep(&r.tf))
            .cloned()
            .collect();
        let per_tf = dataset
            .per_tf
            .iter()
            .filter(|s| keep(&s.tf))
            .cloned()
            .collect();
        let max_total = matrix.iter().map(|r| r.total).max().unwrap_or(0);

        Self {
            tissues: dataset.tissues.clone(),
            tfs,
            matrix,
            per_tf,
            max_total,
        }
    }

    /// Default TF for the bar chart
    pub fn first_tf(&self) -> Option<&str> {
        self.tfs.first().map(String::as_str)
    }

    pub fn contains_tf(&self, tf: &str) -> bool {
        self.tfs.iter().any(|t| t == tf)
    }

    pub fn contains_cell(&self, tissue: &str, tf: &str) -> bool {
        self.contains_tf(tf) && self.tissues.iter().any(|t| t == tissue)
    }

    /// Record for a pair, or an imputed zero when the subset has none
    pub fn cell(&self, tissue: &str, tf: &str) -> CellRecord {
        self.matrix
            .iter()
            .find(|r| r.tissue == tissue && r.tf == tf)
            .cloned()
            .unwrap_or_else(|| CellRecord::imputed_zero(tissue, tf))
    }

    /// One series per tissue for the given TF, in tissue order
    pub fn bar_series(&self, tf: &str) -> Vec<BarSeries> {
        self.tissues
            .iter()
            .map(|tissue| BarSeries::from(self.cell(tissue, tf)))
            .collect()
    }

    /// Largest tissue total for the given TF
    pub fn bar_max(&self, tf: &str) -> u64 {
        self.bar_series(tf)
            .iter()
            .map(|s| s.total)
            .max()
            .unwrap_or(0)
    }
}
