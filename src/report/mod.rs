//! Static exports: HTML snapshots and the per-TF summary table

pub mod html;

use crate::dataset::{Direction, TfSummary};
use crate::explorer::Explorer;
use crate::view::View;
use chrono::{DateTime, TimeZone};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

pub const REPORT_DIR: &str = "tfbs-reports";

/// One row of the per-TF summary
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryRow {
    pub rank: usize,
    pub tf: String,
    pub plus: u64,
    pub minus: u64,
    pub unknown: u64,
    pub total: u64,
    pub score: f64,
    /// Tissues with an imputed (structural zero) cell for this TF
    pub imputed_tissues: usize,
}

impl SummaryRow {
    pub fn direction(&self) -> Direction {
        Direction::from_score(self.score)
    }
}

/// Per-TF aggregates for the TFs in a view, in rank order
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub rows: Vec<SummaryRow>,
    pub tissues: usize,
}

impl Summary {
    pub fn from_view(view: &View) -> Self {
        let rows = view
            .tfs
            .iter()
            .enumerate()
            .map(|(i, tf)| {
                let agg = view
                    .per_tf
                    .iter()
                    .find(|s| &s.tf == tf)
                    .cloned()
                    .unwrap_or_else(|| aggregate(view, tf));
                let imputed_tissues = view
                    .tissues
                    .iter()
                    .filter(|t| view.cell(t, tf).imputed)
                    .count();
                SummaryRow {
                    rank: i + 1,
                    tf: agg.tf,
                    plus: agg.plus,
                    minus: agg.minus,
                    unknown: agg.unknown,
                    total: agg.total,
                    score: agg.score,
                    imputed_tissues,
                }
            })
            .collect();
        Self {
            rows,
            tissues: view.tissues.len(),
        }
    }

    pub fn total_records(&self) -> u64 {
        self.rows.iter().fold(0, |acc, r| acc.saturating_add(r.total))
    }
}

/// Sum a TF's cells when the document carries no precomputed summary
fn aggregate(view: &View, tf: &str) -> TfSummary {
    let (plus, minus, unknown) = view
        .matrix
        .iter()
        .filter(|r| r.tf == tf)
        .fold((0u64, 0u64, 0u64), |(p, m, u), r| {
            (
                p.saturating_add(r.plus),
                m.saturating_add(r.minus),
                u.saturating_add(r.unknown),
            )
        });
    let total = plus.saturating_add(minus).saturating_add(unknown);
    TfSummary {
        tf: tf.to_string(),
        plus,
        minus,
        unknown,
        total,
        score: crate::dataset::signed_proportion(plus, minus, total),
    }
}

/// `tfbs-reports/tfbs_snapshot_<timestamp>.html`
pub fn default_path<Tz: TimeZone>(report_dir: &Path, now: &DateTime<Tz>) -> PathBuf
where
    Tz::Offset: std::fmt::Display,
{
    let timestamp = now.format("%Y%m%d_%H%M%S");
    report_dir.join(format!("tfbs_snapshot_{}.html", timestamp))
}

/// Write an HTML snapshot of the explorer's current state
pub fn generate(path: &Path, explorer: &Explorer) -> io::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let mut writer = BufWriter::new(File::create(path)?);
    html::write(&mut writer, explorer)?;
    writer.flush()?;
    tracing::info!(path = %path.display(), "snapshot written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::fixtures;
    use crate::render::Layout;
    use crate::view::TfCounts;
    use chrono::Utc;
    use tempfile::TempDir;

    #[test]
    fn test_summary_uses_document_aggregates() {
        let view = View::subset(&fixtures::small(), 3);
        let summary = Summary::from_view(&view);
        assert_eq!(summary.rows.len(), 3);
        assert_eq!(summary.tissues, 2);
        assert_eq!(summary.rows[0].tf, "CTCF");
        assert_eq!(summary.rows[0].rank, 1);
        assert_eq!(summary.rows[1].total, 74);
        assert_eq!(summary.rows[2].imputed_tissues, 2);
        assert_eq!(summary.rows[2].direction(), Direction::Balanced);
        assert_eq!(summary.total_records(), 144);
    }

    #[test]
    fn test_summary_aggregates_missing_rows() {
        let mut ds = fixtures::small();
        ds.per_tf.clear();
        let view = View::subset(&ds, 2);
        let summary = Summary::from_view(&view);
        let ctcf = &summary.rows[0];
        assert_eq!((ctcf.plus, ctcf.minus, ctcf.unknown), (42, 22, 6));
        assert_eq!(ctcf.total, 70);
        assert!((ctcf.score - 20.0 / 70.0).abs() < 1e-12);
    }

    #[test]
    fn test_aggregate_saturates_huge_counts() {
        let mut ds = fixtures::small();
        ds.per_tf.clear();
        ds.matrix[0].plus = u64::MAX;
        ds.matrix[0].total = u64::MAX;
        let view = View::subset(&ds, 1);
        let summary = Summary::from_view(&view);
        let ctcf = &summary.rows[0];
        assert_eq!(ctcf.plus, u64::MAX);
        assert_eq!(ctcf.total, u64::MAX);
        assert_eq!(summary.total_records(), u64::MAX);
    }

    #[test]
    fn test_default_path() {
        let now = Utc.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap();
        let path = default_path(Path::new(REPORT_DIR), &now);
        assert_eq!(path, PathBuf::from("tfbs-reports/tfbs_snapshot_20240309_140507.html"));
    }

    #[test]
    fn test_generate_creates_directories() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("snap.html");
        let explorer = Explorer::new(fixtures::small(), TfCounts::new(vec![3]), 3, Layout::default());
        generate(&path, &explorer).unwrap();
        let html = std::fs::read_to_string(&path).unwrap();
        assert!(html.contains("class=\"heatmap\""));
    }
}
