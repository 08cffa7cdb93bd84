//! HTML snapshot generation

use crate::explorer::Explorer;
use crate::format::{self, escape};
use crate::render::page;
use crate::report::Summary;
use std::fmt::Write as _;
use std::io::{self, Write};

pub fn write<W: Write>(writer: &mut W, explorer: &Explorer) -> io::Result<()> {
    let dataset = explorer.dataset();
    let state = explorer.state();
    let view = explorer.view();
    let summary = Summary::from_view(&view);

    let mut caption = format!(
        "Top {} TFs · {} tissues · {} records",
        view.tfs.len(),
        view.tissues.len(),
        format::count(summary.total_records())
    );
    if let Some(pinned) = &state.pinned {
        let _ = write!(caption, " · pinned {}", pinned);
    }

    let mut notes = Vec::new();
    if let Some(meta) = &dataset.meta {
        if let Some(source) = &meta.source_file {
            notes.push(format!("Source: {}", source));
        }
        if let Some(created) = &meta.created {
            notes.push(format!("Created: {}", created));
        }
        notes.extend(meta.notes.iter().cloned());
    }

    let html = page::snapshot(
        dataset.title(),
        &explorer.scene(),
        &notes,
        &caption,
        &summary_table(&summary),
    );
    writer.write_all(html.as_bytes())
}

/// Per-TF table appended below the charts
fn summary_table(summary: &Summary) -> String {
    let mut out = String::from(
        r#"<section class="panel" style="margin:0 12px 12px"><table id="summary" style="width:100%;border-collapse:collapse;font-size:12px">
<thead><tr><th align="right">#</th><th align="left">TF</th><th align="right">+</th><th align="right">&#8722;</th><th align="right">?</th><th align="right">Total (records)</th><th align="right">Signed proportion</th><th align="left">Direction</th><th align="right">Imputed tissues</th></tr></thead>
<tbody>"#,
    );
    for row in &summary.rows {
        let _ = write!(
            out,
            r#"<tr><td align="right">{}</td><td>{}</td><td align="right">{}</td><td align="right">{}</td><td align="right">{}</td><td align="right">{}</td><td align="right">{}</td><td>{}</td><td align="right">{}</td></tr>"#,
            row.rank,
            escape(&row.tf),
            format::count(row.plus),
            format::count(row.minus),
            format::count(row.unknown),
            format::count(row.total),
            format::score(row.score),
            row.direction().label(),
            row.imputed_tissues,
        );
    }
    out.push_str("</tbody></table></section>");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{fixtures, Meta};
    use crate::explorer::msg::Msg;
    use crate::render::Layout;
    use crate::view::{TfCounts, View};

    fn render(explorer: &Explorer) -> String {
        let mut buf = Vec::new();
        write(&mut buf, explorer).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_snapshot_contains_every_surface() {
        let explorer = Explorer::new(fixtures::small(), TfCounts::new(vec![3]), 3, Layout::default());
        let html = render(&explorer);
        assert!(html.starts_with("<!DOCTYPE html>"));
        for class in ["legend", "heatmap", "bars", "mini"] {
            assert!(html.contains(&format!("class=\"{}\"", class)), "missing {}", class);
        }
        assert!(html.contains("Top 3 TFs · 2 tissues · 144 records"));
        assert!(html.contains("No selection yet."));
    }

    #[test]
    fn test_snapshot_with_pin() {
        let mut explorer =
            Explorer::new(fixtures::small(), TfCounts::new(vec![3]), 3, Layout::default());
        explorer.step(Msg::click("Brain", "SP1"));
        let html = render(&explorer);
        assert!(html.contains("pinned Brain × SP1"));
        assert!(html.contains("TF = SP1 (stacked counts by direction)"));
        assert!(html.contains("Pinned selection (click a different cell to change)"));
    }

    #[test]
    fn test_snapshot_notes_from_meta() {
        let mut ds = fixtures::small();
        ds.meta = Some(Meta {
            title: Some("Demo".into()),
            source_file: Some("tfbs.tsv".into()),
            notes: vec!["Counts are records, not sites.".into()],
            ..Meta::default()
        });
        let explorer = Explorer::new(ds, TfCounts::new(vec![3]), 3, Layout::default());
        let html = render(&explorer);
        assert!(html.contains("<title>Demo</title>"));
        assert!(html.contains("<li>Source: tfbs.tsv</li>"));
        assert!(html.contains("<li>Counts are records, not sites.</li>"));
    }

    #[test]
    fn test_summary_table_rows() {
        let view = View::subset(&fixtures::small(), 2);
        let table = summary_table(&Summary::from_view(&view));
        assert_eq!(table.matches("<tr><td").count(), 2);
        assert!(table.contains("<td>SP1</td>"));
    }
}
