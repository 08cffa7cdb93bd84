//! Tooltip fragments (HTML, inserted into the floating tooltip element)

use crate::dataset::CellRecord;
use crate::format::{self, escape};
use crate::view::BarSeries;

fn imputed_note(imputed: bool) -> String {
    if imputed {
        format!(
            "<br/><span style=\"color:{}\">imputed structural zero</span>",
            crate::color::IMPUTED_ACCENT
        )
    } else {
        String::new()
    }
}

/// Tooltip for a heatmap cell
pub fn cell(record: &CellRecord) -> String {
    format!(
        "<b>{}</b> × <b>{}</b><br/>total: {} records<br/>signed proportion: {}{}",
        escape(&record.tissue),
        escape(&record.tf),
        format::count(record.total),
        format::score(record.score),
        imputed_note(record.imputed),
    )
}

/// Tooltip for a stacked-bar segment
pub fn bar(tf: &str, series: &BarSeries) -> String {
    format!(
        "<b>{}</b> in <b>{}</b><br/>signed proportion: {}<br/>total: {} records{}",
        escape(tf),
        escape(&series.tissue),
        format::score(series.score),
        format::count(series.total),
        imputed_note(series.imputed),
    )
}
