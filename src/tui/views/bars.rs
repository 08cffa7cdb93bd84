//! Stacked bar view - one horizontal bar per tissue for the selected TF

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};

use crate::color;
use crate::format;
use crate::render::bars::{stack, Segment};
use crate::tui::app::App;
use crate::tui::ui::{hex, inset};
use crate::view::BarSeries;

const LABEL_WIDTH: usize = 14;
const TOTAL_WIDTH: usize = 9;

/// Cell widths of the three segments, scaled so `max` spans `width`
pub fn segment_widths(series: &BarSeries, max: u64, width: usize) -> [usize; 3] {
    if max == 0 {
        return [0; 3];
    }
    // scale stacked extents, then difference, so rounding never overflows the bar
    let scale = |v: u64| ((v as f64 / max as f64) * width as f64).round() as usize;
    stack(series).map(|(_, v0, v1)| scale(v1) - scale(v0))
}

fn segment_color(seg: Segment) -> Color {
    hex(seg.color())
}

pub fn draw(frame: &mut Frame, app: &App, area: Rect) {
    let view = app.view();
    let tf = app.explorer().state().bar_tf(&view);

    let title = match &tf {
        Some(tf) => format!(" TF = {} (stacked counts by direction) ", tf),
        None => " Bars ".to_string(),
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    frame.render_widget(block, area);

    let Some(tf) = tf else {
        return;
    };

    let inner = inset(area);
    let bar_width = (inner.width as usize).saturating_sub(LABEL_WIDTH + TOTAL_WIDTH);
    let max = view.bar_max(&tf);

    let mut lines: Vec<Line> = vec![Line::from(vec![
        Span::raw(" ".repeat(LABEL_WIDTH)),
        Span::styled("█ + ", Style::default().fg(segment_color(Segment::Plus))),
        Span::styled("█ − ", Style::default().fg(segment_color(Segment::Minus))),
        Span::styled("█ ? ", Style::default().fg(segment_color(Segment::Unknown))),
        Span::styled(" count (records)", Style::default().fg(Color::DarkGray)),
    ])];

    for series in view.bar_series(&tf).iter().take(inner.height.saturating_sub(1) as usize) {
        let label: String = series.tissue.chars().take(LABEL_WIDTH - 1).collect();
        let mut spans = vec![Span::styled(
            format!("{:<width$}", label, width = LABEL_WIDTH),
            Style::default().fg(Color::Gray),
        )];

        if series.imputed {
            spans.push(Span::styled(
                "┄┄┄ ",
                Style::default().fg(hex(color::IMPUTED_ACCENT)),
            ));
            spans.push(Span::styled(
                "imputed structural zero",
                Style::default().fg(Color::DarkGray).italic(),
            ));
        } else {
            let widths = segment_widths(series, max, bar_width);
            for (seg, w) in Segment::ALL.iter().zip(widths) {
                spans.push(Span::styled(
                    "█".repeat(w),
                    Style::default().fg(segment_color(*seg)),
                ));
            }
            spans.push(Span::styled(
                format!(" {}", format::count(series.total)),
                Style::default().fg(Color::White),
            ));
        }
        lines.push(Line::from(spans));
    }

    frame.render_widget(Paragraph::new(lines), inner);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::CellRecord;

    #[test]
    fn test_segment_widths_scale_to_max() {
        let s = BarSeries::from(CellRecord::from_counts("Liver", "CTCF", 30, 10, 5));
        let w = segment_widths(&s, 45, 45);
        assert_eq!(w, [30, 10, 5]);
        let half = segment_widths(&s, 90, 45);
        assert_eq!(half.iter().sum::<usize>(), 23);
    }

    #[test]
    fn test_segment_widths_never_exceed_bar() {
        let s = BarSeries::from(CellRecord::from_counts("Liver", "CTCF", 1, 1, 1));
        let w = segment_widths(&s, 3, 10);
        assert!(w.iter().sum::<usize>() <= 10);
    }

    #[test]
    fn test_empty_max() {
        let s = BarSeries::from(CellRecord::imputed_zero("Liver", "YY1"));
        assert_eq!(segment_widths(&s, 0, 40), [0, 0, 0]);
    }
}
