//! Detail panel view - status, summary lines and the three-bar breakdown

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::color;
use crate::explorer::state::Phase;
use crate::format;
use crate::render::bars::Segment;
use crate::render::detail::{summary_lines, EMPTY_TEXT};
use crate::tui::app::App;
use crate::tui::ui::hex;
use crate::view::BarSeries;

fn status_color(phase: Phase) -> Color {
    match phase {
        Phase::NoSelection => Color::DarkGray,
        Phase::Hovering => Color::Yellow,
        Phase::Pinned => Color::Green,
    }
}

/// Draw the detail panel for the focused cell
pub fn draw(frame: &mut Frame, app: &App, area: Rect) {
    let view = app.view();
    let state = app.explorer().state();
    let phase = state.phase();

    let block = Block::default()
        .title(" Detail ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut lines: Vec<Line> = vec![
        Line::from(Span::styled(
            phase.status(),
            Style::default().fg(status_color(phase)),
        )),
        Line::from(""),
    ];

    let Some(record) = state.focus_record(&view) else {
        lines.push(Line::from(Span::styled(
            EMPTY_TEXT,
            Style::default().fg(Color::DarkGray),
        )));
        frame.render_widget(Paragraph::new(lines), inner);
        return;
    };

    for (label, value) in summary_lines(&record) {
        lines.push(Line::from(vec![
            Span::styled(format!("{} ", label), Style::default().fg(Color::White).bold()),
            Span::styled(value, Style::default().fg(Color::Gray)),
        ]));
    }
    lines.push(Line::from(""));

    // Mini chart: one bar per evidence class, scaled to the largest
    let series = BarSeries::from(record);
    let max = Segment::ALL
        .iter()
        .map(|s| s.value(&series))
        .max()
        .unwrap_or(0);
    let width = (inner.width as usize).saturating_sub(12);
    for seg in Segment::ALL {
        let v = seg.value(&series);
        let w = if max == 0 {
            0
        } else {
            ((v as f64 / max as f64) * width as f64).round() as usize
        };
        lines.push(Line::from(vec![
            Span::styled(format!("{:>2} ", seg.symbol()), Style::default().fg(Color::Gray)),
            Span::styled("█".repeat(w), Style::default().fg(hex(seg.color()))),
            Span::raw(format!(" {}", format::count(v))),
        ]));
    }

    if series.imputed {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "imputed structural zero",
            Style::default().fg(hex(color::IMPUTED_ACCENT)),
        )));
    }

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
}
