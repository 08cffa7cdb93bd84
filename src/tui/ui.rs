//! UI rendering for the TUI

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use super::app::App;
use super::views::{bars, detail, heatmap};
use crate::color::{self, Rgb};
use crate::format;

/// Screen regions, shared by drawing and mouse hit-testing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Areas {
    pub header: Rect,
    pub heatmap: Rect,
    pub bars: Rect,
    pub detail: Rect,
    pub footer: Rect,
}

pub fn areas(area: Rect) -> Areas {
    let rows = Layout::vertical([
        Constraint::Length(1), // Header
        Constraint::Min(10),   // Content
        Constraint::Length(1), // Footer/status
    ])
    .split(area);

    let body = Layout::horizontal([Constraint::Min(40), Constraint::Length(44)]).split(rows[1]);
    let left =
        Layout::vertical([Constraint::Percentage(62), Constraint::Percentage(38)]).split(body[0]);

    Areas {
        header: rows[0],
        heatmap: left[0],
        bars: left[1],
        detail: body[1],
        footer: rows[2],
    }
}

/// Area inside a one-cell border
pub fn inset(area: Rect) -> Rect {
    Rect {
        x: area.x.saturating_add(1),
        y: area.y.saturating_add(1),
        width: area.width.saturating_sub(2),
        height: area.height.saturating_sub(2),
    }
}

pub fn rgb(c: Rgb) -> Color {
    Color::Rgb(c.0, c.1, c.2)
}

/// Terminal color for a `#rrggbb` constant
pub fn hex(value: &str) -> Color {
    Rgb::parse(value).map(rgb).unwrap_or(Color::Gray)
}

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let regions = areas(frame.area());

    draw_header(frame, app, regions.header);
    heatmap::draw(frame, app, regions.heatmap);
    bars::draw(frame, app, regions.bars);
    detail::draw(frame, app, regions.detail);
    draw_footer(frame, app, regions.footer);

    if app.show_help {
        draw_help_overlay(frame, frame.area());
    }
}

fn draw_header(frame: &mut Frame, app: &App, area: Rect) {
    let explorer = app.explorer();
    let dataset = explorer.dataset();
    let state = explorer.state();
    let pinned = state
        .pinned
        .as_ref()
        .map(|key| format!(" [pinned {}]", key))
        .unwrap_or_default();

    let header_text = format!(
        " TFBS Explorer │ {} │ top {} of {} TFs │ {} tissues{}",
        dataset.title(),
        state.tf_count.min(dataset.tfs.len()),
        dataset.tfs.len(),
        dataset.tissues.len(),
        pinned
    );

    let header =
        Paragraph::new(header_text).style(Style::default().bg(Color::Blue).fg(Color::White).bold());
    frame.render_widget(header, area);
}

/// One-line tooltip for the cell under the cursor
fn tooltip_text(app: &App) -> Option<String> {
    let key = app.tooltip.as_ref()?;
    let record = app.view().cell(&key.tissue, &key.tf);
    Some(format!(
        "{} × {} │ +{} −{} ?{} │ total {} │ score {}",
        record.tissue,
        record.tf,
        format::count(record.plus),
        format::count(record.minus),
        format::count(record.unknown),
        format::count(record.total),
        format::score(record.score)
    ))
}

fn draw_footer(frame: &mut Frame, app: &App, area: Rect) {
    let keybinds = "hjkl/arrows:move  Enter:pin  Esc:leave  c:clear pin  [/]:TF count  ?:help  q:quit";

    // Status message wins, then the tooltip, then the key hints
    let footer_text = if let Some((ref msg, _)) = app.status_message {
        msg.clone()
    } else if let Some(tip) = tooltip_text(app) {
        tip
    } else {
        keybinds.to_string()
    };

    let footer = Paragraph::new(format!(" {}", footer_text))
        .style(Style::default().bg(Color::DarkGray).fg(Color::White));
    frame.render_widget(footer, area);
}

fn draw_help_overlay(frame: &mut Frame, area: Rect) {
    let popup_width = 52.min(area.width.saturating_sub(4));
    let popup_height = 20.min(area.height.saturating_sub(4));

    let popup_area = Rect {
        x: (area.width - popup_width) / 2,
        y: (area.height - popup_height) / 2,
        width: popup_width,
        height: popup_height,
    };

    frame.render_widget(Clear, popup_area);

    let help_text = r#"
  Heatmap
  ─────────────────────────────────
  h/j/k/l, arrows   Move cursor (hover)
  Enter, Space      Pin / unpin cell
  Esc               Leave the heatmap
  c                 Clear pin
  mouse             Hover, click to pin

  View
  ─────────────────────────────────
  ], n, Tab         More TFs
  [, p, Shift+Tab   Fewer TFs
  q, Ctrl+c         Quit

  Press ? or Esc to close
"#;

    let help = Paragraph::new(help_text)
        .block(
            Block::default()
                .title(" Help ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .wrap(Wrap { trim: false })
        .style(Style::default().fg(Color::White).bg(Color::Black));

    frame.render_widget(help, popup_area);
}
