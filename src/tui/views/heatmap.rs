//! Heatmap view - tissues down, TFs across, one glyph per cell

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};

use crate::color;
use crate::dataset::CellRecord;
use crate::tui::app::App;
use crate::tui::ui::{inset, rgb};
use crate::view::View;

/// Columns reserved for tissue labels
pub const LABEL_WIDTH: u16 = 14;
/// Columns per heatmap cell
pub const CELL_WIDTH: u16 = 4;
/// Rows reserved for TF labels
pub const HEADER_ROWS: u16 = 1;

/// Visible window of the grid within an area, scrolled to keep the cursor in view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    pub area: Rect,
    pub row_offset: usize,
    pub col_offset: usize,
    pub rows: usize,
    pub cols: usize,
}

impl Grid {
    pub fn new(area: Rect, view: &View, cursor: Option<(usize, usize)>) -> Self {
        let visible_rows = area.height.saturating_sub(HEADER_ROWS) as usize;
        let visible_cols = (area.width.saturating_sub(LABEL_WIDTH) / CELL_WIDTH) as usize;
        let (cursor_row, cursor_col) = cursor.unwrap_or((0, 0));
        Self {
            area,
            row_offset: scroll_offset(cursor_row, visible_rows),
            col_offset: scroll_offset(cursor_col, visible_cols),
            rows: visible_rows.min(view.tissues.len()),
            cols: visible_cols.min(view.tfs.len()),
        }
    }

    /// (row, col) in view coordinates under a terminal position
    pub fn cell_at(&self, x: u16, y: u16) -> Option<(usize, usize)> {
        let top = self.area.y + HEADER_ROWS;
        let left = self.area.x + LABEL_WIDTH;
        if y < top || x < left {
            return None;
        }
        let row = (y - top) as usize;
        let col = ((x - left) / CELL_WIDTH) as usize;
        (row < self.rows && col < self.cols).then_some((row + self.row_offset, col + self.col_offset))
    }

    /// Terminal position of the glyph for a view cell, if visible
    pub fn position(&self, row: usize, col: usize) -> Option<(u16, u16)> {
        let row = row.checked_sub(self.row_offset).filter(|r| *r < self.rows)?;
        let col = col.checked_sub(self.col_offset).filter(|c| *c < self.cols)?;
        Some((
            self.area.x + LABEL_WIDTH + col as u16 * CELL_WIDTH + 1,
            self.area.y + HEADER_ROWS + row as u16,
        ))
    }
}

/// First visible index so that `cursor` stays within `visible` slots
pub fn scroll_offset(cursor: usize, visible: usize) -> usize {
    if visible == 0 {
        0
    } else {
        cursor.saturating_sub(visible - 1)
    }
}

/// Glyph sized by the square root of the total, relative to the subset maximum
pub fn glyph(record: &CellRecord, max_total: u64) -> &'static str {
    if record.imputed {
        return "∘";
    }
    if record.total == 0 || max_total == 0 {
        return "·";
    }
    let ratio = (record.total as f64 / max_total as f64).sqrt();
    if ratio < 0.34 {
        "∙"
    } else if ratio < 0.67 {
        "•"
    } else {
        "●"
    }
}

fn cell_color(record: &CellRecord) -> Color {
    if record.total == 0 {
        Color::DarkGray
    } else {
        rgb(color::signed_color(record.score))
    }
}

fn fit(label: &str, width: usize) -> String {
    let mut out: String = label.chars().take(width).collect();
    let len = out.chars().count();
    out.push_str(&" ".repeat(width - len));
    out
}

pub fn draw(frame: &mut Frame, app: &App, area: Rect) {
    let view = app.view();
    let state = app.explorer().state();

    let block = Block::default()
        .title(format!(" Heatmap · top {} TFs ", view.tfs.len()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    frame.render_widget(block, area);

    let inner = inset(area);
    let grid = Grid::new(inner, &view, app.cursor);
    let mut lines: Vec<Line> = Vec::with_capacity(grid.rows + 1);

    let mut header = vec![Span::raw(" ".repeat(LABEL_WIDTH as usize))];
    for tf in view.tfs.iter().skip(grid.col_offset).take(grid.cols) {
        header.push(Span::styled(
            fit(tf, CELL_WIDTH as usize),
            Style::default().fg(Color::Gray),
        ));
    }
    lines.push(Line::from(header));

    let hovered = state.hovered.as_ref();
    for tissue in view.tissues.iter().skip(grid.row_offset).take(grid.rows) {
        let mut spans = vec![Span::styled(
            fit(tissue, LABEL_WIDTH as usize - 1) + " ",
            Style::default().fg(Color::Gray),
        )];
        for tf in view.tfs.iter().skip(grid.col_offset).take(grid.cols) {
            let record = view.cell(tissue, tf);
            let key = record.key();
            let mut style = Style::default().fg(cell_color(&record));
            if hovered == Some(&key) {
                style = style.bg(Color::Rgb(48, 52, 72));
            }
            let (open, close) = if state.is_pinned(&key) {
                style = style.bold();
                ("[", "] ")
            } else {
                (" ", "  ")
            };
            spans.push(Span::styled(open, Style::default().fg(Color::White).bold()));
            spans.push(Span::styled(glyph(&record, view.max_total), style));
            spans.push(Span::styled(close, Style::default().fg(Color::White).bold()));
        }
        lines.push(Line::from(spans));
    }

    frame.render_widget(Paragraph::new(lines), inner);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::fixtures;

    #[test]
    fn test_glyph_sizes() {
        let max = 64;
        assert_eq!(glyph(&CellRecord::from_counts("a", "b", 64, 0, 0), max), "●");
        assert_eq!(glyph(&CellRecord::from_counts("a", "b", 16, 0, 0), max), "•");
        assert_eq!(glyph(&CellRecord::from_counts("a", "b", 1, 0, 0), max), "∙");
        assert_eq!(glyph(&CellRecord::imputed_zero("a", "b"), max), "∘");
    }

    #[test]
    fn test_scroll_offset() {
        assert_eq!(scroll_offset(3, 10), 0);
        assert_eq!(scroll_offset(12, 10), 3);
        assert_eq!(scroll_offset(5, 0), 0);
    }

    #[test]
    fn test_grid_hit_testing() {
        let view = View::subset(&fixtures::small(), 3);
        let grid = Grid::new(Rect::new(1, 1, 60, 10), &view, None);
        assert_eq!(grid.rows, 2);
        assert_eq!(grid.cols, 3);
        let (x, y) = grid.position(1, 2).unwrap();
        assert_eq!(grid.cell_at(x, y), Some((1, 2)));
        // label column and header row are not cells
        assert_eq!(grid.cell_at(2, y), None);
        assert_eq!(grid.cell_at(x, 1), None);
        assert_eq!(grid.position(2, 0), None);
    }

    #[test]
    fn test_grid_scrolls_to_cursor() {
        let view = View::subset(&fixtures::small(), 3);
        // room for two columns only
        let grid = Grid::new(Rect::new(0, 0, LABEL_WIDTH + CELL_WIDTH * 2, 5), &view, Some((0, 2)));
        assert_eq!(grid.col_offset, 1);
        assert!(grid.position(0, 2).is_some());
        assert!(grid.position(0, 0).is_none());
    }

    #[test]
    fn test_fit_pads_and_truncates() {
        assert_eq!(fit("CTCF", 6), "CTCF  ");
        assert_eq!(fit("Hippocampus", 5), "Hippo");
    }
}
