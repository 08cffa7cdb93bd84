//! Application state for the TUI

use std::time::{Duration, Instant};

use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;

use super::msg::Action;
use super::ui;
use super::views::heatmap::Grid;
use crate::dataset::CellKey;
use crate::explorer::msg::Msg;
use crate::explorer::Explorer;
use crate::render::{Layout, Size};
use crate::view::View;

const STATUS_TTL: Duration = Duration::from_secs(3);

/// Main application state
pub struct App {
    explorer: Explorer,

    /// Keyboard cursor as (tissue row, TF column) in the current view
    pub cursor: Option<(usize, usize)>,

    /// Cell the tooltip line describes
    pub tooltip: Option<CellKey>,

    pub show_help: bool,
    pub viewport: Rect,
    pub status_message: Option<(String, Instant)>,
}

impl App {
    pub fn new(explorer: Explorer) -> Self {
        Self {
            explorer,
            cursor: None,
            tooltip: None,
            show_help: false,
            viewport: Rect::default(),
            status_message: None,
        }
    }

    pub fn explorer(&self) -> &Explorer {
        &self.explorer
    }

    pub fn view(&self) -> View {
        self.explorer.view()
    }

    /// Feed one message through the explorer, tracking the tooltip effect
    pub fn send(&mut self, msg: Msg) {
        let cmd = self.explorer.step(msg);
        if let Some(target) = cmd.tooltip() {
            self.tooltip = target;
        }
    }

    /// Apply an input action; returns true when the app should quit
    pub fn apply(&mut self, action: Action) -> bool {
        match action {
            Action::Quit => return true,
            Action::ToggleHelp => self.show_help = !self.show_help,
            Action::MoveUp => self.move_cursor(-1, 0),
            Action::MoveDown => self.move_cursor(1, 0),
            Action::MoveLeft => self.move_cursor(0, -1),
            Action::MoveRight => self.move_cursor(0, 1),
            Action::Select => self.select(),
            Action::Leave => {
                self.cursor = None;
                self.send(Msg::Leave);
            }
            Action::ClearPin => {
                if self.explorer.state().pinned.is_some() {
                    self.cursor = None;
                    self.send(Msg::ClearPin);
                    self.set_status("Pin cleared".to_string());
                }
            }
            Action::NextTfCount => self.cycle_tf_count(true),
            Action::PrevTfCount => self.cycle_tf_count(false),
            Action::None => {}
        }
        false
    }

    pub fn cursor_key(&self) -> Option<CellKey> {
        let view = self.view();
        let (row, col) = self.cursor?;
        Some(CellKey::new(
            view.tissues.get(row)?.clone(),
            view.tfs.get(col)?.clone(),
        ))
    }

    fn move_cursor(&mut self, d_row: isize, d_col: isize) {
        let view = self.view();
        if view.tissues.is_empty() || view.tfs.is_empty() {
            return;
        }
        let (row, col) = match self.cursor {
            Some((row, col)) => (
                row.saturating_add_signed(d_row).min(view.tissues.len() - 1),
                col.saturating_add_signed(d_col).min(view.tfs.len() - 1),
            ),
            None => (0, 0),
        };
        self.cursor = Some((row, col));
        if let Some(key) = self.cursor_key() {
            self.send(Msg::Hover(key));
        }
    }

    fn select(&mut self) {
        if self.cursor.is_none() {
            self.move_cursor(0, 0);
        }
        if let Some(key) = self.cursor_key() {
            self.send(Msg::Click(key));
        }
    }

    fn cycle_tf_count(&mut self, forward: bool) {
        let counts = self.explorer.counts();
        let current = self.explorer.state().tf_count;
        let count = if forward {
            counts.next(current)
        } else {
            counts.prev(current)
        };
        self.cursor = None;
        self.send(Msg::SetTfCount { count });
        self.set_status(format!("Showing top {} TFs", count));
    }

    /// Terminal resized: re-layout, which resets the selection
    pub fn resize(&mut self, width: u16, height: u16) {
        self.viewport = Rect::new(0, 0, width, height);
        self.cursor = None;
        let areas = ui::areas(self.viewport);
        self.send(Msg::Resize(Layout {
            heatmap: Size::new(areas.heatmap.width as f64, areas.heatmap.height as f64),
            bars: Size::new(areas.bars.width as f64, areas.bars.height as f64),
            mini: Size::new(areas.detail.width as f64, areas.detail.height as f64),
        }));
    }

    /// Heatmap cell under a terminal position
    fn cell_at(&self, column: u16, row: u16) -> Option<(usize, usize)> {
        let view = self.view();
        let area = ui::inset(ui::areas(self.viewport).heatmap);
        Grid::new(area, &view, self.cursor).cell_at(column, row)
    }

    pub fn handle_mouse(&mut self, event: MouseEvent) {
        match event.kind {
            MouseEventKind::Moved => match self.cell_at(event.column, event.row) {
                Some(cell) if self.cursor != Some(cell) => {
                    self.cursor = Some(cell);
                    if let Some(key) = self.cursor_key() {
                        self.send(Msg::Hover(key));
                    }
                }
                Some(_) => {}
                None => {
                    if self.cursor.take().is_some() {
                        self.send(Msg::Leave);
                    }
                }
            },
            MouseEventKind::Down(MouseButton::Left) => {
                if let Some(cell) = self.cell_at(event.column, event.row) {
                    self.cursor = Some(cell);
                    if let Some(key) = self.cursor_key() {
                        self.send(Msg::Click(key));
                    }
                }
            }
            MouseEventKind::ScrollDown => self.move_cursor(1, 0),
            MouseEventKind::ScrollUp => self.move_cursor(-1, 0),
            _ => {}
        }
    }

    pub fn set_status(&mut self, message: String) {
        self.status_message = Some((message, Instant::now()));
    }

    /// Expire stale status messages
    pub fn tick(&mut self) {
        if self
            .status_message
            .as_ref()
            .is_some_and(|(_, at)| at.elapsed() >= STATUS_TTL)
        {
            self.status_message = None;
        }
    }
}
