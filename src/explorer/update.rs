//! Explorer update function
//!
//! ```text
//! update : Msg -> State -> (State, Cmd)
//! ```
//!
//! `update` is pure: it returns the next state and a command naming the
//! surfaces the front end must redraw. Rendering itself happens in the shell.

use super::msg::Msg;
use super::state::{self, ExplorerState};
use crate::dataset::CellKey;
use crate::render::Surface;
use crate::view::{TfCounts, View};

/// Effects for the front end to carry out
#[derive(Debug, Clone, PartialEq)]
pub enum Cmd {
    None,
    Batch(Vec<Cmd>),
    /// Rebuild these surfaces from the new state
    Redraw(Vec<Surface>),
    /// Show the floating tooltip for a cell
    ShowTooltip(CellKey),
    HideTooltip,
}

impl Cmd {
    pub fn batch(cmds: Vec<Cmd>) -> Cmd {
        let mut cmds: Vec<Cmd> = cmds
            .into_iter()
            .filter(|c| !matches!(c, Cmd::None))
            .collect();
        match cmds.len() {
            0 => Cmd::None,
            1 => cmds.pop().unwrap_or(Cmd::None),
            _ => Cmd::Batch(cmds),
        }
    }

    fn redraw(surfaces: &[Surface]) -> Cmd {
        Cmd::Redraw(surfaces.to_vec())
    }

    /// Every surface this command asks to redraw, deduplicated, in render order
    pub fn surfaces(&self) -> Vec<Surface> {
        let mut out = Vec::new();
        self.collect_surfaces(&mut out);
        out.sort();
        out.dedup();
        out
    }

    fn collect_surfaces(&self, out: &mut Vec<Surface>) {
        match self {
            Cmd::Redraw(surfaces) => out.extend_from_slice(surfaces),
            Cmd::Batch(cmds) => cmds.iter().for_each(|c| c.collect_surfaces(out)),
            _ => {}
        }
    }

    /// Final tooltip effect, if any: `Some(Some(key))` show, `Some(None)` hide
    pub fn tooltip(&self) -> Option<Option<CellKey>> {
        match self {
            Cmd::ShowTooltip(key) => Some(Some(key.clone())),
            Cmd::HideTooltip => Some(None),
            Cmd::Batch(cmds) => cmds.iter().rev().find_map(Cmd::tooltip),
            _ => None,
        }
    }
}

/// Process one message against the current subset
pub fn update(msg: Msg, model: ExplorerState, view: &View, counts: &TfCounts) -> (ExplorerState, Cmd) {
    match msg {
        Msg::Noop => (model, Cmd::None),

        Msg::Hover(key) => {
            if !view.contains_cell(&key.tissue, &key.tf) {
                return (model, Cmd::None);
            }
            let changed = model.hovered.as_ref() != Some(&key);
            let detail = if changed && model.pinned.is_none() {
                Cmd::redraw(&[Surface::Detail])
            } else {
                Cmd::None
            };
            (
                ExplorerState {
                    hovered: Some(key.clone()),
                    ..model
                },
                Cmd::batch(vec![detail, Cmd::ShowTooltip(key)]),
            )
        }

        Msg::Leave => {
            let detail = if model.pinned.is_none() && model.hovered.is_some() {
                Cmd::redraw(&[Surface::Detail])
            } else {
                Cmd::None
            };
            (
                ExplorerState {
                    hovered: None,
                    ..model
                },
                Cmd::batch(vec![detail, Cmd::HideTooltip]),
            )
        }

        Msg::Click(key) => {
            if !view.contains_cell(&key.tissue, &key.tf) {
                return (model, Cmd::None);
            }
            let pinned = state::toggle_pin(model.pinned.as_ref(), &key);
            (
                ExplorerState { pinned, ..model },
                Cmd::redraw(&[Surface::Heatmap, Surface::Bars, Surface::Detail]),
            )
        }

        Msg::ClearPin => {
            if model.pinned.is_none() {
                return (model, Cmd::None);
            }
            (
                ExplorerState {
                    pinned: None,
                    hovered: None,
                    ..model
                },
                Cmd::redraw(&[Surface::Heatmap, Surface::Bars, Surface::Detail]),
            )
        }

        Msg::SetTfCount { count } => (
            ExplorerState {
                tf_count: counts.snap(count),
                pinned: None,
                hovered: None,
                ..model
            },
            Cmd::batch(vec![Cmd::redraw(Surface::ALL), Cmd::HideTooltip]),
        ),

        Msg::Resize(layout) => (
            ExplorerState {
                layout,
                pinned: None,
                hovered: None,
                ..model
            },
            Cmd::batch(vec![Cmd::redraw(Surface::ALL), Cmd::HideTooltip]),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{fixtures, Dataset};
    use crate::explorer::state::Phase;
    use crate::render::{Layout, Size};

    struct Harness {
        dataset: Dataset,
        counts: TfCounts,
        state: ExplorerState,
    }

    impl Harness {
        fn new() -> Self {
            Self {
                dataset: fixtures::small(),
                counts: TfCounts::new(vec![1, 2, 3]),
                state: ExplorerState::new(3, Layout::default()),
            }
        }

        fn send(&mut self, msg: Msg) -> Cmd {
            let view = self.state.view(&self.dataset);
            let (next, cmd) = update(msg, self.state.clone(), &view, &self.counts);
            self.state = next;
            cmd
        }

        fn bar_tf(&self) -> Option<String> {
            self.state.bar_tf(&self.state.view(&self.dataset))
        }
    }

    #[test]
    fn test_hover_sets_focus_and_tooltip() {
        let mut h = Harness::new();
        let cmd = h.send(Msg::hover("Liver", "CTCF"));
        assert_eq!(h.state.phase(), Phase::Hovering);
        assert_eq!(cmd.surfaces(), vec![Surface::Detail]);
        assert_eq!(cmd.tooltip(), Some(Some(CellKey::new("Liver", "CTCF"))));
    }

    #[test]
    fn test_moving_within_cell_only_moves_tooltip() {
        let mut h = Harness::new();
        h.send(Msg::hover("Liver", "CTCF"));
        let cmd = h.send(Msg::hover("Liver", "CTCF"));
        assert!(cmd.surfaces().is_empty());
        assert_eq!(cmd, Cmd::ShowTooltip(CellKey::new("Liver", "CTCF")));
    }

    #[test]
    fn test_leave_clears_hover() {
        let mut h = Harness::new();
        h.send(Msg::hover("Liver", "CTCF"));
        let cmd = h.send(Msg::Leave);
        assert_eq!(h.state.phase(), Phase::NoSelection);
        assert_eq!(cmd.surfaces(), vec![Surface::Detail]);
        assert_eq!(cmd.tooltip(), Some(None));
    }

    #[test]
    fn test_click_pins_and_drives_bars() {
        let mut h = Harness::new();
        let cmd = h.send(Msg::click("Brain", "SP1"));
        assert_eq!(h.state.phase(), Phase::Pinned);
        assert_eq!(h.bar_tf(), Some("SP1".to_string()));
        assert_eq!(
            cmd.surfaces(),
            vec![Surface::Heatmap, Surface::Bars, Surface::Detail]
        );
    }

    #[test]
    fn test_double_click_unpins_and_restores_first_tf() {
        let mut h = Harness::new();
        h.send(Msg::click("Brain", "SP1"));
        h.send(Msg::click("Brain", "SP1"));
        assert!(h.state.pinned.is_none());
        assert_eq!(h.bar_tf(), Some("CTCF".to_string()));
    }

    #[test]
    fn test_unpin_falls_back_to_hovered_cell() {
        let mut h = Harness::new();
        h.send(Msg::hover("Brain", "SP1"));
        h.send(Msg::click("Brain", "SP1"));
        h.send(Msg::click("Brain", "SP1"));
        assert_eq!(h.state.phase(), Phase::Hovering);
        assert_eq!(h.state.focus(), Some(&CellKey::new("Brain", "SP1")));
    }

    #[test]
    fn test_click_other_cell_moves_pin() {
        let mut h = Harness::new();
        h.send(Msg::click("Brain", "SP1"));
        h.send(Msg::click("Liver", "CTCF"));
        assert_eq!(h.state.pinned, Some(CellKey::new("Liver", "CTCF")));
        assert_eq!(h.bar_tf(), Some("CTCF".to_string()));
    }

    #[test]
    fn test_hover_while_pinned_keeps_detail() {
        let mut h = Harness::new();
        h.send(Msg::click("Brain", "SP1"));
        let cmd = h.send(Msg::hover("Liver", "CTCF"));
        assert_eq!(h.state.phase(), Phase::Pinned);
        assert_eq!(h.state.focus(), Some(&CellKey::new("Brain", "SP1")));
        assert!(cmd.surfaces().is_empty());
        // tooltip still follows the pointer
        assert_eq!(cmd.tooltip(), Some(Some(CellKey::new("Liver", "CTCF"))));

        let cmd = h.send(Msg::Leave);
        assert_eq!(h.state.phase(), Phase::Pinned);
        assert!(cmd.surfaces().is_empty());
    }

    #[test]
    fn test_clear_pin() {
        let mut h = Harness::new();
        h.send(Msg::click("Brain", "SP1"));
        let cmd = h.send(Msg::ClearPin);
        assert_eq!(h.state.phase(), Phase::NoSelection);
        assert_eq!(h.bar_tf(), Some("CTCF".to_string()));
        assert!(cmd.surfaces().contains(&Surface::Bars));

        // nothing pinned: no-op
        assert_eq!(h.send(Msg::ClearPin), Cmd::None);
    }

    #[test]
    fn test_tf_count_change_resets_everything() {
        let mut h = Harness::new();
        h.send(Msg::hover("Brain", "SP1"));
        h.send(Msg::click("Brain", "SP1"));
        let cmd = h.send(Msg::SetTfCount { count: 1 });
        assert_eq!(h.state.tf_count, 1);
        assert_eq!(h.state.phase(), Phase::NoSelection);
        assert_eq!(cmd.surfaces(), Surface::ALL.to_vec());
        assert_eq!(cmd.tooltip(), Some(None));
    }

    #[test]
    fn test_tf_count_snaps_to_allowed_value() {
        let mut h = Harness::new();
        h.send(Msg::SetTfCount { count: 17 });
        assert_eq!(h.state.tf_count, 3);
    }

    #[test]
    fn test_resize_clears_pin() {
        let mut h = Harness::new();
        h.send(Msg::click("Brain", "SP1"));
        let layout = Layout {
            heatmap: Size::new(400.0, 300.0),
            ..Layout::default()
        };
        let cmd = h.send(Msg::Resize(layout.clone()));
        assert_eq!(h.state.layout, layout);
        assert!(h.state.pinned.is_none());
        assert_eq!(cmd.surfaces(), Surface::ALL.to_vec());
    }

    #[test]
    fn test_cells_outside_subset_are_ignored() {
        let mut h = Harness::new();
        h.send(Msg::SetTfCount { count: 1 });
        assert_eq!(h.send(Msg::click("Brain", "SP1")), Cmd::None);
        assert_eq!(h.send(Msg::hover("Kidney", "CTCF")), Cmd::None);
        assert_eq!(h.state.phase(), Phase::NoSelection);
    }

    #[test]
    fn test_cmd_batch_flattening() {
        assert_eq!(Cmd::batch(vec![Cmd::None, Cmd::None]), Cmd::None);
        assert_eq!(Cmd::batch(vec![Cmd::None, Cmd::HideTooltip]), Cmd::HideTooltip);
        let cmd = Cmd::batch(vec![Cmd::redraw(&[Surface::Detail]), Cmd::HideTooltip]);
        assert!(matches!(cmd, Cmd::Batch(ref v) if v.len() == 2));
    }
}
