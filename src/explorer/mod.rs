//! Linked-view explorer: messages, state and the update function
//!
//! `Explorer` is the session a front end talks to. It owns the dataset and
//! the current state, feeds messages through [`update::update`] and renders
//! whatever the resulting command asks for.

pub mod msg;
pub mod state;
pub mod update;

use crate::dataset::Dataset;
use crate::render::{self, Layout, Scene, Surface};
use crate::view::{TfCounts, View};
use msg::Msg;
use state::ExplorerState;
use update::Cmd;

pub struct Explorer {
    dataset: Dataset,
    counts: TfCounts,
    state: ExplorerState,
}

impl Explorer {
    /// Start with nothing selected; `tf_count` is snapped to an allowed value
    pub fn new(dataset: Dataset, counts: TfCounts, tf_count: usize, layout: Layout) -> Self {
        let tf_count = counts.snap(tf_count);
        Self {
            dataset,
            counts,
            state: ExplorerState::new(tf_count, layout),
        }
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn counts(&self) -> &TfCounts {
        &self.counts
    }

    pub fn state(&self) -> &ExplorerState {
        &self.state
    }

    pub fn view(&self) -> View {
        self.state.view(&self.dataset)
    }

    /// Apply one message and return the command it produced
    pub fn step(&mut self, msg: Msg) -> Cmd {
        let view = self.view();
        let (next, cmd) = update::update(msg, self.state.clone(), &view, &self.counts);
        tracing::debug!(phase = ?next.phase(), tf_count = next.tf_count, "state transition");
        self.state = next;
        cmd
    }

    /// Apply one message and render the surfaces it invalidated
    pub fn dispatch(&mut self, msg: Msg) -> Scene {
        let cmd = self.step(msg);
        render::render_scene(&self.dataset, &self.state, &cmd.surfaces(), cmd.tooltip())
    }

    /// Every surface for the current state
    pub fn scene(&self) -> Scene {
        render::render_scene(&self.dataset, &self.state, Surface::ALL, None)
    }

    /// Every surface for the current state at a different layout, without
    /// changing the session
    pub fn scene_at(&self, layout: Layout) -> Scene {
        let state = ExplorerState {
            layout,
            ..self.state.clone()
        };
        render::render_scene(&self.dataset, &state, Surface::ALL, None)
    }
}
