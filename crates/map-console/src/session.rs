//! A single console session: the store, its renderer and the random source.

use std::io::{BufRead, Write};
use std::rc::Rc;

use map_store::{MapRenderer, MapStore, RecordingRenderer, StoreConfig, StoreError};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::commands::{Command, Frame};
use crate::ConsoleError;

/// Totals for a replayed script.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Commands applied, including rejected ones
    pub commands: usize,
    /// Commands the store refused (missing or duplicate ids, unknown presets)
    pub rejected: usize,
    pub frames: u64,
}

/// Owns the store for the lifetime of a run.
pub struct Session<R: Rng = SmallRng> {
    store: MapStore,
    renderer: Rc<RecordingRenderer>,
    rng: R,
    /// Abort on the first rejected command instead of logging it
    strict: bool,
    frames: u64,
}

impl Session<SmallRng> {
    /// Creates a session whose particle sampling is seeded with `seed`.
    pub fn new(config: StoreConfig, seed: u64) -> Result<Self, StoreError> {
        Self::with_rng(config, SmallRng::seed_from_u64(seed))
    }
}

impl<R: Rng> Session<R> {
    /// Creates a session drawing particles from `rng`.
    pub fn with_rng(config: StoreConfig, rng: R) -> Result<Self, StoreError> {
        let mut store = MapStore::new(config)?;
        let renderer = Rc::new(RecordingRenderer::new());
        let handle: Rc<dyn MapRenderer> = renderer.clone();
        store.set_map_instance(Some(&handle));

        Ok(Self {
            store,
            renderer,
            rng,
            strict: false,
            frames: 0,
        })
    }

    /// Makes store rejections fatal.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn store(&self) -> &MapStore {
        &self.store
    }

    /// Transitions the renderer has been asked to play and not yet settled.
    /// At most one, since each camera move supersedes the previous one.
    pub fn pending_transitions(&self) -> usize {
        self.renderer.transitions().len()
    }

    /// Applies one command. Returns a frame for `derive`.
    pub fn apply(&mut self, command: Command) -> Result<Option<Frame>, StoreError> {
        let store = &mut self.store;
        match command {
            Command::SetViewState { view } => store.set_view_state(view),
            Command::FlyTo { target } => {
                if store.fly_to(&target) {
                    self.renderer.keep_latest();
                }
            }
            Command::FlyToPreset { name } => {
                if store.fly_to_preset(&name)? {
                    self.renderer.keep_latest();
                }
            }
            Command::MoveEnd { view } => {
                let settled = view.or_else(|| self.renderer.drain().last().map(|t| t.target()));
                if let Some(view) = settled {
                    store.set_view_state(view);
                }
            }
            Command::SetSimulationParams { params } => store.set_simulation_params(&params),
            Command::SetSimulationRunning { running } => store.set_simulation_running(running),
            Command::ToggleSimulation => {
                store.toggle_simulation();
            }
            Command::SetSelectedTool { tool } => store.set_selected_tool(tool),
            Command::AddLayer { layer } => store.add_layer(layer)?,
            Command::RemoveLayer { id } => {
                if store.remove_layer(&id).is_none() {
                    tracing::debug!("Layer {:?} already absent", id);
                }
            }
            Command::ToggleLayerVisibility { id } => {
                store.toggle_layer_visibility(&id)?;
            }
            Command::UpdateLayerConfig { id, patch } => store.update_layer_config(&id, &patch)?,
            Command::SetDrones { drones } => store.set_drones(drones)?,
            Command::UpdateDrone { id, patch } => store.update_drone(&id, &patch)?,
            Command::AddAnnotation { annotation } => store.add_annotation(annotation)?,
            Command::RemoveAnnotation { id } => {
                if store.remove_annotation(&id).is_none() {
                    tracing::debug!("Annotation {:?} already absent", id);
                }
            }
            Command::SetCursors { cursors } => store.set_cursors(cursors),
            Command::PruneCursors { now_ms, max_age_ms } => {
                store.prune_stale_cursors(now_ms, max_age_ms);
            }
            Command::Derive { now_ms } => return Ok(Some(self.derive(now_ms))),
        }
        Ok(None)
    }

    /// Derives the current layers, evicting stale cursors first when the
    /// configuration sets a maximum age and the caller supplies a clock.
    pub fn derive(&mut self, now_ms: Option<u64>) -> Frame {
        if let (Some(now), Some(max_age)) = (now_ms, self.store.config().derive.cursor_max_age_ms) {
            self.store.prune_stale_cursors(now, max_age);
        }

        let frame = Frame {
            sequence: self.frames,
            view_state: *self.store.view_state(),
            layers: self.store.derive_layers(&mut self.rng),
        };
        self.frames += 1;
        frame
    }

    /// Replays a JSONL script, writing one JSON frame per `derive` line.
    ///
    /// Blank lines and lines starting with `#` are skipped.
    pub fn run_script<B: BufRead, W: Write>(
        &mut self,
        script: B,
        mut output: W,
    ) -> Result<RunSummary, ConsoleError> {
        let mut summary = RunSummary::default();

        for (index, line) in script.lines().enumerate() {
            let line = line?;
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }

            let command = Command::from_json(trimmed).map_err(|source| ConsoleError::Script {
                line: index + 1,
                source,
            })?;
            summary.commands += 1;

            match self.apply(command) {
                Ok(Some(frame)) => {
                    serde_json::to_writer(&mut output, &frame).map_err(ConsoleError::Encode)?;
                    writeln!(output)?;
                    summary.frames += 1;
                }
                Ok(None) => {}
                Err(e) if self.strict => return Err(e.into()),
                Err(e) => {
                    tracing::warn!(line = index + 1, "Command rejected: {}", e);
                    summary.rejected += 1;
                }
            }
        }

        output.flush()?;
        Ok(summary)
    }
}
