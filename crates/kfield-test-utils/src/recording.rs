//! A PML that does nothing but record its hook calls.

use kfield_core::{ConfigError, Int3};
use kfield_grid::{ComplexGrid, SpectralGrid};
use kfield_solver::{Pml, PmlBuilder};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Shared, ordered log of hook names.
///
/// Cloning shares the underlying log, so a test keeps one handle and
/// hands another to the builder.
#[derive(Clone, Debug, Default)]
pub struct HookLog {
    entries: Arc<Mutex<Vec<&'static str>>>,
}

impl HookLog {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, hook: &'static str) {
        self.entries
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(hook);
    }

    /// Snapshot of all entries so far.
    pub fn entries(&self) -> Vec<&'static str> {
        self.entries
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Forget all entries.
    pub fn clear(&self) {
        self.entries
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clear();
    }
}

/// PML that leaves every field alone and appends the name of each hook
/// to a [`HookLog`]: `"b_split"`, `"e_split"`, `"b_split_post"`,
/// `"second_step"`.
#[derive(Debug)]
pub struct RecordingPml {
    thickness: Int3,
    dt: f64,
    log: HookLog,
}

impl RecordingPml {
    pub fn new(thickness: Int3, dt: f64, log: HookLog) -> Self {
        Self { thickness, dt, log }
    }

    /// Time step this PML was built for.
    pub fn dt(&self) -> f64 {
        self.dt
    }
}

impl Pml for RecordingPml {
    fn thickness(&self) -> Int3 {
        self.thickness
    }

    fn update_b_split(&mut self, _complex: &mut ComplexGrid) {
        self.log.push("b_split");
    }

    fn update_e_split(&mut self, _complex: &mut ComplexGrid) {
        self.log.push("e_split");
    }

    fn update_b_split_post(&mut self, _complex: &mut ComplexGrid) {
        self.log.push("b_split_post");
    }

    fn do_second_step(&mut self, _grid: &mut SpectralGrid) {
        self.log.push("second_step");
    }
}

/// Builds [`RecordingPml`]s sharing one log, and counts the builds.
#[derive(Clone, Debug, Default)]
pub struct RecordingPmlBuilder {
    log: HookLog,
    builds: Arc<AtomicUsize>,
    last_dt: Arc<Mutex<Option<f64>>>,
}

impl RecordingPmlBuilder {
    pub fn new(log: HookLog) -> Self {
        Self {
            log,
            ..Default::default()
        }
    }

    /// How many PMLs have been built so far.
    pub fn builds(&self) -> usize {
        self.builds.load(Ordering::Relaxed)
    }

    /// `dt` of the grid the most recent PML was built for.
    pub fn last_dt(&self) -> Option<f64> {
        *self.last_dt.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl PmlBuilder for RecordingPmlBuilder {
    fn build(&self, thickness: Int3, grid: &SpectralGrid) -> Result<Box<dyn Pml>, ConfigError> {
        self.builds.fetch_add(1, Ordering::Relaxed);
        *self.last_dt.lock().unwrap_or_else(|e| e.into_inner()) = Some(grid.dt());
        Ok(Box::new(RecordingPml::new(
            thickness,
            grid.dt(),
            self.log.clone(),
        )))
    }
}
