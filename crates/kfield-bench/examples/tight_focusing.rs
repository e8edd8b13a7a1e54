//! Tight-focusing scenario end to end.
//!
//! Demonstrates: build grid and mapping chain → initialise the pulse
//! through the chain → advance with PSATD → sample the field at the
//! focus through the mapped view.
//!
//! Set `RUST_LOG=kfield_solver=trace` to see per-step timings.

use kfield_bench::{focusing_pulse, tight_focusing_chain, FocusingScenario};
use kfield_core::{FieldKind, Vec3};
use kfield_mapping::{set_em_field, MappedGrid};
use kfield_solver::{FieldSolver, Psatd};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let scenario = FocusingScenario {
        cells: [32, 32, 32],
        ..Default::default()
    };
    let chain = tight_focusing_chain(&scenario).unwrap();
    let mut grid = scenario.grid().unwrap();
    set_em_field(&mut grid, &chain, |r| focusing_pulse(&scenario, r)).unwrap();
    tracing::info!(energy = grid.energy(), "pulse initialised");

    let mut solver = Psatd::new(&grid);
    let steps = 64;
    for step in 0..steps {
        solver.advance(&mut grid).unwrap();
        if step % 16 == 15 {
            let view = MappedGrid::new(&grid, &chain);
            let focus = view.e(Vec3::zeros());
            tracing::info!(
                step = step + 1,
                time = grid.global_time(),
                energy = grid.energy(),
                e_focus = focus.norm(),
                "progress"
            );
        }
    }

    let peak = grid
        .field(FieldKind::E)
        .iter()
        .flat_map(|c| c.as_slice().iter())
        .fold(0.0f64, |m, v| m.max(v.abs()));
    println!("peak |E| component after {steps} steps: {peak:.4e}");
}
