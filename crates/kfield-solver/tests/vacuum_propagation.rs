//! Integration test: vacuum propagation through the full transform path.
//!
//! A plane wave on a periodic grid is advanced by both solvers and
//! compared against the exact travelling solution. The non-staggered
//! solver is exact for any step; the staggered one is checked for
//! bounded energy and convergence with a small step.

use kfield_core::constants::{C, PI};
use kfield_core::{FieldKind, Vec3};
use kfield_solver::{FieldSolver, Psatd, PsatdTimeStaggered};
use kfield_test_utils::{assert_vec_close, cubic_grid, max_abs_diff, plane_wave};

// ── Non-staggered ────────────────────────────────────────────────────

#[test]
fn psatd_plane_wave_matches_exact_solution() {
    for courant in [0.3, 1.0, 4.0] {
        let mut grid = cubic_grid([16, 4, 4], courant);
        let wave = plane_wave(&mut grid, 2);
        let mut solver = Psatd::new(&grid);
        for _ in 0..12 {
            solver.advance(&mut grid).unwrap();
        }
        let t = grid.global_time();
        for i in 0..16 {
            let r = grid.cell_coords([i, 1, 2]);
            assert_vec_close(grid.value(FieldKind::E, [i, 1, 2]), wave.e(r, t), 1e-9);
            assert_vec_close(grid.value(FieldKind::B, [i, 1, 2]), wave.b(r, t), 1e-9);
        }
    }
}

#[test]
fn psatd_standing_mode_rotates_into_b() {
    // E_y = cos kx, B = 0 → E_y = cos θ cos kx, B_z = sin θ sin kx.
    let mut grid = cubic_grid([8, 2, 2], 0.7);
    let k = 2.0 * PI / 8.0;
    grid.fill_with(FieldKind::E, |r| Vec3::new(0.0, (k * r.x).cos(), 0.0));
    let mut solver = Psatd::new(&grid);
    solver.advance(&mut grid).unwrap();

    let theta = k * C * grid.dt();
    for i in 0..8 {
        let x = grid.cell_coords([i, 0, 0]).x;
        let e = grid.value(FieldKind::E, [i, 0, 0]);
        let b = grid.value(FieldKind::B, [i, 0, 0]);
        assert_vec_close(e, Vec3::new(0.0, theta.cos() * (k * x).cos(), 0.0), 1e-12);
        assert_vec_close(b, Vec3::new(0.0, 0.0, theta.sin() * (k * x).sin()), 1e-12);
    }
}

#[test]
fn psatd_conserves_energy_of_divergence_free_fields() {
    let mut grid = cubic_grid([8, 8, 8], 2.5);
    // Each component is constant along its own axis.
    let kx = 2.0 * PI / 8.0;
    grid.fill_with(FieldKind::E, |r| {
        Vec3::new((kx * r.y).sin(), (kx * r.z).cos(), (2.0 * kx * r.x).sin())
    });
    grid.fill_with(FieldKind::B, |r| {
        Vec3::new((2.0 * kx * r.z).cos(), (kx * r.x).sin(), 0.0)
    });
    let before = grid.energy();

    let mut solver = Psatd::new(&grid);
    for _ in 0..20 {
        solver.advance(&mut grid).unwrap();
    }
    assert!((grid.energy() - before).abs() < 1e-9 * before);
}

#[test]
fn psatd_uniform_current_charges_zero_mode() {
    let mut grid = cubic_grid([4, 4, 4], 0.5);
    grid.fill_with(FieldKind::J, |_| Vec3::new(1.0, 0.0, -2.0));
    let mut solver = Psatd::new(&grid);
    solver.advance(&mut grid).unwrap();

    // Two half rotations, each subtracting 4π·J from the zero mode.
    let expected = Vec3::new(-8.0 * PI, 0.0, 16.0 * PI);
    assert_vec_close(grid.value(FieldKind::E, [2, 1, 3]), expected, 1e-9);
    assert_vec_close(grid.value(FieldKind::B, [2, 1, 3]), Vec3::zeros(), 1e-12);
    // J is input only.
    assert_eq!(grid.value(FieldKind::J, [2, 1, 3]), Vec3::new(1.0, 0.0, -2.0));
}

#[test]
fn psatd_result_does_not_depend_on_step_size() {
    let mut fine = cubic_grid([16, 4, 4], 0.75);
    plane_wave(&mut fine, 3);
    let mut coarse = cubic_grid([16, 4, 4], 1.5);
    plane_wave(&mut coarse, 3);

    let mut fine_solver = Psatd::new(&fine);
    let mut coarse_solver = Psatd::new(&coarse);
    for _ in 0..4 {
        fine_solver.advance(&mut fine).unwrap();
        fine_solver.advance(&mut fine).unwrap();
        coarse_solver.advance(&mut coarse).unwrap();
    }
    assert!((fine.global_time() - coarse.global_time()).abs() < 1e-9 * coarse.global_time());
    assert!(max_abs_diff(&fine, &coarse, FieldKind::E) < 1e-9);
    assert!(max_abs_diff(&fine, &coarse, FieldKind::B) < 1e-9);
}

// ── Time-staggered ───────────────────────────────────────────────────

#[test]
fn staggered_plane_wave_energy_stays_bounded() {
    let mut grid = cubic_grid([16, 4, 4], 0.5);
    plane_wave(&mut grid, 1);
    let before = grid.energy();
    let mut solver = PsatdTimeStaggered::new(&grid);
    for _ in 0..200 {
        solver.advance(&mut grid).unwrap();
        let e = grid.energy();
        assert!(e.is_finite());
        assert!(e < 1.1 * before, "energy grew to {e} from {before}");
    }
}

#[test]
fn staggered_converges_to_exact_wave_for_small_steps() {
    let mut grid = cubic_grid([16, 2, 2], 0.01);
    let wave = plane_wave(&mut grid, 1);
    let mut solver = PsatdTimeStaggered::new(&grid);
    for _ in 0..50 {
        solver.advance(&mut grid).unwrap();
    }
    let t = grid.global_time();
    for i in 0..16 {
        let r = grid.cell_coords([i, 0, 0]);
        assert_vec_close(grid.value(FieldKind::E, [i, 0, 0]), wave.e(r, t), 1e-2);
    }
}

#[test]
fn zero_fields_stay_zero() {
    let mut grid = cubic_grid([6, 4, 2], 1.0);
    let mut psatd = Psatd::new(&grid);
    let mut staggered = PsatdTimeStaggered::new(&grid);
    for _ in 0..3 {
        psatd.advance(&mut grid).unwrap();
        staggered.advance(&mut grid).unwrap();
    }
    assert_eq!(grid.energy(), 0.0);
    assert!((grid.global_time() - 6.0 * grid.dt()).abs() < 1e-9 * grid.dt());
}
