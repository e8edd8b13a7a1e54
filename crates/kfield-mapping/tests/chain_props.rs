//! Property tests for mapping chains.

use kfield_core::{Axis, Vec3};
use kfield_mapping::{Mapping, MappingChain, Rotation, Scale, Shift, TightFocusingMapping};
use proptest::prelude::*;

fn axis() -> impl Strategy<Value = Axis> {
    (0usize..3).prop_map(|i| Axis::ALL[i])
}

fn vec3(range: f64) -> impl Strategy<Value = Vec3> {
    (-range..range, -range..range, -range..range).prop_map(|(x, y, z)| Vec3::new(x, y, z))
}

/// Affine stages only: no periodic wrap, so both directions are bijective.
fn affine_stage() -> impl Strategy<Value = Mapping> {
    prop_oneof![
        vec3(50.0).prop_map(|s| Mapping::from(Shift::new(s))),
        (axis(), 0.1f64..10.0, any::<bool>()).prop_map(|(a, c, neg)| {
            let c = if neg { -c } else { c };
            Mapping::from(Scale::new(a, c).unwrap())
        }),
        (axis(), -6.3f64..6.3).prop_map(|(a, t)| Mapping::from(Rotation::new(a, t).unwrap())),
        Just(Mapping::Identity),
    ]
}

fn close(a: Vec3, b: Vec3) -> bool {
    (a - b).norm() <= 1e-9 * (1.0 + a.norm().max(b.norm()))
}

proptest! {
    #[test]
    fn affine_chain_round_trips(
        stages in prop::collection::vec(affine_stage(), 0..6),
        p in vec3(100.0),
    ) {
        let chain: MappingChain = stages.into_iter().collect();

        let fwd = chain.forward(p, 0.0).unwrap();
        prop_assert!(fwd.valid);
        let back = chain.inverse(fwd.coords, 0.0);
        prop_assert!(back.valid);
        prop_assert!(close(back.coords, p), "{:?} vs {:?}", back.coords, p);

        let inv = chain.inverse(p, 0.0);
        let again = chain.forward(inv.coords, 0.0).unwrap();
        prop_assert!(close(again.coords, p), "{:?} vs {:?}", again.coords, p);
    }

    #[test]
    fn shift_then_scale_differs_from_scale_then_shift(
        s in 0.5f64..10.0,
        k in prop_oneof![0.1f64..0.9, 1.1f64..10.0],
        x in -10.0f64..10.0,
    ) {
        let shift = Shift::new(Vec3::new(s, 0.0, 0.0));
        let scale = Scale::new(Axis::X, k).unwrap();

        let mut a = MappingChain::new();
        a.push(shift);
        a.push(scale);
        let mut b = MappingChain::new();
        b.push(scale);
        b.push(shift);

        let p = Vec3::new(x, 0.0, 0.0);
        let pa = a.forward(p, 0.0).unwrap().coords;
        let pb = b.forward(p, 0.0).unwrap().coords;
        // (x + s)·k - (x·k + s) = s·(k - 1) ≠ 0
        prop_assert!((pa.x - pb.x).abs() > 1e-9);
    }

    #[test]
    fn tight_focusing_inverse_stays_in_window(p in vec3(20.0), ct in -3.0f64..3.0) {
        let tf = TightFocusingMapping::new(1.0, 0.5, 2.0, Axis::X).unwrap();
        let m = tf.inverse(p, ct / kfield_core::constants::C);
        prop_assert!(m.coords.x >= tf.min_coord() && m.coords.x < tf.max_coord());
        prop_assert_eq!(m.coords.y, p.y);
        prop_assert_eq!(m.valid, tf.if_in_area(&p, ct / kfield_core::constants::C));
    }

    #[test]
    fn tight_focusing_forward_hits_are_admissible(p in vec3(5.0), ct in -3.0f64..3.0) {
        let tf = TightFocusingMapping::new(1.0, 0.5, 2.0, Axis::X).unwrap();
        let t = ct / kfield_core::constants::C;
        let m = tf.forward(p, t).unwrap();
        if m.valid {
            prop_assert!(tf.if_in_area(&m.coords, t));
            // Only the axis component moves, by a whole number of periods.
            let periods = (m.coords.x - p.x) / tf.period();
            prop_assert!((periods - periods.round()).abs() < 1e-9);
            prop_assert_eq!(m.coords.z, p.z);
        }
    }
}

#[test]
fn literal_tight_focusing_scenario() {
    let tf = TightFocusingMapping::new(1.0, 0.5, 2.0, Axis::X).unwrap();
    let mut chain = MappingChain::new();
    chain.push(tf);

    // A point on the converging shell inside the primary window.
    let shell = chain.inverse(Vec3::new(-1.0, 0.0, 0.0), 0.0);
    assert!(shell.valid);
    assert!((shell.coords - Vec3::new(-1.0, 0.0, 0.0)).norm() < 1e-12);

    // Exactly at r_max = r0 + l/2 is excluded, in any direction.
    for dir in [Vec3::x(), -Vec3::x(), Vec3::y(), -Vec3::z()] {
        assert!(!chain.inverse(dir * 1.25, 0.0).valid);
    }
}
