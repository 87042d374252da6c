// Host-side tests for the layout generators.

use glam::Vec3;
use rand::rngs::StdRng;
use rand::SeedableRng;
use sculpt_core::*;

const SAMPLES: usize = 5_000;
const EPS: f32 = 1e-3;

fn rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

#[test]
fn scatter_points_stay_inside_the_shell() {
    let params = ScatterParams::default();
    let mut r = rng(1);
    for i in 0..SAMPLES {
        let p = sample_shell(&mut r, &params);
        let d = p.length();
        assert!(
            d >= params.min_radius - EPS && d <= params.max_radius + EPS,
            "sample {i}: radius {d} outside [{}, {}]",
            params.min_radius,
            params.max_radius
        );
    }
}

#[test]
fn scatter_directions_do_not_cluster_at_the_poles() {
    let mut r = rng(2);
    let n = 20_000;
    // Uniform directions put ~1/2 of the mass within |z| < 0.5.
    let equatorial = (0..n)
        .filter(|_| unit_direction(&mut r).z.abs() < 0.5)
        .count();
    let frac = equatorial as f32 / n as f32;
    assert!((frac - 0.5).abs() < 0.03, "equatorial fraction {frac}");
}

#[test]
fn saturn_ring_and_planet_respect_their_bounds() {
    let params = SaturnParams::default();
    let mut r = rng(3);
    let mut rings = 0;
    let mut planets = 0;
    for i in 0..SAMPLES {
        let s = sample_saturn(&mut r, &params);
        match s.branch {
            SaturnBranch::Ring => {
                rings += 1;
                let projected = Vec3::new(s.untilted.x, 0.0, s.untilted.z).length();
                assert!(
                    projected >= params.ring_inner - EPS && projected <= params.ring_outer + EPS,
                    "sample {i}: ring radius {projected}"
                );
                assert!(s.untilted.y.abs() <= params.ring_thickness / 2.0 + EPS);
            }
            SaturnBranch::Planet => {
                planets += 1;
                let d = s.untilted.length();
                assert!(
                    d >= params.shell_min * params.planet_radius - EPS
                        && d <= params.planet_radius + EPS,
                    "sample {i}: planet radius {d}"
                );
            }
        }
    }
    let planet_frac = planets as f32 / (planets + rings) as f32;
    assert!((planet_frac - 0.4).abs() < 0.03, "planet fraction {planet_frac}");
}

#[test]
fn saturn_tilt_is_a_pure_rotation_about_z() {
    let params = SaturnParams::default();
    let mut r = rng(4);
    for _ in 0..500 {
        let s = sample_saturn(&mut r, &params);
        let t = s.tilted(params.tilt);
        assert!((t.length() - s.untilted.length()).abs() < EPS);
        assert!((t.z - s.untilted.z).abs() < EPS);
    }
    // the ring plane normal leans by the tilt angle
    let normal = saturn_tilt(params.tilt) * Vec3::Y;
    assert!((normal.angle_between(Vec3::Y) - params.tilt).abs() < EPS);
}

#[test]
fn tree_branches_follow_their_shapes() {
    let params = TreeParams::default();
    let mut r = rng(5);
    let topper_centre = Vec3::new(0.0, params.height / 2.0 + params.topper_lift, 0.0);
    let mut counts = [0usize; 3];
    let n = 20_000;
    for i in 0..n {
        let s = sample_tree(&mut r, &params, false);
        let radial = Vec3::new(s.position.x, 0.0, s.position.z).length();
        match s.branch {
            TreeBranch::Topper => {
                counts[0] += 1;
                assert!(s.position.distance(topper_centre) <= params.topper_radius + EPS);
                assert!((params.scale_boost(s.branch) - 1.5).abs() < 1e-6);
            }
            TreeBranch::Ribbon => {
                counts[1] += 1;
                assert!(radial >= RIBBON_MIN_RADIUS - EPS, "sample {i}: ribbon radius {radial}");
                assert!(radial <= params.max_radius + params.ribbon_width / 2.0 + EPS);
                assert!((params.scale_boost(s.branch) - 1.8).abs() < 1e-6);
            }
            TreeBranch::Interior => {
                counts[2] += 1;
                assert!(radial <= params.max_radius + EPS, "sample {i}: interior radius {radial}");
                let half = params.height / 2.0 + params.interior_y_jitter / 2.0;
                assert!(s.position.y.abs() <= half + EPS);
            }
        }
    }
    let topper = counts[0] as f32 / n as f32;
    let ribbon = counts[1] as f32 / (counts[1] + counts[2]) as f32;
    assert!((topper - 0.03).abs() < 0.01, "topper fraction {topper}");
    assert!((ribbon - 0.35).abs() < 0.02, "ribbon fraction {ribbon}");
}

#[test]
fn accent_ornaments_prefer_the_ribbon() {
    let params = TreeParams::default();
    let mut r = rng(6);
    let (mut ribbon, mut interior) = (0usize, 0usize);
    for _ in 0..20_000 {
        match sample_tree(&mut r, &params, true).branch {
            TreeBranch::Ribbon => ribbon += 1,
            TreeBranch::Interior => interior += 1,
            TreeBranch::Topper => {}
        }
    }
    let frac = ribbon as f32 / (ribbon + interior) as f32;
    assert!((frac - 0.5).abs() < 0.02, "accent ribbon fraction {frac}");
}

#[test]
fn cone_radius_tapers_to_the_apex() {
    let params = TreeParams::default();
    assert!((params.cone_radius(0.0) - params.max_radius).abs() < 1e-6);
    assert!(params.cone_radius(1.0).abs() < 1e-6);
    let mut prev = params.cone_radius(0.0);
    for i in 1..=100 {
        let r = params.cone_radius(i as f32 / 100.0);
        assert!(r < prev, "cone radius not decreasing at step {i}");
        prev = r;
    }
}

#[test]
fn photo_targets_use_their_own_bands() {
    let params = PhotoLayoutParams::default();
    let untilt = saturn_tilt(params.tilt).inverse();
    let mut r = rng(7);
    for i in 0..SAMPLES {
        let t = photo_targets(&mut r, &params);
        let s = t.scatter.length();
        assert!(
            s >= params.scatter.min_radius - EPS && s <= params.scatter.max_radius + EPS,
            "photo {i}: scatter radius {s}"
        );
        let ring = untilt * t.saturn;
        let projected = Vec3::new(ring.x, 0.0, ring.z).length();
        assert!(
            projected >= params.ring_inner - EPS && projected <= params.ring_outer + EPS,
            "photo {i}: ring radius {projected}"
        );
        assert!(ring.y.abs() <= params.ring_thickness / 2.0 + EPS);
        assert!(t.tree.y.abs() <= params.tree_height / 2.0 + EPS);
        let radial = Vec3::new(t.tree.x, 0.0, t.tree.z).length();
        assert!(radial <= params.tree_max_radius + params.ribbon_offset + params.radial_jitter / 2.0 + EPS);
    }
}

#[test]
fn same_seed_reproduces_the_same_layout() {
    let params = LayoutParams::default();
    let mut a = rng(42);
    let mut b = rng(42);
    for _ in 0..200 {
        let la = ornament_layout(&mut a, Role::Pink, &params);
        let lb = ornament_layout(&mut b, Role::Pink, &params);
        assert_eq!(la.targets, lb.targets);
        assert_eq!(la.tree_branch, lb.tree_branch);
    }
}

#[test]
fn default_role_mix_never_draws_silver() {
    let mut r = rng(8);
    let mut seen = std::collections::HashSet::new();
    for _ in 0..10_000 {
        seen.insert(Role::sample(&mut r));
    }
    assert!(!seen.contains(&Role::Silver));
    assert_eq!(seen.len(), 5);
}

#[test]
fn focus_mode_reads_the_tree_target() {
    let t = LayoutTargets {
        tree: Vec3::X,
        scatter: Vec3::Y,
        saturn: Vec3::Z,
    };
    assert_eq!(t.for_mode(Mode::Tree), Vec3::X);
    assert_eq!(t.for_mode(Mode::Scatter), Vec3::Y);
    assert_eq!(t.for_mode(Mode::Saturn), Vec3::Z);
    assert_eq!(t.for_mode(Mode::Focus), Vec3::X);
}

#[test]
fn configured_scale_boosts_reach_the_ornament_layout() {
    let mut params = LayoutParams::default();
    params.tree.topper_scale_boost = 3.0;
    params.tree.ribbon_scale_boost = 4.0;
    let mut r = rng(21);
    let mut seen = [false; 3];
    for _ in 0..5_000 {
        let l = ornament_layout(&mut r, Role::Orange, &params);
        let expected = match l.tree_branch {
            TreeBranch::Topper => 3.0,
            TreeBranch::Ribbon => 4.0,
            TreeBranch::Interior => 1.0,
        };
        seen[l.tree_branch as usize] = true;
        assert_eq!(l.scale_boost, expected);
    }
    assert_eq!(seen, [true; 3]);
}
