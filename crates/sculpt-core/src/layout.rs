//! Target-position generators for every layout.
//!
//! Each particle samples one point per layout at construction time and keeps
//! it for its whole life; a mode switch only changes which point is pursued.
//! All sampling goes through the caller's RNG, so a seeded RNG reproduces the
//! same cloud exactly.
//!
//! The silhouettes:
//! - **Tree**: a cone tapering with `1 - t^0.85`, a small spherical topper above
//!   the apex, a six-turn spiral ribbon, and an area-uniform interior fill.
//! - **Scatter**: a thick spherical shell, uniform in direction.
//! - **Saturn**: a planet body biased toward its surface plus an area-uniform
//!   ring annulus, the whole thing tilted about Z.

use crate::constants::*;
use crate::mode::Mode;
use glam::{Quat, Vec3};
use rand::Rng;
use std::f32::consts::TAU;

/// Colour class of an ornament. Each role is rendered as one material batch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Role {
    DarkBlue,
    Purple,
    Pink,
    LightBlue,
    Silver,
    Orange,
}

impl Role {
    pub const ALL: [Role; 6] = [
        Role::DarkBlue,
        Role::Purple,
        Role::Pink,
        Role::LightBlue,
        Role::Silver,
        Role::Orange,
    ];

    pub fn color_rgb(self) -> [f32; 3] {
        match self {
            Role::DarkBlue => rgb(0x0f1746),
            Role::Purple => rgb(0x8a4fff),
            Role::Pink => rgb(0xffaacc),
            Role::LightBlue => rgb(0xa6e3e9),
            Role::Silver => rgb(0xffffff),
            Role::Orange => rgb(0xff8800),
        }
    }

    /// Maximum number of instances in this role's batch.
    pub fn capacity(self) -> usize {
        match self {
            Role::DarkBlue => 3_000,
            Role::Purple => 5_000,
            Role::Pink => 5_000,
            Role::LightBlue => 8_000,
            Role::Silver => 500,
            Role::Orange => 1_000,
        }
    }

    /// Accent ornaments favour the ribbon.
    pub fn is_accent(self) -> bool {
        matches!(self, Role::Orange)
    }

    /// Draw a role from the default mix: mostly light blue, pink and purple,
    /// a few warm accents. Silver is never drawn.
    pub fn sample<R: Rng + ?Sized>(rng: &mut R) -> Role {
        let r: f32 = rng.gen();
        if r < 0.05 {
            Role::Orange
        } else if r < 0.30 {
            Role::Pink
        } else if r < 0.55 {
            Role::Purple
        } else if r < 0.90 {
            Role::LightBlue
        } else {
            Role::DarkBlue
        }
    }
}

/// One point per persistent layout. FOCUS has no stored target.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LayoutTargets {
    pub tree: Vec3,
    pub scatter: Vec3,
    pub saturn: Vec3,
}

impl LayoutTargets {
    /// Stored target for `mode`; FOCUS falls back to the tree point.
    pub fn for_mode(&self, mode: Mode) -> Vec3 {
        match mode {
            Mode::Scatter => self.scatter,
            Mode::Saturn => self.saturn,
            Mode::Tree | Mode::Focus => self.tree,
        }
    }
}

#[derive(Clone, Debug)]
pub struct TreeParams {
    pub height: f32,
    pub max_radius: f32,
    pub taper_exponent: f32,
    pub topper_probability: f32,
    pub topper_radius: f32,
    pub topper_lift: f32,
    pub ribbon_probability: f32,
    pub ribbon_probability_accent: f32,
    pub ribbon_loops: f32,
    pub ribbon_width: f32,
    pub interior_y_jitter: f32,
    pub topper_scale_boost: f32,
    pub ribbon_scale_boost: f32,
}

impl Default for TreeParams {
    fn default() -> Self {
        Self {
            height: TREE_HEIGHT,
            max_radius: TREE_MAX_RADIUS,
            taper_exponent: TREE_TAPER_EXPONENT,
            topper_probability: TOPPER_PROBABILITY,
            topper_radius: TOPPER_RADIUS,
            topper_lift: TOPPER_LIFT,
            ribbon_probability: RIBBON_PROBABILITY,
            ribbon_probability_accent: RIBBON_PROBABILITY_ACCENT,
            ribbon_loops: RIBBON_LOOPS,
            ribbon_width: RIBBON_WIDTH,
            interior_y_jitter: INTERIOR_Y_JITTER,
            topper_scale_boost: TOPPER_SCALE_BOOST,
            ribbon_scale_boost: RIBBON_SCALE_BOOST,
        }
    }
}

impl TreeParams {
    /// Cone radius at normalized height `t` in 0..1.
    #[inline]
    pub fn cone_radius(&self, t: f32) -> f32 {
        self.max_radius * (1.0 - t.powf(self.taper_exponent))
    }

    /// Multiplier applied to a particle's base scale on the given branch.
    pub fn scale_boost(&self, branch: TreeBranch) -> f32 {
        match branch {
            TreeBranch::Topper => self.topper_scale_boost,
            TreeBranch::Ribbon => self.ribbon_scale_boost,
            TreeBranch::Interior => 1.0,
        }
    }
}

#[derive(Clone, Debug)]
pub struct ScatterParams {
    pub min_radius: f32,
    pub max_radius: f32,
}

impl Default for ScatterParams {
    fn default() -> Self {
        Self {
            min_radius: SCATTER_MIN_RADIUS,
            max_radius: SCATTER_MAX_RADIUS,
        }
    }
}

#[derive(Clone, Debug)]
pub struct SaturnParams {
    pub planet_probability: f32,
    pub planet_radius: f32,
    pub shell_min: f32,
    pub ring_inner: f32,
    pub ring_outer: f32,
    pub ring_thickness: f32,
    pub tilt: f32,
}

impl Default for SaturnParams {
    fn default() -> Self {
        Self {
            planet_probability: PLANET_PROBABILITY,
            planet_radius: PLANET_RADIUS,
            shell_min: PLANET_SHELL_MIN,
            ring_inner: RING_INNER_RADIUS,
            ring_outer: RING_OUTER_RADIUS,
            ring_thickness: RING_THICKNESS,
            tilt: SATURN_TILT,
        }
    }
}

/// Photos are few and must stay legible, so they get wider orbits and sit
/// only on the ribbon (tree) or inside the ring band (saturn).
#[derive(Clone, Debug)]
pub struct PhotoLayoutParams {
    pub tree_height: f32,
    pub tree_max_radius: f32,
    pub taper_exponent: f32,
    pub ribbon_loops: f32,
    pub ribbon_offset: f32,
    pub radial_jitter: f32,
    pub angle_jitter: f32,
    pub scatter: ScatterParams,
    pub ring_inner: f32,
    pub ring_outer: f32,
    pub ring_thickness: f32,
    pub tilt: f32,
}

impl Default for PhotoLayoutParams {
    fn default() -> Self {
        Self {
            tree_height: PHOTO_TREE_HEIGHT,
            tree_max_radius: PHOTO_TREE_MAX_RADIUS,
            taper_exponent: TREE_TAPER_EXPONENT,
            ribbon_loops: RIBBON_LOOPS,
            ribbon_offset: PHOTO_RIBBON_OFFSET,
            radial_jitter: PHOTO_RADIAL_JITTER,
            angle_jitter: PHOTO_ANGLE_JITTER,
            scatter: ScatterParams {
                min_radius: PHOTO_SCATTER_MIN_RADIUS,
                max_radius: PHOTO_SCATTER_MAX_RADIUS,
            },
            ring_inner: PHOTO_RING_INNER_RADIUS,
            ring_outer: PHOTO_RING_OUTER_RADIUS,
            ring_thickness: PHOTO_RING_THICKNESS,
            tilt: SATURN_TILT,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct LayoutParams {
    pub tree: TreeParams,
    pub scatter: ScatterParams,
    pub saturn: SaturnParams,
    pub photo: PhotoLayoutParams,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TreeBranch {
    Topper,
    Ribbon,
    Interior,
}

#[derive(Clone, Copy, Debug)]
pub struct TreeSample {
    pub position: Vec3,
    pub branch: TreeBranch,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SaturnBranch {
    Planet,
    Ring,
}

/// Saturn point before the tilt is applied, so ring/planet bounds can be
/// checked in the planet's own frame.
#[derive(Clone, Copy, Debug)]
pub struct SaturnSample {
    pub untilted: Vec3,
    pub branch: SaturnBranch,
}

impl SaturnSample {
    pub fn tilted(&self, tilt: f32) -> Vec3 {
        saturn_tilt(tilt) * self.untilted
    }
}

/// Everything an ornament needs from the generator.
#[derive(Clone, Copy, Debug)]
pub struct OrnamentLayout {
    pub targets: LayoutTargets,
    pub tree_branch: TreeBranch,
    pub scale_boost: f32,
}

#[inline]
fn centered<R: Rng + ?Sized>(rng: &mut R, span: f32) -> f32 {
    (rng.gen::<f32>() - 0.5) * span
}

/// Uniform direction on the unit sphere. Sampling cos(polar) uniformly keeps
/// the poles from clustering.
#[inline]
pub fn unit_direction<R: Rng + ?Sized>(rng: &mut R) -> Vec3 {
    let theta = rng.gen::<f32>() * TAU;
    let phi = (2.0 * rng.gen::<f32>() - 1.0).clamp(-1.0, 1.0).acos();
    Vec3::new(
        phi.sin() * theta.cos(),
        phi.sin() * theta.sin(),
        phi.cos(),
    )
}

/// Rotation applied to the whole saturn configuration.
#[inline]
pub fn saturn_tilt(angle: f32) -> Quat {
    Quat::from_rotation_z(angle)
}

pub fn sample_tree<R: Rng + ?Sized>(rng: &mut R, params: &TreeParams, accent: bool) -> TreeSample {
    let h = params.height;
    if rng.gen::<f32>() < params.topper_probability {
        let r = rng.gen::<f32>() * params.topper_radius;
        let centre = Vec3::new(0.0, h / 2.0 + params.topper_lift, 0.0);
        return TreeSample {
            position: centre + unit_direction(rng) * r,
            branch: TreeBranch::Topper,
        };
    }

    let t: f32 = rng.gen();
    let y = t * h - h / 2.0;
    let cone_r = params.cone_radius(t);
    let ribbon_prob = if accent {
        params.ribbon_probability_accent
    } else {
        params.ribbon_probability
    };

    if rng.gen::<f32>() < ribbon_prob {
        let spiral_theta = t * TAU * params.ribbon_loops;
        let width = params.ribbon_width * (1.0 - t * 0.4);
        let r_offset = centered(rng, width);
        let y_offset = centered(rng, width * 0.6);
        let theta_offset = centered(rng, 0.3);
        let r = (cone_r + r_offset).max(RIBBON_MIN_RADIUS);
        let theta = spiral_theta + theta_offset;
        TreeSample {
            position: Vec3::new(theta.cos() * r, y + y_offset, theta.sin() * r),
            branch: TreeBranch::Ribbon,
        }
    } else {
        let theta = rng.gen::<f32>() * TAU;
        // sqrt keeps the areal density of each slice uniform
        let r = cone_r * rng.gen::<f32>().sqrt();
        let y = y + centered(rng, params.interior_y_jitter);
        TreeSample {
            position: Vec3::new(theta.cos() * r, y, theta.sin() * r),
            branch: TreeBranch::Interior,
        }
    }
}

/// Point on a shell whose radius is uniform in `[min_radius, max_radius)`.
pub fn sample_shell<R: Rng + ?Sized>(rng: &mut R, params: &ScatterParams) -> Vec3 {
    let r = params.min_radius + rng.gen::<f32>() * (params.max_radius - params.min_radius);
    unit_direction(rng) * r
}

pub fn sample_saturn<R: Rng + ?Sized>(rng: &mut R, params: &SaturnParams) -> SaturnSample {
    if rng.gen::<f32>() < params.planet_probability {
        let radius = params.planet_radius
            * (params.shell_min + rng.gen::<f32>() * (1.0 - params.shell_min));
        SaturnSample {
            untilted: unit_direction(rng) * radius,
            branch: SaturnBranch::Planet,
        }
    } else {
        let span = params.ring_outer - params.ring_inner;
        let r = rng.gen::<f32>().sqrt() * span + params.ring_inner;
        let theta = rng.gen::<f32>() * TAU;
        let y = centered(rng, params.ring_thickness);
        SaturnSample {
            untilted: Vec3::new(r * theta.cos(), y, r * theta.sin()),
            branch: SaturnBranch::Ring,
        }
    }
}

pub fn ornament_layout<R: Rng + ?Sized>(
    rng: &mut R,
    role: Role,
    params: &LayoutParams,
) -> OrnamentLayout {
    let tree = sample_tree(rng, &params.tree, role.is_accent());
    let scatter = sample_shell(rng, &params.scatter);
    let saturn = sample_saturn(rng, &params.saturn);
    OrnamentLayout {
        targets: LayoutTargets {
            tree: tree.position,
            scatter,
            saturn: saturn.tilted(params.saturn.tilt),
        },
        tree_branch: tree.branch,
        scale_boost: params.tree.scale_boost(tree.branch),
    }
}

pub fn photo_targets<R: Rng + ?Sized>(rng: &mut R, params: &PhotoLayoutParams) -> LayoutTargets {
    let h = params.tree_height;
    let t: f32 = rng.gen();
    let y = t * h - h / 2.0;
    let cone_r = params.tree_max_radius * (1.0 - t.powf(params.taper_exponent));
    let theta_base = t * TAU * params.ribbon_loops;
    let r = cone_r + params.ribbon_offset + centered(rng, params.radial_jitter);
    let theta = theta_base + centered(rng, params.angle_jitter);
    let tree = Vec3::new(theta.cos() * r, y, theta.sin() * r);

    let scatter = sample_shell(rng, &params.scatter);

    // Linear radial sampling: photos are too few for density to matter.
    let ring_r = params.ring_inner + rng.gen::<f32>() * (params.ring_outer - params.ring_inner);
    let ring_theta = rng.gen::<f32>() * TAU;
    let ring = Vec3::new(
        ring_r * ring_theta.cos(),
        centered(rng, params.ring_thickness),
        ring_r * ring_theta.sin(),
    );

    LayoutTargets {
        tree,
        scatter,
        saturn: saturn_tilt(params.tilt) * ring,
    }
}
