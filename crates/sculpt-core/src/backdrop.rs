//! Decorative background: a dust ring under the tree and a slowly turning
//! three-arm galaxy. Neither takes part in mode changes.

use crate::constants::*;
use glam::{EulerRot, Mat4, Vec3};
use rand::Rng;
use std::f32::consts::{PI, TAU};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BackdropPoint {
    pub position: Vec3,
    pub color: [f32; 3],
}

#[derive(Clone, Debug, Default)]
pub struct Backdrop {
    /// Lives in the particle group and turns with it.
    pub dust: Vec<BackdropPoint>,
    /// Lives in world space under [`Backdrop::galaxy_transform`].
    pub galaxy: Vec<BackdropPoint>,
    galaxy_yaw: f32,
}

#[inline]
fn signed_cubic<R: Rng + ?Sized>(rng: &mut R) -> f32 {
    let sign = if rng.gen::<f32>() < 0.5 { 1.0 } else { -1.0 };
    rng.gen::<f32>().powi(3) * sign * GALAXY_SCATTER
}

impl Backdrop {
    pub fn generate<R: Rng + ?Sized>(rng: &mut R, dust_count: usize, galaxy_count: usize) -> Self {
        let dust_rgb = rgb(DUST_RGB);
        let dust = (0..dust_count)
            .map(|_| {
                let r = DUST_MIN_RADIUS + rng.gen::<f32>() * DUST_RADIUS_SPAN;
                let theta = rng.gen::<f32>() * TAU;
                let y = DUST_HEIGHT + (rng.gen::<f32>() - 0.5) * DUST_HEIGHT_SPAN;
                BackdropPoint {
                    position: Vec3::new(theta.cos() * r, y, theta.sin() * r),
                    color: dust_rgb,
                }
            })
            .collect();

        let inner = Vec3::from(rgb(GALAXY_INNER_RGB));
        let outer = Vec3::from(rgb(GALAXY_OUTER_RGB));
        let galaxy = (0..galaxy_count)
            .map(|i| {
                let radius = rng.gen::<f32>() * GALAXY_RADIUS_SPAN + GALAXY_MIN_RADIUS;
                let spin = radius * GALAXY_SPIN_PER_UNIT;
                let branch = (i % GALAXY_ARMS) as f32 * (TAU / GALAXY_ARMS as f32);
                let jitter = Vec3::new(
                    signed_cubic(rng),
                    signed_cubic(rng),
                    signed_cubic(rng),
                );
                let y = (rng.gen::<f32>() - 0.5) * radius * GALAXY_THICKNESS;
                let position = Vec3::new(
                    (branch + spin).cos() * radius,
                    y,
                    (branch + spin).sin() * radius,
                ) + jitter;
                let t = ((radius - GALAXY_MIN_RADIUS) / GALAXY_RADIUS_SPAN).clamp(0.0, 1.0);
                BackdropPoint {
                    position,
                    color: inner.lerp(outer, t).to_array(),
                }
            })
            .collect();

        Self {
            dust,
            galaxy,
            galaxy_yaw: 0.0,
        }
    }

    pub fn advance(&mut self, dt: f32) {
        self.galaxy_yaw += GALAXY_SPIN_RATE * dt;
    }

    pub fn galaxy_yaw(&self) -> f32 {
        self.galaxy_yaw
    }

    pub fn galaxy_transform(&self) -> Mat4 {
        Mat4::from_euler(EulerRot::XYZ, PI / 4.0, self.galaxy_yaw, PI / 6.0)
    }
}
