//! Camera and scene-rotation state shared with the frontends.
//!
//! These types avoid platform APIs; the native frontend builds its
//! view-projection from [`Camera`] and the group transform from
//! [`RotationBias`].

use crate::constants::*;
use crate::gesture::HandInput;
use crate::mode::Mode;
use glam::{EulerRot, Mat4, Vec3};

/// Right-handed perspective camera looking at the origin.
#[derive(Clone, Debug)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera {
    /// Portrait viewports pull the camera back so the tree still fits.
    pub fn for_aspect(aspect: f32) -> Self {
        let aspect = if aspect.is_finite() && aspect > 0.0 {
            aspect
        } else {
            1.0
        };
        let z = if aspect < 1.0 {
            CAMERA_BASE_Z / (aspect * PORTRAIT_PULLBACK)
        } else {
            CAMERA_BASE_Z
        };
        Self {
            eye: Vec3::new(0.0, CAMERA_HEIGHT, z),
            target: Vec3::ZERO,
            up: Vec3::Y,
            aspect,
            fovy_radians: CAMERA_FOVY_DEG.to_radians(),
            znear: CAMERA_ZNEAR,
            zfar: CAMERA_ZFAR,
        }
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn view_proj(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::for_aspect(16.0 / 9.0)
    }
}

/// Pitch/yaw of the whole particle group.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RotationBias {
    pub pitch: f32,
    pub yaw: f32,
}

impl RotationBias {
    /// Steer toward the pointing hand in SCATTER; otherwise drift (slow yaw in
    /// TREE) and relax pitch back to level.
    pub fn advance(&mut self, mode: Mode, hand: HandInput, dt: f32) {
        if mode == Mode::Scatter && hand.detected {
            let k = (STEER_RATE * dt).clamp(0.0, 1.0);
            self.yaw += (hand.pointing.x * STEER_YAW_GAIN - self.yaw) * k;
            self.pitch += (hand.pointing.y - self.pitch) * k;
        } else {
            if mode == Mode::Tree {
                self.yaw += IDLE_YAW_RATE * dt;
            }
            self.pitch -= self.pitch * (LEVEL_RATE * dt).clamp(0.0, 1.0);
        }
    }

    pub fn group_transform(&self) -> Mat4 {
        Mat4::from_euler(EulerRot::XYZ, self.pitch, self.yaw, 0.0)
    }
}
