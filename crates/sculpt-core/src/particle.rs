//! Particle records and the per-frame update rule.
//!
//! Ornaments and photos are plain records in contiguous `Vec`s; the update
//! functions walk a slice and mutate each record in place. Records never look
//! at each other, so iteration order is irrelevant.

use crate::constants::*;
use crate::layout::{self, LayoutParams, LayoutTargets, PhotoLayoutParams, Role, TreeBranch};
use crate::mode::Mode;
use glam::{EulerRot, Mat3, Mat4, Quat, Vec2, Vec3};
use rand::Rng;
use std::f32::consts::PI;

/// Slot of a photo in the scene's photo list. Photos are never removed, so an
/// id stays valid for the whole session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PhotoId(pub usize);

/// Opaque handle to a texture owned by the rendering side.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TextureId(pub u64);

/// Live transform state of one particle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pose {
    pub position: Vec3,
    /// XYZ Euler angles in radians.
    pub rotation: Vec3,
    pub scale: f32,
}

impl Default for Pose {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: 1.0,
        }
    }
}

impl Pose {
    pub fn quat(&self) -> Quat {
        Quat::from_euler(
            EulerRot::XYZ,
            self.rotation.x,
            self.rotation.y,
            self.rotation.z,
        )
    }

    /// Local (group-space) model matrix: rotation, translation, uniform scale.
    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(Vec3::splat(self.scale), self.quat(), self.position)
    }
}

#[derive(Clone, Debug)]
pub struct Ornament {
    pub role: Role,
    /// Index inside the role's transform batch.
    pub slot: usize,
    pub targets: LayoutTargets,
    pub tree_branch: TreeBranch,
    /// Per-axis tumble rate (x, y) in rad/s.
    pub spin: Vec2,
    pub base_scale: f32,
    pub pose: Pose,
}

#[derive(Clone, Debug)]
pub struct Photo {
    pub texture: TextureId,
    pub targets: LayoutTargets,
    pub base_scale: f32,
    pub pose: Pose,
}

/// Read-only per-frame inputs shared by every update call.
#[derive(Clone, Copy, Debug)]
pub struct FrameContext {
    pub mode: Mode,
    pub focus: Option<PhotoId>,
    /// World transform of the rotating particle group.
    pub group: Mat4,
    /// Camera eye in world space.
    pub camera_eye: Vec3,
}

impl FrameContext {
    /// Focus point expressed in the group's local space, so the focused photo
    /// lands in front of the camera whatever the group rotation.
    pub fn focus_point_local(&self) -> Vec3 {
        self.group.inverse().transform_point3(focus_point())
    }
}

#[inline]
fn blend(rate: f32, dt: f32) -> f32 {
    (rate * dt).clamp(0.0, 1.0)
}

pub fn spawn_ornament<R: Rng + ?Sized>(
    rng: &mut R,
    role: Role,
    slot: usize,
    params: &LayoutParams,
) -> Ornament {
    let base = ORNAMENT_BASE_SCALE_MIN + rng.gen::<f32>() * ORNAMENT_BASE_SCALE_SPAN;
    let rotation = Vec3::new(
        rng.gen::<f32>() * PI,
        rng.gen::<f32>() * PI,
        rng.gen::<f32>() * PI,
    );
    let spin = Vec2::new(
        ORNAMENT_SPIN_MIN + rng.gen::<f32>() * ORNAMENT_SPIN_SPAN,
        ORNAMENT_SPIN_MIN + rng.gen::<f32>() * ORNAMENT_SPIN_SPAN,
    );
    let layout = layout::ornament_layout(rng, role, params);
    Ornament {
        role,
        slot,
        targets: layout.targets,
        tree_branch: layout.tree_branch,
        spin,
        base_scale: base * layout.scale_boost,
        pose: Pose {
            rotation,
            ..Pose::default()
        },
    }
}

pub fn spawn_photo<R: Rng + ?Sized>(
    rng: &mut R,
    texture: TextureId,
    params: &PhotoLayoutParams,
) -> Photo {
    Photo {
        texture,
        targets: layout::photo_targets(rng, params),
        base_scale: PHOTO_BASE_SCALE,
        pose: Pose::default(),
    }
}

/// Ornaments ignore FOCUS and hold their tree shape.
pub fn update_ornament(o: &mut Ornament, dt: f32, ctx: &FrameContext) {
    if dt <= 0.0 {
        return;
    }
    let target = o.targets.for_mode(ctx.mode);
    o.pose.position = o.pose.position.lerp(target, blend(POSITION_RATE, dt));
    o.pose.rotation.x += o.spin.x * dt;
    o.pose.rotation.y += o.spin.y * dt;
    o.pose.scale += (o.base_scale - o.pose.scale) * blend(SCALE_RATE, dt);
}

pub fn update_ornaments(ornaments: &mut [Ornament], dt: f32, ctx: &FrameContext) {
    for o in ornaments.iter_mut() {
        update_ornament(o, dt, ctx);
    }
}

impl Photo {
    pub fn target_scale(&self, mode: Mode, focused: bool) -> f32 {
        match mode {
            Mode::Focus if focused => PHOTO_FOCUS_SCALE,
            Mode::Scatter => self.base_scale * PHOTO_SCATTER_SCALE,
            Mode::Saturn => self.base_scale * PHOTO_SATURN_SCALE,
            Mode::Tree | Mode::Focus => self.base_scale,
        }
    }

    /// Where this photo is heading under `ctx`. Unfocused photos wait on
    /// their scatter point during FOCUS.
    pub fn target(&self, focused: bool, ctx: &FrameContext) -> Vec3 {
        match ctx.mode {
            Mode::Focus if focused => ctx.focus_point_local(),
            Mode::Focus => self.targets.scatter,
            mode => self.targets.for_mode(mode),
        }
    }
}

pub fn update_photo(p: &mut Photo, id: PhotoId, dt: f32, ctx: &FrameContext) {
    if dt <= 0.0 {
        return;
    }
    let focused = ctx.mode == Mode::Focus && ctx.focus == Some(id);
    let rate = if focused {
        FOCUS_POSITION_RATE
    } else {
        POSITION_RATE
    };
    let target = p.target(focused, ctx);
    p.pose.position = p.pose.position.lerp(target, blend(rate, dt));

    match ctx.mode {
        Mode::Scatter | Mode::Saturn => {
            p.pose.rotation.x += PHOTO_SPIN_RATE * dt;
            p.pose.rotation.y += PHOTO_SPIN_RATE * dt;
        }
        Mode::Tree => {
            p.pose.rotation.x -= p.pose.rotation.x * blend(PHOTO_LEVEL_RATE, dt);
            p.pose.rotation.y += PHOTO_TREE_SPIN_RATE * dt;
        }
        Mode::Focus => {}
    }
    if focused {
        if let Some(facing) = facing_camera(p.pose.position, ctx) {
            let (x, y, z) = facing.to_euler(EulerRot::XYZ);
            p.pose.rotation = Vec3::new(x, y, z);
        }
    }

    let s = p.target_scale(ctx.mode, focused);
    p.pose.scale += (s - p.pose.scale) * blend(SCALE_RATE, dt);
}

pub fn update_photos(photos: &mut [Photo], dt: f32, ctx: &FrameContext) {
    for (i, p) in photos.iter_mut().enumerate() {
        update_photo(p, PhotoId(i), dt, ctx);
    }
}

/// Local rotation that turns the photo's +Z toward the camera eye.
fn facing_camera(local_position: Vec3, ctx: &FrameContext) -> Option<Quat> {
    let world = ctx.group.transform_point3(local_position);
    let z = (ctx.camera_eye - world).try_normalize()?;
    let x = Vec3::Y.cross(z).try_normalize()?;
    let y = z.cross(x);
    let world_rot = Quat::from_mat3(&Mat3::from_cols(x, y, z));
    let (_, group_rot, _) = ctx.group.to_scale_rotation_translation();
    Some(group_rot.inverse() * world_rot)
}
