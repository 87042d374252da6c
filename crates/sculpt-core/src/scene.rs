//! The animation driver: owns every particle plus the mode machine and the
//! gesture tracker, and advances them one frame at a time.

use crate::backdrop::Backdrop;
use crate::batch::Batches;
use crate::constants::*;
use crate::error::{Result, SculptError};
use crate::gesture::{GestureParams, GestureTracker, HandInput};
use crate::layout::{LayoutParams, Role};
use crate::mode::{Gesture, Mode, ModeMachine, Status, Transition};
use crate::particle::{self, FrameContext, Ornament, Photo, PhotoId, TextureId};
use crate::state::{Camera, RotationBias};
use glam::{Mat4, Vec3};
use instant::Instant;
use rand::prelude::*;

#[derive(Clone, Debug)]
pub struct SceneConfig {
    /// Role samples drawn at population; samples over a role's capacity are dropped.
    pub ornament_count: usize,
    pub dust_count: usize,
    pub galaxy_count: usize,
    pub layout: LayoutParams,
    pub gesture: GestureParams,
    /// Fixed seed for reproducible scenes; `None` draws one from entropy.
    pub seed: Option<u64>,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            ornament_count: TOTAL_ORNAMENTS,
            dust_count: DUST_COUNT,
            galaxy_count: GALAXY_COUNT,
            layout: LayoutParams::default(),
            gesture: GestureParams::default(),
            seed: None,
        }
    }
}

/// Inputs arriving from collaborators, queued by whoever owns the capture or
/// upload thread and drained at the top of a frame.
#[derive(Clone, Debug, PartialEq)]
pub enum SceneEvent {
    /// One inference result; an empty set means no hand.
    Landmarks(Vec<Vec3>),
    CameraReady,
    CameraError(String),
    AddPhoto(TextureId),
}

pub struct Scene {
    layout: LayoutParams,
    rng: StdRng,
    ornaments: Vec<Ornament>,
    photos: Vec<Photo>,
    batches: Batches,
    machine: ModeMachine,
    tracker: GestureTracker,
    bias: RotationBias,
    backdrop: Backdrop,
    camera_eye: Vec3,
    elapsed: f32,
}

impl Scene {
    pub fn new(config: SceneConfig) -> Self {
        let seed = config.seed.unwrap_or_else(rand::random);
        let mut rng = StdRng::seed_from_u64(seed);
        let machine = ModeMachine::new(seed ^ 0x9E37_79B9_7F4A_7C15);

        let mut batches = Batches::new();
        let mut ornaments = Vec::with_capacity(config.ornament_count);
        for _ in 0..config.ornament_count {
            let role = Role::sample(&mut rng);
            if let Some(slot) = batches.reserve(role) {
                ornaments.push(particle::spawn_ornament(
                    &mut rng,
                    role,
                    slot,
                    &config.layout,
                ));
            }
        }
        batches.write(&ornaments);

        let backdrop = Backdrop::generate(&mut rng, config.dust_count, config.galaxy_count);
        log::info!(
            "[scene] populated {} ornaments ({} requested), {} backdrop points, seed {}",
            ornaments.len(),
            config.ornament_count,
            backdrop.dust.len() + backdrop.galaxy.len(),
            seed
        );

        Self {
            layout: config.layout,
            rng,
            ornaments,
            photos: Vec::new(),
            batches,
            machine,
            tracker: GestureTracker::new(config.gesture),
            bias: RotationBias::default(),
            backdrop,
            camera_eye: Camera::default().eye,
            elapsed: 0.0,
        }
    }

    /// Photo ingestion entry point. Mode and focus are left alone; the status
    /// line shows a short notice.
    pub fn add_photo(&mut self, texture: TextureId) -> PhotoId {
        let photo = particle::spawn_photo(&mut self.rng, texture, &self.layout.photo);
        self.photos.push(photo);
        let id = PhotoId(self.photos.len() - 1);
        self.machine.report_photo_added();
        log::info!("[photo] added {:?} as {:?}", texture, id);
        id
    }

    /// Feed one inference result (`None` when no hand was found) and forward
    /// a stable gesture to the mode machine.
    pub fn observe_hand(&mut self, points: Option<&[Vec3]>) -> Option<Transition> {
        let gesture = self.tracker.observe(points)?;
        Some(self.request(gesture))
    }

    pub fn request(&mut self, gesture: Gesture) -> Transition {
        self.machine.request(gesture, self.photos.len())
    }

    pub fn refocus(&mut self) -> Option<PhotoId> {
        self.machine.refocus(self.photos.len())
    }

    pub fn handle(&mut self, event: SceneEvent) {
        match event {
            SceneEvent::Landmarks(points) if points.is_empty() => {
                self.observe_hand(None);
            }
            SceneEvent::Landmarks(points) => {
                self.observe_hand(Some(&points));
            }
            SceneEvent::CameraReady => self.machine.report_camera_ready(),
            SceneEvent::CameraError(reason) => {
                self.tracker.lose_hand();
                self.machine
                    .report_camera_error(&SculptError::CameraUnavailable(reason));
            }
            SceneEvent::AddPhoto(texture) => {
                self.add_photo(texture);
            }
        }
    }

    pub fn set_camera_eye(&mut self, eye: Vec3) {
        self.camera_eye = eye;
    }

    /// Advance one frame. `dt` is clamped to [`MAX_FRAME_STEP_SEC`] so a stall
    /// cannot fling particles past their targets.
    pub fn tick(&mut self, dt: f32) {
        let dt = if dt.is_finite() {
            dt.clamp(0.0, MAX_FRAME_STEP_SEC)
        } else {
            0.0
        };
        self.elapsed += dt;
        self.machine.advance(dt);
        self.bias.advance(self.machine.mode(), self.tracker.hand(), dt);

        let ctx = self.frame_context();
        particle::update_ornaments(&mut self.ornaments, dt, &ctx);
        particle::update_photos(&mut self.photos, dt, &ctx);
        self.batches.write(&self.ornaments);

        self.backdrop.advance(dt);
    }

    pub fn frame_context(&self) -> FrameContext {
        FrameContext {
            mode: self.machine.mode(),
            focus: self.machine.focus(),
            group: self.bias.group_transform(),
            camera_eye: self.camera_eye,
        }
    }

    pub fn mode(&self) -> Mode {
        self.machine.mode()
    }

    pub fn focus(&self) -> Option<PhotoId> {
        self.machine.focus()
    }

    pub fn status(&self) -> &Status {
        self.machine.status()
    }

    pub fn hand(&self) -> HandInput {
        self.tracker.hand()
    }

    pub fn tracker(&self) -> &GestureTracker {
        &self.tracker
    }

    pub fn ornaments(&self) -> &[Ornament] {
        &self.ornaments
    }

    pub fn photos(&self) -> &[Photo] {
        &self.photos
    }

    pub fn photo(&self, id: PhotoId) -> Result<&Photo> {
        self.photos.get(id.0).ok_or(SculptError::UnknownPhoto(id.0))
    }

    pub fn batches(&self) -> &Batches {
        &self.batches
    }

    pub fn batches_mut(&mut self) -> &mut Batches {
        &mut self.batches
    }

    pub fn backdrop(&self) -> &Backdrop {
        &self.backdrop
    }

    pub fn rotation(&self) -> RotationBias {
        self.bias
    }

    pub fn group_transform(&self) -> Mat4 {
        self.bias.group_transform()
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }
}

/// Wall-clock frame timer producing clamped step lengths.
pub struct FrameClock {
    last: Instant,
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            last: Instant::now(),
        }
    }

    pub fn step(&mut self) -> f32 {
        let now = Instant::now();
        let dt = now - self.last;
        self.last = now;
        dt.as_secs_f32().min(MAX_FRAME_STEP_SEC)
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}
