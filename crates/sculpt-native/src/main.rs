mod gpu;
mod hand_source;

use std::sync::mpsc::Receiver;
use std::sync::{Arc, Mutex};

use rand::Rng;
use sculpt_core::{FrameClock, Scene, SceneConfig, SceneEvent, TextureId};
use winit::{
    event::*,
    event_loop::EventLoop,
    keyboard::{Key, NamedKey},
    window::WindowBuilder,
};

use gpu::GpuState;
use hand_source::SimHand;

/// Everything the render loop owns besides the GPU.
struct App {
    scene: Scene,
    clock: FrameClock,
    hand: Arc<Mutex<SimHand>>,
    events: Receiver<SceneEvent>,
    photo_tints: Vec<[f32; 3]>,
    next_texture: u64,
    shown_revision: Option<u64>,
}

impl App {
    fn new() -> Self {
        let hand = Arc::new(Mutex::new(SimHand::default()));
        let events = hand_source::spawn(Arc::clone(&hand));
        Self {
            scene: Scene::new(SceneConfig::default()),
            clock: FrameClock::new(),
            hand,
            events,
            photo_tints: Vec::new(),
            next_texture: 0,
            shown_revision: None,
        }
    }

    fn add_photo(&mut self) {
        let mut rng = rand::thread_rng();
        // No image decoding here: each photo is a tinted card.
        let tint = [
            rng.gen_range(0.6..1.0),
            rng.gen_range(0.6..1.0),
            rng.gen_range(0.6..1.0),
        ];
        self.photo_tints.push(tint);
        self.scene
            .handle(SceneEvent::AddPhoto(TextureId(self.next_texture)));
        self.next_texture += 1;
    }

    fn with_hand(&self, f: impl FnOnce(&mut SimHand)) {
        match self.hand.lock() {
            Ok(mut h) => f(&mut h),
            Err(_) => log::warn!("[gesture] simulated hand is poisoned"),
        }
    }

    /// Returns false when the key asks to quit.
    fn on_key(&mut self, key: &Key) -> bool {
        match key {
            Key::Named(NamedKey::Escape) => return false,
            Key::Named(NamedKey::ArrowLeft) => self.with_hand(|h| h.nudge(-1.0, 0.0)),
            Key::Named(NamedKey::ArrowRight) => self.with_hand(|h| h.nudge(1.0, 0.0)),
            // image y grows downward
            Key::Named(NamedKey::ArrowUp) => self.with_hand(|h| h.nudge(0.0, -1.0)),
            Key::Named(NamedKey::ArrowDown) => self.with_hand(|h| h.nudge(0.0, 1.0)),
            Key::Character(c) => match c.as_str() {
                "p" | "P" => self.add_photo(),
                "r" | "R" => {
                    if self.scene.refocus().is_none() {
                        log::info!("[mode] nothing to refocus");
                    }
                }
                other => {
                    let mut changed = false;
                    self.with_hand(|h| changed = hand_source::apply_pose_key(h, other));
                    if changed {
                        log::debug!("[gesture] simulated pose key {other}");
                    }
                }
            },
            _ => {}
        }
        true
    }

    fn frame(&mut self, gpu: &mut GpuState) -> Result<(), wgpu::SurfaceError> {
        let pending: Vec<SceneEvent> = self.events.try_iter().collect();
        for event in pending {
            self.scene.handle(event);
        }
        self.scene.set_camera_eye(gpu.camera().eye);
        self.scene.tick(self.clock.step());

        let status = self.scene.status();
        if self.shown_revision != Some(status.revision) {
            let marker = if status.warn { "! " } else { "" };
            gpu.window
                .set_title(&format!("Particle Sculpture | {marker}{}", status.text));
            self.shown_revision = Some(status.revision);
        }

        gpu.render(&mut self.scene, &self.photo_tints)
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .init();

    let mut app = App::new();
    log::info!(
        "[scene] keys: 0/1/2/5 pose, H hide hand, arrows move palm, P add photo, R refocus, Esc quit"
    );

    let event_loop = EventLoop::new()?;
    let window = WindowBuilder::new()
        .with_title("Particle Sculpture")
        .build(&event_loop)?;

    let mut state = pollster::block_on(GpuState::new(&window, &app.scene))?;

    event_loop.run(move |event, elwt| match event {
        Event::WindowEvent {
            event: WindowEvent::Resized(size),
            ..
        } => state.resize(size),
        Event::WindowEvent {
            event: WindowEvent::CloseRequested,
            ..
        } => elwt.exit(),
        Event::WindowEvent {
            event:
                WindowEvent::KeyboardInput {
                    event:
                        KeyEvent {
                            logical_key,
                            state: ElementState::Pressed,
                            ..
                        },
                    ..
                },
            ..
        } => {
            if !app.on_key(&logical_key) {
                elwt.exit();
            }
        }
        Event::AboutToWait => match app.frame(&mut state) {
            Ok(_) => state.window.request_redraw(),
            Err(wgpu::SurfaceError::Lost) => state.resize(state.window.inner_size()),
            Err(wgpu::SurfaceError::OutOfMemory) => elwt.exit(),
            Err(e) => log::warn!("[scene] frame skipped: {e:?}"),
        },
        _ => {}
    })?;
    Ok(())
}
