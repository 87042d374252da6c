//! Mode state machine.
//!
//! | current \ request | Tree | Scatter | Saturn | Focus (photos > 0) | Focus (no photos) |
//! |-------------------|------|---------|--------|--------------------|-------------------|
//! | Tree              |  -   | enter   | enter  | enter + pick       | reject + warn     |
//! | Scatter           | enter|   -     | enter  | enter + pick       | reject + warn     |
//! | Saturn            | enter| enter   |   -    | enter + pick       | reject + warn     |
//! | Focus             | enter, clear focus (all three)  |   -    | unreachable       |
//!
//! `-` is a no-op: no status update, focus untouched. Re-picking the focus
//! photo while already focused goes through [`ModeMachine::refocus`].

use crate::constants::STATUS_NOTICE_SEC;
use crate::error::SculptError;
use crate::particle::PhotoId;
use rand::prelude::*;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Mode {
    #[default]
    Tree,
    Scatter,
    Saturn,
    Focus,
}

/// Discrete hand pose produced by the classifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Gesture {
    /// Index finger only.
    One,
    /// Index and middle fingers.
    Peace,
    /// Three or more fingers.
    OpenPalm,
    /// Fist or anything ambiguous.
    Fist,
}

impl Gesture {
    pub fn requested_mode(self) -> Mode {
        match self {
            Gesture::One => Mode::Focus,
            Gesture::Peace => Mode::Saturn,
            Gesture::OpenPalm => Mode::Scatter,
            Gesture::Fist => Mode::Tree,
        }
    }

    pub fn status_text(self) -> &'static str {
        match self {
            Gesture::One => STATUS_FOCUS,
            Gesture::Peace => STATUS_SATURN,
            Gesture::OpenPalm => STATUS_SCATTER,
            Gesture::Fist => STATUS_TREE,
        }
    }
}

pub const STATUS_READY: &str = "Ready";
pub const STATUS_CAMERA_READY: &str = "AI Ready";
pub const STATUS_CAMERA_ERROR: &str = "Camera Error";
pub const STATUS_PHOTO_ADDED: &str = "Photo Added!";
pub const STATUS_NO_PHOTOS: &str = "⚠️ Add Photos First!";
pub const STATUS_FOCUS: &str = "☝️ RANDOM MEMORY";
pub const STATUS_SATURN: &str = "✌️ SATURN MODE";
pub const STATUS_SCATTER: &str = "🖐️ SCATTER";
pub const STATUS_TREE: &str = "✊ TREE";

/// User-visible status line. `revision` bumps whenever text or warn changes,
/// so a UI can redraw only on change.
#[derive(Clone, Debug, PartialEq)]
pub struct Status {
    pub text: String,
    pub warn: bool,
    pub revision: u64,
}

impl Default for Status {
    fn default() -> Self {
        Self {
            text: STATUS_READY.to_string(),
            warn: false,
            revision: 0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transition {
    Entered { from: Mode, to: Mode },
    Unchanged,
    Rejected,
}

pub struct ModeMachine {
    mode: Mode,
    focus: Option<PhotoId>,
    status: Status,
    /// Seconds left on a transient notice and the revision it was shown at.
    notice: Option<(f32, u64)>,
    rng: StdRng,
}

impl ModeMachine {
    pub fn new(seed: u64) -> Self {
        Self {
            mode: Mode::Tree,
            focus: None,
            status: Status::default(),
            notice: None,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Focused photo; `Some` only while in FOCUS.
    pub fn focus(&self) -> Option<PhotoId> {
        self.focus
    }

    pub fn status(&self) -> &Status {
        &self.status
    }

    pub fn request(&mut self, gesture: Gesture, photo_count: usize) -> Transition {
        let target = gesture.requested_mode();
        if target == Mode::Focus && photo_count == 0 {
            if self.set_status(STATUS_NO_PHOTOS, true) {
                log::warn!("[mode] focus requested with no photos");
            }
            return Transition::Rejected;
        }
        if target == self.mode {
            return Transition::Unchanged;
        }

        let from = self.mode;
        self.mode = target;
        self.focus = match target {
            Mode::Focus => Some(self.pick(photo_count)),
            _ => None,
        };
        self.set_status(gesture.status_text(), false);
        log::info!("[mode] {:?} -> {:?} (focus {:?})", from, target, self.focus);
        Transition::Entered { from, to: target }
    }

    /// Pick a fresh random focus photo while already in FOCUS.
    pub fn refocus(&mut self, photo_count: usize) -> Option<PhotoId> {
        if self.mode != Mode::Focus || photo_count == 0 {
            return None;
        }
        let id = self.pick(photo_count);
        self.focus = Some(id);
        self.set_status(STATUS_FOCUS, false);
        log::info!("[mode] refocus on {:?}", id);
        Some(id)
    }

    /// Show the photo notice; reverts to ready after [`STATUS_NOTICE_SEC`]
    /// unless something else claims the status line first.
    pub fn report_photo_added(&mut self) {
        self.set_status(STATUS_PHOTO_ADDED, false);
        self.notice = Some((STATUS_NOTICE_SEC, self.status.revision));
    }

    /// Count down a pending notice.
    pub fn advance(&mut self, dt: f32) {
        let Some((left, revision)) = self.notice else {
            return;
        };
        if revision != self.status.revision {
            self.notice = None;
        } else if left - dt <= 0.0 {
            self.notice = None;
            self.set_status(STATUS_READY, false);
        } else {
            self.notice = Some((left - dt, revision));
        }
    }

    pub fn report_camera_ready(&mut self) {
        self.set_status(STATUS_CAMERA_READY, false);
    }

    /// Camera/inference failure is not fatal; the scene keeps idling.
    pub fn report_camera_error(&mut self, err: &SculptError) {
        log::warn!("[mode] {err}");
        self.set_status(STATUS_CAMERA_ERROR, true);
    }

    fn pick(&mut self, photo_count: usize) -> PhotoId {
        PhotoId(self.rng.gen_range(0..photo_count))
    }

    /// Returns true when the status actually changed.
    fn set_status(&mut self, text: &str, warn: bool) -> bool {
        if self.status.text == text && self.status.warn == warn {
            return false;
        }
        self.status.text.clear();
        self.status.text.push_str(text);
        self.status.warn = warn;
        self.status.revision += 1;
        true
    }
}
