//! Hand-landmark gesture classification and stabilization.
//!
//! Landmarks follow the common 21-point hand layout: 0 is the wrist, 9 the
//! middle-finger knuckle, and 8/12/16/20 the index/middle/ring/pinky tips.
//! Coordinates are normalized image coordinates (0..1, y down).

use crate::constants::{FINGER_OPEN_RATIO, LANDMARK_COUNT, STABLE_FRAMES};
use crate::error::{Result, SculptError};
use crate::mode::Gesture;
use glam::{Vec2, Vec3};
use smallvec::SmallVec;

pub const WRIST: usize = 0;
pub const MIDDLE_KNUCKLE: usize = 9;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Finger {
    Index,
    Middle,
    Ring,
    Pinky,
}

impl Finger {
    pub const ALL: [Finger; 4] = [Finger::Index, Finger::Middle, Finger::Ring, Finger::Pinky];

    pub fn tip(self) -> usize {
        match self {
            Finger::Index => 8,
            Finger::Middle => 12,
            Finger::Ring => 16,
            Finger::Pinky => 20,
        }
    }
}

#[derive(Clone, Debug)]
pub struct GestureParams {
    /// A finger is open when tip-to-wrist exceeds this multiple of the hand size.
    pub open_ratio: f32,
    /// A label is forwarded once it has been seen more than this many times in a row.
    pub stable_frames: u32,
}

impl Default for GestureParams {
    fn default() -> Self {
        Self {
            open_ratio: FINGER_OPEN_RATIO,
            stable_frames: STABLE_FRAMES,
        }
    }
}

/// A validated single-hand landmark set, projected to 2D.
#[derive(Clone, Debug, PartialEq)]
pub struct HandLandmarks {
    points: [Vec2; LANDMARK_COUNT],
}

impl HandLandmarks {
    pub fn from_points(points: &[Vec3]) -> Result<Self> {
        if points.len() != LANDMARK_COUNT {
            return Err(SculptError::MalformedLandmarks {
                expected: LANDMARK_COUNT,
                found: points.len(),
            });
        }
        let mut out = [Vec2::ZERO; LANDMARK_COUNT];
        for (i, p) in points.iter().enumerate() {
            if !p.is_finite() {
                return Err(SculptError::NonFiniteLandmark { index: i });
            }
            out[i] = p.truncate();
        }
        Ok(Self { points: out })
    }

    #[inline]
    pub fn point(&self, index: usize) -> Vec2 {
        self.points[index]
    }

    /// Wrist to middle knuckle distance.
    pub fn hand_size(&self) -> f32 {
        self.point(WRIST).distance(self.point(MIDDLE_KNUCKLE))
    }

    pub fn is_open(&self, finger: Finger, open_ratio: f32) -> bool {
        self.point(finger.tip()).distance(self.point(WRIST)) > self.hand_size() * open_ratio
    }

    pub fn open_fingers(&self, open_ratio: f32) -> SmallVec<[Finger; 4]> {
        Finger::ALL
            .iter()
            .copied()
            .filter(|f| self.is_open(*f, open_ratio))
            .collect()
    }

    /// Offset of the middle knuckle from image centre, scaled to -1..1.
    pub fn pointing(&self) -> Vec2 {
        (self.point(MIDDLE_KNUCKLE) - Vec2::splat(0.5)) * 2.0
    }
}

/// Exact finger-pattern match, first rule wins.
pub fn classify(hand: &HandLandmarks, params: &GestureParams) -> Gesture {
    let open = hand.open_fingers(params.open_ratio);
    match open.as_slice() {
        [Finger::Index] => Gesture::One,
        [Finger::Index, Finger::Middle] => Gesture::Peace,
        fingers if fingers.len() >= 3 => Gesture::OpenPalm,
        _ => Gesture::Fist,
    }
}

/// Run-length debouncer.
///
/// | input           | effect                          |
/// |-----------------|---------------------------------|
/// | same as last    | run += 1                        |
/// | different label | last = label, run = 1           |
///
/// After the update the label is emitted when `run > threshold`, and keeps
/// being emitted for every further identical sample.
#[derive(Clone, Debug)]
pub struct Stabilizer {
    last: Option<Gesture>,
    run: u32,
    threshold: u32,
}

impl Stabilizer {
    pub fn new(threshold: u32) -> Self {
        Self {
            last: None,
            run: 0,
            threshold,
        }
    }

    pub fn push(&mut self, gesture: Gesture) -> Option<Gesture> {
        if self.last == Some(gesture) {
            self.run = self.run.saturating_add(1);
        } else {
            self.last = Some(gesture);
            self.run = 1;
        }
        (self.run > self.threshold).then_some(gesture)
    }

    pub fn run(&self) -> u32 {
        self.run
    }

    pub fn last(&self) -> Option<Gesture> {
        self.last
    }

    pub fn reset(&mut self) {
        self.last = None;
        self.run = 0;
    }
}

/// Latest hand-derived steering input.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct HandInput {
    pub detected: bool,
    pub pointing: Vec2,
}

/// Classifier plus stabilizer plus the latest pointing vector.
#[derive(Clone, Debug)]
pub struct GestureTracker {
    params: GestureParams,
    stabilizer: Stabilizer,
    hand: HandInput,
}

impl GestureTracker {
    pub fn new(params: GestureParams) -> Self {
        let stabilizer = Stabilizer::new(params.stable_frames);
        Self {
            params,
            stabilizer,
            hand: HandInput::default(),
        }
    }

    /// Feed one inference result. `None` or a malformed set counts as "no
    /// hand" and leaves the stabilizer alone. Returns the stable gesture, if any.
    pub fn observe(&mut self, points: Option<&[Vec3]>) -> Option<Gesture> {
        let Some(points) = points else {
            self.hand.detected = false;
            return None;
        };
        match HandLandmarks::from_points(points) {
            Ok(hand) => {
                self.hand = HandInput {
                    detected: true,
                    pointing: hand.pointing(),
                };
                let gesture = classify(&hand, &self.params);
                self.stabilizer.push(gesture)
            }
            Err(e) => {
                log::debug!("[gesture] dropping frame: {e}");
                self.hand.detected = false;
                None
            }
        }
    }

    /// The landmark source went away: drop the hand and any partial run.
    pub fn lose_hand(&mut self) {
        self.hand.detected = false;
        self.stabilizer.reset();
    }

    pub fn hand(&self) -> HandInput {
        self.hand
    }

    pub fn stabilizer(&self) -> &Stabilizer {
        &self.stabilizer
    }
}

impl Default for GestureTracker {
    fn default() -> Self {
        Self::new(GestureParams::default())
    }
}
