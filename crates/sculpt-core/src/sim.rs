//! Synthetic hand poses.
//!
//! Stands in for the landmark inference collaborator when no camera is
//! available: builds a plausible 21-point hand whose open/closed fingers match
//! a requested gesture, centred so the middle knuckle sits at `palm`.

use crate::mode::Gesture;
use glam::{Vec2, Vec3};

const HAND_SIZE: f32 = 0.15;
const OPEN_REACH: f32 = 0.2;
const CLOSED_REACH: f32 = -0.02;
const KNUCKLE_X: [f32; 4] = [-0.04, 0.0, 0.04, 0.08];

pub fn open_fingers_for(gesture: Gesture) -> [bool; 4] {
    match gesture {
        Gesture::One => [true, false, false, false],
        Gesture::Peace => [true, true, false, false],
        Gesture::OpenPalm => [true, true, true, true],
        Gesture::Fist => [false, false, false, false],
    }
}

pub fn hand_pose(gesture: Gesture, palm: Vec2) -> Vec<Vec3> {
    hand_with_fingers(open_fingers_for(gesture), palm)
}

/// `open` is index, middle, ring, pinky.
pub fn hand_with_fingers(open: [bool; 4], palm: Vec2) -> Vec<Vec3> {
    let wrist = palm + Vec2::new(0.0, HAND_SIZE);
    let mut points = Vec::with_capacity(21);
    points.push(wrist);

    // thumb, tucked to the side
    for j in 1..=4 {
        let t = j as f32 / 4.0;
        points.push(wrist + Vec2::new(-0.06 - 0.04 * t, -0.05 * t));
    }

    for (f, is_open) in open.iter().enumerate() {
        let knuckle = palm + Vec2::new(KNUCKLE_X[f], 0.0);
        let reach = if *is_open { OPEN_REACH } else { CLOSED_REACH };
        let tip = knuckle + Vec2::new(0.0, -reach);
        for j in 0..4 {
            let t = j as f32 / 3.0;
            points.push(knuckle.lerp(tip, t));
        }
    }

    points.into_iter().map(|p| p.extend(0.0)).collect()
}
