//! Simulated hand-landmark source.
//!
//! Stands in for webcam capture + landmark inference: a background thread
//! samples whichever pose the keyboard selected and queues it for the render
//! loop, which drains the queue at the top of each frame.

use glam::Vec2;
use sculpt_core::sim::hand_pose;
use sculpt_core::{Gesture, SceneEvent};
use std::io;
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

const SAMPLE_INTERVAL: Duration = Duration::from_millis(33);
const PALM_STEP: f32 = 0.05;

/// Pose the simulated camera currently sees. `gesture == None` means no hand.
#[derive(Clone, Copy, Debug)]
pub struct SimHand {
    pub gesture: Option<Gesture>,
    pub palm: Vec2,
}

impl Default for SimHand {
    fn default() -> Self {
        Self {
            gesture: None,
            palm: Vec2::splat(0.5),
        }
    }
}

impl SimHand {
    pub fn nudge(&mut self, dx: f32, dy: f32) {
        self.palm = (self.palm + Vec2::new(dx, dy) * PALM_STEP).clamp(Vec2::ZERO, Vec2::ONE);
    }
}

/// Map a typed character to a hand pose change. Returns false when the key
/// is not a pose key.
pub fn apply_pose_key(hand: &mut SimHand, key: &str) -> bool {
    hand.gesture = match key {
        "0" => Some(Gesture::Fist),
        "1" => Some(Gesture::One),
        "2" => Some(Gesture::Peace),
        "5" => Some(Gesture::OpenPalm),
        "h" | "H" => None,
        _ => return false,
    };
    true
}

/// Spawn the sampling thread. It stops once the receiver is dropped.
pub fn spawn(hand: Arc<Mutex<SimHand>>) -> Receiver<SceneEvent> {
    let (tx, rx) = mpsc::channel();
    let status = tx.clone();
    let spawned = thread::Builder::new()
        .name("hand-source".into())
        .spawn(move || run(hand, tx));
    report_spawn(spawned.map(drop), &status);
    rx
}

/// A source that never started still has to surface as a camera error.
fn report_spawn(spawned: io::Result<()>, status: &Sender<SceneEvent>) {
    if let Err(e) = spawned {
        log::error!("[gesture] could not start hand source: {e}");
        let _ = status.send(SceneEvent::CameraError(e.to_string()));
    }
}

fn run(hand: Arc<Mutex<SimHand>>, tx: Sender<SceneEvent>) {
    if tx.send(SceneEvent::CameraReady).is_err() {
        return;
    }
    loop {
        let sample = match hand.lock() {
            Ok(h) => *h,
            Err(_) => {
                let _ = tx.send(SceneEvent::CameraError("hand source poisoned".into()));
                return;
            }
        };
        let points = sample
            .gesture
            .map(|g| hand_pose(g, sample.palm))
            .unwrap_or_default();
        if tx.send(SceneEvent::Landmarks(points)).is_err() {
            log::info!("[gesture] hand source stopped");
            return;
        }
        thread::sleep(SAMPLE_INTERVAL);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pose_keys_select_gestures() {
        let mut hand = SimHand::default();
        assert!(apply_pose_key(&mut hand, "2"));
        assert_eq!(hand.gesture, Some(Gesture::Peace));
        assert!(apply_pose_key(&mut hand, "H"));
        assert_eq!(hand.gesture, None);
        assert!(!apply_pose_key(&mut hand, "x"));
    }

    #[test]
    fn palm_stays_in_the_image() {
        let mut hand = SimHand::default();
        for _ in 0..100 {
            hand.nudge(1.0, -1.0);
        }
        assert_eq!(hand.palm, Vec2::new(1.0, 0.0));
    }

    #[test]
    fn failed_start_queues_a_camera_error() {
        let (tx, rx) = mpsc::channel();
        report_spawn(Err(io::Error::other("no threads left")), &tx);
        report_spawn(Ok(()), &tx);
        drop(tx);
        let events: Vec<_> = rx.iter().collect();
        assert_eq!(
            events,
            vec![SceneEvent::CameraError("no threads left".into())]
        );
    }

    #[test]
    fn source_reports_ready_then_streams() {
        let hand = Arc::new(Mutex::new(SimHand {
            gesture: Some(Gesture::OpenPalm),
            ..SimHand::default()
        }));
        let rx = spawn(hand);
        assert!(matches!(rx.recv(), Ok(SceneEvent::CameraReady)));
        match rx.recv() {
            Ok(SceneEvent::Landmarks(points)) => assert_eq!(points.len(), 21),
            other => panic!("unexpected {other:?}"),
        }
    }
}
