// Host-side tests for gesture classification and stabilization.

use glam::{Vec2, Vec3};
use sculpt_core::sim::{hand_pose, hand_with_fingers};
use sculpt_core::*;

fn landmarks(points: &[Vec3]) -> HandLandmarks {
    HandLandmarks::from_points(points).expect("valid hand")
}

fn classify_fingers(open: [bool; 4]) -> Gesture {
    let hand = landmarks(&hand_with_fingers(open, Vec2::splat(0.5)));
    classify(&hand, &GestureParams::default())
}

#[test]
fn synthetic_poses_classify_as_requested() {
    for g in [Gesture::One, Gesture::Peace, Gesture::OpenPalm, Gesture::Fist] {
        let hand = landmarks(&hand_pose(g, Vec2::new(0.4, 0.6)));
        assert_eq!(classify(&hand, &GestureParams::default()), g);
    }
}

#[test]
fn finger_patterns_follow_priority_order() {
    assert_eq!(classify_fingers([true, false, false, false]), Gesture::One);
    assert_eq!(classify_fingers([true, true, false, false]), Gesture::Peace);
    assert_eq!(classify_fingers([true, true, true, false]), Gesture::OpenPalm);
    assert_eq!(classify_fingers([false, true, true, true]), Gesture::OpenPalm);
    assert_eq!(classify_fingers([true, true, true, true]), Gesture::OpenPalm);
    // two-finger shapes other than peace are ambiguous
    assert_eq!(classify_fingers([true, false, true, false]), Gesture::Fist);
    assert_eq!(classify_fingers([false, false, true, true]), Gesture::Fist);
    assert_eq!(classify_fingers([false, true, false, false]), Gesture::Fist);
    assert_eq!(classify_fingers([false, false, false, false]), Gesture::Fist);
}

#[test]
fn open_test_scales_with_hand_size() {
    let hand = landmarks(&hand_with_fingers([true, false, false, false], Vec2::splat(0.5)));
    assert!(hand.hand_size() > 0.0);
    assert!(hand.is_open(Finger::Index, 1.5));
    assert!(!hand.is_open(Finger::Middle, 1.5));
    // an absurd ratio closes everything
    assert!(hand.open_fingers(10.0).is_empty());
}

#[test]
fn pointing_is_centre_offset_of_the_middle_knuckle() {
    let hand = landmarks(&hand_pose(Gesture::Fist, Vec2::new(0.75, 0.25)));
    let p = hand.pointing();
    assert!((p - Vec2::new(0.5, -0.5)).length() < 1e-5);
}

#[test]
fn malformed_landmarks_are_rejected() {
    let mut points = hand_pose(Gesture::One, Vec2::splat(0.5));
    points.pop();
    assert_eq!(
        HandLandmarks::from_points(&points),
        Err(SculptError::MalformedLandmarks {
            expected: 21,
            found: 20
        })
    );
    let mut points = hand_pose(Gesture::One, Vec2::splat(0.5));
    points[3] = Vec3::new(f32::NAN, 0.0, 0.0);
    assert_eq!(
        HandLandmarks::from_points(&points),
        Err(SculptError::NonFiniteLandmark { index: 3 })
    );
}

#[test]
fn stabilizer_fires_on_the_sixth_identical_sample() {
    let mut s = Stabilizer::new(STABLE_FRAMES);
    for i in 0..5 {
        assert_eq!(s.push(Gesture::Peace), None, "fired early at sample {i}");
    }
    assert_eq!(s.push(Gesture::Peace), Some(Gesture::Peace));
    assert_eq!(s.run(), 6);
}

#[test]
fn stabilizer_never_fires_on_alternating_labels() {
    let mut s = Stabilizer::new(STABLE_FRAMES);
    for i in 0..1000 {
        let g = if i % 2 == 0 {
            Gesture::One
        } else {
            Gesture::OpenPalm
        };
        assert_eq!(s.push(g), None);
        assert_eq!(s.run(), 1);
    }
}

#[test]
fn stabilizer_restarts_the_run_on_a_new_label() {
    let mut s = Stabilizer::new(STABLE_FRAMES);
    for _ in 0..5 {
        s.push(Gesture::Fist);
    }
    s.push(Gesture::One);
    assert_eq!(s.last(), Some(Gesture::One));
    for _ in 0..4 {
        assert_eq!(s.push(Gesture::One), None);
    }
    assert_eq!(s.push(Gesture::One), Some(Gesture::One));
    s.reset();
    assert_eq!(s.run(), 0);
    assert_eq!(s.last(), None);
}

#[test]
fn tracker_treats_bad_frames_as_no_hand() {
    let mut t = GestureTracker::default();
    let good = hand_pose(Gesture::Peace, Vec2::new(0.6, 0.5));
    for _ in 0..3 {
        t.observe(Some(&good));
    }
    assert!(t.hand().detected);
    assert_eq!(t.stabilizer().run(), 3);

    let short = &good[..10];
    assert_eq!(t.observe(Some(short)), None);
    assert!(!t.hand().detected);
    assert_eq!(t.stabilizer().run(), 3);

    assert_eq!(t.observe(None), None);
    assert!(!t.hand().detected);
    // last pointing is kept for when the hand returns
    assert!((t.hand().pointing.x - 0.2).abs() < 1e-5);

    for _ in 0..2 {
        t.observe(Some(&good));
    }
    assert_eq!(t.observe(Some(&good)), Some(Gesture::Peace));
}
