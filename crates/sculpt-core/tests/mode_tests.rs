// Host-side tests for the mode state machine.

use sculpt_core::*;

#[test]
fn starts_in_tree_with_ready_status() {
    let m = ModeMachine::new(1);
    assert_eq!(m.mode(), Mode::Tree);
    assert_eq!(m.focus(), None);
    assert_eq!(m.status().text, STATUS_READY);
    assert!(!m.status().warn);
}

#[test]
fn focus_without_photos_is_rejected_with_a_warning() {
    for start in [Gesture::Fist, Gesture::OpenPalm, Gesture::Peace] {
        let mut m = ModeMachine::new(2);
        m.request(start, 0);
        let mode = m.mode();
        for _ in 0..10 {
            assert_eq!(m.request(Gesture::One, 0), Transition::Rejected);
            assert_eq!(m.mode(), mode);
            assert_eq!(m.focus(), None);
            assert!(m.status().warn);
            assert_eq!(m.status().text, STATUS_NO_PHOTOS);
        }
    }
}

#[test]
fn repeating_a_non_focus_mode_does_not_touch_the_status() {
    let mut m = ModeMachine::new(3);
    assert_eq!(
        m.request(Gesture::OpenPalm, 0),
        Transition::Entered {
            from: Mode::Tree,
            to: Mode::Scatter
        }
    );
    let rev = m.status().revision;
    assert_eq!(m.status().text, STATUS_SCATTER);
    for _ in 0..5 {
        assert_eq!(m.request(Gesture::OpenPalm, 3), Transition::Unchanged);
    }
    assert_eq!(m.status().revision, rev);

    // tree is the initial mode, so a fist there is also a no-op
    let mut m = ModeMachine::new(3);
    assert_eq!(m.request(Gesture::Fist, 0), Transition::Unchanged);
    assert_eq!(m.status().revision, 0);
}

#[test]
fn gestures_map_to_modes_and_labels() {
    let mut m = ModeMachine::new(4);
    m.request(Gesture::Peace, 0);
    assert_eq!(m.mode(), Mode::Saturn);
    assert_eq!(m.status().text, STATUS_SATURN);
    m.request(Gesture::OpenPalm, 0);
    assert_eq!(m.mode(), Mode::Scatter);
    m.request(Gesture::Fist, 0);
    assert_eq!(m.mode(), Mode::Tree);
    assert_eq!(m.status().text, STATUS_TREE);
    m.request(Gesture::One, 1);
    assert_eq!(m.mode(), Mode::Focus);
    assert_eq!(m.status().text, STATUS_FOCUS);
}

#[test]
fn entering_focus_picks_a_photo_and_leaving_clears_it() {
    let mut m = ModeMachine::new(5);
    m.request(Gesture::One, 1);
    assert_eq!(m.focus(), Some(PhotoId(0)));
    assert!(!m.status().warn);

    m.request(Gesture::Peace, 1);
    assert_eq!(m.mode(), Mode::Saturn);
    assert_eq!(m.focus(), None);
}

#[test]
fn focus_picks_cover_every_photo() {
    let mut m = ModeMachine::new(6);
    let mut seen = [false; 4];
    for _ in 0..200 {
        m.request(Gesture::One, 4);
        let id = m.focus().expect("focused");
        assert!(id.0 < 4);
        seen[id.0] = true;
        m.request(Gesture::Fist, 4);
    }
    assert!(seen.iter().all(|s| *s), "picks {seen:?}");
}

#[test]
fn focus_gesture_while_focused_keeps_the_target() {
    let mut m = ModeMachine::new(7);
    m.request(Gesture::One, 10);
    let first = m.focus();
    let rev = m.status().revision;
    for _ in 0..50 {
        assert_eq!(m.request(Gesture::One, 10), Transition::Unchanged);
        assert_eq!(m.focus(), first);
    }
    assert_eq!(m.status().revision, rev);
}

#[test]
fn refocus_repicks_only_while_focused() {
    let mut m = ModeMachine::new(8);
    assert_eq!(m.refocus(5), None);
    m.request(Gesture::One, 5);
    let mut seen = std::collections::HashSet::new();
    for _ in 0..100 {
        let id = m.refocus(5).expect("refocus");
        assert_eq!(m.focus(), Some(id));
        seen.insert(id);
    }
    assert!(seen.len() > 1);
    assert_eq!(m.mode(), Mode::Focus);
}

#[test]
fn camera_error_warns_until_the_next_transition() {
    let mut m = ModeMachine::new(9);
    m.report_camera_error(&SculptError::CameraUnavailable("denied".into()));
    assert!(m.status().warn);
    assert_eq!(m.status().text, STATUS_CAMERA_ERROR);
    assert_eq!(m.mode(), Mode::Tree);

    m.request(Gesture::OpenPalm, 0);
    assert!(!m.status().warn);
}

#[test]
fn rejection_warning_clears_on_accepted_transition() {
    let mut m = ModeMachine::new(10);
    m.request(Gesture::One, 0);
    assert!(m.status().warn);
    m.request(Gesture::One, 2);
    assert_eq!(m.mode(), Mode::Focus);
    assert!(!m.status().warn);
}

#[test]
fn held_rejection_updates_the_status_once() {
    let mut m = ModeMachine::new(12);
    m.request(Gesture::One, 0);
    let rev = m.status().revision;
    assert_eq!(rev, 1);
    for _ in 0..30 {
        assert_eq!(m.request(Gesture::One, 0), Transition::Rejected);
    }
    assert_eq!(m.status().revision, rev);
}

#[test]
fn photo_notice_reverts_to_ready() {
    let mut m = ModeMachine::new(13);
    m.report_photo_added();
    assert_eq!(m.status().text, STATUS_PHOTO_ADDED);
    assert!(!m.status().warn);
    m.advance(STATUS_NOTICE_SEC * 0.5);
    assert_eq!(m.status().text, STATUS_PHOTO_ADDED);
    m.advance(STATUS_NOTICE_SEC * 0.6);
    assert_eq!(m.status().text, STATUS_READY);
    assert_eq!(m.mode(), Mode::Tree);
}

#[test]
fn photo_notice_yields_to_a_transition() {
    let mut m = ModeMachine::new(14);
    m.report_photo_added();
    m.request(Gesture::Peace, 1);
    m.advance(STATUS_NOTICE_SEC * 2.0);
    assert_eq!(m.status().text, STATUS_SATURN);
}
