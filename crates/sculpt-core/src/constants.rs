use glam::Vec3;

// Shared layout/animation tuning constants used by the core and the native frontend.

// Population
pub const TOTAL_ORNAMENTS: usize = 20_000; // role samples drawn at scene population
pub const DUST_COUNT: usize = 4_000;
pub const GALAXY_COUNT: usize = 15_000;

// Tree layout (ornaments)
pub const TREE_HEIGHT: f32 = 30.0;
pub const TREE_MAX_RADIUS: f32 = 12.0;
pub const TREE_TAPER_EXPONENT: f32 = 0.85; // cone radius = maxR * (1 - t^exp)
pub const TOPPER_PROBABILITY: f32 = 0.03;
pub const TOPPER_RADIUS: f32 = 2.5;
pub const TOPPER_LIFT: f32 = 1.5; // topper centre sits this far above the apex
pub const TOPPER_SCALE_BOOST: f32 = 1.5;
pub const RIBBON_PROBABILITY: f32 = 0.35;
pub const RIBBON_PROBABILITY_ACCENT: f32 = 0.5;
pub const RIBBON_LOOPS: f32 = 6.0;
pub const RIBBON_WIDTH: f32 = 3.5; // band width at the base, narrows by 40% toward the apex
pub const RIBBON_SCALE_BOOST: f32 = 1.8;
pub const RIBBON_MIN_RADIUS: f32 = 0.1;
pub const INTERIOR_Y_JITTER: f32 = 3.0; // full span, centred

// Scatter layout (ornaments)
pub const SCATTER_MIN_RADIUS: f32 = 10.0;
pub const SCATTER_MAX_RADIUS: f32 = 25.0;

// Saturn layout (ornaments)
pub const PLANET_PROBABILITY: f32 = 0.4;
pub const PLANET_RADIUS: f32 = 7.0;
pub const PLANET_SHELL_MIN: f32 = 0.8; // fraction of the radius where the body starts
pub const RING_INNER_RADIUS: f32 = 10.0;
pub const RING_OUTER_RADIUS: f32 = 20.0;
pub const RING_THICKNESS: f32 = 0.4; // full span, centred
pub const SATURN_TILT: f32 = std::f32::consts::PI * 0.15; // about Z

// Photo layouts
pub const PHOTO_TREE_HEIGHT: f32 = 26.0;
pub const PHOTO_TREE_MAX_RADIUS: f32 = 11.0;
pub const PHOTO_RIBBON_OFFSET: f32 = 2.0; // photos hang just outside the cone
pub const PHOTO_RADIAL_JITTER: f32 = 2.0;
pub const PHOTO_ANGLE_JITTER: f32 = 0.5;
pub const PHOTO_SCATTER_MIN_RADIUS: f32 = 8.0;
pub const PHOTO_SCATTER_MAX_RADIUS: f32 = 20.0;
pub const PHOTO_RING_INNER_RADIUS: f32 = 12.0;
pub const PHOTO_RING_OUTER_RADIUS: f32 = 18.0;
pub const PHOTO_RING_THICKNESS: f32 = 1.0;

// Ornament sizing
pub const ORNAMENT_BASE_SCALE_MIN: f32 = 0.05;
pub const ORNAMENT_BASE_SCALE_SPAN: f32 = 0.25;
pub const ORNAMENT_SPIN_MIN: f32 = 1.0; // rad/s, per-axis tumble rate lower bound
pub const ORNAMENT_SPIN_SPAN: f32 = 1.0;

// Photo sizing
pub const PHOTO_BASE_SCALE: f32 = 1.0;
pub const PHOTO_SCATTER_SCALE: f32 = 2.5; // multiplier on base
pub const PHOTO_SATURN_SCALE: f32 = 2.0; // multiplier on base
pub const PHOTO_FOCUS_SCALE: f32 = 5.5; // absolute

// Smoothing rates (per second, applied as rate * dt)
pub const POSITION_RATE: f32 = 2.0;
pub const FOCUS_POSITION_RATE: f32 = 6.0; // 0.1 of the gap per frame at 60 Hz
pub const SCALE_RATE: f32 = 4.0;
pub const PHOTO_SPIN_RATE: f32 = 1.0;
pub const PHOTO_TREE_SPIN_RATE: f32 = 0.5;
pub const PHOTO_LEVEL_RATE: f32 = 1.0;

// Frame stepping
pub const MAX_FRAME_STEP_SEC: f32 = 0.1;

// Transient status lines revert to "Ready" after this long
pub const STATUS_NOTICE_SEC: f32 = 2.0;

// Scene rotation
pub const IDLE_YAW_RATE: f32 = 0.2; // rad/s while in TREE without steering
pub const STEER_RATE: f32 = 2.0;
pub const STEER_YAW_GAIN: f32 = 2.0; // hand.x is doubled before steering yaw
pub const LEVEL_RATE: f32 = 1.0;
pub const GALAXY_SPIN_RATE: f32 = 0.02;

// Gesture classification
pub const LANDMARK_COUNT: usize = 21;
pub const FINGER_OPEN_RATIO: f32 = 1.5; // tip-to-wrist vs wrist-to-middle-knuckle
pub const STABLE_FRAMES: u32 = 5; // a label must be seen more than this many times in a row

// Camera
pub const CAMERA_BASE_Z: f32 = 50.0;
pub const CAMERA_HEIGHT: f32 = 4.0;
pub const CAMERA_FOVY_DEG: f32 = 45.0;
pub const CAMERA_ZNEAR: f32 = 0.1;
pub const CAMERA_ZFAR: f32 = 1000.0;
pub const PORTRAIT_PULLBACK: f32 = 0.8; // z = base / (aspect * pullback) when aspect < 1
pub const FOCUS_POINT: [f32; 3] = [0.0, 0.0, 40.0]; // world space

// Backdrop
pub const DUST_MIN_RADIUS: f32 = 20.0;
pub const DUST_RADIUS_SPAN: f32 = 40.0;
pub const DUST_HEIGHT: f32 = -15.0;
pub const DUST_HEIGHT_SPAN: f32 = 5.0;
pub const DUST_SIZE: f32 = 0.2;
pub const GALAXY_MIN_RADIUS: f32 = 35.0;
pub const GALAXY_RADIUS_SPAN: f32 = 100.0;
pub const GALAXY_ARMS: usize = 3;
pub const GALAXY_SPIN_PER_UNIT: f32 = 0.3;
pub const GALAXY_SCATTER: f32 = 8.0;
pub const GALAXY_THICKNESS: f32 = 0.2; // fraction of radius
pub const GALAXY_SIZE: f32 = 0.3;

// Palette
pub const BACKGROUND_RGB: u32 = 0x020205;
pub const GALAXY_INNER_RGB: u32 = 0xffd7b5; // warm centre
pub const GALAXY_OUTER_RGB: u32 = 0x1b3984; // deep blue edge
pub const DUST_RGB: u32 = 0x8888ff;

#[inline]
pub fn focus_point() -> Vec3 {
    Vec3::from(FOCUS_POINT)
}

/// Unpack a `0xRRGGBB` colour into linear-ish `[r, g, b]` floats in 0..1.
#[inline]
pub fn rgb(hex: u32) -> [f32; 3] {
    [
        ((hex >> 16) & 0xff) as f32 / 255.0,
        ((hex >> 8) & 0xff) as f32 / 255.0,
        (hex & 0xff) as f32 / 255.0,
    ]
}
