//! Error type for the sculpture core.
//!
//! Nothing in the per-frame path returns these; they surface at the seams
//! where collaborator data enters the core and are turned into status
//! updates or "hand not detected" by the caller.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SculptError {
    /// Landmark set had the wrong number of points.
    #[error("expected {expected} hand landmarks, got {found}")]
    MalformedLandmarks { expected: usize, found: usize },

    /// Landmark set contained NaN or infinite coordinates.
    #[error("hand landmark {index} is not finite")]
    NonFiniteLandmark { index: usize },

    /// A photo id that was never issued by the scene.
    #[error("unknown photo id {0}")]
    UnknownPhoto(usize),

    /// Camera or inference collaborator failed to start.
    #[error("camera unavailable: {0}")]
    CameraUnavailable(String),
}

pub type Result<T> = std::result::Result<T, SculptError>;
