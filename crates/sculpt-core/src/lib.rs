pub mod backdrop;
pub mod batch;
pub mod constants;
pub mod error;
pub mod gesture;
pub mod layout;
pub mod mode;
pub mod particle;
pub mod scene;
pub mod sim;
pub mod state;

pub static PARTICLES_WGSL: &str = include_str!("../shaders/particles.wgsl");

pub use backdrop::*;
pub use batch::*;
pub use constants::*;
pub use error::SculptError;
pub use gesture::*;
pub use layout::*;
pub use mode::*;
pub use particle::*;
pub use scene::*;
pub use state::*;
