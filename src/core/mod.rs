//! Core building blocks shared by every system: console macros, 2D math and the
//! particle buffers.

#[macro_use]
pub mod utils;
pub mod particles;
pub mod random;
pub mod vec2;

pub use particles::ParticleStore;
pub use vec2::Vec2;
