pub mod config;
pub mod palette;
pub mod points;

pub use config::{EngineProfile, ResizeTolerance, SimulationConfig};
pub use palette::{Palette, Rgba};
pub use points::TargetPoint;
