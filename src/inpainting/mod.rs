//! Inpainting stages: directional estimate and compositing

pub mod composite;
pub mod directional;

pub use composite::composite;
pub use directional::directional_interpolate;
