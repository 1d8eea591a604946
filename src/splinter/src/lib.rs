//! Splinter: a 2D cloth simulator.
//!
//! Points are integrated with position Verlet and joined by rigid links,
//! which are enforced by a fixed number of sequential relaxation passes per
//! step. [`world::ClothWorld`] is the engine, [`editor::Editor`] wraps it in
//! an interactive editing session driven by [`controller_message::ControllerMessage`].

pub mod config;
pub mod controller_message;
pub mod editor;
pub mod error;
pub mod link;
pub mod particle;
pub mod physical_model;
pub mod vec2;
pub mod world;

pub type V2 = nalgebra::Vector2<f32>;

pub use config::{Settings, SimConfig};
pub use error::ClothError;
pub use world::ClothWorld;
