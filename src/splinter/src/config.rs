use serde::{Deserialize, Serialize};

use crate::error::ClothError;
use crate::V2;

/// Parameters of the simulation, fixed for the lifetime of a world.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
	/// Relaxation passes over all links per step.
	pub iterations: usize,
	/// Multiplies the implicit velocity every step, 1.0 keeps it.
	pub damping: f32,
	/// Acceleration in units/s^2, y grows downward.
	pub gravity: V2,
	/// Largest displacement an unlocked point carries into a step.
	pub max_speed: f32,
}

impl Default for SimConfig {
	fn default() -> Self {
		Self {
			iterations: 10,
			damping: 0.9999,
			gravity: V2::new(0., 100.),
			max_speed: 10.,
		}
	}
}

impl SimConfig {
	pub fn with_iterations(mut self, iterations: usize) -> Self {
		self.iterations = iterations;
		self
	}

	pub fn with_damping(mut self, damping: f32) -> Self {
		self.damping = damping;
		self
	}

	pub fn with_gravity(mut self, gravity: V2) -> Self {
		self.gravity = gravity;
		self
	}

	pub fn with_max_speed(mut self, max_speed: f32) -> Self {
		self.max_speed = max_speed;
		self
	}

	pub fn validate(&self) -> Result<(), ClothError> {
		if !self.damping.is_finite() || self.damping < 0.0 {
			return Err(ClothError::InvalidConfig {
				field: "damping",
				reason: format!("{} is not a finite non-negative factor", self.damping),
			});
		}
		if !(self.gravity[0].is_finite() && self.gravity[1].is_finite()) {
			return Err(ClothError::InvalidConfig {
				field: "gravity",
				reason: format!("{:?} is not finite", self.gravity),
			});
		}
		if !self.max_speed.is_finite() || self.max_speed <= 0.0 {
			return Err(ClothError::InvalidConfig {
				field: "max_speed",
				reason: format!("{} is not a finite positive speed", self.max_speed),
			});
		}
		Ok(())
	}
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
	/// Hit-test radius for picking points, in world units.
	pub pick_radius: f32,
	/// Minimum seconds between two quick-add points.
	pub quick_add_interval: f32,
	/// Start with the simulation paused.
	pub start_paused: bool,
}

impl Default for EditorConfig {
	fn default() -> Self {
		Self {
			pick_radius: 10.,
			quick_add_interval: 0.02,
			start_paused: true,
		}
	}
}

impl EditorConfig {
	pub fn with_pick_radius(mut self, r: f32) -> Self {
		self.pick_radius = r;
		self
	}

	pub fn with_quick_add_interval(mut self, t: f32) -> Self {
		self.quick_add_interval = t;
		self
	}

	pub fn with_start_paused(mut self, paused: bool) -> Self {
		self.start_paused = paused;
		self
	}

	pub fn validate(&self) -> Result<(), ClothError> {
		if !self.pick_radius.is_finite() || self.pick_radius < 0.0 {
			return Err(ClothError::InvalidConfig {
				field: "pick_radius",
				reason: format!("{} is not a finite non-negative radius", self.pick_radius),
			});
		}
		if !self.quick_add_interval.is_finite() || self.quick_add_interval < 0.0 {
			return Err(ClothError::InvalidConfig {
				field: "quick_add_interval",
				reason: format!("{} is not a finite non-negative duration", self.quick_add_interval),
			});
		}
		Ok(())
	}
}

/// Everything a driver needs to set up an editor, loadable from TOML:
///
/// ```toml
/// [sim]
/// iterations = 20
/// gravity = [0.0, 50.0]
///
/// [editor]
/// pick_radius = 8.0
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
	pub sim: SimConfig,
	pub editor: EditorConfig,
}

impl Settings {
	pub fn from_toml(s: &str) -> Result<Self, ClothError> {
		let settings: Self = toml::from_str(s)?;
		settings.sim.validate()?;
		settings.editor.validate()?;
		Ok(settings)
	}
}
