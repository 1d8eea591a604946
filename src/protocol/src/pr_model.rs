// pr_model: Physical model for rendering

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PrParticle {
	pub pos: [f32; 2],
	pub locked: bool,
}

// endpoints are positions, renderers do not need to resolve ids
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PrLink {
	pub a: [f32; 2],
	pub b: [f32; 2],
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PrModel {
	pub particles: Vec<PrParticle>,
	pub links: Vec<PrLink>,
}

impl PrModel {
	pub fn is_empty(&self) -> bool {
		self.particles.is_empty() && self.links.is_empty()
	}
}
