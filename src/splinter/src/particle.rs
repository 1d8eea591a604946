use slotmap::new_key_type;

use crate::vec2::clamp_magnitude;
use crate::V2;
use protocol::pr_model::PrParticle;

new_key_type! {
	/// Generation-checked handle of a point owned by a `ClothWorld`.
	pub struct PointId;
}

#[derive(Clone, Debug, PartialEq)]
pub struct ParticleTemplate {
	pub pos: V2,
	pub locked: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
	pos: V2,
	ppos: V2,
	locked: bool,
}

impl Particle {
	pub fn new(pos: V2, locked: bool) -> Self {
		Self {
			pos,
			ppos: pos,
			locked,
		}
	}

	pub fn get_pos(&self) -> V2 {
		self.pos
	}

	pub fn get_ppos(&self) -> V2 {
		self.ppos
	}

	pub(crate) fn set_pos(&mut self, p: V2) {
		self.pos = p;
	}

	pub fn reset_pos(&mut self, p: V2) {
		self.pos = p;
		self.ppos = p;
	}

	pub fn is_locked(&self) -> bool {
		self.locked
	}

	pub fn set_locked(&mut self, locked: bool) {
		self.locked = locked;
	}

	/// Implicit velocity, displacement over the last step.
	pub fn velocity(&self) -> V2 {
		self.pos - self.ppos
	}

	pub fn update(&mut self, t: f32, gravity: V2, damping: f32, max_dp: f32) {
		if self.locked {
			return;
		}
		let ppos = self.pos;
		let dp = clamp_magnitude(self.pos - self.ppos, max_dp);
		self.pos += dp * damping + gravity * t * t;
		self.ppos = ppos;
	}

	pub fn render(&self) -> PrParticle {
		PrParticle {
			pos: [self.pos[0], self.pos[1]],
			locked: self.locked,
		}
	}
}
