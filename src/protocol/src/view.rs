use serde::{Deserialize, Serialize};

use crate::V2;

// screen space and world space share the scale, the view only pans
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct View {
	offset: V2,
}

impl Default for View {
	fn default() -> Self {
		Self { offset: V2::zeros() }
	}
}

impl View {
	pub fn with_offset(mut self, offset: V2) -> Self {
		self.offset = offset;
		self
	}

	pub fn get_offset(&self) -> V2 {
		self.offset
	}

	// dragging the canvas moves the world the other way
	pub fn move_view(&mut self, ds: V2) {
		self.offset -= ds;
	}

	pub fn s2w(&self, pos: V2) -> V2 {
		pos + self.offset
	}

	pub fn w2s(&self, pos: V2) -> V2 {
		pos - self.offset
	}
}
