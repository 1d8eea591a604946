use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EditMode {
	#[default]
	Add,
	Remove,
	QuickAdd,
	QuickRemove,
	Move,
}

impl EditMode {
	pub fn label(&self) -> &'static str {
		match self {
			Self::Add => "ADD",
			Self::Remove => "REMOVE",
			Self::QuickAdd => "QUICK ADD",
			Self::QuickRemove => "QUICK REMOVE",
			Self::Move => "MOVE",
		}
	}
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UpdateInfo {
	pub particle_len: usize,
	pub link_len: usize,
	pub paused: bool,
	pub mode: EditMode,
}

impl std::fmt::Display for UpdateInfo {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(
			f,
			"{}   Points: {}   Lines: {}   {}",
			if self.paused { "FROZEN" } else { "SIMULATING" },
			self.particle_len,
			self.link_len,
			self.mode.label(),
		)
	}
}
