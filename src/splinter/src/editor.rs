use crate::config::{EditorConfig, Settings};
use crate::controller_message::ControllerMessage;
use crate::error::ClothError;
use crate::particle::PointId;
use crate::world::ClothWorld;
use crate::V2;
use protocol::pr_model::PrModel;
use protocol::user_event::{EditMode, UpdateInfo};
use protocol::view::View;

/// Interactive editing session around a [`ClothWorld`].
///
/// The driver forwards user actions as [`ControllerMessage`]s and calls
/// [`Editor::frame`] once per rendered frame. Handles kept between messages
/// (a half-made link, the tail of a quick-add chain) may go stale when their
/// point is removed; they are then dropped instead of linking to anything.
pub struct Editor {
	world: ClothWorld,
	config: EditorConfig,
	view: View,
	paused: bool,
	// single steps requested while paused
	forward_frames: u32,
	pending_link: Option<PointId>,
	chain_tail: Option<PointId>,
	clock: f32,
	last_quick_add: Option<f32>,
	mode: EditMode,
}

impl Default for Editor {
	fn default() -> Self {
		Self::new(Settings::default())
	}
}

impl Editor {
	pub fn new(settings: Settings) -> Self {
		let Settings { sim, editor } = settings;
		Self {
			world: ClothWorld::new(sim),
			paused: editor.start_paused,
			config: editor,
			view: View::default(),
			forward_frames: 0,
			pending_link: None,
			chain_tail: None,
			clock: 0.,
			last_quick_add: None,
			mode: EditMode::default(),
		}
	}

	pub fn try_new(settings: Settings) -> Result<Self, ClothError> {
		settings.sim.validate()?;
		settings.editor.validate()?;
		Ok(Self::new(settings))
	}

	pub fn world(&self) -> &ClothWorld {
		&self.world
	}

	pub fn world_mut(&mut self) -> &mut ClothWorld {
		&mut self.world
	}

	pub fn view(&self) -> &View {
		&self.view
	}

	pub fn is_paused(&self) -> bool {
		self.paused
	}

	pub fn clock(&self) -> f32 {
		self.clock
	}

	fn pick(&self, screen_pos: V2) -> Option<PointId> {
		self.world
			.closest_point(self.view.s2w(screen_pos), Some(self.config.pick_radius))
	}

	/// Point under the cursor, if any.
	pub fn hover(&self, screen_pos: V2) -> Option<PointId> {
		self.pick(screen_pos)
	}

	// a start point removed since the first click no longer counts
	pub fn pending_link(&self) -> Option<PointId> {
		self.pending_link.filter(|&id| self.world.contains(id))
	}

	pub fn handle(&mut self, msg: ControllerMessage) {
		use ControllerMessage::*;
		match msg {
			TogglePause => self.paused = !self.paused,
			FrameForward => {
				if self.paused {
					self.forward_frames += 1;
				}
			}
			Clear => {
				self.world.clear();
				self.paused = true;
				self.forward_frames = 0;
				self.pending_link = None;
				self.chain_tail = None;
			}
			AddPoint(p) => {
				self.mode = EditMode::Add;
				if self.pending_link().is_none() {
					self.world.add_point(self.view.s2w(p), false);
				}
			}
			RemovePoint(p) => {
				self.mode = EditMode::Remove;
				if self.pending_link().is_none() {
					self.remove_at(p);
				}
			}
			LinkFrom(p) => self.link_from(p),
			ToggleLock(p) => {
				if let Some(id) = self.pick(p) {
					if let Err(e) = self.world.toggle_locked(id) {
						log::warn!("toggle lock: {}", e);
					}
				}
			}
			QuickAdd(p) => {
				self.mode = EditMode::QuickAdd;
				self.quick_add(p);
			}
			QuickRemove(p) => {
				self.mode = EditMode::QuickRemove;
				self.remove_at(p);
			}
			EndQuickAdd => self.chain_tail = None,
			Pan(ds) => {
				self.mode = EditMode::Move;
				self.view.move_view(ds);
			}
		}
	}

	fn remove_at(&mut self, screen_pos: V2) {
		let target = self.view.s2w(screen_pos);
		self.world
			.remove_nearest_point(target, Some(self.config.pick_radius));
	}

	fn link_from(&mut self, screen_pos: V2) {
		let hit = self.pick(screen_pos);
		let start = self.pending_link.take().filter(|&id| self.world.contains(id));
		let Some(start) = start else {
			self.pending_link = hit;
			return;
		};
		let Some(end) = hit else {
			return;
		};
		if let Err(e) = self.world.add_link(start, end) {
			log::debug!("drop pending link: {}", e);
		}
	}

	fn quick_add(&mut self, screen_pos: V2) {
		if let Some(last) = self.last_quick_add {
			if self.clock - last <= self.config.quick_add_interval {
				return;
			}
		}
		let id = self.world.add_point(self.view.s2w(screen_pos), false);
		if let Some(tail) = self.chain_tail {
			if let Err(e) = self.world.add_link(tail, id) {
				log::debug!("restart quick-add chain: {}", e);
			}
		}
		self.chain_tail = Some(id);
		self.last_quick_add = Some(self.clock);
	}

	/// Advance the session clock and, unless paused, the simulation.
	pub fn frame(&mut self, dt: f32) {
		self.clock += dt;
		if !self.paused {
			self.world.advance(dt);
		} else if self.forward_frames > 0 {
			self.forward_frames -= 1;
			self.world.advance(dt);
		}
	}

	pub fn status(&self) -> UpdateInfo {
		UpdateInfo {
			particle_len: self.world.particle_len(),
			link_len: self.world.link_len(),
			paused: self.paused,
			mode: self.mode,
		}
	}

	pub fn pr_model(&self) -> PrModel {
		self.world.pr_model()
	}
}

#[cfg(test)]
mod test {
	use super::*;
	use ControllerMessage::*;

	fn editor() -> Editor {
		Editor::default()
	}

	#[test]
	fn test_starts_paused() {
		let mut e = editor();
		assert!(e.is_paused());
		e.handle(AddPoint(V2::new(10., 10.)));
		e.frame(0.1);
		assert!((e.clock() - 0.1).abs() < 1e-6);
		let (_, p) = e.world().particles().next().unwrap();
		assert_eq!(p.get_pos(), V2::new(10., 10.));
		assert!(e.status().paused);
		e.handle(TogglePause);
		assert!(!e.is_paused());
		e.frame(0.1);
		let (_, p) = e.world().particles().next().unwrap();
		assert!(p.get_pos()[1] > 10.);
	}

	#[test]
	fn test_frame_forward() {
		let mut e = editor();
		e.handle(AddPoint(V2::new(0., 0.)));
		e.handle(FrameForward);
		e.frame(0.1);
		let y1 = e.world().particles().next().unwrap().1.get_pos()[1];
		assert!(y1 > 0.);
		e.frame(0.1);
		let y2 = e.world().particles().next().unwrap().1.get_pos()[1];
		assert_eq!(y1, y2);
	}

	#[test]
	fn test_two_click_link() {
		let mut e = editor();
		e.handle(AddPoint(V2::new(0., 0.)));
		e.handle(AddPoint(V2::new(50., 0.)));
		e.handle(LinkFrom(V2::new(2., 1.)));
		assert!(e.pending_link().is_some());
		// adding is blocked while a link is pending
		e.handle(AddPoint(V2::new(100., 100.)));
		assert_eq!(e.world().particle_len(), 2);
		e.handle(LinkFrom(V2::new(49., 0.)));
		assert!(e.pending_link().is_none());
		assert_eq!(e.world().link_len(), 1);
		let l = e.world().links().next().unwrap();
		assert!((l.rest_length() - 50.).abs() < 1e-5);
	}

	#[test]
	fn test_link_miss_resets() {
		let mut e = editor();
		e.handle(AddPoint(V2::new(0., 0.)));
		e.handle(LinkFrom(V2::new(0., 0.)));
		e.handle(LinkFrom(V2::new(300., 300.)));
		assert!(e.pending_link().is_none());
		assert_eq!(e.world().link_len(), 0);
	}

	#[test]
	fn test_pending_link_stale() {
		let mut e = editor();
		e.handle(AddPoint(V2::new(0., 0.)));
		e.handle(AddPoint(V2::new(40., 0.)));
		e.handle(LinkFrom(V2::new(0., 0.)));
		let start = e.pending_link().unwrap();
		e.world_mut().remove_point(start).unwrap();
		assert!(e.pending_link().is_none());
		// the click starts a new link instead of finishing the dead one
		e.handle(LinkFrom(V2::new(40., 0.)));
		assert_eq!(e.world().link_len(), 0);
		assert!(e.pending_link().is_some());
	}

	#[test]
	fn test_quick_add_chain() {
		let mut e = editor();
		e.handle(QuickAdd(V2::new(0., 0.)));
		// too soon
		e.handle(QuickAdd(V2::new(5., 0.)));
		assert_eq!(e.world().particle_len(), 1);
		e.frame(0.05);
		e.handle(QuickAdd(V2::new(5., 0.)));
		e.frame(0.05);
		e.handle(QuickAdd(V2::new(10., 0.)));
		assert_eq!(e.world().particle_len(), 3);
		assert_eq!(e.world().link_len(), 2);
		e.handle(EndQuickAdd);
		e.frame(0.05);
		e.handle(QuickAdd(V2::new(100., 0.)));
		assert_eq!(e.world().particle_len(), 4);
		assert_eq!(e.world().link_len(), 2);
		assert_eq!(e.status().mode, EditMode::QuickAdd);
	}

	#[test]
	fn test_pending_link_removed_by_quick_remove() {
		let mut e = editor();
		e.handle(AddPoint(V2::new(0., 0.)));
		e.handle(LinkFrom(V2::new(0., 0.)));
		e.handle(QuickRemove(V2::new(0., 0.)));
		assert!(e.pending_link().is_none());
		e.handle(AddPoint(V2::new(50., 50.)));
		assert_eq!(e.world().particle_len(), 1);
		e.handle(RemovePoint(V2::new(50., 50.)));
		assert_eq!(e.world().particle_len(), 0);
	}

	#[test]
	fn test_quick_add_exact_interval() {
		let mut e = Editor::new(Settings {
			editor: EditorConfig::default().with_quick_add_interval(0.5),
			..Settings::default()
		});
		e.handle(QuickAdd(V2::new(0., 0.)));
		e.frame(0.5);
		e.handle(QuickAdd(V2::new(5., 0.)));
		assert_eq!(e.world().particle_len(), 1);
		e.frame(0.25);
		e.handle(QuickAdd(V2::new(5., 0.)));
		assert_eq!(e.world().particle_len(), 2);
		assert_eq!(e.world().link_len(), 1);
	}

	#[test]
	fn test_quick_add_after_tail_removed() {
		let mut e = editor();
		e.handle(QuickAdd(V2::new(0., 0.)));
		e.handle(QuickRemove(V2::new(1., 0.)));
		assert_eq!(e.world().particle_len(), 0);
		e.frame(0.05);
		e.handle(QuickAdd(V2::new(20., 0.)));
		assert_eq!(e.world().particle_len(), 1);
		assert_eq!(e.world().link_len(), 0);
	}

	#[test]
	fn test_remove_within_radius() {
		let mut e = editor();
		e.handle(AddPoint(V2::new(5., 5.)));
		e.handle(RemovePoint(V2::new(30., 30.)));
		assert_eq!(e.world().particle_len(), 1);
		e.handle(RemovePoint(V2::new(8., 5.)));
		assert_eq!(e.world().particle_len(), 0);
		assert_eq!(e.status().mode, EditMode::Remove);
	}

	#[test]
	fn test_toggle_lock() {
		let mut e = editor();
		e.handle(AddPoint(V2::new(0., 0.)));
		e.handle(ToggleLock(V2::new(1., 1.)));
		assert!(e.world().particles().next().unwrap().1.is_locked());
		e.handle(TogglePause);
		e.frame(0.1);
		assert_eq!(e.world().particles().next().unwrap().1.get_pos(), V2::zeros());
	}

	#[test]
	fn test_pan() {
		let mut e = editor();
		e.handle(Pan(V2::new(-100., 0.)));
		assert_eq!(e.status().mode, EditMode::Move);
		e.handle(AddPoint(V2::new(0., 0.)));
		let (id, p) = e.world().particles().next().unwrap();
		assert_eq!(p.get_pos(), V2::new(100., 0.));
		assert_eq!(e.hover(V2::new(2., 0.)), Some(id));
		assert_eq!(e.view().w2s(p.get_pos()), V2::zeros());
	}

	#[test]
	fn test_clear_pauses() {
		let mut e = editor();
		e.handle(AddPoint(V2::new(0., 0.)));
		e.handle(AddPoint(V2::new(20., 0.)));
		e.handle(LinkFrom(V2::new(0., 0.)));
		e.handle(TogglePause);
		e.handle(Clear);
		let info = e.status();
		assert!(info.paused);
		assert_eq!(info.particle_len, 0);
		assert_eq!(info.link_len, 0);
		assert!(e.pending_link().is_none());
		assert!(e.pr_model().is_empty());
	}

	#[test]
	fn test_try_new_rejects() {
		let mut settings = Settings::default();
		settings.editor.pick_radius = f32::INFINITY;
		assert!(Editor::try_new(settings).is_err());
		assert!(Editor::try_new(Settings::default()).is_ok());
	}
}
