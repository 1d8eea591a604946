use slotmap::SlotMap;

use crate::config::SimConfig;
use crate::error::ClothError;
use crate::link::{Link, LinkId};
use crate::particle::{Particle, PointId};
use crate::physical_model::PhysicalModel;
use crate::vec2::dist;
use crate::V2;
use protocol::pr_model::PrModel;

/// The simulation engine: owns every point and link.
///
/// Points are addressed by [`PointId`] handles. Removing a point removes
/// the links attached to it, and its handle stays detectably stale
/// afterwards.
pub struct ClothWorld {
	config: SimConfig,
	points: SlotMap<PointId, Particle>,
	// insertion order, nearest-point ties go to the earliest point
	order: Vec<PointId>,
	// visited in this order by every relaxation pass
	links: Vec<Link>,
	id_alloc: u64,
}

impl Default for ClothWorld {
	fn default() -> Self {
		Self::new(SimConfig::default())
	}
}

impl ClothWorld {
	pub fn new(config: SimConfig) -> Self {
		Self {
			config,
			points: SlotMap::with_key(),
			order: Vec::new(),
			links: Vec::new(),
			id_alloc: 0,
		}
	}

	pub fn try_new(config: SimConfig) -> Result<Self, ClothError> {
		config.validate()?;
		Ok(Self::new(config))
	}

	pub fn config(&self) -> &SimConfig {
		&self.config
	}

	pub fn particle_len(&self) -> usize {
		self.points.len()
	}

	pub fn link_len(&self) -> usize {
		self.links.len()
	}

	pub fn add_point(&mut self, pos: V2, locked: bool) -> PointId {
		let id = self.points.insert(Particle::new(pos, locked));
		self.order.push(id);
		id
	}

	pub fn particle(&self, id: PointId) -> Option<&Particle> {
		self.points.get(id)
	}

	pub fn contains(&self, id: PointId) -> bool {
		self.points.contains_key(id)
	}

	pub fn particles(&self) -> impl Iterator<Item = (PointId, &Particle)> + '_ {
		self.order.iter().map(move |&id| (id, &self.points[id]))
	}

	fn particle_mut(&mut self, id: PointId) -> Result<&mut Particle, ClothError> {
		self.points.get_mut(id).ok_or(ClothError::StalePoint(id))
	}

	pub fn set_locked(&mut self, id: PointId, locked: bool) -> Result<(), ClothError> {
		self.particle_mut(id)?.set_locked(locked);
		Ok(())
	}

	/// Flip the locked flag, returning the new state.
	pub fn toggle_locked(&mut self, id: PointId) -> Result<bool, ClothError> {
		let p = self.particle_mut(id)?;
		let locked = !p.is_locked();
		p.set_locked(locked);
		Ok(locked)
	}

	/// Teleport a point. Its implicit velocity becomes zero.
	pub fn set_position(&mut self, id: PointId, pos: V2) -> Result<(), ClothError> {
		self.particle_mut(id)?.reset_pos(pos);
		Ok(())
	}

	/// Nearest point to `target`, `None` when there are no points or the
	/// nearest one is farther than `within`.
	pub fn closest_point(&self, target: V2, within: Option<f32>) -> Option<PointId> {
		let mut best: Option<(PointId, f32)> = None;
		for &id in self.order.iter() {
			let d = dist(self.points[id].get_pos(), target);
			match best {
				Some((_, bd)) if !(d < bd) => {}
				_ => best = Some((id, d)),
			}
		}
		let (id, d) = best?;
		match within {
			// NaN radius or distance never matches
			Some(r) if !(d <= r) => None,
			_ => Some(id),
		}
	}

	pub fn remove_nearest_point(&mut self, target: V2, within: Option<f32>) -> Option<PointId> {
		let id = self.closest_point(target, within)?;
		self.remove_point(id).ok()?;
		Some(id)
	}

	/// Remove a point together with every link that references it.
	pub fn remove_point(&mut self, id: PointId) -> Result<Particle, ClothError> {
		if !self.points.contains_key(id) {
			return Err(ClothError::StalePoint(id));
		}
		self.links.retain(|l| !l.touches(id));
		self.order.retain(|&p| p != id);
		self.points.remove(id).ok_or(ClothError::StalePoint(id))
	}

	/// Link two points at their current distance. Self-links and
	/// duplicates are accepted.
	pub fn add_link(&mut self, a: PointId, b: PointId) -> Result<LinkId, ClothError> {
		let pa = self.points.get(a).ok_or(ClothError::StalePoint(a))?.get_pos();
		let pb = self.points.get(b).ok_or(ClothError::StalePoint(b))?.get_pos();
		let id = LinkId(self.id_alloc);
		self.id_alloc += 1;
		self.links.push(Link::new(id, a, b, dist(pa, pb)));
		Ok(id)
	}

	pub fn remove_link(&mut self, id: LinkId) -> Option<Link> {
		let idx = self.links.iter().position(|l| l.get_id() == id)?;
		Some(self.links.remove(idx))
	}

	pub fn link(&self, id: LinkId) -> Option<&Link> {
		self.links.iter().find(|l| l.get_id() == id)
	}

	pub fn links(&self) -> impl Iterator<Item = &Link> {
		self.links.iter()
	}

	pub fn link_endpoints(&self) -> impl Iterator<Item = (V2, V2)> + '_ {
		self.links.iter().map(move |l| {
			let [a, b] = l.endpoints();
			(self.points[a].get_pos(), self.points[b].get_pos())
		})
	}

	pub fn current_length(&self, link: &Link) -> Option<f32> {
		let [a, b] = link.endpoints();
		Some(dist(self.points.get(a)?.get_pos(), self.points.get(b)?.get_pos()))
	}

	pub fn clear(&mut self) {
		self.points.clear();
		self.order.clear();
		self.links.clear();
	}

	pub fn add_model(&mut self, physical_model: &PhysicalModel, offset: V2) -> Vec<PointId> {
		log::info!(
			"add model: {} particles, {} links",
			physical_model.particles.len(),
			physical_model.links.len(),
		);
		let id_map: Vec<PointId> = physical_model
			.particles
			.iter()
			.map(|p| self.add_point(p.pos + offset, p.locked))
			.collect();
		for &[i, j] in physical_model.links.iter() {
			let (Some(&a), Some(&b)) = (id_map.get(i), id_map.get(j)) else {
				log::warn!("skip link [{}, {}]: model has {} particles", i, j, id_map.len());
				continue;
			};
			if let Err(e) = self.add_link(a, b) {
				log::warn!("skip link [{}, {}]: {}", i, j, e);
			}
		}
		id_map
	}

	pub fn pr_model(&self) -> PrModel {
		PrModel {
			particles: self.particles().map(|(_, p)| p.render()).collect(),
			links: self
				.links
				.iter()
				.filter_map(|l| l.render(&self.points))
				.collect(),
		}
	}

	#[cfg(not(debug_assertions))]
	fn integrate(&mut self, dt: f32) {
		use rayon::prelude::*;
		let gravity = self.config.gravity;
		let damping = self.config.damping;
		let max_speed = self.config.max_speed;
		self.points
			.values_mut()
			.par_bridge()
			.for_each(|p| p.update(dt, gravity, damping, max_speed));
	}

	#[cfg(debug_assertions)]
	fn integrate(&mut self, dt: f32) {
		let gravity = self.config.gravity;
		let damping = self.config.damping;
		let max_speed = self.config.max_speed;
		self.points
			.values_mut()
			.for_each(|p| p.update(dt, gravity, damping, max_speed));
	}

	fn relax(&mut self) {
		for link in self.links.iter() {
			link.step(&mut self.points);
		}
	}

	/// One simulation step: Verlet integration of every unlocked point,
	/// then `iterations` sequential passes over the links.
	pub fn advance(&mut self, dt: f32) {
		self.integrate(dt);
		for _ in 0..self.config.iterations {
			self.relax();
		}
	}
}
