use slotmap::SlotMap;

use crate::particle::{Particle, PointId};
use crate::vec2::{dist, midpoint, normalize_or_zero};
use protocol::pr_model::PrLink;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LinkId(pub u64);

/// Rigid distance constraint ("stick") between two points.
#[derive(Clone, Debug, PartialEq)]
pub struct Link {
	id: LinkId,
	a: PointId,
	b: PointId,
	l0: f32,
}

impl Link {
	pub(crate) fn new(id: LinkId, a: PointId, b: PointId, l0: f32) -> Self {
		Self { id, a, b, l0 }
	}

	pub fn get_id(&self) -> LinkId {
		self.id
	}

	pub fn endpoints(&self) -> [PointId; 2] {
		[self.a, self.b]
	}

	pub fn rest_length(&self) -> f32 {
		self.l0
	}

	pub fn touches(&self, p: PointId) -> bool {
		self.a == p || self.b == p
	}

	// Both endpoints are placed from the same center and direction,
	// taken before either of them moves.
	pub(crate) fn step(&self, points: &mut SlotMap<PointId, Particle>) {
		// a self-link has nothing to correct
		let Some([p1, p2]) = points.get_disjoint_mut([self.a, self.b]) else {
			return;
		};
		let pos1 = p1.get_pos();
		let pos2 = p2.get_pos();
		let center = midpoint(pos1, pos2);
		let dir = normalize_or_zero(pos1 - pos2);
		if dir == crate::V2::zeros() {
			log::debug!("degenerate link {:?}, length {}", self.id, dist(pos1, pos2));
		}
		let half = dir * self.l0 / 2.0;
		if !p1.is_locked() {
			p1.set_pos(center + half);
		}
		if !p2.is_locked() {
			p2.set_pos(center - half);
		}
	}

	pub fn render(&self, points: &SlotMap<PointId, Particle>) -> Option<PrLink> {
		let a = points.get(self.a)?.get_pos();
		let b = points.get(self.b)?.get_pos();
		Some(PrLink {
			a: [a[0], a[1]],
			b: [b[0], b[1]],
		})
	}
}

#[cfg(test)]
mod test {
	use super::*;
	use crate::V2;

	fn two(pos1: V2, pos2: V2) -> (SlotMap<PointId, Particle>, PointId, PointId) {
		let mut points = SlotMap::with_key();
		let a = points.insert(Particle::new(pos1, false));
		let b = points.insert(Particle::new(pos2, false));
		(points, a, b)
	}

	#[test]
	fn test_step_restores_length() {
		let (mut points, a, b) = two(V2::new(0., 0.), V2::new(20., 0.));
		let link = Link::new(LinkId(0), a, b, 10.);
		link.step(&mut points);
		let pa = points[a].get_pos();
		let pb = points[b].get_pos();
		assert!((pa - V2::new(5., 0.)).magnitude() < 1e-5);
		assert!((pb - V2::new(15., 0.)).magnitude() < 1e-5);
	}

	#[test]
	fn test_step_locked_endpoint() {
		let (mut points, a, b) = two(V2::new(0., 0.), V2::new(0., 20.));
		points[a].set_locked(true);
		let link = Link::new(LinkId(0), a, b, 10.);
		link.step(&mut points);
		assert_eq!(points[a].get_pos(), V2::new(0., 0.));
		// b lands on the far side of the midpoint
		assert!((points[b].get_pos() - V2::new(0., 15.)).magnitude() < 1e-5);
	}

	#[test]
	fn test_step_degenerate() {
		let (mut points, a, b) = two(V2::new(4., 4.), V2::new(4., 4.));
		let link = Link::new(LinkId(0), a, b, 10.);
		link.step(&mut points);
		assert_eq!(points[a].get_pos(), V2::new(4., 4.));
		assert_eq!(points[b].get_pos(), V2::new(4., 4.));
	}

	#[test]
	fn test_self_link() {
		let (mut points, a, _) = two(V2::new(1., 2.), V2::new(0., 0.));
		let link = Link::new(LinkId(0), a, a, 0.);
		link.step(&mut points);
		assert_eq!(points[a].get_pos(), V2::new(1., 2.));
	}
}
