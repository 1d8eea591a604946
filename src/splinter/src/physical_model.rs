use crate::particle::ParticleTemplate;
use crate::V2;

/// Points and links in local coordinates, instantiated with
/// `ClothWorld::add_model`. Links refer to points by index.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PhysicalModel {
	pub particles: Vec<ParticleTemplate>,
	pub links: Vec<[usize; 2]>,
}

impl PhysicalModel {
	/// Horizontal chain of `n` points `spacing` apart.
	pub fn new_rope(n: usize, spacing: f32, pin_first: bool) -> Self {
		let particles = (0..n)
			.map(|idx| ParticleTemplate {
				pos: V2::new(spacing * idx as f32, 0.),
				locked: pin_first && idx == 0,
			})
			.collect();
		let links = (1..n).map(|idx| [idx - 1, idx]).collect();
		Self { particles, links }
	}

	/// `x` by `y` grid with structural links. Every `pin_every`-th point of
	/// the top row is locked, 0 pins nothing.
	pub fn new_cloth(x: usize, y: usize, size: f32, pin_every: usize) -> Self {
		let idx_of = |idx: usize, idy: usize| idy * x + idx;
		let mut particles = vec![];
		let mut links = vec![];
		for idy in 0..y {
			for idx in 0..x {
				let locked = idy == 0 && pin_every != 0 && idx % pin_every == 0;
				particles.push(ParticleTemplate {
					pos: V2::new(size * idx as f32, size * idy as f32),
					locked,
				});
			}
		}
		for idy in 0..y {
			for idx in 1..x {
				links.push([idx_of(idx - 1, idy), idx_of(idx, idy)]);
			}
		}
		for idy in 1..y {
			for idx in 0..x {
				links.push([idx_of(idx, idy - 1), idx_of(idx, idy)]);
			}
		}
		Self { particles, links }
	}
}
