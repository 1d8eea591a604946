use std::time::SystemTime;

use splinter::physical_model::PhysicalModel;
use splinter::{ClothWorld, SimConfig, V2};

fn main() {
	env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
	let mut world = ClothWorld::new(SimConfig::default());
	world.add_model(&PhysicalModel::new_cloth(60, 40, 6., 4), V2::new(40., 20.));
	let dt = 1.0 / 60.0;
	let rframes = 600;
	let start = SystemTime::now();
	for _ in 0..rframes {
		world.advance(dt);
	}
	let time = rframes as f32 * dt;
	let duration = SystemTime::now()
		.duration_since(start)
		.map(|d| d.as_micros())
		.unwrap_or_default();
	log::info!(
		"{} points, {} links: {:.3}% of real time",
		world.particle_len(),
		world.link_len(),
		duration as f32 / time / 1e4,
	);
}
