//! Firework rain: random bursts in the upper half that fall under gravity.

use std::f64::consts::TAU;

use super::effect::CanvasEffect;
use super::particles::{Motion, Particle, ParticleSet};
use super::render::{Bounds, Surface, draw_particles};
use super::rng::RandomSource;
use super::theme::FireworkStyle;

pub struct FireworkRainFx {
	style: FireworkStyle,
	particles: ParticleSet,
}

impl FireworkRainFx {
	pub fn new(style: FireworkStyle) -> Self {
		Self {
			style,
			particles: ParticleSet::default(),
		}
	}

	pub fn particles(&self) -> &ParticleSet {
		&self.particles
	}

	/// Spawn one burst of `burst_size` particles at `(x, y)`, all in one color.
	pub fn burst(&mut self, x: f64, y: f64, rng: &mut dyn RandomSource) {
		let color = self.style.palette.get(rng.index(self.style.palette.len()));
		for _ in 0..self.style.burst_size {
			let angle = rng.range(0.0, TAU);
			let speed = self.style.speed_min + rng.next_f64() * self.style.speed_range;
			self.particles.spawn(Particle::new(
				x,
				y,
				angle.cos() * speed,
				angle.sin() * speed,
				self.style.radius,
				color,
			));
		}
	}
}

impl CanvasEffect for FireworkRainFx {
	fn name(&self) -> &'static str {
		"firework-rain"
	}

	fn step(&mut self, bounds: Bounds, rng: &mut dyn RandomSource) {
		if rng.chance(self.style.burst_chance) {
			let x = rng.next_f64() * bounds.width;
			let y = rng.next_f64() * bounds.height * self.style.burst_height;
			self.burst(x, y, rng);
		}
		self.particles.step(Motion {
			gravity: self.style.gravity,
			decay: self.style.decay,
		});
	}

	fn render(&self, surface: &mut dyn Surface, _bounds: Bounds) {
		surface.fade(self.style.fade);
		draw_particles(surface, self.particles.as_slice(), None);
	}

	fn reset(&mut self) {
		self.particles.clear();
	}

	fn len(&self) -> usize {
		self.particles.len()
	}
}
