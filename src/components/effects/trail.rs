//! Pointer trail: colored sparks that follow the mouse, joined by lines.

use super::effect::CanvasEffect;
use super::particles::{Motion, Particle, ParticleSet};
use super::render::{Bounds, Surface, TrailLines, draw_particles};
use super::rng::RandomSource;
use super::theme::TrailStyle;

pub struct PointerTrail {
	style: TrailStyle,
	particles: ParticleSet,
}

impl PointerTrail {
	pub fn new(style: TrailStyle) -> Self {
		Self {
			style,
			particles: ParticleSet::default(),
		}
	}

	pub fn particles(&self) -> &ParticleSet {
		&self.particles
	}

	fn motion(&self) -> Motion {
		Motion {
			gravity: 0.0,
			decay: self.style.decay,
		}
	}
}

impl CanvasEffect for PointerTrail {
	fn name(&self) -> &'static str {
		"pointer-trail"
	}

	fn wants_pointer(&self) -> bool {
		true
	}

	fn pointer_moved(&mut self, x: f64, y: f64, rng: &mut dyn RandomSource) {
		let half = self.style.spread / 2.0;
		for _ in 0..self.style.batch {
			let vx = rng.range(-half, half);
			let vy = rng.range(-half, half);
			let color = self.style.palette.get(rng.index(self.style.palette.len()));
			self.particles
				.spawn(Particle::new(x, y, vx, vy, self.style.radius, color));
		}
	}

	fn step(&mut self, _bounds: Bounds, _rng: &mut dyn RandomSource) {
		let motion = self.motion();
		self.particles.step(motion);
	}

	fn render(&self, surface: &mut dyn Surface, _bounds: Bounds) {
		surface.clear();
		draw_particles(
			surface,
			self.particles.as_slice(),
			Some(TrailLines {
				width: self.style.line_width,
				alpha: self.style.line_alpha,
			}),
		);
	}

	fn reset(&mut self) {
		self.particles.clear();
	}

	fn len(&self) -> usize {
		self.particles.len()
	}
}
