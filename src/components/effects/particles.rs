//! Short-lived particles and the frame stepper that ages them.

use super::theme::Color;

/// A single transient particle.
#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
	pub x: f64,
	pub y: f64,
	pub vx: f64,
	pub vy: f64,
	/// Remaining life, 1.0 at spawn. Doubles as draw alpha.
	pub life: f64,
	pub radius: f64,
	/// Picked at spawn, never changed afterwards.
	pub color: Color,
}

impl Particle {
	pub fn new(x: f64, y: f64, vx: f64, vy: f64, radius: f64, color: Color) -> Self {
		Self {
			x,
			y,
			vx,
			vy,
			life: 1.0,
			radius,
			color,
		}
	}
}

/// Per-effect motion constants applied on every step.
#[derive(Clone, Copy, Debug)]
pub struct Motion {
	/// Added to `vy` each step (0 for weightless effects)
	pub gravity: f64,
	/// Subtracted from `life` each step
	pub decay: f64,
}

/// The active particles of one effect session, in spawn order.
#[derive(Clone, Debug, Default)]
pub struct ParticleSet {
	particles: Vec<Particle>,
}

impl ParticleSet {
	pub fn spawn(&mut self, particle: Particle) {
		self.particles.push(particle);
	}

	/// Advance every particle one tick and prune the expired ones.
	///
	/// Integration order is position, then gravity, then decay. Anything whose
	/// life reaches zero is gone before this returns, so the renderer never
	/// sees a dead particle.
	pub fn step(&mut self, motion: Motion) {
		for p in &mut self.particles {
			p.x += p.vx;
			p.y += p.vy;
			p.vy += motion.gravity;
			p.life -= motion.decay;
		}
		self.particles.retain(|p| p.life > 0.0);
	}

	pub fn iter(&self) -> std::slice::Iter<'_, Particle> {
		self.particles.iter()
	}

	pub fn as_slice(&self) -> &[Particle] {
		&self.particles
	}

	pub fn len(&self) -> usize {
		self.particles.len()
	}

	pub fn is_empty(&self) -> bool {
		self.particles.is_empty()
	}

	pub fn clear(&mut self) {
		self.particles.clear();
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	const WHITE: Color = Color::rgb(255, 255, 255);

	fn still() -> Motion {
		Motion {
			gravity: 0.0,
			decay: 0.25,
		}
	}

	#[test]
	fn step_integrates_position_then_gravity() {
		let mut set = ParticleSet::default();
		set.spawn(Particle::new(10.0, 20.0, 1.0, -2.0, 2.0, WHITE));
		set.step(Motion {
			gravity: 0.05,
			decay: 0.01,
		});

		let p = &set.as_slice()[0];
		assert_eq!((p.x, p.y), (11.0, 18.0));
		assert!((p.vy - -1.95).abs() < 1e-12);
		assert!((p.life - 0.99).abs() < 1e-12);
		assert_eq!(p.vx, 1.0);
	}

	#[test]
	fn life_drops_by_decay_every_step() {
		let mut set = ParticleSet::default();
		set.spawn(Particle::new(0.0, 0.0, 0.0, 0.0, 1.0, WHITE));
		let mut previous = 1.0;
		for _ in 0..3 {
			set.step(still());
			let life = set.as_slice()[0].life;
			assert!((previous - life - 0.25).abs() < 1e-12);
			previous = life;
		}
	}

	#[test]
	fn expired_particles_are_pruned_after_step() {
		let mut set = ParticleSet::default();
		let mut old = Particle::new(0.0, 0.0, 0.0, 0.0, 1.0, WHITE);
		old.life = 0.25;
		set.spawn(old);
		set.spawn(Particle::new(5.0, 5.0, 0.0, 0.0, 1.0, WHITE));

		set.step(still());

		assert_eq!(set.len(), 1);
		assert!(set.iter().all(|p| p.life > 0.0));
		assert_eq!(set.as_slice()[0].x, 5.0);
	}

	#[test]
	fn set_drains_completely() {
		let mut set = ParticleSet::default();
		for i in 0..10 {
			set.spawn(Particle::new(i as f64, 0.0, 1.0, 1.0, 1.0, WHITE));
		}
		for _ in 0..4 {
			set.step(still());
		}
		assert!(set.is_empty());
	}

	#[test]
	fn stepping_keeps_spawn_order() {
		let mut set = ParticleSet::default();
		for i in 0..4 {
			let mut p = Particle::new(i as f64, 0.0, 0.0, 0.0, 1.0, WHITE);
			// every other particle is about to expire
			if i % 2 == 1 {
				p.life = 0.1;
			}
			set.spawn(p);
		}
		set.step(still());
		let xs: Vec<f64> = set.iter().map(|p| p.x).collect();
		assert_eq!(xs, vec![0.0, 2.0]);
	}
}
