//! Per-effect lifecycle: mount, frame, resize, unmount.
//!
//! The host owns one effect, one surface and one random source. It knows
//! nothing about the browser; the runner feeds it frames and events.

use log::debug;

use super::effect::CanvasEffect;
use super::render::{Bounds, Surface};
use super::rng::RandomSource;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HostState {
	Unmounted,
	Running,
}

/// An effect session: the effect's entity set plus the surface it draws on.
pub struct AnimationHost<E, S> {
	effect: E,
	surface: S,
	rng: Box<dyn RandomSource>,
	state: HostState,
	bounds: Bounds,
	frames: u64,
}

impl<E: CanvasEffect, S: Surface> AnimationHost<E, S> {
	pub fn new(effect: E, surface: S, rng: Box<dyn RandomSource>) -> Self {
		Self {
			effect,
			surface,
			rng,
			state: HostState::Unmounted,
			bounds: Bounds::default(),
			frames: 0,
		}
	}

	/// Size the surface and seed a fresh entity set. No-op while running.
	pub fn mount(&mut self, bounds: Bounds) {
		if self.state == HostState::Running {
			return;
		}
		self.effect.reset();
		self.bounds = bounds;
		self.surface.set_size(bounds);
		self.effect.seed(bounds, self.rng.as_mut());
		self.frames = 0;
		self.state = HostState::Running;
		debug!(
			"deck-fx: {} mounted at {}x{} with {} entities",
			self.effect.name(),
			bounds.width,
			bounds.height,
			self.effect.len()
		);
	}

	/// Resync the surface with its container before anything else draws.
	pub fn resize(&mut self, bounds: Bounds) {
		if self.state != HostState::Running || bounds == self.bounds {
			return;
		}
		self.bounds = bounds;
		self.surface.set_size(bounds);
		self.effect.resize(bounds);
	}

	pub fn pointer_moved(&mut self, x: f64, y: f64) {
		if self.state == HostState::Running {
			self.effect.pointer_moved(x, y, self.rng.as_mut());
		}
	}

	/// Step then render. Returns false, doing nothing, once unmounted.
	pub fn frame(&mut self) -> bool {
		if self.state != HostState::Running {
			return false;
		}
		self.effect.step(self.bounds, self.rng.as_mut());
		self.effect.render(&mut self.surface, self.bounds);
		self.frames += 1;
		true
	}

	/// Drop the entity set and refuse further frames.
	pub fn unmount(&mut self) {
		if self.state == HostState::Unmounted {
			return;
		}
		self.state = HostState::Unmounted;
		self.effect.reset();
		debug!(
			"deck-fx: {} unmounted after {} frames",
			self.effect.name(),
			self.frames
		);
	}

	pub fn state(&self) -> HostState {
		self.state
	}

	pub fn bounds(&self) -> Bounds {
		self.bounds
	}

	pub fn frames(&self) -> u64 {
		self.frames
	}

	pub fn effect(&self) -> &E {
		&self.effect
	}

	pub fn effect_mut(&mut self) -> &mut E {
		&mut self.effect
	}

	pub fn surface(&self) -> &S {
		&self.surface
	}
}
