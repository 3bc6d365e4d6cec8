//! The interface every canvas effect implements.

use super::render::{Bounds, Surface};
use super::rng::RandomSource;

/// A self-contained canvas animation driven one frame at a time by an
/// [`AnimationHost`](super::host::AnimationHost).
///
/// `step` always runs before `render` within a frame.
pub trait CanvasEffect {
	/// Short name used in log lines.
	fn name(&self) -> &'static str;

	/// Whether the host should forward window pointer moves.
	fn wants_pointer(&self) -> bool {
		false
	}

	/// Populate ambient entities at mount. The set is empty when this runs.
	fn seed(&mut self, _bounds: Bounds, _rng: &mut dyn RandomSource) {}

	/// The surface has been resized to `bounds`.
	fn resize(&mut self, _bounds: Bounds) {}

	/// Pointer moved to canvas coordinates `(x, y)`.
	fn pointer_moved(&mut self, _x: f64, _y: f64, _rng: &mut dyn RandomSource) {}

	/// Advance one frame. Random draws here are limited to spawn decisions.
	fn step(&mut self, bounds: Bounds, rng: &mut dyn RandomSource);

	fn render(&self, surface: &mut dyn Surface, bounds: Bounds);

	/// Drop every entity, returning to the just-constructed state.
	fn reset(&mut self);

	/// Number of live entities.
	fn len(&self) -> usize;

	fn is_empty(&self) -> bool {
		self.len() == 0
	}
}
