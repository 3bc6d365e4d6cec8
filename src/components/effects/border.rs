//! HUD border: glowing runners circling the edge of a container.

use super::effect::CanvasEffect;
use super::render::{Bounds, Surface};
use super::rng::RandomSource;
use super::theme::{BorderStyle, Color};

/// A particle travelling along the container perimeter.
#[derive(Clone, Debug, PartialEq)]
pub struct BorderRunner {
	/// Position along the perimeter in `[0, 1)`, clockwise from the top-left corner
	pub progress: f64,
	/// Perimeter fraction per frame
	pub speed: f64,
	pub size: f64,
	pub color: Color,
}

/// Maps a perimeter fraction to a point on the rectangle edge, clockwise from
/// the top-left corner: top, right, bottom, left.
pub fn perimeter_point(progress: f64, width: f64, height: f64) -> (f64, f64) {
	let p = progress.rem_euclid(1.0);
	let perimeter = 2.0 * (width + height);
	let dist = p * perimeter;

	if dist < width {
		(dist, 0.0)
	} else if dist < width + height {
		(width, dist - width)
	} else if dist < 2.0 * width + height {
		(width - (dist - (width + height)), height)
	} else {
		(0.0, height - (dist - (2.0 * width + height)))
	}
}

pub struct HudBorderFx {
	style: BorderStyle,
	runners: Vec<BorderRunner>,
	active: bool,
}

impl HudBorderFx {
	pub fn new(style: BorderStyle, active: bool) -> Self {
		Self {
			style,
			runners: Vec::new(),
			active,
		}
	}

	/// Runners keep moving while inactive; they are just not drawn.
	pub fn set_active(&mut self, active: bool) {
		self.active = active;
	}

	pub fn is_active(&self) -> bool {
		self.active
	}

	pub fn runners(&self) -> &[BorderRunner] {
		&self.runners
	}
}

impl CanvasEffect for HudBorderFx {
	fn name(&self) -> &'static str {
		"hud-border"
	}

	fn seed(&mut self, _bounds: Bounds, rng: &mut dyn RandomSource) {
		let style = &self.style;
		self.runners = (0..style.count)
			.map(|_| BorderRunner {
				progress: rng.next_f64(),
				speed: style.speed_min + rng.next_f64() * style.speed_range,
				size: style.size_min + rng.next_f64() * style.size_range,
				color: style.palette.get(rng.index(style.palette.len())),
			})
			.collect();
	}

	fn step(&mut self, _bounds: Bounds, _rng: &mut dyn RandomSource) {
		for runner in &mut self.runners {
			runner.progress = (runner.progress + runner.speed).rem_euclid(1.0);
		}
	}

	fn render(&self, surface: &mut dyn Surface, bounds: Bounds) {
		surface.clear();
		if !self.active {
			return;
		}
		for runner in &self.runners {
			let (x, y) = perimeter_point(runner.progress, bounds.width, bounds.height);
			surface.fill_circle(x, y, runner.size, runner.color, self.style.glow);
		}
	}

	fn reset(&mut self) {
		self.runners.clear();
	}

	fn len(&self) -> usize {
		self.runners.len()
	}
}
