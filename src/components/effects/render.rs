//! Drawing surfaces and shared particle drawing.
//!
//! Effects draw through the [`Surface`] trait so the same render code runs
//! against a real 2D canvas in the browser and a recording surface in tests.

use std::f64::consts::PI;

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::error::MountError;
use super::particles::Particle;
use super::theme::Color;

/// Pixel size of a drawing surface.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Bounds {
	pub width: f64,
	pub height: f64,
}

impl Bounds {
	pub const fn new(width: f64, height: f64) -> Self {
		Self { width, height }
	}
}

/// Minimal immediate-mode drawing API used by the effects.
pub trait Surface {
	/// Resize the backing store. Drawing state is reset by the browser.
	fn set_size(&mut self, bounds: Bounds);
	fn size(&self) -> Bounds;
	/// Erase everything to transparent.
	fn clear(&mut self);
	/// Paint a translucent color over the whole surface, leaving trails.
	fn fade(&mut self, color: Color);
	/// Filled circle; `glow` is a shadow blur radius (0 for none).
	fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: Color, glow: f64);
	fn stroke_line(&mut self, from: (f64, f64), to: (f64, f64), width: f64, color: Color);
	fn fill_text(&mut self, text: &str, x: f64, y: f64, font: &str, color: Color);
}

/// [`Surface`] over an HTML canvas 2D context.
pub struct CanvasSurface {
	canvas: HtmlCanvasElement,
	ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
	pub fn new(canvas: HtmlCanvasElement) -> Result<Self, MountError> {
		let ctx: CanvasRenderingContext2d = canvas
			.get_context("2d")
			.map_err(|_| MountError::ContextUnavailable("2d"))?
			.ok_or(MountError::ContextUnavailable("2d"))?
			.dyn_into()
			.map_err(|_| MountError::ContextUnavailable("2d"))?;
		Ok(Self { canvas, ctx })
	}
}

impl Surface for CanvasSurface {
	fn set_size(&mut self, bounds: Bounds) {
		self.canvas.set_width(bounds.width as u32);
		self.canvas.set_height(bounds.height as u32);
	}

	fn size(&self) -> Bounds {
		Bounds::new(self.canvas.width() as f64, self.canvas.height() as f64)
	}

	fn clear(&mut self) {
		let size = self.size();
		self.ctx.clear_rect(0.0, 0.0, size.width, size.height);
	}

	fn fade(&mut self, color: Color) {
		let size = self.size();
		self.ctx.set_fill_style_str(&color.to_css());
		self.ctx.fill_rect(0.0, 0.0, size.width, size.height);
	}

	fn fill_circle(&mut self, x: f64, y: f64, radius: f64, color: Color, glow: f64) {
		let css = color.to_css();
		if glow > 0.0 {
			self.ctx.set_shadow_blur(glow);
			self.ctx.set_shadow_color(&css);
		}
		self.ctx.set_fill_style_str(&css);
		self.ctx.begin_path();
		let _ = self.ctx.arc(x, y, radius, 0.0, PI * 2.0);
		self.ctx.fill();
		if glow > 0.0 {
			self.ctx.set_shadow_blur(0.0);
		}
	}

	fn stroke_line(&mut self, from: (f64, f64), to: (f64, f64), width: f64, color: Color) {
		self.ctx.set_stroke_style_str(&color.to_css());
		self.ctx.set_line_width(width);
		self.ctx.begin_path();
		self.ctx.move_to(from.0, from.1);
		self.ctx.line_to(to.0, to.1);
		self.ctx.stroke();
	}

	fn fill_text(&mut self, text: &str, x: f64, y: f64, font: &str, color: Color) {
		self.ctx.set_font(font);
		self.ctx.set_fill_style_str(&color.to_css());
		let _ = self.ctx.fill_text(text, x, y);
	}
}

/// Connecting-line settings for trail-style rendering.
#[derive(Clone, Copy, Debug)]
pub struct TrailLines {
	pub width: f64,
	/// Line alpha as a fraction of the newer particle's life
	pub alpha: f64,
}

/// Draws particles in spawn order, their color's alpha scaled by remaining life.
///
/// With `lines`, each particle is also joined to the one spawned just before
/// it, in the newer particle's color.
pub fn draw_particles<S: Surface + ?Sized>(
	surface: &mut S,
	particles: &[Particle],
	lines: Option<TrailLines>,
) {
	for (i, p) in particles.iter().enumerate() {
		surface.fill_circle(p.x, p.y, p.radius, p.color.with_alpha(p.color.a * p.life), 0.0);

		if let (Some(lines), Some(prev)) = (lines, i.checked_sub(1).map(|j| &particles[j])) {
			surface.stroke_line(
				(p.x, p.y),
				(prev.x, prev.y),
				lines.width,
				p.color.with_alpha(p.color.a * p.life * lines.alpha),
			);
		}
	}
}


#[cfg(test)]
mod tests {
	use super::testing::{Op, Recorder};
	use super::*;

	fn particle(x: f64, life: f64) -> Particle {
		let mut p = Particle::new(x, 0.0, 0.0, 0.0, 3.0, Color::rgb(10, 20, 30));
		p.life = life;
		p
	}

	#[test]
	fn alpha_follows_life() {
		let mut surface = Recorder::default();
		draw_particles(&mut surface, &[particle(1.0, 0.4)], None);
		assert_eq!(
			surface.ops,
			vec![Op::Circle {
				x: 1.0,
				y: 0.0,
				radius: 3.0,
				color: Color::rgba(10, 20, 30, 0.4),
				glow: 0.0,
			}]
		);
	}

	#[test]
	fn translucent_palette_color_keeps_its_alpha() {
		let mut p = Particle::new(0.0, 0.0, 0.0, 0.0, 2.0, Color::rgba(255, 0, 0, 0.2));
		p.life = 0.5;
		let q = Particle::new(1.0, 0.0, 0.0, 0.0, 2.0, Color::rgba(255, 0, 0, 0.2));
		let mut surface = Recorder::default();
		draw_particles(
			&mut surface,
			&[p, q],
			Some(TrailLines {
				width: 1.0,
				alpha: 0.5,
			}),
		);

		let alphas: Vec<f64> = surface
			.ops
			.iter()
			.map(|op| match op {
				Op::Circle { color, .. } | Op::Line { color, .. } => color.a,
				_ => f64::NAN,
			})
			.collect();
		assert_eq!(alphas.len(), 3);
		assert!((alphas[0] - 0.1).abs() < 1e-12);
		assert!((alphas[1] - 0.2).abs() < 1e-12);
		assert!((alphas[2] - 0.1).abs() < 1e-12);
	}

	#[test]
	fn trail_lines_join_neighbours_in_spawn_order() {
		let mut surface = Recorder::default();
		let ps = [particle(1.0, 1.0), particle(2.0, 0.8), particle(3.0, 0.6)];
		draw_particles(
			&mut surface,
			&ps,
			Some(TrailLines {
				width: 2.0,
				alpha: 0.5,
			}),
		);

		assert_eq!(surface.circles(), 3);
		assert_eq!(surface.lines(), 2);
		let first_line = surface
			.ops
			.iter()
			.find(|op| matches!(op, Op::Line { .. }))
			.cloned();
		assert_eq!(
			first_line,
			Some(Op::Line {
				from: (2.0, 0.0),
				to: (1.0, 0.0),
				color: Color::rgba(10, 20, 30, 0.4),
			})
		);
	}
}
