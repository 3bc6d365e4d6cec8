//! LED matrix rain: binary glyphs falling down fixed columns, tinted by depth.

use super::effect::CanvasEffect;
use super::render::{Bounds, Surface};
use super::rng::RandomSource;
use super::theme::{Color, MatrixStyle};

/// One falling column. Lives as long as the effect does.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DropColumn {
	/// Current row of the leading glyph
	pub row: u32,
	pub glyph: char,
}

impl Default for DropColumn {
	fn default() -> Self {
		Self { row: 0, glyph: '0' }
	}
}

pub struct MatrixRain {
	style: MatrixStyle,
	columns: Vec<DropColumn>,
	rows: u32,
}

impl MatrixRain {
	pub fn new(style: MatrixStyle) -> Self {
		Self {
			style,
			columns: Vec::new(),
			rows: 1,
		}
	}

	pub fn columns(&self) -> &[DropColumn] {
		&self.columns
	}

	fn fit(&mut self, bounds: Bounds) {
		let count = (bounds.width / self.style.cell).ceil().max(0.0) as usize;
		self.columns.resize(count, DropColumn::default());
		self.rows = ((bounds.height / self.style.cell).ceil() as u32).max(1);
	}
}

impl CanvasEffect for MatrixRain {
	fn name(&self) -> &'static str {
		"led-matrix"
	}

	fn seed(&mut self, bounds: Bounds, _rng: &mut dyn RandomSource) {
		self.fit(bounds);
	}

	/// New columns start at the top; surviving columns keep their position.
	fn resize(&mut self, bounds: Bounds) {
		self.fit(bounds);
	}

	fn step(&mut self, bounds: Bounds, rng: &mut dyn RandomSource) {
		let cell = self.style.cell;
		for column in &mut self.columns {
			let past_bottom = column.row as f64 * cell > bounds.height;
			if past_bottom && rng.chance(self.style.reset_chance) {
				column.row = 0;
			} else {
				column.row += 1;
			}
			column.glyph = if rng.next_f64() < 0.5 { '0' } else { '1' };
		}
	}

	fn render(&self, surface: &mut dyn Surface, _bounds: Bounds) {
		surface.fade(self.style.fade);

		let mut buf = [0u8; 4];
		for (i, column) in self.columns.iter().enumerate() {
			let hue = column.row as f64 / self.rows as f64 * 360.0;
			let color = Color::hsla(hue, 1.0, 0.5, self.style.glyph_alpha);
			surface.fill_text(
				column.glyph.encode_utf8(&mut buf),
				i as f64 * self.style.cell,
				column.row as f64 * self.style.cell,
				self.style.font,
				color,
			);
		}
	}

	fn reset(&mut self) {
		self.columns.clear();
	}

	fn len(&self) -> usize {
		self.columns.len()
	}
}
