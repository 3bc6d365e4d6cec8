//! Visual theming for the deck effects.
//!
//! Provides the colour type, the fixed spawn palettes, and the per-effect
//! style constants (batch sizes, decay rates, gravity, glow).

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
	pub r: u8,
	pub g: u8,
	pub b: u8,
	pub a: f64,
}

impl Color {
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	pub fn with_alpha(self, a: f64) -> Self {
		Self {
			a: a.clamp(0.0, 1.0),
			..self
		}
	}

	/// Build a color from hue (degrees), saturation and lightness (0.0..=1.0).
	pub fn hsla(hue: f64, saturation: f64, lightness: f64, a: f64) -> Self {
		let h = hue.rem_euclid(360.0) / 60.0;
		let s = saturation.clamp(0.0, 1.0);
		let l = lightness.clamp(0.0, 1.0);

		let chroma = (1.0 - (2.0 * l - 1.0).abs()) * s;
		let x = chroma * (1.0 - (h % 2.0 - 1.0).abs());
		let (r, g, b) = match h as u32 {
			0 => (chroma, x, 0.0),
			1 => (x, chroma, 0.0),
			2 => (0.0, chroma, x),
			3 => (0.0, x, chroma),
			4 => (x, 0.0, chroma),
			_ => (chroma, 0.0, x),
		};
		let m = l - chroma / 2.0;
		let channel = |v: f64| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;

		Self::rgba(channel(r), channel(g), channel(b), a)
	}

	/// Parses a CSS color string.
	/// Supports hex (`#RRGGBB`) and `rgb()`/`rgba()` functional notation.
	pub fn parse(color_str: &str) -> Option<Color> {
		let color_str = color_str.trim();
		if color_str.starts_with('#') && color_str.len() == 7 {
			let r = u8::from_str_radix(&color_str[1..3], 16).ok()?;
			let g = u8::from_str_radix(&color_str[3..5], 16).ok()?;
			let b = u8::from_str_radix(&color_str[5..7], 16).ok()?;
			Some(Color::rgb(r, g, b))
		} else if color_str.starts_with("rgb") {
			let nums: Vec<&str> = color_str
				.trim_start_matches("rgba(")
				.trim_start_matches("rgb(")
				.trim_end_matches(')')
				.split(',')
				.collect();
			let r = nums.first()?.trim().parse().ok()?;
			let g = nums.get(1)?.trim().parse().ok()?;
			let b = nums.get(2)?.trim().parse().ok()?;
			let a = nums
				.get(3)
				.and_then(|s| s.trim().parse().ok())
				.unwrap_or(1.0);
			Some(Color::rgba(r, g, b, a))
		} else {
			None
		}
	}

	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}
}

/// A fixed, non-empty set of colors particles are drawn from at spawn time.
#[derive(Clone, Debug, PartialEq)]
pub struct Palette {
	colors: Vec<Color>,
}

impl Palette {
	/// Soft candy palette used by the pointer trail.
	pub fn trail() -> Self {
		Self {
			colors: vec![
				Color::rgb(255, 107, 107), // Coral
				Color::rgb(78, 205, 196),  // Turquoise
				Color::rgb(69, 183, 209),  // Sky
				Color::rgb(255, 160, 122), // Salmon
				Color::rgb(152, 216, 200), // Mint
				Color::rgb(247, 220, 111), // Butter
				Color::rgb(187, 143, 206), // Lilac
				Color::rgb(133, 193, 226), // Powder blue
			],
		}
	}

	/// Saturated neon palette for firework bursts.
	pub fn firework() -> Self {
		Self {
			colors: vec![
				Color::rgb(255, 0, 255), // Magenta
				Color::rgb(0, 240, 255), // Cyan
				Color::rgb(240, 255, 0), // Acid yellow
				Color::rgb(255, 0, 0),   // Red
				Color::rgb(0, 255, 0),   // Green
			],
		}
	}

	/// Two-tone palette for the HUD border runners.
	pub fn hud() -> Self {
		Self {
			colors: vec![Color::rgb(0, 240, 255), Color::rgb(255, 0, 255)],
		}
	}

	/// Build a palette from CSS color strings, skipping entries that fail to parse.
	/// Returns `None` when nothing usable remains.
	pub fn from_css<S: AsRef<str>>(colors: &[S]) -> Option<Self> {
		Self::new(
			colors
				.iter()
				.filter_map(|c| Color::parse(c.as_ref()))
				.collect(),
		)
	}

	/// `None` for an empty list.
	pub fn new(colors: Vec<Color>) -> Option<Self> {
		(!colors.is_empty()).then_some(Self { colors })
	}

	pub fn colors(&self) -> &[Color] {
		&self.colors
	}

	pub fn get(&self, index: usize) -> Color {
		self.colors[index % self.colors.len()]
	}

	pub fn len(&self) -> usize {
		self.colors.len()
	}

	pub fn is_empty(&self) -> bool {
		self.colors.is_empty()
	}
}

/// Pointer trail configuration.
#[derive(Clone, Debug)]
pub struct TrailStyle {
	/// Particles spawned per pointer-move event
	pub batch: usize,
	/// Velocity components are drawn from `[-spread / 2, spread / 2)`
	pub spread: f64,
	/// Life lost per frame
	pub decay: f64,
	pub radius: f64,
	/// Width of the connecting line between adjacent particles
	pub line_width: f64,
	/// Connecting line alpha relative to particle life
	pub line_alpha: f64,
	pub palette: Palette,
}

/// Firework rain configuration.
#[derive(Clone, Debug)]
pub struct FireworkStyle {
	/// Per-frame probability of a new burst
	pub burst_chance: f64,
	/// Particles per burst
	pub burst_size: usize,
	/// Bursts spawn within the top fraction of the canvas
	pub burst_height: f64,
	pub speed_min: f64,
	pub speed_range: f64,
	pub gravity: f64,
	pub decay: f64,
	pub radius: f64,
	/// Translucent black painted over the previous frame
	pub fade: Color,
	pub palette: Palette,
}

/// Matrix rain configuration.
#[derive(Clone, Debug)]
pub struct MatrixStyle {
	/// Column width and row height in pixels
	pub cell: f64,
	pub font: &'static str,
	/// Per-frame probability a column past the bottom edge restarts at the top
	pub reset_chance: f64,
	pub glyph_alpha: f64,
	pub fade: Color,
}

/// HUD border runner configuration.
#[derive(Clone, Debug)]
pub struct BorderStyle {
	pub count: usize,
	/// Perimeter fraction advanced per frame
	pub speed_min: f64,
	pub speed_range: f64,
	pub size_min: f64,
	pub size_range: f64,
	/// Shadow blur radius
	pub glow: f64,
	pub palette: Palette,
}

/// Shader wallpaper configuration.
#[derive(Clone, Debug)]
pub struct WallpaperStyle {
	pub parallax: f64,
}

/// Complete visual theme.
#[derive(Clone, Debug)]
pub struct Theme {
	pub trail: TrailStyle,
	pub firework: FireworkStyle,
	pub matrix: MatrixStyle,
	pub border: BorderStyle,
	pub wallpaper: WallpaperStyle,
}

impl Theme {
	/// Neon cyberpunk look of the onboarding deck (default)
	pub fn neon() -> Self {
		Self {
			trail: TrailStyle {
				batch: 3,
				spread: 2.0,
				decay: 0.01,
				radius: 3.0,
				line_width: 2.0,
				line_alpha: 0.5,
				palette: Palette::trail(),
			},
			firework: FireworkStyle {
				burst_chance: 0.05,
				burst_size: 50,
				burst_height: 0.5,
				speed_min: 1.0,
				speed_range: 3.0,
				gravity: 0.05,
				decay: 0.01,
				radius: 2.0,
				fade: Color::rgba(0, 0, 0, 0.1),
				palette: Palette::firework(),
			},
			matrix: MatrixStyle {
				cell: 20.0,
				font: "15px monospace",
				reset_chance: 0.025,
				glyph_alpha: 0.8,
				fade: Color::rgba(0, 0, 0, 0.05),
			},
			border: BorderStyle {
				count: 20,
				speed_min: 0.001,
				speed_range: 0.002,
				size_min: 1.0,
				size_range: 2.0,
				glow: 10.0,
				palette: Palette::hud(),
			},
			wallpaper: WallpaperStyle { parallax: 1.0 },
		}
	}
}

impl Default for Theme {
	fn default() -> Self {
		Self::neon()
	}
}
