//! Page-level effect configuration.

use serde::Deserialize;

use super::input::KONAMI;
use super::theme::{Palette, Theme};

/// Which effects the page runs and how they are seeded. Read from a JSON
/// `<script id="effect-config">` block; every field is optional.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EffectConfig {
	/// Wallpaper image URL. No wallpaper without one.
	pub wallpaper: Option<String>,
	pub matrix: bool,
	pub trail: bool,
	/// Fixed RNG seed for reproducible animation.
	pub seed: Option<u64>,
	/// CSS colors replacing the trail palette.
	pub trail_palette: Option<Vec<String>>,
	/// Keys of the easter egg sequence, Konami code if unset.
	pub key_sequence: Option<Vec<String>>,
}

impl Default for EffectConfig {
	fn default() -> Self {
		Self {
			wallpaper: None,
			matrix: true,
			trail: true,
			seed: None,
			trail_palette: None,
			key_sequence: None,
		}
	}
}

impl EffectConfig {
	pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
		serde_json::from_str(text)
	}

	pub fn sequence(&self) -> Vec<String> {
		match &self.key_sequence {
			Some(keys) if !keys.is_empty() => keys.clone(),
			_ => KONAMI.iter().map(|k| k.to_string()).collect(),
		}
	}

	/// Trail palette override. Unparseable entries are skipped; `None` when
	/// nothing usable remains.
	pub fn trail_palette(&self) -> Option<Palette> {
		Palette::from_css(self.trail_palette.as_deref()?)
	}

	/// Default theme with this config's overrides applied.
	pub fn theme(&self) -> Theme {
		let mut theme = Theme::default();
		if let Some(palette) = self.trail_palette() {
			theme.trail.palette = palette;
		}
		theme
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn empty_object_gives_defaults() {
		let config = EffectConfig::from_json("{}").unwrap();
		assert_eq!(config, EffectConfig::default());
		assert!(config.matrix && config.trail);
		assert_eq!(config.sequence().len(), KONAMI.len());
	}

	#[test]
	fn fields_use_camel_case() {
		let config = EffectConfig::from_json(
			r##"{"wallpaper": "/bg.jpg", "matrix": false, "seed": 7,
			"trailPalette": ["#ff0000", "nope"], "keySequence": ["x", "y"]}"##,
		)
		.unwrap();
		assert_eq!(config.wallpaper.as_deref(), Some("/bg.jpg"));
		assert!(!config.matrix);
		assert!(config.trail);
		assert_eq!(config.seed, Some(7));
		assert_eq!(config.sequence(), vec!["x".to_string(), "y".to_string()]);
		assert_eq!(config.trail_palette().map(|p| p.len()), Some(1));
	}

	#[test]
	fn unusable_palette_keeps_default() {
		let config = EffectConfig {
			trail_palette: Some(vec!["garbage".into()]),
			..Default::default()
		};
		assert!(config.trail_palette().is_none());
		assert_eq!(config.theme().trail.palette, Theme::default().trail.palette);
	}

	#[test]
	fn empty_sequence_falls_back() {
		let config = EffectConfig {
			key_sequence: Some(vec![]),
			..Default::default()
		};
		assert_eq!(config.sequence()[0], "ArrowUp");
	}

	#[test]
	fn malformed_json_is_an_error() {
		assert!(EffectConfig::from_json("{matrix: yes}").is_err());
	}
}
