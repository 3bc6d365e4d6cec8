//! deck-fx: decorative canvas effects for a slide deck site.
//!
//! This crate provides WASM-based background and overlay effects: a pointer
//! particle trail, LED matrix rain, a HUD border, a WebGL wallpaper, and a
//! firework easter egg unlocked by a key sequence.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info, warn};
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

pub mod components;

pub use components::effects::{
	CyberWallpaper, EffectConfig, FireworkRain, HudBorder, HudNotification, LedMatrix,
	ParticleTrail, use_key_sequence,
};

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("deck-fx: logging initialized");
}

/// Load effect settings from a script element with id="effect-config".
fn load_effect_config() -> Option<EffectConfig> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id("effect-config")?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	let json_text = script.text().ok()?;

	match EffectConfig::from_json(&json_text) {
		Ok(config) => {
			info!(
				"deck-fx: config loaded (matrix: {}, trail: {}, wallpaper: {})",
				config.matrix,
				config.trail,
				config.wallpaper.is_some()
			);
			Some(config)
		}
		Err(e) => {
			warn!("deck-fx: failed to parse effect config: {}", e);
			None
		}
	}
}

/// Main application component.
/// Layers the background effects around the deck and arms the easter egg.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let config = load_effect_config().unwrap_or_default();
	let seed = config.seed;
	let unlocked = use_key_sequence(config.sequence());
	let trail_palette = config.theme().trail.palette;

	let (show_banner, set_show_banner) = signal(false);
	Effect::new(move |_| {
		set_show_banner.set(unlocked.get());
	});

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="dark" />
		<Title text="Trainee Deck" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		{config.wallpaper.map(|url| view! { <CyberWallpaper image_url=url /> })}
		{config.matrix.then(|| view! { <LedMatrix seed=seed /> })}
		{config.trail.then(|| view! { <ParticleTrail seed=seed palette=Some(trail_palette) /> })}

		<HudBorder active=unlocked class="deck-frame" seed=seed>
			<div id="deck-root"></div>
		</HudBorder>

		<Show when=move || unlocked.get()>
			<FireworkRain seed=seed />
		</Show>
		<Show when=move || show_banner.get()>
			<HudNotification
				message="ACCESS GRANTED"
				sub_message="SYSTEM OVERRIDE ENABLED"
				on_complete=move |_| set_show_banner.set(false)
			/>
		</Show>
	}
}
