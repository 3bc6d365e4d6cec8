//! Leptos components wrapping the canvas effects.
//!
//! Each component renders a `<canvas>`, mounts its effect once the node
//! exists, and tears it down with the component. If the browser offers no
//! drawing context the canvas simply stays blank.

use leptos::prelude::*;
use log::{debug, warn};

use super::border::HudBorderFx;
use super::effect::CanvasEffect;
use super::error::MountError;
use super::fireworks::FireworkRainFx;
use super::matrix::MatrixRain;
use super::rng::{RandomSource, SeededRng};
use super::runner::{EffectHandle, SizeSource, mount_effect};
use super::theme::{Palette, Theme};
use super::trail::PointerTrail;
use super::wallpaper::{WallpaperHandle, mount_wallpaper};

const OVERLAY_STYLE: &str =
	"position: fixed; top: 0; left: 0; width: 100%; height: 100%; pointer-events: none;";

fn report(effect: &str, err: MountError) {
	if err.is_unsupported() {
		debug!("deck-fx: {} disabled: {}", effect, err);
	} else {
		warn!("deck-fx: {} failed to start: {}", effect, err);
	}
}

fn rng_for(seed: Option<u64>, salt: u64) -> Box<dyn RandomSource> {
	Box::new(seed.map_or_else(|| SeededRng::from_clock(salt), |s| SeededRng::new(s ^ salt)))
}

/// Stop whatever session occupies `slot`, then start its replacement, so two
/// sessions never share a canvas.
fn replace_session<T>(
	slot: &mut Option<T>,
	start: impl FnOnce() -> Result<T, MountError>,
) -> Result<(), MountError> {
	slot.take();
	*slot = Some(start()?);
	Ok(())
}

/// Mount an effect on `canvas_ref` once it is in the DOM; unmount on cleanup.
fn use_canvas_effect<E: CanvasEffect + 'static>(
	canvas_ref: NodeRef<leptos::html::Canvas>,
	size: SizeSource,
	rng_seed: Option<u64>,
	salt: u64,
	make: impl Fn() -> E + 'static,
) -> StoredValue<Option<EffectHandle<E>>, LocalStorage> {
	let session = StoredValue::new_local(None::<EffectHandle<E>>);

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let effect = make();
		let name = effect.name();
		session.update_value(|slot| {
			let started = replace_session(slot, || {
				mount_effect(canvas, effect, rng_for(rng_seed, salt), size)
			});
			if let Err(e) = started {
				report(name, e);
			}
		});
	});

	on_cleanup(move || {
		session.try_update_value(|handle| handle.take());
	});

	session
}

/// Colored sparks that follow the mouse across the whole viewport.
#[component]
pub fn ParticleTrail(
	#[prop(default = None)] seed: Option<u64>,
	#[prop(default = None)] palette: Option<Palette>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let mut style = Theme::default().trail;
	if let Some(palette) = palette {
		style.palette = palette;
	}

	use_canvas_effect(canvas_ref, SizeSource::Window, seed, 1, move || {
		PointerTrail::new(style.clone())
	});

	view! { <canvas node_ref=canvas_ref class="particle-effect-canvas" style=OVERLAY_STYLE /> }
}

/// Random firework bursts raining over the page.
#[component]
pub fn FireworkRain(#[prop(default = None)] seed: Option<u64>) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();

	use_canvas_effect(canvas_ref, SizeSource::Window, seed, 2, || {
		FireworkRainFx::new(Theme::default().firework)
	});

	view! {
		<canvas
			node_ref=canvas_ref
			class="firework-rain-canvas"
			style=format!("{} z-index: 9999; mix-blend-mode: screen;", OVERLAY_STYLE)
		/>
	}
}

/// Faint falling binary columns behind the content.
#[component]
pub fn LedMatrix(#[prop(default = None)] seed: Option<u64>) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();

	use_canvas_effect(canvas_ref, SizeSource::Window, seed, 3, || {
		MatrixRain::new(Theme::default().matrix)
	});

	view! {
		<canvas
			node_ref=canvas_ref
			class="led-matrix-canvas"
			style=format!("{} z-index: 9999; opacity: 0.3;", OVERLAY_STYLE)
		/>
	}
}

/// Wraps `children` in a HUD frame whose edge carries glowing runners while
/// `active` is true.
#[component]
pub fn HudBorder(
	children: Children,
	#[prop(into, default = Signal::stored(false))] active: Signal<bool>,
	#[prop(optional, into)] class: String,
	#[prop(default = None)] seed: Option<u64>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();

	let session = use_canvas_effect(canvas_ref, SizeSource::Parent, seed, 4, move || {
		HudBorderFx::new(Theme::default().border, active.get_untracked())
	});

	Effect::new(move |_| {
		let on = active.get();
		session.with_value(|handle| {
			if let Some(handle) = handle {
				handle.update(|fx| fx.set_active(on));
			}
		});
	});

	let container_class = move || {
		let state = if active.get() { " active" } else { "" };
		format!("cyber-hud-container{} {}", state, class)
	};

	view! {
		<div class=container_class>
			<canvas node_ref=canvas_ref class="cyber-hud-canvas" />
			<div class="cyber-hud-content">{children()}</div>
			<div class="corner-decor top-left"></div>
			<div class="corner-decor top-right"></div>
			<div class="corner-decor bottom-left"></div>
			<div class="corner-decor bottom-right"></div>
		</div>
	}
}

/// Full-screen shader wallpaper textured with `image_url`.
#[component]
pub fn CyberWallpaper(#[prop(into)] image_url: String) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let session = StoredValue::new_local(None::<WallpaperHandle>);

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		session.update_value(|slot| {
			let started = replace_session(slot, || {
				mount_wallpaper(canvas, &image_url, &Theme::default().wallpaper)
			});
			if let Err(e) = started {
				report("wallpaper", e);
			}
		});
	});

	on_cleanup(move || {
		session.try_update_value(|handle| handle.take());
	});

	view! {
		<canvas
			node_ref=canvas_ref
			class="cyber-wallpaper-canvas"
			style="position: fixed; top: 0; left: 0; width: 100%; height: 100%; z-index: -1; pointer-events: none;"
		/>
	}
}

#[cfg(test)]
mod tests {
	use std::cell::RefCell;
	use std::rc::Rc;

	use super::*;

	struct Session {
		id: u32,
		log: Rc<RefCell<Vec<String>>>,
	}

	impl Drop for Session {
		fn drop(&mut self) {
			self.log.borrow_mut().push(format!("stop {}", self.id));
		}
	}

	fn start(id: u32, log: &Rc<RefCell<Vec<String>>>) -> Result<Session, MountError> {
		log.borrow_mut().push(format!("start {}", id));
		Ok(Session {
			id,
			log: log.clone(),
		})
	}

	#[test]
	fn previous_session_stops_before_the_next_starts() {
		let log = Rc::new(RefCell::new(Vec::new()));
		let mut slot = None;
		replace_session(&mut slot, || start(1, &log)).unwrap();
		replace_session(&mut slot, || start(2, &log)).unwrap();

		assert_eq!(slot.as_ref().map(|s| s.id), Some(2));
		assert_eq!(*log.borrow(), vec!["start 1", "stop 1", "start 2"]);
	}

	#[test]
	fn failed_start_leaves_slot_empty() {
		let log = Rc::new(RefCell::new(Vec::new()));
		let mut slot = None;
		replace_session(&mut slot, || start(1, &log)).unwrap();
		let err = replace_session(&mut slot, || Err::<Session, _>(MountError::NoWindow));

		assert!(matches!(err, Err(MountError::NoWindow)));
		assert!(slot.is_none());
		assert_eq!(*log.borrow(), vec!["start 1", "stop 1"]);
	}
}
