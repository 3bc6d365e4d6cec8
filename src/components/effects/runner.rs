//! Wires an [`AnimationHost`] to a real canvas: sizing, window listeners and
//! the frame loop.

use std::cell::RefCell;
use std::rc::Rc;

use log::info;
use wasm_bindgen::JsCast;
use web_sys::{HtmlCanvasElement, MouseEvent, Window};

use super::effect::CanvasEffect;
use super::error::MountError;
use super::host::AnimationHost;
use super::render::{Bounds, CanvasSurface};
use super::rng::RandomSource;
use super::scheduler::{FrameLoop, ResizeWatch, Subscription};

/// Where a canvas takes its pixel size from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SizeSource {
	/// The viewport (`innerWidth` x `innerHeight`)
	Window,
	/// The canvas's parent element, tracked as it changes size
	Parent,
}

/// Measure the size a canvas should have right now.
pub fn measure(window: &Window, canvas: &HtmlCanvasElement, source: SizeSource) -> Bounds {
	match source {
		SizeSource::Window => viewport(window),
		SizeSource::Parent => canvas
			.parent_element()
			.map(|p| {
				let rect = p.get_bounding_client_rect();
				Bounds::new(rect.width(), rect.height())
			})
			.unwrap_or_else(|| viewport(window)),
	}
}

pub(crate) fn viewport(window: &Window) -> Bounds {
	let dim = |v: Result<wasm_bindgen::JsValue, wasm_bindgen::JsValue>| {
		v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0)
	};
	Bounds::new(dim(window.inner_width()), dim(window.inner_height()))
}

type SharedHost<E> = Rc<RefCell<AnimationHost<E, CanvasSurface>>>;

/// A mounted effect. Dropping it cancels the frame loop, removes every
/// listener and discards the entity set.
pub struct EffectHandle<E: CanvasEffect> {
	host: SharedHost<E>,
	frames: FrameLoop,
	_listeners: Vec<Subscription>,
	_watch: Option<ResizeWatch>,
}

impl<E: CanvasEffect> EffectHandle<E> {
	/// Mutate the running effect, e.g. to flip a flag.
	pub fn update<R>(&self, f: impl FnOnce(&mut E) -> R) -> R {
		f(self.host.borrow_mut().effect_mut())
	}

	pub fn is_running(&self) -> bool {
		self.frames.is_running()
	}

	/// Explicit teardown; equivalent to dropping the handle.
	pub fn stop(self) {}
}

impl<E: CanvasEffect> Drop for EffectHandle<E> {
	fn drop(&mut self) {
		self.frames.cancel();
		if let Ok(mut host) = self.host.try_borrow_mut() {
			host.unmount();
		}
	}
}

/// Mount `effect` on `canvas` and start animating it.
///
/// On error nothing stays registered: listeners already added are removed as
/// the partial handle unwinds.
pub fn mount_effect<E: CanvasEffect + 'static>(
	canvas: HtmlCanvasElement,
	effect: E,
	rng: Box<dyn RandomSource>,
	size: SizeSource,
) -> Result<EffectHandle<E>, MountError> {
	let window = web_sys::window().ok_or(MountError::NoWindow)?;
	let surface = CanvasSurface::new(canvas.clone())?;
	let wants_pointer = effect.wants_pointer();
	let name = effect.name();

	let host: SharedHost<E> = Rc::new(RefCell::new(AnimationHost::new(effect, surface, rng)));
	host.borrow_mut().mount(measure(&window, &canvas, size));

	let mut listeners = Vec::with_capacity(2);
	let mut watch = None;

	let (host_resize, window_resize, canvas_resize) = (host.clone(), window.clone(), canvas.clone());
	let on_resize = move || {
		let bounds = measure(&window_resize, &canvas_resize, size);
		if let Ok(mut host) = host_resize.try_borrow_mut() {
			host.resize(bounds);
		}
	};
	match (size, canvas.parent_element()) {
		(SizeSource::Parent, Some(parent)) => {
			watch = Some(ResizeWatch::observe(&parent, on_resize)?);
		}
		_ => listeners.push(Subscription::listen(&window, "resize", move |_| on_resize())?),
	}

	if wants_pointer {
		let (host_move, canvas_move) = (host.clone(), canvas.clone());
		listeners.push(Subscription::listen(&window, "mousemove", move |ev| {
			let Some(ev) = ev.dyn_ref::<MouseEvent>() else {
				return;
			};
			let rect = canvas_move.get_bounding_client_rect();
			let (x, y) = (
				ev.client_x() as f64 - rect.left(),
				ev.client_y() as f64 - rect.top(),
			);
			host_move.borrow_mut().pointer_moved(x, y);
		})?);
	}

	let host_frame = host.clone();
	let frames = FrameLoop::start(&window, move |_| {
		host_frame.borrow_mut().frame();
	})?;

	info!("deck-fx: {} started", name);

	Ok(EffectHandle {
		host,
		frames,
		_listeners: listeners,
		_watch: watch,
	})
}
