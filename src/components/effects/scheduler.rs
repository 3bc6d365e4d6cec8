//! Browser scheduling primitives with explicit ownership.
//!
//! [`FrameLoop`] is a self-rescheduling `requestAnimationFrame` chain behind a
//! cancellable handle, [`Subscription`] is an event listener that removes
//! itself when dropped, and [`ResizeWatch`] observes an element's size until
//! dropped. Effects hold them for exactly as long as they are mounted.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use log::warn;
use wasm_bindgen::prelude::*;
use web_sys::{Element, Event, EventTarget, ResizeObserver, Window};

use super::error::MountError;

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// A running animation-frame loop. Cancelling (or dropping) it withdraws the
/// pending frame request and releases the callback, so no further ticks run.
pub struct FrameLoop {
	window: Window,
	pending: Rc<Cell<Option<i32>>>,
	callback: FrameCallback,
}

impl FrameLoop {
	/// Request the first frame and keep re-requesting after every `tick`.
	/// `tick` receives the frame timestamp in milliseconds.
	pub fn start(window: &Window, mut tick: impl FnMut(f64) + 'static) -> Result<Self, MountError> {
		let pending: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));
		let callback: FrameCallback = Rc::new(RefCell::new(None));
		let (pending_inner, callback_inner, window_inner) =
			(pending.clone(), callback.clone(), window.clone());

		*callback.borrow_mut() = Some(Closure::new(move |timestamp: f64| {
			pending_inner.set(None);
			tick(timestamp);
			if let Some(ref cb) = *callback_inner.borrow() {
				match window_inner.request_animation_frame(cb.as_ref().unchecked_ref()) {
					Ok(id) => pending_inner.set(Some(id)),
					Err(e) => warn!("deck-fx: frame request failed: {:?}", e),
				}
			}
		}));

		if let Some(ref cb) = *callback.borrow() {
			let id = window.request_animation_frame(cb.as_ref().unchecked_ref())?;
			pending.set(Some(id));
		}

		Ok(Self {
			window: window.clone(),
			pending,
			callback,
		})
	}

	/// Stop the loop. Safe to call more than once.
	pub fn cancel(&self) {
		if let Some(id) = self.pending.take() {
			let _ = self.window.cancel_animation_frame(id);
		}
		// Breaks the closure's reference to itself.
		self.callback.borrow_mut().take();
	}

	pub fn is_running(&self) -> bool {
		self.callback.borrow().is_some()
	}
}

impl Drop for FrameLoop {
	fn drop(&mut self) {
		self.cancel();
	}
}

/// An event listener registered on `target` until this value is dropped.
pub struct Subscription {
	target: EventTarget,
	event: &'static str,
	callback: Closure<dyn FnMut(Event)>,
}

impl Subscription {
	pub fn listen(
		target: &EventTarget,
		event: &'static str,
		handler: impl FnMut(Event) + 'static,
	) -> Result<Self, MountError> {
		let callback = Closure::<dyn FnMut(Event)>::new(handler);
		target.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())?;
		Ok(Self {
			target: target.clone(),
			event,
			callback,
		})
	}
}

impl Drop for Subscription {
	fn drop(&mut self) {
		let _ = self
			.target
			.remove_event_listener_with_callback(self.event, self.callback.as_ref().unchecked_ref());
	}
}

/// A `ResizeObserver` on one element, disconnected when dropped.
pub struct ResizeWatch {
	observer: ResizeObserver,
	_callback: Closure<dyn FnMut(js_sys::Array)>,
}

impl ResizeWatch {
	/// Call `on_resize` whenever `target`'s box changes size. Browsers also
	/// report the initial size once observation starts.
	pub fn observe(target: &Element, mut on_resize: impl FnMut() + 'static) -> Result<Self, MountError> {
		let callback = Closure::<dyn FnMut(js_sys::Array)>::new(move |_entries: js_sys::Array| {
			on_resize();
		});
		let observer = ResizeObserver::new(callback.as_ref().unchecked_ref())?;
		observer.observe(target);
		Ok(Self {
			observer,
			_callback: callback,
		})
	}
}

impl Drop for ResizeWatch {
	fn drop(&mut self) {
		self.observer.disconnect();
	}
}
