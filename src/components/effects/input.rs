//! Keyboard input: the secret key sequence that toggles the easter egg.

use std::collections::VecDeque;

use leptos::prelude::*;
use log::{debug, info};
use wasm_bindgen::JsCast;
use web_sys::KeyboardEvent;

use super::scheduler::Subscription;

/// ↑ ↑ ↓ ↓ ← → ← → B A
pub const KONAMI: [&str; 10] = [
	"ArrowUp",
	"ArrowUp",
	"ArrowDown",
	"ArrowDown",
	"ArrowLeft",
	"ArrowRight",
	"ArrowLeft",
	"ArrowRight",
	"b",
	"a",
];

/// Watches key presses for a fixed, order-sensitive, case-insensitive
/// sequence. Every full match flips the flag, so entering the sequence again
/// switches it back off.
#[derive(Clone, Debug)]
pub struct KeySequence {
	target: Vec<String>,
	recent: VecDeque<String>,
	active: bool,
}

impl KeySequence {
	pub fn new<S: AsRef<str>>(target: &[S]) -> Self {
		Self {
			target: target.iter().map(|k| k.as_ref().to_lowercase()).collect(),
			recent: VecDeque::with_capacity(target.len()),
			active: false,
		}
	}

	pub fn konami() -> Self {
		Self::new(&KONAMI[..])
	}

	/// Record a key. Returns true when this key completed the sequence.
	pub fn push(&mut self, key: &str) -> bool {
		if self.target.is_empty() {
			return false;
		}
		if self.recent.len() == self.target.len() {
			self.recent.pop_front();
		}
		self.recent.push_back(key.to_lowercase());

		let matched = self.recent.len() == self.target.len()
			&& self.recent.iter().zip(&self.target).all(|(a, b)| a == b);
		if matched {
			self.active = !self.active;
			self.recent.clear();
		}
		matched
	}

	pub fn is_active(&self) -> bool {
		self.active
	}

	/// Keys currently retained for matching.
	pub fn buffered(&self) -> usize {
		self.recent.len()
	}
}

/// Listen for `sequence` on the window for the lifetime of the calling
/// component. The returned signal flips on every completed sequence.
pub fn use_key_sequence(sequence: Vec<String>) -> ReadSignal<bool> {
	let (active, set_active) = signal(false);
	let listener = StoredValue::new_local(None::<Subscription>);

	let Some(window) = web_sys::window() else {
		return active;
	};

	let mut detector = KeySequence::new(sequence.as_slice());
	let subscription = Subscription::listen(&window, "keydown", move |ev| {
		let Some(ev) = ev.dyn_ref::<KeyboardEvent>() else {
			return;
		};
		if detector.push(&ev.key()) {
			info!("deck-fx: key sequence toggled to {}", detector.is_active());
			set_active.set(detector.is_active());
		}
	});

	match subscription {
		Ok(sub) => listener.set_value(Some(sub)),
		Err(e) => debug!("deck-fx: key sequence listener unavailable: {}", e),
	}

	on_cleanup(move || {
		listener.try_update_value(|sub| sub.take());
	});

	active
}

#[cfg(test)]
mod tests {
	use super::*;

	fn feed(seq: &mut KeySequence, keys: &[&str]) -> usize {
		keys.iter().filter(|k| seq.push(k)).count()
	}

	#[test]
	fn full_sequence_toggles_on_then_off() {
		let mut seq = KeySequence::konami();
		assert!(!seq.is_active());
		assert_eq!(feed(&mut seq, &KONAMI), 1);
		assert!(seq.is_active());
		assert_eq!(feed(&mut seq, &KONAMI), 1);
		assert!(!seq.is_active());
	}

	#[test]
	fn match_ignores_case() {
		let mut seq = KeySequence::konami();
		let mut keys = KONAMI;
		keys[8] = "B";
		keys[9] = "A";
		feed(&mut seq, &keys);
		assert!(seq.is_active());
	}

	#[test]
	fn any_substituted_key_never_toggles() {
		for i in 0..KONAMI.len() {
			let mut seq = KeySequence::konami();
			let mut keys = KONAMI;
			keys[i] = "x";
			assert_eq!(feed(&mut seq, &keys), 0, "substituted position {}", i);
			assert!(!seq.is_active());
		}
	}

	#[test]
	fn leading_noise_is_forgotten() {
		let mut seq = KeySequence::konami();
		feed(&mut seq, &["q", "ArrowUp", "Enter", "z"]);
		feed(&mut seq, &KONAMI);
		assert!(seq.is_active());
	}

	#[test]
	fn buffer_never_exceeds_sequence_length() {
		let mut seq = KeySequence::konami();
		for i in 0..100 {
			seq.push(if i % 3 == 0 { "ArrowUp" } else { "a" });
			assert!(seq.buffered() <= KONAMI.len());
		}
	}

	#[test]
	fn buffer_clears_after_match() {
		let mut seq = KeySequence::konami();
		feed(&mut seq, &KONAMI);
		assert_eq!(seq.buffered(), 0);
		// trailing keys of the first run cannot complete a second match early
		feed(&mut seq, &KONAMI[..9]);
		assert!(seq.is_active());
	}
}
