//! Transient HUD notification shown when the easter egg fires.

use std::time::Duration;

use leptos::prelude::*;
use log::debug;

/// How long the notification stays on screen.
pub const SHOW_FOR: Duration = Duration::from_millis(3000);
/// Exit animation length before `on_complete` fires.
pub const EXIT_FOR: Duration = Duration::from_millis(500);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NotificationPhase {
	Visible,
	Leaving,
	Done,
}

impl NotificationPhase {
	/// Time to spend in this phase before moving on, `None` once finished.
	pub fn duration(self) -> Option<Duration> {
		match self {
			NotificationPhase::Visible => Some(SHOW_FOR),
			NotificationPhase::Leaving => Some(EXIT_FOR),
			NotificationPhase::Done => None,
		}
	}

	pub fn next(self) -> Self {
		match self {
			NotificationPhase::Visible => NotificationPhase::Leaving,
			NotificationPhase::Leaving | NotificationPhase::Done => NotificationPhase::Done,
		}
	}
}

fn schedule(
	phase: RwSignal<NotificationPhase>,
	timer: StoredValue<Option<TimeoutHandle>>,
	on_complete: Option<Callback<()>>,
) {
	let Some(delay) = phase.get_untracked().duration() else {
		if let Some(cb) = on_complete {
			cb.run(());
		}
		return;
	};
	let handle = set_timeout_with_handle(
		move || {
			phase.update(|p| *p = p.next());
			schedule(phase, timer, on_complete);
		},
		delay,
	);
	match handle {
		Ok(h) => timer.set_value(Some(h)),
		Err(e) => debug!("deck-fx: notification timer unavailable: {:?}", e),
	}
}

/// Full-screen glitch banner. Hides itself after [`SHOW_FOR`] and calls
/// `on_complete` once the exit animation has had [`EXIT_FOR`] to play.
#[component]
pub fn HudNotification(
	#[prop(into)] message: String,
	#[prop(optional, into)] sub_message: Option<String>,
	#[prop(optional, into)] on_complete: Option<Callback<()>>,
) -> impl IntoView {
	let phase = RwSignal::new(NotificationPhase::Visible);
	let timer = StoredValue::new(None::<TimeoutHandle>);

	schedule(phase, timer, on_complete);

	on_cleanup(move || {
		if let Some(Some(h)) = timer.try_get_value() {
			h.clear();
		}
	});

	view! {
		<Show when=move || phase.get() == NotificationPhase::Visible>
			<div class="hud-notification-overlay">
				<div class="hud-notification-container">
					<div class="glitch-wrapper">
						<h1 class="hud-title" data-text=message.clone()>{message.clone()}</h1>
					</div>
					{sub_message.clone().map(|sub| view! {
						<div class="hud-sub-wrapper">
							<p class="hud-sub">{sub}</p>
						</div>
					})}
					<div class="hud-bars">
						<div class="hud-bar left"></div>
						<div class="hud-bar right"></div>
					</div>
				</div>
			</div>
		</Show>
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn phases_run_visible_leaving_done() {
		let mut phase = NotificationPhase::Visible;
		let mut total = Duration::ZERO;
		while let Some(d) = phase.duration() {
			total += d;
			phase = phase.next();
		}
		assert_eq!(phase, NotificationPhase::Done);
		assert_eq!(total, Duration::from_millis(3500));
	}

	#[test]
	fn done_is_terminal() {
		assert_eq!(NotificationPhase::Done.next(), NotificationPhase::Done);
		assert_eq!(NotificationPhase::Done.duration(), None);
	}
}
