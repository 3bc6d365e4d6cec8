//! Decorative canvas effects for the slide deck.
//!
//! Five independent effects, each a Leptos component owning its own canvas:
//! - [`ParticleTrail`]: sparks following the pointer
//! - [`FireworkRain`]: random bursts falling under gravity
//! - [`LedMatrix`]: columns of binary glyphs
//! - [`HudBorder`]: runners circling a container edge while active
//! - [`CyberWallpaper`]: a WebGL shader over a background image
//!
//! Effects are simulated by [`AnimationHost`] against a [`Surface`] so the
//! per-frame logic runs without a browser.
//!
//! # Example
//!
//! ```ignore
//! use deck_fx::components::effects::{HudBorder, LedMatrix, ParticleTrail};
//!
//! let (unlocked, _) = signal(false);
//! view! {
//!     <LedMatrix />
//!     <ParticleTrail seed=Some(7) />
//!     <HudBorder active=unlocked><main>"slides"</main></HudBorder>
//! }
//! ```

mod border;
mod component;
mod effect;
mod error;
mod fireworks;
mod host;
mod input;
mod matrix;
mod notification;
mod particles;
mod render;
mod rng;
mod runner;
mod scheduler;
pub mod theme;
mod trail;
mod types;
mod wallpaper;

pub use border::{BorderRunner, HudBorderFx, perimeter_point};
pub use component::{CyberWallpaper, FireworkRain, HudBorder, LedMatrix, ParticleTrail};
pub use effect::CanvasEffect;
pub use error::MountError;
pub use fireworks::FireworkRainFx;
pub use host::{AnimationHost, HostState};
pub use input::{KONAMI, KeySequence, use_key_sequence};
pub use matrix::{DropColumn, MatrixRain};
pub use notification::{HudNotification, NotificationPhase};
pub use particles::{Motion, Particle, ParticleSet};
pub use render::{Bounds, CanvasSurface, Surface};
pub use rng::{RandomSource, SeededRng};
pub use runner::{EffectHandle, SizeSource, mount_effect};
pub use theme::{Color, Palette, Theme};
pub use trail::PointerTrail;
pub use types::EffectConfig;
pub use wallpaper::{WallpaperHandle, WallpaperState, mount_wallpaper};
