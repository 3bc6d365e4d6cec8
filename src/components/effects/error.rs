//! Setup failures for effect mounting.

use thiserror::Error;
use wasm_bindgen::JsValue;

/// Why an effect could not start. None of these reach the user: the
/// component logs the error and renders nothing.
#[derive(Debug, Error)]
pub enum MountError {
	#[error("no browser window available")]
	NoWindow,
	#[error("{0} drawing context unavailable")]
	ContextUnavailable(&'static str),
	#[error("shader program failed: {0}")]
	Shader(String),
	#[error("browser call failed: {0}")]
	Js(String),
}

impl MountError {
	/// Unsupported environments are expected; everything else is worth a warning.
	pub fn is_unsupported(&self) -> bool {
		matches!(self, MountError::NoWindow | MountError::ContextUnavailable(_))
	}
}

impl From<JsValue> for MountError {
	fn from(value: JsValue) -> Self {
		MountError::Js(
			value
				.as_string()
				.unwrap_or_else(|| format!("{:?}", value)),
		)
	}
}
