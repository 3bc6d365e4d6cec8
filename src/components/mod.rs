//! UI components.

pub mod effects;
