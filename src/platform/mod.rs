//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Frame timing (fixed-step accumulator, animation loop)
//! - Input events
//! - Haptic feedback

#[cfg(target_arch = "wasm32")]
pub mod animation;
pub mod clock;
pub mod haptics;
pub mod input;

pub use clock::FrameClock;
pub use haptics::{Haptics, NullHaptics};
pub use input::{InputAction, action_for_key};
