//! Haptic feedback
//!
//! Fire-and-forget. Unsupported devices silently do nothing.

/// Something that can buzz
pub trait Haptics {
    fn pulse(&self, duration_ms: u32);
}

/// No vibration hardware (native builds, tests)
#[derive(Debug, Clone, Copy, Default)]
pub struct NullHaptics;

impl Haptics for NullHaptics {
    fn pulse(&self, _duration_ms: u32) {}
}

#[cfg(target_arch = "wasm32")]
pub use browser::VibrationHaptics;

#[cfg(target_arch = "wasm32")]
mod browser {
    use wasm_bindgen::JsValue;

    use super::Haptics;

    /// `navigator.vibrate()`
    #[derive(Debug, Clone, Copy, Default)]
    pub struct VibrationHaptics;

    impl Haptics for VibrationHaptics {
        fn pulse(&self, duration_ms: u32) {
            let Some(navigator) = web_sys::window().map(|w| w.navigator()) else {
                return;
            };
            // Desktop Safari and Firefox lack the API entirely
            let supported = js_sys::Reflect::has(&navigator, &JsValue::from_str("vibrate"))
                .unwrap_or(false);
            if supported {
                navigator.vibrate_with_duration(duration_ms);
            }
        }
    }
}
