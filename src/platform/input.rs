//! Input mapping
//!
//! Keyboard, mouse and touch all collapse into a handful of actions.

/// Discrete player intents
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    /// Flap (or start a run from the idle screen)
    Jump,
    /// Leave the game over screen
    Restart,
}

/// Map a `KeyboardEvent.code` to an action
pub fn action_for_key(code: &str) -> Option<InputAction> {
    match code {
        "Space" | "ArrowUp" => Some(InputAction::Jump),
        "Enter" | "NumpadEnter" | "KeyR" => Some(InputAction::Restart),
        _ => None,
    }
}

/// Primary button presses only; right clicks open menus
pub fn is_primary_button(button: i16) -> bool {
    button == 0
}
