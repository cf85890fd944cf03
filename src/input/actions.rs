//! Game action definitions

/// Everything the player can ask for
///
/// Keyboard / gamepad:
/// - Left, Right / d-pad, left stick = move along the camera's right axis
/// - Space / A = Jump (hold for a higher jump)
/// - Down / d-pad down = Fast-fall (drop past platforms, no jumping)
/// - A, D / LB, RB = Shift perspective a quarter turn left / right
/// - F3 = Debug overlay, R / Select = Restart, Esc = Quit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    // Movement
    MoveLeft,
    MoveRight,
    Jump,
    FastFall,

    // Perspective (edge triggered)
    ShiftLeft,
    ShiftRight,

    // System
    ToggleDebug,
    Restart,
    Quit,
}
