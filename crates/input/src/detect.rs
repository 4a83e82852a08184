//! Best-effort guess at whether the player has a mouse or a touch screen.
//!
//! Terminals do not say. Mobile terminal apps leave recognizable traces in the
//! environment, so their presence means touch; everything else is a pointer.
//! `TILES_INPUT=pointer|touch` overrides the guess.

use crate::types::InputMode;

/// Environment variables set by mobile terminal apps.
const TOUCH_MARKERS: [&str; 4] = ["TERMUX_VERSION", "ANDROID_ROOT", "ANDROID_DATA", "ISH_VERSION"];

/// `TERM_PROGRAM` values of mobile terminal apps.
const TOUCH_PROGRAMS: [&str; 3] = ["blink", "a-shell", "ish"];

/// Guess the input mode from the process environment.
pub fn detect_input_mode() -> InputMode {
    detect_with(|key| std::env::var(key).ok())
}

/// Guess the input mode from an arbitrary environment lookup.
pub fn detect_with(lookup: impl Fn(&str) -> Option<String>) -> InputMode {
    if let Some(mode) = lookup("TILES_INPUT").as_deref().and_then(InputMode::from_str) {
        return mode;
    }

    let marker = TOUCH_MARKERS.iter().any(|key| lookup(key).is_some());
    let program = lookup("TERM_PROGRAM")
        .map(|p| p.to_lowercase())
        .is_some_and(|p| TOUCH_PROGRAMS.iter().any(|t| p.contains(t)));

    let mode = if marker || program {
        InputMode::Touch
    } else {
        InputMode::Pointer
    };
    tracing::debug!(target: "tiles::input", mode = mode.as_str(), "detected input mode");
    mode
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn desktop_defaults_to_pointer() {
        assert_eq!(
            detect_with(env(&[("TERM_PROGRAM", "iTerm.app")])),
            InputMode::Pointer
        );
        assert_eq!(detect_with(env(&[])), InputMode::Pointer);
    }

    #[test]
    fn mobile_terminals_are_touch() {
        assert_eq!(
            detect_with(env(&[("TERMUX_VERSION", "0.118")])),
            InputMode::Touch
        );
        assert_eq!(
            detect_with(env(&[("TERM_PROGRAM", "Blink")])),
            InputMode::Touch
        );
    }

    #[test]
    fn explicit_override_wins() {
        assert_eq!(
            detect_with(env(&[("TERMUX_VERSION", "1"), ("TILES_INPUT", "pointer")])),
            InputMode::Pointer
        );
        assert_eq!(
            detect_with(env(&[("TILES_INPUT", "touch")])),
            InputMode::Touch
        );
        // Unknown override falls back to the heuristic.
        assert_eq!(
            detect_with(env(&[("TILES_INPUT", "stylus")])),
            InputMode::Pointer
        );
    }
}
