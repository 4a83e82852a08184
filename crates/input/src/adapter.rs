//! Tap normalization: terminal mouse events into surface coordinates.
//!
//! Both adapters subtract the surface's on-screen origin and scale cells to
//! surface units through a [`ScreenMapping`]; they differ in which presses
//! count as a tap.

use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};

use crate::types::{InputMode, Point, ScreenMapping};

/// Turns raw input events into tap positions on the surface.
pub trait InputAdapter: Send + Sync {
    fn mode(&self) -> InputMode;

    /// Surface position of the tap carried by `event`, if it is one and lands
    /// on the surface.
    fn locate(&self, event: &MouseEvent, mapping: &ScreenMapping) -> Option<Point>;
}

/// Desktop mouse: primary button presses only.
#[derive(Debug, Clone, Copy, Default)]
pub struct PointerAdapter;

impl InputAdapter for PointerAdapter {
    fn mode(&self) -> InputMode {
        InputMode::Pointer
    }

    fn locate(&self, event: &MouseEvent, mapping: &ScreenMapping) -> Option<Point> {
        match event.kind {
            MouseEventKind::Down(MouseButton::Left) => mapping.to_surface(event.column, event.row),
            _ => None,
        }
    }
}

/// Touch screen: the first contact of any kind is a tap.
///
/// Mobile terminals do not agree on which button a finger is reported as,
/// and some never report a press before the drag starts.
#[derive(Debug, Clone, Copy, Default)]
pub struct TouchAdapter;

impl InputAdapter for TouchAdapter {
    fn mode(&self) -> InputMode {
        InputMode::Touch
    }

    fn locate(&self, event: &MouseEvent, mapping: &ScreenMapping) -> Option<Point> {
        match event.kind {
            MouseEventKind::Down(_) => mapping.to_surface(event.column, event.row),
            _ => None,
        }
    }
}

/// Adapter for the given mode.
pub fn adapter_for(mode: InputMode) -> Box<dyn InputAdapter> {
    match mode {
        InputMode::Pointer => Box::new(PointerAdapter),
        InputMode::Touch => Box::new(TouchAdapter),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn mapping() -> ScreenMapping {
        ScreenMapping {
            origin_x: 10,
            origin_y: 1,
            cols: 50,
            rows: 25,
            units_per_col: 10.0,
            units_per_row: 20.0,
        }
    }

    fn event(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn pointer_accepts_left_press_only() {
        let a = PointerAdapter;
        let m = mapping();
        assert_eq!(
            a.locate(&event(MouseEventKind::Down(MouseButton::Left), 12, 3), &m),
            Some(Point::new(25.0, 50.0))
        );
        assert_eq!(
            a.locate(&event(MouseEventKind::Down(MouseButton::Right), 12, 3), &m),
            None
        );
        assert_eq!(
            a.locate(&event(MouseEventKind::Up(MouseButton::Left), 12, 3), &m),
            None
        );
        assert_eq!(a.mode(), InputMode::Pointer);
    }

    #[test]
    fn touch_accepts_any_press() {
        let a = TouchAdapter;
        let m = mapping();
        for button in [MouseButton::Left, MouseButton::Right, MouseButton::Middle] {
            assert_eq!(
                a.locate(&event(MouseEventKind::Down(button), 10, 1), &m),
                Some(Point::new(5.0, 10.0))
            );
        }
        assert_eq!(a.locate(&event(MouseEventKind::Moved, 10, 1), &m), None);
    }

    #[test]
    fn presses_outside_the_surface_are_dropped() {
        let m = mapping();
        let press = MouseEventKind::Down(MouseButton::Left);
        assert_eq!(PointerAdapter.locate(&event(press, 9, 5), &m), None);
        assert_eq!(PointerAdapter.locate(&event(press, 20, 0), &m), None);
        assert_eq!(TouchAdapter.locate(&event(press, 60, 5), &m), None);
    }

    #[test]
    fn adapter_for_matches_mode() {
        assert_eq!(adapter_for(InputMode::Touch).mode(), InputMode::Touch);
        assert_eq!(adapter_for(InputMode::Pointer).mode(), InputMode::Pointer);
    }
}
