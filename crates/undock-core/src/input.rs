//! Pointer state tracking for widgets that manage their own gestures.

use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::time::Instant;

/// Mouse button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// Pointer event type for unified mouse/touch handling.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub enum PointerEvent {
    Down { position: Point, button: MouseButton },
    Up { position: Point, button: MouseButton },
    Move { position: Point },
}

/// Double-click detection constants.
const DOUBLE_CLICK_TIME_MS: u128 = 500;
const DOUBLE_CLICK_DISTANCE: f64 = 5.0;

/// Tracks pointer state across frames.
#[derive(Debug, Clone)]
pub struct PointerTracker {
    /// Current pointer position in widget coordinates.
    pub position: Point,
    /// Previous pointer position for delta calculations.
    pub previous_position: Point,
    /// Currently pressed mouse buttons.
    pressed: HashSet<MouseButton>,
    /// Buttons that went down this frame.
    just_pressed: HashSet<MouseButton>,
    /// Buttons that went up this frame.
    just_released: HashSet<MouseButton>,
    /// Where the current left-button hold began.
    pub press_origin: Option<Point>,
    /// Last click time for double-click detection.
    last_click_time: Option<Instant>,
    /// Last click position for double-click detection.
    last_click_position: Option<Point>,
    /// Whether a double-click was detected this frame.
    double_click: bool,
}

impl Default for PointerTracker {
    fn default() -> Self {
        Self {
            position: Point::ZERO,
            previous_position: Point::ZERO,
            pressed: HashSet::new(),
            just_pressed: HashSet::new(),
            just_released: HashSet::new(),
            press_origin: None,
            last_click_time: None,
            last_click_position: None,
            double_click: false,
        }
    }
}

impl PointerTracker {
    /// Create a new pointer tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Call at the start of each frame to reset per-frame state.
    pub fn begin_frame(&mut self) {
        self.just_pressed.clear();
        self.just_released.clear();
        self.previous_position = self.position;
        self.double_click = false;
    }

    /// Process a pointer event.
    pub fn handle(&mut self, event: PointerEvent) {
        match event {
            PointerEvent::Down { position, button } => {
                self.position = position;
                if self.pressed.insert(button) {
                    self.just_pressed.insert(button);
                }

                if button == MouseButton::Left {
                    self.detect_double_click(position);
                    if self.press_origin.is_none() {
                        self.press_origin = Some(position);
                    }
                }
            }
            PointerEvent::Up { position, button } => {
                self.position = position;
                if self.pressed.remove(&button) {
                    self.just_released.insert(button);
                }
                if button == MouseButton::Left {
                    self.press_origin = None;
                }
            }
            PointerEvent::Move { position } => {
                self.position = position;
            }
        }
    }

    fn detect_double_click(&mut self, position: Point) {
        let now = Instant::now();
        if let (Some(last_time), Some(last_pos)) = (self.last_click_time, self.last_click_position)
        {
            let elapsed = now.duration_since(last_time).as_millis();
            let distance = position.distance(last_pos);

            if elapsed < DOUBLE_CLICK_TIME_MS && distance < DOUBLE_CLICK_DISTANCE {
                self.double_click = true;
                // Reset so a triple-click is not counted as another double-click.
                self.last_click_time = None;
                self.last_click_position = None;
                return;
            }
        }
        self.last_click_time = Some(now);
        self.last_click_position = Some(position);
    }

    /// Check if a button is currently held.
    pub fn is_pressed(&self, button: MouseButton) -> bool {
        self.pressed.contains(&button)
    }

    /// Check if a button went down this frame.
    pub fn is_just_pressed(&self, button: MouseButton) -> bool {
        self.just_pressed.contains(&button)
    }

    /// Check if a button went up this frame.
    pub fn is_just_released(&self, button: MouseButton) -> bool {
        self.just_released.contains(&button)
    }

    /// Check if a double-click was detected this frame.
    pub fn is_double_click(&self) -> bool {
        self.double_click
    }

    /// Pointer movement since last frame.
    pub fn delta(&self) -> Vec2 {
        self.position - self.previous_position
    }

    /// Displacement from the press origin, if the left button is held.
    pub fn press_delta(&self) -> Option<Vec2> {
        self.press_origin.map(|origin| self.position - origin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_button_press() {
        let mut pointer = PointerTracker::new();

        pointer.handle(PointerEvent::Down {
            position: Point::new(100.0, 100.0),
            button: MouseButton::Left,
        });

        assert!(pointer.is_pressed(MouseButton::Left));
        assert!(pointer.is_just_pressed(MouseButton::Left));
        assert!(!pointer.is_pressed(MouseButton::Right));
    }

    #[test]
    fn test_button_release() {
        let mut pointer = PointerTracker::new();

        pointer.handle(PointerEvent::Down {
            position: Point::new(100.0, 100.0),
            button: MouseButton::Left,
        });
        pointer.handle(PointerEvent::Up {
            position: Point::new(100.0, 100.0),
            button: MouseButton::Left,
        });

        assert!(!pointer.is_pressed(MouseButton::Left));
        assert!(pointer.is_just_released(MouseButton::Left));
        assert!(pointer.press_origin.is_none());
    }

    #[test]
    fn test_begin_frame_clears_just_pressed() {
        let mut pointer = PointerTracker::new();

        pointer.handle(PointerEvent::Down {
            position: Point::new(100.0, 100.0),
            button: MouseButton::Left,
        });

        assert!(pointer.is_just_pressed(MouseButton::Left));

        pointer.begin_frame();

        assert!(!pointer.is_just_pressed(MouseButton::Left));
        assert!(pointer.is_pressed(MouseButton::Left)); // Still held
    }

    #[test]
    fn test_press_delta() {
        let mut pointer = PointerTracker::new();

        pointer.handle(PointerEvent::Down {
            position: Point::new(100.0, 100.0),
            button: MouseButton::Left,
        });

        assert_eq!(pointer.press_origin, Some(Point::new(100.0, 100.0)));

        pointer.handle(PointerEvent::Move {
            position: Point::new(150.0, 120.0),
        });

        let delta = pointer.press_delta().unwrap();
        assert!((delta.x - 50.0).abs() < f64::EPSILON);
        assert!((delta.y - 20.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_double_click_detection() {
        let mut pointer = PointerTracker::new();
        let pos = Point::new(100.0, 100.0);

        pointer.handle(PointerEvent::Down {
            position: pos,
            button: MouseButton::Left,
        });
        assert!(!pointer.is_double_click()); // First click is not a double-click

        pointer.handle(PointerEvent::Up {
            position: pos,
            button: MouseButton::Left,
        });
        pointer.begin_frame();

        pointer.handle(PointerEvent::Down {
            position: pos,
            button: MouseButton::Left,
        });
        assert!(pointer.is_double_click()); // Second click in time and place

        pointer.begin_frame();
        assert!(!pointer.is_double_click()); // Cleared after frame
    }

    #[test]
    fn test_double_click_too_far() {
        let mut pointer = PointerTracker::new();

        pointer.handle(PointerEvent::Down {
            position: Point::new(100.0, 100.0),
            button: MouseButton::Left,
        });
        pointer.handle(PointerEvent::Up {
            position: Point::new(100.0, 100.0),
            button: MouseButton::Left,
        });
        pointer.begin_frame();

        pointer.handle(PointerEvent::Down {
            position: Point::new(200.0, 200.0),
            button: MouseButton::Left,
        });
        assert!(!pointer.is_double_click());
    }
}
