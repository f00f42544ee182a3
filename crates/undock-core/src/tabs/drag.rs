//! Drag gesture recognition for tab strips.
//!
//! Positions fed to [`TabDragController`] are screen coordinates so that a
//! detach gesture can report where the floating window should appear. Slot
//! hit-testing stays with the caller, which passes the slot under the
//! pointer (or `None` when the pointer has left the strip).

use kurbo::Point;

use crate::input::{MouseButton, PointerEvent, PointerTracker};

/// Distance in points the pointer must travel before a press becomes a drag.
pub const DRAG_START_DISTANCE: f64 = 10.0;

/// Where a press currently sits in the drag lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragPhase {
    #[default]
    Idle,
    /// Button is down on a tab but the pointer has not travelled far enough.
    Pressed { index: usize },
    /// The tab is being dragged.
    Dragging { index: usize },
}

/// Outcome of a pointer event on the strip.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TabGesture {
    None,
    /// A plain click: select the tab.
    Select(usize),
    /// Tear the tab out into a floating window at `at`.
    Detach { index: usize, at: Point },
    /// Drop the tab on another slot.
    Reorder { from: usize, to: usize },
}

/// Turns raw pointer events over a tab strip into gestures.
#[derive(Debug, Clone, Default)]
pub struct TabDragController {
    pointer: PointerTracker,
    phase: DragPhase,
    /// Last slot hovered while dragging, `None` once the pointer left the strip.
    drop_slot: Option<usize>,
}

impl TabDragController {
    /// Create an idle controller.
    pub fn new() -> Self {
        Self::default()
    }

    /// Call at the start of each frame.
    pub fn begin_frame(&mut self) {
        self.pointer.begin_frame();
    }

    /// Left button went down at `position`, over `slot` if any.
    ///
    /// A double-click on a tab detaches it on the spot.
    pub fn pointer_down(&mut self, position: Point, slot: Option<usize>) -> TabGesture {
        self.pointer.handle(PointerEvent::Down {
            position,
            button: MouseButton::Left,
        });
        let Some(index) = slot else {
            return TabGesture::None;
        };
        if self.pointer.is_double_click() {
            self.phase = DragPhase::Idle;
            self.drop_slot = None;
            return TabGesture::Detach {
                index,
                at: position,
            };
        }
        self.phase = DragPhase::Pressed { index };
        self.drop_slot = Some(index);
        TabGesture::None
    }

    /// Pointer moved to `position`, over `slot` if any.
    pub fn pointer_move(&mut self, position: Point, slot: Option<usize>) -> TabGesture {
        self.pointer.handle(PointerEvent::Move { position });
        match self.phase {
            DragPhase::Pressed { index } => {
                let travelled = self
                    .pointer
                    .press_delta()
                    .map(|delta| delta.hypot())
                    .unwrap_or(0.0);
                if travelled >= DRAG_START_DISTANCE {
                    self.phase = DragPhase::Dragging { index };
                    self.drop_slot = slot;
                }
            }
            DragPhase::Dragging { .. } => {
                self.drop_slot = slot;
            }
            DragPhase::Idle => {}
        }
        TabGesture::None
    }

    /// Left button went up at `position`, over `slot` if any.
    pub fn pointer_up(&mut self, position: Point, slot: Option<usize>) -> TabGesture {
        self.pointer.handle(PointerEvent::Up {
            position,
            button: MouseButton::Left,
        });
        let phase = std::mem::take(&mut self.phase);
        self.drop_slot = None;
        match phase {
            DragPhase::Idle => TabGesture::None,
            DragPhase::Pressed { index } => TabGesture::Select(index),
            DragPhase::Dragging { index } => match slot {
                Some(to) if to != index => TabGesture::Reorder { from: index, to },
                Some(_) => TabGesture::None,
                // Released outside the strip: tear the tab out.
                None => TabGesture::Detach {
                    index,
                    at: position,
                },
            },
        }
    }

    /// Abandon any press or drag in progress.
    pub fn cancel(&mut self) {
        self.phase = DragPhase::Idle;
        self.drop_slot = None;
    }

    /// Current phase of the gesture.
    pub fn phase(&self) -> DragPhase {
        self.phase
    }

    /// Slot of the tab being dragged, if a drag is in progress.
    pub fn dragging_index(&self) -> Option<usize> {
        match self.phase {
            DragPhase::Dragging { index } => Some(index),
            _ => None,
        }
    }

    /// Last hovered drop slot while dragging.
    pub fn drop_slot(&self) -> Option<usize> {
        self.drop_slot
    }

    /// Current pointer position in screen coordinates.
    pub fn pointer_position(&self) -> Point {
        self.pointer.position
    }
}
