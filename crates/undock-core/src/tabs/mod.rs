//! Detachable tab strips.
//!
//! [`TabStrip`] keeps the ordered tabs and selection, [`TabDragController`]
//! turns pointer input into select/reorder/detach gestures, and
//! [`TabContainer`] ties both to the floating-window table so detached tabs
//! can come home again.

mod container;
mod drag;
mod strip;

pub use container::{DetachedId, DetachedTab, TabContainer};
pub use drag::{DRAG_START_DISTANCE, DragPhase, TabDragController, TabGesture};
pub use strip::{PaneId, Tab, TabEvent, TabStrip};
