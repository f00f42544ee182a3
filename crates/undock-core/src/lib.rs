//! Undock Core Library
//!
//! Platform-agnostic state machines for Undock's detachable tab strips and
//! toast notifications.

pub mod anim;
pub mod input;
pub mod tabs;
pub mod toast;

pub use anim::{Easing, FloatAnim, PointAnim, Transition};
pub use input::{MouseButton, PointerEvent, PointerTracker};
pub use tabs::{
    DRAG_START_DISTANCE, DetachedId, DetachedTab, DragPhase, PaneId, Tab, TabContainer,
    TabDragController, TabEvent, TabGesture, TabStrip,
};
pub use toast::{
    Anchor, DEFAULT_LIFETIME, DEFAULT_MARGIN, DEFAULT_SPACING, NotificationManager, SurfaceId,
    Toast, ToastError, ToastId, ToastKind, ToastRecord, ToastRegistry,
};
