//! Toast notifications: anchors, stacking and lifecycle.
//!
//! [`Anchor`] holds the nine placement rules, [`NotificationManager`] runs
//! one anchor's stack per parent surface, and [`ToastRegistry`] hands out
//! managers by anchor name.

mod anchor;
mod manager;

pub use anchor::{Anchor, DEFAULT_MARGIN, DEFAULT_SPACING};
pub use manager::{
    DEFAULT_LIFETIME, DROP_DURATION, NotificationManager, SLIDE_DURATION, SurfaceId, Toast,
    ToastError, ToastId, ToastKind, ToastRecord, ToastRegistry,
};
