//! egui widgets for Undock's tab and notification state machines.
//!
//! This crate renders the state owned by `undock-core`:
//!
//! - **TabBar**: draws a `TabContainer`'s strip and feeds pointer events into
//!   its drag controller (select, reorder, tear-off)
//! - **Toast**: toast cards and the per-surface overlay layer
//! - **Buttons**: icon buttons and small glyph buttons
//! - **Switch / Spinner / Progress**: the remaining form controls

pub mod buttons;
pub mod progress;
pub mod spinner;
pub mod switch;
pub mod tab_bar;
pub mod toast;

pub use buttons::{close_button, IconButton, IconButtonStyle};
pub use progress::ProgressBar;
pub use spinner::Spinner;
pub use switch::Switch;
pub use tab_bar::{TabBar, TabBarResponse, TabDragPayload};
pub use toast::{kind_accent, ToastCard, ToastLayer};

/// Standard sizing constants used across widgets.
pub mod sizing {
    /// Small button size (strip affordances, close glyphs)
    pub const SMALL: f32 = 20.0;
    /// Medium button size (toolbar buttons)
    pub const MEDIUM: f32 = 28.0;
    /// Large button size
    pub const LARGE: f32 = 36.0;
    /// Tab strip height
    pub const TAB_HEIGHT: f32 = 28.0;
    /// Standard corner radius
    pub const CORNER_RADIUS: u8 = 4;
    /// Panel corner radius
    pub const PANEL_RADIUS: u8 = 8;
}

/// Standard colors used across widgets.
pub mod theme {
    use egui::Color32;

    /// Text color (dark gray)
    pub const TEXT: Color32 = Color32::from_rgb(60, 60, 60);
    /// Muted text color
    pub const TEXT_MUTED: Color32 = Color32::from_rgb(120, 120, 120);
    /// Border color
    pub const BORDER: Color32 = Color32::from_rgb(220, 220, 220);
    /// Selection/active color (blue)
    pub const ACCENT: Color32 = Color32::from_rgb(59, 130, 246);
    /// Hover background
    pub const HOVER_BG: Color32 = Color32::from_rgb(245, 245, 245);
    /// Selected background
    pub const SELECTED_BG: Color32 = Color32::from_rgb(235, 245, 255);
    /// Panel background
    pub const PANEL_BG: Color32 = Color32::from_rgba_premultiplied(250, 250, 252, 250);
    /// Success accent (green)
    pub const SUCCESS: Color32 = Color32::from_rgb(34, 197, 94);
    /// Warning accent (amber)
    pub const WARNING: Color32 = Color32::from_rgb(245, 158, 11);
    /// Error accent (red)
    pub const ERROR: Color32 = Color32::from_rgb(239, 68, 68);
}
