//! Animated toggle switch with a draggable knob.

use std::time::{Duration, Instant};

use egui::{vec2, Color32, CornerRadius, CursorIcon, Sense, Ui};
use undock_core::anim::{Easing, FloatAnim};

use crate::theme;

const TRACK_WIDTH: f32 = 60.0;
const TRACK_HEIGHT: f32 = 28.0;
const KNOB: f32 = 22.0;
/// Knob travel stops: 3 px in from the left edge, 4 px in from the right.
const KNOB_MIN_X: f32 = 3.0;
const KNOB_MAX_X: f32 = TRACK_WIDTH - KNOB - 4.0;
const SNAP_DURATION: Duration = Duration::from_millis(500);

/// The travel end a knob released at `x` settles on.
fn snap_target(x: f32) -> f32 {
    if x - KNOB_MIN_X <= KNOB_MAX_X - x {
        KNOB_MIN_X
    } else {
        KNOB_MAX_X
    }
}

/// Per-widget animation state kept in egui temp memory.
#[derive(Clone, Copy, Default)]
struct SwitchState {
    anim: Option<FloatAnim>,
    /// Knob x while the pointer is dragging it, cleared on release.
    drag_x: Option<f32>,
}

/// A sliding on/off switch.
///
/// Clicking toggles; dragging moves the knob with the pointer and snaps it
/// to the closest end on release, with a bounce.
pub struct Switch<'a> {
    checked: &'a mut bool,
    active_color: Color32,
}

impl<'a> Switch<'a> {
    /// Create a switch bound to `checked`.
    pub fn new(checked: &'a mut bool) -> Self {
        Self {
            checked,
            active_color: theme::ACCENT,
        }
    }

    /// Set the track color shown while on.
    pub fn active_color(mut self, color: Color32) -> Self {
        self.active_color = color;
        self
    }

    /// Show the switch and return true if the value changed.
    pub fn show(self, ui: &mut Ui) -> bool {
        let (rect, response) =
            ui.allocate_exact_size(vec2(TRACK_WIDTH, TRACK_HEIGHT), Sense::click_and_drag());
        let now = Instant::now();
        let mut state = ui
            .ctx()
            .data_mut(|d| d.get_temp::<SwitchState>(response.id))
            .unwrap_or_default();

        let mut changed = false;

        if response.dragged() {
            if let Some(pointer) = response.interact_pointer_pos() {
                let x = (pointer.x - rect.left() - KNOB / 2.0).clamp(KNOB_MIN_X, KNOB_MAX_X);
                state.drag_x = Some(x);
                state.anim = None;
            }
        }

        if response.drag_stopped() {
            if let Some(x) = state.drag_x.take() {
                // Snap to whichever end of the travel is closer.
                let target = snap_target(x);
                let was = *self.checked;
                *self.checked = target > KNOB_MIN_X;
                changed = was != *self.checked;
                state.anim = Some(FloatAnim::new(
                    f64::from(x),
                    f64::from(target),
                    SNAP_DURATION,
                    Easing::OutBounce,
                    now,
                ));
            }
        }

        if response.clicked() {
            let from = state
                .anim
                .map(|a| a.sample(now) as f32)
                .unwrap_or(if *self.checked { KNOB_MAX_X } else { KNOB_MIN_X });
            *self.checked = !*self.checked;
            changed = true;
            let to = if *self.checked { KNOB_MAX_X } else { KNOB_MIN_X };
            state.anim = Some(FloatAnim::new(
                f64::from(from),
                f64::from(to),
                SNAP_DURATION,
                Easing::OutBounce,
                now,
            ));
        }

        let resting = if *self.checked { KNOB_MAX_X } else { KNOB_MIN_X };
        let knob_x = if let Some(x) = state.drag_x {
            x
        } else if let Some(anim) = state.anim {
            if anim.is_finished(now) {
                state.anim = None;
                resting
            } else {
                ui.ctx().request_repaint();
                anim.sample(now) as f32
            }
        } else {
            resting
        };

        if ui.is_rect_visible(rect) {
            let track_color = if *self.checked {
                self.active_color
            } else {
                Color32::from_gray(119)
            };
            ui.painter().rect_filled(
                rect,
                CornerRadius::same((TRACK_HEIGHT / 2.0) as u8),
                track_color,
            );
            ui.painter().circle_filled(
                egui::pos2(rect.left() + knob_x + KNOB / 2.0, rect.center().y),
                KNOB / 2.0,
                Color32::from_gray(221),
            );
        }

        ui.ctx().data_mut(|d| d.insert_temp(response.id, state));
        response.on_hover_cursor(CursorIcon::PointingHand);
        changed
    }
}
