//! Indeterminate loading spinner: a rotating arc whose length breathes.

use std::time::Instant;

use egui::{epaint::PathShape, Color32, Sense, Stroke, Ui, Vec2};

use crate::theme;

/// Rotation speed in sixteenths of a degree per millisecond.
const ROTATION_SPEED: f32 = 6.0;

#[derive(Clone, Copy)]
struct SpinnerState {
    /// Current arc start, in sixteenths of a degree.
    angle: f32,
    last: Instant,
}

/// A spinning arc for indefinite waits.
pub struct Spinner {
    size: f32,
    line_width: f32,
    color: Color32,
}

impl Default for Spinner {
    fn default() -> Self {
        Self {
            size: 24.0,
            line_width: 3.0,
            color: theme::ACCENT,
        }
    }
}

impl Spinner {
    /// Create a spinner with default size and color.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the outer diameter in points.
    pub fn size(mut self, size: f32) -> Self {
        self.size = size;
        self
    }

    /// Set the stroke width.
    pub fn line_width(mut self, line_width: f32) -> Self {
        self.line_width = line_width;
        self
    }

    /// Set the arc color.
    pub fn color(mut self, color: Color32) -> Self {
        self.color = color;
        self
    }

    /// Show the spinner.
    pub fn show(self, ui: &mut Ui) {
        let (rect, response) = ui.allocate_exact_size(Vec2::splat(self.size), Sense::hover());
        let now = Instant::now();
        let mut state = ui
            .ctx()
            .data_mut(|d| d.get_temp::<SpinnerState>(response.id))
            .unwrap_or(SpinnerState { angle: 0.0, last: now });

        let elapsed_ms = now.duration_since(state.last).as_secs_f32() * 1000.0;
        state.angle = (state.angle + ROTATION_SPEED * elapsed_ms) % (360.0 * 16.0);
        state.last = now;

        if ui.is_rect_visible(rect) {
            let start_deg = state.angle / 16.0;
            // Two sine terms out of phase, each up to half a turn, so the arc
            // length cycles between short and nearly full as it rotates.
            let breathe = |deg: f32| (deg.to_radians().sin() + 1.0) / 2.0 * 180.0;
            let sweep_deg = breathe(start_deg) + breathe(start_deg + 130.0);

            let radius = self.size / 2.0 - self.line_width;
            let center = rect.center();
            let steps = ((sweep_deg / 6.0).ceil() as usize).max(2);
            let points = (0..=steps)
                .map(|i| {
                    let a = (start_deg + sweep_deg * i as f32 / steps as f32).to_radians();
                    egui::pos2(center.x + radius * a.cos(), center.y - radius * a.sin())
                })
                .collect();
            ui.painter().add(PathShape::line(
                points,
                Stroke::new(self.line_width, self.color),
            ));
        }

        ui.ctx().data_mut(|d| d.insert_temp(response.id, state));
        ui.ctx().request_repaint();
    }
}
