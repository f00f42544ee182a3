//! Determinate progress bar with an optional placeholder label.

use egui::{vec2, Align2, Color32, CornerRadius, Rect, Sense, Ui};

use crate::{sizing, theme};

const MIN_HEIGHT: f32 = 35.0;

/// A 0..=100 progress bar.
///
/// The percentage is never printed; a placeholder text can be shown over the
/// bar instead (status line, file name, and so on).
pub struct ProgressBar<'a> {
    value: f32,
    placeholder: Option<&'a str>,
    desired_width: Option<f32>,
}

impl<'a> ProgressBar<'a> {
    /// Create a progress bar at `value` percent.
    pub fn new(value: f32) -> Self {
        Self {
            value: value.clamp(0.0, 100.0),
            placeholder: None,
            desired_width: None,
        }
    }

    /// Text drawn centered over the bar.
    pub fn placeholder(mut self, text: &'a str) -> Self {
        self.placeholder = Some(text);
        self
    }

    /// Set an explicit width instead of filling the available space.
    pub fn desired_width(mut self, width: f32) -> Self {
        self.desired_width = Some(width);
        self
    }

    /// Show the progress bar.
    pub fn show(self, ui: &mut Ui) {
        let width = self.desired_width.unwrap_or(ui.available_width());
        let (rect, _response) =
            ui.allocate_exact_size(vec2(width, MIN_HEIGHT), Sense::hover());

        if ui.is_rect_visible(rect) {
            ui.painter().rect_filled(
                rect,
                CornerRadius::same(sizing::CORNER_RADIUS),
                Color32::from_gray(235),
            );

            let fill_width = rect.width() * self.value / 100.0;
            if fill_width > 0.0 {
                let fill = Rect::from_min_size(rect.min, vec2(fill_width, rect.height()));
                ui.painter().rect_filled(
                    fill,
                    CornerRadius::same(sizing::CORNER_RADIUS),
                    theme::ACCENT,
                );
            }

            if let Some(text) = self.placeholder {
                ui.painter().text(
                    rect.center(),
                    Align2::CENTER_CENTER,
                    text,
                    egui::FontId::proportional(12.0),
                    theme::TEXT,
                );
            }
        }
    }
}
