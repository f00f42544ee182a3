//! Button components: icon buttons and small glyph buttons.

use egui::{
    vec2, Align2, Color32, CornerRadius, CursorIcon, Image, ImageSource, Rect, Sense, Ui, Vec2,
};

use crate::{sizing, theme};

/// Style configuration for icon buttons.
#[derive(Clone)]
pub struct IconButtonStyle {
    /// Button size
    pub size: Vec2,
    /// Icon size (smaller than the button)
    pub icon_size: Vec2,
    /// Corner radius
    pub corner_radius: u8,
    /// Background when idle
    pub bg_color: Color32,
    /// Background when hovered
    pub hover_color: Color32,
    /// Background when active
    pub active_color: Color32,
    /// Icon tint when idle (None = no tint)
    pub tint: Option<Color32>,
    /// Icon tint when active
    pub active_tint: Option<Color32>,
}

impl Default for IconButtonStyle {
    fn default() -> Self {
        Self {
            size: vec2(sizing::MEDIUM, sizing::MEDIUM),
            icon_size: vec2(18.0, 18.0),
            corner_radius: sizing::CORNER_RADIUS,
            bg_color: Color32::TRANSPARENT,
            hover_color: theme::HOVER_BG,
            active_color: theme::ACCENT,
            tint: Some(Color32::from_gray(80)),
            active_tint: Some(Color32::WHITE),
        }
    }
}

impl IconButtonStyle {
    /// Small style (20x20 button, 14x14 icon) for in-strip affordances.
    pub fn strip() -> Self {
        Self {
            size: vec2(sizing::SMALL, sizing::SMALL),
            icon_size: vec2(14.0, 14.0),
            hover_color: Color32::TRANSPARENT,
            active_color: Color32::TRANSPARENT,
            tint: Some(Color32::from_gray(100)),
            active_tint: Some(theme::ACCENT),
            ..Default::default()
        }
    }

    /// Large style (36x36, 24x24 icon) for gallery and toolbar use.
    pub fn large() -> Self {
        Self {
            size: vec2(sizing::LARGE, sizing::LARGE),
            icon_size: vec2(24.0, 24.0),
            ..Default::default()
        }
    }
}

/// An icon button that displays an image/SVG.
pub struct IconButton<'a> {
    icon: ImageSource<'a>,
    tooltip: &'a str,
    active: bool,
    style: IconButtonStyle,
}

impl<'a> IconButton<'a> {
    /// Create a new icon button.
    pub fn new(icon: ImageSource<'a>, tooltip: &'a str) -> Self {
        Self {
            icon,
            tooltip,
            active: false,
            style: IconButtonStyle::default(),
        }
    }

    /// Set whether the button is in its active state.
    pub fn active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    /// Set the button style.
    pub fn style(mut self, style: IconButtonStyle) -> Self {
        self.style = style;
        self
    }

    /// Show the button and return true if clicked.
    pub fn show(self, ui: &mut Ui) -> bool {
        let (rect, response) = ui.allocate_exact_size(self.style.size, Sense::click());

        if ui.is_rect_visible(rect) {
            let bg_color = if self.active {
                self.style.active_color
            } else if response.hovered() {
                self.style.hover_color
            } else {
                self.style.bg_color
            };

            ui.painter().rect_filled(
                rect,
                CornerRadius::same(self.style.corner_radius),
                bg_color,
            );

            let tint = if self.active {
                self.style.active_tint
            } else if response.hovered() {
                Some(Color32::from_gray(40))
            } else {
                self.style.tint
            };

            let icon_rect = Rect::from_center_size(rect.center(), self.style.icon_size);
            let mut image = Image::new(self.icon).fit_to_exact_size(self.style.icon_size);
            if let Some(tint) = tint {
                image = image.tint(tint);
            }
            image.paint_at(ui, icon_rect);
        }

        let clicked = response.clicked();
        response
            .on_hover_text(self.tooltip)
            .on_hover_cursor(CursorIcon::PointingHand);
        clicked
    }
}

/// A small "x" glyph button, sized `size` on each edge.
///
/// Used for toast dismissal; draws a hover circle behind the glyph.
pub fn close_button(ui: &mut Ui, size: f32) -> bool {
    let (rect, response) = ui.allocate_exact_size(Vec2::splat(size), Sense::click());

    if ui.is_rect_visible(rect) {
        if response.hovered() {
            ui.painter()
                .circle_filled(rect.center(), size / 2.0, theme::HOVER_BG);
        }
        let color = if response.hovered() {
            theme::TEXT
        } else {
            theme::TEXT_MUTED
        };
        ui.painter().text(
            rect.center(),
            Align2::CENTER_CENTER,
            "✕",
            egui::FontId::proportional(size * 0.6),
            color,
        );
    }

    let clicked = response.clicked();
    response.on_hover_cursor(CursorIcon::PointingHand);
    clicked
}
