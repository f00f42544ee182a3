//! Toast cards and the per-surface overlay that positions them.

use std::time::Instant;

use egui::{
    vec2, Align2, Color32, CornerRadius, Context, Order, Rect, Sense, Stroke, StrokeKind, Ui,
};
use undock_core::toast::{NotificationManager, SurfaceId, ToastId, ToastKind, ToastRecord};

use crate::{buttons, sizing, theme};

/// Accent color for a toast kind.
pub fn kind_accent(kind: ToastKind) -> Color32 {
    match kind {
        ToastKind::Information => theme::ACCENT,
        ToastKind::Success => theme::SUCCESS,
        ToastKind::Warning => theme::WARNING,
        ToastKind::Error => theme::ERROR,
        ToastKind::Custom => theme::TEXT_MUTED,
    }
}

fn kind_glyph(kind: ToastKind) -> &'static str {
    match kind {
        ToastKind::Information => "ℹ",
        ToastKind::Success => "✔",
        ToastKind::Warning => "⚠",
        ToastKind::Error => "✖",
        ToastKind::Custom => "●",
    }
}

/// Draws one toast record as a rounded card.
pub struct ToastCard<'a> {
    record: &'a ToastRecord,
}

impl<'a> ToastCard<'a> {
    /// Create a card for `record`.
    pub fn new(record: &'a ToastRecord) -> Self {
        Self { record }
    }

    /// Show the card and return true if its close button was clicked.
    pub fn show(self, ui: &mut Ui) -> bool {
        let toast = &self.record.toast;
        let size = vec2(toast.size.width as f32, toast.size.height as f32);
        let (rect, _response) = ui.allocate_exact_size(size, Sense::hover());
        let accent = kind_accent(toast.kind);

        if ui.is_rect_visible(rect) {
            ui.painter().rect_filled(
                rect,
                CornerRadius::same(sizing::PANEL_RADIUS),
                theme::PANEL_BG,
            );
            ui.painter().rect_stroke(
                rect,
                CornerRadius::same(sizing::PANEL_RADIUS),
                Stroke::new(1.0, theme::BORDER),
                StrokeKind::Inside,
            );

            // Accent stripe down the left edge.
            let stripe = Rect::from_min_size(rect.min, vec2(4.0, rect.height()));
            ui.painter().rect_filled(
                stripe,
                CornerRadius {
                    nw: sizing::PANEL_RADIUS,
                    sw: sizing::PANEL_RADIUS,
                    ne: 0,
                    se: 0,
                },
                accent,
            );

            ui.painter().text(
                egui::pos2(rect.left() + 20.0, rect.center().y),
                Align2::CENTER_CENTER,
                kind_glyph(toast.kind),
                egui::FontId::proportional(16.0),
                accent,
            );

            let text_left = rect.left() + 36.0;
            ui.painter().text(
                egui::pos2(text_left, rect.top() + 14.0),
                Align2::LEFT_CENTER,
                &toast.title,
                egui::FontId::proportional(13.0),
                theme::TEXT,
            );
            ui.painter().text(
                egui::pos2(text_left, rect.top() + 32.0),
                Align2::LEFT_CENTER,
                &toast.message,
                egui::FontId::proportional(11.0),
                theme::TEXT_MUTED,
            );
        }

        if toast.closable {
            let close_rect = Rect::from_center_size(
                egui::pos2(rect.right() - 14.0, rect.top() + 14.0),
                vec2(16.0, 16.0),
            );
            let mut close_ui = ui.new_child(egui::UiBuilder::new().max_rect(close_rect));
            buttons::close_button(&mut close_ui, 16.0)
        } else {
            false
        }
    }
}

/// Overlays one surface's toasts at the positions the manager computed.
///
/// `rect` is the surface's rectangle in the current viewport; record
/// positions are relative to it.
pub struct ToastLayer<'a> {
    manager: &'a mut NotificationManager,
    surface: SurfaceId,
    rect: Rect,
}

impl<'a> ToastLayer<'a> {
    /// Create the layer for `surface` drawn over `rect`.
    pub fn new(manager: &'a mut NotificationManager, surface: SurfaceId, rect: Rect) -> Self {
        Self {
            manager,
            surface,
            rect,
        }
    }

    /// Show every live toast; clicks on close buttons remove their toast.
    pub fn show(self, ctx: &Context, now: Instant) {
        let mut closed: Vec<ToastId> = Vec::new();

        for record in self.manager.records(self.surface) {
            let pos = self.rect.min
                + vec2(record.position.x as f32, record.position.y as f32);
            let area_id = egui::Id::new(("undock_toast", record.toast.id));

            egui::Area::new(area_id)
                .order(Order::Foreground)
                .fixed_pos(pos)
                .interactable(true)
                .show(ctx, |ui| {
                    ui.set_clip_rect(ui.clip_rect().intersect(self.rect));
                    ui.set_opacity(record.opacity(now) as f32);
                    if ToastCard::new(record).show(ui) {
                        closed.push(record.toast.id);
                    }
                });
        }

        for id in closed {
            self.manager.remove(self.surface, id, now);
        }
    }
}
