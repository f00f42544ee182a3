//! Tab strip widget driving a `TabContainer`'s drag state machine.

use egui::{
    vec2, Align2, Color32, CornerRadius, CursorIcon, Order, Pos2, Rect, Sense, Stroke, Ui, Vec2,
};
use kurbo::{Point, Size};
use undock_core::tabs::{DetachedId, DragPhase, TabContainer, TabGesture, TabStrip};

use crate::{sizing, theme};

const TAB_GAP: f32 = 2.0;
const TAB_PADDING: f32 = 24.0;
const ICON_WIDTH: f32 = 18.0;

/// Marks an in-flight tab drag so other drop targets can recognize it.
///
/// Acceptors compare the whole payload for equality instead of sniffing a
/// string tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabDragPayload {
    /// A tab torn from the strip with this widget id, by index.
    Tab { strip: egui::Id, index: usize },
}

/// What the strip did this frame.
#[derive(Debug, Default)]
pub struct TabBarResponse {
    /// Tab index that became active from a click.
    pub selected: Option<usize>,
    /// Window id of a tab torn off this frame.
    pub detached: Option<DetachedId>,
    /// Whether a drag-reorder landed this frame.
    pub reordered: bool,
}

/// Renders a `TabContainer`'s strip and routes pointer input into it.
///
/// Clicks select, drags reorder, and drags released off the strip (or a
/// double-click) tear the tab out into a floating window.
pub struct TabBar<'a> {
    container: &'a mut TabContainer,
    height: f32,
    detach_size: Vec2,
}

impl<'a> TabBar<'a> {
    /// Create a tab bar over `container`.
    pub fn new(container: &'a mut TabContainer) -> Self {
        Self {
            container,
            height: sizing::TAB_HEIGHT,
            detach_size: vec2(480.0, 360.0),
        }
    }

    /// Set the strip height.
    pub fn height(mut self, height: f32) -> Self {
        self.height = height;
        self
    }

    /// Inner size given to windows created by tearing a tab off.
    pub fn detach_size(mut self, size: Vec2) -> Self {
        self.detach_size = size;
        self
    }

    /// Show the strip and return what happened.
    pub fn show(self, ui: &mut Ui) -> TabBarResponse {
        let mut out = TabBarResponse::default();
        let bar_id = ui.id().with("tab_bar");

        self.container.drag.begin_frame();
        let pre_phase = self.container.drag.phase();

        let (strip_rect, _response) =
            ui.allocate_exact_size(vec2(ui.available_width(), self.height), Sense::hover());
        let mut rects = tab_rects(ui, &self.container.strip, strip_rect);

        // Window origin in screen points, for tear-off spawn positions.
        let origin = ui
            .ctx()
            .input(|i| i.viewport().inner_rect)
            .map_or(Pos2::ZERO, |r| r.min);

        let (pointer_local, pressed, released) = ui.ctx().input(|i| {
            (
                i.pointer.latest_pos(),
                i.pointer.primary_pressed(),
                i.pointer.primary_released(),
            )
        });

        let gesture = if let Some(local) = pointer_local {
            let screen = Point::new(
                f64::from(origin.x + local.x),
                f64::from(origin.y + local.y),
            );
            if pressed {
                match slot_under(&rects, local) {
                    Some(slot) => self.container.drag.pointer_down(screen, Some(slot)),
                    None => TabGesture::None,
                }
            } else if released {
                self.container
                    .drag
                    .pointer_up(screen, slot_near(&rects, strip_rect, local))
            } else {
                self.container
                    .drag
                    .pointer_move(screen, slot_near(&rects, strip_rect, local))
            }
        } else if released {
            // Released with the pointer outside this window.
            let screen = self.container.drag.pointer_position();
            self.container.drag.pointer_up(screen, None)
        } else {
            TabGesture::None
        };

        if ui.ctx().input(|i| i.key_pressed(egui::Key::Escape)) {
            self.container.drag.cancel();
            egui::DragAndDrop::clear_payload(ui.ctx());
        }

        match gesture {
            TabGesture::None => {}
            TabGesture::Select(index) => {
                self.container.set_active(Some(index));
                out.selected = Some(index);
            }
            TabGesture::Reorder { from, to } => {
                self.container.move_tab(from, to);
                out.reordered = true;
            }
            TabGesture::Detach { index, at } => {
                let spawn = Point::new(at.x - 20.0, at.y - 10.0);
                let size = Size::new(
                    f64::from(self.detach_size.x),
                    f64::from(self.detach_size.y),
                );
                out.detached = self.container.detach_tab(index, spawn, size);
            }
        }
        if out.reordered || out.detached.is_some() {
            rects = tab_rects(ui, &self.container.strip, strip_rect);
        }

        self.paint(ui, strip_rect, &rects, pointer_local);

        // Advertise the drag to other widgets while it is in flight.
        if let DragPhase::Dragging { index } = self.container.drag.phase() {
            let payload = TabDragPayload::Tab {
                strip: bar_id,
                index,
            };
            if egui::DragAndDrop::payload::<TabDragPayload>(ui.ctx()).as_deref() != Some(&payload)
            {
                egui::DragAndDrop::set_payload(ui.ctx(), payload);
            }
            ui.ctx().set_cursor_icon(CursorIcon::Grabbing);
            ui.ctx().request_repaint();
        } else if released {
            if let DragPhase::Dragging { index } = pre_phase {
                let expected = TabDragPayload::Tab {
                    strip: bar_id,
                    index,
                };
                if egui::DragAndDrop::payload::<TabDragPayload>(ui.ctx()).as_deref()
                    == Some(&expected)
                {
                    egui::DragAndDrop::clear_payload(ui.ctx());
                }
            }
        }

        out
    }

    fn paint(&self, ui: &Ui, strip_rect: Rect, rects: &[Rect], pointer_local: Option<Pos2>) {
        if !ui.is_rect_visible(strip_rect) {
            return;
        }

        let painter = ui.painter();
        let active = self.container.strip.active();
        let dragging = self.container.drag.dragging_index();
        let drop_slot = self.container.drag.drop_slot();

        painter.line_segment(
            [strip_rect.left_bottom(), strip_rect.right_bottom()],
            Stroke::new(1.0, theme::BORDER),
        );

        for (index, (tab, rect)) in self
            .container
            .strip
            .tabs()
            .iter()
            .zip(rects.iter())
            .enumerate()
        {
            let is_active = active == Some(index);
            let is_dragged = dragging == Some(index);
            let hovered = dragging.is_none()
                && pointer_local.is_some_and(|p| rect.contains(p));

            let bg = if is_active {
                theme::SELECTED_BG
            } else if hovered {
                theme::HOVER_BG
            } else {
                Color32::TRANSPARENT
            };
            let top_rounded = CornerRadius {
                nw: sizing::CORNER_RADIUS,
                ne: sizing::CORNER_RADIUS,
                sw: 0,
                se: 0,
            };
            painter.rect_filled(*rect, top_rounded, bg);
            if is_active {
                let underline = Rect::from_min_max(
                    egui::pos2(rect.left(), rect.bottom() - 2.0),
                    rect.right_bottom(),
                );
                painter.rect_filled(underline, CornerRadius::ZERO, theme::ACCENT);
            }

            let text_color = if is_dragged {
                Color32::from_gray(190)
            } else if is_active {
                theme::TEXT
            } else {
                theme::TEXT_MUTED
            };
            let mut text_x = rect.left() + 12.0;
            if let Some(icon) = &tab.icon {
                painter.text(
                    egui::pos2(text_x, rect.center().y),
                    Align2::LEFT_CENTER,
                    icon,
                    egui::FontId::proportional(12.0),
                    text_color,
                );
                text_x += ICON_WIDTH;
            }
            painter.text(
                egui::pos2(text_x, rect.center().y),
                Align2::LEFT_CENTER,
                &tab.label,
                egui::FontId::proportional(12.0),
                text_color,
            );

            // Mark where the dragged tab would land.
            if let (Some(from), Some(slot)) = (dragging, drop_slot) {
                if slot == index && slot != from {
                    let x = if slot < from { rect.left() } else { rect.right() };
                    painter.line_segment(
                        [egui::pos2(x, rect.top()), egui::pos2(x, rect.bottom())],
                        Stroke::new(2.0, theme::ACCENT),
                    );
                }
            }
        }

        // Ghost of the dragged tab following the pointer.
        if let (Some(index), Some(local)) = (dragging, pointer_local) {
            if let (Some(tab), Some(rect)) =
                (self.container.strip.get(index), rects.get(index))
            {
                let ghost_painter = ui.ctx().layer_painter(egui::LayerId::new(
                    Order::Tooltip,
                    egui::Id::new("tab_drag_ghost"),
                ));
                let ghost = Rect::from_center_size(local, rect.size());
                ghost_painter.rect_filled(
                    ghost,
                    CornerRadius::same(sizing::CORNER_RADIUS),
                    theme::SELECTED_BG.gamma_multiply(0.85),
                );
                ghost_painter.rect_stroke(
                    ghost,
                    CornerRadius::same(sizing::CORNER_RADIUS),
                    Stroke::new(1.0, theme::ACCENT.gamma_multiply(0.85)),
                    egui::StrokeKind::Inside,
                );
                ghost_painter.text(
                    ghost.center(),
                    Align2::CENTER_CENTER,
                    &tab.label,
                    egui::FontId::proportional(12.0),
                    theme::TEXT.gamma_multiply(0.85),
                );
            }
        }
    }
}

/// Lay the strip's tabs out left to right inside `strip_rect`.
fn tab_rects(ui: &Ui, strip: &TabStrip, strip_rect: Rect) -> Vec<Rect> {
    let font = egui::FontId::proportional(12.0);
    let mut x = strip_rect.left();
    strip
        .tabs()
        .iter()
        .map(|tab| {
            let galley =
                ui.painter()
                    .layout_no_wrap(tab.label.clone(), font.clone(), Color32::PLACEHOLDER);
            let mut width = galley.size().x + TAB_PADDING;
            if tab.icon.is_some() {
                width += ICON_WIDTH;
            }
            let rect = Rect::from_min_size(
                egui::pos2(x, strip_rect.top()),
                vec2(width, strip_rect.height()),
            );
            x += width + TAB_GAP;
            rect
        })
        .collect()
}

/// The tab exactly under `pos`, if any.
fn slot_under(rects: &[Rect], pos: Pos2) -> Option<usize> {
    rects.iter().position(|r| r.contains(pos))
}

/// The tab a drag at `pos` would drop on: the nearest slot while the pointer
/// stays over the strip, `None` once it leaves (a tear-off zone).
fn slot_near(rects: &[Rect], strip_rect: Rect, pos: Pos2) -> Option<usize> {
    if rects.is_empty() || !strip_rect.expand(4.0).contains(pos) {
        return None;
    }
    rects
        .iter()
        .position(|r| pos.x <= r.right())
        .or(Some(rects.len() - 1))
}
