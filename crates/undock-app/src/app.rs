//! Application state: the tab container, its floating windows, and toasts.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use egui::{Context, ViewportBuilder, ViewportClass, ViewportId};
use kurbo::{Point, Size};
use undock_core::tabs::{DetachedId, PaneId, TabContainer, TabEvent};
use undock_core::toast::{Anchor, SurfaceId, Toast, ToastKind, ToastRegistry};
use undock_widgets::ToastLayer;
use uuid::Uuid;

use crate::ui;

const LOG_CAP: usize = 200;

/// Which content a pane shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaneKind {
    Home,
    Settings,
    Logs,
    Scratch(usize),
}

/// Toast booth selections on the Home pane.
pub struct BoothState {
    pub anchor: Anchor,
    pub kind: ToastKind,
    pub sticky: bool,
    pub anchor_text: String,
    pub sent: usize,
}

/// Widget gallery state on the Settings pane.
pub struct GalleryState {
    pub notifications_on: bool,
    pub autosave_on: bool,
    pub progress: f32,
}

pub struct UndockApp {
    pub container: TabContainer,
    pub panes: HashMap<PaneId, PaneKind>,
    pub registry: ToastRegistry,
    pub surface: SurfaceId,
    pub surface_size: Size,
    /// Last measured central panel size, used as the tear-off window size.
    pub content_size: egui::Vec2,
    pub booth: BoothState,
    pub gallery: GalleryState,
    pub log_lines: Vec<String>,
    scratch_count: usize,
}

impl UndockApp {
    pub fn new() -> Self {
        let mut container = TabContainer::new();
        container.set_host_icon("🗂");

        let mut panes = HashMap::new();
        for (label, icon, kind) in [
            ("Home", "🏠", PaneKind::Home),
            ("Settings", "⚙", PaneKind::Settings),
            ("Logs", "📜", PaneKind::Logs),
        ] {
            let pane = Uuid::new_v4();
            container.add_tab(Some(pane), label, Some(icon.to_string()), None);
            panes.insert(pane, kind);
        }
        container.freeze();

        Self {
            container,
            panes,
            registry: ToastRegistry::new(),
            surface: Uuid::new_v4(),
            surface_size: Size::ZERO,
            content_size: egui::vec2(480.0, 360.0),
            booth: BoothState {
                anchor: Anchor::TopRight,
                kind: ToastKind::Information,
                sticky: false,
                anchor_text: String::new(),
                sent: 0,
            },
            gallery: GalleryState {
                notifications_on: true,
                autosave_on: false,
                progress: 40.0,
            },
            log_lines: Vec::new(),
            scratch_count: 0,
        }
    }

    pub fn push_log(&mut self, line: impl Into<String>) {
        self.log_lines.push(line.into());
        if self.log_lines.len() > LOG_CAP {
            let excess = self.log_lines.len() - LOG_CAP;
            self.log_lines.drain(..excess);
        }
    }

    /// Append a fresh unfrozen tab after the canonical ones.
    pub fn add_scratch_tab(&mut self) {
        self.scratch_count += 1;
        let pane = Uuid::new_v4();
        let label = format!("Scratch {}", self.scratch_count);
        self.container
            .add_tab(Some(pane), label.clone(), Some("📝".to_string()), None);
        self.panes.insert(pane, PaneKind::Scratch(self.scratch_count));
        self.push_log(format!("added tab '{label}'"));
    }

    /// Fire a toast with the booth's current anchor and kind.
    pub fn show_booth_toast(&mut self) {
        self.booth.sent += 1;
        let title = format!("{} #{}", ui::kind_label(self.booth.kind), self.booth.sent);
        let message = format!("Anchored {}", self.booth.anchor.name());
        let mut toast = Toast::new(self.booth.kind, title, message);
        if self.booth.sticky {
            toast = toast.sticky();
        }
        let surface = self.surface;
        let size = self.surface_size;
        self.registry
            .manager(self.booth.anchor)
            .add(surface, size, toast, Instant::now());
    }

    /// Resolve the typed anchor name, or surface the error as a toast.
    pub fn apply_anchor_text(&mut self) {
        let text = self.booth.anchor_text.trim().to_owned();
        match self.registry.make(&text) {
            Ok(manager) => {
                let anchor = manager.anchor();
                self.booth.anchor = anchor;
                self.push_log(format!("anchor set to {anchor}"));
            }
            Err(err) => {
                self.push_log(err.to_string());
                let surface = self.surface;
                let size = self.surface_size;
                let toast = Toast::new(ToastKind::Error, "Bad anchor", err.to_string());
                self.registry
                    .manager(self.booth.anchor)
                    .add(surface, size, toast, Instant::now());
            }
        }
    }

    /// Present every detached tab in its own native viewport.
    ///
    /// Runs before the root panels so a window closed this frame re-docks
    /// into the strip within the same frame.
    fn show_detached_windows(&mut self, ctx: &Context) {
        let ids: Vec<DetachedId> = self.container.detached().map(|w| w.id).collect();

        for id in ids {
            let (pane, title, pos, size) = {
                let Some(window) = self.container.detached_window(id) else {
                    continue;
                };
                let title = match &window.tab.icon {
                    Some(icon) => format!("{icon} {}", window.tab.label),
                    None => window.tab.label.clone(),
                };
                (
                    window.tab.content,
                    title,
                    egui::pos2(window.position.x as f32, window.position.y as f32),
                    egui::vec2(window.size.width as f32, window.size.height as f32),
                )
            };
            let kind = self.panes.get(&pane).copied();
            let viewport_id = ViewportId::from_hash_of(("undock_detached", id));
            let builder = ViewportBuilder::default()
                .with_title(title.clone())
                .with_position(pos)
                .with_inner_size(size);

            let (reattach, live_pos, live_size) =
                ctx.show_viewport_immediate(viewport_id, builder, |ctx, class| {
                    if matches!(class, ViewportClass::Embedded) {
                        // No native viewports here: draw a contained window.
                        let mut open = true;
                        egui::Window::new(&title)
                            .open(&mut open)
                            .default_size(size)
                            .show(ctx, |ui| self.render_detached_pane(ui, kind));
                        return (!open, None, None);
                    }

                    egui::CentralPanel::default()
                        .show(ctx, |ui| self.render_detached_pane(ui, kind));

                    let reattach = ctx.input(|i| i.viewport().close_requested());
                    let (live_pos, live_size) = ctx.input(|i| {
                        let vp = i.viewport();
                        (
                            vp.outer_rect.map(|r| r.min),
                            vp.inner_rect.map(|r| r.size()),
                        )
                    });
                    (reattach, live_pos, live_size)
                });

            if reattach {
                self.container.attach_tab(id, None);
            } else if let Some(window) = self.container.detached_window_mut(id) {
                // Track OS-side moves and resizes so a future respawn
                // reopens where the user left the window.
                if let Some(p) = live_pos {
                    window.position = Point::new(f64::from(p.x), f64::from(p.y));
                }
                if let Some(s) = live_size {
                    window.size = Size::new(f64::from(s.x), f64::from(s.y));
                }
            }
        }
    }

    fn render_detached_pane(&mut self, ui: &mut egui::Ui, kind: Option<PaneKind>) {
        match kind {
            Some(kind) => ui::render_pane(ui, self, kind),
            None => {
                ui.label("This pane no longer exists.");
            }
        }
    }
}

impl eframe::App for UndockApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        egui_extras::install_image_loaders(ctx);
        let now = Instant::now();

        for (anchor, _surface, id) in self.registry.tick(now) {
            self.push_log(format!("toast {id} expired at {anchor}"));
        }

        self.show_detached_windows(ctx);

        egui::TopBottomPanel::top("undock_top_bar").show(ctx, |ui| {
            ui::render_top_bar(ui, self);
        });

        let active_pane = self.container.strip.active_tab().map(|t| t.content);
        let kind = active_pane.and_then(|p| self.panes.get(&p).copied());
        egui::CentralPanel::default().show(ctx, |ui| {
            self.content_size = ui.max_rect().size();
            match kind {
                Some(kind) => ui::render_pane(ui, self, kind),
                None => {
                    ui.centered_and_justified(|ui| {
                        ui.label("Every tab is floating. Close a window to bring one back.");
                    });
                }
            }
        });

        for event in self.container.take_events() {
            let line = match event {
                TabEvent::ActiveChanged { old, new } => {
                    format!("active tab: {old:?} -> {new:?}")
                }
                TabEvent::Reordered { from, to } => format!("tab moved {from} -> {to}"),
            };
            self.push_log(line);
        }

        let rect = ctx.screen_rect();
        let size = Size::new(f64::from(rect.width()), f64::from(rect.height()));
        if size != self.surface_size {
            self.surface_size = size;
            self.registry.parent_resized(self.surface, size);
        }

        let live: Vec<Anchor> = Anchor::ALL
            .iter()
            .copied()
            .filter(|a| self.registry.get(*a).is_some())
            .collect();
        for anchor in live {
            let surface = self.surface;
            let manager = self.registry.manager(anchor);
            ToastLayer::new(manager, surface, rect).show(ctx, now);
        }

        if self
            .registry
            .managers()
            .any(|m| m.toast_count(self.surface) > 0)
        {
            ctx.request_repaint_after(Duration::from_millis(16));
        }

        if ctx.input(|i| i.viewport().close_requested()) {
            log::info!(
                "closing: gathering {} floating windows",
                self.container.detached_count()
            );
            self.container.close_detached_tabs();
        }
    }
}
