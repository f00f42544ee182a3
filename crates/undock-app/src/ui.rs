//! Panel and pane rendering for the demo shell.

use egui::{include_image, Align, ComboBox, Layout, RichText, ScrollArea, Ui};
use undock_core::toast::{Anchor, ToastKind};
use undock_widgets::{theme, IconButton, ProgressBar, Spinner, Switch, TabBar};

use crate::app::{PaneKind, UndockApp};

/// Short label for a toast kind.
pub fn kind_label(kind: ToastKind) -> &'static str {
    match kind {
        ToastKind::Information => "Info",
        ToastKind::Success => "Success",
        ToastKind::Warning => "Warning",
        ToastKind::Error => "Error",
        ToastKind::Custom => "Custom",
    }
}

/// The strip plus the toolbar buttons to its right.
pub fn render_top_bar(ui: &mut Ui, app: &mut UndockApp) {
    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
        if IconButton::new(
            include_image!("../assets/gather.svg"),
            "Bring every floating tab home",
        )
        .show(ui)
        {
            app.container.close_detached_tabs();
        }
        if IconButton::new(
            include_image!("../assets/sort.svg"),
            "Restore canonical tab order",
        )
        .show(ui)
        {
            app.container.sort_tabs();
        }
        if IconButton::new(include_image!("../assets/plus.svg"), "New scratch tab").show(ui) {
            app.add_scratch_tab();
        }

        ui.with_layout(Layout::left_to_right(Align::Center), |ui| {
            let detach_size = app.content_size;
            let response = TabBar::new(&mut app.container)
                .detach_size(detach_size)
                .show(ui);
            if let Some(id) = response.detached {
                app.push_log(format!("tab detached into window {id}"));
            }
        });
    });
}

/// Render the pane belonging to the active tab.
pub fn render_pane(ui: &mut Ui, app: &mut UndockApp, kind: PaneKind) {
    match kind {
        PaneKind::Home => render_home(ui, app),
        PaneKind::Settings => render_settings(ui, app),
        PaneKind::Logs => render_logs(ui, app),
        PaneKind::Scratch(n) => render_scratch(ui, app, n),
    }
}

fn render_home(ui: &mut Ui, app: &mut UndockApp) {
    ui.heading("Toast booth");
    ui.add_space(8.0);

    ComboBox::from_label("Anchor")
        .selected_text(app.booth.anchor.name())
        .show_ui(ui, |ui| {
            for anchor in Anchor::ALL {
                ui.selectable_value(&mut app.booth.anchor, anchor, anchor.name());
            }
        });

    ui.horizontal(|ui| {
        for kind in [
            ToastKind::Information,
            ToastKind::Success,
            ToastKind::Warning,
            ToastKind::Error,
            ToastKind::Custom,
        ] {
            if ui
                .selectable_label(app.booth.kind == kind, kind_label(kind))
                .clicked()
            {
                app.booth.kind = kind;
            }
        }
    });
    ui.checkbox(&mut app.booth.sticky, "Keep until dismissed");

    if ui.button("Show toast").clicked() {
        app.show_booth_toast();
    }

    ui.add_space(12.0);
    ui.separator();
    ui.label(
        RichText::new("Or type an anchor name")
            .size(10.0)
            .color(theme::TEXT_MUTED),
    );
    ui.horizontal(|ui| {
        ui.text_edit_singleline(&mut app.booth.anchor_text);
        if ui.button("Use").clicked() {
            app.apply_anchor_text();
        }
    });
}

fn render_settings(ui: &mut Ui, app: &mut UndockApp) {
    ui.heading("Preferences");
    ui.add_space(8.0);

    ui.horizontal(|ui| {
        if Switch::new(&mut app.gallery.notifications_on).show(ui) {
            let state = if app.gallery.notifications_on {
                "on"
            } else {
                "off"
            };
            app.push_log(format!("notifications {state}"));
        }
        ui.label("Notification sounds");
    });
    ui.add_space(4.0);
    ui.horizontal(|ui| {
        if Switch::new(&mut app.gallery.autosave_on)
            .active_color(theme::SUCCESS)
            .show(ui)
        {
            let state = if app.gallery.autosave_on { "on" } else { "off" };
            app.push_log(format!("autosave {state}"));
        }
        ui.label("Autosave");
    });

    ui.add_space(12.0);
    ui.add(egui::Slider::new(&mut app.gallery.progress, 0.0..=100.0).text("Sync progress"));
    ProgressBar::new(app.gallery.progress)
        .placeholder("Syncing workspace")
        .desired_width(280.0)
        .show(ui);

    ui.add_space(12.0);
    ui.horizontal(|ui| {
        Spinner::new().size(28.0).show(ui);
        ui.label("Indexing in the background");
    });
}

fn render_logs(ui: &mut Ui, app: &mut UndockApp) {
    ui.heading("Activity");
    ui.add_space(4.0);

    if app.log_lines.is_empty() {
        ui.label(
            RichText::new("Nothing yet. Drag a tab or fire a toast.").color(theme::TEXT_MUTED),
        );
        return;
    }
    ScrollArea::vertical()
        .stick_to_bottom(true)
        .show(ui, |ui| {
            for line in &app.log_lines {
                ui.label(RichText::new(line).monospace().size(11.0));
            }
        });
}

fn render_scratch(ui: &mut Ui, app: &mut UndockApp, n: usize) {
    ui.heading(format!("Scratch {n}"));
    ui.label("An empty workspace pane. Drag its tab out to float it.");
    ui.add_space(8.0);
    if ui.button("Close this tab").clicked() {
        let label = format!("Scratch {n}");
        if app.container.remove_tab_by_name(&label) {
            app.push_log(format!("removed tab '{label}'"));
        }
    }
}
