use bevy_egui::{egui, EguiContexts};

/// Dark slate visuals with a teal accent, applied once at startup. egui
/// keeps the style for every later frame.
pub fn apply_map_theme(mut contexts: EguiContexts) {
    let ctx = contexts.ctx_mut();
    let mut style = (*ctx.style()).clone();
    let visuals = &mut style.visuals;

    let accent = egui::Color32::from_rgb(64, 178, 170);
    let idle = egui::Color32::from_rgb(46, 52, 62);
    let hovered = egui::Color32::from_rgb(62, 74, 90);

    visuals.panel_fill = egui::Color32::from_rgb(30, 34, 42);
    visuals.window_fill = visuals.panel_fill;
    visuals.extreme_bg_color = egui::Color32::from_rgb(24, 27, 34);
    visuals.faint_bg_color = egui::Color32::from_rgb(38, 42, 52);

    visuals.widgets.noninteractive.bg_fill = visuals.panel_fill;
    visuals.widgets.inactive.bg_fill = idle;
    visuals.widgets.inactive.weak_bg_fill = idle;
    visuals.widgets.hovered.bg_fill = hovered;
    visuals.widgets.hovered.weak_bg_fill = hovered;
    visuals.widgets.active.bg_fill = accent;
    visuals.widgets.active.weak_bg_fill = accent;

    visuals.selection.bg_fill = accent;
    visuals.selection.stroke = egui::Stroke::new(1.0, accent);

    visuals.window_corner_radius = egui::CornerRadius::same(8);
    for widget in [
        &mut visuals.widgets.noninteractive,
        &mut visuals.widgets.inactive,
        &mut visuals.widgets.hovered,
        &mut visuals.widgets.active,
    ] {
        widget.corner_radius = egui::CornerRadius::same(6);
    }

    ctx.set_style(style);
}
