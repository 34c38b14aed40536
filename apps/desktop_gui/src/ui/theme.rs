use client_core::Theme;
use eframe::egui;

pub fn visuals_for_theme(theme: Theme) -> egui::Visuals {
    match theme {
        Theme::Dark => {
            let mut v = egui::Visuals::dark();
            v.panel_fill = egui::Color32::from_rgb(30, 31, 34);
            v.window_fill = egui::Color32::from_rgb(30, 31, 34);
            v.extreme_bg_color = egui::Color32::from_rgb(22, 23, 25);
            v
        }
        Theme::Light => egui::Visuals::light(),
    }
}
