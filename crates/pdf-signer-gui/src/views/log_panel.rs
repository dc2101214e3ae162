use eframe::egui;
use log::Level;

use crate::logger::AppLogger;

pub fn show_log_panel(ui: &mut egui::Ui, logger: &AppLogger) {
    ui.horizontal(|ui| {
        ui.strong("Log");
        if ui.small_button("Clear").clicked() {
            logger.clear();
        }
    });

    egui::ScrollArea::vertical()
        .id_salt("log_scroll")
        .max_height(160.0)
        .stick_to_bottom(true)
        .show(ui, |ui| {
            for entry in logger.get_entries() {
                let color = match entry.level {
                    Level::Error => egui::Color32::RED,
                    Level::Warn => egui::Color32::YELLOW,
                    _ => ui.visuals().text_color(),
                };
                ui.label(
                    egui::RichText::new(entry.format_line())
                        .monospace()
                        .color(color),
                );
            }
        });
}
