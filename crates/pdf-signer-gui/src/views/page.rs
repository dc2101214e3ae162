use eframe::egui;
use pdf_signer::Point;

/// A click on the page surface, in screen coordinates
#[derive(Debug, Clone, Copy)]
pub struct PageClick {
    pub client: Point,
    pub surface_origin: Point,
}

/// Draw the composited page at 1:1 and report clicks on it
pub fn show_page(ui: &mut egui::Ui, texture: &egui::TextureHandle) -> Option<PageClick> {
    egui::ScrollArea::both()
        .id_salt("page_scroll")
        .show(ui, |ui| {
            let (rect, response) =
                ui.allocate_exact_size(texture.size_vec2(), egui::Sense::click());

            let painter = ui.painter_at(rect.expand(1.0));
            painter.image(
                texture.id(),
                rect,
                egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                egui::Color32::WHITE,
            );
            painter.rect_stroke(
                rect,
                0.0,
                egui::Stroke::new(1.0, egui::Color32::BLACK),
                egui::StrokeKind::Outside,
            );

            let response = response.on_hover_cursor(egui::CursorIcon::Crosshair);
            if !response.clicked() {
                return None;
            }
            let pos = response.interact_pointer_pos()?;
            Some(PageClick {
                client: Point::new(pos.x, pos.y),
                surface_origin: Point::new(rect.min.x, rect.min.y),
            })
        })
        .inner
}

/// Placeholder shown before any document is loaded
pub fn show_empty(ui: &mut egui::Ui, loading: bool, open_requested: &mut bool) {
    ui.vertical_centered(|ui| {
        ui.add_space(50.0);
        ui.heading("PDF Signer");
        ui.add_space(20.0);

        if loading {
            ui.spinner();
            ui.label("Loading PDF...");
            return;
        }

        ui.label("Drop a PDF file here or click to open");
        ui.label("Then click on the first page where a signature should go");
        ui.add_space(10.0);

        if ui.button("Open PDF...").clicked() {
            *open_requested = true;
        }
    });
}
