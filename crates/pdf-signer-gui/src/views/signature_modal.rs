use eframe::egui;
use pdf_signer::{Point, Rgba, SignatureModal, SignaturePad};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalAction {
    None,
    Save,
    Cancel,
}

/// Show the capture dialog for an open modal. Drawing goes straight into the
/// modal's pad; Save and Close are returned for the caller to apply.
pub fn show_signature_modal(ctx: &egui::Context, modal: &mut SignatureModal) -> ModalAction {
    let mut action = ModalAction::None;

    let response = egui::Modal::new(egui::Id::new("signature_modal")).show(ctx, |ui| {
        ui.heading("Draw your signature");
        ui.add_space(8.0);

        signature_pad(ui, modal.pad_mut());

        ui.add_space(8.0);
        ui.horizontal(|ui| {
            let mut pen_width = modal.pad().pen_width();
            if ui
                .add(egui::Slider::new(&mut pen_width, 0.5..=8.0).text("Pen width"))
                .changed()
            {
                modal.pad_mut().set_pen_width(pen_width);
            }

            if ui
                .add_enabled(!modal.pad().is_empty(), egui::Button::new("Clear"))
                .clicked()
            {
                modal.pad_mut().clear();
            }
        });

        ui.add_space(10.0);
        ui.horizontal(|ui| {
            if ui
                .add_enabled(modal.can_save(), egui::Button::new("Save Signature"))
                .on_disabled_hover_text("Draw a signature first")
                .clicked()
            {
                action = ModalAction::Save;
            }
            if ui.button("Close").clicked() {
                action = ModalAction::Cancel;
            }
        });
    });

    // Escape or a click on the backdrop
    if action == ModalAction::None && response.should_close() {
        action = ModalAction::Cancel;
    }
    action
}

fn signature_pad(ui: &mut egui::Ui, pad: &mut SignaturePad) {
    let size = pad.size();
    let (rect, response) = ui.allocate_exact_size(
        egui::vec2(size.width as f32, size.height as f32),
        egui::Sense::click_and_drag(),
    );

    let to_local = |pos: egui::Pos2| Point::new(pos.x - rect.min.x, pos.y - rect.min.y);

    if response.drag_started() {
        if let Some(pos) = response.interact_pointer_pos() {
            pad.begin_stroke(to_local(pos));
        }
    } else if response.dragged() {
        if let Some(pos) = response.interact_pointer_pos() {
            pad.extend_stroke(to_local(pos));
        }
    }
    if response.drag_stopped() {
        pad.end_stroke();
    }
    if response.clicked() {
        if let Some(pos) = response.interact_pointer_pos() {
            pad.begin_stroke(to_local(pos));
            pad.end_stroke();
        }
    }

    let painter = ui.painter_at(rect);
    painter.rect_filled(rect, 0.0, egui::Color32::WHITE);
    painter.rect_stroke(
        rect,
        0.0,
        egui::Stroke::new(1.0, egui::Color32::BLACK),
        egui::StrokeKind::Inside,
    );

    let color = to_color32(pad.pen_color());
    let width = pad.pen_width();
    for stroke in pad.strokes() {
        let points: Vec<egui::Pos2> = stroke
            .iter()
            .map(|p| rect.min + egui::vec2(p.x, p.y))
            .collect();
        match points.len() {
            0 => {}
            1 => {
                painter.circle_filled(points[0], width / 2.0, color);
            }
            _ => {
                painter.add(egui::Shape::line(points, egui::Stroke::new(width, color)));
            }
        }
    }

    if pad.is_drawing() {
        ui.ctx().request_repaint();
    }
}

fn to_color32(color: Rgba) -> egui::Color32 {
    let [r, g, b, a] = color.0;
    egui::Color32::from_rgba_unmultiplied(r, g, b, a)
}
