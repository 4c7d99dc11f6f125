use eframe::egui;
use registration_core::TermsDisclosure;

/// Draws the terms dialog while `disclosure` is visible.
pub fn show_terms_modal(ctx: &egui::Context, disclosure: &mut TermsDisclosure) {
    if !disclosure.is_visible() {
        return;
    }
    let content = disclosure.content();

    let response = egui::Modal::new(egui::Id::new("terms_modal")).show(ctx, |ui| {
        ui.set_max_width(560.0);
        ui.heading(content.title);
        ui.add_space(8.0);

        egui::ScrollArea::vertical()
            .max_height(360.0)
            .show(ui, |ui| {
                ui.label(content.intro);
                ui.add_space(4.0);
                for clause in content.clauses {
                    ui.label(format!("• {}", clause.text));
                    if !clause.details.is_empty() {
                        ui.indent(clause.text, |ui| {
                            for detail in clause.details {
                                ui.label(format!("◦ {detail}"));
                            }
                        });
                    }
                }
            });

        ui.add_space(10.0);
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.button(content.close_label).clicked()
        })
        .inner
    });

    if response.inner || response.should_close() {
        disclosure.close();
    }
}
