use crate::state::{AppEvent, StatusPanel};

/// Floating index-status window. Closing is button-driven so Escape
/// stays reserved for the lightbox and the resolve menu.
pub fn show(ctx: &egui::Context, panel: &StatusPanel) -> Vec<AppEvent> {
    let mut out: Vec<AppEvent> = Vec::new();

    egui::Window::new("Index Status")
        .collapsible(false)
        .resizable(false)
        .show(ctx, |ui| {
            match panel {
                StatusPanel::Loading => {
                    ui.horizontal(|ui| {
                        ui.spinner();
                        ui.label("Fetching status...");
                    });
                }
                StatusPanel::Ready(total) => {
                    ui.label(format!("{} images indexed", total));
                }
                StatusPanel::Failed(error) => {
                    ui.label(
                        egui::RichText::new("⚠ Status unavailable")
                            .color(egui::Color32::LIGHT_RED),
                    );
                    ui.label(egui::RichText::new(error).weak());
                }
            }
            ui.add_space(4.0);
            if ui.button("Close").clicked() {
                out.push(AppEvent::CloseStatusPanel);
            }
        });

    out
}
