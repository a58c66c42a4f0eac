use crate::api::DeleteMode;
use crate::catalog::hash_preview;
use crate::state::{AppEvent, MenuStage, ResolveMenu};

/// Mode button label. Keep-one removes only the extra copies.
fn keep_one_label(extra_count: usize) -> String {
    format!("Keep one copy (remove {} duplicate file(s))", extra_count)
}

/// Mode button label. Delete-all removes the indexed copy too.
fn delete_all_label(extra_count: usize) -> String {
    format!("Delete all copies (remove {} file(s))", extra_count + 1)
}

fn confirm_message(mode: DeleteMode, extra_count: usize) -> String {
    match mode {
        DeleteMode::KeepOne => format!(
            "Permanently delete {} duplicate file(s), keeping one copy?",
            extra_count
        ),
        DeleteMode::All => format!(
            "Permanently delete all {} file(s) of this image?",
            extra_count + 1
        ),
    }
}

/// Draw the duplicate-resolution menu for its current stage. The caller
/// only invokes this while a menu exists.
pub fn show(ctx: &egui::Context, menu: &ResolveMenu) -> Vec<AppEvent> {
    let mut out: Vec<AppEvent> = Vec::new();

    match menu.stage {
        MenuStage::Choosing => {
            if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
                out.push(AppEvent::DismissMenu);
            }
            let window = egui::Window::new("Resolve Duplicates")
                .collapsible(false)
                .resizable(false)
                .show(ctx, |ui| {
                    ui.label(format!(
                        "This image exists as {} identical file(s).",
                        menu.extra_count + 1
                    ));
                    ui.label(
                        egui::RichText::new(hash_preview(&menu.hash))
                            .monospace()
                            .weak(),
                    );
                    ui.add_space(6.0);
                    if ui.button(keep_one_label(menu.extra_count)).clicked() {
                        out.push(AppEvent::ChooseMode(DeleteMode::KeepOne));
                    }
                    if ui.button(delete_all_label(menu.extra_count)).clicked() {
                        out.push(AppEvent::ChooseMode(DeleteMode::All));
                    }
                    ui.add_space(6.0);
                    if ui.button("Cancel (Esc)").clicked() {
                        out.push(AppEvent::DismissMenu);
                    }
                });
            // A click anywhere outside the window dismisses the menu.
            if let Some(window) = window {
                if window.response.clicked_elsewhere() {
                    out.push(AppEvent::DismissMenu);
                }
            }
        }
        MenuStage::Confirming(mode) => {
            if ctx.input(|i| i.key_pressed(egui::Key::Y)) {
                out.push(AppEvent::ConfirmDelete);
            } else if ctx.input(|i| i.key_pressed(egui::Key::N) || i.key_pressed(egui::Key::Escape))
            {
                out.push(AppEvent::DeclineDelete);
            }
            egui::Window::new("Confirm Deletion")
                .collapsible(false)
                .resizable(false)
                .show(ctx, |ui| {
                    ui.label(confirm_message(mode, menu.extra_count));
                    ui.horizontal(|ui| {
                        if ui.button("Yes (y)").clicked() {
                            out.push(AppEvent::ConfirmDelete);
                        }
                        if ui.button("No (n)").clicked() {
                            out.push(AppEvent::DeclineDelete);
                        }
                    });
                });
        }
    }

    out
}
