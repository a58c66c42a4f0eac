use std::sync::mpsc;
use std::sync::Arc;

use crate::api::ApiClient;
use crate::config::AppConfig;
use crate::gallery::Gallery;
use crate::lightbox::Lightbox;
use crate::net::{Dispatcher, NetEvent};
use crate::state::{AppEvent, Effect, GalleryState};
use crate::{resolve, status};

pub struct GalleristApp {
    state: GalleryState,
    gallery: Gallery,
    lightbox: Lightbox,
    dispatcher: Dispatcher,
    rx: mpsc::Receiver<NetEvent>,
    server_url: String,
    config: AppConfig,
}

impl GalleristApp {
    pub fn new(cc: &eframe::CreationContext<'_>, config: AppConfig, client: Arc<ApiClient>) -> Self {
        let (tx, rx) = mpsc::channel();
        let mut dispatcher = Dispatcher::new(Arc::clone(&client), tx);
        let server_url = client.base_url().to_string();

        // First catalog fetch starts right away.
        let mut state = GalleryState::new();
        let effects = state.apply(AppEvent::RefreshRequested);
        for effect in effects {
            dispatcher.run(effect, &cc.egui_ctx);
        }

        Self {
            state,
            gallery: Gallery::new(client),
            lightbox: Lightbox::new(),
            dispatcher,
            rx,
            server_url,
            config,
        }
    }

    /// Drain finished background calls and feed them through the reducer.
    fn poll_net_events(&mut self, ctx: &egui::Context) {
        let mut events: Vec<AppEvent> = Vec::new();
        while let Ok(net) = self.rx.try_recv() {
            match net {
                NetEvent::Catalog { generation, result } => {
                    if !self.dispatcher.accepts_catalog(generation) {
                        // A newer fetch was issued after this one started.
                        tracing::debug!(generation, "dropping overtaken catalog response");
                        continue;
                    }
                    match result {
                        Ok(records) => events.push(AppEvent::CatalogLoaded(records)),
                        Err(error) => {
                            tracing::warn!(%error, "catalog fetch failed");
                            events.push(AppEvent::CatalogFailed(error));
                        }
                    }
                }
                NetEvent::FullImage { hash, result } => {
                    if let Err(error) = &result {
                        tracing::warn!(%hash, %error, "full image fetch failed");
                    }
                    self.lightbox.insert_result(hash, result, ctx);
                }
                NetEvent::Delete { result } => match result {
                    Ok(message) => events.push(AppEvent::DeleteSucceeded(message)),
                    Err(error) => {
                        tracing::warn!(%error, "delete request failed");
                        events.push(AppEvent::DeleteFailed(error));
                    }
                },
                NetEvent::Status { result } => match result {
                    Ok(total) => events.push(AppEvent::StatusLoaded(total)),
                    Err(error) => events.push(AppEvent::StatusFailed(error)),
                },
            }
        }
        self.apply_events(events, ctx);
    }

    fn apply_events(&mut self, events: Vec<AppEvent>, ctx: &egui::Context) {
        for event in events {
            let effects = self.state.apply(event);
            self.run_effects(effects, ctx);
        }
    }

    fn run_effects(&mut self, effects: Vec<Effect>, ctx: &egui::Context) {
        for effect in effects {
            // Skip downloads the lightbox already has or has in flight.
            if let Effect::FetchFullImage { hash } = &effect {
                if !self.lightbox.needs_fetch(hash) {
                    continue;
                }
            }
            self.dispatcher.run(effect, ctx);
        }
    }
}

fn count_label(displayed: usize, total: usize) -> String {
    if displayed == total {
        format!("{} image(s)", total)
    } else {
        format!("{} of {} image(s)", displayed, total)
    }
}

impl eframe::App for GalleristApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Track window size for saving on exit
        if let Some(rect) = ctx.input(|i| i.viewport().inner_rect) {
            self.config.window_width = Some(rect.width());
            self.config.window_height = Some(rect.height());
        }

        // Poll background work before rendering
        self.poll_net_events(ctx);

        let mut ui_events: Vec<AppEvent> = Vec::new();

        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(egui::RichText::new("Gallerist").strong());
                ui.separator();

                let mut query = self.state.query.clone();
                let resp = ui.add(
                    egui::TextEdit::singleline(&mut query)
                        .hint_text("Filter by name, hash, camera or date")
                        .desired_width(280.0),
                );
                if resp.changed() {
                    ui_events.push(AppEvent::SearchChanged(query));
                }

                if ui.button("Refresh").clicked() {
                    ui_events.push(AppEvent::RefreshRequested);
                }
                if self.state.refreshing {
                    ui.spinner();
                }
                if ui.button("Status").clicked() {
                    ui_events.push(if self.state.status_panel.is_some() {
                        AppEvent::CloseStatusPanel
                    } else {
                        AppEvent::OpenStatusPanel
                    });
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(count_label(
                        self.state.displayed.len(),
                        self.state.catalog.len(),
                    ));
                });
            });
        });

        egui::TopBottomPanel::bottom("footer").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(egui::RichText::new(&self.state.status_line).weak());
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(
                        egui::RichText::new(&self.server_url)
                            .weak()
                            .monospace(),
                    );
                });
            });
        });

        // The menu view goes first so that when a click both dismisses an
        // open menu and hits another card's badge, the dismissal is
        // reduced before the open and the new menu survives.
        if let Some(menu) = &self.state.menu {
            ui_events.extend(resolve::show(ctx, menu));
        }

        ui_events.extend(self.gallery.show(ctx, &self.state));

        if self.state.lightbox.is_some() {
            ui_events.extend(self.lightbox.show(ctx, &self.state));
        }
        if let Some(panel) = &self.state.status_panel {
            ui_events.extend(status::show(ctx, panel));
        }

        self.apply_events(ui_events, ctx);
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.config.save();
    }
}
