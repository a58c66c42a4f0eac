use std::{collections::HashMap, sync::mpsc, sync::Arc};

use crate::api::{ApiClient, ImageRecord};
use crate::catalog::{camera_label, file_name, gps_label, hash_preview};
use crate::state::{AppEvent, CatalogPhase, GalleryState};

const CELL: f32 = 170.0;

enum ThumbState {
    Loading,
    Ready(egui::TextureHandle),
    Failed,
}

struct ThumbResult {
    hash: String,
    rgba: Option<(Vec<u8>, usize, usize)>,
}

enum CardClick {
    None,
    Open,
    Resolve,
}

/// The card grid. Owns the thumbnail cache and its loader threads;
/// everything else it reports back as events.
pub struct Gallery {
    client: Arc<ApiClient>,
    thumbnails: HashMap<String, ThumbState>,
    tx: mpsc::SyncSender<ThumbResult>,
    rx: mpsc::Receiver<ThumbResult>,
}

impl Gallery {
    pub fn new(client: Arc<ApiClient>) -> Self {
        let (tx, rx) = mpsc::sync_channel(64);
        Self {
            client,
            thumbnails: HashMap::new(),
            tx,
            rx,
        }
    }

    /// Start loader threads for displayed records we have no thumbnail
    /// for yet. Thumbnails are keyed by content hash, so they survive
    /// catalog refreshes untouched.
    fn queue_pending_thumbs(&mut self, ctx: &egui::Context, state: &GalleryState) {
        let to_queue: Vec<String> = state
            .displayed
            .iter()
            .map(|&p| state.catalog[p].file_hash.clone())
            .filter(|h| !self.thumbnails.contains_key(h))
            .collect();

        for hash in to_queue {
            self.thumbnails.insert(hash.clone(), ThumbState::Loading);
            let client = Arc::clone(&self.client);
            let tx = self.tx.clone();
            let ctx2 = ctx.clone();
            std::thread::spawn(move || {
                let rgba = fetch_thumb(&client, &hash);
                let _ = tx.send(ThumbResult { hash, rgba });
                ctx2.request_repaint();
            });
        }
    }

    fn drain_channel(&mut self, ctx: &egui::Context) {
        while let Ok(ThumbResult { hash, rgba }) = self.rx.try_recv() {
            let state = match rgba {
                Some((data, w, h)) => {
                    let img = egui::ColorImage::from_rgba_unmultiplied([w, h], &data);
                    let tex = ctx.load_texture(&hash, img, egui::TextureOptions::LINEAR);
                    ThumbState::Ready(tex)
                }
                None => ThumbState::Failed,
            };
            self.thumbnails.insert(hash, state);
        }
    }

    pub fn show(&mut self, ctx: &egui::Context, state: &GalleryState) -> Vec<AppEvent> {
        self.drain_channel(ctx);
        self.queue_pending_thumbs(ctx, state);

        let mut out: Vec<AppEvent> = Vec::new();

        egui::CentralPanel::default().show(ctx, |ui| {
            match &state.phase {
                CatalogPhase::Loading => {
                    ui.centered_and_justified(|ui| {
                        ui.horizontal(|ui| {
                            ui.spinner();
                            ui.label("Loading catalog...");
                        });
                    });
                    return;
                }
                CatalogPhase::Failed(message) => {
                    if draw_fetch_error(ui, message) {
                        out.push(AppEvent::RefreshRequested);
                    }
                    return;
                }
                CatalogPhase::Ready => {}
            }

            // A failed refresh hides the cards until the next gesture,
            // even though the previous catalog is still cached.
            if let Some(message) = &state.last_error {
                if draw_fetch_error(ui, message) {
                    out.push(AppEvent::RefreshRequested);
                }
                return;
            }

            if state.displayed.is_empty() {
                ui.centered_and_justified(|ui| {
                    if state.catalog.is_empty() {
                        ui.label("No images indexed yet");
                    } else {
                        ui.label("No images match the filter");
                    }
                });
                return;
            }

            let avail_w = ui.available_width();
            let cols = ((avail_w / (CELL + 8.0)) as usize).max(1);

            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    egui::Grid::new("gallery_grid")
                        .num_columns(cols)
                        .spacing([8.0, 8.0])
                        .show(ui, |ui| {
                            for (display_pos, &position) in state.displayed.iter().enumerate() {
                                let record = &state.catalog[position];
                                let thumb = match self.thumbnails.get(&record.file_hash) {
                                    Some(ThumbState::Ready(tex)) => {
                                        Some((tex.id(), tex.size_vec2()))
                                    }
                                    _ => None,
                                };

                                match draw_card(ui, record, thumb) {
                                    CardClick::Open => {
                                        out.push(AppEvent::OpenLightbox(display_pos));
                                    }
                                    CardClick::Resolve => {
                                        out.push(AppEvent::OpenMenu {
                                            hash: record.file_hash.clone(),
                                            extra_count: record.duplicate_paths.len(),
                                        });
                                    }
                                    CardClick::None => {}
                                }

                                if (display_pos + 1) % cols == 0 {
                                    ui.end_row();
                                }
                            }
                        });
                });
        });

        out
    }
}

/// Error text in place of the card grid. Returns whether retry was
/// clicked.
fn draw_fetch_error(ui: &mut egui::Ui, message: &str) -> bool {
    let mut retry = false;
    ui.vertical_centered(|ui| {
        ui.add_space(ui.available_height() * 0.3);
        ui.label(egui::RichText::new("Could not reach the server").strong());
        ui.label(message);
        ui.add_space(8.0);
        retry = ui.button("Retry").clicked();
    });
    retry
}

fn dupe_badge_label(extra_count: usize) -> String {
    format!("{} dupes", extra_count)
}

/// Metadata lines under the card title: the full path first, then hash
/// preview and dimensions. Absent fields get no line at all, not an
/// empty one.
fn card_lines(record: &ImageRecord) -> Vec<String> {
    let mut lines = vec![
        record.file_path.clone(),
        hash_preview(&record.file_hash).to_string(),
        format!("{}×{}", record.width, record.height),
    ];
    if let Some(camera) = camera_label(record) {
        lines.push(camera);
    }
    if let Some(date) = &record.date_taken {
        lines.push(date.clone());
    }
    if let Some(gps) = gps_label(record) {
        lines.push(gps);
    }
    lines
}

fn draw_card(
    ui: &mut egui::Ui,
    record: &ImageRecord,
    thumb: Option<(egui::TextureId, egui::Vec2)>,
) -> CardClick {
    let lines = card_lines(record);
    let cell_height = CELL + 22.0 + lines.len() as f32 * 14.0;
    let (resp, painter) =
        ui.allocate_painter(egui::vec2(CELL, cell_height), egui::Sense::click());
    let resp = resp.on_hover_text(record.file_path.as_str());
    let rect = resp.rect;
    // Long paths get cut at the card edge; the hover text has the whole thing.
    let painter = painter.with_clip_rect(rect);

    if resp.hovered() {
        painter.rect_filled(rect, 4.0, ui.visuals().widgets.hovered.bg_fill);
    }

    // Image area
    let img_rect = egui::Rect::from_min_size(rect.min, egui::vec2(CELL, CELL));
    match thumb {
        Some((tex_id, tex_size)) => {
            let scale = (CELL / tex_size.x).min(CELL / tex_size.y);
            let display = tex_size * scale;
            let offset = (egui::vec2(CELL, CELL) - display) * 0.5;
            let draw_rect = egui::Rect::from_min_size(img_rect.min + offset, display);
            painter.image(
                tex_id,
                draw_rect,
                egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                egui::Color32::WHITE,
            );
        }
        None => {
            painter.rect_filled(img_rect, 4.0, egui::Color32::from_gray(40));
            painter.text(
                img_rect.center(),
                egui::Align2::CENTER_CENTER,
                "…",
                egui::FontId::proportional(22.0),
                egui::Color32::GRAY,
            );
        }
    }

    // Duplicate badge, clickable on its own
    let mut resolve_clicked = false;
    let extra = record.duplicate_paths.len();
    if extra > 0 {
        let badge_rect = egui::Rect::from_min_size(
            egui::pos2(img_rect.max.x - 62.0, img_rect.min.y + 4.0),
            egui::vec2(58.0, 18.0),
        );
        let badge_resp = ui.interact(badge_rect, resp.id.with("resolve"), egui::Sense::click());
        let fill = if badge_resp.hovered() {
            egui::Color32::from_rgb(205, 70, 70)
        } else {
            egui::Color32::from_rgb(165, 45, 45)
        };
        painter.rect_filled(badge_rect, 9.0, fill);
        painter.text(
            badge_rect.center(),
            egui::Align2::CENTER_CENTER,
            dupe_badge_label(extra),
            egui::FontId::proportional(10.0),
            egui::Color32::WHITE,
        );
        resolve_clicked = badge_resp.clicked();
    }

    // Title
    let name = file_name(&record.file_path);
    let name_short = name.get(..24).unwrap_or(name);
    painter.text(
        egui::pos2(rect.center().x, img_rect.max.y + 11.0),
        egui::Align2::CENTER_CENTER,
        name_short,
        egui::FontId::proportional(11.0),
        ui.visuals().text_color(),
    );

    // Metadata lines
    for (i, line) in lines.iter().enumerate() {
        painter.text(
            egui::pos2(rect.center().x, img_rect.max.y + 25.0 + i as f32 * 14.0),
            egui::Align2::CENTER_CENTER,
            line,
            egui::FontId::proportional(10.0),
            ui.visuals().weak_text_color(),
        );
    }

    if resolve_clicked {
        CardClick::Resolve
    } else if resp.clicked() {
        CardClick::Open
    } else {
        CardClick::None
    }
}

fn fetch_thumb(client: &ApiClient, hash: &str) -> Option<(Vec<u8>, usize, usize)> {
    let bytes = client.fetch_thumbnail(hash).ok()?;
    let decoded = crate::net::decode_image(&bytes).ok()?;
    let [w, h] = decoded.size;
    Some((decoded.rgba, w, h))
}
