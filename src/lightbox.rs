use std::collections::HashMap;

use crate::catalog::{camera_label, file_name};
use crate::net::DecodedImage;
use crate::state::{AppEvent, GalleryState};

enum FullImage {
    Loading,
    Ready(egui::TextureHandle),
    Failed(String),
}

/// Fullscreen overlay for one record at a time. Full frames are big, so
/// the texture cache is kept tiny rather than unbounded.
pub struct Lightbox {
    textures: HashMap<String, FullImage>,
}

const CACHE_CAP: usize = 8;

impl Lightbox {
    pub fn new() -> Self {
        Self {
            textures: HashMap::new(),
        }
    }

    /// Whether a download should be started for `hash`. Marks it pending
    /// so the same fetch is not spawned twice; a failed entry is retried.
    pub fn needs_fetch(&mut self, hash: &str) -> bool {
        match self.textures.get(hash) {
            Some(FullImage::Loading) | Some(FullImage::Ready(_)) => false,
            Some(FullImage::Failed(_)) | None => {
                self.textures.insert(hash.to_string(), FullImage::Loading);
                true
            }
        }
    }

    /// A background download finished; upload it and cap the cache.
    pub fn insert_result(
        &mut self,
        hash: String,
        result: Result<DecodedImage, String>,
        ctx: &egui::Context,
    ) {
        let state = match result {
            Ok(decoded) => {
                let img = egui::ColorImage::from_rgba_unmultiplied(decoded.size, &decoded.rgba);
                let tex = ctx.load_texture(&hash, img, egui::TextureOptions::LINEAR);
                FullImage::Ready(tex)
            }
            Err(error) => FullImage::Failed(error),
        };
        self.textures.insert(hash.clone(), state);
        if self.textures.len() > CACHE_CAP {
            // Keep in-flight downloads; evicting a Loading marker would
            // let a second fetch start for the same hash.
            self.textures
                .retain(|k, v| *k == hash || matches!(v, FullImage::Loading));
        }
    }

    pub fn show(&mut self, ctx: &egui::Context, state: &GalleryState) -> Vec<AppEvent> {
        let mut out: Vec<AppEvent> = Vec::new();
        let Some(cursor) = state.lightbox else {
            return out;
        };
        let Some(record) = state.lightbox_record() else {
            return out;
        };

        if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            out.push(AppEvent::CloseLightbox);
        }
        if ctx.input(|i| i.key_pressed(egui::Key::ArrowRight)) {
            out.push(AppEvent::NextImage);
        }
        if ctx.input(|i| i.key_pressed(egui::Key::ArrowLeft)) {
            out.push(AppEvent::PrevImage);
        }

        let screen = ctx.screen_rect();
        egui::Area::new(egui::Id::new("lightbox"))
            .order(egui::Order::Foreground)
            .fixed_pos(screen.min)
            .show(ctx, |ui| {
                let resp = ui.allocate_response(screen.size(), egui::Sense::click());
                let painter = ui.painter().clone();
                painter.rect_filled(screen, 0.0, egui::Color32::from_black_alpha(230));

                // Leave room for arrows and the caption.
                let frame = screen.shrink(48.0);
                let mut image_rect = None;
                match self.textures.get(&record.file_hash) {
                    Some(FullImage::Ready(tex)) => {
                        let tex_size = tex.size_vec2();
                        let scale = (frame.width() / tex_size.x).min(frame.height() / tex_size.y);
                        let display = tex_size * scale;
                        let draw_rect = egui::Rect::from_center_size(frame.center(), display);
                        painter.image(
                            tex.id(),
                            draw_rect,
                            egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                            egui::Color32::WHITE,
                        );
                        image_rect = Some(draw_rect);
                    }
                    Some(FullImage::Failed(error)) => {
                        painter.text(
                            frame.center(),
                            egui::Align2::CENTER_CENTER,
                            "⚠ Could not load image",
                            egui::FontId::proportional(16.0),
                            egui::Color32::LIGHT_RED,
                        );
                        painter.text(
                            frame.center() + egui::vec2(0.0, 24.0),
                            egui::Align2::CENTER_CENTER,
                            error,
                            egui::FontId::proportional(12.0),
                            egui::Color32::GRAY,
                        );
                    }
                    Some(FullImage::Loading) | None => {
                        let spinner_rect =
                            egui::Rect::from_center_size(frame.center(), egui::vec2(32.0, 32.0));
                        ui.put(spinner_rect, egui::Spinner::new().size(32.0));
                    }
                }

                // Caption
                let title = format!(
                    "{}  ({} / {})",
                    file_name(&record.file_path),
                    cursor + 1,
                    state.displayed.len()
                );
                painter.text(
                    egui::pos2(screen.center().x, screen.max.y - 34.0),
                    egui::Align2::CENTER_CENTER,
                    title,
                    egui::FontId::proportional(13.0),
                    egui::Color32::WHITE,
                );
                let mut meta = vec![format!("{}×{}", record.width, record.height)];
                if let Some(camera) = camera_label(record) {
                    meta.push(camera);
                }
                if let Some(date) = &record.date_taken {
                    meta.push(date.clone());
                }
                painter.text(
                    egui::pos2(screen.center().x, screen.max.y - 16.0),
                    egui::Align2::CENTER_CENTER,
                    meta.join("    "),
                    egui::FontId::proportional(11.0),
                    egui::Color32::GRAY,
                );

                // Nav arrows and close button
                let prev_rect = egui::Rect::from_center_size(
                    egui::pos2(screen.min.x + 24.0, screen.center().y),
                    egui::vec2(40.0, 80.0),
                );
                let next_rect = egui::Rect::from_center_size(
                    egui::pos2(screen.max.x - 24.0, screen.center().y),
                    egui::vec2(40.0, 80.0),
                );
                let close_rect = egui::Rect::from_center_size(
                    egui::pos2(screen.max.x - 24.0, screen.min.y + 24.0),
                    egui::vec2(32.0, 32.0),
                );
                let prev_resp = ui.interact(prev_rect, resp.id.with("prev"), egui::Sense::click());
                let next_resp = ui.interact(next_rect, resp.id.with("next"), egui::Sense::click());
                let close_resp =
                    ui.interact(close_rect, resp.id.with("close"), egui::Sense::click());

                for (r, glyph, hovered) in [
                    (prev_rect, "‹", prev_resp.hovered()),
                    (next_rect, "›", next_resp.hovered()),
                    (close_rect, "✕", close_resp.hovered()),
                ] {
                    let color = if hovered {
                        egui::Color32::WHITE
                    } else {
                        egui::Color32::from_gray(170)
                    };
                    painter.text(
                        r.center(),
                        egui::Align2::CENTER_CENTER,
                        glyph,
                        egui::FontId::proportional(28.0),
                        color,
                    );
                }

                if prev_resp.clicked() {
                    out.push(AppEvent::PrevImage);
                } else if next_resp.clicked() {
                    out.push(AppEvent::NextImage);
                } else if close_resp.clicked() {
                    out.push(AppEvent::CloseLightbox);
                } else if resp.clicked() {
                    // Clicking the backdrop closes; clicking the image does not.
                    let on_image = resp
                        .interact_pointer_pos()
                        .zip(image_rect)
                        .is_some_and(|(pos, rect)| rect.contains(pos));
                    if !on_image {
                        out.push(AppEvent::CloseLightbox);
                    }
                }
            });

        out
    }
}

impl Default for Lightbox {
    fn default() -> Self {
        Self::new()
    }
}
