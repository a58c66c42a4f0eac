use std::sync::Arc;
use std::sync::mpsc::Sender;
use std::thread;

use anyhow::Context;

use crate::api::{delete_error_text, ApiClient, ImageRecord};
use crate::state::Effect;

/// Outcome of one background call, sent back to the UI thread.
#[derive(Debug)]
pub enum NetEvent {
    Catalog {
        generation: u64,
        result: Result<Vec<ImageRecord>, String>,
    },
    FullImage {
        hash: String,
        result: Result<DecodedImage, String>,
    },
    Delete {
        result: Result<String, String>,
    },
    Status {
        result: Result<u64, String>,
    },
}

/// RGBA pixels decoded off the UI thread, ready for texture upload.
#[derive(Debug)]
pub struct DecodedImage {
    pub size: [usize; 2],
    pub rgba: Vec<u8>,
}

/// Decode downloaded bytes into RGBA pixels.
pub fn decode_image(bytes: &[u8]) -> anyhow::Result<DecodedImage> {
    let decoded = image::load_from_memory(bytes).context("decoding image bytes")?;
    let rgba = decoded.to_rgba8();
    let size = [rgba.width() as usize, rgba.height() as usize];
    Ok(DecodedImage {
        size,
        rgba: rgba.into_raw(),
    })
}

/// Turns reducer effects into detached worker threads. Results come back
/// on the channel given at construction; each worker pokes the UI thread
/// awake when it finishes.
pub struct Dispatcher {
    client: Arc<ApiClient>,
    tx: Sender<NetEvent>,
    catalog_generation: u64,
}

impl Dispatcher {
    pub fn new(client: Arc<ApiClient>, tx: Sender<NetEvent>) -> Self {
        Self {
            client,
            tx,
            catalog_generation: 0,
        }
    }

    fn begin_catalog_fetch(&mut self) -> u64 {
        self.catalog_generation += 1;
        self.catalog_generation
    }

    /// Whether a catalog response with this tag is still current. A
    /// response tagged older than the latest issued fetch was overtaken
    /// and must be dropped.
    pub fn accepts_catalog(&self, generation: u64) -> bool {
        generation == self.catalog_generation
    }

    pub fn run(&mut self, effect: Effect, ctx: &egui::Context) {
        match effect {
            Effect::FetchCatalog => {
                let generation = self.begin_catalog_fetch();
                let client = Arc::clone(&self.client);
                let tx = self.tx.clone();
                let ctx = ctx.clone();
                thread::spawn(move || {
                    let result = client.list_images().map_err(|e| format!("{e:#}"));
                    let _ = tx.send(NetEvent::Catalog { generation, result });
                    ctx.request_repaint();
                });
            }
            Effect::FetchFullImage { hash } => {
                let client = Arc::clone(&self.client);
                let tx = self.tx.clone();
                let ctx = ctx.clone();
                thread::spawn(move || {
                    let result = client
                        .fetch_full_image(&hash)
                        .and_then(|bytes| decode_image(&bytes))
                        .map_err(|e| format!("{e:#}"));
                    let _ = tx.send(NetEvent::FullImage { hash, result });
                    ctx.request_repaint();
                });
            }
            Effect::DeleteDuplicates { hash, mode } => {
                let client = Arc::clone(&self.client);
                let tx = self.tx.clone();
                let ctx = ctx.clone();
                thread::spawn(move || {
                    let result = match client.delete_duplicates(&hash, mode) {
                        Ok(report) => Ok(report.message),
                        Err(err) => Err(delete_error_text(&err)),
                    };
                    let _ = tx.send(NetEvent::Delete { result });
                    ctx.request_repaint();
                });
            }
            Effect::FetchStatus => {
                let client = Arc::clone(&self.client);
                let tx = self.tx.clone();
                let ctx = ctx.clone();
                thread::spawn(move || {
                    let result = client
                        .status()
                        .map(|s| s.total_images)
                        .map_err(|e| format!("{e:#}"));
                    let _ = tx.send(NetEvent::Status { result });
                    ctx.request_repaint();
                });
            }
        }
    }
}
