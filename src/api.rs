use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// One indexed image as returned by `GET /api/images`.
///
/// `file_hash` is unique within a catalog snapshot; other files with the
/// same content are listed in `duplicate_paths`, not as separate records.
/// Optional fields may be missing from the JSON entirely; the backend also
/// sends fields this client does not use (serde skips unknown keys).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageRecord {
    pub file_path: String,
    pub file_hash: String,
    pub width: u32,
    pub height: u32,
    pub camera_make: Option<String>,
    pub camera_model: Option<String>,
    pub date_taken: Option<String>,
    pub gps_latitude: Option<f64>,
    pub gps_longitude: Option<f64>,
    #[serde(default)]
    pub duplicate_paths: Vec<String>,
}

impl ImageRecord {
    /// Total physical copies: the representative plus its duplicates.
    pub fn total_copies(&self) -> usize {
        self.duplicate_paths.len() + 1
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DeleteMode {
    #[serde(rename = "keep-one")]
    KeepOne,
    #[serde(rename = "all")]
    All,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IndexStatus {
    pub total_images: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DeleteReport {
    pub message: String,
}

#[derive(Debug, Serialize)]
struct DeleteRequest {
    mode: DeleteMode,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

/// Error text the backend attached to a rejected mutation. Kept as a
/// distinct type so callers can tell server-reported text apart from
/// transport failures when building the user-facing message.
#[derive(Debug)]
pub struct ServerRejection(pub String);

impl std::fmt::Display for ServerRejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for ServerRejection {}

pub const GENERIC_DELETE_ERROR: &str = "delete request failed";

/// User-facing text for a failed delete: the server's own words when it
/// sent any, otherwise the generic fallback.
pub fn delete_error_text(err: &anyhow::Error) -> String {
    match err.downcast_ref::<ServerRejection>() {
        Some(rejection) => rejection.0.clone(),
        None => GENERIC_DELETE_ERROR.to_string(),
    }
}

pub struct ApiClient {
    base_url: String,
    client: reqwest::blocking::Client,
}

impl ApiClient {
    /// `base_url` must not end in a slash; `timeout` of `None` means
    /// requests never time out.
    pub fn new(base_url: String, timeout: Option<Duration>) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent("gallerist")
            .timeout(timeout)
            .build()
            .context("build http client")?;
        Ok(Self { base_url, client })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Fetch the full image catalog. The backend's optional `?q=` search
    /// parameter is deliberately unused: filtering is client-side.
    pub fn list_images(&self) -> Result<Vec<ImageRecord>> {
        let resp = self
            .client
            .get(self.url("/api/images"))
            .send()
            .context("list images request")?;
        let records: Vec<ImageRecord> = resp
            .error_for_status()
            .context("list images status")?
            .json()
            .context("parse image catalog")?;
        Ok(records)
    }

    pub fn fetch_thumbnail(&self, hash: &str) -> Result<Vec<u8>> {
        let resp = self
            .client
            .get(self.url(&format!("/api/thumbnails/{}", hash)))
            .send()
            .context("thumbnail request")?;
        let bytes = resp
            .error_for_status()
            .context("thumbnail status")?
            .bytes()
            .context("read thumbnail body")?;
        Ok(bytes.to_vec())
    }

    pub fn fetch_full_image(&self, hash: &str) -> Result<Vec<u8>> {
        let resp = self
            .client
            .get(self.url(&format!("/api/images/{}", hash)))
            .send()
            .context("full image request")?;
        let bytes = resp
            .error_for_status()
            .context("full image status")?
            .bytes()
            .context("read full image body")?;
        Ok(bytes.to_vec())
    }

    pub fn status(&self) -> Result<IndexStatus> {
        let resp = self
            .client
            .get(self.url("/api/status"))
            .send()
            .context("status request")?;
        let status: IndexStatus = resp
            .error_for_status()
            .context("status response")?
            .json()
            .context("parse status")?;
        Ok(status)
    }

    /// Irreversibly delete duplicate copies of `hash` on the backend.
    /// On a rejected request the server's error body is surfaced as a
    /// [`ServerRejection`] so the UI can show it verbatim.
    pub fn delete_duplicates(&self, hash: &str, mode: DeleteMode) -> Result<DeleteReport> {
        let resp = self
            .client
            .delete(self.url(&format!("/api/images/{}/duplicates", hash)))
            .json(&DeleteRequest { mode })
            .send()
            .context("delete duplicates request")?;

        let status = resp.status();
        if !status.is_success() {
            if let Ok(body) = resp.json::<ErrorBody>() {
                return Err(anyhow::Error::new(ServerRejection(body.error)));
            }
            anyhow::bail!("delete duplicates returned {}", status);
        }

        let report: DeleteReport = resp.json().context("parse delete response")?;
        Ok(report)
    }
}
