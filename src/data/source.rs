//! Loaders for the web layer's data: materials and showcased projects.
//!
//! Two backends share one trait:
//!
//! - `FileSource` reads `materials.json` / `projects.json` from a data directory
//! - `HttpSource` calls the site's JSON API (`/api/materials`, `/api/projects`)
//!
//! A missing file or an unreachable endpoint degrades to an empty list (with a
//! warning), matching how the site itself treats absent data. Malformed JSON is
//! an error.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use reqwest::blocking::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::domain::{HistoricalProject, MaterialRecord};
use crate::error::AppError;

pub const MATERIALS_FILE: &str = "materials.json";
pub const PROJECTS_FILE: &str = "projects.json";

/// Read access to the external collaborator's data.
pub trait DataSource {
    fn materials(&self) -> Result<Vec<MaterialRecord>, AppError>;
    fn historical_projects(&self) -> Result<Vec<HistoricalProject>, AppError>;
}

/// JSON files in a directory.
#[derive(Debug, Clone)]
pub struct FileSource {
    dir: PathBuf,
}

impl FileSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn load<T: DeserializeOwned>(&self, file_name: &str) -> Result<Vec<T>, AppError> {
        let path = self.dir.join(file_name);
        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                warn!(path = %path.display(), "data file not found; using empty list");
                return Ok(Vec::new());
            }
            Err(e) => {
                return Err(AppError::data(format!(
                    "Failed to read '{}': {e}",
                    path.display()
                )));
            }
        };

        let items: Vec<T> = serde_json::from_str(&text)
            .map_err(|e| AppError::data(format!("Invalid JSON in '{}': {e}", path.display())))?;
        info!(path = %path.display(), count = items.len(), "loaded data file");
        Ok(items)
    }
}

impl DataSource for FileSource {
    fn materials(&self) -> Result<Vec<MaterialRecord>, AppError> {
        self.load(MATERIALS_FILE)
    }

    fn historical_projects(&self) -> Result<Vec<HistoricalProject>, AppError> {
        self.load(PROJECTS_FILE)
    }
}

/// Response wrapper used by every `/api/*` endpoint of the site.
///
/// The CLI's `--json` mode prints the same shape.
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiEnvelope<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn err(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }

    /// Unwrap the payload; a failed or empty envelope is an error.
    pub fn into_data(self, endpoint: &str) -> Result<T, AppError> {
        if !self.success {
            let reason = self.error.unwrap_or_else(|| "unknown error".to_string());
            return Err(AppError::data(format!("{endpoint} failed: {reason}")));
        }
        self.data
            .ok_or_else(|| AppError::data(format!("{endpoint} returned no data.")))
    }
}

/// The site's JSON API.
pub struct HttpSource {
    client: Client,
    base_url: String,
}

impl HttpSource {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    /// Use a preconfigured client (timeouts, proxies).
    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn fetch<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>, AppError> {
        let url = format!("{}{}", self.base_url, path);
        let resp = match self.client.get(&url).send() {
            Ok(resp) => resp,
            Err(e) => {
                warn!(%url, error = %e, "request failed; using empty list");
                return Ok(Vec::new());
            }
        };

        if !resp.status().is_success() {
            warn!(%url, status = %resp.status(), "non-success response; using empty list");
            return Ok(Vec::new());
        }

        let envelope: ApiEnvelope<Vec<T>> = resp
            .json()
            .map_err(|e| AppError::data(format!("Invalid JSON from {url}: {e}")))?;
        let items = envelope.into_data(path)?;
        info!(%url, count = items.len(), "fetched data");
        Ok(items)
    }
}

impl DataSource for HttpSource {
    fn materials(&self) -> Result<Vec<MaterialRecord>, AppError> {
        self.fetch("/api/materials")
    }

    fn historical_projects(&self) -> Result<Vec<HistoricalProject>, AppError> {
        self.fetch("/api/projects")
    }
}

/// Pick the HTTP source when an API URL is configured, else the data directory.
pub fn source_from_settings(data_dir: &Path, api_url: Option<&str>) -> Box<dyn DataSource> {
    match api_url.map(str::trim).filter(|u| !u.is_empty()) {
        Some(url) => Box::new(HttpSource::new(url)),
        None => Box::new(FileSource::new(data_dir)),
    }
}
