//! Intent and fabric document loading.
//!
//! Documents are JSON or TOML, picked by file extension. Anything that is not
//! `.toml` is read as JSON.

use std::{fs, path::Path};

use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use vxlan_core::{
    application::ApplicationError,
    domain::{Fabric, ServiceIntent},
    error::VxlanResult,
};

/// Document encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Toml,
}

impl DocumentFormat {
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => Self::Toml,
            _ => Self::Json,
        }
    }

    /// Parse `text` in this format.
    pub fn parse<T: DeserializeOwned>(self, text: &str) -> Result<T, String> {
        match self {
            Self::Json => serde_json::from_str(text).map_err(|e| e.to_string()),
            Self::Toml => toml::from_str(text).map_err(|e| e.to_string()),
        }
    }
}

/// Read and deserialize a document.
#[instrument(skip_all, fields(path = %path.display()))]
pub fn load_document<T: DeserializeOwned>(path: &Path) -> VxlanResult<T> {
    let format = DocumentFormat::from_path(path);
    debug!(?format, "Loading document");

    let text = fs::read_to_string(path).map_err(|e| ApplicationError::DocumentLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    Ok(format
        .parse(&text)
        .map_err(|reason| ApplicationError::DocumentLoad {
            path: path.to_path_buf(),
            reason,
        })?)
}

pub fn load_intent(path: &Path) -> VxlanResult<ServiceIntent> {
    load_document(path)
}

pub fn load_fabric(path: &Path) -> VxlanResult<Fabric> {
    load_document(path)
}
