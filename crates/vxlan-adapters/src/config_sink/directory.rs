//! Directory config sink: one `<device>.cfg` file per device.

use std::{
    collections::HashSet,
    fs::{self, OpenOptions},
    io::{self, Write},
    path::{Path, PathBuf},
    sync::{Arc, Mutex, MutexGuard},
};

use tracing::debug;
use walkdir::WalkDir;

use vxlan_core::{
    application::{ApplicationError, ports::ConfigSink},
    domain::TemplateName,
    error::{VxlanError, VxlanResult},
};

const CONFIG_EXTENSION: &str = "cfg";

/// Writes rendered fragments to `<root>/<device>.cfg`.
///
/// The first fragment for a device in this sink's lifetime truncates its
/// file; later fragments append. Re-running a create with a fresh sink
/// therefore rewrites the files instead of duplicating them. Clones share
/// that state.
#[derive(Debug, Clone)]
pub struct DirectoryConfigSink {
    root: PathBuf,
    touched: Arc<Mutex<HashSet<String>>>,
}

impl DirectoryConfigSink {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            touched: Arc::new(Mutex::new(HashSet::new())),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the file a device's configuration is written to.
    pub fn path_for(&self, device: &str) -> PathBuf {
        self.root.join(format!("{device}.{CONFIG_EXTENSION}"))
    }

    /// Devices written so far, sorted.
    pub fn devices(&self) -> VxlanResult<Vec<String>> {
        let mut devices: Vec<String> = self.touched()?.iter().cloned().collect();
        devices.sort();
        Ok(devices)
    }

    /// Delete `<device>.cfg` files in the root for devices this sink has not
    /// written, so the directory holds exactly the last render. Other files
    /// and subdirectories are left alone. Returns the removed paths, sorted.
    pub fn prune_stale(&self) -> VxlanResult<Vec<PathBuf>> {
        if !self.root.is_dir() {
            return Ok(Vec::new());
        }
        let touched = self.touched()?.clone();

        let mut removed = Vec::new();
        for entry in WalkDir::new(&self.root)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
        {
            let entry = entry.map_err(|e| ApplicationError::ApplyFailed {
                device: String::new(),
                reason: format!("cannot list {}: {e}", self.root.display()),
            })?;
            let path = entry.path();
            if !entry.file_type().is_file()
                || path.extension().and_then(|e| e.to_str()) != Some(CONFIG_EXTENSION)
            {
                continue;
            }
            let Some(device) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            if touched.contains(device) {
                continue;
            }

            fs::remove_file(path).map_err(|e| map_io_error(device, e, "remove stale config file"))?;
            debug!(device, path = %path.display(), "Stale configuration removed");
            removed.push(path.to_path_buf());
        }
        Ok(removed)
    }

    fn touched(&self) -> VxlanResult<MutexGuard<'_, HashSet<String>>> {
        Ok(self
            .touched
            .lock()
            .map_err(|_| ApplicationError::LockPoisoned { resource: "config sink" })?)
    }
}

impl ConfigSink for DirectoryConfigSink {
    fn apply(&self, device: &str, template: &TemplateName, config: &str) -> VxlanResult<()> {
        if device.is_empty() || device.contains(['/', '\\']) || device == ".." {
            return Err(ApplicationError::ApplyFailed {
                device: device.to_string(),
                reason: "device name is not a valid file name".into(),
            }
            .into());
        }

        fs::create_dir_all(&self.root).map_err(|e| map_io_error(device, e, "create directory"))?;

        let first = self.touched()?.insert(device.to_string());

        let path = self.path_for(device);
        let mut file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(first)
            .append(!first)
            .open(&path)
            .map_err(|e| map_io_error(device, e, "open config file"))?;

        file.write_all(config.as_bytes())
            .map_err(|e| map_io_error(device, e, "write config file"))?;

        debug!(device, template = %template, path = %path.display(), "Configuration written");
        Ok(())
    }
}

fn map_io_error(device: &str, e: io::Error, operation: &str) -> VxlanError {
    ApplicationError::ApplyFailed {
        device: device.to_string(),
        reason: format!("Failed to {}: {}", operation, e),
    }
    .into()
}
