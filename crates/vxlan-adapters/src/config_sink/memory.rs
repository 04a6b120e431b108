//! In-memory config sink for testing and previews.

use std::{
    collections::BTreeMap,
    sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use vxlan_core::{
    application::{ApplicationError, ports::ConfigSink},
    domain::TemplateName,
    error::VxlanResult,
};

/// One applied fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedConfig {
    pub device: String,
    pub template: TemplateName,
    pub text: String,
}

/// In-memory config sink. Clones share state.
#[derive(Debug, Clone, Default)]
pub struct MemoryConfigSink {
    inner: Arc<RwLock<Vec<AppliedConfig>>>,
}

impl MemoryConfigSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every fragment, in apply order.
    pub fn applied(&self) -> VxlanResult<Vec<AppliedConfig>> {
        Ok(self.read()?.clone())
    }

    /// Concatenated configuration for one device.
    pub fn config_for(&self, device: &str) -> VxlanResult<Option<String>> {
        let inner = self.read()?;
        let fragments: Vec<&str> = inner
            .iter()
            .filter(|a| a.device == device)
            .map(|a| a.text.as_str())
            .collect();
        Ok((!fragments.is_empty()).then(|| fragments.concat()))
    }

    /// Configuration grouped per device, devices sorted.
    pub fn by_device(&self) -> VxlanResult<BTreeMap<String, String>> {
        let mut devices = BTreeMap::new();
        for applied in self.read()?.iter() {
            devices
                .entry(applied.device.clone())
                .or_insert_with(String::new)
                .push_str(&applied.text);
        }
        Ok(devices)
    }

    pub fn clear(&self) -> VxlanResult<()> {
        self.write()?.clear();
        Ok(())
    }

    fn read(&self) -> VxlanResult<RwLockReadGuard<'_, Vec<AppliedConfig>>> {
        Ok(self
            .inner
            .read()
            .map_err(|_| ApplicationError::LockPoisoned { resource: "config sink" })?)
    }

    fn write(&self) -> VxlanResult<RwLockWriteGuard<'_, Vec<AppliedConfig>>> {
        Ok(self
            .inner
            .write()
            .map_err(|_| ApplicationError::LockPoisoned { resource: "config sink" })?)
    }
}

impl ConfigSink for MemoryConfigSink {
    fn apply(&self, device: &str, template: &TemplateName, config: &str) -> VxlanResult<()> {
        self.write()?.push(AppliedConfig {
            device: device.to_string(),
            template: template.clone(),
            text: config.to_string(),
        });
        Ok(())
    }
}
