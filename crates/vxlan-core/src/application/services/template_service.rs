//! Template Service - template inventory queries.
//!
//! Separated from VxlanService: the engine only names templates, it never
//! reads them.

use crate::{
    application::{ApplicationError, ports::TemplateStore},
    domain::TemplateName,
    error::VxlanResult,
};

/// Information about a template for display purposes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateInfo {
    pub name: String,
    /// Referenced by one of the fan-out variants.
    pub required: bool,
    pub lines: usize,
}

/// Service for template operations.
pub struct TemplateService {
    store: Box<dyn TemplateStore>,
}

impl TemplateService {
    pub fn new(store: Box<dyn TemplateStore>) -> Self {
        Self { store }
    }

    /// Get a template's text by name.
    pub fn get(&self, name: &TemplateName) -> VxlanResult<String> {
        self.store.get(name)
    }

    /// List all templates with display metadata.
    pub fn list(&self) -> VxlanResult<Vec<TemplateInfo>> {
        self.store
            .list()?
            .into_iter()
            .map(|name| {
                let text = self.store.get(&name)?;
                Ok(TemplateInfo {
                    required: TemplateName::ALL.contains(&name.as_str()),
                    lines: text.lines().count(),
                    name: name.to_string(),
                })
            })
            .collect()
    }

    /// Fail on the first template the engine references but the store lacks.
    pub fn verify_required(&self) -> VxlanResult<()> {
        let available = self.store.list()?;
        match TemplateName::ALL
            .iter()
            .find(|required| !available.iter().any(|n| n.as_str() == **required))
        {
            Some(missing) => Err(ApplicationError::TemplateNotFound {
                name: missing.to_string(),
            }
            .into()),
            None => Ok(()),
        }
    }
}
