//! Filesystem-based template store.
//!
//! Loads every `*.tmpl` file under a directory tree. The template name is the
//! file stem, so `templates/l2/l2_leaf_node.tmpl` serves `l2_leaf_node`.
//!
//! # Directory layout expected
//!
//! ```text
//! templates/
//! ├── l2_leaf_node.tmpl
//! ├── l2_border_leaf_node.tmpl
//! ├── l3/
//! │   ├── l3_leaf_node.tmpl
//! │   └── l3_border_leaf_node.tmpl
//! └── border_leaf_node_vlans.tmpl
//! ```
//!
//! Templates are read once at load time. With `with_builtin_fallback`, names
//! not found on disk are served from the built-in set.

use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use tracing::{debug, instrument, warn};
use walkdir::WalkDir;

use vxlan_core::{
    application::{ApplicationError, ports::TemplateStore},
    domain::TemplateName,
    error::VxlanResult,
};

use crate::builtin_templates;

const TEMPLATE_EXTENSION: &str = "tmpl";

/// Template store backed by a directory of `*.tmpl` files.
pub struct DirectoryStore {
    root: PathBuf,
    templates: BTreeMap<TemplateName, String>,
}

impl DirectoryStore {
    /// Load every template under `root`.
    ///
    /// # Errors
    ///
    /// Returns [`ApplicationError::DocumentLoad`] if `root` does not exist or
    /// a template file cannot be read. Files with other extensions are
    /// ignored.
    #[instrument(skip_all, fields(root = %root.as_ref().display()))]
    pub fn load(root: impl AsRef<Path>) -> VxlanResult<Self> {
        let root = root.as_ref().to_path_buf();
        if !root.is_dir() {
            return Err(ApplicationError::DocumentLoad {
                path: root,
                reason: "templates directory not found".into(),
            }
            .into());
        }

        let mut templates = BTreeMap::new();

        for walk_entry in WalkDir::new(&root).min_depth(1).sort_by_file_name() {
            let walk_entry = walk_entry.map_err(|e| ApplicationError::DocumentLoad {
                path: root.clone(),
                reason: format!("directory walk error: {e}"),
            })?;
            let path = walk_entry.path();

            if !walk_entry.file_type().is_file()
                || path.extension().and_then(|e| e.to_str()) != Some(TEMPLATE_EXTENSION)
            {
                continue;
            }

            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                warn!(path = %path.display(), "skipping template with non UTF-8 name");
                continue;
            };

            let text = fs::read_to_string(path).map_err(|e| ApplicationError::DocumentLoad {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;

            if templates.insert(TemplateName::new(stem), text).is_some() {
                warn!(name = stem, path = %path.display(), "duplicate template name, last one wins");
            }
            debug!(name = stem, "loaded template");
        }

        debug!(count = templates.len(), "finished loading templates");
        Ok(Self { root, templates })
    }

    /// Serve built-in templates for names missing on disk.
    pub fn with_builtin_fallback(mut self) -> Self {
        for (name, text) in builtin_templates::all_templates() {
            self.templates.entry(name).or_insert_with(|| text.to_string());
        }
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

impl TemplateStore for DirectoryStore {
    fn get(&self, name: &TemplateName) -> VxlanResult<String> {
        self.templates.get(name).cloned().ok_or_else(|| {
            ApplicationError::TemplateNotFound {
                name: name.to_string(),
            }
            .into()
        })
    }

    fn list(&self) -> VxlanResult<Vec<TemplateName>> {
        Ok(self.templates.keys().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use vxlan_core::error::VxlanError;

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    #[test]
    fn missing_directory_is_an_error() {
        let temp = TempDir::new().unwrap();
        let result = DirectoryStore::load(temp.path().join("absent"));
        assert!(matches!(
            result,
            Err(VxlanError::Application(ApplicationError::DocumentLoad { .. }))
        ));
    }

    #[test]
    fn loads_nested_tmpl_files_by_stem() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "l2_leaf_node.tmpl", "leaf {{NODE_NAME}}");
        write(temp.path(), "l3/l3_leaf_node.tmpl", "asn {{DEVICE-ASN}}");
        write(temp.path(), "README.md", "not a template");

        let store = DirectoryStore::load(temp.path()).unwrap();

        assert_eq!(
            store.list().unwrap(),
            vec![
                TemplateName::from(TemplateName::L2_LEAF_NODE),
                TemplateName::from(TemplateName::L3_LEAF_NODE),
            ]
        );
        assert_eq!(
            store.get(&TemplateName::L3_LEAF_NODE.into()).unwrap(),
            "asn {{DEVICE-ASN}}"
        );
    }

    #[test]
    fn builtin_fallback_fills_gaps_without_overriding_disk() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "l2_leaf_node.tmpl", "custom");

        let store = DirectoryStore::load(temp.path())
            .unwrap()
            .with_builtin_fallback();

        assert_eq!(store.len(), TemplateName::ALL.len());
        assert_eq!(store.get(&TemplateName::L2_LEAF_NODE.into()).unwrap(), "custom");
        assert_eq!(
            store
                .get(&TemplateName::BORDER_LEAF_NODE_VLANS.into())
                .unwrap(),
            builtin_templates::BORDER_LEAF_NODE_VLANS
        );
    }
}
