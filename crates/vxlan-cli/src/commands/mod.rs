//! Command handlers, one module per subcommand.

use std::path::Path;

use tracing::debug;

use vxlan_adapters::{DirectoryStore, InMemoryStore};
use vxlan_core::application::ports::TemplateStore;

use crate::error::CliResult;

pub mod completions;
pub mod config;
pub mod init;
pub mod render;
pub mod templates;

/// Template store for `dir`, or the built-in set when no directory is given.
///
/// A directory store falls back to the built-ins for names it lacks.
pub(crate) fn open_template_store(dir: Option<&Path>) -> CliResult<Box<dyn TemplateStore>> {
    match dir {
        Some(dir) => {
            debug!(dir = %dir.display(), "Loading templates from directory");
            Ok(Box::new(DirectoryStore::load(dir)?.with_builtin_fallback()))
        }
        None => {
            debug!("Using built-in templates");
            Ok(Box::new(InMemoryStore::with_builtin()?))
        }
    }
}
