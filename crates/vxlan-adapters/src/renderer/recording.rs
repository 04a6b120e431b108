//! Renderer that records calls instead of rendering them.

use std::sync::{Arc, RwLock};

use vxlan_core::{
    application::{ApplicationError, ports::TemplateRenderer},
    domain::{RenderCall, RenderTarget, TemplateName, VariableBinding},
    error::VxlanResult,
};

/// Records every call it receives, in order. Used for dry runs.
#[derive(Debug, Clone, Default)]
pub struct RecordingRenderer {
    calls: Arc<RwLock<Vec<RenderCall>>>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the recorded calls.
    pub fn calls(&self) -> VxlanResult<Vec<RenderCall>> {
        let calls = self
            .calls
            .read()
            .map_err(|_| ApplicationError::LockPoisoned { resource: "recorded calls" })?;
        Ok(calls.clone())
    }
}

impl TemplateRenderer for RecordingRenderer {
    fn render(
        &self,
        template: &TemplateName,
        context: &RenderTarget,
        bindings: &VariableBinding,
    ) -> VxlanResult<()> {
        let mut calls = self
            .calls
            .write()
            .map_err(|_| ApplicationError::LockPoisoned { resource: "recorded calls" })?;
        calls.push(RenderCall::new(
            template.clone(),
            context.clone(),
            bindings.clone(),
        ));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vxlan_core::{domain::LeafPort, error::VxlanError};

    #[test]
    fn clones_share_recorded_calls() {
        let renderer = RecordingRenderer::new();
        let handle = renderer.clone();

        renderer
            .render(
                &TemplateName::L3_LEAF_NODE.into(),
                &RenderTarget::LeafPort(LeafPort::new("leaf1")),
                &VariableBinding::new().with("DEVICE-ASN", 65001),
            )
            .unwrap();

        let calls = handle.calls().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].device(), Some("leaf1"));
    }

    #[test]
    fn poisoned_recording_is_an_error() {
        let renderer = RecordingRenderer::new();
        let shared = Arc::clone(&renderer.calls);
        let _ = std::thread::spawn(move || {
            let _guard = shared.write().unwrap();
            panic!("writer died holding the lock");
        })
        .join();

        assert!(matches!(
            renderer.calls(),
            Err(VxlanError::Application(ApplicationError::LockPoisoned { .. }))
        ));
    }
}
