//! Simple variable substitution renderer.

use tracing::{debug, instrument};

use vxlan_core::{
    application::{
        ApplicationError,
        ports::{ConfigSink, TemplateRenderer, TemplateStore},
    },
    domain::{RenderTarget, TemplateName, VariableBinding, bindings::DEVICE},
    error::VxlanResult,
};

/// Renderer that fills `{{NAME}}` placeholders and hands the text to a
/// [`ConfigSink`].
///
/// Variables come from the render target's context variables, overlaid by
/// the call's bindings. A placeholder with no value fails the call.
pub struct SimpleRenderer {
    store: Box<dyn TemplateStore>,
    sink: Box<dyn ConfigSink>,
}

impl SimpleRenderer {
    pub fn new(store: Box<dyn TemplateStore>, sink: Box<dyn ConfigSink>) -> Self {
        Self { store, sink }
    }
}

impl TemplateRenderer for SimpleRenderer {
    #[instrument(skip_all, fields(template = %template, target = %context))]
    fn render(
        &self,
        template: &TemplateName,
        context: &RenderTarget,
        bindings: &VariableBinding,
    ) -> VxlanResult<()> {
        let source = self.store.get(template)?;
        let vars = context.context_variables().overlay(bindings);

        let text = substitute(&source, &vars).map_err(|reason| ApplicationError::RenderingFailed {
            template: template.to_string(),
            reason,
        })?;

        let device = vars
            .get(DEVICE)
            .or_else(|| context.device())
            .ok_or_else(|| ApplicationError::RenderingFailed {
                template: template.to_string(),
                reason: format!("no target device for {context}"),
            })?;

        debug!(device, bytes = text.len(), "Template rendered");
        self.sink.apply(device, template, &text)
    }
}

/// Replace every `{{NAME}}` in `source` with its value from `vars`.
///
/// Whitespace inside the braces is ignored. Errors name the first unbound
/// placeholder or report an unterminated one.
pub fn substitute(source: &str, vars: &VariableBinding) -> Result<String, String> {
    let mut out = String::with_capacity(source.len());
    let mut rest = source;

    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let end = after
            .find("}}")
            .ok_or_else(|| "unterminated placeholder".to_string())?;

        let name = after[..end].trim();
        let value = vars
            .get(name)
            .ok_or_else(|| format!("unbound variable '{name}'"))?;
        out.push_str(value);

        rest = &after[end + 2..];
    }

    out.push_str(rest);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config_sink::MemoryConfigSink, template_store::InMemoryStore};
    use vxlan_core::domain::{LeafPort, Port, PortKind};
    use vxlan_core::error::VxlanError;

    #[test]
    fn substitute_replaces_all_placeholders() {
        let vars = VariableBinding::new()
            .with("DEVICE-ASN", 65001)
            .with("NODE_NAME", "leaf1");
        assert_eq!(
            substitute("{{NODE_NAME}} asn {{ DEVICE-ASN }}!", &vars).unwrap(),
            "leaf1 asn 65001!"
        );
    }

    #[test]
    fn substitute_allows_empty_values() {
        let vars = VariableBinding::new().with("PREFIX-TAG", "");
        assert_eq!(substitute("tag [{{PREFIX-TAG}}]", &vars).unwrap(), "tag []");
    }

    #[test]
    fn substitute_reports_unbound_and_unterminated() {
        let vars = VariableBinding::new();
        assert_eq!(
            substitute("x {{DCI_VLAN}}", &vars).unwrap_err(),
            "unbound variable 'DCI_VLAN'"
        );
        assert_eq!(
            substitute("x {{DCI_VLAN", &vars).unwrap_err(),
            "unterminated placeholder"
        );
    }

    #[test]
    fn render_applies_to_context_device() {
        let store = InMemoryStore::with_builtin().unwrap();
        let sink = MemoryConfigSink::new();
        let renderer = SimpleRenderer::new(Box::new(store), Box::new(sink.clone()));

        renderer
            .render(
                &TemplateName::L2_LEAF_NODE.into(),
                &RenderTarget::LeafPort(LeafPort::new("leaf1")),
                &VariableBinding::new().with("NVE_SOURCE", "loopback1"),
            )
            .unwrap();

        let config = sink.config_for("leaf1").unwrap().unwrap();
        assert!(config.contains("L2 VXLAN leaf leaf1"));
        assert!(config.contains("source-interface loopback1"));
    }

    #[test]
    fn dci_port_call_renders_interface_name() {
        let store = InMemoryStore::with_builtin().unwrap();
        let sink = MemoryConfigSink::new();
        let renderer = SimpleRenderer::new(Box::new(store), Box::new(sink.clone()));

        renderer
            .render(
                &TemplateName::BORDER_LEAF_NODE_VLANS.into(),
                &RenderTarget::DciPort {
                    device: "bl1".into(),
                    port: Port::new("10", PortKind::PortChannel),
                },
                &VariableBinding::new()
                    .with("DEVICE", "bl1")
                    .with("DCI_PORT", "10")
                    .with("DCI_VLAN", 300),
            )
            .unwrap();

        let config = sink.config_for("bl1").unwrap().unwrap();
        assert!(config.contains("interface Port-channel10"));
        assert!(config.contains("allowed vlan add 300"));
    }

    #[test]
    fn unbound_variable_fails_without_applying() {
        let store = InMemoryStore::with_builtin().unwrap();
        let sink = MemoryConfigSink::new();
        let renderer = SimpleRenderer::new(Box::new(store), Box::new(sink.clone()));

        let err = renderer
            .render(
                &TemplateName::L2_LEAF_NODE.into(),
                &RenderTarget::LeafPort(LeafPort::new("leaf1")),
                &VariableBinding::new(),
            )
            .unwrap_err();

        assert!(matches!(
            err,
            VxlanError::Application(ApplicationError::RenderingFailed { .. })
        ));
        assert!(sink.config_for("leaf1").unwrap().is_none());
    }
}
