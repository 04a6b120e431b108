//! VXLAN Service - create orchestration.
//!
//! Wires the fan-out engine to the renderer port and wraps each create in
//! plan lifecycle tracking:
//! 1. Validate the intent
//! 2. Fan out into the renderer, one call at a time
//! 3. Record the outcome on the plan

use tracing::{debug, info, instrument};

use crate::{
    application::{
        ports::{PlanTracker, TemplateRenderer},
        services::lifecycle::{LifecycleOutcome, with_lifecycle_tracking},
    },
    domain::{
        CallSink, DomainValidator as validator, FabricModel, RenderCall, ServiceIntent,
        ServiceKind,
    },
    error::{VxlanError, VxlanResult},
};

/// Call sink that hands each call to a [`TemplateRenderer`] immediately.
pub struct RendererSink<'a> {
    renderer: &'a dyn TemplateRenderer,
    emitted: usize,
}

impl<'a> RendererSink<'a> {
    pub fn new(renderer: &'a dyn TemplateRenderer) -> Self {
        Self {
            renderer,
            emitted: 0,
        }
    }

    /// Number of calls the renderer accepted.
    pub fn emitted(&self) -> usize {
        self.emitted
    }
}

impl CallSink for RendererSink<'_> {
    type Error = VxlanError;

    fn emit(&mut self, call: RenderCall) -> VxlanResult<()> {
        debug!(template = %call.template, target = %call.context, "Applying template");
        self.renderer
            .render(&call.template, &call.context, &call.bindings)?;
        self.emitted += 1;
        Ok(())
    }
}

/// Summary of a successful create.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateReport {
    pub kind: ServiceKind,
    pub service_id: String,
    pub calls_rendered: usize,
}

/// Create orchestration for both VXLAN variants.
pub struct VxlanService {
    renderer: Box<dyn TemplateRenderer>,
}

impl VxlanService {
    pub fn new(renderer: Box<dyn TemplateRenderer>) -> Self {
        Self { renderer }
    }

    /// Create (or re-create) one service instance.
    ///
    /// Validation errors come back as [`LifecycleOutcome::Failed`]; calls
    /// rendered before the failing entity are not rolled back here.
    #[instrument(skip_all, fields(kind = %kind, service = %intent.service_id()))]
    pub fn create(
        &self,
        kind: ServiceKind,
        intent: &ServiceIntent,
        fabric: &dyn FabricModel,
        tracker: &dyn PlanTracker,
    ) -> VxlanResult<LifecycleOutcome<CreateReport>> {
        with_lifecycle_tracking(intent.service_id(), tracker, || {
            validator::validate_intent(intent)?;

            let mut sink = RendererSink::new(self.renderer.as_ref());
            kind.fan_out(intent, fabric, &mut sink)?;

            info!(calls = sink.emitted(), "Service rendered");
            Ok(CreateReport {
                kind,
                service_id: intent.service_id().to_string(),
                calls_rendered: sink.emitted(),
            })
        })
    }

    /// Compute the call sequence for an intent without rendering anything.
    pub fn plan(
        kind: ServiceKind,
        intent: &ServiceIntent,
        fabric: &dyn FabricModel,
    ) -> VxlanResult<Vec<RenderCall>> {
        validator::validate_intent(intent)?;
        Ok(kind.plan(intent, fabric)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::{
        ApplicationError,
        ports::{MockPlanTracker, MockTemplateRenderer},
    };
    use crate::domain::{
        BorderLeafNode, DataCenter, DomainError, Fabric, GlobalConfig, InterfaceGroup, LeafNode,
        Milestone, TemplateName,
    };
    use mockall::predicate::eq;

    fn fabric() -> Fabric {
        Fabric::new(GlobalConfig::default()).with_data_center(
            DataCenter::new("dc1")
                .with_leaf(LeafNode::new("leaf1", 65001))
                .with_leaf(LeafNode::new("leaf2", 65002))
                .with_border_leaf(
                    BorderLeafNode::new("bl1", 65100)
                        .with_layer2(InterfaceGroup::port_channels(["10"])),
                )
                .with_border_leaf(
                    BorderLeafNode::new("bl2", 65101)
                        .with_layer2(InterfaceGroup::port_channels(["11"])),
                ),
        )
    }

    fn permissive_tracker() -> MockPlanTracker {
        let mut tracker = MockPlanTracker::new();
        tracker.expect_append_state().returning(|_| Ok(()));
        tracker.expect_set_reached().returning(|_| Ok(()));
        tracker.expect_set_failed().returning(|_| Ok(()));
        tracker
    }

    #[test]
    fn create_renders_every_call_and_reports_count() {
        let mut renderer = MockTemplateRenderer::new();
        renderer.expect_render().times(6).returning(|_, _, _| Ok(()));

        let intent = ServiceIntent::builder()
            .service_id("tenant-a")
            .dc_name("dc1")
            .leaf_port("leaf1")
            .leaf_port("leaf2")
            .dci_vlan(300, "DCI-300")
            .build()
            .unwrap();

        let service = VxlanService::new(Box::new(renderer));
        let outcome = service
            .create(ServiceKind::L2, &intent, &fabric(), &permissive_tracker())
            .unwrap();

        let report = outcome.ready().unwrap();
        assert_eq!(report.calls_rendered, 6);
        assert_eq!(report.service_id, "tenant-a");
    }

    #[test]
    fn mismatch_keeps_leaf_calls_and_fails_ready() {
        let mut renderer = MockTemplateRenderer::new();
        renderer
            .expect_render()
            .with(
                eq(TemplateName::from(TemplateName::L2_LEAF_NODE)),
                mockall::predicate::always(),
                mockall::predicate::always(),
            )
            .times(1)
            .returning(|_, _, _| Ok(()));

        let mut tracker = MockPlanTracker::new();
        tracker.expect_append_state().returning(|_| Ok(()));
        tracker.expect_set_reached().with(eq(Milestone::Init)).returning(|_| Ok(()));
        tracker
            .expect_set_failed()
            .with(eq(Milestone::Ready))
            .times(1)
            .returning(|_| Ok(()));

        // three VLANs against two border leaves
        let intent = ServiceIntent::builder()
            .service_id("tenant-a")
            .dc_name("dc1")
            .leaf_port("leaf1")
            .dci_vlan(300, "a")
            .dci_vlan(301, "b")
            .dci_vlan(302, "c")
            .build()
            .unwrap();

        let service = VxlanService::new(Box::new(renderer));
        let outcome = service
            .create(ServiceKind::L2, &intent, &fabric(), &tracker)
            .unwrap();

        assert!(matches!(
            outcome.failure(),
            Some(DomainError::L2VlanCountMismatch { vlans: 3, border_leaves: 2 })
        ));
    }

    #[test]
    fn renderer_failure_aborts_create() {
        let mut renderer = MockTemplateRenderer::new();
        renderer.expect_render().times(1).returning(|t, _, _| {
            Err(ApplicationError::RenderingFailed {
                template: t.to_string(),
                reason: "unbound variable".into(),
            }
            .into())
        });

        let intent = ServiceIntent::builder()
            .service_id("tenant-a")
            .dc_name("dc1")
            .leaf_port("leaf1")
            .build()
            .unwrap();

        let service = VxlanService::new(Box::new(renderer));
        let result = service.create(ServiceKind::L2, &intent, &fabric(), &permissive_tracker());

        assert!(matches!(result, Err(VxlanError::Application(_))));
    }

    #[test]
    fn plan_surfaces_domain_errors() {
        let intent = ServiceIntent::builder()
            .service_id("tenant-a")
            .dc_name("nowhere")
            .build()
            .unwrap();

        let err = VxlanService::plan(ServiceKind::L3, &intent, &fabric()).unwrap_err();
        assert!(err.is_validation());
    }
}
