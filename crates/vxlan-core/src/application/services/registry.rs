//! Service point registry: application setup, dispatch and teardown.

use std::collections::BTreeMap;

use tracing::{debug, info};

use crate::{
    application::{
        ApplicationError,
        ports::{PlanTracker, TemplateRenderer},
        services::{
            lifecycle::LifecycleOutcome,
            vxlan_service::{CreateReport, VxlanService},
        },
    },
    domain::{FabricModel, ServiceIntent, ServiceKind},
    error::VxlanResult,
};

/// The running application: both VXLAN variants bound to their service points.
pub struct VxlanApplication {
    service: VxlanService,
    service_points: BTreeMap<&'static str, ServiceKind>,
}

impl VxlanApplication {
    /// Register every variant under its service point.
    pub fn setup(renderer: Box<dyn TemplateRenderer>) -> Self {
        info!("VXLAN Service RUNNING");

        let service_points = ServiceKind::ALL
            .into_iter()
            .map(|kind| {
                debug!(service_point = kind.service_point(), "Registered service");
                (kind.service_point(), kind)
            })
            .collect();

        Self {
            service: VxlanService::new(renderer),
            service_points,
        }
    }

    pub fn service_points(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.service_points.keys().copied()
    }

    /// Resolve a service point name to its variant.
    pub fn lookup(&self, service_point: &str) -> VxlanResult<ServiceKind> {
        self.service_points
            .get(service_point)
            .copied()
            .ok_or_else(|| {
                ApplicationError::UnknownServicePoint {
                    name: service_point.to_string(),
                }
                .into()
            })
    }

    /// Create a service instance through its service point.
    pub fn dispatch(
        &self,
        service_point: &str,
        intent: &ServiceIntent,
        fabric: &dyn FabricModel,
        tracker: &dyn PlanTracker,
    ) -> VxlanResult<LifecycleOutcome<CreateReport>> {
        let kind = self.lookup(service_point)?;
        self.service.create(kind, intent, fabric, tracker)
    }

    pub fn teardown(self) {
        info!("VXLAN Service FINISHED");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::MockTemplateRenderer;
    use crate::error::VxlanError;

    #[test]
    fn both_service_points_registered() {
        let app = VxlanApplication::setup(Box::new(MockTemplateRenderer::new()));
        let points: Vec<_> = app.service_points().collect();

        assert_eq!(points, vec!["vxlan-l2-servicepoint", "vxlan-l3-servicepoint"]);
        assert_eq!(app.lookup("vxlan-l3-servicepoint").unwrap(), ServiceKind::L3);
        app.teardown();
    }

    #[test]
    fn unknown_service_point_is_rejected() {
        let app = VxlanApplication::setup(Box::new(MockTemplateRenderer::new()));
        assert!(matches!(
            app.lookup("vxlan-l4-servicepoint"),
            Err(VxlanError::Application(ApplicationError::UnknownServicePoint { .. }))
        ));
    }
}
