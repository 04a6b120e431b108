//! Implementation of the `vxlan render` command.
//!
//! Responsibility: load the intent and fabric documents, wire the adapters
//! into a [`VxlanApplication`], dispatch through the kind's service point and
//! display results. No fan-out logic lives here.
//!
//! Rendered fragments are staged in memory and only written to the output
//! directory once the service reaches its ready milestone, so a rejected
//! service leaves no partial configuration behind.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{info, instrument};

use vxlan_adapters::{
    DirectoryConfigSink, InMemoryPlanTracker, MemoryConfigSink, RecordingRenderer, SimpleRenderer,
    load_fabric, load_intent, plan::PlanSnapshot,
};
use vxlan_core::{
    application::{CreateReport, LifecycleOutcome, VxlanApplication, ports::ConfigSink},
    domain::{Fabric, RenderCall, ServiceIntent, ServiceKind},
};

use crate::{
    cli::RenderArgs,
    commands::open_template_store,
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// One written configuration file.
#[derive(Debug, Serialize)]
struct DeviceFile {
    device: String,
    path: PathBuf,
}

/// JSON result of a successful render.
#[derive(Debug, Serialize)]
struct RenderSummary {
    service_id: String,
    kind: String,
    calls_rendered: usize,
    devices: Vec<DeviceFile>,
    /// Files of devices the service no longer touches.
    removed: Vec<PathBuf>,
    plan: PlanSnapshot,
}

/// What [`commit`] changed in the output directory.
#[derive(Debug)]
struct Committed {
    devices: Vec<DeviceFile>,
    removed: Vec<PathBuf>,
}

/// Execute the `vxlan render` command.
#[instrument(skip_all, fields(kind = %args.kind, intent = %args.intent.display()))]
pub fn execute(args: RenderArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let fabric_path = args
        .fabric
        .clone()
        .or_else(|| config.fabric.path.clone())
        .ok_or(CliError::MissingInput {
            what: "fabric model",
            flag: "--fabric",
            key: "fabric.path",
        })?;

    let intent = load_intent(&args.intent)?;
    let fabric = load_fabric(&fabric_path)?;
    info!(service = intent.service_id(), dc = intent.dc_name(), "Documents loaded");

    if args.dry_run {
        return preview(args.kind, &intent, &fabric, &output);
    }

    let templates_dir = args.templates.as_deref().or(config.templates.dir.as_deref());
    let output_dir = args.output.unwrap_or(config.output.dir);

    let staged = MemoryConfigSink::new();
    let renderer = SimpleRenderer::new(open_template_store(templates_dir)?, Box::new(staged.clone()));
    let tracker = InMemoryPlanTracker::new();

    let app = VxlanApplication::setup(Box::new(renderer));
    let outcome = app.dispatch(args.kind.service_point(), &intent, &fabric, &tracker);
    app.teardown();

    let report = ready_or_failed(outcome?, &intent)?;
    let Committed { devices, removed } = commit(&staged, &output_dir)?;

    if output.is_json() {
        output.json(&RenderSummary {
            service_id: report.service_id,
            kind: report.kind.to_string(),
            calls_rendered: report.calls_rendered,
            devices,
            removed,
            plan: tracker.snapshot()?,
        })?;
        return Ok(());
    }

    output.success(&format!(
        "Rendered {} template calls for service '{}' ({})",
        report.calls_rendered, report.service_id, report.kind
    ))?;
    output.header(&format!("Configuration written to {}:", output_dir.display()))?;
    for file in &devices {
        output.print(&format!("  {}", file.device))?;
        output.detail(&file.path.display().to_string())?;
    }
    for path in &removed {
        output.warning(&format!("Removed stale {}", path.display()))?;
    }
    output.info(&format!("Plan {}", tracker.plan_id()))?;

    Ok(())
}

/// Run the fan-out against a recording renderer and show the calls.
fn preview(
    kind: ServiceKind,
    intent: &ServiceIntent,
    fabric: &Fabric,
    output: &OutputManager,
) -> CliResult<()> {
    let recorder = RecordingRenderer::new();
    let tracker = InMemoryPlanTracker::new();

    let app = VxlanApplication::setup(Box::new(recorder.clone()));
    let outcome = app.dispatch(kind.service_point(), intent, fabric, &tracker);
    app.teardown();
    ready_or_failed(outcome?, intent)?;

    let calls: Vec<RenderCall> = recorder.calls()?;
    if output.is_json() {
        output.json(&calls)?;
        return Ok(());
    }

    output.header(&format!(
        "Dry run: {} calls for service '{}' ({kind})",
        calls.len(),
        intent.service_id()
    ))?;
    for (index, call) in calls.iter().enumerate() {
        output.print(&format!("  {:>2}. {}", index + 1, call))?;
    }
    Ok(())
}

fn ready_or_failed(
    outcome: LifecycleOutcome<CreateReport>,
    intent: &ServiceIntent,
) -> CliResult<CreateReport> {
    match outcome {
        LifecycleOutcome::Ready(report) => Ok(report),
        LifecycleOutcome::Failed(source) => Err(CliError::ServiceFailed {
            service_id: intent.service_id().to_string(),
            source,
        }),
    }
}

/// Replay staged fragments into per-device files, then drop the files of
/// devices that were not written.
fn commit(staged: &MemoryConfigSink, output_dir: &Path) -> CliResult<Committed> {
    let sink = DirectoryConfigSink::new(output_dir);
    for applied in staged.applied()? {
        sink.apply(&applied.device, &applied.template, &applied.text)?;
    }
    let removed = sink.prune_stale()?;

    let devices = sink
        .devices()?
        .into_iter()
        .map(|device| DeviceFile {
            path: sink.path_for(&device),
            device,
        })
        .collect();
    Ok(Committed { devices, removed })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;
    use vxlan_core::domain::TemplateName;

    #[test]
    fn commit_writes_fragments_in_order() {
        let temp = TempDir::new().unwrap();
        let staged = MemoryConfigSink::new();
        staged
            .apply("bl1", &TemplateName::from(TemplateName::L2_BORDER_LEAF_NODE), "one\n")
            .unwrap();
        staged
            .apply("leaf1", &TemplateName::from(TemplateName::L2_LEAF_NODE), "leaf\n")
            .unwrap();
        staged
            .apply("bl1", &TemplateName::from(TemplateName::BORDER_LEAF_NODE_VLANS), "two\n")
            .unwrap();

        let committed = commit(&staged, temp.path()).unwrap();

        let names: Vec<_> = committed.devices.iter().map(|d| d.device.as_str()).collect();
        assert_eq!(names, vec!["bl1", "leaf1"]);
        assert_eq!(
            fs::read_to_string(temp.path().join("bl1.cfg")).unwrap(),
            "one\ntwo\n"
        );
    }

    #[test]
    fn commit_drops_files_of_devices_no_longer_rendered() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("bl3.cfg"), "old\n").unwrap();
        let staged = MemoryConfigSink::new();
        staged
            .apply("bl1", &TemplateName::from(TemplateName::L2_BORDER_LEAF_NODE), "one\n")
            .unwrap();

        let committed = commit(&staged, temp.path()).unwrap();

        assert_eq!(committed.removed, vec![temp.path().join("bl3.cfg")]);
        assert!(!temp.path().join("bl3.cfg").exists());
        assert!(temp.path().join("bl1.cfg").exists());
    }

    #[test]
    fn failed_outcome_becomes_service_failure() {
        let intent = ServiceIntent::builder()
            .service_id("tenant-a")
            .dc_name("dc1")
            .build()
            .unwrap();
        let outcome = LifecycleOutcome::Failed(vxlan_core::domain::DomainError::UnknownDataCenter {
            name: "dc1".into(),
        });

        match ready_or_failed(outcome, &intent) {
            Err(CliError::ServiceFailed { service_id, .. }) => assert_eq!(service_id, "tenant-a"),
            other => panic!("unexpected: {other:?}"),
        }
    }
}
