//! Implementation of the `vxlan templates` command.

use serde::Serialize;

use vxlan_core::{
    application::{TemplateInfo, TemplateService},
    domain::TemplateName,
};

use crate::{
    cli::{ListFormat, TemplatesArgs},
    commands::open_template_store,
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

#[derive(Debug, Serialize)]
struct TemplateRow<'a> {
    name: &'a str,
    required: bool,
    lines: usize,
}

impl<'a> From<&'a TemplateInfo> for TemplateRow<'a> {
    fn from(info: &'a TemplateInfo) -> Self {
        Self {
            name: &info.name,
            required: info.required,
            lines: info.lines,
        }
    }
}

pub fn execute(args: TemplatesArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let dir = args.templates.as_deref().or(config.templates.dir.as_deref());
    let service = TemplateService::new(open_template_store(dir)?);

    if let Some(name) = args.show {
        let text = service.get(&TemplateName::new(name))?;
        output.print(text.trim_end())?;
        return Ok(());
    }

    let templates = service.list()?;
    if let Err(missing) = service.verify_required() {
        output.warning(&missing.to_string())?;
    }

    match args.format {
        ListFormat::Table => {
            output.header("Available Templates:")?;
            for t in &templates {
                let role = if t.required { "fan-out" } else { "extra" };
                output.print(&format!("  {:<24} {:>3} lines  {}", t.name, t.lines, role))?;
            }
        }
        ListFormat::Json => {
            let rows: Vec<TemplateRow<'_>> = templates.iter().map(TemplateRow::from).collect();
            output.json(&rows)?;
        }
        ListFormat::List => {
            for t in &templates {
                println!("{}", t.name);
            }
        }
    }

    Ok(())
}
