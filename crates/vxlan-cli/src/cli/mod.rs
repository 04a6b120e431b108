//! Command-line surface of `vxlan`. Argument parsing only.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use vxlan_core::domain::ServiceKind;

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

/// VXLAN service fan-out
///
/// Expands a tenant VXLAN service intent into per-device configuration for
/// every leaf and border leaf of a data center.
#[derive(Debug, Parser)]
#[command(
    name = "vxlan",
    version,
    author,
    arg_required_else_help = true,
    after_help = "EXAMPLES:\n  \
        vxlan render l2 -i tenant-a.json -f fabric.json -o out/\n  \
        vxlan render l3 -i tenant-b.toml --dry-run --output-format json\n  \
        vxlan templates -t ./templates"
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Render a service intent into per-device configuration
    #[command(visible_alias = "r")]
    Render(RenderArgs),

    /// List the templates a render would use, or print one
    #[command(visible_alias = "ls")]
    Templates(TemplatesArgs),

    /// Write a default configuration file
    Init(InitArgs),

    /// Print a shell completion script
    Completions(CompletionsArgs),

    /// Inspect the effective configuration
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[derive(Debug, Args)]
pub struct RenderArgs {
    /// l2, l3, or a service point name such as vxlan-l2-servicepoint
    #[arg(value_name = "KIND")]
    pub kind: ServiceKind,

    /// Service intent document (.json or .toml)
    #[arg(short, long, value_name = "FILE")]
    pub intent: PathBuf,

    /// Fabric model document [config: fabric.path]
    #[arg(short, long, value_name = "FILE")]
    pub fabric: Option<PathBuf>,

    /// Directory of *.tmpl files; built-ins cover missing names [config: templates.dir]
    #[arg(short, long, value_name = "DIR")]
    pub templates: Option<PathBuf>,

    /// Directory for the <device>.cfg files [config: output.dir]
    #[arg(short, long, value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Print the template applications instead of rendering them
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Debug, Args)]
pub struct TemplatesArgs {
    /// Directory of *.tmpl files [config: templates.dir]
    #[arg(short, long, value_name = "DIR")]
    pub templates: Option<PathBuf>,

    /// Print the text of one template
    #[arg(long, value_name = "NAME")]
    pub show: Option<String>,

    #[arg(long, value_enum, default_value_t = ListFormat::Table)]
    pub format: ListFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ListFormat {
    Table,
    /// Names only
    List,
    Json,
}

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Write ./vxlan.toml instead of the platform config file
    #[arg(long)]
    pub local: bool,

    /// Replace an existing file
    #[arg(long)]
    pub force: bool,
}

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    #[arg(value_enum)]
    pub shell: Shell,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print one value by dotted key, e.g. fabric.path
    Get { key: String },
    /// Print every value
    List,
    /// Print where the platform config file lives
    Path,
}
