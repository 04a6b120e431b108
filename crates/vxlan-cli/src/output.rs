//! Terminal output: status lines, tables and JSON documents.

use std::io::{self, IsTerminal};

use console::Term;
use owo_colors::{OwoColorize, Style};
use serde::Serialize;

use crate::cli::global::{GlobalArgs, OutputFormat};
use crate::config::AppConfig;

const SUCCESS: &str = "\u{2713}"; // ✓
const WARNING: &str = "\u{26a0}"; // ⚠
const INFO: &str = "\u{2139}"; // ℹ

/// Writes command results to stdout in the resolved format.
pub struct OutputManager {
    format: OutputFormat,
    quiet: bool,
    no_color: bool,
    term: Term,
}

impl OutputManager {
    /// `--output-format` wins over `output.format`. `auto` from both becomes
    /// Human on a TTY and Plain otherwise.
    pub fn new(args: &GlobalArgs, config: &AppConfig) -> Self {
        let format = match args.output_format {
            OutputFormat::Auto => OutputFormat::from_config(&config.output.format),
            explicit => explicit,
        };
        let format = match format {
            OutputFormat::Auto if io::stdout().is_terminal() => OutputFormat::Human,
            OutputFormat::Auto => OutputFormat::Plain,
            resolved => resolved,
        };

        Self {
            format,
            quiet: args.quiet,
            no_color: args.no_color || config.output.no_color || format == OutputFormat::Plain,
            term: Term::stdout(),
        }
    }

    /// Plain line; dropped under `--quiet`.
    pub fn print(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.term.write_line(msg)
    }

    /// Pretty-printed JSON. Written under `--quiet` too: it is the result.
    pub fn json<T: Serialize + ?Sized>(&self, value: &T) -> io::Result<()> {
        let text = serde_json::to_string_pretty(value)?;
        self.term.write_line(&text)
    }

    pub fn success(&self, msg: &str) -> io::Result<()> {
        self.badge(SUCCESS, msg, Style::new().green())
    }

    pub fn warning(&self, msg: &str) -> io::Result<()> {
        self.badge(WARNING, msg, Style::new().yellow())
    }

    pub fn info(&self, msg: &str) -> io::Result<()> {
        self.badge(INFO, msg, Style::new().blue())
    }

    /// Section heading.
    pub fn header(&self, text: &str) -> io::Result<()> {
        self.styled(text, Style::new().cyan().bold())
    }

    /// Indented secondary line, e.g. the file under a device name.
    pub fn detail(&self, text: &str) -> io::Result<()> {
        self.styled(&format!("    {text}"), Style::new().dimmed())
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    pub fn is_json(&self) -> bool {
        self.format() == OutputFormat::Json
    }

    fn badge(&self, symbol: &str, msg: &str, style: Style) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.no_color {
            format!("{symbol} {msg}")
        } else {
            format!("{} {}", symbol.style(style.bold()), msg.style(style))
        };
        self.term.write_line(&line)
    }

    fn styled(&self, text: &str, style: Style) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        if self.no_color {
            self.term.write_line(text)
        } else {
            self.term.write_line(&text.style(style).to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manager(format: OutputFormat, no_color: bool, config: &AppConfig) -> OutputManager {
        let args = GlobalArgs {
            verbose: 0,
            quiet: true,
            no_color,
            config: None,
            log_file: None,
            output_format: format,
        };
        OutputManager::new(&args, config)
    }

    #[test]
    fn quiet_writes_succeed_silently() {
        let out = manager(OutputFormat::Plain, true, &AppConfig::default());
        assert!(out.print("hello").is_ok());
        assert!(out.success("done").is_ok());
        assert!(out.detail("path").is_ok());
    }

    #[test]
    fn flag_wins_over_config_format() {
        let mut config = AppConfig::default();
        config.output.format = "json".into();

        assert_eq!(
            manager(OutputFormat::Human, false, &config).format(),
            OutputFormat::Human
        );
        assert!(manager(OutputFormat::Auto, false, &config).is_json());
    }

    #[test]
    fn color_disabled_by_flag_config_or_plain() {
        let mut config = AppConfig::default();
        assert!(!manager(OutputFormat::Human, false, &config).no_color);
        assert!(manager(OutputFormat::Human, true, &config).no_color);
        assert!(manager(OutputFormat::Plain, false, &config).no_color);

        config.output.no_color = true;
        assert!(manager(OutputFormat::Human, false, &config).no_color);
    }
}
