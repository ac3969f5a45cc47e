//! Replay command
//!
//! Usage: gdlog replay <SCRIPT> [--format text|json] [--min-severity <SEV>] [--ignore-root]

use clap::{Args, ValueEnum};
use gdlog_core::{context_scope, ContextGuard, ErrorMessage, Logger, LoggerId, Severity};
use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;

use crate::script::{self, Directive, ScriptError};

#[derive(Debug, Args)]
pub struct ReplayArgs {
    /// Script to replay
    pub script: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Only print messages at or above this severity
    #[arg(long, value_parser = parse_severity)]
    pub min_severity: Option<Severity>,

    /// Drop everything that reaches the top-level logger
    #[arg(long)]
    pub ignore_root: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

fn parse_severity(s: &str) -> Result<Severity, String> {
    s.parse::<Severity>().map_err(|e| e.to_string())
}

/// Messages one logger held when it was closed
#[derive(Debug, Serialize)]
pub struct LoggerReport {
    pub id: LoggerId,
    pub messages: Vec<ErrorMessage>,
}

#[derive(Debug, Serialize)]
struct ReplayOutput {
    loggers: Vec<LoggerReport>,
}

/// A script line failed; loggers closed before it keep their reports
#[derive(Debug, Error)]
#[error("{cause}")]
pub struct ReplayError {
    pub closed: Vec<LoggerReport>,
    pub cause: Box<dyn std::error::Error>,
}

/// Loggers and guards opened by a script
///
/// Guards remember how many nested loggers were open when they were taken so
/// that closing a logger also releases the guards placed on it.
struct Session {
    root: Logger,
    nested: Vec<Logger>,
    guards: Vec<(usize, ContextGuard<'static>)>,
    reports: Vec<LoggerReport>,
}

impl Session {
    fn new(ignore_root: bool) -> Self {
        Self {
            root: Logger::builder().ignore(ignore_root).build(),
            nested: Vec::new(),
            guards: Vec::new(),
            reports: Vec::new(),
        }
    }

    fn apply(
        &mut self,
        number: usize,
        directive: Directive,
    ) -> Result<(), Box<dyn std::error::Error>> {
        match directive {
            Directive::Logger { ignore } => {
                self.nested.push(Logger::builder().ignore(ignore).build());
            }
            Directive::End => {
                if !self.close_innermost() {
                    return Err(ScriptError::NothingToEnd { line: number }.into());
                }
            }
            Directive::Context(label) => {
                let guard = context_scope(&label)?;
                self.guards.push((self.nested.len(), guard));
            }
            Directive::Leave => {
                if self.guards.pop().is_none() {
                    return Err(ScriptError::NothingToLeave { line: number }.into());
                }
            }
            Directive::Clear => self.active().clear(),
            Directive::Report(severity, text) => gdlog_core::log(severity, text),
        }
        Ok(())
    }

    fn active(&self) -> &Logger {
        self.nested.last().unwrap_or(&self.root)
    }

    fn release_guards_at(&mut self, depth: usize) {
        while self.guards.last().is_some_and(|(d, _)| *d == depth) {
            let _ = self.guards.pop();
        }
    }

    /// Close the innermost nested logger; false when only the root is open
    fn close_innermost(&mut self) -> bool {
        let depth = self.nested.len();
        self.release_guards_at(depth);
        match self.nested.pop() {
            Some(logger) => {
                self.reports.push(LoggerReport {
                    id: logger.id(),
                    messages: logger.take_messages(),
                });
                true
            }
            None => false,
        }
    }

    fn finish(mut self) -> Vec<LoggerReport> {
        while self.close_innermost() {}
        self.release_guards_at(0);
        let root = LoggerReport {
            id: self.root.id(),
            messages: self.root.take_messages(),
        };
        let mut reports = std::mem::take(&mut self.reports);
        reports.push(root);
        reports
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        // Fields drop in declaration order; release in LIFO order instead.
        while let Some(_guard) = self.guards.pop() {}
        while let Some(_logger) = self.nested.pop() {}
    }
}

/// Run every directive of a parsed script and collect the per-logger reports
///
/// # Errors
///
/// Returns [`ReplayError`] at the first failing line. Loggers still open at
/// that point are dropped, so their unread messages go to the fallback sink.
pub fn replay(
    lines: Vec<script::Line>,
    ignore_root: bool,
) -> Result<Vec<LoggerReport>, ReplayError> {
    let mut session = Session::new(ignore_root);
    for line in lines {
        if let Err(cause) = session.apply(line.number, line.directive) {
            return Err(ReplayError {
                closed: std::mem::take(&mut session.reports),
                cause,
            });
        }
    }
    Ok(session.finish())
}

/// Execute replay command
pub fn execute(args: ReplayArgs) -> Result<(), Box<dyn std::error::Error>> {
    let source = std::fs::read_to_string(&args.script)
        .map_err(|e| format!("cannot read {}: {}", args.script.display(), e))?;
    let lines = script::parse(&source)?;

    match replay(lines, args.ignore_root) {
        Ok(reports) => print_reports(reports, &args),
        Err(err) => {
            // Closed loggers were already read; print them before failing.
            print_reports(err.closed, &args)?;
            Err(err.cause)
        }
    }
}

fn print_reports(
    mut reports: Vec<LoggerReport>,
    args: &ReplayArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(min) = args.min_severity {
        for report in &mut reports {
            report.messages.retain(|m| m.severity() >= min);
        }
    }

    match args.format {
        OutputFormat::Text => print!("{}", render_text(&reports)),
        OutputFormat::Json => {
            let output = ReplayOutput { loggers: reports };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }

    Ok(())
}

fn render_text(reports: &[LoggerReport]) -> String {
    let mut out = String::new();
    for report in reports {
        out.push_str(&format!("logger {}:\n", report.id));
        for msg in &report.messages {
            out.push_str(&format!("{}\n", msg));
        }
    }
    out
}
