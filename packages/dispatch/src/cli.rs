//! Command-line interface for tracing callbacks over a document.

use std::fmt;
use std::path::{Path, PathBuf};

use clap::{Parser as ClapParser, Subcommand};
use console::style;

use crate::config::ParserConfig;
use crate::error::Result;
use crate::parser::Parser;
use crate::path::ElementPath;
use crate::registry::{CallbackRegistry, EventKind};

/// xml-dispatch - Dispatch XML events to callbacks bound to element paths.
#[derive(ClapParser)]
#[command(name = "xml-dispatch")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print every callback fired for the given paths, in order.
    Trace {
        /// XML file to read
        file: PathBuf,

        /// Element start path, optionally with attributes (e.g. root/item@id,lang)
        #[arg(short, long = "start", value_name = "PATH[@ATTRS]")]
        start: Vec<String>,

        /// Element end path (e.g. root/item)
        #[arg(short, long = "end", value_name = "PATH")]
        end: Vec<String>,

        /// Character data path (e.g. root/item/title)
        #[arg(short, long = "text", value_name = "PATH")]
        text: Vec<String>,

        /// Reject documents that contain a DTD
        #[arg(long)]
        no_dtd: bool,
    },
}

/// One fired callback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceLine {
    pub kind: EventKind,
    pub detail: String,
}

impl fmt::Display for TraceLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind, self.detail)
    }
}

/// Handler that records every callback it receives.
#[derive(Debug, Default)]
pub struct TraceLog {
    pub lines: Vec<TraceLine>,
}

impl TraceLog {
    fn push(&mut self, kind: EventKind, detail: String) {
        self.lines.push(TraceLine { kind, detail });
    }
}

/// Split a `PATH@attr,attr` argument into its path and attribute names.
///
/// An `@` inside a `{uri}` segment does not start the attribute list.
///
/// # Examples
/// ```
/// use xml_dispatch::cli::parse_start_spec;
///
/// let (path, attributes) = parse_start_spec("root/item@id,lang").unwrap();
/// assert_eq!(path.to_string(), "root/item");
/// assert_eq!(attributes, ["id", "lang"]);
/// ```
pub fn parse_start_spec(spec: &str) -> Result<(ElementPath, Vec<String>)> {
    let mut in_uri = false;
    let at = spec
        .char_indices()
        .find(|&(_, ch)| match ch {
            '{' => {
                in_uri = true;
                false
            }
            '}' => {
                in_uri = false;
                false
            }
            '@' => !in_uri,
            _ => false,
        })
        .map(|(index, _)| index);

    match at {
        Some(at) => {
            let path: ElementPath = spec[..at].parse()?;
            let attributes: Vec<String> = spec[at + 1..]
                .split(',')
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .map(String::from)
                .collect();
            Ok((path, attributes))
        }
        None => Ok((spec.parse::<ElementPath>()?, Vec::new())),
    }
}

/// Build a registry that logs each fired callback to a [`TraceLog`].
pub fn build_trace_registry(
    start: &[String],
    end: &[String],
    text: &[String],
) -> Result<CallbackRegistry<TraceLog>> {
    let mut registry = CallbackRegistry::new();

    for spec in start {
        let (path, attributes) = parse_start_spec(spec)?;
        let label = path.to_string();
        registry.on_start_with_attributes(path, attributes, move |log: &mut TraceLog, bound| {
            let mut detail = label.clone();
            for (name, value) in bound.iter() {
                match value {
                    Some(value) => detail.push_str(&format!(" {name}=\"{value}\"")),
                    None => detail.push_str(&format!(" {name}=<absent>")),
                }
            }
            log.push(EventKind::Start, detail);
            Ok(())
        });
    }

    for spec in end {
        let path: ElementPath = spec.parse()?;
        let label = path.to_string();
        registry.on_end(path, move |log: &mut TraceLog| {
            log.push(EventKind::End, label.clone());
            Ok(())
        });
    }

    for spec in text {
        let path: ElementPath = spec.parse()?;
        let label = path.to_string();
        registry.on_characters(path, move |log: &mut TraceLog, chars| {
            log.push(EventKind::Characters, format!("{label} {chars:?}"));
            Ok(())
        });
    }

    Ok(registry)
}

/// Run the CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Trace {
            file,
            start,
            end,
            text,
            no_dtd,
        } => trace_command(&file, &start, &end, &text, no_dtd),
    }
}

/// Execute the trace command.
fn trace_command(
    file: &Path,
    start: &[String],
    end: &[String],
    text: &[String],
    no_dtd: bool,
) -> Result<()> {
    let registry = build_trace_registry(start, end, text)?;
    if registry.is_empty() {
        tracing::warn!("No paths given, only checking document structure");
    }

    let parser = Parser::with_config(ParserConfig::default().with_allow_dtd(!no_dtd))?;
    let mut log = TraceLog::default();
    let outcome = parser.parse_file_with(file, &registry, Some(&mut log));

    // Print what fired before reporting any failure
    for line in &log.lines {
        println!("{} {}", style(line.kind).cyan(), line.detail);
    }
    outcome?;

    println!();
    println!(
        "{} {} callbacks fired in {}",
        style("Done:").green().bold(),
        log.lines.len(),
        file.display()
    );

    Ok(())
}
