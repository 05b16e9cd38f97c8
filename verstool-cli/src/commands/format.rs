//! Format command - render a version string.

use std::path::PathBuf;

use clap::Args;
use serde::Serialize;
use verstool::vcs::{self, VcsInfo};
use verstool::version::format_version_with;
use verstool::Version;

use crate::error::CliError;

use super::{load_config, resolve_version_arg};

/// Arguments for `verstool format`.
#[derive(Debug, Args)]
pub struct FormatArgs {
    /// Version to format: a dotted string (1.3.0.dev) or a manifest
    /// expression (verstool.toml, Cargo.toml:package.metadata.version)
    pub version: String,

    /// Source tree for VCS revision lookup; defaults to the manifest's
    /// directory, or the current directory for bare version strings
    #[arg(long)]
    pub source_tree: Option<PathBuf>,

    /// Print the structured form as JSON
    #[arg(long)]
    pub json: bool,
}

/// JSON projection of a formatting result.
#[derive(Debug, Serialize)]
struct FormatReport<'a> {
    version: &'a Version,
    formatted: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    vcs: Option<&'a VcsInfo>,
}

/// Run the format command.
pub fn run(args: FormatArgs) -> Result<(), CliError> {
    let config = load_config();
    let (version, manifest_tree) = resolve_version_arg(&args.version, &config)?;

    let tree = args
        .source_tree
        .or(manifest_tree)
        .unwrap_or_else(|| PathBuf::from("."));

    let info = if version.is_dev() {
        vcs::query_with_backends(&tree, &config.vcs.backends)
    } else {
        None
    };
    let formatted = format_version_with(&version, info.as_ref());

    if args.json {
        let report = FormatReport {
            version: &version,
            formatted: &formatted,
            vcs: info.as_ref(),
        };
        let rendered = serde_json::to_string_pretty(&report)
            .map_err(|e| CliError::Output(e.to_string()))?;
        println!("{}", rendered);
    } else {
        println!("{}", formatted);
    }

    Ok(())
}
