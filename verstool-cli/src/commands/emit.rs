//! Emit command - print cargo:rustc-env lines for build scripts.

use std::io;
use std::path::PathBuf;

use clap::Args;
use verstool::stamp;

use crate::error::CliError;

use super::{load_config, resolve_version_arg};

/// Arguments for `verstool emit`.
#[derive(Debug, Args)]
pub struct EmitArgs {
    /// Version to stamp: a dotted string or a manifest expression
    pub version: String,

    /// Source tree for VCS revision lookup; defaults to the manifest's
    /// directory, or the current directory for bare version strings
    #[arg(long)]
    pub source_tree: Option<PathBuf>,
}

/// Run the emit command.
pub fn run(args: EmitArgs) -> Result<(), CliError> {
    let config = load_config();
    let (version, manifest_tree) = resolve_version_arg(&args.version, &config)?;

    let tree = args
        .source_tree
        .or(manifest_tree)
        .unwrap_or_else(|| PathBuf::from("."));

    stamp::emit_build_env(&mut io::stdout(), &version, &tree)
        .map_err(|e| CliError::Output(e.to_string()))
}
