//! Query command - show VCS revision data for a source tree.

use std::path::PathBuf;

use clap::Args;
use verstool::vcs;

use crate::error::CliError;

use super::load_config;

/// Arguments for `verstool query`.
#[derive(Debug, Args)]
pub struct QueryArgs {
    /// Path inside the source tree; defaults to the current directory
    pub path: Option<PathBuf>,

    /// Print the structured form as JSON
    #[arg(long)]
    pub json: bool,
}

/// Run the query command.
pub fn run(args: QueryArgs) -> Result<(), CliError> {
    let config = load_config();
    let start = args.path.unwrap_or_else(|| PathBuf::from("."));

    let info = vcs::query_with_backends(&start, &config.vcs.backends)
        .ok_or_else(|| CliError::NoVcs(start.display().to_string()))?;

    if args.json {
        let rendered =
            serde_json::to_string_pretty(&info).map_err(|e| CliError::Output(e.to_string()))?;
        println!("{}", rendered);
    } else {
        println!("vcs:    {}", info.kind);
        println!("revno:  {}", info.revno);
        println!("branch: {}", info.branch_nick.as_deref().unwrap_or("(none)"));
        if let Some(commit) = &info.commit_id {
            println!("commit: {}", commit);
        }
    }

    Ok(())
}
