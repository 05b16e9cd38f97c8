//! Expand command - run the manifest hook on a raw value.

use clap::Args;
use verstool::manifest;

use crate::error::CliError;

/// Arguments for `verstool expand`.
#[derive(Debug, Args)]
pub struct ExpandArgs {
    /// Value to expand; printed unchanged unless it carries the
    /// :verstool: prefix
    pub value: String,
}

/// Run the expand command.
pub fn run(args: ExpandArgs) -> Result<(), CliError> {
    match manifest::expand(&args.value)? {
        Some(expanded) => println!("{}", expanded),
        None => println!("{}", args.value),
    }
    Ok(())
}
