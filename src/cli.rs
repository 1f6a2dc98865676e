//! Command-line interface definition.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "bulkedit", version, about = "Assign one value to many cells of a CSV column")]
pub struct Cli {
    /// Settings file (default: bulkedit.toml in the user config directory)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Raise log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the detected column configuration as JSON
    Detect(DetectArgs),
    /// Check a value against the detected configuration
    Validate(EditArgs),
    /// Validate, format and write a value into every selected cell
    Apply(ApplyArgs),
}

#[derive(Debug, Args)]
pub struct SelectArgs {
    /// CSV file with a header row
    pub file: PathBuf,

    /// Column name(s), comma-separated
    #[arg(short, long)]
    pub column: String,

    /// 1-based rows, e.g. "1-3,7" (default: all rows)
    #[arg(short, long)]
    pub rows: Option<String>,
}

#[derive(Debug, Args)]
pub struct DetectArgs {
    /// CSV file with a header row
    #[arg(required_unless_present = "cells", requires = "column")]
    pub file: Option<PathBuf>,

    /// Column name(s), comma-separated
    #[arg(short, long)]
    pub column: Option<String>,

    /// 1-based rows, e.g. "1-3,7" (default: all rows)
    #[arg(short, long)]
    pub rows: Option<String>,

    /// Read the selected cells from a JSON file instead of a CSV sheet
    #[arg(long, value_name = "FILE", conflicts_with_all = ["file", "column", "rows"])]
    pub cells: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct EditArgs {
    #[command(flatten)]
    pub select: SelectArgs,

    /// Replacement value, as typed into the edit dialog
    #[arg(long, allow_hyphen_values = true)]
    pub value: String,
}

#[derive(Debug, Args)]
pub struct ApplyArgs {
    #[command(flatten)]
    pub edit: EditArgs,

    /// Write the result here instead of overwriting the input file
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}
