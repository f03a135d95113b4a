// SPDX-License-Identifier: AGPL-3.0-or-later WITH Palimpsest

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Inspect and fill the interactive forms of PDF templates.
#[derive(Debug, Parser)]
#[command(name = "formfill", about, version)]
pub struct Cli {
    /// Log skipped entries and other diagnostics to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List the text and button fields of a template
    Fields {
        /// Path to the PDF template
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Fill a template from a JSON object of field values
    Fill {
        /// Path to the PDF template
        #[arg(value_name = "TEMPLATE")]
        template: PathBuf,

        /// JSON file holding a flat `{ "field": value }` object
        #[arg(value_name = "VALUES")]
        values: PathBuf,

        /// Where to write the filled PDF
        #[arg(short, long, value_name = "OUT")]
        output: PathBuf,

        /// Fail on unknown field names and invalid button states
        #[arg(long)]
        strict: bool,

        /// Do not ask viewers to regenerate field appearances
        #[arg(long)]
        no_need_appearances: bool,

        /// Also write the button value onto each widget
        #[arg(long)]
        mirror_widget_values: bool,

        /// Replace OUT if it already exists
        #[arg(long)]
        force: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}
