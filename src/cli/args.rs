use clap::{Parser, ValueEnum};

/// CLI arguments for the lighttag binary.
#[derive(Parser, Debug)]
#[command(
    name = "lighttag",
    version,
    about = "Print light type tags for the built-in prelude types"
)]
pub struct CliArgs {
    /// Prelude type to describe, by sample name (see --list). Repeatable;
    /// every sample is described when omitted.
    #[arg(short = 't', long = "type", value_name = "NAME")]
    pub types: Vec<String>,

    /// Output format.
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Text, ignore_case = true)]
    pub format: OutputFormat,

    /// Build every reference from scratch instead of going through the cache.
    #[arg(long = "no-cache")]
    pub no_cache: bool,

    /// Render names by their last segment only.
    #[arg(short = 's', long)]
    pub short: bool,

    /// List the available sample names and exit.
    #[arg(short = 'l', long)]
    pub list: bool,

    /// Enable color and formatting in text output.
    #[arg(long)]
    pub pretty: Option<bool>,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}
