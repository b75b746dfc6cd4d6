//! ghcl cli interface

use clap::{Parser, Subcommand, ValueEnum};
use std::fmt::Formatter;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Change the work directory
    ///
    /// Can be specified multiple times. Note that all
    /// paths on the way to the final path must exist.
    ///
    /// This is equivalent to running { cd <directory>; ghcl ... }
    #[clap(short = 'C', long = "directory", global(true))]
    pub directory: Vec<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Parse a document and print its tree
    ///
    /// Reads from stdin unless a file is given
    Parse(ParseCommand),

    /// Print a single top level attribute
    Get(GetCommand),

    /// List blocks of a type
    Blocks(BlocksCommand),

    /// Print a document in canonical form
    #[command(alias = "format")]
    Fmt(FmtCommand),

    /// Build every object block and print the result
    Build(BuildCommand),
}

#[derive(Parser, Debug)]
pub struct ParseCommand {
    #[clap(flatten)]
    pub input: InputArgs,

    #[clap(flatten)]
    pub output: OutputArgs,
}

#[derive(Parser, Debug)]
pub struct GetCommand {
    /// Attribute name
    pub name: String,

    #[clap(flatten)]
    pub input: InputArgs,

    #[clap(flatten)]
    pub output: OutputArgs,
}

#[derive(Parser, Debug)]
pub struct BlocksCommand {
    /// Block type, e.g. `object`
    pub block_type: String,

    #[clap(flatten)]
    pub input: InputArgs,

    /// Include nested blocks
    #[clap(short = 'r', long = "recursive")]
    pub recursive: bool,
}

#[derive(Parser, Debug)]
pub struct FmtCommand {
    #[clap(flatten)]
    pub input: InputArgs,
}

#[derive(Parser, Debug)]
pub struct BuildCommand {
    #[clap(flatten)]
    pub input: InputArgs,
}

#[derive(Parser, Debug)]
pub struct InputArgs {
    /// File to read, stdin when omitted
    pub file: Option<PathBuf>,

    /// Deepest allowed nesting of blocks, lists and objects
    #[clap(long = "max-depth", default_value_t = ghcl::ParseOptions::DEFAULT_MAX_DEPTH)]
    pub max_depth: usize,
}

#[derive(Parser, Debug)]
pub struct OutputArgs {
    #[arg(short = 'F', long = "output-format", default_value_t)]
    pub format: OutputFormat,
}

#[derive(ValueEnum, Clone, Default, Debug)]
pub enum OutputFormat {
    #[default]
    Json,
    Yaml,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Json => f.write_str("json"),
            OutputFormat::Yaml => f.write_str("yaml"),
        }
    }
}
