use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use super::colors::{ColorMode, Colors, ThemeMode};

#[derive(Parser, Debug)]
#[command(name = "inner-builder")]
#[command(author, version, about = "Generates inner Builder classes for Java class models")]
#[command(styles = Colors::clap_styles())]
pub struct Cli {
  #[command(subcommand)]
  pub command: Commands,

  /// Control color output
  #[arg(long, value_enum, default_value = "auto", global = true)]
  pub color: ColorMode,

  /// Terminal theme (dark or light background)
  #[arg(long, value_enum, default_value = "auto", global = true)]
  pub theme: ThemeMode,

  /// Log merge decisions and skipped fields
  #[arg(short, long, default_value_t = false, global = true)]
  pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
  /// Inspect a class model or the stored options
  List {
    #[command(subcommand)]
    list_command: ListCommands,
  },
  /// Generate or refresh the Builder of a class
  Generate(GenerateCommand),
}

#[derive(Args, Debug, Clone)]
pub struct GenerateCommand {
  /// Path to the JSON class model
  #[arg(short, long, value_name = "FILE")]
  pub input: PathBuf,

  /// Class to generate the builder for (simple or qualified name)
  #[arg(short, long, value_name = "NAME")]
  pub class: String,

  /// Put the caret on this field's declaration, which leaves the field out
  #[arg(long, value_name = "FIELD")]
  pub field: Option<String>,

  /// Only include these fields (comma-separated); defaults to every candidate
  #[arg(long, value_name = "NAMES", value_delimiter = ',')]
  pub fields: Option<Vec<String>>,

  /// JSON file holding the persisted `GenerateInnerBuilder.*` options
  #[arg(long, value_name = "FILE")]
  pub options: Option<PathBuf>,

  /// Override an option for this run, e.g. `GenerateInnerBuilder.withJavadoc=true`
  #[arg(long = "set", value_name = "KEY=VALUE")]
  pub overrides: Vec<String>,

  /// Write the options used for this run back to the options file
  #[arg(long, default_value_t = false, requires = "options")]
  pub save: bool,

  /// Where to write the rendered Java source (stdout when omitted)
  #[arg(short, long, value_name = "FILE")]
  pub output: Option<PathBuf>,

  /// Suppress non-essential output (errors only)
  #[arg(short, long, default_value_t = false)]
  pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum ListCommands {
  /// List the builder candidates of a class and why other fields were left out
  Fields {
    /// Path to the JSON class model
    #[arg(short, long, value_name = "FILE")]
    input: PathBuf,

    /// Class to inspect (simple or qualified name)
    #[arg(short, long, value_name = "NAME")]
    class: String,
  },
  /// List every generator option with its stored value
  Options {
    /// JSON file holding the persisted options
    #[arg(long, value_name = "FILE")]
    options: Option<PathBuf>,
  },
}
