#![allow(clippy::missing_errors_doc)]
use clap::Parser;

use crate::ui::{Cli, Colors, Commands, ListCommands, colors};

mod ui;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  let cli = Cli::parse();
  init_logging(cli.verbose);
  let colors = Colors::new(colors::colors_enabled(cli.color), colors::detect_theme(cli.theme));

  match cli.command {
    Commands::List { list_command } => match list_command {
      ListCommands::Fields { input, class } => ui::commands::list_fields(&input, &class, &colors).await?,
      ListCommands::Options { options } => ui::commands::list_options(options.as_deref(), &colors)?,
    },
    Commands::Generate(command) => {
      let config = ui::commands::GenerateConfig::from_command(command)?;
      ui::commands::generate_code(config, &colors).await?;
    }
  }

  Ok(())
}

/// `RUST_LOG` wins over `-v`; without either only warnings are shown.
fn init_logging(verbose: bool) {
  let default_filter = if verbose { "debug" } else { "warn" };
  env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
    .format_timestamp(None)
    .init();
}
