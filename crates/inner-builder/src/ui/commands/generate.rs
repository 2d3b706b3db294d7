use std::path::PathBuf;

use chrono::{Local, Timelike};
use crossterm::style::Stylize;
use inner_builder_core::{
  config::ConfigStore,
  generator::SynthesisReport,
  handler::{InnerBuilderHandler, Outcome},
  model::{JavaModel, SourceModel},
  reformat::ShortenReferences,
  render::JavaPrinter,
  selection::{SelectAll, SelectByName},
};

use super::{OptionStore, find_class, load_model};
use crate::ui::{Colors, GenerateCommand};

fn format_timestamp() -> String {
  let now = Local::now();
  format!("[{:02}:{:02}:{:02}]", now.hour(), now.minute(), now.second())
}

#[derive(Debug, Clone)]
pub struct GenerateConfig {
  pub input: PathBuf,
  pub class: String,
  pub caret_field: Option<String>,
  pub fields: Option<Vec<String>>,
  pub options: Option<PathBuf>,
  pub overrides: Vec<String>,
  pub save: bool,
  pub output: Option<PathBuf>,
  pub quiet: bool,
}

impl GenerateConfig {
  pub fn from_command(command: GenerateCommand) -> anyhow::Result<Self> {
    let GenerateCommand {
      input,
      class,
      field,
      fields,
      options,
      overrides,
      save,
      output,
      quiet,
    } = command;

    if let Some(fields) = &fields
      && fields.iter().all(|name| name.trim().is_empty())
    {
      anyhow::bail!("--fields needs at least one field name");
    }
    if save && options.is_none() {
      anyhow::bail!("--save needs an options file (--options)");
    }

    Ok(Self {
      input,
      class,
      caret_field: field,
      fields: fields.map(|names| names.into_iter().map(|name| name.trim().to_string()).collect()),
      options,
      overrides,
      save,
      output,
      quiet,
    })
  }

  /// Options file (or an in-memory store) with the `--set` overrides applied.
  fn open_store(&self) -> anyhow::Result<OptionStore> {
    let mut store = OptionStore::open(self.options.as_deref())?;
    for entry in &self.overrides {
      store.apply_override(entry)?;
      log::debug!("option override `{entry}` applied");
    }
    Ok(store)
  }

  fn caret(&self, model: &JavaModel) -> anyhow::Result<usize> {
    let class = find_class(model, &self.class)?;
    match &self.caret_field {
      Some(field) => model
        .caret_in_field(class, field)
        .ok_or_else(|| anyhow::anyhow!("class `{}` declares no field `{field}`", self.class)),
      None => Ok(model.caret_in_class(class)),
    }
  }

  fn invoke(&self, model: &mut JavaModel, offset: usize, store: &mut OptionStore) -> anyhow::Result<Outcome> {
    let outcome = match &self.fields {
      Some(names) => InnerBuilderHandler::new(SelectByName::new(names), ShortenReferences).invoke(model, offset, store),
      None => InnerBuilderHandler::new(SelectAll, ShortenReferences).invoke(model, offset, store),
    }?;
    Ok(outcome)
  }

  async fn write_output(&self, source: &str) -> anyhow::Result<()> {
    match &self.output {
      Some(path) => {
        if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
          tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(path, source).await?;
      }
      None => print!("{source}"),
    }
    Ok(())
  }

  /// Status lines go to stderr when the Java source itself is printed to stdout.
  fn status_to_stderr(&self) -> bool {
    self.output.is_none()
  }
}

struct GenerateLogger<'a> {
  config: &'a GenerateConfig,
  colors: &'a Colors,
}

impl<'a> GenerateLogger<'a> {
  fn new(config: &'a GenerateConfig, colors: &'a Colors) -> Self {
    Self { config, colors }
  }

  fn emit(&self, line: &str) {
    if self.config.quiet {
      return;
    }
    if self.config.status_to_stderr() {
      eprintln!("{line}");
    } else {
      println!("{line}");
    }
  }

  fn info(&self, message: &str) {
    self.emit(&format!(
      "{} {}",
      format_timestamp().with(self.colors.timestamp()),
      message.with(self.colors.primary())
    ));
  }

  fn stat(&self, label: &str, value: String) {
    self.emit(&format!(
      "            {:<25} {}",
      label.with(self.colors.label()),
      value.with(self.colors.value())
    ));
  }

  fn log_loading(&self) {
    self.info(&format!("Loading class model from: {}", self.config.input.display()));
  }

  fn log_generating(&self) {
    self.info(&format!("Generating builder for `{}`...", self.config.class));
  }

  fn print_report(&self, model: &JavaModel, report: &SynthesisReport) {
    self.stat("Builder class:", model.qualified_name(report.builder_class));
    if report.is_noop() {
      self.stat("Members:", "already up to date".to_string());
      return;
    }
    self.stat("Inserted:", report.inserted.len().to_string());
    self.stat("Replaced:", report.replaced.len().to_string());
    if !report.removed.is_empty() {
      self.stat("Removed:", report.removed.len().to_string());
    }
    self.stat("Unchanged:", report.unchanged.to_string());
    for signature in &report.removed {
      self.emit(&format!(
        "              {} {}",
        "-".with(self.colors.accent()),
        signature.to_string().with(self.colors.info())
      ));
    }
    for signature in &report.inserted {
      self.emit(&format!(
        "              {} {}",
        "+".with(self.colors.success()),
        signature.to_string().with(self.colors.info())
      ));
    }
  }

  fn log_writing(&self) {
    if let Some(output) = &self.config.output {
      self.info(&format!("Writing to: {}", output.display()));
    }
  }

  fn log_saved(&self) {
    if let Some(options) = &self.config.options {
      self.info(&format!("Saved options to: {}", options.display()));
    }
  }

  fn log_success(&self) {
    self.emit("");
    self.emit(&format!(
      "{} {}",
      format_timestamp().with(self.colors.timestamp()),
      "Successfully generated builder".with(self.colors.success())
    ));
  }
}

pub async fn generate_code(config: GenerateConfig, colors: &Colors) -> anyhow::Result<()> {
  let logger = GenerateLogger::new(&config, colors);

  logger.log_loading();
  let mut model = load_model(&config.input).await?;
  let offset = config.caret(&model)?;
  let mut store = config.open_store()?;

  logger.log_generating();
  let report = match config.invoke(&mut model, offset, &mut store)? {
    Outcome::Generated(report) => report,
    Outcome::NotApplicable(reason) => anyhow::bail!("cannot generate a builder: {reason}"),
    Outcome::Cancelled => anyhow::bail!("none of the requested fields is a builder candidate"),
  };
  logger.print_report(&model, &report);

  if config.save {
    store.save()?;
    logger.log_saved();
  }

  logger.log_writing();
  let target = find_class(&model, &config.class)?;
  config.write_output(&JavaPrinter::default().print_file(&model, target)).await?;

  logger.log_success();
  Ok(())
}
