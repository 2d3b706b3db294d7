pub mod generate;
pub mod list;

use std::path::Path;

use anyhow::Context;
pub use generate::{GenerateConfig, generate_code};
use inner_builder_core::{
  config::{ConfigError, ConfigStore, MemoryStore, PropertiesFile},
  model::{ClassId, JavaModel, SourceFile},
};
pub use list::{list_fields, list_options};

/// Reads a JSON class model exported by a host.
async fn load_model(input: &Path) -> anyhow::Result<JavaModel> {
  let text = tokio::fs::read_to_string(input)
    .await
    .with_context(|| format!("failed to read class model {}", input.display()))?;
  let file: SourceFile =
    serde_json::from_str(&text).with_context(|| format!("{} is not a valid class model", input.display()))?;
  Ok(JavaModel::from_source(file)?)
}

fn find_class(model: &JavaModel, name: &str) -> anyhow::Result<ClassId> {
  model
    .find_class(name)
    .ok_or_else(|| anyhow::anyhow!("class `{name}` is not declared in the model"))
}

/// Options file when one was given, otherwise a store that lives for this run.
pub enum OptionStore {
  Memory(MemoryStore),
  File(PropertiesFile),
}

impl OptionStore {
  pub fn open(path: Option<&Path>) -> Result<Self, ConfigError> {
    match path {
      Some(path) => Ok(Self::File(PropertiesFile::open(path)?)),
      None => Ok(Self::Memory(MemoryStore::new())),
    }
  }

  pub fn save(&mut self) -> Result<(), ConfigError> {
    match self {
      Self::Memory(_) => Ok(()),
      Self::File(file) => file.save(),
    }
  }
}

impl ConfigStore for OptionStore {
  fn get_value(&self, key: &str) -> Option<String> {
    match self {
      Self::Memory(store) => store.get_value(key),
      Self::File(file) => file.get_value(key),
    }
  }

  fn set_value(&mut self, key: &str, value: Option<&str>) {
    match self {
      Self::Memory(store) => store.set_value(key, value),
      Self::File(file) => file.set_value(key, value),
    }
  }
}
