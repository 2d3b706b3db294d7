//! Persisted, process-wide option storage.
//!
//! The store is a flat string-keyed map. [`MemoryStore`] lives for one process;
//! [`PropertiesFile`] is backed by a JSON object on disk and written back explicitly.


use std::{
  fs,
  io::ErrorKind,
  path::{Path, PathBuf},
};

use indexmap::IndexMap;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
  #[error("failed to read options from {path}: {source}")]
  Read {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },
  #[error("failed to write options to {path}: {source}")]
  Write {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },
  #[error("options file {path} is not a JSON object of strings: {source}")]
  Parse {
    path: PathBuf,
    #[source]
    source: serde_json::Error,
  },
  #[error("invalid override `{0}`: expected KEY=VALUE")]
  InvalidOverride(String),
}

pub trait ConfigStore {
  fn get_value(&self, key: &str) -> Option<String>;

  /// Stores `value` under `key`; `None` removes the key.
  fn set_value(&mut self, key: &str, value: Option<&str>);

  /// Only the literal `true` (any case) is truthy; absent keys yield `default`.
  fn get_boolean(&self, key: &str, default: bool) -> bool {
    self
      .get_value(key)
      .map_or(default, |value| value.trim().eq_ignore_ascii_case("true"))
  }

  /// Applies a `KEY=VALUE` override.
  fn apply_override(&mut self, entry: &str) -> Result<(), ConfigError> {
    let (key, value) = entry
      .split_once('=')
      .filter(|(key, _)| !key.trim().is_empty())
      .ok_or_else(|| ConfigError::InvalidOverride(entry.to_string()))?;
    self.set_value(key.trim(), Some(value.trim()));
    Ok(())
  }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryStore {
  values: IndexMap<String, String>,
}

impl MemoryStore {
  #[must_use]
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_values<K: Into<String>, V: Into<String>>(values: impl IntoIterator<Item = (K, V)>) -> Self {
    Self {
      values: values.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
    }
  }

  pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
    self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
  }
}

impl ConfigStore for MemoryStore {
  fn get_value(&self, key: &str) -> Option<String> {
    self.values.get(key).cloned()
  }

  fn set_value(&mut self, key: &str, value: Option<&str>) {
    match value {
      Some(value) => {
        self.values.insert(key.to_string(), value.to_string());
      }
      None => {
        self.values.shift_remove(key);
      }
    }
  }
}

/// Store backed by a JSON file of string values. A missing file reads as empty.
#[derive(Debug, Clone)]
pub struct PropertiesFile {
  path: PathBuf,
  store: MemoryStore,
  dirty: bool,
}

impl PropertiesFile {
  pub fn open(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
    let path = path.into();
    let values = match fs::read_to_string(&path) {
      Ok(text) if text.trim().is_empty() => IndexMap::new(),
      Ok(text) => serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
        path: path.clone(),
        source,
      })?,
      Err(err) if err.kind() == ErrorKind::NotFound => IndexMap::new(),
      Err(source) => return Err(ConfigError::Read { path, source }),
    };
    log::debug!("loaded {} option values from {}", values.len(), path.display());
    Ok(Self {
      path,
      store: MemoryStore { values },
      dirty: false,
    })
  }

  #[must_use]
  pub fn path(&self) -> &Path {
    &self.path
  }

  #[must_use]
  pub fn is_dirty(&self) -> bool {
    self.dirty
  }

  /// Writes the values back when anything changed since opening or the last save.
  pub fn save(&mut self) -> Result<(), ConfigError> {
    if !self.dirty {
      return Ok(());
    }
    let write_err = |source| ConfigError::Write {
      path: self.path.clone(),
      source,
    };
    if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
      fs::create_dir_all(parent).map_err(write_err)?;
    }
    let text = serde_json::to_string_pretty(&self.store.values).map_err(|err| write_err(err.into()))?;
    fs::write(&self.path, text + "\n").map_err(write_err)?;
    self.dirty = false;
    Ok(())
  }
}

impl ConfigStore for PropertiesFile {
  fn get_value(&self, key: &str) -> Option<String> {
    self.store.get_value(key)
  }

  fn set_value(&mut self, key: &str, value: Option<&str>) {
    if self.store.get_value(key).as_deref() != value {
      self.store.set_value(key, value);
      self.dirty = true;
    }
  }
}
