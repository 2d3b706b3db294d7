//! Field and option selection.
//!
//! A host presents the candidate fields and the current options, then hands back the
//! confirmed subset. Headless front-ends use [`SelectAll`] or [`SelectByName`].

use std::collections::HashSet;

use crate::{collector::FieldRecord, options::GeneratorOptions};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
  Chosen {
    fields: Vec<FieldRecord>,
    options: GeneratorOptions,
  },
  Cancelled,
}

pub trait FieldSelector {
  /// Returns the confirmed fields (in candidate order) and options, or cancellation.
  fn choose(&mut self, candidates: &[FieldRecord], options: &GeneratorOptions) -> Selection;
}

/// Accepts every candidate with the options unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct SelectAll;

impl FieldSelector for SelectAll {
  fn choose(&mut self, candidates: &[FieldRecord], options: &GeneratorOptions) -> Selection {
    Selection::Chosen {
      fields: candidates.to_vec(),
      options: options.clone(),
    }
  }
}

/// Picks candidates by name, optionally overriding the options.
///
/// Unknown names are ignored; when nothing matches the selection is cancelled.
#[derive(Debug, Clone, Default)]
pub struct SelectByName {
  names: HashSet<String>,
  options: Option<GeneratorOptions>,
}

impl SelectByName {
  pub fn new(names: impl IntoIterator<Item = impl Into<String>>) -> Self {
    Self {
      names: names.into_iter().map(Into::into).collect(),
      options: None,
    }
  }

  #[must_use]
  pub fn with_options(mut self, options: GeneratorOptions) -> Self {
    self.options = Some(options);
    self
  }
}

impl FieldSelector for SelectByName {
  fn choose(&mut self, candidates: &[FieldRecord], options: &GeneratorOptions) -> Selection {
    let fields: Vec<FieldRecord> = candidates
      .iter()
      .filter(|candidate| self.names.contains(&candidate.name))
      .cloned()
      .collect();
    for name in &self.names {
      if !candidates.iter().any(|candidate| &candidate.name == name) {
        log::warn!("field `{name}` is not a builder candidate");
      }
    }
    if fields.is_empty() {
      return Selection::Cancelled;
    }
    Selection::Chosen {
      fields,
      options: self.options.clone().unwrap_or_else(|| options.clone()),
    }
  }
}
