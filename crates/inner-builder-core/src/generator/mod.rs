//! Builder synthesis and merge.
//!
//! Given a target class and the selected [`FieldRecord`]s, [`synthesize`] makes sure the
//! target carries a nested `Builder` class with:
//!
//! - a private mirror field per selected field
//! - a private target constructor taking the builder
//! - a builder constructor taking the final fields
//! - an optional static factory and an optional copy factory or copy constructor
//! - one setter per mutable field
//! - a terminal `build()` method
//!
//! Every member is merged by signature, so running synthesis again with the same input
//! leaves the class untouched. The whole sequence runs in a single model transaction.

mod members;
mod merge;

#[cfg(test)]
mod tests;

use members::BuilderContext;
use merge::Merger;

use crate::{
  collector::FieldRecord,
  model::{ClassId, MemberId, ModelError, Signature, SourceModel},
  options::GeneratorOptions,
};

pub const BUILDER_CLASS_NAME: &str = "Builder";
pub const BUILD_METHOD_NAME: &str = "build";
pub const BUILDER_PARAMETER_NAME: &str = "builder";
pub const COPY_PARAMETER_NAME: &str = "copy";
pub const SETTER_PARAMETER_NAME: &str = "val";
pub const SETTER_ALTERNATE_PARAMETER_NAME: &str = "value";
pub const JSR305_NONNULL: &str = "javax.annotation.Nonnull";
pub const PMD_FIELD_NAME_SUPPRESSION: &str = "\"PMD.AvoidFieldNameMatchingMethodName\"";

#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
  #[error("source model rejected the builder: {0}")]
  Mutation(#[from] ModelError),
}

/// What one synthesis run changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynthesisReport {
  pub builder_class: ClassId,
  /// The builder class did not exist before this run.
  pub created_builder: bool,
  pub inserted: Vec<Signature>,
  pub replaced: Vec<Signature>,
  pub removed: Vec<Signature>,
  /// Members that already matched what would be generated.
  pub unchanged: usize,
}

impl SynthesisReport {
  fn new(builder_class: ClassId, created_builder: bool) -> Self {
    Self {
      builder_class,
      created_builder,
      inserted: vec![],
      replaced: vec![],
      removed: vec![],
      unchanged: 0,
    }
  }

  /// Nothing in the model changed.
  #[must_use]
  pub fn is_noop(&self) -> bool {
    !self.created_builder && self.inserted.is_empty() && self.replaced.is_empty() && self.removed.is_empty()
  }
}

/// Generates or refreshes the builder of `target` inside one model transaction.
///
/// On error every mutation made so far is rolled back and the model is left as it was.
pub fn synthesize<M: SourceModel>(
  model: &mut M,
  target: ClassId,
  fields: &[FieldRecord],
  options: &GeneratorOptions,
) -> Result<SynthesisReport, GenerateError> {
  model.transaction(|model| synthesize_in(model, target, fields, options))
}

/// Step sequence of [`synthesize`], without its transaction.
pub(crate) fn synthesize_in<M: SourceModel>(
  model: &mut M,
  target: ClassId,
  fields: &[FieldRecord],
  options: &GeneratorOptions,
) -> Result<SynthesisReport, GenerateError> {
  let target_name = model.class(target).name.clone();
  let context = BuilderContext {
    target_name: &target_name,
    fields,
    options,
  };

  let (builder, created) = match model.find_nested_class(target, BUILDER_CLASS_NAME) {
    Some(builder) => (builder, false),
    None => (model.create_nested_class(target, context.builder_class())?, true),
  };
  let mut merger = Merger::new(model, SynthesisReport::new(builder, created));

  let constructor = merger.add_method(target, None, context.target_constructor())?;

  let mut last_field: Option<MemberId> = None;
  for field in fields {
    last_field = Some(merger.find_or_create_field(builder, last_field, context.mirror_field(field))?);
  }

  let factory_host = if context.factory_on_builder() { builder } else { target };
  let mut factory_anchor = (factory_host == target).then_some(constructor);
  if options.new_builder_method {
    factory_anchor = Some(merger.add_method(factory_host, factory_anchor, context.factory_method())?);
  }

  merger.add_method(builder, None, context.builder_constructor())?;

  if options.copy_constructor {
    if options.new_builder_method {
      let copy_anchor = if factory_host == target { factory_anchor } else { None };
      merger.add_method(target, copy_anchor, context.copy_method())?;
    } else {
      merger.add_method(builder, None, context.copy_constructor())?;
    }
  }

  let mut last_setter: Option<MemberId> = None;
  for field in context.non_final_fields() {
    last_setter = Some(merger.add_method(builder, last_setter, context.setter(field))?);
  }

  merger.add_method(builder, last_setter, context.build_method())?;

  let report = merger.finish();
  log::info!(
    "builder for `{}`: {} inserted, {} replaced, {} removed, {} unchanged",
    model.qualified_name(target),
    report.inserted.len(),
    report.replaced.len(),
    report.removed.len(),
    report.unchanged,
  );
  Ok(report)
}
