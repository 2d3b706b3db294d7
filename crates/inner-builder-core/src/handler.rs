//! End-to-end invocation: collect, select, synthesize, reformat.

use crate::{
  collector::{FieldCollector, NotApplicable},
  config::ConfigStore,
  generator::{GenerateError, SynthesisReport, synthesize_in},
  model::SourceModel,
  options::GeneratorOptions,
  reformat::Reformatter,
  selection::{FieldSelector, Selection},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
  Generated(SynthesisReport),
  NotApplicable(NotApplicable),
  Cancelled,
}

/// Drives one builder generation against a host's collaborators.
pub struct InnerBuilderHandler<S, R> {
  selector: S,
  reformatter: R,
}

impl<S: FieldSelector, R: Reformatter> InnerBuilderHandler<S, R> {
  pub fn new(selector: S, reformatter: R) -> Self {
    Self { selector, reformatter }
  }

  /// Whether an invocation at `offset` has anything to offer.
  pub fn is_available<M: SourceModel>(model: &M, offset: usize) -> bool {
    FieldCollector::new(model)
      .analyze(offset)
      .is_ok_and(|collection| model.is_static_or_top_level(collection.origin))
  }

  /// Runs the whole flow for the class enclosing `offset`.
  ///
  /// Options start from `store`; the confirmed options are written back to it before
  /// synthesis. Only a rejected mutation is an error, and then the model is unchanged.
  pub fn invoke<M: SourceModel>(
    &mut self,
    model: &mut M,
    offset: usize,
    store: &mut (impl ConfigStore + ?Sized),
  ) -> Result<Outcome, GenerateError> {
    let collection = match FieldCollector::new(model).analyze(offset) {
      Ok(collection) => collection,
      Err(reason) => return Ok(not_applicable(reason)),
    };
    let target = collection.origin;
    if !model.is_static_or_top_level(target) {
      return Ok(not_applicable(NotApplicable::NotStaticOrTopLevel(
        model.qualified_name(target),
      )));
    }

    let current = GeneratorOptions::load(&*store);
    let (fields, options) = match self.selector.choose(&collection.fields, &current) {
      Selection::Chosen { fields, .. } if fields.is_empty() => {
        return Ok(not_applicable(NotApplicable::NothingSelected));
      }
      Selection::Chosen { fields, options } => (fields, options),
      Selection::Cancelled => {
        log::debug!("builder generation cancelled");
        return Ok(Outcome::Cancelled);
      }
    };
    options.persist(store);

    let reformatter = &self.reformatter;
    let report = model.transaction(|model| {
      let report = synthesize_in(model, target, &fields, &options)?;
      reformatter.reformat(model, target)?;
      Ok::<_, GenerateError>(report)
    })?;
    Ok(Outcome::Generated(report))
  }
}

fn not_applicable(reason: NotApplicable) -> Outcome {
  log::debug!("builder not applicable: {reason}");
  Outcome::NotApplicable(reason)
}
