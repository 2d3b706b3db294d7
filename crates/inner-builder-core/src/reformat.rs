//! Cosmetic post-processing applied once after synthesis.

use crate::model::{ClassId, ModelError, SourceModel};

pub trait Reformatter {
  fn reformat<M: SourceModel>(&self, model: &mut M, class: ClassId) -> Result<(), ModelError>;
}

/// Leaves the model untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoReformat;

impl Reformatter for NoReformat {
  fn reformat<M: SourceModel>(&self, _model: &mut M, _class: ClassId) -> Result<(), ModelError> {
    Ok(())
  }
}

/// Drops `java.lang.` qualifiers from type references in a class and its nested classes.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShortenReferences;

impl Reformatter for ShortenReferences {
  fn reformat<M: SourceModel>(&self, model: &mut M, class: ClassId) -> Result<(), ModelError> {
    let mut pending = vec![class];
    while let Some(current) = pending.pop() {
      let changed: Vec<_> = model
        .class(current)
        .members
        .iter()
        .filter_map(|member| {
          let shortened = member.node.shortened();
          (shortened != member.node).then_some((member.id, shortened))
        })
        .collect();
      for (member, node) in changed {
        model.replace_member(current, member, node)?;
      }
      pending.extend(model.class(current).nested_classes());
    }
    Ok(())
  }
}
