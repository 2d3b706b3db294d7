use super::SynthesisReport;
use crate::model::{ClassId, FieldDecl, MemberId, MethodDecl, ModelError, Node, SourceModel};

/// Reconciles generated members with what the class already declares.
///
/// A member matching by signature is replaced where it stands; a constructor with the
/// same parameter types counts as a match too. Anything else is inserted after `after`,
/// or appended when no anchor is known.
pub(super) struct Merger<'m, M: SourceModel> {
  model: &'m mut M,
  report: SynthesisReport,
}

impl<'m, M: SourceModel> Merger<'m, M> {
  pub fn new(model: &'m mut M, report: SynthesisReport) -> Self {
    Self { model, report }
  }

  pub fn finish(self) -> SynthesisReport {
    self.report
  }

  pub fn add_method(&mut self, class: ClassId, after: Option<MemberId>, method: MethodDecl) -> Result<MemberId, ModelError> {
    let signature = method.signature();
    let existing = self.model.find_member(class, &signature).or_else(|| {
      method
        .is_constructor()
        .then(|| self.model.find_constructor_like(class, &method))
        .flatten()
    });

    match existing {
      Some(id) => {
        let unchanged = self
          .model
          .class(class)
          .member(id)
          .and_then(|member| member.as_method())
          .is_some_and(|current| current.shortened() == method.shortened());
        if unchanged {
          self.report.unchanged += 1;
        } else {
          log::debug!("replacing {signature} in `{}`", self.model.class(class).name);
          self.model.replace_member(class, id, Node::Method(method))?;
          self.report.replaced.push(signature);
        }
        Ok(id)
      }
      None => {
        log::debug!("adding {signature} to `{}`", self.model.class(class).name);
        let id = self.model.insert_member(class, after, Node::Method(method))?;
        self.report.inserted.push(signature);
        Ok(id)
      }
    }
  }

  /// Reuses a same-named field of the same presentable type, otherwise (re)creates it after `after`.
  pub fn find_or_create_field(
    &mut self,
    class: ClassId,
    after: Option<MemberId>,
    field: FieldDecl,
  ) -> Result<MemberId, ModelError> {
    let signature = Node::Field(field.clone()).signature();
    let existing = self
      .model
      .find_field(class, &field.name)
      .map(|(id, current)| (id, current.ty.presentable_eq(&field.ty)));

    match existing {
      Some((id, true)) => {
        if self.model.set_field_final(class, id, field.modifiers.is_final)? {
          self.report.replaced.extend(signature);
        } else {
          self.report.unchanged += 1;
        }
        Ok(id)
      }
      Some((stale, false)) => {
        log::debug!("field `{}` changed type, recreating it", field.name);
        self.model.remove_member(class, stale)?;
        self.report.removed.extend(signature.clone());
        let id = self.model.insert_member(class, after, Node::Field(field))?;
        self.report.inserted.extend(signature);
        Ok(id)
      }
      None => {
        let id = self.model.insert_member(class, after, Node::Field(field))?;
        self.report.inserted.extend(signature);
        Ok(id)
      }
    }
  }
}
