//! Field eligibility analysis.
//!
//! Walks the class enclosing the caret and its superclass chain and decides which
//! fields may take part in a builder. Ancestor fields come first in the result;
//! a field redeclared closer to the originating class shadows the inherited one.

#[cfg(test)]
mod tests;

use std::collections::HashSet;

use crate::{
  model::{ClassId, FieldDecl, Member, SourceModel, TypeRef},
  naming::identifiers::{has_lowercase_char, setter_name},
};

/// Logging facades that never make sense as builder input.
pub const LOGGER_TYPES: &[&str] = &[
  "org.apache.log4j.Logger",
  "org.apache.logging.log4j.Logger",
  "java.util.logging.Logger",
  "org.slf4j.Logger",
  "ch.qos.logback.classic.Logger",
  "net.sf.microlog.core.Logger",
  "org.apache.commons.logging.Log",
  "org.pmw.tinylog.Logger",
  "org.jboss.logging.Logger",
  "jodd.log.Logger",
];

/// One candidate field, attributed to the class that declares it.
#[derive(Debug, Clone, PartialEq, Eq, bon::Builder)]
pub struct FieldRecord {
  #[builder(into)]
  pub name: String,
  #[builder(into)]
  pub ty: TypeRef,
  #[builder(default)]
  pub is_final: bool,
  /// An accessible `setX(T)` exists somewhere in the originating class hierarchy.
  #[builder(default)]
  pub has_setter: bool,
  pub declaring_class: ClassId,
  #[builder(into)]
  pub declaring_class_name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum Exclusion {
  Inaccessible,
  UnderCaret,
  Static,
  Constant,
  LoggerType,
  InitializedFinal,
  InheritedFinal,
  Shadowed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExcludedField {
  pub name: String,
  pub declaring_class_name: String,
  pub reason: Exclusion,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NotApplicable {
  #[error("no class encloses the caret")]
  NoEnclosingType,
  #[error("class `{0}` is abstract")]
  AbstractType(String),
  #[error("class `{0}` is neither top-level nor static")]
  NotStaticOrTopLevel(String),
  #[error("class `{0}` has no eligible fields")]
  NoEligibleFields(String),
  #[error("no fields were selected")]
  NothingSelected,
}

/// Result of one collection pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Collection {
  pub origin: ClassId,
  pub fields: Vec<FieldRecord>,
  pub excluded: Vec<ExcludedField>,
}

pub struct FieldCollector<'a, M: SourceModel + ?Sized> {
  model: &'a M,
}

impl<'a, M: SourceModel + ?Sized> FieldCollector<'a, M> {
  pub fn new(model: &'a M) -> Self {
    Self { model }
  }

  /// Collects candidates for the class enclosing `offset`, keeping track of every excluded field.
  pub fn analyze(&self, offset: usize) -> Result<Collection, NotApplicable> {
    let origin = self.model.type_at(offset).ok_or(NotApplicable::NoEnclosingType)?;
    let origin_class = self.model.class(origin);
    if origin_class.modifiers.is_abstract {
      return Err(NotApplicable::AbstractType(self.model.qualified_name(origin)));
    }

    let mut fields: Vec<FieldRecord> = vec![];
    let mut excluded = vec![];
    let mut seen: HashSet<String> = HashSet::new();

    for class in self.model.ancestry(origin) {
      let mut level = vec![];
      let mut declared = vec![];
      for member in self.model.fields_of(class) {
        let Some(field) = member.as_field() else {
          continue;
        };
        declared.push(field.name.clone());
        if seen.contains(&field.name) {
          excluded.push(self.excluded(class, field, Exclusion::Shadowed));
          continue;
        }
        match self.check(origin, class, member, field, offset) {
          Ok(()) => level.push(self.record(origin, class, field)),
          Err(reason) => excluded.push(self.excluded(class, field, reason)),
        }
      }
      // An excluded declaration still hides the ancestors' field of the same name.
      seen.extend(declared);
      level.append(&mut fields);
      fields = level;
    }

    if fields.is_empty() {
      return Err(NotApplicable::NoEligibleFields(self.model.qualified_name(origin)));
    }
    Ok(Collection {
      origin,
      fields,
      excluded,
    })
  }

  fn check(
    &self,
    origin: ClassId,
    class: ClassId,
    member: &Member,
    field: &FieldDecl,
    offset: usize,
  ) -> Result<(), Exclusion> {
    let accessible = self.model.is_accessible(class, field.modifiers.visibility, origin)
      || self.has_setter_named(origin, &field.name);
    if !accessible {
      return Err(Exclusion::Inaccessible);
    }
    if member.range.contains(offset) {
      return Err(Exclusion::UnderCaret);
    }
    if field.modifiers.is_static {
      return Err(Exclusion::Static);
    }
    if !has_lowercase_char(&field.name) {
      return Err(Exclusion::Constant);
    }
    if LOGGER_TYPES.contains(&field.ty.canonical()) {
      return Err(Exclusion::LoggerType);
    }
    if field.modifiers.is_final {
      if field.initializer.is_some() {
        return Err(Exclusion::InitializedFinal);
      }
      if class != origin {
        return Err(Exclusion::InheritedFinal);
      }
    }
    Ok(())
  }

  fn has_setter_named(&self, origin: ClassId, field_name: &str) -> bool {
    let name = setter_name(field_name);
    self.model.all_methods(origin).iter().any(|method| method.name == name)
  }

  /// Finds a setter usable from `origin`: conventional name, single parameter of the field's type.
  fn has_accessible_setter(&self, origin: ClassId, field: &FieldDecl) -> bool {
    let name = setter_name(&field.name);
    self.model.ancestry(origin).into_iter().any(|class| {
      self.model.class(class).methods().any(|(_, method)| {
        !method.is_constructor()
          && method.name == name
          && method.parameters.len() == 1
          && method.parameters[0].ty.presentable_eq(&field.ty)
          && (class == origin || self.model.is_accessible(class, method.modifiers.visibility, origin))
      })
    })
  }

  fn record(&self, origin: ClassId, class: ClassId, field: &FieldDecl) -> FieldRecord {
    FieldRecord::builder()
      .name(field.name.clone())
      .ty(field.ty.clone())
      .is_final(field.modifiers.is_final)
      .has_setter(self.has_accessible_setter(origin, field))
      .declaring_class(class)
      .declaring_class_name(self.model.qualified_name(class))
      .build()
  }

  fn excluded(&self, class: ClassId, field: &FieldDecl, reason: Exclusion) -> ExcludedField {
    log::trace!("skipping field `{}` of `{}`: {reason}", field.name, self.model.class(class).name);
    ExcludedField {
      name: field.name.clone(),
      declaring_class_name: self.model.qualified_name(class),
      reason,
    }
  }
}

/// Eligible fields for the class at `offset`, ancestors first; `None` when nothing applies.
pub fn collect<M: SourceModel + ?Sized>(model: &M, offset: usize) -> Option<Vec<FieldRecord>> {
  match FieldCollector::new(model).analyze(offset) {
    Ok(collection) => Some(collection.fields),
    Err(reason) => {
      log::debug!("builder not applicable: {reason}");
      None
    }
  }
}
