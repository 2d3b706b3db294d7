//! Structured code model consumed by the collector and the generator.
//!
//! [`SourceModel`] is the capability surface a host exposes: locating the type at a
//! caret, walking the superclass chain, and transactional member mutation. The
//! in-memory [`JavaModel`] implements it for tests and the command-line front-end.

mod memory;
mod nodes;
mod types;


pub use memory::{ClassSource, JavaModel, SourceFile};
pub use nodes::{
  Annotation, ClassDecl, ClassId, Documentation, Expr, FieldDecl, Member, MemberId, MethodDecl, MethodKind, Node,
  Parameter, Signature, SignatureKind, Statement, TextRange,
};
pub use types::{Modifiers, TypeRef, Visibility};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModelError {
  #[error("class `{class}` is read-only")]
  ReadOnly { class: String },
  #[error("class `{class}` has no member {member:?}")]
  UnknownMember { class: String, member: MemberId },
  #[error("class `{0}` is not declared in the model")]
  UnknownClass(String),
  #[error("class `{0}` is declared more than once")]
  DuplicateClass(String),
  #[error("nested classes must be created with `create_nested_class`")]
  UnsupportedNode,
}

pub trait SourceModel {
  /// Innermost class whose declaration contains `offset`.
  fn type_at(&self, offset: usize) -> Option<ClassId>;

  fn class(&self, id: ClassId) -> &ClassDecl;

  fn superclass_of(&self, id: ClassId) -> Option<ClassId>;

  fn create_nested_class(&mut self, outer: ClassId, template: ClassDecl) -> Result<ClassId, ModelError>;

  /// Inserts `node` directly after `after`. Without an anchor the model picks its default
  /// position for the node kind.
  fn insert_member(&mut self, class: ClassId, after: Option<MemberId>, node: Node) -> Result<MemberId, ModelError>;

  /// Swaps the node of an existing member, keeping its id and position.
  fn replace_member(&mut self, class: ClassId, member: MemberId, node: Node) -> Result<(), ModelError>;

  fn remove_member(&mut self, class: ClassId, member: MemberId) -> Result<(), ModelError>;

  /// Runs `f` atomically: when it fails, every mutation it made is discarded.
  fn transaction<T, E>(&mut self, f: impl FnOnce(&mut Self) -> Result<T, E>) -> Result<T, E>
  where
    Self: Sized;

  /// Sets or clears `final` on a field, returning whether anything changed.
  fn set_field_final(&mut self, class: ClassId, member: MemberId, is_final: bool) -> Result<bool, ModelError> {
    let Some(field) = self.class(class).member(member).and_then(Member::as_field) else {
      return Err(ModelError::UnknownMember {
        class: self.qualified_name(class),
        member,
      });
    };
    if field.modifiers.is_final == is_final {
      return Ok(false);
    }
    let mut field = field.clone();
    field.modifiers.is_final = is_final;
    self.replace_member(class, member, Node::Field(field))?;
    Ok(true)
  }

  fn top_level_of(&self, id: ClassId) -> ClassId {
    let mut current = id;
    while let Some(outer) = self.class(current).outer {
      current = outer;
    }
    current
  }

  fn is_static_or_top_level(&self, id: ClassId) -> bool {
    let class = self.class(id);
    class.outer.is_none() || class.modifiers.is_static
  }

  fn qualified_name(&self, id: ClassId) -> String {
    let class = self.class(id);
    match class.outer {
      Some(outer) => format!("{}.{}", self.qualified_name(outer), class.name),
      None if class.package.is_empty() => class.name.clone(),
      None => format!("{}.{}", class.package, class.name),
    }
  }

  /// `id` followed by its superclasses, nearest first.
  fn ancestry(&self, id: ClassId) -> Vec<ClassId> {
    let mut chain = vec![id];
    let mut current = id;
    while let Some(parent) = self.superclass_of(current) {
      if chain.contains(&parent) {
        break;
      }
      chain.push(parent);
      current = parent;
    }
    chain
  }

  fn fields_of(&self, id: ClassId) -> Vec<&Member> {
    self
      .class(id)
      .members
      .iter()
      .filter(|m| matches!(m.node, Node::Field(_)))
      .collect()
  }

  /// Methods declared on `id` and on every superclass.
  fn all_methods(&self, id: ClassId) -> Vec<&MethodDecl> {
    self
      .ancestry(id)
      .into_iter()
      .flat_map(|class| self.class(class).methods().map(|(_, method)| method))
      .collect()
  }

  /// Java access check for a member of `owner` with `visibility`, referenced from `from`.
  fn is_accessible(&self, owner: ClassId, visibility: Visibility, from: ClassId) -> bool {
    match visibility {
      Visibility::Public | Visibility::Protected => true,
      Visibility::Package => self.class(self.top_level_of(owner)).package == self.class(self.top_level_of(from)).package,
      Visibility::Private => self.top_level_of(owner) == self.top_level_of(from),
    }
  }

  fn find_nested_class(&self, outer: ClassId, name: &str) -> Option<ClassId> {
    self
      .class(outer)
      .nested_classes()
      .find(|&nested| self.class(nested).name == name)
  }

  fn find_field(&self, class: ClassId, name: &str) -> Option<(MemberId, &FieldDecl)> {
    self.class(class).fields().find(|(_, field)| field.name == name)
  }

  fn find_member(&self, class: ClassId, signature: &Signature) -> Option<MemberId> {
    self
      .class(class)
      .members
      .iter()
      .find(|m| m.node.signature().as_ref() == Some(signature))
      .map(|m| m.id)
  }

  /// Constructor whose parameter types equal those of `prototype`, whatever its name.
  fn find_constructor_like(&self, class: ClassId, prototype: &MethodDecl) -> Option<MemberId> {
    self
      .class(class)
      .methods()
      .find(|(_, method)| method.is_constructor() && method.has_parameter_types_of(prototype))
      .map(|(id, _)| id)
  }
}
