use serde::{Deserialize, Serialize};

use super::types::{Modifiers, TypeRef};

/// Arena handle of a class inside a [`super::SourceModel`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClassId(pub(crate) usize);

/// Stable identity of a member; survives in-place replacement and sibling insertion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MemberId(pub(crate) u64);

/// Half-open `[start, end)` offset range of a declaration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct TextRange {
  pub start: usize,
  pub end: usize,
}

impl TextRange {
  #[must_use]
  pub const fn new(start: usize, end: usize) -> Self {
    Self { start, end }
  }

  #[must_use]
  pub const fn contains(&self, offset: usize) -> bool {
    self.start <= offset && offset < self.end
  }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Documentation {
  lines: Vec<String>,
}

impl Documentation {
  #[must_use]
  pub fn from_lines(lines: impl IntoIterator<Item = impl Into<String>>) -> Self {
    Self {
      lines: lines.into_iter().map(Into::into).collect(),
    }
  }

  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.lines.is_empty()
  }

  #[must_use]
  pub fn lines(&self) -> &[String] {
    &self.lines
  }
}

/// Annotation by (possibly qualified) name plus its raw argument text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Annotation {
  pub name: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub arguments: Option<String>,
}

impl Annotation {
  pub fn marker(name: impl Into<String>) -> Self {
    Self {
      name: name.into(),
      arguments: None,
    }
  }

  pub fn with_arguments(name: impl Into<String>, arguments: impl Into<String>) -> Self {
    Self {
      name: name.into(),
      arguments: Some(arguments.into()),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum Expr {
  This,
  Name {
    name: String,
  },
  Field {
    target: Box<Expr>,
    name: String,
  },
  Call {
    #[serde(default)]
    target: Option<Box<Expr>>,
    method: String,
    #[serde(default)]
    args: Vec<Expr>,
  },
  New {
    class: String,
    #[serde(default)]
    args: Vec<Expr>,
  },
}

impl Expr {
  pub fn name(name: impl Into<String>) -> Self {
    Expr::Name { name: name.into() }
  }

  pub fn field(target: Expr, name: impl Into<String>) -> Self {
    Expr::Field {
      target: Box::new(target),
      name: name.into(),
    }
  }

  pub fn this_field(name: impl Into<String>) -> Self {
    Self::field(Expr::This, name)
  }

  pub fn call(target: Option<Expr>, method: impl Into<String>, args: Vec<Expr>) -> Self {
    Expr::Call {
      target: target.map(Box::new),
      method: method.into(),
      args,
    }
  }

  pub fn new_instance(class: impl Into<String>, args: Vec<Expr>) -> Self {
    Expr::New {
      class: class.into(),
      args,
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum Statement {
  Assign { target: Expr, value: Expr },
  Expr { expr: Expr },
  Local { ty: TypeRef, name: String, init: Expr },
  Return { value: Expr },
  /// Hand-written statement text carried through untouched.
  Raw { text: String },
}

impl Statement {
  #[must_use]
  pub fn shortened(&self) -> Self {
    match self {
      Statement::Local { ty, name, init } => Statement::Local {
        ty: ty.shortened(),
        name: name.clone(),
        init: init.clone(),
      },
      other => other.clone(),
    }
  }

  #[must_use]
  pub fn assign(target: Expr, value: Expr) -> Self {
    Statement::Assign { target, value }
  }

  #[must_use]
  pub fn returns(value: Expr) -> Self {
    Statement::Return { value }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, bon::Builder)]
pub struct FieldDecl {
  #[builder(into)]
  pub name: String,
  #[builder(into)]
  pub ty: TypeRef,
  #[serde(default)]
  #[builder(default)]
  pub modifiers: Modifiers,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  #[builder(into)]
  pub initializer: Option<String>,
  #[serde(default, skip_serializing_if = "Documentation::is_empty")]
  #[builder(default)]
  pub docs: Documentation,
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  #[builder(default)]
  pub annotations: Vec<Annotation>,
}

impl FieldDecl {
  #[must_use]
  pub fn shortened(&self) -> Self {
    Self {
      ty: self.ty.shortened(),
      ..self.clone()
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, bon::Builder)]
pub struct Parameter {
  #[builder(into)]
  pub name: String,
  #[builder(into)]
  pub ty: TypeRef,
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  #[builder(default)]
  pub annotations: Vec<Annotation>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MethodKind {
  Constructor,
  #[default]
  Method,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, bon::Builder)]
pub struct MethodDecl {
  #[serde(default)]
  #[builder(default)]
  pub kind: MethodKind,
  #[builder(into)]
  pub name: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  #[builder(into)]
  pub return_type: Option<TypeRef>,
  #[serde(default)]
  #[builder(default)]
  pub parameters: Vec<Parameter>,
  #[serde(default)]
  #[builder(default)]
  pub modifiers: Modifiers,
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  #[builder(default)]
  pub annotations: Vec<Annotation>,
  #[serde(default, skip_serializing_if = "Documentation::is_empty")]
  #[builder(default)]
  pub docs: Documentation,
  #[serde(default)]
  #[builder(default)]
  pub body: Vec<Statement>,
}

impl MethodDecl {
  /// Copy with `java.lang.` dropped from every type reference.
  #[must_use]
  pub fn shortened(&self) -> Self {
    Self {
      return_type: self.return_type.as_ref().map(TypeRef::shortened),
      parameters: self
        .parameters
        .iter()
        .map(|p| Parameter {
          ty: p.ty.shortened(),
          ..p.clone()
        })
        .collect(),
      body: self.body.iter().map(Statement::shortened).collect(),
      ..self.clone()
    }
  }

  #[must_use]
  pub fn is_constructor(&self) -> bool {
    self.kind == MethodKind::Constructor
  }

  #[must_use]
  pub fn signature(&self) -> Signature {
    let kind = match self.kind {
      MethodKind::Constructor => SignatureKind::Constructor,
      MethodKind::Method => SignatureKind::Method,
    };
    Signature {
      kind,
      name: self.name.clone(),
      params: self.parameters.iter().map(|p| p.ty.presentable()).collect(),
    }
  }

  /// Parameter lists compare by presentable type only, ignoring parameter names.
  #[must_use]
  pub fn has_parameter_types_of(&self, other: &MethodDecl) -> bool {
    self.parameters.len() == other.parameters.len()
      && self
        .parameters
        .iter()
        .zip(&other.parameters)
        .all(|(a, b)| a.ty.presentable_eq(&b.ty))
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
  Field(FieldDecl),
  Method(MethodDecl),
  Class(ClassId),
}

impl Node {
  #[must_use]
  pub fn shortened(&self) -> Self {
    match self {
      Node::Field(field) => Node::Field(field.shortened()),
      Node::Method(method) => Node::Method(method.shortened()),
      Node::Class(id) => Node::Class(*id),
    }
  }

  /// Merge identity of the node; nested classes are matched by name elsewhere.
  #[must_use]
  pub fn signature(&self) -> Option<Signature> {
    match self {
      Node::Field(field) => Some(Signature::field(&field.name)),
      Node::Method(method) => Some(method.signature()),
      Node::Class(_) => None,
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
  pub id: MemberId,
  pub node: Node,
  pub range: TextRange,
}

impl Member {
  #[must_use]
  pub fn as_field(&self) -> Option<&FieldDecl> {
    match &self.node {
      Node::Field(field) => Some(field),
      _ => None,
    }
  }

  #[must_use]
  pub fn as_method(&self) -> Option<&MethodDecl> {
    match &self.node {
      Node::Method(method) => Some(method),
      _ => None,
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum SignatureKind {
  Field,
  Constructor,
  Method,
}

/// Kind, name and ordered presentable parameter types of a member.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Signature {
  pub kind: SignatureKind,
  pub name: String,
  pub params: Vec<String>,
}

impl Signature {
  pub fn field(name: impl Into<String>) -> Self {
    Self {
      kind: SignatureKind::Field,
      name: name.into(),
      params: vec![],
    }
  }

  pub fn method(name: impl Into<String>, params: impl IntoIterator<Item = impl Into<String>>) -> Self {
    Self {
      kind: SignatureKind::Method,
      name: name.into(),
      params: params.into_iter().map(Into::into).collect(),
    }
  }

  pub fn constructor(name: impl Into<String>, params: impl IntoIterator<Item = impl Into<String>>) -> Self {
    Self {
      kind: SignatureKind::Constructor,
      ..Self::method(name, params)
    }
  }
}

impl std::fmt::Display for Signature {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self.kind {
      SignatureKind::Field => write!(f, "field {}", self.name),
      kind => write!(f, "{kind} {}({})", self.name, self.params.join(", ")),
    }
  }
}

/// A class declaration. Members keep source order; nested classes appear as [`Node::Class`].
#[derive(Debug, Clone, PartialEq, Eq, bon::Builder)]
pub struct ClassDecl {
  #[builder(into)]
  pub name: String,
  #[builder(default, into)]
  pub package: String,
  #[builder(default)]
  pub modifiers: Modifiers,
  #[builder(into)]
  pub superclass: Option<String>,
  pub outer: Option<ClassId>,
  #[builder(default)]
  pub docs: Documentation,
  #[builder(default)]
  pub annotations: Vec<Annotation>,
  #[builder(default)]
  pub members: Vec<Member>,
  #[builder(default)]
  pub range: TextRange,
  #[builder(default)]
  pub read_only: bool,
}

impl ClassDecl {
  pub fn fields(&self) -> impl Iterator<Item = (MemberId, &FieldDecl)> {
    self.members.iter().filter_map(|m| m.as_field().map(|f| (m.id, f)))
  }

  pub fn methods(&self) -> impl Iterator<Item = (MemberId, &MethodDecl)> {
    self.members.iter().filter_map(|m| m.as_method().map(|f| (m.id, f)))
  }

  pub fn nested_classes(&self) -> impl Iterator<Item = ClassId> + '_ {
    self.members.iter().filter_map(|m| match m.node {
      Node::Class(id) => Some(id),
      _ => None,
    })
  }

  #[must_use]
  pub fn member(&self, id: MemberId) -> Option<&Member> {
    self.members.iter().find(|m| m.id == id)
  }

  #[must_use]
  pub fn position_of(&self, id: MemberId) -> Option<usize> {
    self.members.iter().position(|m| m.id == id)
  }
}
