use serde::{Deserialize, Serialize};

use super::{
  ModelError, SourceModel,
  nodes::{Annotation, ClassDecl, ClassId, Documentation, FieldDecl, Member, MemberId, MethodDecl, Node, TextRange},
  types::Modifiers,
};

/// Serialized form of one compilation unit, as produced by a host exporting its code model.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceFile {
  #[serde(default)]
  pub package: String,
  #[serde(default)]
  pub classes: Vec<ClassSource>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, bon::Builder)]
pub struct ClassSource {
  #[builder(into)]
  pub name: String,
  #[serde(default)]
  #[builder(default)]
  pub modifiers: Modifiers,
  #[serde(default, rename = "extends", skip_serializing_if = "Option::is_none")]
  #[builder(into)]
  pub superclass: Option<String>,
  #[serde(default)]
  #[builder(default)]
  pub read_only: bool,
  #[serde(default, skip_serializing_if = "Documentation::is_empty")]
  #[builder(default)]
  pub docs: Documentation,
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  #[builder(default)]
  pub annotations: Vec<Annotation>,
  #[serde(default)]
  #[builder(default)]
  pub fields: Vec<FieldDecl>,
  #[serde(default)]
  #[builder(default)]
  pub methods: Vec<MethodDecl>,
  #[serde(default)]
  #[builder(default)]
  pub classes: Vec<ClassSource>,
}

/// Arena-backed Java code model.
///
/// Offsets are synthetic: every declaration gets a range in document order so a
/// caret can be placed inside a class or inside one of its field declarations.
#[derive(Debug, Clone, Default)]
pub struct JavaModel {
  classes: Vec<ClassDecl>,
  next_member: u64,
}

impl JavaModel {
  #[must_use]
  pub fn new() -> Self {
    Self::default()
  }

  pub fn from_source(file: SourceFile) -> Result<Self, ModelError> {
    let mut model = Self::new();
    model.add_file(file)?;
    Ok(model)
  }

  /// Adds every class of `file`, returning the ids of its top-level classes.
  pub fn add_file(&mut self, file: SourceFile) -> Result<Vec<ClassId>, ModelError> {
    let mut added = Vec::with_capacity(file.classes.len());
    for class in file.classes {
      added.push(self.add_class(class, &file.package, None)?);
    }
    self.relayout();
    Ok(added)
  }

  fn add_class(&mut self, source: ClassSource, package: &str, outer: Option<ClassId>) -> Result<ClassId, ModelError> {
    let ClassSource {
      name,
      modifiers,
      superclass,
      read_only,
      docs,
      annotations,
      fields,
      methods,
      classes,
    } = source;

    let id = ClassId(self.classes.len());
    self.classes.push(
      ClassDecl::builder()
        .name(name)
        .package(package)
        .modifiers(modifiers)
        .maybe_superclass(superclass)
        .maybe_outer(outer)
        .docs(docs)
        .annotations(annotations)
        .read_only(read_only)
        .build(),
    );
    let qualified = self.qualified_name(id);
    if self.classes.iter().enumerate().any(|(index, _)| {
      let other = ClassId(index);
      other != id && self.qualified_name(other) == qualified
    }) {
      return Err(ModelError::DuplicateClass(qualified));
    }

    let mut members = Vec::with_capacity(fields.len() + methods.len() + classes.len());
    members.extend(fields.into_iter().map(Node::Field));
    members.extend(methods.into_iter().map(Node::Method));
    for node in members {
      let member = self.allocate(node);
      self.classes[id.0].members.push(member);
    }
    for nested in classes {
      let nested_id = self.add_class(nested, package, Some(id))?;
      let member = self.allocate(Node::Class(nested_id));
      self.classes[id.0].members.push(member);
    }
    Ok(id)
  }

  pub fn class_ids(&self) -> impl Iterator<Item = ClassId> + '_ {
    (0..self.classes.len()).map(ClassId)
  }

  /// Resolves a qualified name first, then a unique simple name.
  #[must_use]
  pub fn find_class(&self, name: &str) -> Option<ClassId> {
    self
      .class_ids()
      .find(|&id| self.qualified_name(id) == name)
      .or_else(|| {
        let mut matches = self.class_ids().filter(|&id| self.classes[id.0].name == name);
        match (matches.next(), matches.next()) {
          (Some(id), None) => Some(id),
          _ => None,
        }
      })
  }

  /// Offset at the opening of the class body, outside every member.
  #[must_use]
  pub fn caret_in_class(&self, id: ClassId) -> usize {
    self.classes[id.0].range.start
  }

  /// Offset inside the declaration of the named field.
  #[must_use]
  pub fn caret_in_field(&self, id: ClassId, field: &str) -> Option<usize> {
    self.classes[id.0]
      .members
      .iter()
      .find(|m| m.as_field().is_some_and(|f| f.name == field))
      .map(|m| m.range.start + 1)
  }

  fn allocate(&mut self, node: Node) -> Member {
    let id = MemberId(self.next_member);
    self.next_member += 1;
    Member {
      id,
      node,
      range: TextRange::default(),
    }
  }

  fn ensure_writable(&self, class: ClassId) -> Result<(), ModelError> {
    let top = self.top_level_of(class);
    if self.classes[top.0].read_only {
      return Err(ModelError::ReadOnly {
        class: self.qualified_name(top),
      });
    }
    Ok(())
  }

  fn unknown_member(&self, class: ClassId, member: MemberId) -> ModelError {
    ModelError::UnknownMember {
      class: self.qualified_name(class),
      member,
    }
  }

  /// Fields go after the last field, methods after the last field or method.
  fn default_position(&self, class: ClassId, node: &Node) -> usize {
    let members = &self.classes[class.0].members;
    let groups_with = |member: &Member| match node {
      Node::Field(_) => matches!(member.node, Node::Field(_)),
      _ => !matches!(member.node, Node::Class(_)),
    };
    members.iter().rposition(groups_with).map_or(0, |index| index + 1)
  }

  fn relayout(&mut self) {
    let mut cursor = 0;
    let top_level: Vec<ClassId> = self
      .class_ids()
      .filter(|&id| self.classes[id.0].outer.is_none())
      .collect();
    for id in top_level {
      self.layout_class(id, &mut cursor);
    }
  }

  fn layout_class(&mut self, id: ClassId, cursor: &mut usize) -> TextRange {
    let start = *cursor;
    *cursor += 1;
    for index in 0..self.classes[id.0].members.len() {
      let member_start = *cursor;
      let range = match self.classes[id.0].members[index].node {
        Node::Class(nested) => self.layout_class(nested, cursor),
        _ => {
          *cursor += 2;
          TextRange::new(member_start, *cursor)
        }
      };
      self.classes[id.0].members[index].range = range;
    }
    *cursor += 1;
    let range = TextRange::new(start, *cursor);
    self.classes[id.0].range = range;
    range
  }
}

impl SourceModel for JavaModel {
  fn type_at(&self, offset: usize) -> Option<ClassId> {
    self
      .class_ids()
      .filter(|&id| self.classes[id.0].range.contains(offset))
      .min_by_key(|&id| {
        let range = self.classes[id.0].range;
        range.end - range.start
      })
  }

  fn class(&self, id: ClassId) -> &ClassDecl {
    &self.classes[id.0]
  }

  fn superclass_of(&self, id: ClassId) -> Option<ClassId> {
    let class = &self.classes[id.0];
    let name = class.superclass.as_deref()?;
    let package = &self.classes[self.top_level_of(id).0].package;
    self
      .class_ids()
      .find(|&other| self.qualified_name(other) == name)
      .or_else(|| {
        self
          .class_ids()
          .find(|&other| self.classes[other.0].name == name && &self.classes[other.0].package == package)
      })
      .or_else(|| self.find_class(name))
      .filter(|&parent| parent != id)
  }

  fn create_nested_class(&mut self, outer: ClassId, template: ClassDecl) -> Result<ClassId, ModelError> {
    self.ensure_writable(outer)?;
    let id = ClassId(self.classes.len());
    let package = self.classes[outer.0].package.clone();
    self.classes.push(ClassDecl {
      package,
      outer: Some(outer),
      read_only: false,
      members: vec![],
      ..template
    });
    let member = self.allocate(Node::Class(id));
    self.classes[outer.0].members.push(member);
    self.relayout();
    Ok(id)
  }

  fn insert_member(&mut self, class: ClassId, after: Option<MemberId>, node: Node) -> Result<MemberId, ModelError> {
    if matches!(node, Node::Class(_)) {
      return Err(ModelError::UnsupportedNode);
    }
    self.ensure_writable(class)?;
    let index = match after {
      Some(anchor) => {
        self.classes[class.0]
          .position_of(anchor)
          .ok_or_else(|| self.unknown_member(class, anchor))?
          + 1
      }
      None => self.default_position(class, &node),
    };
    let member = self.allocate(node);
    let id = member.id;
    self.classes[class.0].members.insert(index, member);
    self.relayout();
    Ok(id)
  }

  fn replace_member(&mut self, class: ClassId, member: MemberId, node: Node) -> Result<(), ModelError> {
    if matches!(node, Node::Class(_)) {
      return Err(ModelError::UnsupportedNode);
    }
    self.ensure_writable(class)?;
    let index = self.classes[class.0]
      .position_of(member)
      .ok_or_else(|| self.unknown_member(class, member))?;
    self.classes[class.0].members[index].node = node;
    Ok(())
  }

  fn remove_member(&mut self, class: ClassId, member: MemberId) -> Result<(), ModelError> {
    self.ensure_writable(class)?;
    let index = self.classes[class.0]
      .position_of(member)
      .ok_or_else(|| self.unknown_member(class, member))?;
    self.classes[class.0].members.remove(index);
    self.relayout();
    Ok(())
  }

  fn transaction<T, E>(&mut self, f: impl FnOnce(&mut Self) -> Result<T, E>) -> Result<T, E> {
    let snapshot = (self.classes.clone(), self.next_member);
    let result = f(self);
    if result.is_err() {
      (self.classes, self.next_member) = snapshot;
    }
    result
  }
}
