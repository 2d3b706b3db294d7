use std::{
  fmt::{Display, Formatter},
  sync::LazyLock,
};

use regex::Regex;
use serde::{Deserialize, Serialize};

const PRIMITIVE_TYPES: &[&str] = &["boolean", "byte", "char", "short", "int", "long", "float", "double"];

static JAVA_LANG_RE: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"\bjava\.lang\.([A-Z])").expect("valid java.lang regex"));

static PACKAGE_QUALIFIER_RE: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"\b(?:[a-z_][A-Za-z0-9_$]*\.)+").expect("valid package qualifier regex"));

/// Semantic reference to a declared Java type, kept in canonical (fully qualified) form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypeRef {
  canonical: String,
}

impl TypeRef {
  pub fn new(canonical: impl Into<String>) -> Self {
    Self {
      canonical: canonical.into(),
    }
  }

  #[must_use]
  pub fn canonical(&self) -> &str {
    &self.canonical
  }

  /// The type as a reader sees it: package qualifiers dropped from every segment,
  /// so `java.util.List<java.lang.String>` presents as `List<String>`.
  #[must_use]
  pub fn presentable(&self) -> String {
    PACKAGE_QUALIFIER_RE.replace_all(&self.canonical, "").into_owned()
  }

  #[must_use]
  pub fn is_primitive(&self) -> bool {
    PRIMITIVE_TYPES.contains(&self.canonical.as_str())
  }

  #[must_use]
  pub fn presentable_eq(&self, other: &TypeRef) -> bool {
    self.presentable() == other.presentable()
  }

  /// Drops `java.lang.` qualifiers of its top-level types, which never need an import.
  #[must_use]
  pub fn shortened(&self) -> TypeRef {
    TypeRef::new(JAVA_LANG_RE.replace_all(&self.canonical, "$1").into_owned())
  }
}

impl From<&str> for TypeRef {
  fn from(value: &str) -> Self {
    TypeRef::new(value)
  }
}

impl Display for TypeRef {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    f.write_str(&self.canonical)
  }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Visibility {
  Public,
  Protected,
  #[default]
  Package,
  Private,
}

impl Visibility {
  /// Source keyword, `None` for package-private.
  #[must_use]
  pub const fn keyword(self) -> Option<&'static str> {
    match self {
      Visibility::Public => Some("public"),
      Visibility::Protected => Some("protected"),
      Visibility::Package => None,
      Visibility::Private => Some("private"),
    }
  }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct Modifiers {
  pub visibility: Visibility,
  #[serde(rename = "static")]
  pub is_static: bool,
  #[serde(rename = "final")]
  pub is_final: bool,
  #[serde(rename = "abstract")]
  pub is_abstract: bool,
}

impl Modifiers {
  #[must_use]
  pub const fn new(visibility: Visibility) -> Self {
    Self {
      visibility,
      is_static: false,
      is_final: false,
      is_abstract: false,
    }
  }

  #[must_use]
  pub const fn public() -> Self {
    Self::new(Visibility::Public)
  }

  #[must_use]
  pub const fn private() -> Self {
    Self::new(Visibility::Private)
  }

  #[must_use]
  pub const fn with_static(mut self) -> Self {
    self.is_static = true;
    self
  }

  #[must_use]
  pub const fn with_final(mut self, is_final: bool) -> Self {
    self.is_final = is_final;
    self
  }

  /// Keywords in canonical Java order.
  pub fn keywords(&self) -> impl Iterator<Item = &'static str> {
    [
      self.visibility.keyword(),
      self.is_abstract.then_some("abstract"),
      self.is_static.then_some("static"),
      self.is_final.then_some("final"),
    ]
    .into_iter()
    .flatten()
  }
}
