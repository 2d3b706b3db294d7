//! Generation options and their persisted configuration keys.
//!
//! [`BuilderOption`] is the closed set of option identifiers, each bound to a key in the
//! `GenerateInnerBuilder.` namespace. Toggles persist as `"true"`/`"false"`; a choice
//! group persists the key of its selected value. [`GeneratorOptions`] is the resolved,
//! immutable view handed to the generator.

mod catalog;


use std::collections::BTreeSet;

pub use catalog::{OptionDescriptor, catalog};
use strum::{EnumIter, EnumString, IntoEnumIterator, IntoStaticStr};

use crate::{config::ConfigStore, naming::identifiers::capitalize};

pub const KEY_PREFIX: &str = "GenerateInnerBuilder.";

pub const DEFAULT_FACTORY_METHOD_NAME: &str = "newBuilder";
pub const ALTERNATE_FACTORY_METHOD_NAME: &str = "builder";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionKind {
  Toggle,
  /// Key whose persisted value names the selected member of the group.
  ChoiceGroup,
  /// Selectable value of the given group.
  ChoiceValue(BuilderOption),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, EnumIter, EnumString, IntoStaticStr, strum::Display)]
pub enum BuilderOption {
  #[strum(serialize = "finalSetters")]
  FinalSetters,
  #[strum(serialize = "newBuilderMethod")]
  NewBuilderMethod,
  #[strum(serialize = "staticBuilderDropdown")]
  StaticBuilderDropdown,
  #[strum(serialize = "staticBuilderNewBuilderName")]
  StaticBuilderNewBuilderName,
  #[strum(serialize = "staticBuilderBuilderName")]
  StaticBuilderBuilderName,
  #[strum(serialize = "staticBuilderNewClassName")]
  StaticBuilderNewClassName,
  #[strum(serialize = "staticBuilderNewClassNameBuilder")]
  StaticBuilderNewClassNameBuilder,
  #[strum(serialize = "builderMethodDropdownLocation")]
  BuilderMethodLocationDropdown,
  #[strum(serialize = "builderMethodInParentClass")]
  BuilderMethodInParentClass,
  #[strum(serialize = "builderMethodInBuilder")]
  BuilderMethodInBuilder,
  #[strum(serialize = "copyConstructor")]
  CopyConstructor,
  #[strum(serialize = "withNotation")]
  WithNotation,
  #[strum(serialize = "setNotation")]
  SetNotation,
  #[strum(serialize = "useJSR305Annotations")]
  Jsr305Annotations,
  #[strum(serialize = "suppressAvoidFieldNameMatchingMethodName")]
  PmdAvoidFieldNameMatchingMethodName,
  #[strum(serialize = "withJavadoc")]
  WithJavadoc,
  #[strum(serialize = "fieldNames")]
  FieldNames,
}

impl BuilderOption {
  #[must_use]
  pub fn property(self) -> &'static str {
    self.into()
  }

  /// Fully namespaced configuration key, e.g. `GenerateInnerBuilder.finalSetters`.
  #[must_use]
  pub fn key(self) -> String {
    format!("{KEY_PREFIX}{}", self.property())
  }

  #[must_use]
  pub fn from_key(key: &str) -> Option<Self> {
    key.strip_prefix(KEY_PREFIX)?.parse().ok()
  }

  #[must_use]
  pub const fn kind(self) -> OptionKind {
    match self {
      Self::StaticBuilderDropdown | Self::BuilderMethodLocationDropdown => OptionKind::ChoiceGroup,
      Self::StaticBuilderNewBuilderName
      | Self::StaticBuilderBuilderName
      | Self::StaticBuilderNewClassName
      | Self::StaticBuilderNewClassNameBuilder => OptionKind::ChoiceValue(Self::StaticBuilderDropdown),
      Self::BuilderMethodInParentClass | Self::BuilderMethodInBuilder => {
        OptionKind::ChoiceValue(Self::BuilderMethodLocationDropdown)
      }
      _ => OptionKind::Toggle,
    }
  }

  #[must_use]
  pub const fn is_toggle(self) -> bool {
    matches!(self.kind(), OptionKind::Toggle)
  }

  pub fn toggles() -> impl Iterator<Item = BuilderOption> {
    Self::iter().filter(|option| option.is_toggle())
  }
}

/// Mutually exclusive values persisted under one group key.
pub trait ChoiceGroup: Sized + Copy + Default + IntoEnumIterator {
  const GROUP: BuilderOption;

  fn option(self) -> BuilderOption;

  fn from_option(option: BuilderOption) -> Option<Self> {
    Self::iter().find(|value| value.option() == option)
  }

  /// Resolves the persisted value, falling back to the default when absent or unknown.
  fn load(store: &(impl ConfigStore + ?Sized)) -> Self {
    let key = Self::GROUP.key();
    let Some(value) = store.get_value(&key) else {
      return Self::default();
    };
    match BuilderOption::from_key(&value).and_then(Self::from_option) {
      Some(choice) => choice,
      None => {
        log::warn!("ignoring unknown value `{value}` for `{key}`");
        Self::default()
      }
    }
  }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, EnumIter)]
pub enum FactoryName {
  #[default]
  NewBuilder,
  Builder,
  NewClassName,
  NewClassNameBuilder,
}

impl FactoryName {
  #[must_use]
  pub fn resolve(self, class_name: &str) -> String {
    match self {
      FactoryName::NewBuilder => DEFAULT_FACTORY_METHOD_NAME.to_string(),
      FactoryName::Builder => ALTERNATE_FACTORY_METHOD_NAME.to_string(),
      FactoryName::NewClassName => format!("new{class_name}"),
      FactoryName::NewClassNameBuilder => format!("new{class_name}Builder"),
    }
  }
}

impl ChoiceGroup for FactoryName {
  const GROUP: BuilderOption = BuilderOption::StaticBuilderDropdown;

  fn option(self) -> BuilderOption {
    match self {
      FactoryName::NewBuilder => BuilderOption::StaticBuilderNewBuilderName,
      FactoryName::Builder => BuilderOption::StaticBuilderBuilderName,
      FactoryName::NewClassName => BuilderOption::StaticBuilderNewClassName,
      FactoryName::NewClassNameBuilder => BuilderOption::StaticBuilderNewClassNameBuilder,
    }
  }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, EnumIter)]
pub enum FactoryLocation {
  #[default]
  TargetClass,
  BuilderClass,
}

impl ChoiceGroup for FactoryLocation {
  const GROUP: BuilderOption = BuilderOption::BuilderMethodLocationDropdown;

  fn option(self) -> BuilderOption {
    match self {
      FactoryLocation::TargetClass => BuilderOption::BuilderMethodInParentClass,
      FactoryLocation::BuilderClass => BuilderOption::BuilderMethodInBuilder,
    }
  }
}

/// Setter naming. Persisted as two toggles; `with` wins when both are set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, EnumIter)]
pub enum SetterNotation {
  #[default]
  Bare,
  With,
  Set,
}

impl SetterNotation {
  #[must_use]
  pub fn method_name(self, base_name: &str) -> String {
    match self {
      SetterNotation::Bare => base_name.to_string(),
      SetterNotation::With => format!("with{}", capitalize(base_name)),
      SetterNotation::Set => format!("set{}", capitalize(base_name)),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, bon::Builder)]
#[allow(clippy::struct_excessive_bools)]
pub struct GeneratorOptions {
  /// Treat final fields like any other: no constructor parameter, a setter instead.
  #[builder(default)]
  pub final_setters: bool,
  #[builder(default = true)]
  pub new_builder_method: bool,
  #[builder(default)]
  pub factory_name: FactoryName,
  #[builder(default)]
  pub factory_location: FactoryLocation,
  #[builder(default)]
  pub copy_constructor: bool,
  #[builder(default)]
  pub setter_notation: SetterNotation,
  #[builder(default)]
  pub jsr305_annotations: bool,
  #[builder(default)]
  pub pmd_suppress_field_name_matching: bool,
  #[builder(default)]
  pub with_javadoc: bool,
  #[builder(default)]
  pub field_names: bool,
}

impl Default for GeneratorOptions {
  fn default() -> Self {
    Self::builder().build()
  }
}

impl GeneratorOptions {
  /// Reads every option from `store`; missing keys take their defaults.
  #[must_use]
  pub fn load(store: &(impl ConfigStore + ?Sized)) -> Self {
    let defaults = Self::default();
    let toggle = |option: BuilderOption, default: bool| store.get_boolean(&option.key(), default);

    let setter_notation = if toggle(BuilderOption::WithNotation, false) {
      SetterNotation::With
    } else if toggle(BuilderOption::SetNotation, false) {
      SetterNotation::Set
    } else {
      SetterNotation::Bare
    };

    Self {
      final_setters: toggle(BuilderOption::FinalSetters, defaults.final_setters),
      new_builder_method: toggle(BuilderOption::NewBuilderMethod, defaults.new_builder_method),
      factory_name: FactoryName::load(store),
      factory_location: FactoryLocation::load(store),
      copy_constructor: toggle(BuilderOption::CopyConstructor, defaults.copy_constructor),
      setter_notation,
      jsr305_annotations: toggle(BuilderOption::Jsr305Annotations, defaults.jsr305_annotations),
      pmd_suppress_field_name_matching: toggle(
        BuilderOption::PmdAvoidFieldNameMatchingMethodName,
        defaults.pmd_suppress_field_name_matching,
      ),
      with_javadoc: toggle(BuilderOption::WithJavadoc, defaults.with_javadoc),
      field_names: toggle(BuilderOption::FieldNames, defaults.field_names),
    }
  }

  /// Writes every option back to `store`.
  pub fn persist(&self, store: &mut (impl ConfigStore + ?Sized)) {
    for option in BuilderOption::toggles() {
      let value = if self.contains(option) { "true" } else { "false" };
      store.set_value(&option.key(), Some(value));
    }
    store.set_value(&FactoryName::GROUP.key(), Some(&self.factory_name.option().key()));
    store.set_value(&FactoryLocation::GROUP.key(), Some(&self.factory_location.option().key()));
  }

  /// Is `option` part of the effective option set?
  #[must_use]
  pub fn contains(&self, option: BuilderOption) -> bool {
    match option {
      BuilderOption::FinalSetters => self.final_setters,
      BuilderOption::NewBuilderMethod => self.new_builder_method,
      BuilderOption::StaticBuilderDropdown | BuilderOption::BuilderMethodLocationDropdown => false,
      BuilderOption::StaticBuilderNewBuilderName
      | BuilderOption::StaticBuilderBuilderName
      | BuilderOption::StaticBuilderNewClassName
      | BuilderOption::StaticBuilderNewClassNameBuilder => self.factory_name.option() == option,
      BuilderOption::BuilderMethodInParentClass | BuilderOption::BuilderMethodInBuilder => {
        self.factory_location.option() == option
      }
      BuilderOption::CopyConstructor => self.copy_constructor,
      BuilderOption::WithNotation => self.setter_notation == SetterNotation::With,
      BuilderOption::SetNotation => self.setter_notation == SetterNotation::Set,
      BuilderOption::Jsr305Annotations => self.jsr305_annotations,
      BuilderOption::PmdAvoidFieldNameMatchingMethodName => self.pmd_suppress_field_name_matching,
      BuilderOption::WithJavadoc => self.with_javadoc,
      BuilderOption::FieldNames => self.field_names,
    }
  }

  /// The effective option set: enabled toggles plus exactly one value per choice group.
  #[must_use]
  pub fn effective(&self) -> BTreeSet<BuilderOption> {
    BuilderOption::iter().filter(|&option| self.contains(option)).collect()
  }

  #[must_use]
  pub fn factory_method_name(&self, class_name: &str) -> String {
    self.factory_name.resolve(class_name)
  }
}
