use super::BuilderOption;

/// How a selection front-end presents one option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionDescriptor {
  Checkbox {
    option: BuilderOption,
    caption: &'static str,
    mnemonic: char,
    tooltip: Option<&'static str>,
  },
  Dropdown {
    option: BuilderOption,
    caption: &'static str,
    tooltip: &'static str,
    /// Selectable values with their captions; the first entry is shown when nothing is persisted.
    values: &'static [(BuilderOption, &'static str)],
  },
}

impl OptionDescriptor {
  #[must_use]
  pub const fn option(&self) -> BuilderOption {
    match self {
      OptionDescriptor::Checkbox { option, .. } | OptionDescriptor::Dropdown { option, .. } => *option,
    }
  }

  #[must_use]
  pub const fn caption(&self) -> &'static str {
    match self {
      OptionDescriptor::Checkbox { caption, .. } | OptionDescriptor::Dropdown { caption, .. } => *caption,
    }
  }

  /// Value shown for a dropdown given the persisted value key, if any.
  #[must_use]
  pub fn selected_value(&self, persisted: Option<&str>) -> Option<(BuilderOption, &'static str)> {
    let OptionDescriptor::Dropdown { values, .. } = self else {
      return None;
    };
    values
      .iter()
      .find(|(value, _)| persisted.is_some_and(|key| value.key() == key))
      .or_else(|| values.first())
      .copied()
  }
}

const CATALOG: &[OptionDescriptor] = &[
  OptionDescriptor::Checkbox {
    option: BuilderOption::FinalSetters,
    caption: "Generate builder methods for final fields",
    mnemonic: 'f',
    tooltip: None,
  },
  OptionDescriptor::Checkbox {
    option: BuilderOption::NewBuilderMethod,
    caption: "Generate static builder method",
    mnemonic: 'n',
    tooltip: None,
  },
  OptionDescriptor::Dropdown {
    option: BuilderOption::StaticBuilderDropdown,
    caption: "Static builder naming",
    tooltip: "Select what the static builder method should look like.",
    values: &[
      (BuilderOption::StaticBuilderNewBuilderName, "newBuilder()"),
      (BuilderOption::StaticBuilderBuilderName, "builder()"),
      (BuilderOption::StaticBuilderNewClassName, "new[ClassName]()"),
      (BuilderOption::StaticBuilderNewClassNameBuilder, "new[ClassName]Builder()"),
    ],
  },
  OptionDescriptor::Dropdown {
    option: BuilderOption::BuilderMethodLocationDropdown,
    caption: "Builder method location",
    tooltip: "Select where the builder method should be located.",
    values: &[
      (BuilderOption::BuilderMethodInParentClass, "Inside parent class"),
      (BuilderOption::BuilderMethodInBuilder, "Inside generated Builder class"),
    ],
  },
  OptionDescriptor::Checkbox {
    option: BuilderOption::CopyConstructor,
    caption: "Generate builder copy constructor",
    mnemonic: 'o',
    tooltip: None,
  },
  OptionDescriptor::Checkbox {
    option: BuilderOption::WithNotation,
    caption: "Use 'with...' notation",
    mnemonic: 'w',
    tooltip: Some("Generate builder methods that start with 'with', for example: builder.withName(String name)"),
  },
  OptionDescriptor::Checkbox {
    option: BuilderOption::SetNotation,
    caption: "Use 'set...' notation",
    mnemonic: 't',
    tooltip: Some("Generate builder methods that start with 'set', for example: builder.setName(String name)"),
  },
  OptionDescriptor::Checkbox {
    option: BuilderOption::Jsr305Annotations,
    caption: "Add JSR-305 @Nonnull annotation",
    mnemonic: 'j',
    tooltip: Some(
      "Add @Nonnull annotations to generated methods and parameters, for example: \
       @Nonnull public Builder withName(@Nonnull String name) { ... }",
    ),
  },
  OptionDescriptor::Checkbox {
    option: BuilderOption::PmdAvoidFieldNameMatchingMethodName,
    caption: "Add @SuppressWarnings(\"PMD.AvoidFieldNameMatchingMethodName\") annotation",
    mnemonic: 'p',
    tooltip: Some("Add @SuppressWarnings(\"PMD.AvoidFieldNameMatchingMethodName\") annotation to the generated Builder class"),
  },
  OptionDescriptor::Checkbox {
    option: BuilderOption::WithJavadoc,
    caption: "Add Javadoc",
    mnemonic: 'c',
    tooltip: Some("Add Javadoc to generated builder class and methods"),
  },
  OptionDescriptor::Checkbox {
    option: BuilderOption::FieldNames,
    caption: "Use field names in setter",
    mnemonic: 's',
    tooltip: Some(
      "Generate builder methods that has the same parameter names in setter methods as field names, \
       for example: builder.withName(String fieldName)",
    ),
  },
];

/// Every option in presentation order.
#[must_use]
pub fn catalog() -> &'static [OptionDescriptor] {
  CATALOG
}
