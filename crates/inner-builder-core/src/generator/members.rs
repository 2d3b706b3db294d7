use itertools::Itertools;

use super::{
  BUILD_METHOD_NAME, BUILDER_CLASS_NAME, BUILDER_PARAMETER_NAME, COPY_PARAMETER_NAME, JSR305_NONNULL,
  PMD_FIELD_NAME_SUPPRESSION, SETTER_ALTERNATE_PARAMETER_NAME, SETTER_PARAMETER_NAME,
};
use crate::{
  collector::FieldRecord,
  model::{
    Annotation, ClassDecl, Documentation, Expr, FieldDecl, MethodDecl, MethodKind, Modifiers, Parameter, Statement,
    TypeRef,
  },
  naming::identifiers::{setter_name, strip_one_letter_prefix},
  options::{FactoryLocation, GeneratorOptions},
};

/// Everything the member factories need to know about one synthesis run.
pub(super) struct BuilderContext<'a> {
  pub target_name: &'a str,
  pub fields: &'a [FieldRecord],
  pub options: &'a GeneratorOptions,
}

impl BuilderContext<'_> {
  /// A field is final for generation purposes unless final setters are requested.
  pub fn is_final(&self, field: &FieldRecord) -> bool {
    field.is_final && !self.options.final_setters
  }

  pub fn final_fields(&self) -> impl Iterator<Item = &FieldRecord> {
    self.fields.iter().filter(|field| self.is_final(field))
  }

  pub fn non_final_fields(&self) -> impl Iterator<Item = &FieldRecord> {
    self.fields.iter().filter(|field| !self.is_final(field))
  }

  fn builder_type(&self) -> TypeRef {
    TypeRef::new(BUILDER_CLASS_NAME)
  }

  fn target_type(&self) -> TypeRef {
    TypeRef::new(self.target_name)
  }

  fn nonnull(&self) -> Vec<Annotation> {
    if self.options.jsr305_annotations {
      vec![Annotation::marker(JSR305_NONNULL)]
    } else {
      vec![]
    }
  }

  fn parameter(&self, name: &str, ty: &TypeRef) -> Parameter {
    let annotations = if ty.is_primitive() { vec![] } else { self.nonnull() };
    Parameter::builder().name(name).ty(ty.clone()).annotations(annotations).build()
  }

  fn final_field_parameters(&self) -> Vec<Parameter> {
    self
      .final_fields()
      .map(|field| self.parameter(&field.name, &field.ty))
      .collect()
  }

  fn javadoc(&self, lines: impl IntoIterator<Item = String>) -> Documentation {
    if self.options.with_javadoc {
      Documentation::from_lines(lines)
    } else {
      Documentation::default()
    }
  }

  /// Template for a newly created nested builder class.
  pub fn builder_class(&self) -> ClassDecl {
    let annotations = if self.options.pmd_suppress_field_name_matching {
      vec![Annotation::with_arguments("SuppressWarnings", PMD_FIELD_NAME_SUPPRESSION)]
    } else {
      vec![]
    };
    ClassDecl::builder()
      .name(BUILDER_CLASS_NAME)
      .modifiers(Modifiers::public().with_static().with_final(true))
      .docs(self.javadoc([format!("{{@code {}}} builder static inner class.", self.target_name)]))
      .annotations(annotations)
      .build()
  }

  pub fn mirror_field(&self, field: &FieldRecord) -> FieldDecl {
    FieldDecl::builder()
      .name(field.name.clone())
      .ty(field.ty.clone())
      .modifiers(Modifiers::private().with_final(self.is_final(field)))
      .build()
  }

  /// `private Target(Builder builder)`: existing setters are reused for mutable fields.
  pub fn target_constructor(&self) -> MethodDecl {
    let body = self
      .fields
      .iter()
      .map(|field| {
        let value = Expr::field(Expr::name(BUILDER_PARAMETER_NAME), &field.name);
        if field.has_setter && !field.is_final {
          Statement::Expr {
            expr: Expr::call(None, setter_name(&field.name), vec![value]),
          }
        } else {
          Statement::assign(Expr::name(&field.name), value)
        }
      })
      .collect();

    MethodDecl::builder()
      .kind(MethodKind::Constructor)
      .name(self.target_name)
      .parameters(vec![
        Parameter::builder()
          .name(BUILDER_PARAMETER_NAME)
          .ty(self.builder_type())
          .build(),
      ])
      .modifiers(Modifiers::private())
      .body(body)
      .build()
  }

  /// Constructor taking the final fields; private when construction goes through the factory.
  pub fn builder_constructor(&self) -> MethodDecl {
    let modifiers = if self.options.new_builder_method {
      Modifiers::private()
    } else {
      Modifiers::public()
    };
    let body = self
      .final_fields()
      .map(|field| Statement::assign(Expr::this_field(&field.name), Expr::name(&field.name)))
      .collect();

    MethodDecl::builder()
      .kind(MethodKind::Constructor)
      .name(BUILDER_CLASS_NAME)
      .parameters(self.final_field_parameters())
      .modifiers(modifiers)
      .body(body)
      .build()
  }

  pub fn factory_method(&self) -> MethodDecl {
    let args = self.final_fields().map(|field| Expr::name(&field.name)).collect();
    MethodDecl::builder()
      .name(self.options.factory_method_name(self.target_name))
      .return_type(self.builder_type())
      .parameters(self.final_field_parameters())
      .modifiers(Modifiers::public().with_static())
      .body(vec![Statement::returns(Expr::new_instance(BUILDER_CLASS_NAME, args))])
      .build()
  }

  fn copy_parameter(&self) -> Parameter {
    self.parameter(COPY_PARAMETER_NAME, &self.target_type())
  }

  fn copied(&self, field: &FieldRecord) -> Expr {
    Expr::field(Expr::name(COPY_PARAMETER_NAME), &field.name)
  }

  /// Static copy factory on the target, overloading the factory name with a single target-typed parameter.
  /// The factory call is qualified with `Builder` when the factory lives on the builder.
  pub fn copy_method(&self) -> MethodDecl {
    let final_args: Vec<Expr> = self.final_fields().map(|field| self.copied(field)).collect();
    let non_final = self.non_final_fields().collect_vec();

    let body = if non_final.is_empty() {
      vec![Statement::returns(Expr::new_instance(BUILDER_CLASS_NAME, final_args))]
    } else {
      let host = self.factory_on_builder().then(|| Expr::name(BUILDER_CLASS_NAME));
      let init = Expr::call(host, self.options.factory_method_name(self.target_name), final_args);
      let mut body = vec![Statement::Local {
        ty: self.builder_type(),
        name: BUILDER_PARAMETER_NAME.to_string(),
        init,
      }];
      body.extend(non_final.iter().map(|field| {
        Statement::assign(
          Expr::field(Expr::name(BUILDER_PARAMETER_NAME), &field.name),
          self.copied(field),
        )
      }));
      body.push(Statement::returns(Expr::name(BUILDER_PARAMETER_NAME)));
      body
    };

    MethodDecl::builder()
      .name(self.options.factory_method_name(self.target_name))
      .return_type(self.builder_type())
      .parameters(vec![self.copy_parameter()])
      .modifiers(Modifiers::public().with_static())
      .body(body)
      .build()
  }

  /// `public Builder(Target copy)` copying every selected field.
  pub fn copy_constructor(&self) -> MethodDecl {
    let body = self
      .fields
      .iter()
      .map(|field| Statement::assign(Expr::this_field(&field.name), self.copied(field)))
      .collect();
    MethodDecl::builder()
      .kind(MethodKind::Constructor)
      .name(BUILDER_CLASS_NAME)
      .parameters(vec![self.copy_parameter()])
      .modifiers(Modifiers::public())
      .body(body)
      .build()
  }

  pub fn setter(&self, field: &FieldRecord) -> MethodDecl {
    let base = strip_one_letter_prefix(&field.name);
    let parameter = if self.options.field_names {
      base.clone()
    } else if base == SETTER_PARAMETER_NAME {
      SETTER_ALTERNATE_PARAMETER_NAME.to_string()
    } else {
      SETTER_PARAMETER_NAME.to_string()
    };
    let assignee = if self.options.field_names {
      Expr::this_field(&field.name)
    } else {
      Expr::name(&field.name)
    };

    MethodDecl::builder()
      .name(self.options.setter_notation.method_name(&base))
      .return_type(self.builder_type())
      .parameters(vec![self.parameter(&parameter, &field.ty)])
      .modifiers(Modifiers::public())
      .annotations(self.nonnull())
      .docs(self.javadoc([
        format!("Sets the {{@code {base}}} and returns a reference to this Builder enabling method chaining."),
        format!("@param {parameter} the {{@code {base}}} to set"),
        "@return a reference to this Builder".to_string(),
      ]))
      .body(vec![
        Statement::assign(assignee, Expr::name(parameter)),
        Statement::returns(Expr::This),
      ])
      .build()
  }

  pub fn build_method(&self) -> MethodDecl {
    let target = self.target_name;
    MethodDecl::builder()
      .name(BUILD_METHOD_NAME)
      .return_type(self.target_type())
      .modifiers(Modifiers::public())
      .annotations(self.nonnull())
      .docs(self.javadoc([
        format!("Returns a {{@code {target}}} built from the parameters previously set."),
        String::new(),
        format!("@return a {{@code {target}}} built with parameters of this {{@code {target}.Builder}}"),
      ]))
      .body(vec![Statement::returns(Expr::new_instance(target, vec![Expr::This]))])
      .build()
  }

  /// Whether the static factory (and a copy method, if any) is hosted by the builder.
  pub fn factory_on_builder(&self) -> bool {
    self.options.factory_location == FactoryLocation::BuilderClass
  }
}
