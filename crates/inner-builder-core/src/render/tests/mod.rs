use pretty_assertions::assert_eq;

use crate::{
  generator::synthesize,
  model::{Expr, Statement, TypeRef},
  options::GeneratorOptions,
  reformat::{Reformatter, ShortenReferences},
  render::{JavaPrinter, render_expr, render_statement},
  tests::support::{ACCOUNT, HIERARCHY, PERSON, class_id, fields_of, load},
};

#[test]
fn test_prints_generated_builder_file() {
  let mut model = load(PERSON);
  let person = class_id(&model, "Person");
  let fields = fields_of(&model, person);
  synthesize(&mut model, person, &fields, &GeneratorOptions::default()).unwrap();
  ShortenReferences.reformat(&mut model, person).unwrap();

  let expected = "\
package com.acme;

public class Person {
    private final String name;
    private int age;

    private Person(Builder builder) {
        name = builder.name;
        age = builder.age;
    }

    public static Builder newBuilder(String name) {
        return new Builder(name);
    }

    public static final class Builder {
        private final String name;
        private int age;

        private Builder(String name) {
            this.name = name;
        }

        public Builder age(int val) {
            age = val;
            return this;
        }

        public Person build() {
            return new Person(this);
        }
    }
}
";
  assert_eq!(JavaPrinter::default().print_file(&model, person), expected);
}

#[test]
fn test_prints_docs_and_annotations() {
  let mut model = load(PERSON);
  let person = class_id(&model, "Person");
  let fields = fields_of(&model, person);
  let options = GeneratorOptions::builder()
    .with_javadoc(true)
    .jsr305_annotations(true)
    .pmd_suppress_field_name_matching(true)
    .build();
  let report = synthesize(&mut model, person, &fields, &options).unwrap();
  ShortenReferences.reformat(&mut model, person).unwrap();

  let expected = r#"/**
 * {@code Person} builder static inner class.
 */
@SuppressWarnings("PMD.AvoidFieldNameMatchingMethodName")
public static final class Builder {
  private final String name;
  private int age;

  private Builder(@javax.annotation.Nonnull String name) {
    this.name = name;
  }

  /**
   * Sets the {@code age} and returns a reference to this Builder enabling method chaining.
   * @param val the {@code age} to set
   * @return a reference to this Builder
   */
  @javax.annotation.Nonnull
  public Builder age(int val) {
    age = val;
    return this;
  }

  /**
   * Returns a {@code Person} built from the parameters previously set.
   *
   * @return a {@code Person} built with parameters of this {@code Person.Builder}
   */
  @javax.annotation.Nonnull
  public Person build() {
    return new Person(this);
  }
}
"#;
  assert_eq!(JavaPrinter::new("  ").print_class(&model, report.builder_class), expected);
}

#[test]
fn test_prints_hand_written_members_verbatim() {
  let model = load(ACCOUNT);
  let account = class_id(&model, "Account");

  let expected = "\
package com.acme.bank;

public class Account {
\tprivate final java.lang.String mNumber;
\tprivate java.math.BigDecimal val;
\tprivate java.lang.String owner;

\tpublic void setOwner(java.lang.String owner) {
\t\tthis.owner = owner;
\t}
}
";
  assert_eq!(JavaPrinter::new("\t").print_file(&model, account), expected);
}

#[test]
fn test_prints_initializers_and_superclass() {
  let model = load(HIERARCHY);

  let constants = JavaPrinter::default().print_class(&model, class_id(&model, "Constants"));
  assert_eq!(
    constants,
    "\
public class Constants {
    public static final int LIMIT = 10;
    private org.apache.log4j.Logger LOG;
}
"
  );

  let derived = JavaPrinter::default().print_class(&model, class_id(&model, "Derived"));
  assert!(derived.starts_with("public class Derived extends Base {\n"), "{derived}");
  assert!(derived.contains("    private final java.lang.String code = \"X\";\n"), "{derived}");
}

#[test]
fn test_statement_rendering() {
  let cases = [
    (
      Statement::assign(Expr::this_field("name"), Expr::name("name")),
      "this.name = name;",
    ),
    (
      Statement::Expr {
        expr: Expr::call(None, "setOwner", vec![Expr::field(Expr::name("builder"), "owner")]),
      },
      "setOwner(builder.owner);",
    ),
    (
      Statement::Local {
        ty: TypeRef::new("Builder"),
        name: "builder".to_string(),
        init: Expr::call(Some(Expr::name("Person")), "newBuilder", vec![Expr::name("a"), Expr::name("b")]),
      },
      "Builder builder = Person.newBuilder(a, b);",
    ),
    (Statement::returns(Expr::new_instance("Person", vec![Expr::This])), "return new Person(this);"),
    (
      Statement::Raw {
        text: "super.init();".to_string(),
      },
      "super.init();",
    ),
  ];
  for (statement, expected) in cases {
    assert_eq!(render_statement(&statement), expected, "failed for input {statement:?}");
  }
  assert_eq!(render_expr(&Expr::new_instance("Builder", vec![])), "new Builder()");
}
