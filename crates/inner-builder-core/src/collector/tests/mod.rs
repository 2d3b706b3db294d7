use crate::{
  collector::{Exclusion, FieldCollector, LOGGER_TYPES, NotApplicable, collect},
  model::{ClassSource, FieldDecl, JavaModel, MethodDecl, Modifiers, Parameter, SourceFile, SourceModel, Visibility},
  tests::support::{ACCOUNT, HIERARCHY, PERSON, class_id, field_names, fields_of, load},
};

#[test]
fn test_collects_declared_fields_in_order() {
  let model = load(PERSON);
  let person = class_id(&model, "Person");
  let fields = fields_of(&model, person);

  assert_eq!(field_names(&fields), ["name", "age"]);
  assert!(fields[0].is_final);
  assert!(!fields[1].is_final);
  assert_eq!(fields[0].ty.canonical(), "java.lang.String");
  assert!(fields.iter().all(|field| field.declaring_class == person));
  assert_eq!(fields[0].declaring_class_name, "com.acme.Person");
}

#[test]
fn test_ancestor_fields_come_first_and_nearest_declaration_wins() {
  let model = load(HIERARCHY);
  let derived = class_id(&model, "Derived");
  let base = class_id(&model, "Base");
  let fields = fields_of(&model, derived);

  assert_eq!(field_names(&fields), ["id", "secret", "x", "items"]);
  assert_eq!(fields[0].declaring_class, base);
  let x = &fields[2];
  assert_eq!(x.declaring_class, derived);
  assert_eq!(x.ty.canonical(), "java.lang.String");
}

#[test]
fn test_exclusion_reasons() {
  let model = load(HIERARCHY);
  let derived = class_id(&model, "Derived");
  let collection = FieldCollector::new(&model)
    .analyze(model.caret_in_class(derived))
    .unwrap();

  let reasons: Vec<(&str, Exclusion)> = collection
    .excluded
    .iter()
    .map(|excluded| (excluded.name.as_str(), excluded.reason))
    .collect();
  assert_eq!(
    reasons,
    [
      ("code", Exclusion::InitializedFinal),
      ("version", Exclusion::InheritedFinal),
      ("hidden", Exclusion::Inaccessible),
      ("count", Exclusion::Static),
      ("MAX_SIZE", Exclusion::Constant),
      ("log", Exclusion::LoggerType),
      ("x", Exclusion::Shadowed),
    ]
  );
}

#[test]
fn test_private_superclass_field_with_setter_is_eligible() {
  let model = load(HIERARCHY);
  let fields = fields_of(&model, class_id(&model, "Derived"));
  let secret = fields.iter().find(|field| field.name == "secret").unwrap();
  assert!(secret.has_setter);
  assert!(!fields.iter().find(|field| field.name == "id").unwrap().has_setter);
}

#[test]
fn test_setter_detection_requires_matching_parameter_type() {
  let model = load(ACCOUNT);
  let fields = fields_of(&model, class_id(&model, "Account"));
  let flags: Vec<(&str, bool)> = fields
    .iter()
    .map(|field| (field.name.as_str(), field.has_setter))
    .collect();
  assert_eq!(flags, [("mNumber", false), ("val", false), ("owner", true)]);

  let file = SourceFile {
    package: "p".to_string(),
    classes: vec![
      ClassSource::builder()
        .name("Mismatch")
        .fields(vec![FieldDecl::builder().name("owner").ty("java.lang.String").build()])
        .methods(vec![
          MethodDecl::builder()
            .name("setOwner")
            .parameters(vec![Parameter::builder().name("owner").ty("int").build()])
            .modifiers(Modifiers::public())
            .build(),
        ])
        .build(),
    ],
  };
  let model = JavaModel::from_source(file).unwrap();
  let fields = fields_of(&model, class_id(&model, "Mismatch"));
  assert!(!fields[0].has_setter);
}

#[test]
fn test_field_under_caret_is_skipped() {
  let model = load(PERSON);
  let person = class_id(&model, "Person");
  let offset = model.caret_in_field(person, "age").unwrap();

  let fields = collect(&model, offset).unwrap();
  assert_eq!(field_names(&fields), ["name"]);
}

#[test]
fn test_abstract_class_is_not_applicable() {
  let model = load(HIERARCHY);
  let shape = class_id(&model, "Shape");
  let offset = model.caret_in_class(shape);

  assert_eq!(collect(&model, offset), None);
  assert_eq!(
    FieldCollector::new(&model).analyze(offset),
    Err(NotApplicable::AbstractType("com.acme.model.Shape".to_string()))
  );
}

#[test]
fn test_no_eligible_fields_is_none_not_empty() {
  let model = load(HIERARCHY);
  let constants = class_id(&model, "Constants");
  let offset = model.caret_in_class(constants);

  assert_eq!(collect(&model, offset), None);
  assert_eq!(
    FieldCollector::new(&model).analyze(offset),
    Err(NotApplicable::NoEligibleFields("com.acme.model.Constants".to_string()))
  );
}

#[test]
fn test_no_enclosing_type() {
  let model = load(PERSON);
  assert_eq!(collect(&model, usize::MAX), None);
  assert_eq!(
    FieldCollector::new(&model).analyze(usize::MAX),
    Err(NotApplicable::NoEnclosingType)
  );
}

#[test]
fn test_every_logger_type_is_denied_regardless_of_visibility() {
  for logger in LOGGER_TYPES {
    let file = SourceFile {
      package: "app".to_string(),
      classes: vec![
        ClassSource::builder()
          .name("Service")
          .fields(vec![
            FieldDecl::builder()
              .name("logger")
              .ty(*logger)
              .modifiers(Modifiers::public())
              .build(),
            FieldDecl::builder().name("port").ty("int").build(),
          ])
          .build(),
      ],
    };
    let model = JavaModel::from_source(file).unwrap();
    let fields = fields_of(&model, class_id(&model, "Service"));
    assert_eq!(field_names(&fields), ["port"], "failed for logger {logger:?}");
  }
}

#[test]
fn test_similar_logger_names_are_not_denied() {
  let file = SourceFile {
    package: "app".to_string(),
    classes: vec![
      ClassSource::builder()
        .name("Service")
        .fields(vec![
          FieldDecl::builder().name("logger").ty("com.acme.Logger").build(),
          FieldDecl::builder().name("log").ty("Logger").build(),
        ])
        .build(),
    ],
  };
  let model = JavaModel::from_source(file).unwrap();
  let fields = fields_of(&model, class_id(&model, "Service"));
  assert_eq!(field_names(&fields), ["logger", "log"]);
}

#[test]
fn test_nested_class_collects_its_own_fields() {
  let model = load(HIERARCHY);
  let inner = class_id(&model, "Inner");
  let fields = fields_of(&model, inner);
  assert_eq!(field_names(&fields), ["value"]);
  assert_eq!(model.qualified_name(fields[0].declaring_class), "com.acme.model.Outer.Inner");
}

fn shadowing_hierarchy(nearer_x: FieldDecl) -> JavaModel {
  let file = SourceFile {
    package: "p".to_string(),
    classes: vec![
      ClassSource::builder()
        .name("Base")
        .fields(vec![
          FieldDecl::builder()
            .name("x")
            .ty("int")
            .modifiers(Modifiers::new(Visibility::Protected))
            .build(),
        ])
        .build(),
      ClassSource::builder()
        .name("Derived")
        .superclass("Base")
        .fields(vec![
          nearer_x,
          FieldDecl::builder().name("y").ty("int").modifiers(Modifiers::private()).build(),
        ])
        .build(),
    ],
  };
  JavaModel::from_source(file).unwrap()
}

#[test]
fn test_excluded_nearer_declaration_still_shadows_ancestor_field() {
  let cases = [
    (
      "static",
      FieldDecl::builder()
        .name("x")
        .ty("int")
        .modifiers(Modifiers::private().with_static())
        .build(),
    ),
    (
      "initialized final",
      FieldDecl::builder()
        .name("x")
        .ty("int")
        .modifiers(Modifiers::private().with_final(true))
        .initializer("1")
        .build(),
    ),
  ];

  for (label, nearer_x) in cases {
    let model = shadowing_hierarchy(nearer_x);
    let derived = class_id(&model, "Derived");
    let collection = FieldCollector::new(&model)
      .analyze(model.caret_in_class(derived))
      .unwrap();

    assert_eq!(field_names(&collection.fields), ["y"], "failed for {label}");
    let base_x = collection
      .excluded
      .iter()
      .find(|excluded| excluded.name == "x" && excluded.declaring_class_name == "p.Base");
    assert_eq!(
      base_x.map(|excluded| excluded.reason),
      Some(Exclusion::Shadowed),
      "failed for {label}"
    );
  }
}

#[test]
fn test_field_under_caret_still_shadows_ancestor_field() {
  let model = shadowing_hierarchy(FieldDecl::builder().name("x").ty("int").modifiers(Modifiers::private()).build());
  let derived = class_id(&model, "Derived");
  let offset = model.caret_in_field(derived, "x").unwrap();

  let fields = collect(&model, offset).unwrap();
  assert_eq!(field_names(&fields), ["y"]);
  assert!(fields.iter().all(|field| field.declaring_class == derived));
}
