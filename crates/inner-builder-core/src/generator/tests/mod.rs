
use crate::{
  collector::FieldRecord,
  generator::{BUILDER_CLASS_NAME, SynthesisReport, synthesize},
  model::{
    ClassId, FieldDecl, JavaModel, MethodDecl, Modifiers, Node, Signature, SourceModel, Visibility,
  },
  options::{FactoryLocation, FactoryName, GeneratorOptions, SetterNotation},
  render::render_statement,
  tests::support::{ACCOUNT, PERSON, class_id, fields_of, load, signatures},
};

struct Generated {
  model: JavaModel,
  target: ClassId,
  builder: ClassId,
  report: SynthesisReport,
}

fn generate(json: &str, class: &str, options: &GeneratorOptions) -> Generated {
  let mut model = load(json);
  let target = class_id(&model, class);
  let fields = fields_of(&model, target);
  let report = synthesize(&mut model, target, &fields, options).unwrap();
  Generated {
    builder: report.builder_class,
    model,
    target,
    report,
  }
}

fn method<'a>(model: &'a JavaModel, class: ClassId, signature: &Signature) -> &'a MethodDecl {
  let id = model
    .find_member(class, signature)
    .unwrap_or_else(|| panic!("missing {signature}"));
  model.class(class).member(id).and_then(|m| m.as_method()).unwrap()
}

fn body(model: &JavaModel, class: ClassId, signature: &Signature) -> Vec<String> {
  method(model, class, signature).body.iter().map(render_statement).collect()
}

fn mirror<'a>(model: &'a JavaModel, builder: ClassId, name: &str) -> &'a FieldDecl {
  model.find_field(builder, name).unwrap().1
}

#[test]
fn test_default_options_scenario() {
  let Generated {
    model,
    target,
    builder,
    report,
  } = generate(PERSON, "Person", &GeneratorOptions::default());

  assert!(report.created_builder);
  assert_eq!(model.find_nested_class(target, BUILDER_CLASS_NAME), Some(builder));
  let builder_class = model.class(builder);
  assert_eq!(
    builder_class.modifiers,
    Modifiers::public().with_static().with_final(true)
  );

  assert_eq!(
    signatures(&model, target),
    vec![
      Signature::field("name"),
      Signature::field("age"),
      Signature::constructor("Person", ["Builder"]),
      Signature::method("newBuilder", ["String"]),
    ]
  );
  assert_eq!(
    signatures(&model, builder),
    vec![
      Signature::field("name"),
      Signature::field("age"),
      Signature::constructor("Builder", ["String"]),
      Signature::method("age", ["int"]),
      Signature::method("build", Vec::<String>::new()),
    ]
  );

  assert!(mirror(&model, builder, "name").modifiers.is_final);
  assert!(!mirror(&model, builder, "age").modifiers.is_final);
  assert_eq!(mirror(&model, builder, "age").modifiers.visibility, Visibility::Private);

  let constructor = method(&model, target, &Signature::constructor("Person", ["Builder"]));
  assert_eq!(constructor.modifiers, Modifiers::private());
  assert_eq!(constructor.parameters[0].name, "builder");
  assert_eq!(
    body(&model, target, &Signature::constructor("Person", ["Builder"])),
    ["name = builder.name;", "age = builder.age;"]
  );

  let builder_constructor = Signature::constructor("Builder", ["String"]);
  assert_eq!(method(&model, builder, &builder_constructor).modifiers, Modifiers::private());
  assert_eq!(body(&model, builder, &builder_constructor), ["this.name = name;"]);

  let factory = Signature::method("newBuilder", ["String"]);
  assert_eq!(method(&model, target, &factory).modifiers, Modifiers::public().with_static());
  assert_eq!(body(&model, target, &factory), ["return new Builder(name);"]);

  let setter = Signature::method("age", ["int"]);
  assert_eq!(method(&model, builder, &setter).parameters[0].name, "val");
  assert_eq!(body(&model, builder, &setter), ["age = val;", "return this;"]);

  let build = Signature::method("build", Vec::<String>::new());
  assert_eq!(
    method(&model, builder, &build).return_type.as_ref().map(|ty| ty.canonical()),
    Some("Person")
  );
  assert_eq!(body(&model, builder, &build), ["return new Person(this);"]);
}

#[test]
fn test_field_names_scenario() {
  let options = GeneratorOptions::builder().field_names(true).build();
  let Generated { model, builder, .. } = generate(PERSON, "Person", &options);

  let setter = Signature::method("age", ["int"]);
  assert_eq!(method(&model, builder, &setter).parameters[0].name, "age");
  assert_eq!(body(&model, builder, &setter), ["this.age = age;", "return this;"]);
}

#[test]
fn test_regeneration_is_idempotent() {
  let options = GeneratorOptions::builder().copy_constructor(true).with_javadoc(true).build();
  let Generated {
    mut model, target, builder, ..
  } = generate(PERSON, "Person", &options);
  let target_before = signatures(&model, target);
  let builder_before = signatures(&model, builder);

  let fields = fields_of(&model, target);
  let report = synthesize(&mut model, target, &fields, &options).unwrap();

  assert!(report.is_noop(), "second run changed the model: {report:?}");
  assert_eq!(report.builder_class, builder);
  assert_eq!(signatures(&model, target), target_before);
  assert_eq!(signatures(&model, builder), builder_before);
}

#[test]
fn test_added_field_only_adds_its_members() {
  let options = GeneratorOptions::default();
  let Generated {
    mut model, target, builder, ..
  } = generate(PERSON, "Person", &options);
  let target_before = signatures(&model, target);
  let builder_before = signatures(&model, builder);

  let (age, _) = model.find_field(target, "age").unwrap();
  model
    .insert_member(
      target,
      Some(age),
      Node::Field(
        FieldDecl::builder()
          .name("note")
          .ty("java.lang.String")
          .modifiers(Modifiers::private())
          .build(),
      ),
    )
    .unwrap();

  let fields = fields_of(&model, target);
  let report = synthesize(&mut model, target, &fields, &options).unwrap();

  assert_eq!(
    report.inserted,
    vec![Signature::field("note"), Signature::method("note", ["String"])]
  );
  assert!(report.removed.is_empty());
  assert!(
    report
      .replaced
      .iter()
      .all(|signature| target_before.contains(signature) || builder_before.contains(signature))
  );

  let builder_after = signatures(&model, builder);
  assert_eq!(
    builder_after,
    vec![
      Signature::field("name"),
      Signature::field("age"),
      Signature::field("note"),
      Signature::constructor("Builder", ["String"]),
      Signature::method("age", ["int"]),
      Signature::method("note", ["String"]),
      Signature::method("build", Vec::<String>::new()),
    ]
  );
  let mut target_after = signatures(&model, target);
  target_after.retain(|signature| signature != &Signature::field("note"));
  assert_eq!(target_after, target_before);
}

#[test]
fn test_final_setters_treat_final_fields_as_mutable() {
  let options = GeneratorOptions::builder().final_setters(true).build();
  let Generated { model, target, builder, .. } = generate(PERSON, "Person", &options);

  assert!(!mirror(&model, builder, "name").modifiers.is_final);
  assert!(model.find_member(builder, &Signature::constructor("Builder", Vec::<String>::new())).is_some());
  assert!(model.find_member(builder, &Signature::method("name", ["String"])).is_some());
  assert!(model.find_member(target, &Signature::method("newBuilder", Vec::<String>::new())).is_some());
}

#[test]
fn test_toggling_final_setters_converges_mirror_finality() {
  let Generated {
    mut model, target, builder, ..
  } = generate(PERSON, "Person", &GeneratorOptions::default());
  assert!(mirror(&model, builder, "name").modifiers.is_final);

  let fields = fields_of(&model, target);
  let options = GeneratorOptions::builder().final_setters(true).build();
  let report = synthesize(&mut model, target, &fields, &options).unwrap();

  assert!(report.replaced.contains(&Signature::field("name")));
  assert!(!mirror(&model, builder, "name").modifiers.is_final);
}

#[test]
fn test_without_factory_the_builder_constructor_is_public() {
  let options = GeneratorOptions::builder().new_builder_method(false).build();
  let Generated { model, target, builder, .. } = generate(PERSON, "Person", &options);

  let constructor = method(&model, builder, &Signature::constructor("Builder", ["String"]));
  assert_eq!(constructor.modifiers, Modifiers::public());
  assert_eq!(
    signatures(&model, target),
    vec![
      Signature::field("name"),
      Signature::field("age"),
      Signature::constructor("Person", ["Builder"]),
    ]
  );
}

#[test]
fn test_factory_naming_and_placement() {
  let cases = [
    (FactoryName::NewBuilder, FactoryLocation::TargetClass, "newBuilder", true),
    (FactoryName::Builder, FactoryLocation::TargetClass, "builder", true),
    (FactoryName::NewClassName, FactoryLocation::BuilderClass, "newPerson", false),
    (FactoryName::NewClassNameBuilder, FactoryLocation::BuilderClass, "newPersonBuilder", false),
  ];
  for (name, location, expected, on_target) in cases {
    let options = GeneratorOptions::builder()
      .factory_name(name)
      .factory_location(location)
      .build();
    let Generated { model, target, builder, .. } = generate(PERSON, "Person", &options);
    let signature = Signature::method(expected, ["String"]);
    let host = if on_target { target } else { builder };
    let other = if on_target { builder } else { target };
    assert!(model.find_member(host, &signature).is_some(), "failed for {name:?}");
    assert!(model.find_member(other, &signature).is_none(), "failed for {name:?}");
  }
}

#[test]
fn test_copy_method_goes_through_the_factory() {
  let options = GeneratorOptions::builder().copy_constructor(true).build();
  let Generated { model, target, .. } = generate(PERSON, "Person", &options);

  let copy = Signature::method("newBuilder", ["Person"]);
  let copy_method = method(&model, target, &copy);
  assert_eq!(copy_method.modifiers, Modifiers::public().with_static());
  assert_eq!(copy_method.parameters[0].name, "copy");
  assert_eq!(
    body(&model, target, &copy),
    [
      "Builder builder = newBuilder(copy.name);",
      "builder.age = copy.age;",
      "return builder;",
    ]
  );
  let position = |signature: &Signature| signatures(&model, target).iter().position(|s| s == signature);
  assert_eq!(
    position(&copy),
    position(&Signature::method("newBuilder", ["String"])).map(|factory| factory + 1)
  );
}

#[test]
fn test_copy_method_stays_on_target_when_factory_is_on_builder() {
  let options = GeneratorOptions::builder()
    .copy_constructor(true)
    .factory_location(FactoryLocation::BuilderClass)
    .build();
  let Generated {
    model, target, builder, ..
  } = generate(PERSON, "Person", &options);

  let copy = Signature::method("newBuilder", ["Person"]);
  let copy_method = method(&model, target, &copy);
  assert_eq!(copy_method.modifiers, Modifiers::public().with_static());
  assert!(model.find_member(builder, &copy).is_none());
  assert!(model.find_member(builder, &Signature::method("newBuilder", ["String"])).is_some());
  assert_eq!(
    body(&model, target, &copy),
    [
      "Builder builder = Builder.newBuilder(copy.name);",
      "builder.age = copy.age;",
      "return builder;",
    ]
  );
}

#[test]
fn test_copy_method_with_only_final_fields() {
  let mut model = load(PERSON);
  let person = class_id(&model, "Person");
  let fields: Vec<FieldRecord> = fields_of(&model, person)
    .into_iter()
    .filter(|field| field.is_final)
    .collect();
  let options = GeneratorOptions::builder()
    .copy_constructor(true)
    .factory_location(FactoryLocation::BuilderClass)
    .build();
  let report = synthesize(&mut model, person, &fields, &options).unwrap();

  let copy = Signature::method("newBuilder", ["Person"]);
  assert_eq!(body(&model, person, &copy), ["return new Builder(copy.name);"]);
  assert!(model.find_member(report.builder_class, &copy).is_none());
  assert!(model.find_member(report.builder_class, &Signature::method("age", ["int"])).is_none());
}

#[test]
fn test_copy_constructor_without_factory() {
  let options = GeneratorOptions::builder()
    .copy_constructor(true)
    .new_builder_method(false)
    .build();
  let Generated { model, builder, .. } = generate(PERSON, "Person", &options);

  let copy = Signature::constructor("Builder", ["Person"]);
  assert_eq!(method(&model, builder, &copy).modifiers, Modifiers::public());
  assert_eq!(
    body(&model, builder, &copy),
    ["this.name = copy.name;", "this.age = copy.age;"]
  );
}

#[test]
fn test_prefixed_fields_and_existing_setters() {
  let options = GeneratorOptions::builder()
    .final_setters(true)
    .setter_notation(SetterNotation::With)
    .build();
  let Generated { model, target, builder, .. } = generate(ACCOUNT, "Account", &options);

  let cases = [
    ("withNumber", "java.lang.String", ["mNumber = val;", "return this;"]),
    ("withVal", "java.math.BigDecimal", ["val = value;", "return this;"]),
    ("withOwner", "java.lang.String", ["owner = val;", "return this;"]),
  ];
  for (name, ty, expected) in cases {
    let signature = Signature::method(name, [crate::model::TypeRef::new(ty).presentable()]);
    assert_eq!(body(&model, builder, &signature), expected, "failed for {name}");
  }

  assert_eq!(
    body(&model, target, &Signature::constructor("Account", ["Builder"])),
    ["mNumber = builder.mNumber;", "val = builder.val;", "setOwner(builder.owner);"]
  );
}

#[test]
fn test_prefixed_field_names_mode() {
  let options = GeneratorOptions::builder()
    .final_setters(true)
    .field_names(true)
    .setter_notation(SetterNotation::Set)
    .build();
  let Generated { model, builder, .. } = generate(ACCOUNT, "Account", &options);

  let setter = Signature::method("setNumber", ["String"]);
  assert_eq!(method(&model, builder, &setter).parameters[0].name, "number");
  assert_eq!(body(&model, builder, &setter), ["this.mNumber = number;", "return this;"]);

  let setter = Signature::method("setVal", ["BigDecimal"]);
  assert_eq!(body(&model, builder, &setter), ["this.val = val;", "return this;"]);
}

#[test]
fn test_mirror_field_type_drift_recreates_the_field() {
  let Generated {
    mut model, target, builder, ..
  } = generate(PERSON, "Person", &GeneratorOptions::default());

  let (age, _) = model.find_field(target, "age").unwrap();
  model
    .replace_member(
      target,
      age,
      Node::Field(FieldDecl::builder().name("age").ty("long").modifiers(Modifiers::private()).build()),
    )
    .unwrap();

  let fields = fields_of(&model, target);
  let report = synthesize(&mut model, target, &fields, &GeneratorOptions::default()).unwrap();

  assert_eq!(report.removed, vec![Signature::field("age")]);
  assert!(report.inserted.contains(&Signature::field("age")));
  assert!(report.inserted.contains(&Signature::method("age", ["long"])));
  assert_eq!(mirror(&model, builder, "age").ty.canonical(), "long");

  let names: Vec<String> = signatures(&model, builder)
    .into_iter()
    .filter(|signature| signature.kind == crate::model::SignatureKind::Field)
    .map(|signature| signature.name)
    .collect();
  assert_eq!(names, ["name", "age"]);
}

#[test]
fn test_existing_builder_members_are_replaced_in_place() {
  let Generated {
    mut model, target, builder, ..
  } = generate(PERSON, "Person", &GeneratorOptions::default());
  let setter = Signature::method("age", ["int"]);
  let id = model.find_member(builder, &setter).unwrap();
  let position = model.class(builder).position_of(id);

  let fields = fields_of(&model, target);
  let options = GeneratorOptions::builder().field_names(true).build();
  let report = synthesize(&mut model, target, &fields, &options).unwrap();

  assert_eq!(report.replaced, vec![setter.clone()]);
  assert_eq!(model.find_member(builder, &setter), Some(id));
  assert_eq!(model.class(builder).position_of(id), position);
}

#[test]
fn test_handwritten_target_constructor_is_rewritten_in_place() {
  let mut model = load(PERSON);
  let person = class_id(&model, "Person");
  let handwritten = MethodDecl::builder()
    .kind(crate::model::MethodKind::Constructor)
    .name("Person")
    .parameters(vec![
      crate::model::Parameter::builder()
        .name("b")
        .ty("Builder")
        .build(),
    ])
    .build();
  let id = model.insert_member(person, None, Node::Method(handwritten)).unwrap();

  let fields = fields_of(&model, person);
  synthesize(&mut model, person, &fields, &GeneratorOptions::default()).unwrap();

  let constructors: Vec<_> = model
    .class(person)
    .methods()
    .filter(|(_, method)| method.is_constructor())
    .collect();
  assert_eq!(constructors.len(), 1);
  assert_eq!(constructors[0].0, id);
  assert_eq!(constructors[0].1.parameters[0].name, "builder");
}
