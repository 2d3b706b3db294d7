//! Java source rendering of the code model.
//!
//! Whitespace only: the printer never reorders members or resolves names, so the
//! output mirrors the model exactly.

#[cfg(test)]
mod tests;

use itertools::Itertools;

use crate::model::{
  Annotation, ClassId, Documentation, Expr, FieldDecl, Member, MethodDecl, Modifiers, Node, Parameter, SourceModel,
  Statement,
};

const DEFAULT_INDENT: &str = "    ";

/// Line buffer tracking the current indentation depth.
#[derive(Debug, Default)]
struct SourceBuilder {
  indent: String,
  depth: usize,
  out: String,
}

impl SourceBuilder {
  fn new(indent: &str) -> Self {
    Self {
      indent: indent.to_string(),
      ..Self::default()
    }
  }

  fn push_line(&mut self, line: &str) {
    if !line.is_empty() {
      for _ in 0..self.depth {
        self.out.push_str(&self.indent);
      }
      self.out.push_str(line);
    }
    self.out.push('\n');
  }

  fn blank_line(&mut self) {
    self.out.push('\n');
  }

  fn indent(&mut self) {
    self.depth += 1;
  }

  fn dedent(&mut self) {
    self.depth = self.depth.saturating_sub(1);
  }

  fn build(self) -> String {
    self.out
  }
}

#[derive(Debug, Clone)]
pub struct JavaPrinter {
  indent: String,
}

impl Default for JavaPrinter {
  fn default() -> Self {
    Self::new(DEFAULT_INDENT)
  }
}

impl JavaPrinter {
  pub fn new(indent: impl Into<String>) -> Self {
    Self { indent: indent.into() }
  }

  /// The top-level class enclosing `class`, preceded by its package declaration.
  pub fn print_file<M: SourceModel + ?Sized>(&self, model: &M, class: ClassId) -> String {
    let top = model.top_level_of(class);
    let package = &model.class(top).package;
    let body = self.print_class(model, top);
    if package.is_empty() {
      body
    } else {
      format!("package {package};\n\n{body}")
    }
  }

  pub fn print_class<M: SourceModel + ?Sized>(&self, model: &M, class: ClassId) -> String {
    let mut builder = SourceBuilder::new(&self.indent);
    self.class(model, class, &mut builder);
    builder.build()
  }

  fn class<M: SourceModel + ?Sized>(&self, model: &M, id: ClassId, builder: &mut SourceBuilder) {
    let class = model.class(id);
    docs(&class.docs, builder);
    annotations(&class.annotations, builder);

    let mut header = modifiers(&class.modifiers);
    header.push_str("class ");
    header.push_str(&class.name);
    if let Some(superclass) = &class.superclass {
      header.push_str(" extends ");
      header.push_str(superclass);
    }
    header.push_str(" {");
    builder.push_line(&header);
    builder.indent();

    let mut previous: Option<&Member> = None;
    for member in &class.members {
      let both_fields = previous.is_some_and(|p| p.as_field().is_some()) && member.as_field().is_some();
      if previous.is_some() && !both_fields {
        builder.blank_line();
      }
      match &member.node {
        Node::Field(field) => self.field(field, builder),
        Node::Method(method) => self.method(method, builder),
        Node::Class(nested) => self.class(model, *nested, builder),
      }
      previous = Some(member);
    }

    builder.dedent();
    builder.push_line("}");
  }

  fn field(&self, field: &FieldDecl, builder: &mut SourceBuilder) {
    docs(&field.docs, builder);
    annotations(&field.annotations, builder);
    let mut line = format!("{}{} {}", modifiers(&field.modifiers), field.ty, field.name);
    if let Some(initializer) = &field.initializer {
      line.push_str(" = ");
      line.push_str(initializer);
    }
    line.push(';');
    builder.push_line(&line);
  }

  fn method(&self, method: &MethodDecl, builder: &mut SourceBuilder) {
    docs(&method.docs, builder);
    annotations(&method.annotations, builder);

    let mut header = modifiers(&method.modifiers);
    if !method.is_constructor() {
      match &method.return_type {
        Some(ty) => header.push_str(ty.canonical()),
        None => header.push_str("void"),
      }
      header.push(' ');
    }
    header.push_str(&method.name);
    header.push('(');
    header.push_str(&method.parameters.iter().map(parameter).join(", "));
    header.push_str(") {");
    builder.push_line(&header);

    builder.indent();
    for statement in &method.body {
      builder.push_line(&render_statement(statement));
    }
    builder.dedent();
    builder.push_line("}");
  }
}

fn docs(docs: &Documentation, builder: &mut SourceBuilder) {
  if docs.is_empty() {
    return;
  }
  builder.push_line("/**");
  for line in docs.lines() {
    if line.is_empty() {
      builder.push_line(" *");
    } else {
      builder.push_line(&format!(" * {line}"));
    }
  }
  builder.push_line(" */");
}

fn annotations(annotations: &[Annotation], builder: &mut SourceBuilder) {
  for annotation in annotations {
    builder.push_line(&render_annotation(annotation));
  }
}

fn render_annotation(annotation: &Annotation) -> String {
  match &annotation.arguments {
    Some(arguments) => format!("@{}({arguments})", annotation.name),
    None => format!("@{}", annotation.name),
  }
}

/// Modifier keywords followed by a space, or nothing for package-private members.
fn modifiers(modifiers: &Modifiers) -> String {
  modifiers.keywords().map(|keyword| format!("{keyword} ")).collect()
}

fn parameter(parameter: &Parameter) -> String {
  let annotations = parameter
    .annotations
    .iter()
    .map(|annotation| format!("{} ", render_annotation(annotation)))
    .collect::<String>();
  format!("{annotations}{} {}", parameter.ty, parameter.name)
}

pub fn render_statement(statement: &Statement) -> String {
  match statement {
    Statement::Assign { target, value } => format!("{} = {};", render_expr(target), render_expr(value)),
    Statement::Expr { expr } => format!("{};", render_expr(expr)),
    Statement::Local { ty, name, init } => format!("{ty} {name} = {};", render_expr(init)),
    Statement::Return { value } => format!("return {};", render_expr(value)),
    Statement::Raw { text } => text.clone(),
  }
}

pub fn render_expr(expr: &Expr) -> String {
  match expr {
    Expr::This => "this".to_string(),
    Expr::Name { name } => name.clone(),
    Expr::Field { target, name } => format!("{}.{name}", render_expr(target)),
    Expr::Call { target, method, args } => {
      let args = args.iter().map(render_expr).join(", ");
      match target {
        Some(target) => format!("{}.{method}({args})", render_expr(target)),
        None => format!("{method}({args})"),
      }
    }
    Expr::New { class, args } => format!("new {class}({})", args.iter().map(render_expr).join(", ")),
  }
}
