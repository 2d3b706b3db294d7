use std::path::Path;

use comfy_table::{Attribute, Cell, CellAlignment, ContentArrangement, Row, Table};
use inner_builder_core::{
  collector::FieldCollector,
  config::ConfigStore,
  options::{GeneratorOptions, OptionDescriptor, catalog},
};

use super::{OptionStore, find_class, load_model};
use crate::ui::{Colors, colors::IntoComfyColor, term_width};

fn new_table(colors: &Colors, headers: &[&str]) -> Table {
  let mut table = Table::new();
  table
    .load_preset("  ── ──            ")
    .set_content_arrangement(ContentArrangement::Dynamic)
    .set_width(term_width());

  let mut row = Row::new();
  for header in headers {
    row.add_cell(Cell::new(header).fg(IntoComfyColor::into(colors.label())));
  }
  table.set_header(row);
  table
}

fn flag(value: bool) -> &'static str {
  if value { "yes" } else { "" }
}

pub async fn list_fields(input: &Path, class: &str, colors: &Colors) -> anyhow::Result<()> {
  let model = load_model(input).await?;
  let id = find_class(&model, class)?;
  let collection = FieldCollector::new(&model)
    .analyze(model.caret_in_class(id))
    .map_err(|reason| anyhow::anyhow!("no builder for `{class}`: {reason}"))?;

  let mut table = new_table(colors, &["FIELD", "TYPE", "DECLARED IN", "FINAL", "SETTER"]);
  for field in &collection.fields {
    let mut row = Row::new();
    row.add_cell(
      Cell::new(&field.name)
        .fg(IntoComfyColor::into(colors.value()))
        .add_attribute(Attribute::Bold),
    );
    row.add_cell(Cell::new(field.ty.presentable()).fg(IntoComfyColor::into(colors.primary())));
    row.add_cell(Cell::new(&field.declaring_class_name).fg(IntoComfyColor::into(colors.info())));
    row.add_cell(Cell::new(flag(field.is_final)).set_alignment(CellAlignment::Center));
    row.add_cell(Cell::new(flag(field.has_setter)).set_alignment(CellAlignment::Center));
    table.add_row(row);
  }
  println!("{table}");

  if !collection.excluded.is_empty() {
    println!();
    let mut table = new_table(colors, &["SKIPPED", "DECLARED IN", "REASON"]);
    for excluded in &collection.excluded {
      let mut row = Row::new();
      row.add_cell(Cell::new(&excluded.name).fg(IntoComfyColor::into(colors.primary())));
      row.add_cell(Cell::new(&excluded.declaring_class_name).fg(IntoComfyColor::into(colors.info())));
      row.add_cell(Cell::new(excluded.reason.to_string()).fg(IntoComfyColor::into(colors.accent())));
      table.add_row(row);
    }
    println!("{table}");
  }
  Ok(())
}

/// Rows of `list options`: key, kind, caption and the value the generator would use.
fn option_rows(store: &impl ConfigStore) -> Vec<(String, &'static str, &'static str, String)> {
  let options = GeneratorOptions::load(store);
  catalog()
    .iter()
    .map(|descriptor| {
      let option = descriptor.option();
      let (kind, value) = match descriptor {
        OptionDescriptor::Checkbox { .. } => ("toggle", options.contains(option).to_string()),
        OptionDescriptor::Dropdown { .. } => (
          "choice",
          descriptor
            .selected_value(store.get_value(&option.key()).as_deref())
            .map(|(_, caption)| caption.to_string())
            .unwrap_or_default(),
        ),
      };
      (option.key(), kind, descriptor.caption(), value)
    })
    .collect()
}

pub fn list_options(options: Option<&Path>, colors: &Colors) -> anyhow::Result<()> {
  let store = OptionStore::open(options)?;

  let mut table = new_table(colors, &["KEY", "KIND", "OPTION", "VALUE"]);
  for (key, kind, caption, value) in option_rows(&store) {
    let mut row = Row::new();
    row.add_cell(Cell::new(key).fg(IntoComfyColor::into(colors.primary())));
    row.add_cell(Cell::new(kind).fg(IntoComfyColor::into(colors.info())));
    row.add_cell(Cell::new(caption));
    row.add_cell(
      Cell::new(value)
        .fg(IntoComfyColor::into(colors.value()))
        .add_attribute(Attribute::Bold),
    );
    table.add_row(row);
  }
  println!("{table}");
  Ok(())
}
