/// Does the name contain at least one lowercase character?
///
/// Names without one (`MAX_SIZE`, `ID`) are treated as constants by convention.
#[must_use]
pub fn has_lowercase_char(name: &str) -> bool {
  name.chars().any(char::is_lowercase)
}

/// Hungarian-style one-letter prefix: a lowercase letter followed by an uppercase one (`mName`, `sCount`).
#[must_use]
pub fn has_one_letter_prefix(name: &str) -> bool {
  let mut chars = name.chars();
  matches!((chars.next(), chars.next()), (Some(first), Some(second)) if first.is_lowercase() && second.is_uppercase())
}

/// Uppercases the first character, dropping a one-letter prefix first when present.
///
/// `foo` becomes `Foo`, `mFoo` becomes `Foo`, `x` becomes `X`.
#[must_use]
pub fn capitalize(name: &str) -> String {
  let stem = if has_one_letter_prefix(name) {
    name.chars().skip(1).collect::<String>()
  } else {
    name.to_string()
  };
  let mut chars = stem.chars();
  match chars.next() {
    Some(first) => first.to_uppercase().chain(chars).collect(),
    None => String::new(),
  }
}

/// Field name with a one-letter prefix removed and the next letter lowercased (`mFooBar` → `fooBar`).
#[must_use]
pub fn strip_one_letter_prefix(name: &str) -> String {
  if !has_one_letter_prefix(name) {
    return name.to_string();
  }
  let mut chars = name.chars().skip(1);
  match chars.next() {
    Some(first) => first.to_lowercase().chain(chars).collect(),
    None => String::new(),
  }
}

/// Conventional JavaBean setter name for a field.
#[must_use]
pub fn setter_name(field_name: &str) -> String {
  format!("set{}", capitalize(field_name))
}
