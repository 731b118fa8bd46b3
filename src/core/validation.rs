use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

pub const MAX_LENGTH: usize = 255;

pub const NON_FIELD_ERRORS: &str = "non_field_errors";

pub const REQUIRED: &str = "This field is required.";
pub const NULL: &str = "This field may not be null.";
pub const BLANK: &str = "This field may not be blank.";
pub const NULL_CHARACTERS: &str = "Null characters are not allowed.";
pub const NOT_A_STRING: &str = "Not a valid string.";
pub const NOT_A_BOOLEAN: &str = "Must be a valid boolean.";

pub fn too_long(max: usize) -> String {
    format!("Ensure this field has no more than {} characters.", max)
}

pub fn not_a_list(value: &Value) -> String {
    format!("Expected a list of items but got type \"{}\".", type_name(value))
}

pub fn not_a_dict(value: &Value) -> String {
    format!("Invalid data. Expected a dictionary, but got {}.", type_name(value))
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "NoneType",
        Value::Bool(_) => "bool",
        Value::Number(n) if n.is_f64() => "float",
        Value::Number(_) => "int",
        Value::String(_) => "str",
        Value::Array(_) => "list",
        Value::Object(_) => "dict",
    }
}

/// A payload field as the client sent it. Types are checked during
/// validation, so a wrongly typed value becomes a field error instead of a
/// failed body parse.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Field {
    #[default]
    Missing,
    Present(Value),
}

impl Field {
    pub fn value(v: impl Into<Value>) -> Self {
        Field::Present(v.into())
    }
}

impl<'de> Deserialize<'de> for Field {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        // null still arrives here; only an absent key falls back to Missing
        Value::deserialize(deserializer).map(Field::Present)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FieldError {
    Messages(Vec<String>),
    /// one entry per list element, empty for elements that passed
    Nested(Vec<ValidationErrors>),
    Object(ValidationErrors),
}

/// Field-level errors keyed by field name.
///
/// Serialises as `{"field": ["message", ...], "list": [{}, {"field": [...]}]}`,
/// which is the shape REST framework clients already understand.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<String, FieldError>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        let entry = self.0.entry(field.to_owned()).or_insert_with(|| FieldError::Messages(Vec::new()));
        if !matches!(entry, FieldError::Messages(_)) {
            *entry = FieldError::Messages(Vec::new());
        }
        if let FieldError::Messages(messages) = entry {
            messages.push(message.into());
        }
    }

    pub fn add_nested(&mut self, field: &str, items: Vec<ValidationErrors>) {
        if items.iter().any(|e| !e.is_empty()) {
            self.0.insert(field.to_owned(), FieldError::Nested(items));
        }
    }

    pub fn add_object(&mut self, field: &str, errors: ValidationErrors) {
        if !errors.is_empty() {
            self.0.insert(field.to_owned(), FieldError::Object(errors));
        }
    }

    pub fn get(&self, field: &str) -> Option<&FieldError> {
        self.0.get(field)
    }

    /// Turns the collected errors into a result, `Ok(value)` when nothing was recorded.
    pub fn into_result<T>(self, value: impl FnOnce() -> T) -> Result<T, Self> {
        if self.is_empty() {
            Ok(value())
        } else {
            Err(self)
        }
    }

    fn write_prefixed(&self, f: &mut fmt::Formatter<'_>, prefix: &str, first: &mut bool) -> fmt::Result {
        for (field, error) in &self.0 {
            match error {
                FieldError::Messages(messages) => {
                    for m in messages {
                        if !*first {
                            write!(f, "; ")?;
                        }
                        *first = false;
                        write!(f, "{}{}: {}", prefix, field, m)?;
                    }
                }
                FieldError::Nested(items) => {
                    for (i, item) in items.iter().enumerate() {
                        item.write_prefixed(f, &format!("{}{}[{}].", prefix, field, i), first)?;
                    }
                }
                FieldError::Object(errors) => errors.write_prefixed(f, &format!("{}{}.", prefix, field), first)?,
            }
        }
        Ok(())
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        self.write_prefixed(f, "", &mut first)
    }
}

impl std::error::Error for ValidationErrors {}

/// Validates a required, length bounded char field. Surrounding whitespace is
/// trimmed before checking and the trimmed value is what gets stored.
pub fn char_field(errors: &mut ValidationErrors, field: &str, value: Field, max: usize) -> String {
    let value = match value {
        Field::Missing => {
            errors.add(field, REQUIRED);
            return String::new();
        }
        Field::Present(Value::Null) => {
            errors.add(field, NULL);
            return String::new();
        }
        Field::Present(Value::String(s)) => s,
        Field::Present(_) => {
            errors.add(field, NOT_A_STRING);
            return String::new();
        }
    };
    let value = value.trim();
    if value.is_empty() {
        errors.add(field, BLANK);
        return String::new();
    }
    // postgres text columns cannot hold NUL
    if value.contains('\0') {
        errors.add(field, NULL_CHARACTERS);
    }
    if value.chars().count() > max {
        errors.add(field, too_long(max));
    }
    value.to_owned()
}

/// Validates an optional boolean field, `default` when the key is absent.
pub fn bool_field(errors: &mut ValidationErrors, field: &str, value: Field, default: bool) -> bool {
    match value {
        Field::Missing => default,
        Field::Present(Value::Bool(b)) => b,
        Field::Present(Value::Null) => {
            errors.add(field, NULL);
            default
        }
        Field::Present(_) => {
            errors.add(field, NOT_A_BOOLEAN);
            default
        }
    }
}

/// Validates a required list field and hands back its raw items.
pub fn list_field(errors: &mut ValidationErrors, field: &str, value: Field) -> Option<Vec<Value>> {
    match value {
        Field::Missing => {
            errors.add(field, REQUIRED);
            None
        }
        Field::Present(Value::Null) => {
            errors.add(field, NULL);
            None
        }
        Field::Present(Value::Array(items)) => Some(items),
        Field::Present(other) => {
            let mut inner = ValidationErrors::new();
            inner.add(NON_FIELD_ERRORS, not_a_list(&other));
            errors.add_object(field, inner);
            None
        }
    }
}
