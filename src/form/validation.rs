use std::collections::BTreeMap;

use super::{FieldName, FormFields};

/// Per-field validation messages, ordered like the form.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FormErrors(BTreeMap<FieldName, String>);

impl FormErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, field: FieldName) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (FieldName, &str)> {
        self.0.iter().map(|(field, message)| (*field, message.as_str()))
    }
}

/// Report every empty field as `"<label> is required."`.
///
/// Whitespace counts as a value; only the empty string is missing.
pub fn validate(fields: &FormFields) -> FormErrors {
    FormErrors(
        FieldName::ALL
            .into_iter()
            .filter(|field| fields.get(*field).is_empty())
            .map(|field| (field, format!("{} is required.", field.label())))
            .collect(),
    )
}
