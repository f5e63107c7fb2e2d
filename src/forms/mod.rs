//! Draft forms edited by the booking wizard and their validation rules.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

use serde::Serialize;
use thiserror::Error;
use validator::{ValidationError, ValidationErrors, ValidationErrorsKind};

use crate::domain::types::PhoneNumber;

pub mod booking;
pub mod mission;
pub mod passenger;
pub mod ride;
pub mod steps;
pub mod validation;

#[derive(Debug, Error)]
/// Errors that can occur when processing form data.
pub enum FormError {
    #[error("invalid draft payload: {0}")]
    Payload(#[from] serde_json::Error),
}

/// Rejects strings that are empty once trimmed.
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank").with_message(Cow::Borrowed("is required")));
    }
    Ok(())
}

/// Accepts blank input (the field is optional) or a parseable phone number.
pub fn validate_optional_phone(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() || PhoneNumber::new(value).is_ok() {
        return Ok(());
    }
    Err(ValidationError::new("phone")
        .with_message(Cow::Borrowed("is not a valid international phone number")))
}

/// Field-level error state keyed by field path (`mission.rides[0].pickup_address`).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

/// Returns `true` when `path` is `declared` itself or nested below it.
pub fn path_is_under(path: &str, declared: &str) -> bool {
    match path.strip_prefix(declared) {
        Some(rest) => rest.is_empty() || rest.starts_with('.') || rest.starts_with('['),
        None => false,
    }
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.0.entry(path.into()).or_default().push(message.into());
    }

    pub fn get(&self, path: &str) -> Option<&[String]> {
        self.0.get(path).map(Vec::as_slice)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.0.contains_key(path)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// Drops every entry at or below `declared`.
    pub fn clear_under(&mut self, declared: &str) {
        self.0.retain(|path, _| !path_is_under(path, declared));
    }

    /// Moves the entries of `other` that fall under one of `declared` into `self`.
    pub fn absorb_under(&mut self, other: FieldErrors, declared: &[&str]) -> usize {
        let mut absorbed = 0;
        for (path, messages) in other.0 {
            if declared.iter().any(|d| path_is_under(&path, d)) {
                absorbed += 1;
                self.0.entry(path).or_default().extend(messages);
            }
        }
        absorbed
    }

    /// Flattens `validator` output into dotted paths below `prefix`.
    pub fn extend_from_validation(&mut self, prefix: &str, errors: &ValidationErrors) {
        for (field, kind) in errors.errors() {
            let path = join_path(prefix, field);
            match kind {
                ValidationErrorsKind::Field(list) => {
                    for error in list {
                        let message = error
                            .message
                            .as_ref()
                            .map(|m| m.to_string())
                            .unwrap_or_else(|| error.code.to_string());
                        self.add(path.clone(), message);
                    }
                }
                ValidationErrorsKind::Struct(nested) => {
                    self.extend_from_validation(&path, nested);
                }
                ValidationErrorsKind::List(items) => {
                    for (index, nested) in items {
                        self.extend_from_validation(&format!("{path}[{index}]"), nested);
                    }
                }
            }
        }
    }
}

fn join_path(prefix: &str, field: &str) -> String {
    match (prefix.is_empty(), field) {
        (true, _) => field.to_string(),
        (false, "__all__") => prefix.to_string(),
        (false, _) => format!("{prefix}.{field}"),
    }
}

impl Display for FieldErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let rendered = self
            .0
            .iter()
            .map(|(path, messages)| format!("{path}: {}", messages.join(", ")))
            .collect::<Vec<_>>()
            .join("; ");
        write!(f, "{rendered}")
    }
}
