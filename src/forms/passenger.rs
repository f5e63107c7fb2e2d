use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::directory::full_name;
use crate::forms::{validate_not_blank, validate_optional_phone};

fn default_passenger_count() -> u32 {
    1
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
/// Details of a passenger entered inline instead of picked from the directory.
pub struct PassengerInfo {
    #[serde(default)]
    #[validate(custom(function = "validate_not_blank"))]
    pub first_name: String,
    #[serde(default)]
    #[validate(custom(function = "validate_not_blank"))]
    pub last_name: String,
    /// Optional; any parseable international number is accepted.
    #[serde(default)]
    #[validate(custom(function = "validate_optional_phone"))]
    pub phone_number: Option<String>,
    /// Number of people travelling, at least one.
    #[serde(default = "default_passenger_count")]
    #[validate(range(min = 1, message = "must be at least 1"))]
    pub passenger_count: u32,
    /// Notes about the passenger (luggage, accessibility).
    #[serde(default)]
    pub description: Option<String>,
}

impl Default for PassengerInfo {
    fn default() -> Self {
        Self {
            first_name: String::new(),
            last_name: String::new(),
            phone_number: None,
            passenger_count: default_passenger_count(),
            description: None,
        }
    }
}

impl PassengerInfo {
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            ..Self::default()
        }
    }

    /// Name used in titles and summaries, if any part was entered.
    pub fn display_name(&self) -> Option<String> {
        full_name(&self.first_name, &self.last_name)
    }
}
