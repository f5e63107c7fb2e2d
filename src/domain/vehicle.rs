use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::types::{PlateNumber, compact_plate};

/// Descriptive data returned by the registration provider for a plate.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct VehicleDetails {
    pub make: String,
    pub model: String,
    pub year: Option<i32>,
    pub fuel_type: Option<String>,
    pub registration_date: Option<NaiveDate>,
}

/// Plate-entry fields of a vehicle form.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct VehicleDraft {
    pub plate: String,
    pub make: String,
    pub model: String,
    pub year: Option<i32>,
    pub fuel_type: Option<String>,
    pub registration_date: Option<NaiveDate>,
}

impl VehicleDraft {
    /// Returns `true` when `plate` designates the plate currently typed in.
    pub fn has_plate(&self, plate: &PlateNumber) -> bool {
        compact_plate(&self.plate) == compact_plate(plate.as_str())
    }

    /// Fills the descriptive fields from a lookup answer.
    ///
    /// Answers for any other plate than the current one are ignored and
    /// `false` is returned.
    pub fn apply_details(&mut self, plate: &PlateNumber, details: &VehicleDetails) -> bool {
        if !self.has_plate(plate) {
            return false;
        }
        self.make = details.make.clone();
        self.model = details.model.clone();
        self.year = details.year;
        self.fuel_type = details.fuel_type.clone();
        self.registration_date = details.registration_date;
        true
    }
}
