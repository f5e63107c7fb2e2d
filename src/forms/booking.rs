use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::ride::{RideCategory, RideStatus};
use crate::forms::FormError;
use crate::forms::mission::{MissionDraft, non_blank};
use crate::forms::passenger::PassengerInfo;
use crate::forms::ride::{Milestone, RideLeg};
use crate::forms::validate_not_blank;

fn default_true() -> bool {
    true
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
/// Root draft edited by the wizard.
///
/// The standalone ride fields and the `mission` block coexist; `is_mission`
/// decides which half is authoritative. The derived `Validate` impl covers the
/// standalone ride fields only; the passenger and mission blocks are checked
/// by [`crate::forms::validation`] according to their discriminant flags.
pub struct BookingDraft {
    /// Identifier of the ride being edited, if any.
    #[serde(default)]
    pub id: Option<String>,
    /// Directory passenger, used while `use_existing_passenger` is set.
    #[serde(default)]
    pub passenger_id: Option<String>,
    /// Passenger typed in by hand, used while `use_existing_passenger` is unset.
    #[serde(default)]
    pub passenger_info: Option<PassengerInfo>,
    /// Selects the live passenger branch; the other one is kept but ignored.
    #[serde(default = "default_true")]
    pub use_existing_passenger: bool,
    #[serde(default)]
    #[validate(custom(function = "validate_not_blank"))]
    pub pickup_address: String,
    #[serde(default)]
    #[validate(custom(function = "validate_not_blank"))]
    pub dropoff_address: String,
    #[serde(default)]
    #[validate(required(message = "is required"))]
    pub pickup_time: Option<NaiveDateTime>,
    #[serde(default)]
    pub category: RideCategory,
    #[serde(default)]
    pub status: RideStatus,
    /// Free text for the chauffeur; sanitized before display.
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    #[validate(range(min = 0.0, message = "cannot be negative"))]
    pub fare: Option<f64>,
    /// Intermediate stops between pickup and dropoff.
    #[serde(default)]
    #[validate(nested)]
    pub milestones: Vec<Milestone>,
    /// When set, `mission` is authoritative and the ride fields above are inert.
    #[serde(default)]
    pub is_mission: bool,
    /// Mission block. Outside mission mode only its `chauffeur_id` matters,
    /// as the trigger for promotion at submission.
    #[serde(default)]
    pub mission: Option<MissionDraft>,
}

impl Default for BookingDraft {
    fn default() -> Self {
        Self {
            id: None,
            passenger_id: None,
            passenger_info: None,
            use_existing_passenger: default_true(),
            pickup_address: String::new(),
            dropoff_address: String::new(),
            pickup_time: None,
            category: RideCategory::default(),
            status: RideStatus::default(),
            notes: None,
            fare: None,
            milestones: Vec::new(),
            is_mission: false,
            mission: None,
        }
    }
}

impl FromStr for BookingDraft {
    type Err = FormError;

    /// Parses a camelCase JSON draft, e.g. one saved from an edit screen.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(serde_json::from_str(s)?)
    }
}

impl BookingDraft {
    /// Existing passenger referenced by the draft, when that branch is live.
    pub fn referenced_passenger(&self) -> Option<&str> {
        if self.use_existing_passenger {
            non_blank(self.passenger_id.as_deref())
        } else {
            None
        }
    }

    /// Chauffeur attached to the mission block, whether or not mission mode is on.
    pub fn attached_chauffeur(&self) -> Option<&str> {
        self.mission.as_ref().and_then(MissionDraft::attached_chauffeur)
    }

    /// Identifier of the record being edited in the authoritative half.
    pub fn record_id(&self) -> Option<&str> {
        if self.is_mission {
            self.mission
                .as_ref()
                .and_then(|mission| non_blank(mission.id.as_deref()))
        } else {
            non_blank(self.id.as_deref())
        }
    }

    /// Mission block, created with defaults on first access.
    pub fn mission_mut(&mut self) -> &mut MissionDraft {
        self.mission.get_or_insert_with(MissionDraft::default)
    }

    /// Inline passenger block, created with defaults on first access.
    pub fn passenger_info_mut(&mut self) -> &mut PassengerInfo {
        self.passenger_info.get_or_insert_with(PassengerInfo::default)
    }

    /// Moves the standalone ride fields into a [`RideLeg`] and resets them.
    ///
    /// The leg is what a mission receives when a ride gets promoted; the
    /// standalone half of the draft is left at its defaults.
    pub fn take_standalone_ride(&mut self) -> RideLeg {
        let leg = RideLeg {
            id: self.id.take(),
            pickup_address: std::mem::take(&mut self.pickup_address),
            dropoff_address: std::mem::take(&mut self.dropoff_address),
            pickup_time: self.pickup_time.take(),
            category: self.category.for_mission(),
            status: RideStatus::default(),
            notes: self.notes.take(),
            fare: self.fare.take(),
            milestones: std::mem::take(&mut self.milestones),
        };
        self.category = RideCategory::default();
        self.status = RideStatus::default();
        leg
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn pickup_time() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 5, 1)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap()
    }

    #[test]
    fn empty_json_yields_the_default_draft() {
        let draft: BookingDraft = serde_json::from_str("{}").unwrap();
        assert_eq!(draft, BookingDraft::default());
        assert!(draft.use_existing_passenger);
        assert!(!draft.is_mission);
    }

    #[test]
    fn referenced_passenger_follows_the_toggle() {
        let mut draft = BookingDraft {
            passenger_id: Some("p-1".to_string()),
            ..BookingDraft::default()
        };
        assert_eq!(draft.referenced_passenger(), Some("p-1"));

        draft.use_existing_passenger = false;
        assert_eq!(draft.referenced_passenger(), None);
        assert_eq!(draft.passenger_id.as_deref(), Some("p-1"));
    }

    #[test]
    fn record_id_follows_the_authoritative_half() {
        let mut draft = BookingDraft {
            id: Some("ride-1".to_string()),
            ..BookingDraft::default()
        };
        draft.mission_mut().id = Some("mission-1".to_string());

        assert_eq!(draft.record_id(), Some("ride-1"));
        draft.is_mission = true;
        assert_eq!(draft.record_id(), Some("mission-1"));
    }

    #[test]
    fn taking_the_standalone_ride_resets_it() {
        let mut draft = BookingDraft {
            id: Some("ride-1".to_string()),
            pickup_address: "123 Main St".to_string(),
            dropoff_address: "Airport".to_string(),
            pickup_time: Some(pickup_time()),
            category: RideCategory::ChauffeurService,
            status: RideStatus::Assigned,
            notes: Some("Meet at door".to_string()),
            fare: Some(80.0),
            milestones: vec![Milestone {
                address: "Hotel".to_string(),
                ..Milestone::default()
            }],
            ..BookingDraft::default()
        };

        let leg = draft.take_standalone_ride();

        assert_eq!(leg.id.as_deref(), Some("ride-1"));
        assert_eq!(leg.pickup_address, "123 Main St");
        assert_eq!(leg.category, RideCategory::CityTransfer);
        assert_eq!(leg.milestones.len(), 1);
        assert_eq!(leg.fare, Some(80.0));
        assert_eq!(draft, BookingDraft::default());
    }
}
