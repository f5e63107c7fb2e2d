use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::ride::RideStatus;
use crate::forms::ride::RideLeg;
use crate::forms::validate_not_blank;

/// Duration assigned to a mission day unless the user picks another one.
pub const DEFAULT_MISSION_DURATION_HOURS: f64 = 12.0;

fn default_duration_hours() -> f64 {
    DEFAULT_MISSION_DURATION_HOURS
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
/// Multi-ride assignment for a chauffeur or an external partner.
///
/// Both `chauffeur_id` and `partner_id` are retained while the user toggles
/// `is_external_partner`; only the selected one is meaningful.
pub struct MissionDraft {
    /// Identifier of the mission being edited, if any.
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    #[validate(custom(function = "validate_not_blank"))]
    pub title: String,
    /// Billed client.
    #[serde(default)]
    #[validate(custom(function = "validate_not_blank"))]
    pub client_id: String,
    /// In-house chauffeur, meaningful while `is_external_partner` is unset.
    #[serde(default)]
    pub chauffeur_id: Option<String>,
    /// Subcontracting partner, meaningful while `is_external_partner` is set.
    #[serde(default)]
    pub partner_id: Option<String>,
    #[serde(default)]
    pub is_external_partner: bool,
    #[serde(default)]
    pub project_id: Option<String>,
    /// Directory passengers travelling on the mission.
    #[serde(default)]
    pub passenger_ids: Vec<String>,
    #[serde(default)]
    #[validate(required(message = "is required"))]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    #[validate(required(message = "is required"))]
    pub end_date: Option<NaiveDate>,
    /// Hours booked per mission day.
    #[serde(default = "default_duration_hours")]
    #[validate(range(exclusive_min = 0.0, message = "must be positive"))]
    pub duration_hours: f64,
    #[serde(default)]
    pub status: RideStatus,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    #[validate(range(min = 0.0, message = "cannot be negative"))]
    pub total_budget: Option<f64>,
    /// Amount owed to the partner when the mission is subcontracted.
    #[serde(default)]
    #[validate(range(min = 0.0, message = "cannot be negative"))]
    pub partner_fee: Option<f64>,
    #[serde(default)]
    #[validate(nested)]
    pub rides: Vec<RideLeg>,
}

impl Default for MissionDraft {
    fn default() -> Self {
        Self {
            id: None,
            title: String::new(),
            client_id: String::new(),
            chauffeur_id: None,
            partner_id: None,
            is_external_partner: false,
            project_id: None,
            passenger_ids: Vec::new(),
            start_date: None,
            end_date: None,
            duration_hours: default_duration_hours(),
            status: RideStatus::default(),
            notes: None,
            total_budget: None,
            partner_fee: None,
            rides: Vec::new(),
        }
    }
}

impl MissionDraft {
    /// Chauffeur selected for the mission, ignoring blank input.
    pub fn attached_chauffeur(&self) -> Option<&str> {
        non_blank(self.chauffeur_id.as_deref())
    }

    /// Identifier of whoever performs the mission, following `is_external_partner`.
    pub fn assignee(&self) -> Option<&str> {
        if self.is_external_partner {
            non_blank(self.partner_id.as_deref())
        } else {
            self.attached_chauffeur()
        }
    }
}

pub(crate) fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_a_fresh_mission() {
        let mission: MissionDraft = serde_json::from_str("{}").unwrap();
        assert_eq!(mission, MissionDraft::default());
        assert_eq!(mission.duration_hours, 12.0);
        assert!(!mission.is_external_partner);
    }

    #[test]
    fn assignee_follows_external_partner_flag() {
        let mut mission = MissionDraft {
            chauffeur_id: Some("C1".to_string()),
            partner_id: Some("P9".to_string()),
            ..MissionDraft::default()
        };
        assert_eq!(mission.assignee(), Some("C1"));

        mission.is_external_partner = true;
        assert_eq!(mission.assignee(), Some("P9"));
        assert_eq!(mission.attached_chauffeur(), Some("C1"));
    }

    #[test]
    fn blank_chauffeur_is_not_attached() {
        let mission = MissionDraft {
            chauffeur_id: Some("  ".to_string()),
            ..MissionDraft::default()
        };
        assert_eq!(mission.attached_chauffeur(), None);
    }
}
