use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::ride::{MilestoneKind, RideCategory, RideStatus};
use crate::forms::validate_not_blank;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default, rename_all = "camelCase")]
/// Intermediate stop attached to a standalone ride.
pub struct Milestone {
    #[validate(custom(function = "validate_not_blank"))]
    pub address: String,
    pub time: Option<NaiveDateTime>,
    pub kind: MilestoneKind,
    pub notes: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default, rename_all = "camelCase")]
/// Single point-to-point ride, standalone or as part of a mission.
pub struct RideLeg {
    pub id: Option<String>,
    #[validate(custom(function = "validate_not_blank"))]
    pub pickup_address: String,
    #[validate(custom(function = "validate_not_blank"))]
    pub dropoff_address: String,
    #[validate(required(message = "is required"))]
    pub pickup_time: Option<NaiveDateTime>,
    pub category: RideCategory,
    pub status: RideStatus,
    pub notes: Option<String>,
    #[validate(range(min = 0.0, message = "cannot be negative"))]
    pub fare: Option<f64>,
    #[validate(nested)]
    pub milestones: Vec<Milestone>,
}
