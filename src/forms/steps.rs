//! Wizard step topology derived from the draft's mode flag.

use std::fmt::Display;

use serde::Serialize;

/// Identifier of a wizard step.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum StepId {
    Passenger,
    RideDetails,
    Milestones,
    Mission,
    Review,
}

impl StepId {
    pub fn as_str(self) -> &'static str {
        match self {
            StepId::Passenger => "passenger",
            StepId::RideDetails => "ride-details",
            StepId::Milestones => "milestones",
            StepId::Mission => "mission",
            StepId::Review => "review",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            StepId::Passenger => "Passenger",
            StepId::RideDetails => "Ride details",
            StepId::Milestones => "Milestones",
            StepId::Mission => "Mission",
            StepId::Review => "Review",
        }
    }

    /// Field paths that must be valid before leaving the step.
    pub fn required_fields(self) -> &'static [&'static str] {
        match self {
            StepId::Passenger => &[
                "passenger_id",
                "passenger_info.first_name",
                "passenger_info.last_name",
                "passenger_info.phone_number",
                "passenger_info.passenger_count",
            ],
            StepId::RideDetails => &["pickup_address", "dropoff_address", "pickup_time", "fare"],
            StepId::Milestones => &["milestones"],
            StepId::Mission => &[
                "mission",
                "mission.title",
                "mission.client_id",
                "mission.start_date",
                "mission.end_date",
                "mission.duration_hours",
                "mission.total_budget",
                "mission.partner_fee",
                "mission.rides",
            ],
            StepId::Review => &[],
        }
    }
}

impl Display for StepId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One entry of the wizard's step list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StepDescriptor {
    pub id: StepId,
    pub label: &'static str,
    pub required_fields: &'static [&'static str],
}

impl From<StepId> for StepDescriptor {
    fn from(id: StepId) -> Self {
        Self {
            id,
            label: id.label(),
            required_fields: id.required_fields(),
        }
    }
}

/// Ordered steps for the given mode.
///
/// `passenger` and `ride-details` always come first, followed by either
/// `milestones` (standalone ride) or `mission`, and `review` closes the list.
pub fn resolve_steps(is_mission: bool) -> Vec<StepDescriptor> {
    let mode_step = if is_mission {
        StepId::Mission
    } else {
        StepId::Milestones
    };
    [StepId::Passenger, StepId::RideDetails, mode_step, StepId::Review]
        .into_iter()
        .map(StepDescriptor::from)
        .collect()
}

/// Clamps a step index into `0..len`.
pub fn clamp_step_index(index: usize, len: usize) -> usize {
    index.min(len.saturating_sub(1))
}
