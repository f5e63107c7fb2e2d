use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// Kind of service a ride provides.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RideCategory {
    #[default]
    CityTransfer,
    AirportTransfer,
    TrainStationTransfer,
    ChauffeurService,
}

impl RideCategory {
    /// Categories a ride may carry once it is part of a mission.
    pub const MISSION_ELIGIBLE: [RideCategory; 3] = [
        RideCategory::CityTransfer,
        RideCategory::AirportTransfer,
        RideCategory::TrainStationTransfer,
    ];

    pub fn is_mission_eligible(self) -> bool {
        Self::MISSION_ELIGIBLE.contains(&self)
    }

    /// Returns the category to use inside a mission, falling back to a city transfer.
    pub fn for_mission(self) -> Self {
        if self.is_mission_eligible() {
            self
        } else {
            RideCategory::CityTransfer
        }
    }
}

impl Display for RideCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RideCategory::CityTransfer => write!(f, "City transfer"),
            RideCategory::AirportTransfer => write!(f, "Airport transfer"),
            RideCategory::TrainStationTransfer => write!(f, "Train station transfer"),
            RideCategory::ChauffeurService => write!(f, "Chauffeur service"),
        }
    }
}

/// Lifecycle status shared by rides and missions.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RideStatus {
    #[default]
    Scheduled,
    Assigned,
    InProgress,
    Completed,
    Cancelled,
}

impl Display for RideStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RideStatus::Scheduled => write!(f, "Scheduled"),
            RideStatus::Assigned => write!(f, "Assigned"),
            RideStatus::InProgress => write!(f, "In progress"),
            RideStatus::Completed => write!(f, "Completed"),
            RideStatus::Cancelled => write!(f, "Cancelled"),
        }
    }
}

/// Whether a milestone picks passengers up or drops them off.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MilestoneKind {
    #[default]
    Pickup,
    Dropoff,
}

impl Display for MilestoneKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MilestoneKind::Pickup => write!(f, "Pickup"),
            MilestoneKind::Dropoff => write!(f, "Dropoff"),
        }
    }
}
