//! Read-only summary of a draft shown on the `review` step.

use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

use crate::domain::booking::BookingKind;
use crate::domain::ride::RideCategory;
use crate::forms::booking::BookingDraft;
use crate::forms::ride::RideLeg;

/// One ride as displayed in the summary.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RideLine {
    pub pickup_address: String,
    pub dropoff_address: String,
    pub pickup_time: Option<NaiveDateTime>,
    pub category: RideCategory,
    pub fare: Option<f64>,
    pub stops: Vec<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReviewSummary {
    pub kind: BookingKind,
    /// Passenger id, or the inline passenger's name.
    pub passenger: Option<String>,
    pub passenger_count: Option<u32>,
    pub title: Option<String>,
    pub assignee: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub rides: Vec<RideLine>,
    pub notes: Option<String>,
}

fn clean_notes(notes: Option<&str>) -> Option<String> {
    notes
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .map(ammonia::clean)
}

fn present(value: &str) -> String {
    value.trim().to_string()
}

impl From<&RideLeg> for RideLine {
    fn from(leg: &RideLeg) -> Self {
        Self {
            pickup_address: present(&leg.pickup_address),
            dropoff_address: present(&leg.dropoff_address),
            pickup_time: leg.pickup_time,
            category: leg.category,
            fare: leg.fare,
            stops: leg.milestones.iter().map(|m| present(&m.address)).collect(),
            notes: clean_notes(leg.notes.as_deref()),
        }
    }
}

impl From<&BookingDraft> for ReviewSummary {
    fn from(draft: &BookingDraft) -> Self {
        let (passenger, passenger_count) = if draft.use_existing_passenger {
            (draft.referenced_passenger().map(str::to_string), None)
        } else {
            let info = draft.passenger_info.as_ref();
            (
                info.and_then(|i| i.display_name()),
                info.map(|i| i.passenger_count),
            )
        };

        match draft.mission.as_ref().filter(|_| draft.is_mission) {
            Some(mission) => Self {
                kind: BookingKind::Mission,
                passenger,
                passenger_count,
                title: Some(present(&mission.title)).filter(|t| !t.is_empty()),
                assignee: mission.assignee().map(str::to_string),
                start_date: mission.start_date,
                end_date: mission.end_date,
                rides: mission.rides.iter().map(RideLine::from).collect(),
                notes: clean_notes(mission.notes.as_deref()),
            },
            None => Self {
                kind: if draft.is_mission {
                    BookingKind::Mission
                } else {
                    BookingKind::Ride
                },
                passenger,
                passenger_count,
                title: None,
                assignee: draft.attached_chauffeur().map(str::to_string),
                start_date: None,
                end_date: None,
                rides: if draft.is_mission {
                    Vec::new()
                } else {
                    vec![RideLine {
                        pickup_address: present(&draft.pickup_address),
                        dropoff_address: present(&draft.dropoff_address),
                        pickup_time: draft.pickup_time,
                        category: draft.category,
                        fare: draft.fare,
                        stops: draft.milestones.iter().map(|m| present(&m.address)).collect(),
                        notes: clean_notes(draft.notes.as_deref()),
                    }]
                },
                notes: None,
            },
        }
    }
}
