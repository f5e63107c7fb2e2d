use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::domain::types::RecordId;
use crate::forms::booking::BookingDraft;

/// Which half of a draft was authoritative when it was persisted.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingKind {
    Ride,
    Mission,
}

impl Display for BookingKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BookingKind::Ride => write!(f, "ride"),
            BookingKind::Mission => write!(f, "mission"),
        }
    }
}

/// Record returned by the persistence collaborator after a create or update.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BookingRecord {
    pub id: RecordId,
    pub kind: BookingKind,
    pub booking: BookingDraft,
}

impl BookingRecord {
    pub fn new(id: RecordId, booking: BookingDraft) -> Self {
        let kind = if booking.is_mission {
            BookingKind::Mission
        } else {
            BookingKind::Ride
        };
        Self { id, kind, booking }
    }
}
