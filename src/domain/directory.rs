//! Read-only reference records supplied by the directory collaborator.

use serde::{Deserialize, Serialize};

use crate::domain::types::{ChauffeurId, ClientId, MissionId, PassengerId};

/// Existing mission as seen by the promotion rule.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MissionSummary {
    pub id: MissionId,
    pub title: String,
    #[serde(default)]
    pub chauffeur_id: Option<ChauffeurId>,
}

/// Named person record (passenger or chauffeur).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PersonSummary<Id> {
    pub id: Id,
    pub first_name: String,
    pub last_name: String,
}

pub type PassengerSummary = PersonSummary<PassengerId>;
pub type ChauffeurSummary = PersonSummary<ChauffeurId>;

impl<Id> PersonSummary<Id> {
    /// Returns "First Last", or `None` when both parts are blank.
    pub fn display_name(&self) -> Option<String> {
        full_name(&self.first_name, &self.last_name)
    }
}

/// Billed client.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClientSummary {
    pub id: ClientId,
    pub name: String,
}

/// Joins trimmed name parts, skipping blank ones.
pub fn full_name(first: &str, last: &str) -> Option<String> {
    let name = [first.trim(), last.trim()]
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    if name.is_empty() { None } else { Some(name) }
}
