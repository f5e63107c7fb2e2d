//! Promotion of a standalone ride into a mission at submission time.
//!
//! A chauffeur picked on the ride-details step lives in the mission block
//! even while mission mode is off. When that chauffeur has no mission yet,
//! the ride is restructured into a single-ride mission for them.

use chrono::{Days, NaiveDate};
use serde::Serialize;

use crate::domain::directory::{ChauffeurSummary, ClientSummary, MissionSummary, PassengerSummary};
use crate::forms::booking::BookingDraft;
use crate::forms::mission::DEFAULT_MISSION_DURATION_HOURS;
use crate::repository::DirectoryReader;
use crate::services::ServiceResult;

const FALLBACK_PASSENGER: &str = "Selected Passenger";
const FALLBACK_CHAUFFEUR: &str = "Selected Chauffeur";
const FALLBACK_CLIENT: &str = "Client";

/// Read-only snapshot the promotion rule decides against.
///
/// Loaded once when the wizard opens; it is not refreshed mid-wizard.
#[derive(Clone, Debug, Default)]
pub struct PromotionContext {
    pub existing_missions: Vec<MissionSummary>,
    pub passengers: Vec<PassengerSummary>,
    pub chauffeurs: Vec<ChauffeurSummary>,
    pub clients: Vec<ClientSummary>,
    pub today: NaiveDate,
}

impl PromotionContext {
    /// Snapshots the directory collaborator.
    pub fn load<R>(repo: &R, today: NaiveDate) -> ServiceResult<Self>
    where
        R: DirectoryReader + ?Sized,
    {
        Ok(Self {
            existing_missions: repo.list_missions()?,
            passengers: repo.list_passengers()?,
            chauffeurs: repo.list_chauffeurs()?,
            clients: repo.list_clients()?,
            today,
        })
    }

    /// Flat membership test: any existing mission assigned to the chauffeur.
    pub fn chauffeur_has_mission(&self, chauffeur_id: &str) -> bool {
        self.existing_missions
            .iter()
            .any(|mission| mission.chauffeur_id.as_deref() == Some(chauffeur_id))
    }

    fn passenger_name(&self, id: &str) -> Option<String> {
        self.passengers
            .iter()
            .find(|p| p.id.as_str() == id)
            .and_then(|p| p.display_name())
    }

    fn chauffeur_name(&self, id: &str) -> Option<String> {
        self.chauffeurs
            .iter()
            .find(|c| c.id.as_str() == id)
            .and_then(|c| c.display_name())
    }
}

/// What the promotion rule did with a draft.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "decision", rename_all = "camelCase")]
pub enum PromotionDecision {
    AlreadyMission,
    NoChauffeur,
    ChauffeurBusy { chauffeur_id: String },
    Promoted { title: String },
}

impl PromotionDecision {
    pub fn is_promoted(&self) -> bool {
        matches!(self, PromotionDecision::Promoted { .. })
    }
}

fn mission_title(draft: &BookingDraft, chauffeur_id: &str, ctx: &PromotionContext) -> String {
    let passenger = match draft.referenced_passenger() {
        Some(id) => ctx
            .passenger_name(id)
            .unwrap_or_else(|| FALLBACK_PASSENGER.to_string()),
        None if !draft.use_existing_passenger => draft
            .passenger_info
            .as_ref()
            .and_then(|info| info.display_name())
            .unwrap_or_else(|| FALLBACK_CLIENT.to_string()),
        None => FALLBACK_CLIENT.to_string(),
    };
    let chauffeur = ctx
        .chauffeur_name(chauffeur_id)
        .unwrap_or_else(|| FALLBACK_CHAUFFEUR.to_string());

    format!("{passenger} with {chauffeur}")
}

/// Rewrites a standalone ride into a mission when an unassigned chauffeur is attached.
///
/// Drafts already in mission mode are left alone, which makes the rule
/// idempotent for a given snapshot.
pub fn promote_to_mission(draft: &mut BookingDraft, ctx: &PromotionContext) -> PromotionDecision {
    if draft.is_mission {
        return PromotionDecision::AlreadyMission;
    }

    let Some(chauffeur_id) = draft.attached_chauffeur().map(str::to_string) else {
        return PromotionDecision::NoChauffeur;
    };

    if ctx.chauffeur_has_mission(&chauffeur_id) {
        log::info!("Chauffeur {chauffeur_id} already has a mission, keeping a standalone ride");
        return PromotionDecision::ChauffeurBusy { chauffeur_id };
    }

    let title = mission_title(draft, &chauffeur_id, ctx);
    let passenger_id = draft.referenced_passenger().map(str::to_string);
    let client_id = passenger_id
        .clone()
        .or_else(|| ctx.clients.first().map(|client| client.id.to_string()))
        .unwrap_or_default();
    let ride = draft.take_standalone_ride();

    let mission = draft.mission_mut();
    mission.title = title.clone();
    mission.client_id = client_id;
    mission.passenger_ids = passenger_id.into_iter().collect();
    mission.start_date = Some(ctx.today);
    mission.end_date = ctx.today.checked_add_days(Days::new(1));
    mission.duration_hours = DEFAULT_MISSION_DURATION_HOURS;
    mission.is_external_partner = false;
    mission.rides = vec![ride];
    draft.is_mission = true;

    log::info!("Promoted ride to mission \"{title}\" for chauffeur {chauffeur_id}");
    PromotionDecision::Promoted { title }
}
