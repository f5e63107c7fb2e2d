//! Shared fixtures for integration tests.
#![allow(dead_code)]

use std::collections::HashMap;

use booking_wizard::domain::directory::{
    ChauffeurSummary, ClientSummary, MissionSummary, PassengerSummary,
};
use booking_wizard::domain::types::{ChauffeurId, ClientId, MissionId, PassengerId};
use booking_wizard::domain::vehicle::VehicleDetails;
use booking_wizard::repository::{DirectorySnapshot, InMemoryRepository};
use booking_wizard::services::promotion::PromotionContext;
use booking_wizard::services::wizard::BookingWizard;
use chrono::{NaiveDate, NaiveDateTime};

pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
}

pub fn at(hour: u32) -> NaiveDateTime {
    today().and_hms_opt(hour, 0, 0).unwrap()
}

fn person<Id>(id: Id, first: &str, last: &str) -> booking_wizard::domain::directory::PersonSummary<Id> {
    booking_wizard::domain::directory::PersonSummary {
        id,
        first_name: first.into(),
        last_name: last.into(),
    }
}

/// Directory with chauffeur `C1` free and chauffeur `C2` already on mission `M1`.
pub fn directory() -> DirectorySnapshot {
    let passengers: Vec<PassengerSummary> = vec![
        person(PassengerId::new("P1").unwrap(), "Grace", "Hopper"),
        person(PassengerId::new("P2").unwrap(), "Alan", "Turing"),
    ];
    let chauffeurs: Vec<ChauffeurSummary> = vec![
        person(ChauffeurId::new("C1").unwrap(), "Jean", "Valjean"),
        person(ChauffeurId::new("C2").unwrap(), "Marius", "Pontmercy"),
    ];
    let mut vehicles = HashMap::new();
    vehicles.insert(
        "AB-456-EF".to_string(),
        VehicleDetails {
            make: "Peugeot".into(),
            model: "508".into(),
            year: Some(2024),
            ..VehicleDetails::default()
        },
    );

    DirectorySnapshot {
        missions: vec![MissionSummary {
            id: MissionId::new("M1").unwrap(),
            title: "Roadshow".into(),
            chauffeur_id: Some(ChauffeurId::new("C2").unwrap()),
        }],
        passengers,
        chauffeurs,
        clients: vec![ClientSummary {
            id: ClientId::new("CL1").unwrap(),
            name: "Maison Dupont".into(),
        }],
        vehicles,
    }
}

pub fn repository() -> InMemoryRepository {
    InMemoryRepository::new(directory())
}

pub fn context(repo: &InMemoryRepository) -> PromotionContext {
    PromotionContext::load(repo, today()).unwrap()
}

/// Wizard holding a complete standalone ride for passenger `P1`.
pub fn ride_wizard() -> BookingWizard {
    let mut wizard = BookingWizard::new();
    wizard.select_passenger("P1").unwrap();
    wizard.edit(|draft| {
        draft.pickup_address = "123 Main St".into();
        draft.dropoff_address = "Airport".into();
        draft.pickup_time = Some(at(14));
    });
    wizard
}
