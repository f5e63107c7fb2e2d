//! In-memory collaborator used by the dry-run binary and integration tests.

use std::collections::HashMap;
use std::str::FromStr;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::booking::BookingRecord;
use crate::domain::directory::{ChauffeurSummary, ClientSummary, MissionSummary, PassengerSummary};
use crate::domain::types::{PlateNumber, RecordId};
use crate::domain::vehicle::VehicleDetails;
use crate::forms::booking::BookingDraft;
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{BookingWriter, DirectoryReader, RegistrationLookup};

/// Directory content as exported by the back office.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DirectorySnapshot {
    pub missions: Vec<MissionSummary>,
    pub passengers: Vec<PassengerSummary>,
    pub chauffeurs: Vec<ChauffeurSummary>,
    pub clients: Vec<ClientSummary>,
    /// Registration data keyed by normalized plate (`AB-123-CD`).
    pub vehicles: HashMap<String, VehicleDetails>,
}

#[derive(Default)]
pub struct InMemoryRepository {
    directory: DirectorySnapshot,
    bookings: Mutex<Vec<BookingRecord>>,
}

impl InMemoryRepository {
    pub fn new(directory: DirectorySnapshot) -> Self {
        Self {
            directory,
            bookings: Mutex::new(Vec::new()),
        }
    }

    /// Snapshot of every record saved so far.
    pub fn bookings(&self) -> RepositoryResult<Vec<BookingRecord>> {
        Ok(self.lock()?.clone())
    }

    fn lock(&self) -> RepositoryResult<MutexGuard<'_, Vec<BookingRecord>>> {
        self.bookings
            .lock()
            .map_err(|e| RepositoryError::Unexpected(format!("booking store poisoned: {e}")))
    }
}

impl DirectoryReader for InMemoryRepository {
    fn list_missions(&self) -> RepositoryResult<Vec<MissionSummary>> {
        Ok(self.directory.missions.clone())
    }

    fn list_passengers(&self) -> RepositoryResult<Vec<PassengerSummary>> {
        Ok(self.directory.passengers.clone())
    }

    fn list_chauffeurs(&self) -> RepositoryResult<Vec<ChauffeurSummary>> {
        Ok(self.directory.chauffeurs.clone())
    }

    fn list_clients(&self) -> RepositoryResult<Vec<ClientSummary>> {
        Ok(self.directory.clients.clone())
    }
}

#[async_trait]
impl BookingWriter for InMemoryRepository {
    async fn create_booking(&self, booking: &BookingDraft) -> RepositoryResult<BookingRecord> {
        let record = BookingRecord::new(RecordId::new(), booking.clone());
        self.lock()?.push(record.clone());
        Ok(record)
    }

    async fn update_booking(
        &self,
        id: &str,
        booking: &BookingDraft,
    ) -> RepositoryResult<BookingRecord> {
        let id = RecordId::from_str(id)?;
        let mut bookings = self.lock()?;
        let slot = bookings
            .iter_mut()
            .find(|record| record.id == id)
            .ok_or(RepositoryError::NotFound)?;
        *slot = BookingRecord::new(id, booking.clone());
        Ok(slot.clone())
    }
}

#[async_trait]
impl RegistrationLookup for InMemoryRepository {
    async fn lookup_plate(&self, plate: &PlateNumber) -> RepositoryResult<Option<VehicleDetails>> {
        Ok(self.directory.vehicles.get(plate.as_str()).cloned())
    }
}
