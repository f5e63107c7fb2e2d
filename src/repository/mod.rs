//! Collaborator boundaries of the wizard: persistence, directory, registration lookup.

use async_trait::async_trait;

use crate::domain::booking::BookingRecord;
use crate::domain::directory::{ChauffeurSummary, ClientSummary, MissionSummary, PassengerSummary};
use crate::domain::types::PlateNumber;
use crate::domain::vehicle::VehicleDetails;
use crate::forms::booking::BookingDraft;
use crate::repository::errors::RepositoryResult;

pub mod errors;
pub mod memory;
#[cfg(feature = "test-mocks")]
pub mod mock;

pub use memory::{DirectorySnapshot, InMemoryRepository};

/// Read-only directory consulted when the wizard opens.
pub trait DirectoryReader {
    fn list_missions(&self) -> RepositoryResult<Vec<MissionSummary>>;
    fn list_passengers(&self) -> RepositoryResult<Vec<PassengerSummary>>;
    fn list_chauffeurs(&self) -> RepositoryResult<Vec<ChauffeurSummary>>;
    fn list_clients(&self) -> RepositoryResult<Vec<ClientSummary>>;
}

/// Persistence of finalized drafts.
#[async_trait]
pub trait BookingWriter {
    async fn create_booking(&self, booking: &BookingDraft) -> RepositoryResult<BookingRecord>;
    async fn update_booking(
        &self,
        id: &str,
        booking: &BookingDraft,
    ) -> RepositoryResult<BookingRecord>;
}

/// External registration provider; `Ok(None)` means the plate is unknown.
#[async_trait]
pub trait RegistrationLookup {
    async fn lookup_plate(&self, plate: &PlateNumber) -> RepositoryResult<Option<VehicleDetails>>;
}
