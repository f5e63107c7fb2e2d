//! Mock repository implementations for isolating services in tests.

use async_trait::async_trait;
use mockall::mock;

use crate::domain::booking::BookingRecord;
use crate::domain::directory::{ChauffeurSummary, ClientSummary, MissionSummary, PassengerSummary};
use crate::domain::types::PlateNumber;
use crate::domain::vehicle::VehicleDetails;
use crate::forms::booking::BookingDraft;
use crate::repository::errors::RepositoryResult;
use crate::repository::{BookingWriter, DirectoryReader, RegistrationLookup};

mock! {
    pub Repository {}

    impl DirectoryReader for Repository {
        fn list_missions(&self) -> RepositoryResult<Vec<MissionSummary>>;
        fn list_passengers(&self) -> RepositoryResult<Vec<PassengerSummary>>;
        fn list_chauffeurs(&self) -> RepositoryResult<Vec<ChauffeurSummary>>;
        fn list_clients(&self) -> RepositoryResult<Vec<ClientSummary>>;
    }

    #[async_trait]
    impl BookingWriter for Repository {
        async fn create_booking(&self, booking: &BookingDraft) -> RepositoryResult<BookingRecord>;
        async fn update_booking(
            &self,
            id: &str,
            booking: &BookingDraft,
        ) -> RepositoryResult<BookingRecord>;
    }

    #[async_trait]
    impl RegistrationLookup for Repository {
        async fn lookup_plate(
            &self,
            plate: &PlateNumber,
        ) -> RepositoryResult<Option<VehicleDetails>>;
    }
}
