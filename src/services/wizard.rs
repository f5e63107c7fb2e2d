//! Booking wizard state machine and submission.

use serde::Serialize;

use crate::domain::booking::BookingRecord;
use crate::domain::types::{ChauffeurId, PassengerId};
use crate::dto::review::ReviewSummary;
use crate::forms::FieldErrors;
use crate::forms::booking::BookingDraft;
use crate::forms::steps::{StepDescriptor, clamp_step_index, resolve_steps};
use crate::forms::validation::{validate_all, validate_step};
use crate::repository::BookingWriter;
use crate::services::promotion::{PromotionContext, PromotionDecision, promote_to_mission};
use crate::services::{ServiceError, ServiceResult};

/// Result of a successful submission.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionOutcome {
    pub record: BookingRecord,
    pub promotion: PromotionDecision,
}

/// Owns the draft, the current step index and the field errors.
///
/// The step list is never stored; it is resolved from `is_mission` on every
/// read and the index is clamped after each draft mutation.
#[derive(Debug, Clone, Default)]
pub struct BookingWizard {
    draft: BookingDraft,
    current_step: usize,
    errors: FieldErrors,
}

impl BookingWizard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens the wizard on an existing booking.
    pub fn from_draft(draft: BookingDraft) -> Self {
        Self {
            draft,
            ..Self::default()
        }
    }

    /// Opens the wizard on a camelCase JSON draft.
    pub fn from_json(raw: &str) -> ServiceResult<Self> {
        let draft: BookingDraft = raw.parse()?;
        Ok(Self::from_draft(draft))
    }

    pub fn draft(&self) -> &BookingDraft {
        &self.draft
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn steps(&self) -> Vec<StepDescriptor> {
        resolve_steps(self.draft.is_mission)
    }

    pub fn current_index(&self) -> usize {
        self.current_step
    }

    pub fn current_step(&self) -> StepDescriptor {
        let steps = self.steps();
        steps[clamp_step_index(self.current_step, steps.len())]
    }

    pub fn is_last_step(&self) -> bool {
        self.current_step + 1 >= self.steps().len()
    }

    /// Applies an arbitrary change to the draft.
    pub fn edit<F>(&mut self, change: F)
    where
        F: FnOnce(&mut BookingDraft),
    {
        change(&mut self.draft);
        self.clamp();
    }

    /// Switches between standalone ride and mission mode.
    ///
    /// Both halves of the draft are kept; enabling mission mode only makes
    /// sure a mission block exists.
    pub fn set_mission_mode(&mut self, is_mission: bool) {
        self.edit(|draft| {
            draft.is_mission = is_mission;
            if is_mission {
                draft.mission_mut();
            }
        });
    }

    /// Selects which passenger branch is live; neither branch is cleared.
    pub fn set_use_existing_passenger(&mut self, use_existing: bool) {
        self.edit(|draft| draft.use_existing_passenger = use_existing);
    }

    pub fn select_passenger(&mut self, id: &str) -> ServiceResult<()> {
        let id = PassengerId::new(id)?;
        self.edit(|draft| {
            draft.passenger_id = Some(id.into_inner());
            draft.use_existing_passenger = true;
        });
        Ok(())
    }

    /// Attaches a chauffeur to the mission block, or detaches it with `None`.
    ///
    /// Works in standalone mode too, which is what arms mission promotion.
    pub fn attach_chauffeur(&mut self, id: Option<&str>) -> ServiceResult<()> {
        let id = id.map(ChauffeurId::new).transpose()?;
        self.edit(|draft| draft.mission_mut().chauffeur_id = id.map(ChauffeurId::into_inner));
        Ok(())
    }

    fn clamp(&mut self) {
        self.current_step = clamp_step_index(self.current_step, self.steps().len());
    }

    /// Re-validates the current step and refreshes its errors.
    pub fn validate_current(&mut self) -> bool {
        let step = self.current_step();
        validate_step(&self.draft, step.id, &mut self.errors)
    }

    /// Advances one step when the current one is valid.
    ///
    /// Returns `false` when validation failed; the index is then unchanged.
    pub fn next(&mut self) -> bool {
        if !self.validate_current() {
            return false;
        }
        if !self.is_last_step() {
            self.current_step += 1;
        }
        true
    }

    /// Moves one step back without validating.
    pub fn back(&mut self) {
        self.current_step = self.current_step.saturating_sub(1);
    }

    /// Jumps to `index`.
    ///
    /// Going back is free. Going forward validates every step on the way and
    /// stops on the first invalid one.
    pub fn go_to(&mut self, index: usize) -> bool {
        let target = clamp_step_index(index, self.steps().len());
        while self.current_step < target {
            if !self.next() {
                return false;
            }
        }
        self.current_step = target;
        true
    }

    /// Discards the draft and returns to the first step.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn review(&self) -> ReviewSummary {
        ReviewSummary::from(&self.draft)
    }

    /// Validates, promotes and persists the draft.
    ///
    /// The wizard is only reset once the writer confirmed the save; on any
    /// failure the draft and step index are left as they were.
    pub async fn submit<W>(
        &mut self,
        writer: &W,
        ctx: &PromotionContext,
    ) -> ServiceResult<SubmissionOutcome>
    where
        W: BookingWriter + ?Sized,
    {
        if !validate_all(&self.draft, &mut self.errors) {
            log::warn!("Submission blocked by invalid fields: {}", self.errors);
            return Err(ServiceError::Validation(self.errors.clone()));
        }

        let record_id = self.draft.record_id().map(str::to_string);
        let mut booking = self.draft.clone();
        let promotion = promote_to_mission(&mut booking, ctx);

        let saved = match record_id.as_deref() {
            Some(id) => writer.update_booking(id, &booking).await,
            None => writer.create_booking(&booking).await,
        };

        let record = saved.map_err(|e| {
            if e.is_transport() {
                log::warn!("Booking service unreachable, draft kept: {e}");
            } else {
                log::error!("Failed to save booking: {e}");
            }
            ServiceError::from(e)
        })?;

        log::info!("Saved {} booking {}", record.kind, record.id);
        self.reset();
        Ok(SubmissionOutcome { record, promotion })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use chrono::NaiveDate;

    use super::*;
    use crate::domain::directory::MissionSummary;
    use crate::domain::types::{MissionId, RecordId};
    use crate::forms::FormError;
    use crate::forms::passenger::PassengerInfo;
    use crate::forms::steps::StepId;
    use crate::repository::errors::{RepositoryError, RepositoryResult};

    /// Records every call and answers with a fixed outcome.
    #[derive(Default)]
    struct RecordingWriter {
        calls: Mutex<Vec<(Option<String>, BookingDraft)>>,
        fail: bool,
    }

    impl RecordingWriter {
        fn failing() -> Self {
            Self {
                fail: true,
                ..Self::default()
            }
        }

        fn save(&self, id: Option<&str>, booking: &BookingDraft) -> RepositoryResult<BookingRecord> {
            self.calls
                .lock()
                .unwrap()
                .push((id.map(str::to_string), booking.clone()));
            if self.fail {
                return Err(RepositoryError::ConnectionError("offline".to_string()));
            }
            Ok(BookingRecord::new(RecordId::new(), booking.clone()))
        }

        fn calls(&self) -> Vec<(Option<String>, BookingDraft)> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl BookingWriter for RecordingWriter {
        async fn create_booking(&self, booking: &BookingDraft) -> RepositoryResult<BookingRecord> {
            self.save(None, booking)
        }

        async fn update_booking(
            &self,
            id: &str,
            booking: &BookingDraft,
        ) -> RepositoryResult<BookingRecord> {
            self.save(Some(id), booking)
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    }

    fn context() -> PromotionContext {
        PromotionContext {
            today: today(),
            ..PromotionContext::default()
        }
    }

    fn fill_ride(wizard: &mut BookingWizard) {
        wizard.edit(|draft| {
            draft.pickup_address = "123 Main St".to_string();
            draft.dropoff_address = "Airport".to_string();
            draft.pickup_time = today().and_hms_opt(14, 0, 0);
        });
    }

    fn ready_ride() -> BookingWizard {
        let mut wizard = BookingWizard::new();
        wizard.select_passenger("P1").unwrap();
        fill_ride(&mut wizard);
        wizard
    }

    #[test]
    fn next_is_blocked_by_an_invalid_step() {
        let mut wizard = BookingWizard::new();

        assert!(!wizard.next());
        assert_eq!(wizard.current_index(), 0);
        assert!(wizard.errors().contains("passenger_id"));

        wizard.select_passenger("P1").unwrap();
        assert!(wizard.next());
        assert_eq!(wizard.current_step().id, StepId::RideDetails);
        assert!(!wizard.errors().contains("passenger_id"));
    }

    #[test]
    fn json_drafts_open_the_wizard() {
        let wizard =
            BookingWizard::from_json(r#"{"passengerId":"P1","pickupAddress":"Gare de Lyon"}"#)
                .unwrap();
        assert_eq!(wizard.draft().passenger_id.as_deref(), Some("P1"));
        assert_eq!(wizard.current_index(), 0);

        let malformed = BookingWizard::from_json(r#"{"pickupAddress": 12"#);
        assert!(matches!(
            malformed,
            Err(ServiceError::Form(FormError::Payload(_)))
        ));
    }

    #[test]
    fn blank_passenger_selection_is_rejected() {
        let mut wizard = BookingWizard::new();
        let result = wizard.select_passenger("  ");
        assert!(matches!(result, Err(ServiceError::TypeConstraint(_))));
        assert_eq!(wizard.draft(), &BookingDraft::default());
    }

    #[test]
    fn toggling_passenger_branch_keeps_both_values() {
        let mut wizard = BookingWizard::new();
        wizard.select_passenger("P1").unwrap();
        wizard.edit(|draft| draft.passenger_info = Some(PassengerInfo::new("Ada", "")));

        wizard.set_use_existing_passenger(false);
        assert!(!wizard.validate_current());
        assert!(wizard.errors().contains("passenger_info.last_name"));

        wizard.set_use_existing_passenger(true);
        assert!(wizard.validate_current());
        assert_eq!(wizard.draft().passenger_id.as_deref(), Some("P1"));
        assert!(wizard.draft().passenger_info.is_some());
    }

    #[test]
    fn leaving_mission_mode_on_the_mission_step_keeps_index_in_range() {
        let mut wizard = ready_ride();
        wizard.set_mission_mode(true);
        assert!(wizard.go_to(2));
        assert_eq!(wizard.current_step().id, StepId::Mission);

        wizard.set_mission_mode(false);

        assert_eq!(wizard.current_index(), 2);
        assert_eq!(wizard.current_step().id, StepId::Milestones);
        assert!(wizard.current_index() < wizard.steps().len());
    }

    #[test]
    fn go_to_stops_on_the_first_invalid_step() {
        let mut wizard = BookingWizard::new();
        wizard.select_passenger("P1").unwrap();

        assert!(!wizard.go_to(3));
        assert_eq!(wizard.current_step().id, StepId::RideDetails);

        fill_ride(&mut wizard);
        assert!(wizard.go_to(3));
        assert!(wizard.is_last_step());

        assert!(wizard.go_to(0));
        assert_eq!(wizard.current_index(), 0);
    }

    #[test]
    fn back_never_goes_below_the_first_step() {
        let mut wizard = BookingWizard::new();
        wizard.back();
        assert_eq!(wizard.current_index(), 0);
    }

    #[test]
    fn review_step_stays_put_on_next() {
        let mut wizard = ready_ride();
        assert!(wizard.go_to(3));
        assert!(wizard.next());
        assert_eq!(wizard.current_index(), 3);
    }

    #[tokio::test]
    async fn submission_creates_and_resets() {
        let writer = RecordingWriter::default();
        let mut wizard = ready_ride();
        wizard.go_to(2);

        let outcome = wizard.submit(&writer, &context()).await.unwrap();

        assert_eq!(outcome.promotion, PromotionDecision::NoChauffeur);
        assert_eq!(outcome.record.booking.pickup_address, "123 Main St");
        assert_eq!(writer.calls().len(), 1);
        assert_eq!(writer.calls()[0].0, None);
        assert_eq!(wizard.draft(), &BookingDraft::default());
        assert_eq!(wizard.current_index(), 0);
        assert!(wizard.errors().is_empty());
    }

    #[tokio::test]
    async fn submission_with_an_id_updates() {
        let writer = RecordingWriter::default();
        let mut wizard = ready_ride();
        wizard.edit(|draft| draft.id = Some("ride-7".to_string()));

        wizard.submit(&writer, &context()).await.unwrap();

        assert_eq!(writer.calls()[0].0.as_deref(), Some("ride-7"));
    }

    #[tokio::test]
    async fn invalid_draft_is_not_sent() {
        let writer = RecordingWriter::default();
        let mut wizard = BookingWizard::new();
        wizard.select_passenger("P1").unwrap();
        wizard.next();

        let result = wizard.submit(&writer, &context()).await;

        match result {
            Err(ServiceError::Validation(errors)) => assert!(errors.contains("pickup_address")),
            other => panic!("expected validation error, got {other:?}"),
        }
        assert!(writer.calls().is_empty());
        assert_eq!(wizard.current_index(), 1);
        assert!(wizard.errors().contains("pickup_time"));
    }

    #[tokio::test]
    async fn failed_save_keeps_the_draft() {
        let writer = RecordingWriter::failing();
        let mut wizard = ready_ride();
        wizard.attach_chauffeur(Some("C1")).unwrap();
        wizard.go_to(2);
        let before = wizard.draft().clone();

        let result = wizard.submit(&writer, &context()).await;

        assert!(matches!(result, Err(ServiceError::Repository(_))));
        assert_eq!(wizard.draft(), &before);
        assert!(!wizard.draft().is_mission);
        assert_eq!(wizard.current_index(), 2);
    }

    #[tokio::test]
    async fn unassigned_chauffeur_is_submitted_as_a_mission() {
        let writer = RecordingWriter::default();
        let mut wizard = ready_ride();
        wizard.attach_chauffeur(Some("C1")).unwrap();

        let outcome = wizard.submit(&writer, &context()).await.unwrap();

        assert!(outcome.promotion.is_promoted());
        let (_, sent) = &writer.calls()[0];
        assert!(sent.is_mission);
        assert_eq!(sent.mission.as_ref().unwrap().rides.len(), 1);
        assert_eq!(sent.pickup_address, "");
    }

    #[tokio::test]
    async fn busy_chauffeur_is_submitted_as_a_ride() {
        let writer = RecordingWriter::default();
        let mut wizard = ready_ride();
        wizard.attach_chauffeur(Some("C1")).unwrap();
        let ctx = PromotionContext {
            existing_missions: vec![MissionSummary {
                id: MissionId::new("M1").unwrap(),
                title: "Roadshow".to_string(),
                chauffeur_id: Some(ChauffeurId::new("C1").unwrap()),
            }],
            ..context()
        };

        let outcome = wizard.submit(&writer, &ctx).await.unwrap();

        assert!(!outcome.promotion.is_promoted());
        let (_, sent) = &writer.calls()[0];
        assert!(!sent.is_mission);
        assert_eq!(sent.pickup_address, "123 Main St");
    }
}

#[cfg(all(test, feature = "test-mocks"))]
mod mock_tests {
    use super::*;
    use crate::domain::types::RecordId;
    use crate::repository::errors::RepositoryError;
    use crate::repository::mock::MockRepository;

    fn ready_mission() -> BookingWizard {
        let mut wizard = BookingWizard::new();
        wizard.select_passenger("P1").unwrap();
        wizard.set_mission_mode(true);
        wizard.edit(|draft| {
            let mission = draft.mission_mut();
            mission.id = Some("mission-3".to_string());
            mission.title = "Fashion week".to_string();
            mission.client_id = "CL1".to_string();
            mission.start_date = chrono::NaiveDate::from_ymd_opt(2026, 10, 19);
            mission.end_date = chrono::NaiveDate::from_ymd_opt(2026, 10, 21);
            mission.rides = vec![crate::forms::ride::RideLeg {
                pickup_address: "Hotel".to_string(),
                dropoff_address: "Venue".to_string(),
                pickup_time: chrono::NaiveDate::from_ymd_opt(2026, 10, 19)
                    .and_then(|d| d.and_hms_opt(9, 0, 0)),
                ..Default::default()
            }];
        });
        wizard
    }

    #[tokio::test]
    async fn mission_with_an_id_is_updated() {
        let mut repo = MockRepository::new();
        repo.expect_create_booking().times(0);
        repo.expect_update_booking()
            .withf(|id, booking| id == "mission-3" && booking.is_mission)
            .times(1)
            .returning(|_, booking| Ok(BookingRecord::new(RecordId::new(), booking.clone())));

        let mut wizard = ready_mission();
        let outcome = wizard
            .submit(&repo, &PromotionContext::default())
            .await
            .unwrap();

        assert_eq!(outcome.promotion, PromotionDecision::AlreadyMission);
        assert_eq!(wizard.draft(), &BookingDraft::default());
    }

    #[tokio::test]
    async fn rejected_mission_keeps_the_wizard() {
        let mut repo = MockRepository::new();
        repo.expect_update_booking()
            .times(1)
            .returning(|_, _| Err(RepositoryError::ValidationError(vec!["title taken".into()])));

        let mut wizard = ready_mission();
        let before = wizard.draft().clone();
        let result = wizard.submit(&repo, &PromotionContext::default()).await;

        assert!(matches!(
            result,
            Err(ServiceError::Repository(RepositoryError::ValidationError(_)))
        ));
        assert_eq!(wizard.draft(), &before);
    }
}
