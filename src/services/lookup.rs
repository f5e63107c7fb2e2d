//! Debounced registration lookup.
//!
//! Every call takes a ticket from a generation counter. Only the holder of
//! the latest ticket may produce a usable answer; older calls resolve to
//! [`LookupOutcome::Superseded`] either before reaching the provider or once
//! its answer comes back.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use serde::Serialize;

use crate::domain::types::PlateNumber;
use crate::domain::vehicle::{VehicleDetails, VehicleDraft};
use crate::models::config::WizardConfig;
use crate::repository::RegistrationLookup;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", content = "data", rename_all = "camelCase")]
pub enum LookupOutcome {
    Found(VehicleDetails),
    NotFound,
    /// Provider error; informational only.
    Failed(String),
    /// Input is not a local plate, the provider was not called.
    Skipped,
    /// A newer lookup was issued before this one completed.
    Superseded,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LookupResult {
    pub plate: Option<PlateNumber>,
    pub generation: u64,
    pub outcome: LookupOutcome,
}

impl LookupResult {
    /// Short status line for the plate field.
    pub fn status_message(&self) -> Option<String> {
        let plate = self.plate.as_ref().map(PlateNumber::as_str).unwrap_or("");
        match &self.outcome {
            LookupOutcome::Found(details) => {
                Some(format!("{plate}: {} {}", details.make, details.model))
            }
            LookupOutcome::NotFound => Some(format!("{plate}: no registration found")),
            LookupOutcome::Failed(message) => Some(format!("lookup unavailable: {message}")),
            LookupOutcome::Skipped | LookupOutcome::Superseded => None,
        }
    }
}

impl VehicleDraft {
    /// Applies a lookup answer, provided it was found for the plate currently typed in.
    pub fn apply_lookup(&mut self, result: &LookupResult) -> bool {
        match (&result.plate, &result.outcome) {
            (Some(plate), LookupOutcome::Found(details)) => self.apply_details(plate, details),
            _ => false,
        }
    }
}

/// Registration lookup adapter with last-write-wins semantics.
pub struct PlateLookup<L: ?Sized> {
    provider: Arc<L>,
    debounce: Duration,
    generation: AtomicU64,
}

impl<L> PlateLookup<L>
where
    L: RegistrationLookup + Send + Sync + ?Sized,
{
    pub fn new(provider: Arc<L>, debounce: Duration) -> Self {
        Self {
            provider,
            debounce,
            generation: AtomicU64::new(0),
        }
    }

    pub fn from_config(provider: Arc<L>, config: &WizardConfig) -> Self {
        Self::new(provider, config.lookup_debounce())
    }

    /// Invalidates any lookup still waiting or in flight.
    pub fn cancel(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
    }

    fn is_current(&self, ticket: u64) -> bool {
        self.generation.load(Ordering::SeqCst) == ticket
    }

    /// Looks up `raw` after the debounce window.
    pub async fn lookup(&self, raw: &str) -> LookupResult {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        let Ok(plate) = PlateNumber::new(raw) else {
            return LookupResult {
                plate: None,
                generation,
                outcome: LookupOutcome::Skipped,
            };
        };

        let superseded = |plate: PlateNumber| {
            log::info!("Lookup for {plate} superseded by a newer request");
            LookupResult {
                plate: Some(plate),
                generation,
                outcome: LookupOutcome::Superseded,
            }
        };

        tokio::time::sleep(self.debounce).await;
        if !self.is_current(generation) {
            return superseded(plate);
        }

        let answer = self.provider.lookup_plate(&plate).await;
        if !self.is_current(generation) {
            return superseded(plate);
        }

        let outcome = match answer {
            Ok(Some(details)) => LookupOutcome::Found(details),
            Ok(None) => LookupOutcome::NotFound,
            Err(e) => {
                log::warn!("Registration lookup failed for {plate}: {e}");
                LookupOutcome::Failed(e.to_string())
            }
        };

        LookupResult {
            plate: Some(plate),
            generation,
            outcome,
        }
    }
}
