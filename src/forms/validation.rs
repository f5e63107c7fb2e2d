//! Per-step validation of a [`BookingDraft`].
//!
//! Each section check produces a fresh [`FieldErrors`]; [`validate_step`]
//! then replaces only the entries under the step's declared fields, leaving
//! errors of other steps as they were.

use validator::Validate;

use crate::forms::FieldErrors;
use crate::forms::booking::BookingDraft;
use crate::forms::mission::MissionDraft;
use crate::forms::steps::{StepId, resolve_steps};

const PASSENGER_CONFLICT: &str = "select an existing passenger or enter the new passenger's name";

/// Checks the live branch of the passenger duality.
pub fn passenger_errors(draft: &BookingDraft) -> FieldErrors {
    let mut errors = FieldErrors::new();

    if draft.use_existing_passenger {
        if draft.referenced_passenger().is_none() {
            errors.add("passenger_id", "select an existing passenger");
        }
        return errors;
    }

    match &draft.passenger_info {
        Some(info) => {
            if let Err(validation) = info.validate() {
                errors.extend_from_validation("passenger_info", &validation);
            }
        }
        None => {
            errors.add("passenger_info.first_name", "is required");
            errors.add("passenger_info.last_name", "is required");
        }
    }

    let names_missing = errors.contains("passenger_info.first_name")
        || errors.contains("passenger_info.last_name");
    if names_missing {
        errors.add("passenger_id", PASSENGER_CONFLICT);
    }

    errors
}

/// Checks the standalone ride fields; inert while in mission mode.
pub fn ride_details_errors(draft: &BookingDraft) -> FieldErrors {
    let mut errors = FieldErrors::new();
    if draft.is_mission {
        return errors;
    }
    if let Err(validation) = draft.validate() {
        errors.extend_from_validation("", &validation);
    }
    errors
}

/// Checks the mission block, including rules the derive cannot express.
pub fn mission_errors(draft: &BookingDraft) -> FieldErrors {
    let mut errors = FieldErrors::new();
    let Some(mission) = draft.mission.as_ref() else {
        errors.add("mission", "mission details are required");
        return errors;
    };

    if let Err(validation) = mission.validate() {
        errors.extend_from_validation("mission", &validation);
    }
    add_mission_rules(mission, &mut errors);
    errors
}

fn add_mission_rules(mission: &MissionDraft, errors: &mut FieldErrors) {
    if mission.rides.is_empty() {
        errors.add("mission.rides", "add at least one ride");
    }

    for (index, ride) in mission.rides.iter().enumerate() {
        if !ride.category.is_mission_eligible() {
            errors.add(
                format!("mission.rides[{index}].category"),
                format!("{} is not available inside a mission", ride.category),
            );
        }
    }

    if let (Some(start), Some(end)) = (mission.start_date, mission.end_date)
        && end < start
    {
        errors.add("mission.end_date", "cannot be before the start date");
    }
}

fn section_errors(draft: &BookingDraft, step: StepId) -> FieldErrors {
    match step {
        StepId::Passenger => passenger_errors(draft),
        // The derived validation covers ride fields and milestones together;
        // each step keeps only its declared share of it.
        StepId::RideDetails | StepId::Milestones => ride_details_errors(draft),
        StepId::Mission => mission_errors(draft),
        StepId::Review => FieldErrors::new(),
    }
}

/// Validates the fields declared by `step`, refreshing their entries in `errors`.
///
/// Returns `true` when none of the declared fields has an error. The `review`
/// step always passes and leaves `errors` untouched.
pub fn validate_step(draft: &BookingDraft, step: StepId, errors: &mut FieldErrors) -> bool {
    let declared = step.required_fields();
    if declared.is_empty() {
        return true;
    }

    for field in declared {
        errors.clear_under(field);
    }
    let found = section_errors(draft, step);
    errors.absorb_under(found, declared) == 0
}

/// Re-validates every step of the draft's current topology.
pub fn validate_all(draft: &BookingDraft, errors: &mut FieldErrors) -> bool {
    resolve_steps(draft.is_mission)
        .iter()
        .fold(true, |valid, step| validate_step(draft, step.id, errors) && valid)
}
