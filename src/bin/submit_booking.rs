//! Dry run of a booking submission against a directory export.
//!
//! Usage: `submit_booking <draft.json>`. The draft goes through full
//! validation, mission promotion and an in-memory save; the saved record is
//! printed as JSON.

use std::env;
use std::fs;
use std::path::Path;
use std::process::ExitCode;

use chrono::Local;
use dotenvy::dotenv;

use booking_wizard::DEFAULT_APP_ENV;
use booking_wizard::models::config::WizardConfig;
use booking_wizard::repository::{DirectorySnapshot, InMemoryRepository};
use booking_wizard::services::ServiceError;
use booking_wizard::services::promotion::PromotionContext;
use booking_wizard::services::wizard::BookingWizard;

fn load_directory(path: &str) -> Result<DirectorySnapshot, String> {
    let raw = fs::read_to_string(path).map_err(|e| format!("cannot read {path}: {e}"))?;
    serde_json::from_str(&raw).map_err(|e| format!("invalid directory {path}: {e}"))
}

fn load_wizard(path: &str) -> Result<BookingWizard, String> {
    let raw = fs::read_to_string(path).map_err(|e| format!("cannot read {path}: {e}"))?;
    BookingWizard::from_json(&raw).map_err(|e| format!("{path}: {e}"))
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenv().ok(); // Load .env file
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    // Select config profile (defaults to `local`).
    let app_env = env::var("APP_ENV").unwrap_or_else(|_| DEFAULT_APP_ENV.into());

    let config = match WizardConfig::load(Path::new("config"), &app_env) {
        Ok(config) => config,
        Err(err) => {
            log::error!("Error loading settings: {}", err);
            return ExitCode::FAILURE;
        }
    };

    let Some(draft_path) = env::args().nth(1) else {
        log::error!("Usage: submit_booking <draft.json>");
        return ExitCode::FAILURE;
    };

    let (directory, mut wizard) = match (
        load_directory(&config.directory_file),
        load_wizard(&draft_path),
    ) {
        (Ok(directory), Ok(wizard)) => (directory, wizard),
        (Err(err), _) | (_, Err(err)) => {
            log::error!("{err}");
            return ExitCode::FAILURE;
        }
    };

    let repo = InMemoryRepository::new(directory);
    let ctx = match PromotionContext::load(&repo, Local::now().date_naive()) {
        Ok(ctx) => ctx,
        Err(err) => {
            log::error!("Error loading directory: {err}");
            return ExitCode::FAILURE;
        }
    };

    match wizard.submit(&repo, &ctx).await {
        Ok(outcome) => match serde_json::to_string_pretty(&outcome) {
            Ok(json) => {
                println!("{json}");
                ExitCode::SUCCESS
            }
            Err(err) => {
                log::error!("Cannot render the saved booking: {err}");
                ExitCode::FAILURE
            }
        },
        Err(ServiceError::Validation(errors)) => {
            for (path, messages) in errors.iter() {
                log::error!("{path}: {}", messages.join(", "));
            }
            ExitCode::FAILURE
        }
        Err(err) => {
            log::error!("Submission failed: {err}");
            ExitCode::FAILURE
        }
    }
}
