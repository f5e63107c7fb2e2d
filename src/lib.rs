//! Booking wizard for a ground-transportation dispatch service.
//!
//! The `data` feature exposes the draft model, its validation and the review
//! DTOs. The `wizard` feature adds the wizard services, the collaborator
//! traits and configuration loading.

#[cfg(feature = "data")]
pub mod domain;
#[cfg(feature = "data")]
pub mod dto;
#[cfg(feature = "data")]
pub mod forms;

#[cfg(feature = "wizard")]
pub mod error_conversions;
#[cfg(feature = "wizard")]
pub mod models;
#[cfg(feature = "wizard")]
pub mod repository;
#[cfg(feature = "wizard")]
pub mod services;

/// Default profile used when `APP_ENV` is not set.
pub const DEFAULT_APP_ENV: &str = "local";
