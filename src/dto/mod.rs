//! DTOs shaped for the wizard's review step.

pub mod review;
