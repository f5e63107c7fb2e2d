//! Domain records and value objects shared by the booking wizard.

pub mod booking;
pub mod directory;
pub mod ride;
pub mod types;
pub mod vehicle;
