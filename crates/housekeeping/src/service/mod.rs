//! Service module — the admin operations exposed to the host application.

pub mod housekeeping;

pub use housekeeping::HousekeepingService;
