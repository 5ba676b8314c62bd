//! Ports consumed by the application services.
//!
//! Storage is a generic data-access capability with filtered reads,
//! inserts, and updates; the active-assignment uniqueness constraint
//! lives in the storage implementation, not here.

mod ranking;
mod repository;

pub use ranking::TextGenerator;
pub use repository::{
    AssignmentRepository, AssignmentStatusCounts, AssignmentTimestamps, AvailabilityRepository,
    MinistryRepository, NewProfile, ProfileAccount, ProfileRepository, ProfileUpdate,
    ScheduleRepository, ServiceTimeRepository,
};
