//! Domain entities and invariants.

#![forbid(unsafe_code)]

mod assignment;
mod availability;
mod ministry;
mod profile;
mod schedule;

pub use assignment::{Assignment, AssignmentId, AssignmentStatus};
pub use availability::{AvailabilityEntry, AvailabilityStatus};
pub use ministry::{Ministry, MinistryId};
pub use profile::{PIN_LENGTH, Profile, ProfileId, Role, validate_pin};
pub use schedule::{Schedule, ScheduleId, ServiceTime, ServiceTimeId};
