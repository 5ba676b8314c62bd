//! Application services and ports.

#![forbid(unsafe_code)]

mod account_service;
mod availability_service;
mod ministry_service;
mod ports;
mod schedule_service;
mod substitution_service;

#[cfg(test)]
mod test_support;

pub use account_service::{
    AccountService, AuthOutcome, CreateVolunteerInput, PasswordHasher, VolunteerCredentials,
};
pub use availability_service::AvailabilityService;
pub use ministry_service::MinistryService;
pub use ports::{
    AssignmentRepository, AssignmentStatusCounts, AssignmentTimestamps, AvailabilityRepository,
    MinistryRepository, NewProfile, ProfileAccount, ProfileRepository, ProfileUpdate,
    ScheduleRepository, ServiceTimeRepository, TextGenerator,
};
pub use schedule_service::{CreateScheduleInput, ScheduleOverview, ScheduleService};
pub use substitution_service::{
    CandidateView, MAX_SUGGESTIONS, SubstituteSuggestion, SubstitutionPolicy, SubstitutionService,
    extract_ranked_ids,
};
