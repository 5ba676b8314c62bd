use servir_application::{
    AccountService, AvailabilityService, MinistryService, ScheduleService, SubstitutionService,
};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub account_service: AccountService,
    pub availability_service: AvailabilityService,
    pub ministry_service: MinistryService,
    pub schedule_service: ScheduleService,
    pub substitution_service: SubstitutionService,
    pub frontend_url: String,
}
