//! Schedule creation and leader-facing reads.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use chrono::NaiveDate;
use tracing::warn;

use servir_core::{AppError, AppResult, ChurchId};
use servir_domain::{
    Assignment, AssignmentStatus, AvailabilityStatus, MinistryId, ProfileId, Role, Schedule,
    ScheduleId, ServiceTime, ServiceTimeId,
};

use crate::ports::{
    AssignmentRepository, AssignmentStatusCounts, AvailabilityRepository, ProfileRepository,
    ScheduleRepository, ServiceTimeRepository,
};
use crate::substitution_service::CandidateView;

#[cfg(test)]
mod tests;

/// Input for creating a schedule with its initial assignments.
#[derive(Debug, Clone)]
pub struct CreateScheduleInput {
    /// Church the schedule belongs to.
    pub church_id: ChurchId,
    /// Ministry being scheduled.
    pub ministry_id: MinistryId,
    /// Calendar date of the service.
    pub date: NaiveDate,
    /// Service time of the event.
    pub service_time_id: ServiceTimeId,
    /// Volunteers to invite; each gets a pending assignment.
    pub volunteer_ids: Vec<ProfileId>,
    /// Profile creating the schedule.
    pub created_by: ProfileId,
}

/// One schedule with all of its assignments, for the leader list view.
#[derive(Debug, Clone)]
pub struct ScheduleOverview {
    /// The schedule record.
    pub schedule: Schedule,
    /// Every assignment on the schedule, any status.
    pub assignments: Vec<Assignment>,
}

/// Application service for schedules and service times.
#[derive(Clone)]
pub struct ScheduleService {
    schedule_repository: Arc<dyn ScheduleRepository>,
    service_time_repository: Arc<dyn ServiceTimeRepository>,
    profile_repository: Arc<dyn ProfileRepository>,
    availability_repository: Arc<dyn AvailabilityRepository>,
    assignment_repository: Arc<dyn AssignmentRepository>,
}

impl ScheduleService {
    /// Creates a new schedule service.
    #[must_use]
    pub fn new(
        schedule_repository: Arc<dyn ScheduleRepository>,
        service_time_repository: Arc<dyn ServiceTimeRepository>,
        profile_repository: Arc<dyn ProfileRepository>,
        availability_repository: Arc<dyn AvailabilityRepository>,
        assignment_repository: Arc<dyn AssignmentRepository>,
    ) -> Self {
        Self {
            schedule_repository,
            service_time_repository,
            profile_repository,
            availability_repository,
            assignment_repository,
        }
    }

    /// Creates a schedule and a pending assignment for every listed
    /// volunteer.
    pub async fn create_schedule(&self, input: CreateScheduleInput) -> AppResult<Schedule> {
        self.service_time_repository
            .find_by_id(input.service_time_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!(
                    "service time '{}' does not exist",
                    input.service_time_id
                ))
            })?;

        let schedule = Schedule {
            id: ScheduleId::new(),
            church_id: input.church_id,
            ministry_id: input.ministry_id,
            date: input.date,
            service_time_id: input.service_time_id,
            created_by_profile_id: Some(input.created_by),
        };
        self.schedule_repository.create(schedule.clone()).await?;

        for volunteer_id in &input.volunteer_ids {
            self.assignment_repository
                .insert(schedule.id, *volunteer_id, AssignmentStatus::Pending)
                .await?;
        }

        Ok(schedule)
    }

    /// Lists a church's schedules together with their assignments.
    pub async fn list_schedules(&self, church_id: ChurchId) -> AppResult<Vec<ScheduleOverview>> {
        let schedules = self.schedule_repository.list_by_church(church_id).await?;

        let mut overviews = Vec::with_capacity(schedules.len());
        for schedule in schedules {
            let assignments = self
                .assignment_repository
                .find_by_schedule(schedule.id)
                .await?;
            overviews.push(ScheduleOverview {
                schedule,
                assignments,
            });
        }

        Ok(overviews)
    }

    /// Lists a ministry's volunteers annotated with availability for `date`
    /// and whether they already serve somewhere on that date.
    ///
    /// Nobody is filtered out here; the roster feeds the new-schedule UI,
    /// which disables booked volunteers rather than hiding them.
    pub async fn ministry_roster(
        &self,
        ministry_id: MinistryId,
        date: NaiveDate,
    ) -> AppResult<Vec<CandidateView>> {
        let volunteers = self
            .profile_repository
            .find_by_ministry_and_roles(ministry_id, &[Role::Volunteer])
            .await?;

        if volunteers.is_empty() {
            return Ok(Vec::new());
        }

        let volunteer_ids: Vec<ProfileId> = volunteers.iter().map(|profile| profile.id).collect();

        let availability: HashMap<ProfileId, AvailabilityStatus> = match self
            .availability_repository
            .find_for_date(date, &volunteer_ids)
            .await
        {
            Ok(entries) => entries
                .into_iter()
                .map(|entry| (entry.profile_id, entry.status))
                .collect(),
            Err(error) => {
                warn!(%date, %error, "availability lookup failed, roster shows everyone as uninformed");
                HashMap::new()
            }
        };

        let assigned: HashSet<ProfileId> =
            match self.assignment_repository.find_active_by_date(date).await {
                Ok(assignments) => assignments
                    .into_iter()
                    .map(|assignment| assignment.profile_id)
                    .collect(),
                Err(error) => {
                    warn!(%date, %error, "assignment lookup failed, roster shows everyone as unassigned");
                    HashSet::new()
                }
            };

        let mut roster: Vec<CandidateView> = volunteers
            .into_iter()
            .map(|profile| CandidateView {
                already_assigned: assigned.contains(&profile.id),
                availability: availability
                    .get(&profile.id)
                    .copied()
                    .unwrap_or(AvailabilityStatus::Uninformed),
                profile_id: profile.id,
                name: profile.name,
                avatar_url: profile.avatar_url,
            })
            .collect();

        roster.sort_by(|left, right| {
            left.name
                .cmp(&right.name)
                .then_with(|| left.profile_id.cmp(&right.profile_id))
        });

        Ok(roster)
    }

    /// Creates a service time.
    pub async fn create_service_time(
        &self,
        church_id: ChurchId,
        day_of_week: String,
        time: String,
        name: Option<String>,
    ) -> AppResult<ServiceTime> {
        let service_time = ServiceTime {
            id: ServiceTimeId::new(),
            church_id,
            day_of_week,
            time,
            name,
        };
        self.service_time_repository
            .create(service_time.clone())
            .await?;
        Ok(service_time)
    }

    /// Lists a church's service times.
    pub async fn list_service_times(&self, church_id: ChurchId) -> AppResult<Vec<ServiceTime>> {
        self.service_time_repository.list_by_church(church_id).await
    }

    /// Simple assignment totals for the leader dashboard.
    pub async fn assignment_counts(&self, church_id: ChurchId) -> AppResult<AssignmentStatusCounts> {
        self.assignment_repository.status_counts(church_id).await
    }

    /// Lists every assignment on one schedule, any status.
    pub async fn assignments_for_schedule(
        &self,
        schedule_id: ScheduleId,
    ) -> AppResult<Vec<Assignment>> {
        self.assignment_repository.find_by_schedule(schedule_id).await
    }

    /// Lists a volunteer's own assignments, oldest first.
    pub async fn assignments_for_profile(
        &self,
        profile_id: ProfileId,
    ) -> AppResult<Vec<Assignment>> {
        let mut assignments = self.assignment_repository.find_by_profile(profile_id).await?;
        assignments.sort_by_key(|assignment| assignment.created_at);
        Ok(assignments)
    }
}
