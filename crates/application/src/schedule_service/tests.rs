use std::sync::Arc;

use chrono::{NaiveDate, Utc};

use servir_core::{AppError, ChurchId};
use servir_domain::{
    AssignmentStatus, AvailabilityEntry, AvailabilityStatus, MinistryId, Profile, ProfileId, Role,
    Schedule, ScheduleId, ServiceTime, ServiceTimeId,
};

use crate::test_support::{
    FakeAssignmentRepository, FakeAvailabilityRepository, FakeProfileRepository,
    FakeScheduleRepository, FakeServiceTimeRepository,
};

use super::{CreateScheduleInput, ScheduleService};

struct Fixture {
    service: ScheduleService,
    schedules: Arc<FakeScheduleRepository>,
    service_times: Arc<FakeServiceTimeRepository>,
    profiles: Arc<FakeProfileRepository>,
    availability: Arc<FakeAvailabilityRepository>,
    assignments: Arc<FakeAssignmentRepository>,
    church_id: ChurchId,
    ministry_id: MinistryId,
}

fn service_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 4, 5).unwrap_or_default()
}

fn fixture() -> Fixture {
    let schedules = Arc::new(FakeScheduleRepository::default());
    let service_times = Arc::new(FakeServiceTimeRepository::default());
    let profiles = Arc::new(FakeProfileRepository::default());
    let availability = Arc::new(FakeAvailabilityRepository::default());
    let assignments = Arc::new(FakeAssignmentRepository::default());

    let service = ScheduleService::new(
        schedules.clone(),
        service_times.clone(),
        profiles.clone(),
        availability.clone(),
        assignments.clone(),
    );

    Fixture {
        service,
        schedules,
        service_times,
        profiles,
        availability,
        assignments,
        church_id: ChurchId::new(),
        ministry_id: MinistryId::new(),
    }
}

async fn seed_service_time(fixture: &Fixture) -> ServiceTimeId {
    let service_time = ServiceTime {
        id: ServiceTimeId::new(),
        church_id: fixture.church_id,
        day_of_week: "sunday".to_owned(),
        time: "10:00".to_owned(),
        name: Some("Morning celebration".to_owned()),
    };
    let id = service_time.id;
    fixture.service_times.service_times.lock().await.push(service_time);
    id
}

fn volunteer(fixture: &Fixture, name: &str) -> Profile {
    Profile {
        id: ProfileId::new(),
        church_id: fixture.church_id,
        name: name.to_owned(),
        email: None,
        phone: None,
        avatar_url: None,
        role: Role::Volunteer,
        ministry_ids: vec![fixture.ministry_id],
        created_at: Utc::now(),
    }
}

async fn add_profile(fixture: &Fixture, profile: Profile) {
    fixture.profiles.profiles.lock().await.push(profile);
}

async fn seed_schedule(fixture: &Fixture, date: NaiveDate) -> Schedule {
    let schedule = Schedule {
        id: ScheduleId::new(),
        church_id: fixture.church_id,
        ministry_id: fixture.ministry_id,
        date,
        service_time_id: ServiceTimeId::new(),
        created_by_profile_id: None,
    };
    fixture.schedules.schedules.lock().await.push(schedule.clone());
    fixture
        .assignments
        .schedule_dates
        .lock()
        .await
        .insert(schedule.id, schedule.date);
    schedule
}

fn input(fixture: &Fixture, service_time_id: ServiceTimeId, volunteer_ids: Vec<ProfileId>) -> CreateScheduleInput {
    CreateScheduleInput {
        church_id: fixture.church_id,
        ministry_id: fixture.ministry_id,
        date: service_date(),
        service_time_id,
        volunteer_ids,
        created_by: ProfileId::new(),
    }
}

// ---------------------------------------------------------------------------
// Schedule creation
// ---------------------------------------------------------------------------

#[tokio::test]
async fn creating_a_schedule_invites_every_listed_volunteer() {
    let fixture = fixture();
    let service_time_id = seed_service_time(&fixture).await;
    let ana = volunteer(&fixture, "Ana");
    let bia = volunteer(&fixture, "Bia");

    let schedule = fixture
        .service
        .create_schedule(input(&fixture, service_time_id, vec![ana.id, bia.id]))
        .await
        .map_err(|error| error.to_string());

    let Ok(schedule) = schedule else {
        panic!("schedule creation must succeed");
    };

    let assignments = fixture.assignments.assignments.lock().await;
    assert_eq!(assignments.len(), 2);
    assert!(assignments.iter().all(|assignment| {
        assignment.schedule_id == schedule.id && assignment.status == AssignmentStatus::Pending
    }));
}

#[tokio::test]
async fn creating_a_schedule_with_no_volunteers_is_allowed() {
    let fixture = fixture();
    let service_time_id = seed_service_time(&fixture).await;

    let result = fixture
        .service
        .create_schedule(input(&fixture, service_time_id, Vec::new()))
        .await;

    assert!(result.is_ok());
    assert_eq!(fixture.schedules.schedules.lock().await.len(), 1);
    assert!(fixture.assignments.assignments.lock().await.is_empty());
}

#[tokio::test]
async fn unknown_service_time_rejects_the_schedule() {
    let fixture = fixture();

    let result = fixture
        .service
        .create_schedule(input(&fixture, ServiceTimeId::new(), Vec::new()))
        .await;

    assert!(matches!(result, Err(AppError::NotFound(_))));
    assert!(fixture.schedules.schedules.lock().await.is_empty());
}

#[tokio::test]
async fn duplicate_volunteer_in_the_invite_list_surfaces_the_conflict() {
    let fixture = fixture();
    let service_time_id = seed_service_time(&fixture).await;
    let ana = volunteer(&fixture, "Ana");

    let result = fixture
        .service
        .create_schedule(input(&fixture, service_time_id, vec![ana.id, ana.id]))
        .await;

    assert!(matches!(result, Err(AppError::Conflict(_))));
}

// ---------------------------------------------------------------------------
// Listing
// ---------------------------------------------------------------------------

#[tokio::test]
async fn schedules_list_with_their_assignments_ordered_by_date() {
    let fixture = fixture();
    let later = seed_schedule(
        &fixture,
        NaiveDate::from_ymd_opt(2026, 5, 3).unwrap_or_default(),
    )
    .await;
    let earlier = seed_schedule(
        &fixture,
        NaiveDate::from_ymd_opt(2026, 4, 5).unwrap_or_default(),
    )
    .await;

    let ana = volunteer(&fixture, "Ana");
    fixture
        .assignments
        .seed(earlier.id, ana.id, AssignmentStatus::Confirmed)
        .await;
    fixture
        .assignments
        .seed(earlier.id, ana.id, AssignmentStatus::Cancelled)
        .await;

    let overviews = fixture
        .service
        .list_schedules(fixture.church_id)
        .await
        .unwrap_or_default();

    assert_eq!(overviews.len(), 2);
    assert_eq!(overviews[0].schedule.id, earlier.id);
    assert_eq!(overviews[1].schedule.id, later.id);
    // Cancelled assignments stay visible in the overview.
    assert_eq!(overviews[0].assignments.len(), 2);
    assert!(overviews[1].assignments.is_empty());
}

// ---------------------------------------------------------------------------
// Ministry roster
// ---------------------------------------------------------------------------

#[tokio::test]
async fn roster_annotates_but_never_filters() {
    let fixture = fixture();
    let ana = volunteer(&fixture, "Ana");
    let bia = volunteer(&fixture, "Bia");
    let caio = volunteer(&fixture, "Caio");
    add_profile(&fixture, ana.clone()).await;
    add_profile(&fixture, bia.clone()).await;
    add_profile(&fixture, caio.clone()).await;

    fixture
        .availability
        .entries
        .lock()
        .await
        .push(AvailabilityEntry {
            profile_id: ana.id,
            date: service_date(),
            status: AvailabilityStatus::Unavailable,
        });

    let schedule = seed_schedule(&fixture, service_date()).await;
    fixture
        .assignments
        .seed(schedule.id, bia.id, AssignmentStatus::Confirmed)
        .await;

    let roster = fixture
        .service
        .ministry_roster(fixture.ministry_id, service_date())
        .await
        .unwrap_or_default();

    // Unavailable and booked volunteers are still listed.
    assert_eq!(roster.len(), 3);
    assert_eq!(roster[0].availability, AvailabilityStatus::Unavailable);
    assert!(!roster[0].already_assigned);
    assert!(roster[1].already_assigned);
    assert_eq!(roster[2].availability, AvailabilityStatus::Uninformed);
    assert!(!roster[2].already_assigned);
}

#[tokio::test]
async fn roster_counts_assignments_on_other_schedules_of_the_same_date() {
    let fixture = fixture();
    let ana = volunteer(&fixture, "Ana");
    add_profile(&fixture, ana.clone()).await;

    // Ana is booked by another ministry's schedule on the same date.
    let other_schedule = seed_schedule(&fixture, service_date()).await;
    fixture
        .assignments
        .seed(other_schedule.id, ana.id, AssignmentStatus::Pending)
        .await;

    let roster = fixture
        .service
        .ministry_roster(fixture.ministry_id, service_date())
        .await
        .unwrap_or_default();

    assert_eq!(roster.len(), 1);
    assert!(roster[0].already_assigned);
}

#[tokio::test]
async fn roster_read_failures_degrade_to_uninformed_and_unassigned() {
    let schedules = Arc::new(FakeScheduleRepository::default());
    let service_times = Arc::new(FakeServiceTimeRepository::default());
    let profiles = Arc::new(FakeProfileRepository::default());
    let availability = Arc::new(FakeAvailabilityRepository {
        fail_reads: true,
        ..FakeAvailabilityRepository::default()
    });
    let assignments = Arc::new(FakeAssignmentRepository {
        fail_reads: true,
        ..FakeAssignmentRepository::default()
    });

    let service = ScheduleService::new(
        schedules,
        service_times,
        profiles.clone(),
        availability,
        assignments,
    );

    let ministry_id = MinistryId::new();
    profiles.profiles.lock().await.push(Profile {
        id: ProfileId::new(),
        church_id: ChurchId::new(),
        name: "Ana".to_owned(),
        email: None,
        phone: None,
        avatar_url: None,
        role: Role::Volunteer,
        ministry_ids: vec![ministry_id],
        created_at: Utc::now(),
    });

    let roster = service
        .ministry_roster(ministry_id, service_date())
        .await
        .unwrap_or_default();

    assert_eq!(roster.len(), 1);
    assert_eq!(roster[0].availability, AvailabilityStatus::Uninformed);
    assert!(!roster[0].already_assigned);
}

#[tokio::test]
async fn roster_of_an_empty_ministry_is_empty() {
    let fixture = fixture();

    let roster = fixture
        .service
        .ministry_roster(fixture.ministry_id, service_date())
        .await
        .unwrap_or_default();

    assert!(roster.is_empty());
}

// ---------------------------------------------------------------------------
// Service times, counts and self-service reads
// ---------------------------------------------------------------------------

#[tokio::test]
async fn service_times_round_trip_through_the_repository() {
    let fixture = fixture();

    let created = fixture
        .service
        .create_service_time(
            fixture.church_id,
            "sunday".to_owned(),
            "18:30".to_owned(),
            None,
        )
        .await
        .map_err(|error| error.to_string());
    assert!(created.is_ok());

    let listed = fixture
        .service
        .list_service_times(fixture.church_id)
        .await
        .unwrap_or_default();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].time, "18:30");
}

#[tokio::test]
async fn assignment_counts_ignore_cancelled() {
    let fixture = fixture();
    let schedule = seed_schedule(&fixture, service_date()).await;
    let ana = volunteer(&fixture, "Ana");
    let bia = volunteer(&fixture, "Bia");
    let caio = volunteer(&fixture, "Caio");

    fixture
        .assignments
        .seed(schedule.id, ana.id, AssignmentStatus::Confirmed)
        .await;
    fixture
        .assignments
        .seed(schedule.id, bia.id, AssignmentStatus::Pending)
        .await;
    fixture
        .assignments
        .seed(schedule.id, caio.id, AssignmentStatus::Cancelled)
        .await;

    let counts = fixture
        .service
        .assignment_counts(fixture.church_id)
        .await
        .unwrap_or_default();

    assert_eq!(counts.confirmed, 1);
    assert_eq!(counts.pending, 1);
    assert_eq!(counts.declined, 0);
}

#[tokio::test]
async fn a_volunteers_assignments_come_back_oldest_first() {
    let fixture = fixture();
    let ana = volunteer(&fixture, "Ana");
    let first_schedule = seed_schedule(&fixture, service_date()).await;
    let second_schedule = seed_schedule(&fixture, service_date()).await;

    let first = fixture
        .assignments
        .seed(first_schedule.id, ana.id, AssignmentStatus::Confirmed)
        .await;
    let second = fixture
        .assignments
        .seed(second_schedule.id, ana.id, AssignmentStatus::Pending)
        .await;

    let assignments = fixture
        .service
        .assignments_for_profile(ana.id)
        .await
        .unwrap_or_default();

    assert_eq!(assignments.len(), 2);
    assert_eq!(assignments[0].id, first.id);
    assert_eq!(assignments[1].id, second.id);
}
