use std::sync::Arc;

use servir_core::{AppError, ChurchId};
use servir_domain::{MinistryId, ProfileId};

use crate::test_support::FakeMinistryRepository;

use super::MinistryService;

fn service() -> (MinistryService, ChurchId) {
    let repository = Arc::new(FakeMinistryRepository::default());
    (MinistryService::new(repository), ChurchId::new())
}

#[tokio::test]
async fn ministries_list_ordered_by_name() {
    let (service, church_id) = service();

    for name in ["Worship", "Kids", "Welcome"] {
        let created = service
            .create_ministry(church_id, name.to_owned(), None, None)
            .await;
        assert!(created.is_ok());
    }

    let ministries = service.list_ministries(church_id).await.unwrap_or_default();
    let names: Vec<&str> = ministries.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, vec!["Kids", "Welcome", "Worship"]);
}

#[tokio::test]
async fn a_blank_name_is_rejected() {
    let (service, church_id) = service();

    let result = service
        .create_ministry(church_id, "  ".to_owned(), None, None)
        .await;
    assert!(matches!(result, Err(AppError::Validation(_))));
}

#[tokio::test]
async fn updating_keeps_the_id_and_replaces_the_fields() {
    let (service, church_id) = service();
    let created = service
        .create_ministry(church_id, "Kids".to_owned(), None, None)
        .await
        .map_err(|error| error.to_string());
    let Ok(ministry) = created else {
        panic!("ministry creation must succeed");
    };

    let leader = ProfileId::new();
    let updated = service
        .update_ministry(
            ministry.id,
            "Kids Church".to_owned(),
            Some("Sunday school".to_owned()),
            Some(leader),
        )
        .await
        .map_err(|error| error.to_string());
    let Ok(updated) = updated else {
        panic!("ministry update must succeed");
    };

    assert_eq!(updated.id, ministry.id);
    assert_eq!(updated.name, "Kids Church");
    assert_eq!(updated.leader_profile_id, Some(leader));
}

#[tokio::test]
async fn updating_a_missing_ministry_is_not_found() {
    let (service, _) = service();

    let result = service
        .update_ministry(MinistryId::new(), "Kids".to_owned(), None, None)
        .await;
    assert!(matches!(result, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn deleting_removes_the_ministry() {
    let (service, church_id) = service();
    let created = service
        .create_ministry(church_id, "Kids".to_owned(), None, None)
        .await
        .map_err(|error| error.to_string());
    let Ok(ministry) = created else {
        panic!("ministry creation must succeed");
    };

    let deleted = service.delete_ministry(ministry.id).await;
    assert!(deleted.is_ok());
    assert!(service.list_ministries(church_id).await.unwrap_or_default().is_empty());

    let again = service.delete_ministry(ministry.id).await;
    assert!(matches!(again, Err(AppError::NotFound(_))));
}
