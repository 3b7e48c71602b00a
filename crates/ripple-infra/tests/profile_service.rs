//! Profile service behavior against the in-memory adapter.

use std::sync::Arc;

use uuid::Uuid;

use ripple_core::DomainError;
use ripple_core::domain::Caller;
use ripple_core::input::{EducationInput, ExperienceInput, ProfileInput};
use ripple_core::service::ProfileService;
use ripple_infra::InMemoryProfileRepository;

fn caller(name: &str) -> Caller {
    Caller {
        id: Uuid::new_v4(),
        name: name.to_string(),
        avatar: format!("{name}.png"),
    }
}

fn minimal_input() -> ProfileInput {
    ProfileInput {
        status: "Developer".into(),
        skills: "rust, tokio".into(),
        company: None,
        website: None,
        location: None,
        bio: None,
        github_username: None,
        youtube: None,
        twitter: None,
        facebook: None,
        linkedin: None,
        instagram: None,
        experience: None,
        education: None,
    }
}

fn service() -> ProfileService {
    ProfileService::new(Arc::new(InMemoryProfileRepository::new()))
}

#[tokio::test]
async fn upsert_creates_profile_with_split_skills() {
    let service = service();
    let alice = caller("alice");

    let profile = service.upsert(minimal_input(), &alice).await.unwrap();

    assert_eq!(profile.user_id, alice.id);
    assert_eq!(profile.status, "Developer");
    assert_eq!(profile.skills, vec!["rust", "tokio"]);
}

#[tokio::test]
async fn second_upsert_merges_instead_of_replacing() {
    let service = service();
    let alice = caller("alice");

    let mut first = minimal_input();
    first.bio = Some("Writes Rust".into());
    first.location = Some("Berlin".into());
    let created = service.upsert(first, &alice).await.unwrap();

    let mut second = minimal_input();
    second.status = "Senior Developer".into();
    second.website = Some("https://alice.dev".into());
    let updated = service.upsert(second, &alice).await.unwrap();

    // Same document, required fields overwritten, omitted ones retained.
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.status, "Senior Developer");
    assert_eq!(updated.website.as_deref(), Some("https://alice.dev"));
    assert_eq!(updated.bio.as_deref(), Some("Writes Rust"));
    assert_eq!(updated.location.as_deref(), Some("Berlin"));

    assert_eq!(service.list().await.unwrap().len(), 1);
}

#[tokio::test]
async fn provided_experience_replaces_the_list() {
    let service = service();
    let alice = caller("alice");

    let mut input = minimal_input();
    input.experience = Some(vec![ExperienceInput {
        title: "Engineer".into(),
        company: "Acme".into(),
        location: None,
        from: "2019".into(),
        to: None,
        current: true,
        description: None,
    }]);
    service.upsert(input, &alice).await.unwrap();

    let mut replacement = minimal_input();
    replacement.experience = Some(vec![
        ExperienceInput {
            title: "Staff Engineer".into(),
            company: "Acme".into(),
            location: None,
            from: "2022".into(),
            to: None,
            current: true,
            description: None,
        },
        ExperienceInput {
            title: "Engineer".into(),
            company: "Initech".into(),
            location: None,
            from: "2017".into(),
            to: Some("2019".into()),
            current: false,
            description: None,
        },
    ]);
    let profile = service.upsert(replacement, &alice).await.unwrap();

    assert_eq!(profile.experience.len(), 2);
    assert_eq!(profile.experience[0].title, "Staff Engineer");

    // An upsert without an experience list keeps the existing one.
    let profile = service.upsert(minimal_input(), &alice).await.unwrap();
    assert_eq!(profile.experience.len(), 2);
}

#[tokio::test]
async fn nested_education_entry_is_validated() {
    let service = service();
    let alice = caller("alice");

    let mut input = minimal_input();
    input.education = Some(vec![EducationInput {
        school: "".into(),
        degree: "BSc".into(),
        field_of_study: "CS".into(),
        from: "2015".into(),
        to: None,
        current: false,
        description: None,
    }]);

    let err = service.upsert(input, &alice).await.unwrap_err();
    assert!(matches!(err, DomainError::Validation(_)));
    // A failed upsert creates nothing.
    assert!(service.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn missing_status_is_a_validation_failure() {
    let service = service();
    let mut input = minimal_input();
    input.status = "".into();

    let err = service.upsert(input, &caller("alice")).await.unwrap_err();
    let DomainError::Validation(report) = err else {
        panic!("expected validation error");
    };
    assert_eq!(report.first().unwrap().0, "status");
}

#[tokio::test]
async fn delete_is_owner_only_and_returns_snapshot() {
    let service = service();
    let alice = caller("alice");
    let bob = caller("bob");

    let profile = service.upsert(minimal_input(), &alice).await.unwrap();

    let err = service.delete(profile.id, &bob).await.unwrap_err();
    assert!(matches!(err, DomainError::Unauthorized));
    assert_eq!(service.list().await.unwrap().len(), 1);

    let snapshot = service.delete(profile.id, &alice).await.unwrap();
    assert_eq!(snapshot.id, profile.id);
    assert!(service.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn delete_of_unknown_profile_is_not_found() {
    let service = service();
    let err = service
        .delete(Uuid::new_v4(), &caller("alice"))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::NotFound { .. }));
}
