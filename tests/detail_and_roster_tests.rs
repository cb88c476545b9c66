use bulletin::repository::Method;
use bulletin::services::{AnnouncementDetail, DetailOutcome, DetailState, MemberRoster};
use bulletin::test_helpers::{fast_config, sample_announcement, sample_member, InMemoryBackend};

fn detail(backend: &InMemoryBackend) -> AnnouncementDetail {
    AnnouncementDetail::new(backend.repository(&fast_config()).announcements)
}

#[tokio::test]
async fn test_detail_shows_announcement_with_upload_urls() {
    let mut announcement = sample_announcement("Field trip", &["events"], 5);
    announcement.image = vec!["a.png".to_string(), "b.jpg".to_string()];
    let id = announcement.id.clone();
    let backend = InMemoryBackend::new()
        .with_announcements(vec![announcement])
        .with_upload("b.jpg", vec![1, 2, 3]);
    let mut view = detail(&backend);

    let outcome = view.load(&id).await;
    assert_eq!(outcome, DetailOutcome::Show);
    assert_eq!(outcome.redirect(), None);

    let loaded = view.announcement().unwrap();
    assert_eq!(loaded.title, "Field trip");
    assert_eq!(
        loaded.image_urls(),
        vec!["/api/uploads/a.png".to_string(), "/api/uploads/b.jpg".to_string()]
    );

    assert!(view.open_image(1));
    assert_eq!(view.selected_image().as_deref(), Some("/api/uploads/b.jpg"));
    assert_eq!(view.fetch_image(1).await.unwrap(), vec![1, 2, 3]);
    assert!(!view.open_image(2));
    view.close_image();
    assert_eq!(view.selected_image(), None);
}

#[tokio::test]
async fn test_detail_not_found_navigates_back() {
    let backend = InMemoryBackend::new();
    let mut view = detail(&backend);

    let outcome = view.load("missing-id").await;
    assert_eq!(outcome, DetailOutcome::NavigateBack);
    assert_eq!(outcome.redirect(), Some("/announcements"));

    assert_eq!(view.state(), &DetailState::Missing);
    assert_eq!(
        view.notifier().last().map(|n| n.message.as_str()),
        Some("Announcement not found")
    );
}

#[tokio::test]
async fn test_detail_empty_id_sends_nothing() {
    let backend = InMemoryBackend::new();
    let mut view = detail(&backend);

    assert_eq!(view.load("  ").await, DetailOutcome::NavigateBack);
    assert!(backend.calls().is_empty());
}

#[tokio::test]
async fn test_detail_server_error_navigates_back() {
    let announcement = sample_announcement("Field trip", &[], 5);
    let id = announcement.id.clone();
    let backend = InMemoryBackend::new().with_announcements(vec![announcement]);
    backend.fail_with_status(&format!("/api/announcements/{}", id), 500);
    let mut view = detail(&backend);

    assert_eq!(view.load(&id).await, DetailOutcome::NavigateBack);
    assert_eq!(
        view.notifier().last().map(|n| n.message.as_str()),
        Some("Failed to fetch announcement")
    );
}

#[tokio::test]
async fn test_members_fetched_once_in_order() {
    let backend = InMemoryBackend::new().with_members(vec![
        sample_member("Somchai Jaidee", "Chai", "M01"),
        sample_member("Anna Lee", "", "M02"),
    ]);
    let mut roster = MemberRoster::new(backend.repository(&fast_config()).members);

    roster.ensure_loaded().await.unwrap();
    roster.ensure_loaded().await.unwrap();

    assert_eq!(backend.calls_to(Method::Get, "/api/members").len(), 1);
    let names: Vec<&str> = roster.members().iter().map(|m| m.fullname.as_str()).collect();
    assert_eq!(names, vec!["Somchai Jaidee", "Anna Lee"]);
    assert_eq!(roster.members()[0].avatar_fallback(), Some('C'));
    assert_eq!(roster.members()[1].avatar_fallback(), Some('A'));
}

#[tokio::test]
async fn test_members_retry_after_failure() {
    let backend = InMemoryBackend::new().with_members(vec![sample_member("Anna Lee", "Ann", "M02")]);
    backend.fail_with_network_error("/api/members");
    let mut roster = MemberRoster::new(backend.repository(&fast_config()).members);

    assert!(roster.ensure_loaded().await.is_err());
    assert!(roster.members().is_empty());

    backend.clear_failure("/api/members");
    roster.ensure_loaded().await.unwrap();
    assert_eq!(roster.members().len(), 1);
}
