use bulletin::repository::Method;
use bulletin::services::{EditMode, ErrorKind, NoticeLevel, TodoController};
use bulletin::test_helpers::{fast_config, sample_todo, InMemoryBackend};
use std::time::Duration;

fn controller(backend: &InMemoryBackend) -> TodoController {
    TodoController::new(backend.repository(&fast_config()).todos)
}

#[tokio::test]
async fn test_refresh_orders_newest_first() {
    let backend = InMemoryBackend::new().with_todos(vec![
        sample_todo("oldest", 30),
        sample_todo("newest", 1),
        sample_todo("middle", 10),
    ]);
    let mut todos = controller(&backend);

    todos.refresh().await.unwrap();

    let texts: Vec<&str> = todos.items().iter().map(|t| t.todo_text.as_str()).collect();
    assert_eq!(texts, vec!["newest", "middle", "oldest"]);
    assert!(!todos.is_loading());
}

#[tokio::test]
async fn test_repeated_refresh_is_stable() {
    let backend = InMemoryBackend::new().with_todos(vec![sample_todo("a", 5), sample_todo("b", 3)]);
    let mut todos = controller(&backend);

    todos.refresh().await.unwrap();
    let first = todos.items().to_vec();
    todos.refresh().await.unwrap();

    assert_eq!(todos.items(), first.as_slice());
}

#[tokio::test]
async fn test_create_lands_first() {
    let backend = InMemoryBackend::new().with_todos(vec![sample_todo("Walk dog", 60)]);
    let mut todos = controller(&backend);
    todos.refresh().await.unwrap();

    todos.set_input("  Buy milk  ");
    todos.submit_add().await.unwrap();

    assert_eq!(todos.items().len(), 2);
    assert_eq!(todos.items()[0].todo_text, "Buy milk");
    assert_eq!(todos.input(), "");
    assert_eq!(
        todos.notifier().last().map(|n| n.message.as_str()),
        Some("Todo added successfully")
    );
}

#[tokio::test]
async fn test_blank_input_sends_nothing() {
    let backend = InMemoryBackend::new();
    let mut todos = controller(&backend);

    todos.set_input("   ");
    let result = todos.submit_add().await;

    assert!(result.is_err());
    assert!(backend.calls_to(Method::Put, "/api/todo").is_empty());
}

#[tokio::test]
async fn test_edit_mode_disables_input() {
    let backend = InMemoryBackend::new().with_todos(vec![sample_todo("Draft report", 5)]);
    let mut todos = controller(&backend);
    todos.refresh().await.unwrap();
    let item = todos.items()[0].clone();

    todos.begin_edit(&item).unwrap();

    assert!(todos.mode().is_edit());
    assert!(!todos.is_input_enabled());
    assert_eq!(todos.mode().target().map(|t| t.id()), Some(item.id.as_str()));
    assert!(!todos.set_input("ignored"));
    assert!(todos.submit_add().await.is_err());
    assert!(backend.calls_to(Method::Put, "/api/todo").is_empty());

    todos.cancel_edit();
    assert_eq!(todos.mode(), &EditMode::Create);
    assert!(todos.is_input_enabled());
    assert_eq!(todos.input(), "");
}

#[tokio::test]
async fn test_submit_edit_updates_and_returns_to_create() {
    let backend = InMemoryBackend::new().with_todos(vec![sample_todo("Draft report", 5)]);
    let mut todos = controller(&backend);
    todos.refresh().await.unwrap();
    let id = todos.items()[0].id.clone();

    todos.begin_edit_by_id(&id).unwrap();
    assert!(todos.set_draft("Final report"));
    todos.submit_edit().await.unwrap();

    assert_eq!(todos.mode(), &EditMode::Create);
    assert_eq!(todos.items()[0].todo_text, "Final report");
    assert_eq!(backend.todos()[0].todo_text, "Final report");
    assert_eq!(
        todos.notifier().last().map(|n| n.message.as_str()),
        Some("Todo updated successfully")
    );
}

#[tokio::test]
async fn test_failed_edit_stays_in_edit() {
    let backend = InMemoryBackend::new().with_todos(vec![sample_todo("Draft report", 5)]);
    let mut todos = controller(&backend);
    todos.refresh().await.unwrap();
    let item = todos.items()[0].clone();

    todos.begin_edit(&item).unwrap();
    todos.set_draft("Changed");
    backend.fail_with_status("/api/todo", 500);
    let result = todos.submit_edit().await;

    assert!(result.is_err());
    assert!(todos.mode().is_edit());
    assert_eq!(todos.mode().target().map(|t| t.draft()), Some("Changed"));
    assert_eq!(
        todos.notifier().last().map(|n| n.message.as_str()),
        Some("Edit failed")
    );
}

#[tokio::test]
async fn test_delete_refreshes_list() {
    let keep = sample_todo("keep", 10);
    let gone = sample_todo("drop", 5);
    let drop_id = gone.id.clone();
    let backend = InMemoryBackend::new().with_todos(vec![keep, gone]);
    let mut todos = controller(&backend);
    todos.refresh().await.unwrap();

    todos.delete(&drop_id).await.unwrap();

    let texts: Vec<&str> = todos.items().iter().map(|t| t.todo_text.as_str()).collect();
    assert_eq!(texts, vec!["keep"]);
    assert_eq!(backend.calls_to(Method::Delete, "/api/todo").len(), 1);
}

#[tokio::test]
async fn test_delete_rejected_while_editing() {
    let backend = InMemoryBackend::new().with_todos(vec![sample_todo("a", 5)]);
    let mut todos = controller(&backend);
    todos.refresh().await.unwrap();
    let item = todos.items()[0].clone();
    todos.begin_edit(&item).unwrap();

    let result = todos.delete(&item.id).await;

    assert!(matches!(result, Err(e) if e.kind() == ErrorKind::ValidationFailure));
    assert!(backend.calls_to(Method::Delete, "/api/todo").is_empty());
    assert_eq!(backend.todos().len(), 1);
}

#[tokio::test]
async fn test_list_timeout_keeps_previous_contents() {
    let backend = InMemoryBackend::new().with_todos(vec![sample_todo("cached", 5)]);
    let mut todos = controller(&backend);
    todos.refresh().await.unwrap();

    backend.set_delay("/api/todo", Duration::from_millis(600));
    let result = todos.refresh().await;

    assert!(matches!(result, Err(e) if e.is_timeout()));
    assert_eq!(todos.items().len(), 1);
    assert_eq!(todos.items()[0].todo_text, "cached");
    assert!(!todos.is_loading());

    let notice = todos.notifier().last().unwrap();
    assert_eq!(notice.level, NoticeLevel::Error);
    assert_eq!(notice.cause, Some(ErrorKind::Timeout));
    assert_eq!(notice.message, "Request timeout. Please try again.");
}

#[tokio::test]
async fn test_create_failure_keeps_input() {
    let backend = InMemoryBackend::new();
    let mut todos = controller(&backend);
    backend.fail_with_network_error("/api/todo");

    todos.set_input("Buy milk");
    assert!(todos.submit_add().await.is_err());

    assert_eq!(todos.input(), "Buy milk");
    assert_eq!(
        todos.notifier().last().map(|n| n.message.as_str()),
        Some("Submit failed")
    );
}
