//! Store behavior against an in-memory database.

use back::migration::{Migrator, MigratorTrait};
use back::store::{StoreError, TodoStore};
use sea_orm::Database;
use tally_api::v1::TodoDraft;
use uuid::Uuid;

async fn memory_store() -> TodoStore {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    Migrator::up(&db, None).await.unwrap();
    TodoStore::new(db)
}

fn draft(title: &str, description: &str) -> TodoDraft {
    TodoDraft {
        title: title.into(),
        description: description.into(),
    }
}

fn valid(title: &str) -> TodoDraft {
    draft(title, "a description long enough to pass")
}

#[tokio::test]
async fn create_assigns_id_and_defaults_completed_to_false() {
    let store = memory_store().await;

    let todo = store.create(valid("Water plants")).await.unwrap();

    assert!(!todo.completed);
    assert_eq!(todo.title, "Water plants");
}

#[tokio::test]
async fn create_then_find_round_trips() {
    let store = memory_store().await;

    let created = store.create(valid("Water plants")).await.unwrap();
    let found = store.find_by_id(created.id).await.unwrap();

    assert_eq!(found.title, created.title);
    assert_eq!(found.description, created.description);
    assert_eq!(found.completed, created.completed);
}

#[tokio::test]
async fn list_is_creation_order() {
    let store = memory_store().await;

    let first = store.create(valid("First thing")).await.unwrap();
    let second = store.create(valid("Second thing")).await.unwrap();
    let third = store.create(valid("Third thing")).await.unwrap();

    let ids: Vec<_> = store
        .list_all()
        .await
        .unwrap()
        .into_iter()
        .map(|todo| todo.id)
        .collect();

    assert_eq!(ids, [first.id, second.id, third.id]);
}

#[tokio::test]
async fn update_fields_leaves_completed_alone() {
    let store = memory_store().await;

    let created = store.create(valid("Water plants")).await.unwrap();
    let toggled = store.toggle_completed(created.id).await.unwrap();
    assert!(toggled.completed);

    let updated = store
        .update_fields(created.id, valid("Water plants today"))
        .await
        .unwrap();

    assert_eq!(updated.title, "Water plants today");
    assert!(updated.completed);
    assert_eq!(updated.id, created.id);
}

#[tokio::test]
async fn toggle_twice_restores_the_original_value() {
    let store = memory_store().await;

    let created = store.create(valid("Water plants")).await.unwrap();

    let once = store.toggle_completed(created.id).await.unwrap();
    assert!(once.completed);

    let twice = store.toggle_completed(created.id).await.unwrap();
    assert!(!twice.completed);
}

#[tokio::test]
async fn missing_ids_are_not_found() {
    let store = memory_store().await;
    let id = Uuid::new_v4();

    assert!(matches!(
        store.find_by_id(id).await,
        Err(StoreError::NotFound(missing)) if missing == id
    ));
    assert!(matches!(
        store.update_fields(id, valid("Water plants")).await,
        Err(StoreError::NotFound(_))
    ));
    assert!(matches!(
        store.toggle_completed(id).await,
        Err(StoreError::NotFound(_))
    ));
    assert!(matches!(
        store.delete(id).await,
        Err(StoreError::NotFound(_))
    ));
}

#[tokio::test]
async fn delete_then_find_fails_and_so_does_a_second_delete() {
    let store = memory_store().await;

    let created = store.create(valid("Water plants")).await.unwrap();

    store.delete(created.id).await.unwrap();

    assert!(matches!(
        store.find_by_id(created.id).await,
        Err(StoreError::NotFound(_))
    ));
    assert!(matches!(
        store.delete(created.id).await,
        Err(StoreError::NotFound(_))
    ));
}
