use super::*;

#[tokio::test]
async fn stores_and_lists_users_in_insertion_order() {
    let storage = Storage::new("sqlite::memory:").await.expect("db");
    let tom = storage.insert_user("Tom", 35).await.expect("user");
    let alice = storage.insert_user("Alice", 29).await.expect("user");

    let users = storage.list_users().await.expect("user list");
    assert_eq!(users.len(), 2);
    assert_eq!(users[0].id, tom);
    assert_eq!(users[1].id, alice);
    assert_eq!(users[0].name, "Tom");
}

#[tokio::test]
async fn fetches_user_by_id_with_all_attributes() {
    let storage = Storage::new("sqlite::memory:").await.expect("db");
    let id = storage.insert_user("John", 32).await.expect("user");

    let user = storage.user_by_id(id).await.expect("lookup").expect("user");
    assert_eq!(user.id, id);
    assert_eq!(user.name, "John");
    assert_eq!(user.age, 32);
}

#[tokio::test]
async fn returns_none_for_unknown_user_id() {
    let storage = Storage::new("sqlite::memory:").await.expect("db");
    storage.insert_user("David", 35).await.expect("user");

    let missing = storage.user_by_id(UserId(999)).await.expect("lookup");
    assert!(missing.is_none());
}

#[tokio::test]
async fn health_check_succeeds_for_live_pool() {
    let storage = Storage::new("sqlite::memory:").await.expect("db");
    storage.health_check().await.expect("health check");
}

#[tokio::test]
async fn creates_database_file_when_missing() {
    let temp_root = tempfile::tempdir().expect("temp dir");
    let db_path = temp_root.path().join("nested").join("roster.db");
    let database_url = format!("sqlite://{}", db_path.to_string_lossy().replace('\\', "/"));

    let storage = Storage::new(&database_url).await.expect("db");
    drop(storage);

    assert!(
        db_path.exists(),
        "database file should exist: {}",
        db_path.display()
    );
}
