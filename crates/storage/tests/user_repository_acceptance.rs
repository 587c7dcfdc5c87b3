use std::sync::Arc;

use shared::domain::{NewUser, UserId};
use storage::{Storage, UserRepository};

#[tokio::test]
async fn repository_capability_round_trips_users_through_trait_object() {
    let storage = Storage::new("sqlite::memory:").await.expect("db");
    let repo: Arc<dyn UserRepository> = Arc::new(storage);

    repo.create(NewUser {
        name: "Tom".to_string(),
        age: 35,
    })
    .await
    .expect("create tom");
    repo.create(NewUser {
        name: "Alice".to_string(),
        age: 29,
    })
    .await
    .expect("create alice");

    let users = repo.get_all().await.expect("list");
    assert_eq!(users.len(), 2);
    assert_eq!(users[0].name, "Tom");
    assert_eq!(users[1].name, "Alice");

    let tom = repo
        .get(users[0].id)
        .await
        .expect("lookup")
        .expect("tom present");
    assert_eq!(tom.age, 35);

    let missing = repo.get(UserId(999)).await.expect("lookup");
    assert!(missing.is_none());
}
