use sqlx::SqlitePool;
use weekly_db::models::project::{ProjectFields, ProjectInput};
use weekly_db::repositories::ProjectRepo;

fn fields(name: &str) -> ProjectFields {
    ProjectInput {
        name: Some(name.to_string()),
        client: Some("ACME".to_string()),
        ..Default::default()
    }
    .validate()
    .unwrap()
}

#[sqlx::test(migrations = "./migrations")]
async fn create_then_find(pool: SqlitePool) {
    let created = ProjectRepo::create(&pool, &fields("Alpha")).await.unwrap();
    assert!(!created.id.is_empty());
    assert_eq!(created.client, "ACME");
    assert_eq!(created.code, "");

    let found = ProjectRepo::find_by_id(&pool, &created.id).await.unwrap();
    assert_eq!(found, Some(created));
}

#[sqlx::test(migrations = "./migrations")]
async fn list_is_newest_first(pool: SqlitePool) {
    ProjectRepo::create(&pool, &fields("First")).await.unwrap();
    ProjectRepo::create(&pool, &fields("Second")).await.unwrap();

    let names: Vec<_> = ProjectRepo::list(&pool)
        .await
        .unwrap()
        .into_iter()
        .map(|p| p.name)
        .collect();
    assert_eq!(names, ["Second", "First"]);
}

#[sqlx::test(migrations = "./migrations")]
async fn update_and_delete_report_missing_rows(pool: SqlitePool) {
    let created = ProjectRepo::create(&pool, &fields("Alpha")).await.unwrap();

    let updated = ProjectRepo::update(&pool, &created.id, &fields("Beta"))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.name, "Beta");
    assert_eq!(updated.created_at, created.created_at);

    assert!(ProjectRepo::update(&pool, "missing", &fields("X")).await.unwrap().is_none());
    assert!(ProjectRepo::delete(&pool, &created.id).await.unwrap());
    assert!(!ProjectRepo::delete(&pool, &created.id).await.unwrap());
}

#[sqlx::test(migrations = "./migrations")]
async fn insert_if_absent_keeps_existing_rows(pool: SqlitePool) {
    let created = ProjectRepo::create(&pool, &fields("Alpha")).await.unwrap();

    let mut incoming = created.clone();
    incoming.name = "Renamed".to_string();
    let mut conn = pool.acquire().await.unwrap();
    assert!(!ProjectRepo::insert_if_absent(&mut *conn, &incoming).await.unwrap());

    incoming.id = "fresh".to_string();
    assert!(ProjectRepo::insert_if_absent(&mut *conn, &incoming).await.unwrap());
    drop(conn);

    let kept = ProjectRepo::find_by_id(&pool, &created.id).await.unwrap().unwrap();
    assert_eq!(kept.name, "Alpha");
    assert_eq!(ProjectRepo::list(&pool).await.unwrap().len(), 2);
}

#[sqlx::test(migrations = false)]
async fn list_external_tolerates_older_schemas(pool: SqlitePool) {
    sqlx::query(
        "CREATE TABLE projects (id TEXT PRIMARY KEY, name TEXT, client TEXT, pm TEXT, \
         period TEXT, created_at TEXT)",
    )
    .execute(&pool)
    .await
    .unwrap();
    sqlx::query(
        "INSERT INTO projects (id, name, client, pm, period, created_at) VALUES \
         ('p1', 'Alpha', NULL, 'Kim', '2024', '2024-05-01 10:00:00'), \
         ('p2', NULL, NULL, NULL, NULL, NULL)",
    )
    .execute(&pool)
    .await
    .unwrap();

    let projects = ProjectRepo::list_external(&pool).await.unwrap();
    assert_eq!(projects.len(), 1);
    assert_eq!(projects[0].id, "p1");
    assert_eq!(projects[0].client, "");
    assert_eq!(projects[0].code, "");
    assert_eq!(projects[0].pm, "Kim");
}

#[sqlx::test(migrations = "./migrations")]
async fn insert_missing_counts_only_new_rows(pool: SqlitePool) {
    let existing = ProjectRepo::create(&pool, &fields("Alpha")).await.unwrap();
    let mut fresh = existing.clone();
    fresh.id = "fresh".to_string();
    fresh.name = "Beta".to_string();

    let inserted = ProjectRepo::insert_missing(&pool, &[existing, fresh]).await.unwrap();
    assert_eq!(inserted, 1);
    assert_eq!(ProjectRepo::list(&pool).await.unwrap().len(), 2);
}
