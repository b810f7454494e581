//! Database tests for the admin credential store.

use assert_matches::assert_matches;
use kelvisan_db::models::admin::CreateAdmin;
use kelvisan_db::repositories::{AdminRepo, CreateAdminError};
use sqlx::PgPool;

const CEILING: i64 = 4;

fn new_admin(email: &str) -> CreateAdmin {
    CreateAdmin {
        email: email.to_string(),
        password_hash: "$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA".to_string(),
        role: "admin".to_string(),
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_and_find(pool: PgPool) {
    let created = AdminRepo::create(&pool, &new_admin("a@x.com"), CEILING)
        .await
        .expect("create should succeed");
    assert_eq!(created.role, "admin");

    let by_email = AdminRepo::find_by_email(&pool, "a@x.com").await.unwrap();
    assert_eq!(by_email.map(|a| a.id), Some(created.id));

    let by_id = AdminRepo::find_by_id(&pool, created.id).await.unwrap();
    assert_eq!(by_id.map(|a| a.email), Some("a@x.com".to_string()));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn find_by_email_is_case_sensitive(pool: PgPool) {
    AdminRepo::create(&pool, &new_admin("a@x.com"), CEILING)
        .await
        .unwrap();

    let found = AdminRepo::find_by_email(&pool, "A@X.COM").await.unwrap();
    assert!(found.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn duplicate_email_is_tagged(pool: PgPool) {
    AdminRepo::create(&pool, &new_admin("dup@x.com"), CEILING)
        .await
        .unwrap();

    let result = AdminRepo::create(&pool, &new_admin("dup@x.com"), CEILING).await;
    assert_matches!(result, Err(CreateAdminError::DuplicateEmail));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn ceiling_is_enforced(pool: PgPool) {
    for i in 0..CEILING {
        AdminRepo::create(&pool, &new_admin(&format!("admin{i}@x.com")), CEILING)
            .await
            .expect("admins below the ceiling should be created");
    }

    let result = AdminRepo::create(&pool, &new_admin("extra@x.com"), CEILING).await;
    assert_matches!(result, Err(CreateAdminError::LimitExceeded { ceiling: 4 }));
    assert_eq!(AdminRepo::count(&pool).await.unwrap(), CEILING);
}

/// Many registrations racing for the last slots never overshoot the ceiling.
#[sqlx::test(migrations = "../../db/migrations")]
async fn concurrent_creates_respect_ceiling(pool: PgPool) {
    let handles: Vec<_> = (0..10)
        .map(|i| {
            let pool = pool.clone();
            tokio::spawn(async move {
                AdminRepo::create(&pool, &new_admin(&format!("racer{i}@x.com")), CEILING).await
            })
        })
        .collect();

    let mut created = 0;
    let mut limited = 0;
    for handle in handles {
        match handle.await.expect("task should not panic") {
            Ok(_) => created += 1,
            Err(CreateAdminError::LimitExceeded { .. }) => limited += 1,
            Err(other) => panic!("unexpected error: {other}"),
        }
    }

    assert_eq!(created, CEILING);
    assert_eq!(limited, 10 - CEILING);
    assert_eq!(AdminRepo::count(&pool).await.unwrap(), CEILING);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn update_password_bumps_updated_at(pool: PgPool) {
    let admin = AdminRepo::create(&pool, &new_admin("pw@x.com"), CEILING)
        .await
        .unwrap();

    let updated = AdminRepo::update_password(&pool, admin.id, "new-hash")
        .await
        .unwrap()
        .expect("admin should exist");
    assert_eq!(updated.password_hash, "new-hash");
    assert!(updated.updated_at >= admin.updated_at);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn update_password_for_missing_admin_returns_none(pool: PgPool) {
    let result = AdminRepo::update_password(&pool, uuid::Uuid::new_v4(), "hash")
        .await
        .unwrap();
    assert!(result.is_none());
}
