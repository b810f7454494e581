//! Database tests for the login attempt ledger.

use kelvisan_db::repositories::LoginAttemptRepo;
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn counts_only_failures_for_exact_email(pool: PgPool) {
    for _ in 0..3 {
        LoginAttemptRepo::record(&pool, "a@x.com", false).await.unwrap();
    }
    LoginAttemptRepo::record(&pool, "a@x.com", true).await.unwrap();
    LoginAttemptRepo::record(&pool, "A@x.com", false).await.unwrap();
    LoginAttemptRepo::record(&pool, "b@x.com", false).await.unwrap();

    let count = LoginAttemptRepo::count_failed_since(&pool, "a@x.com", 15)
        .await
        .unwrap();
    assert_eq!(count, 3);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn attempts_outside_window_are_ignored(pool: PgPool) {
    LoginAttemptRepo::record(&pool, "old@x.com", false).await.unwrap();
    sqlx::query(
        "UPDATE login_attempts SET attempted_at = NOW() - INTERVAL '20 minutes'
         WHERE email = 'old@x.com'",
    )
    .execute(&pool)
    .await
    .unwrap();
    LoginAttemptRepo::record(&pool, "old@x.com", false).await.unwrap();

    let count = LoginAttemptRepo::count_failed_since(&pool, "old@x.com", 15)
        .await
        .unwrap();
    assert_eq!(count, 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn records_unknown_emails(pool: PgPool) {
    let attempt = LoginAttemptRepo::record(&pool, "ghost@x.com", false)
        .await
        .unwrap();
    assert_eq!(attempt.email, "ghost@x.com");
    assert!(!attempt.success);
}
