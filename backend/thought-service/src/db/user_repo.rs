use crate::models::Author;
use sqlx::PgPool;
use uuid::Uuid;

/// Find an author by ID
pub async fn find_author_by_id(pool: &PgPool, author_id: Uuid) -> Result<Option<Author>, sqlx::Error> {
    sqlx::query_as::<_, Author>(
        r#"
        SELECT id, username, name, is_guest, created_at
        FROM users
        WHERE id = $1
        "#,
    )
    .bind(author_id)
    .fetch_optional(pool)
    .await
}

/// Insert a guest named after its username.
/// Returns `None` when the username is taken (guest or registered).
pub async fn insert_guest(pool: &PgPool, username: &str) -> Result<Option<Author>, sqlx::Error> {
    sqlx::query_as::<_, Author>(
        r#"
        INSERT INTO users (username, name, is_guest)
        VALUES ($1, $1, TRUE)
        ON CONFLICT (username) DO NOTHING
        RETURNING id, username, name, is_guest, created_at
        "#,
    )
    .bind(username)
    .fetch_optional(pool)
    .await
}

/// Atomic guest find-or-create.
///
/// The no-op `DO UPDATE` makes Postgres return the existing row; the `WHERE`
/// keeps registered users out, in which case no row comes back.
pub async fn upsert_guest(pool: &PgPool, username: &str) -> Result<Option<Author>, sqlx::Error> {
    sqlx::query_as::<_, Author>(
        r#"
        INSERT INTO users (username, is_guest)
        VALUES ($1, TRUE)
        ON CONFLICT (username) DO UPDATE
            SET username = EXCLUDED.username
            WHERE users.is_guest
        RETURNING id, username, name, is_guest, created_at
        "#,
    )
    .bind(username)
    .fetch_optional(pool)
    .await
}
