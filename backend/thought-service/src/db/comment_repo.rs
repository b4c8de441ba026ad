use super::rows::CommentRow;
use crate::models::Comment;
use sqlx::PgPool;
use std::collections::HashMap;
use uuid::Uuid;

/// Insert a comment only if its thought exists.
///
/// Returns `None` without touching the table when the thought is missing.
pub async fn create_comment(
    pool: &PgPool,
    thought_id: Uuid,
    author_id: Uuid,
    content: &str,
) -> Result<Option<Comment>, sqlx::Error> {
    let row = sqlx::query_as::<_, CommentRow>(
        r#"
        WITH inserted AS (
            INSERT INTO comments (thought_id, author_id, content)
            SELECT $1, $2, $3
            WHERE EXISTS (SELECT 1 FROM thoughts WHERE id = $1)
            RETURNING id, content, thought_id, author_id, created_at
        )
        SELECT i.id, i.content, i.thought_id, i.author_id, i.created_at,
               u.username AS author_username, u.name AS author_name,
               u.is_guest AS author_is_guest, u.created_at AS author_created_at
        FROM inserted i
        JOIN users u ON u.id = i.author_id
        "#,
    )
    .bind(thought_id)
    .bind(author_id)
    .bind(content)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(Comment::from))
}

/// All comments of a thought, oldest first
pub async fn find_by_thought(pool: &PgPool, thought_id: Uuid) -> Result<Vec<Comment>, sqlx::Error> {
    let rows = sqlx::query_as::<_, CommentRow>(
        r#"
        SELECT c.id, c.content, c.thought_id, c.author_id, c.created_at,
               u.username AS author_username, u.name AS author_name,
               u.is_guest AS author_is_guest, u.created_at AS author_created_at
        FROM comments c
        JOIN users u ON u.id = c.author_id
        WHERE c.thought_id = $1
        ORDER BY c.created_at ASC, c.id ASC
        "#,
    )
    .bind(thought_id)
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(Comment::from).collect())
}

/// Newest `per_thought` comments for each of the given thoughts, in one query
pub async fn find_latest_for_thoughts(
    pool: &PgPool,
    thought_ids: &[Uuid],
    per_thought: i64,
) -> Result<Vec<Comment>, sqlx::Error> {
    if thought_ids.is_empty() || per_thought <= 0 {
        return Ok(Vec::new());
    }

    let rows = sqlx::query_as::<_, CommentRow>(
        r#"
        SELECT c.id, c.content, c.thought_id, c.author_id, c.created_at,
               u.username AS author_username, u.name AS author_name,
               u.is_guest AS author_is_guest, u.created_at AS author_created_at
        FROM (
            SELECT id, content, thought_id, author_id, created_at,
                   ROW_NUMBER() OVER (
                       PARTITION BY thought_id ORDER BY created_at DESC, id DESC
                   ) AS rn
            FROM comments
            WHERE thought_id = ANY($1)
        ) c
        JOIN users u ON u.id = c.author_id
        WHERE c.rn <= $2
        ORDER BY c.thought_id, c.created_at DESC, c.id DESC
        "#,
    )
    .bind(thought_ids)
    .bind(per_thought)
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(Comment::from).collect())
}

/// Comment totals keyed by thought ID
pub async fn count_for_thoughts(
    pool: &PgPool,
    thought_ids: &[Uuid],
) -> Result<HashMap<Uuid, i64>, sqlx::Error> {
    if thought_ids.is_empty() {
        return Ok(HashMap::new());
    }

    let rows = sqlx::query_as::<_, (Uuid, i64)>(
        r#"
        SELECT thought_id, COUNT(*) AS count
        FROM comments
        WHERE thought_id = ANY($1)
        GROUP BY thought_id
        "#,
    )
    .bind(thought_ids)
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().collect())
}
