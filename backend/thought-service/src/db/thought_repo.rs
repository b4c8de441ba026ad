use super::rows::ThoughtRow;
use crate::geo::BoundingBox;
use crate::models::{NewThought, Thought};
use sqlx::PgPool;

/// Insert a public thought and return it with its author
pub async fn create_thought(pool: &PgPool, new_thought: &NewThought) -> Result<Thought, sqlx::Error> {
    let row = sqlx::query_as::<_, ThoughtRow>(
        r#"
        WITH inserted AS (
            INSERT INTO thoughts (content, author_id, latitude, longitude, is_public)
            VALUES ($1, $2, $3, $4, TRUE)
            RETURNING id, content, author_id, latitude, longitude, is_public, created_at
        )
        SELECT i.id, i.content, i.author_id, i.latitude, i.longitude, i.is_public, i.created_at,
               u.username AS author_username, u.name AS author_name,
               u.is_guest AS author_is_guest, u.created_at AS author_created_at
        FROM inserted i
        JOIN users u ON u.id = i.author_id
        "#,
    )
    .bind(&new_thought.content)
    .bind(new_thought.author_id)
    .bind(new_thought.coordinates.latitude)
    .bind(new_thought.coordinates.longitude)
    .fetch_one(pool)
    .await?;

    Ok(row.into())
}

/// Newest public thoughts, used when the viewer shared no location
pub async fn find_recent_public(pool: &PgPool, limit: i64) -> Result<Vec<Thought>, sqlx::Error> {
    let rows = sqlx::query_as::<_, ThoughtRow>(
        r#"
        SELECT t.id, t.content, t.author_id, t.latitude, t.longitude, t.is_public, t.created_at,
               u.username AS author_username, u.name AS author_name,
               u.is_guest AS author_is_guest, u.created_at AS author_created_at
        FROM thoughts t
        JOIN users u ON u.id = t.author_id
        WHERE t.is_public
        ORDER BY t.created_at DESC
        LIMIT $1
        "#,
    )
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(Thought::from).collect())
}

/// Public thoughts inside the bounding box, nearest to its origin first.
///
/// Ordering uses the equirectangular approximation so the cap drops the
/// farthest rows; exact haversine ranking happens in the service.
pub async fn find_public_in_box(
    pool: &PgPool,
    bbox: &BoundingBox,
    cap: i64,
) -> Result<Vec<Thought>, sqlx::Error> {
    let rows = sqlx::query_as::<_, ThoughtRow>(
        r#"
        SELECT t.id, t.content, t.author_id, t.latitude, t.longitude, t.is_public, t.created_at,
               u.username AS author_username, u.name AS author_name,
               u.is_guest AS author_is_guest, u.created_at AS author_created_at
        FROM thoughts t
        JOIN users u ON u.id = t.author_id
        WHERE t.is_public
          AND t.latitude BETWEEN $1 AND $2
          AND (
              ($3 <= $4 AND t.longitude BETWEEN $3 AND $4)
              OR ($3 > $4 AND (t.longitude >= $3 OR t.longitude <= $4))
          )
        ORDER BY power(t.latitude - $5, 2)
                 + power(LEAST(abs(t.longitude - $6), 360 - abs(t.longitude - $6)) * $7, 2),
                 t.created_at DESC
        LIMIT $8
        "#,
    )
    .bind(bbox.min_latitude)
    .bind(bbox.max_latitude)
    .bind(bbox.min_longitude)
    .bind(bbox.max_longitude)
    .bind(bbox.origin.latitude)
    .bind(bbox.origin.longitude)
    .bind(bbox.longitude_scale())
    .bind(cap)
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(Thought::from).collect())
}
