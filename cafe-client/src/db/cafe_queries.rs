use sqlx::{SqliteConnection, SqlitePool};

use crate::{
    domain::CafeProfile,
    error::{DbError, Result},
};

pub async fn find_by_name_and_location(
    conn: &mut SqliteConnection,
    name: &str,
    location: &str,
) -> Result<Option<CafeProfile>> {
    let cafe = sqlx::query_as::<_, CafeProfile>(
        r#"
        SELECT id, name, location
        FROM cafe_profile
        WHERE name = ?
          AND location = ?
        "#,
    )
    .bind(name)
    .bind(location)
    .fetch_optional(conn)
    .await?;

    Ok(cafe)
}

/// Look up the café for `(name, location)`, creating it when missing.
///
/// The insert is a no-op when a concurrent writer created the same pair
/// first; the follow-up select then returns that row. The flag is `true`
/// only when this call created the profile.
pub async fn find_or_create(
    conn: &mut SqliteConnection,
    name: &str,
    location: &str,
) -> Result<(CafeProfile, bool)> {
    if let Some(existing) = find_by_name_and_location(&mut *conn, name, location).await? {
        return Ok((existing, false));
    }

    let inserted = sqlx::query(
        r#"
        INSERT INTO cafe_profile (name, location)
        VALUES (?, ?)
        ON CONFLICT (name, location) DO NOTHING
        "#,
    )
    .bind(name)
    .bind(location)
    .execute(&mut *conn)
    .await?
    .rows_affected();

    let cafe = find_by_name_and_location(&mut *conn, name, location)
        .await?
        .ok_or_else(|| DbError::Inconsistent {
            entity: "cafe_profile",
            key: format!("{name}@{location}"),
        })?;

    if inserted > 0 {
        tracing::info!(cafe_id = cafe.id, name, location, "created cafe profile");
    }

    Ok((cafe, inserted > 0))
}

pub async fn get_cafe(pool: &SqlitePool, id: i64) -> Result<Option<CafeProfile>> {
    let cafe = sqlx::query_as::<_, CafeProfile>(
        r#"
        SELECT id, name, location
        FROM cafe_profile
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(cafe)
}

pub async fn count_cafes(pool: &SqlitePool) -> Result<i64> {
    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM cafe_profile")
        .fetch_one(pool)
        .await?;

    Ok(count)
}
