use sqlx::{SqliteConnection, SqlitePool};

use crate::{
    domain::{EnergyReading, NewEnergyReading},
    error::Result,
};

/// Append one reading and return its row id.
pub async fn insert_reading(conn: &mut SqliteConnection, reading: &NewEnergyReading) -> Result<i64> {
    let result = sqlx::query(
        r#"
        INSERT INTO energy_reading (cafe_id, ts, kwh)
        VALUES (?, ?, ?)
        "#,
    )
    .bind(reading.cafe_id)
    .bind(reading.ts)
    .bind(reading.kwh)
    .execute(conn)
    .await?;

    Ok(result.last_insert_rowid())
}

/// All readings for a café, oldest first.
pub async fn readings_for_cafe(pool: &SqlitePool, cafe_id: i64) -> Result<Vec<EnergyReading>> {
    let rows = sqlx::query_as::<_, EnergyReading>(
        r#"
        SELECT id, cafe_id, ts, kwh
        FROM energy_reading
        WHERE cafe_id = ?
        ORDER BY ts, id
        "#,
    )
    .bind(cafe_id)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

pub async fn count_readings_for_cafe(pool: &SqlitePool, cafe_id: i64) -> Result<i64> {
    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM energy_reading WHERE cafe_id = ?")
        .bind(cafe_id)
        .fetch_one(pool)
        .await?;

    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{cafe_queries, tests::test_db};
    use time::macros::datetime;

    #[tokio::test]
    async fn readings_round_trip_in_timestamp_order() {
        let db = test_db().await;
        let mut conn = db.pool().acquire().await.unwrap();
        let (cafe, _) = cafe_queries::find_or_create(&mut conn, "Cafe A", "Loc").await.unwrap();

        for (ts, kwh) in [
            (datetime!(2025-01-01 09:00:00), 2.5),
            (datetime!(2025-01-01 08:00:00), 1.5),
        ] {
            insert_reading(&mut conn, &NewEnergyReading { cafe_id: cafe.id, ts, kwh })
                .await
                .unwrap();
        }
        drop(conn);

        let readings = readings_for_cafe(db.pool(), cafe.id).await.unwrap();
        assert_eq!(readings.len(), 2);
        assert_eq!(readings[0].ts, datetime!(2025-01-01 08:00:00));
        assert_eq!(readings[0].kwh, 1.5);
        assert_eq!(readings[1].ts, datetime!(2025-01-01 09:00:00));
        assert_eq!(count_readings_for_cafe(db.pool(), cafe.id).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn rolled_back_transaction_leaves_no_readings() {
        let db = test_db().await;
        let mut tx = db.pool().begin().await.unwrap();
        let (cafe, _) = cafe_queries::find_or_create(&mut tx, "Cafe A", "Loc").await.unwrap();
        insert_reading(
            &mut tx,
            &NewEnergyReading { cafe_id: cafe.id, ts: datetime!(2025-01-01 08:00:00), kwh: 1.0 },
        )
        .await
        .unwrap();
        tx.rollback().await.unwrap();

        assert!(readings_for_cafe(db.pool(), cafe.id).await.unwrap().is_empty());
        assert_eq!(cafe_queries::count_cafes(db.pool()).await.unwrap(), 0);
    }
}
