use time::PrimitiveDateTime;

/// A stored energy observation. Readings are append-only.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct EnergyReading {
    pub id: i64,
    pub cafe_id: i64,
    pub ts: PrimitiveDateTime,
    pub kwh: f64,
}

/// A reading that has not been written yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewEnergyReading {
    pub cafe_id: i64,
    pub ts: PrimitiveDateTime,
    pub kwh: f64,
}
