/// A café, identified by its (name, location) pair.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct CafeProfile {
    pub id: i64,
    pub name: String,
    pub location: String,
}
