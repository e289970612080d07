/// All database primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Shot rows are keyed by client-generated UUIDs so batch expansion can
/// assign ids before anything is written.
pub type RowId = uuid::Uuid;
