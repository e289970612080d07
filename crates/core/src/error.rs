use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Shot row not found: {0}")]
    RowNotFound(crate::types::RowId),

    #[error("Validation failed: {0}")]
    Validation(String),
}
