use checklist_core::ordering::OrderingError;

/// Failure of a repository operation that plans step indices.
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    #[error(transparent)]
    Database(#[from] sqlx::Error),

    #[error(transparent)]
    Ordering(#[from] OrderingError),
}
