use entity::ValidationError;
use entity::employee_draft::DraftStatus;
use sea_orm::DbErr;
use thiserror::Error;
use uuid::Uuid;

pub type HrResult<T> = Result<T, HrError>;

#[derive(Debug, Error)]
pub enum HrError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("{entity} {key} not found")]
    NotFound { entity: &'static str, key: String },
    #[error("user {0} is not staff")]
    NotStaff(Uuid),
    #[error("user {0} already has an employee record")]
    AlreadyProvisioned(Uuid),
    #[error("employee {manager_id} cannot manage {employee_id}: reporting line would loop")]
    ManagerCycle { employee_id: Uuid, manager_id: Uuid },
    #[error("draft {id} cannot move from {from:?} to {to:?}")]
    InvalidTransition {
        id: Uuid,
        from: DraftStatus,
        to: DraftStatus,
    },
    #[error("draft {0} has already been decided")]
    DraftNotEditable(Uuid),
    #[error("malformed news feed: {0}")]
    Feed(#[from] serde_json::Error),
    #[error("database error: {0}")]
    Db(#[from] DbErr),
}

impl HrError {
    pub(crate) fn not_found(entity: &'static str, key: impl ToString) -> Self {
        HrError::NotFound {
            entity,
            key: key.to_string(),
        }
    }

    /// True for failures caused by caller input rather than the store.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, HrError::Db(_))
    }
}
