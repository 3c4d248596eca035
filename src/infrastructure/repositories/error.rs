use crate::domain::errors::DomainError;

/// SQLSTATE raised by the trigger guarding `audit_logs` against rewrites.
const SQLSTATE_APPEND_ONLY: &str = "23001";

pub fn map_sqlx(err: sqlx::Error) -> DomainError {
    match &err {
        sqlx::Error::Database(db_err) => {
            if db_err.code().as_deref() == Some(SQLSTATE_APPEND_ONLY) {
                return DomainError::Conflict("audit log entries are append-only".into());
            }
            DomainError::Persistence(db_err.message().to_string())
        }
        _ => DomainError::Persistence(err.to_string()),
    }
}
