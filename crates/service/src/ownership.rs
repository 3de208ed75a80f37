//! Load-then-authorize guard for owned records.
//!
//! A record is looked up by id alone, then its owner is compared with the
//! caller. Absence and foreign ownership are reported as distinct errors, and
//! the caller performs the mutation only after this check passes.

use std::future::Future;

use uuid::Uuid;

use crate::errors::ServiceError;

#[derive(Debug, PartialEq)]
pub enum Ownership<T> {
    Owned(T),
    NotFound,
    Forbidden,
}

impl<T> Ownership<T> {
    /// Classify a looked-up record against `caller` using `owner_of`.
    pub fn check<F>(found: Option<T>, caller: Uuid, owner_of: F) -> Self
    where
        F: Fn(&T) -> Uuid,
    {
        match found {
            None => Ownership::NotFound,
            Some(record) if owner_of(&record) == caller => Ownership::Owned(record),
            Some(_) => Ownership::Forbidden,
        }
    }

    pub fn into_result(self, entity: &str, id: Uuid) -> Result<T, ServiceError> {
        match self {
            Ownership::Owned(record) => Ok(record),
            Ownership::NotFound => Err(ServiceError::NotFound(format!("{} not found: {}", entity, id))),
            Ownership::Forbidden => Err(ServiceError::Unauthorized(format!("this {} does not belong to you", entity))),
        }
    }
}

/// Await `load`, then require that `caller` owns the result.
pub async fn authorize_owner<T, F, Fut>(
    load: Fut,
    caller: Uuid,
    owner_of: F,
    entity: &str,
    id: Uuid,
) -> Result<T, ServiceError>
where
    Fut: Future<Output = Result<Option<T>, ServiceError>>,
    F: Fn(&T) -> Uuid,
{
    let found = load.await?;
    Ownership::check(found, caller, owner_of).into_result(entity, id)
}

/// A principal may act on its own account only.
pub fn ensure_self(caller: Uuid, target: Uuid, entity: &str) -> Result<(), ServiceError> {
    Ownership::check(Some(target), caller, |id| *id)
        .into_result(entity, target)
        .map(|_| ())
}
