use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use models::address::{self, AddressChanges, NewAddress};
use models::user::{self, UserChanges};

use crate::addresses::domain::AddressFilter;
use crate::addresses::repository::AddressRepository;
use crate::errors::ServiceError;
use crate::pagination::Pagination;
use crate::users::domain::UserWithAddresses;
use crate::users::repository::UserRepository;

#[derive(Default)]
struct Tables {
    users: Vec<user::Model>,
    addresses: Vec<address::Model>,
}

/// In-memory implementation of both repositories.
///
/// Rows are kept in insertion order. Email uniqueness, the address owner
/// foreign key and the delete cascade behave as the Postgres schema does.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<RwLock<Tables>>,
}

fn now() -> chrono::DateTime<chrono::FixedOffset> {
    Utc::now().into()
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn find_with_addresses(&self, id: Uuid) -> Result<Option<UserWithAddresses>, ServiceError> {
        let t = self.inner.read().await;
        Ok(t.users.iter().find(|u| u.id == id).map(|u| UserWithAddresses {
            user: u.clone(),
            addresses: t.addresses.iter().filter(|a| a.user_id == id).cloned().collect(),
        }))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<user::Model>, ServiceError> {
        let t = self.inner.read().await;
        Ok(t.users.iter().find(|u| u.email == email).cloned())
    }

    async fn list(&self, page: Pagination) -> Result<Vec<user::Model>, ServiceError> {
        let (offset, limit) = page.offset_limit();
        let t = self.inner.read().await;
        Ok(t.users.iter().skip(offset).take(limit).cloned().collect())
    }

    async fn insert(&self, email: &str, password_hash: Option<String>) -> Result<user::Model, ServiceError> {
        if email.trim().is_empty() {
            return Err(ServiceError::Validation("email required".into()));
        }
        let mut t = self.inner.write().await;
        if t.users.iter().any(|u| u.email == email) {
            return Err(ServiceError::Conflict("email already registered".into()));
        }
        let ts = now();
        let m = user::Model {
            id: Uuid::new_v4(),
            email: email.to_string(),
            password: password_hash,
            created_at: ts,
            updated_at: ts,
        };
        t.users.push(m.clone());
        Ok(m)
    }

    async fn update(&self, id: Uuid, changes: UserChanges) -> Result<u64, ServiceError> {
        let mut t = self.inner.write().await;
        if let Some(email) = &changes.email {
            if t.users.iter().any(|u| &u.email == email && u.id != id) {
                return Err(ServiceError::Conflict("email already registered".into()));
            }
        }
        let Some(u) = t.users.iter_mut().find(|u| u.id == id) else { return Ok(0) };
        if let Some(email) = changes.email { u.email = email; }
        if let Some(hash) = changes.password_hash { u.password = Some(hash); }
        u.updated_at = now();
        Ok(1)
    }

    async fn delete(&self, id: Uuid) -> Result<u64, ServiceError> {
        let mut t = self.inner.write().await;
        let before = t.users.len();
        t.users.retain(|u| u.id != id);
        let removed = (before - t.users.len()) as u64;
        if removed > 0 {
            t.addresses.retain(|a| a.user_id != id);
        }
        Ok(removed)
    }
}

#[async_trait]
impl AddressRepository for MemoryStore {
    async fn insert(&self, user_id: Uuid, new: NewAddress) -> Result<address::Model, ServiceError> {
        if new.alias.trim().is_empty() {
            return Err(ServiceError::Validation("alias required".into()));
        }
        let mut t = self.inner.write().await;
        if !t.users.iter().any(|u| u.id == user_id) {
            return Err(ServiceError::not_found("user"));
        }
        let ts = now();
        let m = address::Model {
            id: Uuid::new_v4(),
            alias: new.alias,
            address: new.address,
            number: new.number,
            cep: new.cep,
            city: new.city,
            state: new.state,
            country: new.country,
            user_id,
            created_at: ts,
            updated_at: ts,
        };
        t.addresses.push(m.clone());
        Ok(m)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<address::Model>, ServiceError> {
        let t = self.inner.read().await;
        Ok(t.addresses.iter().find(|a| a.id == id).cloned())
    }

    async fn find_owned(&self, user_id: Uuid, filter: &AddressFilter) -> Result<Vec<address::Model>, ServiceError> {
        let t = self.inner.read().await;
        Ok(t
            .addresses
            .iter()
            .filter(|a| a.user_id == user_id && filter.matches(a))
            .cloned()
            .collect())
    }

    async fn update_owned(&self, id: Uuid, user_id: Uuid, changes: AddressChanges) -> Result<u64, ServiceError> {
        let mut t = self.inner.write().await;
        let Some(a) = t.addresses.iter_mut().find(|a| a.id == id && a.user_id == user_id) else { return Ok(0) };
        changes.apply_to(a);
        a.updated_at = now();
        Ok(1)
    }

    async fn delete_owned(&self, id: Uuid, user_id: Uuid) -> Result<u64, ServiceError> {
        let mut t = self.inner.write().await;
        let before = t.addresses.len();
        t.addresses.retain(|a| !(a.id == id && a.user_id == user_id));
        Ok((before - t.addresses.len()) as u64)
    }
}
