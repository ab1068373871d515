//! Cache-aside helper for user reads.
//!
//! Every cache failure is logged and swallowed here: the cache is an
//! optimization and never turns a request into an error.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::contract::model::User;
use crate::domain::ports::CachePort;

pub fn user_cache_key(id: i32) -> String {
    format!("user:{id}")
}

/// Encoded form of a cached user
#[derive(Debug, Clone, Serialize, Deserialize)]
struct CachedUser {
    id: i32,
    name: String,
    surname: String,
    patronymic: Option<String>,
    age: u32,
    gender: String,
    nationality: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<&User> for CachedUser {
    fn from(u: &User) -> Self {
        Self {
            id: u.id,
            name: u.name.clone(),
            surname: u.surname.clone(),
            patronymic: u.patronymic.clone(),
            age: u.age,
            gender: u.gender.clone(),
            nationality: u.nationality.clone(),
            created_at: u.created_at,
            updated_at: u.updated_at,
        }
    }
}

impl From<CachedUser> for User {
    fn from(c: CachedUser) -> Self {
        Self {
            id: c.id,
            name: c.name,
            surname: c.surname,
            patronymic: c.patronymic,
            age: c.age,
            gender: c.gender,
            nationality: c.nationality,
            created_at: c.created_at,
            updated_at: c.updated_at,
        }
    }
}

/// Typed, failure-tolerant view over a [`CachePort`] for user records.
#[derive(Clone)]
pub struct UserCache {
    port: Arc<dyn CachePort>,
    ttl: Duration,
}

impl UserCache {
    pub fn new(port: Arc<dyn CachePort>, ttl: Duration) -> Self {
        Self { port, ttl }
    }

    /// `None` on miss, on an undecodable entry, or when the cache is down.
    pub async fn load(&self, id: i32) -> Option<User> {
        let key = user_cache_key(id);
        match self.port.get(&key).await {
            Ok(Some(bytes)) => match serde_json::from_slice::<CachedUser>(&bytes) {
                Ok(cached) => {
                    debug!(%key, "Cache hit");
                    Some(cached.into())
                }
                Err(e) => {
                    debug!(%key, error = %e, "Cached entry could not be decoded");
                    None
                }
            },
            Ok(None) => {
                debug!(%key, "Cache miss");
                None
            }
            Err(e) => {
                warn!(%key, error = %format!("{e:#}"), "Cache read failed");
                None
            }
        }
    }

    pub async fn store(&self, user: &User) {
        let key = user_cache_key(user.id);
        let bytes = match serde_json::to_vec(&CachedUser::from(user)) {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!(%key, error = %e, "Failed to encode user for cache");
                return;
            }
        };
        if let Err(e) = self.port.set(&key, bytes, self.ttl).await {
            warn!(%key, error = %format!("{e:#}"), "Cache write failed");
        }
    }

    pub async fn invalidate(&self, id: i32) {
        let key = user_cache_key(id);
        if let Err(e) = self.port.delete(&key).await {
            warn!(%key, error = %format!("{e:#}"), "Cache invalidation failed");
        }
    }
}
