//! Hand-written port doubles shared by the integration tests.
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{TimeZone, Utc};

use user_directory::contract::model::{User, UsersFilter};
use user_directory::domain::error::DomainError;
use user_directory::domain::ports::{CachePort, Enrichment, EnrichmentPort};
use user_directory::domain::repo::{NewUserRecord, UserChanges, UsersRepository};
use user_directory::domain::service::{Service, ServiceConfig};

pub fn user(id: i32, name: &str, surname: &str, patronymic: Option<&str>) -> User {
    let at = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
    User {
        id,
        name: name.to_string(),
        surname: surname.to_string(),
        patronymic: patronymic.map(str::to_string),
        age: 40,
        gender: "male".to_string(),
        nationality: "RU".to_string(),
        created_at: at,
        updated_at: at,
    }
}

#[derive(Default)]
pub struct MockRepo {
    pub users: Mutex<Vec<User>>,
    pub find_calls: AtomicUsize,
    pub insert_calls: AtomicUsize,
    pub full_name_calls: AtomicUsize,
}

impl MockRepo {
    pub fn with_users(users: Vec<User>) -> Self {
        Self {
            users: Mutex::new(users),
            ..Default::default()
        }
    }

    pub fn snapshot(&self, id: i32) -> Option<User> {
        self.users.lock().unwrap().iter().find(|u| u.id == id).cloned()
    }
}

#[async_trait]
impl UsersRepository for MockRepo {
    async fn find_by_id(&self, id: i32) -> anyhow::Result<Option<User>> {
        self.find_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.snapshot(id))
    }

    async fn exists_by_id(&self, id: i32) -> anyhow::Result<bool> {
        Ok(self.snapshot(id).is_some())
    }

    async fn exists_by_full_name(
        &self,
        name: &str,
        surname: &str,
        patronymic: &str,
    ) -> anyhow::Result<bool> {
        self.full_name_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.users.lock().unwrap().iter().any(|u| {
            u.name == name && u.surname == surname && u.patronymic.as_deref() == Some(patronymic)
        }))
    }

    async fn insert(&self, r: NewUserRecord) -> anyhow::Result<User> {
        self.insert_calls.fetch_add(1, Ordering::SeqCst);
        let mut users = self.users.lock().unwrap();
        let id = users.iter().map(|u| u.id).max().unwrap_or(0) + 1;
        let u = User {
            id,
            name: r.name,
            surname: r.surname,
            patronymic: r.patronymic,
            age: r.age,
            gender: r.gender,
            nationality: r.nationality,
            created_at: r.created_at,
            updated_at: r.updated_at,
        };
        users.push(u.clone());
        Ok(u)
    }

    async fn update_patch(&self, id: i32, c: UserChanges) -> anyhow::Result<bool> {
        let mut users = self.users.lock().unwrap();
        let Some(u) = users.iter_mut().find(|u| u.id == id) else {
            return Ok(false);
        };
        if let Some(v) = c.name {
            u.name = v;
        }
        if let Some(v) = c.surname {
            u.surname = v;
        }
        if let Some(v) = c.patronymic {
            u.patronymic = v;
        }
        if let Some(v) = c.age {
            u.age = v;
        }
        if let Some(v) = c.gender {
            u.gender = v;
        }
        if let Some(v) = c.nationality {
            u.nationality = v;
        }
        u.updated_at = c.updated_at;
        Ok(true)
    }

    async fn delete(&self, id: i32) -> anyhow::Result<bool> {
        let mut users = self.users.lock().unwrap();
        let before = users.len();
        users.retain(|u| u.id != id);
        Ok(users.len() < before)
    }

    async fn list_page(
        &self,
        filter: &UsersFilter,
        limit: u64,
        offset: u64,
    ) -> anyhow::Result<(Vec<User>, u64)> {
        let contains = |hay: Option<&str>, needle: &Option<String>| match needle {
            Some(n) => hay
                .map(|h| h.to_lowercase().contains(&n.to_lowercase()))
                .unwrap_or(false),
            None => true,
        };
        let matching: Vec<User> = self
            .users
            .lock()
            .unwrap()
            .iter()
            .filter(|u| {
                contains(Some(u.name.as_str()), &filter.name)
                    && contains(Some(u.surname.as_str()), &filter.surname)
                    && contains(u.patronymic.as_deref(), &filter.patronymic)
                    && filter.gender.map_or(true, |g| u.gender == g.as_str())
            })
            .cloned()
            .collect();
        let total = matching.len() as u64;
        let page = matching
            .into_iter()
            .skip(offset as usize)
            .take(limit as usize)
            .collect();
        Ok((page, total))
    }
}

/// Cache double that remembers the TTL of each write.
#[derive(Default)]
pub struct RecordingCache {
    pub entries: Mutex<HashMap<String, (Vec<u8>, Duration)>>,
    pub gets: AtomicUsize,
    pub deletes: Mutex<Vec<String>>,
}

impl RecordingCache {
    pub fn ttl_of(&self, key: &str) -> Option<Duration> {
        self.entries.lock().unwrap().get(key).map(|(_, ttl)| *ttl)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.lock().unwrap().contains_key(key)
    }
}

#[async_trait]
impl CachePort for RecordingCache {
    async fn get(&self, key: &str) -> anyhow::Result<Option<Vec<u8>>> {
        self.gets.fetch_add(1, Ordering::SeqCst);
        Ok(self
            .entries
            .lock()
            .unwrap()
            .get(key)
            .map(|(bytes, _)| bytes.clone()))
    }

    async fn set(&self, key: &str, value: Vec<u8>, ttl: Duration) -> anyhow::Result<()> {
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), (value, ttl));
        Ok(())
    }

    async fn delete(&self, key: &str) -> anyhow::Result<()> {
        self.entries.lock().unwrap().remove(key);
        self.deletes.lock().unwrap().push(key.to_string());
        Ok(())
    }
}

/// Enrichment double: fixed answer or fixed failure, counting calls.
pub struct StubEnrichment {
    pub result: Result<Enrichment, String>,
    pub calls: AtomicUsize,
}

impl StubEnrichment {
    pub fn ok(age: u32, gender: &str, nationality: &str) -> Self {
        Self {
            result: Ok(Enrichment {
                age,
                gender: gender.to_string(),
                nationality: nationality.to_string(),
            }),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            result: Err(message.to_string()),
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl EnrichmentPort for StubEnrichment {
    async fn request_additional_info(&self, _name: &str) -> Result<Enrichment, DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.result.clone().map_err(DomainError::upstream)
    }
}

pub struct Harness {
    pub repo: Arc<MockRepo>,
    pub cache: Arc<RecordingCache>,
    pub enrichment: Arc<StubEnrichment>,
    pub service: Service,
}

pub fn harness(users: Vec<User>, enrichment: StubEnrichment) -> Harness {
    let repo = Arc::new(MockRepo::with_users(users));
    let cache = Arc::new(RecordingCache::default());
    let enrichment = Arc::new(enrichment);
    let service = Service::new(
        repo.clone(),
        cache.clone(),
        enrichment.clone(),
        ServiceConfig::default(),
    );
    Harness {
        repo,
        cache,
        enrichment,
        service,
    }
}
