use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::contract::model::{User, UserPatch, UsersFilter};

/// Fully-formed record handed to storage on create; storage assigns the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUserRecord {
    pub name: String,
    pub surname: String,
    pub patronymic: Option<String>,
    pub age: u32,
    pub gender: String,
    pub nationality: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Column-level changes for a sparse update. Only `Some` fields are written;
/// `updated_at` is always written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserChanges {
    pub name: Option<String>,
    pub surname: Option<String>,
    /// `Some(None)` clears the column
    pub patronymic: Option<Option<String>>,
    pub age: Option<u32>,
    pub gender: Option<String>,
    pub nationality: Option<String>,
    pub updated_at: DateTime<Utc>,
}

impl UserChanges {
    /// Translate an already-validated patch into column changes.
    pub fn from_patch(patch: UserPatch, updated_at: DateTime<Utc>) -> Self {
        Self {
            name: patch.name,
            surname: patch.surname,
            patronymic: patch
                .patronymic
                .map(|p| if p.is_empty() { None } else { Some(p) }),
            age: patch.age,
            gender: patch.gender,
            nationality: patch.nationality,
            updated_at,
        }
    }
}

/// Port for the domain layer: persistence operations the domain needs.
/// Object-safe and async-friendly via `async_trait`.
#[async_trait]
pub trait UsersRepository: Send + Sync {
    /// Load a user by id.
    async fn find_by_id(&self, id: i32) -> anyhow::Result<Option<User>>;
    /// Cheap existence probe by id.
    async fn exists_by_id(&self, id: i32) -> anyhow::Result<bool>;
    /// Exact match on the full (name, surname, patronymic) triple.
    async fn exists_by_full_name(
        &self,
        name: &str,
        surname: &str,
        patronymic: &str,
    ) -> anyhow::Result<bool>;
    /// Persist a new user and return it with the assigned id.
    async fn insert(&self, record: NewUserRecord) -> anyhow::Result<User>;
    /// Apply a sparse update. Returns false when no row has this id.
    async fn update_patch(&self, id: i32, changes: UserChanges) -> anyhow::Result<bool>;
    /// Delete by id. Returns true if a row was deleted.
    async fn delete(&self, id: i32) -> anyhow::Result<bool>;
    /// Fetch one page of matching rows and the total number of matching rows.
    ///
    /// Both reads see the same database state (one transaction).
    async fn list_page(
        &self,
        filter: &UsersFilter,
        limit: u64,
        offset: u64,
    ) -> anyhow::Result<(Vec<User>, u64)>;
}
