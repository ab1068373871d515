use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tracing::{debug, info, instrument};

use crate::contract::model::{Gender, NewUser, User, UserPatch, UsersPage, UsersQuery};
use crate::domain::cache::UserCache;
use crate::domain::error::DomainError;
use crate::domain::pagination::{check_page_bounds, PageLimits, PageRequest};
use crate::domain::ports::{CachePort, EnrichmentPort};
use crate::domain::repo::{NewUserRecord, UserChanges, UsersRepository};

/// Domain service with the business rules for the user directory.
/// Depends only on ports, not on infra types.
#[derive(Clone)]
pub struct Service {
    repo: Arc<dyn UsersRepository>,
    cache: UserCache,
    enrichment: Arc<dyn EnrichmentPort>,
    config: ServiceConfig,
}

/// Configuration for the domain service
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub page_limits: PageLimits,
    pub cache_ttl: Duration,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            page_limits: PageLimits::default(),
            cache_ttl: Duration::from_secs(15),
        }
    }
}

impl Service {
    /// Create a service with dependencies.
    pub fn new(
        repo: Arc<dyn UsersRepository>,
        cache: Arc<dyn CachePort>,
        enrichment: Arc<dyn EnrichmentPort>,
        config: ServiceConfig,
    ) -> Self {
        Self {
            repo,
            cache: UserCache::new(cache, config.cache_ttl),
            enrichment,
            config,
        }
    }

    #[instrument(name = "user_directory.service.get_user", skip(self), fields(user_id = id))]
    pub async fn get_user(&self, id: i32) -> Result<User, DomainError> {
        if let Some(user) = self.cache.load(id).await {
            return Ok(user);
        }

        let user = self
            .repo
            .find_by_id(id)
            .await
            .map_err(|e| DomainError::database(format!("{e:#}")))?
            .ok_or_else(|| DomainError::user_not_found(id))?;

        self.cache.store(&user).await;
        debug!("Successfully retrieved user from storage");
        Ok(user)
    }

    /// List users matching the filter, one page at a time.
    #[instrument(name = "user_directory.service.list_users", skip(self, query))]
    pub async fn list_users(&self, query: UsersQuery) -> Result<UsersPage, DomainError> {
        let req = PageRequest::normalize(query.page, query.page_size, &self.config.page_limits);
        debug!(
            page = req.page,
            page_size = req.page_size,
            "Listing users with normalized page"
        );

        let (items, total) = self
            .repo
            .list_page(&query.filter, req.page_size, req.offset())
            .await
            .map_err(|e| DomainError::database(format!("{e:#}")))?;

        let total_pages = check_page_bounds(req, total)?;

        debug!(total, returned = items.len(), "Listed users");
        Ok(UsersPage {
            items,
            total,
            page: req.page,
            page_size: req.page_size,
            total_pages,
        })
    }

    /// Uniqueness is only defined for the full triple: without a patronymic
    /// many distinct people share name and surname, so the check reports
    /// "not taken" without consulting storage.
    pub async fn exists_by_full_name(
        &self,
        name: &str,
        surname: &str,
        patronymic: Option<&str>,
    ) -> Result<bool, DomainError> {
        let Some(patronymic) = patronymic.filter(|p| !p.is_empty()) else {
            debug!("No patronymic given; skipping uniqueness check");
            return Ok(false);
        };

        self.repo
            .exists_by_full_name(name, surname, patronymic)
            .await
            .map_err(|e| DomainError::database(format!("{e:#}")))
    }

    #[instrument(
        name = "user_directory.service.create_user",
        skip(self),
        fields(name = %new_user.name, surname = %new_user.surname)
    )]
    pub async fn create_user(&self, new_user: NewUser) -> Result<User, DomainError> {
        info!("Creating new user");

        let new_user = self.normalize_new_user(new_user)?;

        if self
            .exists_by_full_name(
                &new_user.name,
                &new_user.surname,
                new_user.patronymic.as_deref(),
            )
            .await?
        {
            return Err(DomainError::full_name_taken(
                new_user.name,
                new_user.surname,
                new_user.patronymic.unwrap_or_default(),
            ));
        }

        let info = self
            .enrichment
            .request_additional_info(&new_user.name)
            .await?;

        let now = Utc::now();
        let user = self
            .repo
            .insert(NewUserRecord {
                name: new_user.name,
                surname: new_user.surname,
                patronymic: new_user.patronymic,
                age: info.age,
                gender: info.gender,
                nationality: info.nationality,
                created_at: now,
                updated_at: now,
            })
            .await
            .map_err(|e| DomainError::database(format!("{e:#}")))?;

        info!("Successfully created user with id={}", user.id);
        Ok(user)
    }

    #[instrument(
        name = "user_directory.service.update_user",
        skip(self),
        fields(user_id = id)
    )]
    pub async fn update_user(&self, id: i32, patch: UserPatch) -> Result<User, DomainError> {
        info!("Updating user");

        let current = self
            .repo
            .find_by_id(id)
            .await
            .map_err(|e| DomainError::database(format!("{e:#}")))?
            .ok_or_else(|| DomainError::user_not_found(id))?;

        let patch = self.normalize_patch(patch)?;

        let updated_at = next_updated_at(current.updated_at, Utc::now());
        let changes = UserChanges::from_patch(patch, updated_at);

        let touched = self
            .repo
            .update_patch(id, changes)
            .await
            .map_err(|e| DomainError::database(format!("{e:#}")))?;
        if !touched {
            return Err(DomainError::user_not_found(id));
        }

        self.cache.invalidate(id).await;

        let updated = self
            .repo
            .find_by_id(id)
            .await
            .map_err(|e| DomainError::database(format!("{e:#}")))?
            .ok_or_else(|| DomainError::user_not_found(id))?;

        info!("Successfully updated user");
        Ok(updated)
    }

    #[instrument(
        name = "user_directory.service.delete_user",
        skip(self),
        fields(user_id = id)
    )]
    pub async fn delete_user(&self, id: i32) -> Result<(), DomainError> {
        info!("Deleting user");

        let exists = self
            .repo
            .exists_by_id(id)
            .await
            .map_err(|e| DomainError::database(format!("{e:#}")))?;
        if !exists {
            return Err(DomainError::user_not_found(id));
        }

        let deleted = self
            .repo
            .delete(id)
            .await
            .map_err(|e| DomainError::database(format!("{e:#}")))?;
        if !deleted {
            return Err(DomainError::user_not_found(id));
        }

        self.cache.invalidate(id).await;

        info!("Successfully deleted user");
        Ok(())
    }

    // --- validation helpers ---

    fn normalize_new_user(&self, new_user: NewUser) -> Result<NewUser, DomainError> {
        let name = required_name_part("name", &new_user.name)?;
        let surname = required_name_part("surname", &new_user.surname)?;
        let patronymic = match new_user.patronymic {
            Some(p) => optional_name_part("patronymic", &p)?,
            None => None,
        };
        Ok(NewUser {
            name,
            surname,
            patronymic,
        })
    }

    fn normalize_patch(&self, patch: UserPatch) -> Result<UserPatch, DomainError> {
        let name = patch
            .name
            .map(|n| required_name_part("name", &n))
            .transpose()?;
        let surname = patch
            .surname
            .map(|s| required_name_part("surname", &s))
            .transpose()?;
        // Present-but-empty clears the patronymic
        let patronymic = patch
            .patronymic
            .map(|p| optional_name_part("patronymic", &p).map(Option::unwrap_or_default))
            .transpose()?;
        let gender = patch
            .gender
            .map(|g| {
                g.trim()
                    .parse::<Gender>()
                    .map(|g| g.as_str().to_string())
                    .map_err(|msg| DomainError::validation("gender", msg))
            })
            .transpose()?;
        let nationality = patch.nationality.map(|n| validate_nationality(&n)).transpose()?;

        Ok(UserPatch {
            name,
            surname,
            patronymic,
            age: patch.age,
            gender,
            nationality,
        })
    }
}

/// Strictly later than `previous`, even if the clock stalled or went back.
fn next_updated_at(previous: DateTime<Utc>, now: DateTime<Utc>) -> DateTime<Utc> {
    now.max(previous + chrono::Duration::microseconds(1))
}

fn check_no_digits(field: &str, value: &str) -> Result<(), DomainError> {
    if value.chars().any(char::is_numeric) {
        return Err(DomainError::validation(field, "must not contain digits"));
    }
    Ok(())
}

fn required_name_part(field: &str, value: &str) -> Result<String, DomainError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(DomainError::validation(field, "must not be empty"));
    }
    check_no_digits(field, value)?;
    Ok(value.to_string())
}

fn optional_name_part(field: &str, value: &str) -> Result<Option<String>, DomainError> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(None);
    }
    check_no_digits(field, value)?;
    Ok(Some(value.to_string()))
}

fn validate_nationality(value: &str) -> Result<String, DomainError> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(String::new());
    }
    if value.len() > 3 || !value.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(DomainError::validation(
            "nationality",
            "must be a country code of up to 3 letters",
        ));
    }
    Ok(value.to_ascii_uppercase())
}
