use sea_orm::{ActiveValue, NotSet, Set};

use crate::contract::model::User;
use crate::domain::repo::{NewUserRecord, UserChanges};
use crate::infra::storage::entity::{ActiveModel as UserAM, Model as UserEntity};

/// Age is stored as a signed integer column; anything out of range reads as 0.
fn age_from_column(age: i32) -> u32 {
    u32::try_from(age).unwrap_or(0)
}

fn age_to_column(age: u32) -> i32 {
    i32::try_from(age).unwrap_or(i32::MAX)
}

/// Case folding for the `*_key` search columns. Done here rather than with
/// SQL `lower()`, which SQLite applies to ASCII only.
pub(crate) fn search_key(value: &str) -> String {
    value.to_lowercase()
}

fn set_if<T>(value: Option<T>) -> ActiveValue<T>
where
    T: Into<sea_orm::Value>,
{
    match value {
        Some(v) => Set(v),
        None => NotSet,
    }
}

impl From<UserEntity> for User {
    fn from(e: UserEntity) -> Self {
        Self {
            id: e.id,
            name: e.name,
            surname: e.surname,
            patronymic: e.patronymic,
            age: age_from_column(e.age),
            gender: e.gender,
            nationality: e.nationality,
            created_at: e.created_at,
            updated_at: e.updated_at,
        }
    }
}

impl From<NewUserRecord> for UserAM {
    fn from(r: NewUserRecord) -> Self {
        Self {
            id: NotSet,
            name_key: Set(search_key(&r.name)),
            surname_key: Set(search_key(&r.surname)),
            patronymic_key: Set(r.patronymic.as_deref().map(search_key).unwrap_or_default()),
            name: Set(r.name),
            surname: Set(r.surname),
            patronymic: Set(r.patronymic),
            age: Set(age_to_column(r.age)),
            gender: Set(r.gender),
            nationality: Set(r.nationality),
            created_at: Set(r.created_at),
            updated_at: Set(r.updated_at),
        }
    }
}

/// Only the columns carried by the change set are marked `Set`; the rest
/// stay `NotSet` and are left out of the UPDATE statement. A changed name
/// part rewrites its search key as well.
impl From<UserChanges> for UserAM {
    fn from(c: UserChanges) -> Self {
        Self {
            id: NotSet,
            name_key: set_if(c.name.as_deref().map(search_key)),
            surname_key: set_if(c.surname.as_deref().map(search_key)),
            patronymic_key: set_if(
                c.patronymic
                    .as_ref()
                    .map(|p| p.as_deref().map(search_key).unwrap_or_default()),
            ),
            name: set_if(c.name),
            surname: set_if(c.surname),
            patronymic: set_if(c.patronymic),
            age: set_if(c.age.map(age_to_column)),
            gender: set_if(c.gender),
            nationality: set_if(c.nationality),
            created_at: NotSet,
            updated_at: Set(c.updated_at),
        }
    }
}
