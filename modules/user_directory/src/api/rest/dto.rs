use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::contract::model::{Gender, NewUser, User, UserPatch, UsersFilter, UsersQuery};

/// REST DTO for user representation with serde/utoipa
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserDto {
    pub id: i32,
    pub name: String,
    pub surname: String,
    pub patronymic: Option<String>,
    pub age: u32,
    pub gender: String,
    pub nationality: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// REST DTO for creating a new user
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateUserReq {
    pub name: String,
    pub surname: String,
    #[serde(default)]
    pub patronymic: Option<String>,
}

/// REST DTO for updating a user (partial).
/// An empty string for `patronymic` or `nationality` clears the field.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Default)]
pub struct UpdateUserReq {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub surname: Option<String>,
    #[serde(default)]
    pub patronymic: Option<String>,
    #[serde(default)]
    pub age: Option<u32>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub nationality: Option<String>,
}

/// Query parameters for listing users.
///
/// Page parameters are taken as raw strings: values that do not parse fall
/// back to the defaults instead of rejecting the request.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListUsersQuery {
    /// Case-insensitive substring of the name
    pub name: Option<String>,
    /// Case-insensitive substring of the surname
    pub surname: Option<String>,
    /// Case-insensitive substring of the patronymic
    pub patronymic: Option<String>,
    /// Exact gender, `male` or `female`
    pub gender: Option<String>,
    /// 1-based page number
    pub page: Option<String>,
    /// Rows per page
    pub page_size: Option<String>,
}

/// Body of every non-entity response, success or error
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageDto {
    pub message: String,
}

impl MessageDto {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

// Conversion implementations between REST DTOs and contract models

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            surname: user.surname,
            patronymic: user.patronymic,
            age: user.age,
            gender: user.gender,
            nationality: user.nationality,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

impl From<CreateUserReq> for NewUser {
    fn from(req: CreateUserReq) -> Self {
        Self {
            name: req.name,
            surname: req.surname,
            patronymic: req.patronymic,
        }
    }
}

impl From<UpdateUserReq> for UserPatch {
    fn from(req: UpdateUserReq) -> Self {
        Self {
            name: req.name,
            surname: req.surname,
            patronymic: req.patronymic,
            age: req.age,
            gender: req.gender,
            nationality: req.nationality,
        }
    }
}

fn lenient_number(raw: Option<&str>) -> Option<i64> {
    raw.and_then(|s| s.trim().parse().ok())
}

fn non_empty(raw: Option<String>) -> Option<String> {
    raw.filter(|s| !s.trim().is_empty())
}

impl TryFrom<ListUsersQuery> for UsersQuery {
    type Error = String;

    /// Fails only on an unknown gender value.
    fn try_from(q: ListUsersQuery) -> Result<Self, Self::Error> {
        let gender = non_empty(q.gender)
            .map(|g| g.trim().parse::<Gender>())
            .transpose()?;

        Ok(Self {
            page: lenient_number(q.page.as_deref()),
            page_size: lenient_number(q.page_size.as_deref()),
            filter: UsersFilter {
                name: non_empty(q.name),
                surname: non_empty(q.surname),
                patronymic: non_empty(q.patronymic),
                gender,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unparseable_page_values_become_none() {
        let q = ListUsersQuery {
            page: Some("abc".into()),
            page_size: Some("10".into()),
            ..Default::default()
        };
        let q = UsersQuery::try_from(q).unwrap();
        assert_eq!(q.page, None);
        assert_eq!(q.page_size, Some(10));
    }

    #[test]
    fn gender_filter_must_be_known() {
        let bad = ListUsersQuery {
            gender: Some("other".into()),
            ..Default::default()
        };
        assert!(UsersQuery::try_from(bad).is_err());

        let blank = ListUsersQuery {
            gender: Some(String::new()),
            name: Some("  ".into()),
            ..Default::default()
        };
        let q = UsersQuery::try_from(blank).unwrap();
        assert_eq!(q.filter, UsersFilter::default());
    }

    #[test]
    fn update_body_distinguishes_absent_from_empty() {
        let req: UpdateUserReq = serde_json::from_str(r#"{"nationality": ""}"#).unwrap();
        let patch = UserPatch::from(req);
        assert_eq!(patch.nationality.as_deref(), Some(""));
        assert_eq!(patch.patronymic, None);
    }
}
