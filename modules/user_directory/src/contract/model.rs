use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};

/// Pure user model for inter-module communication (no serde/schema derives)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i32,
    pub name: String,
    pub surname: String,
    pub patronymic: Option<String>,
    pub age: u32,
    /// "male", "female", or empty when the classifier had no answer
    pub gender: String,
    /// Country code, empty when unknown
    pub nationality: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Data for creating a new user; demographic fields are filled by enrichment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub name: String,
    pub surname: String,
    pub patronymic: Option<String>,
}

/// Sparse update: `None` leaves the stored value untouched.
///
/// `Some(String::new())` clears `patronymic` and `nationality`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UserPatch {
    pub name: Option<String>,
    pub surname: Option<String>,
    pub patronymic: Option<String>,
    pub age: Option<u32>,
    pub gender: Option<String>,
    pub nationality: Option<String>,
}

/// The fixed set of gender labels accepted on input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub fn as_str(self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "male" => Ok(Gender::Male),
            "female" => Ok(Gender::Female),
            other => Err(format!("gender must be 'male' or 'female', got '{other}'")),
        }
    }
}

/// Optional list filters; name parts match as case-insensitive substrings,
/// gender matches exactly.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UsersFilter {
    pub name: Option<String>,
    pub surname: Option<String>,
    pub patronymic: Option<String>,
    pub gender: Option<Gender>,
}

/// List request before normalization.
///
/// `page`/`page_size` are `None` when the caller omitted them or sent
/// something that does not parse as a number.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UsersQuery {
    pub page: Option<i64>,
    pub page_size: Option<i64>,
    pub filter: UsersFilter,
}

/// One page of users plus the total matching the same filter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsersPage {
    pub items: Vec<User>,
    pub total: u64,
    pub page: u64,
    pub page_size: u64,
    pub total_pages: u64,
}
