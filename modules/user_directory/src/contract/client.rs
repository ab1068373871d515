use async_trait::async_trait;

use crate::contract::{
    error::UserDirectoryError,
    model::{NewUser, User, UserPatch, UsersPage, UsersQuery},
};

/// Public API of the user directory for in-process consumers
#[async_trait]
pub trait UserDirectoryApi: Send + Sync {
    /// Get a user by ID
    async fn get_user(&self, id: i32) -> Result<User, UserDirectoryError>;

    /// List users with filters and page/offset pagination
    async fn list_users(&self, query: UsersQuery) -> Result<UsersPage, UserDirectoryError>;

    /// Create a new user; age, gender and nationality are looked up by name
    async fn create_user(&self, new_user: NewUser) -> Result<User, UserDirectoryError>;

    /// Update a user with partial data
    async fn update_user(&self, id: i32, patch: UserPatch) -> Result<User, UserDirectoryError>;

    /// Delete a user by ID
    async fn delete_user(&self, id: i32) -> Result<(), UserDirectoryError>;
}
