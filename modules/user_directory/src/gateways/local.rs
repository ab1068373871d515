use std::sync::Arc;

use async_trait::async_trait;

use crate::contract::{
    client::UserDirectoryApi,
    error::UserDirectoryError,
    model::{NewUser, User, UserPatch, UsersPage, UsersQuery},
};
use crate::domain::service::Service;

/// Local implementation of the UserDirectoryApi trait that delegates to the domain service
pub struct UserDirectoryLocalClient {
    service: Arc<Service>,
}

impl UserDirectoryLocalClient {
    pub fn new(service: Arc<Service>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl UserDirectoryApi for UserDirectoryLocalClient {
    async fn get_user(&self, id: i32) -> Result<User, UserDirectoryError> {
        self.service.get_user(id).await.map_err(Into::into)
    }

    async fn list_users(&self, query: UsersQuery) -> Result<UsersPage, UserDirectoryError> {
        self.service.list_users(query).await.map_err(Into::into)
    }

    async fn create_user(&self, new_user: NewUser) -> Result<User, UserDirectoryError> {
        self.service.create_user(new_user).await.map_err(Into::into)
    }

    async fn update_user(&self, id: i32, patch: UserPatch) -> Result<User, UserDirectoryError> {
        self.service.update_user(id, patch).await.map_err(Into::into)
    }

    async fn delete_user(&self, id: i32) -> Result<(), UserDirectoryError> {
        self.service.delete_user(id).await.map_err(Into::into)
    }
}
