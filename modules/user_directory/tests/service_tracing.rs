//! Tests to verify that the service layer emits expected tracing spans and logs

mod common;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing_test::traced_test;

use common::{harness, user, MockRepo, StubEnrichment};
use user_directory::contract::model::{NewUser, UserPatch};
use user_directory::domain::ports::CachePort;
use user_directory::domain::service::{Service, ServiceConfig};

/// Cache that is always unreachable
struct BrokenCache;

#[async_trait]
impl CachePort for BrokenCache {
    async fn get(&self, _key: &str) -> anyhow::Result<Option<Vec<u8>>> {
        anyhow::bail!("connection refused")
    }

    async fn set(&self, _key: &str, _value: Vec<u8>, _ttl: Duration) -> anyhow::Result<()> {
        anyhow::bail!("connection refused")
    }

    async fn delete(&self, _key: &str) -> anyhow::Result<()> {
        anyhow::bail!("connection refused")
    }
}

#[traced_test]
#[tokio::test]
async fn create_user_emits_spans() {
    let h = harness(vec![], StubEnrichment::ok(30, "male", "US"));

    let result = h
        .service
        .create_user(NewUser {
            name: "Alex".into(),
            surname: "Smith".into(),
            patronymic: None,
        })
        .await;

    assert!(result.is_ok());
    assert!(logs_contain("user_directory.service.create_user"));
    assert!(logs_contain("Creating new user"));
    assert!(logs_contain("Successfully created user with id=1"));
}

#[traced_test]
#[tokio::test]
async fn update_and_delete_emit_spans() {
    let h = harness(
        vec![user(2, "Anna", "Petrova", None)],
        StubEnrichment::ok(0, "", ""),
    );

    let updated = h
        .service
        .update_user(
            2,
            UserPatch {
                age: Some(33),
                ..Default::default()
            },
        )
        .await;
    assert!(updated.is_ok());
    assert!(logs_contain("user_directory.service.update_user"));
    assert!(logs_contain("Successfully updated user"));

    assert!(h.service.delete_user(2).await.is_ok());
    assert!(logs_contain("user_directory.service.delete_user"));
    assert!(logs_contain("Successfully deleted user"));
}

#[traced_test]
#[tokio::test]
async fn cache_outage_is_logged_and_reads_still_succeed() {
    let repo = Arc::new(MockRepo::with_users(vec![user(4, "Lev", "Tolstoy", None)]));
    let service = Service::new(
        repo,
        Arc::new(BrokenCache),
        Arc::new(StubEnrichment::ok(0, "", "")),
        ServiceConfig::default(),
    );

    let first = service.get_user(4).await.unwrap();
    let second = service.get_user(4).await.unwrap();
    assert_eq!(first, second);

    assert!(logs_contain("user_directory.service.get_user"));
    assert!(logs_contain("Cache read failed"));
    assert!(logs_contain("Cache write failed"));

    // Writes still go through when invalidation fails
    assert!(service.delete_user(4).await.is_ok());
    assert!(logs_contain("Cache invalidation failed"));
}
