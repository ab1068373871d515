use std::sync::Arc;

use anyhow::Context;
use sea_orm::DatabaseConnection;
use sea_orm_migration::MigratorTrait;
use tracing::{debug, info};

use crate::api::rest::routes;
use crate::config::UserDirectoryConfig;
use crate::contract::client::UserDirectoryApi;
use crate::domain::enrichment::Enricher;
use crate::domain::ports::{CachePort, EnrichmentPort};
use crate::domain::repo::UsersRepository;
use crate::domain::service::Service;
use crate::gateways::local::UserDirectoryLocalClient;
use crate::infra::cache::MokaCache;
use crate::infra::enrichment::HttpDemographicsClient;
use crate::infra::storage::migrations::Migrator;
use crate::infra::storage::SeaOrmUsersRepository;

/// The user directory wired to its storage, cache and enrichment adapters.
#[derive(Clone)]
pub struct UserDirectory {
    db: DatabaseConnection,
    service: Arc<Service>,
}

impl UserDirectory {
    /// Build the module with the production adapters.
    pub fn init(db: DatabaseConnection, cfg: &UserDirectoryConfig) -> anyhow::Result<Self> {
        info!("Initializing user_directory module");
        debug!(
            "Loaded user_directory config: default_page_size={}, max_page_size={}, cache_ttl_secs={}, enrichment_timeout_secs={}",
            cfg.default_page_size, cfg.max_page_size, cfg.cache_ttl_secs, cfg.enrichment_timeout_secs
        );

        let http = reqwest::Client::builder()
            .timeout(cfg.enrichment_timeout())
            .build()
            .context("failed to build HTTP client")?;
        let provider = Arc::new(HttpDemographicsClient::from_urls(
            http,
            &cfg.age_api_url,
            &cfg.gender_api_url,
            &cfg.nationality_api_url,
        )?);
        let enrichment: Arc<dyn EnrichmentPort> =
            Arc::new(Enricher::from_provider(provider, cfg.enrichment_timeout()));

        let repo: Arc<dyn UsersRepository> = Arc::new(SeaOrmUsersRepository::new(db.clone()));
        let cache: Arc<dyn CachePort> = Arc::new(MokaCache::new(cfg.cache_max_entries));

        Ok(Self::with_ports(db, repo, cache, enrichment, cfg))
    }

    /// Build the module around caller-supplied ports.
    pub fn with_ports(
        db: DatabaseConnection,
        repo: Arc<dyn UsersRepository>,
        cache: Arc<dyn CachePort>,
        enrichment: Arc<dyn EnrichmentPort>,
        cfg: &UserDirectoryConfig,
    ) -> Self {
        let service = Service::new(repo, cache, enrichment, cfg.service_config());
        Self {
            db,
            service: Arc::new(service),
        }
    }

    pub async fn migrate(&self) -> anyhow::Result<()> {
        info!("Running user_directory database migrations");
        Migrator::up(&self.db, None)
            .await
            .context("user_directory migrations failed")?;
        info!("Users database migrations completed successfully");
        Ok(())
    }

    pub fn register_rest(&self, router: axum::Router) -> axum::Router {
        info!("Registering user_directory REST routes");
        routes::register_routes(router, self.service.clone())
    }

    pub fn client(&self) -> Arc<dyn UserDirectoryApi> {
        Arc::new(UserDirectoryLocalClient::new(self.service.clone()))
    }
}
