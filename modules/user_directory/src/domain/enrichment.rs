//! Fan-out of one name to the three demographic providers.
//!
//! The three lookups are polled concurrently inside a single future that is
//! bounded by one deadline. When any lookup fails, `try_join!` drops the
//! remaining ones; when the deadline fires, `timeout` drops all of them. Either
//! way nothing keeps running after `request_additional_info` returns.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use tracing::{debug, instrument, warn};

use crate::domain::error::DomainError;
use crate::domain::ports::{
    AgeEstimator, Enrichment, EnrichmentPort, GenderClassifier, NationalityClassifier,
};

/// Aggregates age, gender and nationality lookups into one all-or-nothing result.
#[derive(Clone)]
pub struct Enricher {
    age: Arc<dyn AgeEstimator>,
    gender: Arc<dyn GenderClassifier>,
    nationality: Arc<dyn NationalityClassifier>,
    timeout: Duration,
}

impl Enricher {
    pub fn new(
        age: Arc<dyn AgeEstimator>,
        gender: Arc<dyn GenderClassifier>,
        nationality: Arc<dyn NationalityClassifier>,
        timeout: Duration,
    ) -> Self {
        Self {
            age,
            gender,
            nationality,
            timeout,
        }
    }

    /// Use one adapter that speaks to all three providers.
    pub fn from_provider<P>(provider: Arc<P>, timeout: Duration) -> Self
    where
        P: AgeEstimator + GenderClassifier + NationalityClassifier + 'static,
    {
        Self::new(provider.clone(), provider.clone(), provider, timeout)
    }
}

#[async_trait]
impl EnrichmentPort for Enricher {
    #[instrument(
        name = "user_directory.enrichment.request_additional_info",
        skip(self),
        fields(timeout_ms = self.timeout.as_millis() as u64)
    )]
    async fn request_additional_info(&self, name: &str) -> Result<Enrichment, DomainError> {
        let lookups = async {
            tokio::try_join!(
                async {
                    self.age
                        .estimate_age(name)
                        .await
                        .context("age estimation failed")
                },
                async {
                    self.gender
                        .classify_gender(name)
                        .await
                        .context("gender classification failed")
                },
                async {
                    self.nationality
                        .rank_countries(name)
                        .await
                        .context("nationality classification failed")
                },
            )
        };

        let (age, gender, countries) = match tokio::time::timeout(self.timeout, lookups).await {
            Ok(Ok(results)) => results,
            Ok(Err(e)) => {
                warn!(error = %format!("{e:#}"), "Enrichment lookup failed");
                return Err(DomainError::upstream(format!("{e:#}")));
            }
            Err(_) => {
                warn!("Enrichment lookups exceeded the deadline");
                return Err(DomainError::upstream(format!(
                    "lookups did not finish within {} ms",
                    self.timeout.as_millis()
                )));
            }
        };

        // No confident guess is a valid answer, not a failure
        let nationality = countries
            .into_iter()
            .next()
            .map(|c| c.country_id)
            .unwrap_or_default();

        debug!(age, %gender, %nationality, "Enrichment completed");
        Ok(Enrichment {
            age,
            gender,
            nationality,
        })
    }
}
