use async_trait::async_trait;

use crate::domain::error::DomainError;

/// One ranked entry from the nationality classifier
#[derive(Debug, Clone, PartialEq)]
pub struct CountryGuess {
    pub country_id: String,
    pub probability: f64,
}

/// Estimates a person's age from a given name.
#[async_trait]
pub trait AgeEstimator: Send + Sync {
    async fn estimate_age(&self, name: &str) -> anyhow::Result<u32>;
}

/// Classifies a given name as a gender label (empty when unknown).
#[async_trait]
pub trait GenderClassifier: Send + Sync {
    async fn classify_gender(&self, name: &str) -> anyhow::Result<String>;
}

/// Ranks likely countries of origin for a given name, most likely first.
#[async_trait]
pub trait NationalityClassifier: Send + Sync {
    async fn rank_countries(&self, name: &str) -> anyhow::Result<Vec<CountryGuess>>;
}

/// Demographic estimate attached to a new user
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Enrichment {
    pub age: u32,
    pub gender: String,
    pub nationality: String,
}

/// What the service needs from enrichment: all three attributes or an error.
#[async_trait]
pub trait EnrichmentPort: Send + Sync {
    async fn request_additional_info(&self, name: &str) -> Result<Enrichment, DomainError>;
}
