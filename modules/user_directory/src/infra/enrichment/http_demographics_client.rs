use anyhow::{bail, Context};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, instrument};
use url::Url;

use crate::domain::ports::{AgeEstimator, CountryGuess, GenderClassifier, NationalityClassifier};

/// Single HTTP adapter for the three name-based estimators.
/// Each provider is queried as `GET <base>?name=<name>`.
pub struct HttpDemographicsClient {
    client: reqwest::Client,
    age_base: Url,
    gender_base: Url,
    nationality_base: Url,
}

#[derive(Debug, Deserialize)]
struct AgeResponse {
    age: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct GenderResponse {
    gender: Option<String>,
}

#[derive(Debug, Deserialize)]
struct NationalityResponse {
    #[serde(default)]
    country: Vec<CountryEntry>,
}

#[derive(Debug, Deserialize)]
struct CountryEntry {
    country_id: String,
    #[serde(default)]
    probability: f64,
}

/// Providers report failures as `{"error": "..."}`
#[derive(Debug, Deserialize)]
struct ProviderError {
    error: Option<String>,
}

impl HttpDemographicsClient {
    pub fn new(
        client: reqwest::Client,
        age_base: Url,
        gender_base: Url,
        nationality_base: Url,
    ) -> Self {
        Self {
            client,
            age_base,
            gender_base,
            nationality_base,
        }
    }

    /// Parse the three base URLs, failing on the first malformed one.
    pub fn from_urls(
        client: reqwest::Client,
        age_url: &str,
        gender_url: &str,
        nationality_url: &str,
    ) -> anyhow::Result<Self> {
        Ok(Self::new(
            client,
            Url::parse(age_url).with_context(|| format!("invalid age provider URL '{age_url}'"))?,
            Url::parse(gender_url)
                .with_context(|| format!("invalid gender provider URL '{gender_url}'"))?,
            Url::parse(nationality_url)
                .with_context(|| format!("invalid nationality provider URL '{nationality_url}'"))?,
        ))
    }

    async fn fetch<T: DeserializeOwned>(&self, base: &Url, name: &str) -> anyhow::Result<T> {
        let mut url = base.clone();
        url.query_pairs_mut().append_pair("name", name);

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .with_context(|| format!("GET {url}"))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .with_context(|| format!("reading body of GET {url}"))?;

        if !status.is_success() {
            let detail = serde_json::from_slice::<ProviderError>(&body)
                .ok()
                .and_then(|e| e.error)
                .unwrap_or_else(|| String::from_utf8_lossy(&body).into_owned());
            bail!("HTTP {status} from {}: {detail}", base.as_str());
        }

        if let Ok(ProviderError { error: Some(detail) }) = serde_json::from_slice(&body) {
            bail!("{} reported an error: {detail}", base.as_str());
        }

        serde_json::from_slice(&body)
            .with_context(|| format!("malformed response from {}", base.as_str()))
    }
}

#[async_trait]
impl AgeEstimator for HttpDemographicsClient {
    #[instrument(
        name = "user_directory.http.age",
        skip_all,
        fields(base = %self.age_base)
    )]
    async fn estimate_age(&self, name: &str) -> anyhow::Result<u32> {
        let resp: AgeResponse = self.fetch(&self.age_base, name).await?;
        debug!(age = ?resp.age, "Age estimate received");
        Ok(resp.age.unwrap_or(0))
    }
}

#[async_trait]
impl GenderClassifier for HttpDemographicsClient {
    #[instrument(
        name = "user_directory.http.gender",
        skip_all,
        fields(base = %self.gender_base)
    )]
    async fn classify_gender(&self, name: &str) -> anyhow::Result<String> {
        let resp: GenderResponse = self.fetch(&self.gender_base, name).await?;
        debug!(gender = ?resp.gender, "Gender classification received");
        Ok(resp.gender.unwrap_or_default())
    }
}

#[async_trait]
impl NationalityClassifier for HttpDemographicsClient {
    #[instrument(
        name = "user_directory.http.nationality",
        skip_all,
        fields(base = %self.nationality_base)
    )]
    async fn rank_countries(&self, name: &str) -> anyhow::Result<Vec<CountryGuess>> {
        let resp: NationalityResponse = self.fetch(&self.nationality_base, name).await?;
        debug!(countries = resp.country.len(), "Nationality ranking received");

        // Most likely country first
        let mut guesses: Vec<CountryGuess> = resp
            .country
            .into_iter()
            .map(|c| CountryGuess {
                country_id: c.country_id,
                probability: c.probability,
            })
            .collect();
        guesses.sort_by(|a, b| b.probability.total_cmp(&a.probability));
        Ok(guesses)
    }
}
