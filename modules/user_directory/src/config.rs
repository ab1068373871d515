use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::domain::pagination::PageLimits;
use crate::domain::service::ServiceConfig;

/// Configuration for the user directory module, read from `modules.user_directory`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UserDirectoryConfig {
    #[serde(default = "default_page_size")]
    pub default_page_size: u64,
    #[serde(default = "default_page_size")]
    pub min_page_size: u64,
    #[serde(default = "default_max_page_size")]
    pub max_page_size: u64,
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: u64,
    #[serde(default = "default_cache_max_entries")]
    pub cache_max_entries: u64,
    #[serde(default = "default_enrichment_timeout_secs")]
    pub enrichment_timeout_secs: u64,
    #[serde(default = "default_age_api_url")]
    pub age_api_url: String,
    #[serde(default = "default_gender_api_url")]
    pub gender_api_url: String,
    #[serde(default = "default_nationality_api_url")]
    pub nationality_api_url: String,
}

impl Default for UserDirectoryConfig {
    fn default() -> Self {
        Self {
            default_page_size: default_page_size(),
            min_page_size: default_page_size(),
            max_page_size: default_max_page_size(),
            cache_ttl_secs: default_cache_ttl_secs(),
            cache_max_entries: default_cache_max_entries(),
            enrichment_timeout_secs: default_enrichment_timeout_secs(),
            age_api_url: default_age_api_url(),
            gender_api_url: default_gender_api_url(),
            nationality_api_url: default_nationality_api_url(),
        }
    }
}

impl UserDirectoryConfig {
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    pub fn enrichment_timeout(&self) -> Duration {
        Duration::from_secs(self.enrichment_timeout_secs)
    }

    /// Page limits with inconsistent values pulled back into a usable order.
    pub fn page_limits(&self) -> PageLimits {
        let min = self.min_page_size.max(1);
        let max = self.max_page_size.max(min);
        PageLimits {
            min_page_size: min,
            default_page_size: self.default_page_size.clamp(min, max),
            max_page_size: max,
        }
    }

    pub fn service_config(&self) -> ServiceConfig {
        ServiceConfig {
            page_limits: self.page_limits(),
            cache_ttl: self.cache_ttl(),
        }
    }
}

fn default_page_size() -> u64 {
    5
}

fn default_max_page_size() -> u64 {
    50
}

fn default_cache_ttl_secs() -> u64 {
    15
}

fn default_cache_max_entries() -> u64 {
    10_000
}

fn default_enrichment_timeout_secs() -> u64 {
    5
}

fn default_age_api_url() -> String {
    "https://api.agify.io/".to_owned()
}

fn default_gender_api_url() -> String {
    "https://api.genderize.io/".to_owned()
}

fn default_nationality_api_url() -> String {
    "https://api.nationalize.io/".to_owned()
}
