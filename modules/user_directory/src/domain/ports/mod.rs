pub mod cache;
pub mod enrichment;

pub use cache::CachePort;
pub use enrichment::{
    AgeEstimator, CountryGuess, Enrichment, EnrichmentPort, GenderClassifier,
    NationalityClassifier,
};
