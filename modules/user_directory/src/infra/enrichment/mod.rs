pub mod http_demographics_client;

pub use http_demographics_client::HttpDemographicsClient;
