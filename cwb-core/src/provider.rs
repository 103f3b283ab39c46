use async_trait::async_trait;
use std::fmt::Debug;

use crate::{Config, error::FetchError, model::ObservationResponse, provider::cwb::CwbProvider};

pub mod cwb;

/// Source of station observations. One call is one page load.
#[async_trait]
pub trait ObservationProvider: Send + Sync + Debug {
    async fn fetch_observations(&self) -> Result<ObservationResponse, FetchError>;
}

/// Construct the CWB provider from config and an explicit authorization key.
pub fn provider_from_config(
    config: &Config,
    authorization: String,
) -> Box<dyn ObservationProvider> {
    Box::new(CwbProvider::new(config.endpoint().to_owned(), authorization))
}
