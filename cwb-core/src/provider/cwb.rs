use async_trait::async_trait;
use reqwest::Client;

use crate::{error::FetchError, model::ObservationResponse};

use super::ObservationProvider;

/// Automatic weather station observations, dataset `O-A0003-001`.
pub const DEFAULT_ENDPOINT: &str =
    "https://opendata.cwb.gov.tw/api/v1/rest/datastore/O-A0003-001";

#[derive(Clone)]
pub struct CwbProvider {
    endpoint: String,
    authorization: String,
    http: Client,
}

impl CwbProvider {
    pub fn new(endpoint: String, authorization: String) -> Self {
        Self {
            endpoint,
            authorization,
            http: Client::new(),
        }
    }
}

impl std::fmt::Debug for CwbProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CwbProvider")
            .field("endpoint", &self.endpoint)
            .field("authorization", &"<redacted>")
            .finish()
    }
}

#[async_trait]
impl ObservationProvider for CwbProvider {
    async fn fetch_observations(&self) -> Result<ObservationResponse, FetchError> {
        log::debug!("GET {}", self.endpoint);

        let res = self
            .http
            .get(&self.endpoint)
            .query(&[("Authorization", self.authorization.as_str())])
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                body: truncate_body(&body),
            });
        }

        log::debug!("received {} bytes of observations", body.len());

        Ok(serde_json::from_str(&body)?)
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        let mut end = MAX;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &body[..end])
    } else {
        body.to_string()
    }
}
