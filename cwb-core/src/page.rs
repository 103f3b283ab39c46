//! State behind the observation table: the rows and the last load error.

use crate::{
    error::FetchError,
    model::{ObservationResponse, ObservationRow},
    provider::ObservationProvider,
    transform::rows_from_response,
};

#[derive(Debug, Clone)]
pub struct ObservationPage {
    rows: Vec<ObservationRow>,
    error_message: Option<String>,
    loaded: bool,
}

impl Default for ObservationPage {
    fn default() -> Self {
        Self::new()
    }
}

impl ObservationPage {
    /// Fresh page holding a single placeholder row.
    pub fn new() -> Self {
        Self {
            rows: vec![ObservationRow::placeholder()],
            error_message: None,
            loaded: false,
        }
    }

    pub fn rows(&self) -> &[ObservationRow] {
        &self.rows
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    /// True once a load has replaced the placeholder row.
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Fetch once from `provider` and store the outcome. Never retries.
    pub async fn load(&mut self, provider: &dyn ObservationProvider) {
        let outcome = provider.fetch_observations().await;
        self.apply(outcome);
    }

    /// Store a fetch outcome: rows replaced on success, error message set otherwise.
    pub fn apply(&mut self, outcome: Result<ObservationResponse, FetchError>) {
        match outcome.and_then(|resp| rows_from_response(&resp)) {
            Ok(rows) => {
                log::info!("loaded {} station observations", rows.len());
                self.rows = rows;
                self.loaded = true;
            }
            Err(err) => {
                log::error!("observation load failed: {err}");
                self.error_message = Some(err.to_string());
            }
        }
    }
}
