//! Core library for the `cwb-obs` CLI.
//!
//! This crate defines:
//! - Configuration & authorization key handling
//! - The observation provider abstraction and its CWB open-data client
//! - Raw API models and the transform into flat table rows
//! - The page state that one load updates
//! - A generic plain-text table renderer and the observation column rules
//!
//! It is used by `cwb-cli`, but can also be reused by other binaries or services.

pub mod columns;
pub mod config;
pub mod error;
pub mod model;
pub mod page;
pub mod provider;
pub mod table;
pub mod transform;

pub use columns::{ColumnKey, observation_columns, wide_observation_columns};
pub use config::Config;
pub use error::FetchError;
pub use model::{ObservationResponse, ObservationRow};
pub use page::ObservationPage;
pub use provider::{ObservationProvider, provider_from_config};
pub use table::{Column, SortOrder, render, sort_rows};
pub use transform::rows_from_response;
