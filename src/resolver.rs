//! Pincode to location resolution
//!
//! Talks to the India Post pincode directory
//! (`https://api.postalpincode.in`) and validates its response shape
//! into either a complete [`Location`] or a categorized [`LookupError`].

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::debug;

use crate::config::LookupConfig;
use crate::error::AirCheckError;
use crate::models::Location;
use crate::pipeline::LookupError;
use crate::validation::PostalCode;

const USER_AGENT: &str = concat!("aircheck/", env!("CARGO_PKG_VERSION"));

/// Resolves a validated pincode to a location.
///
/// The pipeline wraps each call in its own timeout; implementations
/// should not block past that budget.
#[async_trait]
pub trait LocationResolver: Send + Sync {
    async fn resolve(&self, code: &PostalCode) -> Result<Location, LookupError>;
}

/// One entry of the postalpincode.in response array.
#[derive(Debug, Deserialize)]
struct PincodeRecord {
    #[serde(rename = "Status")]
    status: String,
    #[serde(rename = "Message")]
    message: Option<String>,
    #[serde(rename = "PostOffice")]
    post_office: Option<Vec<PostOfficeRecord>>,
}

#[derive(Debug, Deserialize)]
struct PostOfficeRecord {
    #[serde(rename = "Name")]
    name: Option<String>,
    #[serde(rename = "District")]
    district: Option<String>,
    #[serde(rename = "State")]
    state: Option<String>,
    #[serde(rename = "Country")]
    country: Option<String>,
}

/// Location resolver backed by the public India Post pincode API.
#[derive(Debug, Clone)]
pub struct PincodeApiResolver {
    client: Client,
    base_url: String,
}

impl PincodeApiResolver {
    /// Build a resolver from the lookup configuration.
    ///
    /// # Errors
    ///
    /// Returns a configuration error when the HTTP client cannot be built.
    pub fn new(config: &LookupConfig) -> Result<Self, AirCheckError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(u64::from(config.timeout_seconds)))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| AirCheckError::config(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl LocationResolver for PincodeApiResolver {
    async fn resolve(&self, code: &PostalCode) -> Result<Location, LookupError> {
        let url = format!("{}/{}", self.base_url, code.as_str());
        debug!("Requesting {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(classify_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(if status == StatusCode::NOT_FOUND {
                LookupError::NotFound
            } else {
                LookupError::Server {
                    status: status.as_u16(),
                }
            });
        }

        let records: Vec<PincodeRecord> = response.json().await.map_err(|e| {
            debug!("Unparsable resolver response: {}", e);
            LookupError::NoData
        })?;

        interpret_records(records)
    }
}

fn classify_transport_error(error: reqwest::Error) -> LookupError {
    if error.is_timeout() {
        LookupError::Timeout
    } else {
        debug!("Transport failure: {}", error);
        LookupError::Network
    }
}

/// Validate the decoded response body into a location.
///
/// Checks run in a fixed order: empty body, resolver-reported status,
/// missing post office list, then missing required fields on the first
/// record. Only the first record is used; `name` falls back to the
/// district when the post office name is absent.
fn interpret_records(records: Vec<PincodeRecord>) -> Result<Location, LookupError> {
    let record = records.into_iter().next().ok_or(LookupError::NoData)?;

    if record.status != "Success" {
        let mentions_found = record
            .message
            .as_deref()
            .is_some_and(|m| m.to_ascii_lowercase().contains("found"));
        return Err(if mentions_found {
            LookupError::NotFound
        } else {
            LookupError::InvalidInput
        });
    }

    let offices = record.post_office.unwrap_or_default();
    let office = offices.into_iter().next().ok_or(LookupError::NoData)?;

    let district = required_field(office.district)?;
    let state = required_field(office.state)?;
    let country = required_field(office.country)?;
    let name = office
        .name
        .filter(|n| !n.trim().is_empty())
        .unwrap_or_else(|| district.clone());

    Ok(Location::new(district, state, country, name))
}

fn required_field(value: Option<String>) -> Result<String, LookupError> {
    value
        .filter(|v| !v.trim().is_empty())
        .ok_or(LookupError::IncompleteData)
}
