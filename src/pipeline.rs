//! Sequential lookup pipeline
//!
//! One check runs: validate → resolve location (with bounded retry) →
//! fetch quality reading → classify → report. Each invocation owns its
//! own timeouts; there is no shared mutable state, so concurrent checks
//! are safe.

use std::time::Duration;

use thiserror::Error;
use tokio::time::{sleep, timeout};
use tracing::{debug, info, warn};

use crate::classify::Tier;
use crate::guidance::HealthGuidance;
use crate::models::{Location, QualityReading};
use crate::provider::QualityProvider;
use crate::resolver::LocationResolver;
use crate::validation::{PostalCode, ValidationError};

/// Per-step timeout budget in seconds.
pub const STEP_TIMEOUT_SECS: u64 = 10;

/// Total resolve attempts, including the first.
pub const MAX_ATTEMPTS: u32 = 2;

/// Linear backoff unit: retry attempt `n` waits `n` times this long.
pub const BACKOFF_UNIT: Duration = Duration::from_millis(1000);

/// Categorized lookup failure.
///
/// Every variant carries a human-readable message via `Display`; the
/// category itself routes presentation styling. No string encoding is
/// involved anywhere.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    /// Transport-level failure reaching the resolver.
    #[error("Network error. Please check your internet connection and try again.")]
    Network,
    /// The resolve step exceeded its time budget.
    #[error("Request timed out. Please check your internet connection and try again.")]
    Timeout,
    /// The resolver answered with an HTTP failure status.
    #[error("Server error ({status}). Please try again in a few minutes.")]
    Server { status: u16 },
    /// The resolver reported the pincode as unknown.
    #[error("This pincode doesn't exist. Please check and try again.")]
    NotFound,
    /// The resolver rejected the pincode for another reason.
    #[error("Invalid pincode. Please verify and try again.")]
    InvalidInput,
    /// Empty or unparsable resolver response.
    #[error("No location data found for this pincode.")]
    NoData,
    /// The first location record is missing required fields.
    #[error("Incomplete location data. Please try a different pincode.")]
    IncompleteData,
    /// Any quality-fetch failure; never retried.
    #[error("Unable to fetch air quality data. Please try again later.")]
    ServiceUnavailable,
}

/// Presentation template a failure routes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorStyle {
    /// Rendered like a validation problem, with a retry-input hint.
    Input,
    /// Rendered as a connectivity problem.
    Connection,
    /// Rendered as a (likely transient) service problem.
    Service,
}

impl LookupError {
    /// Only transport failures and timeouts are worth retrying.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, LookupError::Network | LookupError::Timeout)
    }

    /// Which presentation template this category selects.
    #[must_use]
    pub fn style(&self) -> ErrorStyle {
        match self {
            LookupError::NotFound
            | LookupError::InvalidInput
            | LookupError::NoData
            | LookupError::IncompleteData => ErrorStyle::Input,
            LookupError::Network | LookupError::Timeout => ErrorStyle::Connection,
            LookupError::Server { .. } | LookupError::ServiceUnavailable => ErrorStyle::Service,
        }
    }

    /// Hint rendered under input-style failures.
    #[must_use]
    pub fn suggestion(&self) -> Option<&'static str> {
        match self.style() {
            ErrorStyle::Input => Some("Try a different pincode or check for typos"),
            ErrorStyle::Connection => Some("Check your internet connection and try again"),
            ErrorStyle::Service => Some("This might be a temporary issue"),
        }
    }
}

/// Everything a successful check produces.
#[derive(Debug, Clone)]
pub struct CheckReport {
    pub location: Location,
    pub reading: QualityReading,
    pub tier: Tier,
    pub guidance: &'static HealthGuidance,
    /// Guidance tips, with the emergency tip prepended when applicable.
    pub tips: Vec<&'static str>,
}

impl CheckReport {
    fn new(location: Location, reading: QualityReading) -> Self {
        let tier = Tier::classify(reading.aqi);
        Self {
            location,
            tier,
            guidance: HealthGuidance::for_tier(tier),
            tips: HealthGuidance::tips_for(reading.aqi),
            reading,
        }
    }
}

/// Presentation boundary: the pipeline reports every outcome through
/// exactly one of these callbacks.
pub trait CheckObserver {
    fn on_validation_rejected(&mut self, error: &ValidationError);
    fn on_lookup_failed(&mut self, error: &LookupError);
    fn on_success(&mut self, report: &CheckReport);
}

/// Orchestrates one pincode check over the two collaborators.
pub struct CheckPipeline {
    resolver: Box<dyn LocationResolver>,
    provider: Box<dyn QualityProvider>,
    step_timeout: Duration,
    max_attempts: u32,
    backoff_unit: Duration,
}

impl CheckPipeline {
    /// Build a pipeline with the default timeout and retry budget.
    #[must_use]
    pub fn new(resolver: Box<dyn LocationResolver>, provider: Box<dyn QualityProvider>) -> Self {
        Self {
            resolver,
            provider,
            step_timeout: Duration::from_secs(STEP_TIMEOUT_SECS),
            max_attempts: MAX_ATTEMPTS,
            backoff_unit: BACKOFF_UNIT,
        }
    }

    /// Override the per-step timeout budget.
    #[must_use]
    pub fn with_step_timeout(mut self, step_timeout: Duration) -> Self {
        self.step_timeout = step_timeout;
        self
    }

    /// Override the total resolve attempt count (minimum 1).
    #[must_use]
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    /// Run one full check and report the outcome to the observer.
    ///
    /// Never panics and never leaves residual state: every failure path
    /// returns the pipeline to idle, ready for the next call.
    pub async fn check(&self, raw: &str, observer: &mut dyn CheckObserver) {
        let code = match PostalCode::parse(raw) {
            Ok(code) => code,
            Err(error) => {
                info!("Rejected input {:?}: {}", raw, error);
                observer.on_validation_rejected(&error);
                return;
            }
        };

        match self.lookup(&code).await {
            Ok((location, reading)) => {
                let report = CheckReport::new(location, reading);
                info!(
                    "Check for {} succeeded: AQI {} ({:?})",
                    code, report.reading.aqi, report.tier
                );
                observer.on_success(&report);
            }
            Err(error) => {
                warn!("Check for {} failed: {}", code, error);
                observer.on_lookup_failed(&error);
            }
        }
    }

    /// Resolve the pincode and fetch a reading for it.
    ///
    /// # Errors
    ///
    /// Surfaces the categorized failure of whichever step failed; only
    /// the resolve step is retried.
    pub async fn lookup(
        &self,
        code: &PostalCode,
    ) -> Result<(Location, QualityReading), LookupError> {
        let location = self.resolve_with_retry(code).await?;
        info!("Resolved {} to {}", code, location.display_line());

        let reading = match timeout(self.step_timeout, self.provider.fetch(&location)).await {
            Ok(Ok(reading)) => reading,
            Ok(Err(error)) => {
                warn!("Quality fetch for {} failed: {}", location.city, error);
                return Err(LookupError::ServiceUnavailable);
            }
            Err(_) => {
                warn!("Quality fetch for {} timed out", location.city);
                return Err(LookupError::ServiceUnavailable);
            }
        };

        Ok((location, reading))
    }

    /// Resolve with the bounded retry policy: at most `max_attempts`
    /// tries, retrying only retryable categories, waiting
    /// `backoff_unit × n` before attempt `n`. The final attempt's error
    /// surfaces whatever its category.
    async fn resolve_with_retry(&self, code: &PostalCode) -> Result<Location, LookupError> {
        let mut attempt = 1;
        loop {
            debug!("Resolving {} (attempt {}/{})", code, attempt, self.max_attempts);
            let outcome = match timeout(self.step_timeout, self.resolver.resolve(code)).await {
                Ok(result) => result,
                Err(_) => Err(LookupError::Timeout),
            };

            match outcome {
                Ok(location) => return Ok(location),
                Err(error) => {
                    if attempt >= self.max_attempts || !error.is_retryable() {
                        return Err(error);
                    }
                    attempt += 1;
                    let delay = self.backoff_unit * attempt;
                    debug!("Resolve failed ({}), retrying in {:?}", error, delay);
                    sleep(delay).await;
                }
            }
        }
    }
}
