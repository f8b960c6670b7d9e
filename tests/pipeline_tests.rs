//! Stub-driven pipeline tests: retry policy, failure categorization,
//! and observer reporting, all under paused tokio time.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use tokio::time::Instant;

use aircheck::{
    CheckObserver, CheckPipeline, CheckReport, Location, LocationResolver, LookupError, Pollutant,
    PostalCode, QualityProvider, QualityReading, Tier, ValidationError,
};

fn delhi() -> Location {
    Location::new(
        "Central Delhi".to_string(),
        "Delhi".to_string(),
        "India".to_string(),
        "New Delhi GPO".to_string(),
    )
}

fn reading(aqi: u32) -> QualityReading {
    QualityReading {
        aqi,
        dominant_pollutant: Pollutant::Pm25,
        temperature_celsius: 24.0,
        humidity_percent: 61.0,
        wind_speed_ms: 3.2,
        fetched_at: Utc::now(),
    }
}

/// Resolver that plays back a queue of outcomes and records the time of
/// every attempt.
#[derive(Clone, Default)]
struct ScriptedResolver {
    outcomes: Arc<Mutex<VecDeque<Result<Location, LookupError>>>>,
    attempt_times: Arc<Mutex<Vec<Instant>>>,
}

impl ScriptedResolver {
    fn with_outcomes(outcomes: Vec<Result<Location, LookupError>>) -> Self {
        Self {
            outcomes: Arc::new(Mutex::new(outcomes.into())),
            attempt_times: Arc::new(Mutex::new(Vec::new())),
        }
    }

    fn attempts(&self) -> usize {
        self.attempt_times.lock().unwrap().len()
    }

    fn gap_between_attempts(&self, first: usize, second: usize) -> Duration {
        let times = self.attempt_times.lock().unwrap();
        times[second] - times[first]
    }
}

#[async_trait]
impl LocationResolver for ScriptedResolver {
    async fn resolve(&self, _code: &PostalCode) -> Result<Location, LookupError> {
        self.attempt_times.lock().unwrap().push(Instant::now());
        self.outcomes
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(delhi()))
    }
}

/// Resolver that never answers within the step budget.
#[derive(Clone, Default)]
struct HangingResolver {
    attempts: Arc<AtomicU32>,
}

#[async_trait]
impl LocationResolver for HangingResolver {
    async fn resolve(&self, _code: &PostalCode) -> Result<Location, LookupError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(Duration::from_secs(3600)).await;
        Ok(delhi())
    }
}

#[derive(Clone)]
struct StubProvider {
    outcome: Result<QualityReading, LookupError>,
    calls: Arc<AtomicU32>,
}

impl StubProvider {
    fn ok(aqi: u32) -> Self {
        Self {
            outcome: Ok(reading(aqi)),
            calls: Arc::new(AtomicU32::new(0)),
        }
    }

    fn failing(error: LookupError) -> Self {
        Self {
            outcome: Err(error),
            calls: Arc::new(AtomicU32::new(0)),
        }
    }
}

#[async_trait]
impl QualityProvider for StubProvider {
    async fn fetch(&self, _location: &Location) -> Result<QualityReading, LookupError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.outcome.clone()
    }
}

#[derive(Default)]
struct RecordingObserver {
    rejected: Vec<ValidationError>,
    failed: Vec<LookupError>,
    succeeded: Vec<CheckReport>,
}

impl CheckObserver for RecordingObserver {
    fn on_validation_rejected(&mut self, error: &ValidationError) {
        self.rejected.push(error.clone());
    }

    fn on_lookup_failed(&mut self, error: &LookupError) {
        self.failed.push(error.clone());
    }

    fn on_success(&mut self, report: &CheckReport) {
        self.succeeded.push(report.clone());
    }
}

#[tokio::test(start_paused = true)]
async fn test_network_failure_exhausts_two_attempts_with_backoff() {
    let resolver = ScriptedResolver::with_outcomes(vec![
        Err(LookupError::Network),
        Err(LookupError::Network),
    ]);
    let provider = StubProvider::ok(45);
    let pipeline = CheckPipeline::new(Box::new(resolver.clone()), Box::new(provider.clone()));

    let mut observer = RecordingObserver::default();
    pipeline.check("110001", &mut observer).await;

    assert_eq!(observer.failed, vec![LookupError::Network]);
    assert!(observer.succeeded.is_empty());
    // No third attempt
    assert_eq!(resolver.attempts(), 2);
    // Retry attempt 2 waits 1000ms x 2
    assert!(resolver.gap_between_attempts(0, 1) >= Duration::from_millis(2000));
    // The quality step never ran
    assert_eq!(provider.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test(start_paused = true)]
async fn test_not_found_fails_immediately_without_retry() {
    let resolver = ScriptedResolver::with_outcomes(vec![Err(LookupError::NotFound)]);
    let pipeline = CheckPipeline::new(Box::new(resolver.clone()), Box::new(StubProvider::ok(45)));

    let mut observer = RecordingObserver::default();
    pipeline.check("110001", &mut observer).await;

    assert_eq!(observer.failed, vec![LookupError::NotFound]);
    assert_eq!(resolver.attempts(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_retryable_failure_then_success() {
    let resolver =
        ScriptedResolver::with_outcomes(vec![Err(LookupError::Timeout), Ok(delhi())]);
    let pipeline = CheckPipeline::new(Box::new(resolver.clone()), Box::new(StubProvider::ok(45)));

    let mut observer = RecordingObserver::default();
    pipeline.check("110001", &mut observer).await;

    assert_eq!(resolver.attempts(), 2);
    assert_eq!(observer.succeeded.len(), 1);
    assert!(observer.failed.is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_end_to_end_good_tier_report() {
    let resolver = ScriptedResolver::with_outcomes(vec![Ok(delhi())]);
    let pipeline = CheckPipeline::new(Box::new(resolver), Box::new(StubProvider::ok(45)));

    let mut observer = RecordingObserver::default();
    pipeline.check("110001", &mut observer).await;

    let report = &observer.succeeded[0];
    assert_eq!(report.location.city, "Central Delhi");
    assert_eq!(report.location.name, "New Delhi GPO");
    assert_eq!(report.reading.aqi, 45);
    assert_eq!(report.reading.dominant_pollutant, Pollutant::Pm25);
    assert_eq!(report.tier, Tier::Good);
    assert_eq!(report.guidance.title, "Excellent Air Quality!");
    assert!(!report.tips.iter().any(|t| t.contains("EMERGENCY")));
}

#[tokio::test(start_paused = true)]
async fn test_emergency_tip_above_200() {
    let pipeline = CheckPipeline::new(
        Box::new(ScriptedResolver::default()),
        Box::new(StubProvider::ok(205)),
    );

    let mut observer = RecordingObserver::default();
    pipeline.check("110001", &mut observer).await;

    let report = &observer.succeeded[0];
    assert_eq!(report.tier, Tier::Unhealthy);
    assert!(report.tips[0].contains("EMERGENCY"));
    assert_eq!(report.tips.len(), report.guidance.tips.len() + 1);
}

#[tokio::test(start_paused = true)]
async fn test_quality_failure_is_service_unavailable_and_not_retried() {
    let provider = StubProvider::failing(LookupError::Network);
    let pipeline = CheckPipeline::new(
        Box::new(ScriptedResolver::default()),
        Box::new(provider.clone()),
    );

    let mut observer = RecordingObserver::default();
    pipeline.check("110001", &mut observer).await;

    // Whatever the provider reported, the category is ServiceUnavailable
    assert_eq!(observer.failed, vec![LookupError::ServiceUnavailable]);
    assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test(start_paused = true)]
async fn test_validation_rejection_skips_lookup() {
    let resolver = ScriptedResolver::default();
    let pipeline = CheckPipeline::new(Box::new(resolver.clone()), Box::new(StubProvider::ok(45)));

    let mut observer = RecordingObserver::default();
    pipeline.check("123456", &mut observer).await;

    assert_eq!(observer.rejected, vec![ValidationError::SequentialPattern]);
    assert!(observer.failed.is_empty());
    assert_eq!(resolver.attempts(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_hanging_resolver_times_out_and_retries_once() {
    let resolver = HangingResolver::default();
    let pipeline = CheckPipeline::new(Box::new(resolver.clone()), Box::new(StubProvider::ok(45)));

    let mut observer = RecordingObserver::default();
    pipeline.check("110001", &mut observer).await;

    // Timeout is retryable, so both attempts ran before the error surfaced
    assert_eq!(observer.failed, vec![LookupError::Timeout]);
    assert_eq!(resolver.attempts.load(Ordering::SeqCst), 2);
}

#[tokio::test(start_paused = true)]
async fn test_pipeline_is_reusable_after_failure() {
    let resolver = ScriptedResolver::with_outcomes(vec![Err(LookupError::NotFound), Ok(delhi())]);
    let pipeline = CheckPipeline::new(Box::new(resolver), Box::new(StubProvider::ok(45)));

    let mut observer = RecordingObserver::default();
    pipeline.check("110001", &mut observer).await;
    pipeline.check("110001", &mut observer).await;

    assert_eq!(observer.failed, vec![LookupError::NotFound]);
    assert_eq!(observer.succeeded.len(), 1);
}
