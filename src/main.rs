//! Command-line entry point: one pincode check per invocation.

use std::time::Duration;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

use aircheck::{
    AirCheckConfig, AirVisualProvider, AqiLevel, CheckObserver, CheckPipeline, CheckReport,
    ErrorStyle, LookupError, PincodeApiResolver, ProviderKind, QualityProvider, SAMPLE_PINCODES,
    SimulatedProvider, ValidationError,
};

/// Renders check outcomes to the console and remembers whether the
/// check failed so the process can exit non-zero.
#[derive(Debug, Default)]
struct ConsoleReporter {
    failed: bool,
}

impl CheckObserver for ConsoleReporter {
    fn on_validation_rejected(&mut self, error: &ValidationError) {
        self.failed = true;
        eprintln!("Input error: {error}");
        eprintln!("Hint: {}", error.suggestion());
    }

    fn on_lookup_failed(&mut self, error: &LookupError) {
        self.failed = true;
        let heading = match error.style() {
            ErrorStyle::Input => "Input error",
            ErrorStyle::Connection => "Connection error",
            ErrorStyle::Service => "Service error",
        };
        eprintln!("{heading}: {error}");
        if let Some(suggestion) = error.suggestion() {
            eprintln!("Hint: {suggestion}");
        }
    }

    fn on_success(&mut self, report: &CheckReport) {
        let reading = &report.reading;

        println!("{}  {}", report.tier.character(reading.aqi), report.tier.status_line(reading.aqi));
        println!("Location:       {}", report.location.display_line());
        println!("AQI:            {} ({})", reading.aqi, AqiLevel::classify(reading.aqi).description());
        println!("Main pollutant: {}", reading.dominant_pollutant);
        println!("Temperature:    {}", reading.format_temperature());
        println!("Humidity:       {}", reading.format_humidity());
        println!("Wind speed:     {}", reading.format_wind());
        println!();
        println!("{}", report.guidance.title);
        println!("{}", report.guidance.message);
        for tip in &report.tips {
            println!("  - {tip}");
        }
    }
}

fn print_usage() {
    eprintln!("Usage: aircheck <pincode>");
    eprintln!();
    eprintln!("Examples:");
    for sample in SAMPLE_PINCODES.iter().take(3) {
        eprintln!("  aircheck {}   # {}", sample.code, sample.city);
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = AirCheckConfig::load().context("Failed to load configuration")?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.logging.level.clone())),
        )
        .init();

    let Some(raw) = std::env::args().nth(1) else {
        print_usage();
        std::process::exit(2);
    };

    let resolver = PincodeApiResolver::new(&config.lookup)?;
    let provider: Box<dyn QualityProvider> = match config.quality.provider {
        ProviderKind::Simulated => Box::new(SimulatedProvider::new()),
        ProviderKind::AirVisual => Box::new(AirVisualProvider::new(&config.quality)?),
    };

    let pipeline = CheckPipeline::new(Box::new(resolver), provider)
        .with_step_timeout(Duration::from_secs(u64::from(config.lookup.timeout_seconds)))
        .with_max_attempts(config.lookup.max_attempts);

    let mut reporter = ConsoleReporter::default();
    pipeline.check(&raw, &mut reporter).await;

    if reporter.failed {
        std::process::exit(1);
    }
    Ok(())
}
