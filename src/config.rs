// src/config.rs

use crate::errors::PipelineError;
use crate::pipeline::{DriverSettings, PacingPolicy};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use url::Url;

pub const DEFAULT_SEARCH_URL: &str = "https://www.autotrader.ca/cars/on/?rcp=100&rcs=0&srt=9&pRng=%2C30000&prx=-2&prv=Ontario&loc=M5V%202G7&body=SUV&hprc=True&wcp=True&inMarket=advancedSearch&pg={page}";
pub const DEFAULT_BASE_ORIGIN: &str = "https://www.autotrader.ca";

/// Where the notification goes and how it is sent.
#[derive(Debug, Clone)]
pub struct EmailConfig {
    pub recipient: String,
    pub subject: String,
    pub brevo_api_key: String,
    pub sender_email: String,
    pub sender_name: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub num_pages: u32,
    /// Minimum discount, in whole dollars, for a listing to be reported.
    pub threshold: u64,
    pub search_url: String,
    pub base_origin: String,
    pub pacing: PacingPolicy,
    /// Pacing between detail-page visits in the specification pass.
    pub spec_pacing: PacingPolicy,
    pub wait_timeout: Duration,
    pub settle: Duration,
    pub output_dir: PathBuf,
    /// `None` when any of the mail settings is missing; the run then skips
    /// sending.
    pub email: Option<EmailConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            num_pages: 10,
            threshold: 3000,
            search_url: DEFAULT_SEARCH_URL.to_string(),
            base_origin: DEFAULT_BASE_ORIGIN.to_string(),
            pacing: PacingPolicy::from_secs(5, 15),
            spec_pacing: PacingPolicy::from_secs(10, 18),
            wait_timeout: Duration::from_secs(20),
            settle: Duration::from_secs(2),
            output_dir: PathBuf::from("."),
            email: None,
        }
    }
}

impl Config {
    /// Loads `.env` if present, then reads the process environment.
    pub fn from_env() -> Result<Self, PipelineError> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from any key lookup; unset keys keep their defaults.
    /// Only number syntax is checked here, the rest is left to `validate`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, PipelineError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let d = Config::default();

        let num_pages = parse_or(&lookup, "AUTOTRADER_PAGES", d.num_pages)?;
        let threshold = parse_or(&lookup, "AUTOTRADER_THRESHOLD", d.threshold)?;
        let search_url = lookup("AUTOTRADER_SEARCH_URL").unwrap_or(d.search_url);
        let base_origin = lookup("AUTOTRADER_BASE_ORIGIN").unwrap_or(d.base_origin);

        let pacing = PacingPolicy::from_secs(
            parse_or(&lookup, "PACING_MIN_SECS", d.pacing.min.as_secs())?,
            parse_or(&lookup, "PACING_MAX_SECS", d.pacing.max.as_secs())?,
        );
        let spec_pacing = PacingPolicy::from_secs(
            parse_or(&lookup, "SPEC_PACING_MIN_SECS", d.spec_pacing.min.as_secs())?,
            parse_or(&lookup, "SPEC_PACING_MAX_SECS", d.spec_pacing.max.as_secs())?,
        );
        let wait_timeout = Duration::from_secs(parse_or(
            &lookup,
            "WAIT_TIMEOUT_SECS",
            d.wait_timeout.as_secs(),
        )?);
        let settle = Duration::from_secs(parse_or(&lookup, "SETTLE_SECS", d.settle.as_secs())?);
        let output_dir = lookup("OUTPUT_DIR").map(PathBuf::from).unwrap_or(d.output_dir);

        let email = match (
            lookup("RECIPIENT_EMAIL"),
            lookup("BREVO_API_KEY"),
            lookup("SENDER_EMAIL"),
        ) {
            (Some(recipient), Some(brevo_api_key), Some(sender_email)) => Some(EmailConfig {
                recipient,
                subject: lookup("EMAIL_SUBJECT").unwrap_or_else(|| "Autotrader Data".to_string()),
                brevo_api_key,
                sender_email,
                sender_name: lookup("SENDER_NAME")
                    .unwrap_or_else(|| "Autotrader Watch".to_string()),
            }),
            _ => None,
        };

        Ok(Self {
            num_pages,
            threshold,
            search_url,
            base_origin,
            pacing,
            spec_pacing,
            wait_timeout,
            settle,
            output_dir,
            email,
        })
    }

    /// Checked once every override (env, then CLI) has been applied.
    pub fn validate(&self) -> Result<(), PipelineError> {
        if self.num_pages == 0 {
            return Err(PipelineError::Config("page count must be at least 1".into()));
        }
        if self.pacing.max.is_zero() {
            return Err(PipelineError::Config(
                "PACING_MAX_SECS must be at least 1".into(),
            ));
        }
        if self.spec_pacing.max.is_zero() {
            return Err(PipelineError::Config(
                "SPEC_PACING_MAX_SECS must be at least 1".into(),
            ));
        }
        if !self.search_url.contains("{page}") {
            return Err(PipelineError::Config(
                "search URL needs a {page} placeholder".into(),
            ));
        }
        Url::parse(&self.search_url.replace("{page}", "1"))
            .map_err(|e| PipelineError::Config(format!("invalid search URL: {e}")))?;

        let origin = Url::parse(&self.base_origin)
            .map_err(|e| PipelineError::Config(format!("invalid base origin: {e}")))?;
        if origin.path() != "/" || self.base_origin.ends_with('/') {
            return Err(PipelineError::Config(
                "base origin must be scheme and host only, without a trailing slash".into(),
            ));
        }
        Ok(())
    }

    pub fn driver_settings(&self) -> DriverSettings {
        DriverSettings {
            search_url: self.search_url.clone(),
            base_origin: self.base_origin.clone(),
            wait_timeout: self.wait_timeout,
            settle: self.settle,
            pacing: self.pacing,
        }
    }
}

fn parse_or<T, F>(lookup: &F, key: &str, default: T) -> Result<T, PipelineError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| PipelineError::Config(format!("{key} must be a valid number: {e}"))),
        None => Ok(default),
    }
}
