use chrono::{NaiveDate, Utc};
use chrono_tz::Tz;
use eyre::{eyre, Result};
use std::{env, time::Duration};

/// Configuration for talking to the ClinicDesk API.
///
/// Loaded from the environment:
///
/// - `CLINICDESK_API_URL`: base URL of the API (defaults to `http://localhost:3000`)
/// - `CLINICDESK_TIMEOUT_SECONDS`: per-request timeout (defaults to 10)
/// - `CLINICDESK_TIMEZONE`: IANA zone the clinic operates in (defaults to `UTC`)
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the API, without a trailing slash
    pub api_url: String,
    /// Timeout applied to every request
    pub timeout: Duration,
    /// Zone used to decide what "today" is for the clinic
    pub timezone: Tz,
}

impl ClientConfig {
    pub const DEFAULT_API_URL: &'static str = "http://localhost:3000";
    pub const DEFAULT_TIMEOUT_SECONDS: u64 = 10;

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let api_url = env::var("CLINICDESK_API_URL")
            .unwrap_or_else(|_| Self::DEFAULT_API_URL.to_string());

        let timeout = match env::var("CLINICDESK_TIMEOUT_SECONDS") {
            Ok(raw) => raw
                .parse::<u64>()
                .map_err(|_| eyre!("CLINICDESK_TIMEOUT_SECONDS must be a whole number of seconds"))?,
            Err(_) => Self::DEFAULT_TIMEOUT_SECONDS,
        };

        let timezone = match env::var("CLINICDESK_TIMEZONE") {
            Ok(raw) => parse_timezone(&raw)?,
            Err(_) => Tz::UTC,
        };

        Ok(Self::new(api_url).with_timeout(Duration::from_secs(timeout)).with_timezone(timezone))
    }

    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into().trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(Self::DEFAULT_TIMEOUT_SECONDS),
            timezone: Tz::UTC,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_timezone(mut self, timezone: Tz) -> Self {
        self.timezone = timezone;
        self
    }

    /// Today's calendar date in the clinic's zone
    pub fn today(&self) -> NaiveDate {
        Utc::now().with_timezone(&self.timezone).date_naive()
    }
}

/// Parses an IANA zone name such as `Asia/Seoul`
pub fn parse_timezone(raw: &str) -> Result<Tz> {
    raw.trim()
        .parse::<Tz>()
        .map_err(|_| eyre!("Unknown timezone: {}", raw))
}
