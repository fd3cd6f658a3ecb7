//! Runtime configuration assembled from the process environment.
//!
//! Settings are read once at startup and passed into each component;
//! nothing reads environment variables after that.

use std::env;
use std::str::FromStr;

pub const DEFAULT_KEYWORDS: &str = "analyst,developer,engineer";
pub const DEFAULT_SMTP_PORT: u16 = 587;
pub const DEFAULT_INTERVAL_HOURS: u64 = 24;

/// SMTP endpoint and credentials.
#[derive(Debug, Clone, Default)]
pub struct SmtpSettings {
    pub server: String,
    pub port: u16,
    pub user: String,
    pub password: String,
}

/// Read-only configuration for one process run.
#[derive(Debug, Clone, Default)]
pub struct Settings {
    pub smtp: SmtpSettings,
    pub recipients: Vec<String>,
    pub keywords: Vec<String>,
    pub schedule_interval_hours: u64,
}

impl Settings {
    /// Assemble settings from environment variables, falling back to
    /// defaults for anything missing or unparsable.
    pub fn from_env() -> Self {
        Settings {
            smtp: SmtpSettings {
                server: env::var("SMTP_SERVER").unwrap_or_default(),
                port: parse_or("SMTP_PORT", DEFAULT_SMTP_PORT),
                user: env::var("SMTP_USER").unwrap_or_default(),
                password: env::var("SMTP_PASSWORD").unwrap_or_default(),
            },
            recipients: split_list(&env::var("RECIPIENTS").unwrap_or_default()),
            keywords: split_list(
                &env::var("KEYWORDS").unwrap_or_else(|_| DEFAULT_KEYWORDS.to_string()),
            ),
            schedule_interval_hours: parse_or("SCHEDULE_INTERVAL_HOURS", DEFAULT_INTERVAL_HOURS),
        }
    }
}

fn parse_or<T: FromStr>(var: &str, default: T) -> T {
    env::var(var)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

/// Split a comma-separated value into trimmed, non-empty entries.
pub fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
