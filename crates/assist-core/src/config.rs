//! Runtime configuration for the responder.
//!
//! Resolved once at process startup from environment values and then handed to
//! [`crate::Responder::from_config`]. Nothing in the query path reads the environment.

use crate::constants::{DEFAULT_REMOTE_TIMEOUT_SECS, DEFAULT_REMOTE_URL, MAX_REMOTE_TIMEOUT_SECS};
use crate::{AssistError, AssistResult, ThinkingDelay};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Responder configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct AssistConfig {
    remote_base_url: String,
    remote_timeout: Duration,
    thinking_delay: ThinkingDelay,
    knowledge_dir: Option<PathBuf>,
}

impl AssistConfig {
    /// Create a new `AssistConfig`.
    ///
    /// # Errors
    ///
    /// Returns [`AssistError::InvalidInput`] if the base URL is blank or not `http(s)`.
    pub fn new(
        remote_base_url: String,
        remote_timeout: Duration,
        thinking_delay: ThinkingDelay,
        knowledge_dir: Option<PathBuf>,
    ) -> AssistResult<Self> {
        let remote_base_url = remote_base_url.trim().trim_end_matches('/').to_string();
        if remote_base_url.is_empty() {
            return Err(AssistError::InvalidInput(
                "remote_base_url cannot be empty".into(),
            ));
        }
        if !(remote_base_url.starts_with("http://") || remote_base_url.starts_with("https://")) {
            return Err(AssistError::InvalidInput(format!(
                "remote_base_url must start with http:// or https:// (got '{remote_base_url}')"
            )));
        }

        Ok(Self {
            remote_base_url,
            remote_timeout,
            thinking_delay,
            knowledge_dir,
        })
    }

    pub fn remote_base_url(&self) -> &str {
        &self.remote_base_url
    }

    pub fn remote_timeout(&self) -> Duration {
        self.remote_timeout
    }

    pub fn thinking_delay(&self) -> ThinkingDelay {
        self.thinking_delay
    }

    pub fn knowledge_dir(&self) -> Option<&Path> {
        self.knowledge_dir.as_deref()
    }

    /// Reads `ASSIST_REMOTE_URL`, `ASSIST_REMOTE_TIMEOUT_SECS`, `ASSIST_THINKING_DELAY_MS` and
    /// `ASSIST_KNOWLEDGE_DIR`.
    ///
    /// Intended for binaries at startup only.
    pub fn from_env() -> AssistResult<Self> {
        Self::new(
            remote_url_from_env_value(std::env::var("ASSIST_REMOTE_URL").ok()),
            remote_timeout_from_env_value(std::env::var("ASSIST_REMOTE_TIMEOUT_SECS").ok())?,
            thinking_delay_from_env_value(std::env::var("ASSIST_THINKING_DELAY_MS").ok())?,
            knowledge_dir_from_env_value(std::env::var("ASSIST_KNOWLEDGE_DIR").ok())?,
        )
    }

    /// Same configuration with a different thinking delay.
    pub fn with_thinking_delay(mut self, thinking_delay: ThinkingDelay) -> Self {
        self.thinking_delay = thinking_delay;
        self
    }

    /// Same configuration pointing at a different remote service.
    pub fn with_remote_base_url(self, remote_base_url: String) -> AssistResult<Self> {
        Self::new(
            remote_base_url,
            self.remote_timeout,
            self.thinking_delay,
            self.knowledge_dir,
        )
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_u64(name: &str, raw: &str) -> AssistResult<u64> {
    raw.parse::<u64>().map_err(|_| {
        AssistError::InvalidInput(format!("{name} must be a whole number (got '{raw}')"))
    })
}

/// Resolve the remote base URL from an optional environment value.
pub fn remote_url_from_env_value(value: Option<String>) -> String {
    non_blank(value).unwrap_or_else(|| DEFAULT_REMOTE_URL.to_string())
}

/// Resolve the remote timeout from an optional value in whole seconds.
///
/// Blank or missing values fall back to the default. Accepted range is `1..=120`.
pub fn remote_timeout_from_env_value(value: Option<String>) -> AssistResult<Duration> {
    let Some(raw) = non_blank(value) else {
        return Ok(Duration::from_secs(DEFAULT_REMOTE_TIMEOUT_SECS));
    };

    let secs = parse_u64("remote timeout", &raw)?;
    if !(1..=MAX_REMOTE_TIMEOUT_SECS).contains(&secs) {
        return Err(AssistError::InvalidInput(format!(
            "remote timeout must be between 1 and {MAX_REMOTE_TIMEOUT_SECS} seconds (got {secs})"
        )));
    }
    Ok(Duration::from_secs(secs))
}

/// Resolve the thinking delay from an optional value in milliseconds.
///
/// Accepts `"min-max"` or a single fixed value. `"0"` disables the pause. Blank or missing
/// values fall back to the default band.
pub fn thinking_delay_from_env_value(value: Option<String>) -> AssistResult<ThinkingDelay> {
    let Some(raw) = non_blank(value) else {
        return Ok(ThinkingDelay::default());
    };

    let (min, max) = match raw.split_once('-') {
        Some((lo, hi)) => (
            parse_u64("thinking delay", lo.trim())?,
            parse_u64("thinking delay", hi.trim())?,
        ),
        None => {
            let fixed = parse_u64("thinking delay", &raw)?;
            (fixed, fixed)
        }
    };

    ThinkingDelay::new(Duration::from_millis(min), Duration::from_millis(max))
}

/// Resolve an optional knowledge override directory.
///
/// A provided path must exist and be a directory.
pub fn knowledge_dir_from_env_value(value: Option<String>) -> AssistResult<Option<PathBuf>> {
    let Some(raw) = non_blank(value) else {
        return Ok(None);
    };

    let dir = PathBuf::from(raw);
    if !dir.is_dir() {
        return Err(AssistError::InvalidInput(format!(
            "knowledge directory not found: {}",
            dir.display()
        )));
    }
    Ok(Some(dir))
}
