use std::{fmt, fs, path::Path, time::Duration};

use anyhow::Context;
use serde::Deserialize;
use tracing::warn;
use url::Url;

pub const DEFAULT_CONFIG_FILE: &str = "results.toml";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 10;

/// Names shown by the diagnostics display for the two required parameters.
pub const ENDPOINT_VAR: &str = "SUPABASE_URL";
pub const CREDENTIAL_VAR: &str = "SUPABASE_ANON_KEY";

/// Connection parameters for the record store.
///
/// Both parameters may be absent; the client still builds and every query
/// then fails with `StoreError::NotConfigured`.
#[derive(Clone)]
pub struct StoreConfig {
    pub endpoint: Option<Url>,
    pub credential: Option<String>,
    pub timeout: Duration,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            credential: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECONDS),
        }
    }
}

impl fmt::Debug for StoreConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoreConfig")
            .field("endpoint", &self.endpoint.as_ref().map(Url::as_str))
            .field("credential", &self.credential.as_ref().map(|_| "<redacted>"))
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl StoreConfig {
    pub fn new(endpoint: Url, credential: impl Into<String>) -> Self {
        Self {
            endpoint: Some(endpoint),
            credential: Some(credential.into()),
            ..Self::default()
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn diagnose(&self) -> ConfigDiagnostics {
        ConfigDiagnostics {
            endpoint_configured: self.endpoint.is_some(),
            credential_configured: self.credential.is_some(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfigDiagnostics {
    pub endpoint_configured: bool,
    pub credential_configured: bool,
}

impl ConfigDiagnostics {
    pub fn all_configured(&self) -> bool {
        self.endpoint_configured && self.credential_configured
    }

    pub fn entries(&self) -> [(&'static str, bool); 2] {
        [
            (ENDPOINT_VAR, self.endpoint_configured),
            (CREDENTIAL_VAR, self.credential_configured),
        ]
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    store_url: Option<String>,
    store_key: Option<String>,
    timeout_seconds: Option<u64>,
}

/// Defaults, then the TOML file, then environment variables.
///
/// A missing default file is fine; an explicit path that cannot be read or
/// parsed is an error.
pub fn load_settings(config_path: Option<&Path>) -> anyhow::Result<StoreConfig> {
    let mut settings = StoreConfig::default();

    match config_path {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("failed to read config file '{}'", path.display()))?;
            apply_file(&mut settings, &raw)
                .with_context(|| format!("failed to parse config file '{}'", path.display()))?;
        }
        None => {
            if let Ok(raw) = fs::read_to_string(DEFAULT_CONFIG_FILE) {
                if let Err(err) = apply_file(&mut settings, &raw) {
                    warn!(
                        file = DEFAULT_CONFIG_FILE,
                        error = %err,
                        "config: ignoring unparsable file"
                    );
                }
            }
        }
    }

    apply_env(&mut settings, |key| std::env::var(key).ok());
    Ok(settings)
}

fn apply_file(settings: &mut StoreConfig, raw: &str) -> anyhow::Result<()> {
    let file_cfg: FileConfig = toml::from_str(raw)?;
    if let Some(v) = file_cfg.store_url {
        settings.endpoint = parse_endpoint(&v);
    }
    if let Some(v) = file_cfg.store_key {
        settings.credential = non_empty(v);
    }
    if let Some(v) = file_cfg.timeout_seconds {
        settings.timeout = Duration::from_secs(v);
    }
    Ok(())
}

fn apply_env(settings: &mut StoreConfig, var: impl Fn(&str) -> Option<String>) {
    if let Some(v) = var(ENDPOINT_VAR) {
        settings.endpoint = parse_endpoint(&v);
    }
    if let Some(v) = var("APP__STORE_URL") {
        settings.endpoint = parse_endpoint(&v);
    }

    if let Some(v) = var(CREDENTIAL_VAR) {
        settings.credential = non_empty(v);
    }
    if let Some(v) = var("APP__STORE_KEY") {
        settings.credential = non_empty(v);
    }

    if let Some(v) = var("APP__TIMEOUT_SECONDS") {
        if let Ok(parsed) = v.parse::<u64>() {
            settings.timeout = Duration::from_secs(parsed);
        }
    }
}

fn parse_endpoint(raw: &str) -> Option<Url> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    match Url::parse(raw) {
        Ok(url) => Some(url),
        Err(err) => {
            warn!(error = %err, "config: store endpoint is not a valid URL");
            None
        }
    }
}

fn non_empty(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
