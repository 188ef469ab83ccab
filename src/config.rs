use color_eyre::eyre::{bail, eyre};
use color_eyre::Result;

const DEFAULT_BASE_URL: &str = "https://api.postalpincode.in";
const DEFAULT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_CONCURRENCY: usize = 5;

const BASE_URL_VAR: &str = "PINCODE_API_BASE_URL";
const TIMEOUT_VAR: &str = "PINCODE_TIMEOUT_SECS";
const CONCURRENCY_VAR: &str = "PINCODE_CONCURRENCY";

/// Runtime settings, all of them optional environment variables
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// base URL of the lookup service, without the `/pincode/{code}` path
    pub base_url: String,
    pub timeout_secs: u64,
    /// number of addresses validated at once in batch mode
    pub concurrency: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            concurrency: DEFAULT_CONCURRENCY,
        }
    }
}

impl Settings {
    pub fn from_env() -> Result<Self> {
        Self::from_source(|key| std::env::var(key).ok())
    }

    fn from_source(var: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut settings = Self::default();
        if let Some(base_url) = var(BASE_URL_VAR).filter(|s| !s.trim().is_empty()) {
            settings.base_url = base_url.trim().to_owned();
        }
        if let Some(timeout) = var(TIMEOUT_VAR) {
            settings.timeout_secs = timeout.trim().parse()
                .map_err(|e| eyre!("invalid `{}` [{}]: {}", TIMEOUT_VAR, timeout, e))?;
        }
        if let Some(concurrency) = var(CONCURRENCY_VAR) {
            settings.concurrency = concurrency.trim().parse()
                .map_err(|e| eyre!("invalid `{}` [{}]: {}", CONCURRENCY_VAR, concurrency, e))?;
            if settings.concurrency == 0 {
                bail!("`{}` must be greater than zero", CONCURRENCY_VAR);
            }
        }
        Ok(settings)
    }
}
