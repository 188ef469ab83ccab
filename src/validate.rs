use std::fmt;
use futures::StreamExt;
use log::{debug, info, warn};
use serde::Serialize;
use crate::extract::extract_pincode;
use crate::matcher::LocationNameSet;
use crate::postal::{PinCode, PincodeLookup};

/// Outcome of validating one address
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ValidationResult {
    NoCodeFound,
    /// lookup failed or the service does not know the code
    InvalidCode(PinCode),
    Match(PinCode),
    NoMatch(PinCode),
}

impl ValidationResult {
    pub fn pincode(&self) -> Option<&PinCode> {
        match self {
            ValidationResult::NoCodeFound => None,
            ValidationResult::InvalidCode(pin)
            | ValidationResult::Match(pin)
            | ValidationResult::NoMatch(pin) => Some(pin),
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationResult::Match(_))
    }

    pub fn outcome(&self) -> Outcome {
        match self {
            ValidationResult::NoCodeFound => Outcome::NoCodeFound,
            ValidationResult::InvalidCode(_) => Outcome::InvalidCode,
            ValidationResult::Match(_) => Outcome::Match,
            ValidationResult::NoMatch(_) => Outcome::NoMatch,
        }
    }
}

impl fmt::Display for ValidationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationResult::NoCodeFound => write!(f, "no PIN code found in address"),
            ValidationResult::InvalidCode(pin) => write!(f, "invalid PIN code {pin}"),
            ValidationResult::Match(pin) => write!(f, "PIN code {pin} matches the address"),
            ValidationResult::NoMatch(pin) => write!(f, "PIN code {pin} does not match the address"),
        }
    }
}

/// Tag of a [`ValidationResult`] without its PIN code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub enum Outcome {
    NoCodeFound,
    InvalidCode,
    Match,
    NoMatch,
}

/// Checks that the PIN code of an address belongs to the places it names
pub struct Validator<L> {
    lookup: L,
}

impl<L: PincodeLookup> Validator<L> {
    pub fn new(lookup: L) -> Self {
        Self { lookup }
    }

    #[tracing::instrument(level = "debug", skip(self))]
    pub async fn validate(&self, address: &str) -> ValidationResult {
        let Some(pincode) = extract_pincode(address) else {
            return ValidationResult::NoCodeFound;
        };

        let offices = match self.lookup.lookup(&pincode).await {
            Ok(offices) => offices,
            Err(e) => {
                warn!("lookup of [{}] failed: {}", pincode, e);
                return ValidationResult::InvalidCode(pincode);
            }
        };

        let names = LocationNameSet::from_post_offices(&offices);
        debug!("[{}] resolves to [{}] location names", pincode, names.len());
        match names.find_in(address) {
            Some(name) => {
                debug!("[{}] matched on [{}]", pincode, name);
                ValidationResult::Match(pincode)
            }
            None => ValidationResult::NoMatch(pincode),
        }
    }

    /// Validate independent addresses concurrently, keeping input order.
    pub async fn validate_all(&self, addresses: Vec<String>, concurrency: usize) -> Vec<(String, ValidationResult)> {
        let total = addresses.len();
        let mut results = futures::stream::iter(addresses).enumerate().map(move |(idx, address)| {
            async move {
                info!("[{}/{total}] validating [{}]", idx + 1, address);
                let result = self.validate(&address).await;
                (idx, address, result)
            }
        })
            .buffer_unordered(concurrency.max(1))
            .collect::<Vec<_>>()
            .await;

        results.sort_by_key(|(idx, _, _)| *idx);
        results.into_iter().map(|(_, address, result)| (address, result)).collect()
    }
}
