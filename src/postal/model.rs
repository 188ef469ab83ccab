use std::fmt;
use serde::Deserialize;
use thiserror::Error;

/// Status value the lookup service uses for a successful response
pub const SUCCESS_STATUS: &str = "Success";

/// A 6-digit Indian postal index number
#[derive(Debug, Hash, PartialEq, Eq, Clone, PartialOrd, Ord)]
pub struct PinCode(String);

impl PinCode {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Rejected PIN code text, with the reason
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidPinCode {
    #[error("PIN code [{0}] must be 6 digits long")]
    Length(String),
    #[error("PIN code [{0}] must contain only ASCII digits")]
    NotDigits(String),
}

impl TryFrom<&str> for PinCode {
    type Error = InvalidPinCode;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        if !value.bytes().all(|b| b.is_ascii_digit()) {
            return Err(InvalidPinCode::NotDigits(value.to_owned()));
        }
        if value.len() != 6 {
            return Err(InvalidPinCode::Length(value.to_owned()));
        }
        Ok(Self(value.to_owned()))
    }
}

impl fmt::Display for PinCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One post office served by a PIN code
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PostOffice {
    pub name: String,
    pub district: String,
    pub state: String,
}

impl PostOffice {
    pub fn new(name: impl Into<String>, district: impl Into<String>, state: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            district: district.into(),
            state: state.into(),
        }
    }

    /// post office name, district and state, in that order
    pub fn names(&self) -> [&str; 3] {
        [&self.name, &self.district, &self.state]
    }
}

/// One element of the JSON array returned by `/pincode/{code}`.
///
/// The service answers with `"PostOffice": null` when the code is unknown,
/// hence the `Option`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(super) struct LookupEnvelope {
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub post_office: Option<Vec<PostOffice>>,
}

impl LookupEnvelope {
    pub fn is_success(&self) -> bool {
        self.status == SUCCESS_STATUS
    }
}
