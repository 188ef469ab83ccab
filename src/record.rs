use std::path::Path;
use color_eyre::eyre::WrapErr;
use serde::Serialize;
use crate::validate::{Outcome, ValidationResult};

/// One row of the batch report
#[derive(Debug, Serialize)]
pub struct Record {
    address: String,
    pincode: Option<String>,
    outcome: Outcome,
}

impl Record {
    pub fn from_address_and_result(address: String, result: &ValidationResult) -> Self {
        Self {
            address,
            pincode: result.pincode().map(|pin| pin.to_string()),
            outcome: result.outcome(),
        }
    }
}

/// write records to a CSV file, creating its directory when missing
pub fn save_records(records: &[Record], save_path: impl AsRef<Path>) -> color_eyre::Result<()> {
    let save_path = save_path.as_ref();
    if let Some(parent) = save_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)
                .wrap_err_with(|| format!("cannot create [{}]", parent.display()))?;
        }
    }
    let mut wtr = csv::Writer::from_path(save_path)
        .wrap_err_with(|| format!("cannot open [{}]", save_path.display()))?;
    for record in records {
        wtr.serialize(record)?;
    }
    wtr.flush()?;
    Ok(())
}
