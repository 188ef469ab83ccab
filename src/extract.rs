use std::sync::LazyLock;
use regex::Regex;
use crate::postal::PinCode;

/// six ASCII digits with a non-digit or the text edge on both sides
static PINCODE_REG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?:^|[^0-9])([0-9]{6})(?:[^0-9]|$)").unwrap());

/// Find the PIN code of an address.
///
/// Only the leftmost standalone run of exactly six digits counts; longer runs
/// are skipped and any later code is ignored.
pub fn extract_pincode(address: &str) -> Option<PinCode> {
    let caps = PINCODE_REG.captures(address)?;
    PinCode::try_from(caps.get(1)?.as_str()).ok()
}
