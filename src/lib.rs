//! Check that the PIN code written in an Indian postal address belongs to
//! the places the address names, using the api.postalpincode.in lookup.

pub mod config;
pub mod extract;
pub mod matcher;
pub mod postal;
pub mod record;
pub mod utils;
pub mod validate;

pub use extract::extract_pincode;
pub use postal::{PinCode, PincodeLookup, PostOffice, PostalClient};
pub use validate::{ValidationResult, Validator};
