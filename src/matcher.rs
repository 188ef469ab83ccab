use std::collections::BTreeSet;
use crate::postal::PostOffice;

/// Lowercased post office, district and state names of one lookup
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LocationNameSet {
    names: BTreeSet<String>,
}

impl LocationNameSet {
    pub fn from_post_offices(offices: &[PostOffice]) -> Self {
        let names = offices.iter()
            .flat_map(|office| office.names())
            // an empty needle is contained in every address
            .filter(|name| !name.is_empty())
            .map(str::to_lowercase)
            .collect();
        Self { names }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    /// Whether any name occurs anywhere in the address, ignoring case.
    ///
    /// Plain substring containment: "Ind" is found inside "Indiranagar".
    pub fn matches(&self, address: &str) -> bool {
        self.find_in(address).is_some()
    }

    /// the first name (in sorted order) contained in the address
    pub fn find_in(&self, address: &str) -> Option<&str> {
        let address = address.to_lowercase();
        self.iter().find(|name| address.contains(name))
    }
}
