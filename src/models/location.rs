use crate::error::{AppError, Result};
use crate::models::Coordinates;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Location {
    pub id: String,
    pub name: String,
    pub coordinates: Coordinates,
}

impl Location {
    pub fn new(id: impl Into<String>, name: impl Into<String>, coordinates: Coordinates) -> Self {
        Location {
            id: id.into(),
            name: name.into(),
            coordinates,
        }
    }
}

/// Read-only lookup table of reference locations keyed by unique name.
///
/// Iteration is always in lexicographic name order, which is what makes
/// nearest-location ties resolve deterministically.
#[derive(Debug, Clone, Default)]
pub struct LocationIndex {
    by_name: BTreeMap<String, Location>,
}

impl LocationIndex {
    pub fn from_locations(locations: Vec<Location>) -> Result<Self> {
        let mut by_name = BTreeMap::new();
        for location in locations {
            if by_name.contains_key(&location.name) {
                return Err(AppError::Validation(format!(
                    "Duplicate location name in snapshot: {}",
                    location.name
                )));
            }
            by_name.insert(location.name.clone(), location);
        }
        Ok(LocationIndex { by_name })
    }

    pub fn get(&self, name: &str) -> Option<&Location> {
        self.by_name.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Location> {
        self.by_name.values()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.by_name.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}
