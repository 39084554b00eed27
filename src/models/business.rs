use crate::models::{CategoryBucket, Coordinates};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Business {
    pub id: String,
    pub name: String,
    pub address: String,
    /// Free-text category as stored in the snapshot
    pub category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Coordinates>,
    /// Average rating 0-5; missing ratings are stored as 0
    pub rating: f64,
}

impl Business {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        address: impl Into<String>,
        category: impl Into<String>,
        coordinates: Option<Coordinates>,
        rating: f64,
    ) -> Self {
        Business {
            id: id.into(),
            name: name.into(),
            address: address.into(),
            category: category.into(),
            coordinates,
            rating: if rating.is_finite() {
                rating.clamp(0.0, 5.0)
            } else {
                0.0
            },
        }
    }

    /// Bucket this business ranks under, if its category names one exactly.
    pub fn bucket(&self) -> Option<CategoryBucket> {
        self.category.parse().ok()
    }

    /// Whole stars shown for this business, 0-5. Halves round to even.
    pub fn star_count(&self) -> usize {
        self.rating.round_ties_even().clamp(0.0, 5.0) as usize
    }
}

/// Read-only snapshot of every business, in snapshot order.
#[derive(Debug, Clone, Default)]
pub struct BusinessCatalog {
    businesses: Vec<Business>,
}

impl BusinessCatalog {
    pub fn new(businesses: Vec<Business>) -> Self {
        BusinessCatalog { businesses }
    }

    pub fn as_slice(&self) -> &[Business] {
        &self.businesses
    }

    pub fn iter(&self) -> impl Iterator<Item = &Business> {
        self.businesses.iter()
    }

    pub fn len(&self) -> usize {
        self.businesses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.businesses.is_empty()
    }

    /// Number of businesses that can take part in location assignment
    pub fn located_count(&self) -> usize {
        self.businesses
            .iter()
            .filter(|b| b.coordinates.is_some())
            .count()
    }
}
