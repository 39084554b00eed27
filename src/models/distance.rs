use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::Add;

/// Geodesic distance in kilometers
/// Keeps displayed route distances apart from raw degree-space values
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct DistanceKm(pub f64);

impl DistanceKm {
    pub fn new(km: f64) -> Result<Self, String> {
        if km < 0.0 {
            return Err("Distance cannot be negative".to_string());
        }
        if !km.is_finite() {
            return Err("Distance must be a finite number".to_string());
        }
        Ok(DistanceKm(km))
    }

    pub fn zero() -> Self {
        DistanceKm(0.0)
    }

    /// Get the raw kilometers value
    pub fn as_km(self) -> f64 {
        self.0
    }
}

impl fmt::Display for DistanceKm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1} km", self.0)
    }
}

impl Add for DistanceKm {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        DistanceKm(self.0 + other.0)
    }
}

impl Sum for DistanceKm {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(DistanceKm::zero(), |acc, d| acc + d)
    }
}
