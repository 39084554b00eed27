use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Closed set of stop types every recommendation is grouped by.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum CategoryBucket {
    Restaurant,
    Entertainment,
    Services,
    Hotel,
    Other,
}

impl CategoryBucket {
    pub const ALL: [CategoryBucket; 5] = [
        CategoryBucket::Restaurant,
        CategoryBucket::Entertainment,
        CategoryBucket::Services,
        CategoryBucket::Hotel,
        CategoryBucket::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CategoryBucket::Restaurant => "restaurant",
            CategoryBucket::Entertainment => "entertainment",
            CategoryBucket::Services => "services",
            CategoryBucket::Hotel => "hotel",
            CategoryBucket::Other => "other",
        }
    }

    /// Exhaustive mapping from an arbitrary place type to a bucket.
    ///
    /// Unlike [`FromStr`], which only accepts the five bucket names, this folds
    /// raw place types (`cafe`, `museum`, `hostel`, ...) into their bucket and
    /// sends everything unknown to [`CategoryBucket::Other`].
    pub fn classify(raw: &str) -> CategoryBucket {
        let normalized = raw.trim().to_lowercase().replace([' ', '-'], "_");
        if let Ok(bucket) = normalized.parse() {
            return bucket;
        }

        match normalized.as_str() {
            "asian_restaurant" | "fast_food_restaurant" | "pizza_restaurant" | "steak_house"
            | "bar" | "cafe" | "coffee_shop" | "food_court" => CategoryBucket::Restaurant,
            "amusement_park" | "historical_landmark" | "hiking_area" | "museum"
            | "national_park" | "park" | "tourist_attraction" => CategoryBucket::Entertainment,
            "guest_house" | "hostel" | "resort_hotel" | "lodging" | "motel" | "cottage" => {
                CategoryBucket::Hotel
            }
            "car_rental" | "service" => CategoryBucket::Services,
            _ => CategoryBucket::Other,
        }
    }
}

impl fmt::Display for CategoryBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for CategoryBucket {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "restaurant" => Ok(CategoryBucket::Restaurant),
            "entertainment" => Ok(CategoryBucket::Entertainment),
            "services" => Ok(CategoryBucket::Services),
            "hotel" => Ok(CategoryBucket::Hotel),
            "other" => Ok(CategoryBucket::Other),
            _ => Err(format!("Unknown category bucket: {}", s)),
        }
    }
}

/// Field used to order candidates within a category.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum OptimizationCriterion {
    #[default]
    Rating,
    Distance,
    /// Accepted but not modelled; ranks exactly like `Rating`.
    Cost,
}

impl OptimizationCriterion {
    /// Parse without failing: unrecognized values behave as `Rating`.
    pub fn parse_lenient(s: &str) -> Self {
        s.parse().unwrap_or_else(|e| {
            tracing::warn!("{}, falling back to rating", e);
            OptimizationCriterion::Rating
        })
    }

    /// The criterion actually used for ordering.
    pub fn effective(self) -> Self {
        match self {
            OptimizationCriterion::Cost => OptimizationCriterion::Rating,
            other => other,
        }
    }
}

impl From<String> for OptimizationCriterion {
    fn from(s: String) -> Self {
        Self::parse_lenient(&s)
    }
}

impl fmt::Display for OptimizationCriterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptimizationCriterion::Rating => write!(f, "rating"),
            OptimizationCriterion::Distance => write!(f, "distance"),
            OptimizationCriterion::Cost => write!(f, "cost"),
        }
    }
}

impl FromStr for OptimizationCriterion {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "rating" | "ratings" => Ok(OptimizationCriterion::Rating),
            "distance" => Ok(OptimizationCriterion::Distance),
            "cost" => Ok(OptimizationCriterion::Cost),
            _ => Err(format!("Invalid optimization criterion: '{}'", s)),
        }
    }
}
