use crate::models::{Business, CategoryBucket, Coordinates, OptimizationCriterion};
use crate::services::route_distance::planar_distance;
use std::collections::BTreeMap;

/// At most `top_n` businesses of one bucket, best first.
pub type RankedCandidateList = Vec<Business>;

/// One ranked list per bucket; all five buckets are always present.
pub type RankedCategories = BTreeMap<CategoryBucket, RankedCandidateList>;

/// Trait for candidate ordering strategies
pub trait RankingStrategy: Send + Sync {
    fn name(&self) -> &'static str;

    /// Stable in-place ordering, best candidate first
    fn order(&self, businesses: &mut Vec<Business>);
}

/// Highest rating first; equal ratings keep snapshot order
pub struct RatingStrategy;

impl RankingStrategy for RatingStrategy {
    fn name(&self) -> &'static str {
        "rating"
    }

    fn order(&self, businesses: &mut Vec<Business>) {
        businesses.sort_by(|a, b| b.rating.total_cmp(&a.rating));
    }
}

/// Closest to a reference point first (planar metric); unlocated businesses last
pub struct DistanceStrategy {
    reference_point: Coordinates,
}

impl DistanceStrategy {
    pub fn new(reference_point: Coordinates) -> Self {
        Self { reference_point }
    }

    fn distance_key(&self, business: &Business) -> f64 {
        business
            .coordinates
            .map(|c| planar_distance(&c, &self.reference_point))
            .filter(|d| !d.is_nan())
            .unwrap_or(f64::INFINITY)
    }
}

impl RankingStrategy for DistanceStrategy {
    fn name(&self) -> &'static str {
        "distance"
    }

    fn order(&self, businesses: &mut Vec<Business>) {
        let mut keyed: Vec<(f64, Business)> = businesses
            .drain(..)
            .map(|b| (self.distance_key(&b), b))
            .collect();
        keyed.sort_by(|a, b| a.0.total_cmp(&b.0));
        businesses.extend(keyed.into_iter().map(|(_, b)| b));
    }
}

/// Pick the ordering strategy for a criterion.
///
/// `Cost` has no model of its own and ranks by rating. `Distance` without a
/// reference point has nothing to measure against and also ranks by rating.
pub fn strategy_for(
    criterion: OptimizationCriterion,
    reference_point: Option<&Coordinates>,
) -> Box<dyn RankingStrategy> {
    match (criterion.effective(), reference_point) {
        (OptimizationCriterion::Distance, Some(point)) => Box::new(DistanceStrategy::new(*point)),
        (OptimizationCriterion::Distance, None) => {
            tracing::warn!(
                "Distance ranking requested without a reference point, ranking by rating"
            );
            Box::new(RatingStrategy)
        }
        _ => Box::new(RatingStrategy),
    }
}

/// Split businesses into buckets by exact (case-insensitive) category name.
/// Businesses whose category names no bucket are dropped.
pub fn partition_by_bucket(businesses: &[Business]) -> RankedCategories {
    let mut buckets: RankedCategories = CategoryBucket::ALL
        .iter()
        .map(|&bucket| (bucket, Vec::new()))
        .collect();

    let mut unmatched = 0usize;
    for business in businesses {
        match business.bucket().and_then(|bucket| buckets.get_mut(&bucket)) {
            Some(list) => list.push(business.clone()),
            None => unmatched += 1,
        }
    }

    if unmatched > 0 {
        tracing::debug!(unmatched, "Businesses outside every category bucket");
    }

    buckets
}

/// Rank businesses per bucket under `criterion`, truncating each list to `top_n`.
pub fn rank(
    businesses: &[Business],
    criterion: OptimizationCriterion,
    top_n: usize,
    reference_point: Option<&Coordinates>,
) -> RankedCategories {
    let strategy = strategy_for(criterion, reference_point);

    let mut ranked = partition_by_bucket(businesses);
    for list in ranked.values_mut() {
        strategy.order(list);
        list.truncate(top_n);
    }

    tracing::debug!(
        strategy = strategy.name(),
        top_n,
        "Ranked {} businesses",
        businesses.len()
    );

    ranked
}

/// Rank a single bucket; used where only one category is needed.
pub fn rank_bucket(
    businesses: &[Business],
    bucket: CategoryBucket,
    strategy: &dyn RankingStrategy,
    top_n: usize,
) -> RankedCandidateList {
    let mut list: Vec<Business> = businesses
        .iter()
        .filter(|b| b.bucket() == Some(bucket))
        .cloned()
        .collect();
    strategy.order(&mut list);
    list.truncate(top_n);
    list
}
