use crate::config::{RecommendationConfig, UnfulfilledSlotPolicy};
use crate::error::{AppError, Result};
use crate::models::{
    Business, BusinessCatalog, CategoryBucket, CoordinateKey, Coordinates, SkipReason,
    SkippedSlot, Stop, StopPlan, StopRequest,
};
use crate::services::category_ranker::{rank_bucket, RatingStrategy};
use crate::services::route_distance::geodesic_distance_km;
use std::collections::HashSet;

/// Stops picked for a plan, plus the slots that produced nothing.
#[derive(Debug, Default)]
pub struct SelectionOutcome {
    pub stops: Vec<Stop>,
    pub skipped: Vec<SkippedSlot>,
}

/// Greedy single pass over the stop plan.
///
/// Each slot draws from the rating-ranked pool of its bucket, skips businesses
/// whose coordinates an earlier slot already used, and takes the candidate
/// with the best `rating - distance_km / divisor` score against the
/// reference point. No slot is revisited.
pub struct StopSelector {
    config: RecommendationConfig,
}

impl StopSelector {
    pub fn new(config: RecommendationConfig) -> Self {
        Self { config }
    }

    /// Score of one candidate against the reference point.
    pub fn score_candidate(&self, business: &Business, reference: &Coordinates) -> f64 {
        let penalty = business
            .coordinates
            .and_then(|coords| geodesic_distance_km(reference, &coords))
            .map(|distance| distance.as_km() / self.config.distance_penalty_divisor_km)
            .unwrap_or(self.config.failed_distance_penalty);

        business.rating - penalty
    }

    pub fn select_stops(
        &self,
        plan: &StopPlan,
        catalog: &BusinessCatalog,
        reference: &Coordinates,
        start: &Coordinates,
    ) -> Result<SelectionOutcome> {
        let mut outcome = SelectionOutcome::default();
        let mut used: HashSet<CoordinateKey> = HashSet::new();

        // Unlocated businesses can be neither scored nor deduplicated
        let located: Vec<Business> = catalog
            .iter()
            .filter(|b| b.coordinates.is_some())
            .cloned()
            .collect();

        for (slot, request) in plan.stops.iter().enumerate() {
            match self.select_for_slot(request, &located, reference, &used) {
                Ok((business, score)) => {
                    // Pool members without coordinates never get here
                    let Some(coordinates) = business.coordinates else {
                        continue;
                    };
                    used.insert(coordinates.key());

                    let distance_from_start = geodesic_distance_km(start, &coordinates);
                    tracing::debug!(
                        slot,
                        business = %business.name,
                        score,
                        "Selected stop for {} slot",
                        request.category
                    );

                    outcome.stops.push(Stop {
                        business,
                        order_in_itinerary: outcome.stops.len() as u32 + 1,
                        distance_from_start_km: distance_from_start,
                        score,
                    });
                }
                Err(reason) => {
                    if self.config.unfulfilled_slot_policy == UnfulfilledSlotPolicy::Fail {
                        return Err(AppError::NoEligibleCandidate {
                            slot,
                            category: request.category.clone(),
                        });
                    }
                    tracing::warn!(
                        slot,
                        category = %request.category,
                        ?reason,
                        "No eligible candidate, skipping stop"
                    );
                    outcome.skipped.push(SkippedSlot {
                        slot,
                        category: request.category.clone(),
                        reason,
                    });
                }
            }
        }

        Ok(outcome)
    }

    fn select_for_slot(
        &self,
        request: &StopRequest,
        located: &[Business],
        reference: &Coordinates,
        used: &HashSet<CoordinateKey>,
    ) -> std::result::Result<(Business, f64), SkipReason> {
        let bucket: CategoryBucket = request
            .category
            .parse()
            .map_err(|_| SkipReason::UnknownCategory)?;

        let pool = rank_bucket(
            located,
            bucket,
            &RatingStrategy,
            self.config.candidate_pool_size,
        );
        if pool.is_empty() {
            return Err(SkipReason::NoCandidates);
        }

        let mut best: Option<(&Business, f64)> = None;
        for candidate in &pool {
            let Some(coordinates) = candidate.coordinates else {
                continue;
            };
            if used.contains(&coordinates.key()) {
                continue;
            }

            let score = self.score_candidate(candidate, reference);
            match best {
                Some((_, best_score)) if score <= best_score => {}
                _ => best = Some((candidate, score)),
            }
        }

        best.map(|(business, score)| (business.clone(), score))
            .ok_or(SkipReason::AllCandidatesUsed)
    }
}
