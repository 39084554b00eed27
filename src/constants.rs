//! Stable application-wide constants.
//!
//! Values here are structural invariants and default fallbacks for
//! env-var-based configuration. For the scoring knobs that benefit from
//! runtime tuning, see [`RecommendationConfig`](crate::config::RecommendationConfig).

// --- Server defaults (used when HOST / PORT env vars are absent) ---

/// Default bind address for the HTTP server.
pub const DEFAULT_HOST: &str = "0.0.0.0";
/// Default port for the HTTP server.
pub const DEFAULT_PORT: &str = "3000";

// --- Ranking ---

/// Default length of every ranked candidate list.
pub const DEFAULT_TOP_N: usize = 5;
/// Upper bound accepted for a requested `top_n`.
pub const MAX_TOP_N: usize = 50;

// --- Scored stop selection ---

/// Size of the rating-ranked pool each stop slot picks from.
pub const DEFAULT_CANDIDATE_POOL_SIZE: usize = 5;
/// Distance (km) that costs one rating point in the stop score.
/// A tuning parameter chosen so a 0-5 rating and a regional-scale detour
/// are commensurate; it is not derived from anything.
pub const DEFAULT_DISTANCE_PENALTY_DIVISOR_KM: f64 = 100.0;
/// Score penalty applied when a candidate's distance cannot be computed.
/// Larger than the whole rating scale, so such candidates only win when
/// nothing else is eligible.
pub const DEFAULT_FAILED_DISTANCE_PENALTY: f64 = 10.0;
/// Category of the single stop used when a stop plan cannot be validated.
pub const DEFAULT_STOP_CATEGORY: &str = "restaurant";

// --- Interpreter ---

/// Default chat model for the free-text interpreter.
pub const DEFAULT_INTERPRETER_MODEL: &str = "o3-mini";
