use crate::constants::*;
use std::env;

/// What to do with a stop slot that has no eligible candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnfulfilledSlotPolicy {
    /// Omit the slot; the itinerary has fewer stops than requested
    #[default]
    Skip,
    /// Fail the whole request
    Fail,
}

impl std::str::FromStr for UnfulfilledSlotPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "skip" => Ok(UnfulfilledSlotPolicy::Skip),
            "fail" => Ok(UnfulfilledSlotPolicy::Fail),
            _ => Err(format!(
                "Invalid unfulfilled slot policy: {}. Use 'skip' or 'fail'",
                s
            )),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub locations_path: String,
    pub businesses_path: String,
    /// Fold free-text snapshot categories into buckets while loading
    pub normalize_categories: bool,
    pub interpreter: Option<InterpreterConfig>,
    pub recommendation: RecommendationConfig,
}

#[derive(Debug, Clone)]
pub struct InterpreterConfig {
    /// Full chat-completions URL of an OpenAI-compatible deployment
    pub endpoint: String,
    pub api_key: String,
    pub model: String,
    pub api_version: Option<String>,
}

#[derive(Debug, Clone)]
pub struct RecommendationConfig {
    /// Ranked list length when a request does not specify one
    pub default_top_n: usize,

    /// Rating-ranked candidates considered per free-form stop slot
    pub candidate_pool_size: usize,

    /// Stop score = rating - distance_km / divisor
    pub distance_penalty_divisor_km: f64,

    /// Penalty used in place of the distance term when distance fails
    pub failed_distance_penalty: f64,

    pub unfulfilled_slot_policy: UnfulfilledSlotPolicy,
}

impl Default for RecommendationConfig {
    fn default() -> Self {
        Self {
            default_top_n: DEFAULT_TOP_N,
            candidate_pool_size: DEFAULT_CANDIDATE_POOL_SIZE,
            distance_penalty_divisor_km: DEFAULT_DISTANCE_PENALTY_DIVISOR_KM,
            failed_distance_penalty: DEFAULT_FAILED_DISTANCE_PENALTY,
            unfulfilled_slot_policy: UnfulfilledSlotPolicy::default(),
        }
    }
}

impl RecommendationConfig {
    pub fn from_env() -> Result<Self, String> {
        let defaults = Self::default();

        let config = Self {
            default_top_n: env::var("RECOMMEND_DEFAULT_TOP_N")
                .unwrap_or_else(|_| defaults.default_top_n.to_string())
                .parse()
                .map_err(|_| "Invalid RECOMMEND_DEFAULT_TOP_N")?,

            candidate_pool_size: env::var("RECOMMEND_CANDIDATE_POOL_SIZE")
                .unwrap_or_else(|_| defaults.candidate_pool_size.to_string())
                .parse()
                .map_err(|_| "Invalid RECOMMEND_CANDIDATE_POOL_SIZE")?,

            distance_penalty_divisor_km: env::var("RECOMMEND_DISTANCE_PENALTY_DIVISOR_KM")
                .unwrap_or_else(|_| defaults.distance_penalty_divisor_km.to_string())
                .parse()
                .map_err(|_| "Invalid RECOMMEND_DISTANCE_PENALTY_DIVISOR_KM")?,

            failed_distance_penalty: env::var("RECOMMEND_FAILED_DISTANCE_PENALTY")
                .unwrap_or_else(|_| defaults.failed_distance_penalty.to_string())
                .parse()
                .map_err(|_| "Invalid RECOMMEND_FAILED_DISTANCE_PENALTY")?,

            unfulfilled_slot_policy: env::var("RECOMMEND_UNFULFILLED_SLOT_POLICY")
                .unwrap_or_else(|_| "skip".to_string())
                .parse()?,
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.default_top_n == 0 || self.default_top_n > MAX_TOP_N {
            return Err(format!(
                "RECOMMEND_DEFAULT_TOP_N must be between 1 and {}",
                MAX_TOP_N
            ));
        }
        if self.candidate_pool_size == 0 {
            return Err("RECOMMEND_CANDIDATE_POOL_SIZE must be at least 1".to_string());
        }
        let divisor = self.distance_penalty_divisor_km;
        if !divisor.is_finite() || divisor <= 0.0 {
            return Err("RECOMMEND_DISTANCE_PENALTY_DIVISOR_KM must be positive".to_string());
        }
        let penalty = self.failed_distance_penalty;
        if !penalty.is_finite() || penalty < 0.0 {
            return Err("RECOMMEND_FAILED_DISTANCE_PENALTY must be non-negative".to_string());
        }
        Ok(())
    }
}

impl InterpreterConfig {
    /// Interpreter settings are optional as a group: absent endpoint disables it.
    pub fn from_env() -> Result<Option<Self>, String> {
        let endpoint = match env::var("INTERPRETER_ENDPOINT") {
            Ok(endpoint) if !endpoint.trim().is_empty() => endpoint,
            _ => return Ok(None),
        };

        Ok(Some(InterpreterConfig {
            endpoint,
            api_key: env::var("INTERPRETER_API_KEY")
                .map_err(|_| "INTERPRETER_API_KEY must be set when INTERPRETER_ENDPOINT is")?,
            model: env::var("INTERPRETER_MODEL")
                .unwrap_or_else(|_| DEFAULT_INTERPRETER_MODEL.to_string()),
            api_version: env::var("INTERPRETER_API_VERSION").ok(),
        }))
    }
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        dotenv::dotenv().ok();

        Ok(Config {
            host: env::var("HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| DEFAULT_PORT.to_string())
                .parse()
                .map_err(|_| "Invalid PORT")?,
            locations_path: env::var("LOCATIONS_PATH")
                .map_err(|_| "LOCATIONS_PATH must be set")?,
            businesses_path: env::var("BUSINESSES_PATH")
                .map_err(|_| "BUSINESSES_PATH must be set")?,
            normalize_categories: env::var("NORMALIZE_CATEGORIES")
                .map(|v| matches!(v.to_lowercase().as_str(), "1" | "true" | "yes"))
                .unwrap_or(false),
            interpreter: InterpreterConfig::from_env()?,
            recommendation: RecommendationConfig::from_env()?,
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
