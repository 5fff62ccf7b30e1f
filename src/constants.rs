//! Cross-cutting, shared constants.
//!
//! Rating bounds and the score ceiling are treated as invariants by the extraction,
//! scoring and pipeline modules. Derive secondary values from these rather than
//! repeating literals.

/// Lowest rating a review dimension can receive.
pub const MIN_RATING: u8 = 1;
/// Highest rating a review dimension can receive.
pub const MAX_RATING: u8 = 5;

/// Upper bound of the overall score.
pub const MAX_SCORE: f64 = 10.0;
/// Decimal places retained in a reported score.
pub const SCORE_DECIMALS: i32 = 3;
/// Two scores closer than this are considered the same reported value.
pub const SCORE_TOLERANCE: f64 = 0.5e-3;

/// Default number of worker turns a stage may consume before it is closed.
pub const DEFAULT_REPLY_CEILING: u32 = 3;

/// Default model identifier for LLM-backed workers.
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Default Record Store backing file (relative to the working directory).
pub const DEFAULT_DATA_PATH: &str = "restaurant-data.txt";

/// Characters accepted between an entity name and its review text.
pub const ENTITY_SEPARATORS: &[char] = &['.', ':', '|'];

/// Tool name under which the Record Store is exposed to workers.
pub const FETCH_TOOL_NAME: &str = "fetch_restaurant_data";
/// Tool name under which the Extraction Capability is exposed to workers.
pub const EXTRACT_TOOL_NAME: &str = "extract_review_ratings";
/// Tool name under which the Scoring Engine is exposed to workers.
pub const SCORE_TOOL_NAME: &str = "calculate_overall_score";

/// Neutral rating used when a review carries no recognizable cue.
pub const NEUTRAL_RATING: u8 = (MIN_RATING + MAX_RATING) / 2;
