//! Worker system prompts and stage request messages.

use crate::constants::{EXTRACT_TOOL_NAME, FETCH_TOOL_NAME, SCORE_TOOL_NAME};

const QUERY_MARKER: &str = "User query: \"";

/// System prompt for the worker that resolves the entity and fetches its reviews.
pub fn fetch_system_prompt() -> String {
    format!(
        "You fetch restaurant reviews for a user's question.\n\
         1. Identify the restaurant name in the user query, keeping its capitalization.\n\
         2. Call `{FETCH_TOOL_NAME}` with that name.\n\
         3. If no reviews come back, try a corrected spelling of the name.\n\
         Queries look like:\n\
         - \"How good is McDonald's as a restaurant\"\n\
         - \"What would you rate In N Out?\"\n\
         - \"Tell me about Subway\"\n\
         When you have the reviews, reply with exactly the JSON object the tool returned."
    )
}

/// System prompt for the worker that rates the reviews.
pub fn analyze_system_prompt() -> String {
    format!(
        "You rate restaurant reviews for food and customer service on a 1-5 scale.\n\
         Keywords map to scores:\n\
         - 1: awful, horrible, disgusting\n\
         - 2: bad, unpleasant, offensive\n\
         - 3: average, uninspiring, forgettable\n\
         - 4: good, enjoyable, satisfying\n\
         - 5: awesome, incredible, amazing\n\
         Each review has one food keyword and one service keyword.\n\
         Call `{EXTRACT_TOOL_NAME}` with the restaurant name and every review, in order.\n\
         Reply with a JSON object: \
         {{\"restaurant_name\": ..., \"food_scores\": [...], \"customer_service_scores\": [...]}} \
         with exactly one score per review in each list."
    )
}

/// System prompt for the worker that computes the final score.
pub fn score_system_prompt() -> String {
    format!(
        "You compute a restaurant's overall score.\n\
         Call `{SCORE_TOOL_NAME}` with the restaurant name, the food scores and the \
         customer service scores exactly as given.\n\
         Reply with the JSON object the tool returned, for example {{\"Subway\": 6.265}}."
    )
}

/// Opening message of the Fetch stage. Carries the raw query.
pub fn fetch_request(query: &str) -> String {
    format!(
        "{QUERY_MARKER}{query}\". Please extract the restaurant name and fetch its reviews."
    )
}

/// Recovers the raw query from a [`fetch_request`] message.
pub fn query_from_request(request: &str) -> Option<&str> {
    let start = request.find(QUERY_MARKER)? + QUERY_MARKER.len();
    let end = request.rfind('"')?;
    (end >= start).then(|| request[start..end].trim())
}

pub const ANALYZE_INSTRUCTION: &str =
    "Please analyze these reviews and extract food and customer service scores.";

pub const SCORE_INSTRUCTION: &str =
    "Please calculate the final score using the extracted scores.";

/// Opening message of a later stage: its instruction plus the previous stage's
/// last message.
pub fn carryover_request(instruction: &str, last_message: &str) -> String {
    format!("{instruction}\n\nContext:\n{last_message}")
}

/// Correction sent after a text reply that did not carry the expected payload.
pub fn correction(expected: &str, reason: &str) -> String {
    format!("Your reply could not be used ({reason}). Reply with {expected}.")
}
