/// Tokens of this many characters or fewer are dropped as a cheap stopword filter.
pub const MAX_DROPPED_TOKEN_CHARS: usize = 2;

/// Lower-case `question`, split on whitespace, trim punctuation from token
/// ends, and drop tokens of two characters or fewer.
///
/// The length filter runs on the trimmed token, so `"methodology?"` becomes
/// `methodology` and a short token like `"AI?"` is dropped rather than kept
/// as `ai?`. Repeated tokens are kept; each occurrence scores separately.
pub fn query_tokens(question: &str) -> Vec<String> {
    question
        .to_lowercase()
        .split_whitespace()
        .map(|t| t.trim_matches(|c: char| !c.is_alphanumeric()))
        .filter(|t| t.chars().count() > MAX_DROPPED_TOKEN_CHARS)
        .map(str::to_string)
        .collect()
}
