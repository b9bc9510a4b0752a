//! Token-set fuzzy matching on the 0–100 confidence scale.
//!
//! The base lexical measure is a normalized indel similarity; on top of it,
//! both inputs are reduced to sorted, deduplicated token sets so that word
//! reordering, duplicated words and separator noise (`_`, `-`, `/`, case)
//! do not depress the score. Shared tokens are pulled to the front of both
//! comparison strings, so partial token overlap aligns instead of
//! interleaving.

use std::collections::BTreeSet;

use rapidfuzz::distance::indel;

use crate::error::MatchError;

/// Threshold used for synonym membership checks (`is_known`).
pub const DEFAULT_MIN_CONFIDENCE: u8 = 95;

/// Scores lexical similarity between two strings, 0–100.
///
/// Case-insensitive and token-set based: `similarity("Gross Floor Area",
/// "area_floor_gross")` is 100. Two strings with no token in common score
/// near 0. The measure is symmetric.
pub fn similarity(a: &str, b: &str) -> u8 {
    let tokens_a = token_set(a);
    let tokens_b = token_set(b);

    if tokens_a.is_empty() && tokens_b.is_empty() {
        return 100;
    }
    if tokens_a.is_empty() || tokens_b.is_empty() {
        return 0;
    }

    let intersection: Vec<&str> = tokens_a.intersection(&tokens_b).map(String::as_str).collect();
    let only_a: Vec<&str> = tokens_a.difference(&tokens_b).map(String::as_str).collect();
    let only_b: Vec<&str> = tokens_b.difference(&tokens_a).map(String::as_str).collect();

    let intersection_str = intersection.join(" ");
    let combined_a = combine(&intersection_str, &only_a);
    let combined_b = combine(&intersection_str, &only_b);

    let sorted_a = tokens_a.iter().map(String::as_str).collect::<Vec<_>>().join(" ");
    let sorted_b = tokens_b.iter().map(String::as_str).collect::<Vec<_>>().join(" ");

    // Comparing the intersection against either combined string alone would
    // score any token-subset as a perfect match, which is far too eager for
    // synonym detection ("available" vs "not available"). Only the two
    // symmetric comparisons are kept.
    let best = base_ratio(&combined_a, &combined_b).max(base_ratio(&sorted_a, &sorted_b));

    (best * 100.0).round() as u8
}

/// Ranks `query` against `candidates`, best first.
///
/// Descending by score; ties keep the candidates' original order, so the
/// ranking is a stable function of input order. The result is truncated to
/// `top_n` entries (callers must pass `top_n >= 1`).
///
/// Ranking against an empty candidate set is a caller error and yields
/// [`MatchError::EmptyCandidateSet`].
pub fn rank<'a, S: AsRef<str>>(
    query: &str,
    candidates: &'a [S],
    top_n: usize,
) -> Result<Vec<(&'a str, u8)>, MatchError> {
    if candidates.is_empty() {
        return Err(MatchError::EmptyCandidateSet);
    }
    let mut scored: Vec<(&str, u8)> = candidates
        .iter()
        .map(|candidate| (candidate.as_ref(), similarity(query, candidate.as_ref())))
        .collect();
    // Stable sort: equal scores stay in candidate order.
    scored.sort_by(|a, b| b.1.cmp(&a.1));
    scored.truncate(top_n);
    Ok(scored)
}

/// Whether `value`'s single best match in `known` strictly clears
/// `min_confidence`.
pub fn is_known<S: AsRef<str>>(
    value: &str,
    known: &[S],
    min_confidence: u8,
) -> Result<bool, MatchError> {
    let best = rank(value, known, 1)?;
    Ok(best[0].1 > min_confidence)
}

fn base_ratio(a: &str, b: &str) -> f64 {
    indel::normalized_similarity(a.chars(), b.chars())
}

fn combine(intersection: &str, rest: &[&str]) -> String {
    if rest.is_empty() {
        intersection.to_string()
    } else if intersection.is_empty() {
        rest.join(" ")
    } else {
        format!("{} {}", intersection, rest.join(" "))
    }
}

/// Lowercased tokens split at non-alphanumeric boundaries, deduplicated.
fn token_set(raw: &str) -> BTreeSet<String> {
    raw.split(|ch: char| !ch.is_alphanumeric())
        .filter(|token| !token.is_empty())
        .map(str::to_lowercase)
        .collect()
}
