use std::collections::BTreeSet;
use tracing::{debug, info};

use crate::canonical::canonical_fields;
use crate::models::JobPosting;

/// Minimum token-set similarity (0-100) for two postings to count as the
/// same job. Tunable; 92 keeps reworded repostings together without
/// collapsing distinct roles at the same company.
pub const DEFAULT_SIMILARITY_THRESHOLD: f64 = 92.0;

/// Order-independent similarity between two strings on a 0-100 scale.
///
/// Both sides are whitespace-tokenized into sorted sets; the score is the
/// best normalized-Levenshtein ratio among the sorted intersection string
/// and the two intersection-plus-remainder strings. Two empty strings are
/// identical (100); one empty side shares nothing (0).
pub fn token_set_ratio(a: &str, b: &str) -> f64 {
    let tokens_a: BTreeSet<&str> = a.split_whitespace().collect();
    let tokens_b: BTreeSet<&str> = b.split_whitespace().collect();

    match (tokens_a.is_empty(), tokens_b.is_empty()) {
        (true, true) => return 100.0,
        (true, false) | (false, true) => return 0.0,
        (false, false) => {}
    }

    let intersection = join(tokens_a.intersection(&tokens_b));
    let only_a = join(tokens_a.difference(&tokens_b));
    let only_b = join(tokens_b.difference(&tokens_a));

    let combined_a = join_parts(&intersection, &only_a);
    let combined_b = join_parts(&intersection, &only_b);

    let candidates = [
        strsim::normalized_levenshtein(&intersection, &combined_a),
        strsim::normalized_levenshtein(&intersection, &combined_b),
        strsim::normalized_levenshtein(&combined_a, &combined_b),
    ];

    100.0 * candidates.into_iter().fold(0.0, f64::max)
}

fn join<'a>(tokens: impl Iterator<Item = &'a &'a str>) -> String {
    tokens.copied().collect::<Vec<_>>().join(" ")
}

fn join_parts(left: &str, right: &str) -> String {
    match (left.is_empty(), right.is_empty()) {
        (true, _) => right.to_string(),
        (_, true) => left.to_string(),
        (false, false) => format!("{left} {right}"),
    }
}

/// Greedy order-preserving deduplication.
///
/// Every posting gets its canonical fields attached. A posting is a
/// duplicate of an already-accepted one when either test passes on its own:
/// exact equality of canonical title and company, or token-set similarity of
/// the combined "title company" strings at or above `threshold` (only tried
/// when both sides have non-empty canonical title and company). First
/// occurrence wins; input order is preserved.
pub fn remove_duplicates(postings: Vec<JobPosting>, threshold: f64) -> Vec<JobPosting> {
    if postings.is_empty() {
        return postings;
    }

    let total = postings.len();
    let mut unique: Vec<JobPosting> = Vec::new();

    for mut posting in postings {
        let canonical = canonical_fields(&posting.title, &posting.company, &posting.url);
        let combined = format!("{} {}", canonical.canonical_title, canonical.canonical_company);
        let has_both = !canonical.canonical_title.is_empty() && !canonical.canonical_company.is_empty();

        let is_duplicate = unique.iter().any(|existing| {
            let Some(existing_canonical) = existing.canonical.as_ref() else {
                return false;
            };

            if canonical.canonical_title == existing_canonical.canonical_title
                && canonical.canonical_company == existing_canonical.canonical_company
            {
                return true;
            }

            if has_both
                && !existing_canonical.canonical_title.is_empty()
                && !existing_canonical.canonical_company.is_empty()
            {
                let existing_combined = format!(
                    "{} {}",
                    existing_canonical.canonical_title, existing_canonical.canonical_company
                );
                let similarity = token_set_ratio(&combined, &existing_combined);
                if similarity >= threshold {
                    debug!(
                        current = combined.as_str(),
                        existing = existing_combined.as_str(),
                        similarity,
                        "fuzzy duplicate"
                    );
                    return true;
                }
            }

            false
        });

        if !is_duplicate {
            posting.canonical = Some(canonical);
            unique.push(posting);
        }
    }

    info!(removed = total - unique.len(), "removed duplicate postings");
    unique
}
