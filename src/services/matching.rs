//! Fuzzy title matching.
//!
//! [`ratio`] is the normalized InDel similarity on a 0-100 scale: twice the
//! longest common subsequence divided by the combined length. Inputs are
//! compared as-is, so case and punctuation count against the score.
//! [`suggest`] powers "did you mean" lists when nothing clears the cutoff.

use strsim::jaro_winkler;

/// Default minimum [`ratio`] for a catalog title to be accepted
pub const DEFAULT_SCORE_CUTOFF: f64 = 70.0;

const SUGGESTION_THRESHOLD: f64 = 0.7;

/// Best-scoring catalog entry for a query
#[derive(Debug, Clone, PartialEq)]
pub struct Match<'a> {
    /// Position of the choice in the slice passed to [`best_match`]
    pub index: usize,
    pub choice: &'a str,
    pub score: f64,
}

/// Similarity of two strings in `[0, 100]`; two empty strings score 100.
pub fn ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    let total = a.len() + b.len();
    if total == 0 {
        return 100.0;
    }

    100.0 * (2 * lcs_len(&a, &b)) as f64 / total as f64
}

/// Length of the longest common subsequence, one DP row at a time
fn lcs_len(a: &[char], b: &[char]) -> usize {
    let (short, long) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    let mut row = vec![0usize; short.len() + 1];

    for &lc in long {
        let mut diag = 0;
        for (j, &sc) in short.iter().enumerate() {
            let up = row[j + 1];
            row[j + 1] = if lc == sc { diag + 1 } else { up.max(row[j]) };
            diag = up;
        }
    }

    row[short.len()]
}

/// Returns the highest-scoring choice at or above `cutoff`.
///
/// Ties go to the earliest choice, so duplicate titles always resolve to
/// their first occurrence.
pub fn best_match<'a, S: AsRef<str>>(
    query: &str,
    choices: &'a [S],
    cutoff: f64,
) -> Option<Match<'a>> {
    let mut best: Option<Match<'a>> = None;

    for (index, choice) in choices.iter().enumerate() {
        let choice = choice.as_ref();
        let score = ratio(query, choice);

        if score < cutoff {
            continue;
        }

        if best.as_ref().map_or(true, |b| score > b.score) {
            best = Some(Match {
                index,
                choice,
                score,
            });

            if score >= 100.0 {
                break;
            }
        }
    }

    best
}

/// Up to `limit` distinct titles that loosely resemble `query`, best first.
pub fn suggest<S: AsRef<str>>(query: &str, choices: &[S], limit: usize) -> Vec<String> {
    let query = query.trim().to_lowercase();
    if query.is_empty() || limit == 0 {
        return Vec::new();
    }

    let mut scored: Vec<(f64, &str)> = choices
        .iter()
        .map(|c| c.as_ref())
        .map(|c| (jaro_winkler(&query, &c.to_lowercase()), c))
        .filter(|(score, _)| *score >= SUGGESTION_THRESHOLD)
        .collect();

    scored.sort_by(|a, b| b.0.total_cmp(&a.0));

    let mut suggestions: Vec<String> = Vec::with_capacity(limit);
    for (_, title) in scored {
        if suggestions.iter().any(|s| s == title) {
            continue;
        }
        suggestions.push(title.to_string());
        if suggestions.len() == limit {
            break;
        }
    }

    suggestions
}
