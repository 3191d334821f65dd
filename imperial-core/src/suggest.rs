//! "Did you mean" suggestions for misspelled names

/// Rank `candidates` by similarity to `query`, best first.
///
/// Candidates with no resemblance at all are dropped.
pub fn similar_names<'a, I>(query: &str, candidates: I) -> Vec<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return Vec::new();
    }

    let mut matches: Vec<(&'a str, usize)> = candidates
        .into_iter()
        .filter_map(|candidate| {
            let score = similarity_score(&query, &candidate.to_lowercase());
            (score > 0).then_some((candidate, score))
        })
        .collect();

    // Higher score first, ties alphabetical so output is stable
    matches.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    matches.into_iter().map(|(name, _)| name).collect()
}

/// Calculate similarity score between two lowercase strings
fn similarity_score(query: &str, candidate: &str) -> usize {
    let mut score = 0;

    // Exact prefix match is best
    if candidate.starts_with(query) {
        score += 100;
    }
    // Contains the query
    else if candidate.contains(query) {
        score += 50;
    }
    // Query contains the candidate
    else if query.contains(candidate) {
        score += 30;
    }

    // Shared leading characters count more than shared letters anywhere
    let prefix = query
        .chars()
        .zip(candidate.chars())
        .take_while(|(a, b)| a == b)
        .count();
    score += prefix * 10;

    let query_chars: std::collections::HashSet<char> = query.chars().collect();
    let candidate_chars: std::collections::HashSet<char> = candidate.chars().collect();
    let common = query_chars.intersection(&candidate_chars).count();
    if score == 0 && common * 2 < query_chars.len().max(candidate_chars.len()) {
        return 0;
    }
    score += common * 2;

    // Penalize length difference
    let len_diff = query.chars().count().abs_diff(candidate.chars().count());
    if len_diff < 5 && score > 0 {
        score += 5 - len_diff;
    }

    score
}
