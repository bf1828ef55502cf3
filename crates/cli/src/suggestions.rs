//! "Did you mean" lookups for unknown arguments.

use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use itertools::Itertools;

/// Finds the registered spelling that best matches an unknown one.
///
/// Only spellings of the same form (long or short) are considered. Ties are
/// broken alphabetically so the answer is stable.
pub fn suggest<'a>(unknown: &str, candidates: impl IntoIterator<Item = &'a str>) -> Option<&'a str> {
    let pattern = unknown.trim_start_matches('-');
    if pattern.is_empty() {
        return None;
    }

    let is_long = unknown.starts_with("--");
    let matcher = SkimMatcherV2::default();

    candidates
        .into_iter()
        .filter(|candidate| candidate.starts_with("--") == is_long && *candidate != unknown)
        .filter_map(|candidate| {
            matcher
                .fuzzy_match(candidate, pattern)
                .map(|score| (score, candidate))
        })
        .sorted_by(|(score_a, name_a), (score_b, name_b)| {
            score_b.cmp(score_a).then_with(|| name_a.cmp(name_b))
        })
        .map(|(_, candidate)| candidate)
        .next()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SPELLINGS: [&str; 5] = ["--verbose", "-v", "--version", "--output", "-o"];

    #[test]
    fn test_suggest_close_long_name() {
        assert_eq!(suggest("--verbos", SPELLINGS), Some("--verbose"));
        assert_eq!(suggest("--outpt", SPELLINGS), Some("--output"));
    }

    #[test]
    fn test_suggest_nothing_for_unrelated() {
        assert_eq!(suggest("--zzz", SPELLINGS), None);
        assert_eq!(suggest("--", SPELLINGS), None);
    }

    #[test]
    fn test_suggest_keeps_form() {
        // A short typo never suggests a long spelling.
        assert_eq!(suggest("-x", SPELLINGS), None);
    }
}
