//! Candidate ranking for role assignment.
//!
//! The store narrows the caller's connections down with a substring
//! prefilter on the first query token, or with the category filter for a
//! blank query; everything here runs on that already-small set.

use serde::Serialize;
use std::cmp::Ordering;

use super::{Profile, RoleCategory};

pub const MAX_SEARCH_RESULTS: usize = 20;
pub const PREFILTER_LIMIT: usize = 200;
pub const MATCH_THRESHOLD: f64 = 0.3;

const FULL_NAME_WEIGHT: f64 = 1.0;
const USERNAME_WEIGHT: f64 = 0.8;
const CITY_WEIGHT: f64 = 0.6;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedCandidate {
    pub profile: Profile,
    /// `None` when the listing came from the category filter instead of a query.
    pub score: Option<f64>,
    pub matches_category: bool,
}

/// Lowercased first whitespace-separated token of the query.
pub fn prefilter_token(query: &str) -> Option<String> {
    query.split_whitespace().next().map(str::to_lowercase)
}

fn normalize(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Similarity in `[0, 1]` between a query and a single profile field.
pub fn field_score(query: &str, field: &str) -> f64 {
    let query = normalize(query);
    let field = normalize(field);
    if query.is_empty() || field.is_empty() {
        return 0.0;
    }
    if field == query {
        return 1.0;
    }
    if field.starts_with(&query) {
        return 0.9;
    }
    if field.split(' ').any(|word| word.starts_with(&query)) {
        return 0.8;
    }
    if field.contains(&query) {
        return 0.7;
    }

    let tokens: Vec<&str> = query.split(' ').collect();
    if tokens.len() > 1 {
        let found = tokens.iter().filter(|t| field.contains(*t)).count();
        if found > 0 {
            return 0.65 * found as f64 / tokens.len() as f64;
        }
    }

    subsequence_score(&query, &field)
}

/// Rewards query characters appearing in order, the tighter the better.
fn subsequence_score(query: &str, field: &str) -> f64 {
    let field: Vec<char> = field.chars().collect();
    let mut position = 0;
    let mut first_match = None;
    for wanted in query.chars().filter(|c| !c.is_whitespace()) {
        match field[position..].iter().position(|c| *c == wanted) {
            Some(offset) => {
                first_match.get_or_insert(position + offset);
                position += offset + 1;
            }
            None => return 0.0,
        }
    }
    let Some(start) = first_match else {
        return 0.0;
    };
    let matched = query.chars().filter(|c| !c.is_whitespace()).count();
    0.6 * matched as f64 / (position - start) as f64
}

pub fn score_profile(query: &str, profile: &Profile) -> f64 {
    [
        (profile.full_name.as_deref(), FULL_NAME_WEIGHT),
        (profile.username.as_deref(), USERNAME_WEIGHT),
        (profile.city.as_deref(), CITY_WEIGHT),
    ]
    .into_iter()
    .filter_map(|(field, weight)| field.map(|f| field_score(query, f) * weight))
    .fold(0.0, f64::max)
}

fn by_display_name(a: &Profile, b: &Profile) -> Ordering {
    a.display_name()
        .to_lowercase()
        .cmp(&b.display_name().to_lowercase())
        .then_with(|| a.id.cmp(&b.id))
}

/// Ranks candidates for a role. A blank query lists the profiles whose
/// primary role is the role's category instead of fuzzy matching.
pub fn rank_candidates(
    query: &str,
    category: RoleCategory,
    profiles: Vec<Profile>,
) -> Vec<RankedCandidate> {
    let mut ranked: Vec<RankedCandidate> = if query.trim().is_empty() {
        let mut listed: Vec<RankedCandidate> = profiles
            .into_iter()
            .filter(|p| p.works_in(category))
            .map(|profile| RankedCandidate {
                profile,
                score: None,
                matches_category: true,
            })
            .collect();
        listed.sort_by(|a, b| by_display_name(&a.profile, &b.profile));
        listed
    } else {
        let mut scored: Vec<RankedCandidate> = profiles
            .into_iter()
            .filter_map(|profile| {
                let score = score_profile(query, &profile);
                (score >= MATCH_THRESHOLD).then(|| RankedCandidate {
                    matches_category: profile.works_in(category),
                    score: Some(score),
                    profile,
                })
            })
            .collect();
        scored.sort_by(|a, b| {
            let (sa, sb) = (a.score.unwrap_or(0.0), b.score.unwrap_or(0.0));
            sb.total_cmp(&sa)
                .then_with(|| b.matches_category.cmp(&a.matches_category))
                .then_with(|| by_display_name(&a.profile, &b.profile))
        });
        scored
    };
    ranked.truncate(MAX_SEARCH_RESULTS);
    ranked
}
