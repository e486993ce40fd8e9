//! Subject-domain classification from keyword evidence

use super::contains_term;
use crate::model::{ClaimDomain, DomainClassification};

/// Confidence contributed by each keyword hit, capped below certainty
const CONFIDENCE_PER_HIT: f64 = 30.0;
const MAX_CONFIDENCE: f64 = 90.0;

/// Keyword tables per domain. Scanned in order; ties between domains fall
/// back to `ClaimDomain::priority`.
const DOMAIN_KEYWORDS: &[(ClaimDomain, &[&str])] = &[
    (
        ClaimDomain::Health,
        &[
            "vaccine",
            "vaccines",
            "vaccination",
            "autism",
            "disease",
            "cancer",
            "drug",
            "drugs",
            "medical",
            "medicine",
            "health",
            "patients",
            "treatment",
            "symptoms",
            "virus",
            "infection",
            "immune",
            "clinical",
            "hospital",
            "diet",
            "nutrition",
            "obesity",
        ],
    ),
    (
        ClaimDomain::Science,
        &[
            "earth",
            "sun",
            "moon",
            "orbit",
            "orbits",
            "planet",
            "quantum",
            "physics",
            "chemistry",
            "biology",
            "evolution",
            "species",
            "gravity",
            "experiment",
            "scientists",
            "dna",
            "cells",
            "solar",
            "universe",
            "galaxy",
        ],
    ),
    (
        ClaimDomain::Climate,
        &[
            "climate",
            "warming",
            "carbon",
            "emissions",
            "co2",
            "temperature",
            "greenhouse",
            "renewable",
            "fossil",
            "sea level",
            "glaciers",
            "weather",
            "hurricane",
            "hurricanes",
            "drought",
            "pollution",
        ],
    ),
    (
        ClaimDomain::Economics,
        &[
            "economy",
            "economic",
            "gdp",
            "tax",
            "taxes",
            "inflation",
            "unemployment",
            "wages",
            "wage",
            "market",
            "markets",
            "trade",
            "tariff",
            "tariffs",
            "growth",
            "recession",
            "income",
            "prices",
            "jobs",
        ],
    ),
    (
        ClaimDomain::Politics,
        &[
            "election",
            "elections",
            "government",
            "policy",
            "policies",
            "president",
            "congress",
            "senate",
            "legislation",
            "vote",
            "voters",
            "democracy",
            "party",
            "minister",
            "parliament",
        ],
    ),
    (
        ClaimDomain::Technology,
        &[
            "ai",
            "artificial intelligence",
            "software",
            "internet",
            "computer",
            "computers",
            "smartphone",
            "algorithm",
            "algorithms",
            "encryption",
            "social media",
            "robots",
            "automation",
            "technology",
        ],
    ),
    (
        ClaimDomain::History,
        &[
            "war",
            "century",
            "ancient",
            "empire",
            "revolution",
            "historical",
            "history",
            "dynasty",
            "medieval",
            "founded",
            "civilization",
        ],
    ),
];

/// Classify the claim's subject domain from keyword hits.
///
/// The domain with the most hits wins; equal hit counts fall back to the
/// fixed domain priority so classification never depends on table order
/// alone. No hits at all classifies as `General` with zero confidence.
pub fn classify(joined: &str) -> DomainClassification {
    let mut best: Option<(ClaimDomain, Vec<String>)> = None;

    for (domain, keywords) in DOMAIN_KEYWORDS {
        let matched: Vec<String> = keywords
            .iter()
            .filter(|kw| contains_term(joined, kw))
            .map(|kw| kw.to_string())
            .collect();

        if matched.is_empty() {
            continue;
        }

        let better = match &best {
            None => true,
            Some((best_domain, best_matched)) => {
                matched.len() > best_matched.len()
                    || (matched.len() == best_matched.len()
                        && domain.priority() < best_domain.priority())
            }
        };

        if better {
            best = Some((domain.clone(), matched));
        }
    }

    match best {
        Some((domain, matched_keywords)) => DomainClassification {
            domain,
            confidence: (CONFIDENCE_PER_HIT * matched_keywords.len() as f64).min(MAX_CONFIDENCE),
            matched_keywords,
        },
        None => DomainClassification {
            domain: ClaimDomain::General,
            confidence: 0.0,
            matched_keywords: Vec::new(),
        },
    }
}
