//! Indicator tables for claim interpretation
//!
//! All matching happens against lowercased, punctuation-stripped token
//! streams, so every term here is lowercase with single spaces.

/// Verbs and connectives that assert causation
pub const CAUSAL_INDICATORS: &[&str] = &[
    "causes",
    "cause",
    "caused",
    "causing",
    "reduces",
    "reduce",
    "reduced",
    "increases",
    "increase",
    "increased",
    "improves",
    "improve",
    "improved",
    "prevents",
    "prevent",
    "prevented",
    "leads to",
    "led to",
    "results in",
    "resulted in",
    "triggers",
    "triggered",
    "creates",
    "destroys",
    "kills",
    "cures",
    "eliminates",
    "boosts",
    "lowers",
    "raises",
];

/// Connectives that assert comparison
pub const COMPARATIVE_INDICATORS: &[&str] = &[
    "more than",
    "less than",
    "better than",
    "worse than",
    "higher than",
    "lower than",
    "faster than",
    "slower than",
    "cheaper than",
    "safer than",
    "outperforms",
    "outperformed",
    "exceeds",
    "exceeded",
    "versus",
    "compared to",
    "compared with",
    "twice as",
    "half as",
];

/// Connectives that assert correlation without causation
pub const CORRELATIONAL_INDICATORS: &[&str] = &[
    "associated with",
    "linked to",
    "linked with",
    "correlates with",
    "correlated with",
    "correlates",
    "related to",
    "tied to",
    "coincides with",
];

/// Future-tense markers. Checked before past markers.
pub const FUTURE_INDICATORS: &[&str] = &[
    "will",
    "shall",
    "going to",
    "is expected to",
    "are expected to",
    "is projected to",
    "are projected to",
];

/// Past-tense markers
pub const PAST_INDICATORS: &[&str] = &[
    "was",
    "were",
    "had",
    "did",
    "caused",
    "led to",
    "resulted in",
    "ended",
    "began",
    "happened",
    "occurred",
    "used to",
    "historically",
    "in the past",
];

/// Markers of definitive assertion
pub const DEFINITIVE_INDICATORS: &[&str] = &[
    "definitely",
    "certainly",
    "undoubtedly",
    "always",
    "never",
    "proves",
    "proven",
    "without question",
];

/// Hedges that mark probable assertion
pub const PROBABLE_INDICATORS: &[&str] = &[
    "likely",
    "probably",
    "appears",
    "appears to",
    "seems",
    "seems to",
    "suggests",
    "expected",
    "generally",
    "typically",
    "often",
    "tends to",
    "most",
];

/// Hedges that mark speculative assertion. Checked before probable hedges.
pub const SPECULATIVE_INDICATORS: &[&str] = &[
    "may",
    "might",
    "could",
    "possibly",
    "perhaps",
    "allegedly",
    "reportedly",
    "rumored",
    "some say",
    "it is said",
];

/// Universal quantifiers
pub const UNIVERSAL_INDICATORS: &[&str] = &[
    "all",
    "every",
    "always",
    "never",
    "everyone",
    "nobody",
    "no one",
    "none",
    "everything",
    "nothing",
];

/// Conditional markers
pub const CONDITIONAL_INDICATORS: &[&str] = &[
    "if",
    "when",
    "unless",
    "only when",
    "provided that",
    "in cases where",
    "as long as",
];

/// Subject phrases recognized directly, scanned before any splitting.
/// Longer phrases first so the most specific match wins.
pub const KNOWN_SUBJECTS: &[&str] = &[
    "climate change policies",
    "artificial intelligence",
    "renewable energy",
    "social media",
    "climate change",
    "minimum wage",
    "carbon taxes",
    "carbon tax",
    "vaccines",
    "the earth",
    "the moon",
    "earth",
];

/// Leading tokens stripped from extracted subject and object phrases
pub const PHRASE_ARTICLES: &[&str] = &[
    "the", "a", "an", "all", "every", "most", "some", "many", "no",
];

/// Particles that follow multi-word connectives ("leads to", "linked with")
pub const LINK_PARTICLES: &[&str] = &["to", "with", "in", "that", "than"];

/// Single tokens that split a claim into subject and object sides.
/// Covers the single-word forms of the relationship indicators plus the
/// copulas and a few common predicate verbs.
pub const LINK_TOKENS: &[&str] = &[
    "causes",
    "cause",
    "caused",
    "causing",
    "reduces",
    "reduce",
    "reduced",
    "increases",
    "increase",
    "increased",
    "improves",
    "improve",
    "improved",
    "prevents",
    "prevent",
    "prevented",
    "leads",
    "led",
    "results",
    "resulted",
    "triggers",
    "triggered",
    "creates",
    "destroys",
    "kills",
    "cures",
    "eliminates",
    "boosts",
    "lowers",
    "raises",
    "outperforms",
    "outperformed",
    "exceeds",
    "exceeded",
    "versus",
    "correlates",
    "correlated",
    "associated",
    "linked",
    "related",
    "tied",
    "orbits",
    "contains",
    "beats",
    "is",
    "are",
    "was",
    "were",
    "will",
];
