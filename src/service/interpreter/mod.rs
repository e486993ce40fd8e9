//! Structured interpretation of claim text
//!
//! Pure keyword heuristics over normalized tokens. Same input, same
//! interpretation; unparseable text falls back to documented defaults
//! instead of failing, so a garbage claim still flows through the
//! pipeline and comes out scored against whatever evidence it finds.

pub mod domain;
pub mod lexicon;

use crate::model::{
    AssertionType, CertaintyLevel, ClaimInterpretation, ClaimScope, RelationshipType,
    TemporalAspect,
};
use lexicon::*;
use regex::Regex;

const UNSPECIFIED: &str = "unspecified";
const MAX_OBJECT_TOKENS: usize = 8;
const MAX_FALLBACK_SUBJECT_TOKENS: usize = 4;

pub struct ClaimInterpreter {
    future_year: Regex,
}

impl ClaimInterpreter {
    pub fn new() -> Self {
        Self {
            future_year: Regex::new(r"\b(?:by|until|before)\s+(?:20[3-9]\d|2100)\b").unwrap(),
        }
    }

    /// Interpret a claim. Every field of the result is always populated;
    /// defaults are descriptive/present/probable/particular with
    /// "unspecified" entities.
    pub fn interpret(&self, text: &str) -> ClaimInterpretation {
        let tokens = tokenize(text);
        let joined = tokens.join(" ");

        let relationship = relationship_of(&joined);
        let assertion = assertion_of(&joined);
        let temporal = temporal_of(&joined, &self.future_year);
        let (certainty, qualifiers) = certainty_and_qualifiers(&joined);
        let scope = scope_of(&joined);
        let (subject, object) = extract_subject_object(&tokens, &joined);
        let domain = domain::classify(&joined);

        tracing::debug!(
            subject = %subject,
            relationship = ?relationship,
            domain = ?domain.domain,
            "Interpreted claim"
        );

        ClaimInterpretation {
            subject,
            object,
            relationship,
            temporal,
            certainty,
            assertion,
            scope,
            qualifiers,
            domain,
        }
    }
}

impl Default for ClaimInterpreter {
    fn default() -> Self {
        Self::new()
    }
}

/// Normalize a word for matching (lowercase, strip surrounding punctuation)
fn normalize_word(w: &str) -> String {
    w.trim_matches(|c: char| c.is_ascii_punctuation())
        .to_lowercase()
}

pub(crate) fn tokenize(text: &str) -> Vec<String> {
    text.split_whitespace()
        .map(normalize_word)
        .filter(|w| !w.is_empty())
        .collect()
}

/// Lowercased claim text with punctuation stripped and whitespace collapsed
pub(crate) fn normalize_claim(text: &str) -> String {
    tokenize(text).join(" ")
}

/// Word-boundary containment of a (possibly multi-word) term
pub(crate) fn contains_term(joined: &str, term: &str) -> bool {
    format!(" {joined} ").contains(&format!(" {term} "))
}

fn any_term(joined: &str, terms: &[&str]) -> bool {
    terms.iter().any(|t| contains_term(joined, t))
}

fn relationship_of(joined: &str) -> RelationshipType {
    if any_term(joined, CAUSAL_INDICATORS) {
        RelationshipType::Causal
    } else if any_term(joined, COMPARATIVE_INDICATORS) {
        RelationshipType::Comparative
    } else {
        RelationshipType::Descriptive
    }
}

fn assertion_of(joined: &str) -> AssertionType {
    if any_term(joined, CAUSAL_INDICATORS) {
        AssertionType::Causal
    } else if any_term(joined, CORRELATIONAL_INDICATORS) {
        AssertionType::Correlational
    } else {
        AssertionType::Descriptive
    }
}

fn temporal_of(joined: &str, future_year: &Regex) -> TemporalAspect {
    if any_term(joined, FUTURE_INDICATORS) || future_year.is_match(joined) {
        TemporalAspect::Future
    } else if any_term(joined, PAST_INDICATORS) {
        TemporalAspect::Past
    } else {
        TemporalAspect::Present
    }
}

fn certainty_and_qualifiers(joined: &str) -> (CertaintyLevel, Vec<String>) {
    let qualifiers: Vec<String> = SPECULATIVE_INDICATORS
        .iter()
        .chain(PROBABLE_INDICATORS)
        .filter(|hedge| contains_term(joined, hedge))
        .map(|hedge| hedge.to_string())
        .collect();

    let certainty = if any_term(joined, SPECULATIVE_INDICATORS) {
        CertaintyLevel::Speculative
    } else if any_term(joined, DEFINITIVE_INDICATORS) {
        CertaintyLevel::Definitive
    } else {
        CertaintyLevel::Probable
    };

    (certainty, qualifiers)
}

fn scope_of(joined: &str) -> ClaimScope {
    if any_term(joined, UNIVERSAL_INDICATORS) {
        ClaimScope::Universal
    } else if any_term(joined, CONDITIONAL_INDICATORS) {
        ClaimScope::Conditional
    } else {
        ClaimScope::Particular
    }
}

/// Extract subject and object phrases.
///
/// Rules, first match wins:
/// 1. Known subject phrase table (most specific phrase first)
/// 2. Split on the first linking token; left side is the subject
/// 3. Leading tokens of the claim
///
/// The object comes from the right side of the linking token, or from the
/// remainder after the subject phrase when no link is present.
fn extract_subject_object(tokens: &[String], joined: &str) -> (String, String) {
    let known = KNOWN_SUBJECTS.iter().find(|p| contains_term(joined, p));
    let link_idx = tokens.iter().position(|t| is_link_token(t));

    let subject = match (known, link_idx) {
        (Some(phrase), _) => strip_leading(&tokenize(phrase), PHRASE_ARTICLES).join(" "),
        (None, Some(i)) if i > 0 => strip_leading(&tokens[..i], PHRASE_ARTICLES).join(" "),
        _ => strip_leading(tokens, PHRASE_ARTICLES)
            .iter()
            .take(MAX_FALLBACK_SUBJECT_TOKENS)
            .cloned()
            .collect::<Vec<_>>()
            .join(" "),
    };

    let object = match link_idx {
        Some(i) => clean_object(&tokens[i + 1..]),
        None => object_after_subject(joined, &subject),
    };

    (or_unspecified(subject), or_unspecified(object))
}

fn is_link_token(token: &str) -> bool {
    LINK_TOKENS.contains(&token)
}

/// Drop leading tokens while they are in `stop`
fn strip_leading<'a>(tokens: &'a [String], stop: &[&str]) -> &'a [String] {
    let mut rest = tokens;
    while let Some(first) = rest.first() {
        if stop.contains(&first.as_str()) {
            rest = &rest[1..];
        } else {
            break;
        }
    }
    rest
}

fn clean_object(tokens: &[String]) -> String {
    let rest = strip_leading(tokens, LINK_PARTICLES);
    let rest = strip_leading(rest, PHRASE_ARTICLES);
    rest.iter()
        .take(MAX_OBJECT_TOKENS)
        .cloned()
        .collect::<Vec<_>>()
        .join(" ")
}

fn object_after_subject(joined: &str, subject: &str) -> String {
    if subject.is_empty() {
        return String::new();
    }
    match joined.split_once(subject) {
        Some((_, rest)) => clean_object(&tokenize(rest)),
        None => String::new(),
    }
}

fn or_unspecified(phrase: String) -> String {
    if phrase.is_empty() {
        UNSPECIFIED.to_string()
    } else {
        phrase
    }
}
