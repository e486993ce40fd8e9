//! Pure relevance scoring for evidence candidates
//!
//! Relevance blends four checks. Semantic match carries the largest weight
//! and is dominated by subject coverage, so evidence about the claim's
//! actual subject beats evidence that merely shares peripheral words with
//! it. All scores are in [0, 100].

use std::collections::HashSet;

use crate::model::{AssertionType, ClaimInterpretation, ClaimScope};
use crate::service::interpreter::lexicon::{CAUSAL_INDICATORS, CORRELATIONAL_INDICATORS};
use crate::service::interpreter::{contains_term, normalize_claim, tokenize};
use crate::service::validator::sources;

const SEMANTIC_WEIGHT: f64 = 0.4;
const LOGICAL_WEIGHT: f64 = 0.3;
const SCOPE_WEIGHT: f64 = 0.2;
const SOURCE_WEIGHT: f64 = 0.1;

const SUBJECT_SHARE: f64 = 0.6;
const OBJECT_SHARE: f64 = 0.25;
const CLAIM_SHARE: f64 = 0.15;
const SUBJECT_PHRASE_BONUS: f64 = 15.0;

const LOGICAL_BASE: f64 = 45.0;
const LOGICAL_STEP: f64 = 25.0;
const LOGICAL_CEILING: f64 = 95.0;
const DESCRIPTIVE_LOGICAL_SCORE: f64 = 70.0;

const UNIVERSAL_SCOPE_BASE: f64 = 50.0;
const CONDITIONAL_SCOPE_BASE: f64 = 55.0;
const SCOPE_STEP: f64 = 15.0;
const SCOPE_CEILING: f64 = 95.0;
const PARTICULAR_SCOPE_SCORE: f64 = 80.0;

// Breadth markers a universal claim wants to see in its evidence
const BREADTH_INDICATORS: &[&str] = &[
    "all",
    "every",
    "across",
    "worldwide",
    "global",
    "globally",
    "population",
    "meta-analysis",
    "meta analysis",
    "systematic review",
    "comprehensive",
    "consistently",
];

// Conditionality markers for claims that only hold in certain contexts
const CONDITION_INDICATORS: &[&str] = &[
    "if",
    "when",
    "under",
    "unless",
    "depends",
    "depending",
    "condition",
    "conditions",
    "context",
    "varies",
];

pub(crate) fn relevance(
    claim_text: &str,
    interpretation: &ClaimInterpretation,
    evidence_text: &str,
    source_domain: &str,
) -> f64 {
    let semantic = semantic_match(claim_text, interpretation, evidence_text);
    let logical = logical_relevance(&interpretation.assertion, evidence_text);
    let scope = scope_alignment(&interpretation.scope, evidence_text);
    let quality = sources::source_quality(source_domain);

    (SEMANTIC_WEIGHT * semantic
        + LOGICAL_WEIGHT * logical
        + SCOPE_WEIGHT * scope
        + SOURCE_WEIGHT * quality)
        .clamp(0.0, 100.0)
}

/// Token coverage of the claim's subject, object and full text within the
/// evidence, subject-weighted, plus a bonus when the evidence mentions the
/// whole subject phrase verbatim.
pub(crate) fn semantic_match(
    claim_text: &str,
    interpretation: &ClaimInterpretation,
    evidence_text: &str,
) -> f64 {
    let evidence_tokens: HashSet<String> = tokenize(evidence_text).into_iter().collect();

    let subject_cov = coverage(&tokenize(&interpretation.subject), &evidence_tokens);
    let object_cov = coverage(&tokenize(&interpretation.object), &evidence_tokens);
    let claim_cov = coverage(&tokenize(claim_text), &evidence_tokens);

    let mut score =
        (SUBJECT_SHARE * subject_cov + OBJECT_SHARE * object_cov + CLAIM_SHARE * claim_cov) * 100.0;

    let joined = normalize_claim(evidence_text);
    if contains_term(&joined, &interpretation.subject) {
        score += SUBJECT_PHRASE_BONUS;
    }

    score.min(100.0)
}

/// Does the evidence speak the claim's assertion language? Causal claims
/// want causal language in their evidence, correlational claims want
/// correlational language. Descriptive claims accept any evidence equally.
pub(crate) fn logical_relevance(assertion: &AssertionType, evidence_text: &str) -> f64 {
    let joined = normalize_claim(evidence_text);
    match assertion {
        AssertionType::Causal => indicator_score(&joined, CAUSAL_INDICATORS, LOGICAL_BASE),
        AssertionType::Correlational => {
            indicator_score(&joined, CORRELATIONAL_INDICATORS, LOGICAL_BASE)
        }
        AssertionType::Descriptive => DESCRIPTIVE_LOGICAL_SCORE,
    }
}

/// Universal claims need broad evidence; conditional claims need evidence
/// that acknowledges conditions. Particular claims accept most evidence.
pub(crate) fn scope_alignment(scope: &ClaimScope, evidence_text: &str) -> f64 {
    let joined = normalize_claim(evidence_text);
    match scope {
        ClaimScope::Universal => scope_score(&joined, BREADTH_INDICATORS, UNIVERSAL_SCOPE_BASE),
        ClaimScope::Conditional => {
            scope_score(&joined, CONDITION_INDICATORS, CONDITIONAL_SCOPE_BASE)
        }
        ClaimScope::Particular => PARTICULAR_SCOPE_SCORE,
    }
}

fn coverage(part_tokens: &[String], evidence_tokens: &HashSet<String>) -> f64 {
    if part_tokens.is_empty() {
        return 0.0;
    }
    let matched = part_tokens
        .iter()
        .filter(|t| evidence_tokens.contains(*t))
        .count();
    matched as f64 / part_tokens.len() as f64
}

fn indicator_score(joined: &str, indicators: &[&str], base: f64) -> f64 {
    let hits = indicators
        .iter()
        .filter(|term| contains_term(joined, term))
        .count();
    (base + LOGICAL_STEP * hits as f64).min(LOGICAL_CEILING)
}

fn scope_score(joined: &str, indicators: &[&str], base: f64) -> f64 {
    let hits = indicators
        .iter()
        .filter(|term| contains_term(joined, term))
        .count();
    (base + SCOPE_STEP * hits as f64).min(SCOPE_CEILING)
}
