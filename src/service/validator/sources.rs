//! Fixed source-quality lookup table
//!
//! Quality is a property of the publishing domain, not the page. The table
//! is a first-match linear scan; suffix classes (.gov, .edu) catch agencies
//! and universities not listed explicitly, and everything else scores low.

use crate::model::MethodologyType;

pub(crate) const UNKNOWN_SOURCE_QUALITY: f64 = 40.0;
const GOV_SUFFIX_QUALITY: f64 = 85.0;
const EDU_SUFFIX_QUALITY: f64 = 82.0;

// (domain, quality score, methodology the domain publishes)
const DOMAIN_QUALITY: &[(&str, f64, MethodologyType)] = &[
    ("nature.com", 95.0, MethodologyType::PeerReviewedStudy),
    ("science.org", 95.0, MethodologyType::PeerReviewedStudy),
    ("nejm.org", 95.0, MethodologyType::PeerReviewedStudy),
    ("thelancet.com", 95.0, MethodologyType::PeerReviewedStudy),
    ("cochrane.org", 94.0, MethodologyType::SystematicReview),
    ("pubmed.ncbi.nlm.nih.gov", 92.0, MethodologyType::PeerReviewedStudy),
    ("who.int", 90.0, MethodologyType::GovernmentReport),
    ("cdc.gov", 90.0, MethodologyType::GovernmentReport),
    ("nih.gov", 90.0, MethodologyType::GovernmentReport),
    ("nasa.gov", 88.0, MethodologyType::GovernmentReport),
    ("noaa.gov", 88.0, MethodologyType::GovernmentReport),
    ("factcheck.org", 80.0, MethodologyType::FactCheck),
    ("politifact.com", 80.0, MethodologyType::FactCheck),
    ("snopes.com", 78.0, MethodologyType::FactCheck),
    ("fullfact.org", 78.0, MethodologyType::FactCheck),
    ("propublica.org", 78.0, MethodologyType::InvestigativeReport),
    ("reuters.com", 75.0, MethodologyType::DirectClaim),
    ("apnews.com", 75.0, MethodologyType::DirectClaim),
    ("economist.com", 70.0, MethodologyType::ExpertAnalysis),
    ("bbc.com", 70.0, MethodologyType::DirectClaim),
    ("bbc.co.uk", 70.0, MethodologyType::DirectClaim),
    ("nytimes.com", 68.0, MethodologyType::DirectClaim),
    ("washingtonpost.com", 68.0, MethodologyType::DirectClaim),
    ("theguardian.com", 66.0, MethodologyType::DirectClaim),
];

fn matches_host(domain: &str, host: &str) -> bool {
    domain == host || domain.strip_suffix(host).is_some_and(|p| p.ends_with('.'))
}

fn lookup(domain: &str) -> Option<&'static (&'static str, f64, MethodologyType)> {
    DOMAIN_QUALITY
        .iter()
        .find(|(host, _, _)| matches_host(domain, host))
}

pub(crate) fn source_quality(domain: &str) -> f64 {
    if let Some((_, quality, _)) = lookup(domain) {
        return *quality;
    }
    if domain.ends_with(".gov") {
        return GOV_SUFFIX_QUALITY;
    }
    if domain.ends_with(".edu") {
        return EDU_SUFFIX_QUALITY;
    }
    UNKNOWN_SOURCE_QUALITY
}

/// Methodology published by a domain, when the domain itself tells us.
/// Unrecognized domains return `None`; the caller falls back to the
/// methodology targeted by the originating query.
pub(crate) fn classify_methodology(domain: &str) -> Option<MethodologyType> {
    if let Some((_, _, methodology)) = lookup(domain) {
        return Some(*methodology);
    }
    if domain.ends_with(".gov") {
        return Some(MethodologyType::GovernmentReport);
    }
    if domain.ends_with(".edu") {
        return Some(MethodologyType::ExpertAnalysis);
    }
    None
}
