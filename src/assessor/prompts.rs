//! Prompts for claim assessment and stance classification

use crate::model::EvidencePool;

/// System prompt for trust assessment
pub const ASSESSOR_SYSTEM_PROMPT: &str = r#"You are a fact-checking analyst.

Your role is to estimate how trustworthy a factual claim is, using only the
validated evidence pool provided.

You must:
- Base the estimate strictly on the provided evidence entries
- Weigh higher-quality methodologies (peer review, systematic reviews,
  government data) above opinion and reporting
- Account for contradicting evidence instead of ignoring it
- Lower your confidence when the pool is small, one-sided, or low quality
- Explain the estimate in short, concrete reasoning steps

Do not:
- Use knowledge that is not in the evidence pool
- Reward volume of evidence over methodological rigor
- Output prose outside the requested schema

trust_estimate is 0-100 (0 = certainly false, 100 = certainly true).
confidence is 0-100 (how sure you are of your own estimate).

Your output must be structured JSON only and conform to the requested schema."#;

/// System prompt for stance classification
pub const STANCE_SYSTEM_PROMPT: &str = r#"You are a stance classifier for fact-checking.

Given a factual claim and one piece of evidence text, decide whether the
evidence supports the claim, contradicts it, or is neutral.

You must:
- Judge only the relationship between this evidence and this claim
- Use "neutral" when the evidence is about the topic but takes no side
- Use "neutral" when the evidence is unclear or off-topic

Your output must be structured JSON only and conform to the requested schema."#;

/// Build the assessment prompt from a claim and its evidence pool
pub fn build_assessment_prompt(claim: &str, pool: &EvidencePool) -> String {
    let evidence_details = if pool.is_empty() {
        "No evidence passed validation for this claim.".to_string()
    } else {
        let mut details = format!(
            "Pool size: {}\nAggregate methodology quality: {:.1}\nMethodology diversity: {:.2}\nMethodology-first sourcing satisfied: {}\n\n",
            pool.len(),
            pool.aggregate_quality,
            pool.methodology_diversity,
            pool.ifcn_compliant
        );

        details.push_str("### Evidence Entries:\n");
        for (i, entry) in pool.entries.iter().enumerate() {
            let excerpt = entry.candidate.text.chars().take(400).collect::<String>();
            details.push_str(&format!(
                "{}. [{}] stance: {:?}, methodology: {:?}, quality: {:.0}, relevance: {:.0}\n   Source: {}\n   Title: {}\n   Excerpt: {}\n\n",
                i + 1,
                entry.candidate.source_domain,
                entry.stance,
                entry.methodology,
                entry.methodology_quality,
                entry.relevance,
                entry.candidate.url,
                entry.candidate.title,
                excerpt
            ));
        }
        details
    };

    format!(
        r#"Estimate the trustworthiness of the claim below using only the evidence provided.

## Claim
{claim}

## Validated Evidence
{evidence_details}
Entries are sorted by relevance. Stances were classified per entry; treat
contradicting entries as evidence against the claim, not noise.

---

### Required Output

Produce structured JSON containing:
- trust_estimate: 0-100
- confidence: 0-100
- reasoning: short list of concrete reasoning steps

Guidelines:
- An empty pool means the claim is unverified: keep trust_estimate low and
  confidence low, and say why
- Strong agreement across diverse, high-quality methodologies justifies a
  high estimate
- Credible contradicting evidence must pull the estimate down

Output JSON only."#
    )
}

/// Build the stance classification prompt for one evidence text
pub fn build_stance_prompt(claim: &str, evidence_text: &str) -> String {
    let excerpt = evidence_text.chars().take(2_000).collect::<String>();

    format!(
        r#"Classify the stance of the evidence below toward the claim.

## Claim
{claim}

## Evidence
{excerpt}

---

### Required Output

Produce structured JSON containing:
- stance: supporting | contradicting | neutral

Output JSON only."#
    )
}
