//! Methodology-first search planning
//!
//! Turns a claim interpretation into a bounded, ordered set of search
//! queries: direct-claim queries first, then methodology-qualified
//! queries, then counter-evidence queries. Every budget decision taken
//! while planning lands in the strategy's audit trail.

use crate::model::{
    ClaimInterpretation, MethodologyType, SearchQuery, SearchStrategy, StrategyConfig,
};

/// Methodology framings, in the order they are planned
const METHODOLOGY_TERMS: &[(&str, MethodologyType)] = &[
    ("peer reviewed study", MethodologyType::PeerReviewedStudy),
    ("systematic review", MethodologyType::SystematicReview),
    ("government report", MethodologyType::GovernmentReport),
    ("expert analysis", MethodologyType::ExpertAnalysis),
];

const PRIMARY_PRIORITY: u8 = 3;
const METHODOLOGY_PRIORITY: u8 = 2;
const COUNTER_PRIORITY: u8 = 1;

/// Trim floors. Groups are cut in reverse-priority order down to these
/// before anything with higher priority is touched; a second pass ignores
/// the floors when the budget is smaller than their sum.
const COUNTER_FLOOR: usize = 2;
const METHODOLOGY_FLOOR: usize = 2;
const PRIMARY_FLOOR: usize = 1;

pub struct MethodologySearchStrategist {
    config: StrategyConfig,
}

impl MethodologySearchStrategist {
    pub fn new(config: StrategyConfig) -> Self {
        Self { config }
    }

    /// Build the bounded query plan for one interpreted claim.
    ///
    /// Always yields at least one query and never more than the configured
    /// budget, whatever the interpretation looks like.
    pub fn build_strategy(
        &self,
        claim_text: &str,
        interpretation: &ClaimInterpretation,
    ) -> SearchStrategy {
        let budget = self.config.max_total_queries.max(1);
        let group_cap = self.config.max_group_queries.max(1);
        let mut audit = Vec::new();

        let claim = claim_text.trim();
        let topic = topic_phrase(claim, interpretation);

        let mut primary = self.primary_queries(claim, &topic);
        let mut methodology = self.methodology_queries(&topic);
        let mut counter = self.counter_queries(claim, &topic, interpretation, &mut audit);

        for (group, name) in [
            (&mut primary, "primary"),
            (&mut methodology, "methodology"),
            (&mut counter, "counter-evidence"),
        ] {
            if group.len() > group_cap {
                audit.push(format!(
                    "capped {name} group at {group_cap} queries (planned {})",
                    group.len()
                ));
                group.truncate(group_cap);
            }
        }

        audit.push(format!(
            "planned {} primary, {} methodology, {} counter-evidence queries against a budget of {budget}",
            primary.len(),
            methodology.len(),
            counter.len()
        ));

        let mut total = primary.len() + methodology.len() + counter.len();
        for (group, floor, name) in [
            (&mut counter, COUNTER_FLOOR, "counter-evidence"),
            (&mut methodology, METHODOLOGY_FLOOR, "methodology"),
            (&mut primary, PRIMARY_FLOOR, "primary"),
        ] {
            trim_group(group, floor, &mut total, budget, &mut audit, name);
        }

        // Floors themselves can overshoot a very small budget
        if total > budget {
            for (group, name) in [
                (&mut counter, "counter-evidence"),
                (&mut methodology, "methodology"),
            ] {
                trim_group(group, 0, &mut total, budget, &mut audit, name);
            }
            trim_group(&mut primary, PRIMARY_FLOOR, &mut total, budget, &mut audit, "primary");
        }

        let queries: Vec<SearchQuery> = primary
            .into_iter()
            .chain(methodology)
            .chain(counter)
            .enumerate()
            .map(|(id, planned)| SearchQuery {
                id,
                text: planned.text,
                methodology: planned.methodology,
                priority: planned.priority,
                timeout: self.config.query_timeout(),
            })
            .collect();

        debug_assert!(!queries.is_empty());
        debug_assert!(queries.len() <= budget);

        tracing::debug!(
            query_count = queries.len(),
            budget = budget,
            "Built search strategy"
        );

        SearchStrategy::new(queries, audit)
    }

    fn primary_queries(&self, claim: &str, topic: &str) -> Vec<PlannedQuery> {
        let mut queries = vec![
            PlannedQuery::new(
                claim.to_string(),
                MethodologyType::DirectClaim,
                PRIMARY_PRIORITY,
            ),
            PlannedQuery::new(
                format!("\"{claim}\""),
                MethodologyType::DirectClaim,
                PRIMARY_PRIORITY,
            ),
        ];

        if topic != claim {
            queries.push(PlannedQuery::new(
                format!("{topic} evidence"),
                MethodologyType::DirectClaim,
                PRIMARY_PRIORITY,
            ));
        }

        queries
    }

    fn methodology_queries(&self, topic: &str) -> Vec<PlannedQuery> {
        METHODOLOGY_TERMS
            .iter()
            .map(|(term, methodology)| {
                PlannedQuery::new(
                    format!("{topic} {term}"),
                    *methodology,
                    METHODOLOGY_PRIORITY,
                )
            })
            .collect()
    }

    fn counter_queries(
        &self,
        claim: &str,
        topic: &str,
        interpretation: &ClaimInterpretation,
        audit: &mut Vec<String>,
    ) -> Vec<PlannedQuery> {
        let domain = &interpretation.domain.domain;
        if self.config.rebuttal_exempt_domains.contains(domain) {
            audit.push(format!(
                "skipped counter-evidence queries for exempt domain {domain:?}"
            ));
            return Vec::new();
        }

        vec![
            PlannedQuery::new(
                format!("{claim} debunked"),
                MethodologyType::FactCheck,
                COUNTER_PRIORITY,
            ),
            PlannedQuery::new(
                format!("{topic} fact check"),
                MethodologyType::FactCheck,
                COUNTER_PRIORITY,
            ),
            PlannedQuery::new(
                format!("evidence against {claim}"),
                MethodologyType::InvestigativeReport,
                COUNTER_PRIORITY,
            ),
            PlannedQuery::new(
                format!("{topic} criticism"),
                MethodologyType::InvestigativeReport,
                COUNTER_PRIORITY,
            ),
        ]
    }
}

struct PlannedQuery {
    text: String,
    methodology: MethodologyType,
    priority: u8,
}

impl PlannedQuery {
    fn new(text: String, methodology: MethodologyType, priority: u8) -> Self {
        Self {
            text,
            methodology,
            priority,
        }
    }
}

/// The phrase queries are framed around: subject plus object when the
/// interpreter extracted them, otherwise the raw claim text.
fn topic_phrase(claim: &str, interpretation: &ClaimInterpretation) -> String {
    if interpretation.subject == "unspecified" {
        return claim.to_string();
    }
    if interpretation.object == "unspecified" {
        return interpretation.subject.clone();
    }
    format!("{} {}", interpretation.subject, interpretation.object)
}

fn trim_group(
    group: &mut Vec<PlannedQuery>,
    floor: usize,
    total: &mut usize,
    budget: usize,
    audit: &mut Vec<String>,
    name: &str,
) {
    while *total > budget && group.len() > floor {
        group.pop();
        *total -= 1;
        audit.push(format!("dropped one {name} query to meet the budget of {budget}"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ClaimDomain;
    use crate::service::interpreter::ClaimInterpreter;

    fn interpret(text: &str) -> ClaimInterpretation {
        ClaimInterpreter::new().interpret(text)
    }

    #[test]
    fn test_default_strategy_is_within_budget_and_ordered() {
        let strategist = MethodologySearchStrategist::new(StrategyConfig::default());
        let interpretation = interpret("Vaccines cause autism");
        let strategy = strategist.build_strategy("Vaccines cause autism", &interpretation);

        assert!(strategy.total_query_count >= 1);
        assert!(strategy.total_query_count <= 12);
        assert_eq!(strategy.total_query_count, strategy.queries.len());

        // ids are positional
        for (i, query) in strategy.queries.iter().enumerate() {
            assert_eq!(query.id, i);
        }

        // primary first, counter-evidence last
        assert_eq!(strategy.queries[0].methodology, MethodologyType::DirectClaim);
        assert_eq!(strategy.queries[0].priority, 3);
        assert_eq!(strategy.queries.last().unwrap().priority, 1);
    }

    #[test]
    fn test_primary_group_includes_quoted_exact_match() {
        let strategist = MethodologySearchStrategist::new(StrategyConfig::default());
        let interpretation = interpret("Vaccines cause autism");
        let strategy = strategist.build_strategy("Vaccines cause autism", &interpretation);

        let quoted = &strategy.queries[1];
        assert_eq!(quoted.text, "\"Vaccines cause autism\"");
        assert_eq!(quoted.methodology, MethodologyType::DirectClaim);
        assert_eq!(quoted.priority, 3);

        // all three primary forms survive the default budget
        let primary_count = strategy.queries.iter().filter(|q| q.priority == 3).count();
        assert_eq!(primary_count, 3);
    }

    #[test]
    fn test_methodology_queries_are_planned() {
        let strategist = MethodologySearchStrategist::new(StrategyConfig::default());
        let interpretation = interpret("Vaccines cause autism");
        let strategy = strategist.build_strategy("Vaccines cause autism", &interpretation);

        let peer_reviewed = strategy
            .queries
            .iter()
            .find(|q| q.methodology == MethodologyType::PeerReviewedStudy)
            .expect("peer reviewed query planned");
        assert!(peer_reviewed.text.contains("peer reviewed study"));
        assert!(peer_reviewed.text.contains("vaccines"));
    }

    #[test]
    fn test_budget_is_never_exceeded_across_configs() {
        let interpretation = interpret("Climate change policies reduce GDP growth");

        for budget in 1..=12 {
            let config = StrategyConfig {
                max_total_queries: budget,
                ..StrategyConfig::default()
            };
            let strategist = MethodologySearchStrategist::new(config);
            let strategy = strategist
                .build_strategy("Climate change policies reduce GDP growth", &interpretation);

            assert!(strategy.total_query_count >= 1, "budget {budget}");
            assert!(strategy.total_query_count <= budget, "budget {budget}");
        }
    }

    #[test]
    fn test_trim_drops_counter_evidence_before_methodology() {
        let config = StrategyConfig {
            max_total_queries: 6,
            ..StrategyConfig::default()
        };
        let strategist = MethodologySearchStrategist::new(config);
        let interpretation = interpret("Vaccines cause autism");
        let strategy = strategist.build_strategy("Vaccines cause autism", &interpretation);

        // 3 primary + 4 methodology + 4 counter planned, trimmed to 6:
        // counter and methodology are each cut to their floor of 2 before
        // primary loses its last-planned query
        assert_eq!(strategy.total_query_count, 6);
        let primary_count = strategy.queries.iter().filter(|q| q.priority == 3).count();
        let methodology_count = strategy.queries.iter().filter(|q| q.priority == 2).count();
        let counter_count = strategy.queries.iter().filter(|q| q.priority == 1).count();
        assert_eq!(primary_count, 2);
        assert_eq!(methodology_count, 2);
        assert_eq!(counter_count, 2);
        assert!(!strategy.audit_trail.is_empty());
    }

    #[test]
    fn test_zero_budget_still_yields_one_query() {
        let config = StrategyConfig {
            max_total_queries: 0,
            ..StrategyConfig::default()
        };
        let strategist = MethodologySearchStrategist::new(config);
        let interpretation = interpret("The Earth orbits the Sun");
        let strategy = strategist.build_strategy("The Earth orbits the Sun", &interpretation);

        assert_eq!(strategy.total_query_count, 1);
        assert_eq!(strategy.queries[0].methodology, MethodologyType::DirectClaim);
    }

    #[test]
    fn test_exempt_domain_skips_counter_queries() {
        let config = StrategyConfig {
            rebuttal_exempt_domains: vec![ClaimDomain::Health],
            ..StrategyConfig::default()
        };
        let strategist = MethodologySearchStrategist::new(config);
        let interpretation = interpret("Vaccines cause autism");
        let strategy = strategist.build_strategy("Vaccines cause autism", &interpretation);

        assert!(strategy.queries.iter().all(|q| q.priority != 1));
        assert!(
            strategy
                .audit_trail
                .iter()
                .any(|entry| entry.contains("exempt domain"))
        );
    }

    #[test]
    fn test_unparseable_claim_still_gets_queries() {
        let strategist = MethodologySearchStrategist::new(StrategyConfig::default());
        let interpretation = interpret("???");
        let strategy = strategist.build_strategy("???", &interpretation);

        assert!(strategy.total_query_count >= 1);
        assert_eq!(strategy.queries[0].text, "???");
    }

    #[test]
    fn test_strategy_is_deterministic() {
        let strategist = MethodologySearchStrategist::new(StrategyConfig::default());
        let interpretation = interpret("Coffee may prevent cancer");

        let a = strategist.build_strategy("Coffee may prevent cancer", &interpretation);
        let b = strategist.build_strategy("Coffee may prevent cancer", &interpretation);
        assert_eq!(
            serde_json::to_string(&a).unwrap(),
            serde_json::to_string(&b).unwrap()
        );
    }
}
