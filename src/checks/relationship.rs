//! Relationship consistency check: multiple relationship types between the
//! same pair of entities that cannot all hold at once.

use std::collections::HashMap;
use tracing::debug;

use crate::llm::client::Oracle;
use crate::llm::prompts;
use crate::llm::verdict::{self, OracleJudgment, RelationshipVerdict};
use crate::report::{Category, EntityRef, Issue, Severity};
use crate::store::{Relationship, WorldSnapshot};

pub async fn check(snapshot: &WorldSnapshot, oracle: &dyn Oracle) -> Vec<Issue> {
    // Group by unordered pair, preserving the order pairs were first seen in
    // so the report is stable across runs.
    let mut order: Vec<(String, String)> = Vec::new();
    let mut groups: HashMap<(String, String), Vec<&Relationship>> = HashMap::new();
    for relationship in &snapshot.relationships {
        let key = relationship.pair_key();
        if !groups.contains_key(&key) {
            order.push(key.clone());
        }
        groups.entry(key).or_default().push(relationship);
    }

    let mut issues = Vec::new();

    for key in order {
        let group = &groups[&key];
        // A single relationship has nothing to contradict.
        if group.len() < 2 {
            continue;
        }

        // Issues must only reference entities present in the snapshot; a
        // group pointing at a missing entity is skipped.
        let (Some(a), Some(b)) = (snapshot.entity(&key.0), snapshot.entity(&key.1)) else {
            continue;
        };

        let types: Vec<&str> = group.iter().map(|r| r.relation_type.as_str()).collect();
        debug!(
            "relationship: \"{}\" and \"{}\" share {} relationship types",
            a.name,
            b.name,
            types.len()
        );

        let prompt = prompts::relationship_conflict(a, b, &types);
        let judgment: OracleJudgment<RelationshipVerdict> = verdict::judge(oracle, &prompt).await;

        if let OracleJudgment::Verdict(v) = judgment {
            if !v.contradictory {
                continue;
            }
            issues.push(Issue {
                id: format!("relationship-{}-{}", key.0, key.1),
                severity: Severity::parse_or_medium(v.severity.as_deref()),
                category: Category::Relationship,
                title: format!(
                    "Conflicting relationships between \"{}\" and \"{}\"",
                    a.name, b.name
                ),
                description: v.explanation.unwrap_or_else(|| {
                    format!(
                        "\"{}\" and \"{}\" are linked as {} at the same time.",
                        a.name,
                        b.name,
                        types.join(" and ")
                    )
                }),
                affected_entities: vec![EntityRef::from(a), EntityRef::from(b)],
                suggested_fix: v.suggested_fix.unwrap_or_else(|| {
                    "Remove or rename one of the conflicting relationships.".to_string()
                }),
            });
        }
    }

    issues
}
