//! Orphaned reference check: names a description mentions that match no
//! entity in the snapshot.
//!
//! Best-effort: the extractor can surface proper nouns that were never meant
//! to be entities, and aliases of real entities will not match. Ground truth
//! for "is this a real entity" does not exist locally, so the findings are
//! fixed at low severity.

use std::collections::HashSet;
use tracing::debug;

use crate::llm::client::Oracle;
use crate::llm::prompts;
use crate::llm::verdict::{self, ExtractedNames, OracleJudgment};
use crate::report::{Category, EntityRef, Issue, Severity};
use crate::store::WorldSnapshot;

pub async fn check(snapshot: &WorldSnapshot, oracle: &dyn Oracle) -> Vec<Issue> {
    let known: HashSet<String> = snapshot
        .entities
        .iter()
        .map(|e| e.name.to_lowercase())
        .collect();

    let mut issues = Vec::new();

    for entity in &snapshot.entities {
        if entity.description_text().is_none() {
            continue;
        }

        let prompt = prompts::proper_nouns(entity);
        let judgment: OracleJudgment<ExtractedNames> = verdict::judge(oracle, &prompt).await;
        let OracleJudgment::Verdict(extracted) = judgment else {
            continue;
        };

        let orphaned: Vec<String> = extracted
            .names
            .into_iter()
            .filter(|name| !known.contains(&name.to_lowercase()))
            .collect();

        if orphaned.is_empty() {
            continue;
        }

        debug!(
            "reference: \"{}\" mentions {} unknown name(s)",
            entity.name,
            orphaned.len()
        );
        issues.push(Issue {
            id: format!("reference-{}", entity.id),
            severity: Severity::Low,
            category: Category::Reference,
            title: format!("\"{}\" references unknown names", entity.name),
            description: format!(
                "The description of \"{}\" mentions names with no matching entity: {}.",
                entity.name,
                orphaned.join(", ")
            ),
            affected_entities: vec![EntityRef::from(entity)],
            suggested_fix: "Create entities for these names or correct the description."
                .to_string(),
        });
    }

    issues
}
