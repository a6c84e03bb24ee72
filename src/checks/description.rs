//! Description contradiction check: statements inside one entity's
//! description that cannot all be true.

use tracing::debug;

use crate::llm::client::Oracle;
use crate::llm::prompts;
use crate::llm::verdict::{self, ContradictionFindings, OracleJudgment};
use crate::report::{Category, EntityRef, Issue, Severity};
use crate::store::WorldSnapshot;

pub async fn check(snapshot: &WorldSnapshot, oracle: &dyn Oracle) -> Vec<Issue> {
    let mut issues = Vec::new();

    for entity in &snapshot.entities {
        if entity.description_text().is_none() {
            continue;
        }

        debug!("description: checking \"{}\"", entity.name);
        let prompt = prompts::description_contradictions(entity);
        let judgment: OracleJudgment<ContradictionFindings> =
            verdict::judge(oracle, &prompt).await;

        if let OracleJudgment::Verdict(found) = judgment {
            // One entity can yield several findings; the counter keeps the
            // derived ids unique.
            for (counter, finding) in found.contradictions.iter().enumerate() {
                issues.push(Issue {
                    id: format!("description-{}-{}", entity.id, counter),
                    severity: Severity::parse_or_medium(finding.severity.as_deref()),
                    category: Category::Description,
                    title: format!("Contradiction in the description of \"{}\"", entity.name),
                    description: finding.explanation.clone(),
                    affected_entities: vec![EntityRef::from(entity)],
                    suggested_fix: finding.suggested_fix.clone().unwrap_or_else(|| {
                        "Rewrite the description so the statements agree.".to_string()
                    }),
                });
            }
        }
    }

    issues
}
