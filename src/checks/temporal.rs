//! Temporal conflict check: event dates vs. how events reference each other.
//!
//! Mention detection is case-insensitive substring containment, not named
//! entity recognition. Short or common event names will over-match; that is
//! an accepted heuristic boundary.

use tracing::debug;

use crate::llm::client::Oracle;
use crate::llm::prompts;
use crate::llm::verdict::{self, ConsistencyVerdict, OracleJudgment};
use crate::report::{Category, EntityRef, Issue, Severity};
use crate::store::{EntityType, WorldSnapshot};

pub async fn check(snapshot: &WorldSnapshot, oracle: &dyn Oracle) -> Vec<Issue> {
    // Only events carrying both a date and a description participate; an
    // event missing either is silently skipped, not an error.
    let events: Vec<_> = snapshot
        .entities_of(EntityType::Event)
        .filter(|e| e.date.is_some() && e.description_text().is_some())
        .collect();

    let mut issues = Vec::new();

    for a in &events {
        let description = a.description_text().unwrap_or("").to_lowercase();
        for b in &events {
            if a.id == b.id || !description.contains(&b.name.to_lowercase()) {
                continue;
            }

            debug!("temporal: \"{}\" references \"{}\"", a.name, b.name);
            let prompt = prompts::temporal_conflict(a, b);
            let judgment: OracleJudgment<ConsistencyVerdict> =
                verdict::judge(oracle, &prompt).await;

            if let OracleJudgment::Verdict(v) = judgment {
                if v.consistent {
                    continue;
                }
                issues.push(Issue {
                    id: format!("date-{}-{}", a.id, b.id),
                    severity: Severity::parse_or_medium(v.severity.as_deref()),
                    category: Category::Date,
                    title: format!("Date conflict between \"{}\" and \"{}\"", a.name, b.name),
                    description: v.explanation.unwrap_or_else(|| {
                        format!(
                            "The description of \"{}\" references \"{}\", but their dates do not fit that relation.",
                            a.name, b.name
                        )
                    }),
                    affected_entities: vec![EntityRef::from(*a), EntityRef::from(*b)],
                    suggested_fix: v.suggested_fix.unwrap_or_else(|| {
                        "Adjust one of the event dates or reword the description.".to_string()
                    }),
                });
            }
        }
    }

    issues
}
