//! Spatial conflict check: a character cannot be in two distant places
//! within the same day.
//!
//! Oracle-free. Character mentions are detected by case-insensitive
//! substring containment in event descriptions, the same heuristic boundary
//! as the temporal check, so common names will over-match.

use chrono::{DateTime, Utc};

use crate::report::{Category, EntityRef, Issue, Severity};
use crate::store::{Entity, EntityType, WorldSnapshot};

/// Two appearances closer than this with different locations are flagged.
/// Exactly 24.0 hours apart is allowed.
const PROXIMITY_WINDOW_HOURS: f64 = 24.0;

pub fn check(snapshot: &WorldSnapshot) -> Vec<Issue> {
    // Events that can anchor a timeline entry: parsed date plus a location.
    let dated_events: Vec<(&Entity, DateTime<Utc>)> = snapshot
        .entities_of(EntityType::Event)
        .filter(|e| e.location.is_some())
        .filter_map(|e| e.parsed_date().map(|d| (e, d)))
        .collect();

    let mut issues = Vec::new();

    for character in snapshot.entities_of(EntityType::Character) {
        let name = character.name.to_lowercase();
        let mut timeline: Vec<(&Entity, DateTime<Utc>)> = dated_events
            .iter()
            .filter(|(e, _)| {
                e.description_text()
                    .is_some_and(|d| d.to_lowercase().contains(&name))
            })
            .copied()
            .collect();

        if timeline.len() < 2 {
            continue;
        }
        timeline.sort_by_key(|(_, date)| *date);

        for pair in timeline.windows(2) {
            let (first, start) = pair[0];
            let (second, end) = pair[1];
            let elapsed_hours = (end - start).num_seconds() as f64 / 3600.0;
            if elapsed_hours >= PROXIMITY_WINDOW_HOURS || first.location == second.location {
                continue;
            }

            issues.push(Issue {
                id: format!("location-{}-{}-{}", character.id, first.id, second.id),
                severity: Severity::Medium,
                category: Category::Location,
                title: format!("\"{}\" appears in two places within a day", character.name),
                description: format!(
                    "\"{}\" appears in \"{}\" at {} and in \"{}\" at {} only {:.1} hours later.",
                    character.name,
                    first.name,
                    first.location.as_deref().unwrap_or("unknown"),
                    second.name,
                    second.location.as_deref().unwrap_or("unknown"),
                    elapsed_hours
                ),
                affected_entities: vec![
                    EntityRef::from(character),
                    EntityRef::from(first),
                    EntityRef::from(second),
                ],
                suggested_fix: format!(
                    "Move one of the event dates apart or place both events in the same location as \"{}\" travels.",
                    character.name
                ),
            });
        }
    }

    issues
}
