//! Prompt templates for the oracle-backed checks.
//!
//! Each prompt pins the exact JSON shape the caller will try to parse;
//! anything else the model says is absorbed by the verdict parser.

use crate::store::Entity;

pub fn temporal_conflict(a: &Entity, b: &Entity) -> String {
    format!(
        r#"You are checking the timeline of a fictional world.

Event "{a_name}" is dated {a_date} and its description references the event "{b_name}", which is dated {b_date}.

Description of "{a_name}":
{a_description}

Decide whether the two dates are consistent with how the description relates the events (before/after/during). Judge only the chronology implied by the text, not whether the events are plausible.

Output ONLY a JSON object with this exact structure:
{{
  "consistent": true or false,
  "severity": "low" | "medium" | "high" | "critical",
  "explanation": "one or two sentences on the conflict, if any",
  "suggestedFix": "how to adjust a date or the description"
}}

No markdown, no explanations outside the JSON."#,
        a_name = a.name,
        a_date = a.date.as_deref().unwrap_or("unknown"),
        b_name = b.name,
        b_date = b.date.as_deref().unwrap_or("unknown"),
        a_description = a.description.as_deref().unwrap_or(""),
    )
}

pub fn description_contradictions(entity: &Entity) -> String {
    format!(
        r#"You are reviewing a fictional {kind} named "{name}" for internal contradictions.

Description:
{description}

Flag only statements inside this description that contradict each other (for example: dead and alive, two different birthplaces, mutually exclusive traits). Do not compare against anything outside this text. If there are none, return an empty list.

Output ONLY a JSON object with this exact structure:
{{
  "contradictions": [
    {{
      "explanation": "what contradicts what",
      "severity": "low" | "medium" | "high" | "critical",
      "suggestedFix": "which statement to change"
    }}
  ]
}}

No markdown, no explanations outside the JSON."#,
        kind = entity.kind,
        name = entity.name,
        description = entity.description.as_deref().unwrap_or(""),
    )
}

pub fn proper_nouns(entity: &Entity) -> String {
    format!(
        r#"Extract the proper nouns from the following fictional text that look like names of people, places, events, or objects. Skip the subject's own name, "{name}".

Text:
{description}

Output ONLY a JSON object with this exact structure:
{{
  "names": ["Name One", "Name Two"]
}}

Return an empty list if there are none. No markdown, no explanations outside the JSON."#,
        name = entity.name,
        description = entity.description.as_deref().unwrap_or(""),
    )
}

pub fn relationship_conflict(a: &Entity, b: &Entity, types: &[&str]) -> String {
    format!(
        r#"In a fictional world, "{a_name}" and "{b_name}" are linked by several relationship types at once:

{types}

Decide whether any of these relationship types are mutually contradictory (for example, ally and enemy). Complementary or redundant types (ally and friend) are not contradictions.

Output ONLY a JSON object with this exact structure:
{{
  "contradictory": true or false,
  "severity": "low" | "medium" | "high" | "critical",
  "explanation": "which types conflict and why, if any",
  "suggestedFix": "which relationship to remove or rename"
}}

No markdown, no explanations outside the JSON."#,
        a_name = a.name,
        b_name = b.name,
        types = types
            .iter()
            .map(|t| format!("- {}", t))
            .collect::<Vec<_>>()
            .join("\n"),
    )
}
