//! The single parse-or-absorb point for oracle responses.
//!
//! Every check expects a strict JSON object back from a free-text-capable
//! model. Transport errors, fenced or prefixed output, and shape mismatches
//! all collapse to [`OracleJudgment::NoVerdict`] here; callers read that as
//! "no issue for this candidate" and move on. There is no retry and no
//! reprompt.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::warn;

use super::client::Oracle;

/// Outcome of one oracle exchange, typed per check.
#[derive(Debug)]
pub enum OracleJudgment<T> {
    Verdict(T),
    NoVerdict,
}

/// Verdict shape for the temporal check.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsistencyVerdict {
    pub consistent: bool,
    #[serde(default)]
    pub severity: Option<String>,
    #[serde(default)]
    pub explanation: Option<String>,
    #[serde(default)]
    pub suggested_fix: Option<String>,
}

/// Verdict shape for the description check.
#[derive(Debug, Deserialize)]
pub struct ContradictionFindings {
    pub contradictions: Vec<ContradictionFinding>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContradictionFinding {
    pub explanation: String,
    #[serde(default)]
    pub severity: Option<String>,
    #[serde(default)]
    pub suggested_fix: Option<String>,
}

/// Verdict shape for the reference check.
#[derive(Debug, Deserialize)]
pub struct ExtractedNames {
    pub names: Vec<String>,
}

/// Verdict shape for the relationship check.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelationshipVerdict {
    pub contradictory: bool,
    #[serde(default)]
    pub severity: Option<String>,
    #[serde(default)]
    pub explanation: Option<String>,
    #[serde(default)]
    pub suggested_fix: Option<String>,
}

/// Query the oracle and parse the response, absorbing every failure mode.
pub async fn judge<T: DeserializeOwned>(oracle: &dyn Oracle, prompt: &str) -> OracleJudgment<T> {
    match oracle.query(prompt).await {
        Ok(raw) => parse(&raw),
        Err(e) => {
            warn!("oracle query failed, treating as no verdict: {:#}", e);
            OracleJudgment::NoVerdict
        }
    }
}

/// Parse a raw model response into a typed verdict, or absorb it.
pub fn parse<T: DeserializeOwned>(raw: &str) -> OracleJudgment<T> {
    let json_str = extract_json_block(raw);
    match serde_json::from_str(&json_str) {
        Ok(v) => OracleJudgment::Verdict(v),
        Err(e) => {
            warn!("unparseable oracle response, treating as no verdict: {}", e);
            OracleJudgment::NoVerdict
        }
    }
}

/// Extract a JSON object from a string that may have markdown fences or
/// preamble text.
fn extract_json_block(text: &str) -> String {
    let trimmed = text.trim();

    // Try: markdown json fence
    if let Some(start) = trimmed.find("```json") {
        if let Some(end) = trimmed[start + 7..].find("```") {
            return trimmed[start + 7..start + 7 + end].trim().to_string();
        }
    }

    // Try: markdown plain fence
    if let Some(start) = trimmed.find("```") {
        if let Some(end) = trimmed[start + 3..].find("```") {
            let inner = trimmed[start + 3..start + 3 + end].trim();
            if inner.starts_with('{') {
                return inner.to_string();
            }
        }
    }

    // Try: find first { and last }
    if let Some(start) = trimmed.find('{') {
        if let Some(end) = trimmed.rfind('}') {
            if end > start {
                return trimmed[start..=end].to_string();
            }
        }
    }

    trimmed.to_string()
}
