use anyhow::Result;
use async_trait::async_trait;

/// The judgment service behind the semantic checks: one natural-language
/// prompt in, one raw model response out. Implementations wrap a concrete
/// provider; the pipeline never sees anything but this trait.
#[async_trait]
pub trait Oracle: Send + Sync {
    async fn query(&self, prompt: &str) -> Result<String>;
}

/// Offline stand-in for `--dry-run`: answers every check with a benign
/// verdict so a run exercises the whole pipeline without network access.
pub struct StubOracle;

impl Default for StubOracle {
    fn default() -> Self {
        Self::new()
    }
}

impl StubOracle {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Oracle for StubOracle {
    async fn query(&self, prompt: &str) -> Result<String> {
        // Dispatch on wording that is unique to each check's prompt.
        if prompt.contains("timeline of a fictional world") {
            Ok(r#"{"consistent": true}"#.to_string())
        } else if prompt.contains("internal contradictions") {
            Ok(r#"{"contradictions": []}"#.to_string())
        } else if prompt.contains("proper nouns") {
            Ok(r#"{"names": []}"#.to_string())
        } else if prompt.contains("relationship types") {
            Ok(r#"{"contradictory": false}"#.to_string())
        } else {
            Ok("{}".to_string())
        }
    }
}
