//! The consistency checks and their fixed-order runner.
//!
//! Checks run strictly sequentially, one oracle query at a time, and each
//! category's issues keep the order in which candidates were encountered.
//! The oracle is injected per run so the whole pipeline can be driven by a
//! deterministic stub in tests and dry runs.

pub mod description;
pub mod reference;
pub mod relationship;
pub mod spatial;
pub mod temporal;

use tracing::info;

use crate::llm::client::Oracle;
use crate::report::Report;
use crate::store::WorldSnapshot;

pub struct CheckRunner<'a> {
    oracle: &'a dyn Oracle,
}

impl<'a> CheckRunner<'a> {
    pub fn new(oracle: &'a dyn Oracle) -> Self {
        Self { oracle }
    }

    /// Run every check over the snapshot and aggregate the findings.
    ///
    /// Category order is fixed: date, location, description, reference,
    /// relationship.
    pub async fn run(&self, snapshot: &WorldSnapshot) -> Report {
        info!(
            "Checking {} entities and {} relationships",
            snapshot.entities.len(),
            snapshot.relationships.len()
        );

        let mut issues = Vec::new();

        info!("Running temporal conflict check...");
        issues.extend(temporal::check(snapshot, self.oracle).await);

        info!("Running spatial conflict check...");
        issues.extend(spatial::check(snapshot));

        info!("Running description contradiction check...");
        issues.extend(description::check(snapshot, self.oracle).await);

        info!("Running orphaned reference check...");
        issues.extend(reference::check(snapshot, self.oracle).await);

        info!("Running relationship consistency check...");
        issues.extend(relationship::check(snapshot, self.oracle).await);

        info!("Found {} issue(s)", issues.len());
        Report::from_issues(issues)
    }
}
