//! Issue and report types: the output side of a check run.

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::store::{Entity, EntityType};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    pub const ALL: [Severity; 4] = [
        Severity::Low,
        Severity::Medium,
        Severity::High,
        Severity::Critical,
    ];

    /// Oracle severity strings are free text; anything unrecognized or
    /// absent falls back to medium.
    pub fn parse_or_medium(s: Option<&str>) -> Severity {
        s.and_then(|s| s.parse().ok()).unwrap_or(Severity::Medium)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Low => write!(f, "low"),
            Severity::Medium => write!(f, "medium"),
            Severity::High => write!(f, "high"),
            Severity::Critical => write!(f, "critical"),
        }
    }
}

impl FromStr for Severity {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(Severity::Low),
            "medium" => Ok(Severity::Medium),
            "high" => Ok(Severity::High),
            "critical" => Ok(Severity::Critical),
            _ => Err(()),
        }
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Date,
    Location,
    Description,
    Reference,
    Relationship,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Date,
        Category::Location,
        Category::Description,
        Category::Reference,
        Category::Relationship,
    ];
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Date => write!(f, "date"),
            Category::Location => write!(f, "location"),
            Category::Description => write!(f, "description"),
            Category::Reference => write!(f, "reference"),
            Category::Relationship => write!(f, "relationship"),
        }
    }
}

/// A reference to one entity involved in an issue. One-way: issues point at
/// entities, never the reverse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityRef {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: EntityType,
    pub name: String,
}

impl From<&Entity> for EntityRef {
    fn from(entity: &Entity) -> Self {
        Self {
            id: entity.id.clone(),
            kind: entity.kind,
            name: entity.name.clone(),
        }
    }
}

/// One reported inconsistency finding. Immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Issue {
    pub id: String,
    pub severity: Severity,
    pub category: Category,
    pub title: String,
    pub description: String,
    pub affected_entities: Vec<EntityRef>,
    pub suggested_fix: String,
}

/// The aggregated output of one full check run.
///
/// `by_severity` and `by_category` always carry every variant, zeros
/// included, so two runs over the same snapshot with the same verdicts
/// serialize identically apart from `timestamp`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub timestamp: String,
    pub total_issues: usize,
    pub by_severity: BTreeMap<Severity, usize>,
    pub by_category: BTreeMap<Category, usize>,
    pub issues: Vec<Issue>,
}

impl Report {
    pub fn from_issues(issues: Vec<Issue>) -> Self {
        let mut by_severity: BTreeMap<Severity, usize> =
            Severity::ALL.iter().map(|s| (*s, 0)).collect();
        let mut by_category: BTreeMap<Category, usize> =
            Category::ALL.iter().map(|c| (*c, 0)).collect();

        for issue in &issues {
            *by_severity.entry(issue.severity).or_insert(0) += 1;
            *by_category.entry(issue.category).or_insert(0) += 1;
        }

        Self {
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
            total_issues: issues.len(),
            by_severity,
            by_category,
            issues,
        }
    }

    /// Automation signal: a run fails when anything high or critical turned up.
    pub fn passed(&self) -> bool {
        !self
            .issues
            .iter()
            .any(|i| matches!(i.severity, Severity::High | Severity::Critical))
    }
}
