//! World snapshot: the read-only entity and relationship collections a check
//! run operates on.
//!
//! Snapshots are exported by the WorldCrafter app as a single JSON object
//! `{"entities": [...], "relationships": [...]}`. Either key may be absent;
//! partial exports still deserve a report, so missing collections load as
//! empty rather than failing.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

use crate::util;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityType {
    Character,
    Location,
    Event,
    Item,
}

impl EntityType {
    pub fn as_str(&self) -> &str {
        match self {
            EntityType::Character => "character",
            EntityType::Location => "location",
            EntityType::Event => "event",
            EntityType::Item => "item",
        }
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for EntityType {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "character" => Ok(EntityType::Character),
            "location" => Ok(EntityType::Location),
            "event" => Ok(EntityType::Event),
            "item" => Ok(EntityType::Item),
            _ => Err(()),
        }
    }
}

/// One named world object. Created by the app's editors; read-only here.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entity {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: EntityType,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Event timestamp, kept as the raw snapshot string. See
    /// [`Entity::parsed_date`].
    #[serde(default)]
    pub date: Option<String>,
    /// Event location name (events only).
    #[serde(default)]
    pub location: Option<String>,
}

impl Entity {
    /// The entity's date parsed to UTC, if present and parseable.
    /// An unparseable date is treated the same as a missing one.
    pub fn parsed_date(&self) -> Option<DateTime<Utc>> {
        self.date.as_deref().and_then(util::parse_timestamp)
    }

    /// Non-empty description text, if any.
    pub fn description_text(&self) -> Option<&str> {
        self.description.as_deref().filter(|d| !d.trim().is_empty())
    }
}

/// A directed relationship between two entities. Conflict grouping treats
/// the `{sourceId, targetId}` pair as unordered.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Relationship {
    pub source_id: String,
    pub target_id: String,
    pub relation_type: String,
}

impl Relationship {
    /// Canonical unordered key for grouping: the two ids sorted.
    pub fn pair_key(&self) -> (String, String) {
        if self.source_id <= self.target_id {
            (self.source_id.clone(), self.target_id.clone())
        } else {
            (self.target_id.clone(), self.source_id.clone())
        }
    }
}

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("failed to read snapshot from {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("snapshot is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// One in-memory world snapshot. Immutable for the duration of a check run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorldSnapshot {
    #[serde(default)]
    pub entities: Vec<Entity>,
    #[serde(default)]
    pub relationships: Vec<Relationship>,
}

impl WorldSnapshot {
    /// Load a snapshot from a JSON file.
    pub fn load(path: &Path) -> Result<Self, SnapshotError> {
        let content = fs::read_to_string(path).map_err(|source| SnapshotError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&content)
    }

    /// Parse a snapshot from a JSON string.
    pub fn from_json(content: &str) -> Result<Self, SnapshotError> {
        Ok(serde_json::from_str(content)?)
    }

    /// Look up an entity by id.
    pub fn entity(&self, id: &str) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id == id)
    }

    /// All entities of one type, in snapshot order.
    pub fn entities_of(&self, kind: EntityType) -> impl Iterator<Item = &Entity> {
        self.entities.iter().filter(move |e| e.kind == kind)
    }
}
