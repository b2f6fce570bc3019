// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_MAX_SEATS_PER_ROW: u32 = 12;
pub const DEFAULT_MAX_TOTAL_ROWS: u32 = 20;
pub const DEFAULT_MAX_ROW_NUMBER: u32 = 20;

/// The kind of record a layout belongs to. Both share one engine and differ
/// only in their limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    #[default]
    Aircraft,
    AircraftType,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::Aircraft => write!(f, "aircraft"),
            EntityKind::AircraftType => write!(f, "aircraft type"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LayoutPolicy {
    #[serde(skip)]
    pub entity: EntityKind,
    pub max_seats_per_row: u32,
    pub max_total_rows: u32,
    pub max_row_number: u32,
}

impl Default for LayoutPolicy {
    fn default() -> Self {
        Self::for_entity(EntityKind::Aircraft)
    }
}

impl LayoutPolicy {
    pub fn for_entity(entity: EntityKind) -> Self {
        Self {
            entity,
            max_seats_per_row: DEFAULT_MAX_SEATS_PER_ROW,
            max_total_rows: DEFAULT_MAX_TOTAL_ROWS,
            max_row_number: DEFAULT_MAX_ROW_NUMBER,
        }
    }

    pub fn with_max_seats_per_row(mut self, max: u32) -> Self {
        self.max_seats_per_row = max;
        self
    }

    pub fn with_max_total_rows(mut self, max: u32) -> Self {
        self.max_total_rows = max;
        self
    }

    pub fn with_max_row_number(mut self, max: u32) -> Self {
        self.max_row_number = max;
        self
    }
}

/// Per-entity limits as stored in `policy.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PolicyConfig {
    pub aircraft: LayoutPolicy,
    pub aircraft_type: LayoutPolicy,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            aircraft: LayoutPolicy::for_entity(EntityKind::Aircraft),
            aircraft_type: LayoutPolicy::for_entity(EntityKind::AircraftType),
        }
    }
}

impl PolicyConfig {
    pub fn for_entity(&self, entity: EntityKind) -> LayoutPolicy {
        match entity {
            EntityKind::Aircraft => self.aircraft,
            EntityKind::AircraftType => self.aircraft_type,
        }
    }

    pub fn path_in(config_root: &Path) -> PathBuf {
        config_root.join("policy.json")
    }

    /// Reads `policy.json`. A missing file means defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("No policy file at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).context("Failed to read policy.json")?;
        let mut config: PolicyConfig =
            serde_json::from_str(&content).context("Failed to parse policy.json")?;

        // The entity is implied by the section, not stored in it.
        config.aircraft.entity = EntityKind::Aircraft;
        config.aircraft_type.entity = EntityKind::AircraftType;
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent).context("Failed to create config directory")?;
            }
        }

        let content =
            serde_json::to_string_pretty(self).context("Failed to serialize policy")?;
        fs::write(path, content).context("Failed to write policy.json")
    }
}
