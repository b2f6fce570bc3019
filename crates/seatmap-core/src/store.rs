// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use crate::layout::Layout;
use crate::policy::EntityKind;
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutRecord {
    pub name: String,
    pub entity: EntityKind,
    pub layout: Layout,
    pub total_seats: usize,
    pub updated_at: DateTime<Utc>,
}

impl LayoutRecord {
    pub fn new(name: impl Into<String>, entity: EntityKind, layout: Layout) -> Self {
        Self {
            name: name.into(),
            entity,
            total_seats: layout.total_seats(),
            layout,
            updated_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LayoutCollection {
    #[serde(default)]
    pub records: Vec<LayoutRecord>,
}

impl LayoutCollection {
    /// Inserts or replaces the record with the same entity and name.
    /// Returns true when an existing record was replaced.
    pub fn upsert(&mut self, record: LayoutRecord) -> bool {
        match self
            .records
            .iter_mut()
            .find(|r| r.entity == record.entity && r.name == record.name)
        {
            Some(existing) => {
                *existing = record;
                true
            }
            None => {
                self.records.push(record);
                false
            }
        }
    }

    pub fn get(&self, entity: EntityKind, name: &str) -> Option<&LayoutRecord> {
        self.records
            .iter()
            .find(|r| r.entity == entity && r.name == name)
    }

    pub fn remove(&mut self, entity: EntityKind, name: &str) -> Option<LayoutRecord> {
        let pos = self
            .records
            .iter()
            .position(|r| r.entity == entity && r.name == name)?;
        Some(self.records.remove(pos))
    }

    pub fn list(&self, entity: Option<EntityKind>) -> impl Iterator<Item = &LayoutRecord> {
        self.records
            .iter()
            .filter(move |r| entity.map_or(true, |e| r.entity == e))
    }
}

#[derive(Debug, Clone)]
pub struct LayoutStore {
    path: PathBuf,
}

impl Default for LayoutStore {
    fn default() -> Self {
        Self::new(&crate::get_config_root())
    }
}

impl LayoutStore {
    pub fn new(config_root: &Path) -> Self {
        Self {
            path: config_root.join("layouts.json"),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<LayoutCollection> {
        if !self.path.exists() {
            return Ok(LayoutCollection::default());
        }

        let content = fs::read_to_string(&self.path).context("Failed to read layouts.json")?;

        serde_json::from_str(&content).context("Failed to parse layouts.json")
    }

    pub fn save(&self, collection: &LayoutCollection) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent).context("Failed to create config directory")?;
            }
        }

        let content =
            serde_json::to_string_pretty(collection).context("Failed to serialize layouts")?;

        fs::write(&self.path, content).context("Failed to write layouts.json")?;
        log::info!(
            "Saved {} layouts to {}",
            collection.records.len(),
            self.path.display()
        );
        Ok(())
    }
}
