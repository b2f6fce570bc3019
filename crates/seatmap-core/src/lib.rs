// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

//! Seat-map layout engine for aircraft and aircraft types.
//!
//! A configuration is a list of seat classes (row range + pattern such as `3-4-3`)
//! plus single-row spaces (galleys, toilets). The engine parses patterns, derives
//! seat lists, validates a whole configuration against an injected [`LayoutPolicy`]
//! and assembles the keyed [`Layout`] that downstream seat maps consume.

pub mod draft;
pub mod layout;
pub mod pattern;
pub mod policy;
pub mod ranges;
pub mod render;
pub mod seats;
pub mod store;
pub mod validator;

use serde::Serialize;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

pub use draft::{Configuration, SeatClassSpec, SpaceSpec};
pub use layout::{assemble_layout, disassemble_layout, Layout, LayoutEntry};
pub use pattern::{parse_pattern, SeatPattern};
pub use policy::{EntityKind, LayoutPolicy, PolicyConfig};
pub use ranges::{RowRange, RowSpan, SectionRef};
pub use seats::{generate_seats, Seat};
pub use validator::{validate_batch, validate_configuration, Field, FieldKey, ValidationResult};

/// Everything that can be wrong with a draft configuration.
///
/// These are reported inside a [`ValidationResult`], never used for control flow.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind")]
pub enum LayoutError {
    #[error("{field} is required")]
    MissingField { field: Field },
    #[error("{field} {rule} (got {value})")]
    InvalidNumber {
        field: Field,
        value: i32,
        rule: NumberRule,
    },
    #[error("pattern '{pattern}' must be seat counts separated by '-', e.g. 3-4-3")]
    PatternSyntax { pattern: String },
    #[error("pattern has {seats} seats per row, the limit is {max}")]
    SeatsPerRowExceeded { seats: u32, max: u32 },
    #[error("row {row} is beyond the last allowed row {max}")]
    RowBoundsExceeded { row: i32, max: u32 },
    #[error("{entity} layout uses {total} rows, the limit is {max}")]
    RowCountExceeded {
        entity: EntityKind,
        total: u32,
        max: u32,
    },
    #[error("rows {rows} are already used by {other}")]
    RangeOverlap { other: SectionRef, rows: RowSpan },
    #[error("a space spans exactly one row, toRow {to_row} must match fromRow")]
    SpaceRowMismatch { from_row: Option<i32>, to_row: i32 },
    #[error("section name '{name}' is used more than once")]
    DuplicateSection { name: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NumberRule {
    Positive,
    NotBeforeFromRow,
}

impl fmt::Display for NumberRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumberRule::Positive => write!(f, "must be a positive whole number"),
            NumberRule::NotBeforeFromRow => write!(f, "must not be before fromRow"),
        }
    }
}

/// Directory holding `policy.json` and `layouts.json` when no override is given.
pub fn get_config_root() -> PathBuf {
    directories::ProjectDirs::from("org", "seatmap", "seatmap")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from(".seatmap"))
}
