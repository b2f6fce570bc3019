// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

//! The persisted seat-map layout and its conversion to and from drafts.
//!
//! On the wire a layout is a JSON object keyed by section name:
//!
//! ```json
//! {
//!   "business": { "seats": [{ "seatCode": "1A" }], "fromRow": 1, "toRow": 1, "pattern": "1" },
//!   "space1": { "type": "space", "label": "galley", "fromRow": 2, "toRow": 2 }
//! }
//! ```

use crate::draft::{SeatClassSpec, SpaceSpec};
use crate::pattern::parse_pattern;
use crate::seats::{generate_rows, Seat};
use crate::validator::Field;
use crate::LayoutError;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

/// Longest row span a stored entry may claim before consumers refuse to walk it.
pub const MAX_SECTION_ROWS: i64 = 10_000;

/// Key given to the n-th space (one-based) when a layout is assembled.
pub fn space_key(n: usize) -> String {
    format!("space{}", n)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SpaceTag {
    #[default]
    #[serde(rename = "space")]
    Space,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpaceEntry {
    #[serde(rename = "type")]
    pub kind: SpaceTag,
    pub label: String,
    pub from_row: i32,
    pub to_row: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeatClassEntry {
    pub seats: Vec<Seat>,
    pub from_row: i32,
    pub to_row: i32,
    pub pattern: String,
}

/// One section of a layout. An entry with `"type": "space"` is a space, anything
/// else is a seat class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LayoutEntry {
    Space(SpaceEntry),
    SeatClass(SeatClassEntry),
}

impl LayoutEntry {
    pub fn rows(&self) -> (i32, i32) {
        match self {
            LayoutEntry::Space(space) => (space.from_row, space.to_row),
            LayoutEntry::SeatClass(class) => (class.from_row, class.to_row),
        }
    }

    pub fn seats(&self) -> &[Seat] {
        match self {
            LayoutEntry::Space(_) => &[],
            LayoutEntry::SeatClass(class) => &class.seats,
        }
    }

    /// False for an inverted range or one longer than [`MAX_SECTION_ROWS`].
    pub fn has_walkable_rows(&self) -> bool {
        let (from, to) = self.rows();
        from <= to && (to as i64 - from as i64) < MAX_SECTION_ROWS
    }
}

/// Ways a stored layout can break what seat-map consumers rely on.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ContractViolation {
    #[error("seat {seat_code} appears more than once")]
    DuplicateSeat { seat_code: String },
    #[error("seats of '{section}' do not match rows {from_row}-{to_row} and pattern '{pattern}'")]
    SeatsMismatch {
        section: String,
        from_row: i32,
        to_row: i32,
        pattern: String,
    },
    #[error("'{section}' has an unusable row span {from_row}-{to_row}")]
    InvalidRowSpan {
        section: String,
        from_row: i32,
        to_row: i32,
    },
    #[error("row {row} is claimed by both '{first}' and '{second}'")]
    RowClaimedTwice {
        row: i32,
        first: String,
        second: String,
    },
}

/// Section name → entry, in assembly order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Layout {
    sections: IndexMap<String, LayoutEntry>,
}

impl Layout {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, entry: LayoutEntry) -> Option<LayoutEntry> {
        self.sections.insert(key.into(), entry)
    }

    pub fn get(&self, key: &str) -> Option<&LayoutEntry> {
        self.sections.get(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &LayoutEntry)> {
        self.sections.iter()
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Seats advertised for sale: every seat of every seat-class entry.
    pub fn total_seats(&self) -> usize {
        self.sections.values().map(|e| e.seats().len()).sum()
    }

    pub fn seat_codes(&self) -> impl Iterator<Item = &str> {
        self.sections
            .values()
            .flat_map(|e| e.seats().iter().map(|s| s.seat_code.as_str()))
    }

    /// Key of the section that owns `row`, if any.
    pub fn section_for_row(&self, row: i32) -> Option<&str> {
        self.sections
            .iter()
            .find(|(_, entry)| {
                let (from, to) = entry.rows();
                from <= row && row <= to
            })
            .map(|(key, _)| key.as_str())
    }

    /// Checks the guarantees consumers depend on: unique seat codes, seats that
    /// match each class's rows and pattern, and no row owned twice.
    ///
    /// Entries with an unusable span are reported once and skipped by the
    /// remaining checks.
    pub fn check_consistency(&self) -> Vec<ContractViolation> {
        let mut violations = Vec::new();

        let mut walkable = Vec::with_capacity(self.sections.len());
        for (key, entry) in &self.sections {
            if entry.has_walkable_rows() {
                walkable.push((key.as_str(), entry));
            } else {
                let (from_row, to_row) = entry.rows();
                violations.push(ContractViolation::InvalidRowSpan {
                    section: key.clone(),
                    from_row,
                    to_row,
                });
            }
        }

        let mut seen = HashSet::new();
        for code in self.seat_codes() {
            if !seen.insert(code) {
                violations.push(ContractViolation::DuplicateSeat {
                    seat_code: code.to_string(),
                });
            }
        }

        for (key, entry) in &walkable {
            if let LayoutEntry::SeatClass(class) = entry {
                let expected = parse_pattern(&class.pattern)
                    .map(|p| generate_rows(class.from_row, class.to_row, &p))
                    .ok();
                if expected.as_deref() != Some(class.seats.as_slice()) {
                    violations.push(ContractViolation::SeatsMismatch {
                        section: key.to_string(),
                        from_row: class.from_row,
                        to_row: class.to_row,
                        pattern: class.pattern.clone(),
                    });
                }
            }
        }

        for (i, (first, a)) in walkable.iter().enumerate() {
            let (a_from, a_to) = a.rows();
            for (second, b) in &walkable[i + 1..] {
                let (b_from, b_to) = b.rows();
                let row = a_from.max(b_from);
                if row <= a_to.min(b_to) {
                    violations.push(ContractViolation::RowClaimedTwice {
                        row,
                        first: first.to_string(),
                        second: second.to_string(),
                    });
                }
            }
        }

        violations
    }
}

/// Builds the persisted layout from validated drafts.
///
/// Seat classes are keyed by name; spaces get `space1`, `space2`, … in input
/// order. Only fails if a row field was never filled in.
pub fn assemble_layout(
    seat_classes: Vec<SeatClassSpec>,
    spaces: Vec<SpaceSpec>,
) -> Result<Layout, LayoutError> {
    let mut layout = Layout::new();

    for class in seat_classes {
        let (class_name, from_row, to_row, pattern, seats) = class.into_parts();
        let from_row = from_row.ok_or(LayoutError::MissingField {
            field: Field::FromRow,
        })?;
        let to_row = to_row.ok_or(LayoutError::MissingField {
            field: Field::ToRow,
        })?;
        layout.insert(
            class_name,
            LayoutEntry::SeatClass(SeatClassEntry {
                seats,
                from_row,
                to_row,
                pattern,
            }),
        );
    }

    for (i, space) in spaces.into_iter().enumerate() {
        let from_row = space.from_row().ok_or(LayoutError::MissingField {
            field: Field::FromRow,
        })?;
        let to_row = space.to_row().unwrap_or(from_row);
        layout.insert(
            space_key(i + 1),
            LayoutEntry::Space(SpaceEntry {
                kind: SpaceTag::Space,
                label: space.label,
                from_row,
                to_row,
            }),
        );
    }

    log::debug!(
        "Assembled layout with {} sections and {} seats",
        layout.len(),
        layout.total_seats()
    );
    Ok(layout)
}

/// Splits a stored layout back into editable drafts. Seats are taken verbatim.
pub fn disassemble_layout(layout: &Layout) -> (Vec<SeatClassSpec>, Vec<SpaceSpec>) {
    let mut seat_classes = Vec::new();
    let mut spaces = Vec::new();

    for (key, entry) in layout.iter() {
        match entry {
            LayoutEntry::Space(space) => {
                spaces.push(SpaceSpec::from_stored(
                    space.label.clone(),
                    space.from_row,
                    space.to_row,
                ));
            }
            LayoutEntry::SeatClass(class) => {
                seat_classes.push(SeatClassSpec::from_stored(
                    key.clone(),
                    class.from_row,
                    class.to_row,
                    class.pattern.clone(),
                    class.seats.clone(),
                ));
            }
        }
    }

    (seat_classes, spaces)
}
