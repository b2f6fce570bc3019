// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use crate::LayoutError;
use indexmap::IndexMap;
use serde::Serialize;
use std::fmt;

/// Which draft section a row range (or error) belongs to, by position in its list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(tag = "kind", content = "index", rename_all = "camelCase")]
pub enum SectionRef {
    SeatClass(usize),
    Space(usize),
}

impl SectionRef {
    pub fn index(&self) -> usize {
        match self {
            SectionRef::SeatClass(i) | SectionRef::Space(i) => *i,
        }
    }

    /// Prefix used in field keys: `seatClass` or `space`.
    pub fn key_prefix(&self) -> &'static str {
        match self {
            SectionRef::SeatClass(_) => "seatClass",
            SectionRef::Space(_) => "space",
        }
    }
}

impl fmt::Display for SectionRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // One-based for people reading messages.
        match self {
            SectionRef::SeatClass(i) => write!(f, "seat class {}", i + 1),
            SectionRef::Space(i) => write!(f, "space {}", i + 1),
        }
    }
}

/// Inclusive span of row numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RowSpan {
    pub from_row: i32,
    pub to_row: i32,
}

impl RowSpan {
    pub fn new(from_row: i32, to_row: i32) -> Self {
        Self { from_row, to_row }
    }
}

impl fmt::Display for RowSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.from_row == self.to_row {
            write!(f, "{}", self.from_row)
        } else {
            write!(f, "{}-{}", self.from_row, self.to_row)
        }
    }
}

/// Rows claimed by one section, built only while validating.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowRange {
    pub from: i32,
    pub to: i32,
    pub section: SectionRef,
}

impl RowRange {
    pub fn new(from: i32, to: i32, section: SectionRef) -> Self {
        Self { from, to, section }
    }

    pub fn contains(&self, row: i32) -> bool {
        self.from <= row && row <= self.to
    }

    /// True when either range has an endpoint inside the other.
    pub fn overlaps(&self, other: &RowRange) -> bool {
        self.contains(other.from)
            || self.contains(other.to)
            || other.contains(self.from)
            || other.contains(self.to)
    }

    pub fn shared_rows(&self, other: &RowRange) -> Option<RowSpan> {
        let from = self.from.max(other.from);
        let to = self.to.min(other.to);
        (from <= to).then(|| RowSpan::new(from, to))
    }

    pub fn row_count(&self) -> u32 {
        (self.to as i64 - self.from as i64 + 1).max(0) as u32
    }
}

#[derive(Debug, Clone, Default)]
pub struct OverlapReport {
    /// First conflict found for each range, in input order.
    pub conflicts: IndexMap<SectionRef, LayoutError>,
    /// Ranges that collide with nothing.
    pub passed: Vec<RowRange>,
}

/// Pairwise overlap check. Each range reports only the first range it collides
/// with, so two overlapping classes produce one conflict each.
pub fn find_overlaps(ranges: &[RowRange]) -> OverlapReport {
    let mut report = OverlapReport::default();

    for (i, range) in ranges.iter().enumerate() {
        let conflict = ranges
            .iter()
            .enumerate()
            .filter(|(j, _)| *j != i)
            .find_map(|(_, other)| {
                if range.overlaps(other) {
                    range.shared_rows(other).map(|rows| (other.section, rows))
                } else {
                    None
                }
            });

        match conflict {
            Some((other, rows)) => {
                report
                    .conflicts
                    .insert(range.section, LayoutError::RangeOverlap { other, rows });
            }
            None => report.passed.push(*range),
        }
    }

    report
}
