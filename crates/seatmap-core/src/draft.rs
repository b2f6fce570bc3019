// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use crate::layout::{assemble_layout, disassemble_layout, Layout};
use crate::policy::LayoutPolicy;
use crate::seats::{generate_seats, Seat};
use crate::validator::{validate_configuration, ValidationResult};
use crate::LayoutError;
use serde::{Deserialize, Serialize};

/// One cabin class being edited.
///
/// `seats` is derived from the row range and pattern and recomputed by every
/// setter that touches them; there is no way to assign it directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "SeatClassFields")]
pub struct SeatClassSpec {
    pub class_name: String,
    from_row: Option<i32>,
    to_row: Option<i32>,
    pattern: String,
    seats: Vec<Seat>,
}

/// Draft file shape; any `seats` present on input are ignored and regenerated.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SeatClassFields {
    #[serde(default)]
    class_name: String,
    from_row: Option<i32>,
    to_row: Option<i32>,
    #[serde(default)]
    pattern: String,
}

impl From<SeatClassFields> for SeatClassSpec {
    fn from(fields: SeatClassFields) -> Self {
        Self::new(
            fields.class_name,
            fields.from_row,
            fields.to_row,
            fields.pattern,
        )
    }
}

impl SeatClassSpec {
    pub fn new(
        class_name: impl Into<String>,
        from_row: Option<i32>,
        to_row: Option<i32>,
        pattern: impl Into<String>,
    ) -> Self {
        let mut spec = Self {
            class_name: class_name.into(),
            from_row,
            to_row,
            pattern: pattern.into(),
            seats: Vec::new(),
        };
        spec.regenerate();
        spec
    }

    /// An empty class, as created by "add seat class".
    pub fn empty() -> Self {
        Self::new(String::new(), None, None, String::new())
    }

    /// Rebuilds a class from a stored layout entry, keeping its seats verbatim.
    pub fn from_stored(
        class_name: impl Into<String>,
        from_row: i32,
        to_row: i32,
        pattern: impl Into<String>,
        seats: Vec<Seat>,
    ) -> Self {
        Self {
            class_name: class_name.into(),
            from_row: Some(from_row),
            to_row: Some(to_row),
            pattern: pattern.into(),
            seats,
        }
    }

    pub fn from_row(&self) -> Option<i32> {
        self.from_row
    }

    pub fn to_row(&self) -> Option<i32> {
        self.to_row
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn seats(&self) -> &[Seat] {
        &self.seats
    }

    pub fn set_from_row(&mut self, from_row: Option<i32>) {
        self.from_row = from_row;
        self.regenerate();
    }

    pub fn set_to_row(&mut self, to_row: Option<i32>) {
        self.to_row = to_row;
        self.regenerate();
    }

    pub fn set_pattern(&mut self, pattern: impl Into<String>) {
        self.pattern = pattern.into();
        self.regenerate();
    }

    pub(crate) fn into_parts(self) -> (String, Option<i32>, Option<i32>, String, Vec<Seat>) {
        (
            self.class_name,
            self.from_row,
            self.to_row,
            self.pattern,
            self.seats,
        )
    }

    fn regenerate(&mut self) {
        self.seats = generate_seats(self.from_row, self.to_row, &self.pattern);
        log::debug!(
            "Regenerated {} seats for '{}' ({:?}-{:?} {})",
            self.seats.len(),
            self.class_name,
            self.from_row,
            self.to_row,
            self.pattern
        );
    }
}

impl Default for SeatClassSpec {
    fn default() -> Self {
        Self::empty()
    }
}

/// A single non-seat row such as a galley or toilet.
///
/// `to_row` always follows `from_row`; it cannot be edited on its own.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "SpaceFields")]
pub struct SpaceSpec {
    pub label: String,
    from_row: Option<i32>,
    to_row: Option<i32>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SpaceFields {
    #[serde(default)]
    label: String,
    from_row: Option<i32>,
    to_row: Option<i32>,
}

impl TryFrom<SpaceFields> for SpaceSpec {
    type Error = LayoutError;

    fn try_from(fields: SpaceFields) -> Result<Self, Self::Error> {
        Self::new(fields.label, fields.from_row, fields.to_row)
    }
}

impl SpaceSpec {
    /// Builds a space, filling an absent `to_row` from `from_row`.
    ///
    /// A `to_row` that differs from `from_row` is rejected.
    pub fn new(
        label: impl Into<String>,
        from_row: Option<i32>,
        to_row: Option<i32>,
    ) -> Result<Self, LayoutError> {
        match (from_row, to_row) {
            (_, None) => {}
            (Some(from), Some(to)) if from == to => {}
            (_, Some(to)) => {
                return Err(LayoutError::SpaceRowMismatch {
                    from_row,
                    to_row: to,
                })
            }
        }

        Ok(Self {
            label: label.into(),
            from_row,
            to_row: from_row,
        })
    }

    pub fn single_row(label: impl Into<String>, row: i32) -> Self {
        Self {
            label: label.into(),
            from_row: Some(row),
            to_row: Some(row),
        }
    }

    /// Rebuilds a space from a stored layout entry without correcting it, so
    /// a damaged entry still surfaces as a validation error.
    pub(crate) fn from_stored(label: impl Into<String>, from_row: i32, to_row: i32) -> Self {
        Self {
            label: label.into(),
            from_row: Some(from_row),
            to_row: Some(to_row),
        }
    }

    pub fn from_row(&self) -> Option<i32> {
        self.from_row
    }

    pub fn to_row(&self) -> Option<i32> {
        self.to_row
    }

    pub fn set_from_row(&mut self, from_row: Option<i32>) {
        self.from_row = from_row;
        self.to_row = from_row;
    }

    /// Accepts only the value `to_row` already has; a space cannot grow.
    /// Clearing it falls back to `from_row`, as in [`SpaceSpec::new`].
    pub fn set_to_row(&mut self, to_row: Option<i32>) -> Result<(), LayoutError> {
        match to_row {
            None => {
                self.to_row = self.from_row;
                Ok(())
            }
            Some(_) if to_row == self.from_row => {
                self.to_row = to_row;
                Ok(())
            }
            Some(to) => {
                log::warn!(
                    "Rejected toRow {} for space '{}' (fromRow {:?})",
                    to,
                    self.label,
                    self.from_row
                );
                Err(LayoutError::SpaceRowMismatch {
                    from_row: self.from_row,
                    to_row: to,
                })
            }
        }
    }
}

/// A whole draft: the editing surface's view of one aircraft or aircraft type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Configuration {
    #[serde(default)]
    pub seat_classes: Vec<SeatClassSpec>,
    #[serde(default)]
    pub spaces: Vec<SpaceSpec>,
}

impl Configuration {
    pub fn new(seat_classes: Vec<SeatClassSpec>, spaces: Vec<SpaceSpec>) -> Self {
        Self {
            seat_classes,
            spaces,
        }
    }

    pub fn validate(&self, policy: &LayoutPolicy) -> ValidationResult {
        validate_configuration(&self.seat_classes, &self.spaces, policy)
    }

    /// Validates, then assembles. The draft is consumed either way.
    pub fn into_layout(self, policy: &LayoutPolicy) -> Result<Layout, ValidationResult> {
        let result = self.validate(policy);
        if !result.valid {
            return Err(result);
        }

        // Validation guarantees every row field is present.
        assemble_layout(self.seat_classes, self.spaces).map_err(|err| {
            let mut result = ValidationResult::default();
            result.global_errors.push(err);
            result.finish()
        })
    }

    pub fn from_layout(layout: &Layout) -> Self {
        let (seat_classes, spaces) = disassemble_layout(layout);
        Self {
            seat_classes,
            spaces,
        }
    }

    pub fn total_seats(&self) -> usize {
        self.seat_classes.iter().map(|c| c.seats().len()).sum()
    }
}
