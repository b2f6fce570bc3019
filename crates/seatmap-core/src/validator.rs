// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use crate::draft::{Configuration, SeatClassSpec, SpaceSpec};
use crate::layout::space_key;
use crate::pattern::parse_pattern;
use crate::policy::LayoutPolicy;
use crate::ranges::{find_overlaps, RowRange, SectionRef};
use crate::{LayoutError, NumberRule};
use indexmap::IndexMap;
use rayon::prelude::*;
use serde::{Serialize, Serializer};
use std::fmt;

/// Input field an error is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    ClassName,
    Label,
    FromRow,
    ToRow,
    /// The row range as a whole (ordering and overlaps).
    Rows,
    Pattern,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Field::ClassName => "className",
            Field::Label => "label",
            Field::FromRow => "fromRow",
            Field::ToRow => "toRow",
            Field::Rows => "rows",
            Field::Pattern => "pattern",
        };
        f.write_str(name)
    }
}

/// Where a field error belongs, e.g. `seatClass-0-pattern`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FieldKey {
    pub section: SectionRef,
    pub field: Field,
}

impl FieldKey {
    pub fn new(section: SectionRef, field: Field) -> Self {
        Self { section, field }
    }
}

impl fmt::Display for FieldKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{}-{}",
            self.section.key_prefix(),
            self.section.index(),
            self.field
        )
    }
}

impl Serialize for FieldKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub valid: bool,
    /// First error recorded for each field, in the order they were found.
    pub field_errors: IndexMap<FieldKey, LayoutError>,
    /// Errors with no single owning field, such as the total row budget.
    pub global_errors: Vec<LayoutError>,
}

impl ValidationResult {
    pub fn error_for(&self, section: SectionRef, field: Field) -> Option<&LayoutError> {
        self.field_errors.get(&FieldKey::new(section, field))
    }

    /// Every problem as `key: message` lines, globals last.
    pub fn messages(&self) -> Vec<String> {
        self.field_errors
            .iter()
            .map(|(key, err)| format!("{}: {}", key, err))
            .chain(self.global_errors.iter().map(|err| err.to_string()))
            .collect()
    }

    pub fn has_errors_for(&self, section: SectionRef) -> bool {
        self.field_errors.keys().any(|key| key.section == section)
    }

    pub(crate) fn finish(mut self) -> Self {
        self.valid = self.field_errors.is_empty() && self.global_errors.is_empty();
        self
    }

    fn record(&mut self, section: SectionRef, field: Field, error: LayoutError) {
        self.field_errors
            .entry(FieldKey::new(section, field))
            .or_insert(error);
    }
}

pub struct LayoutValidator;

impl LayoutValidator {
    /// Runs every check over the whole draft. Nothing short-circuits, so one
    /// pass reports every problem at once.
    pub fn validate(
        seat_classes: &[SeatClassSpec],
        spaces: &[SpaceSpec],
        policy: &LayoutPolicy,
    ) -> ValidationResult {
        let mut result = ValidationResult::default();
        let mut candidates = Vec::with_capacity(seat_classes.len() + spaces.len());

        for (index, class) in seat_classes.iter().enumerate() {
            let section = SectionRef::SeatClass(index);
            Self::check_required_text(&class.class_name, section, Field::ClassName, &mut result);
            Self::check_pattern(class.pattern(), section, policy, &mut result);
            if let Some(range) =
                Self::check_rows(class.from_row(), class.to_row(), section, policy, &mut result)
            {
                candidates.push(range);
            }
        }

        Self::check_duplicate_names(seat_classes, spaces.len(), &mut result);

        for (index, space) in spaces.iter().enumerate() {
            let section = SectionRef::Space(index);
            Self::check_required_text(&space.label, section, Field::Label, &mut result);
            if let Some(range) = Self::check_space_rows(space, section, policy, &mut result) {
                candidates.push(range);
            }
        }

        let overlaps = find_overlaps(&candidates);
        for (section, error) in overlaps.conflicts {
            result.record(section, Field::Rows, error);
        }

        // A range rejected for any field of its own (name, pattern, rows) stays
        // out of the total.
        let budgeted: Vec<RowRange> = overlaps
            .passed
            .into_iter()
            .filter(|range| !result.has_errors_for(range.section))
            .collect();
        Self::check_row_budget(&budgeted, policy, &mut result);

        let result = result.finish();
        log::debug!(
            "Validated {} layout: {} seat classes, {} spaces, {} field errors, {} global errors",
            policy.entity,
            seat_classes.len(),
            spaces.len(),
            result.field_errors.len(),
            result.global_errors.len()
        );
        result
    }

    fn check_required_text(
        value: &str,
        section: SectionRef,
        field: Field,
        result: &mut ValidationResult,
    ) {
        if value.trim().is_empty() {
            result.record(section, field, LayoutError::MissingField { field });
        }
    }

    fn check_pattern(
        pattern: &str,
        section: SectionRef,
        policy: &LayoutPolicy,
        result: &mut ValidationResult,
    ) {
        if pattern.is_empty() {
            let field = Field::Pattern;
            result.record(section, field, LayoutError::MissingField { field });
            return;
        }

        match parse_pattern(pattern) {
            Ok(parsed) if parsed.seats_per_row() > policy.max_seats_per_row => {
                result.record(
                    section,
                    Field::Pattern,
                    LayoutError::SeatsPerRowExceeded {
                        seats: parsed.seats_per_row(),
                        max: policy.max_seats_per_row,
                    },
                );
            }
            Ok(_) => {}
            Err(err) => result.record(section, Field::Pattern, err),
        }
    }

    /// Shape and bound checks for one row range. Returns the range only when
    /// it is fit to take part in overlap and budget checks.
    fn check_rows(
        from_row: Option<i32>,
        to_row: Option<i32>,
        section: SectionRef,
        policy: &LayoutPolicy,
        result: &mut ValidationResult,
    ) -> Option<RowRange> {
        let from = Self::check_row_number(from_row, section, Field::FromRow, result);
        let to = Self::check_row_number(to_row, section, Field::ToRow, result);
        let (from, to) = (from?, to?);

        if from > to {
            result.record(
                section,
                Field::Rows,
                LayoutError::InvalidNumber {
                    field: Field::ToRow,
                    value: to,
                    rule: NumberRule::NotBeforeFromRow,
                },
            );
            return None;
        }

        if to as u32 > policy.max_row_number {
            result.record(
                section,
                Field::ToRow,
                LayoutError::RowBoundsExceeded {
                    row: to,
                    max: policy.max_row_number,
                },
            );
            return None;
        }

        Some(RowRange::new(from, to, section))
    }

    fn check_row_number(
        value: Option<i32>,
        section: SectionRef,
        field: Field,
        result: &mut ValidationResult,
    ) -> Option<i32> {
        match value {
            None => {
                result.record(section, field, LayoutError::MissingField { field });
                None
            }
            Some(v) if v < 1 => {
                result.record(
                    section,
                    field,
                    LayoutError::InvalidNumber {
                        field,
                        value: v,
                        rule: NumberRule::Positive,
                    },
                );
                None
            }
            Some(v) => Some(v),
        }
    }

    fn check_space_rows(
        space: &SpaceSpec,
        section: SectionRef,
        policy: &LayoutPolicy,
        result: &mut ValidationResult,
    ) -> Option<RowRange> {
        if let (Some(from_row), Some(to_row)) = (space.from_row(), space.to_row()) {
            if from_row != to_row {
                result.record(
                    section,
                    Field::ToRow,
                    LayoutError::SpaceRowMismatch {
                        from_row: Some(from_row),
                        to_row,
                    },
                );
                return None;
            }
        }

        Self::check_rows(space.from_row(), space.to_row(), section, policy, result)
    }

    /// Class names become layout keys, so they must be unique and must not
    /// collide with the generated `spaceN` keys.
    fn check_duplicate_names(
        seat_classes: &[SeatClassSpec],
        space_count: usize,
        result: &mut ValidationResult,
    ) {
        for (index, class) in seat_classes.iter().enumerate() {
            let name = class.class_name.as_str();
            if name.trim().is_empty() {
                continue;
            }

            let repeated = seat_classes[..index].iter().any(|c| c.class_name == name);
            let shadows_space = (1..=space_count).any(|n| space_key(n) == name);
            if repeated || shadows_space {
                result.record(
                    SectionRef::SeatClass(index),
                    Field::ClassName,
                    LayoutError::DuplicateSection {
                        name: name.to_string(),
                    },
                );
            }
        }
    }

    /// Only ranges that passed every check of their own (name, pattern, rows)
    /// count toward the total, so a single bad entry is never reported twice.
    fn check_row_budget(passed: &[RowRange], policy: &LayoutPolicy, result: &mut ValidationResult) {
        let mut total: u32 = 0;
        for range in passed {
            total = total.saturating_add(range.row_count());
        }

        if total > policy.max_total_rows {
            result.global_errors.push(LayoutError::RowCountExceeded {
                entity: policy.entity,
                total,
                max: policy.max_total_rows,
            });
        }
    }
}

pub fn validate_configuration(
    seat_classes: &[SeatClassSpec],
    spaces: &[SpaceSpec],
    policy: &LayoutPolicy,
) -> ValidationResult {
    LayoutValidator::validate(seat_classes, spaces, policy)
}

/// Validates independent drafts in parallel. Results keep input order.
pub fn validate_batch(configs: &[Configuration], policy: &LayoutPolicy) -> Vec<ValidationResult> {
    configs
        .par_iter()
        .map(|config| config.validate(policy))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::EntityKind;

    fn class(name: &str, from: i32, to: i32, pattern: &str) -> SeatClassSpec {
        SeatClassSpec::new(name, Some(from), Some(to), pattern)
    }

    #[test]
    fn test_field_key_display() {
        let key = FieldKey::new(SectionRef::SeatClass(0), Field::Rows);
        assert_eq!(key.to_string(), "seatClass-0-rows");
        let key = FieldKey::new(SectionRef::Space(2), Field::FromRow);
        assert_eq!(key.to_string(), "space-2-fromRow");
    }

    #[test]
    fn test_valid_narrow_body() {
        let classes = [class("business", 1, 3, "2-2"), class("economy", 5, 18, "3-3")];
        let spaces = [SpaceSpec::single_row("galley", 4)];

        let result = validate_configuration(&classes, &spaces, &LayoutPolicy::default());
        assert!(result.valid, "{:?}", result.messages());
        assert!(result.messages().is_empty());
    }

    #[test]
    fn test_empty_class_reports_every_missing_field() {
        let classes = [SeatClassSpec::empty()];
        let result = validate_configuration(&classes, &[], &LayoutPolicy::default());
        let section = SectionRef::SeatClass(0);

        assert!(!result.valid);
        for field in [Field::ClassName, Field::FromRow, Field::ToRow, Field::Pattern] {
            assert_eq!(
                result.error_for(section, field),
                Some(&LayoutError::MissingField { field }),
                "{} should be required",
                field
            );
        }
    }

    #[test]
    fn test_non_positive_and_inverted_rows() {
        let classes = [class("first", 0, 2, "1-1"), class("business", 6, 4, "2-2")];
        let result = validate_configuration(&classes, &[], &LayoutPolicy::default());

        assert!(matches!(
            result.error_for(SectionRef::SeatClass(0), Field::FromRow),
            Some(LayoutError::InvalidNumber {
                rule: NumberRule::Positive,
                ..
            })
        ));
        assert!(matches!(
            result.error_for(SectionRef::SeatClass(1), Field::Rows),
            Some(LayoutError::InvalidNumber {
                rule: NumberRule::NotBeforeFromRow,
                ..
            })
        ));
    }

    #[test]
    fn test_space_mismatch_is_flagged() {
        let spaces = [SpaceSpec::from_stored("galley", 3, 5)];
        let result = validate_configuration(&[], &spaces, &LayoutPolicy::default());
        assert_eq!(
            result.error_for(SectionRef::Space(0), Field::ToRow),
            Some(&LayoutError::SpaceRowMismatch {
                from_row: Some(3),
                to_row: 5
            })
        );
    }

    #[test]
    fn test_duplicate_and_reserved_names() {
        let classes = [
            class("economy", 1, 2, "3-3"),
            class("economy", 4, 5, "3-3"),
            class("space1", 7, 8, "3-3"),
        ];
        let spaces = [SpaceSpec::single_row("galley", 3)];
        let result = validate_configuration(&classes, &spaces, &LayoutPolicy::default());

        assert!(result
            .error_for(SectionRef::SeatClass(0), Field::ClassName)
            .is_none());
        assert!(matches!(
            result.error_for(SectionRef::SeatClass(1), Field::ClassName),
            Some(LayoutError::DuplicateSection { .. })
        ));
        assert!(matches!(
            result.error_for(SectionRef::SeatClass(2), Field::ClassName),
            Some(LayoutError::DuplicateSection { .. })
        ));
    }

    #[test]
    fn test_out_of_bounds_range_does_not_count_toward_budget() {
        // 18 good rows plus a 10-row class that runs past row 20.
        let classes = [class("economy", 1, 18, "3-3"), class("extra", 19, 28, "3-3")];
        let result = validate_configuration(&classes, &[], &LayoutPolicy::default());

        assert!(matches!(
            result.error_for(SectionRef::SeatClass(1), Field::ToRow),
            Some(LayoutError::RowBoundsExceeded { row: 28, max: 20 })
        ));
        assert!(result.global_errors.is_empty());
    }

    #[test]
    fn test_rejected_pattern_or_name_does_not_count_toward_budget() {
        let policy = LayoutPolicy::default().with_max_row_number(30);
        let classes = [
            class("economy", 1, 18, "3-3"),
            class("extra", 19, 20, "3-"),
            class("", 21, 22, "3-3"),
        ];
        let spaces = [SpaceSpec::single_row(" ", 23)];
        let result = validate_configuration(&classes, &spaces, &policy);

        assert!(result
            .error_for(SectionRef::SeatClass(1), Field::Pattern)
            .is_some());
        assert!(result
            .error_for(SectionRef::SeatClass(2), Field::ClassName)
            .is_some());
        assert!(result.error_for(SectionRef::Space(0), Field::Label).is_some());
        assert!(result.global_errors.is_empty(), "{:?}", result.global_errors);
    }

    #[test]
    fn test_budget_error_names_entity() {
        let policy = LayoutPolicy::for_entity(EntityKind::AircraftType)
            .with_max_total_rows(5)
            .with_max_row_number(40);
        let classes = [class("economy", 1, 6, "3-3")];
        let result = validate_configuration(&classes, &[], &policy);

        assert_eq!(
            result.global_errors,
            vec![LayoutError::RowCountExceeded {
                entity: EntityKind::AircraftType,
                total: 6,
                max: 5
            }]
        );
        assert_eq!(
            result.global_errors[0].to_string(),
            "aircraft type layout uses 6 rows, the limit is 5"
        );
    }

    #[test]
    fn test_batch_keeps_order() {
        let good = Configuration::new(vec![class("first", 1, 2, "1-1")], Vec::new());
        let bad = Configuration::new(vec![class("first", 1, 2, "1-")], Vec::new());
        let results = validate_batch(&[good, bad.clone(), bad], &LayoutPolicy::default());

        let flags: Vec<bool> = results.iter().map(|r| r.valid).collect();
        assert_eq!(flags, [true, false, false]);
    }

    #[test]
    fn test_result_serializes_string_keys() {
        let classes = [class("first", 1, 2, "9-9")];
        let result = validate_configuration(&classes, &[], &LayoutPolicy::default());
        let value = serde_json::to_value(&result).unwrap();

        assert_eq!(value["valid"], false);
        assert_eq!(
            value["fieldErrors"]["seatClass-0-pattern"]["kind"],
            "SeatsPerRowExceeded"
        );
    }
}
