// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz
//
// Regression tests for layout validation (validator.rs).
// Covers: range overlaps, per-row capacity, the aggregate row budget,
// space rows, and reporting every problem in a single pass.

use seatmap_core::{
    validate_configuration, Configuration, EntityKind, Field, LayoutError, LayoutPolicy, RowSpan,
    SeatClassSpec, SectionRef, SpaceSpec,
};

fn class(name: &str, from: i32, to: i32, pattern: &str) -> SeatClassSpec {
    SeatClassSpec::new(name, Some(from), Some(to), pattern)
}

// =====================================================================
// Overlaps
// =====================================================================

#[test]
fn test_first_and_business_share_row_two() {
    let classes = [class("first", 1, 2, "1-1"), class("business", 2, 3, "2-2")];
    let result = validate_configuration(&classes, &[], &LayoutPolicy::default());

    assert!(!result.valid);
    let err = result
        .error_for(SectionRef::SeatClass(0), Field::Rows)
        .expect("first should conflict with business");
    assert_eq!(
        err,
        &LayoutError::RangeOverlap {
            other: SectionRef::SeatClass(1),
            rows: RowSpan::new(2, 2),
        }
    );
    assert!(err.to_string().contains("rows 2 "));
    assert!(result
        .error_for(SectionRef::SeatClass(1), Field::Rows)
        .is_some());
}

#[test]
fn test_space_inside_cabin_is_an_overlap() {
    let classes = [class("economy", 5, 15, "3-3")];
    let spaces = [SpaceSpec::single_row("galley", 9)];
    let result = validate_configuration(&classes, &spaces, &LayoutPolicy::default());

    assert_eq!(
        result.error_for(SectionRef::Space(0), Field::Rows),
        Some(&LayoutError::RangeOverlap {
            other: SectionRef::SeatClass(0),
            rows: RowSpan::new(9, 9),
        })
    );
}

#[test]
fn test_adjacent_sections_are_fine() {
    let classes = [class("first", 1, 2, "1-1"), class("business", 4, 6, "2-2")];
    let spaces = [SpaceSpec::single_row("galley", 3)];
    let result = validate_configuration(&classes, &spaces, &LayoutPolicy::default());
    assert!(result.valid, "{:?}", result.messages());
}

#[test]
fn test_two_spaces_on_one_row() {
    let spaces = [
        SpaceSpec::single_row("galley", 4),
        SpaceSpec::single_row("toilet", 4),
    ];
    let result = validate_configuration(&[], &spaces, &LayoutPolicy::default());
    assert!(result.error_for(SectionRef::Space(0), Field::Rows).is_some());
    assert!(result.error_for(SectionRef::Space(1), Field::Rows).is_some());
}

// =====================================================================
// Capacity
// =====================================================================

#[test]
fn test_thirteen_abreast_exceeds_twelve() {
    let classes = [class("economy", 1, 3, "4-5-4")];
    let result = validate_configuration(&classes, &[], &LayoutPolicy::default());

    assert_eq!(
        result.error_for(SectionRef::SeatClass(0), Field::Pattern),
        Some(&LayoutError::SeatsPerRowExceeded { seats: 13, max: 12 })
    );
}

#[test]
fn test_seats_per_row_reported_even_with_broken_rows() {
    let classes = [SeatClassSpec::new("economy", None, Some(60), "4-5-4")];
    let result = validate_configuration(&classes, &[], &LayoutPolicy::default());

    assert!(matches!(
        result.error_for(SectionRef::SeatClass(0), Field::Pattern),
        Some(LayoutError::SeatsPerRowExceeded { .. })
    ));
    assert!(matches!(
        result.error_for(SectionRef::SeatClass(0), Field::FromRow),
        Some(LayoutError::MissingField { .. })
    ));
}

#[test]
fn test_injected_limit_is_honoured() {
    let classes = [class("economy", 1, 3, "3-4-3")];
    let narrow = LayoutPolicy::for_entity(EntityKind::Aircraft).with_max_seats_per_row(6);
    assert!(!validate_configuration(&classes, &[], &narrow).valid);
    assert!(validate_configuration(&classes, &[], &LayoutPolicy::default()).valid);
}

// =====================================================================
// Row budget
// =====================================================================

#[test]
fn test_ten_three_row_classes_exceed_budget_once() {
    let classes: Vec<SeatClassSpec> = (0..10)
        .map(|i| class(&format!("zone{}", i), i * 3 + 1, i * 3 + 3, "3-3"))
        .collect();
    let policy = LayoutPolicy::default().with_max_row_number(40);
    let result = validate_configuration(&classes, &[], &policy);

    assert!(result.field_errors.is_empty(), "{:?}", result.messages());
    assert_eq!(
        result.global_errors,
        vec![LayoutError::RowCountExceeded {
            entity: EntityKind::Aircraft,
            total: 30,
            max: 20
        }]
    );
}

#[test]
fn test_spaces_count_one_row_each() {
    let classes = [class("economy", 1, 19, "3-3")];
    let spaces = [
        SpaceSpec::single_row("galley", 20),
        SpaceSpec::single_row("toilet", 21),
    ];
    let policy = LayoutPolicy::default().with_max_row_number(30);
    let result = validate_configuration(&classes, &spaces, &policy);

    assert_eq!(
        result.global_errors,
        vec![LayoutError::RowCountExceeded {
            entity: EntityKind::Aircraft,
            total: 21,
            max: 20
        }]
    );
}

#[test]
fn test_overlapping_ranges_do_not_inflate_budget() {
    // 15 + 15 rows would break the budget, but they overlap and are already
    // reported on their own fields.
    let classes = [class("a", 1, 15, "3-3"), class("b", 5, 19, "3-3")];
    let result = validate_configuration(&classes, &[], &LayoutPolicy::default());

    assert_eq!(result.field_errors.len(), 2);
    assert!(result.global_errors.is_empty());
}

#[test]
fn test_rejected_patterns_do_not_inflate_budget() {
    // 18 + 2 + 2 rows would break the budget, but the last two classes are
    // already rejected for their patterns.
    let classes = [
        class("economy", 1, 18, "3-3"),
        class("extra", 19, 20, "3-"),
        class("more", 21, 22, "4-5-4"),
    ];
    let policy = LayoutPolicy::default().with_max_row_number(30);
    let result = validate_configuration(&classes, &[], &policy);

    assert_eq!(
        result.error_for(SectionRef::SeatClass(1), Field::Pattern),
        Some(&LayoutError::PatternSyntax {
            pattern: "3-".to_string()
        })
    );
    assert_eq!(
        result.error_for(SectionRef::SeatClass(2), Field::Pattern),
        Some(&LayoutError::SeatsPerRowExceeded { seats: 13, max: 12 })
    );
    assert!(result.global_errors.is_empty(), "{:?}", result.global_errors);
}

#[test]
fn test_duplicate_name_does_not_inflate_budget() {
    let classes = [
        class("economy", 1, 18, "3-3"),
        class("economy", 19, 22, "3-3"),
    ];
    let policy = LayoutPolicy::default().with_max_row_number(30);
    let result = validate_configuration(&classes, &[], &policy);

    assert!(matches!(
        result.error_for(SectionRef::SeatClass(1), Field::ClassName),
        Some(LayoutError::DuplicateSection { .. })
    ));
    assert!(result.global_errors.is_empty());
}

#[test]
fn test_row_beyond_limit() {
    let spaces = [SpaceSpec::single_row("galley", 21)];
    let result = validate_configuration(&[], &spaces, &LayoutPolicy::default());
    assert_eq!(
        result.error_for(SectionRef::Space(0), Field::ToRow),
        Some(&LayoutError::RowBoundsExceeded { row: 21, max: 20 })
    );
}

// =====================================================================
// Spaces and required fields
// =====================================================================

#[test]
fn test_single_row_space_is_valid() {
    let space = SpaceSpec::new("galley", Some(3), Some(3)).unwrap();
    let result = validate_configuration(&[], &[space], &LayoutPolicy::default());
    assert!(result.valid);
}

#[test]
fn test_multi_row_space_is_rejected() {
    assert_eq!(
        SpaceSpec::new("galley", Some(3), Some(5)),
        Err(LayoutError::SpaceRowMismatch {
            from_row: Some(3),
            to_row: 5
        })
    );
}

#[test]
fn test_blank_label_and_name() {
    let classes = [class("   ", 1, 2, "2-2")];
    let spaces = [SpaceSpec::single_row("", 3)];
    let result = validate_configuration(&classes, &spaces, &LayoutPolicy::default());

    assert_eq!(
        result.error_for(SectionRef::SeatClass(0), Field::ClassName),
        Some(&LayoutError::MissingField {
            field: Field::ClassName
        })
    );
    assert_eq!(
        result.error_for(SectionRef::Space(0), Field::Label),
        Some(&LayoutError::MissingField {
            field: Field::Label
        })
    );
}

#[test]
fn test_one_pass_reports_everything() {
    let classes = [
        class("first", 1, 2, "1-1"),
        class("business", 2, 3, "2-2"),
        class("economy", 4, 25, "4-5-4"),
        SeatClassSpec::new("", Some(-1), None, "3-x"),
    ];
    let result = validate_configuration(&classes, &[], &LayoutPolicy::default());

    let keys: Vec<String> = result.field_errors.keys().map(|k| k.to_string()).collect();
    for expected in [
        "seatClass-0-rows",
        "seatClass-1-rows",
        "seatClass-2-pattern",
        "seatClass-2-toRow",
        "seatClass-3-className",
        "seatClass-3-pattern",
        "seatClass-3-fromRow",
        "seatClass-3-toRow",
    ] {
        assert!(keys.iter().any(|k| k == expected), "missing {}", expected);
    }
}

#[test]
fn test_configuration_into_layout_requires_valid_draft() {
    let bad = Configuration::new(vec![class("first", 1, 2, "1-")], Vec::new());
    let err = bad.into_layout(&LayoutPolicy::default()).unwrap_err();
    assert!(!err.valid);
    assert_eq!(err.messages().len(), 1);

    let good = Configuration::new(
        vec![class("first", 1, 2, "1-1")],
        vec![SpaceSpec::single_row("galley", 3)],
    );
    let layout = good.into_layout(&LayoutPolicy::default()).unwrap();
    assert_eq!(layout.total_seats(), 4);
}
