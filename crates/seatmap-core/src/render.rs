// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use crate::layout::{Layout, LayoutEntry};
use crate::pattern::parse_pattern;
use std::collections::{BTreeMap, HashMap};

/// Plain-text seat map, one line per row in row order. Entries whose row span
/// is inverted or absurdly long are left out.
///
/// ```text
///   1 | AB  CD      first
///   3 | [ galley ]
/// ```
pub fn render_seat_map(layout: &Layout) -> String {
    let mut rows: BTreeMap<i32, Vec<String>> = BTreeMap::new();

    for (key, entry) in layout.iter() {
        if !entry.has_walkable_rows() {
            let (from, to) = entry.rows();
            log::warn!("Not drawing '{}': unusable row span {}-{}", key, from, to);
            continue;
        }

        match entry {
            LayoutEntry::Space(space) => {
                for row in space.from_row..=space.to_row {
                    rows.entry(row)
                        .or_default()
                        .push(format!("[ {} ]", space.label));
                }
            }
            LayoutEntry::SeatClass(class) => {
                let groups = parse_pattern(&class.pattern)
                    .map(|p| p.groups().to_vec())
                    .unwrap_or_default();

                let mut by_row: HashMap<i32, Vec<&str>> = HashMap::new();
                for (row, letters) in class.seats.iter().filter_map(|s| s.row_and_letters()) {
                    by_row.entry(row).or_default().push(letters);
                }

                for row in class.from_row..=class.to_row {
                    let letters = by_row.get(&row).map(Vec::as_slice).unwrap_or_default();
                    let cabin = group_letters(letters, &groups);
                    rows.entry(row)
                        .or_default()
                        .push(format!("{:<16}{}", cabin, key));
                }
            }
        }
    }

    let mut out = String::new();
    for (row, cells) in rows {
        for cell in cells {
            out.push_str(&format!("{:>3} | {}\n", row, cell));
        }
    }
    out
}

/// Joins letters with a double-space aisle between pattern groups. Letters
/// beyond the pattern (a hand-edited layout) are appended as their own group.
fn group_letters(letters: &[&str], groups: &[u32]) -> String {
    let mut parts = Vec::new();
    let mut rest = letters;
    for group in groups {
        let take = (*group as usize).min(rest.len());
        if take == 0 {
            break;
        }
        parts.push(rest[..take].concat());
        rest = &rest[take..];
    }
    if !rest.is_empty() {
        parts.push(rest.concat());
    }
    parts.join("  ")
}
