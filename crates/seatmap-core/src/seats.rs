// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use crate::pattern::{parse_pattern, SeatPattern};
use serde::{Deserialize, Serialize};

/// Upper bound on seats produced by one generation call. Anything larger is a
/// typo in the pattern and would only stall the editing surface.
const SEAT_GENERATION_LIMIT: u64 = 100_000;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Seat {
    pub seat_code: String,
}

impl Seat {
    pub fn new(row: i32, letters: &str) -> Self {
        Self {
            seat_code: format!("{}{}", row, letters),
        }
    }

    /// Splits `"12C"` into `(12, "C")`.
    pub fn row_and_letters(&self) -> Option<(i32, &str)> {
        let split = self
            .seat_code
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(self.seat_code.len());
        let (row, letters) = self.seat_code.split_at(split);
        let row = row.parse().ok()?;
        Some((row, letters))
    }

    pub fn row(&self) -> Option<i32> {
        self.row_and_letters().map(|(row, _)| row)
    }
}

/// Letter run for a zero-based position within a row: 0 → `A`, 25 → `Z`, 26 → `AA`.
pub fn seat_letters(position: u32) -> String {
    let mut n = position as u64 + 1;
    let mut letters = Vec::new();
    while n > 0 {
        let rem = ((n - 1) % 26) as u8;
        letters.push((b'A' + rem) as char);
        n = (n - 1) / 26;
    }
    letters.iter().rev().collect()
}

/// Seats for every row in `from_row..=to_row`.
///
/// The letter cursor runs across all groups of a row, so `3-4-3` gives
/// `ABC | DEFG | HIJ`.
pub fn generate_rows(from_row: i32, to_row: i32, pattern: &SeatPattern) -> Vec<Seat> {
    if from_row > to_row {
        return Vec::new();
    }

    let per_row = pattern.seats_per_row();
    let rows = (to_row as i64 - from_row as i64 + 1) as u64;
    let total = rows * per_row as u64;
    if total > SEAT_GENERATION_LIMIT {
        log::warn!(
            "Refusing to generate {} seats for rows {}-{} pattern {}",
            total,
            from_row,
            to_row,
            pattern
        );
        return Vec::new();
    }

    let letters: Vec<String> = (0..per_row).map(seat_letters).collect();
    let mut seats = Vec::with_capacity(total as usize);
    for row in from_row..=to_row {
        let mut cursor = 0usize;
        for group in pattern.groups() {
            for letter in &letters[cursor..cursor + *group as usize] {
                seats.push(Seat::new(row, letter));
            }
            cursor += *group as usize;
        }
    }
    seats
}

/// Seat list for a draft seat class.
///
/// Missing rows, an empty or malformed pattern, or an inverted range mean the
/// class is not configured yet and yield an empty list rather than an error.
pub fn generate_seats(from_row: Option<i32>, to_row: Option<i32>, pattern: &str) -> Vec<Seat> {
    let (Some(from_row), Some(to_row)) = (from_row, to_row) else {
        return Vec::new();
    };
    if from_row < 1 || pattern.is_empty() {
        return Vec::new();
    }
    match parse_pattern(pattern) {
        Ok(pattern) => generate_rows(from_row, to_row, &pattern),
        Err(_) => Vec::new(),
    }
}
