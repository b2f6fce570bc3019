// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use crate::LayoutError;
use regex::Regex;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

fn pattern_re() -> &'static Regex {
    static PATTERN_RE: OnceLock<Regex> = OnceLock::new();
    PATTERN_RE.get_or_init(|| Regex::new(r"^\d+(-\d+)*$").expect("pattern regex is valid"))
}

/// Seat groups of one row, left to right across the aisles.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SeatPattern {
    groups: Vec<u32>,
}

impl SeatPattern {
    pub fn groups(&self) -> &[u32] {
        &self.groups
    }

    pub fn seats_per_row(&self) -> u32 {
        self.groups.iter().fold(0u32, |acc, g| acc.saturating_add(*g))
    }
}

impl FromStr for SeatPattern {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_pattern(s)
    }
}

impl fmt::Display for SeatPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.groups.iter().map(|g| g.to_string()).collect();
        write!(f, "{}", parts.join("-"))
    }
}

/// Parses `"3-4-3"` into `[3, 4, 3]`.
///
/// Every group must be a positive integer; `"3-0-3"` and `"3--3"` are rejected.
pub fn parse_pattern(pattern: &str) -> Result<SeatPattern, LayoutError> {
    let syntax_error = || LayoutError::PatternSyntax {
        pattern: pattern.to_string(),
    };

    if !pattern_re().is_match(pattern) {
        return Err(syntax_error());
    }

    let groups = pattern
        .split('-')
        .map(|part| match part.parse::<u32>() {
            Ok(n) if n > 0 => Ok(n),
            _ => Err(syntax_error()),
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(SeatPattern { groups })
}
