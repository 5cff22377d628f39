//! Parser for movie folder / list naming conventions.
//!
//! Every convention pairs a four digit release year with a title:
//! ```text
//! 1999 The Matrix        (year, space, title)
//! 1999 - The Matrix      (year, " - ", title)
//! The Matrix 1999        (title, space, year)
//! ```
//! When the convention is not given, [`detect_pattern`] picks the one that
//! fits a batch of names best.

use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;

/// A naming convention that maps a raw name to (year, title).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NamingPattern {
    /// `1999 The Matrix`
    YearSpaceTitle,
    /// `1999 - The Matrix`
    YearDashTitle,
    /// `The Matrix 1999`
    TitleSpaceYear,
}

/// Year and title extracted from a name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedName {
    pub year: i32,
    pub title: String,
}

impl NamingPattern {
    /// All patterns in enumeration order. Detection ties go to the earlier one.
    pub const ALL: [NamingPattern; 3] = [
        NamingPattern::YearSpaceTitle,
        NamingPattern::YearDashTitle,
        NamingPattern::TitleSpaceYear,
    ];

    /// Index used on the command line (`--parsing-style`).
    pub fn index(self) -> usize {
        match self {
            NamingPattern::YearSpaceTitle => 0,
            NamingPattern::YearDashTitle => 1,
            NamingPattern::TitleSpaceYear => 2,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// A sample name following this convention.
    pub fn example(self) -> &'static str {
        match self {
            NamingPattern::YearSpaceTitle => "1999 The Matrix",
            NamingPattern::YearDashTitle => "1999 - The Matrix",
            NamingPattern::TitleSpaceYear => "The Matrix 1999",
        }
    }

    /// Extract (year, title) from `name`, or `None` if it doesn't fit.
    pub fn parse(self, name: &str) -> Option<ParsedName> {
        match self {
            NamingPattern::YearSpaceTitle => {
                let (year, rest) = split_leading_year(name)?;
                let title = strip_one_whitespace(rest)?;
                // "1999 - Title" belongs to the dash convention; accepting it here
                // would tie dash batches with this pattern, and ties go to the first
                if title.starts_with('-') && strip_one_whitespace(&title[1..]).is_some() {
                    return None;
                }
                non_empty(year, title)
            }
            NamingPattern::YearDashTitle => {
                let (year, rest) = split_leading_year(name)?;
                let rest = strip_one_whitespace(rest)?;
                let rest = rest.strip_prefix('-')?;
                let title = strip_one_whitespace(rest)?;
                non_empty(year, title)
            }
            NamingPattern::TitleSpaceYear => {
                let (rest, year) = split_trailing_year(name)?;
                let mut chars = rest.chars();
                let last = chars.next_back()?;
                if !last.is_whitespace() {
                    return None;
                }
                non_empty(year, chars.as_str())
            }
        }
    }

    /// Number of fields (year, title) this pattern extracts from `name`.
    pub fn field_matches(self, name: &str) -> usize {
        if self.parse(name).is_some() { 2 } else { 0 }
    }
}

impl fmt::Display for NamingPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (\"{}\")", self.index(), self.example())
    }
}

impl FromStr for NamingPattern {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<usize>()
            .ok()
            .and_then(NamingPattern::from_index)
            .ok_or_else(|| ConfigError::invalid_pattern(s))
    }
}

/// Parse a single name under `pattern`.
pub fn parse_name(name: &str, pattern: NamingPattern) -> Option<ParsedName> {
    pattern.parse(name)
}

/// Outcome of [`detect_pattern`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Detection {
    pub pattern: NamingPattern,
    /// Total field matches for the winning pattern.
    pub matches: usize,
    /// Highest possible field matches (two per name).
    pub possible: usize,
}

impl Detection {
    /// Share of fields extracted, in percent.
    pub fn accuracy(&self) -> f64 {
        if self.possible == 0 {
            return 0.0;
        }
        self.matches as f64 / self.possible as f64 * 100.0
    }
}

/// Pick the pattern with the most field matches across `names`.
///
/// Only a strictly greater score replaces the current best, so ties keep the
/// first pattern in [`NamingPattern::ALL`]. Fails when no pattern matches any
/// name.
pub fn detect_pattern<'a, I>(names: I) -> Result<Detection, ConfigError>
where
    I: IntoIterator<Item = &'a str>,
{
    let names: Vec<&str> = names.into_iter().collect();
    let mut best: Option<(NamingPattern, usize)> = None;

    for pattern in NamingPattern::ALL {
        let matches: usize = names.iter().map(|n| pattern.field_matches(n)).sum();
        log::debug!("Naming pattern {pattern}: {matches} field matches");
        if matches > best.map_or(0, |(_, m)| m) {
            best = Some((pattern, matches));
        }
    }

    match best {
        Some((pattern, matches)) => Ok(Detection {
            pattern,
            matches,
            possible: names.len() * 2,
        }),
        None => Err(ConfigError::UndetectablePattern(names.len())),
    }
}

// ── Internal parsing ────────────────────────────────────────────────────────

/// Split `1999<rest>` into the year and the remainder.
fn split_leading_year(name: &str) -> Option<(i32, &str)> {
    let digits = name.get(..4)?;
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some((digits.parse().ok()?, &name[4..]))
}

/// Split `<rest>1999` into the remainder and the year.
fn split_trailing_year(name: &str) -> Option<(&str, i32)> {
    let at = name.len().checked_sub(4)?;
    let digits = name.get(at..)?;
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some((&name[..at], digits.parse().ok()?))
}

/// Consume exactly one leading whitespace character.
fn strip_one_whitespace(s: &str) -> Option<&str> {
    let mut chars = s.chars();
    chars.next().filter(|c| c.is_whitespace())?;
    Some(chars.as_str())
}

fn non_empty(year: i32, title: &str) -> Option<ParsedName> {
    if title.is_empty() {
        return None;
    }
    Some(ParsedName {
        year,
        title: title.to_string(),
    })
}
