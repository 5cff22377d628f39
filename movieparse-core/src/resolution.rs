//! Catalog IDs and the outcome of resolving a name to one.
//!
//! In memory a resolution is a tagged value. The integer sentinel codes only
//! exist at the CSV boundary, where they keep `mapping.csv` readable by older
//! tooling.

use std::fmt;

/// Sentinel codes written to the `catalog_id` column.
pub mod codes {
    /// Never attempted.
    pub const DEFAULT: i64 = 0;
    /// Lookup ran, the service had no candidate.
    pub const NO_RESULT: i64 = -1;
    /// Name did not fit the selected naming pattern.
    pub const NO_EXTRACT: i64 = -2;
    /// Service answered with a payload missing `results` or `id`.
    pub const BAD_RESPONSE: i64 = -3;

    pub const ALL: [i64; 4] = [DEFAULT, NO_RESULT, NO_EXTRACT, BAD_RESPONSE];
}

/// A TMDB movie ID. Always positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CatalogId(u64);

impl CatalogId {
    /// Wrap a raw integer, rejecting zero and the negative sentinel range.
    pub fn new(raw: i64) -> Option<Self> {
        u64::try_from(raw).ok().filter(|&v| v > 0).map(Self)
    }

    pub fn get(self) -> u64 {
        self.0
    }

    /// The signed form used in CSV columns.
    pub fn as_i64(self) -> i64 {
        self.0 as i64
    }
}

impl fmt::Display for CatalogId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What is known about a mapping row's catalog ID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Resolution {
    /// No lookup has been attempted yet.
    #[default]
    Unresolved,
    /// The service returned this ID.
    Found(CatalogId),
    /// The service had no candidate for the name.
    NoMatch,
    /// The service violated its response contract (or could not be reached).
    MalformedResponse,
    /// The name did not match the naming pattern, so no lookup was made.
    NotExtracted,
}

impl Resolution {
    /// Integer code for persistence.
    pub fn code(self) -> i64 {
        match self {
            Resolution::Unresolved => codes::DEFAULT,
            Resolution::Found(id) => id.as_i64(),
            Resolution::NoMatch => codes::NO_RESULT,
            Resolution::NotExtracted => codes::NO_EXTRACT,
            Resolution::MalformedResponse => codes::BAD_RESPONSE,
        }
    }

    /// Decode a persisted code. Negative values outside the known sentinels
    /// are treated as unresolved so the row gets looked up again.
    pub fn from_code(code: i64) -> Self {
        match code {
            codes::NO_RESULT => Resolution::NoMatch,
            codes::NO_EXTRACT => Resolution::NotExtracted,
            codes::BAD_RESPONSE => Resolution::MalformedResponse,
            other => match CatalogId::new(other) {
                Some(id) => Resolution::Found(id),
                None => {
                    if other != codes::DEFAULT {
                        log::warn!("Unknown catalog id code {other}, treating as unresolved");
                    }
                    Resolution::Unresolved
                }
            },
        }
    }

    pub fn catalog_id(self) -> Option<CatalogId> {
        match self {
            Resolution::Found(id) => Some(id),
            _ => None,
        }
    }

    pub fn is_unresolved(self) -> bool {
        self == Resolution::Unresolved
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Resolution::Unresolved => write!(f, "unresolved"),
            Resolution::Found(id) => write!(f, "{id}"),
            Resolution::NoMatch => write!(f, "no result"),
            Resolution::MalformedResponse => write!(f, "bad response"),
            Resolution::NotExtracted => write!(f, "no extract"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentinel_codes_decode_to_their_variants() {
        assert_eq!(Resolution::from_code(0), Resolution::Unresolved);
        assert_eq!(Resolution::from_code(-1), Resolution::NoMatch);
        assert_eq!(Resolution::from_code(-2), Resolution::NotExtracted);
        assert_eq!(Resolution::from_code(-3), Resolution::MalformedResponse);
    }

    #[test]
    fn positive_codes_are_catalog_ids() {
        let r = Resolution::from_code(603);
        assert_eq!(r.catalog_id().map(CatalogId::get), Some(603));
        assert_eq!(r.code(), 603);
    }

    #[test]
    fn unknown_negative_code_is_unresolved() {
        assert_eq!(Resolution::from_code(-9), Resolution::Unresolved);
    }

    #[test]
    fn catalog_id_rejects_sentinels() {
        for code in codes::ALL {
            assert!(CatalogId::new(code).is_none());
        }
    }

    #[test]
    fn every_variant_encodes_back_to_its_code() {
        for code in [0, -1, -2, -3, 27205] {
            assert_eq!(Resolution::from_code(code).code(), code);
        }
    }
}
