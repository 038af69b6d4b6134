use std::fmt;
use std::num::NonZeroU64;

#[cfg(feature = "serde")]
use serde::Deserialize;

pub const DEFAULT_PAGE: u64 = 1;
pub const DEFAULT_PER_PAGE: u64 = 10;

/// A page or page-size value as it arrives from a caller: a string
/// (`"2"`) or a JSON number (`2`, `2.0`).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum LooseInt {
    Int(i64),
    Float(f64),
    Text(String),
}

impl LooseInt {
    /// Interpret the value as a positive integer.
    /// - Strings are trimmed and must be plain base-10 integers.
    /// - Floats are accepted only when they carry no fractional part.
    /// - Zero, negatives and anything unparseable yield `None`.
    pub fn to_positive(&self) -> Option<NonZeroU64> {
        let n = match self {
            LooseInt::Int(i) => u64::try_from(*i).ok()?,
            LooseInt::Float(f) => {
                if !f.is_finite() || f.fract() != 0.0 || *f < 1.0 || *f > u64::MAX as f64 {
                    return None;
                }
                *f as u64
            }
            LooseInt::Text(s) => s.trim().parse::<u64>().ok()?,
        };
        NonZeroU64::new(n)
    }
}

impl From<&str> for LooseInt {
    fn from(s: &str) -> Self {
        LooseInt::Text(s.to_string())
    }
}

impl From<String> for LooseInt {
    fn from(s: String) -> Self {
        LooseInt::Text(s)
    }
}

impl From<i64> for LooseInt {
    fn from(n: i64) -> Self {
        LooseInt::Int(n)
    }
}

impl From<u32> for LooseInt {
    fn from(n: u32) -> Self {
        LooseInt::Int(n as i64)
    }
}

impl From<f64> for LooseInt {
    fn from(n: f64) -> Self {
        LooseInt::Float(n)
    }
}

/// Optional paging options of a search call.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SearchOptions {
    pub page: Option<LooseInt>,
    pub per_page: Option<LooseInt>,
}

impl SearchOptions {
    pub fn new(page: impl Into<LooseInt>, per_page: impl Into<LooseInt>) -> Self {
        Self { page: Some(page.into()), per_page: Some(per_page.into()) }
    }

    pub fn params(&self) -> PaginationParams {
        PaginationParams::resolve(self.page.as_ref(), self.per_page.as_ref())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamError {
    InvalidPagination { field: &'static str, value: u64 },
}

impl fmt::Display for ParamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamError::InvalidPagination { field, value } => {
                write!(f, "invalid pagination: {field} must be a positive integer, got {value}")
            }
        }
    }
}

impl std::error::Error for ParamError {}

/// Strict pagination parameters. Both values are at least 1, so page
/// arithmetic can never divide by zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationParams {
    pub page: NonZeroU64,
    pub per_page: NonZeroU64,
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self {
            page: NonZeroU64::MIN,
            per_page: NonZeroU64::new(DEFAULT_PER_PAGE).unwrap_or(NonZeroU64::MIN),
        }
    }
}

impl PaginationParams {
    /// Build from already-typed values; zero is rejected, never clamped.
    pub fn new(page: u64, per_page: u64) -> Result<Self, ParamError> {
        let page = NonZeroU64::new(page)
            .ok_or(ParamError::InvalidPagination { field: "page", value: page })?;
        let per_page = NonZeroU64::new(per_page)
            .ok_or(ParamError::InvalidPagination { field: "per_page", value: per_page })?;
        Ok(Self { page, per_page })
    }

    /// Resolve loosely-typed caller input. Absent or non-positive values
    /// fall back to `page=1`, `per_page=10`. No upper bound on `per_page`.
    pub fn resolve(page: Option<&LooseInt>, per_page: Option<&LooseInt>) -> Self {
        let defaults = Self::default();
        Self {
            page: page.and_then(LooseInt::to_positive).unwrap_or(defaults.page),
            per_page: per_page.and_then(LooseInt::to_positive).unwrap_or(defaults.per_page),
        }
    }

    pub fn page(&self) -> u64 {
        self.page.get()
    }

    pub fn per_page(&self) -> u64 {
        self.per_page.get()
    }
}
