use std::num::NonZeroU64;
use std::ops::Range;

use serde_json::{Map, Value};
use thiserror::Error;
use tracing::debug;

pub use docsearch_api::response::PaginationMetadata;
pub use docsearch_query::{PaginationParams, ParamError};

const RESULTS_KEY: &str = "results";
const PAGINATION_KEY: &str = "pagination";
const TOTAL_RESULTS_KEY: &str = "total_results";

#[derive(Debug, Error)]
pub enum NormalizeError {
    #[error("malformed upstream JSON: {0}")]
    MalformedJson(#[source] serde_json::Error),
    #[error(transparent)]
    InvalidPagination(#[from] ParamError),
    #[error("failed to encode normalized response: {0}")]
    Encode(#[source] serde_json::Error),
}

/// The upstream payload shapes the normalizer understands.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseShape {
    /// A bare array of records.
    List(Vec<Value>),
    /// An object that already carries its own `pagination` block.
    Paginated(Value),
    /// An object with a `results` array. `rest` keeps every top-level field
    /// (including `results` itself, so key order survives re-assembly).
    Wrapped {
        results: Vec<Value>,
        total_results: Option<u64>,
        rest: Map<String, Value>,
    },
    /// Anything else; passed through untouched.
    Unrecognized(Value),
}

/// Classify a parsed upstream value. First matching rule wins:
/// array, pre-paginated object, object with a `results` array, anything else.
pub fn detect_shape(value: Value) -> ResponseShape {
    let mut obj = match value {
        Value::Array(items) => return ResponseShape::List(items),
        Value::Object(obj) => obj,
        other => return ResponseShape::Unrecognized(other),
    };
    if obj.get(PAGINATION_KEY).is_some_and(|p| !p.is_null()) {
        return ResponseShape::Paginated(Value::Object(obj));
    }
    let results = match obj.get_mut(RESULTS_KEY) {
        Some(Value::Array(items)) => std::mem::take(items),
        _ => return ResponseShape::Unrecognized(Value::Object(obj)),
    };
    let total_results = obj.get(TOTAL_RESULTS_KEY).and_then(Value::as_u64);
    ResponseShape::Wrapped { results, total_results, rest: obj }
}

/// Index range of one page inside a list of `len` records, clamped to the
/// list. Pages past the end give an empty range.
pub fn page_bounds(page: NonZeroU64, per_page: NonZeroU64, len: usize) -> Range<usize> {
    let start = (page.get() - 1).saturating_mul(per_page.get());
    let end = page.get().saturating_mul(per_page.get());
    let clamp = |n: u64| usize::try_from(n).map_or(len, |n| n.min(len));
    clamp(start)..clamp(end)
}

/// Normalize an already-parsed upstream value into the paginated shape.
pub fn paginate_value(value: Value, params: PaginationParams) -> Value {
    let (mut items, total_results, rest) = match detect_shape(value) {
        ResponseShape::List(items) => (items, None, Map::new()),
        ResponseShape::Wrapped { results, total_results, rest } => (results, total_results, rest),
        ResponseShape::Paginated(value) => {
            debug!(target: "docsearchd", "[paginate] upstream already paginated; passing through");
            return value;
        }
        ResponseShape::Unrecognized(value) => {
            debug!(target: "docsearchd", "[paginate] unrecognized response shape; passing through");
            return value;
        }
    };

    let total_results = total_results.unwrap_or(items.len() as u64);
    let pagination = PaginationMetadata::compute(params.page, params.per_page, total_results);
    let range = page_bounds(params.page, params.per_page, items.len());
    items.truncate(range.end);
    let slice: Vec<Value> = items.drain(range.start..).collect();
    debug!(
        target: "docsearchd",
        "[paginate] page={} per_page={} total_results={} total_pages={} returned={}",
        pagination.page,
        pagination.per_page,
        pagination.total_results,
        pagination.total_pages,
        slice.len()
    );

    let mut out = rest;
    out.insert(RESULTS_KEY.to_string(), Value::Array(slice));
    out.insert(PAGINATION_KEY.to_string(), pagination_value(&pagination));
    Value::Object(out)
}

/// Parse raw upstream text, normalize it and re-encode it.
pub fn normalize(raw: &str, params: PaginationParams) -> Result<String, NormalizeError> {
    let value: Value = serde_json::from_str(raw).map_err(NormalizeError::MalformedJson)?;
    let normalized = paginate_value(value, params);
    serde_json::to_string(&normalized).map_err(NormalizeError::Encode)
}

/// Same as [`normalize`] for callers holding untyped page values; zero is an
/// error here rather than a silent default.
pub fn normalize_with(raw: &str, page: u64, per_page: u64) -> Result<String, NormalizeError> {
    let params = PaginationParams::new(page, per_page)?;
    normalize(raw, params)
}

fn pagination_value(m: &PaginationMetadata) -> Value {
    serde_json::json!({
        "page": m.page,
        "per_page": m.per_page,
        "total_results": m.total_results,
        "total_pages": m.total_pages,
        "has_next_page": m.has_next_page,
        "has_previous_page": m.has_previous_page,
    })
}
