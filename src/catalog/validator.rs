//! Product payload normalization.
//!
//! Out-of-range values are clamped rather than rejected: strings are trimmed
//! and truncated, lists are cut to their element cap, unsafe URLs are cleared.
//! Only a missing `name`, `category` or `description` rejects the payload.

use serde_json::{Map, Value};

use crate::catalog::product::ProductDraft;

/// Per-field limits, in characters (or elements for the list counts).
pub mod limits {
    pub const NAME: usize = 200;
    pub const CATEGORY: usize = 100;
    pub const DESCRIPTION: usize = 5_000;
    pub const DETAILED_DESCRIPTION: usize = 10_000;
    pub const CODE: usize = 50;
    /// Large enough for inline `data:image/` payloads.
    pub const IMAGE: usize = 8_000;
    pub const DOWNLOAD_URL: usize = 2_048;
    pub const PRICE_DIGITS: usize = 15;
    pub const SPEC_ITEM: usize = 500;
    pub const FEATURE_ITEM: usize = 500;
    pub const SPECS_COUNT: usize = 20;
    pub const FEATURES_COUNT: usize = 30;
}

const WEB_SCHEMES: &[&str] = &["https://", "http://"];
const IMAGE_SCHEMES: &[&str] = &["https://", "http://", "data:image/"];

/// Normalize an untrusted JSON payload into a draft.
///
/// Returns `None` when the payload is not an object or a required field is
/// missing or blank. An integer `id` is carried through; callers decide
/// whether to honor it.
pub fn validate_product(raw: &Value) -> Option<ProductDraft> {
    let data = raw.as_object()?;

    let name = required(data, "name", limits::NAME)?;
    let category = required(data, "category", limits::CATEGORY)?;
    let description = required(data, "description", limits::DESCRIPTION)?;

    Some(ProductDraft {
        id: data.get("id").and_then(Value::as_i64),
        name,
        category,
        description,
        detailed_description: optional(data, "detailedDescription", limits::DETAILED_DESCRIPTION),
        code: optional(data, "code", limits::CODE),
        image: url_field(data, "image", IMAGE_SCHEMES, limits::IMAGE),
        specs: string_list(data, "specs", limits::SPECS_COUNT, limits::SPEC_ITEM),
        features: string_list(data, "features", limits::FEATURES_COUNT, limits::FEATURE_ITEM),
        price: normalize_price(data.get("price")),
        download_url: url_field(data, "downloadUrl", WEB_SCHEMES, limits::DOWNLOAD_URL),
    })
}

/// Reduce a price to at most 15 digit characters, defaulting to `"0"`.
pub fn normalize_price(raw: Option<&Value>) -> String {
    let Some(text) = raw.and_then(coerce_text) else {
        return "0".to_string();
    };
    let digits: String = text
        .chars()
        .filter(char::is_ascii_digit)
        .take(limits::PRICE_DIGITS)
        .collect();
    if digits.is_empty() {
        "0".to_string()
    } else {
        digits
    }
}

fn required(data: &Map<String, Value>, key: &str, max: usize) -> Option<String> {
    let value = optional(data, key, max);
    (!value.is_empty()).then_some(value)
}

fn optional(data: &Map<String, Value>, key: &str, max: usize) -> String {
    data.get(key)
        .and_then(coerce_text)
        .map(|s| truncate(&s, max))
        .unwrap_or_default()
}

/// Keep a URL only when its trimmed, lowercased form starts with an allowed scheme.
fn url_field(data: &Map<String, Value>, key: &str, schemes: &[&str], max: usize) -> String {
    let Some(raw) = data.get(key).and_then(Value::as_str) else {
        return String::new();
    };
    let lowered = raw.trim().to_lowercase();
    if schemes.iter().any(|scheme| lowered.starts_with(scheme)) {
        truncate(raw, max)
    } else {
        String::new()
    }
}

fn string_list(data: &Map<String, Value>, key: &str, max_items: usize, max_len: usize) -> Vec<String> {
    let Some(items) = data.get(key).and_then(Value::as_array) else {
        return Vec::new();
    };
    items
        .iter()
        .take(max_items)
        .filter_map(coerce_text)
        .map(|s| truncate(&s, max_len))
        .collect()
}

/// Render a scalar as text; `null` is absent. Nested values keep their JSON form.
fn coerce_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// Trim, then cap at `max` characters (not bytes).
fn truncate(s: &str, max: usize) -> String {
    s.trim().chars().take(max).collect()
}
