//! Small string and list predicates.

use uuid::Uuid;

/// Length of a GUID in its simple form: 32 hex digits, no hyphens.
const SIMPLE_GUID_LEN: usize = 32;

#[derive(Debug, thiserror::Error)]
pub enum GuidError {
    #[error("expected 32 hex digits without hyphens, got {len} characters")]
    NotSimpleForm { len: usize },
    #[error("invalid GUID: {0}")]
    Invalid(#[from] uuid::Error),
}

/// True if `value` is empty or whitespace only.
pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// True if `value` has at least one non-whitespace character.
pub fn has_value(value: &str) -> bool {
    !is_blank(value)
}

/// Case-insensitive membership test.
pub fn contains_ignore_case<S: AsRef<str>>(list: &[S], term: &str) -> bool {
    list.iter().any(|item| equals_ignore_case(item.as_ref(), term))
}

pub fn has_entries<T>(list: &[T]) -> bool {
    !list.is_empty()
}

/// Unicode-aware case-insensitive equality.
pub fn equals_ignore_case(a: &str, b: &str) -> bool {
    a.eq_ignore_ascii_case(b) || a.to_lowercase() == b.to_lowercase()
}

/// True if `value` parses as a 32-bit signed integer.
pub fn is_int(value: &str) -> bool {
    value.parse::<i32>().is_ok()
}

/// Parse a GUID written as 32 hex digits (e.g. `67e5504410b1426f9247bb680e5fe0c8`).
///
/// Hyphenated, braced and URN forms are rejected.
pub fn to_guid(value: &str) -> Result<Uuid, GuidError> {
    if value.len() != SIMPLE_GUID_LEN {
        return Err(GuidError::NotSimpleForm { len: value.len() });
    }
    Ok(Uuid::try_parse(value)?)
}
