//! Identifier normalization for imported device records.
//!
//! Device ids double as format symbols downstream, and format symbols may
//! not contain dots or start with a digit.

/// Normalize a raw device (or fallback) id into a format-safe identifier.
///
/// Dots become underscores, a leading run of digits gets an `a` prefix and
/// the result is lowercased: `"3GPP.Phone"` → `"a3gpp_phone"`.
pub fn normalize_device_id(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len() + 1);
    if raw.starts_with(|c: char| c.is_ascii_digit()) {
        out.push('a');
    }
    for c in raw.chars() {
        if c == '.' {
            out.push('_');
        } else {
            out.extend(c.to_lowercase());
        }
    }
    out
}

/// Normalize a raw detection string: backslashes become forward slashes.
pub fn normalize_detection(raw: &str) -> String {
    raw.replace('\\', "/")
}
