//! Fixed-value boolean attributes.
//!
//! Boolean HTML attributes are either present with their own name as value
//! (`checked="checked"`) or absent.

/// Boolean attributes handled as conditional directives.
const BOOLEAN_ATTRIBUTES: &[&str] = &[
    "async",
    "autofocus",
    "autoplay",
    "checked",
    "controls",
    "declare",
    "default",
    "defer",
    "disabled",
    "formnovalidate",
    "hidden",
    "ismap",
    "loop",
    "multiple",
    "novalidate",
    "nowrap",
    "open",
    "pubdate",
    "readonly",
    "required",
    "reversed",
    "scoped",
    "seamless",
    "selected",
];

/// Whether `name` is a boolean attribute.
///
/// `name` must already be normalized by the dialect's case policy.
pub(crate) fn is_boolean_attribute(name: &str) -> bool {
    BOOLEAN_ATTRIBUTES.contains(&name)
}

/// Interpret an already evaluated directive value as a condition.
///
/// Absent, empty, `false`, `off`, `no` and `0` are false; anything else is true.
pub(crate) fn is_truthy(value: Option<&str>) -> bool {
    let Some(value) = value else {
        return false;
    };
    let value = value.trim();
    !(value.is_empty()
        || value.eq_ignore_ascii_case("false")
        || value.eq_ignore_ascii_case("off")
        || value.eq_ignore_ascii_case("no")
        || value == "0")
}
