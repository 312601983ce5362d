//! Merge strategies for combining an existing attribute value with a new one.

use std::fmt;
use std::str::FromStr;

/// Policy for combining the current value of an attribute with a new value.
///
/// # Example
///
/// ```
/// use rw_attrs::MergeStrategy;
///
/// assert_eq!(MergeStrategy::AppendWithSpace.merge("btn", "active"), "btn active");
/// assert_eq!(MergeStrategy::AppendWithSpace.merge("", "active"), "active");
/// assert_eq!(MergeStrategy::Prepend.merge("a", "b"), "ba");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MergeStrategy {
    /// Replace the current value.
    Substitution,
    /// Concatenate current and new, no separator.
    Append,
    /// Concatenate current and new, separated by one space if current is non-empty.
    AppendWithSpace,
    /// Concatenate new and current, no separator.
    Prepend,
    /// Concatenate new and current, separated by one space if current is non-empty.
    PrependWithSpace,
}

impl MergeStrategy {
    /// All strategies, in declaration order.
    pub const ALL: [Self; 5] = [
        Self::Substitution,
        Self::Append,
        Self::AppendWithSpace,
        Self::Prepend,
        Self::PrependWithSpace,
    ];

    /// Combine `current` and `new`.
    ///
    /// Whitespace inside either value is kept as is. An empty `current`
    /// stands for "no existing value".
    #[must_use]
    pub fn merge(self, current: &str, new: &str) -> String {
        match self {
            Self::Substitution => new.to_owned(),
            Self::Append => concat(current, "", new),
            Self::AppendWithSpace => concat(current, separator(current), new),
            Self::Prepend => concat(new, "", current),
            Self::PrependWithSpace => concat(new, separator(current), current),
        }
    }

    /// Kebab-case name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Substitution => "substitution",
            Self::Append => "append",
            Self::AppendWithSpace => "append-with-space",
            Self::Prepend => "prepend",
            Self::PrependWithSpace => "prepend-with-space",
        }
    }
}

fn separator(current: &str) -> &'static str {
    if current.is_empty() { "" } else { " " }
}

fn concat(first: &str, sep: &str, second: &str) -> String {
    let mut out = String::with_capacity(first.len() + sep.len() + second.len());
    out.push_str(first);
    out.push_str(sep);
    out.push_str(second);
    out
}

impl fmt::Display for MergeStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown strategy name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown merge strategy: {0}")]
pub struct UnknownStrategy(pub String);

impl FromStr for MergeStrategy {
    type Err = UnknownStrategy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|strategy| strategy.as_str() == s)
            .ok_or_else(|| UnknownStrategy(s.to_owned()))
    }
}
