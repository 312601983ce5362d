//! Attribute modifier processing.
//!
//! An attribute modifier is a directive attribute (e.g. `th:classappend`)
//! that computes new values for one or more target attributes of the same
//! element. [`apply`] merges those values into the element and removes the
//! directive attribute.
//!
//! # Processing order
//!
//! For each target, in the order produced by the modifier:
//!
//! 1. The current value is read (absent counts as empty)
//! 2. The merge strategy combines current and new values
//! 3. An empty result is removed if the modifier asks for it, otherwise set
//!
//! The directive attribute is removed last, even when it was also a target.

use crate::error::ProcessorError;
use crate::strategy::MergeStrategy;
use crate::tag::Tag;

/// Target attribute names with their new values, in processing order.
///
/// A `None` value is treated as the empty string. The same name may appear
/// more than once; the last write wins.
///
/// # Example
///
/// ```
/// use rw_attrs::TargetValues;
///
/// let targets = TargetValues::new()
///     .with("title", "Hello")
///     .with_none("alt");
/// assert_eq!(targets.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TargetValues {
    items: Vec<(String, Option<String>)>,
}

impl TargetValues {
    /// Create an empty mapping.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mapping with a single target.
    #[must_use]
    pub fn single(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new().with(name, value)
    }

    /// Add a target with a value.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, Some(value.into()));
        self
    }

    /// Add a target without a value.
    #[must_use]
    pub fn with_none(mut self, name: impl Into<String>) -> Self {
        self.insert(name, None);
        self
    }

    /// Append a target.
    pub fn insert(&mut self, name: impl Into<String>, value: Option<String>) {
        self.items.push((name.into(), value));
    }

    /// Number of targets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether there are no targets.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterate over targets in processing order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.items
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_deref()))
    }
}

impl IntoIterator for TargetValues {
    type Item = (String, Option<String>);
    type IntoIter = std::vec::IntoIter<Self::Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

/// Successful outcome of processing a directive attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessorResult {
    /// The element was updated and processing continues.
    Ok,
}

/// Supplies the per-directive decisions used by [`apply`].
///
/// Every method receives the element being processed and the name of the
/// directive attribute (`attribute_name`). `target` is the attribute whose
/// value is being computed.
///
/// # Example
///
/// ```
/// use rw_attrs::{apply, AttributeCase, AttributeModifier, Element, MergeStrategy, Tag, TargetValues};
///
/// struct Highlight;
///
/// impl AttributeModifier for Highlight {
///     fn target_values(&self, _tag: &dyn Tag, _attribute_name: &str) -> Option<TargetValues> {
///         Some(TargetValues::single("class", "highlight"))
///     }
///
///     fn merge_strategy(&self, _tag: &dyn Tag, _attribute_name: &str, _target: &str) -> MergeStrategy {
///         MergeStrategy::AppendWithSpace
///     }
///
///     fn remove_if_empty(&self, _tag: &dyn Tag, _attribute_name: &str, _target: &str) -> bool {
///         true
///     }
/// }
///
/// let mut el = Element::new("p", AttributeCase::Insensitive)
///     .with_attribute("class", "note")
///     .with_attribute("x:highlight", "");
/// apply(&Highlight, &mut el, "x:highlight").unwrap();
/// assert_eq!(el.to_start_tag(), r#"<p class="note highlight">"#);
/// ```
pub trait AttributeModifier {
    /// New values keyed by target attribute name.
    ///
    /// Return `None` only when the mapping could not be produced at all;
    /// [`apply`] reports that as [`ProcessorError::MissingTargetMapping`].
    /// An empty mapping is valid and only removes the directive attribute.
    fn target_values(&self, tag: &dyn Tag, attribute_name: &str) -> Option<TargetValues>;

    /// How the new value of `target` is combined with its current value.
    fn merge_strategy(&self, tag: &dyn Tag, attribute_name: &str, target: &str) -> MergeStrategy;

    /// Whether `target` is removed instead of set when the merged value is empty.
    fn remove_if_empty(&self, tag: &dyn Tag, attribute_name: &str, target: &str) -> bool;
}

/// [`AttributeModifier`] built from three closures.
///
/// # Example
///
/// ```
/// use rw_attrs::{apply, AttributeCase, Element, FnModifier, MergeStrategy, Tag, TargetValues};
///
/// let modifier = FnModifier::new(
///     |tag: &dyn Tag, name: &str| {
///         tag.attribute(name).map(|v| TargetValues::single("title", v))
///     },
///     |_: &dyn Tag, _: &str, _: &str| MergeStrategy::Substitution,
///     |_: &dyn Tag, _: &str, _: &str| false,
/// );
///
/// let mut el = Element::new("abbr", AttributeCase::Insensitive).with_attribute("x:title", "HyperText");
/// apply(&modifier, &mut el, "x:title").unwrap();
/// assert_eq!(el.to_start_tag(), r#"<abbr title="HyperText">"#);
/// ```
pub struct FnModifier<T, S, R> {
    targets: T,
    strategy: S,
    remove_if_empty: R,
}

impl<T, S, R> FnModifier<T, S, R>
where
    T: Fn(&dyn Tag, &str) -> Option<TargetValues>,
    S: Fn(&dyn Tag, &str, &str) -> MergeStrategy,
    R: Fn(&dyn Tag, &str, &str) -> bool,
{
    /// Create a modifier from its target, strategy, and removal callbacks.
    #[must_use]
    pub fn new(targets: T, strategy: S, remove_if_empty: R) -> Self {
        Self {
            targets,
            strategy,
            remove_if_empty,
        }
    }
}

impl<T, S, R> AttributeModifier for FnModifier<T, S, R>
where
    T: Fn(&dyn Tag, &str) -> Option<TargetValues>,
    S: Fn(&dyn Tag, &str, &str) -> MergeStrategy,
    R: Fn(&dyn Tag, &str, &str) -> bool,
{
    fn target_values(&self, tag: &dyn Tag, attribute_name: &str) -> Option<TargetValues> {
        (self.targets)(tag, attribute_name)
    }

    fn merge_strategy(&self, tag: &dyn Tag, attribute_name: &str, target: &str) -> MergeStrategy {
        (self.strategy)(tag, attribute_name, target)
    }

    fn remove_if_empty(&self, tag: &dyn Tag, attribute_name: &str, target: &str) -> bool {
        (self.remove_if_empty)(tag, attribute_name, target)
    }
}

/// Apply an attribute modifier to `tag` for the directive `attribute_name`.
///
/// Merged values are never trimmed: a whitespace-only value is written as is.
/// The directive attribute is always removed on success.
///
/// # Errors
///
/// Returns [`ProcessorError::MissingTargetMapping`] if the modifier returns no
/// target mapping. The tag is not modified in that case.
pub fn apply<M: AttributeModifier + ?Sized>(
    modifier: &M,
    tag: &mut dyn Tag,
    attribute_name: &str,
) -> Result<ProcessorResult, ProcessorError> {
    let targets = modifier.target_values(&*tag, attribute_name).ok_or_else(|| {
        ProcessorError::MissingTargetMapping {
            attribute: attribute_name.to_owned(),
        }
    })?;

    tracing::debug!(
        attribute = attribute_name,
        targets = targets.len(),
        "Applying attribute modifier"
    );

    for (target, new_value) in targets {
        if target.is_empty() {
            tracing::warn!(attribute = attribute_name, "Skipping empty target attribute name");
            continue;
        }

        let current = tag.attribute(&target).unwrap_or_default();
        let strategy = modifier.merge_strategy(&*tag, attribute_name, &target);
        let merged = strategy.merge(current, new_value.as_deref().unwrap_or_default());
        let remove_if_empty = modifier.remove_if_empty(&*tag, attribute_name, &target);

        if merged.is_empty() && remove_if_empty {
            tracing::trace!(attr = %target, %strategy, "Removing empty attribute");
            tag.remove_attribute(&target);
        } else {
            tracing::trace!(attr = %target, %strategy, value = %merged, "Setting attribute");
            tag.set_attribute(&target, merged);
        }
    }

    tag.remove_attribute(attribute_name);

    Ok(ProcessorResult::Ok)
}
