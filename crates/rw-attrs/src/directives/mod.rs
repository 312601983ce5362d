//! Built-in attribute modifier directives.
//!
//! Directive values are read from the directive attribute itself and are
//! expected to be already evaluated by the template engine.
//!
//! | Directive | Target | Strategy | Empty result |
//! |-----------|--------|----------|--------------|
//! | `prefix:classappend` | `class` | append with space | removed |
//! | `prefix:styleappend` | `style` | append with space | removed |
//! | `prefix:attr` | each assignment | substitution | kept |
//! | `prefix:attrappend` | each assignment | append | kept |
//! | `prefix:attrprepend` | each assignment | prepend | kept |
//! | `prefix:checked` (boolean attributes) | `checked` | substitution | removed |
//! | `prefix:value`, `prefix:name` | same name | substitution | kept |
//! | `prefix:<other>` | same name | substitution | removed |
//!
//! # Example
//!
//! ```
//! use rw_attrs::Dialect;
//! use rw_attrs::directives::process_element;
//!
//! let dialect = Dialect::default();
//! let mut el = dialect
//!     .element("input")
//!     .with_attribute("class", "field")
//!     .with_attribute("th:classappend", "error")
//!     .with_attribute("th:checked", "false")
//!     .with_attribute("th:attr", "type=checkbox title='Accept terms'");
//!
//! let applied = process_element(&dialect, &mut el).unwrap();
//!
//! assert_eq!(applied, 3);
//! assert_eq!(
//!     el.to_start_tag(),
//!     r#"<input class="field error" title="Accept terms" type="checkbox">"#
//! );
//! ```

mod assignments;
mod conditional;

use crate::dialect::Dialect;
use crate::error::ProcessorError;
use crate::modifier::{AttributeModifier, TargetValues, apply};
use crate::strategy::MergeStrategy;
use crate::tag::{Element, Tag};

use assignments::parse_assignments;
use conditional::{is_boolean_attribute, is_truthy};

/// Single-attribute targets that are kept when their value is empty.
const NON_REMOVABLE_ATTRIBUTES: &[&str] = &["value", "name"];

/// Built-in attribute modifier directive kinds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributeDirective {
    /// Append to `class`, separated by a space.
    ClassAppend,
    /// Append to `style`, separated by a space.
    StyleAppend,
    /// Set every attribute of an assignment list.
    Attr,
    /// Append to every attribute of an assignment list.
    AttrAppend,
    /// Prepend to every attribute of an assignment list.
    AttrPrepend,
    /// Set a single attribute.
    Single {
        /// Attribute to set.
        target: String,
        /// Whether an empty value removes the attribute.
        remove_if_empty: bool,
    },
    /// Set a boolean attribute to its own name, or remove it.
    Conditional {
        /// Boolean attribute name.
        target: String,
    },
}

impl AttributeDirective {
    /// Map a directive attribute name to its kind.
    ///
    /// Returns `None` for attributes without the dialect prefix.
    ///
    /// # Example
    ///
    /// ```
    /// use rw_attrs::Dialect;
    /// use rw_attrs::directives::AttributeDirective;
    ///
    /// let dialect = Dialect::default();
    /// assert_eq!(
    ///     AttributeDirective::resolve(&dialect, "th:classappend"),
    ///     Some(AttributeDirective::ClassAppend)
    /// );
    /// assert_eq!(AttributeDirective::resolve(&dialect, "class"), None);
    /// ```
    #[must_use]
    pub fn resolve(dialect: &Dialect, attribute: &str) -> Option<Self> {
        let local = dialect.case().normalize(dialect.unprefixed(attribute)?);
        let directive = match local.as_str() {
            "classappend" => Self::ClassAppend,
            "styleappend" => Self::StyleAppend,
            "attr" => Self::Attr,
            "attrappend" => Self::AttrAppend,
            "attrprepend" => Self::AttrPrepend,
            _ if is_boolean_attribute(&local) => Self::Conditional { target: local },
            _ => Self::Single {
                remove_if_empty: !NON_REMOVABLE_ATTRIBUTES.contains(&local.as_str()),
                target: local,
            },
        };
        Some(directive)
    }
}

impl AttributeModifier for AttributeDirective {
    fn target_values(&self, tag: &dyn Tag, attribute_name: &str) -> Option<TargetValues> {
        let value = tag.attribute(attribute_name);
        match self {
            Self::ClassAppend => Some(TargetValues::single("class", value.unwrap_or_default())),
            Self::StyleAppend => Some(TargetValues::single("style", value.unwrap_or_default())),
            Self::Attr | Self::AttrAppend | Self::AttrPrepend => value.map(parse_assignments),
            Self::Single { target, .. } => {
                let mut targets = TargetValues::new();
                targets.insert(target.as_str(), value.map(str::to_owned));
                Some(targets)
            }
            Self::Conditional { target } => {
                let fixed = if is_truthy(value) { target.as_str() } else { "" };
                Some(TargetValues::single(target.as_str(), fixed))
            }
        }
    }

    fn merge_strategy(&self, _tag: &dyn Tag, _attribute_name: &str, _target: &str) -> MergeStrategy {
        match self {
            Self::ClassAppend | Self::StyleAppend => MergeStrategy::AppendWithSpace,
            Self::AttrAppend => MergeStrategy::Append,
            Self::AttrPrepend => MergeStrategy::Prepend,
            Self::Attr | Self::Single { .. } | Self::Conditional { .. } => {
                MergeStrategy::Substitution
            }
        }
    }

    fn remove_if_empty(&self, _tag: &dyn Tag, _attribute_name: &str, _target: &str) -> bool {
        match self {
            Self::ClassAppend | Self::StyleAppend | Self::Conditional { .. } => true,
            Self::Attr | Self::AttrAppend | Self::AttrPrepend => false,
            Self::Single {
                remove_if_empty, ..
            } => *remove_if_empty,
        }
    }
}

/// Apply every directive attribute of `element`, in attribute name order.
///
/// Directive attributes are collected before the first one is applied, so a
/// directive value rewritten by an earlier directive is applied with its new
/// value. Returns the number of directives applied. Stops at the first error,
/// leaving directives that were not reached on the element.
///
/// # Errors
///
/// Returns the first [`ProcessorError`] raised by a directive.
pub fn process_element(dialect: &Dialect, element: &mut Element) -> Result<usize, ProcessorError> {
    apply_all(element, |name| AttributeDirective::resolve(dialect, name))
}

/// Apply every attribute of `element` that `resolve` maps to a modifier, in
/// attribute name order.
///
/// Modifiers are resolved for all attributes before the first one is applied.
/// Stops at the first error: directives sorted before the failing one stay
/// applied, the failing one and those after it stay on the element.
///
/// # Errors
///
/// Returns the first [`ProcessorError`] raised by a modifier.
pub fn apply_all<M, F>(element: &mut Element, mut resolve: F) -> Result<usize, ProcessorError>
where
    M: AttributeModifier,
    F: FnMut(&str) -> Option<M>,
{
    let modifiers: Vec<(String, M)> = element
        .attributes()
        .into_iter()
        .filter_map(|(name, _)| resolve(name).map(|m| (name.to_owned(), m)))
        .collect();

    for (name, modifier) in &modifiers {
        if let Err(e) = apply(modifier, element, name) {
            tracing::warn!(element = element.name(), attribute = %name, error = %e, "Directive failed");
            return Err(e);
        }
    }
    let applied = modifiers.len();

    tracing::debug!(
        element = element.name(),
        directives = applied,
        "Processed element"
    );

    Ok(applied)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modifier::FnModifier;
    use crate::tag::AttributeCase;
    use pretty_assertions::assert_eq;

    fn dialect() -> Dialect {
        Dialect::default()
    }

    fn run(el: &mut Element, attribute: &str) -> Result<(), ProcessorError> {
        let directive = AttributeDirective::resolve(&dialect(), attribute).unwrap();
        apply(&directive, el, attribute).map(|_| ())
    }

    #[test]
    fn test_resolve_kinds() {
        let d = dialect();
        assert_eq!(
            AttributeDirective::resolve(&d, "th:styleappend"),
            Some(AttributeDirective::StyleAppend)
        );
        assert_eq!(
            AttributeDirective::resolve(&d, "th:attrprepend"),
            Some(AttributeDirective::AttrPrepend)
        );
        assert_eq!(
            AttributeDirective::resolve(&d, "th:Checked"),
            Some(AttributeDirective::Conditional {
                target: "checked".to_owned()
            })
        );
        assert_eq!(
            AttributeDirective::resolve(&d, "th:href"),
            Some(AttributeDirective::Single {
                target: "href".to_owned(),
                remove_if_empty: true
            })
        );
        assert_eq!(
            AttributeDirective::resolve(&d, "th:value"),
            Some(AttributeDirective::Single {
                target: "value".to_owned(),
                remove_if_empty: false
            })
        );
        assert_eq!(AttributeDirective::resolve(&d, "data:href"), None);
    }

    #[test]
    fn test_resolve_case_sensitive_keeps_local_name() {
        let d = Dialect::new("svg", AttributeCase::Sensitive).unwrap();
        assert_eq!(
            AttributeDirective::resolve(&d, "svg:viewBox"),
            Some(AttributeDirective::Single {
                target: "viewBox".to_owned(),
                remove_if_empty: true
            })
        );
        assert_eq!(
            AttributeDirective::resolve(&d, "svg:ClassAppend"),
            Some(AttributeDirective::Single {
                target: "ClassAppend".to_owned(),
                remove_if_empty: true
            })
        );
    }

    #[test]
    fn test_resolve_case_sensitive_matches_names_exactly() {
        let d = Dialect::new("svg", AttributeCase::Sensitive).unwrap();
        assert_eq!(
            AttributeDirective::resolve(&d, "svg:Checked"),
            Some(AttributeDirective::Single {
                target: "Checked".to_owned(),
                remove_if_empty: true
            })
        );
        assert_eq!(
            AttributeDirective::resolve(&d, "svg:checked"),
            Some(AttributeDirective::Conditional {
                target: "checked".to_owned()
            })
        );
    }

    #[test]
    fn test_resolve_case_insensitive_normalizes_boolean_names() {
        assert_eq!(
            AttributeDirective::resolve(&dialect(), "th:DISABLED"),
            Some(AttributeDirective::Conditional {
                target: "disabled".to_owned()
            })
        );
    }

    #[test]
    fn test_class_append() {
        let mut el = dialect()
            .element("a")
            .with_attribute("class", "btn")
            .with_attribute("th:classappend", "active");

        run(&mut el, "th:classappend").unwrap();

        assert_eq!(el.attributes(), vec![("class", "btn active")]);
    }

    #[test]
    fn test_class_append_without_existing_class() {
        let mut el = dialect().element("a").with_attribute("th:classappend", "active");

        run(&mut el, "th:classappend").unwrap();

        assert_eq!(el.attributes(), vec![("class", "active")]);
    }

    #[test]
    fn test_class_append_empty_removes_nothing_to_merge() {
        let mut el = dialect().element("a").with_attribute("th:classappend", "");

        run(&mut el, "th:classappend").unwrap();

        assert_eq!(el.attribute_count(), 0);
    }

    #[test]
    fn test_style_append() {
        let mut el = dialect()
            .element("p")
            .with_attribute("style", "color:red;")
            .with_attribute("th:styleappend", "margin:0;");

        run(&mut el, "th:styleappend").unwrap();

        assert_eq!(el.attributes(), vec![("style", "color:red; margin:0;")]);
    }

    #[test]
    fn test_attr_sets_every_assignment() {
        let mut el = dialect()
            .element("img")
            .with_attribute("alt", "old")
            .with_attribute("th:attr", r#"alt="Logo" src='/logo.png' title="""#);

        run(&mut el, "th:attr").unwrap();

        assert_eq!(
            el.attributes(),
            vec![("alt", "Logo"), ("src", "/logo.png"), ("title", "")]
        );
    }

    #[test]
    fn test_attr_append_and_prepend() {
        let mut el = dialect()
            .element("a")
            .with_attribute("href", "/docs")
            .with_attribute("title", "Guide")
            .with_attribute("th:attrappend", "href=/intro")
            .with_attribute("th:attrprepend", "title='User '");

        run(&mut el, "th:attrappend").unwrap();
        run(&mut el, "th:attrprepend").unwrap();

        assert_eq!(
            el.attributes(),
            vec![("href", "/docs/intro"), ("title", "User Guide")]
        );
    }

    #[test]
    fn test_attr_without_value_is_missing_mapping() {
        let directive = AttributeDirective::Attr;
        let mut el = dialect().element("a").with_attribute("href", "/");

        let err = apply(&directive, &mut el, "th:attr").unwrap_err();

        assert_eq!(
            err,
            ProcessorError::MissingTargetMapping {
                attribute: "th:attr".to_owned()
            }
        );
        assert_eq!(el.attributes(), vec![("href", "/")]);
    }

    #[test]
    fn test_attr_empty_list_only_removes_directive() {
        let mut el = dialect()
            .element("a")
            .with_attribute("href", "/")
            .with_attribute("th:attr", "");

        run(&mut el, "th:attr").unwrap();

        assert_eq!(el.attributes(), vec![("href", "/")]);
    }

    #[test]
    fn test_conditional_true() {
        let mut el = dialect().element("input").with_attribute("th:checked", "true");

        run(&mut el, "th:checked").unwrap();

        assert_eq!(el.attributes(), vec![("checked", "checked")]);
    }

    #[test]
    fn test_conditional_false_removes_existing() {
        let mut el = dialect()
            .element("input")
            .with_attribute("checked", "checked")
            .with_attribute("th:checked", "false");

        run(&mut el, "th:checked").unwrap();

        assert_eq!(el.attribute_count(), 0);
    }

    #[test]
    fn test_single_empty_removed() {
        let mut el = dialect()
            .element("a")
            .with_attribute("href", "#")
            .with_attribute("th:href", "");

        run(&mut el, "th:href").unwrap();

        assert_eq!(el.attribute_count(), 0);
    }

    #[test]
    fn test_single_value_kept_when_empty() {
        let mut el = dialect().element("input").with_attribute("th:value", "");

        run(&mut el, "th:value").unwrap();

        assert_eq!(el.attributes(), vec![("value", "")]);
    }

    #[test]
    fn test_single_whitespace_value_preserved() {
        let mut el = dialect().element("option").with_attribute("th:label", " ");

        run(&mut el, "th:label").unwrap();

        assert_eq!(el.attributes(), vec![("label", " ")]);
    }

    #[test]
    fn test_process_element_ignores_plain_attributes() {
        let d = dialect();
        let mut el = d.element("p").with_attribute("id", "intro");

        let applied = process_element(&d, &mut el).unwrap();

        assert_eq!(applied, 0);
        assert_eq!(el.attributes(), vec![("id", "intro")]);
    }

    #[test]
    fn test_process_element_uses_rewritten_directive_value() {
        // th:attr sorts first and rewrites th:title before it is applied
        let d = dialect();
        let mut el = d
            .element("p")
            .with_attribute("th:attr", "th:title=Bye")
            .with_attribute("th:title", "Hello");

        let applied = process_element(&d, &mut el).unwrap();

        assert_eq!(applied, 2);
        assert_eq!(el.attributes(), vec![("title", "Bye")]);
    }

    #[test]
    fn test_apply_all_stops_at_first_error() {
        let d = dialect();
        let mut el = d
            .element("p")
            .with_attribute("th:a", "1")
            .with_attribute("th:b", "2")
            .with_attribute("th:c", "3");
        let resolve = |name: &str| {
            d.unprefixed(name)?;
            Some(FnModifier::new(
                |tag: &dyn Tag, name: &str| {
                    if name == "th:b" {
                        return None;
                    }
                    let value = tag.attribute(name).unwrap_or_default();
                    Some(TargetValues::single(&name[3..], value))
                },
                |_: &dyn Tag, _: &str, _: &str| MergeStrategy::Substitution,
                |_: &dyn Tag, _: &str, _: &str| false,
            ))
        };

        let err = apply_all(&mut el, resolve).unwrap_err();

        assert_eq!(
            err,
            ProcessorError::MissingTargetMapping {
                attribute: "th:b".to_owned()
            }
        );
        assert_eq!(
            el.attributes(),
            vec![("a", "1"), ("th:b", "2"), ("th:c", "3")]
        );
    }

    #[test]
    fn test_apply_all_skips_unresolved_attributes() {
        let mut el = dialect()
            .element("p")
            .with_attribute("id", "x")
            .with_attribute("th:classappend", "y");

        let applied = apply_all(&mut el, |name| {
            (name == "th:classappend").then_some(AttributeDirective::ClassAppend)
        })
        .unwrap();

        assert_eq!(applied, 1);
        assert_eq!(el.attributes(), vec![("class", "y"), ("id", "x")]);
    }
}
