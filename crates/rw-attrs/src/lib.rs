//! Attribute modifier directives for markup templates.
//!
//! A directive attribute such as `th:classappend="active"` computes new
//! values for other attributes of the same element. This crate implements
//! the shared rewrite step every such directive goes through:
//!
//! 1. The directive supplies target attribute names and new values
//! 2. Each new value is merged with the existing one using a [`MergeStrategy`]
//! 3. Empty results are either removed or written as empty attributes
//! 4. The directive attribute is removed
//!
//! # Architecture
//!
//! - [`Tag`]: attribute access on an element, implemented by [`Element`]
//! - [`AttributeModifier`]: per-directive decisions (targets, strategy, removal)
//! - [`apply`]: the rewrite step
//! - [`directives`]: built-in directive kinds and [`process_element`](directives::process_element)
//! - [`Dialect`]: directive prefix and attribute name case policy, loadable from TOML
//!
//! Expression evaluation, directive discovery in a template tree, and
//! markup serialization are left to the surrounding engine.
//!
//! # Example
//!
//! ```
//! use rw_attrs::{apply, Dialect, Tag};
//! use rw_attrs::directives::AttributeDirective;
//!
//! let dialect = Dialect::default();
//! let mut button = dialect
//!     .element("button")
//!     .with_attribute("class", "btn")
//!     .with_attribute("th:classappend", "active");
//!
//! let directive = AttributeDirective::resolve(&dialect, "th:classappend").unwrap();
//! apply(&directive, &mut button, "th:classappend").unwrap();
//!
//! assert_eq!(button.attribute("class"), Some("btn active"));
//! assert!(!button.has_attribute("th:classappend"));
//! ```

mod dialect;
pub mod directives;
mod error;
mod modifier;
mod strategy;
mod tag;

pub use dialect::{ConfigError, Dialect};
pub use error::ProcessorError;
pub use modifier::{AttributeModifier, FnModifier, ProcessorResult, TargetValues, apply};
pub use strategy::{MergeStrategy, UnknownStrategy};
pub use tag::{AttributeCase, Element, Tag};
