//! Error types for attribute processing.

/// Error raised while applying an attribute modifier to a tag.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum ProcessorError {
    /// The modifier produced no target mapping at all (as opposed to an empty one).
    ///
    /// The tag is left untouched when this is returned.
    #[error("Null new attribute value map specified for: \"{attribute}\"")]
    MissingTargetMapping {
        /// Name of the directive attribute being processed.
        attribute: String,
    },
}
