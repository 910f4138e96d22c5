use crate::{expression::error::ExprError, matching::pattern::PatternError};

/// Convenience result type used across kinema.
pub type KinemaResult<T> = Result<T, KinemaError>;

/// Top-level error taxonomy used by library APIs.
#[derive(thiserror::Error, Debug)]
pub enum KinemaError {
    /// Invalid template or part-list data.
    #[error("validation error: {0}")]
    Validation(String),

    /// A primitive name that is not part of the closed primitive set.
    ///
    /// Templates that went through [`crate::validate`] never produce this at parse time.
    #[error("unknown primitive '{0}'")]
    UnknownPrimitive(String),

    /// A parameter formula failed to parse or evaluate.
    #[error("expression error in {context}: {source}")]
    Expression {
        /// Where the formula lives, e.g. `part_rules[1].params.amp`.
        context: String,
        /// Underlying evaluator error.
        #[source]
        source: ExprError,
    },

    /// A rule match pattern failed to compile.
    #[error("pattern error: {0}")]
    Pattern(#[from] PatternError),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl KinemaError {
    /// Build a [`KinemaError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`KinemaError::UnknownPrimitive`] value.
    pub fn unknown_primitive(name: impl Into<String>) -> Self {
        Self::UnknownPrimitive(name.into())
    }

    /// Build a [`KinemaError::Expression`] value tagged with its location.
    pub fn expression(context: impl Into<String>, source: ExprError) -> Self {
        Self::Expression {
            context: context.into(),
            source,
        }
    }

    /// Build a [`KinemaError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
