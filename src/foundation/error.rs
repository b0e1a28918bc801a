/// Convenience result type used across treevis.
pub type TreevisResult<T> = Result<T, TreevisError>;

/// Top-level error taxonomy used by the frame loop and its collaborators.
#[derive(thiserror::Error, Debug)]
pub enum TreevisError {
    /// Invalid user-provided data (topology files, configuration, colors).
    #[error("validation error: {0}")]
    Validation(String),

    /// A pattern generator failed to be created or to advance.
    #[error("pattern error: {0}")]
    Pattern(String),

    /// The interpreter could not be invoked or returned unusable data.
    #[error("interpreter error: {0}")]
    Interpreter(String),

    /// A collaborator broke a size or shape contract (e.g. buffer length).
    #[error("contract violation: {0}")]
    Contract(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl TreevisError {
    /// Build a [`TreevisError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`TreevisError::Pattern`] value.
    pub fn pattern(msg: impl Into<String>) -> Self {
        Self::Pattern(msg.into())
    }

    /// Build a [`TreevisError::Interpreter`] value.
    pub fn interpreter(msg: impl Into<String>) -> Self {
        Self::Interpreter(msg.into())
    }

    /// Build a [`TreevisError::Contract`] value.
    pub fn contract(msg: impl Into<String>) -> Self {
        Self::Contract(msg.into())
    }

    /// Build a [`TreevisError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
