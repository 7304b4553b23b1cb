//! Error types

/// Errors raised by tree mutations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomError {
    /// No node with this id is mounted.
    #[error("node not found: {0}")]
    NodeNotFound(String),

    /// A node with this id is already mounted.
    #[error("duplicate node id: {0}")]
    DuplicateId(String),

    /// The document root cannot be replaced or removed.
    #[error("the document root cannot be replaced or removed")]
    RootImmutable,
}
