use thiserror::Error;

/// Crate result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned by this crate.
///
/// Every mutating operation validates its input before touching any state,
/// so a returned error always leaves the structure unchanged.
#[derive(Debug, Error)]
pub enum Error {
    /// An entity with the same id is already present in a registry.
    #[error("entity \"{0}\" already present in registry")]
    Duplicate(String),
    /// A referenced entity, parent, or chart pair does not exist.
    #[error("not found: {0}")]
    NotFound(String),
    /// Malformed caller input: unusable id or malformed import payload.
    #[error("invalid type: {0}")]
    InvalidType(String),
}
