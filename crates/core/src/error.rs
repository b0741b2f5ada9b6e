//! Error types for Prism operations.

use crate::id::CollectionId;
use alloc::string::String;
use core::fmt;

/// Result type alias for Prism operations.
pub type Result<T> = core::result::Result<T, Error>;

/// Error types for store, view and registry operations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Error {
    /// A point removal referenced a key absent from the store.
    NotFound {
        collection: CollectionId,
        key: String,
    },
    /// A delete event referenced a key present in neither partition of a
    /// view. The source and the view disagree about which keys exist.
    NotTracked {
        collection: CollectionId,
        key: String,
    },
    /// The registry could not construct an entry for a key.
    Construction {
        key: CollectionId,
        message: String,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::NotFound { collection, key } => {
                write!(f, "Key {} not found in {}", key, collection)
            }
            Error::NotTracked { collection, key } => {
                write!(f, "Key {} not tracked by view {}", key, collection)
            }
            Error::Construction { key, message } => {
                write!(f, "Cannot construct collection {}: {}", key, message)
            }
        }
    }
}

impl Error {
    /// Creates a not found error.
    pub fn not_found(collection: &CollectionId, key: impl Into<String>) -> Self {
        Error::NotFound {
            collection: collection.clone(),
            key: key.into(),
        }
    }

    /// Creates a not tracked error.
    pub fn not_tracked(collection: &CollectionId, key: impl Into<String>) -> Self {
        Error::NotTracked {
            collection: collection.clone(),
            key: key.into(),
        }
    }

    /// Creates a construction error.
    pub fn construction(key: &CollectionId, message: impl Into<String>) -> Self {
        Error::Construction {
            key: key.clone(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn test_error_display() {
        let id = CollectionId::name("accounts");

        let err = Error::not_found(&id, "@a:x");
        assert!(err.to_string().contains("not found"));
        assert!(err.to_string().contains("accounts"));

        let err = Error::not_tracked(&id, "@a:x");
        assert!(err.to_string().contains("not tracked"));

        let err = Error::construction(&id, "empty component");
        assert!(err.to_string().contains("empty component"));
    }

    #[test]
    fn test_error_constructors() {
        let id = CollectionId::name("accounts");
        let err = Error::not_tracked(&id, "@a:x");
        match err {
            Error::NotTracked { collection, key } => {
                assert_eq!(collection, id);
                assert_eq!(key, "@a:x");
            }
            _ => panic!("Wrong error type"),
        }
    }
}
