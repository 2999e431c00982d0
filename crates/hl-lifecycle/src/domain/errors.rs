//! # Domain Errors
//!
//! Error types for the house lifecycle core.
//!
//! Every failure is terminal for the current invocation. Messages are short
//! and name the violated rule; `LifecycleError::kind` gives hosts a stable
//! machine-readable code to attach alongside the message.

use thiserror::Error;

/// Errors raised by a [`LedgerStore`](crate::ports::LedgerStore) backend.
#[derive(Debug, Error)]
pub enum StoreError {
    /// I/O error during read/write.
    #[error("ledger I/O error: {0}")]
    Io(String),

    /// Stored bytes could not be loaded by the backend itself.
    #[error("ledger corruption: {0}")]
    Corruption(String),

    /// Internal lock poisoned by a panicking writer.
    #[error("ledger lock poisoned")]
    LockPoisoned,
}

/// Machine-readable error classification.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// House identifier does not match the required shape.
    InvalidIdentifier,
    /// A house with the identifier already exists.
    AlreadyExists,
    /// Stored house record could not be decoded.
    CorruptRecord,
    /// Registry record could not be decoded or encoded.
    RegistryCorrupt,
    /// Caller role, ownership or lifecycle state forbids the operation.
    PermissionDenied,
    /// No house under the identifier.
    NotFound,
    /// Ledger store failed.
    PersistenceError,
    /// A listed house could not be loaded.
    AssetRetrievalFailed,
    /// Identifier already present in the registry.
    DuplicateIdentifier,
    /// Wrong number of invocation arguments.
    BadArgumentCount,
    /// Function name not supported.
    UnknownFunction,
    /// Identity resolver has no entry for the name.
    UnknownIdentity,
    /// Role string outside the vocabulary.
    InvalidAffiliation,
    /// Transfer requires a price.
    MissingPrice,
}

impl ErrorKind {
    /// Stable snake_case code.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::InvalidIdentifier => "invalid_identifier",
            ErrorKind::AlreadyExists => "already_exists",
            ErrorKind::CorruptRecord => "corrupt_record",
            ErrorKind::RegistryCorrupt => "registry_corrupt",
            ErrorKind::PermissionDenied => "permission_denied",
            ErrorKind::NotFound => "not_found",
            ErrorKind::PersistenceError => "persistence_error",
            ErrorKind::AssetRetrievalFailed => "asset_retrieval_failed",
            ErrorKind::DuplicateIdentifier => "duplicate_identifier",
            ErrorKind::BadArgumentCount => "bad_argument_count",
            ErrorKind::UnknownFunction => "unknown_function",
            ErrorKind::UnknownIdentity => "unknown_identity",
            ErrorKind::InvalidAffiliation => "invalid_affiliation",
            ErrorKind::MissingPrice => "missing_price",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle error types.
#[derive(Debug, Error)]
pub enum LifecycleError {
    /// Identifier is not two letters followed by seven digits.
    #[error("Invalid houseID {0:?}: expected two letters followed by seven digits")]
    InvalidIdentifier(String),

    /// A house with this identifier is already on the ledger.
    #[error("House already exists: {0}")]
    AlreadyExists(String),

    /// Stored house record does not decode.
    #[error("Corrupt house record at {key}: {reason}")]
    CorruptRecord {
        /// Ledger key of the record.
        key: String,
        /// Decoder message.
        reason: String,
    },

    /// Stored registry record does not decode.
    #[error("Corrupt house registry: {0}")]
    RegistryCorrupt(String),

    /// Role or ownership check failed.
    #[error("Permission denied. {operation}: {reason}")]
    PermissionDenied {
        /// Operation that was refused.
        operation: String,
        /// Which rule was violated.
        reason: String,
    },

    /// No record under the identifier.
    #[error("House not found: {0}")]
    NotFound(String),

    /// Store read or write failed.
    #[error("Persistence error: {0}")]
    PersistenceError(#[from] StoreError),

    /// A registered house could not be loaded during a listing.
    #[error("Failed to retrieve house {house_id}: {reason}")]
    AssetRetrievalFailed {
        /// Identifier listed in the registry.
        house_id: String,
        /// Underlying failure.
        reason: String,
    },

    /// Identifier already present in the registry.
    #[error("Duplicate houseID in registry: {0}")]
    DuplicateIdentifier(String),

    /// Wrong number of invocation arguments.
    #[error("Incorrect number of arguments for {function}: expected {expected}, got {got}")]
    BadArgumentCount {
        /// Function name as invoked.
        function: String,
        /// Expected arity description.
        expected: String,
        /// Supplied argument count.
        got: usize,
    },

    /// Function name not supported by the dispatcher.
    #[error("Received unknown function invocation: {0}")]
    UnknownFunction(String),

    /// Identity resolver has no entry for the name.
    #[error("Unknown identity: {0:?}")]
    UnknownIdentity(String),

    /// Affiliation string outside the renting vocabulary.
    #[error("Invalid affiliation {0:?}: expected regulator, house_owner, agent_company or leasee")]
    InvalidAffiliation(String),

    /// Transfer requires a price and none was supplied.
    #[error("{0} requires a price")]
    MissingPrice(String),
}

impl LifecycleError {
    /// Build a permission error.
    pub fn denied(operation: impl Into<String>, reason: impl Into<String>) -> Self {
        LifecycleError::PermissionDenied {
            operation: operation.into(),
            reason: reason.into(),
        }
    }

    /// Machine-readable classification of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            LifecycleError::InvalidIdentifier(_) => ErrorKind::InvalidIdentifier,
            LifecycleError::AlreadyExists(_) => ErrorKind::AlreadyExists,
            LifecycleError::CorruptRecord { .. } => ErrorKind::CorruptRecord,
            LifecycleError::RegistryCorrupt(_) => ErrorKind::RegistryCorrupt,
            LifecycleError::PermissionDenied { .. } => ErrorKind::PermissionDenied,
            LifecycleError::NotFound(_) => ErrorKind::NotFound,
            LifecycleError::PersistenceError(_) => ErrorKind::PersistenceError,
            LifecycleError::AssetRetrievalFailed { .. } => ErrorKind::AssetRetrievalFailed,
            LifecycleError::DuplicateIdentifier(_) => ErrorKind::DuplicateIdentifier,
            LifecycleError::BadArgumentCount { .. } => ErrorKind::BadArgumentCount,
            LifecycleError::UnknownFunction(_) => ErrorKind::UnknownFunction,
            LifecycleError::UnknownIdentity(_) => ErrorKind::UnknownIdentity,
            LifecycleError::InvalidAffiliation(_) => ErrorKind::InvalidAffiliation,
            LifecycleError::MissingPrice(_) => ErrorKind::MissingPrice,
        }
    }
}
