pub const VALIDATION_MESSAGE: &str = "Please enter a theme or moment to generate your pack.";
pub const GENERIC_FAILURE_MESSAGE: &str = "Generation failed. Please try again.";
pub const UNREADABLE_PACK_MESSAGE: &str = "The server returned an unreadable pack.";
pub const LOOKUP_MESSAGE: &str = "Unable to load saved pack. Please generate a new one.";

/// Failures of the persistent key-value store. Never shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("storage unavailable")]
    Unavailable,
    #[error("storage read failed: {0}")]
    Read(String),
    #[error("storage write failed: {0}")]
    Write(String),
}

/// A request that never produced a response (network failure, aborted fetch).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct TransportError(pub String);

/// Errors surfaced to the user. `Display` is the exact message shown.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AppError {
    #[error("{}", VALIDATION_MESSAGE)]
    Validation,
    #[error("{0}")]
    Transport(String),
    #[error("{}", LOOKUP_MESSAGE)]
    Lookup { pack_id: String },
}
