//! Scheduling errors

/// Errors raised by the scheduling engine.
///
/// Pattern parsing never produces one of these: malformed patterns degrade to
/// skipped tokens or the fallback sequence instead.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SchedulingError {
    /// A caller-supplied value is outside its accepted domain
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl SchedulingError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }
}

/// Scheduling result type
pub type Result<T> = std::result::Result<T, SchedulingError>;
