//! SessionError for the session context

/// Error type for session data that cannot be interpreted.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    /// The role name is not one of the known roles.
    #[error("Unknown role '{0}'")]
    UnknownRole(String),
}
