use std::fmt;

// === TransportError ===

/// Errors raised while talking to the search or session service.
#[derive(Debug, Clone, PartialEq)]
pub enum TransportError {
    /// The request could not be sent or the connection failed.
    Network(String),
    /// The server answered with a non-success status code.
    Status(u16),
    /// The response body could not be decoded.
    Decode(String),
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportError::Network(msg) => write!(f, "Network Error: {}", msg),
            TransportError::Status(code) => {
                write!(f, "Request failed with status code {}", code)
            }
            TransportError::Decode(msg) => write!(f, "Malformed response: {}", msg),
        }
    }
}

impl std::error::Error for TransportError {}

// === SessionError ===

/// Errors related to session collection operations.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionError {
    /// The underlying request failed.
    Transport(TransportError),
    /// The operation is not supported for the given view.
    InvalidView(String),
    /// The record cannot be sent (e.g. an empty URL).
    InvalidRecord(String),
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::Transport(err) => write!(f, "{}", err),
            SessionError::InvalidView(view) => {
                write!(f, "Unsupported session view: {}", view)
            }
            SessionError::InvalidRecord(msg) => write!(f, "Invalid session record: {}", msg),
        }
    }
}

impl std::error::Error for SessionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SessionError::Transport(err) => Some(err),
            _ => None,
        }
    }
}

impl From<TransportError> for SessionError {
    fn from(err: TransportError) -> Self {
        SessionError::Transport(err)
    }
}

// === SearchError ===

/// Errors related to running a search query.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchError {
    /// The underlying request failed.
    Transport(TransportError),
    /// The query was empty after trimming.
    EmptyQuery,
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchError::Transport(err) => write!(f, "{}", err),
            SearchError::EmptyQuery => write!(f, "Search query is empty"),
        }
    }
}

impl std::error::Error for SearchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SearchError::Transport(err) => Some(err),
            SearchError::EmptyQuery => None,
        }
    }
}

impl From<TransportError> for SearchError {
    fn from(err: TransportError) -> Self {
        SearchError::Transport(err)
    }
}

// === SettingsError ===

/// Errors related to client settings management.
#[derive(Debug, Clone, PartialEq)]
pub enum SettingsError {
    /// An I/O error occurred while reading or writing settings.
    IoError(String),
    /// Failed to serialize or deserialize settings.
    SerializationError(String),
    /// The provided settings key is unknown.
    InvalidKey(String),
    /// The provided settings value is invalid.
    InvalidValue(String),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::IoError(msg) => write!(f, "Settings I/O error: {}", msg),
            SettingsError::SerializationError(msg) => {
                write!(f, "Settings serialization error: {}", msg)
            }
            SettingsError::InvalidKey(key) => write!(f, "Invalid settings key: {}", key),
            SettingsError::InvalidValue(msg) => {
                write!(f, "Invalid settings value: {}", msg)
            }
        }
    }
}

impl std::error::Error for SettingsError {}
