use std::fmt;

/// Result alias for facade operations that fail before a worker is ever
/// reached (§10.2). Worker failures never surface here — they become
/// `AgentOSResponse` envelopes instead.
pub type Result<T> = std::result::Result<T, Error>;

/// Programmer-misuse errors at the facade boundary (§10.2): a bad session
/// id.
#[derive(Debug)]
pub enum Error {
    SessionNotFound(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::SessionNotFound(id) => write!(f, "Session not found: {id}"),
        }
    }
}

impl std::error::Error for Error {}
