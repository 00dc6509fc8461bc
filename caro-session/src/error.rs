use caro_engine::CaroError;

#[derive(Debug, PartialEq, Eq)]
pub enum SessionError {
    /// A move or skill activation the rules rejected.
    Engine(CaroError),
    /// Result confirmation requested while the game is still running.
    NotFinished,
    /// Result confirmation requested a second time.
    AlreadyConfirmed,
}

impl std::fmt::Display for SessionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionError::Engine(e) => write!(f, "{e}"),
            SessionError::NotFinished => write!(f, "The game is not finished"),
            SessionError::AlreadyConfirmed => write!(f, "The result was already confirmed"),
        }
    }
}

impl std::error::Error for SessionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SessionError::Engine(e) => Some(e),
            _ => None,
        }
    }
}

impl From<CaroError> for SessionError {
    fn from(e: CaroError) -> Self {
        SessionError::Engine(e)
    }
}
