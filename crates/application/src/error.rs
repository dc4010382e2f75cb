use std::fmt::{Display, Formatter};

use lite_booth_domain::DomainError;

#[derive(Debug)]
pub enum ApplicationError {
    Domain(DomainError),
    InvalidInput(String),
    InvalidState(String),
    NotFound(String),
    Camera(String),
    Io(String),
    Decode(String),
    Encode(String),
}

impl ApplicationError {
    /// Errors the editor shows as a notice and keeps running after.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::Camera(_) | Self::InvalidState(_) | Self::InvalidInput(_) | Self::Domain(_)
        )
    }
}

impl Display for ApplicationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Domain(error) => write!(f, "{error}"),
            Self::InvalidInput(msg) => write!(f, "invalid input: {msg}"),
            Self::InvalidState(msg) => write!(f, "not available now: {msg}"),
            Self::NotFound(msg) => write!(f, "not found: {msg}"),
            Self::Camera(msg) => write!(f, "camera error: {msg}"),
            Self::Io(msg) => write!(f, "io error: {msg}"),
            Self::Decode(msg) => write!(f, "decode error: {msg}"),
            Self::Encode(msg) => write!(f, "encode error: {msg}"),
        }
    }
}

impl std::error::Error for ApplicationError {}

impl From<DomainError> for ApplicationError {
    fn from(value: DomainError) -> Self {
        Self::Domain(value)
    }
}
