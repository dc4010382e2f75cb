use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    NonFiniteFilterValue(&'static str),
    FilterValueOutOfRange { channel: &'static str, value: f32 },
    EmptySource { width: u32, height: u32 },
    FrameSizeMismatch { expected: usize, actual: usize },
    UnknownPreset(String),
    InvalidAspectRatio(String),
    InvalidFilterString(String),
}

impl Display for DomainError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NonFiniteFilterValue(name) => write!(f, "filter channel {name} must be finite"),
            Self::FilterValueOutOfRange { channel, value } => {
                write!(f, "filter channel {channel} out of range, got {value}")
            }
            Self::EmptySource { width, height } => {
                write!(f, "source image must be non-empty, got {width}x{height}")
            }
            Self::FrameSizeMismatch { expected, actual } => {
                write!(f, "frame needs {expected} pixels, got {actual}")
            }
            Self::UnknownPreset(name) => write!(f, "unknown preset: {name}"),
            Self::InvalidAspectRatio(value) => write!(f, "invalid aspect ratio: {value}"),
            Self::InvalidFilterString(msg) => write!(f, "invalid filter string: {msg}"),
        }
    }
}

impl std::error::Error for DomainError {}
