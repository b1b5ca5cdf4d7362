use std::fmt;

pub type SleepResult<T> = Result<T, SleepError>;

#[derive(Debug, Clone)]
pub enum SleepError {
    TimerCreate(String),
    TimerArm(String),
    TimerWait(String),
    ClockError(String),
    ResolutionError(String),
    ConfigError(String),
    IoError(String),
    SerdeError(String),
    InvalidInput(String),
    VersionError(String),
}

impl fmt::Display for SleepError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TimerCreate(msg) => write!(f, "Timer creation failed: {}", msg),
            Self::TimerArm(msg) => write!(f, "Timer arming failed: {}", msg),
            Self::TimerWait(msg) => write!(f, "Timer wait failed: {}", msg),
            Self::ClockError(msg) => write!(f, "Clock error: {}", msg),
            Self::ResolutionError(msg) => write!(f, "Timer resolution error: {}", msg),
            Self::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            Self::IoError(msg) => write!(f, "I/O error: {}", msg),
            Self::SerdeError(msg) => write!(f, "Serialization error: {}", msg),
            Self::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            Self::VersionError(msg) => write!(f, "Version error: {}", msg),
        }
    }
}

impl std::error::Error for SleepError {}

impl From<std::io::Error> for SleepError {
    fn from(err: std::io::Error) -> Self {
        Self::IoError(err.to_string())
    }
}

impl From<serde_json::Error> for SleepError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerdeError(err.to_string())
    }
}

#[cfg(windows)]
impl From<windows::core::Error> for SleepError {
    fn from(err: windows::core::Error) -> Self {
        Self::IoError(err.message().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_prefixes() {
        let err = SleepError::TimerCreate("access denied".to_string());
        assert_eq!(err.to_string(), "Timer creation failed: access denied");

        let err = SleepError::InvalidInput("bad strategy".to_string());
        assert_eq!(err.to_string(), "Invalid input: bad strategy");
    }

    #[test]
    fn test_from_io_error() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: SleepError = io.into();
        assert!(matches!(err, SleepError::IoError(ref msg) if msg.contains("missing")));
    }

    #[test]
    fn test_from_serde_error() {
        let parse = serde_json::from_str::<u32>("not a number").unwrap_err();
        let err: SleepError = parse.into();
        assert!(matches!(err, SleepError::SerdeError(_)));
    }
}
