use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Configuration,
    Input,
    Storage,
    Transport,
}

#[derive(Debug)]
pub struct ReservationNotifierError {
    pub kind: ErrorKind,
    pub cause: String,
    pub message: Option<String>,
}

impl ReservationNotifierError {
    pub fn new(
        kind: ErrorKind,
        cause: &str,
        message: &str,
    ) -> Self {
        Self {
            kind,
            cause: cause.to_string(),
            message: Some(message.to_string()),
        }
    }

    pub fn configuration(cause: &str) -> Self {
        Self {
            kind: ErrorKind::Configuration,
            cause: cause.to_string(),
            message: Some("Invalid delivery configuration".to_string()),
        }
    }

    pub fn input(
        cause: &str,
        message: &str,
    ) -> Self {
        Self::new(ErrorKind::Input, cause, message)
    }

    pub fn storage(
        cause: &str,
        message: &str,
    ) -> Self {
        Self::new(ErrorKind::Storage, cause, message)
    }

    pub fn is_configuration(&self) -> bool {
        self.kind == ErrorKind::Configuration
    }
}

impl std::error::Error for ReservationNotifierError {}

impl fmt::Display for ReservationNotifierError {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match &self.message {
            Some(message) => write!(f, "{}: {}", message, self.cause),
            None => write!(f, "{}", self.cause),
        }
    }
}

impl From<csv::Error> for ReservationNotifierError {
    fn from(error: csv::Error) -> Self {
        Self::input(&error.to_string(), "Failed to read reservations csv")
    }
}
