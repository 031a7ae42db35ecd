use async_trait::async_trait;
use crate::core::library::LibraryError;

#[derive(Debug)]
pub enum CommandError {
    DuplicateKey {
        message: String,
    },
    NotFound {
        message: String,
    },
    Runtime {
        message: String,
        reason_code: Option<String>,
    },
    Serialization {
        message: String,
    },
    Validation {
        message: String,
        reason_code: Option<String>,
    },
}

#[async_trait]
pub trait Command<Request, Response> {
    async fn execute(&self, req: Request) -> Result<Response, CommandError>;
}

impl CommandError {
    pub fn message(&self) -> &str {
        match self {
            CommandError::DuplicateKey { message } => message,
            CommandError::NotFound { message } => message,
            CommandError::Runtime { message, .. } => message,
            CommandError::Serialization { message } => message,
            CommandError::Validation { message, .. } => message,
        }
    }

    // Prefixes the message with the failed operation, e.g. "Failed to add book. <reason>".
    pub fn context(self, action: &str) -> Self {
        let prefix = |message: String| format!("{}. {}", action, message);
        match self {
            CommandError::DuplicateKey { message } => {
                CommandError::DuplicateKey { message: prefix(message) }
            }
            CommandError::NotFound { message } => {
                CommandError::NotFound { message: prefix(message) }
            }
            CommandError::Runtime { message, reason_code } => {
                CommandError::Runtime { message: prefix(message), reason_code }
            }
            CommandError::Serialization { message } => {
                CommandError::Serialization { message: prefix(message) }
            }
            CommandError::Validation { message, reason_code } => {
                CommandError::Validation { message: prefix(message), reason_code }
            }
        }
    }
}

impl From<LibraryError> for CommandError {
    fn from(other: LibraryError) -> Self {
        match other {
            LibraryError::DuplicateKey { message } => {
                CommandError::DuplicateKey { message }
            }
            LibraryError::NotFound { message } => {
                CommandError::NotFound { message }
            }
            LibraryError::Validation { message, reason_code } => {
                CommandError::Validation { message, reason_code }
            }
            LibraryError::Serialization { message } => {
                CommandError::Serialization { message }
            }
            LibraryError::Runtime { message, reason_code } => {
                CommandError::Runtime { message, reason_code }
            }
        }
    }
}
