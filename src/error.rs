use thiserror::Error;

pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ServiceError {
    #[error("{error_message}")]
    BadRequest { error_message: String },

    #[error("{error_message}")]
    Unauthorized { error_message: String },

    #[error("{error_message}")]
    Conflict { error_message: String },

    #[error("{error_message}")]
    InternalServerError { error_message: String },
}

impl ServiceError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ServiceError::BadRequest {
            error_message: message.into(),
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        ServiceError::Unauthorized {
            error_message: message.into(),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        ServiceError::Conflict {
            error_message: message.into(),
        }
    }

    pub fn internal_server_error(message: impl Into<String>) -> Self {
        ServiceError::InternalServerError {
            error_message: message.into(),
        }
    }

    /// The human-readable message carried by any variant.
    pub fn message(&self) -> &str {
        match self {
            ServiceError::BadRequest { error_message }
            | ServiceError::Unauthorized { error_message }
            | ServiceError::Conflict { error_message }
            | ServiceError::InternalServerError { error_message } => error_message,
        }
    }
}

/// Failure reading from the persisted key-value store.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("malformed value for key {key}")]
    Malformed { key: String },
}

impl From<StoreError> for ServiceError {
    fn from(err: StoreError) -> Self {
        ServiceError::internal_server_error(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_accessor() {
        assert_eq!(ServiceError::bad_request("bad").message(), "bad");
        assert_eq!(ServiceError::conflict("dup").to_string(), "dup");
    }

    #[test]
    fn test_store_error_conversion() {
        let err: ServiceError = StoreError::Unavailable("offline".to_string()).into();
        assert!(matches!(err, ServiceError::InternalServerError { .. }));
        assert_eq!(err.message(), "store unavailable: offline");
    }
}
