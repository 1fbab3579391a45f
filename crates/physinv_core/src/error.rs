#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum DecodeError {
    #[error("failed to decode {entity} payload: {message}")]
    Malformed {
        entity: &'static str,
        message: String,
    },
    #[error("service returned error for {entity}: {code}: {message}")]
    Service {
        entity: &'static str,
        code: String,
        message: String,
    },
}

impl DecodeError {
    pub(crate) fn malformed(entity: &'static str, message: impl Into<String>) -> Self {
        Self::Malformed {
            entity,
            message: message.into(),
        }
    }
}
