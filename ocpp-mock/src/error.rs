use serde_json::Map;
use std::io;

use crate::messages::OcppResponseMessage;

#[derive(Debug, thiserror::Error)]
pub enum ResponderError {
    #[error(transparent)]
    Io(#[from] io::Error),

    #[error("Invalid transaction id range: {min}..={max} is empty")]
    InvalidTransactionIdRange { min: i32, max: i32 },
}

pub type ResponderResult<T, E = ResponderError> = Result<T, E>;

/// Failures while turning one input line into a response.
///
/// Only [`OcppError::UnsupportedAction`] is answered on the wire. The other
/// variants are logged and the offending line is dropped.
#[derive(Debug, thiserror::Error)]
pub enum OcppError {
    #[error("Malformed message: {details}")]
    MalformedMessage { details: String },

    #[error("Action not supported: {action}")]
    UnsupportedAction { action: String },

    #[error("Unexpected internal error: {details}")]
    UnexpectedInternal { details: String },
}

impl From<serde_json::Error> for OcppError {
    fn from(error: serde_json::Error) -> Self {
        Self::UnexpectedInternal {
            details: error.to_string(),
        }
    }
}

pub type OcppResult<T> = Result<T, OcppError>;

pub(crate) trait IntoOcppResponseMessage {
    fn into_ocpp_response(self) -> OcppResult<OcppResponseMessage>;
}

impl IntoOcppResponseMessage for OcppError {
    fn into_ocpp_response(self) -> OcppResult<OcppResponseMessage> {
        match self {
            Self::UnsupportedAction { .. } => Ok(OcppResponseMessage::CallError {
                error_code: "NotSupported".to_owned(),
                error_description: "Action not supported".to_owned(),
                error_details: Map::new(),
            }),
            error @ (Self::MalformedMessage { .. } | Self::UnexpectedInternal { .. }) => {
                Err(error)
            }
        }
    }
}
