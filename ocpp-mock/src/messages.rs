use rust_ocpp::v1_6::{
    messages::{
        authorize::{AuthorizeRequest, AuthorizeResponse},
        boot_notification::{BootNotificationRequest, BootNotificationResponse},
        change_configuration::ChangeConfigurationResponse,
        clear_cache::ClearCacheResponse,
        data_transfer::{DataTransferRequest, DataTransferResponse},
        get_configuration::GetConfigurationResponse,
        heart_beat::HeartbeatResponse,
        meter_values::{MeterValuesRequest, MeterValuesResponse},
        start_transaction::{StartTransactionRequest, StartTransactionResponse},
        status_notification::{StatusNotificationRequest, StatusNotificationResponse},
        stop_transaction::{StopTransactionRequest, StopTransactionResponse},
    },
    types::{AuthorizationStatus, IdTagInfo},
};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

use crate::{
    envelope::{Envelope, Payload},
    error::{OcppError, OcppResult},
};

pub(crate) mod authorize;
pub(crate) mod boot_notification;
pub(crate) mod change_configuration;
pub(crate) mod clear_cache;
pub(crate) mod data_transfer;
pub(crate) mod get_configuration;
pub(crate) mod heartbeat;
pub(crate) mod meter_values;
pub(crate) mod start_transaction;
pub(crate) mod status_notification;
pub(crate) mod stop_transaction;

use change_configuration::ChangeConfigurationRequest;
use get_configuration::GetConfigurationRequest;

/// Every action the responder knows, with its request payload.
///
/// Canned actions answer whatever they are sent, so their request is only
/// present when the payload happens to match the OCPP 1.6 type. The two
/// configuration actions read their payload and require it to deserialize.
#[derive(Debug)]
pub(crate) enum OcppRequestMessage {
    BootNotification(Option<BootNotificationRequest>),
    Heartbeat,
    Authorize(Option<AuthorizeRequest>),
    StatusNotification(Option<StatusNotificationRequest>),
    StartTransaction(Option<StartTransactionRequest>),
    MeterValues(Option<MeterValuesRequest>),
    StopTransaction(Option<StopTransactionRequest>),
    DataTransfer(Option<DataTransferRequest>),
    ClearCache,
    ChangeConfiguration(ChangeConfigurationRequest),
    GetConfiguration(GetConfigurationRequest),
    Unsupported(String),
}

impl OcppRequestMessage {
    pub(crate) fn parse(action: &str, payload: Payload) -> OcppResult<Self> {
        let message = match action {
            "BootNotification" => Self::BootNotification(conforming(action, payload)),
            "Heartbeat" => Self::Heartbeat,
            "Authorize" => Self::Authorize(conforming(action, payload)),
            "StatusNotification" => Self::StatusNotification(conforming(action, payload)),
            "StartTransaction" => Self::StartTransaction(conforming(action, payload)),
            "MeterValues" => Self::MeterValues(conforming(action, payload)),
            "StopTransaction" => Self::StopTransaction(conforming(action, payload)),
            "DataTransfer" => Self::DataTransfer(conforming(action, payload)),
            "ClearCache" => Self::ClearCache,
            "ChangeConfiguration" => Self::ChangeConfiguration(required(action, payload)?),
            "GetConfiguration" => Self::GetConfiguration(required(action, payload)?),
            _ => Self::Unsupported(action.to_owned()),
        };
        Ok(message)
    }
}

fn conforming<T: DeserializeOwned>(action: &str, payload: Payload) -> Option<T> {
    match serde_json::from_value(Value::Object(payload)) {
        Ok(request) => Some(request),
        Err(error) => {
            tracing::debug!("{action} payload is not a valid OCPP 1.6 request ({error}), answering anyway");
            None
        }
    }
}

fn required<T: DeserializeOwned>(action: &str, payload: Payload) -> OcppResult<T> {
    serde_json::from_value(Value::Object(payload)).map_err(|error| OcppError::UnexpectedInternal {
        details: format!("Failed to deserialize {action} payload: {error}"),
    })
}

#[derive(Debug)]
pub(crate) enum OcppResponseMessage {
    BootNotification(BootNotificationResponse),
    Heartbeat(HeartbeatResponse),
    Authorize(AuthorizeResponse),
    StatusNotification(StatusNotificationResponse),
    StartTransaction(StartTransactionResponse),
    MeterValues(MeterValuesResponse),
    StopTransaction(StopTransactionResponse),
    DataTransfer(DataTransferResponse),
    ClearCache(ClearCacheResponse),
    ChangeConfiguration(ChangeConfigurationResponse),
    GetConfiguration(GetConfigurationResponse),
    CallError {
        error_code: String,
        error_description: String,
        error_details: Payload,
    },
}

impl OcppResponseMessage {
    pub(crate) fn into_envelope(self, unique_id: &str) -> OcppResult<Envelope> {
        let payload = match self {
            Self::BootNotification(payload) => to_payload(&payload)?,
            Self::Heartbeat(payload) => to_payload(&payload)?,
            Self::Authorize(payload) => to_payload(&payload)?,
            Self::StatusNotification(payload) => to_payload(&payload)?,
            Self::StartTransaction(payload) => to_payload(&payload)?,
            Self::MeterValues(payload) => to_payload(&payload)?,
            Self::StopTransaction(payload) => to_payload(&payload)?,
            Self::DataTransfer(payload) => to_payload(&payload)?,
            Self::ClearCache(payload) => to_payload(&payload)?,
            Self::ChangeConfiguration(payload) => to_payload(&payload)?,
            Self::GetConfiguration(payload) => to_payload(&payload)?,
            Self::CallError {
                error_code,
                error_description,
                error_details,
            } => {
                return Ok(Envelope::CallError {
                    unique_id: unique_id.to_owned(),
                    error_code,
                    error_description,
                    error_details,
                })
            }
        };
        Ok(Envelope::call_result(unique_id, payload))
    }
}

fn to_payload<P: Serialize>(payload: &P) -> OcppResult<Payload> {
    match serde_json::to_value(payload)? {
        Value::Object(object) => Ok(object),
        // Field-less response types may serialize as unit.
        Value::Null => Ok(Payload::new()),
        other => Err(OcppError::UnexpectedInternal {
            details: format!("Response payload is not an object: {other}"),
        }),
    }
}

pub(crate) fn accepted_id_tag_info() -> IdTagInfo {
    IdTagInfo {
        expiry_date: None,
        parent_id_tag: None,
        status: AuthorizationStatus::Accepted,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn payload(value: Value) -> Payload {
        match value {
            Value::Object(object) => object,
            other => panic!("test payload must be an object, got {other}"),
        }
    }

    #[test]
    fn unknown_actions_parse_as_unsupported() {
        let message = OcppRequestMessage::parse("FooBar", Payload::new()).expect("parsable");

        assert!(
            matches!(&message, OcppRequestMessage::Unsupported(action) if action == "FooBar"),
            "got {message:?}"
        );
    }

    #[test]
    fn canned_actions_tolerate_any_payload() {
        let message =
            OcppRequestMessage::parse("BootNotification", payload(json!({"unexpected": [1, 2]})))
                .expect("canned actions never fail");

        assert!(
            matches!(message, OcppRequestMessage::BootNotification(None)),
            "got {message:?}"
        );
    }

    #[test]
    fn conforming_canned_payloads_are_typed() {
        let message = OcppRequestMessage::parse(
            "BootNotification",
            payload(json!({"chargePointVendor": "VendorX", "chargePointModel": "ModelY"})),
        )
        .expect("canned actions never fail");

        assert!(
            matches!(message, OcppRequestMessage::BootNotification(Some(_))),
            "got {message:?}"
        );
    }

    #[test]
    fn configuration_payloads_of_the_wrong_type_fail() {
        let result =
            OcppRequestMessage::parse("GetConfiguration", payload(json!({"key": "HeartbeatInterval"})));

        assert!(
            matches!(result, Err(OcppError::UnexpectedInternal { .. })),
            "got {result:?}"
        );
    }

    #[test]
    fn call_error_keeps_its_fields() {
        let envelope = OcppResponseMessage::CallError {
            error_code: "NotSupported".to_owned(),
            error_description: "Action not supported".to_owned(),
            error_details: Payload::new(),
        }
        .into_envelope("id-7")
        .expect("serializable");

        assert_eq!(
            envelope,
            Envelope::call_error("id-7", "NotSupported", "Action not supported")
        );
    }

    #[test]
    fn empty_responses_become_empty_objects() {
        let envelope = OcppResponseMessage::MeterValues(MeterValuesResponse {})
            .into_envelope("id-8")
            .expect("serializable");

        assert_eq!(envelope, Envelope::call_result("id-8", Payload::new()));
    }
}
